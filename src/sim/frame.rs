//! Per-frame simulation step
//!
//! Core game loop body: called once per rendered frame with the time elapsed
//! since the previous one. Step order matters; later steps read what earlier
//! ones wrote.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::collision::{bounce_axis, cap_velocity, clamp_center};
use super::state::{CollectibleKind, GameState, SessionPhase};
use super::timer::TimerAction;
use crate::config::{CollectiblePolicy, ContactPolicy, TerminalPolicy};

/// Held state of one four-way binding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Directions {
    /// Either binding activates a direction
    pub fn or(self, other: Directions) -> Directions {
        Directions {
            up: self.up || other.up,
            down: self.down || other.down,
            left: self.left || other.left,
            right: self.right || other.right,
        }
    }
}

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Arrow keys
    pub arrows: Directions,
    /// W/A/S/D
    pub wasd: Directions,
    /// Pointer/click happened since the last frame
    pub pointer_down: bool,
}

impl FrameInput {
    pub fn directions(&self, wasd_enabled: bool) -> Directions {
        if wasd_enabled {
            self.arrows.or(self.wasd)
        } else {
            self.arrows
        }
    }
}

/// Something the frame did that a host may react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    BallHitPaddle { score: u64 },
    HazardHitPaddle { health: i32 },
    CollectibleCollected { id: u32 },
    CollectibleExpired { id: u32 },
    CollectibleFellOff { id: u32 },
    CollectibleSpawned { id: u32 },
    NewHighScore { score: u64 },
    SessionEnded { score: u64 },
}

/// Outcome of one [`advance`] call
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    pub events: Vec<GameEvent>,
    /// The session entered its terminal phase during this frame
    pub ended: bool,
}

impl FrameReport {
    /// Highest new high score reached this frame, if any
    pub fn new_high_score(&self) -> Option<u64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GameEvent::NewHighScore { score } => Some(*score),
                _ => None,
            })
            .max()
    }

    pub fn count(&self, pred: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.iter().filter(|&e| pred(e)).count()
    }
}

/// Advance the game state by one rendered frame.
///
/// `elapsed` is in seconds; negative or non-finite values count as zero.
/// Paddle movement is a fixed per-frame step and ignores `elapsed`.
/// A terminal session is left untouched.
pub fn advance(state: &mut GameState, input: &FrameInput, elapsed: f32) -> FrameReport {
    let mut report = FrameReport::default();
    if state.is_over() {
        return report;
    }

    let dt = if elapsed.is_finite() && elapsed > 0.0 { elapsed } else { 0.0 };
    state.frame_count += 1;
    state.elapsed_secs += dt as f64;

    move_paddle(state, input);
    integrate_ball(state, dt);
    resolve_ball_contact(state, &mut report);
    integrate_hazard(state, dt);
    resolve_hazard_contact(state, &mut report);
    collect_collectibles(state, &mut report);
    run_collectible_lifecycle(state, dt, &mut report);
    update_high_score(state, &mut report);
    check_terminal(state, input, &mut report);

    report
}

/// Step 1: fixed displacement, then a hard clamp on each axis
fn move_paddle(state: &mut GameState, input: &FrameInput) {
    let dirs = input.directions(state.config.wasd_enabled);
    let step = state.config.paddle_step;
    let paddle = &mut state.paddle;

    // Left wins over right, up over down
    if dirs.left {
        paddle.pos.x -= step;
    } else if dirs.right {
        paddle.pos.x += step;
    }
    if dirs.up {
        paddle.pos.y -= step;
    } else if dirs.down {
        paddle.pos.y += step;
    }

    paddle.pos = clamp_center(paddle.pos, paddle.half_extent(), state.config.viewport);
}

/// Step 2: integrate and bounce. No positional correction, so the ball can
/// sit past an edge for a frame.
fn integrate_ball(state: &mut GameState, dt: f32) {
    let viewport = state.config.viewport;
    let ball = &mut state.ball;
    ball.pos += ball.vel * dt;
    ball.vel.x = bounce_axis(ball.pos.x, ball.vel.x, ball.radius, viewport.x);
    ball.vel.y = bounce_axis(ball.pos.y, ball.vel.y, ball.radius, viewport.y);
}

/// Step 3
fn resolve_ball_contact(state: &mut GameState, report: &mut FrameReport) {
    let overlapping = state.paddle.bounds().intersects(&state.ball.bounds());
    let respond = contact_response(state.config.contact, overlapping, state.ball_contact);
    state.ball_contact = overlapping;

    state.paddle.color = if overlapping {
        state.config.hit_color
    } else {
        state.default_paddle_color()
    };

    if !respond {
        return;
    }

    state.ball.vel.y = -state.ball.vel.y;
    state.score += state.config.ball_hit_reward;
    if state.config.speed_up {
        state.ball.vel = grow(
            state.ball.vel,
            state.config.speed_growth,
            state.config.ball_speed_cap,
        );
    }
    report.events.push(GameEvent::BallHitPaddle { score: state.score });
}

/// Step 4: same rule as the ball, with the star's half extents as margins
fn integrate_hazard(state: &mut GameState, dt: f32) {
    let viewport = state.config.viewport;
    let Some(hazard) = state.hazard.as_mut() else {
        return;
    };
    let half = hazard.size * 0.5;
    hazard.pos += hazard.vel * dt;
    hazard.vel.x = bounce_axis(hazard.pos.x, hazard.vel.x, half.x, viewport.x);
    hazard.vel.y = bounce_axis(hazard.pos.y, hazard.vel.y, half.y, viewport.y);
}

/// Step 5
fn resolve_hazard_contact(state: &mut GameState, report: &mut FrameReport) {
    let (Some(hazard), Some(hazard_config)) = (state.hazard.as_mut(), state.config.hazard) else {
        return;
    };

    let overlapping = state.paddle.bounds().intersects(&hazard.bounds());
    let respond = contact_response(state.config.contact, overlapping, state.hazard_contact);
    state.hazard_contact = overlapping;
    if !respond {
        return;
    }

    state.health = (state.health - hazard_config.damage).max(0);
    state.health_bar_width = state.config.health_bar_width(state.health);
    hazard.vel.y = -hazard.vel.y;

    let score = state.score;
    if state.config.speed_up && score > 0 && score % 10 == 0 {
        hazard.vel = grow(hazard.vel, state.config.speed_growth, hazard_config.speed_cap);
    }

    // Health feeds the paddle's resting color
    if !state.ball_contact {
        state.paddle.color = state.default_paddle_color();
    }
    log::debug!("Star hit paddle, health now {}", state.health);
    report.events.push(GameEvent::HazardHitPaddle {
        health: state.health,
    });
}

/// Step 6: reverse traversal so a removal never shifts an unvisited element
fn collect_collectibles(state: &mut GameState, report: &mut FrameReport) {
    let paddle = state.paddle.bounds();
    for index in (0..state.collectibles.len()).rev() {
        if !state.collectibles[index].bounds().intersects(&paddle) {
            continue;
        }
        let collected = state.remove_collectible_at(index);
        state.score += state.config.collectible_reward;
        log::debug!("Collected {:?} #{}", collected.kind, collected.id);
        report
            .events
            .push(GameEvent::CollectibleCollected { id: collected.id });
    }
}

/// Step 7: falling motion and respawn, then due timers
fn run_collectible_lifecycle(state: &mut GameState, dt: f32, report: &mut FrameReport) {
    if let CollectiblePolicy::Falling {
        target_count,
        fall_speed,
    } = state.config.collectibles
    {
        let bottom = state.config.viewport.y;
        for collectible in &mut state.collectibles {
            collectible.pos.y += fall_speed * dt;
        }
        for index in (0..state.collectibles.len()).rev() {
            let c = &state.collectibles[index];
            if c.pos.y - c.size.y * 0.5 > bottom {
                let gone = state.remove_collectible_at(index);
                report.events.push(GameEvent::CollectibleFellOff { id: gone.id });
            }
        }
        while state.collectibles.len() < target_count {
            let pos = state.random_drop_position();
            let id = state.spawn_collectible(CollectibleKind::Triangle, pos);
            report.events.push(GameEvent::CollectibleSpawned { id });
        }
    }

    for (_, action) in state.timers.advance(dt as f64 * 1000.0) {
        match action {
            TimerAction::ExpireCollectible(id) => {
                if let Some(expired) = state.remove_collectible(id) {
                    log::debug!("{:?} #{} expired", expired.kind, id);
                    report.events.push(GameEvent::CollectibleExpired { id });
                }
            }
            TimerAction::SpawnCollectible => {
                let CollectiblePolicy::Periodic { max_live, .. } = state.config.collectibles else {
                    continue;
                };
                if state.collectibles.len() >= max_live {
                    continue;
                }
                let kind = if state.rng.random_bool(0.5) {
                    CollectibleKind::Present
                } else {
                    CollectibleKind::Triangle
                };
                if let Some(id) = state.spawn_random(kind) {
                    report.events.push(GameEvent::CollectibleSpawned { id });
                }
            }
        }
    }
}

/// Step 8
fn update_high_score(state: &mut GameState, report: &mut FrameReport) {
    if state.score > state.high_score {
        state.high_score = state.score;
        report.events.push(GameEvent::NewHighScore { score: state.score });
    }
}

/// Step 9: Playing -> Terminal, at most once
fn check_terminal(state: &mut GameState, input: &FrameInput, report: &mut FrameReport) {
    let ends = match state.config.terminal {
        TerminalPolicy::HealthDepleted => state.health <= 0,
        TerminalPolicy::FirstPointer => input.pointer_down,
    };
    if !ends {
        return;
    }

    state.phase = SessionPhase::Terminal;
    state.timers.clear();
    state.expiry_timers.clear();
    state.spawn_timer = None;
    report.ended = true;
    report.events.push(GameEvent::SessionEnded { score: state.score });
    log::info!(
        "Session over after {} frames (seed {}): score {}, health {}",
        state.frame_count,
        state.seed,
        state.score,
        state.health
    );
}

fn contact_response(policy: ContactPolicy, overlapping: bool, was_overlapping: bool) -> bool {
    match policy {
        ContactPolicy::EveryFrame => overlapping,
        ContactPolicy::OnOnset => overlapping && !was_overlapping,
    }
}

/// Multiplicative speed-up followed by the per-component cap
fn grow(vel: Vec2, factor: f32, cap: f32) -> Vec2 {
    cap_velocity(vel * factor, cap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::config::{SimConfig, Variant};
    use crate::sim::state::Hazard;

    const FRAME: f32 = 1.0 / 60.0;

    fn classic() -> GameState {
        GameState::new(SimConfig::for_variant(Variant::Classic), 1, 0)
    }

    /// Survival rules without random collectibles
    fn survival_bare() -> GameState {
        let mut config = SimConfig::for_variant(Variant::Survival);
        config.collectibles = CollectiblePolicy::None;
        GameState::new(config, 1, 0)
    }

    fn park_ball(state: &mut GameState) {
        state.ball.pos = Vec2::new(900.0, 100.0);
        state.ball.vel = Vec2::ZERO;
    }

    fn park_hazard(state: &mut GameState) {
        if let Some(hazard) = state.hazard.as_mut() {
            hazard.pos = Vec2::new(100.0, 100.0);
            hazard.vel = Vec2::ZERO;
        }
    }

    fn held(left: bool, right: bool, up: bool, down: bool) -> Directions {
        Directions {
            up,
            down,
            left,
            right,
        }
    }

    #[test]
    fn test_paddle_moves_fixed_step_regardless_of_dt() {
        let mut state = classic();
        park_ball(&mut state);
        let input = FrameInput {
            arrows: held(true, false, false, false),
            ..Default::default()
        };
        advance(&mut state, &input, 0.5);
        assert_eq!(state.paddle.pos.x, 507.0);
        advance(&mut state, &input, 0.001);
        assert_eq!(state.paddle.pos.x, 502.0);
    }

    #[test]
    fn test_left_beats_right_and_up_beats_down() {
        let mut state = classic();
        park_ball(&mut state);
        let input = FrameInput {
            arrows: held(true, true, true, true),
            ..Default::default()
        };
        advance(&mut state, &input, FRAME);
        assert_eq!(state.paddle.pos, Vec2::new(507.0, 713.0));
    }

    #[test]
    fn test_wasd_ors_with_arrows_when_enabled() {
        let mut state = survival_bare();
        park_ball(&mut state);
        park_hazard(&mut state);
        let input = FrameInput {
            arrows: held(false, false, true, false),
            wasd: held(false, true, false, false),
            ..Default::default()
        };
        advance(&mut state, &input, FRAME);
        assert_eq!(state.paddle.pos, Vec2::new(517.0, 713.0));
    }

    #[test]
    fn test_wasd_ignored_in_classic() {
        let mut state = classic();
        park_ball(&mut state);
        let input = FrameInput {
            wasd: held(true, false, false, false),
            ..Default::default()
        };
        advance(&mut state, &input, FRAME);
        assert_eq!(state.paddle.pos.x, 512.0);
    }

    #[test]
    fn test_paddle_clamped_to_viewport() {
        let mut state = classic();
        park_ball(&mut state);
        state.paddle.pos = Vec2::new(102.0, 52.0);
        let input = FrameInput {
            arrows: held(true, false, true, false),
            ..Default::default()
        };
        for _ in 0..10 {
            advance(&mut state, &input, FRAME);
        }
        assert_eq!(state.paddle.pos, Vec2::new(100.0, 50.0));

        let input = FrameInput {
            arrows: held(false, true, false, true),
            ..Default::default()
        };
        for _ in 0..400 {
            advance(&mut state, &input, FRAME);
        }
        assert_eq!(state.paddle.pos, Vec2::new(924.0, 718.0));
    }

    #[test]
    fn test_ball_bounces_off_left_edge() {
        let mut state = classic();
        state.ball.pos = Vec2::new(5.0, 300.0);
        state.ball.vel = Vec2::new(-200.0, 0.0);
        advance(&mut state, &FrameInput::default(), FRAME);
        assert_eq!(state.ball.vel.x, 200.0);
        // No positional correction
        assert!(state.ball.pos.x < 5.0);
    }

    #[test]
    fn test_ball_integrates_with_elapsed_time() {
        let mut state = classic();
        state.ball.pos = Vec2::new(300.0, 300.0);
        state.ball.vel = Vec2::new(200.0, 150.0);
        advance(&mut state, &FrameInput::default(), 0.5);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 375.0));
        assert_eq!(state.ball.vel, Vec2::new(200.0, 150.0));
    }

    #[test]
    fn test_negative_elapsed_is_clamped() {
        let mut state = classic();
        let before = state.ball.pos;
        advance(&mut state, &FrameInput::default(), -1.0);
        advance(&mut state, &FrameInput::default(), f32::NAN);
        assert_eq!(state.ball.pos, before);
        assert_eq!(state.elapsed_secs, 0.0);
        assert_eq!(state.frame_count, 2);
    }

    #[test]
    fn test_ball_hit_scores_and_turns_paddle_blue() {
        let mut state = classic();
        state.ball.pos = state.paddle.pos;
        state.ball.vel = Vec2::new(0.0, 150.0);
        let report = advance(&mut state, &FrameInput::default(), 0.0);

        assert_eq!(state.score, 10);
        assert_eq!(state.ball.vel.y, -150.0);
        assert_eq!(state.paddle.color, Rgb::BLUE);
        assert_eq!(report.events[0], GameEvent::BallHitPaddle { score: 10 });

        park_ball(&mut state);
        advance(&mut state, &FrameInput::default(), 0.0);
        assert_eq!(state.paddle.color, Rgb::ORANGE);
    }

    #[test]
    fn test_sustained_overlap_scores_every_frame_by_default() {
        let mut state = classic();
        state.ball.pos = state.paddle.pos;
        state.ball.vel = Vec2::ZERO;
        for _ in 0..5 {
            advance(&mut state, &FrameInput::default(), FRAME);
        }
        assert_eq!(state.score, 50);
    }

    #[test]
    fn test_on_onset_policy_scores_once_per_contact() {
        let mut config = SimConfig::for_variant(Variant::Classic);
        config.contact = ContactPolicy::OnOnset;
        let mut state = GameState::new(config, 1, 0);
        state.ball.pos = state.paddle.pos;
        state.ball.vel = Vec2::ZERO;
        for _ in 0..5 {
            advance(&mut state, &FrameInput::default(), FRAME);
        }
        assert_eq!(state.score, 10);
        assert_eq!(state.paddle.color, Rgb::BLUE);

        // Separate, then touch again
        park_ball(&mut state);
        advance(&mut state, &FrameInput::default(), FRAME);
        state.ball.pos = state.paddle.pos;
        advance(&mut state, &FrameInput::default(), FRAME);
        assert_eq!(state.score, 20);
    }

    #[test]
    fn test_ball_speed_up_is_capped() {
        let mut state = survival_bare();
        park_hazard(&mut state);
        state.ball.pos = state.paddle.pos;
        state.ball.vel = Vec2::new(200.0, 100.0);
        advance(&mut state, &FrameInput::default(), 0.0);
        assert!((state.ball.vel.x - 210.0).abs() < 1e-3);
        assert!((state.ball.vel.y + 105.0).abs() < 1e-3);

        state.ball.vel = Vec2::new(490.0, -499.0);
        advance(&mut state, &FrameInput::default(), 0.0);
        assert_eq!(state.ball.vel, Vec2::new(500.0, 500.0));
    }

    #[test]
    fn test_hazard_hit_costs_health_and_bar_width() {
        let mut state = survival_bare();
        park_ball(&mut state);
        let paddle_pos = state.paddle.pos;
        state.hazard = Some(Hazard {
            pos: paddle_pos,
            vel: Vec2::new(0.0, 120.0),
            size: Vec2::splat(48.0),
        });

        let report = advance(&mut state, &FrameInput::default(), 0.0);
        assert_eq!(state.health, 80);
        assert_eq!(state.health_bar_width, 640.0);
        assert_eq!(state.hazard.as_ref().map(|h| h.vel.y), Some(-120.0));
        assert_eq!(report.events, vec![GameEvent::HazardHitPaddle { health: 80 }]);
        // Resting color follows health
        assert_eq!(state.paddle.color, state.config.paddle_color(80));
        assert!(state.paddle.color.r > 0);
    }

    #[test]
    fn test_hazard_bounces_off_edges_without_correction() {
        let mut state = survival_bare();
        park_ball(&mut state);
        state.hazard = Some(Hazard {
            pos: Vec2::new(30.0, 300.0),
            vel: Vec2::new(-200.0, 0.0),
            size: Vec2::splat(48.0),
        });

        // Ends 4 units inside the 24-unit margin
        advance(&mut state, &FrameInput::default(), 0.05);
        let hazard = state.hazard.clone().expect("star");
        assert_eq!(hazard.vel, Vec2::new(200.0, 0.0));
        assert_eq!(hazard.pos, Vec2::new(20.0, 300.0));

        // Bottom margin, well away from the paddle
        state.hazard = Some(Hazard {
            pos: Vec2::new(900.0, 750.0),
            vel: Vec2::new(0.0, 50.0),
            size: Vec2::splat(48.0),
        });
        advance(&mut state, &FrameInput::default(), 0.0);
        let hazard = state.hazard.clone().expect("star");
        assert_eq!(hazard.vel, Vec2::new(0.0, -50.0));
        assert_eq!(hazard.pos, Vec2::new(900.0, 750.0));
        assert_eq!(state.health, 100);
    }

    #[test]
    fn test_hazard_speeds_up_only_on_positive_multiple_of_ten() {
        let mut state = survival_bare();
        park_ball(&mut state);
        let paddle_pos = state.paddle.pos;
        state.hazard = Some(Hazard {
            pos: paddle_pos,
            vel: Vec2::new(100.0, 100.0),
            size: Vec2::splat(48.0),
        });

        advance(&mut state, &FrameInput::default(), 0.0);
        assert_eq!(state.hazard.as_ref().map(|h| h.vel), Some(Vec2::new(100.0, -100.0)));

        state.score = 20;
        advance(&mut state, &FrameInput::default(), 0.0);
        let vel = state.hazard.as_ref().map(|h| h.vel).unwrap_or_default();
        assert!((vel.x - 105.0).abs() < 1e-3);
        assert!((vel.y - 105.0).abs() < 1e-3);

        if let Some(h) = state.hazard.as_mut() {
            h.vel = Vec2::new(-590.0, 590.0);
        }
        advance(&mut state, &FrameInput::default(), 0.0);
        assert_eq!(state.hazard.as_ref().map(|h| h.vel), Some(Vec2::new(-600.0, -600.0)));
    }

    #[test]
    fn test_health_depletion_ends_session_once() {
        let mut state = survival_bare();
        park_ball(&mut state);
        let paddle_pos = state.paddle.pos;
        state.hazard = Some(Hazard {
            pos: paddle_pos,
            vel: Vec2::ZERO,
            size: Vec2::splat(48.0),
        });

        let mut endings = 0;
        for _ in 0..10 {
            let report = advance(&mut state, &FrameInput::default(), FRAME);
            endings += report.count(|e| matches!(e, GameEvent::SessionEnded { .. }));
        }
        assert_eq!(endings, 1);
        assert_eq!(state.health, 0);
        assert_eq!(state.health_bar_width, 0.0);
        assert_eq!(state.phase, SessionPhase::Terminal);
        // Five hits took it to zero, nothing ran afterwards
        assert_eq!(state.frame_count, 5);
    }

    #[test]
    fn test_pointer_ends_classic_session() {
        let mut state = classic();
        advance(&mut state, &FrameInput::default(), FRAME);
        assert!(!state.is_over());

        let click = FrameInput {
            pointer_down: true,
            ..Default::default()
        };
        let report = advance(&mut state, &click, FRAME);
        assert!(report.ended);
        assert!(state.is_over());

        let report = advance(&mut state, &click, FRAME);
        assert!(!report.ended);
        assert!(report.events.is_empty());
    }

    #[test]
    fn test_pointer_ignored_under_health_policy() {
        let mut state = survival_bare();
        park_ball(&mut state);
        park_hazard(&mut state);
        let click = FrameInput {
            pointer_down: true,
            ..Default::default()
        };
        advance(&mut state, &click, FRAME);
        assert!(!state.is_over());
    }

    #[test]
    fn test_collecting_removes_exactly_one() {
        let mut state = survival_bare();
        park_ball(&mut state);
        park_hazard(&mut state);
        let paddle_pos = state.paddle.pos;
        let far_a = state.spawn_collectible(CollectibleKind::Present, Vec2::new(100.0, 300.0));
        let hit = state.spawn_collectible(CollectibleKind::Present, paddle_pos);
        let far_b = state.spawn_collectible(CollectibleKind::Triangle, Vec2::new(900.0, 300.0));

        let report = advance(&mut state, &FrameInput::default(), 0.0);

        assert_eq!(state.score, 2000);
        let ids: Vec<_> = state.collectibles.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![far_a, far_b]);
        assert_eq!(
            report.count(|e| matches!(e, GameEvent::CollectibleCollected { .. })),
            1
        );
        assert!(report.events.contains(&GameEvent::CollectibleCollected { id: hit }));
    }

    #[test]
    fn test_adjacent_overlapping_collectibles_all_collected() {
        let mut state = survival_bare();
        park_ball(&mut state);
        park_hazard(&mut state);
        let p = state.paddle.pos;
        let keep = state.spawn_collectible(CollectibleKind::Present, Vec2::new(100.0, 300.0));
        for dx in [-60.0, -20.0, 20.0, 60.0] {
            state.spawn_collectible(CollectibleKind::Present, p + Vec2::new(dx, 0.0));
        }

        let report = advance(&mut state, &FrameInput::default(), 0.0);

        assert_eq!(state.score, 8000);
        assert_eq!(state.collectibles.len(), 1);
        assert_eq!(state.collectibles[0].id, keep);
        let mut collected: Vec<_> = report
            .events
            .iter()
            .filter_map(|e| match e {
                GameEvent::CollectibleCollected { id } => Some(*id),
                _ => None,
            })
            .collect();
        collected.sort();
        collected.dedup();
        assert_eq!(collected.len(), 4);
    }

    #[test]
    fn test_expiring_collectible_times_out() {
        let mut state = GameState::new(SimConfig::for_variant(Variant::Survival), 5, 0);
        park_ball(&mut state);
        park_hazard(&mut state);
        assert_eq!(state.collectibles.len(), 3);

        // 4.9s: nothing expired yet
        for _ in 0..49 {
            advance(&mut state, &FrameInput::default(), 0.1);
        }
        assert_eq!(state.collectibles.len(), 3);

        let report = advance(&mut state, &FrameInput::default(), 0.1);
        assert!(state.collectibles.is_empty());
        assert!(state.expiry_timers.is_empty());
        assert_eq!(
            report.count(|e| matches!(e, GameEvent::CollectibleExpired { .. })),
            3
        );
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_collected_collectible_never_expires() {
        let mut state = GameState::new(SimConfig::for_variant(Variant::Survival), 5, 0);
        park_ball(&mut state);
        park_hazard(&mut state);
        let target = state.collectibles[0].clone();
        let handle = state.expiry_timers[&target.id];
        state.paddle.pos = target.pos;

        advance(&mut state, &FrameInput::default(), 0.0);
        assert!(!state.timers.is_scheduled(handle));
        assert!(state.collectibles.iter().all(|c| c.id != target.id));

        let mut expired = Vec::new();
        for _ in 0..60 {
            let report = advance(&mut state, &FrameInput::default(), 0.1);
            expired.extend(report.events.into_iter().filter_map(|e| match e {
                GameEvent::CollectibleExpired { id } => Some(id),
                _ => None,
            }));
        }
        assert!(!expired.contains(&target.id));
    }

    #[test]
    fn test_falling_collectibles_respawn_to_target() {
        let mut config = SimConfig::for_variant(Variant::Cascade);
        config.hazard = None;
        let mut state = GameState::new(config, 11, 0);
        park_ball(&mut state);
        // Keep the paddle out of the way in the top-left corner
        state.paddle.pos = Vec2::new(100.0, 50.0);
        state.collectibles.clear();
        let low = state.spawn_collectible(CollectibleKind::Triangle, Vec2::new(800.0, 780.0));
        let mid = state.spawn_collectible(CollectibleKind::Triangle, Vec2::new(600.0, 400.0));

        // 100 units/s for 0.1s pushes the low one past the bottom
        let report = advance(&mut state, &FrameInput::default(), 0.1);

        assert!(report.events.contains(&GameEvent::CollectibleFellOff { id: low }));
        assert_eq!(state.collectibles.len(), 3);
        assert!(state.collectibles.iter().any(|c| c.id == mid && c.pos.y == 410.0));
        assert_eq!(
            report.count(|e| matches!(e, GameEvent::CollectibleSpawned { .. })),
            2
        );
        for c in &state.collectibles {
            assert!(c.pos.y <= 410.0);
        }
    }

    #[test]
    fn test_periodic_spawns_avoid_paddle() {
        let mut config = SimConfig::for_variant(Variant::Timed);
        config.hazard = None;
        config.collectibles = CollectiblePolicy::Periodic {
            interval_ms: 100.0,
            lifetime_ms: None,
            max_live: 50,
        };
        let mut state = GameState::new(config, 21, 0);
        park_ball(&mut state);
        // A wide paddle covering most of the screen makes rejection likely
        state.paddle.size = Vec2::new(1024.0, 600.0);
        state.paddle.pos = Vec2::new(512.0, 300.0);

        for _ in 0..20 {
            advance(&mut state, &FrameInput::default(), 0.1);
        }
        assert!(!state.collectibles.is_empty());
        let paddle = state.paddle.bounds();
        for c in &state.collectibles {
            assert!(!c.bounds().intersects(&paddle));
            assert!(c.bounds().within(state.config.viewport));
        }
    }

    #[test]
    fn test_periodic_respects_max_live_and_lifetime() {
        let mut config = SimConfig::for_variant(Variant::Timed);
        config.hazard = None;
        config.collectibles = CollectiblePolicy::Periodic {
            interval_ms: 100.0,
            lifetime_ms: Some(1000.0),
            max_live: 3,
        };
        let mut state = GameState::new(config, 8, 0);
        park_ball(&mut state);
        state.paddle.size = Vec2::new(10.0, 10.0);
        state.paddle.pos = Vec2::new(5.0, 5.0);

        for _ in 0..5 {
            advance(&mut state, &FrameInput::default(), 0.1);
        }
        assert_eq!(state.collectibles.len(), 3);

        // Nothing collected them; after their lifetime the originals are gone
        let originals: Vec<_> = state.collectibles.iter().map(|c| c.id).collect();
        for _ in 0..10 {
            advance(&mut state, &FrameInput::default(), 0.1);
        }
        assert!(state.collectibles.iter().all(|c| !originals.contains(&c.id)));
        assert!(state.collectibles.len() <= 3);
    }

    #[test]
    fn test_high_score_reported_only_when_beaten() {
        let mut state = GameState::new(SimConfig::for_variant(Variant::Classic), 1, 15);
        state.ball.pos = state.paddle.pos;
        state.ball.vel = Vec2::ZERO;

        let first = advance(&mut state, &FrameInput::default(), 0.0);
        assert_eq!(first.new_high_score(), None);
        assert_eq!(state.high_score, 15);

        let second = advance(&mut state, &FrameInput::default(), 0.0);
        assert_eq!(second.new_high_score(), Some(20));
        assert_eq!(state.high_score, 20);
    }
}
