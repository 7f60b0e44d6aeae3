use glam::Vec2;
use proptest::prelude::*;

use paddle_rush::config::CollectiblePolicy;
use paddle_rush::sim::{self, CollectibleKind, Directions, FrameInput, GameState};
use paddle_rush::{HighScore, SimConfig, Variant};

fn classic_state() -> GameState {
    GameState::new(SimConfig::for_variant(Variant::Classic), 1, 0)
}

fn directions() -> impl Strategy<Value = Directions> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(up, down, left, right)| Directions {
            up,
            down,
            left,
            right,
        },
    )
}

proptest! {
    #[test]
    fn paddle_always_inside_viewport(
        width in 200.0f32..3000.0,
        height in 100.0f32..2000.0,
        x in -5000.0f32..5000.0,
        y in -5000.0f32..5000.0,
        arrows in directions(),
    ) {
        let mut config = SimConfig::for_variant(Variant::Classic);
        config.viewport = Vec2::new(width, height);
        let mut state = GameState::new(config, 1, 0);
        state.paddle.pos = Vec2::new(x, y);

        sim::advance(&mut state, &FrameInput { arrows, ..Default::default() }, 1.0 / 60.0);

        let b = state.paddle.bounds();
        prop_assert!(b.min.x >= -1e-3 && b.min.y >= -1e-3);
        prop_assert!(b.max.x <= width + 1e-3 && b.max.y <= height + 1e-3);
    }

    #[test]
    fn ball_velocity_flips_once_when_past_margin(
        x in -100.0f32..1200.0,
        y in 200.0f32..500.0,
        vx in -500.0f32..500.0,
        dt in 0.0f32..0.1,
    ) {
        let mut state = classic_state();
        // Keep the paddle and vertical bounces out of it
        state.paddle.pos = Vec2::new(512.0, 718.0);
        state.ball.pos = Vec2::new(x, y);
        state.ball.vel = Vec2::new(vx, 0.0);

        sim::advance(&mut state, &FrameInput::default(), dt);

        let new_x = state.ball.pos.x;
        let r = state.ball.radius;
        let outside = new_x < r || new_x > 1024.0 - r;
        let expected = if outside { -vx } else { vx };
        prop_assert_eq!(state.ball.vel.x, expected);
    }

    #[test]
    fn ball_speed_stays_capped(
        hits in 1usize..200,
        vx in -500.0f32..500.0,
        vy in -500.0f32..500.0,
    ) {
        let mut config = SimConfig::for_variant(Variant::Survival);
        config.collectibles = CollectiblePolicy::None;
        config.hazard = None;
        let mut state = GameState::new(config, 1, 0);
        state.ball.pos = state.paddle.pos;
        state.ball.vel = Vec2::new(vx, vy);

        for _ in 0..hits {
            sim::advance(&mut state, &FrameInput::default(), 0.0);
        }
        prop_assert!(state.ball.vel.x.abs() <= 500.0);
        prop_assert!(state.ball.vel.y.abs() <= 500.0);
    }

    #[test]
    fn one_collection_removes_exactly_one(
        n in 1usize..10,
        pick in 0usize..10,
    ) {
        let pick = pick % n;
        let mut config = SimConfig::for_variant(Variant::Survival);
        config.collectibles = CollectiblePolicy::None;
        config.hazard = None;
        let mut state = GameState::new(config, 1, 0);
        state.ball.pos = Vec2::new(900.0, 100.0);
        state.ball.vel = Vec2::ZERO;
        // Row of collectibles across the top, paddle parked far below
        let ids: Vec<u32> = (0..n)
            .map(|i| state.spawn_collectible(
                CollectibleKind::Present,
                Vec2::new(40.0 + i as f32 * 100.0, 40.0),
            ))
            .collect();
        let before: Vec<Vec2> = state.collectibles.iter().map(|c| c.pos).collect();

        // Narrow, tall paddle reaching up under exactly one of them
        state.paddle.size = Vec2::new(20.0, 400.0);
        state.paddle.pos = Vec2::new(before[pick].x, 250.0);

        sim::advance(&mut state, &FrameInput::default(), 0.0);

        prop_assert_eq!(state.collectibles.len(), n - 1);
        prop_assert_eq!(state.score, 2000);
        let remaining: Vec<u32> = state.collectibles.iter().map(|c| c.id).collect();
        let expected: Vec<u32> = ids.iter().copied().filter(|id| *id != ids[pick]).collect();
        prop_assert_eq!(remaining, expected);
        for c in &state.collectibles {
            let index = ids.iter().position(|id| *id == c.id).unwrap();
            prop_assert_eq!(c.pos, before[index]);
        }
    }

    #[test]
    fn high_score_is_monotonic(scores in proptest::collection::vec(0u64..1_000_000, 0..50)) {
        let mut high = HighScore::new(0);
        let mut previous = 0;
        for score in scores {
            high.record(score);
            prop_assert!(high.best() >= previous);
            prop_assert!(high.best() >= score);
            previous = high.best();
        }
    }

    #[test]
    fn health_bar_tracks_health(hits in 0usize..8) {
        let mut config = SimConfig::for_variant(Variant::Survival);
        config.collectibles = CollectiblePolicy::None;
        let mut state = GameState::new(config, 1, 0);
        state.ball.pos = Vec2::new(900.0, 100.0);
        state.ball.vel = Vec2::ZERO;
        let pos = state.paddle.pos;
        if let Some(h) = state.hazard.as_mut() {
            h.pos = pos;
            h.vel = Vec2::ZERO;
        }

        for _ in 0..hits {
            sim::advance(&mut state, &FrameInput::default(), 0.0);
            prop_assert_eq!(state.health_bar_width, 8.0 * state.health as f32);
        }
        prop_assert_eq!(state.health, (100 - 20 * hits as i32).max(0));
        prop_assert_eq!(state.is_over(), hits >= 5);
    }
}
