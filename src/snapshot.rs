//! Render/HUD view of a game state
//!
//! Everything the display layer needs for one frame, flattened into plain
//! serializable data so a JS renderer can draw it from JSON.

use serde::Serialize;

use crate::sim::{Aabb, CollectibleKind, GameEvent, GameState, SessionPhase};

/// Axis-aligned rectangle by center and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RectView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<Aabb> for RectView {
    fn from(b: Aabb) -> Self {
        let center = b.center();
        Self {
            x: center.x,
            y: center.y,
            width: b.width(),
            height: b.height(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaddleView {
    pub rect: RectView,
    /// CSS color, e.g. `#0000ff`
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CollectibleView {
    pub id: u32,
    pub kind: CollectibleKind,
    pub rect: RectView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudView {
    pub score_text: String,
    pub high_score_text: String,
    pub health: i32,
    pub health_bar_width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub width: f32,
    pub height: f32,
    pub frame: u64,
    pub phase: SessionPhase,
    pub paddle: PaddleView,
    pub ball: BallView,
    pub hazard: Option<RectView>,
    pub collectibles: Vec<CollectibleView>,
    pub hud: HudView,
    /// What happened during the frame that produced this view
    pub events: Vec<GameEvent>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            width: state.config.viewport.x,
            height: state.config.viewport.y,
            frame: state.frame_count,
            phase: state.phase,
            paddle: PaddleView {
                rect: state.paddle.bounds().into(),
                color: state.paddle.color.to_css(),
            },
            ball: BallView {
                x: state.ball.pos.x,
                y: state.ball.pos.y,
                radius: state.ball.radius,
            },
            hazard: state.hazard.as_ref().map(|h| h.bounds().into()),
            collectibles: state
                .collectibles
                .iter()
                .map(|c| CollectibleView {
                    id: c.id,
                    kind: c.kind,
                    rect: c.bounds().into(),
                })
                .collect(),
            hud: HudView {
                score_text: format!("Score: {}", state.score),
                high_score_text: format!("High Score: {}", state.high_score),
                health: state.health,
                health_bar_width: state.health_bar_width,
            },
            events: Vec::new(),
        }
    }

    /// Attach a frame's events so the host can play sounds or switch scenes
    pub fn with_events(mut self, events: Vec<GameEvent>) -> Self {
        self.events = events;
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
