//! Frame driver glue
//!
//! A `Session` owns the game state, the config it was built from and the
//! high-score store. Hosts call [`Session::frame`] once per rendered frame
//! and watch [`FrameReport::ended`] to switch to their game-over scene.

use crate::config::SimConfig;
use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::sim::{self, FrameInput, FrameReport, GameState};
use crate::snapshot::Snapshot;

pub struct Session<S: KeyValueStore> {
    state: GameState,
    store: S,
    high_score: HighScore,
}

impl<S: KeyValueStore> Session<S> {
    /// Load the high score and spawn the opening entities
    pub fn new(config: SimConfig, store: S, seed: u64) -> Self {
        let high_score = HighScore::load(&store);
        let state = GameState::new(config, seed, high_score.best());
        log::info!(
            "Session started (seed {}, high score {})",
            seed,
            high_score.best()
        );
        Self {
            state,
            store,
            high_score,
        }
    }

    /// Run one frame and persist the high score if it improved.
    ///
    /// Storage failures are logged; the frame loop never stops for them.
    pub fn frame(&mut self, input: &FrameInput, elapsed: f32) -> FrameReport {
        let report = sim::advance(&mut self.state, input, elapsed);
        if let Some(score) = report.new_high_score() {
            if self.high_score.record(score) {
                if let Err(err) = self.high_score.save(&mut self.store) {
                    log::warn!("Failed to persist high score {}: {}", score, err);
                }
            }
        }
        report
    }

    /// Start over with the same config; the high score carries across
    pub fn restart(&mut self, seed: u64) {
        let config = self.state.config.clone();
        self.state = GameState::new(config, seed, self.high_score.best());
        log::info!("Session restarted (seed {})", seed);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for hosts and tests that script scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
