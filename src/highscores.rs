//! Best score across sessions
//!
//! Persisted as a decimal string under a single key. A missing or
//! unparsable value means no high score yet.

use crate::persistence::{KeyValueStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "highScore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Interpret a stored value; absent or malformed reads as 0
    pub fn parse(stored: Option<&str>) -> Self {
        let best = stored.and_then(|s| s.trim().parse::<u64>().ok()).unwrap_or(0);
        Self { best }
    }

    /// Load from a store
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let stored = store.get(Self::STORAGE_KEY);
        let high = Self::parse(stored.as_deref());
        match stored {
            Some(_) => log::info!("Loaded high score {}", high.best),
            None => log::info!("No high score found, starting fresh"),
        }
        high
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Raise the best score. Returns true if `score` beat it.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Save to a store
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        store.set(Self::STORAGE_KEY, &self.best.to_string())?;
        log::info!("High score saved ({})", self.best);
        Ok(())
    }
}
