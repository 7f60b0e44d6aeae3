//! Frame-granular timer queue
//!
//! Stands in for the host's `setTimeout`/`setInterval`: timers are keyed to
//! accumulated game time and only fire when the simulation advances the
//! queue between steps, so expiry and spawn effects stay deterministic.

/// Cancellable handle returned by the schedule calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Remove the collectible with this id if it is still alive
    ExpireCollectible(u32),
    /// Try to add one collectible
    SpawnCollectible,
}

/// Shortest repeat interval; keeps a zero interval from firing forever
const MIN_INTERVAL_MS: f64 = 1.0;

#[derive(Debug, Clone)]
struct Timer {
    handle: TimerHandle,
    due_ms: f64,
    /// `Some` for repeating timers
    interval_ms: Option<f64>,
    action: TimerAction,
}

#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now_ms: f64,
    timers: Vec<Timer>,
    next_handle: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Game time accumulated so far
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    /// Fire `action` once, `delay_ms` from now
    pub fn schedule_once(&mut self, delay_ms: f64, action: TimerAction) -> TimerHandle {
        self.push(sanitize_ms(delay_ms), None, action)
    }

    /// Fire `action` every `interval_ms`, first time one interval from now
    pub fn schedule_repeating(&mut self, interval_ms: f64, action: TimerAction) -> TimerHandle {
        let interval = sanitize_ms(interval_ms).max(MIN_INTERVAL_MS);
        self.push(interval, Some(interval), action)
    }

    /// Cancel a pending timer. Returns false if it already fired (one-shot)
    /// or was cancelled before.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.timers.iter().position(|t| t.handle == handle) {
            Some(index) => {
                self.timers.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Move the clock forward and collect every action that came due.
    ///
    /// Actions are returned in (due time, handle) order. A repeating timer
    /// fires once per interval covered by `elapsed_ms`.
    pub fn advance(&mut self, elapsed_ms: f64) -> Vec<(TimerHandle, TimerAction)> {
        self.now_ms += sanitize_ms(elapsed_ms);

        let mut fired = Vec::new();
        loop {
            let next = self
                .timers
                .iter()
                .enumerate()
                .filter(|(_, t)| t.due_ms <= self.now_ms)
                .min_by(|(_, a), (_, b)| {
                    a.due_ms
                        .total_cmp(&b.due_ms)
                        .then_with(|| a.handle.cmp(&b.handle))
                })
                .map(|(index, _)| index);

            let Some(index) = next else {
                break;
            };

            let timer = &mut self.timers[index];
            fired.push((timer.handle, timer.action));
            let interval_ms = timer.interval_ms;
            match interval_ms {
                Some(interval) => self.timers[index].due_ms += interval,
                None => {
                    self.timers.remove(index);
                }
            }
        }
        fired
    }

    fn push(
        &mut self,
        delay_ms: f64,
        interval_ms: Option<f64>,
        action: TimerAction,
    ) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.timers.push(Timer {
            handle,
            due_ms: self.now_ms + delay_ms,
            interval_ms,
            action,
        });
        handle
    }
}

/// Negative and non-finite durations count as zero
fn sanitize_ms(ms: f64) -> f64 {
    if ms.is_finite() && ms > 0.0 { ms } else { 0.0 }
}
