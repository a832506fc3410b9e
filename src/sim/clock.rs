//! Frame gate for fixed-rate updates
//!
//! The host calls into the gate once per display refresh. The gate answers
//! whether a fixed-step update is due and keeps the sub-period remainder, so
//! the update rate converges to the target regardless of refresh jitter.

/// Independent timers driven through a [`FrameGate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerId {
    /// Physics tick timer
    Physics,
}

impl TimerId {
    pub const COUNT: usize = 1;

    #[inline]
    fn index(self) -> usize {
        match self {
            TimerId::Physics => 0,
        }
    }
}

/// Decide whether a fixed-step update may run.
///
/// Returns the decision and the new last-tick timestamp. When an update is
/// due, the timestamp advances to `now` minus the leftover time that did not
/// fill a whole period.
pub fn should_tick(target_hz: f64, last_tick_ms: f64, now_ms: f64) -> (bool, f64) {
    let period = 1000.0 / target_hz;
    let elapsed = now_ms - last_tick_ms;

    if elapsed < period {
        return (false, last_tick_ms);
    }

    let excess = elapsed % period;
    (true, now_ms - excess)
}

/// Per-timer last-tick timestamps (milliseconds)
#[derive(Debug, Clone, Default)]
pub struct FrameGate {
    last_tick_ms: [Option<f64>; TimerId::COUNT],
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check (and advance) the given timer.
    ///
    /// The first call for a timer only records `now_ms` and reports `false`.
    pub fn should_tick(&mut self, timer: TimerId, target_hz: f64, now_ms: f64) -> bool {
        let slot = &mut self.last_tick_ms[timer.index()];
        let last = *slot.get_or_insert(now_ms);

        let (due, next) = should_tick(target_hz, last, now_ms);
        *slot = Some(next);
        log::trace!("{:?} gate at {:.3}ms: due={}", timer, now_ms, due);
        due
    }

    /// Last recorded tick timestamp for a timer
    pub fn last_tick(&self, timer: TimerId) -> Option<f64> {
        self.last_tick_ms[timer.index()]
    }

    /// Forget a timer so the next call re-seeds it
    pub fn clear(&mut self, timer: TimerId) {
        self.last_tick_ms[timer.index()] = None;
    }
}
