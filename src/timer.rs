//! Virtual-time timers.
//!
//! Nothing here reads a wall clock: every timer is an accumulator advanced
//! by the frame delta, so a fixed delta sequence always fires the same way.

/// Slack used when comparing accumulated deltas against a deadline.  Sixty
/// additions of `1000.0 / 60.0` do not sum to exactly `1000.0`.
pub const TIMER_EPSILON_MS: f64 = 1e-6;

/// Shortest accepted repeat delay; guards against a zero delay firing
/// forever within one tick.
const MIN_DELAY_MS: f64 = 1.0;

/// Fires every `delay` milliseconds until cancelled.
#[derive(Clone, Debug, PartialEq)]
pub struct RepeatingTimer {
    delay: f64,
    elapsed: f64,
    cancelled: bool,
}

impl RepeatingTimer {
    pub fn new(delay: f64) -> Self {
        Self {
            delay: delay.max(MIN_DELAY_MS),
            elapsed: 0.0,
            cancelled: false,
        }
    }

    /// Advance by `delta` and return how many times the timer fired.
    pub fn tick(&mut self, delta: f64) -> u32 {
        if self.cancelled {
            return 0;
        }
        self.elapsed += delta;
        let mut fired = 0;
        while self.elapsed + TIMER_EPSILON_MS >= self.delay {
            self.elapsed -= self.delay;
            fired += 1;
        }
        fired
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }
}

/// Fires once after `delay` milliseconds.
#[derive(Clone, Debug, PartialEq)]
pub struct DelayedCall {
    delay: f64,
    elapsed: f64,
    fired: bool,
}

impl DelayedCall {
    pub fn new(delay: f64) -> Self {
        Self {
            delay: delay.max(0.0),
            elapsed: 0.0,
            fired: false,
        }
    }

    /// Advance by `delta`; returns `true` on the one tick the call comes due.
    pub fn tick(&mut self, delta: f64) -> bool {
        self.advance(delta);
        if self.is_due() {
            self.complete();
            return true;
        }
        false
    }

    /// Advance without consuming the call.  Pair with [`is_due`] and
    /// [`complete`] when the action may have to wait for a later frame.
    ///
    /// [`is_due`]: DelayedCall::is_due
    /// [`complete`]: DelayedCall::complete
    pub fn advance(&mut self, delta: f64) {
        if !self.fired {
            self.elapsed += delta;
        }
    }

    pub fn is_due(&self) -> bool {
        !self.fired && self.elapsed + TIMER_EPSILON_MS >= self.delay
    }

    pub fn complete(&mut self) {
        self.fired = true;
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}
