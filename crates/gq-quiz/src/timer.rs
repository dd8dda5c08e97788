//! Per-round countdown.
//!
//! The timer never touches session state. The session ticks it once per
//! second and reacts to the single [`TimerTick::Expired`] it reports.

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// Still counting down.
    Running {
        /// Whole seconds left.
        remaining: u32,
    },
    /// Reached zero on this tick. Reported exactly once.
    Expired,
    /// Already expired or cancelled; nothing happened.
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Running,
    Expired,
    Cancelled,
}

/// Countdown handle for one round.
#[derive(Debug, Clone)]
pub struct RoundTimer {
    budget: u32,
    remaining: u32,
    state: TimerState,
}

impl RoundTimer {
    /// Start a countdown of `budget_secs` seconds.
    pub fn start(budget_secs: u32) -> Self {
        Self {
            budget: budget_secs,
            remaining: budget_secs,
            state: TimerState::Running,
        }
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> TimerTick {
        if self.state != TimerState::Running {
            return TimerTick::Inactive;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = TimerState::Expired;
            TimerTick::Expired
        } else {
            TimerTick::Running {
                remaining: self.remaining,
            }
        }
    }

    /// Stop the countdown. Later ticks are no-ops.
    pub fn cancel(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Cancelled;
        }
    }

    /// Whether the countdown is still running.
    pub fn is_active(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Whether the countdown ran out.
    pub fn is_expired(&self) -> bool {
        self.state == TimerState::Expired
    }

    /// Seconds left.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// The full budget.
    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// Seconds consumed so far.
    pub fn elapsed(&self) -> u32 {
        self.budget - self.remaining
    }

    /// Share of the budget still left, from 0.0 to 1.0.
    pub fn fraction_remaining(&self) -> f64 {
        if self.budget == 0 {
            0.0
        } else {
            f64::from(self.remaining) / f64::from(self.budget)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_then_expires_once() {
        let mut t = RoundTimer::start(3);
        assert_eq!(t.tick(), TimerTick::Running { remaining: 2 });
        assert_eq!(t.tick(), TimerTick::Running { remaining: 1 });
        assert_eq!(t.tick(), TimerTick::Expired);
        assert!(t.is_expired());
        assert_eq!(t.tick(), TimerTick::Inactive);
        assert_eq!(t.tick(), TimerTick::Inactive);
        assert_eq!(t.elapsed(), 3);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut t = RoundTimer::start(1);
        t.cancel();
        assert!(!t.is_active());
        assert_eq!(t.tick(), TimerTick::Inactive);
        assert!(!t.is_expired());
    }

    #[test]
    fn cancel_after_expiry_keeps_expired() {
        let mut t = RoundTimer::start(1);
        assert_eq!(t.tick(), TimerTick::Expired);
        t.cancel();
        assert!(t.is_expired());
    }

    #[test]
    fn zero_budget_expires_on_first_tick() {
        let mut t = RoundTimer::start(0);
        assert_eq!(t.tick(), TimerTick::Expired);
    }

    #[test]
    fn fraction_remaining() {
        let mut t = RoundTimer::start(10);
        assert!((t.fraction_remaining() - 1.0).abs() < f64::EPSILON);
        for _ in 0..4 {
            t.tick();
        }
        assert!((t.fraction_remaining() - 0.6).abs() < 1e-9);
        assert_eq!(t.elapsed(), 4);
        assert_eq!(RoundTimer::start(0).fraction_remaining(), 0.0);
    }
}
