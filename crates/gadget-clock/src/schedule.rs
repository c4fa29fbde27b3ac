use std::time::{Duration, Instant};

/// First delay and steady cadence for display recomputation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TickPlan {
    pub first: Duration,
    pub every: Duration,
}

impl TickPlan {
    pub const fn every_second() -> Self {
        Self { first: Duration::from_secs(1), every: Duration::from_secs(1) }
    }

    /// Fires once after `first`, then every minute.
    pub const fn minute_aligned(first: Duration) -> Self {
        Self { first, every: Duration::from_secs(60) }
    }
}

/// The single recompute timer of the clock display.
///
/// A one-shot-then-recurring deadline. Rescheduling replaces the pending
/// deadline immediately; there is no grace period.
#[derive(Debug, Clone, Default)]
pub struct RecomputeScheduler {
    deadline: Option<Instant>,
    every: Duration,
}

impl RecomputeScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any pending deadline and arms `plan` starting at `now`.
    pub fn reschedule(&mut self, now: Instant, plan: TickPlan) {
        self.deadline = Some(now + plan.first);
        self.every = plan.every;
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` and advances to the next deadline if `now` has reached
    /// the pending one.
    ///
    /// After a stall longer than one period the next deadline is measured
    /// from `now`, so missed ticks collapse into one.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                let mut next = deadline + self.every;
                if next <= now {
                    next = now + self.every;
                }
                self.deadline = Some(next);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minute_plan_fires_first_then_every_minute() {
        let t0 = Instant::now();
        let mut s = RecomputeScheduler::new();
        s.reschedule(t0, TickPlan::minute_aligned(Duration::from_secs(45)));

        assert!(!s.fire_if_due(t0 + Duration::from_secs(44)));
        assert!(s.fire_if_due(t0 + Duration::from_secs(45)));
        assert_eq!(s.deadline(), Some(t0 + Duration::from_secs(105)));
        assert!(s.fire_if_due(t0 + Duration::from_secs(105)));
        assert_eq!(s.deadline(), Some(t0 + Duration::from_secs(165)));
    }

    #[test]
    fn reschedule_replaces_pending_deadline() {
        let t0 = Instant::now();
        let mut s = RecomputeScheduler::new();
        s.reschedule(t0, TickPlan::minute_aligned(Duration::from_secs(30)));
        s.reschedule(t0 + Duration::from_secs(2), TickPlan::every_second());
        assert_eq!(s.deadline(), Some(t0 + Duration::from_secs(3)));
    }

    #[test]
    fn cancel_disarms() {
        let t0 = Instant::now();
        let mut s = RecomputeScheduler::new();
        s.reschedule(t0, TickPlan::every_second());
        s.cancel();
        assert!(!s.is_armed());
        assert!(!s.fire_if_due(t0 + Duration::from_secs(10)));
    }

    #[test]
    fn stall_collapses_missed_ticks() {
        let t0 = Instant::now();
        let mut s = RecomputeScheduler::new();
        s.reschedule(t0, TickPlan::every_second());
        let late = t0 + Duration::from_secs(30);
        assert!(s.fire_if_due(late));
        assert_eq!(s.deadline(), Some(late + Duration::from_secs(1)));
    }
}
