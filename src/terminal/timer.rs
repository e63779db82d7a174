use crate::host::{TimerId, TimerService};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Schedule {
    interval: Duration,
    deadline: Instant,
}

/// Periodic timers driven by an event loop.
///
/// The loop waits until [IntervalTimer::next_deadline] and then collects the
/// timers that fired via [IntervalTimer::expired].
#[derive(Debug)]
pub struct IntervalTimer {
    next_id: u64,
    timers: BTreeMap<TimerId, Schedule>,
    clock: fn() -> Instant,
}

impl Default for IntervalTimer {
    fn default() -> Self {
        Self::with_clock(Instant::now)
    }
}

impl IntervalTimer {
    pub(crate) fn with_clock(clock: fn() -> Instant) -> Self {
        Self { next_id: 0, timers: BTreeMap::new(), clock }
    }

    #[cfg(test)]
    pub(crate) fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// The earliest instant at which any timer fires.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().map(|schedule| schedule.deadline).min()
    }

    /// Collect every timer due at `now` and schedule its next tick.
    ///
    /// A timer fires at most once per call. If it fell behind by more than
    /// one interval the missed ticks are dropped.
    pub fn expired(&mut self, now: Instant) -> Vec<TimerId> {
        let mut fired = Vec::new();
        for (id, schedule) in self.timers.iter_mut() {
            if schedule.deadline > now {
                continue;
            }
            fired.push(*id);
            schedule.deadline += schedule.interval;
            if schedule.deadline <= now {
                log::trace!("timer {id:?} fell behind, skipping missed ticks");
                schedule.deadline = now + schedule.interval;
            }
        }
        fired
    }
}

impl TimerService for IntervalTimer {
    fn start(&mut self, interval: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let deadline = (self.clock)() + interval;
        self.timers.insert(id, Schedule { interval, deadline });
        id
    }

    fn stop(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::OnceLock;

    fn epoch() -> Instant {
        static EPOCH: OnceLock<Instant> = OnceLock::new();
        *EPOCH.get_or_init(Instant::now)
    }

    fn at(millis: u64) -> Instant {
        epoch() + Duration::from_millis(millis)
    }

    #[test]
    fn fires_on_deadline() {
        let mut timer = IntervalTimer::with_clock(epoch);
        let id = timer.start(Duration::from_millis(60));
        assert_eq!(timer.next_deadline(), Some(at(60)));

        assert!(timer.expired(at(59)).is_empty());
        assert_eq!(timer.expired(at(60)), vec![id]);
        assert_eq!(timer.next_deadline(), Some(at(120)));
        assert_eq!(timer.expired(at(121)), vec![id]);
        assert_eq!(timer.next_deadline(), Some(at(180)));
    }

    #[test]
    fn stopped_timer_never_fires() {
        let mut timer = IntervalTimer::with_clock(epoch);
        let id = timer.start(Duration::from_millis(60));
        assert!(timer.is_active(id));

        timer.stop(id);
        assert!(!timer.is_active(id));
        assert!(timer.expired(at(1_000)).is_empty());
        assert_eq!(timer.next_deadline(), None);
    }

    #[test]
    fn missed_ticks_are_coalesced() {
        let mut timer = IntervalTimer::with_clock(epoch);
        let id = timer.start(Duration::from_millis(60));

        assert_eq!(timer.expired(at(500)), vec![id]);
        assert_eq!(timer.next_deadline(), Some(at(560)));
        assert!(timer.expired(at(500)).is_empty());
    }

    #[test]
    fn independent_timers() {
        let mut timer = IntervalTimer::with_clock(epoch);
        let fast = timer.start(Duration::from_millis(60));
        let slow = timer.start(Duration::from_millis(100));
        assert_ne!(fast, slow);

        assert_eq!(timer.expired(at(60)), vec![fast]);
        assert_eq!(timer.expired(at(100)), vec![slow]);
        assert_eq!(timer.expired(at(120)), vec![fast]);
        assert_eq!(timer.next_deadline(), Some(at(180)));
    }
}
