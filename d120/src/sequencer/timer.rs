use std::{cmp::Reverse, collections::BinaryHeap, time::Duration};

use serde::{Deserialize, Serialize};

use crate::sequencer::state::SessionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// One step of the cosmetic number cycling. Re-armed until resolution.
    DisplayTick,
    Resolve,
    Reveal,
    ExpireParticles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timer {
    pub session: SessionId,
    pub kind: TimerKind,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Scheduled {
    deadline: Duration,
    // breaks deadline ties in scheduling order
    seq: u64,
    timer: Timer,
}

/// One-shot timers on a caller-driven clock.
///
/// Nothing here sleeps: the owner asks for [`Scheduler::next_deadline`],
/// waits however it likes, then drains [`Scheduler::pop_due`].
#[derive(Debug, Default, Clone)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<Scheduled>>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, deadline: Duration, timer: Timer) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Scheduled {
            deadline,
            seq,
            timer,
        }));
    }

    /// Removes and returns the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, Timer)> {
        let Reverse(next) = self.queue.peek()?;
        if next.deadline > now {
            return None;
        }
        let Reverse(next) = self.queue.pop()?;
        Some((next.deadline, next.timer))
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.peek().map(|Reverse(s)| s.deadline)
    }

    /// Drops every timer matching `predicate`.
    pub fn cancel(&mut self, predicate: impl Fn(&Timer) -> bool) {
        self.queue.retain(|Reverse(s)| !predicate(&s.timer));
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn contains(&self, predicate: impl Fn(&Timer) -> bool) -> bool {
        self.queue.iter().any(|Reverse(s)| predicate(&s.timer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer(session: u64, kind: TimerKind) -> Timer {
        Timer {
            session: SessionId(session),
            kind,
        }
    }

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn test_pop_due_in_deadline_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(200), timer(1, TimerKind::Reveal));
        scheduler.schedule(ms(55), timer(1, TimerKind::DisplayTick));
        scheduler.schedule(ms(100), timer(1, TimerKind::Resolve));
        assert_eq!(scheduler.next_deadline(), Some(ms(55)));

        assert_eq!(scheduler.pop_due(ms(40)), None);
        assert_eq!(
            scheduler.pop_due(ms(150)),
            Some((ms(55), timer(1, TimerKind::DisplayTick)))
        );
        assert_eq!(
            scheduler.pop_due(ms(150)),
            Some((ms(100), timer(1, TimerKind::Resolve)))
        );
        assert_eq!(scheduler.pop_due(ms(150)), None);
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn test_ties_fire_in_scheduling_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(10), timer(1, TimerKind::Reveal));
        scheduler.schedule(ms(10), timer(1, TimerKind::DisplayTick));
        assert_eq!(scheduler.pop_due(ms(10)).unwrap().1.kind, TimerKind::Reveal);
        assert_eq!(
            scheduler.pop_due(ms(10)).unwrap().1.kind,
            TimerKind::DisplayTick
        );
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(55), timer(1, TimerKind::DisplayTick));
        scheduler.schedule(ms(1850), timer(1, TimerKind::Resolve));
        scheduler.cancel(|t| t.kind == TimerKind::DisplayTick);
        assert!(!scheduler.contains(|t| t.kind == TimerKind::DisplayTick));
        assert_eq!(scheduler.next_deadline(), Some(ms(1850)));
        scheduler.clear();
        assert!(scheduler.is_empty());
    }
}
