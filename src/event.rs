//! Bounded journal of output transitions.

use crate::time::Minutes;
use heapless::Deque;

/// Something the decision engine did to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchEvent {
    /// Hysteresis turned the output on.
    TurnedOn { at: Minutes },
    /// Hysteresis turned the output off.
    TurnedOff { at: Minutes },
    /// The button settled closed and took over the output.
    OverrideEngaged { at: Minutes },
    /// The button was released and hysteresis resumed from scratch.
    OverrideReleased { at: Minutes },
}

impl SwitchEvent {
    /// Minute at which the event happened.
    pub fn at(&self) -> Minutes {
        match *self {
            SwitchEvent::TurnedOn { at }
            | SwitchEvent::TurnedOff { at }
            | SwitchEvent::OverrideEngaged { at }
            | SwitchEvent::OverrideReleased { at } => at,
        }
    }
}

/// Fixed-capacity event journal. When full, the oldest event is dropped.
#[derive(Debug, Clone)]
pub struct EventLog<const N: usize> {
    events: Deque<SwitchEvent, N>,
    dropped: u32,
}

impl<const N: usize> EventLog<N> {
    /// Creates an empty log.
    pub const fn new() -> Self {
        Self {
            events: Deque::new(),
            dropped: 0,
        }
    }

    /// Appends an event, evicting the oldest one if the log is full.
    pub fn record(&mut self, event: SwitchEvent) {
        if let Err(event) = self.events.push_back(event) {
            // Full: drop the oldest value and try again
            self.events.pop_front();
            self.dropped = self.dropped.saturating_add(1);
            self.events.push_back(event).ok();
        }
    }

    /// Removes and returns the oldest event.
    pub fn pop(&mut self) -> Option<SwitchEvent> {
        self.events.pop_front()
    }

    /// Iterates the retained events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &SwitchEvent> {
        self.events.iter()
    }

    /// Most recent event, if any.
    pub fn latest(&self) -> Option<&SwitchEvent> {
        self.events.back()
    }

    /// Number of events currently held.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no events are held.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events evicted because the log was full.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl<const N: usize> Default for EventLog<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_when_full() {
        let mut log = EventLog::<2>::new();
        log.record(SwitchEvent::TurnedOn { at: Minutes(1) });
        log.record(SwitchEvent::TurnedOff { at: Minutes(2) });
        log.record(SwitchEvent::TurnedOn { at: Minutes(3) });

        assert_eq!(log.len(), 2);
        assert_eq!(log.dropped(), 1);
        assert_eq!(log.pop(), Some(SwitchEvent::TurnedOff { at: Minutes(2) }));
        assert_eq!(log.pop(), Some(SwitchEvent::TurnedOn { at: Minutes(3) }));
        assert_eq!(log.pop(), None);
    }

    #[test]
    fn draining_empties_the_log() {
        let mut log = EventLog::<4>::new();
        assert!(log.is_empty());

        log.record(SwitchEvent::OverrideEngaged { at: Minutes(5) });
        assert!(!log.is_empty());
        assert_eq!(log.len(), 1);

        log.pop();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn event_reports_its_minute() {
        let event = SwitchEvent::OverrideReleased { at: Minutes(42) };
        assert_eq!(event.at(), Minutes(42));
    }
}
