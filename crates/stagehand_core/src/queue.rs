//! Pending event queue
//!
//! Events are pushed at the back and popped from the front. The backing
//! storage is allocated on first push, so a backend that never receives
//! input never allocates.

use std::collections::VecDeque;

use crate::events::Event;

/// FIFO queue of pending events
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Option<VecDeque<Event>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: None }
    }

    /// Append an event; the queue takes ownership
    pub fn push(&mut self, event: Event) {
        self.events.get_or_insert_with(VecDeque::new).push_back(event);
    }

    /// Remove and return the oldest event
    pub fn pop(&mut self) -> Option<Event> {
        self.events.as_mut()?.pop_front()
    }

    /// The oldest event, left in place
    pub fn peek(&self) -> Option<&Event> {
        self.events.as_ref()?.front()
    }

    pub fn has_pending(&self) -> bool {
        self.events.as_ref().is_some_and(|events| !events.is_empty())
    }

    pub fn len(&self) -> usize {
        self.events.as_ref().map_or(0, VecDeque::len)
    }

    pub fn is_empty(&self) -> bool {
        !self.has_pending()
    }

    /// Drop every pending event
    pub fn clear(&mut self) {
        if let Some(events) = self.events.as_mut() {
            events.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventType, KeyEvent};

    fn key(time: u32) -> Event {
        Event::key_press(KeyEvent {
            time,
            ..Default::default()
        })
    }

    #[test]
    fn test_empty_queue() {
        let mut queue = EventQueue::new();
        assert!(!queue.has_pending());
        assert!(queue.peek().is_none());
        assert!(queue.pop().is_none());
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = EventQueue::new();
        for time in 1..=3 {
            queue.push(key(time));
        }
        assert_eq!(queue.len(), 3);

        let times: Vec<_> = std::iter::from_fn(|| queue.pop()).map(|e| e.time()).collect();
        assert_eq!(times, vec![1, 2, 3]);
        assert!(!queue.has_pending());
    }

    #[test]
    fn test_peek_does_not_remove() {
        let mut queue = EventQueue::new();
        queue.push(Event::new(EventType::Motion));
        queue.push(key(7));

        assert_eq!(queue.peek().unwrap().event_type(), EventType::Motion);
        assert_eq!(queue.peek().unwrap().event_type(), EventType::Motion);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop().unwrap().event_type(), EventType::Motion);
        assert_eq!(queue.peek().unwrap().time(), 7);
    }

    #[test]
    fn test_clear() {
        let mut queue = EventQueue::new();
        queue.clear();
        queue.push(key(1));
        queue.clear();
        assert!(queue.is_empty());
    }
}
