//! Main loop context
//!
//! [`MainContext`] bundles everything one main loop needs: the backend that
//! owns pending events and click history, the single event handler, and
//! the input devices. Platform event loops own a context and pass it by
//! mutable reference to their input translators.

use crate::backend::Backend;
use crate::device::DeviceManager;
use crate::dispatch::{EventDispatcher, Teardown};
use crate::events::Event;
use crate::settings::ClickSettings;

#[derive(Debug, Default)]
pub struct MainContext {
    backend: Backend,
    dispatcher: EventDispatcher,
    devices: DeviceManager,
}

impl MainContext {
    pub fn new() -> Self {
        Self::with_settings(ClickSettings::default())
    }

    pub fn with_settings(settings: ClickSettings) -> Self {
        Self {
            backend: Backend::with_settings(settings),
            dispatcher: EventDispatcher::new(),
            devices: DeviceManager::new(),
        }
    }

    /// Install the event handler
    ///
    /// Any previous handler is removed first and its teardown runs.
    pub fn register_handler<D, F>(&mut self, handler: F, data: D, teardown: Option<Teardown<D>>)
    where
        D: 'static,
        F: FnMut(&Event, &mut D) + 'static,
    {
        match teardown {
            Some(teardown) => self
                .dispatcher
                .register_with_teardown(handler, data, teardown),
            None => self.dispatcher.register(handler, data),
        }
    }

    /// Install the event handler with a teardown closure
    pub fn register_handler_with_teardown<D, F, T>(&mut self, handler: F, data: D, teardown: T)
    where
        D: 'static,
        F: FnMut(&Event, &mut D) + 'static,
        T: FnOnce(D) + 'static,
    {
        self.dispatcher.register_with_teardown(handler, data, teardown);
    }

    /// Remove the event handler, running its teardown
    pub fn unregister_handler(&mut self) -> bool {
        self.dispatcher.unregister()
    }

    pub fn has_handler(&self) -> bool {
        self.dispatcher.has_handler()
    }

    /// Queue a copy of an event
    pub fn put_event(&mut self, event: &Event) {
        self.backend.put_event(event);
    }

    /// Take the oldest pending event
    pub fn get_event(&mut self) -> Option<Event> {
        self.backend.pop_event()
    }

    pub fn peek_event(&self) -> Option<&Event> {
        self.backend.peek_event()
    }

    pub fn events_pending(&self) -> bool {
        self.backend.has_pending()
    }

    /// Deliver every pending event to the handler in arrival order
    ///
    /// Returns the number of events delivered. Without a handler the queue
    /// is left untouched.
    pub fn dispatch_pending(&mut self) -> usize {
        if !self.dispatcher.has_handler() {
            return 0;
        }

        let mut delivered = 0;
        while let Some(event) = self.backend.pop_event() {
            tracing::trace!("Dispatching {:?}", event.event_type());
            self.dispatcher.dispatch(&event);
            delivered += 1;
        }
        delivered
    }

    /// Deliver an event to the handler without queueing it
    pub fn dispatch_event(&mut self, event: &Event) -> bool {
        self.dispatcher.dispatch(event)
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut Backend {
        &mut self.backend
    }

    pub fn devices(&self) -> &DeviceManager {
        &self.devices
    }

    pub fn devices_mut(&mut self) -> &mut DeviceManager {
        &mut self.devices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventType, KeyEvent};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn key(time: u32) -> Event {
        Event::key_press(KeyEvent {
            time,
            keyval: 0x61,
            ..Default::default()
        })
    }

    #[test]
    fn test_dispatch_pending_without_handler_keeps_queue() {
        let mut context = MainContext::new();
        context.put_event(&key(1));
        assert_eq!(context.dispatch_pending(), 0);
        assert!(context.events_pending());
    }

    #[test]
    fn test_dispatch_pending_is_fifo() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();

        let mut context = MainContext::new();
        context.register_handler(
            move |event: &Event, _: &mut ()| sink.borrow_mut().push(event.time()),
            (),
            None,
        );

        for time in [5, 6, 7] {
            context.put_event(&key(time));
        }
        assert_eq!(context.dispatch_pending(), 3);
        assert_eq!(*seen.borrow(), vec![5, 6, 7]);
        assert!(!context.events_pending());
    }

    #[test]
    fn test_get_and_peek() {
        let mut context = MainContext::new();
        assert!(context.get_event().is_none());

        context.put_event(&Event::new(EventType::Motion));
        assert_eq!(
            context.peek_event().map(Event::event_type),
            Some(EventType::Motion)
        );
        assert_eq!(
            context.get_event().map(|event| event.event_type()),
            Some(EventType::Motion)
        );
        assert!(!context.events_pending());
    }

    #[test]
    fn test_dispatch_event_bypasses_queue() {
        let count = Rc::new(RefCell::new(0));
        let sink = count.clone();

        let mut context = MainContext::new();
        assert!(!context.dispatch_event(&key(1)));

        context.register_handler(
            move |_: &Event, _: &mut ()| *sink.borrow_mut() += 1,
            (),
            None,
        );
        context.put_event(&key(2));
        assert!(context.dispatch_event(&key(3)));
        assert_eq!(*count.borrow(), 1);
        assert!(context.events_pending());
    }

    #[test]
    fn test_unregister_runs_teardown() {
        let torn_down = Rc::new(RefCell::new(None));
        let sink = torn_down.clone();

        let mut context = MainContext::new();
        context.register_handler(
            |_: &Event, _: &mut String| {},
            String::from("window"),
            Some(Box::new(move |data: String| *sink.borrow_mut() = Some(data))),
        );
        assert!(context.has_handler());
        assert!(context.unregister_handler());
        assert_eq!(torn_down.borrow().as_deref(), Some("window"));
        assert!(!context.has_handler());
    }

    #[test]
    fn test_replacing_handler_with_teardown_closure() {
        let torn_down = Rc::new(RefCell::new(Vec::new()));
        let first = torn_down.clone();

        let mut context = MainContext::new();
        context.register_handler_with_teardown(
            |_: &Event, count: &mut u32| *count += 1,
            0u32,
            move |count| first.borrow_mut().push(count),
        );
        context.put_event(&key(1));
        assert_eq!(context.dispatch_pending(), 1);

        context.register_handler(|_: &Event, _: &mut ()| {}, (), None);
        assert_eq!(*torn_down.borrow(), vec![1]);
        assert!(context.has_handler());
    }
}
