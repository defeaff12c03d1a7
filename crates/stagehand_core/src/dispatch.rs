//! Event handler registration and dispatch
//!
//! A [`EventDispatcher`] holds at most one handler. The handler owns a piece
//! of user data that it receives mutably with every event, and may carry a
//! teardown callback that consumes the data when the registration ends.
//! A registration ends when it is replaced, unregistered, or when the
//! dispatcher is dropped; the teardown runs exactly once in each case.

use crate::events::Event;

/// Callback that consumes handler data when its registration ends
pub type Teardown<D> = Box<dyn FnOnce(D)>;

trait Handler {
    fn handle(&mut self, event: &Event);
}

struct Registration<D, F>
where
    F: FnMut(&Event, &mut D),
{
    handler: F,
    data: Option<D>,
    teardown: Option<Teardown<D>>,
}

impl<D, F> Handler for Registration<D, F>
where
    F: FnMut(&Event, &mut D),
{
    fn handle(&mut self, event: &Event) {
        if let Some(data) = self.data.as_mut() {
            (self.handler)(event, data);
        }
    }
}

impl<D, F> Drop for Registration<D, F>
where
    F: FnMut(&Event, &mut D),
{
    fn drop(&mut self) {
        if let (Some(teardown), Some(data)) = (self.teardown.take(), self.data.take()) {
            teardown(data);
        }
    }
}

/// Single-slot event handler
#[derive(Default)]
pub struct EventDispatcher {
    handler: Option<Box<dyn Handler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self { handler: None }
    }

    /// Install a handler, replacing (and tearing down) any previous one
    pub fn register<D, F>(&mut self, handler: F, data: D)
    where
        D: 'static,
        F: FnMut(&Event, &mut D) + 'static,
    {
        self.install(Registration {
            handler,
            data: Some(data),
            teardown: None,
        });
    }

    /// Install a handler whose data is passed to `teardown` when it is removed
    pub fn register_with_teardown<D, F, T>(&mut self, handler: F, data: D, teardown: T)
    where
        D: 'static,
        F: FnMut(&Event, &mut D) + 'static,
        T: FnOnce(D) + 'static,
    {
        self.install(Registration {
            handler,
            data: Some(data),
            teardown: Some(Box::new(teardown)),
        });
    }

    fn install<D, F>(&mut self, registration: Registration<D, F>)
    where
        D: 'static,
        F: FnMut(&Event, &mut D) + 'static,
    {
        if self.handler.replace(Box::new(registration)).is_some() {
            tracing::debug!("Replaced event handler");
        }
    }

    /// Remove the current handler, running its teardown
    ///
    /// Returns false if no handler was installed.
    pub fn unregister(&mut self) -> bool {
        self.handler.take().is_some()
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Deliver an event to the handler
    ///
    /// Returns false if no handler is installed.
    pub fn dispatch(&mut self, event: &Event) -> bool {
        match self.handler.as_mut() {
            Some(handler) => {
                handler.handle(event);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("has_handler", &self.has_handler())
            .finish()
    }
}
