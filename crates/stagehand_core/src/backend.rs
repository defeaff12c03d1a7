//! Per-backend event state
//!
//! A [`Backend`] owns the pending event queue, the click history, and the
//! click thresholds for one platform integration. Platform input code
//! translates native events and hands them to the backend; the main
//! context drains them.

use crate::click::{ClickSlot, ClickSynthesizer};
use crate::events::Event;
use crate::queue::EventQueue;
use crate::settings::ClickSettings;

#[derive(Debug, Default)]
pub struct Backend {
    queue: EventQueue,
    clicks: ClickSynthesizer,
    settings: ClickSettings,
}

impl Backend {
    pub fn new() -> Self {
        Self::with_settings(ClickSettings::default())
    }

    pub fn with_settings(settings: ClickSettings) -> Self {
        Self {
            queue: EventQueue::new(),
            clicks: ClickSynthesizer::new(),
            settings,
        }
    }

    /// Append an event to the queue, taking ownership
    pub fn push_event(&mut self, event: Event) {
        tracing::trace!("Queued {:?} at {}", event.event_type(), event.time());
        self.queue.push(event);
    }

    /// Append a copy of an event to the queue
    pub fn put_event(&mut self, event: &Event) {
        self.push_event(event.clone());
    }

    pub fn pop_event(&mut self) -> Option<Event> {
        self.queue.pop()
    }

    pub fn peek_event(&self) -> Option<&Event> {
        self.queue.peek()
    }

    pub fn has_pending(&self) -> bool {
        self.queue.has_pending()
    }

    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }

    /// Run a press through click synthesis, queueing any multi-click event
    ///
    /// The press itself is not queued. Returns true if a double or triple
    /// click was synthesized.
    pub fn generate_button(&mut self, event: &Event) -> bool {
        match self.clicks.process(event, &self.settings) {
            Some(click) => {
                tracing::debug!(
                    "Synthesized {:?} for button {}",
                    click.event_type(),
                    click.button()
                );
                self.push_event(click);
                true
            }
            None => false,
        }
    }

    /// Queue an organic press, followed by any click it completes
    pub fn push_button_press(&mut self, event: Event) {
        let click = self.clicks.process(&event, &self.settings);
        self.push_event(event);
        if let Some(click) = click {
            tracing::debug!(
                "Synthesized {:?} for button {}",
                click.event_type(),
                click.button()
            );
            self.push_event(click);
        }
    }

    /// Drop pending events and forget the click history
    pub fn flush(&mut self) {
        self.queue.clear();
        self.clicks.reset();
    }

    pub fn click_settings(&self) -> &ClickSettings {
        &self.settings
    }

    pub fn set_click_settings(&mut self, settings: ClickSettings) {
        self.settings = settings;
    }

    pub fn set_double_click_time(&mut self, millis: u32) {
        self.settings.double_click_time = millis;
    }

    pub fn set_double_click_distance(&mut self, pixels: u32) {
        self.settings.double_click_distance = pixels;
    }

    pub fn click_history(&self) -> &[ClickSlot; 2] {
        self.clicks.slots()
    }
}
