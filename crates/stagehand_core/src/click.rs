//! Double and triple click synthesis
//!
//! The synthesizer remembers the last two button presses. Slot 0 holds the
//! most recent press and slot 1 the one before it. Each incoming press is
//! first tested against slot 1 for a triple click (with a window twice the
//! double click time), then against slot 0 for a double click. A match
//! produces a copy of the press retyped to [`EventType::ThreeButtonPress`]
//! or [`EventType::TwoButtonPress`]; the caller delivers it through the
//! same path as the press itself.
//!
//! History never expires on its own. A stale slot simply fails the time
//! comparison on the next press.

use crate::events::{Event, EventType, Timestamp};
use crate::settings::ClickSettings;

/// One remembered press
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClickSlot {
    pub time: Timestamp,
    /// `None` marks an empty slot, which matches no button
    pub button: Option<u32>,
    pub x: i32,
    pub y: i32,
}

impl ClickSlot {
    const EMPTY: ClickSlot = ClickSlot {
        time: 0,
        button: None,
        x: 0,
        y: 0,
    };

    fn from_press(press: &Event) -> Self {
        let (x, y) = press.coords();
        Self {
            time: press.time(),
            button: Some(press.button()),
            x,
            y,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.button.is_none()
    }

    /// Whether `press` lands inside this slot's window and radius
    fn matches(&self, press: &Event, window: u64, distance: u32) -> bool {
        let Some(button) = self.button else {
            return false;
        };
        let (x, y) = press.coords();
        let distance = i64::from(distance);

        u64::from(press.time()) < u64::from(self.time) + window
            && press.button() == button
            && (i64::from(x) - i64::from(self.x)).abs() <= distance
            && (i64::from(y) - i64::from(self.y)).abs() <= distance
    }
}

/// Press history for one backend
#[derive(Clone, Debug, Default)]
pub struct ClickSynthesizer {
    slots: [ClickSlot; 2],
}

impl ClickSynthesizer {
    pub fn new() -> Self {
        Self {
            slots: [ClickSlot::EMPTY; 2],
        }
    }

    /// Most recent press first
    pub fn slots(&self) -> &[ClickSlot; 2] {
        &self.slots
    }

    /// Forget all remembered presses
    pub fn reset(&mut self) {
        self.slots = [ClickSlot::EMPTY; 2];
    }

    /// Feed a press through the history
    ///
    /// Returns the synthesized multi-click event, if any. Events other than
    /// [`EventType::ButtonPress`] are ignored and leave the history as is.
    pub fn process(&mut self, event: &Event, settings: &ClickSettings) -> Option<Event> {
        if event.event_type() != EventType::ButtonPress {
            return None;
        }

        let window = u64::from(settings.double_click_time);
        let distance = settings.double_click_distance;

        if self.slots[1].matches(event, 2 * window, distance) {
            tracing::trace!(
                "Triple click: button {} at {:?}",
                event.button(),
                event.coords()
            );
            self.reset();
            return event.retyped(EventType::ThreeButtonPress);
        }

        if self.slots[0].matches(event, window, distance) {
            tracing::trace!(
                "Double click: button {} at {:?}",
                event.button(),
                event.coords()
            );
            self.slots[1] = self.slots[0];
            self.slots[0] = ClickSlot::from_press(event);
            return event.retyped(EventType::TwoButtonPress);
        }

        self.slots[1] = ClickSlot::EMPTY;
        self.slots[0] = ClickSlot::from_press(event);
        None
    }
}
