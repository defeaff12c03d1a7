//! Event values
//!
//! An [`Event`] is one normalized input occurrence: a key, a pointer button,
//! pointer motion, a scroll step, or nothing at all. Backends build events
//! from native input and push them through the pipeline; the application
//! reads them back through the accessors below.
//!
//! The event type and the payload variant always agree. Every constructor
//! picks the payload from the type, and [`Event::retyped`] refuses to move
//! an event across payload families, so there is no way to read a button
//! payload out of a key event. All accessors are total: asking a key event
//! for its coordinates yields `(0, 0)`, asking a motion event for its key
//! symbol yields 0.

use bitflags::bitflags;

use crate::device::{DeviceId, StageId};
use crate::error::Error;
use crate::keysyms::keysym_to_unicode;

/// Event timestamp in milliseconds
pub type Timestamp = u32;

/// Sentinel time returned for events that carry no timestamp
pub const CURRENT_TIME: Timestamp = 0;

/// Event type discriminant
#[repr(u32)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EventType {
    /// No event
    #[default]
    Nothing = 0,
    KeyPress = 1,
    KeyRelease = 2,
    Motion = 3,
    ButtonPress = 4,
    /// Synthesized second press of a double click
    TwoButtonPress = 5,
    /// Synthesized third press of a triple click
    ThreeButtonPress = 6,
    ButtonRelease = 7,
    Scroll = 8,
}

impl EventType {
    /// Whether this type is any of the button press variants
    pub fn is_button_press(self) -> bool {
        matches!(
            self,
            EventType::ButtonPress | EventType::TwoButtonPress | EventType::ThreeButtonPress
        )
    }

    fn family(self) -> PayloadFamily {
        match self {
            EventType::Nothing => PayloadFamily::Nothing,
            EventType::KeyPress | EventType::KeyRelease => PayloadFamily::Key,
            EventType::ButtonPress
            | EventType::TwoButtonPress
            | EventType::ThreeButtonPress
            | EventType::ButtonRelease => PayloadFamily::Button,
            EventType::Motion => PayloadFamily::Motion,
            EventType::Scroll => PayloadFamily::Scroll,
        }
    }
}

impl TryFrom<u32> for EventType {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => EventType::Nothing,
            1 => EventType::KeyPress,
            2 => EventType::KeyRelease,
            3 => EventType::Motion,
            4 => EventType::ButtonPress,
            5 => EventType::TwoButtonPress,
            6 => EventType::ThreeButtonPress,
            7 => EventType::ButtonRelease,
            8 => EventType::Scroll,
            other => return Err(Error::UnknownEventType(other)),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PayloadFamily {
    Nothing,
    Key,
    Button,
    Motion,
    Scroll,
}

bitflags! {
    /// Per-event flags
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EventFlags: u32 {
        const NONE = 0;
        /// Event was manufactured by the toolkit rather than a platform source
        const SYNTHETIC = 1 << 0;
    }
}

bitflags! {
    /// Keyboard modifier and pointer button state
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ModifierType: u32 {
        const SHIFT = 1 << 0;
        const LOCK = 1 << 1;
        const CONTROL = 1 << 2;
        const MOD1 = 1 << 3;
        const MOD2 = 1 << 4;
        const MOD3 = 1 << 5;
        const MOD4 = 1 << 6;
        const MOD5 = 1 << 7;
        const BUTTON1 = 1 << 8;
        const BUTTON2 = 1 << 9;
        const BUTTON3 = 1 << 10;
        const BUTTON4 = 1 << 11;
        const BUTTON5 = 1 << 12;
        const SUPER = 1 << 26;
        const HYPER = 1 << 27;
        const META = 1 << 28;
        const RELEASE = 1 << 30;
    }
}

impl ModifierType {
    /// Mask bit for a held pointer button (1-based); empty past button 5
    pub fn button_mask(button: u32) -> Self {
        match button {
            1 => ModifierType::BUTTON1,
            2 => ModifierType::BUTTON2,
            3 => ModifierType::BUTTON3,
            4 => ModifierType::BUTTON4,
            5 => ModifierType::BUTTON5,
            _ => ModifierType::empty(),
        }
    }
}

/// Scroll direction
#[repr(u32)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    #[default]
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl TryFrom<u32> for ScrollDirection {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => ScrollDirection::Up,
            1 => ScrollDirection::Down,
            2 => ScrollDirection::Left,
            3 => ScrollDirection::Right,
            other => return Err(Error::UnknownScrollDirection(other)),
        })
    }
}

/// Key press or release payload
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyEvent {
    pub time: Timestamp,
    pub modifier_state: ModifierType,
    /// Platform key symbol
    pub keyval: u32,
    pub hardware_keycode: u16,
    /// Character supplied by the platform, or 0 to derive it from `keyval`
    pub unicode_value: u32,
}

/// Pointer button payload
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ButtonEvent {
    pub time: Timestamp,
    pub modifier_state: ModifierType,
    pub x: i32,
    pub y: i32,
    /// 1-based button ordinal
    pub button: u32,
    pub click_count: u32,
    pub device: Option<DeviceId>,
}

/// Pointer motion payload
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MotionEvent {
    pub time: Timestamp,
    pub modifier_state: ModifierType,
    pub x: i32,
    pub y: i32,
    pub device: Option<DeviceId>,
}

/// Scroll payload
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollEvent {
    pub time: Timestamp,
    pub modifier_state: ModifierType,
    pub x: i32,
    pub y: i32,
    pub direction: ScrollDirection,
}

#[derive(Clone, Debug, PartialEq)]
enum Payload {
    Nothing,
    Key(KeyEvent),
    Button(ButtonEvent),
    Motion(MotionEvent),
    Scroll(ScrollEvent),
}

impl Payload {
    fn zeroed(family: PayloadFamily) -> Self {
        match family {
            PayloadFamily::Nothing => Payload::Nothing,
            PayloadFamily::Key => Payload::Key(KeyEvent::default()),
            PayloadFamily::Button => Payload::Button(ButtonEvent::default()),
            PayloadFamily::Motion => Payload::Motion(MotionEvent::default()),
            PayloadFamily::Scroll => Payload::Scroll(ScrollEvent::default()),
        }
    }
}

/// A normalized input event
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    event_type: EventType,
    flags: EventFlags,
    stage: Option<StageId>,
    payload: Payload,
}

impl Event {
    /// Create an event of the given type with a zeroed payload
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            flags: EventFlags::NONE,
            stage: None,
            payload: Payload::zeroed(event_type.family()),
        }
    }

    fn with_payload(event_type: EventType, payload: Payload) -> Self {
        Self {
            event_type,
            flags: EventFlags::NONE,
            stage: None,
            payload,
        }
    }

    pub fn key_press(key: KeyEvent) -> Self {
        Self::with_payload(EventType::KeyPress, Payload::Key(key))
    }

    pub fn key_release(key: KeyEvent) -> Self {
        Self::with_payload(EventType::KeyRelease, Payload::Key(key))
    }

    pub fn button_press(button: ButtonEvent) -> Self {
        Self::with_payload(EventType::ButtonPress, Payload::Button(button))
    }

    pub fn button_release(button: ButtonEvent) -> Self {
        Self::with_payload(EventType::ButtonRelease, Payload::Button(button))
    }

    pub fn motion(motion: MotionEvent) -> Self {
        Self::with_payload(EventType::Motion, Payload::Motion(motion))
    }

    pub fn scroll(scroll: ScrollEvent) -> Self {
        Self::with_payload(EventType::Scroll, Payload::Scroll(scroll))
    }

    /// Target the event at a stage
    pub fn with_stage(mut self, stage: StageId) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn with_flags(mut self, flags: EventFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn set_stage(&mut self, stage: Option<StageId>) {
        self.stage = stage;
    }

    pub fn set_flags(&mut self, flags: EventFlags) {
        self.flags = flags;
    }

    /// Copy this event under another type of the same payload family
    ///
    /// Returns `None` when the payloads differ, e.g. turning a key press
    /// into a motion event.
    pub fn retyped(&self, event_type: EventType) -> Option<Event> {
        if event_type.family() != self.event_type.family() {
            return None;
        }
        let mut event = self.clone();
        event.event_type = event_type;
        Some(event)
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn flags(&self) -> EventFlags {
        self.flags
    }

    pub fn is_synthetic(&self) -> bool {
        self.flags.contains(EventFlags::SYNTHETIC)
    }

    /// Stage the event targets
    pub fn stage(&self) -> Option<StageId> {
        self.stage
    }

    /// Event time, or [`CURRENT_TIME`] for events without one
    pub fn time(&self) -> Timestamp {
        match &self.payload {
            Payload::Key(key) => key.time,
            Payload::Button(button) => button.time,
            Payload::Motion(motion) => motion.time,
            Payload::Scroll(scroll) => scroll.time,
            Payload::Nothing => CURRENT_TIME,
        }
    }

    /// Modifier state, or empty for events without one
    pub fn modifier_state(&self) -> ModifierType {
        match &self.payload {
            Payload::Key(key) => key.modifier_state,
            Payload::Button(button) => button.modifier_state,
            Payload::Motion(motion) => motion.modifier_state,
            Payload::Scroll(scroll) => scroll.modifier_state,
            Payload::Nothing => ModifierType::empty(),
        }
    }

    /// Event coordinates; `(0, 0)` for events without a position
    pub fn coords(&self) -> (i32, i32) {
        match &self.payload {
            Payload::Button(button) => (button.x, button.y),
            Payload::Motion(motion) => (motion.x, motion.y),
            Payload::Scroll(scroll) => (scroll.x, scroll.y),
            Payload::Key(_) | Payload::Nothing => (0, 0),
        }
    }

    /// Write the coordinates into whichever outputs are given
    pub fn write_coords(&self, x: Option<&mut i32>, y: Option<&mut i32>) {
        let (event_x, event_y) = self.coords();
        if let Some(x) = x {
            *x = event_x;
        }
        if let Some(y) = y {
            *y = event_y;
        }
    }

    /// Button ordinal; 0 for non-button events
    pub fn button(&self) -> u32 {
        self.as_button().map_or(0, |button| button.button)
    }

    pub fn click_count(&self) -> u32 {
        self.as_button().map_or(0, |button| button.click_count)
    }

    /// Device that produced a button or motion event
    pub fn device(&self) -> Option<DeviceId> {
        match &self.payload {
            Payload::Button(button) => button.device,
            Payload::Motion(motion) => motion.device,
            _ => None,
        }
    }

    /// Key symbol; 0 for non-key events
    pub fn key_symbol(&self) -> u32 {
        self.as_key().map_or(0, |key| key.keyval)
    }

    /// Hardware keycode; 0 for non-key events
    pub fn key_code(&self) -> u16 {
        self.as_key().map_or(0, |key| key.hardware_keycode)
    }

    /// Unicode value of the key symbol; 0 for non-key events or keysyms
    /// without a character
    pub fn key_unicode(&self) -> u32 {
        self.as_key().map_or(0, |key| keysym_to_unicode(key.keyval))
    }

    /// Character the platform reported for the key press, 0 if none
    pub fn key_text_unicode(&self) -> u32 {
        self.as_key().map_or(0, |key| key.unicode_value)
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.as_scroll().map(|scroll| scroll.direction)
    }

    pub fn as_key(&self) -> Option<&KeyEvent> {
        match &self.payload {
            Payload::Key(key) => Some(key),
            _ => None,
        }
    }

    pub fn as_button(&self) -> Option<&ButtonEvent> {
        match &self.payload {
            Payload::Button(button) => Some(button),
            _ => None,
        }
    }

    pub fn as_motion(&self) -> Option<&MotionEvent> {
        match &self.payload {
            Payload::Motion(motion) => Some(motion),
            _ => None,
        }
    }

    pub fn as_scroll(&self) -> Option<&ScrollEvent> {
        match &self.payload {
            Payload::Scroll(scroll) => Some(scroll),
            _ => None,
        }
    }
}

impl Default for Event {
    fn default() -> Self {
        Self::new(EventType::Nothing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(time: Timestamp, x: i32, y: i32) -> Event {
        Event::button_press(ButtonEvent {
            time,
            x,
            y,
            button: 1,
            click_count: 1,
            modifier_state: ModifierType::SHIFT | ModifierType::BUTTON1,
            ..Default::default()
        })
    }

    #[test]
    fn test_new_event_defaults() {
        let event = Event::new(EventType::Motion);
        assert_eq!(event.event_type(), EventType::Motion);
        assert_eq!(event.flags(), EventFlags::NONE);
        assert!(event.as_motion().is_some());
        assert_eq!(event.coords(), (0, 0));
        assert!(event.stage().is_none());
    }

    #[test]
    fn test_nothing_event_accessors() {
        let event = Event::default();
        assert_eq!(event.event_type(), EventType::Nothing);
        assert_eq!(event.time(), CURRENT_TIME);
        assert_eq!(event.modifier_state(), ModifierType::empty());
        assert_eq!(event.coords(), (0, 0));
        assert_eq!(event.button(), 0);
        assert_eq!(event.key_symbol(), 0);
        assert_eq!(event.key_unicode(), 0);
        assert_eq!(event.scroll_direction(), None);
    }

    #[test]
    fn test_key_event_coords_are_zero() {
        let event = Event::key_press(KeyEvent {
            time: 10,
            keyval: 0x61,
            ..Default::default()
        });

        let mut x = 42;
        let mut y = -7;
        event.write_coords(Some(&mut x), Some(&mut y));
        assert_eq!((x, y), (0, 0));

        // Either output may be omitted
        let mut x = 5;
        event.write_coords(Some(&mut x), None);
        assert_eq!(x, 0);
        event.write_coords(None, None);
    }

    #[test]
    fn test_button_accessors() {
        let event = press(1200, 10, 20);
        assert_eq!(event.time(), 1200);
        assert_eq!(event.coords(), (10, 20));
        assert_eq!(event.button(), 1);
        assert_eq!(event.click_count(), 1);
        assert!(event.modifier_state().contains(ModifierType::SHIFT));
        assert_eq!(event.key_symbol(), 0);
        assert_eq!(event.key_code(), 0);
    }

    #[test]
    fn test_key_unicode_follows_keysym() {
        let event = Event::key_press(KeyEvent {
            keyval: 0x06c1,
            unicode_value: 0x41,
            ..Default::default()
        });
        assert_eq!(event.key_unicode(), keysym_to_unicode(0x06c1));
        assert_eq!(event.key_unicode(), 0x0430);
        assert_eq!(event.key_text_unicode(), 0x41);

        let plain = Event::key_press(KeyEvent {
            keyval: 0x61,
            ..Default::default()
        });
        assert_eq!(plain.key_unicode(), 0x61);
        assert_eq!(plain.key_text_unicode(), 0);
        assert_eq!(Event::new(EventType::Motion).key_text_unicode(), 0);
    }

    #[test]
    fn test_retyped_stays_within_family() {
        let event = press(5, 1, 1);
        let double = event.retyped(EventType::TwoButtonPress).unwrap();
        assert_eq!(double.event_type(), EventType::TwoButtonPress);
        assert_eq!(double.as_button(), event.as_button());

        assert!(event.retyped(EventType::Motion).is_none());
        assert!(event.retyped(EventType::KeyPress).is_none());
    }

    #[test]
    fn test_clone_is_deep_copy() {
        let original = press(99, 3, 4).with_flags(EventFlags::SYNTHETIC);
        let copy = original.clone();
        drop(original);
        assert_eq!(copy.time(), 99);
        assert!(copy.is_synthetic());
    }

    #[test]
    fn test_raw_discriminants() {
        assert_eq!(EventType::try_from(6).unwrap(), EventType::ThreeButtonPress);
        assert!(matches!(
            EventType::try_from(42),
            Err(Error::UnknownEventType(42))
        ));
        assert_eq!(ScrollDirection::try_from(3).unwrap(), ScrollDirection::Right);
        assert!(ScrollDirection::try_from(4).is_err());
        assert_eq!(EventType::Scroll as u32, 8);
    }

    #[test]
    fn test_button_mask() {
        assert_eq!(ModifierType::button_mask(1), ModifierType::BUTTON1);
        assert_eq!(ModifierType::button_mask(5), ModifierType::BUTTON5);
        assert!(ModifierType::button_mask(8).is_empty());
    }
}
