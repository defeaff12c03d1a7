//! Android input handling
//!
//! Converts Android motion and key input into Stagehand events.
//!
//! The translation works on [`RawMotion`] and [`RawKey`], plain copies of
//! the NDK accessor values, so it can be exercised off-device. On Android
//! the raw values are read straight from `ndk::event` input events.

use stagehand_core::prelude::*;
use stagehand_core::Timestamp;

/// `AMOTION_EVENT_ACTION_*` values
pub mod motion_action {
    pub const MASK: i32 = 0xff;
    pub const DOWN: i32 = 0;
    pub const UP: i32 = 1;
    pub const MOVE: i32 = 2;
    pub const CANCEL: i32 = 3;
    pub const POINTER_DOWN: i32 = 5;
    pub const POINTER_UP: i32 = 6;
    pub const SCROLL: i32 = 8;
}

/// `AKEY_EVENT_ACTION_*` values
pub mod key_action {
    pub const DOWN: i32 = 0;
    pub const UP: i32 = 1;
    pub const MULTIPLE: i32 = 2;
}

/// `AMETA_*` bits
pub mod meta {
    pub const SHIFT_ON: u32 = 0x01;
    pub const ALT_ON: u32 = 0x02;
    pub const SYM_ON: u32 = 0x04;
    pub const CTRL_ON: u32 = 0x1000;
    pub const META_ON: u32 = 0x10000;
    pub const CAPS_LOCK_ON: u32 = 0x100000;
}

/// Motion input as reported by `AMotionEvent_*`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawMotion {
    /// Action including the pointer index bits
    pub action: i32,
    /// Event time in nanoseconds on the `uptimeMillis` clock
    pub event_time_ns: i64,
    /// X coordinate of the first pointer in window space
    pub x: f32,
    /// Y coordinate of the first pointer in window space
    pub y: f32,
    pub meta_state: u32,
    pub hscroll: f32,
    pub vscroll: f32,
}

/// Key input as reported by `AKeyEvent_*`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawKey {
    pub action: i32,
    /// `AKEYCODE_*` value
    pub key_code: u32,
    pub scan_code: i32,
    pub meta_state: u32,
    pub event_time_ns: i64,
    /// Character from `KeyEvent.getUnicodeChar`, 0 if unknown
    pub unicode_char: u32,
}

/// Convert NDK nanoseconds to event milliseconds
pub fn event_time(nanos: i64) -> Timestamp {
    (nanos / 1_000_000) as Timestamp
}

/// Map `AMETA_*` bits to modifier flags
pub fn modifier_state(meta_state: u32) -> ModifierType {
    const MAPPING: [(u32, ModifierType); 6] = [
        (meta::SHIFT_ON, ModifierType::SHIFT),
        (meta::ALT_ON, ModifierType::MOD1),
        (meta::SYM_ON, ModifierType::MOD5),
        (meta::CTRL_ON, ModifierType::CONTROL),
        (meta::META_ON, ModifierType::META),
        (meta::CAPS_LOCK_ON, ModifierType::LOCK),
    ];

    MAPPING
        .iter()
        .filter(|(bit, _)| meta_state & bit != 0)
        .fold(ModifierType::empty(), |state, (_, flag)| state | *flag)
}

/// Map an `AKEYCODE_*` value to a key symbol
pub fn keycode_to_keysym(key_code: u32) -> u32 {
    match key_code {
        // AKEYCODE_0 ..= AKEYCODE_9
        7..=16 => '0' as u32 + (key_code - 7),
        // AKEYCODE_A ..= AKEYCODE_Z
        29..=54 => 'a' as u32 + (key_code - 29),
        19 => keys::UP,
        20 => keys::DOWN,
        21 => keys::LEFT,
        22 => keys::RIGHT,
        55 => ',' as u32,
        56 => '.' as u32,
        57 => keys::ALT_L,
        58 => keys::ALT_R,
        59 => keys::SHIFT_L,
        60 => keys::SHIFT_R,
        61 => keys::TAB,
        62 => ' ' as u32,
        66 => keys::RETURN,
        67 => keys::BACKSPACE,
        68 => '`' as u32,
        69 => '-' as u32,
        70 => '=' as u32,
        71 => '[' as u32,
        72 => ']' as u32,
        73 => '\\' as u32,
        74 => ';' as u32,
        75 => '\'' as u32,
        76 => '/' as u32,
        82 => keys::MENU,
        92 => keys::PAGE_UP,
        93 => keys::PAGE_DOWN,
        111 => keys::ESCAPE,
        112 => keys::DELETE,
        113 => keys::CONTROL_L,
        114 => keys::CONTROL_R,
        115 => keys::CAPS_LOCK,
        117 => keys::META_L,
        118 => keys::META_R,
        121 => keys::PAUSE,
        122 => keys::HOME,
        123 => keys::END,
        124 => keys::INSERT,
        // AKEYCODE_F1 ..= AKEYCODE_F12
        131..=142 => keys::F1 + (key_code - 131),
        143 => keys::NUM_LOCK,
        160 => keys::KP_ENTER,
        _ => keys::VOID_SYMBOL,
    }
}

/// Translate motion input into an event
///
/// Returns `None` for actions with no event equivalent (cancel, hover,
/// secondary pointers, scrolls without movement).
pub fn translate_motion(raw: &RawMotion, pointer: Option<DeviceId>) -> Option<Event> {
    let time = event_time(raw.event_time_ns);
    let modifier_state = modifier_state(raw.meta_state);
    let (x, y) = (raw.x as i32, raw.y as i32);

    let button = ButtonEvent {
        time,
        modifier_state,
        x,
        y,
        button: 1,
        click_count: 1,
        device: pointer,
    };

    match raw.action & motion_action::MASK {
        motion_action::DOWN => Some(Event::button_press(button)),
        motion_action::UP => Some(Event::button_release(button)),
        // A moving touch always has the primary button held
        motion_action::MOVE => Some(Event::motion(MotionEvent {
            time,
            modifier_state: modifier_state | ModifierType::BUTTON1,
            x,
            y,
            device: pointer,
        })),
        motion_action::SCROLL => {
            let direction = scroll_direction(raw.hscroll, raw.vscroll)?;
            Some(Event::scroll(ScrollEvent {
                time,
                modifier_state,
                x,
                y,
                direction,
            }))
        }
        _ => None,
    }
}

fn scroll_direction(hscroll: f32, vscroll: f32) -> Option<ScrollDirection> {
    if hscroll == 0.0 && vscroll == 0.0 {
        return None;
    }

    Some(if vscroll.abs() >= hscroll.abs() {
        if vscroll > 0.0 {
            ScrollDirection::Up
        } else {
            ScrollDirection::Down
        }
    } else if hscroll > 0.0 {
        ScrollDirection::Right
    } else {
        ScrollDirection::Left
    })
}

/// Translate key input into an event
pub fn translate_key(raw: &RawKey) -> Option<Event> {
    let mut keyval = keycode_to_keysym(raw.key_code);
    if keyval == keys::VOID_SYMBOL && raw.unicode_char != 0 {
        keyval = unicode_to_keysym(raw.unicode_char);
    }

    let key = KeyEvent {
        time: event_time(raw.event_time_ns),
        modifier_state: modifier_state(raw.meta_state),
        keyval,
        hardware_keycode: u16::try_from(raw.scan_code).unwrap_or(0),
        unicode_value: raw.unicode_char,
    };

    match raw.action {
        key_action::DOWN | key_action::MULTIPLE => Some(Event::key_press(key)),
        key_action::UP => Some(Event::key_release(key)),
        _ => None,
    }
}

/// Feeds translated Android input into a main context
#[derive(Debug, Default)]
pub struct AndroidInput {
    dropped: u64,
}

impl AndroidInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of inputs that could not be translated
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Translate and queue motion input targeted at `stage`
    ///
    /// Returns whether the input was consumed.
    pub fn handle_motion(
        &mut self,
        context: &mut MainContext,
        raw: &RawMotion,
        stage: Option<StageId>,
    ) -> bool {
        let pointer = context.devices().core_device(InputDeviceType::Pointer);
        if let Some(pointer) = pointer {
            context.devices_mut().set_stage(pointer, stage);
        }

        let Some(mut event) = translate_motion(raw, pointer) else {
            tracing::warn!("Untranslated motion action {}", raw.action);
            self.dropped += 1;
            return false;
        };
        event.set_stage(stage);

        tracing::trace!("Touch {:?} at {:?}", event.event_type(), event.coords());
        if event.event_type() == EventType::ButtonPress {
            context.backend_mut().push_button_press(event);
        } else {
            context.backend_mut().push_event(event);
        }
        true
    }

    /// Translate and queue key input targeted at `stage`
    ///
    /// Returns whether the input was consumed.
    pub fn handle_key(
        &mut self,
        context: &mut MainContext,
        raw: &RawKey,
        stage: Option<StageId>,
    ) -> bool {
        let Some(mut event) = translate_key(raw) else {
            tracing::warn!("Untranslated key action {}", raw.action);
            self.dropped += 1;
            return false;
        };
        event.set_stage(stage);
        context.backend_mut().push_event(event);
        true
    }
}

#[cfg(target_os = "android")]
impl From<&ndk::event::MotionEvent> for RawMotion {
    fn from(event: &ndk::event::MotionEvent) -> Self {
        use ndk::event::{Axis, MotionAction};

        let action = match event.action() {
            MotionAction::Down => motion_action::DOWN,
            MotionAction::Up => motion_action::UP,
            MotionAction::Move => motion_action::MOVE,
            MotionAction::Cancel => motion_action::CANCEL,
            MotionAction::PointerDown => motion_action::POINTER_DOWN,
            MotionAction::PointerUp => motion_action::POINTER_UP,
            MotionAction::Scroll => motion_action::SCROLL,
            _ => -1,
        };

        let mut raw = RawMotion {
            action,
            event_time_ns: event.event_time(),
            meta_state: event.meta_state().0,
            ..Default::default()
        };

        if event.pointer_count() > 0 {
            let pointer = event.pointer_at_index(0);
            raw.x = pointer.x();
            raw.y = pointer.y();
            raw.hscroll = pointer.axis_value(Axis::Hscroll);
            raw.vscroll = pointer.axis_value(Axis::Vscroll);
        }
        raw
    }
}

#[cfg(target_os = "android")]
impl From<&ndk::event::KeyEvent> for RawKey {
    fn from(event: &ndk::event::KeyEvent) -> Self {
        use ndk::event::KeyAction;

        let action = match event.action() {
            KeyAction::Down => key_action::DOWN,
            KeyAction::Up => key_action::UP,
            KeyAction::Multiple => key_action::MULTIPLE,
            _ => -1,
        };

        RawKey {
            action,
            key_code: u32::from(event.key_code()),
            scan_code: event.scan_code(),
            meta_state: event.meta_state().0,
            event_time_ns: event.event_time(),
            // The NDK does not expose getUnicodeChar without a JNI round trip
            unicode_char: 0,
        }
    }
}
