//! Desktop input conversion (winit -> stagehand_core)

use std::time::Instant;

use stagehand_core::prelude::*;
use stagehand_core::Timestamp;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta};
use winit::keyboard::{Key as WinitKey, ModifiersState, NamedKey};

/// Convert winit mouse button to an X11-style button ordinal
pub fn convert_mouse_button(button: WinitMouseButton) -> u32 {
    match button {
        WinitMouseButton::Left => 1,
        WinitMouseButton::Middle => 2,
        WinitMouseButton::Right => 3,
        WinitMouseButton::Back => 8,
        WinitMouseButton::Forward => 9,
        WinitMouseButton::Other(n) => u32::from(n),
    }
}

/// Convert winit modifiers to modifier flags
pub fn convert_modifiers(modifiers: ModifiersState) -> ModifierType {
    let mut state = ModifierType::empty();
    state.set(ModifierType::SHIFT, modifiers.shift_key());
    state.set(ModifierType::CONTROL, modifiers.control_key());
    state.set(ModifierType::MOD1, modifiers.alt_key());
    state.set(ModifierType::SUPER, modifiers.super_key());
    state
}

/// Convert winit logical key to a key symbol
pub fn convert_key(key: &WinitKey) -> u32 {
    match key {
        WinitKey::Named(named) => match named {
            // Special keys
            NamedKey::Space => ' ' as u32,
            NamedKey::Enter => keys::RETURN,
            NamedKey::Escape => keys::ESCAPE,
            NamedKey::Backspace => keys::BACKSPACE,
            NamedKey::Tab => keys::TAB,
            NamedKey::Delete => keys::DELETE,
            NamedKey::Insert => keys::INSERT,
            NamedKey::Home => keys::HOME,
            NamedKey::End => keys::END,
            NamedKey::PageUp => keys::PAGE_UP,
            NamedKey::PageDown => keys::PAGE_DOWN,
            NamedKey::Pause => keys::PAUSE,
            NamedKey::ContextMenu => keys::MENU,

            // Arrow keys
            NamedKey::ArrowLeft => keys::LEFT,
            NamedKey::ArrowRight => keys::RIGHT,
            NamedKey::ArrowUp => keys::UP,
            NamedKey::ArrowDown => keys::DOWN,

            // Modifier keys
            NamedKey::Shift => keys::SHIFT_L,
            NamedKey::Control => keys::CONTROL_L,
            NamedKey::Alt => keys::ALT_L,
            NamedKey::Super => keys::SUPER_L,
            NamedKey::Meta => keys::META_L,
            NamedKey::CapsLock => keys::CAPS_LOCK,
            NamedKey::NumLock => keys::NUM_LOCK,
            NamedKey::ScrollLock => keys::SCROLL_LOCK,

            // Function keys
            NamedKey::F1 => keys::F1,
            NamedKey::F2 => keys::F2,
            NamedKey::F3 => keys::F3,
            NamedKey::F4 => keys::F4,
            NamedKey::F5 => keys::F5,
            NamedKey::F6 => keys::F6,
            NamedKey::F7 => keys::F7,
            NamedKey::F8 => keys::F8,
            NamedKey::F9 => keys::F9,
            NamedKey::F10 => keys::F10,
            NamedKey::F11 => keys::F11,
            NamedKey::F12 => keys::F12,

            _ => keys::VOID_SYMBOL,
        },
        WinitKey::Character(text) => match text.chars().next() {
            Some(ch) => unicode_to_keysym(ch as u32),
            None => keys::VOID_SYMBOL,
        },
        _ => keys::VOID_SYMBOL,
    }
}

/// Scroll direction of a wheel delta; `None` for a zero delta
pub fn scroll_direction(delta: &MouseScrollDelta) -> Option<ScrollDirection> {
    let (dx, dy) = match *delta {
        MouseScrollDelta::LineDelta(x, y) => (f64::from(x), f64::from(y)),
        MouseScrollDelta::PixelDelta(pos) => (pos.x, pos.y),
    };

    if dy > 0.0 {
        Some(ScrollDirection::Up)
    } else if dy < 0.0 {
        Some(ScrollDirection::Down)
    } else if dx < 0.0 {
        Some(ScrollDirection::Left)
    } else if dx > 0.0 {
        Some(ScrollDirection::Right)
    } else {
        None
    }
}

/// Per-stage input state
///
/// winit reports modifiers, cursor position and buttons as separate
/// events; this folds them into complete event values.
#[derive(Debug)]
pub struct DesktopInput {
    stage: Option<StageId>,
    modifiers: ModifiersState,
    cursor: (i32, i32),
    held_buttons: ModifierType,
    started: Instant,
}

impl DesktopInput {
    pub fn new(stage: Option<StageId>) -> Self {
        Self {
            stage,
            modifiers: ModifiersState::empty(),
            cursor: (0, 0),
            held_buttons: ModifierType::empty(),
            started: Instant::now(),
        }
    }

    /// Milliseconds since this input source was created
    pub fn timestamp(&self) -> Timestamp {
        self.started.elapsed().as_millis() as Timestamp
    }

    pub fn stage(&self) -> Option<StageId> {
        self.stage
    }

    pub fn cursor(&self) -> (i32, i32) {
        self.cursor
    }

    pub fn set_modifiers(&mut self, modifiers: ModifiersState) {
        self.modifiers = modifiers;
    }

    /// Keyboard modifiers plus held pointer buttons
    pub fn modifier_state(&self) -> ModifierType {
        convert_modifiers(self.modifiers) | self.held_buttons
    }

    fn pointer(context: &MainContext) -> Option<DeviceId> {
        context.devices().core_device(InputDeviceType::Pointer)
    }

    fn queue(&self, context: &mut MainContext, event: Event) {
        let event = match self.stage {
            Some(stage) => event.with_stage(stage),
            None => event,
        };
        if event.event_type() == EventType::ButtonPress {
            context.backend_mut().push_button_press(event);
        } else {
            context.backend_mut().push_event(event);
        }
    }

    /// Queue a motion event for a cursor move
    pub fn cursor_moved(&mut self, context: &mut MainContext, x: f64, y: f64, time: Timestamp) {
        self.cursor = (x as i32, y as i32);
        let motion = MotionEvent {
            time,
            modifier_state: self.modifier_state(),
            x: self.cursor.0,
            y: self.cursor.1,
            device: Self::pointer(context),
        };
        self.queue(context, Event::motion(motion));
    }

    /// Queue a press or release at the last cursor position
    ///
    /// The event carries the button mask from before the change.
    pub fn mouse_input(
        &mut self,
        context: &mut MainContext,
        state: ElementState,
        button: WinitMouseButton,
        time: Timestamp,
    ) {
        let number = convert_mouse_button(button);
        let payload = ButtonEvent {
            time,
            modifier_state: self.modifier_state(),
            x: self.cursor.0,
            y: self.cursor.1,
            button: number,
            click_count: 1,
            device: Self::pointer(context),
        };

        let mask = ModifierType::button_mask(number);
        let event = match state {
            ElementState::Pressed => {
                self.held_buttons |= mask;
                Event::button_press(payload)
            }
            ElementState::Released => {
                self.held_buttons &= !mask;
                Event::button_release(payload)
            }
        };
        self.queue(context, event);
    }

    /// Queue a scroll event for a wheel delta
    ///
    /// Returns false for a zero delta, which produces no event.
    pub fn mouse_wheel(
        &mut self,
        context: &mut MainContext,
        delta: &MouseScrollDelta,
        time: Timestamp,
    ) -> bool {
        let Some(direction) = scroll_direction(delta) else {
            return false;
        };
        let scroll = ScrollEvent {
            time,
            modifier_state: self.modifier_state(),
            x: self.cursor.0,
            y: self.cursor.1,
            direction,
        };
        self.queue(context, Event::scroll(scroll));
        true
    }

    /// Queue a key press or release
    ///
    /// `text` is the text the key produced, if any; its first character
    /// becomes the event's unicode value.
    pub fn keyboard_input(
        &mut self,
        context: &mut MainContext,
        key: &WinitKey,
        state: ElementState,
        text: Option<&str>,
        time: Timestamp,
    ) {
        let keyval = convert_key(key);
        if keyval == keys::VOID_SYMBOL {
            tracing::debug!("No key symbol for {:?}", key);
        }

        let payload = KeyEvent {
            time,
            modifier_state: self.modifier_state(),
            keyval,
            hardware_keycode: 0,
            unicode_value: text.and_then(|t| t.chars().next()).map_or(0, |ch| ch as u32),
        };

        let event = match state {
            ElementState::Pressed => Event::key_press(payload),
            ElementState::Released => Event::key_release(payload),
        };
        self.queue(context, event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;
    use winit::keyboard::SmolStr;

    fn drain(context: &mut MainContext) -> Vec<Event> {
        std::iter::from_fn(|| context.get_event()).collect()
    }

    #[test]
    fn test_button_ordinals() {
        assert_eq!(convert_mouse_button(WinitMouseButton::Left), 1);
        assert_eq!(convert_mouse_button(WinitMouseButton::Middle), 2);
        assert_eq!(convert_mouse_button(WinitMouseButton::Right), 3);
        assert_eq!(convert_mouse_button(WinitMouseButton::Back), 8);
        assert_eq!(convert_mouse_button(WinitMouseButton::Forward), 9);
        assert_eq!(convert_mouse_button(WinitMouseButton::Other(12)), 12);
    }

    #[test]
    fn test_modifiers() {
        let state = convert_modifiers(ModifiersState::SHIFT | ModifiersState::ALT);
        assert_eq!(state, ModifierType::SHIFT | ModifierType::MOD1);
        assert_eq!(
            convert_modifiers(ModifiersState::SUPER | ModifiersState::CONTROL),
            ModifierType::SUPER | ModifierType::CONTROL
        );
    }

    #[test]
    fn test_key_symbols() {
        assert_eq!(convert_key(&WinitKey::Named(NamedKey::Enter)), keys::RETURN);
        assert_eq!(convert_key(&WinitKey::Named(NamedKey::F5)), keys::F5);
        assert_eq!(convert_key(&WinitKey::Named(NamedKey::Space)), 0x20);
        assert_eq!(convert_key(&WinitKey::Character(SmolStr::new("q"))), 'q' as u32);
        assert_eq!(convert_key(&WinitKey::Character(SmolStr::new("ж"))), 0x06d6);
        assert_eq!(
            convert_key(&WinitKey::Named(NamedKey::BrowserBack)),
            keys::VOID_SYMBOL
        );
    }

    #[test]
    fn test_scroll_directions() {
        let line = |x, y| scroll_direction(&MouseScrollDelta::LineDelta(x, y));
        assert_eq!(line(0.0, 1.0), Some(ScrollDirection::Up));
        assert_eq!(line(0.0, -1.0), Some(ScrollDirection::Down));
        assert_eq!(line(-1.0, 0.0), Some(ScrollDirection::Left));
        assert_eq!(line(1.0, 0.0), Some(ScrollDirection::Right));
        assert_eq!(line(0.0, 0.0), None);

        let pixels = MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -12.0));
        assert_eq!(scroll_direction(&pixels), Some(ScrollDirection::Down));
    }

    #[test]
    fn test_click_sequence_through_context() {
        let mut context = MainContext::new();
        let mut input = DesktopInput::new(None);

        input.cursor_moved(&mut context, 30.4, 40.9, 0);
        input.mouse_input(&mut context, ElementState::Pressed, WinitMouseButton::Left, 10);
        input.mouse_input(&mut context, ElementState::Released, WinitMouseButton::Left, 60);
        input.mouse_input(&mut context, ElementState::Pressed, WinitMouseButton::Left, 120);

        let events = drain(&mut context);
        let types: Vec<_> = events.iter().map(Event::event_type).collect();
        assert_eq!(
            types,
            vec![
                EventType::Motion,
                EventType::ButtonPress,
                EventType::ButtonRelease,
                EventType::ButtonPress,
                EventType::TwoButtonPress,
            ]
        );
        assert_eq!(events[1].coords(), (30, 40));
        // Release reports the button as still held
        assert!(events[2].modifier_state().contains(ModifierType::BUTTON1));
        assert!(!events[3].modifier_state().contains(ModifierType::BUTTON1));
    }

    #[test]
    fn test_events_target_stage() {
        let mut stages: slotmap::SlotMap<StageId, ()> = slotmap::SlotMap::with_key();
        let stage = stages.insert(());

        let mut context = MainContext::new();
        let mut input = DesktopInput::new(Some(stage));
        input.set_modifiers(ModifiersState::CONTROL);

        assert!(input.mouse_wheel(
            &mut context,
            &MouseScrollDelta::LineDelta(0.0, 2.0),
            5
        ));
        assert!(!input.mouse_wheel(
            &mut context,
            &MouseScrollDelta::LineDelta(0.0, 0.0),
            6
        ));
        input.keyboard_input(
            &mut context,
            &WinitKey::Character(SmolStr::new("a")),
            ElementState::Pressed,
            Some("A"),
            7,
        );

        let events = drain(&mut context);
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|event| event.stage() == Some(stage)));
        assert_eq!(events[0].scroll_direction(), Some(ScrollDirection::Up));
        assert_eq!(events[1].key_symbol(), 'a' as u32);
        assert_eq!(events[1].key_unicode(), 'a' as u32);
        assert_eq!(events[1].key_text_unicode(), 'A' as u32);
        assert!(events[1].modifier_state().contains(ModifierType::CONTROL));
    }
}
