//! Stagehand Core
//!
//! The input event pipeline shared by every Stagehand platform backend:
//!
//! - **Event Values**: typed key, button, motion and scroll events with total accessors
//! - **Keysyms**: key symbol to Unicode translation
//! - **Event Queue**: per-backend FIFO of pending events
//! - **Click Synthesis**: double and triple click detection from press timing and distance
//! - **Dispatch**: a single replaceable event handler with teardown
//!
//! # Example
//!
//! ```rust
//! use stagehand_core::prelude::*;
//!
//! let mut context = MainContext::new();
//!
//! // Count double clicks
//! context.register_handler(
//!     |event: &Event, doubles: &mut u32| {
//!         if event.event_type() == EventType::TwoButtonPress {
//!             *doubles += 1;
//!         }
//!     },
//!     0u32,
//!     None,
//! );
//!
//! // A platform backend queues two quick presses
//! for time in [1000, 1100] {
//!     let press = Event::button_press(ButtonEvent {
//!         time,
//!         x: 20,
//!         y: 20,
//!         button: 1,
//!         click_count: 1,
//!         ..Default::default()
//!     });
//!     context.backend_mut().push_button_press(press);
//! }
//!
//! // Press, press, double click
//! assert_eq!(context.dispatch_pending(), 3);
//! ```

pub mod backend;
pub mod click;
pub mod context;
pub mod device;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod keysyms;
mod keysym_table;
pub mod queue;
pub mod settings;

pub use backend::Backend;
pub use click::{ClickSlot, ClickSynthesizer};
pub use context::MainContext;
pub use device::{DeviceId, DeviceManager, InputDevice, InputDeviceType, StageId};
pub use dispatch::{EventDispatcher, Teardown};
pub use error::{Error, Result};
pub use events::{
    ButtonEvent, Event, EventFlags, EventType, KeyEvent, ModifierType, MotionEvent,
    ScrollDirection, ScrollEvent, Timestamp, CURRENT_TIME,
};
pub use keysyms::{keysym_to_unicode, unicode_to_keysym};
pub use queue::EventQueue;
pub use settings::ClickSettings;

/// Common imports for input sources and applications
pub mod prelude {
    pub use crate::backend::Backend;
    pub use crate::context::MainContext;
    pub use crate::device::{DeviceId, InputDeviceType, StageId};
    pub use crate::events::{
        ButtonEvent, Event, EventFlags, EventType, KeyEvent, ModifierType, MotionEvent,
        ScrollDirection, ScrollEvent,
    };
    pub use crate::keysyms::{keys, keysym_to_unicode, unicode_to_keysym};
    pub use crate::settings::ClickSettings;
}
