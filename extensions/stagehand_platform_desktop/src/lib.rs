//! Stagehand Desktop Platform
//!
//! Stage windows and input translation for macOS, Windows, and Linux.

pub mod event_loop;
pub mod input;
pub mod window;

pub use event_loop::DesktopEventLoop;
pub use input::DesktopInput;
pub use window::{DesktopWindow, StageConfig};
