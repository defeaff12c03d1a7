//! Error types for the event pipeline edges
//!
//! Queue, accessor, keysym and click operations never fail; errors only
//! come from loading settings, decoding raw discriminants, and creating
//! platform event loops or stage windows.

use thiserror::Error;

/// Stagehand errors
#[derive(Error, Debug)]
pub enum Error {
    /// Settings file could not be read
    #[error("Failed to read settings: {0}")]
    SettingsIo(#[from] std::io::Error),

    /// Settings file is not valid TOML or has mistyped keys
    #[error("Invalid settings: {0}")]
    SettingsParse(#[from] toml::de::Error),

    /// Raw event type discriminant outside the known set
    #[error("Unknown event type: {0}")]
    UnknownEventType(u32),

    /// Raw scroll direction outside the known set
    #[error("Unknown scroll direction: {0}")]
    UnknownScrollDirection(u32),

    /// Failed to create event loop
    #[error("Failed to create event loop: {0}")]
    EventLoop(String),

    /// Failed to create the window backing a stage
    #[error("Failed to create stage: {0}")]
    StageCreation(String),
}

/// Result type for Stagehand operations
pub type Result<T> = std::result::Result<T, Error>;
