//! Stagehand Android Platform
//!
//! Touch, scroll and key input translation for the Android backend.

pub mod input;

pub use input::{translate_key, translate_motion, AndroidInput, RawKey, RawMotion};
