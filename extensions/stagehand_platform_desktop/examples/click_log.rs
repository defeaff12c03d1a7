//! Click Log Demo
//!
//! Opens a stage window and logs every event it receives, including
//! synthesized double and triple clicks.
//!
//! Run with: RUST_LOG=info cargo run -p stagehand_platform_desktop --example click_log

use stagehand_core::prelude::*;
use stagehand_core::Result;
use stagehand_platform_desktop::{DesktopEventLoop, StageConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let settings = match std::env::args().nth(1) {
        Some(path) => ClickSettings::load(path)?,
        None => ClickSettings::default(),
    };

    let mut context = MainContext::with_settings(settings);
    context.register_handler_with_teardown(
        |event: &Event, clicks: &mut u32| match event.event_type() {
            EventType::TwoButtonPress | EventType::ThreeButtonPress => {
                *clicks += 1;
                tracing::info!(
                    "{:?} with button {} at {:?} ({} multi-clicks so far)",
                    event.event_type(),
                    event.button(),
                    event.coords(),
                    clicks
                );
            }
            EventType::KeyPress => {
                let symbol = char::from_u32(event.key_unicode()).unwrap_or('?');
                let text = char::from_u32(event.key_text_unicode()).unwrap_or('?');
                tracing::info!("Key {:#x} ({:?}, typed {:?})", event.key_symbol(), symbol, text);
            }
            EventType::Motion => {}
            other => tracing::info!("{:?} at {:?}", other, event.coords()),
        },
        0u32,
        |clicks| tracing::info!("Handler removed after {} multi-clicks", clicks),
    );

    let event_loop = DesktopEventLoop::new(StageConfig::new("Stagehand Click Log").size(640, 480))?;
    event_loop.run(context)
}
