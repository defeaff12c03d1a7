//! Desktop stage windows using winit

use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window as WinitWindow, WindowAttributes, WindowId};

/// Stage window configuration
#[derive(Clone, Debug)]
pub struct StageConfig {
    /// Window title
    pub title: String,
    /// Initial width in logical pixels
    pub width: u32,
    /// Initial height in logical pixels
    pub height: u32,
    /// Whether the window can be resized
    pub resizable: bool,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            title: "Stagehand".to_string(),
            width: 800,
            height: 600,
            resizable: true,
        }
    }
}

impl StageConfig {
    /// Create a new stage configuration with a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the window size
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }
}

/// Window backing a stage
pub struct DesktopWindow {
    window: WinitWindow,
}

impl DesktopWindow {
    /// Create a new desktop window
    pub fn new(
        event_loop: &ActiveEventLoop,
        config: &StageConfig,
    ) -> Result<Self, winit::error::OsError> {
        let attrs = WindowAttributes::default()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_resizable(config.resizable);

        Ok(Self {
            window: event_loop.create_window(attrs)?,
        })
    }

    pub fn id(&self) -> WindowId {
        self.window.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_config_builder() {
        let config = StageConfig::new("Clicks").size(320, 240).resizable(false);
        assert_eq!(config.title, "Clicks");
        assert_eq!((config.width, config.height), (320, 240));
        assert!(!config.resizable);
        assert_eq!(StageConfig::default().width, 800);
    }
}
