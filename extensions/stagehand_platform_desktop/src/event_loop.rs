//! Desktop event loop implementation using winit
//!
//! The loop owns a [`MainContext`]. Window input is translated into the
//! context's queue as it arrives, and the queue is drained into the
//! registered handler once per iteration, right before the loop sleeps.

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use stagehand_core::{Error, MainContext, Result, StageId};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop as WinitEventLoop};
use winit::window::WindowId;

use crate::input::DesktopInput;
use crate::window::{DesktopWindow, StageConfig};

/// Desktop event loop wrapping winit's event loop
pub struct DesktopEventLoop {
    event_loop: WinitEventLoop<()>,
    stage_config: StageConfig,
}

impl DesktopEventLoop {
    /// Create a new desktop event loop
    pub fn new(config: StageConfig) -> Result<Self> {
        let event_loop = {
            let mut builder = WinitEventLoop::builder();

            // NOTE(macos): non-bundled binaries otherwise start as UI-less helpers
            #[cfg(target_os = "macos")]
            {
                use winit::platform::macos::{ActivationPolicy, EventLoopBuilderExtMacOS};
                builder.with_activation_policy(ActivationPolicy::Regular);
            }

            builder
                .build()
                .map_err(|e| Error::EventLoop(e.to_string()))?
        };

        Ok(Self {
            event_loop,
            stage_config: config,
        })
    }

    /// Run until every stage window is closed
    pub fn run(self, context: MainContext) -> Result<()> {
        let mut app = StageApp::new(self.stage_config, context);
        self.event_loop
            .run_app(&mut app)
            .map_err(|e| Error::EventLoop(e.to_string()))?;

        match app.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Internal winit application handler
struct StageApp {
    stage_config: StageConfig,
    context: MainContext,
    stages: SlotMap<StageId, DesktopWindow>,
    inputs: FxHashMap<WindowId, DesktopInput>,
    error: Option<Error>,
}

impl StageApp {
    fn new(stage_config: StageConfig, context: MainContext) -> Self {
        Self {
            stage_config,
            context,
            stages: SlotMap::with_key(),
            inputs: FxHashMap::default(),
            error: None,
        }
    }

    fn close_stage(&mut self, window_id: WindowId) {
        if let Some(stage) = self.inputs.remove(&window_id).and_then(|input| input.stage()) {
            self.stages.remove(stage);
            tracing::info!("Stage window closed");
        }
    }
}

impl ApplicationHandler for StageApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Create the stage window if we don't have one
        if !self.stages.is_empty() {
            return;
        }

        match DesktopWindow::new(event_loop, &self.stage_config) {
            Ok(window) => {
                let window_id = window.id();
                let stage = self.stages.insert(window);
                self.inputs.insert(window_id, DesktopInput::new(Some(stage)));
                tracing::info!("Created stage window \"{}\"", self.stage_config.title);
            }
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                self.error = Some(Error::StageCreation(e.to_string()));
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::CloseRequested = event {
            self.close_stage(window_id);
            if self.stages.is_empty() {
                event_loop.exit();
            }
            return;
        }

        let Some(input) = self.inputs.get_mut(&window_id) else {
            return;
        };
        let time = input.timestamp();

        match event {
            WindowEvent::ModifiersChanged(mods) => {
                input.set_modifiers(mods.state());
            }

            WindowEvent::CursorMoved { position, .. } => {
                input.cursor_moved(&mut self.context, position.x, position.y, time);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                input.mouse_input(&mut self.context, state, button, time);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                input.mouse_wheel(&mut self.context, &delta, time);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                input.keyboard_input(
                    &mut self.context,
                    &event.logical_key,
                    event.state,
                    event.text.as_deref(),
                    time,
                );
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        let delivered = self.context.dispatch_pending();
        if delivered > 0 {
            tracing::trace!("Dispatched {} events", delivered);
        }
    }
}
