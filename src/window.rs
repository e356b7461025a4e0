//! Window management using winit

use winit::{
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::EventLoop,
    window::{Window as WinitWindow, WindowBuilder},
};

use crate::{ViewerConfig, ViewerError, ViewerResult};

/// Wrapper around a winit window with additional state
pub struct Window {
    window: WinitWindow,
    width: u32,
    height: u32,
    close_requested: bool,
}

impl Window {
    /// Create a new window sized and titled from the configuration
    pub fn new(event_loop: &EventLoop<()>, config: &ViewerConfig) -> ViewerResult<Self> {
        let window = WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .build(event_loop)
            .map_err(|e| ViewerError::WindowCreationFailed(e.to_string()))?;

        Ok(Self {
            window,
            width: config.width,
            height: config.height,
            close_requested: false,
        })
    }

    /// Get the raw window for surface creation and input handling
    pub fn window(&self) -> &WinitWindow {
        &self.window
    }

    /// Get current window dimensions
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Check if close was requested
    pub fn should_close(&self) -> bool {
        self.close_requested
    }

    /// Handle window events
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::Resized(size) => {
                self.width = size.width;
                self.height = size.height;
            }
            WindowEvent::CloseRequested => {
                self.close_requested = true;
            }
            _ => {}
        }
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}
