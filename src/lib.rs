//! Scene Viewer - a minimal Vulkan viewer with an egui editing overlay
//!
//! Opens a window, drives a single-frame-in-flight Vulkan presentation loop
//! and overlays panels for editing named object transforms while a free-fly
//! camera moves around the scene.
//!
//! # Features
//! - Explicit swapchain lifecycle with deterministic format, present mode
//!   and image count selection
//! - One command buffer per swapchain image, selected by acquired index
//! - egui overlay painted into the frame's open render pass
//! - Free-fly camera with right-mouse-button mouse look
//! - Runtime toggles for validation layers, HDR color spaces and triple
//!   buffering, each with a safe fallback

pub mod egui_integration;
pub mod error;
pub mod renderer;
pub mod scene;
pub mod window;

pub use egui_integration::EguiIntegration;
pub use error::{ViewerError, ViewerResult};
pub use renderer::Renderer;
pub use scene::{Camera, CameraInput, Scene, SceneObject};
pub use window::Window;

/// Configuration for initializing the viewer
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Window title
    pub title: String,
    /// Initial window width
    pub width: u32,
    /// Initial window height
    pub height: u32,
    /// Enable the Khronos validation layer when available
    pub validation: bool,
    /// Prefer HDR color spaces when the surface advertises them
    pub hdr: bool,
    /// Prefer MAILBOX presentation with at least three swapchain images
    pub triple_buffering: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Scene Viewer".to_string(),
            width: 1600,
            height: 900,
            validation: false,
            hdr: false,
            triple_buffering: false,
        }
    }
}
