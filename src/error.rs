//! Viewer error types
//!
//! Every fallible operation in the crate funnels into [`ViewerError`] so the
//! binary can report a single fatal error and exit non-zero.

use thiserror::Error;

/// Viewer error type
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Failed to create window: {0}")]
    WindowCreationFailed(String),
    #[error("Failed to initialize Vulkan: {0}")]
    InitializationFailed(String),
    #[error("Failed to create surface: {0}")]
    SurfaceCreationFailed(String),
    #[error("No graphics device with presentation support found")]
    NoSuitableDevice,
    #[error("Failed to create device: {0}")]
    DeviceCreationFailed(String),
    #[error("Failed to create swapchain: {0}")]
    SwapchainCreationFailed(String),
    #[error("Failed to acquire next image: {0}")]
    AcquireImageFailed(String),
    #[error("Failed to submit frame: {0}")]
    SubmitFailed(String),
    #[error("Failed to present: {0}")]
    PresentFailed(String),
    #[error("Surface lost")]
    SurfaceLost,
    #[error("begin_frame called while a frame is already being recorded")]
    FrameAlreadyBegun,
    #[error("Failed to initialize UI overlay: {0}")]
    OverlayInitFailed(String),
    #[error("Failed to record UI overlay: {0}")]
    OverlayRenderFailed(String),
    #[error("Event loop error: {0}")]
    EventLoopFailed(String),
}

pub type ViewerResult<T> = Result<T, ViewerError>;
