//! egui overlay integration using egui-ash-renderer
//!
//! Bridges window events into egui and records the tessellated UI into the
//! presentation engine's open command buffer. The bridge never begins or
//! ends a render pass and never submits work of its own; the engine owns
//! the frame protocol.

use egui_ash_renderer::{Options, Renderer as UiRenderer};
use gpu_allocator::vulkan::{Allocator, AllocatorCreateDesc};
use std::sync::{Arc, Mutex};
use winit::event::WindowEvent;
use winit::window::Window;

use crate::error::{ViewerError, ViewerResult};
use crate::renderer::Renderer;

/// egui context, input state and Vulkan painter for the overlay
pub struct EguiIntegration {
    /// egui context
    ctx: egui::Context,
    /// egui-winit state for input handling
    winit_state: egui_winit::State,
    /// egui-ash renderer (must be dropped before the allocator)
    ui_renderer: Option<UiRenderer>,
    /// Allocator owned by the overlay (required by egui-ash-renderer).
    /// Uses cloned instance/device handles, so it must be torn down while
    /// the engine's device is still alive.
    allocator: Option<Arc<Mutex<Allocator>>>,
    /// Cached paint jobs
    paint_jobs: Vec<egui::ClippedPrimitive>,
    /// Cached textures delta
    textures_delta: egui::TexturesDelta,
}

impl EguiIntegration {
    /// Create the overlay against the engine's render pass and upload the
    /// font atlas through a one-shot submission.
    pub fn new(engine: &Renderer, window: &Window) -> ViewerResult<Self> {
        let ctx = egui::Context::default();

        let winit_state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
        );

        let allocator = Allocator::new(&AllocatorCreateDesc {
            instance: engine.instance().clone(),
            device: engine.device().clone(),
            physical_device: engine.physical_device(),
            debug_settings: Default::default(),
            buffer_device_address: false,
            allocation_sizes: Default::default(),
        })
        .map_err(|e| ViewerError::OverlayInitFailed(e.to_string()))?;
        let allocator = Arc::new(Mutex::new(allocator));

        let mut ui_renderer = UiRenderer::with_gpu_allocator(
            allocator.clone(),
            engine.device().clone(),
            engine.render_pass(),
            Options {
                srgb_framebuffer: true,
                ..Default::default()
            },
        )
        .map_err(|e| ViewerError::OverlayInitFailed(e.to_string()))?;

        // Run one empty pass so the font atlas is known, then push it to the
        // GPU before the first real frame.
        ctx.begin_frame(egui::RawInput::default());
        let output = ctx.end_frame();
        if !output.textures_delta.set.is_empty() {
            ui_renderer
                .set_textures(
                    engine.graphics_queue(),
                    engine.command_pool(),
                    output.textures_delta.set.as_slice(),
                )
                .map_err(|e| ViewerError::OverlayInitFailed(e.to_string()))?;
        }

        Ok(Self {
            ctx,
            winit_state,
            ui_renderer: Some(ui_renderer),
            allocator: Some(allocator),
            paint_jobs: Vec::new(),
            textures_delta: egui::TexturesDelta::default(),
        })
    }

    /// Destroy GPU resources. Must be called while the engine is still
    /// alive so the device outlasts the renderer and allocator.
    pub fn destroy(&mut self, engine: &Renderer) {
        engine.wait_idle();

        // The renderer uses the allocator, so it goes first
        self.ui_renderer = None;
        self.allocator = None;
    }

    /// Feed a window event to egui; returns true when egui consumed it
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.winit_state.on_window_event(window, event).consumed
    }

    /// Begin a new egui frame
    pub fn begin_frame(&mut self, window: &Window) {
        let raw_input = self.winit_state.take_egui_input(window);
        self.ctx.begin_frame(raw_input);
    }

    /// End the egui frame and tessellate it for painting
    pub fn end_frame(&mut self, window: &Window) {
        let full_output = self.ctx.end_frame();

        self.winit_state
            .handle_platform_output(window, full_output.platform_output);

        self.paint_jobs = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        self.textures_delta = full_output.textures_delta;
    }

    /// Record the tessellated UI into the engine's open command buffer.
    ///
    /// Call between the engine's `begin_frame` and `end_frame`.
    pub fn paint(&mut self, engine: &Renderer) -> ViewerResult<()> {
        if let Some(ref mut renderer) = self.ui_renderer {
            renderer
                .set_textures(
                    engine.graphics_queue(),
                    engine.command_pool(),
                    self.textures_delta
                        .set
                        .drain(..)
                        .collect::<Vec<_>>()
                        .as_slice(),
                )
                .map_err(|e| ViewerError::OverlayRenderFailed(e.to_string()))?;

            renderer
                .cmd_draw(
                    engine.current_command_buffer(),
                    engine.swapchain_extent(),
                    self.ctx.pixels_per_point(),
                    &self.paint_jobs,
                )
                .map_err(|e| ViewerError::OverlayRenderFailed(e.to_string()))?;

            renderer
                .free_textures(
                    self.textures_delta
                        .free
                        .drain(..)
                        .collect::<Vec<_>>()
                        .as_slice(),
                )
                .map_err(|e| ViewerError::OverlayRenderFailed(e.to_string()))?;
        }
        Ok(())
    }

    /// Get the egui context
    pub fn context(&self) -> &egui::Context {
        &self.ctx
    }

    /// Check if egui wants keyboard input
    pub fn wants_keyboard_input(&self) -> bool {
        self.ctx.wants_keyboard_input()
    }

    /// Check if egui wants pointer input
    pub fn wants_pointer_input(&self) -> bool {
        self.ctx.wants_pointer_input()
    }
}

impl Drop for EguiIntegration {
    fn drop(&mut self) {
        if self.ui_renderer.is_some() || self.allocator.is_some() {
            log::warn!(
                "EguiIntegration dropped without destroy(); GPU resources may outlive the device"
            );
        }
    }
}
