//! Vulkan presentation engine
//!
//! Owns the full GPU bring-up, from instance creation down to the frame
//! synchronization primitives, and drives the per-frame
//! acquire/record/submit/present protocol with a single frame in flight.

use std::ffi::{c_char, CStr};

use ash::vk;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use crate::error::{ViewerError, ViewerResult};
use crate::ViewerConfig;

mod swapchain;

const VALIDATION_LAYER_NAME: &CStr = c"VK_LAYER_KHRONOS_validation";

/// Background color every frame clears to.
const CLEAR_COLOR: [f32; 4] = [0.05, 0.07, 0.10, 1.0];

/// Begin/end bracket of the frame currently being recorded.
///
/// One flag is enough with a single frame in flight; it exists to catch
/// protocol misuse before it corrupts command buffer state.
#[derive(Debug, Default)]
struct FrameState {
    begun: bool,
}

impl FrameState {
    /// Mark the frame open. Opening twice is a contract violation.
    fn begin(&mut self) -> ViewerResult<()> {
        if self.begun {
            return Err(ViewerError::FrameAlreadyBegun);
        }
        self.begun = true;
        Ok(())
    }

    /// Mark the frame closed, reporting whether one was open.
    fn end(&mut self) -> bool {
        std::mem::take(&mut self.begun)
    }
}

/// Vulkan presentation engine for a single window surface
pub struct Renderer {
    _entry: ash::Entry,
    instance: ash::Instance,
    surface_fn: ash::khr::surface::Instance,
    swapchain_fn: ash::khr::swapchain::Device,
    surface: vk::SurfaceKHR,
    physical_device: vk::PhysicalDevice,
    device: ash::Device,
    graphics_queue: vk::Queue,
    graphics_queue_family: u32,

    // Swapchain
    swapchain: vk::SwapchainKHR,
    swapchain_images: Vec<vk::Image>,
    swapchain_image_views: Vec<vk::ImageView>,
    swapchain_format: vk::Format,
    swapchain_extent: vk::Extent2D,
    swapchain_present_mode: vk::PresentModeKHR,
    current_image_index: u32,

    // Render target
    render_pass: vk::RenderPass,
    framebuffers: Vec<vk::Framebuffer>,

    // Commands, one primary buffer per swapchain image
    command_pool: vk::CommandPool,
    command_buffers: Vec<vk::CommandBuffer>,

    // Synchronization
    image_available_semaphore: vk::Semaphore,
    render_finished_semaphore: vk::Semaphore,
    in_flight_fence: vk::Fence,

    // Descriptor pool reserved for the UI overlay
    overlay_descriptor_pool: vk::DescriptorPool,

    frame: FrameState,
}

impl Renderer {
    /// Bring up the full presentation stack for the given window.
    ///
    /// Construction is staged: once the logical device exists, the value is
    /// built with null resource handles and filled in step by step, so a
    /// failure partway through drops only what was actually created.
    pub fn new(window: &winit::window::Window, config: &ViewerConfig) -> ViewerResult<Self> {
        unsafe {
            let entry = ash::Entry::load()
                .map_err(|e| ViewerError::InitializationFailed(e.to_string()))?;

            let display_handle = window
                .display_handle()
                .map_err(|e| ViewerError::InitializationFailed(e.to_string()))?;
            let window_handle = window
                .window_handle()
                .map_err(|e| ViewerError::InitializationFailed(e.to_string()))?;

            // Create instance
            let app_name = c"Scene Viewer";
            let engine_name = c"No Engine";

            let app_info = vk::ApplicationInfo {
                p_application_name: app_name.as_ptr(),
                application_version: vk::make_api_version(0, 1, 0, 0),
                p_engine_name: engine_name.as_ptr(),
                engine_version: vk::make_api_version(0, 1, 0, 0),
                api_version: vk::API_VERSION_1_3,
                ..Default::default()
            };

            let extensions = ash_window::enumerate_required_extensions(display_handle.as_raw())
                .map_err(|e| ViewerError::InitializationFailed(e.to_string()))?
                .to_vec();

            let mut layers: Vec<*const c_char> = Vec::new();
            if config.validation {
                if Self::check_validation_layer_support(&entry) {
                    log::info!("Validation layers enabled");
                    layers.push(VALIDATION_LAYER_NAME.as_ptr());
                } else {
                    log::warn!("Validation layers requested but not available");
                }
            }

            let instance_info = vk::InstanceCreateInfo {
                p_application_info: &app_info,
                enabled_layer_count: layers.len() as u32,
                pp_enabled_layer_names: layers.as_ptr(),
                enabled_extension_count: extensions.len() as u32,
                pp_enabled_extension_names: extensions.as_ptr(),
                ..Default::default()
            };

            let instance = entry
                .create_instance(&instance_info, None)
                .map_err(|e| ViewerError::InitializationFailed(e.to_string()))?;

            // Create surface
            let surface_fn = ash::khr::surface::Instance::new(&entry, &instance);
            let surface = ash_window::create_surface(
                &entry,
                &instance,
                display_handle.as_raw(),
                window_handle.as_raw(),
                None,
            )
            .map_err(|e| ViewerError::SurfaceCreationFailed(e.to_string()))?;

            // Select the first adapter that can draw and present to the surface
            let physical_devices = instance
                .enumerate_physical_devices()
                .map_err(|e| ViewerError::InitializationFailed(e.to_string()))?;

            let physical_device = physical_devices
                .into_iter()
                .find(|&pd| Self::find_queue_family(&instance, pd, &surface_fn, surface).is_some())
                .ok_or(ViewerError::NoSuitableDevice)?;

            let graphics_queue_family =
                Self::find_queue_family(&instance, physical_device, &surface_fn, surface)
                    .ok_or(ViewerError::NoSuitableDevice)?;

            let properties = instance.get_physical_device_properties(physical_device);
            let adapter_name = CStr::from_ptr(properties.device_name.as_ptr());
            log::info!("Using graphics adapter: {}", adapter_name.to_string_lossy());

            // Create logical device
            let queue_priorities = [1.0f32];
            let queue_info = vk::DeviceQueueCreateInfo {
                queue_family_index: graphics_queue_family,
                queue_count: 1,
                p_queue_priorities: queue_priorities.as_ptr(),
                ..Default::default()
            };

            let mut device_extensions = vec![ash::khr::swapchain::NAME.as_ptr()];
            if config.hdr {
                if Self::device_supports_extension(
                    &instance,
                    physical_device,
                    ash::ext::hdr_metadata::NAME,
                ) {
                    device_extensions.push(ash::ext::hdr_metadata::NAME.as_ptr());
                } else {
                    log::warn!("HDR requested but VK_EXT_hdr_metadata is not available");
                }
            }

            let device_features = vk::PhysicalDeviceFeatures::default();

            let device_info = vk::DeviceCreateInfo {
                queue_create_info_count: 1,
                p_queue_create_infos: &queue_info,
                enabled_extension_count: device_extensions.len() as u32,
                pp_enabled_extension_names: device_extensions.as_ptr(),
                p_enabled_features: &device_features,
                ..Default::default()
            };

            let device = instance
                .create_device(physical_device, &device_info, None)
                .map_err(|e| ViewerError::DeviceCreationFailed(e.to_string()))?;

            let graphics_queue = device.get_device_queue(graphics_queue_family, 0);
            let swapchain_fn = ash::khr::swapchain::Device::new(&instance, &device);

            // From here on every resource hangs off the renderer itself, so a
            // failed stage leaves a value Drop can still tear down.
            let mut renderer = Self {
                _entry: entry,
                instance,
                surface_fn,
                swapchain_fn,
                surface,
                physical_device,
                device,
                graphics_queue,
                graphics_queue_family,
                swapchain: vk::SwapchainKHR::null(),
                swapchain_images: Vec::new(),
                swapchain_image_views: Vec::new(),
                swapchain_format: vk::Format::UNDEFINED,
                swapchain_extent: vk::Extent2D {
                    width: 0,
                    height: 0,
                },
                swapchain_present_mode: vk::PresentModeKHR::FIFO,
                current_image_index: 0,
                render_pass: vk::RenderPass::null(),
                framebuffers: Vec::new(),
                command_pool: vk::CommandPool::null(),
                command_buffers: Vec::new(),
                image_available_semaphore: vk::Semaphore::null(),
                render_finished_semaphore: vk::Semaphore::null(),
                in_flight_fence: vk::Fence::null(),
                overlay_descriptor_pool: vk::DescriptorPool::null(),
                frame: FrameState::default(),
            };

            renderer.create_swapchain(config)?;
            renderer.create_render_pass()?;
            renderer.create_framebuffers()?;
            renderer.create_commands()?;
            renderer.create_sync_objects()?;
            renderer.create_overlay_descriptor_pool()?;

            // Views, framebuffers and command buffers all track the image
            // list one to one.
            debug_assert_eq!(
                renderer.swapchain_image_views.len(),
                renderer.swapchain_images.len()
            );
            debug_assert_eq!(renderer.framebuffers.len(), renderer.swapchain_images.len());
            debug_assert_eq!(
                renderer.command_buffers.len(),
                renderer.swapchain_images.len()
            );

            Ok(renderer)
        }
    }

    fn check_validation_layer_support(entry: &ash::Entry) -> bool {
        let layers =
            unsafe { entry.enumerate_instance_layer_properties() }.unwrap_or_default();
        layers.iter().any(|layer| {
            let name = unsafe { CStr::from_ptr(layer.layer_name.as_ptr()) };
            name == VALIDATION_LAYER_NAME
        })
    }

    fn device_supports_extension(
        instance: &ash::Instance,
        physical_device: vk::PhysicalDevice,
        name: &CStr,
    ) -> bool {
        let extensions = unsafe {
            instance
                .enumerate_device_extension_properties(physical_device)
                .unwrap_or_default()
        };
        extensions.iter().any(|ext| {
            let ext_name = unsafe { CStr::from_ptr(ext.extension_name.as_ptr()) };
            ext_name == name
        })
    }

    fn find_queue_family(
        instance: &ash::Instance,
        physical_device: vk::PhysicalDevice,
        surface_fn: &ash::khr::surface::Instance,
        surface: vk::SurfaceKHR,
    ) -> Option<u32> {
        let queue_families =
            unsafe { instance.get_physical_device_queue_family_properties(physical_device) };

        for (index, family) in queue_families.iter().enumerate() {
            let supports_graphics = family.queue_flags.contains(vk::QueueFlags::GRAPHICS);
            let supports_surface = unsafe {
                surface_fn
                    .get_physical_device_surface_support(physical_device, index as u32, surface)
                    .unwrap_or(false)
            };

            if supports_graphics && supports_surface {
                return Some(index as u32);
            }
        }
        None
    }

    fn create_swapchain(&mut self, config: &ViewerConfig) -> ViewerResult<()> {
        unsafe {
            let capabilities = self
                .surface_fn
                .get_physical_device_surface_capabilities(self.physical_device, self.surface)
                .map_err(|e| ViewerError::SwapchainCreationFailed(e.to_string()))?;

            let formats = self
                .surface_fn
                .get_physical_device_surface_formats(self.physical_device, self.surface)
                .map_err(|e| ViewerError::SwapchainCreationFailed(e.to_string()))?;

            let present_modes = self
                .surface_fn
                .get_physical_device_surface_present_modes(self.physical_device, self.surface)
                .map_err(|e| ViewerError::SwapchainCreationFailed(e.to_string()))?;

            let format = swapchain::choose_surface_format(&formats, config.hdr);
            let present_mode =
                swapchain::choose_present_mode(&present_modes, config.triple_buffering);
            let extent = swapchain::choose_extent(&capabilities);
            let image_count =
                swapchain::choose_image_count(&capabilities, config.triple_buffering);

            let swapchain_info = vk::SwapchainCreateInfoKHR {
                surface: self.surface,
                min_image_count: image_count,
                image_format: format.format,
                image_color_space: format.color_space,
                image_extent: extent,
                image_array_layers: 1,
                image_usage: vk::ImageUsageFlags::COLOR_ATTACHMENT,
                image_sharing_mode: vk::SharingMode::EXCLUSIVE,
                pre_transform: capabilities.current_transform,
                composite_alpha: vk::CompositeAlphaFlagsKHR::OPAQUE,
                present_mode,
                clipped: vk::TRUE,
                ..Default::default()
            };

            self.swapchain = self
                .swapchain_fn
                .create_swapchain(&swapchain_info, None)
                .map_err(|e| ViewerError::SwapchainCreationFailed(e.to_string()))?;

            self.swapchain_images = self
                .swapchain_fn
                .get_swapchain_images(self.swapchain)
                .map_err(|e| ViewerError::SwapchainCreationFailed(e.to_string()))?;

            self.swapchain_format = format.format;
            self.swapchain_extent = extent;
            self.swapchain_present_mode = present_mode;

            log::info!(
                "Swapchain: {}x{}, {} images, {:?} / {:?}",
                extent.width,
                extent.height,
                self.swapchain_images.len(),
                format.format,
                present_mode
            );

            self.swapchain_image_views = self
                .swapchain_images
                .iter()
                .map(|&image| {
                    let view_info = vk::ImageViewCreateInfo {
                        image,
                        view_type: vk::ImageViewType::TYPE_2D,
                        format: format.format,
                        components: vk::ComponentMapping::default(),
                        subresource_range: vk::ImageSubresourceRange {
                            aspect_mask: vk::ImageAspectFlags::COLOR,
                            base_mip_level: 0,
                            level_count: 1,
                            base_array_layer: 0,
                            layer_count: 1,
                        },
                        ..Default::default()
                    };
                    self.device.create_image_view(&view_info, None)
                })
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| ViewerError::SwapchainCreationFailed(e.to_string()))?;

            Ok(())
        }
    }

    fn create_render_pass(&mut self) -> ViewerResult<()> {
        let attachment = vk::AttachmentDescription {
            format: self.swapchain_format,
            samples: vk::SampleCountFlags::TYPE_1,
            load_op: vk::AttachmentLoadOp::CLEAR,
            store_op: vk::AttachmentStoreOp::STORE,
            stencil_load_op: vk::AttachmentLoadOp::DONT_CARE,
            stencil_store_op: vk::AttachmentStoreOp::DONT_CARE,
            initial_layout: vk::ImageLayout::UNDEFINED,
            final_layout: vk::ImageLayout::PRESENT_SRC_KHR,
            ..Default::default()
        };

        let attachment_ref = vk::AttachmentReference {
            attachment: 0,
            layout: vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL,
        };

        let subpass = vk::SubpassDescription {
            pipeline_bind_point: vk::PipelineBindPoint::GRAPHICS,
            color_attachment_count: 1,
            p_color_attachments: &attachment_ref,
            ..Default::default()
        };

        let dependency = vk::SubpassDependency {
            src_subpass: vk::SUBPASS_EXTERNAL,
            dst_subpass: 0,
            src_stage_mask: vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT,
            dst_stage_mask: vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT,
            src_access_mask: vk::AccessFlags::empty(),
            dst_access_mask: vk::AccessFlags::COLOR_ATTACHMENT_WRITE,
            ..Default::default()
        };

        let render_pass_info = vk::RenderPassCreateInfo {
            attachment_count: 1,
            p_attachments: &attachment,
            subpass_count: 1,
            p_subpasses: &subpass,
            dependency_count: 1,
            p_dependencies: &dependency,
            ..Default::default()
        };

        self.render_pass = unsafe { self.device.create_render_pass(&render_pass_info, None) }
            .map_err(|e| ViewerError::InitializationFailed(e.to_string()))?;
        Ok(())
    }

    fn create_framebuffers(&mut self) -> ViewerResult<()> {
        self.framebuffers = self
            .swapchain_image_views
            .iter()
            .map(|&view| {
                let framebuffer_info = vk::FramebufferCreateInfo {
                    render_pass: self.render_pass,
                    attachment_count: 1,
                    p_attachments: &view,
                    width: self.swapchain_extent.width,
                    height: self.swapchain_extent.height,
                    layers: 1,
                    ..Default::default()
                };
                unsafe { self.device.create_framebuffer(&framebuffer_info, None) }
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ViewerError::InitializationFailed(e.to_string()))?;
        Ok(())
    }

    fn create_commands(&mut self) -> ViewerResult<()> {
        let pool_info = vk::CommandPoolCreateInfo {
            queue_family_index: self.graphics_queue_family,
            flags: vk::CommandPoolCreateFlags::RESET_COMMAND_BUFFER,
            ..Default::default()
        };

        self.command_pool = unsafe { self.device.create_command_pool(&pool_info, None) }
            .map_err(|e| ViewerError::InitializationFailed(e.to_string()))?;

        // One primary buffer per swapchain image, selected by acquired index.
        let alloc_info = vk::CommandBufferAllocateInfo {
            command_pool: self.command_pool,
            level: vk::CommandBufferLevel::PRIMARY,
            command_buffer_count: self.swapchain_images.len() as u32,
            ..Default::default()
        };

        self.command_buffers = unsafe { self.device.allocate_command_buffers(&alloc_info) }
            .map_err(|e| ViewerError::InitializationFailed(e.to_string()))?;
        Ok(())
    }

    fn create_sync_objects(&mut self) -> ViewerResult<()> {
        let semaphore_info = vk::SemaphoreCreateInfo::default();
        // Signaled so the very first frame does not wait forever.
        let fence_info = vk::FenceCreateInfo {
            flags: vk::FenceCreateFlags::SIGNALED,
            ..Default::default()
        };

        unsafe {
            self.image_available_semaphore = self
                .device
                .create_semaphore(&semaphore_info, None)
                .map_err(|e| ViewerError::InitializationFailed(e.to_string()))?;
            self.render_finished_semaphore = self
                .device
                .create_semaphore(&semaphore_info, None)
                .map_err(|e| ViewerError::InitializationFailed(e.to_string()))?;
            self.in_flight_fence = self
                .device
                .create_fence(&fence_info, None)
                .map_err(|e| ViewerError::InitializationFailed(e.to_string()))?;
        }
        Ok(())
    }

    fn create_overlay_descriptor_pool(&mut self) -> ViewerResult<()> {
        let pool_sizes = [
            vk::DescriptorType::SAMPLER,
            vk::DescriptorType::COMBINED_IMAGE_SAMPLER,
            vk::DescriptorType::SAMPLED_IMAGE,
            vk::DescriptorType::STORAGE_IMAGE,
            vk::DescriptorType::UNIFORM_TEXEL_BUFFER,
            vk::DescriptorType::STORAGE_TEXEL_BUFFER,
            vk::DescriptorType::UNIFORM_BUFFER,
            vk::DescriptorType::STORAGE_BUFFER,
            vk::DescriptorType::UNIFORM_BUFFER_DYNAMIC,
            vk::DescriptorType::STORAGE_BUFFER_DYNAMIC,
            vk::DescriptorType::INPUT_ATTACHMENT,
        ]
        .map(|ty| vk::DescriptorPoolSize {
            ty,
            descriptor_count: 1000,
        });

        let descriptor_pool_info = vk::DescriptorPoolCreateInfo {
            flags: vk::DescriptorPoolCreateFlags::FREE_DESCRIPTOR_SET,
            max_sets: 1000 * pool_sizes.len() as u32,
            pool_size_count: pool_sizes.len() as u32,
            p_pool_sizes: pool_sizes.as_ptr(),
            ..Default::default()
        };

        self.overlay_descriptor_pool = unsafe {
            self.device
                .create_descriptor_pool(&descriptor_pool_info, None)
        }
        .map_err(|e| ViewerError::InitializationFailed(e.to_string()))?;
        Ok(())
    }

    /// Begin recording the next frame.
    ///
    /// Blocks until the previous frame's fence signals, acquires a swapchain
    /// image and opens its command buffer with the render pass active and
    /// the background cleared. Calling this twice without an intervening
    /// [`end_frame`](Self::end_frame) fails with
    /// [`ViewerError::FrameAlreadyBegun`]; any other failure leaves no
    /// frame open.
    pub fn begin_frame(&mut self) -> ViewerResult<()> {
        self.frame.begin()?;

        if let Err(e) = self.record_frame_start() {
            // Nothing is recording, so the bracket closes again and
            // end_frame stays a no-op.
            self.frame.end();
            return Err(e);
        }
        Ok(())
    }

    fn record_frame_start(&mut self) -> ViewerResult<()> {
        unsafe {
            self.device
                .wait_for_fences(&[self.in_flight_fence], true, u64::MAX)
                .map_err(|e| ViewerError::AcquireImageFailed(e.to_string()))?;
            self.device
                .reset_fences(&[self.in_flight_fence])
                .map_err(|e| ViewerError::AcquireImageFailed(e.to_string()))?;

            let (image_index, _) = self
                .swapchain_fn
                .acquire_next_image(
                    self.swapchain,
                    u64::MAX,
                    self.image_available_semaphore,
                    vk::Fence::null(),
                )
                .map_err(|e| match e {
                    vk::Result::ERROR_OUT_OF_DATE_KHR => ViewerError::SurfaceLost,
                    _ => ViewerError::AcquireImageFailed(e.to_string()),
                })?;

            self.current_image_index = image_index;

            let command_buffer = self.command_buffers[image_index as usize];
            self.device
                .reset_command_buffer(command_buffer, vk::CommandBufferResetFlags::empty())
                .map_err(|e| ViewerError::AcquireImageFailed(e.to_string()))?;

            let begin_info = vk::CommandBufferBeginInfo::default();
            self.device
                .begin_command_buffer(command_buffer, &begin_info)
                .map_err(|e| ViewerError::AcquireImageFailed(e.to_string()))?;

            let clear_value = vk::ClearValue {
                color: vk::ClearColorValue {
                    float32: CLEAR_COLOR,
                },
            };

            let pass_begin_info = vk::RenderPassBeginInfo {
                render_pass: self.render_pass,
                framebuffer: self.framebuffers[image_index as usize],
                render_area: vk::Rect2D {
                    offset: vk::Offset2D { x: 0, y: 0 },
                    extent: self.swapchain_extent,
                },
                clear_value_count: 1,
                p_clear_values: &clear_value,
                ..Default::default()
            };

            self.device.cmd_begin_render_pass(
                command_buffer,
                &pass_begin_info,
                vk::SubpassContents::INLINE,
            );
        }

        Ok(())
    }

    /// Finish and present the current frame.
    ///
    /// Ends the render pass, submits the command buffer and queues the
    /// present. A no-op when no frame is open, so it is always safe at the
    /// tail of a loop iteration.
    pub fn end_frame(&mut self) -> ViewerResult<()> {
        if !self.frame.end() {
            return Ok(());
        }

        unsafe {
            let command_buffer = self.command_buffers[self.current_image_index as usize];
            self.device.cmd_end_render_pass(command_buffer);
            self.device
                .end_command_buffer(command_buffer)
                .map_err(|e| ViewerError::SubmitFailed(e.to_string()))?;

            let wait_semaphores = [self.image_available_semaphore];
            let wait_stages = [vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT];
            let signal_semaphores = [self.render_finished_semaphore];
            let command_buffers = [command_buffer];

            let submit_info = vk::SubmitInfo {
                wait_semaphore_count: 1,
                p_wait_semaphores: wait_semaphores.as_ptr(),
                p_wait_dst_stage_mask: wait_stages.as_ptr(),
                command_buffer_count: 1,
                p_command_buffers: command_buffers.as_ptr(),
                signal_semaphore_count: 1,
                p_signal_semaphores: signal_semaphores.as_ptr(),
                ..Default::default()
            };

            self.device
                .queue_submit(self.graphics_queue, &[submit_info], self.in_flight_fence)
                .map_err(|e| ViewerError::SubmitFailed(e.to_string()))?;

            let swapchains = [self.swapchain];
            let image_indices = [self.current_image_index];

            let present_info = vk::PresentInfoKHR {
                wait_semaphore_count: 1,
                p_wait_semaphores: signal_semaphores.as_ptr(),
                swapchain_count: 1,
                p_swapchains: swapchains.as_ptr(),
                p_image_indices: image_indices.as_ptr(),
                ..Default::default()
            };

            self.swapchain_fn
                .queue_present(self.graphics_queue, &present_info)
                .map_err(|e| match e {
                    vk::Result::ERROR_OUT_OF_DATE_KHR => ViewerError::SurfaceLost,
                    _ => ViewerError::PresentFailed(e.to_string()),
                })?;
        }

        Ok(())
    }

    /// Block until the device has finished all submitted work.
    pub fn wait_idle(&self) {
        unsafe {
            let _ = self.device.device_wait_idle();
        }
    }

    /// Get the Vulkan instance
    pub fn instance(&self) -> &ash::Instance {
        &self.instance
    }

    /// Get the physical device
    pub fn physical_device(&self) -> vk::PhysicalDevice {
        self.physical_device
    }

    /// Get the Vulkan device
    pub fn device(&self) -> &ash::Device {
        &self.device
    }

    /// Get the graphics queue
    pub fn graphics_queue(&self) -> vk::Queue {
        self.graphics_queue
    }

    /// Get the graphics queue family index
    pub fn graphics_queue_family(&self) -> u32 {
        self.graphics_queue_family
    }

    /// Get the render pass the swapchain framebuffers target
    pub fn render_pass(&self) -> vk::RenderPass {
        self.render_pass
    }

    /// Get the descriptor pool reserved for UI overlay allocations
    pub fn overlay_descriptor_pool(&self) -> vk::DescriptorPool {
        self.overlay_descriptor_pool
    }

    /// Get the command pool
    pub fn command_pool(&self) -> vk::CommandPool {
        self.command_pool
    }

    /// Get the swapchain extent
    pub fn swapchain_extent(&self) -> vk::Extent2D {
        self.swapchain_extent
    }

    /// Get the swapchain format
    pub fn swapchain_format(&self) -> vk::Format {
        self.swapchain_format
    }

    /// Get the active present mode
    pub fn swapchain_present_mode(&self) -> vk::PresentModeKHR {
        self.swapchain_present_mode
    }

    /// Number of swapchain images, which also counts the image views,
    /// framebuffers and per-image command buffers
    pub fn image_count(&self) -> usize {
        self.swapchain_images.len()
    }

    /// Command buffer recording the current frame.
    ///
    /// Only valid between [`begin_frame`](Self::begin_frame) and
    /// [`end_frame`](Self::end_frame).
    pub fn current_command_buffer(&self) -> vk::CommandBuffer {
        self.command_buffers[self.current_image_index as usize]
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        // Reverse construction order. Destroying a null handle is a no-op,
        // so a partially constructed renderer tears down the same way.
        unsafe {
            let _ = self.device.device_wait_idle();

            self.device
                .destroy_descriptor_pool(self.overlay_descriptor_pool, None);
            self.device.destroy_fence(self.in_flight_fence, None);
            self.device
                .destroy_semaphore(self.render_finished_semaphore, None);
            self.device
                .destroy_semaphore(self.image_available_semaphore, None);
            self.device.destroy_command_pool(self.command_pool, None);
            for &framebuffer in &self.framebuffers {
                self.device.destroy_framebuffer(framebuffer, None);
            }
            self.device.destroy_render_pass(self.render_pass, None);
            for &view in &self.swapchain_image_views {
                self.device.destroy_image_view(view, None);
            }
            if self.swapchain != vk::SwapchainKHR::null() {
                self.swapchain_fn.destroy_swapchain(self.swapchain, None);
            }
            self.device.destroy_device(None);
            self.surface_fn.destroy_surface(self.surface, None);
            self.instance.destroy_instance(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_cannot_begin_twice() {
        let mut frame = FrameState::default();
        assert!(frame.begin().is_ok());
        assert!(matches!(frame.begin(), Err(ViewerError::FrameAlreadyBegun)));
    }

    #[test]
    fn end_without_begin_reports_noop() {
        let mut frame = FrameState::default();
        assert!(!frame.end());
    }

    #[test]
    fn frame_cycles_stay_consistent() {
        let mut frame = FrameState::default();
        for _ in 0..100 {
            frame.begin().unwrap();
            assert!(frame.end());
            assert!(!frame.end());
        }
    }
}
