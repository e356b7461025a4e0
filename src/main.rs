//! Minimal Vulkan scene viewer
//!
//! Run with:
//!   cargo run
//!   cargo run -- --validation --triple-buffering
//!
//! Controls:
//!   WASD        - Move camera
//!   Q/E         - Move down/up
//!   Right Mouse - Look around (hold)
//!   Escape      - Exit

use std::time::Instant;

use glam::{Vec2, Vec3};
use scene_viewer::{
    Camera, CameraInput, EguiIntegration, Renderer, Scene, ViewerConfig, ViewerError,
    ViewerResult, Window,
};
use winit::{
    event::{DeviceEvent, ElementState, Event, MouseButton, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    keyboard::{KeyCode, PhysicalKey},
    window::CursorGrabMode,
};

/// Application state for input handling and scene editing
struct AppState {
    scene: Scene,
    camera: Camera,
    camera_input: CameraInput,
    /// Name for the next object added through the scene panel
    name_buf: String,
    cursor_grabbed: bool,
    last_frame: Instant,
}

impl AppState {
    fn new() -> Self {
        Self {
            scene: Scene::new(),
            camera: Camera::new(),
            camera_input: CameraInput::new(),
            name_buf: String::from("NewObject"),
            cursor_grabbed: false,
            last_frame: Instant::now(),
        }
    }
}

fn main() {
    env_logger::init();

    let config = parse_config();

    println!("Controls:");
    println!("  WASD        - Move camera");
    println!("  Q/E         - Move down/up");
    println!("  Right Mouse - Look around (hold)");
    println!("  Escape      - Exit");
    println!();

    if let Err(e) = run(config) {
        log::error!("Fatal: {e}");
        std::process::exit(1);
    }
}

/// Parse process arguments into a viewer configuration
fn parse_config() -> ViewerConfig {
    let mut config = ViewerConfig::default();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--validation" => config.validation = true,
            "--hdr" => config.hdr = true,
            "--triple-buffering" => config.triple_buffering = true,
            other => log::warn!("Ignoring unknown argument: {other}"),
        }
    }
    config
}

fn run(config: ViewerConfig) -> ViewerResult<()> {
    let event_loop =
        EventLoop::new().map_err(|e| ViewerError::EventLoopFailed(e.to_string()))?;
    let mut window = Window::new(&event_loop, &config)?;
    let mut renderer = Renderer::new(window.window(), &config)?;
    let mut overlay = EguiIntegration::new(&renderer, window.window())?;

    let mut state = AppState::new();
    state.scene.create("Camera");
    state.scene.create("Triangle");

    // Render errors inside the loop are fatal; they land here so the process
    // can exit non-zero after the loop unwinds.
    let mut fatal: Option<ViewerError> = None;

    let run_result = event_loop.run(|event, elwt: &EventLoopWindowTarget<()>| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { event, .. } => {
                // Pass events to egui first
                let egui_consumed = overlay.on_window_event(window.window(), &event);
                window.handle_event(&event);
                if window.should_close() {
                    elwt.exit();
                }

                if let WindowEvent::RedrawRequested = event {
                    if let Err(e) = render_frame(&mut renderer, &mut overlay, &window, &mut state)
                    {
                        fatal = Some(e);
                        elwt.exit();
                    }
                } else if !egui_consumed {
                    handle_window_event(&event, &mut state, window.window(), elwt);
                }
            }
            Event::DeviceEvent { event, .. } => {
                // Skip mouse motion while egui owns the pointer
                if !overlay.wants_pointer_input() {
                    handle_device_event(&event, &mut state);
                }
            }
            Event::LoopExiting => {
                // The overlay holds cloned device handles; tear it down while
                // the engine's device is still alive.
                overlay.destroy(&renderer);
            }
            Event::AboutToWait => {
                let now = Instant::now();
                let dt = (now - state.last_frame).as_secs_f32();
                state.last_frame = now;

                // Update camera (skip while egui owns the keyboard)
                if !overlay.wants_keyboard_input() {
                    state.camera.update(&state.camera_input, dt);
                }

                state.camera_input.reset_deltas();
                window.request_redraw();
            }
            _ => {}
        }
    });

    if let Some(e) = fatal {
        return Err(e);
    }
    run_result.map_err(|e| ViewerError::EventLoopFailed(e.to_string()))?;
    Ok(())
}

/// Record and present one frame with the overlay painted on top
fn render_frame(
    renderer: &mut Renderer,
    overlay: &mut EguiIntegration,
    window: &Window,
    state: &mut AppState,
) -> ViewerResult<()> {
    renderer.begin_frame()?;

    overlay.begin_frame(window.window());
    build_scene_panel(overlay.context(), &mut state.scene, &mut state.name_buf);
    build_camera_panel(overlay.context(), &mut state.camera);
    draw_axis_gizmo(overlay.context(), &state.camera);
    overlay.end_frame(window.window());

    overlay.paint(renderer)?;
    renderer.end_frame()
}

fn handle_window_event(
    event: &WindowEvent,
    state: &mut AppState,
    window: &winit::window::Window,
    elwt: &EventLoopWindowTarget<()>,
) {
    match event {
        WindowEvent::KeyboardInput { event, .. } => {
            let pressed = event.state == ElementState::Pressed;

            if let PhysicalKey::Code(key) = event.physical_key {
                match key {
                    KeyCode::Escape => elwt.exit(),
                    KeyCode::KeyW => state.camera_input.forward = pressed,
                    KeyCode::KeyS => state.camera_input.backward = pressed,
                    KeyCode::KeyA => state.camera_input.left = pressed,
                    KeyCode::KeyD => state.camera_input.right = pressed,
                    KeyCode::KeyQ => state.camera_input.down = pressed,
                    KeyCode::KeyE => state.camera_input.up = pressed,
                    _ => {}
                }
            }
        }
        WindowEvent::MouseInput {
            state: btn_state,
            button,
            ..
        } => {
            if *button == MouseButton::Right {
                let pressed = *btn_state == ElementState::Pressed;
                state.camera_input.mouse_look_active = pressed;

                // Grab/release cursor
                if pressed && !state.cursor_grabbed {
                    let _ = window.set_cursor_grab(CursorGrabMode::Confined);
                    window.set_cursor_visible(false);
                    state.cursor_grabbed = true;
                } else if !pressed && state.cursor_grabbed {
                    let _ = window.set_cursor_grab(CursorGrabMode::None);
                    window.set_cursor_visible(true);
                    state.cursor_grabbed = false;
                }
            }
        }
        WindowEvent::Focused(false) => {
            // Release all keys when the window loses focus
            state.camera_input = CameraInput::new();
            if state.cursor_grabbed {
                let _ = window.set_cursor_grab(CursorGrabMode::None);
                window.set_cursor_visible(true);
                state.cursor_grabbed = false;
            }
        }
        _ => {}
    }
}

fn handle_device_event(event: &DeviceEvent, state: &mut AppState) {
    if let DeviceEvent::MouseMotion { delta } = event {
        if state.camera_input.mouse_look_active {
            state.camera_input.mouse_delta.x += delta.0 as f32;
            state.camera_input.mouse_delta.y += delta.1 as f32;
        }
    }
}

/// Build the scene panel: add objects and edit their transforms
fn build_scene_panel(ctx: &egui::Context, scene: &mut Scene, name_buf: &mut String) {
    egui::Window::new("Scene")
        .default_pos([10.0, 10.0])
        .default_size([260.0, 320.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Name:");
                ui.text_edit_singleline(name_buf);
            });
            if ui.button("Add Object").clicked() {
                scene.create(name_buf.as_str());
            }

            ui.separator();

            for (index, object) in scene.objects_mut().iter_mut().enumerate() {
                ui.push_id(index, |ui| {
                    ui.collapsing(object.name.clone(), |ui| {
                        drag_vec3(ui, "Position", &mut object.position, 0.1);
                        drag_vec3(ui, "Rotation", &mut object.rotation, 0.5);
                        drag_vec3(ui, "Scale", &mut object.scale, 0.1);
                    });
                });
            }
        });
}

/// Build the camera panel: pose, lens and control tuning
fn build_camera_panel(ctx: &egui::Context, camera: &mut Camera) {
    egui::Window::new("Camera")
        .default_pos([10.0, 360.0])
        .default_size([260.0, 200.0])
        .show(ctx, |ui| {
            drag_vec3(ui, "Position", &mut camera.position, 0.1);
            ui.add(egui::Slider::new(&mut camera.yaw, -180.0..=180.0).text("Yaw"));
            ui.add(egui::Slider::new(&mut camera.pitch, -89.0..=89.0).text("Pitch"));
            ui.add(egui::Slider::new(&mut camera.fov, 30.0..=110.0).text("FOV"));
            ui.add(egui::Slider::new(&mut camera.move_speed, 0.5..=50.0).text("Speed"));
            ui.add(
                egui::Slider::new(&mut camera.look_sensitivity, 0.01..=1.0)
                    .text("Look Sensitivity"),
            );
        });
}

/// Three drag values in a row for editing a vector in place
fn drag_vec3(ui: &mut egui::Ui, label: &str, value: &mut Vec3, speed: f32) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.add(egui::DragValue::new(&mut value.x).speed(speed).prefix("x: "));
        ui.add(egui::DragValue::new(&mut value.y).speed(speed).prefix("y: "));
        ui.add(egui::DragValue::new(&mut value.z).speed(speed).prefix("z: "));
    });
}

/// Paint the world-axis gizmo in the top-right corner
fn draw_axis_gizmo(ctx: &egui::Context, camera: &Camera) {
    const BOX_SIZE: f32 = 96.0;
    const PADDING: f32 = 12.0;
    const AXIS_LENGTH: f32 = 32.0;

    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("axis_gizmo"),
    ));

    let screen = ctx.screen_rect();
    let rect = egui::Rect::from_min_size(
        egui::pos2(screen.max.x - BOX_SIZE - PADDING, screen.min.y + PADDING),
        egui::vec2(BOX_SIZE, BOX_SIZE),
    );
    let center = rect.center();

    painter.rect_filled(
        rect,
        egui::Rounding::same(8.0),
        egui::Color32::from_black_alpha(90),
    );
    painter.rect_stroke(
        rect,
        egui::Rounding::same(8.0),
        egui::Stroke::new(1.0, egui::Color32::from_white_alpha(60)),
    );

    // Rows of the transposed basis give each world axis in camera space.
    let basis = camera.rotation().transpose();
    let axes = [
        (Vec3::X, egui::Color32::from_rgb(255, 80, 80), "X"),
        (Vec3::Y, egui::Color32::from_rgb(80, 255, 80), "Y"),
        (Vec3::Z, egui::Color32::from_rgb(80, 160, 255), "Z"),
    ];

    for (axis, color, label) in axes {
        // Screen Y grows downward; axes pointing back toward the viewer
        // draw shorter.
        let view = basis * axis;
        let dir = Vec2::new(view.x, -view.y).normalize_or_zero();
        let length = if view.z > 0.0 {
            AXIS_LENGTH
        } else {
            AXIS_LENGTH * 0.6
        };
        let end = center + egui::vec2(dir.x, dir.y) * length;

        painter.line_segment([center, end], egui::Stroke::new(2.0, color));
        painter.text(
            end + egui::vec2(4.0, -4.0),
            egui::Align2::LEFT_TOP,
            label,
            egui::FontId::default(),
            color,
        );
    }
}
