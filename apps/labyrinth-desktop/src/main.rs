use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use egui::Context as EguiContext;
use labyrinth_input::{Action, InputState, Key};
use labyrinth_kernel::{
    CameraState, EmitOptions, Labyrinth, LabyrinthConfig, MotionConfig, SeedPolicy,
};
use labyrinth_render::{RenderScene, RenderView};
use labyrinth_render_wgpu::{FirstPersonCamera, WgpuRenderer};
use labyrinth_tools::{MazeInspector, MazeSummary};
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;

#[derive(Parser)]
#[command(name = "labyrinth-desktop", about = "Walk through a generated labyrinth")]
struct Cli {
    /// Seed from the clock instead of the fixed seed
    #[arg(action = ArgAction::Set, default_value_t = false)]
    random_seed: bool,

    /// Grid rows, border included
    #[arg(default_value_t = 10)]
    rows: usize,

    /// Grid columns, border included
    #[arg(default_value_t = 10)]
    columns: usize,

    /// Explicit seed; overrides random_seed
    #[arg(long)]
    seed: Option<u64>,

    /// Close the labyrinth from above
    #[arg(long)]
    roof: bool,

    /// Turning speed in degrees per second
    #[arg(long)]
    angular_speed: Option<f32>,

    /// Walking speed in world units per second
    #[arg(long)]
    movement_speed: Option<f32>,

    /// Use the slower walking speed of the first tuning
    #[arg(long)]
    legacy_speeds: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn labyrinth_config(&self) -> LabyrinthConfig {
        LabyrinthConfig {
            rows: self.rows,
            columns: self.columns,
            seed: self
                .seed
                .map_or(SeedPolicy::from_random_flag(self.random_seed), SeedPolicy::Explicit),
        }
    }

    fn motion_config(&self) -> MotionConfig {
        let mut motion = if self.legacy_speeds {
            MotionConfig::legacy()
        } else {
            MotionConfig::default()
        };
        if let Some(speed) = self.angular_speed {
            motion.angular_speed = speed;
        }
        if let Some(speed) = self.movement_speed {
            motion.movement_speed = speed;
        }
        motion
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Escape => Some(Key::Quit),
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::ArrowDown => Some(Key::Down),
        _ => None,
    }
}

/// Application state.
struct AppState {
    scene: RenderScene,
    summary: MazeSummary,
    motion: MotionConfig,
    player: CameraState,
    camera: FirstPersonCamera,
    input: InputState,
    show_hud: bool,
    last_frame: Instant,
}

impl AppState {
    fn new(scene: RenderScene, summary: MazeSummary, motion: MotionConfig) -> Self {
        let player = CameraState::at(scene.spawn);
        Self {
            scene,
            summary,
            motion,
            player,
            camera: FirstPersonCamera::default(),
            input: InputState::new(),
            show_hud: false,
            last_frame: Instant::now(),
        }
    }

    fn update(&mut self, dt: f32) {
        self.player.step(self.input.snapshot(), dt, &self.motion);
    }

    fn handle_key(&mut self, code: KeyCode, pressed: bool) -> Option<Action> {
        if code == KeyCode::F1 && pressed {
            self.show_hud = !self.show_hud;
            return None;
        }
        map_key(code).and_then(|key| self.input.apply(key, pressed))
    }

    fn draw_hud(&self, ctx: &EguiContext) {
        if !self.show_hud {
            return;
        }

        egui::Window::new("Labyrinth")
            .default_width(260.0)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!(
                    "Grid: {} x {}  Seed: {}",
                    self.summary.rows, self.summary.columns, self.summary.seed
                ));
                ui.label(format!(
                    "Open cells: {}  Walls: {}",
                    self.summary.open_cells, self.summary.wall_quads
                ));
                if let Some(start) = self.summary.start {
                    ui.label(format!("Start cell: {start}"));
                }
                ui.separator();
                let p = self.player.position;
                ui.label(format!("Position: ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z));
                ui.label(format!("Heading: {:.1} deg", self.player.heading));
                ui.separator();
                ui.small("Arrows: Move/Turn | F1: HUD | Esc: Quit");
            });
    }
}

/// GPU handles created once the window exists.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

struct GpuApp {
    state: AppState,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
    error: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(state: AppState) -> Self {
        Self {
            state,
            gpu: None,
            egui_ctx: EguiContext::default(),
            error: None,
        }
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<Gpu> {
        let mut attrs = Window::default_attributes()
            .with_title("Labyrinth")
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .with_resizable(true);
        if let Some(monitor) = event_loop.primary_monitor() {
            let screen = monitor.size();
            attrs = attrs.with_position(PhysicalPosition::new(
                screen.width.saturating_sub(WINDOW_WIDTH) / 2,
                screen.height.saturating_sub(WINDOW_HEIGHT) / 2,
            ));
        }
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("find adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("labyrinth_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        self.state.camera.set_viewport(config.width, config.height);

        let renderer = WgpuRenderer::new(
            &device,
            surface_format,
            config.width,
            config.height,
            &self.state.scene,
        );

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Gpu {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let dt = (now - self.state.last_frame).as_secs_f32();
        self.state.last_frame = now;
        self.state.update(dt);

        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        gpu.renderer.render(
            &gpu.device,
            &gpu.queue,
            &view,
            &self.state.camera,
            &RenderView::from(&self.state.player),
        );

        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            self.state.draw_hud(ctx);
        });
        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("hud_encoder"),
            });
        gpu.egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("hud_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            gpu.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match self.init_gpu(event_loop) {
            Ok(gpu) => {
                self.state.last_frame = Instant::now();
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("GPU initialization failed: {e:#}");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(gpu) = &mut self.gpu {
            let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.config.width = new_size.width.max(1);
                    gpu.config.height = new_size.height.max(1);
                    gpu.surface.configure(&gpu.device, &gpu.config);
                    self.state
                        .camera
                        .set_viewport(gpu.config.width, gpu.config.height);
                    gpu.renderer
                        .resize(&gpu.device, gpu.config.width, gpu.config.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: key_state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                let pressed = key_state == ElementState::Pressed;
                if let Some(Action::Quit) = self.state.handle_key(code, pressed) {
                    event_loop.exit();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("labyrinth-desktop starting");

    let mut labyrinth = Labyrinth::from_config(&cli.labyrinth_config())
        .context("invalid labyrinth configuration")?;
    let fill = labyrinth.fill_randomly();
    labyrinth.print();
    fill.with_context(|| {
        format!(
            "seed {} produced no open cell; try another seed",
            labyrinth.seed()
        )
    })?;

    let scene = RenderScene::from_labyrinth(&labyrinth, EmitOptions { roof: cli.roof })?;
    tracing::info!(
        "spawn at x={:.3} z={:.3}",
        scene.spawn.x,
        scene.spawn.z
    );
    let summary = MazeInspector::summary(&labyrinth);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(AppState::new(scene, summary, cli.motion_config()));
    event_loop.run_app(&mut app)?;

    match app.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
