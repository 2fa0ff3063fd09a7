use anyhow::{Context, Result};
use clap::Parser;
use egui::Context as EguiContext;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use vista_common::{ChunkCoord, MeshData};
use vista_input::{ActionState, Key};
use vista_math::{Mat4, Vec3, translate};
use vista_render::Lighting;
use vista_render_wgpu::{FlyCamera, TerrainRenderer};
use vista_terrain::{TerrainConfig, TerrainGenerator, derive_mesh};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "vista-desktop", about = "Procedural terrain viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Terrain config file (.yaml, .yml or .json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the config's seed
    #[arg(long)]
    seed: Option<u32>,

    /// Chunks drawn on each side of chunk (0, 0), at most 64. Chunk meshes do
    /// not share their last sample row, so adjacent meshes leave a one-quad gap.
    #[arg(long, default_value = "0")]
    radius: u32,

    /// OBJ model drawn at translate(1, 0, 0)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Camera speed in world units per second
    #[arg(long, default_value = "10")]
    speed: f32,
}

/// A CPU-side mesh waiting for upload.
#[derive(Debug)]
struct SceneMesh {
    label: String,
    mesh: MeshData,
    model: Mat4,
}

fn map_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::KeyW => Key::W,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyD => Key::D,
        KeyCode::Space => Key::Space,
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::KeyP => Key::P,
        _ => return None,
    })
}

/// Generate the terrain region and load the optional model.
fn build_scene(cli: &Cli) -> Result<(TerrainConfig, Vec<SceneMesh>)> {
    let mut config = match &cli.config {
        Some(path) => TerrainConfig::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => TerrainConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    let generator = TerrainGenerator::new(config)?;
    let coords = ChunkCoord::default().square(cli.radius)?;
    let fields = generator.generate_region(&coords)?;

    let mut meshes: Vec<SceneMesh> = fields
        .iter()
        .map(|field| SceneMesh {
            label: format!("chunk {}", field.coord()),
            mesh: derive_mesh(field),
            model: translate(field.world_offset()),
        })
        .collect();

    if let Some(path) = &cli.model {
        let model = vista_assets::load_obj(path)?;
        meshes.push(SceneMesh {
            label: path.display().to_string(),
            mesh: model.mesh,
            model: translate(Vec3::new(1.0, 0.0, 0.0)),
        });
    }

    Ok((config, meshes))
}

/// Application state.
struct AppState {
    camera: FlyCamera,
    actions: ActionState,
    lighting: Lighting,
    config: TerrainConfig,
    pending: Vec<SceneMesh>,
    triangles: usize,
    chunks: usize,
    show_panel: bool,
    last_frame: Instant,
    frame_time: f32,
}

impl AppState {
    fn new(config: TerrainConfig, meshes: Vec<SceneMesh>, speed: f32) -> Self {
        let side = config.samples_per_side() as f32;
        let mut camera = FlyCamera::new(
            Vec3::new(side * 0.5, 5.0, -10.0),
            Vec3::new(0.0, -0.3, 1.0),
            45.0,
            speed,
            100.0,
        );
        camera.far = side * 8.0;

        Self {
            camera,
            actions: ActionState::new(),
            lighting: Lighting::default(),
            config,
            triangles: meshes.iter().map(|m| m.mesh.triangle_count()).sum(),
            chunks: meshes.len(),
            pending: meshes,
            show_panel: true,
            last_frame: Instant::now(),
            frame_time: 0.0,
        }
    }

    fn update(&mut self, dt: f32) {
        for action in self.actions.held_actions() {
            self.camera.apply(action, dt);
        }
    }

    fn handle_key(&mut self, code: KeyCode, pressed: bool) {
        if pressed && code == KeyCode::F1 {
            self.show_panel = !self.show_panel;
            return;
        }
        let Some(key) = map_key(code) else {
            return;
        };
        if let Some(action) = self.actions.handle_key(key, pressed) {
            self.camera.apply(action, 0.0);
        }
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_panel {
            return;
        }

        egui::SidePanel::left("camera")
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("Terrain");
                ui.separator();
                ui.label(format!(
                    "Seed: {}  Chunk: {}x{}  Octaves: {}",
                    self.config.seed,
                    self.config.chunk_size,
                    self.config.block_size,
                    self.config.octaves
                ));
                ui.label(format!(
                    "Meshes: {}  Triangles: {}",
                    self.chunks, self.triangles
                ));
                ui.label(format!("Frame: {:.1} ms", self.frame_time * 1000.0));
                ui.separator();

                ui.heading("Camera");
                let pose = self.camera.pose();
                let row = |ui: &mut egui::Ui, name: &str, v: Vec3| {
                    ui.label(format!("{name}: ({:.2}, {:.2}, {:.2})", v.x, v.y, v.z));
                };
                row(ui, "Position", pose.position);
                row(ui, "Front", pose.front);
                row(ui, "Up", pose.up);
                row(ui, "Right", pose.right);
                ui.add(egui::Slider::new(&mut self.camera.speed, 0.5..=200.0).text("speed"));
                ui.add(
                    egui::Slider::new(&mut self.camera.turn_speed, 10.0..=360.0).text("turn °/s"),
                );
                ui.add(egui::Slider::new(&mut self.camera.fov, 20.0..=100.0).text("fov"));

                ui.separator();
                ui.small("WASD/Space/Ctrl: Move | Arrows: Turn | P: Log pose | F1: Panel");
            });
    }
}

/// Everything that exists only once the window is up.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: TerrainRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

struct GpuApp {
    state: AppState,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    fn new(state: AppState) -> Self {
        Self {
            state,
            gpu: None,
            egui_ctx: EguiContext::default(),
        }
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("Vista")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("vista_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or(surface_caps.formats.first())
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

        self.state.camera.aspect = config.width as f32 / config.height as f32;

        let mut renderer = TerrainRenderer::new(&device, surface_format, config.width, config.height);
        for item in self.state.pending.drain(..) {
            renderer.upload(&device, &item.label, &item.mesh, item.model);
        }

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
            backend = adapter.get_info().backend.to_str(),
            meshes = renderer.mesh_count(),
            "GPU initialized"
        );

        self.gpu = Some(Gpu {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        });
        Ok(())
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let dt = (now - self.state.last_frame).as_secs_f32().min(0.1);
        self.state.last_frame = now;
        self.state.frame_time = dt;
        self.state.update(dt);

        let Some(gpu) = self.gpu.as_mut() else {
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
            &self.state.lighting,
        );

        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            self.state.draw_ui(ctx);
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
                label: Some("egui_encoder"),
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
                    label: Some("egui_pass"),
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
        if let Err(e) = self.init_gpu(event_loop) {
            tracing::error!("failed to initialize GPU: {e:#}");
            event_loop.exit();
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
                    self.state.camera.aspect = gpu.config.width as f32 / gpu.config.height as f32;
                    gpu.renderer
                        .resize(&gpu.device, gpu.config.width, gpu.config.height);
                }
            }
            WindowEvent::Focused(false) => {
                self.state.actions.clear();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                if code == KeyCode::Escape {
                    event_loop.exit();
                    return;
                }
                self.state
                    .handle_key(code, key_state == ElementState::Pressed);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
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

    tracing::info!("vista-desktop starting");

    let (config, meshes) = build_scene(&cli)?;
    let state = AppState::new(config, meshes, cli.speed);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(state);
    event_loop.run_app(&mut app)?;

    Ok(())
}
