//! Window, GL context and the per-application state built on top of them.
//!
//! [`Context`] is created once the event loop is running. It opens the window,
//! creates an OpenGL core context with glutin, makes it current and loads it
//! through `glow`. Everything a [`crate::flow::GraphicsFlow`] needs to build and
//! mutate the scene hangs off it.

use std::{num::NonZeroU32, rc::Rc};

use anyhow::{Context as _, anyhow};
use glutin::{
    config::{ConfigTemplateBuilder, GlConfig},
    context::{
        ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext,
        PossiblyCurrentContext, Version,
    },
    display::{GetGlDisplay, GlDisplay},
    surface::{GlSurface, Surface, SwapInterval, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use instant::Duration;
use raw_window_handle::HasWindowHandle;
use winit::{
    dpi::LogicalSize,
    event::{MouseButton, WindowEvent},
    event_loop::ActiveEventLoop,
    window::Window,
};

use crate::{
    camera::{Camera, CameraController, Projection},
    config::Config,
    gpu::{GlowBackend, Gpu},
    render::{FrameStats, Renderer},
    resources::Assets,
    scene::Scene,
};

/// Which mouse buttons are currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseButtonState {
    pub left: bool,
    pub right: bool,
}

impl MouseButtonState {
    pub fn handle_input(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.left = pressed,
            MouseButton::Right => self.right = pressed,
            _ => {}
        }
    }
}

/// Field order is drop order: GPU resources go before the context and the
/// context before the window it renders into.
pub struct Context {
    pub scene: Scene,
    pub renderer: Renderer,
    pub controller: CameraController,
    pub assets: Assets,
    pub mouse: MouseButtonState,
    pub config: Config,
    stats: FrameStats,
    gpu: Gpu,
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Window,
}

impl Context {
    pub fn new(event_loop: &ActiveEventLoop, config: Config) -> anyhow::Result<Self> {
        let window_attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.width, config.height));
        let template = ConfigTemplateBuilder::new().with_depth_size(24);

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(window_attributes))
            .build(event_loop, template, |configs| {
                // Never empty: every glutin backend's `find_configs` returns
                // `Err` when nothing matches the template, and `build`
                // propagates that error without calling the picker.
                configs
                    .reduce(|best, c| if c.num_samples() > best.num_samples() { c } else { best })
                    .expect("display offered no GL configs")
            })
            .map_err(|e| anyhow!("could not create a GL display: {e}"))?;
        let window = window.ok_or_else(|| anyhow!("the display builder did not create a window"))?;
        log::debug!("picked GL config with {} samples", gl_config.num_samples());

        let raw_window_handle = window
            .window_handle()
            .context("window has no native handle")?
            .as_raw();
        let gl_display = gl_config.display();
        let (major, minor) = config.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(Some(raw_window_handle));
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .with_context(|| format!("could not create an OpenGL {major}.{minor} core context"))?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .context("could not describe the window surface")?;
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
            .context("could not create the window surface")?;
        let gl_context = not_current
            .make_current(&gl_surface)
            .context("could not make the GL context current")?;

        let interval = if config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = gl_surface.set_swap_interval(&gl_context, interval) {
            log::warn!("could not set swap interval {:?}: {}", interval, e);
        }

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|symbol| gl_display.get_proc_address(symbol))
        };
        let gpu: Gpu = Rc::new(GlowBackend::new(gl));

        let size = window.inner_size();
        let camera = Camera::new((0.0, 2.5, 8.0), cgmath::Deg(-90.0), cgmath::Deg(-15.0));
        let projection = Projection::new(
            size.width,
            size.height,
            cgmath::Deg(config.fovy),
            config.znear,
            config.zfar,
        );
        let renderer = Renderer::new(&gpu, config.clear_colour);
        let controller = CameraController::new(config.camera_speed, config.camera_sensitivity);
        let assets = Assets::new(config.asset_dir.clone());

        Ok(Self {
            scene: Scene::new(camera, projection),
            renderer,
            controller,
            assets,
            mouse: MouseButtonState::default(),
            config,
            stats: FrameStats::default(),
            gpu,
            gl_surface,
            gl_context,
            window,
        })
    }

    pub fn gpu(&self) -> &Gpu {
        &self.gpu
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    /// Resize the surface and projection. Zero sizes (minimised windows) are
    /// ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) {
            self.gl_surface.resize(&self.gl_context, w, h);
            self.scene.projection.resize(width, height);
        }
    }

    /// Route input to the camera controller and track mouse buttons.
    pub(crate) fn handle_window_event(&mut self, event: &WindowEvent) {
        self.controller.handle_window_events(event);
        if let WindowEvent::MouseInput { state, button, .. } = event {
            self.mouse.handle_input(*button, state.is_pressed());
        }
    }

    pub(crate) fn handle_mouse_motion(&mut self, dx: f64, dy: f64) {
        if self.mouse.right {
            self.controller.handle_mouse(dx, dy);
        }
    }

    pub(crate) fn update(&mut self, dt: Duration) {
        self.controller
            .update(&mut self.scene.camera, &mut self.scene.projection, dt);
    }

    /// Clear, draw the scene and present.
    pub(crate) fn render(&mut self, dt: Duration) -> anyhow::Result<()> {
        let (width, height) = self.size();
        self.renderer.begin_frame(width, height);
        self.scene.render(&mut self.renderer);
        self.gl_surface
            .swap_buffers(&self.gl_context)
            .context("could not present the frame")?;

        if let Some(report) = self.stats.tick(dt, self.renderer.counters()) {
            log::info!("{report}");
            self.window
                .set_title(&format!("{} | {}", self.config.title, report));
        }
        Ok(())
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("scene", &self.scene)
            .field("renderer", &self.renderer)
            .field("mouse", &self.mouse)
            .field("config", &self.config)
            .field("window", &self.window.id())
            .finish_non_exhaustive()
    }
}
