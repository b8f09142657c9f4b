//! Flow control and application event loop.
//!
//! A "flow" is the application code driving the renderer: it fills the scene
//! once the context exists and mutates it every frame. [`run`] owns the winit
//! event loop and calls into the flow at fixed points.
//!
//! # Lifecycle Flow
//!
//! 1. `resumed`: create the window and GL context, then call `on_init`
//! 2. For each window event: feed the camera controller, then `on_window_event`
//! 3. On redraw: advance the camera, call `on_update`, render the scene, present
//! 4. Request the next redraw

use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowId,
};

use anyhow::Context as _;

use crate::{config::Config, context::Context};

/// Application hooks called by the event loop.
///
/// Only `on_init` is required; the other hooks default to doing nothing.
pub trait GraphicsFlow {
    /// Build programs, shapes and lights. Called once, right after the
    /// context is created. An error stops the event loop and is returned from
    /// [`run`].
    fn on_init(&mut self, ctx: &mut Context) -> anyhow::Result<()>;

    /// Called every frame before rendering with the time since the last frame.
    fn on_update(&mut self, ctx: &mut Context, dt: Duration) {
        let _ = (ctx, dt);
    }

    /// Called for every window event after the built-in camera handling.
    fn on_window_event(&mut self, ctx: &mut Context, event: &WindowEvent) {
        let _ = (ctx, event);
    }
}

/// Flow first: anything it holds must release its GPU handles while the
/// context is still alive.
struct App<F: GraphicsFlow> {
    flow: F,
    ctx: Option<Context>,
    config: Config,
    error: Option<anyhow::Error>,
    last_time: Instant,
}

impl<F: GraphicsFlow> App<F> {
    fn new(config: Config, flow: F) -> Self {
        Self {
            flow,
            ctx: None,
            config,
            error: None,
            last_time: Instant::now(),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }
}

impl<F: GraphicsFlow> ApplicationHandler for App<F> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.ctx.is_some() {
            return;
        }
        let mut ctx = match Context::new(event_loop, self.config.clone()) {
            Ok(ctx) => ctx,
            Err(e) => return self.fail(event_loop, e.context("could not create the main context")),
        };
        let result = self.flow.on_init(&mut ctx);
        ctx.request_redraw();
        self.ctx = Some(ctx);
        if let Err(e) = result {
            return self.fail(event_loop, e.context("initialisation failed"));
        }
        log::info!(
            "scene ready: {} shapes, {} lights",
            self.ctx.as_ref().map_or(0, |c| c.scene.shape_count()),
            self.ctx.as_ref().map_or(0, |c| c.scene.lights().len()),
        );
        self.last_time = Instant::now();
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let (Some(ctx), DeviceEvent::MouseMotion { delta: (dx, dy) }) = (&mut self.ctx, event) {
            ctx.handle_mouse_motion(dx, dy);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(ctx) = self.ctx.as_mut() else {
            return;
        };

        ctx.handle_window_event(&event);
        self.flow.on_window_event(ctx, &event);

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => ctx.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();

                ctx.update(dt);
                self.flow.on_update(ctx, dt);
                let result = ctx.render(dt);
                ctx.request_redraw();
                if let Err(e) = result {
                    self.fail(event_loop, e);
                }
            }
            _ => {}
        }
    }
}

/// Open the window and run `flow` until the window closes.
///
/// Returns the first error raised by context creation, `on_init` or frame
/// presentation.
pub fn run<F: GraphicsFlow>(config: Config, flow: F) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("could not create the event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, flow);
    event_loop
        .run_app(&mut app)
        .context("the event loop stopped with an error")?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
