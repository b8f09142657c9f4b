//! Demo scene: a lit floor, textured crates sharing one texture, an OBJ model
//! and three kinds of light.
//!
//! Controls: WASD / arrows move, Space / Shift go up and down, drag with the
//! right mouse button to look around, scroll to zoom, F toggles the flashlight
//! and Escape quits.

use std::rc::Rc;

use anyhow::Context as _;
use cgmath::{Deg, Rad};
use glint::{
    config::Config,
    context::Context,
    data_structures::{
        light::{Light, LightColour},
        material::Material,
        mesh::Mesh,
        shape::Shape,
        transform::Transform,
    },
    event::{ElementState, KeyEvent, WindowEvent},
    flow::{self, GraphicsFlow},
    gpu::{Texture, TextureOptions},
    keyboard::{KeyCode, PhysicalKey},
    logging::{LoggingConfig, init_logging},
    programs::{light::mk_light_program, phong::mk_phong_program},
    scene::{LightId, ShapeId, Shading},
};
use instant::Duration;

const ORBIT_RADIUS: f32 = 4.0;
const ORBIT_HEIGHT: f32 = 2.5;
const FLASHLIGHT_COLOUR: [f32; 3] = [1.0, 0.95, 0.8];

#[derive(Default)]
struct Demo {
    time: f32,
    orbit_light: Option<LightId>,
    orbit_marker: Option<ShapeId>,
    flashlight: Option<LightId>,
    flashlight_on: bool,
    crates: Vec<ShapeId>,
}

impl Demo {
    fn orbit_position(&self) -> [f32; 3] {
        let (sin, cos) = (self.time * 0.6).sin_cos();
        [ORBIT_RADIUS * cos, ORBIT_HEIGHT, ORBIT_RADIUS * sin]
    }
}

fn marker(ctx: &Context, position: [f32; 3], colour: [f32; 3]) -> anyhow::Result<Shape> {
    Ok(Shape::new(ctx.gpu(), Mesh::cube(), Material::coloured(colour))?
        .with_transform(Transform::from_translation(position).with_uniform_scale(0.15)))
}

impl GraphicsFlow for Demo {
    fn on_init(&mut self, ctx: &mut Context) -> anyhow::Result<()> {
        let gpu = ctx.gpu().clone();
        let lit = ctx.scene.add_program(mk_phong_program(&gpu)?, Shading::Lit);
        let unlit = ctx.scene.add_program(mk_light_program(&gpu)?, Shading::Unlit);

        let checker = Rc::new(Texture::checkerboard(
            &gpu,
            256,
            8,
            [210, 210, 210, 255],
            [70, 70, 80, 255],
        )?);
        let floor = Shape::new(
            &gpu,
            Mesh::plane(20.0, 10.0),
            Material::textured(checker).with_shininess(8.0).with_texture_blend(0.9),
        )?;
        ctx.scene.add_shape(lit, floor);

        let crate_texture = Rc::new(
            ctx.assets
                .load_texture(&gpu, "textures/crate.png", TextureOptions::default())
                .context("the crate texture ships in assets/textures")?,
        );
        for (i, x) in [-2.5f32, 0.0, 2.5].into_iter().enumerate() {
            let material = Material::textured(Rc::clone(&crate_texture)).with_shininess(16.0);
            let shape = Shape::new(&gpu, Mesh::cube(), material)?.with_transform(
                Transform::from_translation([x, 0.5, -1.5]).with_rotation(Deg(20.0 * i as f32), [0.0, 1.0, 0.0]),
            );
            self.crates.push(ctx.scene.add_shape(lit, shape));
        }

        for shape in ctx.assets.load_shapes(&gpu, "models/pyramid.obj")? {
            let shape = shape.with_transform(Transform::from_translation([0.0, 0.0, 2.0]).with_uniform_scale(1.2));
            ctx.scene.add_shape(lit, shape);
        }

        ctx.scene.add_light(Light::directional(
            [-0.3, -1.0, -0.4],
            LightColour {
                ambient: [0.05, 0.05, 0.07],
                diffuse: [0.35, 0.35, 0.4],
                specular: [0.3, 0.3, 0.3],
            },
        ));

        let orbit_colour = [1.0, 0.55, 0.25];
        self.orbit_light = Some(
            ctx.scene
                .add_light(Light::point(self.orbit_position(), LightColour::from_rgb(orbit_colour))),
        );
        let orbit_marker = marker(ctx, self.orbit_position(), orbit_colour)?;
        self.orbit_marker = Some(ctx.scene.add_shape(unlit, orbit_marker));

        let still_colour = [0.3, 0.6, 1.0];
        let still_position = [-5.0, 1.5, 3.0];
        ctx.scene
            .add_light(Light::point(still_position, LightColour::from_rgb(still_colour)));
        let still_marker = marker(ctx, still_position, still_colour)?;
        ctx.scene.add_shape(unlit, still_marker);

        let camera = ctx.scene.camera;
        self.flashlight = Some(ctx.scene.add_light(Light::spot(
            camera.position,
            camera.forward(),
            LightColour::from_rgb(FLASHLIGHT_COLOUR),
            Deg(12.5),
            Deg(17.5),
        )));
        self.flashlight_on = true;
        Ok(())
    }

    fn on_update(&mut self, ctx: &mut Context, dt: Duration) {
        let dt = dt.as_secs_f32();
        self.time += dt;

        let position = self.orbit_position();
        if let Some(light) = self.orbit_light.and_then(|id| ctx.scene.light_mut(id)) {
            light.set_position(position);
        }
        if let Some(shape) = self.orbit_marker.and_then(|id| ctx.scene.shape_mut(id)) {
            shape.transform.translation = position.into();
        }

        for id in &self.crates {
            if let Some(shape) = ctx.scene.shape_mut(*id) {
                shape.transform.rotate(Rad(0.4 * dt));
            }
        }

        let camera = ctx.scene.camera;
        if let Some(light) = self.flashlight.and_then(|id| ctx.scene.light_mut(id)) {
            light.set_position(camera.position);
            light.set_direction(camera.forward());
        }
    }

    fn on_window_event(&mut self, ctx: &mut Context, event: &WindowEvent) {
        if let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(KeyCode::KeyF),
                    state: ElementState::Pressed,
                    repeat: false,
                    ..
                },
            ..
        } = event
        {
            self.flashlight_on = !self.flashlight_on;
            let rgb = if self.flashlight_on {
                FLASHLIGHT_COLOUR
            } else {
                [0.0; 3]
            };
            if let Some(light) = self.flashlight.and_then(|id| ctx.scene.light_mut(id)) {
                *light.colour_mut() = LightColour::from_rgb(rgb);
                if !self.flashlight_on {
                    light.colour_mut().specular = [0.0; 3];
                }
            }
            log::info!("flashlight {}", if self.flashlight_on { "on" } else { "off" });
        }
    }
}

fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    };
    init_logging(LoggingConfig::from(&config));

    if let Err(e) = flow::run(config, Demo::default()) {
        log::error!("{e:#}");
        eprintln!("error: {e}");
        for cause in e.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        std::process::exit(1);
    }
}
