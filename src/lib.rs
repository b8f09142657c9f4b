//! # glint
//!
//! Thin ownership wrappers over OpenGL plus a small scene layer on top.
//!
//! ## Layers
//!
//! - [`gpu`]: RAII wrappers for buffers, vertex arrays, shaders, programs and
//!   textures, all talking to the driver through the [`gpu::GraphicsApi`] trait
//! - [`data_structures`]: CPU-side vertices, meshes, transforms, materials,
//!   lights and the [`data_structures::shape::Shape`] that ties them to GPU objects
//! - [`scene`]: the per-frame integration of camera, lights and shapes
//! - [`context`] and [`flow`]: window, GL context and the event loop
//!
//! ## Quick start
//!
//! ```no_run
//! use glint::{
//!     config::Config,
//!     context::Context,
//!     data_structures::{material::Material, mesh::Mesh, shape::Shape},
//!     flow::{self, GraphicsFlow},
//!     programs::phong::mk_phong_program,
//!     scene::Shading,
//! };
//!
//! struct Demo;
//!
//! impl GraphicsFlow for Demo {
//!     fn on_init(&mut self, ctx: &mut Context) -> anyhow::Result<()> {
//!         let program = ctx.scene.add_program(mk_phong_program(ctx.gpu())?, Shading::Lit);
//!         let cube = Shape::new(ctx.gpu(), Mesh::cube(), Material::default())?;
//!         ctx.scene.add_shape(program, cube);
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     flow::run(Config::default(), Demo)
//! }
//! ```

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod gpu;
pub mod logging;
pub mod programs;
pub mod render;
pub mod resources;
pub mod scene;

pub use cgmath;
pub use winit::event;
pub use winit::keyboard;
