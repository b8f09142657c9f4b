use crate::gpu::{Gpu, GpuError, Program};

pub const VERTEX_SOURCE: &str = include_str!("light.vert");
pub const FRAGMENT_SOURCE: &str = include_str!("light.frag");

/// Flat colour program for light markers. Uniforms: `u_model`, `u_view`,
/// `u_projection`, `u_colour`.
pub fn mk_light_program(gpu: &Gpu) -> Result<Program, GpuError> {
    Program::from_sources(gpu, "light", VERTEX_SOURCE, FRAGMENT_SOURCE)
}
