use crate::gpu::{Gpu, GpuError, Program};

pub const VERTEX_SOURCE: &str = include_str!("phong.vert");
pub const FRAGMENT_SOURCE: &str = include_str!("phong.frag");

/// Blinn-Phong shading with directional, point and spot lights and up to four
/// blended material textures.
///
/// Uniforms: `u_model`, `u_normal_matrix`, `u_view`, `u_projection`,
/// `u_view_pos`, `u_material.*`, `u_textures[0..4]` and the light arrays written
/// by [`upload_lights`](crate::data_structures::light::upload_lights).
pub fn mk_phong_program(gpu: &Gpu) -> Result<Program, GpuError> {
    Program::from_sources(gpu, "phong", VERTEX_SOURCE, FRAGMENT_SOURCE)
}
