//! GPU resource wrappers and the graphics backend seam.
//!
//! Every GPU object in this crate is owned by exactly one Rust value. The value
//! acquires its driver handle on construction and releases it in `Drop`, so a
//! handle is deleted exactly once and can never be used after release. All
//! wrappers share the single current context through [`Gpu`], an `Rc` over the
//! [`GraphicsApi`] trait. The `Rc` keeps the whole layer on the render thread.
//!
//! - [`GraphicsApi`] is the narrow set of driver calls the wrappers issue
//! - [`GlowBackend`] implements it on top of an OpenGL context loaded by `glow`
//! - [`Buffer`], [`VertexArray`], [`Shader`], [`Program`] and [`Texture`] are the RAII wrappers

use std::{num::NonZeroU32, rc::Rc};

pub mod buffer;
pub mod error;
pub mod glow_backend;
pub mod program;
pub mod shader;
pub mod texture;
pub mod vertex_array;

pub use buffer::Buffer;
pub use error::GpuError;
pub use glow_backend::GlowBackend;
pub use program::Program;
pub use shader::Shader;
pub use texture::{Texture, TextureOptions};
pub use vertex_array::VertexArray;

/// Driver object name. The driver reserves `0` for "no object", so an owned
/// handle is always non-zero.
pub type RawHandle = NonZeroU32;

/// The shared graphics context every resource is created against.
pub type Gpu = Rc<dyn GraphicsApi>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    Vertex,
    Index,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferUsage {
    Static,
    Dynamic,
    Stream,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveMode {
    Triangles,
    Lines,
    Points,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Float,
}

/// One attribute of an interleaved vertex format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub location: u32,
    /// Component count (1..=4).
    pub components: i32,
    pub kind: AttributeKind,
    pub normalized: bool,
    /// Byte offset inside one vertex.
    pub offset: i32,
}

/// Pixel layout of texture uploads. Pixels are always 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    Rgba8,
    Srgba8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterMode {
    Nearest,
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapMode {
    Repeat,
    ClampToEdge,
    MirroredRepeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SamplerParams {
    pub min_filter: FilterMode,
    pub mag_filter: FilterMode,
    pub wrap: WrapMode,
    pub mipmaps: bool,
}

impl Default for SamplerParams {
    fn default() -> Self {
        Self {
            min_filter: FilterMode::Linear,
            mag_filter: FilterMode::Linear,
            wrap: WrapMode::Repeat,
            mipmaps: true,
        }
    }
}

/// Driver-side location of a uniform inside a linked program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

/// A value that can be written to a uniform slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    /// Column-major 3x3 matrix.
    Mat3([f32; 9]),
    /// Column-major 4x4 matrix.
    Mat4([f32; 16]),
}

impl From<i32> for UniformValue {
    fn from(v: i32) -> Self {
        UniformValue::Int(v)
    }
}

impl From<bool> for UniformValue {
    fn from(v: bool) -> Self {
        UniformValue::Int(v as i32)
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        UniformValue::Float(v)
    }
}

impl From<[f32; 2]> for UniformValue {
    fn from(v: [f32; 2]) -> Self {
        UniformValue::Vec2(v)
    }
}

impl From<[f32; 3]> for UniformValue {
    fn from(v: [f32; 3]) -> Self {
        UniformValue::Vec3(v)
    }
}

impl From<[f32; 4]> for UniformValue {
    fn from(v: [f32; 4]) -> Self {
        UniformValue::Vec4(v)
    }
}

impl From<cgmath::Vector3<f32>> for UniformValue {
    fn from(v: cgmath::Vector3<f32>) -> Self {
        UniformValue::Vec3(v.into())
    }
}

impl From<cgmath::Point3<f32>> for UniformValue {
    fn from(v: cgmath::Point3<f32>) -> Self {
        UniformValue::Vec3(v.into())
    }
}

impl From<cgmath::Matrix3<f32>> for UniformValue {
    fn from(m: cgmath::Matrix3<f32>) -> Self {
        let raw: &[f32; 9] = m.as_ref();
        UniformValue::Mat3(*raw)
    }
}

impl From<cgmath::Matrix4<f32>> for UniformValue {
    fn from(m: cgmath::Matrix4<f32>) -> Self {
        let raw: &[f32; 16] = m.as_ref();
        UniformValue::Mat4(*raw)
    }
}

/// The driver calls issued by the resource wrappers.
///
/// Implementations forward to a real context ([`GlowBackend`]) or record the
/// calls for inspection. Every method assumes the context is current on the
/// calling thread. Creation methods return the new handle or the driver's
/// reason for refusing; compile and link return the info log on failure.
pub trait GraphicsApi {
    fn create_buffer(&self) -> Result<RawHandle, String>;
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<RawHandle>);
    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage);
    fn delete_buffer(&self, buffer: RawHandle);

    fn create_vertex_array(&self) -> Result<RawHandle, String>;
    fn bind_vertex_array(&self, vertex_array: Option<RawHandle>);
    fn vertex_attrib_pointer(&self, attribute: &VertexAttribute, stride: i32);
    fn enable_vertex_attrib_array(&self, location: u32);
    fn delete_vertex_array(&self, vertex_array: RawHandle);

    fn create_shader(&self, stage: ShaderStage) -> Result<RawHandle, String>;
    fn compile_shader(&self, shader: RawHandle, source: &str) -> Result<(), String>;
    fn delete_shader(&self, shader: RawHandle);

    fn create_program(&self) -> Result<RawHandle, String>;
    fn attach_shader(&self, program: RawHandle, shader: RawHandle);
    fn detach_shader(&self, program: RawHandle, shader: RawHandle);
    fn link_program(&self, program: RawHandle) -> Result<(), String>;
    fn use_program(&self, program: Option<RawHandle>);
    fn uniform_location(&self, program: RawHandle, name: &str) -> Option<UniformLocation>;
    fn set_uniform(&self, location: UniformLocation, value: UniformValue);
    fn delete_program(&self, program: RawHandle);

    fn create_texture(&self) -> Result<RawHandle, String>;
    fn active_texture(&self, unit: u32);
    fn bind_texture(&self, texture: Option<RawHandle>);
    fn tex_image_2d(&self, width: u32, height: u32, format: PixelFormat, pixels: &[u8]);
    fn tex_parameters(&self, params: &SamplerParams);
    fn generate_mipmap(&self);
    fn delete_texture(&self, texture: RawHandle);

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear(&self, colour: [f32; 4]);
    fn set_depth_test(&self, enabled: bool);
    fn draw_arrays(&self, mode: PrimitiveMode, first: i32, count: i32);
    fn draw_elements(&self, mode: PrimitiveMode, count: i32);
}
