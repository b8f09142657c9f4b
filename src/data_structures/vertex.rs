use crate::gpu::{AttributeKind, VertexAttribute};

/// Describes how the bytes of one vertex map onto shader attribute locations.
///
/// As vertex data is copied verbatim into GPU memory, the driver has to be told
/// what each byte range refers to: the stride is the size of the implementing
/// type and each attribute names its location, component count and offset.
pub trait VertexLayout: bytemuck::Pod {
    fn attributes() -> &'static [VertexAttribute];
}

/// The vertex format every built-in program consumes.
///
/// Locations: 0 position, 1 normal, 2 texture coordinates.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coords,
        }
    }
}

const VERTEX_ATTRIBUTES: [VertexAttribute; 3] = [
    VertexAttribute {
        location: 0,
        components: 3,
        kind: AttributeKind::Float,
        normalized: false,
        offset: 0,
    },
    VertexAttribute {
        location: 1,
        components: 3,
        kind: AttributeKind::Float,
        normalized: false,
        offset: std::mem::size_of::<[f32; 3]>() as i32,
    },
    VertexAttribute {
        location: 2,
        components: 2,
        kind: AttributeKind::Float,
        normalized: false,
        offset: std::mem::size_of::<[f32; 6]>() as i32,
    },
];

impl VertexLayout for Vertex {
    fn attributes() -> &'static [VertexAttribute] {
        &VERTEX_ATTRIBUTES
    }
}
