use crate::gpu::{Buffer, Gpu, GpuError, PrimitiveMode, Program, VertexArray};

use super::{material::Material, mesh::Mesh, transform::Transform, vertex::Vertex};

/// A drawable object: geometry on the GPU plus where and how to draw it.
///
/// The shape owns its vertex array and the buffers recorded in it. Fields are
/// declared so the vertex array is released before the buffers it refers to.
pub struct Shape {
    vertex_array: VertexArray,
    vertex_buffer: Buffer,
    index_buffer: Option<Buffer>,
    mesh: Mesh,
    pub transform: Transform,
    pub material: Material,
}

/// What a single [`Shape::draw`] submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawCall {
    Indexed { count: i32 },
    Arrays { count: i32 },
}

impl DrawCall {
    pub fn triangles(&self) -> usize {
        match self {
            DrawCall::Indexed { count } | DrawCall::Arrays { count } => *count as usize / 3,
        }
    }
}

impl Shape {
    pub fn new(gpu: &Gpu, mesh: Mesh, material: Material) -> Result<Self, GpuError> {
        let vertex_array = VertexArray::new(gpu)?;
        let vertex_buffer = Buffer::vertices(gpu, mesh.vertices())?;
        vertex_array.attach::<Vertex>(&vertex_buffer);
        let index_buffer = match mesh.indices() {
            Some(indices) => {
                let buffer = Buffer::indices(gpu, indices)?;
                vertex_array.attach_index_buffer(&buffer);
                Some(buffer)
            }
            None => None,
        };
        vertex_array.unbind();

        log::debug!(
            "created shape '{}' ({} vertices, {} triangles)",
            mesh.name(),
            mesh.vertices().len(),
            mesh.triangle_count()
        );
        Ok(Self {
            vertex_array,
            vertex_buffer,
            index_buffer,
            mesh,
            transform: Transform::default(),
            material,
        })
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn vertex_buffer(&self) -> &Buffer {
        &self.vertex_buffer
    }

    pub fn index_buffer(&self) -> Option<&Buffer> {
        self.index_buffer.as_ref()
    }

    /// Push the transform and material of this shape into the bound `program`.
    pub fn apply_uniforms(&self, program: &Program) {
        let model = self.transform.to_matrix();
        program.set_mat4("u_model", model);
        program.set_mat3("u_normal_matrix", super::transform::normal_matrix(&model));
        self.material.apply(program);
    }

    /// Issue the draw call for this shape. Indexed meshes use the element
    /// buffer, others draw the vertex list in order.
    pub fn draw(&self) -> DrawCall {
        let call = match &self.index_buffer {
            Some(indices) => {
                let count = indices.len() as i32;
                self.vertex_array
                    .draw_elements(PrimitiveMode::Triangles, count);
                DrawCall::Indexed { count }
            }
            None => {
                let count = self.vertex_buffer.len() as i32;
                self.vertex_array
                    .draw_arrays(PrimitiveMode::Triangles, 0, count);
                DrawCall::Arrays { count }
            }
        };
        self.vertex_array.unbind();
        call
    }
}

impl std::fmt::Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shape")
            .field("mesh", &self.mesh.name())
            .field("vertex_array", &self.vertex_array)
            .field("transform", &self.transform)
            .finish()
    }
}
