use crate::data_structures::vertex::VertexLayout;

use super::{Buffer, BufferTarget, Gpu, GpuError, PrimitiveMode, RawHandle};

/// A vertex array object: the recorded binding of vertex buffers, attribute
/// pointers and the element buffer.
pub struct VertexArray {
    gpu: Gpu,
    handle: RawHandle,
}

impl VertexArray {
    pub fn new(gpu: &Gpu) -> Result<Self, GpuError> {
        let handle = gpu
            .create_vertex_array()
            .map_err(|reason| GpuError::Allocation {
                kind: "vertex array",
                reason,
            })?;
        log::trace!("created vertex array {}", handle);
        Ok(Self {
            gpu: gpu.clone(),
            handle,
        })
    }

    pub fn bind(&self) {
        self.gpu.bind_vertex_array(Some(self.handle));
    }

    pub fn unbind(&self) {
        self.gpu.bind_vertex_array(None);
    }

    /// Record `buffer` as the source of every attribute of `V`.
    pub fn attach<V: VertexLayout>(&self, buffer: &Buffer) {
        debug_assert_eq!(buffer.target(), BufferTarget::Vertex);
        self.bind();
        buffer.bind();
        let stride = std::mem::size_of::<V>() as i32;
        for attribute in V::attributes() {
            self.gpu.vertex_attrib_pointer(attribute, stride);
            self.gpu.enable_vertex_attrib_array(attribute.location);
        }
    }

    /// Record `buffer` as the element buffer. The binding is stored inside the
    /// vertex array, so the array must not be unbound in between.
    pub fn attach_index_buffer(&self, buffer: &Buffer) {
        debug_assert_eq!(buffer.target(), BufferTarget::Index);
        self.bind();
        buffer.bind();
    }

    /// Draw `count` vertices starting at `first` in buffer order.
    pub fn draw_arrays(&self, mode: PrimitiveMode, first: i32, count: i32) {
        self.bind();
        self.gpu.draw_arrays(mode, first, count);
    }

    /// Draw `count` indices from the attached element buffer.
    pub fn draw_elements(&self, mode: PrimitiveMode, count: i32) {
        self.bind();
        self.gpu.draw_elements(mode, count);
    }

    pub fn handle(&self) -> RawHandle {
        self.handle
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        log::trace!("deleting vertex array {}", self.handle);
        self.gpu.delete_vertex_array(self.handle);
    }
}

impl std::fmt::Debug for VertexArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VertexArray")
            .field("handle", &self.handle)
            .finish()
    }
}
