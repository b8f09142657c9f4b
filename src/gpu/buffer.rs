use super::{BufferTarget, BufferUsage, Gpu, GpuError, RawHandle};

/// A vertex or index buffer object.
///
/// The handle is created once in [`Buffer::new`] and deleted once when the value
/// is dropped. `Buffer` is move-only: moving it hands the handle to the new
/// owner and the old binding can no longer release it.
pub struct Buffer {
    gpu: Gpu,
    handle: RawHandle,
    target: BufferTarget,
    usage: BufferUsage,
    len: usize,
    byte_len: usize,
}

impl Buffer {
    /// Create a buffer and upload `data` into it.
    ///
    /// The buffer stays bound to `target` afterwards, which is what a vertex
    /// array under construction expects.
    pub fn new<T: bytemuck::Pod>(
        gpu: &Gpu,
        target: BufferTarget,
        data: &[T],
        usage: BufferUsage,
    ) -> Result<Self, GpuError> {
        let handle = gpu.create_buffer().map_err(|reason| GpuError::Allocation {
            kind: "buffer",
            reason,
        })?;
        let bytes: &[u8] = bytemuck::cast_slice(data);
        gpu.bind_buffer(target, Some(handle));
        gpu.buffer_data(target, bytes, usage);
        log::trace!("created {:?} buffer {} ({} bytes)", target, handle, bytes.len());

        Ok(Self {
            gpu: gpu.clone(),
            handle,
            target,
            usage,
            len: data.len(),
            byte_len: bytes.len(),
        })
    }

    pub fn vertices<T: bytemuck::Pod>(gpu: &Gpu, data: &[T]) -> Result<Self, GpuError> {
        Self::new(gpu, BufferTarget::Vertex, data, BufferUsage::Static)
    }

    pub fn indices(gpu: &Gpu, data: &[u32]) -> Result<Self, GpuError> {
        Self::new(gpu, BufferTarget::Index, data, BufferUsage::Static)
    }

    pub fn bind(&self) {
        self.gpu.bind_buffer(self.target, Some(self.handle));
    }

    /// Replace the whole content of the buffer.
    pub fn update<T: bytemuck::Pod>(&mut self, data: &[T]) {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        self.bind();
        self.gpu.buffer_data(self.target, bytes, self.usage);
        self.len = data.len();
        self.byte_len = bytes.len();
    }

    pub fn handle(&self) -> RawHandle {
        self.handle
    }

    pub fn target(&self) -> BufferTarget {
        self.target
    }

    /// Number of elements uploaded by the last write.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn byte_len(&self) -> usize {
        self.byte_len
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        log::trace!("deleting buffer {}", self.handle);
        self.gpu.delete_buffer(self.handle);
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("handle", &self.handle)
            .field("target", &self.target)
            .field("len", &self.len)
            .finish()
    }
}
