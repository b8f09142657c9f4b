use super::{Gpu, GpuError, RawHandle, ShaderStage};

/// A compiled shader stage.
///
/// Shaders only exist to be linked: [`Program::link`](super::Program::link)
/// takes them by value and they are deleted once the program is built.
pub struct Shader {
    gpu: Gpu,
    handle: RawHandle,
    stage: ShaderStage,
}

impl Shader {
    pub fn compile(gpu: &Gpu, stage: ShaderStage, source: &str) -> Result<Self, GpuError> {
        let handle = gpu.create_shader(stage).map_err(|reason| GpuError::Allocation {
            kind: "shader",
            reason,
        })?;
        // Owning the handle first means a failed compile still releases it.
        let shader = Self {
            gpu: gpu.clone(),
            handle,
            stage,
        };
        gpu.compile_shader(handle, source)
            .map_err(|log| GpuError::ShaderCompile { stage, log })?;
        log::trace!("compiled {} shader {}", stage, handle);
        Ok(shader)
    }

    pub fn vertex(gpu: &Gpu, source: &str) -> Result<Self, GpuError> {
        Self::compile(gpu, ShaderStage::Vertex, source)
    }

    pub fn fragment(gpu: &Gpu, source: &str) -> Result<Self, GpuError> {
        Self::compile(gpu, ShaderStage::Fragment, source)
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn handle(&self) -> RawHandle {
        self.handle
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        log::trace!("deleting {} shader {}", self.stage, self.handle);
        self.gpu.delete_shader(self.handle);
    }
}

impl std::fmt::Debug for Shader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shader")
            .field("handle", &self.handle)
            .field("stage", &self.stage)
            .finish()
    }
}
