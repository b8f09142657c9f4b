use std::{cell::RefCell, collections::HashMap};

use super::{Gpu, GpuError, RawHandle, Shader, UniformLocation, UniformValue};

/// A linked shader program and its uniform table.
///
/// Uniform locations are resolved lazily by name and cached for the lifetime of
/// the program, so the per-frame upload loop only talks to the driver for the
/// values themselves. Names the linker optimised away resolve to nothing; they
/// are reported once and writes to them are dropped.
pub struct Program {
    gpu: Gpu,
    handle: RawHandle,
    label: String,
    locations: RefCell<HashMap<String, Option<UniformLocation>>>,
}

impl Program {
    /// Link `shaders` into a new program. The shaders are consumed and deleted
    /// whether or not linking succeeds.
    pub fn link(gpu: &Gpu, label: &str, shaders: Vec<Shader>) -> Result<Self, GpuError> {
        let handle = gpu.create_program().map_err(|reason| GpuError::Allocation {
            kind: "program",
            reason,
        })?;
        let program = Self {
            gpu: gpu.clone(),
            handle,
            label: label.to_string(),
            locations: RefCell::new(HashMap::new()),
        };

        for shader in &shaders {
            gpu.attach_shader(handle, shader.handle());
        }
        let linked = gpu.link_program(handle);
        for shader in &shaders {
            gpu.detach_shader(handle, shader.handle());
        }
        drop(shaders);

        linked.map_err(|log| GpuError::ProgramLink {
            label: label.to_string(),
            log,
        })?;
        log::debug!("linked program '{}' ({})", label, handle);
        Ok(program)
    }

    pub fn from_sources(
        gpu: &Gpu,
        label: &str,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, GpuError> {
        let vertex = Shader::vertex(gpu, vertex_source)?;
        let fragment = Shader::fragment(gpu, fragment_source)?;
        Self::link(gpu, label, vec![vertex, fragment])
    }

    pub fn bind(&self) {
        self.gpu.use_program(Some(self.handle));
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn handle(&self) -> RawHandle {
        self.handle
    }

    /// Resolve (and cache) the location of `name`.
    pub fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        if let Some(cached) = self.locations.borrow().get(name) {
            return *cached;
        }
        let location = self.gpu.uniform_location(self.handle, name);
        if location.is_none() {
            log::warn!(
                "uniform '{}' is not active in program '{}'",
                name,
                self.label
            );
        }
        self.locations
            .borrow_mut()
            .insert(name.to_string(), location);
        location
    }

    /// Write `value` to the uniform `name`. The program must be bound.
    pub fn set_uniform(&self, name: &str, value: impl Into<UniformValue>) {
        if let Some(location) = self.uniform_location(name) {
            self.gpu.set_uniform(location, value.into());
        }
    }

    pub fn set_i32(&self, name: &str, value: i32) {
        self.set_uniform(name, value);
    }

    pub fn set_bool(&self, name: &str, value: bool) {
        self.set_uniform(name, value);
    }

    pub fn set_f32(&self, name: &str, value: f32) {
        self.set_uniform(name, value);
    }

    pub fn set_vec3(&self, name: &str, value: impl Into<[f32; 3]>) {
        self.set_uniform(name, UniformValue::Vec3(value.into()));
    }

    pub fn set_vec4(&self, name: &str, value: impl Into<[f32; 4]>) {
        self.set_uniform(name, UniformValue::Vec4(value.into()));
    }

    pub fn set_mat3(&self, name: &str, value: cgmath::Matrix3<f32>) {
        self.set_uniform(name, value);
    }

    pub fn set_mat4(&self, name: &str, value: cgmath::Matrix4<f32>) {
        self.set_uniform(name, value);
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        log::trace!("deleting program '{}' ({})", self.label, self.handle);
        self.gpu.delete_program(self.handle);
    }
}

impl std::fmt::Debug for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Program")
            .field("handle", &self.handle)
            .field("label", &self.label)
            .finish()
    }
}
