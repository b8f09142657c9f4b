use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, HashSet},
    num::NonZeroU32,
    rc::Rc,
};

use glint::gpu::{
    BufferTarget, BufferUsage, Gpu, GraphicsApi, PixelFormat, PrimitiveMode, RawHandle,
    SamplerParams, ShaderStage, UniformLocation, UniformValue, VertexAttribute,
};

/// One recorded driver call. Handles are plain `u32` to keep assertions short.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateBuffer(u32),
    BindBuffer(BufferTarget, Option<u32>),
    BufferData {
        target: BufferTarget,
        bytes: usize,
        usage: BufferUsage,
    },
    DeleteBuffer(u32),

    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    VertexAttribPointer {
        location: u32,
        components: i32,
        offset: i32,
        stride: i32,
    },
    EnableVertexAttribArray(u32),
    DeleteVertexArray(u32),

    CreateShader(u32, ShaderStage),
    CompileShader(u32),
    DeleteShader(u32),

    CreateProgram(u32),
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    LinkProgram(u32),
    UseProgram(Option<u32>),
    UniformLocation(u32, String),
    SetUniform(String, UniformValue),
    DeleteProgram(u32),

    CreateTexture(u32),
    ActiveTexture(u32),
    BindTexture(Option<u32>),
    TexImage2d {
        width: u32,
        height: u32,
        format: PixelFormat,
        bytes: usize,
    },
    TexParameters(SamplerParams),
    GenerateMipmap,
    DeleteTexture(u32),

    Viewport(i32, i32, i32, i32),
    Clear([f32; 4]),
    DepthTest(bool),
    DrawArrays(PrimitiveMode, i32, i32),
    DrawElements(PrimitiveMode, i32),
}

/// A [`GraphicsApi`] that records every call instead of talking to a driver.
///
/// Handles are handed out from one counter starting at 1, so every object gets
/// a distinct name regardless of kind.
#[derive(Debug, Default)]
pub struct MockGl {
    calls: RefCell<Vec<Call>>,
    next_handle: Cell<u32>,
    uniform_names: RefCell<HashMap<u32, String>>,
    inactive_uniforms: RefCell<HashSet<String>>,
    compile_error: RefCell<Option<String>>,
    link_error: RefCell<Option<String>>,
    refuse_allocation: Cell<bool>,
}

impl MockGl {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn fail_compile(&self, log: &str) {
        *self.compile_error.borrow_mut() = Some(log.to_string());
    }

    pub fn fail_link(&self, log: &str) {
        *self.link_error.borrow_mut() = Some(log.to_string());
    }

    pub fn refuse_allocation(&self, refuse: bool) {
        self.refuse_allocation.set(refuse);
    }

    /// Uniforms that `uniform_location` should report as optimised away.
    pub fn mark_inactive(&self, name: &str) {
        self.inactive_uniforms.borrow_mut().insert(name.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| predicate(c)).count()
    }

    pub fn count_of(&self, call: &Call) -> usize {
        self.count(|c| c == call)
    }

    pub fn position(&self, call: &Call) -> Option<usize> {
        self.calls.borrow().iter().position(|c| c == call)
    }

    /// Every value written to the uniform `name`, in order.
    pub fn uniform_writes(&self, name: &str) -> Vec<UniformValue> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::SetUniform(n, value) if n == name => Some(*value),
                _ => None,
            })
            .collect()
    }

    pub fn last_uniform(&self, name: &str) -> Option<UniformValue> {
        self.uniform_writes(name).last().copied()
    }

    pub fn draw_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::DrawArrays(..) | Call::DrawElements(..)))
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn allocate(&self) -> Result<RawHandle, String> {
        if self.refuse_allocation.get() {
            return Err("out of memory".to_string());
        }
        let next = self.next_handle.get() + 1;
        self.next_handle.set(next);
        NonZeroU32::new(next).ok_or_else(|| "handle counter overflowed".to_string())
    }
}

/// The mock as the shared context type the library expects.
pub fn gpu(mock: &Rc<MockGl>) -> Gpu {
    mock.clone()
}

impl GraphicsApi for MockGl {
    fn create_buffer(&self) -> Result<RawHandle, String> {
        let handle = self.allocate()?;
        self.record(Call::CreateBuffer(handle.get()));
        Ok(handle)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<RawHandle>) {
        self.record(Call::BindBuffer(target, buffer.map(NonZeroU32::get)));
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        self.record(Call::BufferData {
            target,
            bytes: data.len(),
            usage,
        });
    }

    fn delete_buffer(&self, buffer: RawHandle) {
        self.record(Call::DeleteBuffer(buffer.get()));
    }

    fn create_vertex_array(&self) -> Result<RawHandle, String> {
        let handle = self.allocate()?;
        self.record(Call::CreateVertexArray(handle.get()));
        Ok(handle)
    }

    fn bind_vertex_array(&self, vertex_array: Option<RawHandle>) {
        self.record(Call::BindVertexArray(vertex_array.map(NonZeroU32::get)));
    }

    fn vertex_attrib_pointer(&self, attribute: &VertexAttribute, stride: i32) {
        self.record(Call::VertexAttribPointer {
            location: attribute.location,
            components: attribute.components,
            offset: attribute.offset,
            stride,
        });
    }

    fn enable_vertex_attrib_array(&self, location: u32) {
        self.record(Call::EnableVertexAttribArray(location));
    }

    fn delete_vertex_array(&self, vertex_array: RawHandle) {
        self.record(Call::DeleteVertexArray(vertex_array.get()));
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<RawHandle, String> {
        let handle = self.allocate()?;
        self.record(Call::CreateShader(handle.get(), stage));
        Ok(handle)
    }

    fn compile_shader(&self, shader: RawHandle, _source: &str) -> Result<(), String> {
        self.record(Call::CompileShader(shader.get()));
        match self.compile_error.borrow().as_ref() {
            Some(log) => Err(log.clone()),
            None => Ok(()),
        }
    }

    fn delete_shader(&self, shader: RawHandle) {
        self.record(Call::DeleteShader(shader.get()));
    }

    fn create_program(&self) -> Result<RawHandle, String> {
        let handle = self.allocate()?;
        self.record(Call::CreateProgram(handle.get()));
        Ok(handle)
    }

    fn attach_shader(&self, program: RawHandle, shader: RawHandle) {
        self.record(Call::AttachShader(program.get(), shader.get()));
    }

    fn detach_shader(&self, program: RawHandle, shader: RawHandle) {
        self.record(Call::DetachShader(program.get(), shader.get()));
    }

    fn link_program(&self, program: RawHandle) -> Result<(), String> {
        self.record(Call::LinkProgram(program.get()));
        match self.link_error.borrow().as_ref() {
            Some(log) => Err(log.clone()),
            None => Ok(()),
        }
    }

    fn use_program(&self, program: Option<RawHandle>) {
        self.record(Call::UseProgram(program.map(NonZeroU32::get)));
    }

    fn uniform_location(&self, program: RawHandle, name: &str) -> Option<UniformLocation> {
        self.record(Call::UniformLocation(program.get(), name.to_string()));
        if self.inactive_uniforms.borrow().contains(name) {
            return None;
        }
        let mut names = self.uniform_names.borrow_mut();
        let location = names.len() as u32;
        names.insert(location, name.to_string());
        Some(UniformLocation(location))
    }

    fn set_uniform(&self, location: UniformLocation, value: UniformValue) {
        let name = self
            .uniform_names
            .borrow()
            .get(&location.0)
            .cloned()
            .unwrap_or_else(|| format!("<location {}>", location.0));
        self.record(Call::SetUniform(name, value));
    }

    fn delete_program(&self, program: RawHandle) {
        self.record(Call::DeleteProgram(program.get()));
    }

    fn create_texture(&self) -> Result<RawHandle, String> {
        let handle = self.allocate()?;
        self.record(Call::CreateTexture(handle.get()));
        Ok(handle)
    }

    fn active_texture(&self, unit: u32) {
        self.record(Call::ActiveTexture(unit));
    }

    fn bind_texture(&self, texture: Option<RawHandle>) {
        self.record(Call::BindTexture(texture.map(NonZeroU32::get)));
    }

    fn tex_image_2d(&self, width: u32, height: u32, format: PixelFormat, pixels: &[u8]) {
        self.record(Call::TexImage2d {
            width,
            height,
            format,
            bytes: pixels.len(),
        });
    }

    fn tex_parameters(&self, params: &SamplerParams) {
        self.record(Call::TexParameters(*params));
    }

    fn generate_mipmap(&self) {
        self.record(Call::GenerateMipmap);
    }

    fn delete_texture(&self, texture: RawHandle) {
        self.record(Call::DeleteTexture(texture.get()));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn clear(&self, colour: [f32; 4]) {
        self.record(Call::Clear(colour));
    }

    fn set_depth_test(&self, enabled: bool) {
        self.record(Call::DepthTest(enabled));
    }

    fn draw_arrays(&self, mode: PrimitiveMode, first: i32, count: i32) {
        self.record(Call::DrawArrays(mode, first, count));
    }

    fn draw_elements(&self, mode: PrimitiveMode, count: i32) {
        self.record(Call::DrawElements(mode, count));
    }
}
