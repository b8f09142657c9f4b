//! [`GraphicsApi`] over a live OpenGL context.
//!
//! `glow` exposes every entry point as `unsafe` because it cannot know whether
//! the context is current. [`GlowBackend`] is created by the window context right
//! after `make_current` and lives on the same thread, which is the invariant each
//! `unsafe` block below relies on.

use glow::HasContext;

use super::{
    AttributeKind, BufferTarget, BufferUsage, FilterMode, GraphicsApi, PixelFormat,
    PrimitiveMode, RawHandle, SamplerParams, ShaderStage, UniformLocation, UniformValue,
    VertexAttribute, WrapMode,
};

pub struct GlowBackend {
    gl: glow::Context,
}

impl GlowBackend {
    pub fn new(gl: glow::Context) -> Self {
        let backend = Self { gl };
        unsafe {
            log::info!(
                "OpenGL {} ({}, {})",
                backend.gl.get_parameter_string(glow::VERSION),
                backend.gl.get_parameter_string(glow::RENDERER),
                backend.gl.get_parameter_string(glow::VENDOR),
            );
        }
        backend
    }

    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }
}

impl std::fmt::Debug for GlowBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GlowBackend")
    }
}

fn buffer_target(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Vertex => glow::ARRAY_BUFFER,
        BufferTarget::Index => glow::ELEMENT_ARRAY_BUFFER,
    }
}

fn buffer_usage(usage: BufferUsage) -> u32 {
    match usage {
        BufferUsage::Static => glow::STATIC_DRAW,
        BufferUsage::Dynamic => glow::DYNAMIC_DRAW,
        BufferUsage::Stream => glow::STREAM_DRAW,
    }
}

fn primitive_mode(mode: PrimitiveMode) -> u32 {
    match mode {
        PrimitiveMode::Triangles => glow::TRIANGLES,
        PrimitiveMode::Lines => glow::LINES,
        PrimitiveMode::Points => glow::POINTS,
    }
}

fn filter(mode: FilterMode, mipmaps: bool) -> i32 {
    (match (mode, mipmaps) {
        (FilterMode::Nearest, false) => glow::NEAREST,
        (FilterMode::Linear, false) => glow::LINEAR,
        (FilterMode::Nearest, true) => glow::NEAREST_MIPMAP_LINEAR,
        (FilterMode::Linear, true) => glow::LINEAR_MIPMAP_LINEAR,
    }) as i32
}

fn wrap(mode: WrapMode) -> i32 {
    (match mode {
        WrapMode::Repeat => glow::REPEAT,
        WrapMode::ClampToEdge => glow::CLAMP_TO_EDGE,
        WrapMode::MirroredRepeat => glow::MIRRORED_REPEAT,
    }) as i32
}

impl GraphicsApi for GlowBackend {
    fn create_buffer(&self) -> Result<RawHandle, String> {
        unsafe { self.gl.create_buffer().map(|b| b.0) }
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<RawHandle>) {
        unsafe {
            self.gl
                .bind_buffer(buffer_target(target), buffer.map(glow::NativeBuffer))
        }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        unsafe {
            self.gl
                .buffer_data_u8_slice(buffer_target(target), data, buffer_usage(usage))
        }
    }

    fn delete_buffer(&self, buffer: RawHandle) {
        unsafe { self.gl.delete_buffer(glow::NativeBuffer(buffer)) }
    }

    fn create_vertex_array(&self) -> Result<RawHandle, String> {
        unsafe { self.gl.create_vertex_array().map(|v| v.0) }
    }

    fn bind_vertex_array(&self, vertex_array: Option<RawHandle>) {
        unsafe {
            self.gl
                .bind_vertex_array(vertex_array.map(glow::NativeVertexArray))
        }
    }

    fn vertex_attrib_pointer(&self, attribute: &VertexAttribute, stride: i32) {
        let data_type = match attribute.kind {
            AttributeKind::Float => glow::FLOAT,
        };
        unsafe {
            self.gl.vertex_attrib_pointer_f32(
                attribute.location,
                attribute.components,
                data_type,
                attribute.normalized,
                stride,
                attribute.offset,
            )
        }
    }

    fn enable_vertex_attrib_array(&self, location: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(location) }
    }

    fn delete_vertex_array(&self, vertex_array: RawHandle) {
        unsafe {
            self.gl
                .delete_vertex_array(glow::NativeVertexArray(vertex_array))
        }
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<RawHandle, String> {
        let kind = match stage {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        };
        unsafe { self.gl.create_shader(kind).map(|s| s.0) }
    }

    fn compile_shader(&self, shader: RawHandle, source: &str) -> Result<(), String> {
        let shader = glow::NativeShader(shader);
        unsafe {
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);
            if self.gl.get_shader_compile_status(shader) {
                Ok(())
            } else {
                Err(self.gl.get_shader_info_log(shader))
            }
        }
    }

    fn delete_shader(&self, shader: RawHandle) {
        unsafe { self.gl.delete_shader(glow::NativeShader(shader)) }
    }

    fn create_program(&self) -> Result<RawHandle, String> {
        unsafe { self.gl.create_program().map(|p| p.0) }
    }

    fn attach_shader(&self, program: RawHandle, shader: RawHandle) {
        unsafe {
            self.gl
                .attach_shader(glow::NativeProgram(program), glow::NativeShader(shader))
        }
    }

    fn detach_shader(&self, program: RawHandle, shader: RawHandle) {
        unsafe {
            self.gl
                .detach_shader(glow::NativeProgram(program), glow::NativeShader(shader))
        }
    }

    fn link_program(&self, program: RawHandle) -> Result<(), String> {
        let program = glow::NativeProgram(program);
        unsafe {
            self.gl.link_program(program);
            if self.gl.get_program_link_status(program) {
                Ok(())
            } else {
                Err(self.gl.get_program_info_log(program))
            }
        }
    }

    fn use_program(&self, program: Option<RawHandle>) {
        unsafe { self.gl.use_program(program.map(glow::NativeProgram)) }
    }

    fn uniform_location(&self, program: RawHandle, name: &str) -> Option<UniformLocation> {
        unsafe {
            self.gl
                .get_uniform_location(glow::NativeProgram(program), name)
                .map(|location| UniformLocation(location.0))
        }
    }

    fn set_uniform(&self, location: UniformLocation, value: UniformValue) {
        let location = glow::NativeUniformLocation(location.0);
        let location = Some(&location);
        unsafe {
            match value {
                UniformValue::Int(v) => self.gl.uniform_1_i32(location, v),
                UniformValue::Float(v) => self.gl.uniform_1_f32(location, v),
                UniformValue::Vec2([x, y]) => self.gl.uniform_2_f32(location, x, y),
                UniformValue::Vec3([x, y, z]) => self.gl.uniform_3_f32(location, x, y, z),
                UniformValue::Vec4([x, y, z, w]) => self.gl.uniform_4_f32(location, x, y, z, w),
                UniformValue::Mat3(m) => self.gl.uniform_matrix_3_f32_slice(location, false, &m),
                UniformValue::Mat4(m) => self.gl.uniform_matrix_4_f32_slice(location, false, &m),
            }
        }
    }

    fn delete_program(&self, program: RawHandle) {
        unsafe { self.gl.delete_program(glow::NativeProgram(program)) }
    }

    fn create_texture(&self) -> Result<RawHandle, String> {
        unsafe { self.gl.create_texture().map(|t| t.0) }
    }

    fn active_texture(&self, unit: u32) {
        unsafe { self.gl.active_texture(glow::TEXTURE0 + unit) }
    }

    fn bind_texture(&self, texture: Option<RawHandle>) {
        unsafe {
            self.gl
                .bind_texture(glow::TEXTURE_2D, texture.map(glow::NativeTexture))
        }
    }

    fn tex_image_2d(&self, width: u32, height: u32, format: PixelFormat, pixels: &[u8]) {
        let internal_format = match format {
            PixelFormat::Rgba8 => glow::RGBA8,
            PixelFormat::Srgba8 => glow::SRGB8_ALPHA8,
        };
        unsafe {
            self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                internal_format as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(pixels)),
            )
        }
    }

    fn tex_parameters(&self, params: &SamplerParams) {
        unsafe {
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                filter(params.min_filter, params.mipmaps),
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                filter(params.mag_filter, false),
            );
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, wrap(params.wrap));
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, wrap(params.wrap));
        }
    }

    fn generate_mipmap(&self) {
        unsafe { self.gl.generate_mipmap(glow::TEXTURE_2D) }
    }

    fn delete_texture(&self, texture: RawHandle) {
        unsafe { self.gl.delete_texture(glow::NativeTexture(texture)) }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) }
    }

    fn clear(&self, [r, g, b, a]: [f32; 4]) {
        unsafe {
            self.gl.clear_color(r, g, b, a);
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    fn set_depth_test(&self, enabled: bool) {
        unsafe {
            if enabled {
                self.gl.enable(glow::DEPTH_TEST);
                self.gl.depth_func(glow::LESS);
            } else {
                self.gl.disable(glow::DEPTH_TEST);
            }
        }
    }

    fn draw_arrays(&self, mode: PrimitiveMode, first: i32, count: i32) {
        unsafe { self.gl.draw_arrays(primitive_mode(mode), first, count) }
    }

    fn draw_elements(&self, mode: PrimitiveMode, count: i32) {
        unsafe {
            self.gl
                .draw_elements(primitive_mode(mode), count, glow::UNSIGNED_INT, 0)
        }
    }
}
