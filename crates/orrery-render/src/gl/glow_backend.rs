//! [`Gl`] implementation over a real context via [`glow`].
//!
//! glow does not expose client-memory attribute pointers (they do not exist
//! on WebGL), so each client array handed to `vertex_attrib_pointer` is
//! streamed through a lazily created per-attribute buffer object instead.
//! Core profiles additionally refuse attribute setup without a bound vertex
//! array object, so one is created and bound for the lifetime of the
//! context when the driver supports it.

use std::cell::RefCell;
use std::collections::HashMap;

use glow::HasContext;

use super::{
    AttribLoc, Capability, ClearMask, Gl, PrimitiveMode, ProgramId, ShaderId, ShaderStage,
    UniformLoc,
};

/// Owns a `glow::Context` and adapts it to the [`Gl`] facade.
///
/// Must be created, used, and dropped on the thread where the underlying
/// context is current.
pub struct GlowContext {
    gl: glow::Context,
    /// Streaming buffer per attribute index, created on first use.
    stream_buffers: RefCell<HashMap<u32, glow::NativeBuffer>>,
}

impl GlowContext {
    pub fn new(gl: glow::Context) -> Self {
        unsafe {
            if let Ok(vao) = gl.create_vertex_array() {
                gl.bind_vertex_array(Some(vao));
            }
        }
        Self {
            gl,
            stream_buffers: RefCell::new(HashMap::new()),
        }
    }

    /// Access to the underlying context for host-side queries.
    pub fn raw(&self) -> &glow::Context {
        &self.gl
    }

    fn stream_buffer_for(&self, index: u32) -> Option<glow::NativeBuffer> {
        let mut buffers = self.stream_buffers.borrow_mut();
        if let Some(buf) = buffers.get(&index) {
            return Some(*buf);
        }
        match unsafe { self.gl.create_buffer() } {
            Ok(buf) => {
                buffers.insert(index, buf);
                Some(buf)
            }
            Err(err) => {
                log::error!("failed to create stream buffer for attribute {index}: {err}");
                None
            }
        }
    }
}

fn stage_to_gl(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

fn cap_to_gl(cap: Capability) -> u32 {
    match cap {
        Capability::CullFace => glow::CULL_FACE,
        Capability::DepthTest => glow::DEPTH_TEST,
    }
}

fn mode_to_gl(mode: PrimitiveMode) -> u32 {
    match mode {
        PrimitiveMode::Triangles => glow::TRIANGLES,
        PrimitiveMode::Points => glow::POINTS,
    }
}

fn native_shader(shader: ShaderId) -> glow::NativeShader {
    glow::NativeShader(shader.0)
}

fn native_program(program: ProgramId) -> glow::NativeProgram {
    glow::NativeProgram(program.0)
}

impl Gl for GlowContext {
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { self.gl.clear_color(r, g, b, a) }
    }

    fn enable(&self, cap: Capability) {
        unsafe { self.gl.enable(cap_to_gl(cap)) }
    }

    fn clear(&self, mask: ClearMask) {
        let mut bits = 0;
        if mask.contains(ClearMask::COLOR) {
            bits |= glow::COLOR_BUFFER_BIT;
        }
        if mask.contains(ClearMask::DEPTH) {
            bits |= glow::DEPTH_BUFFER_BIT;
        }
        unsafe { self.gl.clear(bits) }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) }
    }

    fn create_shader(&self, stage: ShaderStage) -> Option<ShaderId> {
        match unsafe { self.gl.create_shader(stage_to_gl(stage)) } {
            Ok(shader) => Some(ShaderId(shader.0)),
            Err(err) => {
                log::error!("glCreateShader failed: {err}");
                None
            }
        }
    }

    fn shader_source(&self, shader: ShaderId, source: &str) {
        unsafe { self.gl.shader_source(native_shader(shader), source) }
    }

    fn compile_shader(&self, shader: ShaderId) {
        unsafe { self.gl.compile_shader(native_shader(shader)) }
    }

    fn shader_compile_ok(&self, shader: ShaderId) -> bool {
        unsafe { self.gl.get_shader_compile_status(native_shader(shader)) }
    }

    fn shader_info_log(&self, shader: ShaderId) -> String {
        unsafe { self.gl.get_shader_info_log(native_shader(shader)) }
    }

    fn delete_shader(&self, shader: ShaderId) {
        unsafe { self.gl.delete_shader(native_shader(shader)) }
    }

    fn create_program(&self) -> Option<ProgramId> {
        match unsafe { self.gl.create_program() } {
            Ok(program) => Some(ProgramId(program.0)),
            Err(err) => {
                log::error!("glCreateProgram failed: {err}");
                None
            }
        }
    }

    fn attach_shader(&self, program: ProgramId, shader: ShaderId) {
        unsafe { self.gl.attach_shader(native_program(program), native_shader(shader)) }
    }

    fn link_program(&self, program: ProgramId) {
        unsafe { self.gl.link_program(native_program(program)) }
    }

    fn program_link_ok(&self, program: ProgramId) -> bool {
        unsafe { self.gl.get_program_link_status(native_program(program)) }
    }

    fn program_info_log(&self, program: ProgramId) -> String {
        unsafe { self.gl.get_program_info_log(native_program(program)) }
    }

    fn validate_program(&self, program: ProgramId) -> bool {
        unsafe {
            let program = native_program(program);
            self.gl.validate_program(program);
            self.gl.get_program_parameter_i32(program, glow::VALIDATE_STATUS) != 0
        }
    }

    fn delete_program(&self, program: ProgramId) {
        unsafe { self.gl.delete_program(native_program(program)) }
    }

    fn use_program(&self, program: ProgramId) {
        unsafe { self.gl.use_program(Some(native_program(program))) }
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLoc> {
        unsafe { self.gl.get_uniform_location(native_program(program), name) }
            .map(|loc| UniformLoc(loc.0))
    }

    fn attrib_location(&self, program: ProgramId, name: &str) -> Option<AttribLoc> {
        unsafe { self.gl.get_attrib_location(native_program(program), name) }.map(AttribLoc)
    }

    fn uniform_matrix4(&self, loc: Option<&UniformLoc>, value: &[f32; 16]) {
        let loc = loc.map(|l| glow::NativeUniformLocation(l.0));
        unsafe {
            self.gl.uniform_matrix_4_f32_slice(loc.as_ref(), false, value);
        }
    }

    fn uniform3(&self, loc: Option<&UniformLoc>, x: f32, y: f32, z: f32) {
        let loc = loc.map(|l| glow::NativeUniformLocation(l.0));
        unsafe {
            self.gl.uniform_3_f32(loc.as_ref(), x, y, z);
        }
    }

    fn vertex_attrib_pointer(&self, loc: Option<&AttribLoc>, size: i32, data: &[f32]) {
        let Some(loc) = loc else { return };
        let Some(buffer) = self.stream_buffer_for(loc.0) else { return };
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            self.gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(data),
                glow::STREAM_DRAW,
            );
            self.gl.vertex_attrib_pointer_f32(loc.0, size, glow::FLOAT, false, 0, 0);
        }
    }

    fn enable_vertex_attrib_array(&self, loc: Option<&AttribLoc>) {
        let Some(loc) = loc else { return };
        unsafe { self.gl.enable_vertex_attrib_array(loc.0) }
    }

    fn disable_vertex_attrib_array(&self, loc: Option<&AttribLoc>) {
        let Some(loc) = loc else { return };
        unsafe { self.gl.disable_vertex_attrib_array(loc.0) }
    }

    fn vertex_attrib3(&self, loc: Option<&AttribLoc>, x: f32, y: f32, z: f32) {
        let Some(loc) = loc else { return };
        unsafe { self.gl.vertex_attrib_3_f32(loc.0, x, y, z) }
    }

    fn draw_arrays(&self, mode: PrimitiveMode, first: i32, count: i32) {
        unsafe { self.gl.draw_arrays(mode_to_gl(mode), first, count) }
    }
}
