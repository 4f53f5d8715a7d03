//! Recording [`Gl`] backend.
//!
//! `TraceGl` appends one [`GlCall`] per issued call and hands out object
//! ids and locations deterministically, so a frame drawn twice against the
//! same state produces byte-identical traces. Failure injection covers the
//! compile/link/missing-location paths without a real driver.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::num::NonZeroU32;

use super::{
    AttribLoc, Capability, ClearMask, Gl, PrimitiveMode, ProgramId, ShaderId, ShaderStage,
    UniformLoc,
};

/// One recorded facade call.
///
/// Bulk payloads are summarized (source/array lengths) — the trace exists to
/// check call structure, not to re-upload data.
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    ClearColor { r: f32, g: f32, b: f32, a: f32 },
    Enable(Capability),
    Clear(ClearMask),
    Viewport { x: i32, y: i32, width: i32, height: i32 },

    CreateShader(ShaderStage),
    ShaderSource { shader: ShaderId, source_len: usize },
    CompileShader(ShaderId),
    DeleteShader(ShaderId),

    CreateProgram,
    AttachShader { program: ProgramId, shader: ShaderId },
    LinkProgram(ProgramId),
    ValidateProgram(ProgramId),
    DeleteProgram(ProgramId),
    UseProgram(ProgramId),

    UniformLocation { program: ProgramId, name: String },
    AttribLocation { program: ProgramId, name: String },

    UniformMatrix4 { loc: Option<UniformLoc>, value: [f32; 16] },
    Uniform3 { loc: Option<UniformLoc>, x: f32, y: f32, z: f32 },
    VertexAttribPointer { loc: AttribLoc, size: i32, data_len: usize },
    EnableVertexAttribArray(AttribLoc),
    DisableVertexAttribArray(AttribLoc),
    VertexAttrib3 { loc: AttribLoc, x: f32, y: f32, z: f32 },

    DrawArrays { mode: PrimitiveMode, first: i32, count: i32 },
}

/// Deterministic in-memory GL double.
#[derive(Default)]
pub struct TraceGl {
    calls: RefCell<Vec<GlCall>>,
    next_object: Cell<u32>,
    uniform_locs: RefCell<HashMap<(ProgramId, String), UniformLoc>>,
    attrib_locs: RefCell<HashMap<(ProgramId, String), AttribLoc>>,
    fail_compile: Cell<bool>,
    fail_link: Cell<bool>,
    fail_validate: Cell<bool>,
    hidden_names: RefCell<HashSet<String>>,
}

impl TraceGl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the trace so far.
    pub fn calls(&self) -> Vec<GlCall> {
        self.calls.borrow().clone()
    }

    /// Drops the trace so far; injected failures stay in effect.
    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Counts recorded calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&GlCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    /// Makes every subsequent shader compile report failure.
    pub fn inject_compile_failure(&self) {
        self.fail_compile.set(true);
    }

    /// Makes every subsequent program link report failure.
    pub fn inject_link_failure(&self) {
        self.fail_link.set(true);
    }

    /// Makes `validate_program` report failure.
    pub fn inject_validate_failure(&self) {
        self.fail_validate.set(true);
    }

    /// Makes location lookups for `name` return `None`.
    pub fn hide_name(&self, name: &str) {
        self.hidden_names.borrow_mut().insert(name.to_owned());
    }

    fn record(&self, call: GlCall) {
        self.calls.borrow_mut().push(call);
    }

    fn alloc_object(&self) -> NonZeroU32 {
        let id = self.next_object.get() + 1;
        self.next_object.set(id);
        NonZeroU32::new(id).unwrap()
    }
}

impl Gl for TraceGl {
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(GlCall::ClearColor { r, g, b, a });
    }

    fn enable(&self, cap: Capability) {
        self.record(GlCall::Enable(cap));
    }

    fn clear(&self, mask: ClearMask) {
        self.record(GlCall::Clear(mask));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(GlCall::Viewport { x, y, width, height });
    }

    fn create_shader(&self, stage: ShaderStage) -> Option<ShaderId> {
        self.record(GlCall::CreateShader(stage));
        Some(ShaderId(self.alloc_object()))
    }

    fn shader_source(&self, shader: ShaderId, source: &str) {
        self.record(GlCall::ShaderSource { shader, source_len: source.len() });
    }

    fn compile_shader(&self, shader: ShaderId) {
        self.record(GlCall::CompileShader(shader));
    }

    fn shader_compile_ok(&self, _shader: ShaderId) -> bool {
        !self.fail_compile.get()
    }

    fn shader_info_log(&self, _shader: ShaderId) -> String {
        if self.fail_compile.get() {
            "injected compile failure".to_owned()
        } else {
            String::new()
        }
    }

    fn delete_shader(&self, shader: ShaderId) {
        self.record(GlCall::DeleteShader(shader));
    }

    fn create_program(&self) -> Option<ProgramId> {
        self.record(GlCall::CreateProgram);
        Some(ProgramId(self.alloc_object()))
    }

    fn attach_shader(&self, program: ProgramId, shader: ShaderId) {
        self.record(GlCall::AttachShader { program, shader });
    }

    fn link_program(&self, program: ProgramId) {
        self.record(GlCall::LinkProgram(program));
    }

    fn program_link_ok(&self, _program: ProgramId) -> bool {
        !self.fail_link.get()
    }

    fn program_info_log(&self, _program: ProgramId) -> String {
        if self.fail_link.get() {
            "injected link failure".to_owned()
        } else {
            String::new()
        }
    }

    fn validate_program(&self, program: ProgramId) -> bool {
        self.record(GlCall::ValidateProgram(program));
        !self.fail_validate.get()
    }

    fn delete_program(&self, program: ProgramId) {
        self.record(GlCall::DeleteProgram(program));
    }

    fn use_program(&self, program: ProgramId) {
        self.record(GlCall::UseProgram(program));
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLoc> {
        self.record(GlCall::UniformLocation { program, name: name.to_owned() });
        if self.hidden_names.borrow().contains(name) {
            return None;
        }
        let mut locs = self.uniform_locs.borrow_mut();
        let next = UniformLoc(locs.len() as u32);
        Some(*locs.entry((program, name.to_owned())).or_insert(next))
    }

    fn attrib_location(&self, program: ProgramId, name: &str) -> Option<AttribLoc> {
        self.record(GlCall::AttribLocation { program, name: name.to_owned() });
        if self.hidden_names.borrow().contains(name) {
            return None;
        }
        let mut locs = self.attrib_locs.borrow_mut();
        let next = AttribLoc(locs.len() as u32);
        Some(*locs.entry((program, name.to_owned())).or_insert(next))
    }

    fn uniform_matrix4(&self, loc: Option<&UniformLoc>, value: &[f32; 16]) {
        self.record(GlCall::UniformMatrix4 { loc: loc.copied(), value: *value });
    }

    fn uniform3(&self, loc: Option<&UniformLoc>, x: f32, y: f32, z: f32) {
        self.record(GlCall::Uniform3 { loc: loc.copied(), x, y, z });
    }

    fn vertex_attrib_pointer(&self, loc: Option<&AttribLoc>, size: i32, data: &[f32]) {
        let Some(loc) = loc else { return };
        self.record(GlCall::VertexAttribPointer { loc: *loc, size, data_len: data.len() });
    }

    fn enable_vertex_attrib_array(&self, loc: Option<&AttribLoc>) {
        let Some(loc) = loc else { return };
        self.record(GlCall::EnableVertexAttribArray(*loc));
    }

    fn disable_vertex_attrib_array(&self, loc: Option<&AttribLoc>) {
        let Some(loc) = loc else { return };
        self.record(GlCall::DisableVertexAttribArray(*loc));
    }

    fn vertex_attrib3(&self, loc: Option<&AttribLoc>, x: f32, y: f32, z: f32) {
        let Some(loc) = loc else { return };
        self.record(GlCall::VertexAttrib3 { loc: *loc, x, y, z });
    }

    fn draw_arrays(&self, mode: PrimitiveMode, first: i32, count: i32) {
        self.record(GlCall::DrawArrays { mode, first, count });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_ids_are_sequential_and_nonzero() {
        let gl = TraceGl::new();
        let s = gl.create_shader(ShaderStage::Vertex).unwrap();
        let p = gl.create_program().unwrap();
        assert_eq!(s.0.get(), 1);
        assert_eq!(p.0.get(), 2);
    }

    #[test]
    fn repeated_lookups_return_the_same_location() {
        let gl = TraceGl::new();
        let p = gl.create_program().unwrap();
        let a = gl.uniform_location(p, "u_MVPMatrix");
        let b = gl.uniform_location(p, "u_MVPMatrix");
        assert_eq!(a, b);
        assert_ne!(a, gl.uniform_location(p, "u_MVMatrix"));
    }

    #[test]
    fn hidden_names_resolve_to_none() {
        let gl = TraceGl::new();
        let p = gl.create_program().unwrap();
        gl.hide_name("u_LightPos");
        assert_eq!(gl.uniform_location(p, "u_LightPos"), None);
        assert!(gl.uniform_location(p, "u_MVMatrix").is_some());
    }

    #[test]
    fn attribute_calls_without_location_are_dropped() {
        let gl = TraceGl::new();
        gl.vertex_attrib_pointer(None, 3, &[0.0; 9]);
        gl.enable_vertex_attrib_array(None);
        assert!(gl.calls().is_empty());
    }
}
