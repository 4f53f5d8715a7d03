//! GL ES 2 facade.
//!
//! The renderer never talks to a GL binding directly; it issues calls
//! through the [`Gl`] trait, which covers exactly the subset of GL ES 2.0
//! the scene needs. The host hands the renderer whichever implementation
//! matches its context:
//! - [`glow_backend::GlowContext`] for a real context loaded via `glow`
//! - [`trace::TraceGl`] for deterministic call recording in tests
//!
//! Convention: location lookups return `None` for names the linker did not
//! expose, and every location-taking call is a no-op on `None` — the same
//! silent degradation GL specifies for location `-1`.

pub mod glow_backend;
pub mod trace;

use std::num::NonZeroU32;

/// Shader object handle. Nonzero by construction; a failed create is `None`
/// at the [`Gl::create_shader`] call site.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ShaderId(pub NonZeroU32);

/// Program object handle. Nonzero by construction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ProgramId(pub NonZeroU32);

/// Uniform location within a linked program.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct UniformLoc(pub u32);

/// Vertex attribute location within a linked program.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct AttribLoc(pub u32);

/// Shader pipeline stage.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// Server-side capabilities the renderer toggles.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Capability {
    CullFace,
    DepthTest,
}

/// Primitive topology for draw calls.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PrimitiveMode {
    Triangles,
    Points,
}

/// Buffer-clear selection, combinable with `|`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ClearMask(u32);

impl ClearMask {
    pub const COLOR: ClearMask = ClearMask(1);
    pub const DEPTH: ClearMask = ClearMask(1 << 1);

    #[inline]
    pub fn contains(self, other: ClearMask) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for ClearMask {
    type Output = ClearMask;

    #[inline]
    fn bitor(self, rhs: ClearMask) -> ClearMask {
        ClearMask(self.0 | rhs.0)
    }
}

/// The GL ES 2.0 subset the scene renderer draws through.
///
/// All calls must be issued on the thread where the underlying context is
/// current; the trait itself carries no synchronization.
pub trait Gl {
    // ── framebuffer / fixed state ─────────────────────────────────────────

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    fn enable(&self, cap: Capability);
    fn clear(&self, mask: ClearMask);
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);

    // ── shader objects ────────────────────────────────────────────────────

    fn create_shader(&self, stage: ShaderStage) -> Option<ShaderId>;
    fn shader_source(&self, shader: ShaderId, source: &str);
    fn compile_shader(&self, shader: ShaderId);
    fn shader_compile_ok(&self, shader: ShaderId) -> bool;
    fn shader_info_log(&self, shader: ShaderId) -> String;
    fn delete_shader(&self, shader: ShaderId);

    // ── program objects ───────────────────────────────────────────────────

    fn create_program(&self) -> Option<ProgramId>;
    fn attach_shader(&self, program: ProgramId, shader: ShaderId);
    fn link_program(&self, program: ProgramId);
    fn program_link_ok(&self, program: ProgramId) -> bool;
    fn program_info_log(&self, program: ProgramId) -> String;
    /// Runs `glValidateProgram` and returns the validate status.
    fn validate_program(&self, program: ProgramId) -> bool;
    fn delete_program(&self, program: ProgramId);
    fn use_program(&self, program: ProgramId);

    // ── location lookup (from the given program) ──────────────────────────

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLoc>;
    fn attrib_location(&self, program: ProgramId, name: &str) -> Option<AttribLoc>;

    // ── uniform / attribute data ──────────────────────────────────────────

    /// Uploads a column-major 4×4 matrix. No-op on `None`.
    fn uniform_matrix4(&self, loc: Option<&UniformLoc>, value: &[f32; 16]);
    fn uniform3(&self, loc: Option<&UniformLoc>, x: f32, y: f32, z: f32);

    /// Binds a tightly packed client-memory float array to the attribute:
    /// stride 0, float components, not normalized. No-op on `None`.
    fn vertex_attrib_pointer(&self, loc: Option<&AttribLoc>, size: i32, data: &[f32]);
    fn enable_vertex_attrib_array(&self, loc: Option<&AttribLoc>);
    fn disable_vertex_attrib_array(&self, loc: Option<&AttribLoc>);
    /// Supplies a constant attribute value in place of an array.
    fn vertex_attrib3(&self, loc: Option<&AttribLoc>, x: f32, y: f32, z: f32);

    // ── draws ─────────────────────────────────────────────────────────────

    fn draw_arrays(&self, mode: PrimitiveMode, first: i32, count: i32);
}
