//! Shader compile / link / validate helpers.
//!
//! Failure handling is explicit: a failed compile or link deletes the
//! half-built object and returns a [`ShaderError`] carrying the driver's
//! info log. Verbose diagnostics (info logs on success, validation) are
//! gated on the `log_diagnostics` flag the renderer threads through from
//! its configuration.

use std::fmt;

use crate::gl::{Gl, ProgramId, ShaderId, ShaderStage};

/// Uniform name for the combined model/view/projection matrix.
pub const U_MVP_MATRIX: &str = "u_MVPMatrix";
/// Uniform name for the model/view matrix.
pub const U_MV_MATRIX: &str = "u_MVMatrix";
/// Uniform name for the light position in eye space.
pub const U_LIGHT_POS: &str = "u_LightPos";
/// Attribute name for vertex positions.
pub const A_POSITION: &str = "a_Position";
/// Attribute name for vertex colors.
pub const A_COLOR: &str = "a_Color";
/// Attribute name for vertex normals.
pub const A_NORMAL: &str = "a_Normal";

/// The four shader sources the scene needs, as resolved text.
#[derive(Debug, Clone)]
pub struct ShaderSet {
    pub cube_vertex: String,
    pub cube_fragment: String,
    pub light_vertex: String,
    pub light_fragment: String,
}

impl ShaderSet {
    /// The sources bundled with the crate.
    pub fn bundled() -> Self {
        Self {
            cube_vertex: crate::assets::VSHADER_PER_FRAGMENT_LIGHTING.to_owned(),
            cube_fragment: crate::assets::FSHADER_PER_FRAGMENT_LIGHTING.to_owned(),
            light_vertex: crate::assets::VSHADER_POINT_LIGHT_SRC.to_owned(),
            light_fragment: crate::assets::FSHADER_POINT_LIGHT_SRC.to_owned(),
        }
    }
}

/// A shader build step failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    /// The driver refused to create an object of the given kind.
    CreateFailed(&'static str),
    /// Compilation failed; `log` is the driver's info log.
    Compile { stage: ShaderStage, log: String },
    /// Linking failed; `log` is the driver's info log.
    Link { log: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::CreateFailed(what) => write!(f, "failed to create {what} object"),
            ShaderError::Compile { stage, log } => {
                let stage = match stage {
                    ShaderStage::Vertex => "vertex",
                    ShaderStage::Fragment => "fragment",
                };
                write!(f, "{stage} shader compilation failed: {log}")
            }
            ShaderError::Link { log } => write!(f, "program link failed: {log}"),
        }
    }
}

impl std::error::Error for ShaderError {}

/// Compiles a vertex shader from source.
pub fn compile_vertex_shader(
    gl: &dyn Gl,
    source: &str,
    log_diagnostics: bool,
) -> Result<ShaderId, ShaderError> {
    compile_shader(gl, ShaderStage::Vertex, source, log_diagnostics)
}

/// Compiles a fragment shader from source.
pub fn compile_fragment_shader(
    gl: &dyn Gl,
    source: &str,
    log_diagnostics: bool,
) -> Result<ShaderId, ShaderError> {
    compile_shader(gl, ShaderStage::Fragment, source, log_diagnostics)
}

fn compile_shader(
    gl: &dyn Gl,
    stage: ShaderStage,
    source: &str,
    log_diagnostics: bool,
) -> Result<ShaderId, ShaderError> {
    let shader = gl
        .create_shader(stage)
        .ok_or(ShaderError::CreateFailed("shader"))?;

    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if log_diagnostics {
        log::debug!("compile status for {stage:?} shader: {}", gl.shader_info_log(shader));
    }

    if !gl.shader_compile_ok(shader) {
        let info_log = gl.shader_info_log(shader);
        gl.delete_shader(shader);
        log::warn!("{stage:?} shader compilation failed: {info_log}");
        return Err(ShaderError::Compile { stage, log: info_log });
    }

    Ok(shader)
}

/// Links two compiled shaders into a program.
pub fn link_program(
    gl: &dyn Gl,
    vertex: ShaderId,
    fragment: ShaderId,
    log_diagnostics: bool,
) -> Result<ProgramId, ShaderError> {
    let program = gl
        .create_program()
        .ok_or(ShaderError::CreateFailed("program"))?;

    gl.attach_shader(program, vertex);
    gl.attach_shader(program, fragment);
    gl.link_program(program);

    if log_diagnostics {
        log::debug!("link result: {}", gl.program_info_log(program));
    }

    if !gl.program_link_ok(program) {
        let info_log = gl.program_info_log(program);
        gl.delete_program(program);
        log::warn!("program link failed: {info_log}");
        return Err(ShaderError::Link { log: info_log });
    }

    Ok(program)
}

/// Runs driver-side validation and reports the result. Diagnostic only.
pub fn validate_program(gl: &dyn Gl, program: ProgramId) -> bool {
    let valid = gl.validate_program(program);
    log::debug!(
        "program validation: {valid}, log: {}",
        gl.program_info_log(program)
    );
    valid
}

/// Compiles both stages and links them, then deletes the shader objects —
/// once linked, the program is the only handle the renderer keeps.
pub fn build_program(
    gl: &dyn Gl,
    vertex_source: &str,
    fragment_source: &str,
    log_diagnostics: bool,
) -> Result<ProgramId, ShaderError> {
    let vertex = compile_vertex_shader(gl, vertex_source, log_diagnostics)?;
    let fragment = match compile_fragment_shader(gl, fragment_source, log_diagnostics) {
        Ok(fragment) => fragment,
        Err(err) => {
            gl.delete_shader(vertex);
            return Err(err);
        }
    };

    let program = match link_program(gl, vertex, fragment, log_diagnostics) {
        Ok(program) => program,
        Err(err) => {
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);
            return Err(err);
        }
    };

    gl.delete_shader(vertex);
    gl.delete_shader(fragment);
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl::trace::{GlCall, TraceGl};

    #[test]
    fn build_program_compiles_links_and_frees_shaders() {
        let gl = TraceGl::new();
        let program = build_program(&gl, "void main() {}", "void main() {}", false).unwrap();

        assert_eq!(gl.count(|c| matches!(c, GlCall::CreateShader(_))), 2);
        assert_eq!(gl.count(|c| matches!(c, GlCall::LinkProgram(p) if *p == program)), 1);
        // Both shader objects are deleted once the program links.
        assert_eq!(gl.count(|c| matches!(c, GlCall::DeleteShader(_))), 2);
        assert_eq!(gl.count(|c| matches!(c, GlCall::DeleteProgram(_))), 0);
    }

    #[test]
    fn compile_failure_deletes_the_shader_and_reports_the_log() {
        let gl = TraceGl::new();
        gl.inject_compile_failure();

        let err = compile_vertex_shader(&gl, "nonsense", false).unwrap_err();
        match err {
            ShaderError::Compile { stage, log } => {
                assert_eq!(stage, ShaderStage::Vertex);
                assert!(!log.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(gl.count(|c| matches!(c, GlCall::DeleteShader(_))), 1);
    }

    #[test]
    fn link_failure_deletes_the_program() {
        let gl = TraceGl::new();
        let vertex = compile_vertex_shader(&gl, "void main() {}", false).unwrap();
        let fragment = compile_fragment_shader(&gl, "void main() {}", false).unwrap();
        gl.inject_link_failure();

        let err = link_program(&gl, vertex, fragment, false).unwrap_err();
        assert!(matches!(err, ShaderError::Link { .. }));
        assert_eq!(gl.count(|c| matches!(c, GlCall::DeleteProgram(_))), 1);
    }

    #[test]
    fn build_program_cleans_up_after_a_link_failure() {
        let gl = TraceGl::new();
        gl.inject_link_failure();

        build_program(&gl, "void main() {}", "void main() {}", false).unwrap_err();
        // Both compiled shaders and the dead program are released.
        assert_eq!(gl.count(|c| matches!(c, GlCall::DeleteShader(_))), 2);
        assert_eq!(gl.count(|c| matches!(c, GlCall::DeleteProgram(_))), 1);
    }

    #[test]
    fn validate_program_reports_the_driver_status() {
        let gl = TraceGl::new();
        let program = build_program(&gl, "void main() {}", "void main() {}", false).unwrap();
        assert!(validate_program(&gl, program));

        gl.inject_validate_failure();
        assert!(!validate_program(&gl, program));
    }

    #[test]
    fn bundled_sources_carry_the_shader_contract_names() {
        let set = ShaderSet::bundled();
        for name in [U_MVP_MATRIX, U_MV_MATRIX, A_POSITION, A_COLOR, A_NORMAL] {
            assert!(set.cube_vertex.contains(name), "cube vertex shader missing {name}");
        }
        assert!(set.cube_fragment.contains(U_LIGHT_POS));
        assert!(set.light_vertex.contains(U_MVP_MATRIX));
        assert!(set.light_vertex.contains(A_POSITION));
    }
}
