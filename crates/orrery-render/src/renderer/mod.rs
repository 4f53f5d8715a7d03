//! The scene renderer.
//!
//! `SceneRenderer` owns the GPU programs and the client-side vertex
//! streams, and implements the three surface callbacks a host drives. All
//! calls happen on the host's render thread with the GL context current;
//! the renderer spawns nothing and shares nothing.
//!
//! Per frame: sample the clock once, orbit the light, draw the five cubes
//! with the lit-surface program, then mark the light with a point sprite.

use glam::{Mat4, Vec3, Vec4};

use crate::geometry::{
    COLOR_COMPONENTS, CUBE_VERTEX_COUNT, CubeGeometry, NORMAL_COMPONENTS, POSITION_COMPONENTS,
};
use crate::gl::{AttribLoc, Capability, ClearMask, Gl, PrimitiveMode, ProgramId, UniformLoc};
use crate::math;
use crate::scene::{self, CUBES, LIGHT_POS_IN_MODEL_SPACE, SceneAngles};
use crate::shader::{self, ShaderSet};
use crate::time::Clock;

/// The contract the host calls on its render thread.
///
/// The host owns surface creation, the event loop, and pause/resume; the
/// renderer only reacts. Callbacks must not overlap, and after
/// `on_surface_destroyed` no further GL work happens until the surface is
/// created again.
pub trait SurfaceRenderer {
    /// The GL context is current; GPU objects may be created.
    fn on_surface_created(&mut self, gl: &dyn Gl);

    /// The surface has a new pixel size; both dimensions are positive.
    fn on_surface_changed(&mut self, gl: &dyn Gl, width: u32, height: u32);

    /// Draw exactly one frame, assuming no GL state beyond what it sets.
    fn on_draw_frame(&mut self, gl: &dyn Gl);

    /// The surface is about to go away; release GPU objects while the
    /// context is still current.
    fn on_surface_destroyed(&mut self, gl: &dyn Gl);
}

/// Renderer construction options.
#[derive(Debug, Clone, Default)]
pub struct RendererConfig {
    /// Emit verbose shader diagnostics (info logs, program validation).
    pub log_diagnostics: bool,
}

const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.25, 0.0];

// The eye sits slightly in front of the origin and looks into the scene.
const EYE: Vec3 = Vec3::new(0.0, 0.0, -0.5);
const LOOK_CENTER: Vec3 = Vec3::new(0.0, 0.0, -5.0);
const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

const FRUSTUM_NEAR: f32 = 1.0;
const FRUSTUM_FAR: f32 = 10.0;

#[derive(Debug, Copy, Clone)]
struct ScenePrograms {
    cube: ProgramId,
    light: ProgramId,
}

/// Locations of the cube program's inputs, looked up each frame from the
/// program that is currently in use.
struct CubeLocations {
    mvp: Option<UniformLoc>,
    mv: Option<UniformLoc>,
    light_pos: Option<UniformLoc>,
    position: Option<AttribLoc>,
    color: Option<AttribLoc>,
    normal: Option<AttribLoc>,
}

impl CubeLocations {
    fn query(gl: &dyn Gl, program: ProgramId) -> Self {
        Self {
            mvp: gl.uniform_location(program, shader::U_MVP_MATRIX),
            mv: gl.uniform_location(program, shader::U_MV_MATRIX),
            light_pos: gl.uniform_location(program, shader::U_LIGHT_POS),
            position: gl.attrib_location(program, shader::A_POSITION),
            color: gl.attrib_location(program, shader::A_COLOR),
            normal: gl.attrib_location(program, shader::A_NORMAL),
        }
    }
}

/// Renders the animated lit-cubes scene through the [`Gl`] facade.
pub struct SceneRenderer {
    geometry: CubeGeometry,
    shaders: ShaderSet,
    config: RendererConfig,
    clock: Box<dyn Clock>,
    view: Mat4,
    projection: Option<Mat4>,
    programs: Option<ScenePrograms>,
    skip_logged: bool,
}

impl SceneRenderer {
    pub fn new(
        geometry: CubeGeometry,
        shaders: ShaderSet,
        config: RendererConfig,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            geometry,
            shaders,
            config,
            clock,
            view: Mat4::IDENTITY,
            projection: None,
            programs: None,
            skip_logged: false,
        }
    }

    /// Convenience constructor for hosts without their own time source.
    pub fn with_system_clock(
        geometry: CubeGeometry,
        shaders: ShaderSet,
        config: RendererConfig,
    ) -> Self {
        Self::new(geometry, shaders, config, Box::new(crate::time::SystemClock::new()))
    }

    /// View matrix established at surface creation.
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    /// Projection matrix from the most recent resize, if any.
    pub fn projection_matrix(&self) -> Option<Mat4> {
        self.projection
    }

    fn draw_cube(
        &self,
        gl: &dyn Gl,
        locations: &CubeLocations,
        projection: Mat4,
        model: Mat4,
        light_pos_eye: Vec4,
    ) {
        gl.vertex_attrib_pointer(
            locations.position.as_ref(),
            POSITION_COMPONENTS as i32,
            self.geometry.positions(),
        );
        gl.enable_vertex_attrib_array(locations.position.as_ref());

        gl.vertex_attrib_pointer(
            locations.color.as_ref(),
            COLOR_COMPONENTS as i32,
            self.geometry.colors(),
        );
        gl.enable_vertex_attrib_array(locations.color.as_ref());

        gl.vertex_attrib_pointer(
            locations.normal.as_ref(),
            NORMAL_COMPONENTS as i32,
            self.geometry.normals(),
        );
        gl.enable_vertex_attrib_array(locations.normal.as_ref());

        // Lighting runs in eye space, so the shader needs MV on its own in
        // addition to the combined MVP.
        let model_view = self.view * model;
        gl.uniform_matrix4(locations.mv.as_ref(), &model_view.to_cols_array());

        let model_view_projection = projection * model_view;
        gl.uniform_matrix4(locations.mvp.as_ref(), &model_view_projection.to_cols_array());

        gl.uniform3(
            locations.light_pos.as_ref(),
            light_pos_eye.x,
            light_pos_eye.y,
            light_pos_eye.z,
        );

        gl.draw_arrays(PrimitiveMode::Triangles, 0, CUBE_VERTEX_COUNT as i32);
    }

    fn draw_light(&self, gl: &dyn Gl, program: ProgramId, projection: Mat4, light_model: Mat4) {
        let mvp = gl.uniform_location(program, shader::U_MVP_MATRIX);
        let position = gl.attrib_location(program, shader::A_POSITION);

        // The single point comes in as a constant attribute, not an array.
        gl.vertex_attrib3(
            position.as_ref(),
            LIGHT_POS_IN_MODEL_SPACE.x,
            LIGHT_POS_IN_MODEL_SPACE.y,
            LIGHT_POS_IN_MODEL_SPACE.z,
        );
        gl.disable_vertex_attrib_array(position.as_ref());

        let model_view_projection = projection * (self.view * light_model);
        gl.uniform_matrix4(mvp.as_ref(), &model_view_projection.to_cols_array());

        gl.draw_arrays(PrimitiveMode::Points, 0, 1);
    }
}

impl SurfaceRenderer for SceneRenderer {
    fn on_surface_created(&mut self, gl: &dyn Gl) {
        gl.clear_color(CLEAR_COLOR[0], CLEAR_COLOR[1], CLEAR_COLOR[2], CLEAR_COLOR[3]);
        gl.enable(Capability::CullFace);
        gl.enable(Capability::DepthTest);

        self.view = math::look_at(EYE, LOOK_CENTER, UP);
        self.programs = None;
        self.skip_logged = false;

        let diagnostics = self.config.log_diagnostics;
        let cube = shader::build_program(
            gl,
            &self.shaders.cube_vertex,
            &self.shaders.cube_fragment,
            diagnostics,
        );
        let light = shader::build_program(
            gl,
            &self.shaders.light_vertex,
            &self.shaders.light_fragment,
            diagnostics,
        );

        match (cube, light) {
            (Ok(cube), Ok(light)) => {
                if diagnostics {
                    shader::validate_program(gl, cube);
                    shader::validate_program(gl, light);
                }
                self.programs = Some(ScenePrograms { cube, light });
            }
            (cube, light) => {
                if let Err(err) = &cube {
                    log::error!("cube program build failed: {err}");
                }
                if let Err(err) = &light {
                    log::error!("light program build failed: {err}");
                }
                // One of the pair is unusable; release the survivor.
                if let Ok(program) = cube {
                    gl.delete_program(program);
                }
                if let Ok(program) = light {
                    gl.delete_program(program);
                }
            }
        }
    }

    fn on_surface_changed(&mut self, gl: &dyn Gl, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("ignoring resize to degenerate surface {width}x{height}");
            return;
        }

        gl.viewport(0, 0, width as i32, height as i32);

        // Height stays fixed in clip space; width follows the aspect ratio.
        let ratio = width as f32 / height as f32;
        self.projection = Some(math::frustum(
            -ratio,
            ratio,
            -1.0,
            1.0,
            FRUSTUM_NEAR,
            FRUSTUM_FAR,
        ));
    }

    fn on_draw_frame(&mut self, gl: &dyn Gl) {
        let (Some(programs), Some(projection)) = (self.programs, self.projection) else {
            if !self.skip_logged {
                log::warn!("skipping frame: surface not ready (programs or projection missing)");
                self.skip_logged = true;
            }
            return;
        };

        gl.clear(ClearMask::COLOR | ClearMask::DEPTH);

        let angles = SceneAngles::at(self.clock.now_millis());

        gl.use_program(programs.cube);
        let locations = CubeLocations::query(gl, programs.cube);

        let light_model = scene::light_model_matrix(angles.slow_deg);
        let light_pos_world = light_model * LIGHT_POS_IN_MODEL_SPACE;
        let light_pos_eye = self.view * light_pos_world;

        for spec in &CUBES {
            let model = scene::cube_model_matrix(spec, angles);
            self.draw_cube(gl, &locations, projection, model, light_pos_eye);
        }

        gl.use_program(programs.light);
        self.draw_light(gl, programs.light, projection, light_model);
    }

    fn on_surface_destroyed(&mut self, gl: &dyn Gl) {
        if let Some(programs) = self.programs.take() {
            gl.delete_program(programs.cube);
            gl.delete_program(programs.light);
        }
        self.projection = None;
        self.skip_logged = false;
    }
}
