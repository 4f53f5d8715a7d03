//! Orrery render crate.
//!
//! Renders the animated lit-cubes scene — five spinning cubes lit by an
//! orbiting point light — against any current GL ES 2.0 context. The host
//! owns the surface and the render thread; this crate owns the shader
//! programs, the geometry streams, and the per-frame transform pipeline,
//! driven through the [`renderer::SurfaceRenderer`] callbacks.

pub mod assets;
pub mod geometry;
pub mod gl;
pub mod math;
pub mod renderer;
pub mod resource;
pub mod scene;
pub mod shader;
pub mod time;

pub use geometry::{CubeGeometry, GeometryError};
pub use gl::Gl;
pub use renderer::{RendererConfig, SceneRenderer, SurfaceRenderer};
pub use shader::{ShaderError, ShaderSet};
pub use time::{Clock, ManualClock, SystemClock};
