//! Bundled scene assets.
//!
//! The shader sources and geometry blobs ship inside the crate so a host
//! can run the scene without resolving resources itself; a host with its
//! own resource pipeline can pass different blobs instead.

/// Vertex shader for the lit cubes (per-fragment lighting).
pub const VSHADER_PER_FRAGMENT_LIGHTING: &str =
    include_str!("../../assets/vshader_perfragmentlighting.glsl");

/// Fragment shader for the lit cubes.
pub const FSHADER_PER_FRAGMENT_LIGHTING: &str =
    include_str!("../../assets/fshader_perfragmentlighting.glsl");

/// Vertex shader for the light-point sprite.
pub const VSHADER_POINT_LIGHT_SRC: &str = include_str!("../../assets/vshader_pointlightsrc.glsl");

/// Fragment shader for the light-point sprite.
pub const FSHADER_POINT_LIGHT_SRC: &str = include_str!("../../assets/fshader_pointlightsrc.glsl");

/// Cube vertex positions in float-list form (36 × 3).
pub const CUBE_VERTEXES: &str = include_str!("../../assets/cube_vertexes.txt");

/// Cube vertex colors in float-list form (36 × 4).
pub const CUBE_COLORS: &str = include_str!("../../assets/cube_colors.txt");

/// Cube vertex normals in float-list form (36 × 3).
pub const CUBE_NORMALS: &str = include_str!("../../assets/cube_normals.txt");
