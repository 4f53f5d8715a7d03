//! Cube geometry streams.
//!
//! Three tightly packed, native-endian float arrays — positions, colors,
//! normals — each attribute in its own array with stride 0, suitable for
//! client-memory `vertexAttribPointer` binding. The streams are immutable
//! for the life of the surface and validated at construction, so a
//! renderer can never hold geometry of the wrong length.

use std::fmt;

use crate::resource::parse_float_list;

/// Vertices per cube: six faces, two triangles each.
pub const CUBE_VERTEX_COUNT: usize = 36;

/// Floats per position vertex.
pub const POSITION_COMPONENTS: usize = 3;

/// Floats per color vertex (rgba).
pub const COLOR_COMPONENTS: usize = 4;

/// Floats per normal vertex.
pub const NORMAL_COMPONENTS: usize = 3;

/// A geometry stream had the wrong number of floats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryError {
    pub stream: &'static str,
    pub expected: usize,
    pub actual: usize,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "geometry stream '{}' has {} floats, expected {}",
            self.stream, self.actual, self.expected
        )
    }
}

impl std::error::Error for GeometryError {}

/// The three vertex streams for one cube.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeGeometry {
    positions: Vec<f32>,
    colors: Vec<f32>,
    normals: Vec<f32>,
}

impl CubeGeometry {
    /// Builds geometry from raw streams, rejecting any stream whose length
    /// is not exactly 36 vertices of its component size.
    pub fn new(
        positions: Vec<f32>,
        colors: Vec<f32>,
        normals: Vec<f32>,
    ) -> Result<Self, GeometryError> {
        check_stream("positions", &positions, POSITION_COMPONENTS)?;
        check_stream("colors", &colors, COLOR_COMPONENTS)?;
        check_stream("normals", &normals, NORMAL_COMPONENTS)?;
        Ok(Self { positions, colors, normals })
    }

    /// Parses the three float-list blobs into geometry.
    ///
    /// Skipped tokens are not fatal to parsing but usually mean the blob is
    /// damaged; they are logged per stream before length validation runs.
    pub fn from_blobs(
        vertexes: &str,
        colors: &str,
        normals: &str,
    ) -> Result<Self, GeometryError> {
        let positions = parse_blob("positions", vertexes);
        let colors = parse_blob("colors", colors);
        let normals = parse_blob("normals", normals);
        Self::new(positions, colors, normals)
    }

    /// Geometry parsed from the blobs bundled with the crate.
    pub fn bundled() -> Result<Self, GeometryError> {
        Self::from_blobs(
            crate::assets::CUBE_VERTEXES,
            crate::assets::CUBE_COLORS,
            crate::assets::CUBE_NORMALS,
        )
    }

    /// The same cube defined inline, without going through the parser.
    pub fn builtin() -> Self {
        Self {
            positions: CUBE_POSITIONS.to_vec(),
            colors: CUBE_COLORS.to_vec(),
            normals: CUBE_NORMALS.to_vec(),
        }
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn normals(&self) -> &[f32] {
        &self.normals
    }
}

fn check_stream(
    stream: &'static str,
    data: &[f32],
    components: usize,
) -> Result<(), GeometryError> {
    let expected = CUBE_VERTEX_COUNT * components;
    if data.len() != expected {
        return Err(GeometryError { stream, expected, actual: data.len() });
    }
    Ok(())
}

fn parse_blob(stream: &str, blob: &str) -> Vec<f32> {
    let parsed = parse_float_list(blob);
    if !parsed.skipped.is_empty() {
        log::warn!(
            "geometry stream '{stream}': skipped {} non-numeric token(s), first: {:?}",
            parsed.skipped.len(),
            parsed.skipped[0]
        );
    }
    parsed.values
}

// Six faces, two CCW triangles each, half-extent 1.
#[rustfmt::skip]
const CUBE_POSITIONS: [f32; CUBE_VERTEX_COUNT * POSITION_COMPONENTS] = [
    // front face (z = +1)
    -1.0,  1.0,  1.0,   -1.0, -1.0,  1.0,    1.0,  1.0,  1.0,
    -1.0, -1.0,  1.0,    1.0, -1.0,  1.0,    1.0,  1.0,  1.0,
    // right face (x = +1)
     1.0,  1.0,  1.0,    1.0, -1.0,  1.0,    1.0,  1.0, -1.0,
     1.0, -1.0,  1.0,    1.0, -1.0, -1.0,    1.0,  1.0, -1.0,
    // back face (z = -1)
     1.0,  1.0, -1.0,    1.0, -1.0, -1.0,   -1.0,  1.0, -1.0,
     1.0, -1.0, -1.0,   -1.0, -1.0, -1.0,   -1.0,  1.0, -1.0,
    // left face (x = -1)
    -1.0,  1.0, -1.0,   -1.0, -1.0, -1.0,   -1.0,  1.0,  1.0,
    -1.0, -1.0, -1.0,   -1.0, -1.0,  1.0,   -1.0,  1.0,  1.0,
    // top face (y = +1)
    -1.0,  1.0, -1.0,   -1.0,  1.0,  1.0,    1.0,  1.0, -1.0,
    -1.0,  1.0,  1.0,    1.0,  1.0,  1.0,    1.0,  1.0, -1.0,
    // bottom face (y = -1)
     1.0, -1.0, -1.0,    1.0, -1.0,  1.0,   -1.0, -1.0, -1.0,
     1.0, -1.0,  1.0,   -1.0, -1.0,  1.0,   -1.0, -1.0, -1.0,
];

// Solid per-face colors: red, green, blue, yellow, cyan, magenta.
#[rustfmt::skip]
const CUBE_COLORS: [f32; CUBE_VERTEX_COUNT * COLOR_COMPONENTS] = [
    // front face: red
    1.0, 0.0, 0.0, 1.0,  1.0, 0.0, 0.0, 1.0,  1.0, 0.0, 0.0, 1.0,
    1.0, 0.0, 0.0, 1.0,  1.0, 0.0, 0.0, 1.0,  1.0, 0.0, 0.0, 1.0,
    // right face: green
    0.0, 1.0, 0.0, 1.0,  0.0, 1.0, 0.0, 1.0,  0.0, 1.0, 0.0, 1.0,
    0.0, 1.0, 0.0, 1.0,  0.0, 1.0, 0.0, 1.0,  0.0, 1.0, 0.0, 1.0,
    // back face: blue
    0.0, 0.0, 1.0, 1.0,  0.0, 0.0, 1.0, 1.0,  0.0, 0.0, 1.0, 1.0,
    0.0, 0.0, 1.0, 1.0,  0.0, 0.0, 1.0, 1.0,  0.0, 0.0, 1.0, 1.0,
    // left face: yellow
    1.0, 1.0, 0.0, 1.0,  1.0, 1.0, 0.0, 1.0,  1.0, 1.0, 0.0, 1.0,
    1.0, 1.0, 0.0, 1.0,  1.0, 1.0, 0.0, 1.0,  1.0, 1.0, 0.0, 1.0,
    // top face: cyan
    0.0, 1.0, 1.0, 1.0,  0.0, 1.0, 1.0, 1.0,  0.0, 1.0, 1.0, 1.0,
    0.0, 1.0, 1.0, 1.0,  0.0, 1.0, 1.0, 1.0,  0.0, 1.0, 1.0, 1.0,
    // bottom face: magenta
    1.0, 0.0, 1.0, 1.0,  1.0, 0.0, 1.0, 1.0,  1.0, 0.0, 1.0, 1.0,
    1.0, 0.0, 1.0, 1.0,  1.0, 0.0, 1.0, 1.0,  1.0, 0.0, 1.0, 1.0,
];

// One outward normal per face, repeated for all six face vertices.
#[rustfmt::skip]
const CUBE_NORMALS: [f32; CUBE_VERTEX_COUNT * NORMAL_COMPONENTS] = [
    // front face (+z)
    0.0, 0.0, 1.0,   0.0, 0.0, 1.0,   0.0, 0.0, 1.0,
    0.0, 0.0, 1.0,   0.0, 0.0, 1.0,   0.0, 0.0, 1.0,
    // right face (+x)
    1.0, 0.0, 0.0,   1.0, 0.0, 0.0,   1.0, 0.0, 0.0,
    1.0, 0.0, 0.0,   1.0, 0.0, 0.0,   1.0, 0.0, 0.0,
    // back face (-z)
    0.0, 0.0, -1.0,  0.0, 0.0, -1.0,  0.0, 0.0, -1.0,
    0.0, 0.0, -1.0,  0.0, 0.0, -1.0,  0.0, 0.0, -1.0,
    // left face (-x)
    -1.0, 0.0, 0.0,  -1.0, 0.0, 0.0,  -1.0, 0.0, 0.0,
    -1.0, 0.0, 0.0,  -1.0, 0.0, 0.0,  -1.0, 0.0, 0.0,
    // top face (+y)
    0.0, 1.0, 0.0,   0.0, 1.0, 0.0,   0.0, 1.0, 0.0,
    0.0, 1.0, 0.0,   0.0, 1.0, 0.0,   0.0, 1.0, 0.0,
    // bottom face (-y)
    0.0, -1.0, 0.0,  0.0, -1.0, 0.0,  0.0, -1.0, 0.0,
    0.0, -1.0, 0.0,  0.0, -1.0, 0.0,  0.0, -1.0, 0.0,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_streams_have_expected_lengths() {
        let geometry = CubeGeometry::builtin();
        assert_eq!(geometry.positions().len(), 36 * 3);
        assert_eq!(geometry.colors().len(), 36 * 4);
        assert_eq!(geometry.normals().len(), 36 * 3);
    }

    #[test]
    fn bundled_blobs_match_the_inline_cube() {
        let bundled = CubeGeometry::bundled().unwrap();
        assert_eq!(bundled, CubeGeometry::builtin());
    }

    #[test]
    fn wrong_length_stream_is_rejected() {
        let builtin = CubeGeometry::builtin();
        let err = CubeGeometry::new(
            builtin.positions()[..33].to_vec(),
            builtin.colors().to_vec(),
            builtin.normals().to_vec(),
        )
        .unwrap_err();
        assert_eq!(err.stream, "positions");
        assert_eq!(err.expected, 108);
        assert_eq!(err.actual, 33);
    }

    #[test]
    fn color_length_used_for_color_stream() {
        let builtin = CubeGeometry::builtin();
        let err = CubeGeometry::new(
            builtin.positions().to_vec(),
            vec![1.0; 36 * 3],
            builtin.normals().to_vec(),
        )
        .unwrap_err();
        assert_eq!(err.stream, "colors");
        assert_eq!(err.expected, 144);
    }

    #[test]
    fn blob_comments_do_not_reach_the_streams() {
        let geometry = CubeGeometry::from_blobs(
            crate::assets::CUBE_VERTEXES,
            crate::assets::CUBE_COLORS,
            crate::assets::CUBE_NORMALS,
        )
        .unwrap();
        // Comment lines mention face names; only floats may survive.
        assert!(geometry.positions().iter().all(|v| v.is_finite()));
    }
}
