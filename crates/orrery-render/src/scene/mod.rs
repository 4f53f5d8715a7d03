//! The fixed scene script.
//!
//! One point light orbits the cube field while five cubes spin in place.
//! Everything here is a pure function of the frame's clock sample, which
//! keeps frames idempotent: two frames at the same millisecond produce the
//! same matrices.

use glam::{Mat4, Vec3, Vec4};

use crate::math::{rotated_deg, translated};

/// Full animation cycle. The slow angle covers one revolution per cycle.
pub const CYCLE_MS: u64 = 10_000;

/// Fast cycle, used by the center cube (one revolution per 5 s).
pub const FAST_CYCLE_MS: u64 = 5_000;

/// The light's position in its own model space.
pub const LIGHT_POS_IN_MODEL_SPACE: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);

/// Per-frame rotation angles, derived from one clock sample.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SceneAngles {
    /// Degrees; one revolution per [`CYCLE_MS`].
    pub slow_deg: f32,
    /// Degrees; one revolution per [`FAST_CYCLE_MS`].
    pub fast_deg: f32,
}

impl SceneAngles {
    /// Derives the angles for a monotonic millisecond sample.
    ///
    /// Only `t mod 10000` matters, so any zero reference works.
    pub fn at(t_ms: u64) -> Self {
        let t = (t_ms % CYCLE_MS) as f32;
        Self {
            slow_deg: (360.0 / CYCLE_MS as f32) * t,
            fast_deg: (360.0 / FAST_CYCLE_MS as f32) * t,
        }
    }
}

/// Spin rate of a cube in the script.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Spin {
    Slow,
    SlowReverse,
    Fast,
}

impl Spin {
    fn degrees(self, angles: SceneAngles) -> f32 {
        match self {
            Spin::Slow => angles.slow_deg,
            Spin::SlowReverse => -angles.slow_deg,
            Spin::Fast => angles.fast_deg,
        }
    }
}

/// One cube in the script: where it sits and how it spins.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CubeSpec {
    pub name: &'static str,
    pub offset: Vec3,
    pub axis: Vec3,
    pub spin: Spin,
}

/// The five cubes, in draw order.
///
/// The bottom cube spins about Y like the left one — kept that way on
/// purpose; the scene has always looked like this.
pub const CUBES: [CubeSpec; 5] = [
    CubeSpec {
        name: "right",
        offset: Vec3::new(4.0, 0.0, -7.0),
        axis: Vec3::new(1.0, 0.0, 0.0),
        spin: Spin::Slow,
    },
    CubeSpec {
        name: "left",
        offset: Vec3::new(-4.0, 0.0, -7.0),
        axis: Vec3::new(0.0, 1.0, 0.0),
        spin: Spin::SlowReverse,
    },
    CubeSpec {
        name: "top",
        offset: Vec3::new(0.0, 4.0, -7.0),
        axis: Vec3::new(0.0, 0.0, 1.0),
        spin: Spin::Slow,
    },
    CubeSpec {
        name: "bottom",
        offset: Vec3::new(0.0, -4.0, -7.0),
        axis: Vec3::new(0.0, 1.0, 0.0),
        spin: Spin::SlowReverse,
    },
    CubeSpec {
        name: "center",
        offset: Vec3::new(0.0, 0.0, -5.0),
        axis: Vec3::new(0.0, 1.0, 1.0),
        spin: Spin::Fast,
    },
];

/// Model matrix for one cube at the given angles.
pub fn cube_model_matrix(spec: &CubeSpec, angles: SceneAngles) -> Mat4 {
    let m = translated(Mat4::IDENTITY, spec.offset);
    rotated_deg(m, spec.spin.degrees(angles), spec.axis)
}

/// Model matrix of the orbiting light: push out, swing around Y, pull in.
pub fn light_model_matrix(slow_deg: f32) -> Mat4 {
    let m = translated(Mat4::IDENTITY, Vec3::new(0.0, 0.0, -5.0));
    let m = rotated_deg(m, slow_deg, Vec3::Y);
    translated(m, Vec3::new(0.0, 0.0, 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4Swizzles;

    fn close(a: Vec4, b: Vec4) -> bool {
        (a - b).length() < 1e-4
    }

    // ── angles ────────────────────────────────────────────────────────────

    #[test]
    fn angles_start_at_zero() {
        let a = SceneAngles::at(0);
        assert_eq!(a.slow_deg, 0.0);
        assert_eq!(a.fast_deg, 0.0);
    }

    #[test]
    fn angles_wrap_at_the_cycle() {
        assert_eq!(SceneAngles::at(10_000), SceneAngles::at(0));
        assert_eq!(SceneAngles::at(123_456), SceneAngles::at(3_456));
    }

    #[test]
    fn fast_angle_runs_twice_as_fast() {
        let a = SceneAngles::at(2_500);
        assert!((a.slow_deg - 90.0).abs() < 1e-3, "slow: {}", a.slow_deg);
        assert!((a.fast_deg - 180.0).abs() < 1e-3, "fast: {}", a.fast_deg);
    }

    // ── light orbit ───────────────────────────────────────────────────────

    #[test]
    fn light_rests_three_units_out_at_t_zero() {
        let pos = light_model_matrix(0.0) * LIGHT_POS_IN_MODEL_SPACE;
        assert_eq!(pos, Vec4::new(0.0, 0.0, -3.0, 1.0));
    }

    #[test]
    fn light_swings_to_the_far_side_at_half_cycle() {
        let angles = SceneAngles::at(5_000);
        assert!((angles.slow_deg - 180.0).abs() < 1e-3);
        let pos = light_model_matrix(angles.slow_deg) * LIGHT_POS_IN_MODEL_SPACE;
        assert!(close(pos, Vec4::new(0.0, 0.0, -7.0, 1.0)), "got {pos:?}");
    }

    #[test]
    fn light_orbit_stays_in_the_y_zero_plane() {
        for t in [0_u64, 1_250, 3_333, 6_400, 9_999] {
            let pos = light_model_matrix(SceneAngles::at(t).slow_deg) * LIGHT_POS_IN_MODEL_SPACE;
            assert!(pos.y.abs() < 1e-4);
            // Two units from the orbit center at (0, 0, -5).
            let radial = pos.xyz() - glam::Vec3::new(0.0, 0.0, -5.0);
            assert!((radial.length() - 2.0).abs() < 1e-4);
        }
    }

    // ── cubes ─────────────────────────────────────────────────────────────

    #[test]
    fn center_cube_is_half_turned_at_2500_ms() {
        let angles = SceneAngles::at(2_500);
        let center = CUBES.iter().find(|c| c.name == "center").unwrap();
        let actual = cube_model_matrix(center, angles);

        let expected = Mat4::from_translation(glam::Vec3::new(0.0, 0.0, -5.0))
            * Mat4::from_axis_angle(
                glam::Vec3::new(0.0, 1.0, 1.0).normalize(),
                180.0_f32.to_radians(),
            );
        assert!(actual.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn resting_cubes_sit_at_their_offsets() {
        let angles = SceneAngles::at(0);
        for spec in &CUBES {
            let origin = cube_model_matrix(spec, angles) * Vec4::new(0.0, 0.0, 0.0, 1.0);
            assert!(close(origin, spec.offset.extend(1.0)), "{}: {origin:?}", spec.name);
        }
    }

    #[test]
    fn bottom_cube_mirrors_the_left_cube_spin() {
        let bottom = CUBES.iter().find(|c| c.name == "bottom").unwrap();
        let left = CUBES.iter().find(|c| c.name == "left").unwrap();
        assert_eq!(bottom.axis, left.axis);
        assert_eq!(bottom.spin, left.spin);
    }
}
