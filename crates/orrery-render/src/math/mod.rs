//! Transform helpers.
//!
//! All matrices are column-major `glam::Mat4`; composition is right-to-left
//! (`p' = M · p`). The helpers post-multiply, so reading a chain top to
//! bottom matches the order the transforms apply to a point in reverse —
//! the usual GL convention. Angles are degrees at this surface and radians
//! inside glam.

use glam::{Mat4, Vec3, Vec4};

/// Post-multiplies `m` by a translation.
#[inline]
pub fn translated(m: Mat4, offset: Vec3) -> Mat4 {
    m * Mat4::from_translation(offset)
}

/// Post-multiplies `m` by a rotation of `angle_deg` degrees about `axis`.
///
/// The axis is normalized here; a zero axis leaves `m` untouched rather
/// than poisoning the matrix with NaNs.
#[inline]
pub fn rotated_deg(m: Mat4, angle_deg: f32, axis: Vec3) -> Mat4 {
    let length = axis.length();
    if length == 0.0 {
        return m;
    }
    m * Mat4::from_axis_angle(axis / length, angle_deg.to_radians())
}

/// Right-handed look-at view matrix.
#[inline]
pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4 {
    Mat4::look_at_rh(eye, center, up)
}

/// Perspective frustum in the standard GL formulation.
pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let a = (right + left) / (right - left);
    let b = (top + bottom) / (top - bottom);
    let c = -(far + near) / (far - near);
    let d = -(2.0 * far * near) / (far - near);
    Mat4::from_cols(
        Vec4::new(2.0 * near / (right - left), 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 * near / (top - bottom), 0.0, 0.0),
        Vec4::new(a, b, c, -1.0),
        Vec4::new(0.0, 0.0, d, 0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec4_close(actual: Vec4, expected: Vec4) {
        assert!(
            (actual - expected).length() < 1e-5,
            "expected {expected:?}, got {actual:?}"
        );
    }

    // ── frustum ───────────────────────────────────────────────────────────

    #[test]
    fn frustum_for_800_by_600_surface() {
        let ratio = 800.0_f32 / 600.0;
        let m = frustum(-ratio, ratio, -1.0, 1.0, 1.0, 10.0).to_cols_array();

        assert_eq!(m[0], 2.0 / (2.0 * ratio)); // 2n / (r - l)
        assert_eq!(m[5], 1.0); // 2n / (t - b)
        assert_eq!(m[10], -11.0 / 9.0); // -(f + n) / (f - n)
        assert_eq!(m[11], -1.0);
        assert_eq!(m[14], -20.0 / 9.0); // -2fn / (f - n)
        assert_eq!(m[15], 0.0);
    }

    #[test]
    fn frustum_maps_near_plane_corners_to_clip_edges() {
        let m = frustum(-1.0, 1.0, -1.0, 1.0, 1.0, 10.0);
        let corner = m * Vec4::new(1.0, 1.0, -1.0, 1.0);
        assert_vec4_close(corner / corner.w, Vec4::new(1.0, 1.0, -1.0, 1.0));
    }

    // ── look_at ───────────────────────────────────────────────────────────

    #[test]
    fn look_at_inverse_maps_origin_back_to_the_eye() {
        let eye = Vec3::new(0.0, 0.0, -0.5);
        let view = look_at(eye, Vec3::new(0.0, 0.0, -5.0), Vec3::Y);
        let recovered = view.inverse() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_vec4_close(recovered, eye.extend(1.0));
    }

    #[test]
    fn look_at_puts_the_center_on_the_negative_z_axis() {
        let view = look_at(Vec3::new(0.0, 0.0, -0.5), Vec3::new(0.0, 0.0, -5.0), Vec3::Y);
        let center = view * Vec4::new(0.0, 0.0, -5.0, 1.0);
        assert!(center.x.abs() < 1e-6 && center.y.abs() < 1e-6);
        assert!(center.z < 0.0);
    }

    // ── rotation / translation ────────────────────────────────────────────

    #[test]
    fn rotated_deg_normalizes_the_axis() {
        let a = rotated_deg(Mat4::IDENTITY, 90.0, Vec3::new(0.0, 2.0, 2.0));
        let b = rotated_deg(Mat4::IDENTITY, 90.0, Vec3::new(0.0, 1.0, 1.0));
        assert!(a.abs_diff_eq(b, 1e-6));
    }

    #[test]
    fn rotated_deg_zero_axis_is_a_no_op() {
        let m = translated(Mat4::IDENTITY, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(rotated_deg(m, 45.0, Vec3::ZERO), m);
    }

    #[test]
    fn helpers_post_multiply() {
        // Translate-then-rotate must rotate points about the translated
        // origin, i.e. the rotation applies to a point first.
        let m = rotated_deg(
            translated(Mat4::IDENTITY, Vec3::new(0.0, 0.0, -5.0)),
            180.0,
            Vec3::Y,
        );
        let p = m * Vec4::new(0.0, 0.0, 2.0, 1.0);
        assert_vec4_close(p, Vec4::new(0.0, 0.0, -7.0, 1.0));
    }
}
