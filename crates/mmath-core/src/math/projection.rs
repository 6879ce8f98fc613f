// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::math::Mat4;

impl Mat4 {
    /// Perspective frustum bounded by `left..right`, `bottom..top` on the
    /// near plane.
    ///
    /// Depth maps `near` to `+1` and `far` to `-1` after the perspective
    /// divide; `w` receives `-z`.
    pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let dx = right - left;
        let dy = top - bottom;
        let dz = far - near;
        Self::new([
            2.0 * near / dx,
            0.0,
            0.0,
            0.0,
            0.0,
            2.0 * near / dy,
            0.0,
            0.0,
            (right + left) / dx,
            (top + bottom) / dy,
            (far + near) / dz,
            -1.0,
            0.0,
            0.0,
            2.0 * far * near / dz,
            0.0,
        ])
    }

    /// Symmetric perspective with the horizontal field of view `fov_x`
    /// (radians); `aspect` is width over height.
    ///
    /// # Examples
    /// ```
    /// use mmath_core::Mat4;
    /// let p = Mat4::perspective_x(90f32.to_radians(), 2.0, 1.0, 100.0);
    /// assert!((p.at(0, 0) - 1.0).abs() < 1e-6);
    /// assert!((p.at(1, 1) - 2.0).abs() < 1e-6);
    /// ```
    pub fn perspective_x(fov_x: f32, aspect: f32, near: f32, far: f32) -> Self {
        let half_w = (fov_x * 0.5).tan() * near;
        let half_h = half_w / aspect;
        Self::frustum(-half_w, half_w, -half_h, half_h, near, far)
    }

    /// Symmetric perspective with the vertical field of view `fov_y`.
    pub fn perspective_y(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let half_h = (fov_y * 0.5).tan() * near;
        let half_w = half_h * aspect;
        Self::frustum(-half_w, half_w, -half_h, half_h, near, far)
    }

    /// Orthographic box. Shares the depth mapping of [`Mat4::frustum`].
    pub fn orthographic(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let dx = right - left;
        let dy = top - bottom;
        let dz = far - near;
        Self::new([
            2.0 / dx,
            0.0,
            0.0,
            0.0,
            0.0,
            2.0 / dy,
            0.0,
            0.0,
            0.0,
            0.0,
            2.0 / dz,
            0.0,
            -(right + left) / dx,
            -(top + bottom) / dy,
            (far + near) / dz,
            1.0,
        ])
    }

    /// Orthographic box of `width × height` centred on the view axis.
    pub fn ortho_symmetric(width: f32, height: f32, near: f32, far: f32) -> Self {
        let hw = width * 0.5;
        let hh = height * 0.5;
        Self::orthographic(-hw, hw, -hh, hh, near, far)
    }
}

#[cfg(test)]
mod tests {
    use crate::math::{Mat4, Vec4};

    fn clip(m: &Mat4, p: Vec4) -> [f32; 4] {
        let p = p.with_w(1.0);
        let v = m.col(0) * p.x() + m.col(1) * p.y() + m.col(2) * p.z() + m.col(3);
        v.to_array()
    }

    #[test]
    fn frustum_maps_near_and_far_planes() {
        let m = Mat4::frustum(-1.0, 1.0, -1.0, 1.0, 1.0, 10.0);
        let near = clip(&m, Vec4::point(0.0, 0.0, -1.0));
        let far = clip(&m, Vec4::point(0.0, 0.0, -10.0));
        assert!((near[2] / near[3] - 1.0).abs() < 1e-6);
        assert!((far[2] / far[3] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn orthographic_maps_box_corners() {
        let m = Mat4::orthographic(2.0, 6.0, -1.0, 3.0, 1.0, 5.0);
        let lo = clip(&m, Vec4::point(2.0, -1.0, -1.0));
        let hi = clip(&m, Vec4::point(6.0, 3.0, -5.0));
        assert_eq!(lo, [-1.0, -1.0, 1.0, 1.0]);
        assert_eq!(hi, [1.0, 1.0, -1.0, 1.0]);
    }

    #[test]
    fn ortho_symmetric_is_centred() {
        let m = Mat4::ortho_symmetric(4.0, 2.0, 0.5, 10.0);
        assert_eq!(m, Mat4::orthographic(-2.0, 2.0, -1.0, 1.0, 0.5, 10.0));
        assert_eq!(m.at(0, 0), 0.5);
        assert_eq!(m.at(0, 3), 0.0);
    }
}
