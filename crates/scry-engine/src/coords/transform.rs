use super::Viewport;

/// Affine map from a local space to clip space, stored as a column-major 4×4
/// matrix (the layout WGSL expects for `mat4x4<f32>`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    cols: [[f32; 4]; 4],
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub const fn identity() -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Builds a transform from matrix columns.
    pub const fn from_cols(cols: [[f32; 4]; 4]) -> Self {
        Self { cols }
    }

    pub const fn translate(x: f32, y: f32) -> Self {
        let mut t = Self::identity();
        t.cols[3] = [x, y, 0.0, 1.0];
        t
    }

    pub const fn scale(sx: f32, sy: f32) -> Self {
        let mut t = Self::identity();
        t.cols[0][0] = sx;
        t.cols[1][1] = sy;
        t
    }

    /// Maps logical pixels of `viewport` (top-left origin, +Y down) to NDC.
    pub fn pixels_to_ndc(viewport: Viewport) -> Self {
        let w = viewport.width.max(1.0);
        let h = viewport.height.max(1.0);
        Self::scale(2.0 / w, -2.0 / h).then(Self::translate(-1.0, 1.0))
    }

    /// Returns the transform that applies `self` first, then `next`.
    pub fn then(self, next: Transform) -> Transform {
        let mut out = [[0.0f32; 4]; 4];
        for (c, col) in out.iter_mut().enumerate() {
            for (r, v) in col.iter_mut().enumerate() {
                *v = (0..4).map(|k| next.cols[k][r] * self.cols[c][k]).sum();
            }
        }
        Transform { cols: out }
    }

    pub fn map_point(self, p: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        for (r, v) in out.iter_mut().enumerate() {
            *v = (0..4).map(|k| self.cols[k][r] * p[k]).sum();
        }
        out
    }

    #[inline]
    pub fn cols(&self) -> [[f32; 4]; 4] {
        self.cols
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn then_applies_left_to_right() {
        let t = Transform::scale(2.0, 3.0).then(Transform::translate(1.0, -1.0));
        assert_eq!(t.map_point([1.0, 1.0, 0.0, 1.0]), [3.0, 2.0, 0.0, 1.0]);

        let u = Transform::translate(1.0, -1.0).then(Transform::scale(2.0, 3.0));
        assert_eq!(u.map_point([1.0, 1.0, 0.0, 1.0]), [4.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn identity_is_neutral() {
        let t = Transform::translate(5.0, 6.0);
        assert_eq!(t.then(Transform::identity()), t);
        assert_eq!(Transform::identity().then(t), t);
        assert!(Transform::default().is_identity());
        assert!(!t.is_identity());
    }

    fn assert_near(a: [f32; 4], b: [f32; 4]) {
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-5, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn pixels_map_to_ndc_corners() {
        let t = Transform::pixels_to_ndc(Viewport::new(200.0, 100.0));
        assert_near(t.map_point([0.0, 0.0, 0.0, 1.0]), [-1.0, 1.0, 0.0, 1.0]);
        assert_near(t.map_point([200.0, 100.0, 0.0, 1.0]), [1.0, -1.0, 0.0, 1.0]);
        assert_near(t.map_point([100.0, 50.0, 0.0, 1.0]), [0.0, 0.0, 0.0, 1.0]);
    }
}
