// Copyright 2026 the Bezkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounding box padding for round strokes.

use crate::{Affine, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// The padding a round stroke adds to the bounding box of a curve.
///
/// The pen is a circle of `radius`. Under `transform` it becomes an ellipse,
/// and the result is the half width and half height of that ellipse's
/// bounding box. Only the linear part of the transform matters; translation
/// moves the pen but does not change its extents.
///
/// Without a transform the padding is `radius` in both directions. A
/// negative radius pads by its magnitude.
///
/// ```
/// use bezkit::{stroke_padding, Affine, Vec2};
///
/// assert_eq!(stroke_padding(2.0, None), Vec2::new(2.0, 2.0));
/// let scaled = stroke_padding(2.0, Some(Affine::scale_non_uniform(3.0, 0.5)));
/// assert_eq!(scaled, Vec2::new(6.0, 1.0));
/// ```
pub fn stroke_padding(radius: f64, transform: Option<Affine>) -> Vec2 {
    let radius = radius.abs();
    let Some(transform) = transform else {
        return Vec2::new(radius, radius);
    };
    let [a, b, c, d, _, _] = transform.as_coeffs();
    // The ellipse is the image of the unit circle `(cos θ, sin θ)`, so its
    // x extent is the maximum of `a cos θ + c sin θ`, and likewise for y.
    Vec2::new(
        radius * Vec2::new(a, c).hypot(),
        radius * Vec2::new(b, d).hypot(),
    )
}

#[cfg(test)]
mod tests {
    use core::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    use crate::{stroke_padding, Affine, Vec2};

    fn assert_near(v: Vec2, expected: Vec2) {
        assert!((v - expected).hypot() < 1e-12, "{v:?} != {expected:?}");
    }

    #[test]
    fn untransformed() {
        assert_eq!(stroke_padding(3.0, None), Vec2::new(3.0, 3.0));
        assert_eq!(stroke_padding(3.0, Some(Affine::IDENTITY)), Vec2::new(3.0, 3.0));
        assert_eq!(stroke_padding(0.0, None), Vec2::ZERO);
    }

    #[test]
    fn negative_radius() {
        assert_eq!(stroke_padding(-2.0, None), Vec2::new(2.0, 2.0));
        assert_eq!(stroke_padding(-2.0, Some(Affine::IDENTITY)), Vec2::new(2.0, 2.0));
        let pad = stroke_padding(-1.0, Some(Affine::scale_non_uniform(2.0, 3.0)));
        assert_eq!(pad, Vec2::new(2.0, 3.0));
    }

    #[test]
    fn scaled() {
        let pad = stroke_padding(1.5, Some(Affine::scale_non_uniform(2.0, 3.0)));
        assert_eq!(pad, Vec2::new(3.0, 4.5));
        // Mirroring does not shrink the pen.
        let pad = stroke_padding(1.0, Some(Affine::scale_non_uniform(-2.0, 1.0)));
        assert_eq!(pad, Vec2::new(2.0, 1.0));
    }

    #[test]
    fn translation_is_ignored() {
        let pad = stroke_padding(2.0, Some(Affine::translate((10.0, -4.0))));
        assert_eq!(pad, Vec2::new(2.0, 2.0));
    }

    #[test]
    fn rotated_circle() {
        let pad = stroke_padding(2.0, Some(Affine::rotate(FRAC_PI_2)));
        assert_near(pad, Vec2::new(2.0, 2.0));
        let pad = stroke_padding(2.0, Some(Affine::rotate(0.3)));
        assert_near(pad, Vec2::new(2.0, 2.0));
    }

    #[test]
    fn rotated_ellipse() {
        // Semi axes 2 and 1, rotated by 45 degrees.
        let transform = Affine::rotate(FRAC_PI_4) * Affine::scale_non_uniform(2.0, 1.0);
        let pad = stroke_padding(1.0, Some(transform));
        let extent = 2.5f64.sqrt();
        assert_near(pad, Vec2::new(extent, extent));
    }

    #[test]
    fn sheared() {
        // x' = x + y, y' = y
        let pad = stroke_padding(1.0, Some(Affine::new([1.0, 0.0, 1.0, 1.0, 0.0, 0.0])));
        assert_near(pad, Vec2::new(2.0f64.sqrt(), 1.0));
    }
}
