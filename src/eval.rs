// Copyright 2026 the Bezkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Evaluation of points, tangents, normals and curvature on cubic Béziers.

use crate::{CubicBez, ParamCurveCurvature, Point, Vec2, CURVETIME_EPSILON};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// The quantity computed by [`CubicBez::evaluate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EvalKind {
    /// The point on the curve.
    Point,
    /// The first derivative.
    Tangent,
    /// The first derivative, rotated by a quarter turn.
    Normal,
    /// The signed curvature, packed into the `x` coordinate.
    Curvature,
}

/// A cubic in power basis, `((a·t + b)·t + c)·t + p0`.
///
/// Handles shorter than [`EPSILON`](crate::EPSILON) are snapped onto their
/// anchors first, so that a curve with vanishing handles has an exact zero
/// derivative at its ends.
struct PowerBasis {
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
    a: Vec2,
    b: Vec2,
    c: Vec2,
}

impl PowerBasis {
    fn new(curve: &CubicBez) -> PowerBasis {
        let CubicBez { p0, p1, p2, p3 } = *curve;
        let p1 = if (p1 - p0).is_zero() { p0 } else { p1 };
        let p2 = if (p2 - p3).is_zero() { p3 } else { p2 };
        let c = 3.0 * (p1 - p0);
        let b = 3.0 * (p2 - p1) - c;
        let a = p3 - p0 - c - b;
        PowerBasis {
            p0,
            p1,
            p2,
            p3,
            a,
            b,
            c,
        }
    }

    fn point(&self, t: f64) -> Point {
        if t == 0.0 {
            self.p0
        } else if t == 1.0 {
            self.p3
        } else {
            self.p0 + ((self.a * t + self.b) * t + self.c) * t
        }
    }

    fn at_end(t: f64) -> bool {
        !(CURVETIME_EPSILON..=1.0 - CURVETIME_EPSILON).contains(&t)
    }

    /// The first derivative, read off the end handles near either end.
    fn deriv(&self, t: f64) -> Vec2 {
        if t < CURVETIME_EPSILON {
            self.c
        } else if t > 1.0 - CURVETIME_EPSILON {
            3.0 * (self.p3 - self.p2)
        } else {
            (3.0 * self.a * t + 2.0 * self.b) * t + self.c
        }
    }

    fn deriv2(&self, t: f64) -> Vec2 {
        6.0 * self.a * t + 2.0 * self.b
    }

    fn tangent(&self, t: f64, normalized: bool) -> Vec2 {
        let d = self.deriv(t);
        if !normalized {
            return d;
        }
        // Zero at an end: use the direction between the control points.
        if d == Vec2::ZERO && Self::at_end(t) {
            (self.p2 - self.p1).normalize()
        } else {
            d.normalize()
        }
    }

    /// Signed curvature. With `normalized`, the first derivative is
    /// replaced by the unit tangent before the quotient is taken.
    fn curvature(&self, t: f64, normalized: bool) -> f64 {
        let d = self.tangent(t, normalized);
        let d2 = self.deriv2(t);
        let denom = d.hypot2().powf(1.5);
        if denom != 0.0 {
            d.cross(d2) / denom
        } else {
            0.0
        }
    }
}

fn in_domain(t: f64) -> bool {
    (0.0..=1.0).contains(&t)
}

impl CubicBez {
    /// Evaluate one quantity of the curve at parameter `t`.
    ///
    /// Returns `None` when `t` is outside `[0, 1]` or is NaN; the parameter
    /// is never clamped.
    ///
    /// - [`EvalKind::Point`] is the point on the curve. It is exactly `p0`
    ///   at `t = 0` and exactly `p3` at `t = 1`.
    /// - [`EvalKind::Tangent`] is the first derivative. Within
    ///   [`CURVETIME_EPSILON`] of either end, the end handle is used. With
    ///   `normalized`, the result is scaled to unit length, and a zero
    ///   derivative at an end is replaced by the direction from `p1` to
    ///   `p2`. A zero vector stays zero.
    /// - [`EvalKind::Normal`] is the tangent rotated from `(x, y)` to
    ///   `(y, -x)`.
    /// - [`EvalKind::Curvature`] is returned as `(k, 0)`. Without
    ///   `normalized` it is the signed curvature. With `normalized`, the
    ///   first derivative is replaced by the unit tangent first, which gives
    ///   `d̂ × B''` instead of the curvature. Prefer
    ///   [`curvature_at`](Self::curvature_at).
    pub fn evaluate(&self, t: f64, kind: EvalKind, normalized: bool) -> Option<Point> {
        if !in_domain(t) {
            return None;
        }
        let basis = PowerBasis::new(self);
        let p = match kind {
            EvalKind::Point => basis.point(t),
            EvalKind::Tangent => basis.tangent(t, normalized).to_point(),
            EvalKind::Normal => {
                let v = basis.tangent(t, normalized);
                Point::new(v.y, -v.x)
            }
            EvalKind::Curvature => Point::new(basis.curvature(t, normalized), 0.0),
        };
        Some(p)
    }

    /// The point at parameter `t`.
    ///
    /// ```
    /// use bezkit::{CubicBez, Point};
    ///
    /// let c = CubicBez::new((0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0));
    /// assert_eq!(c.point_at(1.0), Some(Point::new(1.0, 0.0)));
    /// assert_eq!(c.point_at(0.5), Some(Point::new(0.5, 0.75)));
    /// assert_eq!(c.point_at(1.5), None);
    /// ```
    #[inline]
    pub fn point_at(&self, t: f64) -> Option<Point> {
        self.evaluate(t, EvalKind::Point, false)
    }

    /// The unit tangent at parameter `t`.
    #[inline]
    pub fn tangent_at(&self, t: f64) -> Option<Vec2> {
        self.vec_at(t, EvalKind::Tangent, true)
    }

    /// The first derivative at parameter `t`, not normalized.
    #[inline]
    pub fn weighted_tangent_at(&self, t: f64) -> Option<Vec2> {
        self.vec_at(t, EvalKind::Tangent, false)
    }

    /// The unit normal at parameter `t`.
    #[inline]
    pub fn normal_at(&self, t: f64) -> Option<Vec2> {
        self.vec_at(t, EvalKind::Normal, true)
    }

    /// The normal at parameter `t`, with the length of the first derivative.
    #[inline]
    pub fn weighted_normal_at(&self, t: f64) -> Option<Vec2> {
        self.vec_at(t, EvalKind::Normal, false)
    }

    /// The signed curvature at parameter `t`.
    ///
    /// Positive curvature turns from the positive x axis towards the
    /// positive y axis. Where the first derivative vanishes, the curvature
    /// is zero.
    pub fn curvature_at(&self, t: f64) -> Option<f64> {
        in_domain(t).then(|| PowerBasis::new(self).curvature(t, false))
    }

    fn vec_at(&self, t: f64, kind: EvalKind, normalized: bool) -> Option<Vec2> {
        self.evaluate(t, kind, normalized).map(Point::to_vec2)
    }
}

impl ParamCurveCurvature for CubicBez {
    /// The signed curvature, with the same end handling as
    /// [`CubicBez::curvature_at`]. `t` is not range checked.
    #[inline]
    fn curvature(&self, t: f64) -> f64 {
        PowerBasis::new(self).curvature(t, false)
    }
}
