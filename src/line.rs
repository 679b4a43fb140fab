// Copyright 2026 the Bezkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lines.

use core::ops::{Mul, Range};

use crate::{Affine, ParamCurve, ParamCurveArclen, ParamCurveDeriv, Point, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A single line.
///
/// As a curve, the line is the segment from `p0` to `p1`; the distance
/// queries treat it as extending to infinity in both directions.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// The line's start point.
    pub p0: Point,
    /// The line's end point.
    pub p1: Point,
}

impl Line {
    /// Create a new line.
    #[inline(always)]
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Line {
        Line {
            p0: p0.into(),
            p1: p1.into(),
        }
    }

    /// The length of the line.
    #[inline]
    pub fn length(self) -> f64 {
        self.arclen()
    }

    /// The vector from the start point to the end point.
    #[inline]
    pub fn direction(self) -> Vec2 {
        self.p1 - self.p0
    }

    /// Signed distance from `p` to the infinite line through `p0` and `p1`.
    ///
    /// The distance is positive for points to the right of the direction
    /// `p0 → p1` in a y-up coordinate system (to the left in y-down), and
    /// negative on the other side.
    ///
    /// For a degenerate line, where both points coincide, this is the
    /// distance to that point.
    ///
    /// ```
    /// use bezkit::{Line, Point};
    ///
    /// let line = Line::new((0.0, 0.0), (0.0, 10.0));
    /// assert_eq!(line.signed_distance(Point::new(3.0, 5.0)), 3.0);
    /// assert_eq!(line.signed_distance(Point::new(-3.0, 50.0)), -3.0);
    /// ```
    pub fn signed_distance(self, p: Point) -> f64 {
        let v = self.direction();
        let len = v.hypot();
        if len == 0.0 {
            return self.p0.distance(p);
        }
        (p - self.p0).cross(v) / len
    }

    /// Unsigned distance from `p` to the infinite line through `p0` and `p1`.
    #[inline]
    pub fn distance(self, p: Point) -> f64 {
        self.signed_distance(p).abs()
    }

    /// Is this line [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    pub fn is_finite(self) -> bool {
        self.p0.is_finite() && self.p1.is_finite()
    }

    /// Is this line [`NaN`]?
    ///
    /// [`NaN`]: f64::is_nan
    #[inline]
    pub fn is_nan(self) -> bool {
        self.p0.is_nan() || self.p1.is_nan()
    }
}

impl From<(Point, Point)> for Line {
    #[inline(always)]
    fn from((from, to): (Point, Point)) -> Self {
        Line::new(from, to)
    }
}

impl ParamCurve for Line {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        self.p0.lerp(self.p1, t)
    }

    #[inline]
    fn subsegment(&self, range: Range<f64>) -> Line {
        Line {
            p0: self.eval(range.start),
            p1: self.eval(range.end),
        }
    }

    #[inline(always)]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline(always)]
    fn end(&self) -> Point {
        self.p1
    }
}

impl ParamCurveDeriv for Line {
    type DerivResult = ConstPoint;

    #[inline]
    fn deriv(&self) -> ConstPoint {
        ConstPoint(self.direction().to_point())
    }
}

impl ParamCurveArclen for Line {
    #[inline]
    fn arclen(&self) -> f64 {
        self.direction().hypot()
    }

    fn inv_arclen(&self, arclen: f64) -> Option<f64> {
        let len = self.arclen();
        if len == 0.0 {
            return (arclen == 0.0).then_some(0.0);
        }
        let t = arclen / len;
        (0.0..=1.0).contains(&t).then_some(t)
    }
}

/// A trivial "curve" that is just a constant.
///
/// This is the derivative of a [`Line`], and so the second derivative of a
/// [`QuadBez`](crate::QuadBez).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstPoint(Point);

impl ConstPoint {
    /// Create a new constant curve.
    #[inline(always)]
    pub const fn new(p: Point) -> ConstPoint {
        ConstPoint(p)
    }
}

impl ParamCurve for ConstPoint {
    #[inline(always)]
    fn eval(&self, _t: f64) -> Point {
        self.0
    }

    #[inline(always)]
    fn subsegment(&self, _range: Range<f64>) -> ConstPoint {
        *self
    }
}

impl ParamCurveDeriv for ConstPoint {
    type DerivResult = ConstPoint;

    #[inline(always)]
    fn deriv(&self) -> ConstPoint {
        ConstPoint(Point::ZERO)
    }
}

impl Mul<Line> for Affine {
    type Output = Line;

    #[inline]
    fn mul(self, other: Line) -> Line {
        Line {
            p0: self * other.p0,
            p1: self * other.p1,
        }
    }
}
