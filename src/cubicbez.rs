// Copyright 2026 the Bezkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier segments.

use core::fmt;
use core::ops::{Mul, Range};

use arrayvec::ArrayVec;

use crate::common::solve_cubic_in_range;
use crate::{
    Affine, Line, ParamCurve, ParamCurveDeriv, Point, QuadBez, Vec2, CURVETIME_EPSILON,
    GEOMETRIC_EPSILON,
};

/// The flat coordinate form of a cubic Bézier segment.
///
/// The values are `[x0, y0, x1, y1, x2, y2, x3, y3]`: the start anchor, the
/// two control points, and the end anchor, all in absolute coordinates.
pub type CurveValues = [f64; 8];

/// A single cubic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs, reason = "Control points are self-describing.")]
pub struct CubicBez {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

/// The error returned when a slice of the wrong length is converted into a
/// [`CubicBez`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValuesLengthError {
    /// Fewer than eight values were supplied.
    TooShort(usize),
    /// More than eight values were supplied.
    TooLong(usize),
}

impl fmt::Display for ValuesLengthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValuesLengthError::TooShort(len) => {
                write!(f, "expected 8 curve values, got only {len}")
            }
            ValuesLengthError::TooLong(len) => write!(f, "expected 8 curve values, got {len}"),
        }
    }
}

impl core::error::Error for ValuesLengthError {}

impl CubicBez {
    /// Create a new cubic Bézier segment.
    #[inline(always)]
    pub fn new<P: Into<Point>>(p0: P, p1: P, p2: P, p3: P) -> CubicBez {
        CubicBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
        }
    }

    /// Create a segment from its flat coordinate form.
    #[inline]
    pub const fn from_values(v: CurveValues) -> CubicBez {
        CubicBez {
            p0: Point::new(v[0], v[1]),
            p1: Point::new(v[2], v[3]),
            p2: Point::new(v[4], v[5]),
            p3: Point::new(v[6], v[7]),
        }
    }

    /// The flat coordinate form of this segment.
    #[inline]
    pub const fn to_values(&self) -> CurveValues {
        [
            self.p0.x, self.p0.y, self.p1.x, self.p1.y, self.p2.x, self.p2.y, self.p3.x,
            self.p3.y,
        ]
    }

    /// Create a segment from two anchors and the handles between them.
    ///
    /// A handle is the offset from its anchor to the adjacent control point:
    /// `handle_out` leaves `p0` and `handle_in` arrives at `p3`. When
    /// `straight` is set, the handles are ignored and both control points
    /// coincide with their anchors.
    ///
    /// ```
    /// use bezkit::{CubicBez, Point, Vec2};
    ///
    /// let c = CubicBez::from_handles(
    ///     Point::new(0.0, 0.0),
    ///     Vec2::new(1.0, 2.0),
    ///     Vec2::new(-1.0, 2.0),
    ///     Point::new(10.0, 0.0),
    ///     false,
    /// );
    /// assert_eq!(c.p1, Point::new(1.0, 2.0));
    /// assert_eq!(c.p2, Point::new(9.0, 2.0));
    /// ```
    pub fn from_handles(
        p0: Point,
        handle_out: Vec2,
        handle_in: Vec2,
        p3: Point,
        straight: bool,
    ) -> CubicBez {
        if straight {
            CubicBez::new(p0, p0, p3, p3)
        } else {
            CubicBez::new(p0, p0 + handle_out, p3 + handle_in, p3)
        }
    }

    /// Write the flat coordinate form into `out`, optionally transformed.
    ///
    /// Returns the number of values written: 8, or 0 when `out` has room
    /// for fewer than 8 values. Values past the eighth are left untouched.
    pub fn write_values(&self, transform: Option<Affine>, out: &mut [f64]) -> usize {
        let Some(out) = out.get_mut(..8) else {
            return 0;
        };
        let values = self.to_values();
        match transform {
            Some(affine) => 2 * affine.transform_coords(&values, out),
            None => {
                out.copy_from_slice(&values);
                values.len()
            }
        }
    }

    /// Is this curve straight, within [`GEOMETRIC_EPSILON`]?
    ///
    /// See [`is_straight_within`](Self::is_straight_within).
    #[inline]
    pub fn is_straight(&self) -> bool {
        self.is_straight_within(GEOMETRIC_EPSILON)
    }

    /// Is this curve straight, given a distance tolerance?
    ///
    /// A curve is straight when both handles are zero, or when its chord
    /// has nonzero length and both handles lie along the chord: collinear
    /// with it, closer to it than `epsilon`, and pointing inward without
    /// reaching past the opposite anchor.
    ///
    /// A curve whose anchors coincide is never straight unless both of its
    /// handles are zero as well.
    pub fn is_straight_within(&self, epsilon: f64) -> bool {
        let h1 = self.p1 - self.p0;
        let h2 = self.p2 - self.p3;
        if h1.is_zero() && h2.is_zero() {
            return true;
        }
        let v = self.p3 - self.p0;
        if v.is_zero() || !(v.is_collinear(h1) && v.is_collinear(h2)) {
            return false;
        }
        let chord = Line::new(self.p0, self.p3);
        if chord.distance(self.p0 + h1) < epsilon && chord.distance(self.p3 + h2) < epsilon {
            // Project the handles onto the chord.
            let div = v.dot(v);
            let s1 = v.dot(h1) / div;
            let s2 = v.dot(h2) / div;
            (0.0..=1.0).contains(&s1) && (-1.0..=0.0).contains(&s2)
        } else {
            false
        }
    }

    /// Split the curve at parameter `t`, using de Casteljau.
    ///
    /// The left half covers `[0, t]` and the right half `[t, 1]`; they share
    /// the point at `t`. `t` is not restricted to `[0, 1]`, so this also
    /// extrapolates.
    pub fn subdivide_at(&self, t: f64) -> (CubicBez, CubicBez) {
        let q4 = self.p0.lerp(self.p1, t);
        let q5 = self.p1.lerp(self.p2, t);
        let q6 = self.p2.lerp(self.p3, t);
        let q7 = q4.lerp(q5, t);
        let q8 = q5.lerp(q6, t);
        let q9 = q7.lerp(q8, t);
        (
            CubicBez::new(self.p0, q4, q7, q9),
            CubicBez::new(q9, q8, q6, self.p3),
        )
    }

    /// The parameters of the curve's peaks, in ascending order.
    ///
    /// Peaks are the interior parameters where the first derivative is
    /// perpendicular to the second. They approximate the curvature extrema
    /// and are much cheaper to find. See
    /// <http://math.stackexchange.com/questions/1954845/bezier-curvature-extrema>.
    ///
    /// Parameters within [`CURVETIME_EPSILON`] of either end are not peaks,
    /// and a straight curve has none.
    pub fn peaks(&self) -> ArrayVec<f64, 3> {
        if self.is_straight() {
            return ArrayVec::new();
        }
        let (p0, p1, p2, p3) = (
            self.p0.to_vec2(),
            self.p1.to_vec2(),
            self.p2.to_vec2(),
            self.p3.to_vec2(),
        );
        // B'(t) = 3at² + 2bt + c with these a, b, c; B'(t)·B''(t) is then
        // a cubic in t.
        let a = -p0 + 3.0 * p1 - 3.0 * p2 + p3;
        let b = 3.0 * p0 - 6.0 * p1 + 3.0 * p2;
        let c = -3.0 * p0 + 3.0 * p1;
        let mut roots = [0.0; 3];
        let n = solve_cubic_in_range(
            c.dot(b),
            2.0 * b.dot(b) + 3.0 * c.dot(a),
            9.0 * a.dot(b),
            9.0 * a.dot(a),
            &mut roots,
            CURVETIME_EPSILON,
            1.0 - CURVETIME_EPSILON,
        );
        roots[..n].iter().copied().collect()
    }

    /// Is this cubic Bezier curve finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.p0.is_finite() && self.p1.is_finite() && self.p2.is_finite() && self.p3.is_finite()
    }

    /// Is this cubic Bezier curve NaN?
    #[inline]
    pub fn is_nan(&self) -> bool {
        self.p0.is_nan() || self.p1.is_nan() || self.p2.is_nan() || self.p3.is_nan()
    }
}

impl From<CurveValues> for CubicBez {
    #[inline]
    fn from(v: CurveValues) -> CubicBez {
        CubicBez::from_values(v)
    }
}

impl From<CubicBez> for CurveValues {
    #[inline]
    fn from(c: CubicBez) -> CurveValues {
        c.to_values()
    }
}

impl TryFrom<&[f64]> for CubicBez {
    type Error = ValuesLengthError;

    fn try_from(values: &[f64]) -> Result<CubicBez, ValuesLengthError> {
        match <CurveValues>::try_from(values) {
            Ok(v) => Ok(CubicBez::from_values(v)),
            Err(_) if values.len() < 8 => Err(ValuesLengthError::TooShort(values.len())),
            Err(_) => Err(ValuesLengthError::TooLong(values.len())),
        }
    }
}

impl ParamCurve for CubicBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let v = self.p0.to_vec2() * (mt * mt * mt)
            + (self.p1.to_vec2() * (mt * mt * 3.0)
                + (self.p2.to_vec2() * (mt * 3.0) + self.p3.to_vec2() * t) * t)
                * t;
        v.to_point()
    }

    fn subsegment(&self, range: Range<f64>) -> CubicBez {
        let (t0, t1) = (range.start, range.end);
        let p0 = self.eval(t0);
        let p3 = self.eval(t1);
        let d = self.deriv();
        let scale = (t1 - t0) * (1.0 / 3.0);
        let p1 = p0 + scale * d.eval(t0).to_vec2();
        let p2 = p3 - scale * d.eval(t1).to_vec2();
        CubicBez { p0, p1, p2, p3 }
    }

    /// Subdivide into halves, using de Casteljau.
    #[inline]
    fn subdivide(&self) -> (CubicBez, CubicBez) {
        self.subdivide_at(0.5)
    }

    #[inline(always)]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline(always)]
    fn end(&self) -> Point {
        self.p3
    }
}

impl ParamCurveDeriv for CubicBez {
    type DerivResult = QuadBez;

    #[inline]
    fn deriv(&self) -> QuadBez {
        QuadBez::new(
            (3.0 * (self.p1 - self.p0)).to_point(),
            (3.0 * (self.p2 - self.p1)).to_point(),
            (3.0 * (self.p3 - self.p2)).to_point(),
        )
    }
}

impl Mul<CubicBez> for Affine {
    type Output = CubicBez;

    #[inline]
    fn mul(self, c: CubicBez) -> CubicBez {
        CubicBez {
            p0: self * c.p0,
            p1: self * c.p1,
            p2: self * c.p2,
            p3: self * c.p3,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Affine, CubicBez, ParamCurve, ParamCurveDeriv, Point, ValuesLengthError, Vec2,
    };

    fn assert_near(p0: Point, p1: Point, epsilon: f64) {
        assert!((p1 - p0).hypot() < epsilon, "{p0:?} != {p1:?}");
    }

    #[test]
    fn cubicbez_deriv() {
        // y = x^2
        let c = CubicBez::new(
            (0.0, 0.0),
            (1.0 / 3.0, 0.0),
            (2.0 / 3.0, 1.0 / 3.0),
            (1.0, 1.0),
        );
        let deriv = c.deriv();

        let n = 10;
        for i in 0..=n {
            let t = (i as f64) * (n as f64).recip();
            let delta = 1e-6;
            let p = c.eval(t);
            let p1 = c.eval(t + delta);
            let d_approx = (p1 - p) * delta.recip();
            let d = deriv.eval(t).to_vec2();
            assert!((d - d_approx).hypot() < delta * 2.0);
        }
    }

    #[test]
    fn values_round_trip() {
        let v = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let c = CubicBez::from_values(v);
        assert_eq!(c.p2, Point::new(4.0, 5.0));
        assert_eq!(c.to_values(), v);
        assert_eq!(CubicBez::try_from(&v[..]), Ok(c));
        assert_eq!(
            CubicBez::try_from(&v[..5]),
            Err(ValuesLengthError::TooShort(5))
        );
        let long = [0.0; 9];
        assert_eq!(
            CubicBez::try_from(&long[..]),
            Err(ValuesLengthError::TooLong(9))
        );
        assert_eq!(
            ValuesLengthError::TooShort(5).to_string(),
            "expected 8 curve values, got only 5"
        );
    }

    #[test]
    fn from_handles_straight() {
        let p0 = Point::new(1.0, 1.0);
        let p3 = Point::new(5.0, 1.0);
        let h = Vec2::new(0.0, 3.0);
        let c = CubicBez::from_handles(p0, h, h, p3, true);
        assert_eq!(c, CubicBez::new(p0, p0, p3, p3));
        assert!(c.is_straight());
        let c = CubicBez::from_handles(p0, h, h, p3, false);
        assert_eq!(c.p1, Point::new(1.0, 4.0));
        assert_eq!(c.p2, Point::new(5.0, 4.0));
        assert!(!c.is_straight());
    }

    #[test]
    fn write_values_into_buffer() {
        let c = CubicBez::new((0.0, 0.0), (1.0, 2.0), (3.0, 2.0), (4.0, 0.0));
        let mut out = [f64::NAN; 10];
        assert_eq!(c.write_values(None, &mut out), 8);
        assert_eq!(out[..8], c.to_values());
        assert!(out[8].is_nan() && out[9].is_nan(), "got {out:?}");

        let a = Affine::translate((10.0, -1.0));
        assert_eq!(c.write_values(Some(a), &mut out), 8);
        assert_eq!(out[..8], (a * c).to_values());

        let mut short = [0.0; 7];
        assert_eq!(c.write_values(None, &mut short), 0);
        assert_eq!(short, [0.0; 7]);
    }

    #[test]
    fn straight_without_handles() {
        let c = CubicBez::new((0.0, 0.0), (0.0, 0.0), (3.0, 4.0), (3.0, 4.0));
        assert!(c.is_straight());
        // Handles below EPSILON count as zero.
        let c = CubicBez::new((0.0, 0.0), (1e-13, 0.0), (3.0, 4.0 - 1e-13), (3.0, 4.0));
        assert!(c.is_straight());
        // So does a single point.
        let c = CubicBez::new((2.0, 2.0), (2.0, 2.0), (2.0, 2.0), (2.0, 2.0));
        assert!(c.is_straight());
    }

    #[test]
    fn straight_with_inner_handles() {
        let c = CubicBez::new((0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0));
        assert!(c.is_straight());
        // Handles reaching exactly to the other anchor still count.
        let c = CubicBez::new((0.0, 0.0), (3.0, 0.0), (0.0, 0.0), (3.0, 0.0));
        assert!(c.is_straight());
    }

    #[test]
    fn not_straight() {
        // Handles overshoot the end anchor.
        let c = CubicBez::new((0.0, 0.0), (4.0, 0.0), (2.0, 0.0), (3.0, 0.0));
        assert!(!c.is_straight());
        // Handle points backwards.
        let c = CubicBez::new((0.0, 0.0), (-1.0, 0.0), (2.0, 0.0), (3.0, 0.0));
        assert!(!c.is_straight());
        // Handles off the chord.
        let c = CubicBez::new((0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0));
        assert!(!c.is_straight());
        // Zero-length chord with handles.
        let c = CubicBez::new((0.0, 0.0), (1.0, 1.0), (1.0, -1.0), (0.0, 0.0));
        assert!(!c.is_straight());
    }

    #[test]
    fn straight_within_tolerance() {
        // Long handles at an angle below the collinearity tolerance, but
        // a few thousandths away from the chord at their tips.
        let c = CubicBez::new((0.0, 0.0), (1e6, 5e-3), (2e6, 0.0), (3e6, 0.0));
        assert!(!c.is_straight());
        assert!(c.is_straight_within(1e-2));
    }

    #[test]
    fn subdivide_at_matches_eval() {
        let c = CubicBez::new((3.1, 4.1), (5.9, 2.6), (5.3, 5.8), (9.7, 9.3));
        for &t in &[0.0, 0.25, 0.5, 0.9, 1.0] {
            let (left, right) = c.subdivide_at(t);
            assert_eq!(left.p0, c.p0);
            assert_eq!(right.p3, c.p3);
            assert_eq!(left.p3, right.p0);
            assert_near(left.p3, c.eval(t), 1e-12);
            for i in 0..=4 {
                let u = f64::from(i) * 0.25;
                assert_near(left.eval(u), c.eval(u * t), 1e-12);
                assert_near(right.eval(u), c.eval(t + u * (1.0 - t)), 1e-12);
            }
        }
        assert_eq!(c.subdivide(), c.subdivide_at(0.5));
    }

    #[test]
    fn subdivide_at_extrapolates() {
        let c = CubicBez::new((0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0));
        let (left, _) = c.subdivide_at(2.0);
        assert_near(left.p3, Point::new(6.0, 0.0), 1e-12);
    }

    #[test]
    fn subsegment_matches_eval() {
        let c = CubicBez::new((3.1, 4.1), (5.9, 2.6), (5.3, 5.8), (9.7, 9.3));
        let (t0, t1) = (0.1, 0.8);
        let cs = c.subsegment(t0..t1);
        let n = 10;
        for i in 0..=n {
            let t = (i as f64) * (n as f64).recip();
            assert_near(c.eval(t0 + t * (t1 - t0)), cs.eval(t), 1e-12);
        }
    }

    #[test]
    fn peaks_of_symmetric_arch() {
        let c = CubicBez::new((0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0));
        let peaks = c.peaks();
        assert_eq!(peaks.len(), 1, "got {peaks:?}");
        assert!((peaks[0] - 0.5).abs() < 1e-9, "got {peaks:?}");

        let c = CubicBez::new((0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0));
        let peaks = c.peaks();
        assert_eq!(peaks.len(), 1, "got {peaks:?}");
        assert!((peaks[0] - 0.5).abs() < 1e-9, "got {peaks:?}");
    }

    #[test]
    fn peaks_of_serpentine() {
        let c = CubicBez::from_values([0.0, 0.0, 20.0, 60.0, -60.0, 60.0, 100.0, 0.0]);
        let peaks = c.peaks();
        assert_eq!(peaks.len(), 1, "got {peaks:?}");
        assert!((peaks[0] - 0.47977234540886293).abs() < 1e-9, "got {peaks:?}");
    }

    #[test]
    fn peaks_are_interior_and_sorted() {
        let c = CubicBez::from_values([0.0, 0.0, 3.0, 4.0, -1.0, 4.0, 2.0, 0.0]);
        let peaks = c.peaks();
        assert!(!peaks.is_empty());
        for w in peaks.windows(2) {
            assert!(w[0] < w[1], "got {peaks:?}");
        }
        for &t in &peaks {
            assert!(t > 0.0 && t < 1.0, "got {peaks:?}");
        }
    }

    #[test]
    fn straight_curves_have_no_peaks() {
        let c = CubicBez::new((0.0, 0.0), (0.0, 0.0), (3.0, 4.0), (3.0, 4.0));
        assert!(c.peaks().is_empty());
        let c = CubicBez::new((0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0));
        assert!(c.peaks().is_empty());
    }
}
