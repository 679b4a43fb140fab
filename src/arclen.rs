// Copyright 2026 the Bezkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arc length of cubic Béziers, and its inverse.

use core::ops::Range;

use crate::common::{find_root, integrate, RootFn};
use crate::{is_zero, CubicBez, ParamCurveArclen, ParamCurveDeriv, Vec2, EPSILON};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Maximum number of evaluations of the arc length root search.
const TIME_AT_ITERATIONS: usize = 32;

/// The speed `|B'(t)|` of a cubic Bézier.
///
/// The derivative is kept in power basis, `(a·t + b)·t + c`.
#[derive(Clone, Copy, Debug)]
struct Speed {
    a: Vec2,
    b: Vec2,
    c: Vec2,
}

impl Speed {
    fn new(curve: &CubicBez) -> Speed {
        let q = curve.deriv();
        let (q0, q1, q2) = (q.p0.to_vec2(), q.p1.to_vec2(), q.p2.to_vec2());
        Speed {
            a: q0 - 2.0 * q1 + q2,
            b: 2.0 * (q1 - q0),
            c: q0,
        }
    }

    #[inline]
    fn at(&self, t: f64) -> f64 {
        ((self.a * t + self.b) * t + self.c).hypot()
    }

    /// Integrate over `[a, b]`, with a quadrature order that grows with the
    /// width of the range.
    fn integrate(&self, a: f64, b: f64) -> f64 {
        integrate(|t| self.at(t), a, b, iterations(a, b))
    }
}

/// Number of quadrature points for the range `[a, b]`: 32 per unit of
/// parameter, between 2 and 16.
fn iterations(a: f64, b: f64) -> usize {
    let n = ((b - a).abs() * 32.0).ceil();
    if n >= 16.0 {
        16
    } else if n > 2.0 {
        n as usize
    } else {
        2
    }
}

/// Running arc length from a moving start parameter.
///
/// Every evaluation integrates only from the previously evaluated parameter
/// to the new one, and adds the result to the total. Integrating backwards
/// subtracts.
struct ArcLengthAccumulator {
    speed: Speed,
    start: f64,
    length: f64,
    offset: f64,
}

impl RootFn for ArcLengthAccumulator {
    fn value(&mut self, t: f64) -> f64 {
        self.length += self.speed.integrate(self.start, t);
        self.start = t;
        self.length - self.offset
    }

    fn deriv(&mut self, t: f64) -> f64 {
        self.speed.at(t)
    }
}

impl CubicBez {
    /// The arc length of the whole curve.
    ///
    /// ```
    /// use bezkit::CubicBez;
    ///
    /// let c = CubicBez::new((0.0, 0.0), (0.0, 0.0), (3.0, 4.0), (3.0, 4.0));
    /// assert_eq!(c.length(), 5.0);
    /// ```
    #[inline]
    pub fn length(&self) -> f64 {
        self.length_range(0.0..1.0)
    }

    /// The arc length of the curve between two parameters.
    ///
    /// Straight curves are measured exactly, along the chord of the
    /// subsegment. Other curves are integrated with Gauss-Legendre
    /// quadrature.
    ///
    /// The result is signed: a range that runs backwards has negative
    /// length.
    pub fn length_range(&self, range: Range<f64>) -> f64 {
        let Range { start: a, end: b } = range;
        if a > b {
            return -self.length_range(b..a);
        }
        if self.is_straight() {
            let mut c = *self;
            let mut a = a;
            if b < 1.0 {
                c = c.subdivide_at(b).0;
                a /= b;
            }
            if a > 0.0 {
                c = c.subdivide_at(a).1;
            }
            return c.p0.distance(c.p3);
        }
        Speed::new(self).integrate(a, b)
    }

    /// The parameter at arc length `offset` from the parameter `start`.
    ///
    /// A positive `offset` walks forward, a negative one backward. `start`
    /// defaults to the beginning of the curve when walking forward, and to
    /// its end when walking backward.
    ///
    /// Returns `None` when the walk would leave the curve, or when `start`
    /// is outside `[0, 1]`. An offset within [`EPSILON`] of zero returns
    /// `start` itself.
    ///
    /// ```
    /// use bezkit::CubicBez;
    ///
    /// let c = CubicBez::new((0.0, 0.0), (0.0, 0.0), (3.0, 4.0), (3.0, 4.0));
    /// assert_eq!(c.time_at(5.0, None), Some(1.0));
    /// assert_eq!(c.time_at(-5.0, None), Some(0.0));
    /// assert_eq!(c.time_at(6.0, None), None);
    /// ```
    pub fn time_at(&self, offset: f64, start: Option<f64>) -> Option<f64> {
        if offset.is_nan() {
            return None;
        }
        let start = start.unwrap_or(if offset < 0.0 { 1.0 } else { 0.0 });
        if !(0.0..=1.0).contains(&start) {
            return None;
        }
        if is_zero(offset) {
            return Some(start);
        }
        let forward = offset > 0.0;
        let (a, b) = if forward { (start, 1.0) } else { (0.0, start) };
        let range_length = self.length_range(a..b);
        let diff = offset.abs() - range_length;
        if diff.abs() < EPSILON {
            return Some(if forward { b } else { a });
        }
        if diff > EPSILON {
            return None;
        }
        let guess = offset / range_length;
        let mut f = ArcLengthAccumulator {
            speed: Speed::new(self),
            start,
            length: 0.0,
            offset,
        };
        Some(find_root(
            &mut f,
            start + guess,
            a,
            b,
            TIME_AT_ITERATIONS,
            EPSILON,
        ))
    }
}

impl ParamCurveArclen for CubicBez {
    #[inline]
    fn arclen(&self) -> f64 {
        self.length()
    }

    #[inline]
    fn inv_arclen(&self, arclen: f64) -> Option<f64> {
        if arclen < 0.0 {
            return None;
        }
        self.time_at(arclen, Some(0.0))
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::{iterations, Speed};
    use crate::{CubicBez, ParamCurve, ParamCurveArclen, Point, EPSILON};

    /// A random curve whose speed stays above a quarter of its length.
    ///
    /// Near a cusp the speed has a kink, and the quadrature error grows to
    /// around a percent.
    fn random_curve(rng: &mut StdRng) -> CubicBez {
        loop {
            let mut p =
                || Point::new(rng.random_range(-100.0..100.0), rng.random_range(-100.0..100.0));
            let c = CubicBez::new(p(), p(), p(), p());
            let speed = Speed::new(&c);
            let min_speed = 0.25 * c.length();
            if (0..=64).all(|i| speed.at(f64::from(i) / 64.0) >= min_speed) {
                return c;
            }
        }
    }

    /// Arc length by summing many small chords.
    fn polyline_length(c: &CubicBez, n: usize) -> f64 {
        let mut len = 0.0;
        let mut last = c.p0;
        for i in 1..=n {
            let p = c.eval(i as f64 / n as f64);
            len += last.distance(p);
            last = p;
        }
        len
    }

    #[test]
    fn quadrature_orders() {
        assert_eq!(iterations(0.0, 1.0), 16);
        assert_eq!(iterations(0.0, 0.5), 16);
        assert_eq!(iterations(0.0, 0.25), 8);
        assert_eq!(iterations(0.25, 0.0), 8);
        assert_eq!(iterations(0.0, 0.01), 2);
        assert_eq!(iterations(0.3, 0.3), 2);
        assert_eq!(iterations(0.0, f64::NAN), 2);
    }

    #[test]
    fn straight_length() {
        let c = CubicBez::new((0.0, 0.0), (0.0, 0.0), (3.0, 4.0), (3.0, 4.0));
        assert_eq!(c.length(), 5.0);
        assert_eq!(c.arclen(), 5.0);
        // With handles inside the chord, the parametrization is uneven but
        // the length is still the chord.
        let c = CubicBez::new((0.0, 0.0), (2.0, 0.0), (2.5, 0.0), (3.0, 0.0));
        assert_eq!(c.length(), 3.0);
    }

    #[test]
    fn straight_length_range() {
        let c = CubicBez::new((0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0));
        let l = c.length_range(0.25..0.75);
        assert!((l - 1.5).abs() < 1e-12, "got {l}");
        let l = c.length_range(0.75..0.25);
        assert!((l + 1.5).abs() < 1e-12, "got {l}");
        assert_eq!(c.length_range(0.0..0.0), 0.0);
    }

    #[test]
    fn curved_length() {
        // y = x^2
        let c = CubicBez::new(
            (0.0, 0.0),
            (1.0 / 3.0, 0.0),
            (2.0 / 3.0, 1.0 / 3.0),
            (1.0, 1.0),
        );
        let true_arclen = 0.5 * 5.0f64.sqrt() + 0.25 * (2.0 + 5.0f64.sqrt()).ln();
        let l = c.length();
        assert!((l - true_arclen).abs() < 1e-9, "got {l}, expected {true_arclen}");
    }

    #[test]
    fn length_matches_polyline() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let c = random_curve(&mut rng);
            let l = c.length();
            let approx = polyline_length(&c, 10_000);
            assert!(
                (l - approx).abs() < 5e-3 * approx,
                "length {l}, polyline {approx}, {c:?}"
            );
        }
    }

    #[test]
    fn lengths_of_halves_add_up() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..50 {
            let c = random_curve(&mut rng);
            let t = rng.random_range(0.05..0.95);
            let (left, right) = c.subdivide_at(t);
            let sum = left.length() + right.length();
            let whole = c.length();
            assert!(
                (sum - whole).abs() < 5e-3 * whole,
                "t = {t}: {sum} != {whole}, {c:?}"
            );
        }
    }

    #[test]
    fn time_at_inverts_length() {
        let c = CubicBez::new((0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0));
        for &t0 in &[0.1, 0.25, 0.5, 0.7, 0.9] {
            let l = c.length_range(0.0..t0);
            let t = c.time_at(l, Some(0.0)).unwrap();
            assert!((t - t0).abs() < 1e-6, "t0 = {t0}: got {t}");
            assert_eq!(c.inv_arclen(l), Some(t));
        }
    }

    #[test]
    fn time_at_backward() {
        let c = CubicBez::new((0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0));
        let l = c.length_range(0.3..1.0);
        let t = c.time_at(-l, None).unwrap();
        assert!((t - 0.3).abs() < 1e-6, "got {t}");
        let l = c.length_range(0.2..0.6);
        let t = c.time_at(-l, Some(0.6)).unwrap();
        assert!((t - 0.2).abs() < 1e-6, "got {t}");
    }

    #[test]
    fn time_at_random_curves() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let c = random_curve(&mut rng);
            let t0 = rng.random_range(0.05..0.95);
            let l = c.length_range(0.0..t0);
            let t = c.time_at(l, Some(0.0)).unwrap();
            assert!((t - t0).abs() < 5e-3, "t0 = {t0}: got {t}, {c:?}");
        }
    }

    #[test]
    fn time_at_ends() {
        let c = CubicBez::new((0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0));
        let len = c.length();
        assert_eq!(c.time_at(len, None), Some(1.0));
        assert_eq!(c.time_at(len + 0.5 * EPSILON, None), Some(1.0));
        assert_eq!(c.time_at(-len, None), Some(0.0));
        assert_eq!(c.time_at(0.0, None), Some(0.0));
        assert_eq!(c.time_at(0.0, Some(0.4)), Some(0.4));
        // Negative zero does not walk backward.
        assert_eq!(c.time_at(-0.0, None), Some(0.0));
    }

    #[test]
    fn time_at_out_of_range() {
        let c = CubicBez::new((0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0));
        let len = c.length();
        assert_eq!(c.time_at(len + 1e-9, None), None);
        assert_eq!(c.time_at(-len - 1e-9, None), None);
        assert_eq!(c.time_at(len * 0.6, Some(0.5)), None);
        assert_eq!(c.time_at(1.0, Some(1.5)), None);
        assert_eq!(c.time_at(f64::NAN, None), None);
        assert_eq!(c.inv_arclen(-1.0), None);

        let p = CubicBez::new((1.0, 1.0), (1.0, 1.0), (1.0, 1.0), (1.0, 1.0));
        assert_eq!(p.time_at(1.0, None), None);
    }
}
