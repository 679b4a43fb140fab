// Copyright 2026 the Bezkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape classification of cubic Bézier segments.

use core::fmt;

use arrayvec::ArrayVec;

use crate::{is_zero, CubicBez};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// The shape of a cubic Bézier segment.
///
/// Parameters carried by the variants lie strictly inside `(0, 1)`, and
/// where there are two they are in ascending order.
///
/// A serpentine has inflection points, a cusp has a point where the curve
/// turns back on itself, and a loop crosses itself between its two
/// parameters. When these features fall outside the segment, what remains
/// is an [`Arch`](CurveType::Arch).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveType {
    /// All four points are collinear.
    Line,
    /// The curve is a quadratic Bézier in disguise.
    Quadratic,
    /// The curve has one or two inflection points.
    Serpentine {
        /// The first inflection point.
        t1: f64,
        /// The second inflection point, if it lies within the segment.
        t2: Option<f64>,
    },
    /// The curve has a cusp.
    Cusp {
        /// The parameter of the cusp.
        t: f64,
    },
    /// The curve crosses itself.
    Loop {
        /// The parameter at which the curve first passes the crossing.
        t1: f64,
        /// The parameter at which the curve passes the crossing again.
        t2: f64,
    },
    /// A simple bend, with no inflection, cusp or loop inside the segment.
    Arch,
}

impl CurveType {
    /// The interior parameters carried by this classification, ascending.
    pub fn roots(&self) -> ArrayVec<f64, 2> {
        let mut roots = ArrayVec::new();
        match *self {
            CurveType::Serpentine { t1, t2 } => {
                roots.push(t1);
                if let Some(t2) = t2 {
                    roots.push(t2);
                }
            }
            CurveType::Cusp { t } => roots.push(t),
            CurveType::Loop { t1, t2 } => {
                roots.push(t1);
                roots.push(t2);
            }
            CurveType::Line | CurveType::Quadratic | CurveType::Arch => {}
        }
        roots
    }

    /// The lower-case name of the curve type.
    pub fn name(&self) -> &'static str {
        match self {
            CurveType::Line => "line",
            CurveType::Quadratic => "quadratic",
            CurveType::Serpentine { .. } => "serpentine",
            CurveType::Cusp { .. } => "cusp",
            CurveType::Loop { .. } => "loop",
            CurveType::Arch => "arch",
        }
    }

    fn serpentine(t1: f64, t2: Option<f64>) -> CurveType {
        match (interior(t1), t2.filter(|&t| interior(t))) {
            (true, Some(t2)) => CurveType::Serpentine {
                t1: t1.min(t2),
                t2: Some(t1.max(t2)),
            },
            (true, None) => CurveType::Serpentine { t1, t2: None },
            (false, Some(t2)) => CurveType::Serpentine { t1: t2, t2: None },
            (false, None) => CurveType::Arch,
        }
    }

    fn cusp(t: f64) -> CurveType {
        if interior(t) {
            CurveType::Cusp { t }
        } else {
            CurveType::Arch
        }
    }

    fn loop_between(t1: f64, t2: f64) -> CurveType {
        if interior(t1) && interior(t2) {
            CurveType::Loop {
                t1: t1.min(t2),
                t2: t1.max(t2),
            }
        } else {
            CurveType::Arch
        }
    }
}

impl fmt::Display for CurveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn interior(t: f64) -> bool {
    t > 0.0 && t < 1.0
}

impl CubicBez {
    /// Classify the shape of the curve.
    ///
    /// This follows Loop and Blinn, "Resolution Independent Curve Rendering
    /// using Programmable Graphics Hardware" (GPU Gems 3, chapter 25): the
    /// roots of the inflection polynomial decide between serpentine, cusp and
    /// loop. Features whose parameters fall outside `(0, 1)` are dropped,
    /// and the curve degrades to an arch when none survive. A loop needs
    /// both of its parameters inside the segment.
    ///
    /// ```
    /// use bezkit::{CubicBez, CurveType};
    ///
    /// let c = CubicBez::from_values([0.0, 0.0, 100.0, 100.0, 0.0, 100.0, 100.0, 0.0]);
    /// assert_eq!(c.classify(), CurveType::Cusp { t: 0.5 });
    /// ```
    pub fn classify(&self) -> CurveType {
        let [x0, y0, x1, y1, x2, y2, x3, y3] = self.to_values();
        // Coefficients of the inflection polynomial.
        let a1 = x0 * (y3 - y2) + y0 * (x2 - x3) + x3 * y2 - y3 * x2;
        let a2 = x1 * (y0 - y3) + y1 * (x3 - x0) + x0 * y3 - y0 * x3;
        let a3 = x2 * (y1 - y0) + y2 * (x0 - x1) + x1 * y0 - y1 * x0;
        let d3 = 3.0 * a3;
        let d2 = d3 - a2;
        let d1 = d2 - a2 + a1;
        // Normalize so the zero tests below are scale independent.
        let l = (d1 * d1 + d2 * d2 + d3 * d3).sqrt();
        let s = if l != 0.0 { l.recip() } else { 0.0 };
        let (d1, d2, d3) = (d1 * s, d2 * s, d3 * s);

        if is_zero(d1) {
            return if !is_zero(d2) {
                CurveType::serpentine(d3 / (3.0 * d2), None)
            } else if is_zero(d3) {
                CurveType::Line
            } else {
                CurveType::Quadratic
            };
        }
        let d = 3.0 * d2 * d2 - 4.0 * d1 * d3;
        if is_zero(d) {
            return CurveType::cusp(d2 / (2.0 * d1));
        }
        let f1 = if d > 0.0 { (d / 3.0).sqrt() } else { (-d).sqrt() };
        let f2 = 2.0 * d1;
        let (t1, t2) = ((d2 + f1) / f2, (d2 - f1) / f2);
        if d > 0.0 {
            CurveType::serpentine(t1, Some(t2))
        } else {
            CurveType::loop_between(t1, t2)
        }
    }
}
