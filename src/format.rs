// Copyright 2026 the Bezkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact number formatting.

use alloc::format;
use alloc::string::String;

use crate::Point;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Fraction digits used by [`Formatter::default`].
const DEFAULT_PRECISION: u32 = 5;

/// Formats numbers with at most a fixed number of fraction digits.
///
/// Unlike `format!("{:.5}", v)`, trailing zeros are not printed, so `1.5`
/// stays `"1.5"` and `2.0` becomes `"2"`.
///
/// ```
/// use bezkit::{Formatter, Point};
///
/// let f = Formatter::new(2);
/// assert_eq!(f.number(3.14159), 3.14);
/// assert_eq!(f.point(Point::new(1.0, 2.0 / 3.0), None), "1,0.67");
/// assert_eq!(f.pair(0.5, 10.0, Some(" ")), "0.5 10");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Formatter {
    precision: u32,
    multiplier: f64,
}

impl Formatter {
    /// Create a formatter that keeps `precision` fraction digits.
    ///
    /// From 16 digits on, numbers are printed unchanged.
    pub fn new(precision: u32) -> Formatter {
        Formatter {
            precision,
            multiplier: 10f64.powf(f64::from(precision)),
        }
    }

    /// The number of fraction digits kept.
    #[inline]
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Round `value` to the precision of this formatter.
    ///
    /// Negative zero, including negative values that round to zero, comes
    /// out as positive zero.
    pub fn number(&self, value: f64) -> f64 {
        let value = if self.precision < 16 {
            (value * self.multiplier).round() / self.multiplier
        } else {
            value
        };
        if value == 0.0 {
            0.0
        } else {
            value
        }
    }

    /// Format two numbers, joined by `separator` (`","` when `None`).
    pub fn pair(&self, a: f64, b: f64, separator: Option<&str>) -> String {
        format!(
            "{}{}{}",
            self.number(a),
            separator.unwrap_or(","),
            self.number(b)
        )
    }

    /// Format the coordinates of a point, joined by `separator` (`","` when
    /// `None`).
    #[inline]
    pub fn point(&self, p: Point, separator: Option<&str>) -> String {
        self.pair(p.x, p.y, separator)
    }
}

impl Default for Formatter {
    fn default() -> Formatter {
        Formatter::new(DEFAULT_PRECISION)
    }
}
