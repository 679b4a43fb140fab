// Copyright 2026 the Bezkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named tolerances.
//!
//! Each constant covers one kind of comparison, so that the same question
//! is always answered with the same tolerance throughout the crate.

/// General numeric tolerance, used to decide whether a value is zero.
pub const EPSILON: f64 = 1e-12;

/// The difference between 1.0 and the next representable `f64`, rounded up
/// slightly.
pub const MACHINE_EPSILON: f64 = 1.12e-16;

/// Tolerance on curve parameters.
///
/// Parameters closer than this to `0` or `1` count as the boundary of the
/// curve, not as its interior.
pub const CURVETIME_EPSILON: f64 = 1e-8;

/// Tolerance on distances, used by the straightness test.
pub const GEOMETRIC_EPSILON: f64 = 1e-7;

/// Tolerance on angles, expressed as the sine of the angle between two
/// vectors. Used for collinearity.
pub const TRIGONOMETRIC_EPSILON: f64 = 1e-8;

/// Is `value` zero within [`EPSILON`]?
#[inline]
pub fn is_zero(value: f64) -> bool {
    (-EPSILON..=EPSILON).contains(&value)
}
