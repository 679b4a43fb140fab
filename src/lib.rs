// Copyright 2026 the Bezkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A geometry kernel for cubic Bézier segments.
//!
//! Bezkit answers questions about a single cubic Bézier segment: what shape
//! it has, where it is at a parameter, how it bends, how long it is, and
//! which parameter lies at a given distance along it. Curves are plain
//! [`Copy`] values; nothing is cached, and nothing is mutated in place.
//!
//! # Examples
//!
//! Classifying a curve and walking along it:
//! ```
//! use bezkit::{CubicBez, CurveType, Point};
//!
//! let c = CubicBez::new((0.0, 0.0), (0.0, 100.0), (100.0, 100.0), (100.0, 0.0));
//! assert_eq!(c.classify(), CurveType::Arch);
//!
//! let half = c.length() / 2.0;
//! let t = c.time_at(half, None).unwrap();
//! assert!((t - 0.5).abs() < 1e-9);
//! assert_eq!(c.point_at(0.5), Some(Point::new(50.0, 75.0)));
//! ```
//!
//! Curves also come in the flat coordinate form `[x0, y0, x1, y1, x2, y2,
//! x3, y3]`:
//! ```
//! use bezkit::{Affine, CubicBez};
//!
//! let c = CubicBez::try_from(&[0.0, 0.0, 1.0, 2.0, 3.0, 2.0, 4.0, 0.0][..]).unwrap();
//! let mut out = [0.0; 8];
//! c.write_values(Some(Affine::scale(2.0)), &mut out);
//! assert_eq!(out, [0.0, 0.0, 2.0, 4.0, 6.0, 4.0, 8.0, 0.0]);
//! ```
//!
//! # Feature Flags
//!
//! The following crate [feature flags](https://doc.rust-lang.org/cargo/reference/features.html#dependency-features) are available:
//!
//! - `std` (enabled by default): Get floating point functions from the standard library
//!   (likely using your target's libc).
//! - `libm`: Use floating point implementations from [libm][].
//!   This is useful for `no_std` environments.
//!   However, note that the `libm` crate is not as efficient as the standard library.
//! - `mint`: Enable `From`/`Into` conversion of Bezkit and [mint][] types, enabling interoperability
//!   with other graphics libraries.
//! - `serde`: Implement `serde::Deserialize` and `serde::Serialize` on various types.
//! - `schemars`: Add best-effort support for using Bezkit types in JSON schemas using [schemars][].
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//! Note that Bezkit does require that an allocator is available (i.e. it uses [alloc]).
//!
//! [libm]: https://docs.rs/libm
//! [mint]: https://docs.rs/mint
//! [schemars]: https://docs.rs/schemars

// LINEBENDER LINT SET - lib.rs - v1
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision,
    clippy::bool_to_int_with_if
)]
// The following lints are part of the Linebender standard set,
// but resolving them has been deferred for now.
#![allow(
    missing_debug_implementations,
    elided_lifetimes_in_paths,
    single_use_lifetimes,
    trivial_numeric_casts,
    unnameable_types,
    clippy::use_self,
    clippy::return_self_not_must_use,
    clippy::cast_possible_truncation,
    clippy::wildcard_imports,
    clippy::shadow_unrelated,
    clippy::missing_assert_message,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::exhaustive_enums,
    clippy::match_same_arms,
    clippy::partial_pub_fields,
    clippy::unseparated_literal_suffix,
    clippy::duplicated_attributes,
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason
)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("bezkit requires either the `std` or `libm` feature");

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use libm as _;

extern crate alloc;

mod affine;
mod arclen;
mod classify;
pub mod common;
mod cubicbez;
mod epsilon;
mod eval;
mod format;
mod line;
mod param_curve;
mod point;
mod quadbez;
mod stroke;
mod vec2;

pub use crate::affine::Affine;
pub use crate::classify::CurveType;
pub use crate::cubicbez::{CubicBez, CurveValues, ValuesLengthError};
pub use crate::epsilon::{
    is_zero, CURVETIME_EPSILON, EPSILON, GEOMETRIC_EPSILON, MACHINE_EPSILON,
    TRIGONOMETRIC_EPSILON,
};
pub use crate::eval::EvalKind;
pub use crate::format::Formatter;
pub use crate::line::{ConstPoint, Line};
pub use crate::param_curve::{
    ParamCurve, ParamCurveArclen, ParamCurveCurvature, ParamCurveDeriv,
};
pub use crate::point::Point;
pub use crate::quadbez::QuadBez;
pub use crate::stroke::stroke_padding;
pub use crate::vec2::Vec2;
