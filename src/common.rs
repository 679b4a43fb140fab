// Copyright 2026 the Bezkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common mathematical operations: polynomial root finding, numerical
//! integration and a bracketed root search.

use arrayvec::ArrayVec;

use crate::EPSILON;

/// Defines a trait that chooses between libstd or libm implementations of float methods.
macro_rules! define_float_funcs {
    ($(
        fn $name:ident(self $(,$arg:ident: $arg_ty:ty)*) -> $ret:ty
        => $lname:ident;
    )+) => {
        #[cfg(not(feature = "std"))]
        pub(crate) trait FloatFuncs : Sized {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret;)+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f64 {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("bezkit requires either the `std` or `libm` feature")
            })+
        }
    }
}

define_float_funcs! {
    fn abs(self) -> Self => fabs;
    fn atan2(self, other: Self) -> Self => atan2;
    fn cbrt(self) -> Self => cbrt;
    fn ceil(self) -> Self => ceil;
    fn copysign(self, sign: Self) -> Self => copysign;
    fn mul_add(self, a: Self, b: Self) -> Self => fma;
    fn powf(self, n: Self) -> Self => pow;
    fn round(self) -> Self => round;
    fn sin_cos(self) -> (Self, Self) => sincos;
    fn sqrt(self) -> Self => sqrt;
}

/// Find real roots of cubic equation.
///
/// The implementation is not (yet) fully robust, but it does handle the case
/// where `c3` is zero (in that case, solving the quadratic equation).
///
/// See: <https://momentsingraphics.de/CubicRoots.html>
///
/// That implementation is in turn based on Jim Blinn's "How to Solve a Cubic
/// Equation", which is masterful.
///
/// Return values of x for which c0 + c1 x + c2 x² + c3 x³ = 0.
pub fn solve_cubic(c0: f64, c1: f64, c2: f64, c3: f64) -> ArrayVec<f64, 3> {
    let mut result = ArrayVec::new();
    let c3_recip = c3.recip();
    const ONETHIRD: f64 = 1. / 3.;
    let scaled_c2 = c2 * (ONETHIRD * c3_recip);
    let scaled_c1 = c1 * (ONETHIRD * c3_recip);
    let scaled_c0 = c0 * c3_recip;
    if !(scaled_c0.is_finite() && scaled_c1.is_finite() && scaled_c2.is_finite()) {
        // cubic coefficient is zero or nearly so.
        for root in solve_quadratic(c0, c1, c2) {
            result.push(root);
        }
        return result;
    }
    let (c0, c1, c2) = (scaled_c0, scaled_c1, scaled_c2);
    // (d0, d1, d2) is called "Delta" in article
    let d0 = (-c2).mul_add(c2, c1);
    let d1 = (-c1).mul_add(c2, c0);
    let d2 = c2 * c0 - c1 * c1;
    // d is called "Discriminant"
    let d = 4.0 * d0 * d2 - d1 * d1;
    // de is called "Depressed.x", Depressed.y = d0
    let de = (-2.0 * c2).mul_add(d0, d1);
    if d < 0.0 {
        let sq = (-0.25 * d).sqrt();
        let r = -0.5 * de;
        let t1 = (r + sq).cbrt() + (r - sq).cbrt();
        result.push(t1 - c2);
    } else if d == 0.0 {
        let t1 = (-d0).sqrt().copysign(de);
        result.push(t1 - c2);
        result.push(-2.0 * t1 - c2);
    } else {
        let th = d.sqrt().atan2(-de) * ONETHIRD;
        // (th_cos, th_sin) is called "CubicRoot"
        let (th_sin, th_cos) = th.sin_cos();
        // (r0, r1, r2) is called "Root"
        let r0 = th_cos;
        let ss3 = th_sin * 3.0f64.sqrt();
        let r1 = 0.5 * (-th_cos + ss3);
        let r2 = 0.5 * (-th_cos - ss3);
        let t = 2.0 * (-d0).sqrt();
        result.push(t.mul_add(r0, -c2));
        result.push(t.mul_add(r1, -c2));
        result.push(t.mul_add(r2, -c2));
    }
    result
}

/// Find the real roots of a cubic equation that lie within `[min, max]`.
///
/// Solves c0 + c1 x + c2 x² + c3 x³ = 0 like [`solve_cubic`], then keeps
/// the roots within [`EPSILON`] of the interval, clamping them into it. The
/// surviving roots are deduplicated, sorted ascending and written to the
/// start of `roots`.
///
/// Returns the number of roots written, which never exceeds `roots.len()`.
///
/// ```
/// use bezkit::common::solve_cubic_in_range;
///
/// // (x - 0.25)(x - 0.5)(x - 2)
/// let mut roots = [0.0; 3];
/// let n = solve_cubic_in_range(-0.25, 1.625, -2.75, 1.0, &mut roots, 0.0, 1.0);
/// assert_eq!(n, 2);
/// assert!((roots[0] - 0.25).abs() < 1e-12);
/// assert!((roots[1] - 0.5).abs() < 1e-12);
/// ```
pub fn solve_cubic_in_range(
    c0: f64,
    c1: f64,
    c2: f64,
    c3: f64,
    roots: &mut [f64],
    min: f64,
    max: f64,
) -> usize {
    if min.is_nan() || max.is_nan() || min > max {
        return 0;
    }
    let mut found = ArrayVec::<f64, 3>::new();
    for root in solve_cubic(c0, c1, c2, c3) {
        if root > min - EPSILON && root < max + EPSILON {
            let root = root.max(min).min(max);
            if !found.contains(&root) {
                found.push(root);
            }
        }
    }
    found.sort_by(f64::total_cmp);
    let n = found.len().min(roots.len());
    roots[..n].copy_from_slice(&found[..n]);
    n
}

/// Find real roots of quadratic equation.
///
/// Return values of x for which c0 + c1 x + c2 x² = 0.
///
/// This function tries to be quite numerically robust. If the equation
/// is nearly linear, it will return the root ignoring the quadratic term;
/// the other root might be out of representable range. In the degenerate
/// case where all coefficients are zero, so that all values of x satisfy
/// the equation, a single `0.0` is returned.
pub fn solve_quadratic(c0: f64, c1: f64, c2: f64) -> ArrayVec<f64, 2> {
    let mut result = ArrayVec::new();
    let sc0 = c0 * c2.recip();
    let sc1 = c1 * c2.recip();
    if !sc0.is_finite() || !sc1.is_finite() {
        // c2 is zero or very small, treat as linear eqn
        let root = -c0 / c1;
        if root.is_finite() {
            result.push(root);
        } else if c0 == 0.0 && c1 == 0.0 {
            // Degenerate case
            result.push(0.0);
        }
        return result;
    }
    let arg = sc1 * sc1 - 4. * sc0;
    let root1 = if !arg.is_finite() {
        // Likely, calculation of sc1 * sc1 overflowed. Find one root
        // using sc1 x + x² = 0, other root as sc0 / root1.
        -sc1
    } else {
        if arg < 0.0 {
            return result;
        } else if arg == 0.0 {
            result.push(-0.5 * sc1);
            return result;
        }
        // See https://math.stackexchange.com/questions/866331
        -0.5 * (sc1 + arg.sqrt().copysign(sc1))
    };
    let root2 = sc0 / root1;
    if root2.is_finite() {
        // Sort just to be friendly and make results deterministic.
        if root2 > root1 {
            result.push(root1);
            result.push(root2);
        } else {
            result.push(root2);
            result.push(root1);
        }
    } else {
        result.push(root1);
    }
    result
}

/// A function together with its derivative, as consumed by [`find_root`].
///
/// Both methods take `&mut self`, so an implementation may carry state from
/// one evaluation to the next (for example a running integral).
///
/// Closure pairs `(f, df)` implement this trait.
pub trait RootFn {
    /// Evaluate the function at `x`.
    fn value(&mut self, x: f64) -> f64;

    /// Evaluate the derivative of the function at `x`.
    fn deriv(&mut self, x: f64) -> f64;
}

impl<F, D> RootFn for (F, D)
where
    F: FnMut(f64) -> f64,
    D: FnMut(f64) -> f64,
{
    #[inline]
    fn value(&mut self, x: f64) -> f64 {
        (self.0)(x)
    }

    #[inline]
    fn deriv(&mut self, x: f64) -> f64 {
        (self.1)(x)
    }
}

/// Find a zero crossing of an increasing function within `[a, b]`.
///
/// Starting from `x`, this takes Newton-Raphson steps, and narrows the
/// bracket `[a, b]` with every evaluation. A step that would leave the
/// bracket, or that is not finite, is replaced by bisection. The search
/// stops once a Newton step is smaller than `tolerance`, or after at most
/// `n` evaluations.
///
/// The result is always clamped to the final bracket.
///
/// ```
/// use bezkit::common::find_root;
///
/// let mut f = (|x: f64| x * x - 2.0, |x: f64| 2.0 * x);
/// let x = find_root(&mut f, 1.0, 0.0, 2.0, 32, 1e-12);
/// assert!((x - 2f64.sqrt()).abs() < 1e-12);
/// ```
pub fn find_root(
    f: &mut impl RootFn,
    mut x: f64,
    mut a: f64,
    mut b: f64,
    n: usize,
    tolerance: f64,
) -> f64 {
    for _ in 0..n {
        let fx = f.value(x);
        let dx = fx / f.deriv(x);
        let nx = x - dx;
        if dx.abs() < tolerance {
            x = nx;
            break;
        }
        // Update the bracket, and fall back to bisection whenever the
        // Newton step escapes it.
        if fx > 0.0 {
            b = x;
            x = if nx > a { nx } else { 0.5 * (a + b) };
        } else {
            a = x;
            x = if nx < b { nx } else { 0.5 * (a + b) };
        }
    }
    x.max(a).min(b)
}

/// Integrate `f` over `[a, b]` with Gauss-Legendre quadrature.
///
/// `n` is the number of function evaluations requested; the quadrature
/// uses the smallest tabulated order that is at least `n` (see
/// [`gauss_legendre_coeffs`]). The result is exact for polynomials of
/// degree up to `2 * order - 1`.
///
/// The integral is signed: swapping `a` and `b` negates the result.
pub fn integrate(mut f: impl FnMut(f64) -> f64, a: f64, b: f64, n: usize) -> f64 {
    let half = 0.5 * (b - a);
    let mid = half + a;
    half * gauss_legendre_coeffs(n)
        .iter()
        .map(|&(wi, xi)| wi * f(mid + half * xi))
        .sum::<f64>()
}

/// The Gauss-Legendre coefficients of the smallest tabulated order that is
/// at least `n`.
///
/// Orders 2 through 12, 16, 24 and 32 are tabulated; requests above 32 get
/// the 32-point rule.
pub fn gauss_legendre_coeffs(n: usize) -> &'static [(f64, f64)] {
    match n {
        0..=2 => GAUSS_LEGENDRE_COEFFS_2,
        3 => GAUSS_LEGENDRE_COEFFS_3,
        4 => GAUSS_LEGENDRE_COEFFS_4,
        5 => GAUSS_LEGENDRE_COEFFS_5,
        6 => GAUSS_LEGENDRE_COEFFS_6,
        7 => GAUSS_LEGENDRE_COEFFS_7,
        8 => GAUSS_LEGENDRE_COEFFS_8,
        9 => GAUSS_LEGENDRE_COEFFS_9,
        10 => GAUSS_LEGENDRE_COEFFS_10,
        11 => GAUSS_LEGENDRE_COEFFS_11,
        12 => GAUSS_LEGENDRE_COEFFS_12,
        13..=16 => GAUSS_LEGENDRE_COEFFS_16,
        17..=24 => GAUSS_LEGENDRE_COEFFS_24,
        _ => GAUSS_LEGENDRE_COEFFS_32,
    }
}

// Tables of Legendre-Gauss quadrature coefficients as (weight, abscissa)
// pairs, adapted from:
// <https://pomax.github.io/bezierinfo/legendre-gauss.html>

/// Two-point Gauss-Legendre rule.
pub const GAUSS_LEGENDRE_COEFFS_2: &[(f64, f64)] = &[
    (1.0000000000000000, -0.5773502691896257),
    (1.0000000000000000, 0.5773502691896257),
];

/// Three-point Gauss-Legendre rule.
pub const GAUSS_LEGENDRE_COEFFS_3: &[(f64, f64)] = &[
    (0.8888888888888888, 0.0000000000000000),
    (0.5555555555555556, -0.7745966692414834),
    (0.5555555555555556, 0.7745966692414834),
];

/// Four-point Gauss-Legendre rule.
pub const GAUSS_LEGENDRE_COEFFS_4: &[(f64, f64)] = &[
    (0.6521451548625461, -0.3399810435848563),
    (0.6521451548625461, 0.3399810435848563),
    (0.3478548451374538, -0.8611363115940526),
    (0.3478548451374538, 0.8611363115940526),
];

/// Five-point Gauss-Legendre rule.
pub const GAUSS_LEGENDRE_COEFFS_5: &[(f64, f64)] = &[
    (0.5688888888888889, 0.0000000000000000),
    (0.4786286704993665, -0.5384693101056831),
    (0.4786286704993665, 0.5384693101056831),
    (0.2369268850561891, -0.9061798459386640),
    (0.2369268850561891, 0.9061798459386640),
];

/// Six-point Gauss-Legendre rule.
pub const GAUSS_LEGENDRE_COEFFS_6: &[(f64, f64)] = &[
    (0.3607615730481386, 0.6612093864662645),
    (0.3607615730481386, -0.6612093864662645),
    (0.4679139345726910, -0.2386191860831969),
    (0.4679139345726910, 0.2386191860831969),
    (0.1713244923791704, -0.9324695142031521),
    (0.1713244923791704, 0.9324695142031521),
];

/// Seven-point Gauss-Legendre rule.
pub const GAUSS_LEGENDRE_COEFFS_7: &[(f64, f64)] = &[
    (0.4179591836734694, 0.0000000000000000),
    (0.3818300505051189, 0.4058451513773972),
    (0.3818300505051189, -0.4058451513773972),
    (0.2797053914892766, -0.7415311855993945),
    (0.2797053914892766, 0.7415311855993945),
    (0.1294849661688697, -0.9491079123427585),
    (0.1294849661688697, 0.9491079123427585),
];

/// Eight-point Gauss-Legendre rule.
pub const GAUSS_LEGENDRE_COEFFS_8: &[(f64, f64)] = &[
    (0.3626837833783620, -0.1834346424956498),
    (0.3626837833783620, 0.1834346424956498),
    (0.3137066458778873, -0.5255324099163290),
    (0.3137066458778873, 0.5255324099163290),
    (0.2223810344533745, -0.7966664774136267),
    (0.2223810344533745, 0.7966664774136267),
    (0.1012285362903763, -0.9602898564975363),
    (0.1012285362903763, 0.9602898564975363),
];

/// Nine-point Gauss-Legendre rule.
pub const GAUSS_LEGENDRE_COEFFS_9: &[(f64, f64)] = &[
    (0.3302393550012598, 0.0000000000000000),
    (0.1806481606948574, -0.8360311073266358),
    (0.1806481606948574, 0.8360311073266358),
    (0.0812743883615744, -0.9681602395076261),
    (0.0812743883615744, 0.9681602395076261),
    (0.3123470770400029, -0.3242534234038089),
    (0.3123470770400029, 0.3242534234038089),
    (0.2606106964029354, -0.6133714327005904),
    (0.2606106964029354, 0.6133714327005904),
];

/// Ten-point Gauss-Legendre rule.
pub const GAUSS_LEGENDRE_COEFFS_10: &[(f64, f64)] = &[
    (0.2955242247147529, -0.1488743389816312),
    (0.2955242247147529, 0.1488743389816312),
    (0.2692667193099963, -0.4333953941292472),
    (0.2692667193099963, 0.4333953941292472),
    (0.2190863625159820, -0.6794095682990244),
    (0.2190863625159820, 0.6794095682990244),
    (0.1494513491505806, -0.8650633666889845),
    (0.1494513491505806, 0.8650633666889845),
    (0.0666713443086881, -0.9739065285171717),
    (0.0666713443086881, 0.9739065285171717),
];

/// Eleven-point Gauss-Legendre rule.
pub const GAUSS_LEGENDRE_COEFFS_11: &[(f64, f64)] = &[
    (0.2729250867779006, 0.0000000000000000),
    (0.2628045445102467, -0.2695431559523450),
    (0.2628045445102467, 0.2695431559523450),
    (0.2331937645919905, -0.5190961292068118),
    (0.2331937645919905, 0.5190961292068118),
    (0.1862902109277343, -0.7301520055740494),
    (0.1862902109277343, 0.7301520055740494),
    (0.1255803694649046, -0.8870625997680953),
    (0.1255803694649046, 0.8870625997680953),
    (0.0556685671161737, -0.9782286581460570),
    (0.0556685671161737, 0.9782286581460570),
];

/// Twelve-point Gauss-Legendre rule.
pub const GAUSS_LEGENDRE_COEFFS_12: &[(f64, f64)] = &[
    (0.2491470458134028, -0.1252334085114689),
    (0.2491470458134028, 0.1252334085114689),
    (0.2334925365383548, -0.3678314989981802),
    (0.2334925365383548, 0.3678314989981802),
    (0.2031674267230659, -0.5873179542866175),
    (0.2031674267230659, 0.5873179542866175),
    (0.1600783285433462, -0.7699026741943047),
    (0.1600783285433462, 0.7699026741943047),
    (0.1069393259953184, -0.9041172563704749),
    (0.1069393259953184, 0.9041172563704749),
    (0.0471753363865118, -0.9815606342467192),
    (0.0471753363865118, 0.9815606342467192),
];

/// Sixteen-point Gauss-Legendre rule.
pub const GAUSS_LEGENDRE_COEFFS_16: &[(f64, f64)] = &[
    (0.1894506104550685, -0.0950125098376374),
    (0.1894506104550685, 0.0950125098376374),
    (0.1826034150449236, -0.2816035507792589),
    (0.1826034150449236, 0.2816035507792589),
    (0.1691565193950025, -0.4580167776572274),
    (0.1691565193950025, 0.4580167776572274),
    (0.1495959888165767, -0.6178762444026438),
    (0.1495959888165767, 0.6178762444026438),
    (0.1246289712555339, -0.7554044083550030),
    (0.1246289712555339, 0.7554044083550030),
    (0.0951585116824928, -0.8656312023878318),
    (0.0951585116824928, 0.8656312023878318),
    (0.0622535239386479, -0.9445750230732326),
    (0.0622535239386479, 0.9445750230732326),
    (0.0271524594117541, -0.9894009349916499),
    (0.0271524594117541, 0.9894009349916499),
];

/// 24-point Gauss-Legendre rule.
pub const GAUSS_LEGENDRE_COEFFS_24: &[(f64, f64)] = &[
    (0.1279381953467522, -0.0640568928626056),
    (0.1279381953467522, 0.0640568928626056),
    (0.1258374563468283, -0.1911188674736163),
    (0.1258374563468283, 0.1911188674736163),
    (0.1216704729278034, -0.3150426796961634),
    (0.1216704729278034, 0.3150426796961634),
    (0.1155056680537256, -0.4337935076260451),
    (0.1155056680537256, 0.4337935076260451),
    (0.1074442701159656, -0.5454214713888396),
    (0.1074442701159656, 0.5454214713888396),
    (0.0976186521041139, -0.6480936519369755),
    (0.0976186521041139, 0.6480936519369755),
    (0.0861901615319533, -0.7401241915785544),
    (0.0861901615319533, 0.7401241915785544),
    (0.0733464814110803, -0.8200019859739029),
    (0.0733464814110803, 0.8200019859739029),
    (0.0592985849154368, -0.8864155270044011),
    (0.0592985849154368, 0.8864155270044011),
    (0.0442774388174198, -0.9382745520027328),
    (0.0442774388174198, 0.9382745520027328),
    (0.0285313886289337, -0.9747285559713095),
    (0.0285313886289337, 0.9747285559713095),
    (0.0123412297999872, -0.9951872199970213),
    (0.0123412297999872, 0.9951872199970213),
];

/// 32-point Gauss-Legendre rule.
pub const GAUSS_LEGENDRE_COEFFS_32: &[(f64, f64)] = &[
    (0.0965400885147278, -0.0483076656877383),
    (0.0965400885147278, 0.0483076656877383),
    (0.0956387200792749, -0.1444719615827965),
    (0.0956387200792749, 0.1444719615827965),
    (0.0938443990808046, -0.2392873622521371),
    (0.0938443990808046, 0.2392873622521371),
    (0.0911738786957639, -0.3318686022821277),
    (0.0911738786957639, 0.3318686022821277),
    (0.0876520930044038, -0.4213512761306353),
    (0.0876520930044038, 0.4213512761306353),
    (0.0833119242269467, -0.5068999089322294),
    (0.0833119242269467, 0.5068999089322294),
    (0.0781938957870703, -0.5877157572407623),
    (0.0781938957870703, 0.5877157572407623),
    (0.0723457941088485, -0.6630442669302152),
    (0.0723457941088485, 0.6630442669302152),
    (0.0658222227763618, -0.7321821187402897),
    (0.0658222227763618, 0.7321821187402897),
    (0.0586840934785355, -0.7944837959679424),
    (0.0586840934785355, 0.7944837959679424),
    (0.0509980592623762, -0.8493676137325700),
    (0.0509980592623762, 0.8493676137325700),
    (0.0428358980222267, -0.8963211557660521),
    (0.0428358980222267, 0.8963211557660521),
    (0.0342738629130214, -0.9349060759377397),
    (0.0342738629130214, 0.9349060759377397),
    (0.0253920653092621, -0.9647622555875064),
    (0.0253920653092621, 0.9647622555875064),
    (0.0162743947309057, -0.9856115115452684),
    (0.0162743947309057, 0.9856115115452684),
    (0.0070186100094701, -0.9972638618494816),
    (0.0070186100094701, 0.9972638618494816),
];
