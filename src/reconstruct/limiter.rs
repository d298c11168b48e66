//! Slope and parabola limiter
//!
//! All functions operate on single values and are meant to be
//! inlined into the pencil loops of the reconstruction schemes.
use crate::types::{lit, FloatNum};

/// Median of three values
#[inline]
pub fn median<A: FloatNum>(a: A, b: A, c: A) -> A {
    a.max(b.min(c)).min(b.max(c))
}

/// True if `q0` is a strict local extremum of the three means
#[inline]
pub fn is_extremum<A: FloatNum>(qm: A, q0: A, qp: A) -> bool {
    (qp - q0) * (q0 - qm) < A::zero()
}

/// Monotonized central slope of cell with neighbors `qm` and `qp`
///
/// Zero at local extrema, the central difference for smooth
/// monotone data and never steeper than twice the one sided
/// differences.
#[inline]
pub fn mc_slope<A: FloatNum>(qm: A, q0: A, qp: A) -> A {
    let dl = q0 - qm;
    let dr = qp - q0;
    if dl * dr <= A::zero() {
        return A::zero();
    }
    let two = lit::<A>(2.);
    let dc = (qp - qm) / two;
    let lim = (two * dl.abs()).min(two * dr.abs());
    dc.signum() * dc.abs().min(lim)
}

/// Colella & Woodward (1984) parabola limiter
///
/// Given the mean `q0` and the edge values of a cell, returns
/// edge values of a parabola without interior extremum.
/// Cells which are local extrema are flattened.
#[inline]
pub fn limit_parabola<A: FloatNum>(q0: A, q_minus: A, q_plus: A) -> (A, A) {
    if (q_plus - q0) * (q0 - q_minus) <= A::zero() {
        return (q0, q0);
    }
    limit_overshoot(q0, q_minus, q_plus)
}

/// Move one edge if the parabola overshoots the opposite edge
#[inline]
fn limit_overshoot<A: FloatNum>(q0: A, q_minus: A, q_plus: A) -> (A, A) {
    let dq = q_plus - q_minus;
    let q6 = lit::<A>(6.) * (q0 - lit::<A>(0.5) * (q_minus + q_plus));
    let dq2 = dq * dq;
    if dq * q6 > dq2 {
        (lit::<A>(3.) * q0 - lit::<A>(2.) * q_plus, q_plus)
    } else if -dq2 > dq * q6 {
        (q_minus, lit::<A>(3.) * q0 - lit::<A>(2.) * q_minus)
    } else {
        (q_minus, q_plus)
    }
}

/// Parabola limiter which keeps smooth extrema
///
/// Like [`limit_parabola`], but at a local extremum the curvature
/// of the parabola is limited against the second differences of
/// the neighborhood `q[-2..=2]` (Colella & Sekora, 2008) instead
/// of flattening the cell. The scaled edges stay between the
/// cell mean and their unlimited values.
#[inline]
pub fn limit_parabola_smooth<A: FloatNum>(q: [A; 5], q_minus: A, q_plus: A) -> (A, A) {
    let q0 = q[2];
    if (q_plus - q0) * (q0 - q_minus) > A::zero() {
        return limit_overshoot(q0, q_minus, q_plus);
    }
    let d2 = lit::<A>(6.) * (q_minus - lit::<A>(2.) * q0 + q_plus);
    let d2l = q[0] - lit::<A>(2.) * q[1] + q[2];
    let d2c = q[1] - lit::<A>(2.) * q[2] + q[3];
    let d2r = q[2] - lit::<A>(2.) * q[3] + q[4];
    let same_sign = d2.signum() == d2l.signum()
        && d2.signum() == d2c.signum()
        && d2.signum() == d2r.signum();
    if d2 == A::zero() || !same_sign {
        return (q0, q0);
    }
    let c = lit::<A>(1.25);
    let d2_lim = d2.abs().min(c * d2l.abs()).min(c * d2c.abs()).min(c * d2r.abs());
    let ratio = d2_lim / d2.abs();
    (q0 + (q_minus - q0) * ratio, q0 + (q_plus - q0) * ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median() {
        assert_eq!(median(1., 2., 3.), 2.);
        assert_eq!(median(3., 1., 2.), 2.);
        assert_eq!(median(-1., 5., 0.), 0.);
        assert_eq!(median(4., 4., 0.), 4.);
    }

    #[test]
    fn test_is_extremum() {
        assert!(is_extremum(0., 1., 0.5));
        assert!(is_extremum(1., -1., 0.));
        assert!(!is_extremum(0., 1., 2.));
        // plateaus are not strict extrema
        assert!(!is_extremum(1., 1., 0.));
        assert!(!is_extremum(0., 1., 1.));
    }

    #[test]
    fn test_mc_slope() {
        // linear data: central difference
        assert_eq!(mc_slope(1., 2., 3.), 1.);
        // extremum
        assert_eq!(mc_slope(1., 2., 1.), 0.);
        // step: limited by twice the smaller one sided difference
        assert_eq!(mc_slope(0., 0.125, 1.), 0.25);
        assert_eq!(mc_slope(1., 0.875, 0.), -0.25);
    }

    #[test]
    fn test_limit_parabola() {
        // monotone parabola is untouched
        assert_eq!(limit_parabola(0.5, 0., 1.), (0., 1.));
        // extremum is flattened
        assert_eq!(limit_parabola(1., 0.5, 0.7), (1., 1.));
        // overshoot: left edge is reset
        let (qm, qp) = limit_parabola(0.9_f64, 0., 1.);
        assert!((qm - 0.7).abs() < 1e-12);
        assert_eq!(qp, 1.);
        // overshoot: right edge is reset
        let (qm, qp) = limit_parabola(0.1_f64, 0., 1.);
        assert_eq!(qm, 0.);
        assert!((qp - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_limit_parabola_smooth() {
        // smooth maximum of a parabola keeps its curvature
        let q = [-4_f64, -1., 0., -1., -4.];
        let (qm, qp) = limit_parabola_smooth(q, -0.25, -0.25);
        assert!(qm < 0. && qp < 0.);
        assert!(qm >= -0.25 && qp >= -0.25);
        // a spike is flattened
        let q = [0., 0., 1., 0., 0.];
        assert_eq!(limit_parabola_smooth(q, 0.5, 0.5), (1., 1.));
    }
}
