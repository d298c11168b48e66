//! Seven point piecewise parabolic reconstruction
//!
//! # References
//! Rider, Greenough & Kamm, Accurate monotonicity- and extrema-preserving
//! methods through adaptive nonlinear hybridizations, J. Comput. Phys. 225 (2007)
//!
//! Colella & Sekora, A limiter for PPM that preserves accuracy at smooth
//! extrema, J. Comput. Phys. 227 (2008)
use super::limiter::{is_extremum, limit_parabola, limit_parabola_smooth, median};
use super::Reconstruct;
use crate::types::{lit, FloatNum};
use std::ops::Range;

/// Weights of the upwind biased seventh order edge interpolant,
/// applied to `q[i-3..=i+3]` for the upper edge of cell `i`.
/// The lower edge uses the mirrored weights.
const W7: [f32; 7] = [-3., 25., -101., 319., 214., -38., 4.];
const W7_DENOM: f32 = 420.;

/// Seven point PPM (xsPPM7)
///
/// 1. Both edges of a cell are interpolated from a seven point
///    stencil, which is exact for polynomials up to degree six.
/// 2. Each edge is bounded by the means of the two cells sharing
///    the face, so no face value leaves the range of its neighbors.
/// 3. The parabola is limited to be monotone. At strict local extrema
///    of the cell means its curvature is limited instead of flattening
///    the cell.
///
/// Needs four ghost cells, see [`crate::interpolate::Q_MIN_GCW`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct XsPpm7;

impl XsPpm7 {
    #[inline]
    fn upper_edge<A: FloatNum>(q: &[A], i: usize) -> A {
        let mut acc = A::zero();
        for (k, w) in W7.iter().enumerate() {
            acc += lit::<A>(*w) * q[i + k - 3];
        }
        acc / lit::<A>(W7_DENOM)
    }

    #[inline]
    fn lower_edge<A: FloatNum>(q: &[A], i: usize) -> A {
        let mut acc = A::zero();
        for (k, w) in W7.iter().rev().enumerate() {
            acc += lit::<A>(*w) * q[i + k - 3];
        }
        acc / lit::<A>(W7_DENOM)
    }
}

impl Reconstruct for XsPpm7 {
    fn name(&self) -> &'static str {
        "xsppm7"
    }

    fn min_ghost_width(&self) -> usize {
        4
    }

    fn edges<A: FloatNum>(
        &self,
        q: &[A],
        cells: Range<usize>,
        _dq: &mut [A],
        q_minus: &mut [A],
        q_plus: &mut [A],
    ) {
        for i in cells {
            let qp = median(Self::upper_edge(q, i), q[i], q[i + 1]);
            let qm = median(Self::lower_edge(q, i), q[i - 1], q[i]);
            let (qm, qp) = if is_extremum(q[i - 1], q[i], q[i + 1]) {
                limit_parabola_smooth([q[i - 2], q[i - 1], q[i], q[i + 1], q[i + 2]], qm, qp)
            } else {
                limit_parabola(q[i], qm, qp)
            };
            q_minus[i] = qm;
            q_plus[i] = qp;
        }
    }
}
