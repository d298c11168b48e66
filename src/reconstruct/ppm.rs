//! Piecewise parabolic reconstruction
//!
//! # References
//! Colella & Woodward, The Piecewise Parabolic Method (PPM)
//! for gas-dynamical simulations, J. Comput. Phys. 54 (1984)
use super::limiter::{limit_parabola, mc_slope};
use super::Reconstruct;
use crate::types::{lit, FloatNum};
use std::ops::Range;

/// Classic PPM
///
/// Edge values are interpolated with fourth order accuracy
/// from the cell means and monotonized central slopes,
///
/// q(i+1/2) = (q(i) + q(i+1)) / 2 - (dq(i+1) - dq(i)) / 6,
///
/// which places them between the means of the adjacent
/// cells. The parabola is then limited to be monotone.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Ppm;

impl Reconstruct for Ppm {
    fn name(&self) -> &'static str {
        "ppm"
    }

    fn min_ghost_width(&self) -> usize {
        3
    }

    fn edges<A: FloatNum>(
        &self,
        q: &[A],
        cells: Range<usize>,
        dq: &mut [A],
        q_minus: &mut [A],
        q_plus: &mut [A],
    ) {
        let half = lit::<A>(0.5);
        let sixth = lit::<A>(1.) / lit::<A>(6.);
        let (lo, hi) = (cells.start, cells.end);
        for i in lo - 1..=hi {
            dq[i] = mc_slope(q[i - 1], q[i], q[i + 1]);
        }
        // q_minus[i] holds the unlimited face value at i - 1/2
        for i in lo..=hi {
            q_minus[i] = half * (q[i - 1] + q[i]) - sixth * (dq[i] - dq[i - 1]);
        }
        for i in cells {
            let (qm, qp) = limit_parabola(q[i], q_minus[i], q_minus[i + 1]);
            q_minus[i] = qm;
            q_plus[i] = qp;
        }
    }
}
