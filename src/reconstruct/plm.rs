//! Piecewise linear reconstruction
use super::limiter::mc_slope;
use super::Reconstruct;
use crate::types::{lit, FloatNum};
use std::ops::Range;

/// Piecewise linear profile with monotonized central slopes
/// (van Leer, 1977)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Plm;

impl Reconstruct for Plm {
    fn name(&self) -> &'static str {
        "plm"
    }

    fn min_ghost_width(&self) -> usize {
        2
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
        for i in cells {
            dq[i] = mc_slope(q[i - 1], q[i], q[i + 1]);
            q_minus[i] = q[i] - half * dq[i];
            q_plus[i] = q[i] + half * dq[i];
        }
    }
}
