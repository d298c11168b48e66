//! First order upwind reconstruction
use super::Reconstruct;
use crate::types::FloatNum;
use std::ops::Range;

/// Piecewise constant profile, both edges equal the cell mean
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PiecewiseConstant;

impl Reconstruct for PiecewiseConstant {
    fn name(&self) -> &'static str {
        "upwind"
    }

    fn min_ghost_width(&self) -> usize {
        1
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
            q_minus[i] = q[i];
            q_plus[i] = q[i];
        }
    }
}
