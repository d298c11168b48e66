//! # Godunov face states along a pencil
//!
//! A pencil is a one dimensional, ghost padded copy of the
//! cell means along one axis. The reconstructed profile of
//! every cell is traced along the characteristics of the
//! advecting velocity to obtain left and right states at the
//! faces, which are then resolved by upwinding.
//!
//! # References
//! Colella & Woodward, The Piecewise Parabolic Method (PPM)
//! for gas-dynamical simulations, J. Comput. Phys. 54 (1984)
use crate::reconstruct::limiter::is_extremum;
use crate::reconstruct::{Reconstruct, Reconstruction};
use crate::types::{lit, FloatNum};
use ndarray::ArrayView1;

/// Scratch space of one pencil
///
/// Owned by a single sweep, reused for all pencils of
/// one axis and component.
#[derive(Debug, Clone)]
pub struct PencilScratch<A> {
    /// Cell means including ghost cells
    pub q: Vec<A>,
    /// Slopes
    pub dq: Vec<A>,
    /// Lower edge values
    pub q_minus: Vec<A>,
    /// Upper edge values
    pub q_plus: Vec<A>,
}

impl<A: FloatNum> PencilScratch<A> {
    /// Scratch for pencils of `len` cells (ghost cells included)
    pub fn new(len: usize) -> Self {
        Self {
            q: vec![A::zero(); len],
            dq: vec![A::zero(); len],
            q_minus: vec![A::zero(); len],
            q_plus: vec![A::zero(); len],
        }
    }

    /// Copy cell means of a lane into the pencil
    ///
    /// # Panics
    /// When the lane length differs from the pencil length.
    pub fn load(&mut self, lane: &ArrayView1<A>) {
        assert!(
            lane.len() == self.q.len(),
            "Pencil length mismatch: {} vs {}",
            lane.len(),
            self.q.len()
        );
        for (s, &v) in self.q.iter_mut().zip(lane.iter()) {
            *s = v;
        }
    }
}

/// State at the upper edge of a cell, averaged over the part of the
/// cell which crosses the edge within one step, `sigma = |u| dt / dx`
#[inline]
pub fn trace_right<A: FloatNum>(q0: A, q_minus: A, q_plus: A, sigma: A) -> A {
    if sigma == A::zero() {
        return q_plus;
    }
    let dq = q_plus - q_minus;
    let q6 = lit::<A>(6.) * (q0 - lit::<A>(0.5) * (q_minus + q_plus));
    let c = A::one() - lit::<A>(2.) / lit::<A>(3.) * sigma;
    q_plus - lit::<A>(0.5) * sigma * (dq - c * q6)
}

/// State at the lower edge of a cell, see [`trace_right`]
#[inline]
pub fn trace_left<A: FloatNum>(q0: A, q_minus: A, q_plus: A, sigma: A) -> A {
    if sigma == A::zero() {
        return q_minus;
    }
    let dq = q_plus - q_minus;
    let q6 = lit::<A>(6.) * (q0 - lit::<A>(0.5) * (q_minus + q_plus));
    let c = A::one() - lit::<A>(2.) / lit::<A>(3.) * sigma;
    q_minus + lit::<A>(0.5) * sigma * (dq + c * q6)
}

/// Upwind resolution of the states left and right of a face
///
/// Stagnant faces receive the average of both states.
#[inline]
pub fn upwind<A: FloatNum>(u: A, q_l: A, q_r: A) -> A {
    if u > A::zero() {
        q_l
    } else if u < A::zero() {
        q_r
    } else {
        lit::<A>(0.5) * (q_l + q_r)
    }
}

/// Traced state of cell `i` of a pencil, see [`trace_right`]
///
/// Cells which are strict extrema of the means contribute their
/// mean. A parabola kept curved at an extremum would otherwise
/// carry values beyond both neighbors across the face.
#[inline]
fn traced<A: FloatNum>(
    q: &[A],
    q_minus: &[A],
    q_plus: &[A],
    i: usize,
    sigma: A,
    upper: bool,
) -> A {
    let interior = i > 0 && i + 1 < q.len();
    if sigma > A::zero() && interior && is_extremum(q[i - 1], q[i], q[i + 1]) {
        return q[i];
    }
    if upper {
        trace_right(q[i], q_minus[i], q_plus[i], sigma)
    } else {
        trace_left(q[i], q_minus[i], q_plus[i], sigma)
    }
}

/// Left and right states at the faces of a loaded pencil
///
/// The pencil holds `n` interior cells padded by `ghost` cells
/// on both ends. Face `f` in `0..=n` separates the cells
/// `ghost + f - 1` and `ghost + f`, its velocity is `u[f]`.
/// With `dt_dx = Some(dt / dx)` the states are averaged over the
/// domain of dependence of the face and each resolved face value
/// lies between the means of its two cells. Otherwise they are the
/// edge values of the reconstruction. `emit(f, q_l, q_r)` is
/// called once per face in increasing order.
///
/// # Panics
/// When `ghost` is smaller than the ghost width of the scheme.
pub fn face_states<A, F>(
    scheme: &Reconstruction,
    scratch: &mut PencilScratch<A>,
    ghost: usize,
    u: &ArrayView1<A>,
    dt_dx: Option<A>,
    mut emit: F,
) where
    A: FloatNum,
    F: FnMut(usize, A, A),
{
    assert!(
        ghost >= scheme.min_ghost_width(),
        "Pencil has {} ghost cells, {} needs {}",
        ghost,
        scheme.name(),
        scheme.min_ghost_width()
    );
    let n = u.len() - 1;
    let PencilScratch {
        q,
        dq,
        q_minus,
        q_plus,
    } = scratch;
    scheme.edges(q, ghost - 1..ghost + n + 1, dq, q_minus, q_plus);
    for (f, &uf) in u.iter().enumerate() {
        let (l, r) = (ghost + f - 1, ghost + f);
        let (q_l, q_r) = match dt_dx {
            Some(c) => (
                traced(q, q_minus, q_plus, l, uf.max(A::zero()) * c, true),
                traced(q, q_minus, q_plus, r, (-uf).max(A::zero()) * c, false),
            ),
            None => (q_plus[l], q_minus[r]),
        };
        emit(f, q_l, q_r);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_trace_limits() {
        // no motion: edge values
        assert_eq!(trace_right(0.5, 0.2, 0.9, 0.), 0.9);
        assert_eq!(trace_left(0.5, 0.2, 0.9, 0.), 0.2);
        // full cell crosses the face: cell mean
        assert!(approx_eq(trace_right(0.5, 0.2, 0.9, 1.), 0.5));
        assert!(approx_eq(trace_left(0.5, 0.2, 0.9, 1.), 0.5));
        // linear profile: value at the center of the domain of dependence
        assert!(approx_eq(trace_right(0.5, 0., 1., 0.5), 0.75));
        assert!(approx_eq(trace_left(0.5, 0., 1., 0.5), 0.25));
    }

    #[test]
    fn test_upwind() {
        assert_eq!(upwind(1., 2., 3.), 2.);
        assert_eq!(upwind(-1e-3, 2., 3.), 3.);
        assert_eq!(upwind(0., 2., 3.), 2.5);
    }

    #[test]
    fn test_face_states_linear() {
        let (n, g) = (6, 4);
        let lane = Array1::from_iter((0..n + 2 * g).map(|i| 2. * i as f64 + 1.));
        let u = Array1::from_elem(n + 1, 1.);
        let mut scratch = PencilScratch::new(n + 2 * g);
        scratch.load(&lane.view());
        let mut count = 0;
        face_states(
            &Reconstruction::default(),
            &mut scratch,
            g,
            &u.view(),
            None,
            |f, q_l, q_r| {
                let x = (g + f) as f64 - 0.5;
                assert!(approx_eq(q_l, 2. * x + 1.));
                assert!(approx_eq(q_r, 2. * x + 1.));
                count += 1;
            },
        );
        assert_eq!(count, n + 1);
    }

    #[test]
    fn test_traced_states_within_neighbors() {
        // smooth bump, maximum at cell 8
        let (n, g) = (16, 4);
        let lane = Array1::from_iter(
            (0..n + 2 * g).map(|i| (-((i as f64 - g as f64 - 8.) / 3.).powi(2)).exp()),
        );
        for name in Reconstruction::NAMES.iter() {
            let scheme = Reconstruction::from_name(name).unwrap();
            for &vel in [1., -1.].iter() {
                for &sigma in [0.1, 0.3, 0.5, 0.7, 0.9, 1.].iter() {
                    let u = Array1::from_elem(n + 1, vel);
                    let mut scratch = PencilScratch::new(n + 2 * g);
                    scratch.load(&lane.view());
                    face_states(&scheme, &mut scratch, g, &u.view(), Some(sigma), |f, q_l, q_r| {
                        let (a, b) = (lane[g + f - 1], lane[g + f]);
                        let v = upwind(vel, q_l, q_r);
                        assert!(
                            v >= a.min(b) - 1e-12 && v <= a.max(b) + 1e-12,
                            "{} u={} sigma={} face {}: {}",
                            name,
                            vel,
                            sigma,
                            f,
                            v
                        );
                    });
                }
            }
        }
    }

    #[test]
    fn test_traced_extremum_is_mean() {
        // spike with ghost width 4
        let mut lane = Array1::<f64>::zeros(12);
        lane[6] = 1.;
        lane[5] = 0.5;
        let u = Array1::from_elem(5, 1.);
        let mut scratch = PencilScratch::new(12);
        scratch.load(&lane.view());
        face_states(
            &Reconstruction::default(),
            &mut scratch,
            4,
            &u.view(),
            Some(0.5),
            |f, q_l, _| {
                if f == 3 {
                    assert!(approx_eq(q_l, 1.));
                }
            },
        );
    }

    #[test]
    #[should_panic]
    fn test_face_states_ghost() {
        let lane = Array1::<f64>::zeros(10);
        let u = Array1::<f64>::zeros(5);
        let mut scratch = PencilScratch::new(10);
        scratch.load(&lane.view());
        face_states(
            &Reconstruction::default(),
            &mut scratch,
            2,
            &u.view(),
            None,
            |_, _, _| (),
        );
    }
}
