//! # Boundary conditions
//!
//! Fill the ghost cells of cell-centered data on the sides
//! of a patch which lie on the physical boundary.
//!
//! Supported conditions:
//! - `periodic`: wrap around, the patch spans the periodic direction
//! - Robin `a q + b dq/dn = g`, with the special cases
//!   `dirichlet` (`a = 1`, `b = 0`) and `neumann` (`a = 0`, `b = 1`)
//! - `outflow`: zero order extrapolation of the boundary cell
//!
//! # Example
//!```
//! use rustfv::boundary::{BoundaryCondition, BoundarySet};
//! use rustfv::patch::{CellData2, IndexBox, Patch};
//!
//! let bbox = IndexBox::from_shape([4, 4]);
//! let patch = Patch::new(bbox, [1., 1.]);
//! let mut q = CellData2::<f64>::new(bbox, 1, 2);
//! q.fill_with(0, |[i, _]| i as f64);
//! let bc = BoundarySet::uniform(BoundaryCondition::dirichlet(0.));
//! bc.fill_ghost_cells(&mut q, 0, &patch);
//! assert_eq!(q.get(0, [-1, 1]), 0.);
//! assert_eq!(q.get(0, [-2, 1]), -1.);
//!```
use crate::error::{Error, Result};
use crate::patch::{CellData, Patch, Side};
use crate::types::{lit, FloatNum};
use ndarray::{ArrayViewMut1, Axis, Dim, Dimension, Ix, Zip};

/// Fill ghost cells of one lane
#[enum_dispatch]
pub trait FillGhost<A> {
    /// Registry name of the condition
    fn name(&self) -> &'static str;

    /// Fill the `ghost` outermost cells on `side` of `lane`,
    /// which holds `ghost` cells on both ends. `dx` is the
    /// spacing along the lane.
    fn fill_lane(&self, lane: &mut ArrayViewMut1<A>, ghost: usize, side: Side, dx: A);
}

/// Periodic continuation
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Periodic;

impl<A: FloatNum> FillGhost<A> for Periodic {
    fn name(&self) -> &'static str {
        "periodic"
    }

    fn fill_lane(&self, lane: &mut ArrayViewMut1<A>, ghost: usize, side: Side, _dx: A) {
        let n = lane.len() - 2 * ghost;
        assert!(
            n >= ghost,
            "Periodic boundary needs at least {} interior cells, got {}",
            ghost,
            n
        );
        for k in 1..=ghost {
            match side {
                Side::Lower => lane[ghost - k] = lane[ghost + n - k],
                Side::Upper => lane[ghost + n - 1 + k] = lane[ghost + k - 1],
            }
        }
    }
}

/// Robin condition `a q + b dq/dn = g`, `n` is the outward normal
///
/// The ghost value is chosen such that the condition holds at
/// the boundary face for the line through the ghost cell and
/// its mirror cell inside the patch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Robin<A> {
    /// Coefficient of the value
    pub a: A,
    /// Coefficient of the normal derivative
    pub b: A,
    /// Inhomogeneity
    pub g: A,
}

impl<A: FloatNum> Robin<A> {
    /// Robin condition with coefficients `a`, `b` and value `g`
    ///
    /// # Errors
    /// Both coefficients vanish.
    pub fn new(a: A, b: A, g: A) -> Result<Self> {
        if a == A::zero() && b == A::zero() {
            return Err(Error::invalid(
                "robin",
                "coefficients a and b must not both be zero",
            ));
        }
        Ok(Self { a, b, g })
    }
}

impl<A: FloatNum> FillGhost<A> for Robin<A> {
    fn name(&self) -> &'static str {
        if self.b == A::zero() {
            "dirichlet"
        } else if self.a == A::zero() {
            "neumann"
        } else {
            "robin"
        }
    }

    /// # Panics
    /// When the lane holds fewer interior cells than `ghost`, or
    /// when the condition does not determine a ghost value
    /// (`a / 2 + b / h = 0` for a mirror distance `h`).
    fn fill_lane(&self, lane: &mut ArrayViewMut1<A>, ghost: usize, side: Side, dx: A) {
        let n = lane.len() - 2 * ghost;
        assert!(
            n >= ghost,
            "Robin boundary needs at least {} interior cells, got {}",
            ghost,
            n
        );
        let half = lit::<A>(0.5);
        for k in 1..=ghost {
            let (g_idx, i_idx) = match side {
                Side::Lower => (ghost - k, ghost + k - 1),
                Side::Upper => (ghost + n - 1 + k, ghost + n - k),
            };
            // distance between ghost cell and mirror cell
            let h = lit::<A>((2 * k - 1) as f32) * dx;
            let denom = half * self.a + self.b / h;
            assert!(
                denom != A::zero(),
                "Robin boundary is singular for ghost cell {} (a = {}, b = {}, h = {})",
                k,
                self.a,
                self.b,
                h
            );
            let qi = lane[i_idx];
            lane[g_idx] = (self.g - qi * (half * self.a - self.b / h)) / denom;
        }
    }
}

/// Zero order extrapolation
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Outflow;

impl<A: FloatNum> FillGhost<A> for Outflow {
    fn name(&self) -> &'static str {
        "outflow"
    }

    /// Only the boundary cell is read, so lanes shorter than
    /// `ghost` are fine.
    fn fill_lane(&self, lane: &mut ArrayViewMut1<A>, ghost: usize, side: Side, _dx: A) {
        let n = lane.len() - 2 * ghost;
        let value = match side {
            Side::Lower => lane[ghost],
            Side::Upper => lane[ghost + n - 1],
        };
        for k in 1..=ghost {
            match side {
                Side::Lower => lane[ghost - k] = value,
                Side::Upper => lane[ghost + n - 1 + k] = value,
            }
        }
    }
}

/// Collection of boundary conditions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryCondition<A> {
    /// Periodic
    Periodic(Periodic),
    /// Robin, Dirichlet or Neumann
    Robin(Robin<A>),
    /// Outflow
    Outflow(Outflow),
}

impl<A: FloatNum> BoundaryCondition<A> {
    /// Registered names
    pub const NAMES: &'static [&'static str] = &["periodic", "dirichlet", "neumann", "outflow"];

    /// Select condition by name, `value` is the boundary value
    /// of `dirichlet` and the normal derivative of `neumann`,
    /// it is ignored otherwise.
    ///
    /// # Errors
    /// When `name` is not registered.
    pub fn from_name(name: &str, value: A) -> Result<Self> {
        match name {
            "periodic" => Ok(Self::periodic()),
            "dirichlet" => Ok(Self::dirichlet(value)),
            "neumann" => Ok(Self::neumann(value)),
            "outflow" => Ok(Self::outflow()),
            _ => Err(Error::unknown_key("boundary condition", name, Self::NAMES)),
        }
    }

    /// Periodic continuation
    pub fn periodic() -> Self {
        Self::Periodic(Periodic)
    }

    /// Prescribed boundary value
    pub fn dirichlet(value: A) -> Self {
        Self::Robin(Robin {
            a: A::one(),
            b: A::zero(),
            g: value,
        })
    }

    /// Prescribed outward normal derivative
    pub fn neumann(flux: A) -> Self {
        Self::Robin(Robin {
            a: A::zero(),
            b: A::one(),
            g: flux,
        })
    }

    /// General Robin condition
    ///
    /// # Errors
    /// Both coefficients vanish.
    pub fn robin(a: A, b: A, g: A) -> Result<Self> {
        Ok(Self::Robin(Robin::new(a, b, g)?))
    }

    /// Zero order extrapolation
    pub fn outflow() -> Self {
        Self::Outflow(Outflow)
    }
}

impl<A: FloatNum> FillGhost<A> for BoundaryCondition<A> {
    fn name(&self) -> &'static str {
        match self {
            Self::Periodic(ref t) => FillGhost::<A>::name(t),
            Self::Robin(ref t) => t.name(),
            Self::Outflow(ref t) => FillGhost::<A>::name(t),
        }
    }

    fn fill_lane(&self, lane: &mut ArrayViewMut1<A>, ghost: usize, side: Side, dx: A) {
        match self {
            Self::Periodic(ref t) => t.fill_lane(lane, ghost, side, dx),
            Self::Robin(ref t) => t.fill_lane(lane, ghost, side, dx),
            Self::Outflow(ref t) => t.fill_lane(lane, ghost, side, dx),
        }
    }
}

/// Boundary conditions of one component on all sides of the domain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundarySet<A, const N: usize> {
    /// Condition per \[axis\]\[lower, upper\]
    pub sides: [[BoundaryCondition<A>; 2]; N],
}

impl<A: FloatNum, const N: usize> BoundarySet<A, N> {
    /// Same condition on all sides
    pub fn uniform(bc: BoundaryCondition<A>) -> Self {
        Self {
            sides: [[bc; 2]; N],
        }
    }

    /// Replace the condition of one side
    pub fn with_side(mut self, axis: usize, side: Side, bc: BoundaryCondition<A>) -> Self {
        self.sides[axis][side.index()] = bc;
        self
    }

    /// Replace the condition of both sides of `axis`
    pub fn with_axis(mut self, axis: usize, bc: BoundaryCondition<A>) -> Self {
        self.sides[axis] = [bc; 2];
        self
    }

    /// Fill the ghost cells of component `d` on all physical
    /// boundary sides of `patch`
    ///
    /// Ghost cells along an axis are filled on every lane of
    /// the ghost padded array, so corners take the values of
    /// the axis which is processed last.
    ///
    /// # Panics
    /// When the box of `q` differs from the box of `patch`, or a
    /// periodic side is paired with a non-periodic one.
    pub fn fill_ghost_cells(&self, q: &mut CellData<A, N>, d: usize, patch: &Patch<A, N>)
    where
        Dim<[Ix; N]>: Dimension,
    {
        assert!(
            q.bbox() == &patch.bbox,
            "Box of cell data {:?} differs from patch box {:?}",
            q.bbox(),
            patch.bbox
        );
        for axis in 0..N {
            let periodic = self.sides[axis]
                .iter()
                .filter(|bc| matches!(bc, BoundaryCondition::Periodic(_)))
                .count();
            assert!(
                periodic != 1,
                "Periodic boundary along axis {} needs both sides periodic",
                axis
            );
            let ghost = q.ghost_cell_width()[axis];
            if ghost == 0 {
                continue;
            }
            for side in Side::BOTH.iter() {
                if !patch.touches_boundary(axis, *side) {
                    continue;
                }
                let bc = self.sides[axis][side.index()];
                let dx = patch.dx[axis];
                Zip::from(q.component_mut(d).lanes_mut(Axis(axis))).for_each(|mut lane| {
                    bc.fill_lane(&mut lane, ghost, *side, dx);
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::IndexBox;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    fn linear_data() -> (Patch<f64, 2>, CellData<f64, 2>) {
        let bbox = IndexBox::from_shape([6, 5]);
        let patch = Patch::new(bbox, [0.5, 2.]);
        let mut q = CellData::new(bbox, 1, 3);
        // q(x) = 1 + 4x, x = (i + 1/2) dx
        q.fill_with(0, |[i, _]| 1. + 4. * (i as f64 + 0.5) * 0.5);
        (patch, q)
    }

    #[test]
    fn test_registry() {
        for name in BoundaryCondition::<f64>::NAMES {
            let bc = BoundaryCondition::<f64>::from_name(name, 1.).unwrap();
            assert_eq!(bc.name(), *name);
        }
        assert!(BoundaryCondition::<f64>::from_name("slip", 0.).is_err());
        assert!(BoundaryCondition::<f64>::robin(0., 0., 1.).is_err());
        assert_eq!(BoundaryCondition::<f64>::robin(1., 2., 1.).unwrap().name(), "robin");
    }

    #[test]
    fn test_dirichlet_keeps_linear_profile() {
        let (patch, mut q) = linear_data();
        let expected = q.clone();
        q.fill_with(0, |[i, j]| if (0..6).contains(&i) { expected.get(0, [i, j]) } else { 0. });
        // q(0) = 1, q(3) = 13
        let bc = BoundarySet::uniform(BoundaryCondition::dirichlet(1.)).with_side(
            0,
            Side::Upper,
            BoundaryCondition::dirichlet(13.),
        );
        bc.fill_ghost_cells(&mut q, 0, &patch.with_physical_boundary([[true; 2], [false; 2]]));
        for i in -3..9 {
            assert!(approx_eq(q.get(0, [i, 2]), expected.get(0, [i, 2])));
        }
    }

    #[test]
    fn test_neumann_keeps_linear_profile() {
        let (patch, mut q) = linear_data();
        let expected = q.clone();
        q.fill(0.);
        q.interior_mut(0).assign(&expected.interior(0));
        // outward derivative is -4 at the lower and +4 at the upper side
        let bc = BoundarySet::uniform(BoundaryCondition::neumann(-4.)).with_side(
            0,
            Side::Upper,
            BoundaryCondition::neumann(4.),
        );
        bc.fill_ghost_cells(&mut q, 0, &patch.with_physical_boundary([[true; 2], [false; 2]]));
        for i in -3..9 {
            assert!(approx_eq(q.get(0, [i, 0]), expected.get(0, [i, 0])));
        }
    }

    #[test]
    fn test_periodic_and_outflow() {
        let bbox = IndexBox::from_shape([5, 4]);
        let patch = Patch::new(bbox, [1., 1.]);
        let mut q = CellData::<f64, 2>::new(bbox, 1, 2);
        q.interior_mut(0).assign(&ndarray::Array2::from_shape_fn((5, 4), |(i, j)| {
            (10 * i + j) as f64
        }));
        let bc = BoundarySet::uniform(BoundaryCondition::outflow())
            .with_axis(0, BoundaryCondition::periodic());
        bc.fill_ghost_cells(&mut q, 0, &patch);
        assert_eq!(q.get(0, [-1, 2]), 42.);
        assert_eq!(q.get(0, [-2, 2]), 32.);
        assert_eq!(q.get(0, [5, 3]), 3.);
        assert_eq!(q.get(0, [6, 3]), 13.);
        assert_eq!(q.get(0, [2, -2]), 20.);
        assert_eq!(q.get(0, [2, 5]), 23.);
    }

    #[test]
    fn test_interior_sides_untouched() {
        let bbox = IndexBox::from_shape([4, 4]);
        let patch = Patch::new(bbox, [1., 1.]).with_physical_boundary([[false, true], [false; 2]]);
        let mut q = CellData::<f64, 2>::new(bbox, 1, 1);
        q.fill(-1.);
        q.interior_mut(0).fill(2.);
        BoundarySet::uniform(BoundaryCondition::outflow()).fill_ghost_cells(&mut q, 0, &patch);
        assert_eq!(q.get(0, [-1, 0]), -1.);
        assert_eq!(q.get(0, [4, 0]), 2.);
        assert_eq!(q.get(0, [0, 4]), -1.);
    }

    #[test]
    #[should_panic(expected = "Robin boundary needs at least 3 interior cells")]
    fn test_robin_short_lane() {
        let mut lane = ndarray::Array1::<f64>::zeros(8);
        BoundaryCondition::dirichlet(1.).fill_lane(&mut lane.view_mut(), 3, Side::Lower, 1.);
    }

    #[test]
    #[should_panic(expected = "Robin boundary is singular")]
    fn test_robin_singular() {
        // a / 2 + b / dx vanishes for the first ghost cell
        let mut lane = ndarray::Array1::<f64>::ones(8);
        let bc = BoundaryCondition::robin(-2., 1., 0.).unwrap();
        bc.fill_lane(&mut lane.view_mut(), 2, Side::Upper, 1.);
    }

    #[test]
    fn test_outflow_short_lane() {
        // one interior cell, two ghost cells per side
        let mut lane = ndarray::Array1::from(vec![0., 0., 7., 0., 0.]);
        let bc = BoundaryCondition::outflow();
        bc.fill_lane(&mut lane.view_mut(), 2, Side::Lower, 1.);
        bc.fill_lane(&mut lane.view_mut(), 2, Side::Upper, 1.);
        assert_eq!(lane.to_vec(), vec![7.; 5]);
    }

    #[test]
    #[should_panic(expected = "needs both sides periodic")]
    fn test_half_periodic() {
        let bbox = IndexBox::from_shape([4, 4]);
        let patch = Patch::new(bbox, [1., 1.]);
        let mut q = CellData::<f64, 2>::new(bbox, 1, 1);
        BoundarySet::uniform(BoundaryCondition::outflow())
            .with_side(1, Side::Lower, BoundaryCondition::periodic())
            .fill_ghost_cells(&mut q, 0, &patch);
    }
}
