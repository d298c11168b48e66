//! # Convective operator
//!
//! Evaluates the convective term `N(q)` of the transport
//! equation `dq/dt + N(q) = 0` on a patch. Face values of `q`
//! come from the [`FaceInterpolator`], the term is then formed
//! in one of the difference forms
//! - `conservative`: `div(u q)`
//! - `advective`: `u . grad(q)`
//! - `skew_symmetric`: the average of both
//!
//! # Example
//!```
//! use rustfv::boundary::{BoundaryCondition, BoundarySet};
//! use rustfv::convective::ConvectiveOperator;
//! use rustfv::patch::{CellData2, FaceData2, IndexBox, Patch};
//!
//! let bbox = IndexBox::from_shape([16, 16]);
//! let patch = Patch::new(bbox, [0.1, 0.1]);
//! let bc = vec![BoundarySet::uniform(BoundaryCondition::periodic())];
//! let op = ConvectiveOperator::new("xsppm7", "conservative", bc).unwrap();
//! let mut q = CellData2::<f64>::new(bbox, 1, op.min_ghost_width());
//! q.fill(2.);
//! let mut u = FaceData2::<f64>::new(bbox, 1, 0);
//! u.fill(1.);
//! let n = op.apply(&mut q, &u, &patch, None);
//! assert!(n.interior(0).iter().all(|v| v.abs() < 1e-12));
//!```
use crate::boundary::BoundarySet;
use crate::error::{Error, Result};
use crate::interpolate::FaceInterpolator;
use crate::patch::{CellData, FaceData, Patch};
use crate::types::{lit, FloatNum};
use ndarray::{Axis, Dim, Dimension, IntoDimension, Ix, Zip};

/// Difference form of the convective term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifferenceForm {
    /// Flux divergence `div(u q)`
    Conservative,
    /// Non-conservative `u . grad(q)`
    Advective,
    /// `(div(u q) + u . grad(q)) / 2`
    SkewSymmetric,
}

impl DifferenceForm {
    /// Registered names
    pub const NAMES: &'static [&'static str] = &["conservative", "advective", "skew_symmetric"];

    /// Select difference form by name
    ///
    /// # Errors
    /// When `name` is not registered.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "conservative" => Ok(Self::Conservative),
            "advective" => Ok(Self::Advective),
            "skew_symmetric" => Ok(Self::SkewSymmetric),
            _ => Err(Error::unknown_key("difference form", name, Self::NAMES)),
        }
    }

    /// Registry name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Advective => "advective",
            Self::SkewSymmetric => "skew_symmetric",
        }
    }

    /// Weights of the conservative and the advective part
    fn weights<A: FloatNum>(self) -> (A, A) {
        match self {
            Self::Conservative => (A::one(), A::zero()),
            Self::Advective => (A::zero(), A::one()),
            Self::SkewSymmetric => (lit(0.5), lit(0.5)),
        }
    }
}

impl Default for DifferenceForm {
    fn default() -> Self {
        Self::Conservative
    }
}

/// Convective operator on a single patch
///
/// Owns one [`BoundarySet`] per transported component.
#[derive(Debug, Clone)]
pub struct ConvectiveOperator<A, const N: usize> {
    /// Face interpolation
    pub interpolator: FaceInterpolator,
    /// Difference form
    pub form: DifferenceForm,
    bc: Vec<BoundarySet<A, N>>,
}

impl<A, const N: usize> ConvectiveOperator<A, N>
where
    A: FloatNum,
    Dim<[Ix; N]>: Dimension,
    [Ix; N]: IntoDimension<Dim = Dim<[Ix; N]>>,
{
    /// Operator with reconstruction `scheme` and difference `form`,
    /// the number of boundary sets defines the depth
    ///
    /// # Errors
    /// Unknown scheme or form, or no boundary set.
    pub fn new(scheme: &str, form: &str, bc: Vec<BoundarySet<A, N>>) -> Result<Self> {
        if bc.is_empty() {
            return Err(Error::invalid("bc", "need one boundary set per component"));
        }
        Ok(Self {
            interpolator: FaceInterpolator::from_name(scheme)?,
            form: DifferenceForm::from_name(form)?,
            bc,
        })
    }

    /// Number of transported components
    pub fn depth(&self) -> usize {
        self.bc.len()
    }

    /// Ghost width of the cell data passed to [`Self::apply`]
    pub fn min_ghost_width(&self) -> usize {
        self.interpolator.min_ghost_width()
    }

    /// Boundary conditions of component `d`
    pub fn boundary(&self, d: usize) -> &BoundarySet<A, N> {
        &self.bc[d]
    }

    /// Fill ghost cells of all components on the physical boundary of `patch`
    ///
    /// # Panics
    /// Depth of `q` differs from the depth of the operator.
    pub fn fill_ghost_cells(&self, q: &mut CellData<A, N>, patch: &Patch<A, N>) {
        self.check_depth("q", q.depth());
        for (d, bc) in self.bc.iter().enumerate() {
            bc.fill_ghost_cells(q, d, patch);
        }
    }

    /// Convective term of `q` advected by `u`, see [`Self::apply_into`]
    pub fn apply(
        &self,
        q: &mut CellData<A, N>,
        u: &FaceData<A, N>,
        patch: &Patch<A, N>,
        dt: Option<A>,
    ) -> CellData<A, N> {
        let mut out = CellData::new(patch.bbox, self.depth(), 0);
        self.apply_into(q, u, patch, dt, &mut out);
        out
    }

    /// Write the convective term of `q` into the interior of `out`
    ///
    /// Fills the physical boundary ghost cells of `q` first. Face
    /// values are time centered when `dt` is given.
    ///
    /// # Panics
    /// - Depth of `q` or `out` differs from the depth of the operator
    /// - Any precondition of
    ///   [`FaceInterpolator::interpolate_to_face_on_patch`]
    pub fn apply_into(
        &self,
        q: &mut CellData<A, N>,
        u: &FaceData<A, N>,
        patch: &Patch<A, N>,
        dt: Option<A>,
        out: &mut CellData<A, N>,
    ) {
        self.check_depth("out", out.depth());
        self.fill_ghost_cells(q, patch);
        let mut q_face = FaceData::new(patch.bbox, self.depth(), 0);
        self.interpolator
            .interpolate_to_face_on_patch(&mut q_face, q, u, patch, dt);
        let (w_cons, w_adv) = self.form.weights::<A>();
        let half = lit::<A>(0.5);
        for d in 0..self.depth() {
            let mut n = out.interior_mut(d);
            n.fill(A::zero());
            for axis in 0..N {
                let dx = patch.dx[axis];
                Zip::from(n.lanes_mut(Axis(axis)))
                    .and(q_face.interior(axis, d).lanes(Axis(axis)))
                    .and(u.interior(axis, 0).lanes(Axis(axis)))
                    .for_each(|mut n_lane, f_lane, u_lane| {
                        for i in 0..n_lane.len() {
                            let cons = u_lane[i + 1] * f_lane[i + 1] - u_lane[i] * f_lane[i];
                            let adv = half * (u_lane[i + 1] + u_lane[i]) * (f_lane[i + 1] - f_lane[i]);
                            n_lane[i] += (w_cons * cons + w_adv * adv) / dx;
                        }
                    });
            }
        }
    }

    fn check_depth(&self, name: &str, depth: usize) {
        assert!(
            depth == self.depth(),
            "Depth of {} is {}, operator has {} boundary set(s)",
            name,
            depth,
            self.depth()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryCondition;
    use crate::patch::IndexBox;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-10
    }

    fn periodic(depth: usize) -> Vec<BoundarySet<f64, 2>> {
        vec![BoundarySet::uniform(BoundaryCondition::periodic()); depth]
    }

    #[test]
    fn test_registry() {
        for name in DifferenceForm::NAMES {
            assert_eq!(DifferenceForm::from_name(name).unwrap().name(), *name);
        }
        assert!(DifferenceForm::from_name("rotational").is_err());
        assert!(ConvectiveOperator::<f64, 2>::new("ppm", "conservative", vec![]).is_err());
        assert!(ConvectiveOperator::new("weno", "advective", periodic(1)).is_err());
    }

    #[test]
    fn test_linear_field_uniform_velocity() {
        // N(q) = u . grad(q) for all forms when div(u) = 0
        let bbox = IndexBox::from_shape([12, 10]);
        let patch = Patch::new(bbox, [0.5, 0.25]).with_physical_boundary([[false; 2]; 2]);
        let mut u = FaceData::new(bbox, 1, 0);
        u.fill_axis(0, 2.);
        u.fill_axis(1, -1.);
        for form in DifferenceForm::NAMES {
            let op = ConvectiveOperator::new("xsppm7", form, periodic(1)).unwrap();
            let mut q = CellData::new(bbox, 1, 4);
            // dq/dx = 3 / 0.5, dq/dy = -1 / 0.25
            q.fill_with(0, |[i, j]| 3. * i as f64 - j as f64);
            let n = op.apply(&mut q, &u, &patch, None);
            for &v in n.interior(0).iter() {
                assert!(approx_eq(v, 2. * 6. + 4.), "{}: {}", form, v);
            }
        }
    }

    #[test]
    fn test_forms_with_divergent_velocity() {
        // u = x on a constant field: div(u q) = q, u . grad(q) = 0
        let bbox = IndexBox::from_shape([8, 4]);
        let patch = Patch::new(bbox, [1., 1.]);
        let mut u = FaceData::new(bbox, 1, 0);
        u.fill_with(0, 0, |[i, _]| i as f64);
        let expected = [("conservative", 3.), ("advective", 0.), ("skew_symmetric", 1.5)];
        for (form, value) in expected.iter() {
            let bc = vec![BoundarySet::uniform(BoundaryCondition::outflow())];
            let op = ConvectiveOperator::new("ppm", form, bc).unwrap();
            let mut q = CellData::<f64, 2>::new(bbox, 1, 3);
            q.fill(3.);
            let n = op.apply(&mut q, &u, &patch, None);
            assert!(n.interior(0).iter().all(|v| approx_eq(*v, *value)), "{}", form);
        }
    }

    #[test]
    fn test_conservation() {
        use ndarray_rand::rand_distr::Uniform;
        use ndarray_rand::RandomExt;
        let bbox = IndexBox::from_shape([16, 12]);
        let patch = Patch::new(bbox, [1., 1.]);
        let op = ConvectiveOperator::new("xsppm7", "conservative", periodic(2)).unwrap();
        let mut q = CellData::<f64, 2>::new(bbox, 2, 4);
        for d in 0..2 {
            q.interior_mut(d)
                .assign(&ndarray::Array2::random((16, 12), Uniform::new(0., 1.)));
        }
        let mut u = FaceData::new(bbox, 1, 0);
        u.fill_axis(0, 0.7);
        u.fill_axis(1, -0.4);
        let n = op.apply(&mut q, &u, &patch, Some(0.5));
        for d in 0..2 {
            assert!(n.interior(d).sum().abs() < 1e-12);
        }
    }

    #[test]
    #[should_panic(expected = "Depth of q")]
    fn test_depth_mismatch() {
        let bbox = IndexBox::from_shape([6, 6]);
        let patch = Patch::new(bbox, [1., 1.]);
        let op = ConvectiveOperator::new("xsppm7", "conservative", periodic(2)).unwrap();
        let mut q = CellData::new(bbox, 1, 4);
        let u = FaceData::new(bbox, 1, 0);
        let _ = op.apply(&mut q, &u, &patch, None);
    }
}
