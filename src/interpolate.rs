//! # Face interpolation on a patch
//!
//! Interpolates cell-centered data to the faces of a patch
//! with a Godunov-type upwind scheme: reconstruct a limited
//! profile per cell, trace it along the advecting velocity
//! and pick the upwind state. Each axis and each component
//! is processed independently, pencil by pencil.
//!
//! # Example
//! Advect a linear profile in 2-D, the face values are exact
//!```
//! use rustfv::interpolate::FaceInterpolator;
//! use rustfv::patch::{CellData2, FaceData2, IndexBox, Patch};
//!
//! let bbox = IndexBox::from_shape([8, 8]);
//! let patch = Patch::new(bbox, [1., 1.]);
//! let mut q = CellData2::<f64>::new(bbox, 1, 4);
//! q.fill_with(0, |[i, j]| i as f64 + 2. * j as f64);
//! let mut u = FaceData2::<f64>::new(bbox, 1, 0);
//! u.fill(1.);
//! let mut q_face = FaceData2::<f64>::new(bbox, 1, 0);
//!
//! let interpolator = FaceInterpolator::default();
//! interpolator.interpolate_to_face_on_patch(&mut q_face, &q, &u, &patch, None);
//! assert!((q_face.get(0, 0, [3, 2]) - 6.5).abs() < 1e-12);
//! assert!((q_face.get(1, 0, [3, 2]) - 6.).abs() < 1e-12);
//!```
use crate::error::Result;
use crate::godunov::{face_states, upwind, PencilScratch};
use crate::patch::{subview, CellData, FaceData, Patch};
use crate::reconstruct::{Reconstruct, Reconstruction};
use crate::types::FloatNum;
use ndarray::{ArrayView, Axis, Dim, Dimension, IntoDimension, Ix, Zip};

/// Minimum ghost width of cell data for the default scheme
pub const Q_MIN_GCW: usize = 4;

/// Godunov face interpolation with a selectable reconstruction
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FaceInterpolator {
    /// Reconstruction of the cell profiles
    pub scheme: Reconstruction,
}

impl FaceInterpolator {
    /// Interpolator with the given reconstruction
    pub fn new(scheme: Reconstruction) -> Self {
        Self { scheme }
    }

    /// Interpolator with reconstruction selected by name
    ///
    /// # Errors
    /// Unknown reconstruction, see [`Reconstruction::NAMES`]
    pub fn from_name(name: &str) -> Result<Self> {
        Ok(Self::new(Reconstruction::from_name(name)?))
    }

    /// Ghost width the cell data must provide
    pub fn min_ghost_width(&self) -> usize {
        self.scheme.min_ghost_width()
    }

    /// Interpolate `q_cell` to the faces of `patch`, upwinded by `u`
    ///
    /// Writes every face of the patch box for all axes and
    /// components of `q_interp`, ghost faces are not touched.
    /// With `dt` the face states are centered in time along
    /// the characteristics, otherwise they are the edge
    /// values of the reconstruction.
    ///
    /// # Panics
    /// - Non-uniform ghost width of any of the arrays
    /// - Ghost width of `q_cell` below [`Self::min_ghost_width`]
    /// - `u` is not of depth 1, or `q_interp` and `q_cell` differ in depth
    /// - Any box differs from the box of `patch`
    pub fn interpolate_to_face_on_patch<A, const N: usize>(
        &self,
        q_interp: &mut FaceData<A, N>,
        q_cell: &CellData<A, N>,
        u: &FaceData<A, N>,
        patch: &Patch<A, N>,
        dt: Option<A>,
    ) where
        A: FloatNum,
        Dim<[Ix; N]>: Dimension,
        [Ix; N]: IntoDimension<Dim = Dim<[Ix; N]>>,
    {
        let ghost = self.check_preconditions(q_cell, u, patch);
        check_face_data("q_interp", q_interp, q_cell.depth(), patch);
        log::debug!(
            "Interpolate {} component(s) on {:?} with {}",
            q_cell.depth(),
            patch.bbox,
            self.scheme.name()
        );
        for axis in 0..N {
            let dt_dx = dt.map(|dt| dt / patch.dx[axis]);
            for d in 0..q_cell.depth() {
                let mut scratch = PencilScratch::new(pencil_len(patch, axis, ghost));
                let q_view = pencil_view(q_cell, d, axis, ghost);
                let u_view = u.interior(axis, 0);
                let mut out = q_interp.interior_mut(axis, d);
                Zip::from(q_view.lanes(Axis(axis)))
                    .and(u_view.lanes(Axis(axis)))
                    .and(out.lanes_mut(Axis(axis)))
                    .for_each(|q_lane, u_lane, mut out_lane| {
                        scratch.load(&q_lane);
                        face_states(
                            &self.scheme,
                            &mut scratch,
                            ghost,
                            &u_lane,
                            dt_dx,
                            |f, q_l, q_r| out_lane[f] = upwind(u_lane[f], q_l, q_r),
                        );
                    });
            }
        }
    }

    /// Left and right face states of `q_cell` on `patch`, before upwinding
    ///
    /// Same as [`Self::interpolate_to_face_on_patch`], but returns
    /// the state carried from the lower cell in `q_left` and the state
    /// carried from the upper cell in `q_right`.
    ///
    /// # Panics
    /// See [`Self::interpolate_to_face_on_patch`].
    pub fn extrapolate_face_states<A, const N: usize>(
        &self,
        q_left: &mut FaceData<A, N>,
        q_right: &mut FaceData<A, N>,
        q_cell: &CellData<A, N>,
        u: &FaceData<A, N>,
        patch: &Patch<A, N>,
        dt: Option<A>,
    ) where
        A: FloatNum,
        Dim<[Ix; N]>: Dimension,
        [Ix; N]: IntoDimension<Dim = Dim<[Ix; N]>>,
    {
        let ghost = self.check_preconditions(q_cell, u, patch);
        check_face_data("q_left", q_left, q_cell.depth(), patch);
        check_face_data("q_right", q_right, q_cell.depth(), patch);
        for axis in 0..N {
            let dt_dx = dt.map(|dt| dt / patch.dx[axis]);
            for d in 0..q_cell.depth() {
                let mut scratch = PencilScratch::new(pencil_len(patch, axis, ghost));
                let q_view = pencil_view(q_cell, d, axis, ghost);
                let u_view = u.interior(axis, 0);
                let mut left = q_left.interior_mut(axis, d);
                let mut right = q_right.interior_mut(axis, d);
                Zip::from(q_view.lanes(Axis(axis)))
                    .and(u_view.lanes(Axis(axis)))
                    .and(left.lanes_mut(Axis(axis)))
                    .and(right.lanes_mut(Axis(axis)))
                    .for_each(|q_lane, u_lane, mut l_lane, mut r_lane| {
                        scratch.load(&q_lane);
                        face_states(
                            &self.scheme,
                            &mut scratch,
                            ghost,
                            &u_lane,
                            dt_dx,
                            |f, q_l, q_r| {
                                l_lane[f] = q_l;
                                r_lane[f] = q_r;
                            },
                        );
                    });
            }
        }
    }

    /// Returns the ghost width of `q_cell`
    fn check_preconditions<A, const N: usize>(
        &self,
        q_cell: &CellData<A, N>,
        u: &FaceData<A, N>,
        patch: &Patch<A, N>,
    ) -> usize
    where
        A: FloatNum,
        Dim<[Ix; N]>: Dimension,
    {
        let ghost = check_uniform("q_cell", q_cell.ghost_cell_width());
        for axis in 0..N {
            assert!(
                q_cell.ghost_cell_width()[axis] >= self.min_ghost_width(),
                "Ghost width of q_cell along axis {} is {}, {} needs at least {}",
                axis,
                q_cell.ghost_cell_width()[axis],
                self.scheme.name(),
                self.min_ghost_width()
            );
        }
        assert!(
            q_cell.bbox() == &patch.bbox,
            "Box of q_cell {:?} differs from patch box {:?}",
            q_cell.bbox(),
            patch.bbox
        );
        check_face_data("u", u, 1, patch);
        ghost
    }
}

/// Uniform ghost width of array `name`
fn check_uniform<const N: usize>(name: &str, ghost: [usize; N]) -> usize {
    for axis in 1..N {
        assert!(
            ghost[axis] == ghost[0],
            "Ghost width of {} is not uniform: {} along axis {}, {} along axis 0",
            name,
            ghost[axis],
            axis,
            ghost[0]
        );
    }
    ghost[0]
}

fn check_face_data<A, const N: usize>(
    name: &str,
    data: &FaceData<A, N>,
    depth: usize,
    patch: &Patch<A, N>,
) where
    A: FloatNum,
    Dim<[Ix; N]>: Dimension,
{
    check_uniform(name, data.ghost_cell_width());
    assert!(
        data.depth() == depth,
        "Depth of {} is {}, expected {}",
        name,
        data.depth(),
        depth
    );
    assert!(
        data.bbox() == &patch.bbox,
        "Box of {} {:?} differs from patch box {:?}",
        name,
        data.bbox(),
        patch.bbox
    );
}

fn pencil_len<A, const N: usize>(patch: &Patch<A, N>, axis: usize, ghost: usize) -> usize {
    patch.bbox.shape()[axis] + 2 * ghost
}

/// Interior cells of component `d`, extended by the ghost cells along `axis`
fn pencil_view<A, const N: usize>(
    q_cell: &CellData<A, N>,
    d: usize,
    axis: usize,
    ghost: usize,
) -> ArrayView<'_, A, Dim<[Ix; N]>>
where
    A: FloatNum,
    Dim<[Ix; N]>: Dimension,
{
    let mut start = [ghost; N];
    let mut len = q_cell.bbox().shape();
    start[axis] = 0;
    len[axis] += 2 * ghost;
    subview(&q_cell.data[d], start, len)
}
