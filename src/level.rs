//! # Patch level
//!
//! A uniform tiling of the domain into patches. The convective
//! operator runs on all patches in parallel, each on its own
//! ghost padded copy of the level data. Ghost cells between
//! patches are copied from the level array, ghost cells on the
//! physical boundary are filled once on the level.
use crate::convective::ConvectiveOperator;
use crate::error::{Error, Result};
use crate::patch::{CellData, FaceData, IndexBox, Patch};
use crate::types::FloatNum;
use ndarray::{ArrayView1, ArrayViewMut1, Dim, Dimension, IntoDimension, Ix, Zip};

/// Domain split into patches
#[derive(Debug, Clone)]
pub struct PatchLevel<A, const N: usize> {
    domain: Patch<A, N>,
    patches: Vec<Patch<A, N>>,
}

impl<A, const N: usize> PatchLevel<A, N>
where
    A: FloatNum,
    Dim<[Ix; N]>: Dimension,
    [Ix; N]: IntoDimension<Dim = Dim<[Ix; N]>>,
{
    /// Split `domain` into `tiles[axis]` patches along each axis
    ///
    /// Patches differ by at most one cell in size along an axis.
    ///
    /// # Errors
    /// Zero tiles or more tiles than cells along an axis.
    pub fn new(domain: Patch<A, N>, tiles: [usize; N]) -> Result<Self> {
        let shape = domain.bbox.shape();
        for axis in 0..N {
            if tiles[axis] == 0 || tiles[axis] > shape[axis] {
                return Err(Error::invalid(
                    "tiles",
                    format!(
                        "{} tiles along axis {} with {} cells",
                        tiles[axis], axis, shape[axis]
                    ),
                ));
            }
        }
        let count: usize = tiles.iter().product();
        let mut patches = Vec::with_capacity(count);
        for flat in 0..count {
            let mut k = [0; N];
            let mut rest = flat;
            for axis in (0..N).rev() {
                k[axis] = rest % tiles[axis];
                rest /= tiles[axis];
            }
            let mut lower = [0; N];
            let mut upper = [0; N];
            let mut physical = [[false; 2]; N];
            for axis in 0..N {
                let (n, t) = (shape[axis], tiles[axis]);
                lower[axis] = domain.bbox.lower[axis] + (k[axis] * n / t) as i32;
                upper[axis] = domain.bbox.lower[axis] + ((k[axis] + 1) * n / t) as i32 - 1;
                physical[axis][0] = k[axis] == 0 && domain.physical_boundary[axis][0];
                physical[axis][1] = k[axis] == t - 1 && domain.physical_boundary[axis][1];
            }
            patches.push(
                Patch::new(IndexBox::new(lower, upper), domain.dx).with_physical_boundary(physical),
            );
        }
        Ok(Self { domain, patches })
    }

    /// Patch covering the whole domain
    pub fn domain(&self) -> &Patch<A, N> {
        &self.domain
    }

    /// All patches, the last axis varies fastest
    pub fn patches(&self) -> &[Patch<A, N>] {
        &self.patches
    }

    /// Number of patches
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    /// Return true if the level has no patches
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Convective term of the level data `q`, advected by `u`
    ///
    /// Fills the physical boundary ghost cells of `q`, then
    /// applies `op` on all patches in parallel and gathers the
    /// results into data without ghost cells on the domain box.
    ///
    /// # Panics
    /// When `q` or `u` are not defined on the domain box, or any
    /// precondition of [`ConvectiveOperator::apply_into`] fails.
    pub fn apply(
        &self,
        op: &ConvectiveOperator<A, N>,
        q: &mut CellData<A, N>,
        u: &FaceData<A, N>,
        dt: Option<A>,
    ) -> CellData<A, N> {
        assert!(
            q.bbox() == &self.domain.bbox && u.bbox() == &self.domain.bbox,
            "Level data must be defined on the domain box {:?}",
            self.domain.bbox
        );
        op.fill_ghost_cells(q, &self.domain);

        let ghost = q.ghost_cell_width();
        let depth = q.depth();
        let mut local_q: Vec<CellData<A, N>> = Vec::with_capacity(self.len());
        let mut local_u: Vec<FaceData<A, N>> = Vec::with_capacity(self.len());
        let mut local_out: Vec<CellData<A, N>> = Vec::with_capacity(self.len());
        let mut interior: Vec<Patch<A, N>> = Vec::with_capacity(self.len());
        for patch in &self.patches {
            let mut q_p = CellData::with_ghost_widths(patch.bbox, depth, ghost);
            q_p.copy_from(q);
            local_q.push(q_p);
            let mut u_p = FaceData::new(patch.bbox, 1, 0);
            u_p.copy_from(u);
            local_u.push(u_p);
            local_out.push(CellData::new(patch.bbox, depth, 0));
            // ghost cells are complete, nothing left to fill
            interior.push(patch.with_physical_boundary([[false; 2]; N]));
        }

        Zip::from(ArrayViewMut1::from(&mut local_q[..]))
            .and(ArrayView1::from(&local_u[..]))
            .and(ArrayView1::from(&interior[..]))
            .and(ArrayViewMut1::from(&mut local_out[..]))
            .par_for_each(|q_p, u_p, patch, out| op.apply_into(q_p, u_p, patch, dt, out));

        let mut out = CellData::new(self.domain.bbox, depth, 0);
        for out_p in &local_out {
            out.copy_region_from(out_p, out_p.bbox());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::{BoundaryCondition, BoundarySet};
    use crate::patch::Side;
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;

    #[test]
    fn test_tiling() {
        let domain = Patch::new(IndexBox::new([0, 1], [9, 6]), [1., 1.]);
        let level = PatchLevel::new(domain, [3, 2]).unwrap();
        assert_eq!(level.len(), 6);
        let size: usize = level.patches().iter().map(|p| p.bbox.size()).sum();
        assert_eq!(size, 60);
        assert_eq!(level.patches()[0].bbox, IndexBox::new([0, 1], [2, 3]));
        assert_eq!(level.patches()[5].bbox, IndexBox::new([6, 4], [9, 6]));
        assert!(level.patches()[0].touches_boundary(0, Side::Lower));
        assert!(!level.patches()[0].touches_boundary(0, Side::Upper));
        assert!(level.patches()[5].touches_boundary(1, Side::Upper));
        assert!(PatchLevel::new(domain, [11, 1]).is_err());
        assert!(PatchLevel::new(domain, [0, 1]).is_err());
    }

    #[test]
    fn test_level_matches_single_patch() {
        let bbox = IndexBox::from_shape([20, 15]);
        let domain = Patch::new(bbox, [0.1, 0.2]);
        let bc = BoundarySet::uniform(BoundaryCondition::dirichlet(0.5))
            .with_axis(0, BoundaryCondition::periodic());
        let op = ConvectiveOperator::new("xsppm7", "skew_symmetric", vec![bc, bc]).unwrap();
        let mut q = CellData::<f64, 2>::new(bbox, 2, 4);
        for d in 0..2 {
            q.interior_mut(d)
                .assign(&ndarray::Array2::random((20, 15), Uniform::new(-1., 1.)));
        }
        let mut u = FaceData::<f64, 2>::new(bbox, 1, 0);
        for axis in 0..2 {
            let shape = u.data[axis][0].raw_dim();
            u.data[axis][0].assign(&ndarray::Array2::random(shape, Uniform::new(-1., 1.)));
        }
        let mut q_single = q.clone();
        let expected = op.apply(&mut q_single, &u, &domain, Some(0.05));

        let level = PatchLevel::new(domain, [4, 3]).unwrap();
        let result = level.apply(&op, &mut q, &u, Some(0.05));
        for d in 0..2 {
            for (a, b) in result.interior(d).iter().zip(expected.interior(d).iter()) {
                assert!((a - b).abs() < 1e-13);
            }
        }
    }
}
