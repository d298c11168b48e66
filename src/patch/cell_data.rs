//! Cell-centered patch data
use super::{storage_offset, subview, subview_mut, uniform_width, IndexBox};
use crate::types::FloatNum;
use ndarray::{Array, ArrayView, ArrayViewMut, Dim, Dimension, IntoDimension, Ix};

/// Cell-centered data of depth *D* on a ghost padded box
///
/// Each component is stored in its own *n*-dimensional
/// array of shape `box.shape() + 2 * ghost`.
///
/// # Example
///```
/// use rustfv::patch::{CellData2, IndexBox};
///
/// let bbox = IndexBox::from_shape([8, 6]);
/// let mut q = CellData2::<f64>::new(bbox, 1, 4);
/// q.fill_with(0, |[i, _]| i as f64);
/// assert_eq!(q.get(0, [-4, 0]), -4.);
/// assert_eq!(q.component(0).shape(), &[16, 14]);
///```
#[derive(Clone)]
pub struct CellData<A, const N: usize> {
    bbox: IndexBox<N>,
    ghost: [usize; N],
    /// Ghost padded storage, one array per component
    pub data: Vec<Array<A, Dim<[Ix; N]>>>,
}

impl<A, const N: usize> CellData<A, N>
where
    A: FloatNum,
    Dim<[Ix; N]>: Dimension,
    [Ix; N]: IntoDimension<Dim = Dim<[Ix; N]>>,
{
    /// Zero initialized data with uniform ghost width
    pub fn new(bbox: IndexBox<N>, depth: usize, ghost: usize) -> Self {
        Self::with_ghost_widths(bbox, depth, [ghost; N])
    }

    /// Zero initialized data with a ghost width per axis
    pub fn with_ghost_widths(bbox: IndexBox<N>, depth: usize, ghost: [usize; N]) -> Self {
        let mut shape = bbox.shape();
        for axis in 0..N {
            shape[axis] += 2 * ghost[axis];
        }
        let data = (0..depth).map(|_| Array::zeros(shape)).collect();
        Self { bbox, ghost, data }
    }

    /// Return copy of a single component as depth-1 data
    pub fn component_data(&self, d: usize) -> Self {
        Self {
            bbox: self.bbox,
            ghost: self.ghost,
            data: vec![self.data[d].clone()],
        }
    }

    /// Zero initialized data of same box, depth and ghost width
    pub fn zeros_like(&self) -> Self {
        Self::with_ghost_widths(self.bbox, self.depth(), self.ghost)
    }
}

impl<A, const N: usize> CellData<A, N>
where
    A: FloatNum,
    Dim<[Ix; N]>: Dimension,
{
    /// Box of interior cells
    pub fn bbox(&self) -> &IndexBox<N> {
        &self.bbox
    }

    /// Number of components
    pub fn depth(&self) -> usize {
        self.data.len()
    }

    /// Ghost cell width per axis
    pub fn ghost_cell_width(&self) -> [usize; N] {
        self.ghost
    }

    /// Ghost cell width, if it is the same along all axes
    pub fn uniform_ghost_width(&self) -> Option<usize> {
        uniform_width(&self.ghost)
    }

    /// Box of interior and ghost cells
    pub fn ghost_box(&self) -> IndexBox<N> {
        self.bbox.grow(self.ghost)
    }

    /// Ghost padded array of component `d`
    pub fn component(&self, d: usize) -> ArrayView<'_, A, Dim<[Ix; N]>> {
        self.data[d].view()
    }

    /// Mutable ghost padded array of component `d`
    pub fn component_mut(&mut self, d: usize) -> ArrayViewMut<'_, A, Dim<[Ix; N]>> {
        self.data[d].view_mut()
    }

    /// Interior cells of component `d`
    pub fn interior(&self, d: usize) -> ArrayView<'_, A, Dim<[Ix; N]>> {
        subview(&self.data[d], self.ghost, self.bbox.shape())
    }

    /// Mutable interior cells of component `d`
    pub fn interior_mut(&mut self, d: usize) -> ArrayViewMut<'_, A, Dim<[Ix; N]>> {
        let (ghost, shape) = (self.ghost, self.bbox.shape());
        subview_mut(&mut self.data[d], ghost, shape)
    }

    /// Value of component `d` at cell `index`
    ///
    /// # Panics
    /// When `index` lies outside of the ghost box.
    pub fn get(&self, d: usize, index: [i32; N]) -> A {
        let pos = storage_offset(&self.bbox, &self.ghost, index);
        self.data[d].view().into_dyn()[&pos[..]]
    }

    /// Set component `d` at cell `index`
    ///
    /// # Panics
    /// When `index` lies outside of the ghost box.
    pub fn set(&mut self, d: usize, index: [i32; N], value: A) {
        let pos = storage_offset(&self.bbox, &self.ghost, index);
        self.data[d].view_mut().into_dyn()[&pos[..]] = value;
    }

    /// Set all components, ghost cells included
    pub fn fill(&mut self, value: A) {
        for arr in &mut self.data {
            arr.fill(value);
        }
    }

    /// Evaluate `f` at every cell index of the ghost box
    pub fn fill_with<F>(&mut self, d: usize, f: F)
    where
        F: Fn([i32; N]) -> A,
    {
        let gbox = self.ghost_box();
        for (pos, v) in self.data[d].view_mut().into_dyn().indexed_iter_mut() {
            let mut index = [0; N];
            for axis in 0..N {
                index[axis] = gbox.lower[axis] + pos[axis] as i32;
            }
            *v = f(index);
        }
    }

    /// Copy all components from `other` where the ghost boxes overlap
    ///
    /// # Panics
    /// When the depths differ.
    pub fn copy_from(&mut self, other: &Self) {
        self.copy_region_from(other, &other.ghost_box());
    }

    /// Copy all components of `other` inside `region`, limited to the
    /// ghost box of `self` and the ghost box of `other`
    ///
    /// # Panics
    /// When the depths differ.
    pub fn copy_region_from(&mut self, other: &Self, region: &IndexBox<N>) {
        assert!(
            self.depth() == other.depth(),
            "Depth mismatch while copying cell data: {} vs {}",
            self.depth(),
            other.depth()
        );
        let overlap = self
            .ghost_box()
            .intersect(&other.ghost_box())
            .and_then(|b| b.intersect(region));
        if let Some(overlap) = overlap {
            let len = overlap.shape();
            let dst_start = storage_offset(&self.bbox, &self.ghost, overlap.lower);
            let src_start = storage_offset(&other.bbox, &other.ghost, overlap.lower);
            for (dst, src) in self.data.iter_mut().zip(other.data.iter()) {
                subview_mut(dst, dst_start, len).assign(&subview(src, src_start, len));
            }
        }
    }

    /// Minimum and maximum over interior cells of all components
    pub fn min_max(&self) -> (A, A) {
        let mut min = A::infinity();
        let mut max = A::neg_infinity();
        for d in 0..self.depth() {
            for &v in self.interior(d).iter() {
                min = min.min(v);
                max = max.max(v);
            }
        }
        (min, max)
    }
}
