//! Face-centered patch data
use super::{storage_offset, subview, subview_mut, uniform_width, IndexBox};
use crate::types::FloatNum;
use ndarray::{Array, ArrayView, ArrayViewMut, Dim, Dimension, IntoDimension, Ix};

/// Face-centered data of depth *D* on a ghost padded box
///
/// For every axis `a` the faces normal to `a` are stored
/// in one array per component, which has one entry more
/// along `a` than the cell data of the same box.
///
/// # Example
///```
/// use rustfv::patch::{FaceData2, IndexBox};
///
/// let bbox = IndexBox::from_shape([8, 6]);
/// let mut u = FaceData2::<f64>::new(bbox, 1, 1);
/// u.fill_axis(0, 1.);
/// assert_eq!(u.interior(0, 0).shape(), &[9, 6]);
/// assert_eq!(u.interior(1, 0).shape(), &[8, 7]);
/// assert_eq!(u.get(0, 0, [8, 5]), 1.);
///```
#[derive(Clone)]
pub struct FaceData<A, const N: usize> {
    bbox: IndexBox<N>,
    ghost: [usize; N],
    /// Ghost padded storage \[axis\]\[component\]
    pub data: Vec<Vec<Array<A, Dim<[Ix; N]>>>>,
}

impl<A, const N: usize> FaceData<A, N>
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
        let data = (0..N)
            .map(|axis| {
                let mut shape = bbox.face_shape(axis);
                for b in 0..N {
                    shape[b] += 2 * ghost[b];
                }
                (0..depth).map(|_| Array::zeros(shape)).collect::<Vec<_>>()
            })
            .collect();
        Self { bbox, ghost, data }
    }

    /// Return copy of a single component as depth-1 data
    pub fn component_data(&self, d: usize) -> Self {
        Self {
            bbox: self.bbox,
            ghost: self.ghost,
            data: self.data.iter().map(|c| vec![c[d].clone()]).collect(),
        }
    }
}

impl<A, const N: usize> FaceData<A, N>
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
        self.data.first().map_or(0, Vec::len)
    }

    /// Ghost cell width per axis
    pub fn ghost_cell_width(&self) -> [usize; N] {
        self.ghost
    }

    /// Ghost cell width, if it is the same along all axes
    pub fn uniform_ghost_width(&self) -> Option<usize> {
        uniform_width(&self.ghost)
    }

    /// Ghost padded faces normal to `axis` of component `d`
    pub fn component(&self, axis: usize, d: usize) -> ArrayView<'_, A, Dim<[Ix; N]>> {
        self.data[axis][d].view()
    }

    /// Mutable ghost padded faces normal to `axis` of component `d`
    pub fn component_mut(&mut self, axis: usize, d: usize) -> ArrayViewMut<'_, A, Dim<[Ix; N]>> {
        self.data[axis][d].view_mut()
    }

    /// Faces of the interior box normal to `axis` of component `d`
    pub fn interior(&self, axis: usize, d: usize) -> ArrayView<'_, A, Dim<[Ix; N]>> {
        subview(&self.data[axis][d], self.ghost, self.bbox.face_shape(axis))
    }

    /// Mutable faces of the interior box normal to `axis` of component `d`
    pub fn interior_mut(&mut self, axis: usize, d: usize) -> ArrayViewMut<'_, A, Dim<[Ix; N]>> {
        let (ghost, shape) = (self.ghost, self.bbox.face_shape(axis));
        subview_mut(&mut self.data[axis][d], ghost, shape)
    }

    /// Value of component `d` at the lower face of cell `index` normal to `axis`
    ///
    /// # Panics
    /// When `index` lies outside of the ghost box.
    pub fn get(&self, axis: usize, d: usize, index: [i32; N]) -> A {
        let pos = storage_offset(&self.bbox, &self.ghost, index);
        self.data[axis][d].view().into_dyn()[&pos[..]]
    }

    /// Set component `d` at the lower face of cell `index` normal to `axis`
    ///
    /// # Panics
    /// When `index` lies outside of the ghost box.
    pub fn set(&mut self, axis: usize, d: usize, index: [i32; N], value: A) {
        let pos = storage_offset(&self.bbox, &self.ghost, index);
        self.data[axis][d].view_mut().into_dyn()[&pos[..]] = value;
    }

    /// Set all faces of all axes and components
    pub fn fill(&mut self, value: A) {
        for axis in 0..N {
            self.fill_axis(axis, value);
        }
    }

    /// Set all faces normal to `axis`
    pub fn fill_axis(&mut self, axis: usize, value: A) {
        for arr in &mut self.data[axis] {
            arr.fill(value);
        }
    }

    /// Evaluate `f` at every face normal to `axis`, ghost faces included
    pub fn fill_with<F>(&mut self, axis: usize, d: usize, f: F)
    where
        F: Fn([i32; N]) -> A,
    {
        let gbox = self.bbox.grow(self.ghost);
        for (pos, v) in self.data[axis][d].view_mut().into_dyn().indexed_iter_mut() {
            let mut index = [0; N];
            for b in 0..N {
                index[b] = gbox.lower[b] + pos[b] as i32;
            }
            *v = f(index);
        }
    }

    /// Index box of the ghost padded faces normal to `axis`
    pub fn face_box(&self, axis: usize) -> IndexBox<N> {
        let mut fbox = self.bbox.grow(self.ghost);
        fbox.upper[axis] += 1;
        fbox
    }

    /// Copy all components from `other` where the face boxes overlap
    ///
    /// # Panics
    /// When the depths differ.
    pub fn copy_from(&mut self, other: &Self) {
        assert!(
            self.depth() == other.depth(),
            "Depth mismatch while copying face data: {} vs {}",
            self.depth(),
            other.depth()
        );
        for axis in 0..N {
            if let Some(overlap) = self.face_box(axis).intersect(&other.face_box(axis)) {
                let len = overlap.shape();
                let dst_start = storage_offset(&self.bbox, &self.ghost, overlap.lower);
                let src_start = storage_offset(&other.bbox, &other.ghost, overlap.lower);
                for (dst, src) in self.data[axis].iter_mut().zip(other.data[axis].iter()) {
                    subview_mut(dst, dst_start, len).assign(&subview(src, src_start, len));
                }
            }
        }
    }

    /// Largest absolute value over interior faces, per axis
    pub fn max_abs(&self) -> [A; N] {
        let mut max = [A::zero(); N];
        for axis in 0..N {
            for d in 0..self.depth() {
                for &v in self.interior(axis, d).iter() {
                    max[axis] = max[axis].max(v.abs());
                }
            }
        }
        max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_data_layout() {
        let bbox = IndexBox::new([0, 0, 0], [3, 4, 5]);
        let f = FaceData::<f64, 3>::with_ghost_widths(bbox, 2, [1, 2, 0]);
        assert_eq!(f.depth(), 2);
        assert_eq!(f.uniform_ghost_width(), None);
        assert_eq!(f.component(0, 1).shape(), &[7, 9, 6]);
        assert_eq!(f.component(2, 0).shape(), &[6, 9, 7]);
        assert_eq!(f.interior(1, 0).shape(), &[4, 6, 6]);
    }

    #[test]
    fn test_face_data_access() {
        let mut f = FaceData::<f64, 2>::new(IndexBox::from_shape([3, 2]), 1, 2);
        f.fill_with(1, 0, |[i, j]| (10 * i + j) as f64);
        // upper face of the last cell
        assert_eq!(f.get(1, 0, [2, 2]), 22.);
        assert_eq!(f.interior(1, 0)[[2, 2]], 22.);
        f.set(0, 0, [3, 1], -1.);
        assert_eq!(f.interior(0, 0)[[3, 1]], -1.);
        assert_eq!(f.max_abs(), [1., 22.]);
    }

    #[test]
    fn test_face_data_copy() {
        let mut global = FaceData::<f64, 2>::new(IndexBox::from_shape([8, 4]), 1, 0);
        global.fill_with(0, 0, |[i, j]| (i + 10 * j) as f64);
        let mut local = FaceData::<f64, 2>::new(IndexBox::new([4, 0], [7, 3]), 1, 0);
        local.copy_from(&global);
        assert_eq!(local.face_box(0), IndexBox::new([4, 0], [8, 3]));
        assert_eq!(local.get(0, 0, [4, 2]), 24.);
        assert_eq!(local.get(0, 0, [8, 3]), 38.);
    }
}
