//! # Structured patches
//! Rectangular index boxes with ghost padded
//! cell- and face-centered data.
//!
//! Indices are global cell indices, the storage offset
//! of a cell `i` along an axis is `i - lower + ghost`.
//! A face index along axis `a` denotes the lower face of
//! the cell with the same index, i.e. the faces of a box
//! range from `lower` to `upper + 1` along `a`.
pub mod cell_data;
pub mod face_data;
pub use cell_data::CellData;
pub use face_data::FaceData;
use ndarray::{ArrayBase, ArrayView, ArrayViewMut, Data, DataMut, Dim, Dimension, Ix, Slice};

/// Two dimensional cell data
pub type CellData2<A> = CellData<A, 2>;
/// Three dimensional cell data
pub type CellData3<A> = CellData<A, 3>;
/// Two dimensional face data
pub type FaceData2<A> = FaceData<A, 2>;
/// Three dimensional face data
pub type FaceData3<A> = FaceData<A, 3>;

/// Lower or upper side of a box along an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Side with the smaller index
    Lower,
    /// Side with the larger index
    Upper,
}

impl Side {
    /// Both sides, lower first
    pub const BOTH: [Side; 2] = [Side::Lower, Side::Upper];

    /// Position in `[lower, upper]` arrays
    pub fn index(self) -> usize {
        match self {
            Side::Lower => 0,
            Side::Upper => 1,
        }
    }
}

/// Rectangular box in cell index space, bounds are inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexBox<const N: usize> {
    /// Smallest cell index per axis
    pub lower: [i32; N],
    /// Largest cell index per axis
    pub upper: [i32; N],
}

impl<const N: usize> IndexBox<N> {
    /// New box from inclusive bounds
    ///
    /// # Panics
    /// When the box is empty along any axis.
    pub fn new(lower: [i32; N], upper: [i32; N]) -> Self {
        for axis in 0..N {
            assert!(
                upper[axis] >= lower[axis],
                "Empty box along axis {}: lower {} > upper {}",
                axis,
                lower[axis],
                upper[axis]
            );
        }
        Self { lower, upper }
    }

    /// Box starting at the origin with the given number of cells
    ///
    /// # Panics
    /// When any extent is zero.
    pub fn from_shape(shape: [usize; N]) -> Self {
        let lower = [0; N];
        let mut upper = [0; N];
        for axis in 0..N {
            assert!(shape[axis] > 0, "Zero extent along axis {}", axis);
            upper[axis] = shape[axis] as i32 - 1;
        }
        Self { lower, upper }
    }

    /// Number of cells per axis
    pub fn shape(&self) -> [usize; N] {
        let mut shape = [0; N];
        for axis in 0..N {
            shape[axis] = (self.upper[axis] - self.lower[axis] + 1) as usize;
        }
        shape
    }

    /// Number of faces per axis normal to `axis`
    pub fn face_shape(&self, axis: usize) -> [usize; N] {
        let mut shape = self.shape();
        shape[axis] += 1;
        shape
    }

    /// Total number of cells
    pub fn size(&self) -> usize {
        self.shape().iter().product()
    }

    /// Return true if cell index lies inside
    pub fn contains(&self, index: [i32; N]) -> bool {
        (0..N).all(|axis| index[axis] >= self.lower[axis] && index[axis] <= self.upper[axis])
    }

    /// Box grown by `width` cells in every direction
    pub fn grow(&self, width: [usize; N]) -> Self {
        let mut grown = *self;
        for axis in 0..N {
            grown.lower[axis] -= width[axis] as i32;
            grown.upper[axis] += width[axis] as i32;
        }
        grown
    }

    /// Overlap of two boxes
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let mut lower = [0; N];
        let mut upper = [0; N];
        for axis in 0..N {
            lower[axis] = self.lower[axis].max(other.lower[axis]);
            upper[axis] = self.upper[axis].min(other.upper[axis]);
            if upper[axis] < lower[axis] {
                return None;
            }
        }
        Some(Self { lower, upper })
    }
}

/// Patch of a structured cartesian grid
///
/// Besides the box, a patch knows its grid spacing and which
/// of its sides lie on the physical domain boundary. Only
/// those sides have their ghost cells filled by boundary
/// conditions, all other ghost cells must be supplied by
/// the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Patch<A, const N: usize> {
    /// Cells of the patch
    pub bbox: IndexBox<N>,
    /// Grid spacing per axis
    pub dx: [A; N],
    /// Sides on the physical boundary \[axis\]\[lower, upper\]
    pub physical_boundary: [[bool; 2]; N],
}

impl<A: Copy, const N: usize> Patch<A, N> {
    /// Patch covering the whole domain, all sides are physical boundaries
    pub fn new(bbox: IndexBox<N>, dx: [A; N]) -> Self {
        Self {
            bbox,
            dx,
            physical_boundary: [[true; 2]; N],
        }
    }

    /// Set which sides lie on the physical boundary
    pub fn with_physical_boundary(mut self, physical_boundary: [[bool; 2]; N]) -> Self {
        self.physical_boundary = physical_boundary;
        self
    }

    /// Return true if `side` of `axis` is a physical boundary
    pub fn touches_boundary(&self, axis: usize, side: Side) -> bool {
        self.physical_boundary[axis][side.index()]
    }
}

/// Ghost width if uniform across axes
pub(crate) fn uniform_width<const N: usize>(ghost: &[usize; N]) -> Option<usize> {
    let min = ghost.iter().min().copied().unwrap_or(0);
    let max = ghost.iter().max().copied().unwrap_or(0);
    if min == max {
        Some(min)
    } else {
        None
    }
}

/// Offsets of `index` into ghost padded storage
pub(crate) fn storage_offset<const N: usize>(
    bbox: &IndexBox<N>,
    ghost: &[usize; N],
    index: [i32; N],
) -> [usize; N] {
    let mut pos = [0; N];
    for axis in 0..N {
        let p = index[axis] - bbox.lower[axis] + ghost[axis] as i32;
        assert!(p >= 0, "Index {:?} outside of ghost box along axis {}", index, axis);
        pos[axis] = p as usize;
    }
    pos
}

/// View of the region `start..start + len` per axis
pub(crate) fn subview<S, A, const N: usize>(
    arr: &ArrayBase<S, Dim<[Ix; N]>>,
    start: [usize; N],
    len: [usize; N],
) -> ArrayView<'_, A, Dim<[Ix; N]>>
where
    S: Data<Elem = A>,
    Dim<[Ix; N]>: Dimension,
{
    arr.slice_each_axis(|ax| {
        let a = ax.axis.index();
        Slice::from(start[a]..start[a] + len[a])
    })
}

/// Mutable view of the region `start..start + len` per axis
pub(crate) fn subview_mut<S, A, const N: usize>(
    arr: &mut ArrayBase<S, Dim<[Ix; N]>>,
    start: [usize; N],
    len: [usize; N],
) -> ArrayViewMut<'_, A, Dim<[Ix; N]>>
where
    S: DataMut<Elem = A>,
    Dim<[Ix; N]>: Dimension,
{
    arr.slice_each_axis_mut(|ax| {
        let a = ax.axis.index();
        Slice::from(start[a]..start[a] + len[a])
    })
}
