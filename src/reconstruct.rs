//! # Reconstruction of cell profiles along a pencil
//!
//! A reconstruction takes the cell means of a one dimensional
//! pencil and returns the values of a (limited) polynomial
//! profile at the lower and upper edge of every cell.
//!
//! Implemented schemes, selected by name:
//! - `upwind`: piecewise constant, see [`PiecewiseConstant`]
//! - `plm`: piecewise linear, see [`Plm`]
//! - `ppm`: piecewise parabolic, see [`Ppm`]
//! - `xsppm7`: seven point piecewise parabolic, see [`XsPpm7`] (default)
//!
//! All schemes but `upwind` are exact for linear data. No scheme
//! places an edge value outside of the range of the adjacent cell
//! means in monotone regions.
pub mod constant;
pub mod limiter;
pub mod plm;
pub mod ppm;
pub mod xsppm7;
use crate::error::{Error, Result};
use crate::types::FloatNum;
pub use constant::PiecewiseConstant;
pub use plm::Plm;
pub use ppm::Ppm;
use std::ops::Range;
pub use xsppm7::XsPpm7;

/// Reconstruct edge values of cells along a pencil
#[enum_dispatch]
pub trait Reconstruct {
    /// Registry name of the scheme
    fn name(&self) -> &'static str;

    /// Ghost cells needed on both ends of a pencil to provide
    /// the face states of all faces of the interior cells
    fn min_ghost_width(&self) -> usize;

    /// Edge values of the cells `cells` of pencil `q`
    ///
    /// `q_minus[i]` and `q_plus[i]` receive the values at the lower
    /// and upper edge of cell `i`, `dq` is scratch. All slices
    /// have the length of `q`. The stencil of the scheme must fit
    /// into `q` for every cell in `cells`.
    fn edges<A: FloatNum>(
        &self,
        q: &[A],
        cells: Range<usize>,
        dq: &mut [A],
        q_minus: &mut [A],
        q_plus: &mut [A],
    );
}

/// Collection of reconstruction schemes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reconstruction {
    /// First order upwind
    PiecewiseConstant(PiecewiseConstant),
    /// Piecewise linear
    Plm(Plm),
    /// Piecewise parabolic
    Ppm(Ppm),
    /// Seven point piecewise parabolic
    XsPpm7(XsPpm7),
}

impl Reconstruction {
    /// Registered names, in order of increasing accuracy
    pub const NAMES: &'static [&'static str] = &["upwind", "plm", "ppm", "xsppm7"];

    /// Select scheme by name
    ///
    /// # Errors
    /// When `name` is not registered, see [`Reconstruction::NAMES`].
    ///
    /// # Example
    ///```
    /// use rustfv::reconstruct::{Reconstruct, Reconstruction};
    /// let scheme = Reconstruction::from_name("ppm").unwrap();
    /// assert_eq!(scheme.min_ghost_width(), 3);
    /// assert!(Reconstruction::from_name("weno").is_err());
    ///```
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "upwind" => Ok(Self::PiecewiseConstant(PiecewiseConstant)),
            "plm" => Ok(Self::Plm(Plm)),
            "ppm" => Ok(Self::Ppm(Ppm)),
            "xsppm7" => Ok(Self::XsPpm7(XsPpm7)),
            _ => Err(Error::unknown_key("reconstruction", name, Self::NAMES)),
        }
    }
}

impl Default for Reconstruction {
    fn default() -> Self {
        Self::XsPpm7(XsPpm7)
    }
}

impl Reconstruct for Reconstruction {
    fn name(&self) -> &'static str {
        match self {
            Self::PiecewiseConstant(ref t) => t.name(),
            Self::Plm(ref t) => t.name(),
            Self::Ppm(ref t) => t.name(),
            Self::XsPpm7(ref t) => t.name(),
        }
    }

    fn min_ghost_width(&self) -> usize {
        match self {
            Self::PiecewiseConstant(ref t) => t.min_ghost_width(),
            Self::Plm(ref t) => t.min_ghost_width(),
            Self::Ppm(ref t) => t.min_ghost_width(),
            Self::XsPpm7(ref t) => t.min_ghost_width(),
        }
    }

    fn edges<A: FloatNum>(
        &self,
        q: &[A],
        cells: Range<usize>,
        dq: &mut [A],
        q_minus: &mut [A],
        q_plus: &mut [A],
    ) {
        match self {
            Self::PiecewiseConstant(ref t) => t.edges(q, cells, dq, q_minus, q_plus),
            Self::Plm(ref t) => t.edges(q, cells, dq, q_minus, q_plus),
            Self::Ppm(ref t) => t.edges(q, cells, dq, q_minus, q_plus),
            Self::XsPpm7(ref t) => t.edges(q, cells, dq, q_minus, q_plus),
        }
    }
}
