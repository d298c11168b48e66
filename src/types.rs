//! Types and traits for real numbers
use ndarray::ScalarOperand;
use num_traits::Float;
use std::fmt::{Debug, Display};
use std::iter::Sum;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

/// Floating point type, used throughout this crate for cell and face data
pub trait FloatNum:
    Float
    + ScalarOperand
    + From<f32>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Sum
    + Debug
    + Display
    + Send
    + Sync
    + 'static
{
}

impl<T> FloatNum for T where
    T: Float
        + ScalarOperand
        + From<f32>
        + AddAssign
        + SubAssign
        + MulAssign
        + DivAssign
        + Sum
        + Debug
        + Display
        + Send
        + Sync
        + 'static
{
}

/// Literal in working precision. Only used for small
/// integers and simple fractions, which are exact in `f32`.
#[inline]
pub fn lit<A: FloatNum>(v: f32) -> A {
    <A as From<f32>>::from(v)
}
