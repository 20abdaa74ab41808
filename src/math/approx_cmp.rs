use float_cmp::approx_eq;
use ndarray::ArrayD;

use super::{consts::EPS, types::*};

#[inline]
pub(crate) fn approx_real(x: R, y: R) -> bool {
    approx_eq!(R, x, y, epsilon = EPS)
}

#[inline]
pub(crate) fn approx_eq(a: &C, b: &C) -> bool {
    approx_real(a.re, b.re) && approx_real(a.im, b.im)
}

/// Largest elementwise absolute difference between two tensors of equal
/// shape.
pub(crate) fn max_abs_diff(a: &ArrayD<C>, b: &ArrayD<C>) -> R {
    debug_assert_eq!(a.shape(), b.shape());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, R::max)
}
