//! Dense complex tensor of shape (2, 2, ..., 2).
//!
//! Everything the crate does is a rank manipulation over one of these:
//! states are rank-d, operators rank-2m. The axis layout is the sole
//! carrier of qubit identity, so the only place allowed to translate
//! between axes and flat integer indices is this module. The convention
//! is little-endian: a multi-index (a_0, ..., a_{r-1}) flattens to
//! sum(a_i * 2^i), qubit 0 least significant.

use ndarray::{Array2, ArrayD, IxDyn};

use crate::{
    error::{Error, Result},
    math::{C, C_ZERO, N, R},
};

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Tensor(ArrayD<C>);

impl Tensor {
    /// Wrap a raw array, checking that every axis has extent exactly 2.
    pub fn new(data: ArrayD<C>) -> Result<Self> {
        if data.shape().iter().any(|&extent| extent != 2) {
            return Err(Error::ShapeMismatch(format!(
                "every axis must have extent 2, got shape {:?}",
                data.shape()
            )));
        }
        Ok(Self(data))
    }

    pub fn zeros(rank: N) -> Self {
        Self(ArrayD::zeros(vec![2; rank]))
    }

    /// Rank-0 tensor holding a single value.
    pub fn scalar(z: C) -> Self {
        Self(ArrayD::from_elem(IxDyn(&[]), z))
    }

    #[inline]
    pub fn rank(&self) -> N {
        self.0.ndim()
    }

    pub fn as_array(&self) -> &ArrayD<C> {
        &self.0
    }

    pub fn as_array_mut(&mut self) -> &mut ArrayD<C> {
        &mut self.0
    }

    pub fn into_array(self) -> ArrayD<C> {
        self.0
    }

    pub fn get(&self, bits: &[u8]) -> C {
        let ix: Vec<N> = bits.iter().map(|&b| b as N).collect();
        self.0[&ix[..]]
    }

    pub fn set(&mut self, bits: &[u8], z: C) {
        let ix: Vec<N> = bits.iter().map(|&b| b as N).collect();
        self.0[&ix[..]] = z;
    }

    pub fn norm_sqr(&self) -> R {
        self.0.iter().map(|z| z.norm_sqr()).sum()
    }

    /// Outer product with axis concatenation: the result's first `rank()`
    /// axes belong to `self`, the rest to `other`.
    pub fn kron(&self, other: &Self) -> Self {
        let mut shape = self.0.shape().to_vec();
        shape.extend_from_slice(other.0.shape());

        let data: Vec<C> = self
            .0
            .iter()
            .flat_map(|&x| other.0.iter().map(move |&y| x * y))
            .collect();

        Self(ArrayD::from_shape_vec(shape, data).expect("kron preserves element count"))
    }

    /// Sum-over-product of `self` and `other` along the paired axis lists.
    /// Remaining axes of `self` come first, in their original order, then
    /// the remaining axes of `other`.
    ///
    /// Realised as permute -> flatten -> matrix product -> unflatten; with
    /// every extent fixed at 2 the flattening is always exact.
    pub fn contract(&self, other: &Self, axes_a: &[N], axes_b: &[N]) -> Self {
        debug_assert_eq!(axes_a.len(), axes_b.len());

        let free_a: Vec<N> = (0..self.rank()).filter(|i| !axes_a.contains(i)).collect();
        let free_b: Vec<N> = (0..other.rank()).filter(|i| !axes_b.contains(i)).collect();

        // Left operand: free axes then contracted axes. Right operand:
        // contracted axes then free axes. Both sides list the contracted
        // axes in the caller's pairing order.
        let perm_a: Vec<N> = free_a.iter().chain(axes_a).copied().collect();
        let perm_b: Vec<N> = axes_b.iter().chain(&free_b).copied().collect();

        let contracted = 1usize << axes_a.len();
        let rows = 1usize << free_a.len();
        let cols = 1usize << free_b.len();

        let lhs = self
            .0
            .view()
            .permuted_axes(IxDyn(&perm_a))
            .as_standard_layout()
            .into_owned()
            .into_shape((rows, contracted))
            .expect("contraction flattening is exact");
        let rhs = other
            .0
            .view()
            .permuted_axes(IxDyn(&perm_b))
            .as_standard_layout()
            .into_owned()
            .into_shape((contracted, cols))
            .expect("contraction flattening is exact");

        let product = lhs.dot(&rhs);
        let shape = vec![2; free_a.len() + free_b.len()];
        Self(
            product
                .into_shape(shape)
                .expect("contraction unflattening is exact"),
        )
    }

    /// Reorder axes: axis `k` of the result is axis `perm[k]` of `self`.
    pub fn permuted(self, perm: &[N]) -> Self {
        debug_assert_eq!(perm.len(), self.rank());
        Self(self.0.permuted_axes(IxDyn(perm)))
    }

    /// In-place counterpart of [`permuted`](Self::permuted).
    pub fn permute(&mut self, perm: &[N]) {
        let data = std::mem::replace(&mut self.0, ArrayD::zeros(IxDyn(&[])));
        self.0 = data.permuted_axes(IxDyn(perm));
    }

    pub fn swap_axes(&mut self, i: N, j: N) {
        self.0.swap_axes(i, j);
    }

    /// Amplitudes in flat little-endian order: entry `k` is the element
    /// whose axis-`i` index is bit `i` of `k`.
    pub fn to_flat(&self) -> Vec<C> {
        let mut flat = vec![C_ZERO; 1 << self.rank()];
        for (ix, &z) in self.0.indexed_iter() {
            let mut k = 0;
            for axis in 0..self.rank() {
                k |= ix[axis] << axis;
            }
            flat[k] = z;
        }
        flat
    }

    /// Grouped matrix view of a rank-2m tensor: row index collects the
    /// even (output) axes, column index the odd (input) axes, both
    /// little-endian. This and [`from_matrix`](Self::from_matrix) are the
    /// only crossings between interleaved axes and matrix layout.
    pub fn to_matrix(&self) -> Array2<C> {
        debug_assert_eq!(self.rank() % 2, 0);
        let m = self.rank() / 2;
        let side = 1usize << m;

        Array2::from_shape_fn((side, side), |(row, col)| {
            let mut ix = Vec::with_capacity(2 * m);
            for q in 0..m {
                ix.push((row >> q) & 1);
                ix.push((col >> q) & 1);
            }
            self.0[&ix[..]]
        })
    }

    /// Inverse of [`to_matrix`](Self::to_matrix): spread a 2^m x 2^m
    /// matrix over interleaved (out, in) axis pairs.
    pub fn from_matrix(matrix: &Array2<C>) -> Result<Self> {
        let side = matrix.nrows();
        if matrix.ncols() != side || side < 2 || !side.is_power_of_two() {
            return Err(Error::ShapeMismatch(format!(
                "operator matrix must be square with power-of-two side >= 2, got {}x{}",
                matrix.nrows(),
                matrix.ncols()
            )));
        }
        let m = side.trailing_zeros() as N;

        Ok(Self(ArrayD::from_shape_fn(vec![2; 2 * m], |ix| {
            let mut row = 0;
            let mut col = 0;
            for q in 0..m {
                row |= ix[2 * q] << q;
                col |= ix[2 * q + 1] << q;
            }
            matrix[(row, col)]
        })))
    }
}
