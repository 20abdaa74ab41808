//! Unitary operators and the gate catalog.
//!
//! An [`Operator`] on `m` qubits owns a rank-`2m` tensor whose axes
//! interleave one (output, input) pair per qubit:
//! (out_0, in_0, out_1, in_1, ...). Grouping the even axes and the odd
//! axes instead recovers the familiar 2^m x 2^m unitary matrix; that
//! grouped view exists only at the [`Operator::matrix`] /
//! [`Operator::from_matrix`] boundary and in [`Operator::adj`]. The
//! interleaved layout is what lets the tensor product of operators be a
//! plain concatenation of per-qubit axis pairs, mirroring how states lay
//! out one axis per qubit.
//!
//! Applying a gate is a tensor contraction of its input axes against the
//! targeted state axes; no flattening to a matrix happens on that path.
//! Any subset of a register's qubits can be targeted, in any order:
//!
//! ```rust
//! use quanten::prelude::*;
//!
//! let register = State::zeros(3)?;
//! // A CNOT with control on qubit 2 and target on qubit 0.
//! let flipped = op::cnot().apply_to(&register, &[2, 0])?;
//! # quanten::error::Result::Ok(())
//! ```
//!
//! Operators compose with [`Operator::compose`] (apply the argument
//! first), tensor together with `*`, and conjugate-transpose with
//! [`Operator::adj`]. Catalog constructors live in this module too; the
//! single-qubit families take a qubit count `d` and return the d-fold
//! tensor power, so `op::hadamard(3)` is H on every qubit of a 3-qubit
//! register.

mod gates;

pub use self::gates::*;

use std::{
    fmt,
    ops::{Mul, MulAssign},
};

use ndarray::{Array2, ArrayD};

use crate::{
    error::{Error, Result},
    math::{approx_cmp, C, C_ONE, C_ZERO, N, R},
    state::{check_targets, State},
    tensor::Tensor,
};

pub struct Operator {
    t: Tensor,
}

impl Operator {
    /// Wrap a raw interleaved-axis tensor of even rank >= 2.
    pub fn new(tensor: ArrayD<C>) -> Result<Self> {
        if tensor.ndim() == 0 || tensor.ndim() % 2 != 0 {
            return Err(Error::ShapeMismatch(format!(
                "an operator tensor needs even rank >= 2, got rank {}",
                tensor.ndim()
            )));
        }
        Tensor::new(tensor).map(|t| Self { t })
    }

    /// Build an operator from its grouped 2^m x 2^m matrix, little-endian
    /// basis order (qubit 0 is the least significant bit).
    pub fn from_matrix(matrix: &Array2<C>) -> Result<Self> {
        Tensor::from_matrix(matrix).map(|t| Self { t })
    }

    /// Number of qubits the operator acts on.
    #[inline]
    pub fn qubit_count(&self) -> N {
        self.t.rank() / 2
    }

    pub fn as_array(&self) -> &ArrayD<C> {
        self.t.as_array()
    }

    /// The grouped matrix view.
    pub fn matrix(&self) -> Array2<C> {
        self.t.to_matrix()
    }

    /// Apply to the first `qubit_count()` qubits of `state`.
    pub fn apply(&self, state: &State) -> Result<State> {
        let targets: Vec<N> = (0..self.qubit_count()).collect();
        self.apply_to(state, &targets)
    }

    /// Apply to the listed qubits of `state`, in order: input leg `k` of
    /// the operator contracts against qubit `qubits[k]`.
    ///
    /// The result is a fresh state; untargeted qubits pass through
    /// unchanged and keep their positions.
    pub fn apply_to(&self, state: &State, qubits: &[N]) -> Result<State> {
        let m = self.qubit_count();
        let d = state.qubit_count();
        if m > d {
            return Err(Error::ShapeMismatch(format!(
                "operator on {} qubits cannot act on a {}-qubit state",
                m, d
            )));
        }
        if qubits.len() != m {
            return Err(Error::TargetCountMismatch {
                expected: m,
                given: qubits.len(),
            });
        }
        check_targets(qubits, d)?;

        let in_axes: Vec<N> = (0..m).map(|k| 2 * k + 1).collect();
        let contracted = self.t.contract(state.tensor(), &in_axes, qubits);

        // The contraction leaves (out_0, ..., out_{m-1}, untouched state
        // axes in original order); send out_k home to position qubits[k].
        let mut perm = vec![0; d];
        for (k, &q) in qubits.iter().enumerate() {
            perm[q] = k;
        }
        for (r, q) in (0..d).filter(|q| !qubits.contains(q)).enumerate() {
            perm[q] = m + r;
        }
        Ok(State::from_tensor(contracted.permuted(&perm)))
    }

    /// Operator-on-operator application, `self` after `other`.
    ///
    /// With equal qubit counts this is the matrix product
    /// M_self . M_other. A smaller `other` acts on qubits 0..m_other
    /// first, as if padded with the identity on the rest.
    pub fn compose(&self, other: &Operator) -> Result<Operator> {
        let m_u = self.qubit_count();
        let m_v = other.qubit_count();
        if m_v > m_u {
            return Err(Error::ShapeMismatch(format!(
                "cannot compose a {}-qubit operator onto a {}-qubit one",
                m_v, m_u
            )));
        }

        let in_axes: Vec<N> = (0..m_v).map(|k| 2 * k + 1).collect();
        let out_axes: Vec<N> = (0..m_v).map(|k| 2 * k).collect();
        let contracted = self.t.contract(&other.t, &in_axes, &out_axes);

        // Free axes arrive as: self's first m_v out legs, self's
        // untouched (out, in) pairs, then other's in legs. Re-interleave.
        let free_self = 2 * m_u - m_v;
        let mut perm = vec![0; 2 * m_u];
        for k in 0..m_u {
            if k < m_v {
                perm[2 * k] = k;
                perm[2 * k + 1] = free_self + k;
            } else {
                perm[2 * k] = m_v + 2 * (k - m_v);
                perm[2 * k + 1] = m_v + 2 * (k - m_v) + 1;
            }
        }
        Ok(Operator {
            t: contracted.permuted(&perm),
        })
    }

    /// Hermitian conjugate: the grouped matrix is conjugate-transposed
    /// and spread back over interleaved axes.
    pub fn adj(&self) -> Operator {
        let adjoint = self.matrix().t().mapv(|z| z.conj());
        Operator {
            t: Tensor::from_matrix(&adjoint).expect("adjoint keeps the matrix square"),
        }
    }

    /// `n`-fold tensor power of `self`.
    pub fn tensor_pow(&self, n: N) -> Operator {
        assert!(n >= 1, "tensor power needs at least one factor");
        let mut t = self.t.clone();
        for _ in 1..n {
            t = t.kron(&self.t);
        }
        Operator { t }
    }

    /// U . U-adjoint = identity within [`EPS`](crate::EPS).
    pub fn is_unitary(&self) -> bool {
        let matrix = self.matrix();
        let product = matrix.dot(&matrix.t().mapv(|z| z.conj()));
        product.indexed_iter().all(|((row, col), z)| {
            let expected = if row == col { C_ONE } else { C_ZERO };
            approx_cmp::approx_eq(z, &expected)
        })
    }

    /// Largest absolute elementwise difference to another operator of the
    /// same qubit count.
    pub fn max_abs_diff(&self, other: &Self) -> R {
        approx_cmp::max_abs_diff(self.t.as_array(), other.t.as_array())
    }
}

impl Clone for Operator {
    fn clone(&self) -> Self {
        Self { t: self.t.clone() }
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.matrix(), f)
    }
}

impl<'a, 'b> Mul<&'b Operator> for &'a Operator {
    type Output = Operator;

    /// Tensor product: concatenates per-qubit (out, in) axis pairs, so
    /// the left operand acts on the first qubits of the combined
    /// register.
    fn mul(self, other: &'b Operator) -> Operator {
        Operator {
            t: self.t.kron(&other.t),
        }
    }
}

impl Mul for Operator {
    type Output = Operator;

    fn mul(self, other: Operator) -> Operator {
        &self * &other
    }
}

impl MulAssign for Operator {
    fn mul_assign(&mut self, other: Operator) {
        self.t = self.t.kron(&other.t);
    }
}
