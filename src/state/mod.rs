//! Pure quantum states.
//!
//! A [`State`] over `d` qubits owns a rank-`d` tensor of unit L2 norm;
//! axis `i` of the tensor is qubit `i`, and the amplitude at multi-index
//! (b_0, ..., b_{d-1}) is the coefficient of the basis vector
//! |b_0 ... b_{d-1}>.
//!
//! States come from the factories here ([`State::zeros`],
//! [`State::bitstring`], [`State::bell`], ...) or from tensor products of
//! smaller states, written with `*`:
//!
//! ```rust
//! use quanten::prelude::*;
//!
//! let register = State::zeros(2)? * State::ones(1)?;
//! assert_eq!(register.qubit_count(), 3);
//! # quanten::error::Result::Ok(())
//! ```
//!
//! Gate application returns a fresh state and leaves the input alone;
//! [`State::permute_qubits`], [`State::swap_qubits`] and measurement
//! mutate in place. Cloning is a deep copy, so `state.clone()` before a
//! mutating call preserves the original.

mod measure;

use std::{
    fmt,
    ops::{Mul, MulAssign},
};

use ndarray::ArrayD;

use crate::{
    error::{Error, Result},
    math::{approx_cmp, C, C_ONE, EPS, FRAC_1_SQRT_2, N, R},
    tensor::Tensor,
};

pub struct State {
    t: Tensor,
}

impl State {
    /// Wrap raw amplitudes. The array must have rank >= 1, every axis of
    /// extent 2, and unit L2 norm.
    pub fn new(amplitudes: ArrayD<C>) -> Result<Self> {
        if amplitudes.ndim() == 0 {
            return Err(Error::NoQubits);
        }
        let t = Tensor::new(amplitudes)?;
        let norm_sqr = t.norm_sqr();
        if (norm_sqr - 1.0).abs() > EPS {
            return Err(Error::NotNormalised(norm_sqr));
        }
        Ok(Self { t })
    }

    pub(crate) fn from_tensor(t: Tensor) -> Self {
        debug_assert!((t.norm_sqr() - 1.0).abs() <= EPS);
        Self { t }
    }

    /// |0...0> over `d` qubits.
    pub fn zeros(d: N) -> Result<Self> {
        Self::bitstring(&vec![0; d])
    }

    /// |1...1> over `d` qubits.
    pub fn ones(d: N) -> Result<Self> {
        Self::bitstring(&vec![1; d])
    }

    /// The computational basis state |b_0 ... b_{d-1}>.
    pub fn bitstring(bits: &[u8]) -> Result<Self> {
        if bits.is_empty() {
            return Err(Error::NoQubits);
        }
        check_bits(bits)?;
        let mut t = Tensor::zeros(bits.len());
        t.set(bits, C_ONE);
        Ok(Self { t })
    }

    /// The uniform superposition over `d` qubits, the state `d` Hadamards
    /// produce from |0...0>.
    pub fn positive_superposition(d: N) -> Result<Self> {
        if d == 0 {
            return Err(Error::NoQubits);
        }
        let amp = C {
            re: FRAC_1_SQRT_2.powi(d as i32),
            im: 0.,
        };
        Tensor::new(ArrayD::from_elem(vec![2; d], amp)).map(|t| Self { t })
    }

    /// A single qubit at spherical coordinates on the Bloch sphere:
    /// e^(i gamma) (cos(theta/2) |0> + e^(i phi) sin(theta/2) |1>).
    pub fn qubit(theta: R, phi: R, global_phase: R) -> Self {
        let gamma = C::from_polar(1.0, global_phase);
        let mut t = Tensor::zeros(1);
        t.set(&[0], gamma * (theta / 2.).cos());
        t.set(&[1], gamma * C::from_polar((theta / 2.).sin(), phi));
        Self { t }
    }

    /// One of the four Bell states,
    /// (|0 y> + (-1)^x |1 !y>) / sqrt(2).
    pub fn bell(x: u8, y: u8) -> Result<Self> {
        check_bits(&[x, y])?;
        let amp = C {
            re: FRAC_1_SQRT_2,
            im: 0.,
        };
        let mut t = Tensor::zeros(2);
        t.set(&[0, y], amp);
        t.set(&[1, 1 - y], if x == 0 { amp } else { -amp });
        Ok(Self { t })
    }

    #[inline]
    pub fn qubit_count(&self) -> N {
        self.t.rank()
    }

    pub fn amplitudes(&self) -> &ArrayD<C> {
        self.t.as_array()
    }

    /// Amplitude of a single basis vector.
    pub fn amplitude(&self, bits: &[u8]) -> Result<C> {
        if bits.len() != self.qubit_count() {
            return Err(Error::TargetCountMismatch {
                expected: self.qubit_count(),
                given: bits.len(),
            });
        }
        check_bits(bits)?;
        Ok(self.t.get(bits))
    }

    /// Elementwise |amplitude|^2; sums to one within [`EPS`](crate::EPS).
    pub fn probabilities(&self) -> ArrayD<R> {
        self.t.as_array().mapv(|z| z.norm_sqr())
    }

    pub fn norm_sqr(&self) -> R {
        self.t.norm_sqr()
    }

    pub fn is_normalised(&self) -> bool {
        approx_cmp::approx_real(self.norm_sqr(), 1.0)
    }

    /// Largest absolute amplitude difference to another state of the same
    /// qubit count.
    pub fn max_abs_diff(&self, other: &Self) -> R {
        approx_cmp::max_abs_diff(self.t.as_array(), other.t.as_array())
    }

    /// Reorder qubits: qubit `k` of the result is qubit `perm[k]` of the
    /// current state.
    pub fn permute_qubits(&mut self, perm: &[N]) -> Result<()> {
        self.check_permutation(perm)?;
        self.t.permute(perm);
        Ok(())
    }

    /// Undo [`permute_qubits`](Self::permute_qubits): qubit `perm[k]` of
    /// the result is qubit `k` of the current state.
    pub fn permute_qubits_inverse(&mut self, perm: &[N]) -> Result<()> {
        self.check_permutation(perm)?;
        let mut inverse = vec![0; perm.len()];
        for (k, &p) in perm.iter().enumerate() {
            inverse[p] = k;
        }
        self.t.permute(&inverse);
        Ok(())
    }

    /// Exchange two qubits. Involutive.
    pub fn swap_qubits(&mut self, i: N, j: N) -> Result<()> {
        let d = self.qubit_count();
        for &index in &[i, j] {
            if index >= d {
                return Err(Error::QubitIndexOutOfBounds { index, qubits: d });
            }
        }
        self.t.swap_axes(i, j);
        Ok(())
    }

    pub(crate) fn tensor(&self) -> &Tensor {
        &self.t
    }

    pub(crate) fn tensor_mut(&mut self) -> &mut Tensor {
        &mut self.t
    }

    fn check_permutation(&self, perm: &[N]) -> Result<()> {
        let d = self.qubit_count();
        if perm.len() != d {
            return Err(Error::TargetCountMismatch {
                expected: d,
                given: perm.len(),
            });
        }
        check_targets(perm, d)
    }
}

/// Validate a target-index list: all in range, no duplicates.
pub(crate) fn check_targets(targets: &[N], qubits: N) -> Result<()> {
    for (k, &index) in targets.iter().enumerate() {
        if index >= qubits {
            return Err(Error::QubitIndexOutOfBounds { index, qubits });
        }
        if targets[..k].contains(&index) {
            return Err(Error::DuplicateQubitIndex(index));
        }
    }
    Ok(())
}

pub(crate) fn check_bits(bits: &[u8]) -> Result<()> {
    match bits.iter().find(|&&b| b > 1) {
        Some(&b) => Err(Error::NonBinaryBit(b)),
        None => Ok(()),
    }
}

impl Clone for State {
    fn clone(&self) -> Self {
        Self { t: self.t.clone() }
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.t.as_array(), f)
    }
}

impl<'a, 'b> Mul<&'b State> for &'a State {
    type Output = State;

    /// Tensor product: the left operand's qubits come first.
    fn mul(self, other: &'b State) -> State {
        State {
            t: self.t.kron(&other.t),
        }
    }
}

impl Mul for State {
    type Output = State;

    fn mul(self, other: State) -> State {
        &self * &other
    }
}

impl MulAssign for State {
    fn mul_assign(&mut self, other: State) {
        self.t = self.t.kron(&other.t);
    }
}
