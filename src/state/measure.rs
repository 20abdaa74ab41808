//! Projective measurement.
//!
//! Sampling draws from the caller's [`Rng`], so a seeded generator makes
//! a whole simulation reproducible. Collapse follows the textbook rule:
//! amplitudes inconsistent with the observed bits drop to zero and the
//! remainder is renormalised, which is why an immediately repeated
//! non-destructive measurement returns the same outcome.

use rand::Rng;
use rand_distr::WeightedIndex;

use super::{check_targets, State};
use crate::{
    error::Result,
    math::{C_ZERO, N},
    tensor::Tensor,
};

impl State {
    /// Measure every qubit and return the observed bits, qubit 0 first.
    ///
    /// With `remove = true` the measured qubits are dropped and the state
    /// shrinks to a rank-0 scalar of unit modulus; with `remove = false`
    /// it collapses onto the observed basis vector.
    pub fn measure<Rg: Rng + ?Sized>(&mut self, remove: bool, rng: &mut Rg) -> Vec<u8> {
        let d = self.qubit_count();
        let weights: Vec<_> = self
            .tensor()
            .to_flat()
            .iter()
            .map(|z| z.norm_sqr())
            .collect();
        let outcome = rng.sample(
            WeightedIndex::new(&weights).expect("probabilities of a unit state sum to one"),
        );
        let bits: Vec<u8> = (0..d).map(|q| ((outcome >> q) & 1) as u8).collect();

        let observed = self.tensor().get(&bits);
        let phase = observed / observed.norm();
        if remove {
            *self.tensor_mut() = Tensor::scalar(phase);
        } else {
            let mut collapsed = Tensor::zeros(d);
            collapsed.set(&bits, phase);
            *self.tensor_mut() = collapsed;
        }

        bits
    }

    /// Measure the listed qubits, returned in the order given.
    ///
    /// The remaining qubits collapse onto the subspace consistent with
    /// the outcome. With `remove = true` the measured axes are dropped
    /// and the state keeps rank `d - qubits.len()`; otherwise the rank is
    /// unchanged and the measured axes carry all remaining amplitude.
    pub fn measure_qubits<Rg: Rng + ?Sized>(
        &mut self,
        qubits: &[N],
        remove: bool,
        rng: &mut Rg,
    ) -> Result<Vec<u8>> {
        let d = self.qubit_count();
        check_targets(qubits, d)?;

        // Marginal distribution over the measured subset, keyed by the
        // measured bits little-endian in the order requested.
        let mut marginal = vec![0.0; 1 << qubits.len()];
        for (ix, z) in self.tensor().as_array().indexed_iter() {
            let mut key = 0;
            for (k, &q) in qubits.iter().enumerate() {
                key |= ix[q] << k;
            }
            marginal[key] += z.norm_sqr();
        }

        let key = rng.sample(
            WeightedIndex::new(&marginal).expect("marginal of a unit state sums to one"),
        );
        let bits: Vec<u8> = (0..qubits.len()).map(|k| ((key >> k) & 1) as u8).collect();

        let norm = marginal[key].sqrt();
        for (ix, z) in self.tensor_mut().as_array_mut().indexed_iter_mut() {
            let consistent = qubits
                .iter()
                .zip(&bits)
                .all(|(&q, &bit)| ix[q] == bit as usize);
            if consistent {
                *z /= norm;
            } else {
                *z = C_ZERO;
            }
        }

        if remove {
            self.remove_measured(qubits, &bits);
        }

        Ok(bits)
    }

    /// Drop measured axes by indexing them at the observed bit, highest
    /// axis first so lower indices stay valid.
    fn remove_measured(&mut self, qubits: &[N], bits: &[u8]) {
        let mut observed: Vec<(N, u8)> = qubits.iter().copied().zip(bits.iter().copied()).collect();
        observed.sort_by(|a, b| b.0.cmp(&a.0));

        let mut array = std::mem::replace(self.tensor_mut(), Tensor::zeros(0)).into_array();
        for (axis, bit) in observed {
            array = array.index_axis_move(ndarray::Axis(axis), bit as usize);
        }
        *self.tensor_mut() = Tensor::new(array).expect("removing axes keeps extents at 2");
    }
}
