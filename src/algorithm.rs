//! Textbook quantum protocols assembled from the public surface.
//!
//! Each function builds its circuit from the state factories and the gate
//! catalog, measures with the caller's [`Rng`], and returns the classical
//! (or quantum) result the protocol promises. They double as end-to-end
//! exercises of the algebra: a wrong axis anywhere and none of these give
//! their guaranteed answers.

use rand::Rng;

use crate::{
    error::Result,
    math::N,
    operator::{cnot, hadamard, pauli_x, pauli_z, u_f},
    state::State,
};

/// Deutsch's algorithm: decide whether `f: {0,1} -> {0,1}` is constant
/// with a single oracle query. Returns `f(0) xor f(1)`, which is 0 iff
/// `f` is constant.
pub fn deutsch<F, Rg>(f: F, rng: &mut Rg) -> Result<u8>
where
    F: Fn(u8) -> u8,
    Rg: Rng + ?Sized,
{
    let state = State::bitstring(&[0, 1])?;
    let state = hadamard(2).apply(&state)?;
    let state = u_f(|bits| f(bits[0]), 1)?.apply(&state)?;
    let mut state = hadamard(1).apply_to(&state, &[0])?;

    Ok(state.measure_qubits(&[0], false, rng)?[0])
}

/// The Deutsch-Jozsa algorithm over `d` input bits.
///
/// For an `f` promised to be either constant or balanced, the returned
/// bits are all zero iff `f` is constant, again with one oracle query.
pub fn deutsch_jozsa<F, Rg>(d: N, f: F, rng: &mut Rg) -> Result<Vec<u8>>
where
    F: Fn(&[u8]) -> u8,
    Rg: Rng + ?Sized,
{
    let inputs: Vec<N> = (0..d).collect();

    let state = State::zeros(d)? * State::ones(1)?;
    let state = hadamard(d + 1).apply(&state)?;
    let state = u_f(f, d)?.apply(&state)?;
    let mut state = hadamard(d).apply_to(&state, &inputs)?;

    state.measure_qubits(&inputs, false, rng)
}

/// Quantum teleportation of a single-qubit state.
///
/// Alice holds `payload` and one half of a Bell pair, Bob the other
/// half. After Alice's Bell measurement and Bob's two conditional
/// corrections, Bob's qubit is exactly `payload`; the returned state is
/// his.
pub fn teleport<Rg: Rng + ?Sized>(payload: State, rng: &mut Rg) -> Result<State> {
    // Qubit 0: the payload. Qubits 1 and 2: the shared pair.
    let state = payload * State::bell(0, 0)?;
    let state = cnot().apply_to(&state, &[0, 1])?;
    let mut state = hadamard(1).apply_to(&state, &[0])?;

    let sent = state.measure_qubits(&[0, 1], true, rng)?;

    let mut bob = state;
    if sent[1] == 1 {
        bob = pauli_x(1).apply(&bob)?;
    }
    if sent[0] == 1 {
        bob = pauli_z(1).apply(&bob)?;
    }
    Ok(bob)
}

/// Superdense coding: transmit two classical bits through one qubit of a
/// shared Bell pair. Returns the bits the receiver decodes, which equal
/// `(b0, b1)`.
pub fn superdense_coding<Rg: Rng + ?Sized>(b0: u8, b1: u8, rng: &mut Rg) -> Result<(u8, u8)> {
    crate::state::check_bits(&[b0, b1])?;

    // Qubit 0 is the sender's half of the pair.
    let mut state = State::bell(0, 0)?;
    if b1 == 1 {
        state = pauli_x(1).apply_to(&state, &[0])?;
    }
    if b0 == 1 {
        state = pauli_z(1).apply_to(&state, &[0])?;
    }

    let state = cnot().apply(&state)?;
    let mut state = hadamard(1).apply_to(&state, &[0])?;

    let bits = state.measure(false, rng);
    Ok((bits[0], bits[1]))
}

/// Build a Bell state the explicit way, one Hadamard and one CNOT over
/// the basis state |x y>. Agrees with [`State::bell`] for every (x, y).
pub fn bell_via_circuit(x: u8, y: u8) -> Result<State> {
    let state = State::bitstring(&[x, y])?;
    let state = hadamard(1).apply_to(&state, &[0])?;
    cnot().apply(&state)
}

/// Quantum parallelism: evaluate `f` on every input at once by running
/// its oracle over a uniform superposition, then read one sample
/// |x, f(x)> back out.
pub fn quantum_parallelism<F, Rg>(d: N, f: F, rng: &mut Rg) -> Result<Vec<u8>>
where
    F: Fn(&[u8]) -> u8,
    Rg: Rng + ?Sized,
{
    let state = State::positive_superposition(d)? * State::zeros(1)?;
    let mut state = u_f(f, d)?.apply(&state)?;
    Ok(state.measure(false, rng))
}
