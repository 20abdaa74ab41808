//! Random states, unitaries and oracles.
//!
//! Everything here samples from a caller-supplied [`Rng`], so a seeded
//! generator reproduces a run exactly. These are ordinary library
//! functions rather than test helpers: randomised inputs are the main
//! way to exercise the algebra, and the Deutsch-Jozsa construction needs
//! random oracles.

use ndarray::Array2;
use rand::Rng;
use rand_distr::{Dirichlet, Distribution, StandardNormal};

use crate::{
    error::{Error, Result},
    math::{C, N, R, TAU},
    operator::Operator,
    state::State,
    tensor::Tensor,
};

/// A random pure state of `d` qubits.
///
/// Squared moduli are drawn from a flat Dirichlet distribution, so they
/// sum to one by construction; phases are uniform on [0, 2 pi).
pub fn random_state<Rg: Rng + ?Sized>(d: N, rng: &mut Rg) -> Result<State> {
    if d == 0 {
        return Err(Error::NoQubits);
    }

    let dirichlet =
        Dirichlet::new_with_size(1.0_f64, 1 << d).expect("flat Dirichlet parameters are valid");
    let moduli_sqr: Vec<R> = dirichlet.sample(rng);

    let mut t = Tensor::zeros(d);
    for (k, &p) in moduli_sqr.iter().enumerate() {
        let bits: Vec<u8> = (0..d).map(|q| ((k >> q) & 1) as u8).collect();
        let phase = rng.gen_range(0.0..TAU);
        t.set(&bits, C::from_polar(p.sqrt(), phase));
    }
    Ok(State::from_tensor(t))
}

/// A Haar-distributed random unitary on `m` qubits.
///
/// Orthonormalises a complex Ginibre matrix by modified Gram-Schmidt;
/// the implicit R factor has a positive diagonal, which is exactly the
/// condition for the Q factor to be Haar.
pub fn random_unitary<Rg: Rng + ?Sized>(m: N, rng: &mut Rg) -> Result<Operator> {
    if m == 0 {
        return Err(Error::NoQubits);
    }

    let side = 1usize << m;
    let mut q: Array2<C> = Array2::from_shape_fn((side, side), |_| C {
        re: rng.sample(StandardNormal),
        im: rng.sample(StandardNormal),
    });

    for j in 0..side {
        for i in 0..j {
            let basis = q.column(i).to_owned();
            let overlap: C = basis
                .iter()
                .zip(q.column(j).iter())
                .map(|(b, v)| b.conj() * v)
                .sum();
            q.column_mut(j)
                .zip_mut_with(&basis, |v, &b| *v -= overlap * b);
        }
        let norm: R = q.column(j).iter().map(|z| z.norm_sqr()).sum::<R>().sqrt();
        q.column_mut(j).mapv_inplace(|z| z / norm);
    }

    Operator::from_matrix(&q)
}

/// A uniformly random boolean function of `d` bits, as a closure over a
/// freshly sampled truth table. Slice position `i` of the argument is
/// bit `i` of the table index.
pub fn random_boolean_fn<Rg: Rng + ?Sized>(d: N, rng: &mut Rg) -> impl Fn(&[u8]) -> u8 {
    let table: Vec<u8> = (0..1usize << d).map(|_| rng.gen_range(0..=1)).collect();
    move |bits: &[u8]| {
        let index = bits
            .iter()
            .enumerate()
            .fold(0, |acc, (i, &b)| acc | (((b & 1) as usize) << i));
        table[index]
    }
}
