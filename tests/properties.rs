//! Randomised invariants of the state/operator algebra.
//!
//! Every test draws its sizes and inputs from a seeded generator, so a
//! failure reproduces exactly.

use quanten::{prelude::*, EPS};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

const TRIALS: usize = 10;

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// `m` distinct qubit indices of a `d`-qubit register, in random order.
fn random_targets(d: usize, m: usize, rng: &mut StdRng) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..d).collect();
    indices.shuffle(rng);
    indices.truncate(m);
    indices
}

fn assert_identity(u: &Operator, d: usize) {
    assert!(u.max_abs_diff(&op::identity(d)) < EPS);
}

#[test]
fn constructed_states_have_unit_norm() {
    let mut rng = rng(101);
    for _ in 0..TRIALS {
        let d = rng.gen_range(1..8);

        let factories = [
            State::zeros(d).unwrap(),
            State::ones(d).unwrap(),
            State::positive_superposition(d).unwrap(),
            State::bitstring(&(0..d).map(|_| rng.gen_range(0..=1)).collect::<Vec<u8>>()).unwrap(),
            State::qubit(
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
            ),
            random_state(d, &mut rng).unwrap(),
        ];
        for state in &factories {
            assert!((state.probabilities().sum() - 1.0).abs() < EPS);
        }
    }

    for x in 0..2 {
        for y in 0..2 {
            assert!((State::bell(x, y).unwrap().probabilities().sum() - 1.0).abs() < EPS);
        }
    }
}

#[test]
fn tensor_product_states_have_unit_norm() {
    let mut rng = rng(102);
    for _ in 0..TRIALS {
        let d1 = rng.gen_range(1..4);
        let d2 = rng.gen_range(1..4);
        let product = random_state(d1, &mut rng).unwrap() * random_state(d2, &mut rng).unwrap();
        assert_eq!(product.qubit_count(), d1 + d2);
        assert!((product.probabilities().sum() - 1.0).abs() < EPS);
    }
}

#[test]
fn catalog_operators_are_unitary() {
    let mut rng = rng(103);
    for _ in 0..TRIALS {
        let d = rng.gen_range(1..5);
        for u in &[
            op::identity(d),
            op::pauli_x(d),
            op::pauli_y(d),
            op::pauli_z(d),
            op::hadamard(d),
            op::phase(d),
            op::pi_by_8(d),
            op::sqrt_not(d),
        ] {
            assert!(u.is_unitary());
            assert_identity(&u.compose(&u.adj()).unwrap(), d);
            assert_identity(&u.adj().compose(u).unwrap(), d);
        }
    }

    for (u, d) in &[
        (op::cnot(), 2),
        (op::swap(), 2),
        (op::sqrt_swap(), 2),
        (op::toffoli(), 3),
    ] {
        assert!(u.is_unitary());
        assert_identity(&u.compose(&u.adj()).unwrap(), *d);
    }
}

#[test]
fn random_and_composite_operators_are_unitary() {
    let mut rng = rng(104);
    for _ in 0..TRIALS {
        let d = rng.gen_range(1..5);
        let u = random_unitary(d, &mut rng).unwrap();
        assert_identity(&u.compose(&u.adj()).unwrap(), d);
        assert_identity(&u.adj().compose(&u).unwrap(), d);

        let v = random_unitary(rng.gen_range(1..4), &mut rng).unwrap();
        let product = &u * &v;
        let total = u.qubit_count() + v.qubit_count();
        assert_identity(&product.compose(&product.adj()).unwrap(), total);
    }
}

#[test]
fn oracle_and_controlled_operators_are_unitary() {
    let mut rng = rng(105);
    for _ in 0..TRIALS {
        let d = rng.gen_range(2..6);
        let f = random_boolean_fn(d, &mut rng);
        let oracle = op::u_f(f, d).unwrap();
        assert!(oracle.is_unitary());
        assert_identity(&oracle.compose(&oracle.adj()).unwrap(), d + 1);

        let u = random_unitary(rng.gen_range(1..4), &mut rng).unwrap();
        let controlled = op::controlled(&u);
        assert!(controlled.is_unitary());
        assert_identity(
            &controlled.compose(&controlled.adj()).unwrap(),
            u.qubit_count() + 1,
        );
    }
}

#[test]
fn adjoint_matches_matrix_adjoint() {
    let mut rng = rng(106);
    for _ in 0..TRIALS {
        let d = rng.gen_range(1..7);
        let u = random_unitary(d, &mut rng).unwrap();
        let reconstructed =
            Operator::from_matrix(&u.matrix().t().mapv(|z| z.conj())).unwrap();
        assert!(u.adj().max_abs_diff(&reconstructed) < EPS);
    }
}

#[test]
fn permutation_then_inverse_is_identity() {
    let mut rng = rng(107);
    for _ in 0..TRIALS {
        let d = rng.gen_range(3..8);
        let mut state = random_state(d, &mut rng).unwrap();
        let original = state.clone();

        let mut perm: Vec<usize> = (0..d).collect();
        perm.shuffle(&mut rng);
        state.permute_qubits(&perm).unwrap();
        state.permute_qubits_inverse(&perm).unwrap();

        assert!(state.max_abs_diff(&original) < EPS);
    }
}

#[test]
fn swap_is_involutive() {
    let mut rng = rng(108);
    for _ in 0..TRIALS {
        let d = rng.gen_range(3..8);
        let mut state = random_state(d, &mut rng).unwrap();
        let original = state.clone();

        let targets = random_targets(d, 2, &mut rng);
        state.swap_qubits(targets[0], targets[1]).unwrap();
        state.swap_qubits(targets[0], targets[1]).unwrap();

        assert!(state.max_abs_diff(&original) < EPS);
    }
}

#[test]
fn subset_application_equals_permute_then_apply() {
    let mut rng = rng(109);
    for _ in 0..TRIALS {
        let d = rng.gen_range(3..8);
        let m = rng.gen_range(2..d);
        let state = random_state(d, &mut rng).unwrap();
        let u = random_unitary(m, &mut rng).unwrap();

        let targets = random_targets(d, m, &mut rng);
        let direct = u.apply_to(&state, &targets).unwrap();

        let mut rest: Vec<usize> = (0..d).filter(|q| !targets.contains(q)).collect();
        let mut permutation = targets.clone();
        permutation.append(&mut rest);

        let mut permuted = state.clone();
        permuted.permute_qubits(&permutation).unwrap();
        let mut roundabout = u.apply(&permuted).unwrap();
        roundabout.permute_qubits_inverse(&permutation).unwrap();

        assert!(direct.max_abs_diff(&roundabout) < EPS);
    }
}

#[test]
fn single_qubit_application_equals_swap_then_apply() {
    let mut rng = rng(110);
    for _ in 0..TRIALS {
        let d = rng.gen_range(3..8);
        let state = random_state(d, &mut rng).unwrap();
        let u = random_unitary(1, &mut rng).unwrap();
        let target = rng.gen_range(0..d);

        let direct = u.apply_to(&state, &[target]).unwrap();

        let mut swapped = state.clone();
        swapped.swap_qubits(0, target).unwrap();
        let mut roundabout = u.apply_to(&swapped, &[0]).unwrap();
        roundabout.swap_qubits(0, target).unwrap();

        assert!(direct.max_abs_diff(&roundabout) < EPS);
    }
}

#[test]
fn subset_application_equals_identity_padding() {
    let mut rng = rng(111);
    for _ in 0..TRIALS {
        let d = rng.gen_range(3..8);
        let m = rng.gen_range(2..d);
        let mut targets = random_targets(d, m, &mut rng);
        targets.sort_unstable();

        // One random single-qubit gate per targeted qubit, identity
        // elsewhere; tensored over the full register in qubit order.
        let singles: Vec<Operator> = (0..m)
            .map(|_| random_unitary(1, &mut rng).unwrap())
            .collect();
        let mut padded: Option<Operator> = None;
        let mut packed: Option<Operator> = None;
        let mut next = 0;
        for qubit in 0..d {
            let factor = if next < m && targets[next] == qubit {
                let factor = singles[next].clone();
                packed = Some(match packed {
                    Some(left) => left * factor.clone(),
                    None => factor.clone(),
                });
                next += 1;
                factor
            } else {
                op::identity(1)
            };
            padded = Some(match padded {
                Some(left) => left * factor,
                None => factor,
            });
        }

        let state = random_state(d, &mut rng).unwrap();
        let full = padded.unwrap().apply(&state).unwrap();
        let subset = packed.unwrap().apply_to(&state, &targets).unwrap();

        assert!(full.max_abs_diff(&subset) < EPS);
    }
}

#[test]
fn tensor_product_application_is_bilinear() {
    let mut rng = rng(112);
    for _ in 0..TRIALS {
        let d = rng.gen_range(1..4);
        let a = random_unitary(d, &mut rng).unwrap();
        let b = random_unitary(d, &mut rng).unwrap();
        let x = random_state(d, &mut rng).unwrap();
        let y = random_state(d, &mut rng).unwrap();

        let joint = (&a * &b).apply(&(&x * &y)).unwrap();
        let separate = a.apply(&x).unwrap() * b.apply(&y).unwrap();

        assert!(joint.max_abs_diff(&separate) < EPS);
    }
}

#[test]
fn operator_application_is_associative() {
    let mut rng = rng(113);
    for _ in 0..TRIALS {
        let d = rng.gen_range(2..5);
        let u1 = random_unitary(d, &mut rng).unwrap();
        let u2 = random_unitary(d, &mut rng).unwrap();
        let u3 = random_unitary(d, &mut rng).unwrap();
        let x = random_state(d, &mut rng).unwrap();

        let chained = u1
            .apply(&u2.apply(&u3.apply(&x).unwrap()).unwrap())
            .unwrap();
        let left_grouped = u1
            .compose(&u2)
            .unwrap()
            .apply(&u3.apply(&x).unwrap())
            .unwrap();
        let fully_grouped = u1
            .compose(&u2.compose(&u3).unwrap())
            .unwrap()
            .apply(&x)
            .unwrap();

        assert!(chained.max_abs_diff(&left_grouped) < EPS);
        assert!(chained.max_abs_diff(&fully_grouped) < EPS);
    }
}

#[test]
fn composing_with_identity_changes_nothing() {
    let mut rng = rng(114);
    for _ in 0..TRIALS {
        let d = rng.gen_range(2..6);
        let u = random_unitary(d, &mut rng).unwrap();
        let identity = op::identity(d);

        let wrapped = identity
            .compose(&u.compose(&identity).unwrap())
            .unwrap();
        assert!(wrapped.max_abs_diff(&u) < EPS);
    }
}

#[test]
fn gate_identities_hold() {
    for u in &[
        op::hadamard(1),
        op::pauli_x(1),
        op::pauli_y(1),
        op::pauli_z(1),
    ] {
        assert_identity(&u.compose(u).unwrap(), 1);
    }

    let sqrt_not_squared = op::sqrt_not(1).compose(&op::sqrt_not(1)).unwrap();
    assert!(sqrt_not_squared.max_abs_diff(&op::pauli_x(1)) < EPS);

    let sqrt_swap_squared = op::sqrt_swap().compose(&op::sqrt_swap()).unwrap();
    assert!(sqrt_swap_squared.max_abs_diff(&op::swap()) < EPS);

    let t_squared = op::pi_by_8(1).compose(&op::pi_by_8(1)).unwrap();
    assert!(t_squared.max_abs_diff(&op::phase(1)) < EPS);

    let s_squared = op::phase(1).compose(&op::phase(1)).unwrap();
    assert!(s_squared.max_abs_diff(&op::pauli_z(1)) < EPS);
}

#[test]
fn measuring_basis_states_is_deterministic() {
    let mut rng = rng(115);
    for _ in 0..TRIALS {
        let d = rng.gen_range(1..8);
        let bits: Vec<u8> = (0..d).map(|_| rng.gen_range(0..=1)).collect();

        let mut state = State::bitstring(&bits).unwrap();
        assert_eq!(state.measure(false, &mut rng), bits);

        let mut state = State::bitstring(&bits).unwrap();
        assert_eq!(state.measure(true, &mut rng), bits);
        assert_eq!(state.qubit_count(), 0);
    }
}

#[test]
fn repeated_measurement_repeats_the_outcome() {
    let mut rng = rng(116);
    for _ in 0..TRIALS {
        let d = rng.gen_range(1..8);
        let mut state = random_state(d, &mut rng).unwrap();
        let first = state.measure(false, &mut rng);
        let second = state.measure(false, &mut rng);
        assert_eq!(first, second);
    }
}

#[test]
fn single_qubit_measurement_agrees_with_full_measurement() {
    let mut rng = rng(117);
    for _ in 0..TRIALS {
        let d = rng.gen_range(1..8);
        let qubit = rng.gen_range(0..d);

        let mut state = random_state(d, &mut rng).unwrap();
        let full = state.measure(false, &mut rng);
        let partial = state.measure_qubits(&[qubit], false, &mut rng).unwrap();
        assert_eq!(full[qubit], partial[0]);

        let mut state = random_state(d, &mut rng).unwrap();
        let first = state.measure_qubits(&[qubit], false, &mut rng).unwrap();
        let second = state.measure_qubits(&[qubit], false, &mut rng).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn oracle_measurement_returns_f_of_input() {
    let mut rng = rng(118);
    for _ in 0..TRIALS {
        let d = rng.gen_range(1..8);
        let f = random_boolean_fn(d, &mut rng);
        let bits: Vec<u8> = (0..d).map(|_| rng.gen_range(0..=1)).collect();

        let state = State::bitstring(&bits).unwrap() * State::zeros(1).unwrap();
        let mut state = op::u_f(&f, d).unwrap().apply(&state).unwrap();

        let answer = state.measure_qubits(&[d], false, &mut rng).unwrap();
        assert_eq!(answer[0], f(&bits));
    }
}
