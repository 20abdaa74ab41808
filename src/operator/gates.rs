use ndarray::{arr2, Array2};

use super::Operator;
use crate::{
    error::{Error, Result},
    math::{C, C_IMAG, C_ONE, C_ZERO, FRAC_1_SQRT_2, FRAC_PI_4, N, R},
};

fn single(matrix: [[C; 2]; 2], d: N) -> Operator {
    let gate = Operator::from_matrix(&arr2(&matrix)).expect("2x2 gate matrix");
    debug_assert!(gate.is_unitary());
    gate.tensor_pow(d)
}

fn fixed(matrix: Array2<C>) -> Operator {
    let gate = Operator::from_matrix(&matrix).expect("catalog gate matrix");
    debug_assert!(gate.is_unitary());
    gate
}

/// Identity gate on `d` qubits.
///
/// ```I |q> = |q>```
#[inline]
pub fn identity(d: N) -> Operator {
    assert!(d >= 1, "gate needs at least one qubit");
    fixed(Array2::eye(1 << d))
}

/// Pauli X gate, aka NOT gate, on each of `d` qubits.
///
/// ```X |0> = |1>```&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;```X |1> = |0>```
///
/// Matrix form for a single qubit:
///
/// <table cellpadding="10pt">
///     <tr><th>&nbsp;&nbsp;0&nbsp;&nbsp;</th><th>&nbsp;&nbsp;1&nbsp;&nbsp;</th></tr>
///     <tr><th>&nbsp;&nbsp;1&nbsp;&nbsp;</th><th>&nbsp;&nbsp;0&nbsp;&nbsp;</th></tr>
/// </table>
#[inline]
pub fn pauli_x(d: N) -> Operator {
    single([[C_ZERO, C_ONE], [C_ONE, C_ZERO]], d)
}

/// Pauli Y gate on each of `d` qubits.
///
/// ```Y |0> = i|1>```&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;```Y |1> = -i|0>```
#[inline]
pub fn pauli_y(d: N) -> Operator {
    single([[C_ZERO, -C_IMAG], [C_IMAG, C_ZERO]], d)
}

/// Pauli Z gate on each of `d` qubits: negates the amplitude of |1>.
///
/// ```Z |0> = |0>```&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;```Z |1> = -|1>```
#[inline]
pub fn pauli_z(d: N) -> Operator {
    single([[C_ONE, C_ZERO], [C_ZERO, -C_ONE]], d)
}

/// Hadamard gate on each of `d` qubits.
///
/// The simplest operation that creates a superposition from a classical
/// state:
///
/// ```H |0> = |+> = ( |0> + |1> ) / sqrt(2)```&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;
/// ```H |1> = |-> = ( |0> - |1> ) / sqrt(2)```
///
/// Matrix form for a single qubit:
///
/// <table cellpadding="10pt">
///     <tr><th>1/&radic;2</th><th>1/&radic;2</th></tr>
///     <tr><th>1/&radic;2</th><th>-1/&radic;2</th></tr>
/// </table>
#[inline]
pub fn hadamard(d: N) -> Operator {
    const H: C = C {
        re: FRAC_1_SQRT_2,
        im: 0.,
    };
    single([[H, H], [H, -H]], d)
}

/// Phase gate on each of `d` qubits: square root of [`pauli_z`].
///
/// ```S |0> = |0>```&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;
/// ```S |1> = i|1>```&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;
/// ```S S |q> = Z |q>```
#[inline]
pub fn phase(d: N) -> Operator {
    single([[C_ONE, C_ZERO], [C_ZERO, C_IMAG]], d)
}

/// The pi/8 gate on each of `d` qubits: fourth root of [`pauli_z`] and
/// square root of [`phase`].
///
/// ```T T |q> = S |q>```&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;
/// ```T T T T |q> = Z |q>```
#[inline]
pub fn pi_by_8(d: N) -> Operator {
    single([[C_ONE, C_ZERO], [C_ZERO, C::from_polar(1., FRAC_PI_4)]], d)
}

/// Square root of NOT on each of `d` qubits.
///
/// ```sqrt(NOT) sqrt(NOT) |q> = X |q>```
#[inline]
pub fn sqrt_not(d: N) -> Operator {
    let p = C { re: 0.5, im: 0.5 };
    single([[p, p.conj()], [p.conj(), p]], d)
}

/// X rotation gate: `theta` radians around the X axis of the Bloch
/// sphere.
#[inline]
pub fn rotation_x(theta: R) -> Operator {
    let (sin, cos) = (theta / 2.).sin_cos();
    let off = C { re: 0., im: -sin };
    single([[cos.into(), off], [off, cos.into()]], 1)
}

/// Y rotation gate: `theta` radians around the Y axis of the Bloch
/// sphere.
#[inline]
pub fn rotation_y(theta: R) -> Operator {
    let (sin, cos) = (theta / 2.).sin_cos();
    single([[cos.into(), (-sin).into()], [sin.into(), cos.into()]], 1)
}

/// Z rotation gate: `theta` radians around the Z axis of the Bloch
/// sphere.
///
/// ```RZ(pi) = Z```&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;
/// ```RZ(pi/2) = S```&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;
/// ```RZ(pi/4) = T```&nbsp;(up to global phase)
#[inline]
pub fn rotation_z(theta: R) -> Operator {
    single(
        [
            [C::from_polar(1., -theta / 2.), C_ZERO],
            [C_ZERO, C::from_polar(1., theta / 2.)],
        ],
        1,
    )
}

/// Controlled NOT: control on qubit 0, target on qubit 1.
///
/// ```CNOT |c t> = |c, t xor c>```
#[inline]
pub fn cnot() -> Operator {
    controlled(&pauli_x(1))
}

/// Toffoli gate: controls on qubits 0 and 1, target on qubit 2.
#[inline]
pub fn toffoli() -> Operator {
    controlled(&cnot())
}

/// SWAP gate: exchanges the states of 2 qubits.
///
/// ```SWAP |01> = |10>```&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;
/// ```SWAP |10> = |01>```
#[inline]
pub fn swap() -> Operator {
    let mut matrix = Array2::from_elem((4, 4), C_ZERO);
    matrix[(0b00, 0b00)] = C_ONE;
    matrix[(0b10, 0b01)] = C_ONE;
    matrix[(0b01, 0b10)] = C_ONE;
    matrix[(0b11, 0b11)] = C_ONE;
    fixed(matrix)
}

/// Square root of [`swap`]: a *half* exchange of 2 qubits' states, the
/// natural coupling primitive of some physical qubit systems.
///
/// ```sqrt(SWAP) sqrt(SWAP) |q> = SWAP |q>```
#[inline]
pub fn sqrt_swap() -> Operator {
    let p = C { re: 0.5, im: 0.5 };
    let mut matrix = Array2::from_elem((4, 4), C_ZERO);
    matrix[(0b00, 0b00)] = C_ONE;
    matrix[(0b01, 0b01)] = p;
    matrix[(0b10, 0b01)] = p.conj();
    matrix[(0b01, 0b10)] = p.conj();
    matrix[(0b10, 0b10)] = p;
    matrix[(0b11, 0b11)] = C_ONE;
    fixed(matrix)
}

/// Oracle operator for a boolean function `f` of `d` bits: the
/// (d+1)-qubit permutation
///
/// ```U_f |x>|y> = |x>|y xor f(x)>```
///
/// where qubits 0..d hold the little-endian input `x` and the last qubit
/// is the answer qubit. `f` receives the input as a slice of `d` bits,
/// slice position `i` being qubit `i`, and must return 0 or 1.
pub fn u_f<F>(f: F, d: N) -> Result<Operator>
where
    F: Fn(&[u8]) -> u8,
{
    if d == 0 {
        return Err(Error::NoQubits);
    }

    let side = 1usize << (d + 1);
    let answer_mask = 1usize << d;
    let mut matrix = Array2::from_elem((side, side), C_ZERO);
    for col in 0..side {
        let bits: Vec<u8> = (0..d).map(|q| ((col >> q) & 1) as u8).collect();
        let value = f(&bits);
        if value > 1 {
            return Err(Error::NonBinaryBit(value));
        }
        let row = col ^ (answer_mask * value as usize);
        matrix[(row, col)] = C_ONE;
    }

    Ok(fixed(matrix))
}

/// Lift an `m`-qubit operator to `m + 1` qubits with a control in
/// position 0: the identity while the control is |0>, `u` on the last
/// `m` qubits while it is |1>.
pub fn controlled(u: &Operator) -> Operator {
    let inner = u.matrix();
    let side = 2 * inner.nrows();

    let matrix = Array2::from_shape_fn((side, side), |(row, col)| {
        let (control_out, target_out) = (row & 1, row >> 1);
        let (control_in, target_in) = (col & 1, col >> 1);
        if control_out != control_in {
            C_ZERO
        } else if control_in == 0 {
            if target_out == target_in {
                C_ONE
            } else {
                C_ZERO
            }
        } else {
            inner[(target_out, target_in)]
        }
    });
    fixed(matrix)
}
