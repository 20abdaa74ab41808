pub use std::f64::consts::*;

pub use self::{consts::*, types::*};

pub mod approx_cmp;

mod consts {
    use super::types::*;

    pub const C_ZERO: C = C { re: 0., im: 0. };
    pub const C_ONE: C = C { re: 1., im: 0. };
    pub const C_IMAG: C = C { re: 0., im: 1. };

    /// Tolerance for every identity the algebra claims to preserve.
    /// Drift below `EPS` is numerical noise; drift above it is a bug.
    pub const EPS: R = 1e-10;
}

mod types {
    pub type N = usize;

    pub type R = f64;
    pub type C = num_complex::Complex<R>;
}
