#![warn(clippy::cargo)]
#![doc = include_str!("../README.md")]

mod math;
mod tensor;

pub mod algorithm;
pub mod error;
pub mod operator;
pub mod random;
pub mod state;

pub use crate::math::EPS;

#[doc(hidden)]
pub mod prelude {
    pub use crate::{
        algorithm,
        error::{Error, Result},
        operator as op,
        operator::Operator,
        random::{random_boolean_fn, random_state, random_unitary},
        state::State,
    };
}
