//! This module contains the decode pipeline driver: the loop that walks an
//! encoding stack in reverse and threads the intermediate value through the
//! transform kernels.

pub mod executor;

pub use executor::{decode, decode_stack};
