#![allow(dead_code, non_snake_case, non_upper_case_globals)]

//! Time evolution of Rydberg-atom arrays restricted to the blockade
//! subspace: basis enumeration from maximal independent sets of the
//! interaction graph, sparse Hermitian operator assembly, and Krylov
//! propagation of state vectors.

pub mod error;
pub mod geometry;
pub mod hilbert;
pub mod sparse;
pub mod dynamics;
pub mod evolve;
