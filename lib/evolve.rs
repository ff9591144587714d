//! Krylov-subspace propagation of state vectors.
//!
//! The action of `exp(−i·t·H)` on a state is approximated in a small Krylov
//! subspace built by the Lanczos recurrence; `H` enters only through
//! matrix-vector products, so the full-size exponential is never formed and
//! the operator is never densified. Since `H` is Hermitian, the projected
//! matrix is real symmetric tridiagonal and is exponentiated by dense
//! diagonalization at the (small) subspace dimension.

use ndarray as nd;
use ndarray_linalg::{ Eigh, UPLO };
use num_complex::Complex64 as C64;
use num_traits::Zero;
use crate::{
    dynamics::HRydberg,
    error::BlockadeResult,
    sparse::SpHermitian,
};

/// Configuration for the Lanczos exponential action.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KrylovParams {
    /// Maximum Krylov subspace dimension.
    pub dim: usize,
    /// Breakdown threshold: the recurrence stops early once the residual
    /// norm of a new Lanczos vector falls below this value, meaning the
    /// Krylov subspace is (numerically) invariant and the projection exact.
    pub tol: f64,
}

impl Default for KrylovParams {
    fn default() -> Self { Self { dim: 30, tol: 1e-12 } }
}

fn state_norm(psi: &nd::Array1<C64>) -> f64 {
    psi.iter().map(|a| (a * a.conj()).re).sum::<f64>().sqrt()
}

/// Overwrite `psi` with `exp(−i·t·H)·psi`, approximated in a Krylov
/// subspace.
///
/// A zero input state is left untouched.
///
/// *Panics* if `psi` and `H` have mismatched dimensions.
pub fn expmv(
    h: &SpHermitian,
    psi: &mut nd::Array1<C64>,
    t: f64,
    params: &KrylovParams,
) {
    if psi.len() != h.dim() {
        panic!("expmv: state vector and operator dimensions disagree");
    }
    let norm0 = state_norm(psi);
    if norm0 <= 0.0 { return; }

    // Lanczos recurrence: orthonormal basis `vs` and real tridiagonal
    // projection (alphas, betas)
    let kdim = params.dim.max(1).min(h.dim());
    let mut vs: Vec<nd::Array1<C64>> = Vec::with_capacity(kdim);
    let mut alphas: Vec<f64> = Vec::with_capacity(kdim);
    let mut betas: Vec<f64> = Vec::with_capacity(kdim);
    vs.push(psi.mapv(|a| a / norm0));
    for j in 0..kdim {
        let mut w = h.apply(&vs[j]);
        let alpha: f64
            = vs[j].iter().zip(w.iter())
            .map(|(v, u)| (v.conj() * u).re)
            .sum();
        alphas.push(alpha);
        w.zip_mut_with(&vs[j], |u, v| *u -= *v * alpha);
        if j > 0 {
            let beta_prev = betas[j - 1];
            w.zip_mut_with(&vs[j - 1], |u, v| *u -= *v * beta_prev);
        }
        let beta = state_norm(&w);
        if beta <= params.tol || j + 1 == kdim { break; }
        betas.push(beta);
        vs.push(w.mapv(|u| u / beta));
    }

    // exponential of the projection: T = V diag(lambda) V^T, so
    // exp(-i t T) e1 = V diag(exp(-i t lambda)) V^T e1
    let m = alphas.len();
    let mut tri: nd::Array2<f64> = nd::Array2::zeros((m, m));
    for (j, a) in alphas.into_iter().enumerate() {
        tri[[j, j]] = a;
    }
    for (j, b) in betas.into_iter().enumerate() {
        tri[[j, j + 1]] = b;
        tri[[j + 1, j]] = b;
    }
    let (evals, evecs): (nd::Array1<f64>, nd::Array2<f64>)
        = tri.eigh(UPLO::Lower)
        .expect("expmv: diagonalization error");
    let weights: nd::Array1<C64>
        = (0..m)
        .map(|j| {
            (0..m)
                .map(|l| {
                    evecs[[j, l]] * evecs[[0, l]]
                        * (-C64::i() * evals[l] * t).exp()
                })
                .sum()
        })
        .collect();

    // project back into the full space
    psi.fill(C64::zero());
    for (wj, vj) in weights.iter().zip(&vs) {
        psi.zip_mut_with(vj, |p, v| *p += *wj * v * norm0);
    }
}

/// Advance `psi` in place through `exp(−i·t·H)`, rebuilding the operator
/// from the descriptor to reflect its current parameters.
///
/// `t` alone determines the propagated duration; `dt` is reserved for
/// future adaptive sub-stepping and is currently unused.
pub fn advance(
    psi: &mut nd::Array1<C64>,
    hamiltonian: &HRydberg,
    t: f64,
    dt: f64,
) -> BlockadeResult<()>
{
    advance_with(psi, hamiltonian, t, dt, &KrylovParams::default())
}

/// Like [`advance`], with explicit Krylov configuration.
pub fn advance_with(
    psi: &mut nd::Array1<C64>,
    hamiltonian: &HRydberg,
    t: f64,
    _dt: f64,
    params: &KrylovParams,
) -> BlockadeResult<()>
{
    let h = hamiltonian.build_operator()?;
    expmv(&h, psi, t, params);
    Ok(())
}
