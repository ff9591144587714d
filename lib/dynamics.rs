//! Drive parameters, Hamiltonian assembly over the blockade subspace, and
//! the top-level Hamiltonian descriptor.
//!
//! The assembled operator is the driven Rydberg Hamiltonian restricted to
//! the blockade subspace: per-atom detunings on the diagonal and single-bit
//! flip couplings `Ω_k e^{±iϕ_k}` off the diagonal. Transitions whose target
//! occupation pattern violates blockade are simply absent from the matrix;
//! that is the blockade constraint acting at the operator level, not an
//! error condition.

use num_complex::Complex64 as C64;
use crate::{
    error::{ BlockadeError, BlockadeResult },
    geometry::{ Geometry, independent_sets, interaction_graph },
    hilbert::BlockadeBasis,
    sparse::{ CooBuilder, SpHermitian },
};

/// A per-atom drive parameter: either one value shared by every atom or an
/// explicit per-atom array.
#[derive(Clone, Debug, PartialEq)]
pub enum SiteParam {
    /// A single value applied uniformly.
    Uniform(f64),
    /// One value per atom; the length must equal the atom count.
    PerSite(Vec<f64>),
}

impl From<f64> for SiteParam {
    fn from(value: f64) -> Self { Self::Uniform(value) }
}

impl From<Vec<f64>> for SiteParam {
    fn from(values: Vec<f64>) -> Self { Self::PerSite(values) }
}

impl SiteParam {
    /// Check against an atom count, failing fast on a length mismatch.
    pub fn validate(&self, natoms: usize) -> BlockadeResult<()> {
        match self {
            Self::Uniform(_) => Ok(()),
            Self::PerSite(values) if values.len() == natoms => Ok(()),
            Self::PerSite(values) => Err(
                BlockadeError::ParamLength {
                    expected: natoms,
                    got: values.len(),
                }
            ),
        }
    }

    /// Return the value for atom `k`.
    ///
    /// *Panics* if `k` is out of bounds for a per-site array; call
    /// [`Self::validate`] first.
    pub fn value_at(&self, k: usize) -> f64 {
        match self {
            Self::Uniform(value) => *value,
            Self::PerSite(values) => values[k],
        }
    }

    /// Return the largest value over all atoms.
    pub fn max_value(&self) -> f64 {
        match self {
            Self::Uniform(value) => *value,
            Self::PerSite(values)
                => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

/// Hamiltonian builder over a borrowed blockade basis.
///
/// Populates only the upper triangle, with row states below column states
/// in the basis ordering; each stored off-diagonal entry is the excitation
/// amplitude `Ω_k e^{iϕ_k}`, and the Hermitian view of [`SpHermitian`]
/// supplies the conjugated de-excitation amplitudes.
#[derive(Clone, Debug)]
pub struct HBuilderBlockade<'a> {
    basis: &'a BlockadeBasis,
    omega: SiteParam,
    phase: SiteParam,
    delta: Option<SiteParam>,
}

impl<'a> HBuilderBlockade<'a> {
    /// Create a new `HBuilderBlockade`.
    ///
    /// All parameters are checked against the basis' atom count up front;
    /// omitting `delta` gives the coupling-only operator with a zero
    /// diagonal.
    pub fn new<W, P>(
        basis: &'a BlockadeBasis,
        omega: W,
        phase: P,
        delta: Option<SiteParam>,
    ) -> BlockadeResult<Self>
    where
        W: Into<SiteParam>,
        P: Into<SiteParam>,
    {
        if basis.dim() == 0 {
            return Err(BlockadeError::EmptyBasis);
        }
        let omega = omega.into();
        let phase = phase.into();
        let natoms = basis.natoms();
        omega.validate(natoms)?;
        phase.validate(natoms)?;
        if let Some(d) = &delta {
            d.validate(natoms)?;
        }
        Ok(Self { basis, omega, phase, delta })
    }

    /// Return a reference to the basis.
    pub fn basis(&self) -> &BlockadeBasis { self.basis }

    /// Assemble the sparse Hermitian operator.
    ///
    /// Fails if any entry would be non-finite.
    pub fn gen(&self) -> BlockadeResult<SpHermitian> {
        let m = self.basis.dim();
        let natoms = self.basis.natoms();
        let mut coo = CooBuilder::with_capacity(m, m * (natoms + 1) / 2)?;
        for (i, s) in self.basis.iter().enumerate() {
            if let Some(delta) = &self.delta {
                let diag: f64
                    = (0..natoms)
                    .map(|k| {
                        if s & (1 << k) == 0 {
                            delta.value_at(k)
                        } else {
                            -delta.value_at(k)
                        }
                    })
                    .sum();
                coo.push(i, i, C64::from(diag))?;
            }
            for k in 0..natoms {
                let flipped = s ^ (1 << k);
                // bit k of s clear means flipped > s, hence an upper-triangle
                // column in the ascending basis order
                if flipped < s { continue; }
                if let Some(j) = self.basis.index_of(flipped) {
                    let offd = C64::from_polar(
                        self.omega.value_at(k),
                        self.phase.value_at(k),
                    );
                    coo.push(i, j, offd)?;
                }
            }
        }
        Ok(coo.into_csr())
    }
}

/// Immutable description of a driven Rydberg array: interaction coefficient,
/// drive parameters, and atom geometry.
///
/// This is the unit of state shared between operator assembly and the
/// evolution engine; the operator is rebuilt from it on every call, so
/// parameter changes mean constructing a new descriptor.
#[derive(Clone, Debug, PartialEq)]
pub struct HRydberg {
    c6: f64,
    omega: SiteParam,
    phase: SiteParam,
    delta: Option<SiteParam>,
    geometry: Geometry,
}

impl HRydberg {
    /// Create a new `HRydberg`, checking every per-site parameter against
    /// the atom count.
    pub fn new<W, P>(
        c6: f64,
        omega: W,
        phase: P,
        delta: Option<SiteParam>,
        geometry: Geometry,
    ) -> BlockadeResult<Self>
    where
        W: Into<SiteParam>,
        P: Into<SiteParam>,
    {
        let omega = omega.into();
        let phase = phase.into();
        let natoms = geometry.len();
        omega.validate(natoms)?;
        phase.validate(natoms)?;
        if let Some(d) = &delta {
            d.validate(natoms)?;
        }
        Ok(Self { c6, omega, phase, delta, geometry })
    }

    /// Return the number of atoms.
    pub fn n_atoms(&self) -> usize { self.geometry.len() }

    /// Return a reference to the geometry.
    pub fn geometry(&self) -> &Geometry { &self.geometry }

    /// Return the blockade radius `(|C6| / Ω_max)^(1/6)`.
    ///
    /// A non-positive maximum Rabi frequency gives an infinite radius, i.e.
    /// a fully blockaded array.
    pub fn blockade_radius(&self) -> f64 {
        let wmax = self.omega.max_value();
        if wmax <= 0.0 {
            f64::INFINITY
        } else {
            (self.c6.abs() / wmax).powf(1.0 / 6.0)
        }
    }

    /// Enumerate the blockade subspace for this geometry.
    ///
    /// The interaction graph connects every pair of atoms within the
    /// blockade radius; its maximal independent sets are extracted as
    /// maximal cliques of the complement graph.
    pub fn subspace(&self) -> BlockadeResult<BlockadeBasis> {
        let graph
            = interaction_graph(&self.geometry, self.blockade_radius());
        BlockadeBasis::from_independent_sets(
            self.geometry.len(), independent_sets(&graph))
    }

    /// Enumerate the subspace and assemble the restricted Hamiltonian.
    pub fn build_operator(&self) -> BlockadeResult<SpHermitian> {
        let basis = self.subspace()?;
        HBuilderBlockade::new(
            &basis,
            self.omega.clone(),
            self.phase.clone(),
            self.delta.clone(),
        )?
        .gen()
    }
}
