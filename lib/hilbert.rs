//! The blockade-restricted occupation basis.
//!
//! A basis state is a `u64` whose `k`-th bit records whether atom `k` is
//! excited. The blockade subspace holds exactly the occupation patterns
//! whose excited atoms form an independent set of the interaction graph;
//! it is enumerated from the graph's *maximal* independent sets, since every
//! independent set is a subset of a maximal one.

use indexmap::IndexSet;
use itertools::Itertools;
use rustc_hash::FxHashSet as HashSet;
use crate::error::{ BlockadeError, BlockadeResult };

/// Ordered collection of the allowed occupation bitstrings.
///
/// States are deduplicated and sorted ascending by integer value, and the
/// backing [`IndexSet`] provides constant-time value→index lookup. The
/// integer value of a state is *not* its index; all matrix positions come
/// from [`Self::index_of`]. Immutable after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockadeBasis {
    states: IndexSet<u64>,
    natoms: usize,
}

impl BlockadeBasis {
    /// Enumerate the subspace for `natoms` atoms from a collection of
    /// maximal independent sets of the interaction graph.
    ///
    /// Every subset of an independent set is an allowed excitation pattern,
    /// so each set contributes the bitstrings ranging freely over its
    /// members with all other bits clear; the union over all sets is the
    /// full subspace. The empty occupation is always a member, so an empty
    /// collection yields the single-state ground subspace.
    ///
    /// Fails if `natoms` exceeds the 64-bit occupation representation or if
    /// any set contains an out-of-bounds atom index.
    pub fn from_independent_sets<I, S>(natoms: usize, sets: I)
        -> BlockadeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[usize]>,
    {
        if natoms > 64 {
            return Err(BlockadeError::AtomCount(natoms));
        }
        let mut seen: HashSet<u64> = HashSet::default();
        seen.insert(0);
        for set in sets.into_iter() {
            let set = set.as_ref();
            if let Some(&k) = set.iter().find(|k| **k >= natoms) {
                return Err(BlockadeError::AtomIndex { index: k, natoms });
            }
            seen.extend(
                set.iter()
                    .powerset()
                    .map(|excited| {
                        excited.into_iter()
                            .fold(0_u64, |acc, k| acc | (1 << *k))
                    })
            );
        }
        let mut states: Vec<u64> = seen.into_iter().collect();
        states.sort_unstable();
        Ok(Self { states: states.into_iter().collect(), natoms })
    }

    /// Return the dimension `m` of the subspace.
    pub fn dim(&self) -> usize { self.states.len() }

    /// Return the number of atoms.
    pub fn natoms(&self) -> usize { self.natoms }

    /// Return the basis state at a given index.
    pub fn state(&self, index: usize) -> Option<u64> {
        self.states.get_index(index).copied()
    }

    /// Return the index of a basis state by its integer value.
    pub fn index_of(&self, state: u64) -> Option<usize> {
        self.states.get_index_of(&state)
    }

    /// Return `true` if a bitstring is an allowed occupation pattern.
    pub fn contains(&self, state: u64) -> bool {
        self.states.contains(&state)
    }

    /// Return an iterator over all basis states in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.states.iter().copied()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn single_atom() {
        let basis
            = BlockadeBasis::from_independent_sets(1, [vec![0]]).unwrap();
        assert_eq!(basis.dim(), 2);
        assert_eq!(basis.iter().collect::<Vec<u64>>(), vec![0, 1]);
        assert_eq!(basis.index_of(1), Some(1));
    }

    #[test]
    fn zero_atoms() {
        let basis
            = BlockadeBasis::from_independent_sets(0, Vec::<Vec<usize>>::new())
            .unwrap();
        assert_eq!(basis.dim(), 1);
        assert_eq!(basis.state(0), Some(0));
    }

    #[test]
    fn empty_set_collection() {
        let basis
            = BlockadeBasis::from_independent_sets(3, [Vec::new()]).unwrap();
        assert_eq!(basis.dim(), 1);
        assert_eq!(basis.state(0), Some(0));
    }

    #[test]
    fn blockaded_pair_excludes_double_excitation() {
        // two mutually blockaded atoms: {0} and {1} are the maximal sets
        let basis
            = BlockadeBasis::from_independent_sets(2, [vec![0], vec![1]])
            .unwrap();
        assert_eq!(basis.dim(), 3);
        assert!(!basis.contains(0b11));
    }

    #[test]
    fn ascending_and_deduplicated() {
        // P3 chain: maximal sets {0, 2} and {1}; state 0 appears in both
        // branches and must be deduplicated
        let basis
            = BlockadeBasis::from_independent_sets(3, [vec![0, 2], vec![1]])
            .unwrap();
        let states: Vec<u64> = basis.iter().collect();
        assert_eq!(states, vec![0b000, 0b001, 0b010, 0b100, 0b101]);
        assert!(states.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn no_adjacent_excitations() {
        // ring of 4: adjacency (0,1), (1,2), (2,3), (3,0)
        let adjacent = [(0, 1), (1, 2), (2, 3), (3, 0)];
        let basis
            = BlockadeBasis::from_independent_sets(4, [vec![0, 2], vec![1, 3]])
            .unwrap();
        for s in basis.iter() {
            for (a, b) in adjacent {
                assert!(s & (1 << a) == 0 || s & (1 << b) == 0);
            }
        }
    }

    #[test]
    fn too_many_atoms() {
        let res = BlockadeBasis::from_independent_sets(65, [vec![0]]);
        assert_eq!(res, Err(BlockadeError::AtomCount(65)));
    }
}
