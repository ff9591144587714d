//! Atom arrangements and the interaction graphs derived from them.
//!
//! Two atoms are *blockaded* when their separation is at most the blockade
//! radius; the interaction graph has one node per atom and an edge for every
//! blockaded pair. Maximal independent sets of that graph (the largest
//! groups of atoms that may be simultaneously excited) are obtained as
//! maximal cliques of the complement graph.

use petgraph::{
    algo::maximal_cliques::maximal_cliques,
    graph::{ NodeIndex, UnGraph },
};

/// Spatial arrangement of the atoms.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// Arrangement in a 1D chain with fixed spacing.
    Chain {
        natoms: usize,
        spacing: f64,
    },
    /// Free arrangement with explicit 3D coordinates.
    Free(Vec<[f64; 3]>),
}

impl Geometry {
    /// Return the number of atoms.
    pub fn len(&self) -> usize {
        match self {
            Self::Chain { natoms, .. } => *natoms,
            Self::Free(positions) => positions.len(),
        }
    }

    /// Return `true` if there are no atoms.
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Return the Euclidean distance between atoms `i` and `j`.
    ///
    /// *Panics* if either index is out of bounds.
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        match self {
            Self::Chain { natoms, spacing } => {
                if i >= *natoms || j >= *natoms {
                    panic!("Geometry::distance: atom index out of bounds");
                }
                spacing * i.abs_diff(j) as f64
            },
            Self::Free(positions) => {
                let ri = positions[i];
                let rj = positions[j];
                ri.iter().zip(rj)
                    .map(|(xi, xj)| (xi - xj).powi(2))
                    .sum::<f64>()
                    .sqrt()
            },
        }
    }
}

impl From<Vec<[f64; 3]>> for Geometry {
    fn from(positions: Vec<[f64; 3]>) -> Self { Self::Free(positions) }
}

/// Construct the interaction graph for a geometry: one node per atom, with
/// an edge between every pair of atoms separated by at most `radius`.
pub fn interaction_graph(geometry: &Geometry, radius: f64) -> UnGraph<(), ()> {
    let n = geometry.len();
    let mut graph: UnGraph<(), ()> = UnGraph::with_capacity(n, n);
    let nodes: Vec<NodeIndex> = (0..n).map(|_| graph.add_node(())).collect();
    for i in 0..n {
        for j in i + 1..n {
            if geometry.distance(i, j) <= radius {
                graph.add_edge(nodes[i], nodes[j], ());
            }
        }
    }
    graph
}

/// Construct the complement of a graph: same nodes, with edges exactly where
/// the input has none.
pub fn complement(graph: &UnGraph<(), ()>) -> UnGraph<(), ()> {
    let n = graph.node_count();
    let mut comp: UnGraph<(), ()> = UnGraph::with_capacity(n, n);
    let nodes: Vec<NodeIndex> = (0..n).map(|_| comp.add_node(())).collect();
    for i in 0..n {
        for j in i + 1..n {
            let e = graph.find_edge(NodeIndex::new(i), NodeIndex::new(j));
            if e.is_none() {
                comp.add_edge(nodes[i], nodes[j], ());
            }
        }
    }
    comp
}

/// Compute all maximal independent sets of a graph as maximal cliques of its
/// complement.
///
/// Each set is sorted ascending, and the collection is sorted for
/// deterministic output.
pub fn independent_sets(graph: &UnGraph<(), ()>) -> Vec<Vec<usize>> {
    let mut sets: Vec<Vec<usize>>
        = maximal_cliques(&complement(graph))
        .into_iter()
        .map(|clique| {
            let mut set: Vec<usize>
                = clique.into_iter().map(NodeIndex::index).collect();
            set.sort_unstable();
            set
        })
        .collect();
    sets.sort_unstable();
    sets
}
