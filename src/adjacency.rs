//! Adjacency matrices of pRNN architectures.
//!
//! `W[src][tgt] = 1` means a directed connection from node `src` to node
//! `tgt`. The backbone cells `W[input][hidden]` and `W[hidden][output]` are
//! always 1; each configuration bit controls exactly one other cell:
//!
//! | bit | flag | cell |
//! |-----|------|------|
//! | 0 | ii | `W[input][input]` |
//! | 1 | hh | `W[hidden][hidden]` |
//! | 2 | oo | `W[output][output]` |
//! | 3 | io | `W[input][output]` |
//! | 4 | oi | `W[output][input]` |
//! | 5 | hi | `W[hidden][input]` |
//! | 6 | oh | `W[output][hidden]` |
//!
//! # Examples
//!
//! ```
//! use prnn::{build_adjacency, create_adjacency_matrix, ArchitectureFlags, Node};
//!
//! let w = build_adjacency(&ArchitectureFlags::STANDARD_RNN);
//! assert_eq!(w.rows(), [[0, 1, 0], [0, 1, 1], [0, 0, 0]]);
//! assert!(w.is_connected(Node::Hidden, Node::Hidden));
//!
//! // Untyped input is validated at the boundary
//! assert!(create_adjacency_matrix(&[0, 1, 0, 0, 0, 0]).is_err());
//! ```

use crate::connection::{Connection, Edge, BACKBONE, NUM_CONNECTIONS};
use crate::flags::ArchitectureFlags;
use crate::node::{Node, NUM_NODES};
use crate::{PrnnError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Dense 3×3 binary connectivity matrix, rows are sources, columns targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdjacencyMatrix {
    cells: [[u8; NUM_NODES]; NUM_NODES],
}

/// Build the adjacency matrix of an architecture.
///
/// Every call returns a new value; nothing is cached or shared.
pub fn build_adjacency(flags: &ArchitectureFlags) -> AdjacencyMatrix {
    let mut cells = [[0u8; NUM_NODES]; NUM_NODES];

    for edge in BACKBONE {
        cells[edge.source.index()][edge.target.index()] = 1;
    }

    for connection in Connection::ALL {
        if flags.is_set(connection) {
            cells[connection.source().index()][connection.target().index()] = 1;
        }
    }

    AdjacencyMatrix { cells }
}

/// Validate a raw configuration vector and build its adjacency matrix.
///
/// Fails with [`PrnnError::InvalidConfiguration`] when `config` does not
/// have exactly seven entries or holds a value other than 0 or 1.
pub fn create_adjacency_matrix<T>(config: &[T]) -> Result<AdjacencyMatrix>
where
    T: Copy + TryInto<i64> + fmt::Display,
{
    let flags = ArchitectureFlags::from_slice(config)?;
    Ok(build_adjacency(&flags))
}

impl AdjacencyMatrix {
    /// Matrix of the pure feedforward architecture (backbone only).
    pub fn feedforward() -> Self {
        build_adjacency(&ArchitectureFlags::FEEDFORWARD)
    }

    /// Reconstruct a matrix from raw rows.
    ///
    /// The rows are only checked for shape; use [`AdjacencyMatrix::to_flags`]
    /// to check that they describe a valid architecture.
    pub fn from_rows(rows: [[u8; NUM_NODES]; NUM_NODES]) -> Self {
        Self { cells: rows }
    }

    /// Reconstruct a matrix from a nested vector, e.g. deserialized data.
    pub fn from_vec(rows: &[Vec<u8>]) -> Result<Self> {
        if rows.len() != NUM_NODES || rows.iter().any(|r| r.len() != NUM_NODES) {
            return Err(PrnnError::InvalidConfiguration(format!(
                "adjacency matrix must be {0}x{0}, got row lengths {1:?}",
                NUM_NODES,
                rows.iter().map(Vec::len).collect::<Vec<_>>()
            )));
        }
        let mut cells = [[0u8; NUM_NODES]; NUM_NODES];
        for (dst, src) in cells.iter_mut().zip(rows) {
            dst.copy_from_slice(src);
        }
        Ok(Self { cells })
    }

    #[inline]
    pub fn get(&self, source: Node, target: Node) -> u8 {
        self.cells[source.index()][target.index()]
    }

    #[inline]
    pub fn is_connected(&self, source: Node, target: Node) -> bool {
        self.get(source, target) != 0
    }

    pub fn rows(&self) -> [[u8; NUM_NODES]; NUM_NODES] {
        self.cells
    }

    pub fn to_vec(&self) -> Vec<Vec<u8>> {
        self.cells.iter().map(|row| row.to_vec()).collect()
    }

    /// Present edges in row-major order.
    pub fn edges(&self) -> Vec<Edge> {
        Node::ALL
            .into_iter()
            .flat_map(|src| Node::ALL.into_iter().map(move |tgt| Edge::new(src, tgt)))
            .filter(|e| self.is_connected(e.source, e.target))
            .collect()
    }

    /// Number of present edges, backbone included.
    pub fn synapse_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&c| c != 0).count()
    }

    /// True when any edge besides the backbone is present.
    pub fn is_recurrent(&self) -> bool {
        self.synapse_count() > BACKBONE.len()
    }

    /// Recover the configuration that produced this matrix.
    ///
    /// Fails if a cell is not binary or a backbone edge is missing.
    pub fn to_flags(&self) -> Result<ArchitectureFlags> {
        for (src, row) in self.cells.iter().enumerate() {
            for (tgt, &cell) in row.iter().enumerate() {
                if cell > 1 {
                    return Err(PrnnError::InvalidConfiguration(format!(
                        "cell ({}, {}) holds {}, expected 0 or 1",
                        src, tgt, cell
                    )));
                }
            }
        }

        for edge in BACKBONE {
            if !self.is_connected(edge.source, edge.target) {
                return Err(PrnnError::InvalidConfiguration(format!(
                    "backbone edge {} is missing",
                    edge
                )));
            }
        }

        let mut bits = [false; NUM_CONNECTIONS];
        for connection in Connection::ALL {
            bits[connection.bit()] = self.is_connected(connection.source(), connection.target());
        }
        Ok(ArchitectureFlags::from_array(bits))
    }
}

impl Default for AdjacencyMatrix {
    fn default() -> Self {
        Self::feedforward()
    }
}

impl From<&ArchitectureFlags> for AdjacencyMatrix {
    fn from(flags: &ArchitectureFlags) -> Self {
        build_adjacency(flags)
    }
}

impl From<ArchitectureFlags> for AdjacencyMatrix {
    fn from(flags: ArchitectureFlags) -> Self {
        build_adjacency(&flags)
    }
}

impl Index<(Node, Node)> for AdjacencyMatrix {
    type Output = u8;

    fn index(&self, (source, target): (Node, Node)) -> &u8 {
        &self.cells[source.index()][target.index()]
    }
}

impl fmt::Display for AdjacencyMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{} {} {}", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedforward() {
        let w = AdjacencyMatrix::feedforward();
        assert_eq!(w.rows(), [[0, 1, 0], [0, 0, 1], [0, 0, 0]]);
        assert_eq!(w.synapse_count(), 2);
        assert!(!w.is_recurrent());
    }

    #[test]
    fn test_fully_recurrent() {
        let w = build_adjacency(&ArchitectureFlags::FULLY_RECURRENT);
        assert_eq!(w.rows(), [[1; 3]; 3]);
        assert_eq!(w.synapse_count(), 9);
    }

    #[test]
    fn test_index_by_nodes() {
        let w = build_adjacency(&ArchitectureFlags::STANDARD_RNN);
        assert_eq!(w[(Node::Hidden, Node::Hidden)], 1);
        assert_eq!(w[(Node::Output, Node::Input)], 0);
    }

    #[test]
    fn test_edges_row_major() {
        let flags = ArchitectureFlags::FEEDFORWARD.with(Connection::Oi);
        let edges = build_adjacency(&flags).edges();
        assert_eq!(
            edges,
            vec![
                Edge::new(Node::Input, Node::Hidden),
                Edge::new(Node::Hidden, Node::Output),
                Edge::new(Node::Output, Node::Input),
            ]
        );
    }

    #[test]
    fn test_to_flags_rejects_missing_backbone() {
        let w = AdjacencyMatrix::from_rows([[0, 0, 0], [0, 0, 1], [0, 0, 0]]);
        let err = w.to_flags().unwrap_err();
        assert!(err.to_string().contains("Input -> Hidden"));
    }

    #[test]
    fn test_to_flags_rejects_non_binary() {
        let w = AdjacencyMatrix::from_rows([[0, 1, 0], [0, 0, 1], [0, 3, 0]]);
        assert!(w.to_flags().is_err());
    }

    #[test]
    fn test_from_vec_shape() {
        let w = AdjacencyMatrix::from_vec(&[vec![0, 1, 0], vec![0, 0, 1], vec![0, 0, 0]]).unwrap();
        assert_eq!(w, AdjacencyMatrix::feedforward());
        assert!(AdjacencyMatrix::from_vec(&[vec![0, 1, 0], vec![0, 0, 1]]).is_err());
        assert!(AdjacencyMatrix::from_vec(&[vec![0, 1], vec![0, 0, 1], vec![0, 0, 0]]).is_err());
    }

    #[test]
    fn test_display() {
        let w = build_adjacency(&ArchitectureFlags::STANDARD_RNN);
        assert_eq!(w.to_string(), "0 1 0\n0 1 1\n0 0 0");
    }
}
