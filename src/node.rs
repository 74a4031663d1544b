//! Node roles of a three-node pRNN.
//!
//! Every architecture has exactly one input, one hidden and one output node.
//! Their discriminants are the row/column indices of the adjacency matrix.

use crate::{PrnnError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of nodes in every architecture.
pub const NUM_NODES: usize = 3;

/// Semantic role of a row/column of the adjacency matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Node {
    Input = 0,
    Hidden = 1,
    Output = 2,
}

impl Node {
    /// All nodes in index order.
    pub const ALL: [Node; NUM_NODES] = [Node::Input, Node::Hidden, Node::Output];

    /// Matrix row/column index of this node.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a node by its matrix index.
    ///
    /// # Examples
    ///
    /// ```
    /// use prnn::Node;
    ///
    /// assert_eq!(Node::from_index(1).unwrap(), Node::Hidden);
    /// assert!(Node::from_index(3).is_err());
    /// ```
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(PrnnError::IndexOutOfBounds {
                index,
                length: NUM_NODES,
            })
    }

    /// Single-letter abbreviation used in connection codes ("i", "h", "o").
    pub const fn abbrev(self) -> char {
        match self {
            Node::Input => 'i',
            Node::Hidden => 'h',
            Node::Output => 'o',
        }
    }

    /// Display label ("Input", "Hidden", "Output").
    pub const fn label(self) -> &'static str {
        match self {
            Node::Input => "Input",
            Node::Hidden => "Hidden",
            Node::Output => "Output",
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
