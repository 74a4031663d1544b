//! The optional connections of a pRNN architecture.
//!
//! Besides the two backbone edges (input→hidden, hidden→output) an
//! architecture can switch on seven further directed edges. Their order is
//! the order of the configuration vector: `ii, hh, oo, io, oi, hi, oh`.

use crate::node::Node;
use crate::{PrnnError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of optional connections (length of the configuration vector).
pub const NUM_CONNECTIONS: usize = 7;

/// A directed edge between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Node the connection leaves (matrix row)
    pub source: Node,
    /// Node the connection enters (matrix column)
    pub target: Node,
}

impl Edge {
    pub const fn new(source: Node, target: Node) -> Self {
        Self { source, target }
    }

    /// Classify this edge.
    pub fn kind(&self) -> ConnectionKind {
        if BACKBONE.contains(self) {
            ConnectionKind::Backbone
        } else if self.source == self.target {
            ConnectionKind::SelfLoop
        } else if self.source.index().abs_diff(self.target.index()) == 2 {
            ConnectionKind::Skip
        } else {
            ConnectionKind::Feedback
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// The two edges present in every architecture.
pub const BACKBONE: [Edge; 2] = [
    Edge::new(Node::Input, Node::Hidden),
    Edge::new(Node::Hidden, Node::Output),
];

/// Family an edge belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionKind {
    /// input→hidden and hidden→output, always present
    Backbone,
    /// ii, hh, oo
    SelfLoop,
    /// io, oi: edges between input and output that bypass the hidden node
    Skip,
    /// hi, oh: edges from a node back to its predecessor on the backbone
    Feedback,
}

/// One of the seven optional connections, in configuration-vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connection {
    Ii = 0,
    Hh = 1,
    Oo = 2,
    Io = 3,
    Oi = 4,
    Hi = 5,
    Oh = 6,
}

impl Connection {
    /// All connections, indexed by their configuration bit.
    pub const ALL: [Connection; NUM_CONNECTIONS] = [
        Connection::Ii,
        Connection::Hh,
        Connection::Oo,
        Connection::Io,
        Connection::Oi,
        Connection::Hi,
        Connection::Oh,
    ];

    /// Position of this connection in the configuration vector.
    #[inline]
    pub const fn bit(self) -> usize {
        self as usize
    }

    pub fn from_bit(bit: usize) -> Result<Self> {
        Self::ALL
            .get(bit)
            .copied()
            .ok_or(PrnnError::IndexOutOfBounds {
                index: bit,
                length: NUM_CONNECTIONS,
            })
    }

    /// The matrix cell this connection controls.
    pub const fn edge(self) -> Edge {
        match self {
            Connection::Ii => Edge::new(Node::Input, Node::Input),
            Connection::Hh => Edge::new(Node::Hidden, Node::Hidden),
            Connection::Oo => Edge::new(Node::Output, Node::Output),
            Connection::Io => Edge::new(Node::Input, Node::Output),
            Connection::Oi => Edge::new(Node::Output, Node::Input),
            Connection::Hi => Edge::new(Node::Hidden, Node::Input),
            Connection::Oh => Edge::new(Node::Output, Node::Hidden),
        }
    }

    pub const fn source(self) -> Node {
        self.edge().source
    }

    pub const fn target(self) -> Node {
        self.edge().target
    }

    pub fn kind(self) -> ConnectionKind {
        self.edge().kind()
    }

    /// Find the optional connection occupying a matrix cell, if any.
    ///
    /// Backbone cells have no connection and return `None`.
    pub fn for_edge(source: Node, target: Node) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.source() == source && c.target() == target)
    }

    /// Two-letter code, source abbreviation then target ("ii", "oh", ...).
    pub fn code(self) -> String {
        let edge = self.edge();
        [edge.source.abbrev(), edge.target.abbrev()].iter().collect()
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

impl FromStr for Connection {
    type Err = PrnnError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.code() == wanted)
            .ok_or_else(|| {
                PrnnError::InvalidParameter(format!("unknown connection code '{}'", s))
            })
    }
}
