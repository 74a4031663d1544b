//! prnn - Partially-Recurrent Neural Network Architectures
//!
//! prnn builds the connectivity of small partially-recurrent neural networks
//! (pRNNs) made of exactly three nodes: **input**, **hidden** and **output**.
//! Two feedforward edges (input→hidden, hidden→output) form the backbone of
//! every architecture; seven further directed edges are switched on or off by
//! a 7-bit configuration vector in the fixed order `[ii, hh, oo, io, oi, hi, oh]`.
//!
//! # Architecture
//!
//! - **ArchitectureFlags**: the validated configuration vector
//! - **Adjacency Builder**: configuration → 3×3 binary matrix
//! - **Catalog**: the 128-architecture space and named architecture sets
//! - **DynamicsHistory**: validated `(architecture, time, node)` activity data
//!
//! # Examples
//!
//! ## Building an adjacency matrix
//!
//! ```
//! use prnn::{build_adjacency, ArchitectureFlags, Node};
//!
//! // [0,0,0,0,0,0,0] is a feedforward network
//! let ff = build_adjacency(&ArchitectureFlags::FEEDFORWARD);
//! assert_eq!(ff.rows(), [[0, 1, 0], [0, 0, 1], [0, 0, 0]]);
//!
//! // [1,1,1,1,1,1,1] is fully recurrent
//! let full = build_adjacency(&ArchitectureFlags::FULLY_RECURRENT);
//! assert_eq!(full.synapse_count(), 9);
//! assert!(full.is_connected(Node::Output, Node::Input));
//! ```
//!
//! ## Validating untyped input
//!
//! ```
//! use prnn::{create_adjacency_matrix, PrnnError};
//!
//! let w = create_adjacency_matrix(&[0, 1, 0, 0, 0, 0, 0]).unwrap();
//! assert_eq!(w.rows(), [[0, 1, 0], [0, 1, 1], [0, 0, 0]]);
//!
//! let err = create_adjacency_matrix(&[0, 1, 0, 0, 0, 0, 0, 0]).unwrap_err();
//! assert!(matches!(err, PrnnError::InvalidConfiguration(_)));
//! ```
//!
//! # Logging
//!
//! Rejected input is reported through `tracing` at debug level and file
//! save/load at info level. The crate never installs a subscriber.

// Module declarations
pub mod adjacency;
pub mod catalog;
pub mod connection;
pub mod dynamics;
pub mod error;
pub mod flags;
pub mod node;

#[cfg(feature = "wasm")]
pub mod wasm_interface;

// Re-exports for convenient access
pub use adjacency::{build_adjacency, create_adjacency_matrix, AdjacencyMatrix};
pub use catalog::{ArchitectureCatalog, ArchitectureEntry, ArchitectureSet};
pub use connection::{Connection, ConnectionKind, Edge, BACKBONE, NUM_CONNECTIONS};
pub use dynamics::DynamicsHistory;
pub use error::{PrnnError, Result};
pub use flags::{ArchitectureFlags, NUM_ARCHITECTURES};
pub use node::{Node, NUM_NODES};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = "prnn";

/// Get version string
pub fn version() -> String {
    format!("{} v{}", NAME, VERSION)
}
