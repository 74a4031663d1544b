//! The space of all 128 pRNN architectures.
//!
//! Architectures are numbered by their 7-bit code and laid out on an
//! 8 × 16 grid of panels, row-major, so that a whole sweep fits one figure.
//!
//! [`ArchitectureSet`] holds a named selection of architectures that can be
//! saved and loaded as JSON or bincode.
//!
//! # Example
//!
//! ```
//! use prnn::catalog::{all_architectures, panel_position, GRID_COLS};
//! use prnn::ArchitectureFlags;
//!
//! assert_eq!(all_architectures().count(), 128);
//! assert_eq!(panel_position(0).unwrap(), (0, 0));
//! assert_eq!(panel_position(GRID_COLS + 1).unwrap(), (1, 1));
//!
//! let last = all_architectures().last().unwrap();
//! assert_eq!(last, ArchitectureFlags::FULLY_RECURRENT);
//! ```

use crate::adjacency::{build_adjacency, AdjacencyMatrix};
use crate::connection::NUM_CONNECTIONS;
use crate::flags::{ArchitectureFlags, NUM_ARCHITECTURES};
use crate::{PrnnError, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Panel rows in the architecture grid.
pub const GRID_ROWS: usize = 8;

/// Panel columns in the architecture grid.
pub const GRID_COLS: usize = 16;

/// Every architecture, in code order `0..128`.
pub fn all_architectures() -> impl Iterator<Item = ArchitectureFlags> {
    (0..NUM_ARCHITECTURES as u8).map(ArchitectureFlags::from_low_bits)
}

/// Grid `(row, col)` of the panel showing architecture `index`.
pub fn panel_position(index: usize) -> Result<(usize, usize)> {
    if index >= GRID_ROWS * GRID_COLS {
        return Err(PrnnError::IndexOutOfBounds {
            index,
            length: GRID_ROWS * GRID_COLS,
        });
    }
    Ok((index / GRID_COLS, index % GRID_COLS))
}

/// Orderings and lookups over the full architecture space.
pub struct ArchitectureCatalog;

impl ArchitectureCatalog {
    /// Codes sorted by number of enabled connections, ties broken by code.
    ///
    /// Starts with the feedforward network (code 0) and ends with the fully
    /// recurrent one (code 127).
    pub fn ordered_by_connections() -> Vec<u8> {
        all_architectures()
            .sorted_by_key(|flags| (flags.num_enabled(), flags.code()))
            .map(|flags| flags.code())
            .collect()
    }

    /// All architectures with exactly `count` optional connections.
    pub fn with_connection_count(count: usize) -> Vec<ArchitectureFlags> {
        all_architectures()
            .filter(|flags| flags.num_enabled() == count)
            .collect()
    }

    /// Number of architectures per connection count, indexed by count.
    pub fn connection_count_histogram() -> Vec<usize> {
        let counts = all_architectures().map(|flags| flags.num_enabled()).counts();
        (0..=NUM_CONNECTIONS)
            .map(|n| counts.get(&n).copied().unwrap_or(0))
            .collect()
    }
}

/// A named architecture in an [`ArchitectureSet`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArchitectureEntry {
    /// Human-readable name
    pub name: String,
    /// Configuration flags
    pub flags: ArchitectureFlags,
}

/// A serializable, ordered selection of named architectures.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ArchitectureSet {
    entries: Vec<ArchitectureEntry>,
}

impl ArchitectureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The three reference architectures: feedforward, standard RNN and
    /// fully recurrent.
    pub fn presets() -> Self {
        Self {
            entries: vec![
                ArchitectureEntry {
                    name: "feedforward".into(),
                    flags: ArchitectureFlags::FEEDFORWARD,
                },
                ArchitectureEntry {
                    name: "standard_rnn".into(),
                    flags: ArchitectureFlags::STANDARD_RNN,
                },
                ArchitectureEntry {
                    name: "fully_recurrent".into(),
                    flags: ArchitectureFlags::FULLY_RECURRENT,
                },
            ],
        }
    }

    /// All 128 architectures, named by their bracketed flag vector.
    pub fn full_sweep() -> Self {
        Self {
            entries: all_architectures()
                .map(|flags| ArchitectureEntry {
                    name: flags.to_string(),
                    flags,
                })
                .collect(),
        }
    }

    /// Append an architecture. Names must be unique within the set.
    pub fn insert(&mut self, name: &str, flags: ArchitectureFlags) -> Result<usize> {
        if self.entries.iter().any(|e| e.name == name) {
            return Err(PrnnError::InvalidParameter(format!(
                "architecture '{}' already in set",
                name
            )));
        }
        self.entries.push(ArchitectureEntry {
            name: name.to_string(),
            flags,
        });
        Ok(self.entries.len() - 1)
    }

    pub fn get(&self, name: &str) -> Option<&ArchitectureFlags> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.flags)
    }

    pub fn entries(&self) -> &[ArchitectureEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adjacency matrix of every entry, in set order.
    pub fn adjacency_matrices(&self) -> Vec<(String, AdjacencyMatrix)> {
        self.entries
            .iter()
            .map(|e| (e.name.clone(), build_adjacency(&e.flags)))
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a JSON set, rejecting duplicate names.
    pub fn from_json(json: &str) -> Result<Self> {
        let set: Self = serde_json::from_str(json)?;
        set.validated()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a bincode set, rejecting duplicate names.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let set: Self = bincode::deserialize(bytes)?;
        set.validated()
    }

    fn validated(self) -> Result<Self> {
        let mut seen = HashSet::with_capacity(self.entries.len());
        if let Some(dup) = self.entries.iter().find(|e| !seen.insert(e.name.as_str())) {
            tracing::debug!(name = %dup.name, "rejected architecture set with duplicate name");
            return Err(PrnnError::InvalidParameter(format!(
                "architecture '{}' appears more than once",
                dup.name
            )));
        }
        Ok(self)
    }

    /// Save as JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        tracing::info!(path = %path.as_ref().display(), entries = self.len(), "saved architecture set");
        Ok(())
    }

    /// Load from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let set = Self::from_json(&json)?;
        tracing::info!(path = %path.as_ref().display(), entries = set.len(), "loaded architecture set");
        Ok(set)
    }

    /// Save as bincode.
    pub fn save_binary<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_bytes()?)?;
        tracing::info!(path = %path.as_ref().display(), entries = self.len(), "saved architecture set");
        Ok(())
    }

    /// Load from a bincode file.
    pub fn load_binary<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        let set = Self::from_bytes(&bytes)?;
        tracing::info!(path = %path.as_ref().display(), entries = set.len(), "loaded architecture set");
        Ok(set)
    }
}
