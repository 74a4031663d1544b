//! DynamicsHistory - time series of node activity per architecture.
//!
//! The activity array is produced elsewhere (by simulation or training code)
//! and arrives shaped `(architecture, time, node)` with exactly three nodes.
//! This module validates that shape and prepares the per-panel data a
//! renderer needs: one trace per node, a value range shared by every panel,
//! and a `[0, 1]` normalized copy for colour mapping.
//!
//! # Example
//!
//! ```
//! use prnn::{DynamicsHistory, Node};
//!
//! let hist = DynamicsHistory::from_nested(vec![vec![
//!     [0.0, 0.5, 1.0],
//!     [1.0, 0.5, 0.0],
//! ]])
//! .unwrap();
//!
//! assert_eq!(hist.shape(), (1, 2, 3));
//! assert_eq!(hist.node_trace(0, Node::Input).unwrap(), vec![0.0, 1.0]);
//! assert_eq!(hist.value_range(), (0.0, 1.0));
//! ```

use crate::node::{Node, NUM_NODES};
use crate::{PrnnError, Result};
use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Validated `(architectures, steps, 3)` activity array, stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicsHistory {
    num_architectures: usize,
    num_steps: usize,
    steps: Vec<[f64; NUM_NODES]>,
}

fn shape_overflow(num_architectures: usize, num_steps: usize) -> PrnnError {
    PrnnError::InvalidDynamicsShape {
        expected: "a shape whose size fits in memory".into(),
        actual: format!("({}, {}, {})", num_architectures, num_steps, NUM_NODES),
    }
}

/// Number of `(architecture, step)` rows, or an error if it overflows.
fn num_rows(num_architectures: usize, num_steps: usize) -> Result<usize> {
    num_architectures
        .checked_mul(num_steps)
        .ok_or_else(|| shape_overflow(num_architectures, num_steps))
}

impl DynamicsHistory {
    /// Build from nested per-architecture, per-step node values.
    ///
    /// Every architecture must have the same, non-zero number of steps.
    pub fn from_nested(history: Vec<Vec<[f64; NUM_NODES]>>) -> Result<Self> {
        let num_architectures = history.len();
        let num_steps = history.first().map(Vec::len).unwrap_or(0);

        if let Some((a, steps)) = history
            .iter()
            .enumerate()
            .find(|(_, steps)| steps.len() != num_steps)
        {
            return Err(PrnnError::InvalidDynamicsShape {
                expected: format!("{} steps for every architecture", num_steps),
                actual: format!("{} steps for architecture {}", steps.len(), a),
            });
        }

        let steps: Vec<[f64; NUM_NODES]> = history.into_iter().flatten().collect();
        Self::from_steps(num_architectures, num_steps, steps)
    }

    /// Build from a flat row-major buffer of length `a * t * 3`.
    pub fn from_flat(num_architectures: usize, num_steps: usize, data: Vec<f64>) -> Result<Self> {
        let expected_len = num_rows(num_architectures, num_steps)?
            .checked_mul(NUM_NODES)
            .ok_or_else(|| shape_overflow(num_architectures, num_steps))?;
        if data.len() != expected_len {
            return Err(PrnnError::InvalidDynamicsShape {
                expected: format!(
                    "({}, {}, {}) = {} values",
                    num_architectures, num_steps, NUM_NODES, expected_len
                ),
                actual: format!("{} values", data.len()),
            });
        }

        let steps = data
            .chunks_exact(NUM_NODES)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Self::from_steps(num_architectures, num_steps, steps)
    }

    fn from_steps(
        num_architectures: usize,
        num_steps: usize,
        steps: Vec<[f64; NUM_NODES]>,
    ) -> Result<Self> {
        if num_architectures == 0 || num_steps == 0 {
            return Err(PrnnError::InvalidDynamicsShape {
                expected: "at least one architecture and one time step".into(),
                actual: format!("({}, {}, {})", num_architectures, num_steps, NUM_NODES),
            });
        }

        let expected_rows = num_rows(num_architectures, num_steps)?;
        if steps.len() != expected_rows {
            return Err(PrnnError::InvalidDynamicsShape {
                expected: format!("{} rows of {} nodes", expected_rows, NUM_NODES),
                actual: format!("{} rows", steps.len()),
            });
        }

        if let Some(pos) = steps.iter().flatten().position(|v| !v.is_finite()) {
            let row = pos / NUM_NODES;
            return Err(PrnnError::InvalidParameter(format!(
                "non-finite value at architecture {} step {} node {}",
                row / num_steps,
                row % num_steps,
                pos % NUM_NODES
            )));
        }

        tracing::debug!(num_architectures, num_steps, "loaded dynamics history");

        Ok(Self {
            num_architectures,
            num_steps,
            steps,
        })
    }

    /// `(architectures, steps, nodes)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.num_architectures, self.num_steps, NUM_NODES)
    }

    pub fn num_architectures(&self) -> usize {
        self.num_architectures
    }

    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Flat row-major values.
    pub fn to_flat(&self) -> Vec<f64> {
        self.steps.iter().flatten().copied().collect()
    }

    #[inline]
    fn row(&self, architecture: usize, step: usize) -> usize {
        architecture * self.num_steps + step
    }

    fn check_architecture(&self, architecture: usize) -> Result<()> {
        if architecture >= self.num_architectures {
            return Err(PrnnError::IndexOutOfBounds {
                index: architecture,
                length: self.num_architectures,
            });
        }
        Ok(())
    }

    pub fn get(&self, architecture: usize, step: usize, node: Node) -> Result<f64> {
        self.check_architecture(architecture)?;
        if step >= self.num_steps {
            return Err(PrnnError::IndexOutOfBounds {
                index: step,
                length: self.num_steps,
            });
        }
        Ok(self.steps[self.row(architecture, step)][node.index()])
    }

    /// Activity of one node of one architecture over time.
    pub fn node_trace(&self, architecture: usize, node: Node) -> Result<Vec<f64>> {
        Ok(self
            .architecture(architecture)?
            .iter()
            .map(|step| step[node.index()])
            .collect())
    }

    /// All steps of one architecture as a `(steps, 3)` view.
    pub fn architecture(&self, architecture: usize) -> Result<&[[f64; NUM_NODES]]> {
        self.check_architecture(architecture)?;
        let start = self.row(architecture, 0);
        Ok(&self.steps[start..start + self.num_steps])
    }

    /// Time axis `0..num_steps` for plotting.
    pub fn time_axis(&self) -> Vec<usize> {
        (0..self.num_steps).collect()
    }

    /// Global `(min, max)` over every architecture, step and node.
    pub fn value_range(&self) -> (f64, f64) {
        match self
            .steps
            .iter()
            .flatten()
            .copied()
            .minmax_by(|a, b| a.total_cmp(b))
        {
            MinMaxResult::NoElements => (0.0, 0.0),
            MinMaxResult::OneElement(v) => (v, v),
            MinMaxResult::MinMax(lo, hi) => (lo, hi),
        }
    }

    /// Copy rescaled to `[0, 1]` with the global range.
    ///
    /// A constant history maps to all zeros.
    pub fn normalized(&self) -> Self {
        let (lo, hi) = self.value_range();
        let span = hi - lo;
        let steps = self
            .steps
            .iter()
            .map(|row| {
                if span > 0.0 {
                    row.map(|v| (v - lo) / span)
                } else {
                    [0.0; NUM_NODES]
                }
            })
            .collect();
        Self {
            num_architectures: self.num_architectures,
            num_steps: self.num_steps,
            steps,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and re-validate a JSON history.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Self = serde_json::from_str(json)?;
        Self::from_steps(raw.num_architectures, raw.num_steps, raw.steps)
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let hist = Self::from_json(&json)?;
        tracing::info!(path = %path.as_ref().display(), "loaded dynamics history");
        Ok(hist)
    }
}
