//! ArchitectureFlags - the 7-bit configuration vector.
//!
//! A pRNN architecture is selected by seven binary flags, one per optional
//! connection, in the fixed order `[ii, hh, oo, io, oi, hi, oh]`. The same
//! selection can be written as
//!
//! - a named-field struct (`ArchitectureFlags`),
//! - a `[bool; 7]` array,
//! - a 7-bit code in `0..=127` where bit `k` is vector index `k`,
//! - a string such as `"0100000"` or `"[0,1,0,0,0,0,0]"`.
//!
//! Loosely typed input (slices, strings, codes) is validated here, so every
//! `ArchitectureFlags` value is a valid configuration.
//!
//! # Examples
//!
//! ```
//! use prnn::{ArchitectureFlags, Connection};
//!
//! let rnn: ArchitectureFlags = "0100000".parse().unwrap();
//! assert_eq!(rnn, ArchitectureFlags::STANDARD_RNN);
//! assert!(rnn.is_set(Connection::Hh));
//! assert_eq!(rnn.code(), 2);
//! ```

use crate::connection::{Connection, NUM_CONNECTIONS};
use crate::{PrnnError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of distinct configurations (2^7).
pub const NUM_ARCHITECTURES: usize = 1 << NUM_CONNECTIONS;

/// Inclusion flags for the seven optional connections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArchitectureFlags {
    /// input → input
    pub ii: bool,
    /// hidden → hidden
    pub hh: bool,
    /// output → output
    pub oo: bool,
    /// input → output
    pub io: bool,
    /// output → input
    pub oi: bool,
    /// hidden → input
    pub hi: bool,
    /// output → hidden
    pub oh: bool,
}

impl ArchitectureFlags {
    /// Pure feedforward network, `[0,0,0,0,0,0,0]`.
    pub const FEEDFORWARD: Self = Self::from_array([false; NUM_CONNECTIONS]);

    /// Standard RNN with a hidden self loop, `[0,1,0,0,0,0,0]`.
    pub const STANDARD_RNN: Self =
        Self::from_array([false, true, false, false, false, false, false]);

    /// Every optional connection enabled, `[1,1,1,1,1,1,1]`.
    pub const FULLY_RECURRENT: Self = Self::from_array([true; NUM_CONNECTIONS]);

    pub const fn from_array(bits: [bool; NUM_CONNECTIONS]) -> Self {
        Self {
            ii: bits[0],
            hh: bits[1],
            oo: bits[2],
            io: bits[3],
            oi: bits[4],
            hi: bits[5],
            oh: bits[6],
        }
    }

    pub const fn to_array(&self) -> [bool; NUM_CONNECTIONS] {
        [
            self.ii, self.hh, self.oo, self.io, self.oi, self.hi, self.oh,
        ]
    }

    /// Validate a loosely typed configuration vector.
    ///
    /// The slice must hold exactly seven values, each 0 or 1. Any integer
    /// type (`u8` through `u64`, `i8` through `i64`, `usize`, `isize`) and
    /// `bool` are accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use prnn::ArchitectureFlags;
    ///
    /// let flags = ArchitectureFlags::from_slice(&[1u8, 1, 1, 1, 1, 1, 1]).unwrap();
    /// assert_eq!(flags, ArchitectureFlags::FULLY_RECURRENT);
    ///
    /// assert!(ArchitectureFlags::from_slice(&[0u8; 6]).is_err());
    /// assert!(ArchitectureFlags::from_slice(&[0, 2, 0, 0, 0, 0, 0]).is_err());
    /// ```
    pub fn from_slice<T>(values: &[T]) -> Result<Self>
    where
        T: Copy + TryInto<i64> + fmt::Display,
    {
        if values.len() != NUM_CONNECTIONS {
            tracing::debug!(len = values.len(), "rejected configuration vector length");
            return Err(PrnnError::InvalidConfiguration(format!(
                "expected {} values [ii, hh, oo, io, oi, hi, oh], got {}",
                NUM_CONNECTIONS,
                values.len()
            )));
        }

        let mut bits = [false; NUM_CONNECTIONS];
        for (i, &value) in values.iter().enumerate() {
            bits[i] = match value.try_into().ok() {
                Some(0) => false,
                Some(1) => true,
                _ => {
                    tracing::debug!(index = i, value = %value, "rejected non-binary configuration value");
                    return Err(PrnnError::InvalidConfiguration(format!(
                        "value {} at index {} ({}) is not 0 or 1",
                        value,
                        i,
                        Connection::ALL[i]
                    )));
                }
            };
        }
        Ok(Self::from_array(bits))
    }

    /// Decode a 7-bit code, bit `k` being vector index `k`.
    pub fn from_code(code: u8) -> Result<Self> {
        if usize::from(code) >= NUM_ARCHITECTURES {
            tracing::debug!(code, "rejected configuration code");
            return Err(PrnnError::InvalidConfiguration(format!(
                "code {} does not fit in {} bits",
                code, NUM_CONNECTIONS
            )));
        }
        Ok(Self::from_low_bits(code))
    }

    /// Decode the low seven bits of `code`; higher bits are ignored.
    pub(crate) fn from_low_bits(code: u8) -> Self {
        let mut bits = [false; NUM_CONNECTIONS];
        for (k, bit) in bits.iter_mut().enumerate() {
            *bit = code & (1 << k) != 0;
        }
        Self::from_array(bits)
    }

    /// Encode as a 7-bit code in `0..=127`.
    pub fn code(&self) -> u8 {
        self.to_array()
            .into_iter()
            .enumerate()
            .fold(0u8, |acc, (k, set)| if set { acc | (1 << k) } else { acc })
    }

    #[inline]
    pub fn is_set(&self, connection: Connection) -> bool {
        self.to_array()[connection.bit()]
    }

    /// Copy of these flags with `connection` switched on.
    pub fn with(&self, connection: Connection) -> Self {
        let mut bits = self.to_array();
        bits[connection.bit()] = true;
        Self::from_array(bits)
    }

    /// Copy of these flags with `connection` switched off.
    pub fn without(&self, connection: Connection) -> Self {
        let mut bits = self.to_array();
        bits[connection.bit()] = false;
        Self::from_array(bits)
    }

    /// Enabled connections in vector order.
    pub fn enabled_connections(&self) -> Vec<Connection> {
        Connection::ALL
            .into_iter()
            .filter(|&c| self.is_set(c))
            .collect()
    }

    pub fn num_enabled(&self) -> usize {
        self.to_array().iter().filter(|&&b| b).count()
    }

    /// True when no optional connection is enabled.
    pub fn is_feedforward(&self) -> bool {
        self.num_enabled() == 0
    }
}

impl From<[bool; NUM_CONNECTIONS]> for ArchitectureFlags {
    fn from(bits: [bool; NUM_CONNECTIONS]) -> Self {
        Self::from_array(bits)
    }
}

impl From<ArchitectureFlags> for [bool; NUM_CONNECTIONS] {
    fn from(flags: ArchitectureFlags) -> Self {
        flags.to_array()
    }
}

impl TryFrom<&[u8]> for ArchitectureFlags {
    type Error = PrnnError;

    fn try_from(values: &[u8]) -> Result<Self> {
        Self::from_slice(values)
    }
}

impl TryFrom<&[i32]> for ArchitectureFlags {
    type Error = PrnnError;

    fn try_from(values: &[i32]) -> Result<Self> {
        Self::from_slice(values)
    }
}

impl fmt::Display for ArchitectureFlags {
    /// Bracketed list form, e.g. `[0,1,0,0,0,0,0]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, bit) in self.to_array().iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", u8::from(*bit))?;
        }
        f.write_str("]")
    }
}

impl FromStr for ArchitectureFlags {
    type Err = PrnnError;

    /// Parse seven `0`/`1` digits, optionally bracketed and separated by
    /// commas or whitespace.
    fn from_str(s: &str) -> Result<Self> {
        let body = s.trim();
        let body = body
            .strip_prefix('[')
            .and_then(|b| b.strip_suffix(']'))
            .unwrap_or(body);

        let mut values = Vec::with_capacity(NUM_CONNECTIONS);
        for ch in body.chars() {
            match ch {
                '0' => values.push(0u8),
                '1' => values.push(1u8),
                ',' => {}
                c if c.is_whitespace() => {}
                other => {
                    tracing::debug!(input = s, "rejected configuration string");
                    return Err(PrnnError::InvalidConfiguration(format!(
                        "unexpected character '{}' in \"{}\"",
                        other, s
                    )));
                }
            }
        }
        Self::from_slice(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(ArchitectureFlags::FEEDFORWARD, ArchitectureFlags::default());
        assert_eq!(ArchitectureFlags::FEEDFORWARD.code(), 0);
        assert_eq!(ArchitectureFlags::STANDARD_RNN.code(), 2);
        assert_eq!(ArchitectureFlags::FULLY_RECURRENT.code(), 127);
        assert!(ArchitectureFlags::FEEDFORWARD.is_feedforward());
        assert_eq!(ArchitectureFlags::FULLY_RECURRENT.num_enabled(), 7);
    }

    #[test]
    fn test_array_field_order() {
        let flags = ArchitectureFlags::from_array([true, false, false, false, false, false, true]);
        assert!(flags.ii);
        assert!(flags.oh);
        assert!(!flags.hh);
        assert_eq!(flags.enabled_connections(), vec![Connection::Ii, Connection::Oh]);
    }

    #[test]
    fn test_from_slice_length_errors() {
        for len in [0usize, 6, 8] {
            let values = vec![0i32; len];
            match ArchitectureFlags::from_slice(&values) {
                Err(PrnnError::InvalidConfiguration(msg)) => {
                    assert!(msg.contains(&format!("got {}", len)));
                }
                other => panic!("unexpected result: {:?}", other),
            }
        }
    }

    #[test]
    fn test_from_slice_non_binary() {
        let err = ArchitectureFlags::from_slice(&[0i32, 0, 0, 0, -1, 0, 0]).unwrap_err();
        assert!(err.to_string().contains("index 4 (oi)"));
    }

    #[test]
    fn test_from_slice_bools() {
        let flags = ArchitectureFlags::from_slice(&[false, true, false, false, false, false, false])
            .unwrap();
        assert_eq!(flags, ArchitectureFlags::STANDARD_RNN);
    }

    #[test]
    fn test_from_slice_wide_integers() {
        let positions: Vec<usize> = vec![0, 1, 0, 0, 0, 0, 0];
        assert_eq!(
            ArchitectureFlags::from_slice(&positions).unwrap(),
            ArchitectureFlags::STANDARD_RNN
        );

        let big = [0u64, 0, 0, 0, 0, 0, u64::MAX];
        let err = ArchitectureFlags::from_slice(&big).unwrap_err();
        assert!(err.to_string().contains("index 6 (oh)"));
    }

    #[test]
    fn test_code_bits() {
        assert_eq!(ArchitectureFlags::from_code(1).unwrap().enabled_connections(), vec![Connection::Ii]);
        assert_eq!(ArchitectureFlags::from_code(64).unwrap().enabled_connections(), vec![Connection::Oh]);
        assert!(ArchitectureFlags::from_code(128).is_err());
        assert!(ArchitectureFlags::from_code(255).is_err());
    }

    #[test]
    fn test_with_without() {
        let flags = ArchitectureFlags::FEEDFORWARD.with(Connection::Hh);
        assert_eq!(flags, ArchitectureFlags::STANDARD_RNN);
        assert_eq!(flags.without(Connection::Hh), ArchitectureFlags::FEEDFORWARD);
        assert_eq!(flags.with(Connection::Hh), flags);
    }

    #[test]
    fn test_display_and_parse() {
        let flags = ArchitectureFlags::STANDARD_RNN;
        assert_eq!(flags.to_string(), "[0,1,0,0,0,0,0]");
        assert_eq!(flags.to_string().parse::<ArchitectureFlags>().unwrap(), flags);
        assert_eq!("0 1 0 0 0 0 0".parse::<ArchitectureFlags>().unwrap(), flags);
        assert!("010000".parse::<ArchitectureFlags>().is_err());
        assert!("01x0000".parse::<ArchitectureFlags>().is_err());
    }
}
