//! Bit strings used as secrets, marked items and basis states.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AlgoError;

/// Longest bit string accepted from callers.
pub const MAX_BITS: usize = 10;

/// A non-empty string of `0`/`1` characters.
///
/// Written most-significant first, like measurement keys: character `k` of
/// an `n`-bit string belongs to qubit (or classical bit) `n-1-k`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitString(String);

impl BitString {
    /// Number of bits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a bit string has at least one bit.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value of qubit `index` (0 is the last character).
    pub fn bit(&self, index: usize) -> bool {
        let n = self.0.len();
        index < n && self.0.as_bytes()[n - 1 - index] == b'1'
    }

    /// Qubit indices whose bit is set, ascending.
    pub fn set_bits(&self) -> Vec<usize> {
        (0..self.len()).filter(|&i| self.bit(i)).collect()
    }

    /// Whether every bit is zero.
    pub fn is_zero(&self) -> bool {
        !self.0.contains('1')
    }

    /// Integer value, most-significant first.
    pub fn value(&self) -> usize {
        self.set_bits().iter().fold(0, |acc, &i| acc | (1 << i))
    }

    /// Bit string of `width` bits holding `value`.
    pub fn from_value(value: usize, width: usize) -> Self {
        Self(format!("{value:0width$b}"))
    }

    /// Parity of the bitwise product with another string of the same width.
    pub fn dot(&self, other: &str) -> u8 {
        let ones = self
            .0
            .bytes()
            .zip(other.bytes())
            .filter(|&(a, b)| a == b'1' && b == b'1')
            .count();
        (ones % 2) as u8
    }
}

impl FromStr for BitString {
    type Err = AlgoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AlgoError::InvalidParams("bit string is empty".into()));
        }
        if s.len() > MAX_BITS {
            return Err(AlgoError::InvalidParams(format!(
                "bit string '{s}' longer than {MAX_BITS} bits"
            )));
        }
        if let Some(bad) = s.chars().find(|c| *c != '0' && *c != '1') {
            return Err(AlgoError::InvalidParams(format!(
                "bit string '{s}' contains '{bad}'"
            )));
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for BitString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BitString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
