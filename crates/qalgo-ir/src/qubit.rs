//! Line identifiers and the registers that name them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};

macro_rules! line_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Position of the line in the circuit.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                $name(id)
            }
        }
    };
}

line_id!(
    /// A qubit line, numbered from 0 in allocation order.
    QubitId,
    "q"
);

line_id!(
    /// A classical line, numbered from 0 in allocation order.
    ClbitId,
    "c"
);

/// A named run of lines allocated together.
///
/// Position `i` of the register maps to one circuit line; lookups past the
/// end fail instead of wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Register<L> {
    name: String,
    lines: Vec<L>,
}

/// Register of qubit lines.
pub type QuantumRegister = Register<QubitId>;

/// Register of classical lines.
pub type ClassicalRegister = Register<ClbitId>;

impl<L: Copy + PartialEq> Register<L> {
    pub(crate) fn new(name: impl Into<String>, lines: Vec<L>) -> Self {
        Self {
            name: name.into(),
            lines,
        }
    }

    /// Register name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the register holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line at position `index`.
    pub fn get(&self, index: usize) -> IrResult<L> {
        self.lines
            .get(index)
            .copied()
            .ok_or_else(|| IrError::IndexOutOfRange {
                register: self.name.clone(),
                index,
                size: self.lines.len(),
            })
    }

    /// Lines for a list of positions, in the order given.
    pub fn select(&self, indices: &[usize]) -> IrResult<Vec<L>> {
        indices.iter().map(|&i| self.get(i)).collect()
    }

    /// Position of `line` within the register, if it belongs here.
    pub fn position(&self, line: L) -> Option<usize> {
        self.lines.iter().position(|&l| l == line)
    }
}

impl QuantumRegister {
    /// Circuit qubit at register position `index`.
    pub fn qubit(&self, index: usize) -> IrResult<QubitId> {
        self.get(index)
    }

    /// All qubits, in register order.
    pub fn qubits(&self) -> &[QubitId] {
        &self.lines
    }
}

impl ClassicalRegister {
    /// Circuit bit at register position `index`.
    pub fn clbit(&self, index: usize) -> IrResult<ClbitId> {
        self.get(index)
    }

    /// All bits, in register order.
    pub fn clbits(&self) -> &[ClbitId] {
        &self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_display() {
        assert_eq!(QubitId(3).to_string(), "q3");
        assert_eq!(ClbitId(0).to_string(), "c0");
    }

    #[test]
    fn test_register_lookup() {
        let reg = QuantumRegister::new("v", vec![QubitId(3), QubitId(4)]);
        assert_eq!(reg.qubit(1).unwrap(), QubitId(4));
        assert!(matches!(
            reg.qubit(2),
            Err(IrError::IndexOutOfRange { index: 2, size: 2, .. })
        ));
        assert_eq!(reg.select(&[1, 0]).unwrap(), vec![QubitId(4), QubitId(3)]);
        assert_eq!(reg.position(QubitId(4)), Some(1));
        assert_eq!(reg.position(QubitId(0)), None);
    }

    #[test]
    fn test_classical_register() {
        let reg = ClassicalRegister::new("c", vec![ClbitId(0), ClbitId(1)]);
        assert_eq!(reg.clbit(0).unwrap(), ClbitId(0));
        assert!(reg.clbit(2).is_err());
    }
}
