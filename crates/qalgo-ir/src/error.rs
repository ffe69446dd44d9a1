//! IR errors.

use thiserror::Error;

use crate::qubit::{ClbitId, QubitId};

/// Ways an instruction or register lookup can be rejected.
///
/// A rejected instruction is never appended.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Operand names a qubit the circuit never allocated.
    #[error("{op}: qubit {qubit} is not allocated")]
    QubitNotFound {
        /// Offending qubit.
        qubit: QubitId,
        /// Instruction name.
        op: String,
    },

    /// Operand names a classical bit the circuit never allocated.
    #[error("{op}: classical bit {clbit} is not allocated")]
    ClbitNotFound {
        /// Offending bit.
        clbit: ClbitId,
        /// Instruction name.
        op: String,
    },

    /// Register position past the end.
    #[error("register '{register}' has {size} lines, no position {index}")]
    IndexOutOfRange {
        /// Register name.
        register: String,
        /// Requested position.
        index: usize,
        /// Register length.
        size: usize,
    },

    /// Operand count differs from the gate arity.
    #[error("{op} acts on {expected} qubits, {got} given")]
    QubitCountMismatch {
        /// Gate name.
        op: String,
        /// Gate arity.
        expected: usize,
        /// Operands supplied.
        got: usize,
    },

    /// Measured qubits and target bits do not pair up.
    #[error("cannot measure {qubits} qubits into {clbits} classical bits")]
    MeasureArity {
        /// Measured qubits.
        qubits: usize,
        /// Target bits.
        clbits: usize,
    },

    /// The same qubit appears twice among the operands.
    #[error("{op}: qubit {qubit} used twice")]
    DuplicateQubit {
        /// Repeated qubit.
        qubit: QubitId,
        /// Instruction name.
        op: String,
    },

    /// Composite bodies hold gates and barriers only.
    #[error("composite '{0}' contains a measurement or reset")]
    NonUnitaryComposite(String),
}

/// Result alias for IR operations.
pub type IrResult<T> = Result<T, IrError>;
