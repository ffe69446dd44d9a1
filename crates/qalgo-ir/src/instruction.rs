//! One step of a circuit: an operation and the lines it touches.

use serde::{Deserialize, Serialize};

use crate::gate::{Gate, GateKind};
use crate::qubit::{ClbitId, QubitId};

/// What an instruction does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// Unitary gate, standard or composite.
    Gate(Gate),
    /// Read `qubits[i]` into `clbits[i]`.
    Measure,
    /// Return the qubits to |0⟩.
    Reset,
    /// Scheduling fence; no effect on the state.
    Barrier,
}

/// An operation with its operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// Operation.
    pub kind: InstructionKind,
    /// Quantum operands, controls first for controlled gates.
    pub qubits: Vec<QubitId>,
    /// Classical operands; only measurements have any.
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    fn on(kind: InstructionKind, qubits: Vec<QubitId>) -> Self {
        Self {
            kind,
            qubits,
            clbits: Vec::new(),
        }
    }

    /// Gate on the given operands.
    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::on(InstructionKind::Gate(gate.into()), qubits.into_iter().collect())
    }

    /// Measurement of one qubit into one bit.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
            clbits: vec![clbit],
        }
    }

    /// Reset of one qubit.
    pub fn reset(qubit: QubitId) -> Self {
        Self::on(InstructionKind::Reset, vec![qubit])
    }

    /// Barrier across the given qubits.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::on(InstructionKind::Barrier, qubits.into_iter().collect())
    }

    /// Lower-case name: the gate name, or `measure` / `reset` / `barrier`.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Reset => "reset",
            InstructionKind::Barrier => "barrier",
        }
    }

    /// The gate, for gate instructions.
    pub fn as_gate(&self) -> Option<&Gate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// True for barriers.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    /// True for gates and barriers, the content a composite may hold.
    pub fn is_unitary(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_) | InstructionKind::Barrier)
    }

    /// True when this places a composite gate.
    pub fn is_composite(&self) -> bool {
        self.as_gate()
            .is_some_and(|g| matches!(g.kind, GateKind::Composite(_)))
    }

    /// The same instruction with each qubit sent through `map`.
    pub fn remapped(&self, map: impl Fn(QubitId) -> QubitId) -> Self {
        Self {
            kind: self.kind.clone(),
            qubits: self.qubits.iter().copied().map(map).collect(),
            clbits: self.clbits.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::StandardGate;

    #[test]
    fn test_names() {
        assert_eq!(Instruction::gate(StandardGate::H, [QubitId(0)]).name(), "h");
        assert_eq!(Instruction::measure(QubitId(0), ClbitId(0)).name(), "measure");
        assert_eq!(Instruction::reset(QubitId(1)).name(), "reset");
        assert!(Instruction::barrier([QubitId(0), QubitId(1)]).is_barrier());
    }

    #[test]
    fn test_unitary_content() {
        assert!(Instruction::gate(StandardGate::CX, [QubitId(0), QubitId(1)]).is_unitary());
        assert!(Instruction::barrier([QubitId(0)]).is_unitary());
        assert!(!Instruction::measure(QubitId(0), ClbitId(0)).is_unitary());
        assert!(!Instruction::reset(QubitId(0)).is_unitary());
    }

    #[test]
    fn test_remapped_keeps_operation() {
        let inst = Instruction::gate(StandardGate::CX, [QubitId(0), QubitId(1)]);
        let moved = inst.remapped(|q| QubitId(q.0 + 5));
        assert_eq!(moved.qubits, vec![QubitId(5), QubitId(6)]);
        assert_eq!(moved.kind, inst.kind);
    }
}
