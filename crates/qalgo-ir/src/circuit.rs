//! Circuits and the builder methods that append to them.

use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::fmt;

use rustc_hash::FxHashSet;

use crate::dag::CircuitDag;
use crate::error::{IrError, IrResult};
use crate::gate::{CompositeGate, Gate, GateKind, StandardGate};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClassicalRegister, ClbitId, QuantumRegister, QubitId, Register};

/// Builder methods for gates without parameters.
macro_rules! fixed_gates {
    ($($(#[$doc:meta])* $method:ident($($q:ident),+) => $gate:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $method(&mut self, $($q: QubitId),+) -> IrResult<&mut Self> {
                self.push(Instruction::gate(StandardGate::$gate, [$($q),+]))
            }
        )*
    };
}

/// Builder methods for gates taking one angle.
macro_rules! angle_gates {
    ($($(#[$doc:meta])* $method:ident($($q:ident),+) => $gate:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $method(&mut self, theta: f64, $($q: QubitId),+) -> IrResult<&mut Self> {
                self.push(Instruction::gate(StandardGate::$gate(theta), [$($q),+]))
            }
        )*
    };
}

/// An ordered instruction list over a fixed set of lines.
///
/// Lines are allocated through registers. Every instruction is checked
/// before it is appended, so a circuit never refers to a line it does not
/// own and a rejected instruction leaves it unchanged.
#[derive(Debug, Clone)]
pub struct Circuit {
    name: String,
    num_qubits: u32,
    num_clbits: u32,
    qregs: Vec<QuantumRegister>,
    cregs: Vec<ClassicalRegister>,
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Empty circuit without lines.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            num_qubits: 0,
            num_clbits: 0,
            qregs: Vec::new(),
            cregs: Vec::new(),
            instructions: Vec::new(),
        }
    }

    /// Circuit with registers `q` and `c`; a zero size skips the register.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        if num_qubits > 0 {
            circuit.add_qreg("q", num_qubits);
        }
        if num_clbits > 0 {
            circuit.add_creg("c", num_clbits);
        }
        circuit
    }

    /// Allocate `size` new qubits as a named register.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> QuantumRegister {
        let start = self.num_qubits;
        self.num_qubits += size;
        let register = Register::new(name, (start..self.num_qubits).map(QubitId).collect());
        self.qregs.push(register.clone());
        register
    }

    /// Allocate `size` new classical bits as a named register.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> ClassicalRegister {
        let start = self.num_clbits;
        self.num_clbits += size;
        let register = Register::new(name, (start..self.num_clbits).map(ClbitId).collect());
        self.cregs.push(register.clone());
        register
    }

    /// Check and append an instruction.
    pub fn push(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.check(&instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    fn check(&self, inst: &Instruction) -> IrResult<()> {
        let op = inst.name();
        match &inst.kind {
            InstructionKind::Gate(gate) => {
                let expected = gate.num_qubits() as usize;
                if inst.qubits.len() != expected {
                    return Err(IrError::QubitCountMismatch {
                        op: op.to_string(),
                        expected,
                        got: inst.qubits.len(),
                    });
                }
            }
            InstructionKind::Measure
                if inst.qubits.is_empty() || inst.qubits.len() != inst.clbits.len() =>
            {
                return Err(IrError::MeasureArity {
                    qubits: inst.qubits.len(),
                    clbits: inst.clbits.len(),
                });
            }
            _ => {}
        }

        let mut seen = FxHashSet::default();
        for &qubit in &inst.qubits {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit,
                    op: op.to_string(),
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    op: op.to_string(),
                });
            }
        }
        if let Some(&clbit) = inst.clbits.iter().find(|c| c.0 >= self.num_clbits) {
            return Err(IrError::ClbitNotFound {
                clbit,
                op: op.to_string(),
            });
        }
        Ok(())
    }

    fixed_gates! {
        /// Identity.
        id(qubit) => I;
        /// Hadamard.
        h(qubit) => H;
        /// Pauli-X.
        x(qubit) => X;
        /// Pauli-Y.
        y(qubit) => Y;
        /// Pauli-Z.
        z(qubit) => Z;
        /// Phase by π/2.
        s(qubit) => S;
        /// Inverse of S.
        sdg(qubit) => Sdg;
        /// Phase by π/4.
        t(qubit) => T;
        /// Inverse of T.
        tdg(qubit) => Tdg;
        /// Controlled-NOT.
        cx(control, target) => CX;
        /// Controlled-Y.
        cy(control, target) => CY;
        /// Controlled-Z.
        cz(control, target) => CZ;
        /// Exchange two qubits.
        swap(a, b) => Swap;
        /// Toffoli.
        ccx(c1, c2, target) => CCX;
    }

    angle_gates! {
        /// Rotation about X.
        rx(qubit) => Rx;
        /// Rotation about Y.
        ry(qubit) => Ry;
        /// Rotation about Z.
        rz(qubit) => Rz;
        /// Phase on |1⟩.
        p(qubit) => P;
        /// Controlled phase.
        cp(control, target) => CP;
    }

    /// X on `target` controlled by every qubit in `controls`.
    pub fn mcx(&mut self, controls: &[QubitId], target: QubitId) -> IrResult<&mut Self> {
        let gate = StandardGate::MCX {
            num_controls: controls.len() as u32,
        };
        let operands = controls.iter().copied().chain([target]);
        self.push(Instruction::gate(gate, operands))
    }

    /// Any gate on the given operands.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.push(Instruction::gate(gate, qubits))
    }

    /// Place a composite gate; operand `i` receives local qubit `i`.
    pub fn append(
        &mut self,
        composite: &CompositeGate,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.push(Instruction::gate(composite.clone(), qubits))
    }

    /// Measure one qubit into one bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.push(Instruction::measure(qubit, clbit))
    }

    /// Measure `qubits[i]` into `clbits[i]`.
    pub fn measure_many(&mut self, qubits: &[QubitId], clbits: &[ClbitId]) -> IrResult<&mut Self> {
        if qubits.len() != clbits.len() {
            return Err(IrError::MeasureArity {
                qubits: qubits.len(),
                clbits: clbits.len(),
            });
        }
        for (&q, &c) in qubits.iter().zip(clbits) {
            self.measure(q, c)?;
        }
        Ok(self)
    }

    /// Measure qubit `i` into bit `i`; needs at least as many bits as qubits.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        if self.num_clbits < self.num_qubits {
            return Err(IrError::MeasureArity {
                qubits: self.num_qubits(),
                clbits: self.num_clbits(),
            });
        }
        for i in 0..self.num_qubits {
            self.measure(QubitId(i), ClbitId(i))?;
        }
        Ok(self)
    }

    /// Return a qubit to |0⟩.
    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::reset(qubit))
    }

    /// Barrier across the given qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.push(Instruction::barrier(qubits))
    }

    /// Barrier across every qubit.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        self.push(Instruction::barrier((0..self.num_qubits).map(QubitId)))
    }

    /// Package the circuit as a composite gate over its qubits.
    pub fn to_gate(&self, name: impl Into<String>) -> IrResult<CompositeGate> {
        let name = name.into();
        if !self.instructions.iter().all(Instruction::is_unitary) {
            return Err(IrError::NonUnitaryComposite(name));
        }
        Ok(CompositeGate {
            name,
            num_qubits: self.num_qubits,
            body: self.instructions.clone(),
        })
    }

    /// Copy with every composite expanded, recursively, into standard gates.
    pub fn decompose(&self) -> Self {
        let mut flat = Vec::with_capacity(self.instructions.len());
        for inst in &self.instructions {
            expand(inst, &mut flat);
        }
        Self {
            instructions: flat,
            ..self.clone()
        }
    }

    /// Circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Qubit lines.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Classical lines.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    /// Instruction count, composites counted once.
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// Instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Wire-dependency view.
    pub fn dag(&self) -> CircuitDag {
        CircuitDag::build(&self.instructions)
    }

    /// Longest chain of dependent instructions, barriers excluded.
    pub fn depth(&self) -> usize {
        self.dag().depth()
    }

    /// Instruction count per name.
    pub fn count_ops(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for inst in &self.instructions {
            *counts.entry(inst.name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Whether any instruction places a composite gate.
    pub fn has_composites(&self) -> bool {
        self.instructions.iter().any(Instruction::is_composite)
    }

    /// Quantum registers in allocation order.
    pub fn qregs(&self) -> &[QuantumRegister] {
        &self.qregs
    }

    /// Classical registers in allocation order.
    pub fn cregs(&self) -> &[ClassicalRegister] {
        &self.cregs
    }

    /// `register[position]` for each qubit line, in line order.
    pub fn qubit_labels(&self) -> Vec<String> {
        line_labels(self.num_qubits, &self.qregs, QubitId)
    }

    /// `register[position]` for each classical line, in line order.
    pub fn clbit_labels(&self) -> Vec<String> {
        line_labels(self.num_clbits, &self.cregs, ClbitId)
    }

    /// Two-qubit Bell pair, measured.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_size("bell", 2, 2);
        circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?.measure_all()?;
        Ok(circuit)
    }

    /// Quantum Fourier transform on `n` qubits, swaps included.
    pub fn qft(n: u32) -> IrResult<Self> {
        let mut circuit = Self::with_size("qft", n, 0);
        for target in (0..n).rev() {
            circuit.h(QubitId(target))?;
            for control in (0..target).rev() {
                let angle = PI / f64::from(1u32 << (target - control));
                circuit.cp(angle, QubitId(control), QubitId(target))?;
            }
        }
        for i in 0..n / 2 {
            circuit.swap(QubitId(i), QubitId(n - 1 - i))?;
        }
        Ok(circuit)
    }
}

fn line_labels<L>(count: u32, registers: &[Register<L>], line: fn(u32) -> L) -> Vec<String>
where
    L: Copy + PartialEq + fmt::Display,
{
    (0..count)
        .map(line)
        .map(|l| {
            registers
                .iter()
                .find_map(|r| r.position(l).map(|pos| format!("{}[{pos}]", r.name())))
                .unwrap_or_else(|| l.to_string())
        })
        .collect()
}

fn expand(inst: &Instruction, out: &mut Vec<Instruction>) {
    if let InstructionKind::Gate(Gate {
        kind: GateKind::Composite(composite),
        ..
    }) = &inst.kind
    {
        for inner in &composite.body {
            expand(&inner.remapped(|local| inst.qubits[local.index()]), out);
        }
    } else {
        out.push(inst.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_size_registers() {
        let circuit = Circuit::with_size("t", 3, 2);
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.qregs()[0].name(), "q");
        assert_eq!(circuit.cregs()[0].len(), 2);
        assert!(Circuit::with_size("empty", 0, 0).qregs().is_empty());
    }

    #[test]
    fn test_registers_allocate_consecutive_lines() {
        let mut circuit = Circuit::new("t");
        let var = circuit.add_qreg("v", 4);
        let out = circuit.add_qreg("out", 1);
        circuit.add_creg("c", 4);

        assert_eq!(var.qubit(3).unwrap(), QubitId(3));
        assert_eq!(out.qubit(0).unwrap(), QubitId(4));
        assert_eq!(circuit.num_qubits(), 5);
        assert_eq!(circuit.qubit_labels()[4], "out[0]");
        assert_eq!(circuit.clbit_labels()[1], "c[1]");
    }

    #[test]
    fn test_rejected_instruction_leaves_circuit_unchanged() {
        let mut circuit = Circuit::with_size("t", 2, 1);
        assert!(matches!(circuit.h(QubitId(2)), Err(IrError::QubitNotFound { .. })));
        assert!(matches!(
            circuit.cx(QubitId(1), QubitId(1)),
            Err(IrError::DuplicateQubit { .. })
        ));
        assert!(matches!(
            circuit.measure(QubitId(1), ClbitId(1)),
            Err(IrError::ClbitNotFound { .. })
        ));
        assert!(matches!(
            circuit.measure_all(),
            Err(IrError::MeasureArity { qubits: 2, clbits: 1 })
        ));
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_error_names_the_instruction() {
        let mut circuit = Circuit::with_size("t", 1, 0);
        let err = circuit.cz(QubitId(0), QubitId(3)).unwrap_err();
        assert_eq!(err.to_string(), "cz: qubit q3 is not allocated");
    }

    #[test]
    fn test_chaining_and_depth() {
        let circuit = Circuit::bell().unwrap();
        assert_eq!(circuit.depth(), 3);
        assert_eq!(circuit.count_ops()["measure"], 2);
        assert_eq!(circuit.count_ops()["cx"], 1);
    }

    #[test]
    fn test_angle_gates() {
        let mut circuit = Circuit::with_size("t", 2, 0);
        circuit.ry(PI / 4.0, QubitId(0)).unwrap();
        circuit.cp(PI, QubitId(0), QubitId(1)).unwrap();
        let gate = circuit.instructions()[1].as_gate().unwrap();
        assert_eq!(gate.kind, GateKind::Standard(StandardGate::CP(PI)));
        assert_eq!(circuit.depth(), 2);
    }

    #[test]
    fn test_composite_placement_and_decompose() {
        let mut sub = Circuit::with_size("pair", 2, 0);
        sub.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
        let pair = sub.to_gate("pair").unwrap();

        let mut circuit = Circuit::with_size("outer", 3, 0);
        circuit.append(&pair, [QubitId(2), QubitId(0)]).unwrap();
        assert!(circuit.has_composites());
        assert_eq!(circuit.instructions()[0].name(), "pair");

        let flat = circuit.decompose();
        assert!(!flat.has_composites());
        assert_eq!(flat.num_qubits(), 3);
        assert_eq!(flat.instructions()[0].qubits, vec![QubitId(2)]);
        assert_eq!(flat.instructions()[1].qubits, vec![QubitId(2), QubitId(0)]);
    }

    #[test]
    fn test_composite_rules() {
        assert!(matches!(
            Circuit::bell().unwrap().to_gate("bell"),
            Err(IrError::NonUnitaryComposite(_))
        ));

        let two = Circuit::with_size("two", 2, 0).to_gate("two").unwrap();
        let mut circuit = Circuit::with_size("outer", 3, 0);
        assert!(matches!(
            circuit.append(&two, [QubitId(0)]),
            Err(IrError::QubitCountMismatch { expected: 2, got: 1, .. })
        ));
    }

    #[test]
    fn test_mcx_puts_target_last() {
        let mut circuit = Circuit::with_size("t", 4, 0);
        circuit
            .mcx(&[QubitId(0), QubitId(1), QubitId(2)], QubitId(3))
            .unwrap();
        let inst = &circuit.instructions()[0];
        assert_eq!(inst.name(), "mcx");
        assert_eq!(inst.qubits.last(), Some(&QubitId(3)));
    }

    #[test]
    fn test_qft_gate_counts() {
        let ops = Circuit::qft(3).unwrap().count_ops();
        assert_eq!(ops["h"], 3);
        assert_eq!(ops["cp"], 3);
        assert_eq!(ops["swap"], 1);
        assert_eq!(Circuit::qft(0).unwrap().num_ops(), 0);
    }
}
