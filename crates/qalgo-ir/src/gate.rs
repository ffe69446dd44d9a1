//! Gates: the built-in set and named sub-circuits.

use serde::{Deserialize, Serialize};

use crate::instruction::Instruction;

/// Built-in gates the simulator applies directly.
///
/// Angles are in radians. Controlled gates take their controls first and the
/// target last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    I,
    X,
    Y,
    Z,
    H,
    S,
    Sdg,
    T,
    Tdg,
    Rx(f64),
    Ry(f64),
    Rz(f64),
    /// Phase `diag(1, e^{iθ})`.
    P(f64),
    CX,
    CY,
    CZ,
    /// Controlled phase.
    CP(f64),
    Swap,
    /// Toffoli.
    CCX,
    /// X on the last operand when every preceding operand is 1.
    MCX { num_controls: u32 },
}

/// Name, arity and control count of a standard gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Signature {
    name: &'static str,
    controls: u32,
    targets: u32,
}

const fn sig(name: &'static str, controls: u32, targets: u32) -> Signature {
    Signature {
        name,
        controls,
        targets,
    }
}

impl StandardGate {
    fn signature(&self) -> Signature {
        use StandardGate::*;
        match self {
            I => sig("id", 0, 1),
            X => sig("x", 0, 1),
            Y => sig("y", 0, 1),
            Z => sig("z", 0, 1),
            H => sig("h", 0, 1),
            S => sig("s", 0, 1),
            Sdg => sig("sdg", 0, 1),
            T => sig("t", 0, 1),
            Tdg => sig("tdg", 0, 1),
            Rx(_) => sig("rx", 0, 1),
            Ry(_) => sig("ry", 0, 1),
            Rz(_) => sig("rz", 0, 1),
            P(_) => sig("p", 0, 1),
            CX => sig("cx", 1, 1),
            CY => sig("cy", 1, 1),
            CZ => sig("cz", 1, 1),
            CP(_) => sig("cp", 1, 1),
            Swap => sig("swap", 0, 2),
            CCX => sig("ccx", 2, 1),
            MCX { num_controls } => sig("mcx", *num_controls, 1),
        }
    }

    /// Lower-case mnemonic.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.signature().name
    }

    /// Number of operands.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        let s = self.signature();
        s.controls + s.targets
    }

    /// Number of leading operands that act as controls.
    #[inline]
    pub fn num_controls(&self) -> u32 {
        self.signature().controls
    }

    /// Rotation or phase angle.
    pub fn angle(&self) -> Option<f64> {
        match *self {
            StandardGate::Rx(t)
            | StandardGate::Ry(t)
            | StandardGate::Rz(t)
            | StandardGate::P(t)
            | StandardGate::CP(t) => Some(t),
            _ => None,
        }
    }
}

/// A sub-circuit placed as one gate, such as an oracle or a diffuser.
///
/// The body addresses local qubits `0..num_qubits`; placing the gate maps
/// local qubit `i` to operand `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeGate {
    /// Drawn label and instruction name.
    pub name: String,
    /// Arity.
    pub num_qubits: u32,
    /// Body over local qubits; gates and barriers only.
    pub body: Vec<Instruction>,
}

impl CompositeGate {
    /// Body length, composites inside counted once.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Whether the body is empty.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Standard or composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// Built-in gate.
    Standard(StandardGate),
    /// Named sub-circuit.
    Composite(CompositeGate),
}

/// A gate and an optional drawing label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The operation.
    pub kind: GateKind,
    /// Overrides the label drawn for the gate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Gate {
    /// Unlabelled standard gate.
    pub fn standard(gate: StandardGate) -> Self {
        Self {
            kind: GateKind::Standard(gate),
            label: None,
        }
    }

    /// Unlabelled composite gate.
    pub fn composite(gate: CompositeGate) -> Self {
        Self {
            kind: GateKind::Composite(gate),
            label: None,
        }
    }

    /// Set the drawing label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Instruction name.
    pub fn name(&self) -> &str {
        match &self.kind {
            GateKind::Standard(g) => g.name(),
            GateKind::Composite(g) => &g.name,
        }
    }

    /// Number of operands.
    pub fn num_qubits(&self) -> u32 {
        match &self.kind {
            GateKind::Standard(g) => g.num_qubits(),
            GateKind::Composite(g) => g.num_qubits,
        }
    }

    /// Text drawn in the gate box.
    ///
    /// Standard gates are upper-cased, with the angle to two decimals.
    pub fn display_label(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }
        match &self.kind {
            GateKind::Standard(g) => {
                let name = g.name().to_uppercase();
                match g.angle() {
                    Some(theta) => format!("{name}({theta:.2})"),
                    None => name,
                }
            }
            GateKind::Composite(g) => g.name.clone(),
        }
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::standard(gate)
    }
}

impl From<CompositeGate> for Gate {
    fn from(gate: CompositeGate) -> Self {
        Gate::composite(gate)
    }
}
