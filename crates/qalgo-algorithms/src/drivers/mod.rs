//! Algorithm drivers: build, simulate, render, analyse.

pub mod bernstein_vazirani;
pub mod fourier;
pub mod grover;
pub mod simon;
pub mod sudoku;
pub mod teleportation;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use qalgo_adapter_sim::{BlochVector, Counts, Simulator};
use qalgo_ir::Circuit;
use qalgo_render::{
    Artifact, ArtifactGroup, ArtifactKind, ArtifactRef, ArtifactSink, render_bloch,
    render_circuit, render_histogram,
};

use crate::bits::BitString;
use crate::error::AlgoResult;

/// Shared collaborators for a driver run.
#[derive(Clone)]
pub struct RunContext {
    /// Simulator used for every circuit.
    pub simulator: Simulator,
    /// Where diagrams and histograms go.
    pub sink: Arc<dyn ArtifactSink>,
    /// Shots used when the caller does not pick a count.
    pub default_shots: u32,
}

impl RunContext {
    /// Default shot count for sampled drivers.
    pub const DEFAULT_SHOTS: u32 = 1024;

    /// Context with the default shot count.
    pub fn new(simulator: Simulator, sink: Arc<dyn ArtifactSink>) -> Self {
        Self {
            simulator,
            sink,
            default_shots: Self::DEFAULT_SHOTS,
        }
    }

    /// Override the default shot count.
    #[must_use]
    pub fn with_default_shots(mut self, shots: u32) -> Self {
        self.default_shots = shots;
        self
    }

    pub(crate) fn store_circuit(
        &self,
        group: ArtifactGroup,
        name: &str,
        circuit: &Circuit,
    ) -> AlgoResult<ArtifactRef> {
        let artifact =
            Artifact::new(ArtifactKind::Circuit, name, render_circuit(circuit)).in_group(group);
        self.sink.store(&artifact)?;
        Ok(artifact.reference())
    }

    pub(crate) fn store_histogram(
        &self,
        group: ArtifactGroup,
        name: &str,
        counts: &Counts,
    ) -> AlgoResult<ArtifactRef> {
        let artifact =
            Artifact::new(ArtifactKind::Histogram, name, render_histogram(counts, name))
                .in_group(group);
        self.sink.store(&artifact)?;
        Ok(artifact.reference())
    }

    pub(crate) fn store_bloch(
        &self,
        name: &str,
        title: &str,
        vectors: &[BlochVector],
    ) -> AlgoResult<ArtifactRef> {
        let artifact = Artifact::new(ArtifactKind::Bloch, name, render_bloch(vectors, title));
        self.sink.store(&artifact)?;
        Ok(artifact.reference())
    }
}

impl std::fmt::Debug for RunContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunContext")
            .field("simulator", &self.simulator)
            .field("default_shots", &self.default_shots)
            .finish_non_exhaustive()
    }
}

/// Shape of a built circuit.
#[derive(Debug, Clone, Serialize)]
pub struct CircuitSummary {
    /// Circuit name.
    pub name: String,
    /// Qubit lines.
    pub num_qubits: usize,
    /// Classical lines.
    pub num_clbits: usize,
    /// Depth, barriers excluded.
    pub depth: usize,
    /// Instruction count.
    pub num_ops: usize,
    /// Instruction count per name.
    pub ops: BTreeMap<String, usize>,
}

impl CircuitSummary {
    /// Summarise a circuit.
    pub fn from_circuit(circuit: &Circuit) -> Self {
        Self {
            name: circuit.name().to_string(),
            num_qubits: circuit.num_qubits(),
            num_clbits: circuit.num_clbits(),
            depth: circuit.depth(),
            num_ops: circuit.num_ops(),
            ops: circuit.count_ops(),
        }
    }
}

/// One Simon measurement checked against the secret.
#[derive(Debug, Clone, Serialize)]
pub struct SimonEquation {
    /// Observed bit pattern.
    pub z: String,
    /// Times observed.
    pub count: u64,
    /// `b·z mod 2`.
    pub dot: u8,
}

/// Driver-specific post-processing.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Analysis {
    /// The measured string against the hidden one.
    BernsteinVazirani {
        /// Hidden string.
        secret: BitString,
        /// Most frequent measurement.
        measured: String,
        /// Whether they agree.
        recovered: bool,
    },
    /// Amplitude of the marked item.
    Grover {
        /// Marked item.
        marked: String,
        /// Sampled frequency of the marked item.
        frequency: f64,
        /// Exact probability before measurement.
        probability: f64,
    },
    /// Amplified assignments against brute force.
    Sudoku {
        /// Outcomes sampled above the uniform frequency.
        solutions: Vec<String>,
        /// Satisfying assignments by brute force.
        expected: Vec<String>,
        /// Whether the two sets agree.
        matches_classical: bool,
    },
    /// Teleported marginal on the receiving qubit.
    Teleportation {
        /// Exact probability of reading 1 on the prepared state.
        expected_one: f64,
        /// Sampled frequency of 1 on the receiving qubit.
        observed_one: f64,
    },
    /// Orthogonality of every observation to the secret.
    Simon {
        /// Hidden period.
        secret: BitString,
        /// One entry per distinct observation.
        equations: Vec<SimonEquation>,
        /// Whether every `b·z` is zero.
        orthogonal: bool,
    },
    /// Bloch vectors either side of the Fourier transform.
    Fourier {
        /// Input basis state.
        basis_state: BitString,
        /// Per-qubit vectors before the transform.
        before: Vec<BlochVector>,
        /// Per-qubit vectors after the transform.
        after: Vec<BlochVector>,
    },
}

/// Everything a driver run produced.
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmOutcome {
    /// Algorithm slug.
    pub algorithm: String,
    /// The simulated circuit.
    pub circuit: CircuitSummary,
    /// Sampled counts; absent for inspection-only drivers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<Counts>,
    /// Exact or sampled outcome probabilities, keyed like counts.
    pub probabilities: BTreeMap<String, f64>,
    /// Stored diagrams, histograms and plots.
    pub artifacts: Vec<ArtifactRef>,
    /// Driver-specific result.
    pub analysis: Analysis,
}
