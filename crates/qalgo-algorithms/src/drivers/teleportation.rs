//! Quantum teleportation of q0 onto q2 through a Bell pair.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use qalgo_ir::{Circuit, ClbitId};
use qalgo_render::ArtifactGroup;

use super::{AlgorithmOutcome, Analysis, CircuitSummary, RunContext};
use crate::error::{AlgoError, AlgoResult};
use crate::gates::{add_cx, add_hadamard, add_z, create_circuit};

/// State prepared on q0 before the protocol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preparation {
    /// Leave q0 in |0⟩.
    #[default]
    Zero,
    /// Flip q0 to |1⟩.
    One,
    /// `Ry(θ)|0⟩`.
    Ry(f64),
}

impl Preparation {
    /// Probability of reading 1 on the prepared state.
    pub fn probability_one(self) -> f64 {
        match self {
            Preparation::Zero => 0.0,
            Preparation::One => 1.0,
            Preparation::Ry(theta) => (theta / 2.0).sin().powi(2),
        }
    }
}

/// Driver configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TeleportationConfig {
    /// State to teleport.
    pub prepare: Preparation,
}

/// Build the protocol: measurement happens mid-circuit and the corrections
/// are applied as controlled gates from the measured qubits.
pub fn build_circuit(config: &TeleportationConfig) -> AlgoResult<Circuit> {
    let (mut circuit, q) = create_circuit("teleportation", 3, 3)?;
    match config.prepare {
        Preparation::Zero => {}
        Preparation::One => {
            circuit.x(q.qubit(0)?)?;
        }
        Preparation::Ry(theta) => {
            if !theta.is_finite() {
                return Err(AlgoError::InvalidParams(format!("angle {theta} is not finite")));
            }
            circuit.ry(theta, q.qubit(0)?)?;
        }
    }
    circuit.barrier_all()?;

    // Bell pair between q1 and q2.
    add_hadamard(&mut circuit, &q, &[1])?;
    add_cx(&mut circuit, &q, [1, 2])?;
    // Bell-basis measurement of q0, q1.
    add_cx(&mut circuit, &q, [0, 1])?;
    add_hadamard(&mut circuit, &q, &[0])?;
    circuit.barrier_all()?;
    circuit.measure(q.qubit(0)?, ClbitId(0))?;
    circuit.measure(q.qubit(1)?, ClbitId(1))?;
    circuit.barrier_all()?;

    add_cx(&mut circuit, &q, [1, 2])?;
    add_z(&mut circuit, &q, [0, 2])?;
    circuit.measure(q.qubit(2)?, ClbitId(2))?;
    Ok(circuit)
}

/// Run the driver.
#[instrument(skip(ctx))]
pub fn run(
    ctx: &RunContext,
    config: &TeleportationConfig,
    shots: u32,
) -> AlgoResult<AlgorithmOutcome> {
    let circuit = build_circuit(config)?;
    let result = ctx.simulator.run(&circuit, shots)?;

    let (zeros, ones) = result.counts.marginal(2).unwrap_or((0, 0));
    let total = zeros + ones;
    let observed_one = if total == 0 {
        0.0
    } else {
        ones as f64 / total as f64
    };
    let expected_one = config.prepare.probability_one();
    info!(expected_one, observed_one, "Teleportation finished");

    let artifacts = vec![
        ctx.store_circuit(ArtifactGroup::Algorithms, "teleportation", &circuit)?,
        ctx.store_histogram(ArtifactGroup::Algorithms, "teleportation", &result.counts)?,
    ];

    Ok(AlgorithmOutcome {
        algorithm: "teleportation".into(),
        circuit: CircuitSummary::from_circuit(&circuit),
        probabilities: result.counts.probabilities(),
        counts: Some(result.counts),
        artifacts,
        analysis: Analysis::Teleportation {
            expected_one,
            observed_one,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_order() {
        let circuit = build_circuit(&TeleportationConfig::default()).unwrap();
        let names: Vec<_> = circuit.instructions().iter().map(|i| i.name()).collect();
        assert_eq!(
            names,
            vec![
                "barrier", "h", "cx", "cx", "h", "barrier", "measure", "measure", "barrier",
                "cx", "cz", "measure"
            ]
        );
    }

    #[test]
    fn test_preparation_probabilities() {
        assert_eq!(Preparation::Zero.probability_one(), 0.0);
        assert_eq!(Preparation::One.probability_one(), 1.0);
        let p = Preparation::Ry(std::f64::consts::FRAC_PI_2).probability_one();
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_preparation_serde() {
        let p: Preparation = serde_json::from_str(r#"{"ry": 1.5}"#).unwrap();
        assert_eq!(p, Preparation::Ry(1.5));
        let one: Preparation = serde_json::from_str(r#""one""#).unwrap();
        assert_eq!(one, Preparation::One);
    }
}
