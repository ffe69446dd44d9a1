//! Bernstein-Vazirani: recover a hidden string with one oracle query.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use qalgo_ir::{Circuit, ClbitId};
use qalgo_render::ArtifactGroup;

use super::{AlgorithmOutcome, Analysis, CircuitSummary, RunContext};
use crate::bits::BitString;
use crate::error::AlgoResult;
use crate::gates::{add_hadamard, add_x, create_circuit};

/// Driver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BernsteinVaziraniConfig {
    /// Hidden string `s` in `f(x) = s·x mod 2`.
    pub secret: BitString,
    /// One shot suffices: the outcome is deterministic.
    pub shots: u32,
}

impl Default for BernsteinVaziraniConfig {
    fn default() -> Self {
        Self {
            secret: BitString::from_value(0b111000, 6),
            shots: 1,
        }
    }
}

/// Build the circuit: `n` inputs plus one ancilla, `n` classical bits.
pub fn build_circuit(config: &BernsteinVaziraniConfig) -> AlgoResult<Circuit> {
    let n = config.secret.len();
    let (mut circuit, q) = create_circuit("bernstein_vazirani", n as u32 + 1, n as u32)?;
    let inputs: Vec<usize> = (0..n).collect();
    let ancilla = q.qubit(n)?;

    add_hadamard(&mut circuit, &q, &inputs)?;
    // Ancilla in |−⟩ for phase kickback.
    add_x(&mut circuit, &q, n)?;
    add_hadamard(&mut circuit, &q, &[n])?;
    circuit.barrier_all()?;

    for i in config.secret.set_bits() {
        circuit.cx(q.qubit(i)?, ancilla)?;
    }
    circuit.barrier_all()?;

    add_hadamard(&mut circuit, &q, &inputs)?;
    circuit.barrier_all()?;
    for i in 0..n {
        circuit.measure(q.qubit(i)?, ClbitId(i as u32))?;
    }
    Ok(circuit)
}

/// Run the driver.
#[instrument(skip(ctx), fields(secret = %config.secret))]
pub fn run(ctx: &RunContext, config: &BernsteinVaziraniConfig) -> AlgoResult<AlgorithmOutcome> {
    let circuit = build_circuit(config)?;
    let result = ctx.simulator.run(&circuit, config.shots)?;

    let measured = result
        .counts
        .most_frequent(1)
        .into_iter()
        .next()
        .map(|(key, _)| key)
        .unwrap_or_default();
    let recovered = measured == config.secret.as_str();
    info!(%measured, recovered, "Bernstein-Vazirani finished");

    let artifacts = vec![
        ctx.store_circuit(ArtifactGroup::Algorithms, "bernstein_vazirani", &circuit)?,
        ctx.store_histogram(ArtifactGroup::Algorithms, "bernstein_vazirani", &result.counts)?,
    ];

    Ok(AlgorithmOutcome {
        algorithm: "bernstein_vazirani".into(),
        circuit: CircuitSummary::from_circuit(&circuit),
        probabilities: result.counts.probabilities(),
        counts: Some(result.counts),
        artifacts,
        analysis: Analysis::BernsteinVazirani {
            secret: config.secret.clone(),
            measured,
            recovered,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_secret() {
        assert_eq!(BernsteinVaziraniConfig::default().secret.as_str(), "111000");
    }

    #[test]
    fn test_circuit_shape() {
        let circuit = build_circuit(&BernsteinVaziraniConfig::default()).unwrap();
        assert_eq!(circuit.num_qubits(), 7);
        assert_eq!(circuit.num_clbits(), 6);
        let ops = circuit.count_ops();
        assert_eq!(ops["cx"], 3);
        assert_eq!(ops["barrier"], 3);
        assert_eq!(ops["measure"], 6);
        assert_eq!(ops["h"], 13);
    }
}
