//! Grover search over a 2×2 binary Sudoku.
//!
//! Four variables `v0..v3` laid out as
//!
//! ```text
//! v0 v1
//! v2 v3
//! ```
//!
//! must differ across every row and column. Each inequality is a clause
//! checked by the constraint oracle.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use qalgo_ir::Circuit;
use qalgo_render::ArtifactGroup;

use super::{AlgorithmOutcome, Analysis, CircuitSummary, RunContext};
use crate::classical;
use crate::error::{AlgoError, AlgoResult};
use crate::oracles::{constraint_oracle, diffuser};

/// Variables in the puzzle.
pub const NUM_VARS: usize = 4;

/// Driver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SudokuConfig {
    /// Pairs of variables that must differ.
    pub clauses: Vec<[usize; 2]>,
    /// Oracle + diffuser rounds.
    pub iterations: u32,
}

impl Default for SudokuConfig {
    fn default() -> Self {
        Self {
            clauses: vec![[0, 1], [0, 2], [1, 3], [2, 3]],
            iterations: 2,
        }
    }
}

impl SudokuConfig {
    fn validate(&self) -> AlgoResult<()> {
        if self.iterations == 0 || self.iterations > 8 {
            return Err(AlgoError::InvalidParams(format!(
                "iterations must be between 1 and 8, got {}",
                self.iterations
            )));
        }
        if self.clauses.len() > 8 {
            return Err(AlgoError::InvalidParams(format!(
                "at most 8 clauses supported, got {}",
                self.clauses.len()
            )));
        }
        Ok(())
    }
}

/// Build the composed circuit (oracle and diffuser left as composites).
///
/// Qubits: variables, then one per clause, then the output qubit.
pub fn build_circuit(config: &SudokuConfig) -> AlgoResult<Circuit> {
    config.validate()?;
    let oracle = constraint_oracle(&config.clauses, NUM_VARS)?;
    let diffuser = diffuser(NUM_VARS)?;

    let mut circuit = Circuit::new("sudoku");
    let vars = circuit.add_qreg("v", NUM_VARS as u32);
    let clauses = circuit.add_qreg("c", config.clauses.len() as u32);
    let output = circuit.add_qreg("out", 1).qubit(0)?;
    let cbits = circuit.add_creg("cbits", NUM_VARS as u32);

    // Output qubit to |−⟩.
    circuit.x(output)?;
    circuit.h(output)?;
    for &v in vars.qubits() {
        circuit.h(v)?;
    }
    circuit.barrier_all()?;

    let all: Vec<_> = vars
        .qubits()
        .iter()
        .chain(clauses.qubits())
        .copied()
        .chain(std::iter::once(output))
        .collect();
    for _ in 0..config.iterations {
        circuit.append(&oracle, all.iter().copied())?;
        circuit.barrier_all()?;
        circuit.append(&diffuser, vars.qubits().iter().copied())?;
    }

    for (i, &v) in vars.qubits().iter().enumerate() {
        circuit.measure(v, cbits.clbit(i)?)?;
    }
    Ok(circuit)
}

/// Standalone circuit holding one oracle, for illustration.
fn oracle_diagram(config: &SudokuConfig) -> AlgoResult<Circuit> {
    let oracle = constraint_oracle(&config.clauses, NUM_VARS)?;
    let mut circuit = Circuit::new("sudoku_oracle");
    let qubits = circuit.add_qreg("q", oracle.num_qubits);
    for inst in &oracle.body {
        circuit.push(inst.remapped(|local| qubits.qubits()[local.index()]))?;
    }
    Ok(circuit)
}

/// Standalone circuit holding one diffuser, for illustration.
fn diffuser_diagram() -> AlgoResult<Circuit> {
    let diffuser = diffuser(NUM_VARS)?;
    let mut circuit = Circuit::with_size("sudoku_diffuser", NUM_VARS as u32, 0);
    for inst in &diffuser.body {
        circuit.push(inst.clone())?;
    }
    Ok(circuit)
}

/// Run the driver on the decomposed circuit.
#[instrument(skip(ctx))]
pub fn run(ctx: &RunContext, config: &SudokuConfig, shots: u32) -> AlgoResult<AlgorithmOutcome> {
    let circuit = build_circuit(config)?;
    let transpiled = circuit.decompose();
    let result = ctx.simulator.run(&transpiled, shots)?;

    // Amplified outcomes stand out above the uniform 1/16 frequency.
    let uniform = u64::from(shots) / (1u64 << NUM_VARS);
    let mut solutions: Vec<String> = result
        .counts
        .iter()
        .filter(|&(_, count)| count > uniform)
        .map(|(key, _)| key.to_string())
        .collect();
    solutions.sort();
    let expected = classical::sudoku_assignments(&config.clauses, NUM_VARS);
    let matches_classical = solutions == expected;
    info!(?solutions, matches_classical, "Sudoku finished");

    let group = ArtifactGroup::GroverExample;
    let artifacts = vec![
        ctx.store_circuit(group, "sudoku_oracle", &oracle_diagram(config)?)?,
        ctx.store_circuit(group, "sudoku_diffuser", &diffuser_diagram()?)?,
        ctx.store_circuit(group, "sudoku", &circuit)?,
        ctx.store_histogram(group, "sudoku", &result.counts)?,
    ];

    Ok(AlgorithmOutcome {
        algorithm: "grover_sudoku".into(),
        circuit: CircuitSummary::from_circuit(&transpiled),
        probabilities: result.counts.probabilities(),
        counts: Some(result.counts),
        artifacts,
        analysis: Analysis::Sudoku {
            solutions,
            expected,
            matches_classical,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circuit_layout() {
        let circuit = build_circuit(&SudokuConfig::default()).unwrap();
        assert_eq!(circuit.num_qubits(), 9);
        assert_eq!(circuit.num_clbits(), 4);
        let ops = circuit.count_ops();
        assert_eq!(ops["oracle"], 2);
        assert_eq!(ops["diffuser"], 2);

        let flat = circuit.decompose();
        assert!(!flat.has_composites());
        assert_eq!(flat.count_ops()["mcx"], 4);
    }

    #[test]
    fn test_rejects_zero_iterations() {
        let config = SudokuConfig {
            iterations: 0,
            ..SudokuConfig::default()
        };
        assert!(matches!(
            build_circuit(&config),
            Err(AlgoError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_illustrations_build() {
        let oracle = oracle_diagram(&SudokuConfig::default()).unwrap();
        assert_eq!(oracle.num_qubits(), 9);
        assert_eq!(oracle.num_ops(), 17);
        assert_eq!(diffuser_diagram().unwrap().num_ops(), 19);
    }
}
