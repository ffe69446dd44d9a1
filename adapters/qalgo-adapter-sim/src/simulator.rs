//! Simulator entry points.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashSet;
use std::time::Instant;
use tracing::{debug, instrument};

use qalgo_ir::{Circuit, Instruction, InstructionKind};

use crate::counts::{Counts, ExecutionResult};
use crate::error::{SimError, SimResult};
use crate::statevector::Statevector;

/// Local statevector simulator.
///
/// Circuits whose measurements all come last are evolved once and sampled
/// `shots` times. Anything else (mid-circuit measurement, reset) is evolved
/// from scratch for every shot so that collapse feeds into later gates.
#[derive(Debug, Clone)]
pub struct Simulator {
    max_qubits: u32,
    /// Seed for reproducible sampling; entropy when unset.
    seed: Option<u64>,
}

impl Simulator {
    /// Default qubit limit (a 20-qubit state is 16 MiB).
    pub const DEFAULT_MAX_QUBITS: u32 = 20;

    /// Simulator with the default qubit limit and entropy seeding.
    pub fn new() -> Self {
        Self {
            max_qubits: Self::DEFAULT_MAX_QUBITS,
            seed: None,
        }
    }

    /// Simulator refusing circuits wider than `max_qubits`.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            max_qubits,
            seed: None,
        }
    }

    /// Fix the sampling seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Qubit limit.
    pub fn max_qubits(&self) -> u32 {
        self.max_qubits
    }

    /// Sampling seed, if fixed.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn check_size(&self, circuit: &Circuit) -> SimResult<()> {
        if circuit.num_qubits() > self.max_qubits as usize {
            return Err(SimError::CircuitTooLarge {
                qubits: circuit.num_qubits(),
                max: self.max_qubits,
            });
        }
        Ok(())
    }

    /// Run a circuit for `shots` shots and collect classical counts.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    pub fn run(&self, circuit: &Circuit, shots: u32) -> SimResult<ExecutionResult> {
        self.check_size(circuit)?;
        if shots == 0 {
            return Err(SimError::InvalidShots(shots));
        }

        let start = Instant::now();
        let num_qubits = circuit.num_qubits();
        let num_clbits = circuit.num_clbits();
        let instructions = circuit.instructions();
        let mut rng = self.rng();
        let mut counts = Counts::new();

        debug!(num_qubits, num_clbits, shots, "Simulating");

        if measurements_are_terminal(instructions) {
            debug!("Terminal measurements, sampling a single evolution");
            let mut sv = Statevector::new(num_qubits);
            let mut sources: Vec<Option<usize>> = vec![None; num_clbits];
            for inst in instructions {
                match &inst.kind {
                    InstructionKind::Gate(gate) => sv.apply_gate(gate, &inst.qubits),
                    InstructionKind::Measure => {
                        for (q, c) in inst.qubits.iter().zip(&inst.clbits) {
                            sources[c.index()] = Some(q.index());
                        }
                    }
                    InstructionKind::Reset | InstructionKind::Barrier => {}
                }
            }

            let sampler = sv.sampler()?;
            for _ in 0..shots {
                let outcome = sampler.sample(&mut rng);
                let value = sources
                    .iter()
                    .enumerate()
                    .filter_map(|(c, src)| src.map(|q| ((outcome >> q) & 1) << c))
                    .fold(0usize, |acc, bit| acc | bit);
                counts.insert(clbit_key(value, num_clbits), 1);
            }
        } else {
            debug!("Mid-circuit measurement, evolving every shot");
            for shot in 0..shots {
                let mut sv = Statevector::new(num_qubits);
                let mut value = 0usize;
                for inst in instructions {
                    for (clbit, one) in sv.apply(inst, &mut rng) {
                        let mask = 1 << clbit.index();
                        if one {
                            value |= mask;
                        } else {
                            value &= !mask;
                        }
                    }
                }
                counts.insert(clbit_key(value, num_clbits), 1);

                if shot > 0 && shot % 1000 == 0 {
                    debug!(shot, "Shots evolved");
                }
            }
        }

        let elapsed = start.elapsed();
        debug!(?elapsed, distinct = counts.len(), "Simulation finished");

        Ok(ExecutionResult::new(counts, shots).with_execution_time(elapsed.as_millis() as u64))
    }

    /// Evolve a circuit and return the final state, skipping measurements.
    ///
    /// Resets still act on the state, sampled with the simulator's seed.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    pub fn statevector(&self, circuit: &Circuit) -> SimResult<Statevector> {
        self.check_size(circuit)?;
        let mut rng = self.rng();
        let mut sv = Statevector::new(circuit.num_qubits());
        for inst in circuit.instructions() {
            match &inst.kind {
                InstructionKind::Gate(gate) => sv.apply_gate(gate, &inst.qubits),
                InstructionKind::Reset => {
                    for q in &inst.qubits {
                        sv.reset(q.index(), &mut rng);
                    }
                }
                InstructionKind::Measure | InstructionKind::Barrier => {}
            }
        }
        debug!(ops = circuit.num_ops(), "Statevector ready");
        Ok(sv)
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

/// True when no gate touches a qubit after it was measured and no reset occurs.
fn measurements_are_terminal(instructions: &[Instruction]) -> bool {
    let mut measured = FxHashSet::default();
    for inst in instructions {
        match &inst.kind {
            InstructionKind::Measure => measured.extend(inst.qubits.iter().copied()),
            InstructionKind::Gate(_) => {
                if inst.qubits.iter().any(|q| measured.contains(q)) {
                    return false;
                }
            }
            InstructionKind::Reset => return false,
            InstructionKind::Barrier => {}
        }
    }
    true
}

/// Counts key for a classical register value, bit `width-1` first.
fn clbit_key(value: usize, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    format!("{value:0width$b}")
}
