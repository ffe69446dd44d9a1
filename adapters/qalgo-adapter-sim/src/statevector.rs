//! Statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use qalgo_ir::{ClbitId, Gate, GateKind, Instruction, InstructionKind, QubitId, StandardGate};

use crate::error::{SimError, SimResult};

/// Probabilities below this are treated as zero.
const EPSILON: f64 = 1e-12;

type Matrix2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const IMAG: Complex64 = Complex64::new(0.0, 1.0);

const PAULI_X: Matrix2 = [[ZERO, ONE], [ONE, ZERO]];
const PAULI_Y: Matrix2 = [[ZERO, Complex64::new(0.0, -1.0)], [IMAG, ZERO]];

fn hadamard() -> Matrix2 {
    let r = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
    [[r, r], [r, -r]]
}

fn rx(theta: f64) -> Matrix2 {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = Complex64::new(0.0, -(theta / 2.0).sin());
    [[c, s], [s, c]]
}

fn ry(theta: f64) -> Matrix2 {
    let (s, c) = (theta / 2.0).sin_cos();
    [
        [Complex64::new(c, 0.0), Complex64::new(-s, 0.0)],
        [Complex64::new(s, 0.0), Complex64::new(c, 0.0)],
    ]
}

fn rz(theta: f64) -> Matrix2 {
    [
        [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
        [ZERO, Complex64::from_polar(1.0, theta / 2.0)],
    ]
}

#[inline]
fn bit(qubit: usize) -> usize {
    1 << qubit
}

/// Cartesian coordinates of a single-qubit reduced state on the Bloch sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlochVector {
    /// ⟨X⟩
    pub x: f64,
    /// ⟨Y⟩
    pub y: f64,
    /// ⟨Z⟩
    pub z: f64,
}

impl BlochVector {
    /// Length of the vector; 1 for a pure single-qubit state.
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Dense pure state over `n` qubits.
///
/// Basis index bit `i` is the value of qubit `i`.
#[derive(Debug, Clone)]
pub struct Statevector {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
}

impl Statevector {
    /// All qubits in |0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let mut amplitudes = vec![ZERO; bit(num_qubits)];
        amplitudes[0] = ONE;
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Qubit count.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The raw amplitudes, indexed by basis state.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Apply one instruction, collapsing the state for measurements and
    /// resets. Returns the bits a measurement wrote, in operand order.
    pub fn apply<R: Rng + ?Sized>(
        &mut self,
        inst: &Instruction,
        rng: &mut R,
    ) -> Vec<(ClbitId, bool)> {
        match &inst.kind {
            InstructionKind::Gate(gate) => self.apply_gate(gate, &inst.qubits),
            InstructionKind::Measure => {
                return inst
                    .qubits
                    .iter()
                    .zip(&inst.clbits)
                    .map(|(q, &c)| (c, self.measure(q.index(), rng)))
                    .collect();
            }
            InstructionKind::Reset => {
                for q in &inst.qubits {
                    self.reset(q.index(), rng);
                }
            }
            InstructionKind::Barrier => {}
        }
        Vec::new()
    }

    /// Apply a gate to the given circuit qubits.
    ///
    /// Composite gates are expanded recursively; their local qubit `i` maps
    /// to `qubits[i]`.
    pub fn apply_gate(&mut self, gate: &Gate, qubits: &[QubitId]) {
        match &gate.kind {
            GateKind::Standard(std_gate) => {
                let targets: Vec<usize> = qubits.iter().map(|q| q.index()).collect();
                self.apply_standard_gate(std_gate, &targets);
            }
            GateKind::Composite(composite) => {
                for inner in &composite.body {
                    if let InstructionKind::Gate(inner_gate) = &inner.kind {
                        let mapped: Vec<QubitId> =
                            inner.qubits.iter().map(|q| qubits[q.index()]).collect();
                        self.apply_gate(inner_gate, &mapped);
                    }
                }
            }
        }
    }

    fn apply_standard_gate(&mut self, gate: &StandardGate, qubits: &[usize]) {
        use StandardGate::*;

        let q = qubits[0];
        match *gate {
            I => {}
            X => self.apply_matrix(0, q, &PAULI_X),
            Y => self.apply_matrix(0, q, &PAULI_Y),
            H => self.apply_matrix(0, q, &hadamard()),
            Rx(theta) => self.apply_matrix(0, q, &rx(theta)),
            Ry(theta) => self.apply_matrix(0, q, &ry(theta)),
            Rz(theta) => self.apply_matrix(0, q, &rz(theta)),
            Z => self.phase_where(bit(q), PI),
            S => self.phase_where(bit(q), PI / 2.0),
            Sdg => self.phase_where(bit(q), -PI / 2.0),
            T => self.phase_where(bit(q), PI / 4.0),
            Tdg => self.phase_where(bit(q), -PI / 4.0),
            P(theta) => self.phase_where(bit(q), theta),
            CY => self.apply_matrix(bit(q), qubits[1], &PAULI_Y),
            CZ => self.phase_where(bit(q) | bit(qubits[1]), PI),
            CP(theta) => self.phase_where(bit(q) | bit(qubits[1]), theta),
            Swap => self.apply_swap(q, qubits[1]),
            CX | CCX | MCX { .. } => {
                let last = qubits.len() - 1;
                let mask = qubits[..last].iter().fold(0, |m, &c| m | bit(c));
                self.apply_matrix(mask, qubits[last], &PAULI_X);
            }
        }
    }

    /// Apply `m` to `target` on the basis states where every bit of
    /// `controls` is set.
    fn apply_matrix(&mut self, controls: usize, target: usize, m: &Matrix2) {
        let t = bit(target);
        for i in 0..self.amplitudes.len() {
            if i & t != 0 || i & controls != controls {
                continue;
            }
            let (a, b) = (self.amplitudes[i], self.amplitudes[i | t]);
            self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
            self.amplitudes[i | t] = m[1][0] * a + m[1][1] * b;
        }
    }

    /// Multiply by `e^{i theta}` every amplitude whose index covers `mask`.
    fn phase_where(&mut self, mask: usize, theta: f64) {
        let phase = Complex64::from_polar(1.0, theta);
        self.amplitudes
            .iter_mut()
            .enumerate()
            .filter(|(i, _)| i & mask == mask)
            .for_each(|(_, amp)| *amp *= phase);
    }

    fn apply_swap(&mut self, a: usize, b: usize) {
        let (ma, mb) = (bit(a), bit(b));
        for i in 0..self.amplitudes.len() {
            if i & ma != 0 && i & mb == 0 {
                self.amplitudes.swap(i, i ^ ma ^ mb);
            }
        }
    }

    // =========================================================================
    // Non-unitary operations
    // =========================================================================

    /// Probability that `qubit` reads 1.
    pub fn probability_one(&self, qubit: usize) -> f64 {
        let mask = bit(qubit);
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum()
    }

    /// Measure one qubit, collapsing the state onto the observed value.
    pub fn measure<R: Rng + ?Sized>(&mut self, qubit: usize, rng: &mut R) -> bool {
        let p_one = self.probability_one(qubit);
        let r: f64 = rng.r#gen();
        let outcome = r < p_one;
        self.collapse(qubit, outcome, if outcome { p_one } else { 1.0 - p_one });
        outcome
    }

    fn collapse(&mut self, qubit: usize, outcome: bool, probability: f64) {
        let mask = bit(qubit);
        let norm = probability.sqrt();
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if ((i & mask) != 0) == outcome {
                if norm > 0.0 {
                    *amp /= norm;
                }
            } else {
                *amp = ZERO;
            }
        }
    }

    /// Reset a qubit to |0⟩: measure, then flip when it read 1.
    pub fn reset<R: Rng + ?Sized>(&mut self, qubit: usize, rng: &mut R) {
        if self.measure(qubit, rng) {
            self.apply_matrix(0, qubit, &PAULI_X);
        }
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Non-zero basis-state probabilities in basis order.
    ///
    /// Keys list qubits most-significant first, the same convention as
    /// measurement counts.
    pub fn probabilities(&self) -> Vec<(String, f64)> {
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(_, a)| a.norm_sqr() > EPSILON)
            .map(|(i, a)| (self.bitstring(i), a.norm_sqr()))
            .collect()
    }

    /// Binary label of basis index `index`, qubit `n-1` first.
    pub fn bitstring(&self, index: usize) -> String {
        format!("{:0width$b}", index, width = self.num_qubits)
    }

    /// Bloch vector of one qubit from its reduced density matrix.
    pub fn bloch_vector(&self, qubit: usize) -> SimResult<BlochVector> {
        if qubit >= self.num_qubits {
            return Err(SimError::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
            });
        }
        let mask = bit(qubit);
        let mut rho00 = 0.0;
        let mut rho11 = 0.0;
        let mut rho01 = ZERO;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let a = self.amplitudes[i];
                let b = self.amplitudes[i | mask];
                rho00 += a.norm_sqr();
                rho11 += b.norm_sqr();
                rho01 += a * b.conj();
            }
        }
        Ok(BlochVector {
            x: 2.0 * rho01.re,
            y: -2.0 * rho01.im,
            z: rho00 - rho11,
        })
    }

    /// Bloch vectors of every qubit, qubit 0 first.
    pub fn bloch_vectors(&self) -> Vec<BlochVector> {
        (0..self.num_qubits)
            .filter_map(|q| self.bloch_vector(q).ok())
            .collect()
    }

    /// Sampler over the current distribution, for drawing many shots.
    pub fn sampler(&self) -> SimResult<BasisSampler> {
        let weights = WeightedIndex::new(self.amplitudes.iter().map(Complex64::norm_sqr))?;
        Ok(BasisSampler { weights })
    }

    /// Sample a basis index from the current distribution.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let r: f64 = rng.r#gen();

        let mut cumulative = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.norm_sqr();
            if r < cumulative {
                return i;
            }
        }

        // Rounding can leave the cumulative sum just below 1.
        self.amplitudes
            .iter()
            .rposition(|a| a.norm_sqr() > EPSILON)
            .unwrap_or(0)
    }
}

/// Basis-state distribution of a fixed state.
///
/// Built once per state, each draw is a binary search.
#[derive(Debug, Clone)]
pub struct BasisSampler {
    weights: WeightedIndex<f64>,
}

impl BasisSampler {
    /// Draw one basis index.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.weights.sample(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const TOL: f64 = 1e-10;

    fn close(a: Complex64, re: f64, im: f64) -> bool {
        (a - Complex64::new(re, im)).norm() < TOL
    }

    fn run(sv: &mut Statevector, gate: StandardGate, qubits: &[u32]) {
        let operands: Vec<QubitId> = qubits.iter().copied().map(QubitId).collect();
        sv.apply_gate(&Gate::standard(gate), &operands);
    }

    #[test]
    fn test_starts_in_ground_state() {
        let sv = Statevector::new(3);
        assert_eq!(sv.amplitudes().len(), 8);
        assert!(close(sv.amplitudes()[0], 1.0, 0.0));
        assert!(sv.amplitudes()[1..].iter().all(|a| close(*a, 0.0, 0.0)));
    }

    #[test]
    fn test_bell_pair_amplitudes() {
        let mut sv = Statevector::new(2);
        run(&mut sv, StandardGate::H, &[0]);
        run(&mut sv, StandardGate::CX, &[0, 1]);

        let r = std::f64::consts::FRAC_1_SQRT_2;
        let amps = sv.amplitudes();
        assert!(close(amps[0], r, 0.0) && close(amps[3], r, 0.0));
        assert!(close(amps[1], 0.0, 0.0) && close(amps[2], 0.0, 0.0));
    }

    #[test]
    fn test_y_and_cy_phases() {
        let mut sv = Statevector::new(1);
        run(&mut sv, StandardGate::Y, &[0]);
        assert!(close(sv.amplitudes()[1], 0.0, 1.0));

        let mut sv = Statevector::new(2);
        run(&mut sv, StandardGate::X, &[0]);
        run(&mut sv, StandardGate::CY, &[0, 1]);
        assert!(close(sv.amplitudes()[3], 0.0, 1.0));
    }

    #[test]
    fn test_rotations_by_pi_flip() {
        for gate in [StandardGate::Rx(PI), StandardGate::Ry(PI)] {
            let mut sv = Statevector::new(1);
            run(&mut sv, gate, &[0]);
            assert!((sv.probability_one(0) - 1.0).abs() < TOL);
        }
        let mut sv = Statevector::new(1);
        run(&mut sv, StandardGate::Rz(PI), &[0]);
        assert!(close(sv.amplitudes()[0], 0.0, -1.0));
    }

    #[test]
    fn test_mcx_needs_every_control() {
        let mut sv = Statevector::new(4);
        let mcx = StandardGate::MCX { num_controls: 3 };

        run(&mut sv, StandardGate::X, &[0]);
        run(&mut sv, StandardGate::X, &[1]);
        run(&mut sv, mcx.clone(), &[0, 1, 2, 3]);
        assert_eq!(sv.probabilities(), vec![("0011".to_string(), 1.0)]);

        run(&mut sv, StandardGate::X, &[2]);
        run(&mut sv, mcx, &[0, 1, 2, 3]);
        assert_eq!(sv.probabilities()[0].0, "1111");
    }

    #[test]
    fn test_controlled_phase_only_on_ones() {
        let mut sv = Statevector::new(2);
        run(&mut sv, StandardGate::X, &[0]);
        run(&mut sv, StandardGate::CZ, &[0, 1]);
        assert!(close(sv.amplitudes()[1], 1.0, 0.0));

        run(&mut sv, StandardGate::X, &[1]);
        run(&mut sv, StandardGate::CP(PI / 2.0), &[0, 1]);
        assert!(close(sv.amplitudes()[3], 0.0, 1.0));
    }

    #[test]
    fn test_swap_moves_excitation() {
        let mut sv = Statevector::new(3);
        run(&mut sv, StandardGate::X, &[0]);
        run(&mut sv, StandardGate::Swap, &[0, 2]);
        assert_eq!(sv.probabilities(), vec![("100".to_string(), 1.0)]);
    }

    #[test]
    fn test_measurement_collapses_partner() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut sv = Statevector::new(2);
        run(&mut sv, StandardGate::H, &[0]);
        run(&mut sv, StandardGate::CX, &[0, 1]);

        let first = sv.measure(0, &mut rng);
        assert_eq!(sv.measure(1, &mut rng), first);
        assert_eq!(sv.probabilities().len(), 1);
    }

    #[test]
    fn test_apply_reports_measured_bits() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut sv = Statevector::new(2);
        let flip = Instruction::gate(StandardGate::X, [QubitId(1)]);
        assert!(sv.apply(&flip, &mut rng).is_empty());

        let read = Instruction::measure(QubitId(1), ClbitId(0));
        assert_eq!(sv.apply(&read, &mut rng), vec![(ClbitId(0), true)]);
        assert!(sv.apply(&Instruction::reset(QubitId(1)), &mut rng).is_empty());
        assert_eq!(sv.probabilities()[0].0, "00");
    }

    #[test]
    fn test_reset_from_superposition() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sv = Statevector::new(1);
        run(&mut sv, StandardGate::H, &[0]);
        sv.reset(0, &mut rng);
        let probs = sv.probabilities();
        assert_eq!(probs.len(), 1);
        assert_eq!(probs[0].0, "0");
        assert!((probs[0].1 - 1.0).abs() < TOL);
    }

    #[test]
    fn test_bloch_axes() {
        let mut sv = Statevector::new(2);
        run(&mut sv, StandardGate::X, &[1]);
        assert!((sv.bloch_vector(0).unwrap().z - 1.0).abs() < TOL);
        assert!((sv.bloch_vector(1).unwrap().z + 1.0).abs() < TOL);

        run(&mut sv, StandardGate::H, &[0]);
        let plus = sv.bloch_vector(0).unwrap();
        assert!((plus.x - 1.0).abs() < TOL && plus.z.abs() < TOL);

        run(&mut sv, StandardGate::S, &[0]);
        assert!((sv.bloch_vector(0).unwrap().y - 1.0).abs() < TOL);
        assert_eq!(sv.bloch_vectors().len(), 2);

        assert!(matches!(
            sv.bloch_vector(2),
            Err(SimError::QubitOutOfRange { qubit: 2, .. })
        ));
    }

    #[test]
    fn test_sampling_a_basis_state() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut sv = Statevector::new(1);
        run(&mut sv, StandardGate::X, &[0]);
        assert!((0..100).all(|_| sv.sample(&mut rng) == 1));
    }

    #[test]
    fn test_sampler_skips_zero_amplitudes() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut sv = Statevector::new(3);
        run(&mut sv, StandardGate::H, &[0]);
        run(&mut sv, StandardGate::X, &[2]);

        let sampler = sv.sampler().unwrap();
        let mut seen = [0u32; 8];
        for _ in 0..2000 {
            seen[sampler.sample(&mut rng)] += 1;
        }
        assert_eq!(seen[4] + seen[5], 2000);
        assert!(seen[4] > 800 && seen[5] > 800);
    }

    #[test]
    fn test_sampler_on_wide_uniform_state() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut sv = Statevector::new(16);
        for q in 0..16 {
            run(&mut sv, StandardGate::H, &[q]);
        }
        let sampler = sv.sampler().unwrap();
        let draws: Vec<usize> = (0..100_000).map(|_| sampler.sample(&mut rng)).collect();
        assert!(draws.iter().all(|&i| i < 1 << 16));
        let ones = draws.iter().filter(|&&i| i & 1 == 1).count();
        assert!((45_000..55_000).contains(&ones));
    }
}
