//! The closed set of demos and their dispatch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::bits::BitString;
use crate::classical::{self, ClassicalSolution};
use crate::drivers::bernstein_vazirani::{self, BernsteinVaziraniConfig};
use crate::drivers::fourier::{self, FourierConfig};
use crate::drivers::simon::{self, SimonConfig};
use crate::drivers::sudoku::{self, NUM_VARS, SudokuConfig};
use crate::drivers::teleportation::{self, Preparation, TeleportationConfig};
use crate::drivers::{AlgorithmOutcome, RunContext, grover};
use crate::error::{AlgoError, AlgoResult};

/// Upper bound on shots accepted from callers.
pub const MAX_SHOTS: u32 = 100_000;

/// One of the demos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Hidden string from one query.
    BernsteinVazirani,
    /// Two-qubit search.
    Grover,
    /// Grover over a 2×2 binary Sudoku.
    GroverSudoku,
    /// Teleportation of one qubit.
    Teleportation,
    /// Hidden period of a two-to-one function.
    Simon,
    /// Fourier transform, Shor's building block.
    #[serde(rename = "shor", alias = "fourier")]
    Fourier,
}

impl Algorithm {
    /// Every demo, in presentation order.
    pub const ALL: [Algorithm; 6] = [
        Algorithm::BernsteinVazirani,
        Algorithm::Grover,
        Algorithm::GroverSudoku,
        Algorithm::Teleportation,
        Algorithm::Simon,
        Algorithm::Fourier,
    ];

    /// URL slug.
    pub fn slug(self) -> &'static str {
        match self {
            Algorithm::BernsteinVazirani => "bernstein_vazirani",
            Algorithm::Grover => "grover",
            Algorithm::GroverSudoku => "grover_sudoku",
            Algorithm::Teleportation => "teleportation",
            Algorithm::Simon => "simon",
            Algorithm::Fourier => "shor",
        }
    }

    /// Static description, presentation notes and exercises.
    pub fn info(self) -> AlgorithmInfo {
        let (title, summary, presentation, exercises): (_, _, [&str; 3], [&str; 2]) = match self {
            Algorithm::BernsteinVazirani => (
                "Bernstein-Vazirani",
                "Recover a hidden bit string s from f(x) = s·x mod 2 with a single query.",
                [
                    "Inputs in uniform superposition, ancilla in |−⟩.",
                    "Each CNOT from a secret bit kicks a phase back onto its input.",
                    "A final Hadamard layer turns the phases into the string s.",
                ],
                [
                    "Change the secret and predict the measured string.",
                    "How many classical queries recover a 6-bit secret?",
                ],
            ),
            Algorithm::Grover => (
                "Grover search",
                "Find the marked item among four with one oracle call.",
                [
                    "The CZ oracle flips the phase of |11⟩.",
                    "The diffuser reflects about the mean amplitude.",
                    "For one item in four, a single iteration is exact.",
                ],
                [
                    "Mark |01⟩ instead: which gates change?",
                    "What happens after a second iteration?",
                ],
            ),
            Algorithm::GroverSudoku => (
                "Grover Sudoku",
                "Solve a 2×2 binary Sudoku with a clause-checking oracle.",
                [
                    "Each clause requires two cells to differ and is checked with two CNOTs.",
                    "The output qubit flips only when every clause holds.",
                    "Two rounds of oracle and diffuser amplify both solutions.",
                ],
                [
                    "Drop one clause and count the amplified outcomes.",
                    "Why is uncomputing the clause qubits necessary?",
                ],
            ),
            Algorithm::Teleportation => (
                "Quantum teleportation",
                "Move the state of q0 onto q2 using a Bell pair and two classical bits.",
                [
                    "q1 and q2 share a Bell pair.",
                    "A Bell-basis measurement of q0 and q1 yields two bits.",
                    "Controlled X and Z corrections restore the state on q2.",
                ],
                [
                    "Teleport Ry(π/3)|0⟩ and compare the q2 marginal with sin²(π/6).",
                    "Remove the corrections: what does q2 show?",
                ],
            ),
            Algorithm::Simon => (
                "Simon's algorithm",
                "Find the hidden period b of a two-to-one function.",
                [
                    "The oracle copies x and folds it by b on the output register.",
                    "Every measured z satisfies b·z = 0 mod 2.",
                    "About n independent equations determine b.",
                ],
                [
                    "Solve the equations for b = 110 by hand.",
                    "How many classical queries find a collision in the worst case?",
                ],
            ),
            Algorithm::Fourier => (
                "Quantum Fourier transform",
                "Transform a basis state and watch the phases spread over the Bloch spheres.",
                [
                    "A basis state sits on the poles of every Bloch sphere.",
                    "The QFT moves every qubit onto the equator.",
                    "The phase of qubit k encodes the input value at resolution 2^-k.",
                ],
                [
                    "Transform |000⟩ and |111⟩ and compare the phases.",
                    "Where does period finding in Shor's algorithm use the QFT?",
                ],
            ),
        };
        AlgorithmInfo {
            slug: self.slug(),
            title,
            summary,
            presentation: presentation.to_vec(),
            exercises: exercises.to_vec(),
        }
    }

    /// Run the driver with caller overrides applied to its defaults.
    pub fn run(self, ctx: &RunContext, params: RunParams) -> AlgoResult<AlgorithmOutcome> {
        let shots = params.shots_or(ctx.default_shots)?;
        info!(algorithm = self.slug(), shots, "Running algorithm");
        match self {
            Algorithm::BernsteinVazirani => {
                let mut config = BernsteinVaziraniConfig::default();
                if let Some(secret) = params.secret {
                    config.secret = secret;
                }
                if let Some(shots) = params.shots {
                    config.shots = shots;
                }
                bernstein_vazirani::run(ctx, &config)
            }
            Algorithm::Grover => grover::run(ctx, shots),
            Algorithm::GroverSudoku => {
                let mut config = SudokuConfig::default();
                if let Some(clauses) = params.clauses {
                    config.clauses = clauses;
                }
                if let Some(iterations) = params.iterations {
                    config.iterations = iterations;
                }
                sudoku::run(ctx, &config, shots)
            }
            Algorithm::Teleportation => {
                let config = TeleportationConfig {
                    prepare: params.prepare.unwrap_or_default(),
                };
                teleportation::run(ctx, &config, shots)
            }
            Algorithm::Simon => {
                let config = params
                    .secret
                    .map(|secret| SimonConfig { secret })
                    .unwrap_or_default();
                simon::run(ctx, &config, shots)
            }
            Algorithm::Fourier => {
                let config = params
                    .basis_state
                    .map(|basis_state| FourierConfig { basis_state })
                    .unwrap_or_default();
                fourier::run(ctx, &config)
            }
        }
    }

    /// Classical reference, when the demo has one.
    pub fn classical(self, params: &RunParams) -> AlgoResult<Option<ClassicalSolution>> {
        let solution = match self {
            Algorithm::BernsteinVazirani => {
                let secret = params
                    .secret
                    .clone()
                    .unwrap_or_else(|| BernsteinVaziraniConfig::default().secret);
                Some(classical::bernstein_vazirani(&secret))
            }
            Algorithm::Grover => Some(classical::grover()),
            Algorithm::GroverSudoku => {
                let clauses = params
                    .clauses
                    .clone()
                    .unwrap_or_else(|| SudokuConfig::default().clauses);
                Some(classical::sudoku(&clauses, NUM_VARS)?)
            }
            Algorithm::Simon => {
                let secret = params
                    .secret
                    .clone()
                    .unwrap_or_else(|| SimonConfig::default().secret);
                Some(classical::simon(&secret))
            }
            Algorithm::Teleportation | Algorithm::Fourier => None,
        };
        Ok(solution)
    }
}

impl FromStr for Algorithm {
    type Err = AlgoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bernstein_vazirani" | "bernstein-vazirani" | "bv" => Ok(Algorithm::BernsteinVazirani),
            "grover" => Ok(Algorithm::Grover),
            "grover_sudoku" | "grover-sudoku" | "sudoku" => Ok(Algorithm::GroverSudoku),
            "teleportation" => Ok(Algorithm::Teleportation),
            "simon" => Ok(Algorithm::Simon),
            "shor" | "fourier" | "qft" => Ok(Algorithm::Fourier),
            _ => Err(AlgoError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Static description of a demo.
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmInfo {
    /// URL slug.
    pub slug: &'static str,
    /// Display title.
    pub title: &'static str,
    /// One-sentence summary.
    pub summary: &'static str,
    /// Talking points for the presentation action.
    pub presentation: Vec<&'static str>,
    /// Questions for the exercises action.
    pub exercises: Vec<&'static str>,
}

/// Caller overrides; fields a driver does not use are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunParams {
    /// Secret for Bernstein-Vazirani and Simon.
    pub secret: Option<BitString>,
    /// Shot count for sampled drivers.
    pub shots: Option<u32>,
    /// Sudoku inequality clauses.
    pub clauses: Option<Vec<[usize; 2]>>,
    /// Sudoku oracle and diffuser rounds.
    pub iterations: Option<u32>,
    /// State to teleport.
    pub prepare: Option<Preparation>,
    /// Input of the Fourier transform.
    pub basis_state: Option<BitString>,
}

impl RunParams {
    fn shots_or(&self, default: u32) -> AlgoResult<u32> {
        match self.shots {
            None => Ok(default),
            Some(shots) if shots == 0 || shots > MAX_SHOTS => Err(AlgoError::InvalidParams(
                format!("shots must be between 1 and {MAX_SHOTS}, got {shots}"),
            )),
            Some(shots) => Ok(shots),
        }
    }
}
