//! Run command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use console::style;
use tracing::debug;

use qalgo_adapter_sim::Simulator;
use qalgo_algorithms::{Algorithm, AlgorithmOutcome, ClassicalSolution, RunContext, RunParams};
use qalgo_render::{ArtifactSink, FsSink, MemorySink};

use super::common::{print_circuit, print_classical, print_counts};

/// Options of the run command.
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    pub algorithm: String,
    pub secret: Option<String>,
    pub shots: Option<u32>,
    pub seed: Option<u64>,
    pub output: Option<PathBuf>,
    pub classical: bool,
    pub json: bool,
}

/// Execute the run command.
pub fn execute(args: &RunArgs) -> Result<()> {
    let algorithm: Algorithm = args.algorithm.parse()?;
    if !args.json {
        println!(
            "{} Running {} on the local simulator",
            style("→").cyan().bold(),
            style(algorithm.info().title).green()
        );
    }

    let (outcome, classical) = run_demo(algorithm, args)?;

    if args.json {
        let report = serde_json::json!({
            "outcome": outcome,
            "classical": classical,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_circuit(&outcome.circuit);
    if let Some(counts) = &outcome.counts {
        print_counts(counts);
    }
    println!(
        "\n{}\n{}",
        style("Analysis:").bold(),
        serde_json::to_string_pretty(&outcome.analysis)?
    );
    if let Some(solution) = &classical {
        print_classical(solution);
    }

    match &args.output {
        Some(dir) => {
            println!("\n  Artifacts in {}:", style(dir.display()).yellow());
            for artifact in &outcome.artifacts {
                println!("    {}", artifact.path);
            }
        }
        None => println!(
            "\n  {} artifacts rendered; pass --output DIR to keep them",
            outcome.artifacts.len()
        ),
    }

    Ok(())
}

/// Run the driver and, when asked, the classical reference.
pub fn run_demo(
    algorithm: Algorithm,
    args: &RunArgs,
) -> Result<(AlgorithmOutcome, Option<ClassicalSolution>)> {
    let params = RunParams {
        secret: args.secret.as_deref().map(str::parse).transpose()?,
        shots: args.shots,
        ..RunParams::default()
    };

    let mut simulator = Simulator::new();
    if let Some(seed) = args.seed {
        simulator = simulator.with_seed(seed);
    }
    let sink: Arc<dyn ArtifactSink> = match &args.output {
        Some(dir) => Arc::new(FsSink::new(dir.clone())),
        None => Arc::new(MemorySink::new()),
    };
    debug!(algorithm = %algorithm, output = ?args.output, "Prepared run context");
    let ctx = RunContext::new(simulator, sink);

    let classical = if args.classical {
        algorithm.classical(&params)?
    } else {
        None
    };
    let outcome = algorithm.run(&ctx, params)?;
    Ok((outcome, classical))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_writes_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let args = RunArgs {
            algorithm: "bv".into(),
            secret: Some("101".into()),
            seed: Some(5),
            output: Some(dir.path().to_path_buf()),
            classical: true,
            ..RunArgs::default()
        };

        let (outcome, classical) = run_demo(Algorithm::BernsteinVazirani, &args).unwrap();
        assert_eq!(outcome.counts.unwrap().get("101"), 1);
        assert_eq!(classical.unwrap().result, ["101"]);
        assert!(
            dir.path()
                .join("quantum_circuits/bernstein_vazirani.svg")
                .exists()
        );
        assert!(dir.path().join("histograms/bernstein_vazirani.svg").exists());
    }

    #[test]
    fn test_no_classical_for_teleportation() {
        let args = RunArgs {
            algorithm: "teleportation".into(),
            seed: Some(1),
            shots: Some(32),
            classical: true,
            ..RunArgs::default()
        };
        let (outcome, classical) = run_demo(Algorithm::Teleportation, &args).unwrap();
        assert_eq!(outcome.algorithm, "teleportation");
        assert!(classical.is_none());
    }

    #[test]
    fn test_bad_secret_is_an_error() {
        let args = RunArgs {
            algorithm: "simon".into(),
            secret: Some("1x1".into()),
            ..RunArgs::default()
        };
        assert!(run_demo(Algorithm::Simon, &args).is_err());
    }
}
