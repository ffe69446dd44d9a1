//! Quantum algorithm demos from the terminal.
//!
//! ```text
//! qalgo list
//! qalgo info grover_sudoku
//! qalgo run simon --secret 101 --shots 256 --output results --classical
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{info, list, run};

/// Run and explore the quantum algorithm demos
#[derive(Parser)]
#[command(name = "qalgo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available demos
    List,

    /// Show the presentation and exercises for a demo
    Info {
        /// Demo slug (e.g. bernstein_vazirani, grover, shor)
        algorithm: String,
    },

    /// Run a demo on the local simulator
    Run {
        /// Demo slug (e.g. bernstein_vazirani, grover, shor)
        algorithm: String,

        /// Hidden string for Bernstein-Vazirani and Simon
        #[arg(long)]
        secret: Option<String>,

        /// Number of shots
        #[arg(short, long)]
        shots: Option<u32>,

        /// Seed for reproducible sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Directory for rendered SVG artifacts (kept in memory if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also print the classical reference solution
        #[arg(long)]
        classical: bool,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::List => {
            list::execute();
            Ok(())
        }
        Commands::Info { algorithm } => info::execute(&algorithm),
        Commands::Run {
            algorithm,
            secret,
            shots,
            seed,
            output,
            classical,
            json,
        } => run::execute(&run::RunArgs {
            algorithm,
            secret,
            shots,
            seed,
            output,
            classical,
            json,
        }),
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_flags() {
        let cli = Cli::try_parse_from([
            "qalgo", "run", "simon", "--secret", "101", "-s", "64", "--seed", "3", "--classical",
        ])
        .unwrap();
        match cli.command {
            Commands::Run {
                algorithm,
                secret,
                shots,
                seed,
                output,
                classical,
                json,
            } => {
                assert_eq!(algorithm, "simon");
                assert_eq!(secret.as_deref(), Some("101"));
                assert_eq!(shots, Some(64));
                assert_eq!(seed, Some(3));
                assert!(output.is_none());
                assert!(classical);
                assert!(!json);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_info_requires_algorithm() {
        assert!(Cli::try_parse_from(["qalgo", "info"]).is_err());
    }
}
