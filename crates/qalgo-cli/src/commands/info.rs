//! Info command implementation.

use anyhow::Result;
use console::style;

use qalgo_algorithms::Algorithm;

/// Execute the info command.
pub fn execute(name: &str) -> Result<()> {
    let algorithm: Algorithm = name.parse()?;
    let info = algorithm.info();

    println!("{} {}", style(info.title).cyan().bold(), style(info.slug).dim());
    println!("  {}\n", info.summary);

    println!("{}", style("Presentation").bold());
    for (i, item) in info.presentation.iter().enumerate() {
        println!("  {}. {}", i + 1, item);
    }

    println!("\n{}", style("Exercises").bold());
    for (i, item) in info.exercises.iter().enumerate() {
        println!("  {}. {}", i + 1, item);
    }

    Ok(())
}
