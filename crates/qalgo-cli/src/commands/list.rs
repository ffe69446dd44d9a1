//! List command implementation.

use console::style;

use qalgo_algorithms::Algorithm;

/// Execute the list command.
pub fn execute() {
    println!("{} Available demos:\n", style("qalgo").cyan().bold());
    for algorithm in Algorithm::ALL {
        let info = algorithm.info();
        println!("  {} {}", style("●").green(), style(info.slug).bold());
        println!("    {}", info.title);
        println!("    {}", style(info.summary).dim());
    }
}
