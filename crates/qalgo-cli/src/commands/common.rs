//! Shared output helpers.

use console::style;

use qalgo_adapter_sim::Counts;
use qalgo_algorithms::{CircuitSummary, ClassicalSolution};

const MAX_ROWS: usize = 16;

/// Print the circuit shape.
pub fn print_circuit(circuit: &CircuitSummary) {
    println!(
        "  Circuit '{}': {} qubits, {} clbits, depth {}, {} ops",
        circuit.name, circuit.num_qubits, circuit.num_clbits, circuit.depth, circuit.num_ops
    );
}

/// Print sampled counts as a bar chart, most frequent first.
pub fn print_counts(counts: &Counts) {
    println!(
        "\n{} Results ({} shots):",
        style("✓").green().bold(),
        counts.total()
    );

    let sorted = counts.sorted();
    let total = counts.total().max(1) as f64;

    for (bitstring, count) in sorted.iter().take(MAX_ROWS) {
        let prob = *count as f64 / total * 100.0;
        let bar: String = "█".repeat((prob / 2.0).round() as usize);
        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > MAX_ROWS {
        println!("  ... and {} more outcomes", sorted.len() - MAX_ROWS);
    }
}

/// Print the classical reference next to the quantum run.
pub fn print_classical(solution: &ClassicalSolution) {
    println!(
        "\n{} Classical {} ({} queries):",
        style("≡").yellow().bold(),
        solution.algorithm,
        style(solution.queries).yellow()
    );
    println!("  Result: {}", style(solution.result.join(", ")).cyan());
    println!("  {}", solution.explanation);
}
