//! Oracle and reflection builders.

use qalgo_ir::{Circuit, CompositeGate, QuantumRegister, QubitId};

use crate::bits::BitString;
use crate::error::{AlgoError, AlgoResult};

/// `output ⊕= a ⊕ b` with two CNOTs. Self-inverse.
pub fn xor(circuit: &mut Circuit, a: QubitId, b: QubitId, output: QubitId) -> AlgoResult<()> {
    circuit.cx(a, output)?;
    circuit.cx(b, output)?;
    Ok(())
}

/// Clause checker over `num_vars` variables.
///
/// Local layout: variables `0..n`, one clause qubit per clause at
/// `n..n+m`, and the output qubit last. Each clause XOR is computed into its
/// clause qubit, the output flips iff every clause holds, and the XORs are
/// then uncomputed in the same order so the clause qubits return to |0⟩.
pub fn constraint_oracle(clauses: &[[usize; 2]], num_vars: usize) -> AlgoResult<CompositeGate> {
    check_clauses(clauses, num_vars)?;

    let mut body = Circuit::new("oracle");
    let vars = body.add_qreg("v", num_vars as u32);
    let clause_qubits = body.add_qreg("c", clauses.len() as u32);
    let output = body.add_qreg("out", 1).qubit(0)?;

    compute_clauses(&mut body, clauses, &vars, &clause_qubits)?;
    body.mcx(clause_qubits.qubits(), output)?;
    compute_clauses(&mut body, clauses, &vars, &clause_qubits)?;

    Ok(body.to_gate("oracle")?)
}

/// Reject an empty clause list or a clause that does not name two distinct
/// variables below `num_vars`.
pub(crate) fn check_clauses(clauses: &[[usize; 2]], num_vars: usize) -> AlgoResult<()> {
    if clauses.is_empty() {
        return Err(AlgoError::InvalidParams("clause list is empty".into()));
    }
    for clause in clauses {
        if clause[0] == clause[1] || clause[0] >= num_vars || clause[1] >= num_vars {
            return Err(AlgoError::InvalidParams(format!(
                "clause {clause:?} must name two distinct variables below {num_vars}"
            )));
        }
    }
    Ok(())
}

fn compute_clauses(
    body: &mut Circuit,
    clauses: &[[usize; 2]],
    vars: &QuantumRegister,
    clause_qubits: &QuantumRegister,
) -> AlgoResult<()> {
    for (i, clause) in clauses.iter().enumerate() {
        xor(
            body,
            vars.qubit(clause[0])?,
            vars.qubit(clause[1])?,
            clause_qubits.qubit(i)?,
        )?;
    }
    Ok(())
}

/// Grover diffusion over `num_qubits` qubits: reflection about |s⟩.
pub fn diffuser(num_qubits: usize) -> AlgoResult<CompositeGate> {
    if num_qubits < 2 {
        return Err(AlgoError::InvalidConfig(format!(
            "diffuser needs at least 2 qubits, got {num_qubits}"
        )));
    }
    let n = num_qubits as u32;
    let mut body = Circuit::with_size("diffuser", n, 0);
    let qubits: Vec<QubitId> = (0..n).map(QubitId).collect();
    let last = qubits[qubits.len() - 1];

    for &q in &qubits {
        body.h(q)?;
    }
    for &q in &qubits {
        body.x(q)?;
    }
    // Multi-controlled Z as H · MCX · H on the last qubit.
    body.h(last)?;
    body.mcx(&qubits[..qubits.len() - 1], last)?;
    body.h(last)?;
    for &q in &qubits {
        body.x(q)?;
    }
    for &q in &qubits {
        body.h(q)?;
    }

    Ok(body.to_gate("diffuser")?)
}

/// Simon oracle `f(x) = f(x ⊕ b)` from `input` into `output`.
///
/// Copies the input register, then, for a non-zero secret, XORs `b` into the
/// output controlled on the lowest set bit of `b`.
pub fn simon_oracle(
    circuit: &mut Circuit,
    input: &[QubitId],
    output: &[QubitId],
    secret: &BitString,
) -> AlgoResult<()> {
    let n = secret.len();
    if input.len() != n || output.len() != n {
        return Err(AlgoError::InvalidConfig(format!(
            "Simon oracle for a {n}-bit secret needs {n}+{n} qubits, got {}+{}",
            input.len(),
            output.len()
        )));
    }

    for i in 0..n {
        circuit.cx(input[i], output[i])?;
    }

    let set = secret.set_bits();
    if let Some(&pivot) = set.first() {
        for &j in &set {
            circuit.cx(input[pivot], output[j])?;
        }
    }
    Ok(())
}
