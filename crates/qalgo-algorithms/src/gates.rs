//! Gate helpers and the circuit factory.
//!
//! Helpers address qubits by register position and return the circuit for
//! chaining. Out-of-range or repeated indices surface as IR errors.

use qalgo_ir::{Circuit, QuantumRegister};

use crate::error::{AlgoError, AlgoResult};

/// Allocate a circuit with `num_qubits` qubits (register `q`) and
/// `num_bits` classical bits (register `c`).
pub fn create_circuit(
    name: &str,
    num_qubits: u32,
    num_bits: u32,
) -> AlgoResult<(Circuit, QuantumRegister)> {
    if num_qubits == 0 || num_bits == 0 {
        return Err(AlgoError::InvalidConfig(format!(
            "circuit '{name}' needs at least one qubit and one bit, got {num_qubits}/{num_bits}"
        )));
    }
    let mut circuit = Circuit::new(name);
    let register = circuit.add_qreg("q", num_qubits);
    circuit.add_creg("c", num_bits);
    Ok((circuit, register))
}

/// Hadamard on each listed register position.
pub fn add_hadamard<'a>(
    circuit: &'a mut Circuit,
    register: &QuantumRegister,
    indices: &[usize],
) -> AlgoResult<&'a mut Circuit> {
    for &i in indices {
        circuit.h(register.qubit(i)?)?;
    }
    Ok(circuit)
}

/// Pauli-X on one register position.
pub fn add_x<'a>(
    circuit: &'a mut Circuit,
    register: &QuantumRegister,
    index: usize,
) -> AlgoResult<&'a mut Circuit> {
    circuit.x(register.qubit(index)?)?;
    Ok(circuit)
}

/// Controlled-Z on `[control, target]`.
pub fn add_z<'a>(
    circuit: &'a mut Circuit,
    register: &QuantumRegister,
    pair: [usize; 2],
) -> AlgoResult<&'a mut Circuit> {
    circuit.cz(register.qubit(pair[0])?, register.qubit(pair[1])?)?;
    Ok(circuit)
}

/// Controlled-NOT on `[control, target]`.
pub fn add_cx<'a>(
    circuit: &'a mut Circuit,
    register: &QuantumRegister,
    pair: [usize; 2],
) -> AlgoResult<&'a mut Circuit> {
    circuit.cx(register.qubit(pair[0])?, register.qubit(pair[1])?)?;
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qalgo_ir::IrError;

    #[test]
    fn test_factory_sizes() {
        let (circuit, register) = create_circuit("t", 3, 2).unwrap();
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(register.len(), 3);
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_factory_rejects_zero() {
        assert!(matches!(
            create_circuit("t", 0, 1),
            Err(AlgoError::InvalidConfig(_))
        ));
        assert!(create_circuit("t", 1, 0).is_err());
    }

    #[test]
    fn test_helpers_chain() {
        let (mut circuit, q) = create_circuit("t", 3, 3).unwrap();
        add_hadamard(&mut circuit, &q, &[0, 1, 2]).unwrap();
        add_cx(add_x(&mut circuit, &q, 2).unwrap(), &q, [0, 2]).unwrap();
        add_z(&mut circuit, &q, [1, 2]).unwrap();
        let names: Vec<_> = circuit.instructions().iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["h", "h", "h", "x", "cx", "cz"]);
    }

    #[test]
    fn test_pair_helpers_reject_bad_indices() {
        let (mut circuit, q) = create_circuit("t", 2, 2).unwrap();
        assert!(matches!(
            add_cx(&mut circuit, &q, [1, 1]),
            Err(AlgoError::Ir(IrError::DuplicateQubit { .. }))
        ));
        assert!(matches!(
            add_z(&mut circuit, &q, [0, 5]),
            Err(AlgoError::Ir(IrError::IndexOutOfRange { index: 5, .. }))
        ));
        assert_eq!(circuit.num_ops(), 0);
    }
}
