//! Property tests for circuit validation and layering.

use proptest::prelude::*;
use qalgo_ir::{Circuit, IrError, QubitId};

proptest! {
    #[test]
    fn rejected_instructions_leave_circuit_unchanged(n in 1u32..8, extra in 0u32..4) {
        let mut circuit = Circuit::with_size("bounds", n, 0);
        circuit.h(QubitId(0)).unwrap();
        let before = circuit.num_ops();

        let bad = QubitId(n + extra);
        let is_not_found = matches!(circuit.x(bad), Err(IrError::QubitNotFound { .. }));
        prop_assert!(is_not_found);
        prop_assert_eq!(circuit.num_ops(), before);
    }

    #[test]
    fn depth_never_exceeds_op_count(ops in prop::collection::vec((0u32..5, 0u32..5), 0..50)) {
        let mut circuit = Circuit::with_size("chain", 5, 0);
        for (a, b) in ops {
            if a == b {
                circuit.h(QubitId(a)).unwrap();
            } else {
                circuit.cx(QubitId(a), QubitId(b)).unwrap();
            }
        }
        let layers = circuit.dag().layers();
        prop_assert!(circuit.depth() <= circuit.num_ops());
        prop_assert_eq!(layers.len(), circuit.depth());
        prop_assert_eq!(layers.iter().map(Vec::len).sum::<usize>(), circuit.num_ops());
    }

    #[test]
    fn register_lookup_is_bounded(size in 1u32..10, index in 0usize..20) {
        let mut circuit = Circuit::new("regs");
        let reg = circuit.add_qreg("v", size);
        let result = reg.qubit(index);
        prop_assert_eq!(result.is_ok(), index < size as usize);
    }
}

#[test]
fn nested_composites_flatten_fully() {
    let mut inner = Circuit::with_size("inner", 1, 0);
    inner.h(QubitId(0)).unwrap();
    let inner = inner.to_gate("inner").unwrap();

    let mut middle = Circuit::with_size("middle", 2, 0);
    middle.append(&inner, [QubitId(1)]).unwrap();
    middle.cx(QubitId(1), QubitId(0)).unwrap();
    let middle = middle.to_gate("middle").unwrap();

    let mut outer = Circuit::with_size("outer", 4, 0);
    outer.append(&middle, [QubitId(3), QubitId(2)]).unwrap();

    let flat = outer.decompose();
    assert!(!flat.has_composites());
    assert_eq!(flat.instructions()[0].name(), "h");
    assert_eq!(flat.instructions()[0].qubits, vec![QubitId(2)]);
    assert_eq!(flat.instructions()[1].qubits, vec![QubitId(2), QubitId(3)]);
}
