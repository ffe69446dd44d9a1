//! Wire-dependency DAG over a circuit's instructions.
//!
//! The circuit stores its instructions in program order; this view adds the
//! dependency edges needed for depth and layering. Node weights are indices
//! into the instruction list, edges are the wires two consecutive operations
//! share.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex as PetNodeIndex};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::instruction::Instruction;
use crate::qubit::{ClbitId, QubitId};

/// Node index type for the circuit DAG.
pub type NodeIndex = PetNodeIndex<u32>;

/// Identifier for a wire in the DAG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireId {
    /// A quantum wire.
    Qubit(QubitId),
    /// A classical wire.
    Clbit(ClbitId),
}

impl From<QubitId> for WireId {
    fn from(q: QubitId) -> Self {
        WireId::Qubit(q)
    }
}

impl From<ClbitId> for WireId {
    fn from(c: ClbitId) -> Self {
        WireId::Clbit(c)
    }
}

/// Dependency graph of a circuit.
#[derive(Debug, Clone)]
pub struct CircuitDag {
    /// Node weight = position in the instruction list.
    graph: DiGraph<usize, WireId, u32>,
    /// Whether each instruction counts towards depth (barriers do not).
    counted: Vec<bool>,
}

impl CircuitDag {
    /// Build the DAG for an instruction list in program order.
    pub fn build(instructions: &[Instruction]) -> Self {
        let mut graph = DiGraph::with_capacity(instructions.len(), instructions.len() * 2);
        // Wire front: last node that touched each wire.
        let mut wire_front: FxHashMap<WireId, NodeIndex> = FxHashMap::default();
        let mut counted = Vec::with_capacity(instructions.len());

        for (pos, inst) in instructions.iter().enumerate() {
            let node = graph.add_node(pos);
            let wires = inst
                .qubits
                .iter()
                .map(|&q| WireId::Qubit(q))
                .chain(inst.clbits.iter().map(|&c| WireId::Clbit(c)));
            for wire in wires {
                if let Some(prev) = wire_front.insert(wire, node) {
                    graph.add_edge(prev, node, wire);
                }
            }
            counted.push(!inst.is_barrier());
        }

        Self { graph, counted }
    }

    /// Number of operation nodes.
    pub fn num_ops(&self) -> usize {
        self.graph.node_count()
    }

    /// Layer index of each instruction (0-based, program order).
    ///
    /// Node indices follow insertion order and every edge points forward,
    /// so a single pass in index order is a valid topological sweep.
    pub fn layer_indices(&self) -> Vec<usize> {
        let mut layer = vec![0usize; self.graph.node_count()];
        for node in self.graph.node_indices() {
            let level = self
                .graph
                .neighbors_directed(node, Direction::Incoming)
                .map(|pred| layer[pred.index()] + 1)
                .max()
                .unwrap_or(0);
            layer[node.index()] = level;
        }
        layer
    }

    /// Instructions grouped by layer; each entry lists instruction indices.
    pub fn layers(&self) -> Vec<Vec<usize>> {
        let indices = self.layer_indices();
        let num_layers = indices.iter().max().map_or(0, |m| m + 1);
        let mut layers = vec![Vec::new(); num_layers];
        for (node, &level) in indices.iter().enumerate() {
            layers[level].push(self.graph[NodeIndex::new(node)]);
        }
        layers
    }

    /// Circuit depth: longest chain of non-barrier operations.
    pub fn depth(&self) -> usize {
        let mut depth = vec![0usize; self.graph.node_count()];
        let mut max_depth = 0;
        for node in self.graph.node_indices() {
            let pred_depth = self
                .graph
                .neighbors_directed(node, Direction::Incoming)
                .map(|pred| depth[pred.index()])
                .max()
                .unwrap_or(0);
            let own = pred_depth + usize::from(self.counted[node.index()]);
            depth[node.index()] = own;
            max_depth = max_depth.max(own);
        }
        max_depth
    }

    /// Instruction indices this instruction directly depends on.
    pub fn predecessors(&self, instruction: usize) -> Vec<usize> {
        let mut preds: Vec<usize> = self
            .graph
            .neighbors_directed(NodeIndex::new(instruction), Direction::Incoming)
            .map(|n| self.graph[n])
            .collect();
        preds.sort_unstable();
        preds.dedup();
        preds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::StandardGate;

    #[test]
    fn test_parallel_gates_share_layer() {
        let insts = vec![
            Instruction::gate(StandardGate::H, [QubitId(0)]),
            Instruction::gate(StandardGate::H, [QubitId(1)]),
            Instruction::gate(StandardGate::CX, [QubitId(0), QubitId(1)]),
        ];
        let dag = CircuitDag::build(&insts);
        assert_eq!(dag.layers(), vec![vec![0, 1], vec![2]]);
        assert_eq!(dag.depth(), 2);
        assert_eq!(dag.predecessors(2), vec![0, 1]);
    }

    #[test]
    fn test_barrier_not_counted_in_depth() {
        let insts = vec![
            Instruction::gate(StandardGate::H, [QubitId(0)]),
            Instruction::barrier([QubitId(0)]),
            Instruction::gate(StandardGate::X, [QubitId(0)]),
        ];
        let dag = CircuitDag::build(&insts);
        assert_eq!(dag.depth(), 2);
        assert_eq!(dag.layers().len(), 3);
    }

    #[test]
    fn test_classical_wire_orders_measurements() {
        let insts = vec![
            Instruction::measure(QubitId(0), ClbitId(0)),
            Instruction::measure(QubitId(1), ClbitId(0)),
        ];
        let dag = CircuitDag::build(&insts);
        assert_eq!(dag.layer_indices(), vec![0, 1]);
    }
}
