//! Circuit diagram rendering.
//!
//! One horizontal line per qubit, then one per classical bit. Operations are
//! packed into columns: an instruction takes the first column that is free
//! on every row it covers, so a controlled gate or a measurement arrow never
//! overlaps another operation drawn between its endpoints.

use qalgo_ir::{Circuit, GateKind, Instruction, InstructionKind, StandardGate};

use crate::svg::SvgDocument;

const LEFT: f64 = 70.0;
const TOP: f64 = 50.0;
const ROW_H: f64 = 50.0;
const COL_W: f64 = 60.0;
const BOX: f64 = 36.0;
const RIGHT_PAD: f64 = 30.0;

/// Column of each instruction in drawing order, and the number of columns.
pub fn column_layout(circuit: &Circuit) -> (Vec<usize>, usize) {
    let rows = circuit.num_qubits() + circuit.num_clbits();
    let mut next_free = vec![0usize; rows];
    let mut columns = Vec::with_capacity(circuit.num_ops());

    for inst in circuit.instructions() {
        let Some((lo, hi)) = row_span(circuit, inst) else {
            columns.push(0);
            continue;
        };
        let col = next_free[lo..=hi].iter().copied().max().unwrap_or(0);
        for slot in &mut next_free[lo..=hi] {
            *slot = col + 1;
        }
        columns.push(col);
    }

    let width = next_free.iter().copied().max().unwrap_or(0);
    (columns, width)
}

/// Rows covered by an instruction, measurement arrows included.
fn row_span(circuit: &Circuit, inst: &Instruction) -> Option<(usize, usize)> {
    let qubit_rows = inst.qubits.iter().map(|q| q.index());
    let clbit_rows = inst
        .clbits
        .iter()
        .map(|c| circuit.num_qubits() + c.index());
    let rows: Vec<usize> = qubit_rows.chain(clbit_rows).collect();
    let lo = rows.iter().copied().min()?;
    let hi = rows.iter().copied().max()?;
    Some((lo, hi))
}

fn row_y(row: usize) -> f64 {
    TOP + row as f64 * ROW_H
}

fn col_x(col: usize) -> f64 {
    LEFT + 20.0 + col as f64 * COL_W + COL_W / 2.0
}

fn gate_fill(name: &str) -> &'static str {
    match name {
        "h" => "#fa74a6",
        "x" | "y" | "z" | "cx" | "cy" | "ccx" | "mcx" => "#05bab6",
        "s" | "sdg" | "t" | "tdg" | "p" | "cp" | "cz" => "#bb8bff",
        "rx" | "ry" | "rz" => "#6fa4ff",
        "id" => "#dddddd",
        _ => "#a7a7a7",
    }
}

/// Render a circuit diagram as an SVG document.
pub fn render_circuit(circuit: &Circuit) -> String {
    let num_qubits = circuit.num_qubits();
    let num_rows = num_qubits + circuit.num_clbits();
    let (columns, num_columns) = column_layout(circuit);

    let width = LEFT + 40.0 + num_columns.max(1) as f64 * COL_W + RIGHT_PAD;
    let height = TOP + num_rows.max(1) as f64 * ROW_H;
    let wire_end = width - RIGHT_PAD;
    let mut doc = SvgDocument::new(width, height);

    doc.text(width / 2.0, TOP / 2.0 - 5.0, 14.0, "black", circuit.name());

    for (row, label) in circuit.qubit_labels().iter().enumerate() {
        let y = row_y(row);
        doc.text_end(LEFT, y, 13.0, label);
        doc.line(LEFT + 8.0, y, wire_end, y, "black");
    }
    for (i, label) in circuit.clbit_labels().iter().enumerate() {
        let y = row_y(num_qubits + i);
        doc.text_end(LEFT, y, 13.0, label);
        doc.line(LEFT + 8.0, y - 1.5, wire_end, y - 1.5, "gray");
        doc.line(LEFT + 8.0, y + 1.5, wire_end, y + 1.5, "gray");
    }

    for (inst, &col) in circuit.instructions().iter().zip(&columns) {
        draw_instruction(&mut doc, circuit, inst, col_x(col));
    }

    doc.finish()
}

fn draw_instruction(doc: &mut SvgDocument, circuit: &Circuit, inst: &Instruction, x: f64) {
    match &inst.kind {
        InstructionKind::Gate(gate) => match &gate.kind {
            GateKind::Standard(std_gate) if std_gate.num_controls() > 0 => {
                draw_controlled(doc, std_gate, &gate.display_label(), inst, x);
            }
            GateKind::Standard(StandardGate::Swap) => {
                let ys: Vec<f64> = inst.qubits.iter().map(|q| row_y(q.index())).collect();
                doc.line(x, ys[0], x, ys[1], "black");
                for y in ys {
                    doc.line(x - 7.0, y - 7.0, x + 7.0, y + 7.0, "black");
                    doc.line(x - 7.0, y + 7.0, x + 7.0, y - 7.0, "black");
                }
            }
            GateKind::Standard(_) => {
                let y = row_y(inst.qubits[0].index());
                gate_box(doc, x, y, y, &gate.display_label(), gate_fill(gate.name()));
            }
            GateKind::Composite(_) => {
                let rows = inst.qubits.iter().map(|q| q.index());
                let lo = rows.clone().min().unwrap_or(0);
                let hi = rows.max().unwrap_or(0);
                gate_box(doc, x, row_y(lo), row_y(hi), &gate.display_label(), "#a7a7a7");
                for (local, q) in inst.qubits.iter().enumerate() {
                    doc.text(
                        x - BOX / 2.0 + 6.0,
                        row_y(q.index()),
                        9.0,
                        "black",
                        &local.to_string(),
                    );
                }
            }
        },
        InstructionKind::Measure => {
            for (q, c) in inst.qubits.iter().zip(&inst.clbits) {
                let qy = row_y(q.index());
                let cy = row_y(circuit.num_qubits() + c.index());
                doc.line(x - 1.5, qy + BOX / 2.0, x - 1.5, cy - 6.0, "gray");
                doc.line(x + 1.5, qy + BOX / 2.0, x + 1.5, cy - 6.0, "gray");
                doc.path(
                    &format!(
                        "M {:.1} {:.1} L {x:.1} {cy:.1} L {:.1} {:.1}",
                        x - 5.0,
                        cy - 8.0,
                        x + 5.0,
                        cy - 8.0
                    ),
                    "gray",
                );
                gate_box(doc, x, qy, qy, "", "#dddddd");
                doc.path(
                    &format!(
                        "M {:.1} {:.1} A 11 11 0 0 1 {:.1} {:.1}",
                        x - 11.0,
                        qy + 6.0,
                        x + 11.0,
                        qy + 6.0
                    ),
                    "black",
                );
                doc.line(x, qy + 6.0, x + 8.0, qy - 9.0, "black");
                doc.text(x + 12.0, cy + 12.0, 9.0, "black", &c.index().to_string());
            }
        }
        InstructionKind::Reset => {
            for q in &inst.qubits {
                let y = row_y(q.index());
                gate_box(doc, x, y, y, "|0⟩", "#ffffff");
            }
        }
        InstructionKind::Barrier => {
            let rows = inst.qubits.iter().map(|q| q.index());
            if let (Some(lo), Some(hi)) = (rows.clone().min(), rows.max()) {
                let top = row_y(lo) - ROW_H / 2.0 + 4.0;
                let bottom = row_y(hi) + ROW_H / 2.0 - 4.0;
                doc.rect(x - 8.0, top, 16.0, bottom - top, "#eeeeee", "none");
                doc.dashed_line(x, top, x, bottom, "black");
            }
        }
    }
}

fn draw_controlled(
    doc: &mut SvgDocument,
    gate: &StandardGate,
    label: &str,
    inst: &Instruction,
    x: f64,
) {
    let fill = gate_fill(gate.name());
    let n = gate.num_controls() as usize;
    let ys: Vec<f64> = inst.qubits.iter().map(|q| row_y(q.index())).collect();
    let lo = ys.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    doc.line(x, lo, x, hi, fill);

    for &y in &ys[..n] {
        doc.circle(x, y, 5.0, fill, fill);
    }
    let target = ys[n];
    match gate {
        StandardGate::CX | StandardGate::CCX | StandardGate::MCX { .. } => {
            doc.circle(x, target, 11.0, fill, fill);
            doc.line(x - 7.0, target, x + 7.0, target, "white");
            doc.line(x, target - 7.0, x, target + 7.0, "white");
        }
        StandardGate::CZ => doc.circle(x, target, 5.0, fill, fill),
        StandardGate::CP(theta) => {
            doc.circle(x, target, 5.0, fill, fill);
            doc.text(x + 20.0, (lo + hi) / 2.0, 10.0, "black", &format!("P({theta:.2})"));
        }
        _ => {
            let short = label.trim_start_matches('C');
            gate_box(doc, x, target, target, short, fill);
        }
    }
}

fn gate_box(doc: &mut SvgDocument, x: f64, y_top: f64, y_bottom: f64, label: &str, fill: &str) {
    let top = y_top - BOX / 2.0;
    let height = y_bottom - y_top + BOX;
    let width = if label.chars().count() > 3 {
        BOX + 6.0 * (label.chars().count() - 3) as f64
    } else {
        BOX
    };
    doc.rect(x - width / 2.0, top, width, height, fill, "black");
    if !label.is_empty() {
        let size = if label.chars().count() > 4 { 10.0 } else { 13.0 };
        doc.text(x, top + height / 2.0, size, "black", label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qalgo_ir::{ClbitId, QubitId};

    #[test]
    fn test_parallel_gates_share_a_column() {
        let mut circuit = Circuit::with_size("par", 2, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.h(QubitId(1)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        let (columns, width) = column_layout(&circuit);
        assert_eq!(columns, vec![0, 0, 1]);
        assert_eq!(width, 2);
    }

    #[test]
    fn test_controlled_span_blocks_middle_wire() {
        let mut circuit = Circuit::with_size("span", 3, 0);
        circuit.cx(QubitId(0), QubitId(2)).unwrap();
        circuit.h(QubitId(1)).unwrap();
        let (columns, _) = column_layout(&circuit);
        assert_eq!(columns, vec![0, 1]);
    }

    #[test]
    fn test_measurement_arrow_blocks_lower_qubits() {
        let mut circuit = Circuit::with_size("meas", 2, 2);
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        circuit.h(QubitId(1)).unwrap();
        let (columns, _) = column_layout(&circuit);
        assert_eq!(columns, vec![0, 1]);
    }

    #[test]
    fn test_render_contains_wires_and_labels() {
        let circuit = Circuit::bell().unwrap();
        let svg = render_circuit(&circuit);
        assert!(svg.contains("<svg"));
        assert!(svg.contains(">q[0]<"));
        assert!(svg.contains(">c[1]<"));
        assert!(svg.contains(">H<"));
        assert!(svg.contains(">bell<"));
    }

    #[test]
    fn test_composite_label_drawn() {
        let mut body = Circuit::with_size("oracle", 2, 0);
        body.cz(QubitId(0), QubitId(1)).unwrap();
        let oracle = body.to_gate("oracle").unwrap();
        let mut circuit = Circuit::with_size("grover", 3, 0);
        circuit.append(&oracle, [QubitId(0), QubitId(2)]).unwrap();
        let svg = render_circuit(&circuit);
        assert!(svg.contains(">oracle<"));
    }
}
