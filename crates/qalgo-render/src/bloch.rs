//! Bloch sphere rendering.

use qalgo_adapter_sim::BlochVector;

use crate::svg::SvgDocument;

const PANEL: f64 = 220.0;
const RADIUS: f64 = 80.0;
const HEADER: f64 = 50.0;

/// Oblique projection of a Bloch vector onto the panel plane.
///
/// The y axis points right, z up, and x out of the page towards the lower left.
fn project(v: &BlochVector) -> (f64, f64) {
    let sx = v.y - 0.35 * v.x;
    let sy = v.z - 0.35 * v.x;
    (RADIUS * sx, -RADIUS * sy)
}

/// Render one sphere per qubit, qubit 0 first.
pub fn render_bloch(vectors: &[BlochVector], title: &str) -> String {
    let width = PANEL * vectors.len().max(1) as f64;
    let height = HEADER + PANEL;
    let mut doc = SvgDocument::new(width, height);
    doc.text(width / 2.0, HEADER / 2.0, 16.0, "black", title);

    for (qubit, v) in vectors.iter().enumerate() {
        let cx = PANEL * qubit as f64 + PANEL / 2.0;
        let cy = HEADER + PANEL / 2.0 - 10.0;

        doc.circle(cx, cy, RADIUS, "#f4f6fb", "#888888");
        doc.path(
            &format!(
                "M {:.1} {cy:.1} A {RADIUS:.1} {:.1} 0 0 0 {:.1} {cy:.1}",
                cx - RADIUS,
                RADIUS * 0.3,
                cx + RADIUS
            ),
            "#bbbbbb",
        );
        doc.dashed_line(cx, cy - RADIUS, cx, cy + RADIUS, "#bbbbbb");
        doc.dashed_line(cx - RADIUS, cy, cx + RADIUS, cy, "#bbbbbb");
        doc.text(cx, cy - RADIUS - 10.0, 11.0, "black", "|0⟩");
        doc.text(cx, cy + RADIUS + 10.0, 11.0, "black", "|1⟩");

        let (dx, dy) = project(v);
        doc.line(cx, cy, cx + dx, cy + dy, "crimson");
        doc.circle(cx + dx, cy + dy, 4.0, "crimson", "crimson");

        doc.text(
            cx,
            HEADER + PANEL - 14.0,
            11.0,
            "black",
            &format!("q{qubit}  ({:.2}, {:.2}, {:.2})", v.x, v.y, v.z),
        );
    }

    doc.finish()
}
