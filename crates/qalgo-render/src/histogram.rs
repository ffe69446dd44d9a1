//! Measurement histogram rendering.

use qalgo_adapter_sim::Counts;

use crate::svg::SvgDocument;

/// Bar and legend colours, in series order.
pub const COLORS: [&str; 2] = ["crimson", "midnightblue"];

/// Legend entries, one per series.
pub const LEGEND: [&str; 1] = ["Execution"];

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 40.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 90.0;
const PLOT_H: f64 = 320.0;
const MIN_BAR_SLOT: f64 = 36.0;

/// Render counts as a bar chart of relative frequencies.
///
/// Bars are ordered by bit pattern and labelled with their probability.
pub fn render_histogram(counts: &Counts, title: &str) -> String {
    let probabilities = counts.probabilities();
    let num_bars = probabilities.len().max(1);
    let slot = MIN_BAR_SLOT.max(640.0 / num_bars as f64).min(90.0);
    let plot_w = slot * num_bars as f64;
    let width = MARGIN_LEFT + plot_w + MARGIN_RIGHT;
    let height = MARGIN_TOP + PLOT_H + MARGIN_BOTTOM;
    let base = MARGIN_TOP + PLOT_H;

    let max_p = probabilities.values().copied().fold(0.0_f64, f64::max);
    let y_max = nice_ceiling(max_p);

    let mut doc = SvgDocument::new(width, height);
    doc.text(width / 2.0, MARGIN_TOP / 2.0, 16.0, "black", &format!(" -- {title} -- "));

    // Axes and gridlines at quarters of the scale.
    for step in 0..=4 {
        let value = y_max * f64::from(step) / 4.0;
        let y = base - PLOT_H * f64::from(step) / 4.0;
        doc.line(MARGIN_LEFT, y, MARGIN_LEFT + plot_w, y, "#e0e0e0");
        doc.text_end(MARGIN_LEFT - 8.0, y, 11.0, &format!("{value:.2}"));
    }
    doc.line(MARGIN_LEFT, MARGIN_TOP, MARGIN_LEFT, base, "black");
    doc.line(MARGIN_LEFT, base, MARGIN_LEFT + plot_w, base, "black");
    doc.text_rotated(20.0, MARGIN_TOP + PLOT_H / 2.0, 12.0, -90.0, "Probabilities");

    for (i, (key, p)) in probabilities.iter().enumerate() {
        let bar_w = slot * 0.6;
        let x = MARGIN_LEFT + slot * i as f64 + (slot - bar_w) / 2.0;
        let h = if y_max > 0.0 { PLOT_H * p / y_max } else { 0.0 };
        doc.rect(x, base - h, bar_w, h, COLORS[0], "none");
        doc.text(x + bar_w / 2.0, base - h - 9.0, 10.0, "black", &format!("{p:.3}"));
        doc.text_rotated(x + bar_w / 2.0, base + 14.0, 11.0, 70.0, key);
    }

    // Legend box in the upper right corner.
    let lx = MARGIN_LEFT + plot_w - 110.0;
    let ly = MARGIN_TOP + 6.0;
    doc.rect(lx, ly, 104.0, 24.0 * LEGEND.len() as f64, "white", COLORS[1]);
    for (i, entry) in LEGEND.iter().enumerate() {
        let y = ly + 12.0 + 24.0 * i as f64;
        doc.rect(lx + 8.0, y - 6.0, 12.0, 12.0, COLORS[i % COLORS.len()], "none");
        doc.text(lx + 60.0, y, 12.0, COLORS[1], entry);
    }

    doc.finish()
}

/// Smallest of 0.25, 0.5, 0.75, 1.0 that bounds `value` (and 0 for 0).
fn nice_ceiling(value: f64) -> f64 {
    if value <= 0.0 {
        return 0.0;
    }
    [0.25, 0.5, 0.75, 1.0]
        .into_iter()
        .find(|&step| value <= step + 1e-12)
        .unwrap_or(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_has_one_bar_per_outcome() {
        let mut counts = Counts::new();
        counts.insert("00", 500);
        counts.insert("11", 524);
        let svg = render_histogram(&counts, "Grover");
        assert_eq!(svg.matches(r#"fill="crimson" stroke="none""#).count(), 3);
        assert!(svg.contains(">00<"));
        assert!(svg.contains(">11<"));
        assert!(svg.contains(" -- Grover -- "));
        assert!(svg.contains(">Execution<"));
        assert!(svg.contains("midnightblue"));
    }

    #[test]
    fn test_empty_counts_render() {
        let svg = render_histogram(&Counts::new(), "empty");
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_nice_ceiling() {
        assert_eq!(nice_ceiling(0.0), 0.0);
        assert_eq!(nice_ceiling(0.2), 0.25);
        assert_eq!(nice_ceiling(0.47), 0.5);
        assert_eq!(nice_ceiling(1.0), 1.0);
    }
}
