//! Minimal SVG document builder shared by the renderers.

use std::fmt::Write as _;

/// Font used for every text element.
pub(crate) const FONT: &str = "DejaVu Sans, Helvetica, Arial, sans-serif";

/// An SVG document assembled element by element.
pub(crate) struct SvgDocument {
    width: f64,
    height: f64,
    body: String,
}

impl SvgDocument {
    pub(crate) fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    pub(crate) fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str, stroke: &str) {
        let _ = writeln!(
            self.body,
            r#"  <rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" fill="{fill}" stroke="{stroke}"/>"#
        );
    }

    pub(crate) fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str) {
        let _ = writeln!(
            self.body,
            r#"  <line x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}" stroke="{stroke}" stroke-width="1.5"/>"#
        );
    }

    pub(crate) fn dashed_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str) {
        let _ = writeln!(
            self.body,
            r#"  <line x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}" stroke="{stroke}" stroke-width="1.5" stroke-dasharray="4,3"/>"#
        );
    }

    pub(crate) fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str, stroke: &str) {
        let _ = writeln!(
            self.body,
            r#"  <circle cx="{cx:.1}" cy="{cy:.1}" r="{r:.1}" fill="{fill}" stroke="{stroke}" stroke-width="1.5"/>"#
        );
    }

    pub(crate) fn path(&mut self, d: &str, stroke: &str) {
        let _ = writeln!(
            self.body,
            r#"  <path d="{d}" fill="none" stroke="{stroke}" stroke-width="1.5"/>"#
        );
    }

    /// Centered text.
    pub(crate) fn text(&mut self, x: f64, y: f64, size: f64, fill: &str, content: &str) {
        let _ = writeln!(
            self.body,
            r#"  <text x="{x:.1}" y="{y:.1}" font-family="{FONT}" font-size="{size:.0}" fill="{fill}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
            escape(content)
        );
    }

    /// Text anchored at its end, for wire labels.
    pub(crate) fn text_end(&mut self, x: f64, y: f64, size: f64, content: &str) {
        let _ = writeln!(
            self.body,
            r#"  <text x="{x:.1}" y="{y:.1}" font-family="{FONT}" font-size="{size:.0}" fill="black" text-anchor="end" dominant-baseline="central">{}</text>"#,
            escape(content)
        );
    }

    /// Rotated, centered text.
    pub(crate) fn text_rotated(&mut self, x: f64, y: f64, size: f64, angle: f64, content: &str) {
        let _ = writeln!(
            self.body,
            r#"  <text x="{x:.1}" y="{y:.1}" font-family="{FONT}" font-size="{size:.0}" fill="black" text-anchor="middle" transform="rotate({angle:.0} {x:.1} {y:.1})">{}</text>"#,
            escape(content)
        );
    }

    pub(crate) fn finish(self) -> String {
        format!(
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8"?>"#,
                "\n",
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">"#,
                "\n",
                r#"  <rect width="100%" height="100%" fill="white"/>"#,
                "\n{body}</svg>\n"
            ),
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

/// Escape XML special characters.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_document_shell() {
        let mut doc = SvgDocument::new(100.0, 50.0);
        doc.text(10.0, 10.0, 12.0, "black", "|0>");
        let svg = doc.finish();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"viewBox="0 0 100 50""#));
        assert!(svg.contains("|0&gt;"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
