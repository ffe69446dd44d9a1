//! Rendering adapters for qalgo.
//!
//! Circuits, histograms and Bloch vectors become standalone SVG documents.
//! Drivers never touch the filesystem directly: they hand [`Artifact`]s to
//! an injected [`ArtifactSink`], either [`FsSink`] for a results directory
//! or [`MemorySink`] for tests and ephemeral servers.

mod bloch;
mod circuit;
mod error;
mod histogram;
mod sink;
mod svg;

pub use bloch::render_bloch;
pub use circuit::{column_layout, render_circuit};
pub use error::{RenderError, RenderResult};
pub use histogram::{COLORS, LEGEND, render_histogram};
pub use sink::{
    Artifact, ArtifactGroup, ArtifactKind, ArtifactRef, ArtifactSink, FsSink, MemorySink,
};
