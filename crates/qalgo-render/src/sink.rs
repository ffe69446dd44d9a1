//! Artifact sinks: where rendered documents go.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RenderError, RenderResult};

/// What an artifact depicts; selects its directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Circuit diagram.
    Circuit,
    /// Measurement histogram.
    Histogram,
    /// Bloch sphere plot.
    Bloch,
}

impl ArtifactKind {
    /// Directory name under the output root.
    pub fn dir(self) -> &'static str {
        match self {
            ArtifactKind::Circuit => "quantum_circuits",
            ArtifactKind::Histogram => "histograms",
            ArtifactKind::Bloch => "bloch",
        }
    }
}

/// Output tree an artifact belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactGroup {
    /// Top-level algorithm results.
    #[default]
    Algorithms,
    /// The worked Grover example (Sudoku).
    GroverExample,
}

impl ArtifactGroup {
    fn prefix(self) -> &'static str {
        match self {
            ArtifactGroup::Algorithms => "",
            ArtifactGroup::GroverExample => "examples/grover_algorithm/",
        }
    }
}

/// A rendered SVG document with its logical name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// What it depicts.
    pub kind: ArtifactKind,
    /// Output tree.
    pub group: ArtifactGroup,
    /// Logical name; becomes the file stem.
    pub name: String,
    /// SVG document.
    pub svg: String,
}

impl Artifact {
    /// Create an artifact in the default group.
    pub fn new(kind: ArtifactKind, name: impl Into<String>, svg: String) -> Self {
        Self {
            kind,
            group: ArtifactGroup::Algorithms,
            name: name.into(),
            svg,
        }
    }

    /// Move the artifact into another group.
    #[must_use]
    pub fn in_group(mut self, group: ArtifactGroup) -> Self {
        self.group = group;
        self
    }

    /// Path relative to the output root, e.g. `histograms/simon.svg`.
    pub fn relative_path(&self) -> String {
        format!("{}{}/{}.svg", self.group.prefix(), self.kind.dir(), self.name)
    }

    /// Serializable reference to the stored artifact.
    pub fn reference(&self) -> ArtifactRef {
        ArtifactRef {
            kind: self.kind,
            name: self.name.clone(),
            path: self.relative_path(),
        }
    }

    fn validate(&self) -> RenderResult<()> {
        let valid = !self.name.is_empty()
            && self
                .name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if valid {
            Ok(())
        } else {
            Err(RenderError::InvalidPath(self.name.clone()))
        }
    }
}

/// Where an artifact was stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRef {
    /// What it depicts.
    pub kind: ArtifactKind,
    /// Logical name.
    pub name: String,
    /// Path relative to the output root.
    pub path: String,
}

/// Destination for rendered artifacts.
///
/// Storing an artifact replaces any previous one at the same path.
pub trait ArtifactSink: Send + Sync {
    /// Store an artifact under its relative path.
    fn store(&self, artifact: &Artifact) -> RenderResult<()>;

    /// Load a previously stored document by relative path.
    fn load(&self, path: &str) -> RenderResult<Option<String>>;
}

/// Reject lookup paths that could leave the output root.
fn check_lookup_path(path: &str) -> RenderResult<()> {
    let escapes = path.is_empty()
        || path.starts_with('/')
        || path.contains('\\')
        || path.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..");
    if escapes {
        Err(RenderError::InvalidPath(path.to_string()))
    } else {
        Ok(())
    }
}

/// Sink writing SVG files below a root directory.
///
/// Each file is written to a temporary sibling and renamed into place, so
/// readers only ever observe complete documents.
#[derive(Debug, Clone)]
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    /// Create a sink rooted at `root`; directories are created on demand.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Output root.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactSink for FsSink {
    fn store(&self, artifact: &Artifact) -> RenderResult<()> {
        artifact.validate()?;
        let path = self.root.join(artifact.relative_path());
        let dir = path
            .parent()
            .ok_or_else(|| RenderError::InvalidPath(artifact.relative_path()))?;
        std::fs::create_dir_all(dir).map_err(|e| RenderError::io(dir, e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| RenderError::io(dir, e))?;
        tmp.write_all(artifact.svg.as_bytes())
            .map_err(|e| RenderError::io(tmp.path(), e))?;
        tmp.persist(&path)
            .map_err(|e| RenderError::io(&path, e.error))?;

        debug!("Stored artifact {}", path.display());
        Ok(())
    }

    fn load(&self, path: &str) -> RenderResult<Option<String>> {
        check_lookup_path(path)?;
        let full = self.root.join(path);
        match std::fs::read_to_string(&full) {
            Ok(svg) => Ok(Some(svg)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RenderError::io(full, e)),
        }
    }
}

/// In-memory sink keyed by relative path.
#[derive(Default)]
pub struct MemorySink {
    documents: Mutex<BTreeMap<String, String>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored paths in order.
    pub fn paths(&self) -> Vec<String> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for MemorySink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySink")
            .field("documents", &self.len())
            .finish()
    }
}

impl ArtifactSink for MemorySink {
    fn store(&self, artifact: &Artifact) -> RenderResult<()> {
        artifact.validate()?;
        let path = artifact.relative_path();
        debug!("Stored artifact {} in memory", path);
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, artifact.svg.clone());
        Ok(())
    }

    fn load(&self, path: &str) -> RenderResult<Option<String>> {
        check_lookup_path(path)?;
        Ok(self
            .documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned())
    }
}
