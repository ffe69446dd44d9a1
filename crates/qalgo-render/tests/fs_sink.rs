//! Filesystem sink tests.

use qalgo_adapter_sim::Counts;
use qalgo_ir::Circuit;
use qalgo_render::{
    Artifact, ArtifactGroup, ArtifactKind, ArtifactSink, FsSink, render_circuit, render_histogram,
};

#[test]
fn stores_under_conventional_layout() {
    let dir = tempfile::tempdir().unwrap();
    let sink = FsSink::new(dir.path());

    let circuit = Circuit::bell().unwrap();
    let artifact = Artifact::new(ArtifactKind::Circuit, "bell", render_circuit(&circuit));
    sink.store(&artifact).unwrap();

    let path = dir.path().join("quantum_circuits/bell.svg");
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, artifact.svg);
    assert_eq!(sink.load("quantum_circuits/bell.svg").unwrap(), Some(written));
}

#[test]
fn grover_example_group_nests_directories() {
    let dir = tempfile::tempdir().unwrap();
    let sink = FsSink::new(dir.path());

    let mut counts = Counts::new();
    counts.insert("0110", 480);
    counts.insert("1001", 470);
    let artifact = Artifact::new(
        ArtifactKind::Histogram,
        "sudoku",
        render_histogram(&counts, "sudoku"),
    )
    .in_group(ArtifactGroup::GroverExample);
    sink.store(&artifact).unwrap();

    assert!(
        dir.path()
            .join("examples/grover_algorithm/histograms/sudoku.svg")
            .is_file()
    );
}

#[test]
fn overwrite_replaces_previous_file() {
    let dir = tempfile::tempdir().unwrap();
    let sink = FsSink::new(dir.path());
    sink.store(&Artifact::new(ArtifactKind::Bloch, "q", "first".into()))
        .unwrap();
    sink.store(&Artifact::new(ArtifactKind::Bloch, "q", "second".into()))
        .unwrap();
    assert_eq!(sink.load("bloch/q.svg").unwrap().as_deref(), Some("second"));

    let leftovers = std::fs::read_dir(dir.path().join("bloch")).unwrap().count();
    assert_eq!(leftovers, 1);
}

#[test]
fn missing_file_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let sink = FsSink::new(dir.path());
    assert_eq!(sink.load("histograms/nothing.svg").unwrap(), None);
}

#[test]
fn unwritable_root_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, "not a directory").unwrap();
    let sink = FsSink::new(&blocker);
    assert!(
        sink.store(&Artifact::new(ArtifactKind::Circuit, "x", String::new()))
            .is_err()
    );
}
