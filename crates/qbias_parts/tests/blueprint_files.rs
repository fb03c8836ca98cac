// Installs the process-wide catalog once; keep every other test here read-only.
use std::path::PathBuf;

use qbias_parts::{
    PartsError, ResistorBlueprint, ResistorRole, TransistorBlueprint, TransistorCatalog,
};
use rstest::rstest;

#[rstest]
fn transistor_blueprints_parse(#[files("tests/blueprints/*.transistors.json")] path: PathBuf) {
    let blueprint = TransistorBlueprint::from_json_file(&path).unwrap();

    assert!(!blueprint.is_empty());
    for entry in &blueprint.entries {
        assert!(entry.current_gain > 0, "{} has zero gain", entry.model);
        assert!(entry.base_emitter_drop > 0.0);
        assert!(entry.internal_emitter_drop > 0.0);
    }
}

#[test]
fn duplicate_in_file_keeps_first() {
    let blueprint =
        TransistorBlueprint::from_json_file("tests/blueprints/small_signal.transistors.json")
            .unwrap();
    let catalog = TransistorCatalog::install(&blueprint).unwrap();

    assert_eq!(blueprint.len(), 5);
    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.lookup("2N2222").unwrap().current_gain(), 60);
    assert_eq!(catalog.lookup("2N3904").unwrap().base_emitter_drop(), 0.65);
}

#[test]
fn reference_resistors_load() {
    let blueprint =
        ResistorBlueprint::from_json_file("tests/blueprints/reference.resistors.json").unwrap();
    assert_eq!(blueprint, ResistorBlueprint::builtin());
    assert_eq!(blueprint.ohms(ResistorRole::Collector), Some(47_000.0));
}

#[test]
fn malformed_file_is_a_blueprint_error() {
    // a resistor file is not a transistor list
    let err = TransistorBlueprint::from_json_file("tests/blueprints/reference.resistors.json")
        .unwrap_err();
    assert!(matches!(err, PartsError::Blueprint(_)));
    assert!(err.to_string().contains("reference.resistors.json"));
}
