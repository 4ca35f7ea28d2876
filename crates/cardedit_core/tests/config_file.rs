use cardedit_core::{ConfigError, EditorConfig};
use std::io::Write;

#[test]
fn load_reads_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{"display_transform_enabled": true, "add_tag_label": "New tag..."}}"#
    )
    .unwrap();

    let config = EditorConfig::load(file.path()).unwrap();
    assert!(config.display_transform_enabled);
    assert!(!config.commit_allowed());
    assert_eq!(config.add_tag_label, "New tag...");
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = EditorConfig::load(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
