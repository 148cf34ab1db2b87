use super::*;

#[test]
fn temp_dir_is_namespaced() {
    let dir = temp_dir();
    assert_eq!(
        dir.file_name().and_then(|f| f.to_str()),
        Some(project_identity::TEMP_DIR_NAME)
    );
    assert!(dir.starts_with(std::env::temp_dir()));
}

#[test]
fn settings_file_uses_expected_filename() {
    if let Ok(path) = settings_file() {
        assert_eq!(
            path.file_name().and_then(|f| f.to_str()),
            Some("settings.kdl")
        );
    }
}
