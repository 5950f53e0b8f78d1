use smangler_cli::CliError;
use smangler_cli::validation::{
    ValidationContext, validate_context, validate_copy, validate_delete, validate_directory,
    validate_distinct, validate_pattern,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_validate_directory_exists() {
    let temp_dir = TempDir::new().unwrap();
    let result = validate_directory(temp_dir.path().to_str().unwrap());
    assert!(result.is_ok());
}

#[test]
fn test_validate_directory_not_exists() {
    let result = validate_directory("nonexistent_dir");
    assert!(matches!(result, Err(CliError::MissingDirectory(_))));
}

#[test]
fn test_validate_directory_rejects_file() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("strings.xml");
    fs::write(&file, "<resources/>").unwrap();
    let result = validate_directory(file.to_str().unwrap());
    assert!(matches!(result, Err(CliError::MissingDirectory(_))));
}

#[test]
fn test_validate_distinct_resolves_paths() {
    let temp_dir = TempDir::new().unwrap();
    let sub = temp_dir.path().join("values");
    fs::create_dir_all(&sub).unwrap();

    assert!(validate_distinct(temp_dir.path(), &sub).is_ok());
    assert!(matches!(
        validate_distinct(temp_dir.path(), &sub.join("..")),
        Err(CliError::SameDirectory)
    ));
}

#[test]
fn test_validate_pattern() {
    assert!(validate_pattern(None, false).unwrap().matches_all());
    assert!(validate_pattern(Some("^a"), true).unwrap().matches("a1"));
    assert!(matches!(
        validate_pattern(None, true),
        Err(CliError::InvalidPattern(_))
    ));
    assert!(matches!(
        validate_pattern(Some(""), true),
        Err(CliError::InvalidPattern(_))
    ));
    let error = validate_pattern(Some("[a-"), false).unwrap_err();
    assert_eq!(error.exit_code(), -4);
}

#[test]
fn test_validate_context_checks_directories_before_pattern() {
    let context = ValidationContext::new()
        .with_directory("nonexistent_dir")
        .with_pattern(Some("(".to_string()));
    assert!(matches!(
        validate_context(&context),
        Err(CliError::MissingDirectory(_))
    ));
}

#[test]
fn test_validate_copy() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    let src_str = src.path().to_str().unwrap();
    let dst_str = dst.path().to_str().unwrap();

    let op = validate_copy(src_str, dst_str, Some("^app_".to_string())).unwrap();
    assert_eq!(op.source(), src.path());
    assert_eq!(op.destination(), dst.path());
    assert_eq!(op.matcher().pattern(), Some("^app_"));

    assert!(matches!(
        validate_copy(src_str, src_str, None),
        Err(CliError::SameDirectory)
    ));
}

#[test]
fn test_validate_delete() {
    let dir = TempDir::new().unwrap();
    let dir_str = dir.path().to_str().unwrap();

    let op = validate_delete(dir_str, "^legacy_".to_string()).unwrap();
    assert_eq!(op.root(), dir.path());

    let error = validate_delete(dir_str, String::new()).unwrap_err();
    assert_eq!(error.exit_code(), -4);
}
