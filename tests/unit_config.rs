use sheet_sync::config::{ProtectionConfig, SyncProfile};
use sheet_sync::protect::ColumnGuard;
use std::io::Write;

#[test]
fn default_profile_covers_the_standard_layout() {
    let profile = SyncProfile::default();
    assert_eq!(profile.key_column, "Test ID");
    assert_eq!(profile.number_column, "No.");
    assert!(
        profile
            .required_target_headers
            .contains(&profile.key_column)
    );
    assert!(
        profile
            .required_target_headers
            .contains(&profile.number_column)
    );
    assert!(profile.end_empty_rows >= 1);
}

#[test]
fn profile_yaml_overrides_only_what_it_names() {
    let mut file = tempfile::NamedTempFile::new().expect("temp profile");
    write!(
        file,
        "\
target_sheet: Localized Plan
end_empty_rows: 5
filter:
  include_tag: '#PORT'
"
    )
    .expect("write profile");

    let profile = SyncProfile::load(file.path()).expect("load profile");
    assert_eq!(profile.target_sheet, "Localized Plan");
    assert_eq!(profile.end_empty_rows, 5);
    assert_eq!(profile.filter.include_tag, "#PORT");
    // Untouched knobs keep their defaults.
    assert_eq!(profile.key_column, "Test ID");
    assert_eq!(profile.source_sheet, "Test Items");
}

#[test]
fn guard_matches_substrings_and_model_codes() {
    let guard = ColumnGuard::from_config(&ProtectionConfig::default()).expect("guard");
    assert!(guard.is_protected("TestNo"));
    assert!(guard.is_protected("Auto-filled Date"));
    assert!(guard.is_protected("AB1234"));
    assert!(!guard.is_protected("Test Title"));
    assert!(!guard.is_protected("AB123"));
    assert!(!guard.is_protected("ab1234"));
}

#[test]
fn invalid_model_code_pattern_is_rejected() {
    let config = ProtectionConfig {
        substrings: vec![],
        model_code_pattern: "([unclosed".to_string(),
    };
    assert!(ColumnGuard::from_config(&config).is_err());
}
