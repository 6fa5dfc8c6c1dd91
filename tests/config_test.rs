// ==========================================
// 配置文件测试
// ==========================================

use manobra_report::config::{ConfigError, ConfigManager};
use manobra_report::engine::StatusClassifier;
use manobra_report::domain::types::Category;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_file_uses_defaults_and_save_writes_it() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conf").join("manobra.json");

    let manager = ConfigManager::load(&path).unwrap();
    assert!(manager.config().has_headers);
    assert_eq!(manager.config().locale, "pt-BR");
    assert!(!path.exists());

    manager.save().unwrap();
    let reloaded = ConfigManager::load(&path).unwrap();
    assert_eq!(reloaded.config(), manager.config());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("manobra.json");
    fs::write(
        &path,
        r#"{ "has_headers": false, "keywords": { "parked": ["PATIO"] } }"#,
    )
    .unwrap();

    let manager = ConfigManager::load(&path).unwrap();
    assert!(!manager.config().has_headers);
    assert_eq!(manager.config().employees_file, "funcionarios.csv");
    assert!(manager.config().third_party_keywords.contains(&"teclight".to_string()));

    let classifier = StatusClassifier::new(&manager.config().keywords);
    assert_eq!(classifier.classify("no patio"), Some(Category::Parked));
    assert_eq!(classifier.classify("SAIDA"), Some(Category::InDispatch));
    assert_eq!(classifier.classify("PARQUEADO"), None);
}

#[test]
fn test_malformed_file_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("manobra.json");
    fs::write(&path, "{ isto não é json").unwrap();

    assert!(matches!(
        ConfigManager::load(&path),
        Err(ConfigError::Parse { .. })
    ));
}
