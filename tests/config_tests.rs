mod fixtures;

use std::path::PathBuf;

use borg_wrapper::config::{BackupConfig, ConfigSource, DEFAULT_LOG_FILE, DEFAULT_SCRIPT};
use borg_wrapper::error::WrapperError;
use fixtures::project::BackupFixture;

#[test]
fn test_default_config() {
    let config = BackupConfig::default();

    assert_eq!(config.label, "default");
    assert_eq!(config.script, PathBuf::from(DEFAULT_SCRIPT));
    assert_eq!(config.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    assert!(config.initiated_notifications);
    assert!(config.completed_notifications);
    assert!(config.failed_notifications);
}

#[tokio::test]
async fn test_no_argument_loads_default() {
    let args: Vec<String> = Vec::new();
    let config = ConfigSource::from_args(&args).load().await.unwrap();
    assert_eq!(config, BackupConfig::default());
}

#[tokio::test]
async fn test_load_valid_file() {
    let fixture = BackupFixture::new();
    let expected = BackupConfig {
        label: "nightly “offsite”".to_string(),
        script: PathBuf::from("/opt/backup/run backup.sh"),
        log_file: fixture.log_file.clone(),
        initiated_notifications: false,
        completed_notifications: true,
        failed_notifications: false,
    };
    let path = fixture.write_config("nightly.json", &expected);

    let loaded = BackupConfig::load(&path).await.unwrap();
    assert_eq!(loaded, expected);
}

#[tokio::test]
async fn test_load_through_source() {
    let fixture = BackupFixture::new();
    let expected = fixture.config("daily", "/bin/true");
    let path = fixture.write_config("daily.json", &expected);

    let source = ConfigSource::from_args(&[path.to_string_lossy().into_owned()]);
    assert_eq!(source.load().await.unwrap(), expected);
}

#[tokio::test]
async fn test_load_ignores_unknown_fields() {
    let fixture = BackupFixture::new();
    let path = fixture.write_raw(
        "extra.json",
        r#"{
            "label": "daily",
            "script": "/bin/true",
            "logFile": "/tmp/x.log",
            "initiatedNotifications": true,
            "completedNotifications": true,
            "failedNotifications": true,
            "schedule": "0 3 * * *"
        }"#,
    );

    let config = BackupConfig::load(&path).await.unwrap();
    assert_eq!(config.label, "daily");
}

#[tokio::test]
async fn test_load_missing_file_fails() {
    let fixture = BackupFixture::new();
    let path = fixture.path().join("absent.json");

    let result = BackupConfig::load(&path).await;
    assert!(matches!(result, Err(WrapperError::InvalidConfig { .. })));
}

#[tokio::test]
async fn test_load_unparseable_file_fails() {
    let fixture = BackupFixture::new();
    let path = fixture.write_raw("broken.json", "{ label: daily");

    let err = BackupConfig::load(&path).await.unwrap_err();
    assert!(matches!(err, WrapperError::InvalidConfig { .. }));
}

#[tokio::test]
async fn test_load_missing_field_fails_without_defaults() {
    let fixture = BackupFixture::new();
    let path = fixture.write_raw(
        "partial.json",
        r#"{"label": "daily", "script": "/bin/true", "logFile": "/tmp/x.log"}"#,
    );

    let result = BackupConfig::load(&path).await;
    assert!(matches!(result, Err(WrapperError::InvalidConfig { .. })));
}

#[tokio::test]
async fn test_load_mistyped_field_fails() {
    let fixture = BackupFixture::new();
    let path = fixture.write_raw(
        "typed.json",
        r#"{
            "label": 7,
            "script": "/bin/true",
            "logFile": "/tmp/x.log",
            "initiatedNotifications": true,
            "completedNotifications": true,
            "failedNotifications": true
        }"#,
    );

    let result = BackupConfig::load(&path).await;
    assert!(matches!(result, Err(WrapperError::InvalidConfig { .. })));
}
