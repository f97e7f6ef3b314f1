//! Temporary config files and log files.

use std::fs;
use std::path::{Path, PathBuf};

use borg_wrapper::config::BackupConfig;
use serde_json::json;
use tempfile::TempDir;

pub struct BackupFixture {
    dir: TempDir,
    pub log_file: PathBuf,
}

impl BackupFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let log_file = dir.path().join("logs").join("backup.log");
        Self { dir, log_file }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self, label: &str, script: &str) -> BackupConfig {
        BackupConfig {
            label: label.to_string(),
            script: PathBuf::from(script),
            log_file: self.log_file.clone(),
            initiated_notifications: true,
            completed_notifications: true,
            failed_notifications: true,
        }
    }

    /// Fill the log with `count` numbered lines.
    pub fn seed_log(&self, count: usize) -> String {
        let content: String = (1..=count).map(|i| format!("entry {}\n", i)).collect();
        fs::create_dir_all(self.log_file.parent().unwrap()).unwrap();
        fs::write(&self.log_file, &content).unwrap();
        content
    }

    pub fn read_log(&self) -> String {
        fs::read_to_string(&self.log_file).unwrap()
    }

    pub fn write_config(&self, name: &str, config: &BackupConfig) -> PathBuf {
        let value = json!({
            "label": config.label,
            "script": config.script,
            "logFile": config.log_file,
            "initiatedNotifications": config.initiated_notifications,
            "completedNotifications": config.completed_notifications,
            "failedNotifications": config.failed_notifications,
        });
        self.write_raw(name, &value.to_string())
    }

    pub fn write_raw(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }
}
