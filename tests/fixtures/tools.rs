//! Stand-in host programs placed first on `PATH`.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub struct FakeTools {
    dir: TempDir,
}

impl FakeTools {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write an executable `sh` script named `name`.
    pub fn install(&self, name: &str, body: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }
        path
    }

    /// This directory followed by the inherited `PATH`.
    pub fn search_path(&self) -> OsString {
        let mut dirs = vec![self.dir.path().to_path_buf()];
        if let Some(inherited) = std::env::var_os("PATH") {
            dirs.extend(std::env::split_paths(&inherited));
        }
        std::env::join_paths(dirs).unwrap()
    }

    /// A file inside this directory the fake programs can append to.
    pub fn record_file(&self) -> PathBuf {
        self.dir.path().join("record.txt")
    }

    pub fn read_record(&self) -> String {
        fs::read_to_string(self.record_file()).unwrap_or_default()
    }
}
