use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::config::BackupConfig;
use crate::error::{Result, WrapperError};

/// Shell used to run the pipeline; needs `pipefail`.
pub const SHELL: &str = "bash";

/// Appended to the inherited `PATH` so Homebrew tools resolve.
pub const EXTRA_PATH_DIRS: &[&str] = &["/opt/homebrew/bin", "/usr/local/bin"];

/// Inherited search path with `EXTRA_PATH_DIRS` appended once.
pub fn search_path(inherited: Option<OsString>) -> OsString {
    let mut dirs: Vec<PathBuf> = inherited
        .as_deref()
        .map(|p| std::env::split_paths(p).collect())
        .unwrap_or_default();

    for extra in EXTRA_PATH_DIRS {
        let extra = Path::new(extra);
        if !dirs.iter().any(|d| d == extra) {
            dirs.push(extra.to_path_buf());
        }
    }

    // Entries come from split_paths or constants, none contain the separator.
    std::env::join_paths(&dirs).unwrap_or_else(|_| OsString::from(EXTRA_PATH_DIRS.join(":")))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the shell was killed by a signal.
    pub code: Option<i32>,
    /// Combined stdout/stderr of the script, as teed into the log.
    pub output: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// `<script> 2>&1 | tee -a <log>` under `pipefail`, with quoted paths.
#[derive(Debug, Clone)]
pub struct BackupCommand {
    script: PathBuf,
    log_file: PathBuf,
    search_path: OsString,
}

impl BackupCommand {
    pub fn new(config: &BackupConfig) -> Self {
        Self {
            script: config.script.clone(),
            log_file: config.log_file.clone(),
            search_path: search_path(std::env::var_os("PATH")),
        }
    }

    pub fn shell_line(&self) -> String {
        format!(
            "set -o pipefail; {} 2>&1 | tee -a {}",
            shell_words::quote(&self.script.to_string_lossy()),
            shell_words::quote(&self.log_file.to_string_lossy())
        )
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(SHELL);
        cmd.arg("-c")
            .arg(self.shell_line())
            .env("PATH", &self.search_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    /// Run to completion. Errors only when the shell cannot be started.
    pub async fn execute(&self) -> Result<CommandOutput> {
        debug!(line = %self.shell_line(), "Running backup command");

        let output = self
            .command()
            .output()
            .await
            .map_err(|e| WrapperError::CommandSpawn(e.to_string()))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            debug!(stderr = %stderr.trim(), "Backup shell wrote to stderr");
        }

        Ok(CommandOutput {
            code: output.status.code(),
            output: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}
