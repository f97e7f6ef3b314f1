use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::process::{Child, ChildStdout, Command};
use tracing::{debug, warn};

use super::activation::{LaunchMode, SystemViewer, handle_click};
use super::{APP_TITLE, Notification, NotificationBackend, NotificationMetadata};
use crate::error::{Result, WrapperError};

/// Action key notify-send prints when the notification body is clicked.
const CLICK_ACTION: &str = "default";

/// How long notify-send may take to print the notification id.
const ACCEPT_TIMEOUT: Duration = Duration::from_secs(2);

/// Flag a relaunched process receives when started by a notification click.
pub const OPEN_LOG_FLAG: &str = "--open-log";

/// Host program used to display notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopTool {
    /// macOS, supports relaunching this binary on click
    TerminalNotifier,
    /// macOS fallback, no click handling
    Osascript,
    /// freedesktop notifications, clicks reported on stdout
    NotifySend,
    /// Windows toast notifications
    PowerShell,
}

impl DesktopTool {
    pub fn candidates() -> &'static [DesktopTool] {
        if cfg!(target_os = "macos") {
            &[Self::TerminalNotifier, Self::Osascript]
        } else if cfg!(target_os = "windows") {
            &[Self::PowerShell]
        } else {
            &[Self::NotifySend]
        }
    }

    pub fn program(&self) -> &'static str {
        match self {
            Self::TerminalNotifier => "terminal-notifier",
            Self::Osascript => "osascript",
            Self::NotifySend => "notify-send",
            Self::PowerShell => "powershell",
        }
    }

    fn availability_args(&self) -> &'static [&'static str] {
        match self {
            Self::TerminalNotifier => &["-help"],
            Self::Osascript => &["-e", "return"],
            Self::NotifySend => &["--version"],
            Self::PowerShell => &["-NoProfile", "-Command", "exit 0"],
        }
    }

    async fn is_available(&self) -> bool {
        Command::new(self.program())
            .args(self.availability_args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .is_ok()
    }
}

pub struct DesktopBackend {
    tool: Option<DesktopTool>,
    relaunch_exe: Option<PathBuf>,
}

impl DesktopBackend {
    pub fn new(tool: Option<DesktopTool>, relaunch_exe: Option<PathBuf>) -> Self {
        Self { tool, relaunch_exe }
    }

    /// Pick the first notification tool the host can run.
    pub async fn detect() -> Self {
        let mut tool = None;
        for candidate in DesktopTool::candidates() {
            if candidate.is_available().await {
                tool = Some(*candidate);
                break;
            }
        }
        debug!(tool = ?tool, "Detected notification tool");

        Self::new(tool, std::env::current_exe().ok())
    }

    pub fn tool(&self) -> Option<DesktopTool> {
        self.tool
    }

    /// Shell line terminal-notifier runs on click: relaunch with `--open-log`.
    pub fn relaunch_line(exe: &std::path::Path, log_file: &std::path::Path) -> String {
        format!(
            "{} {} {}",
            shell_words::quote(&exe.to_string_lossy()),
            OPEN_LOG_FLAG,
            shell_words::quote(&log_file.to_string_lossy())
        )
    }

    fn command(&self, tool: DesktopTool, notification: &Notification) -> Command {
        let mut cmd = Command::new(tool.program());
        match tool {
            DesktopTool::TerminalNotifier => {
                cmd.args([
                    "-title",
                    notification.title.as_str(),
                    "-message",
                    notification.body.as_str(),
                    "-group",
                    notification.id.as_str(),
                ]);
                if let (Some(exe), Some(log_file)) =
                    (&self.relaunch_exe, &notification.metadata.log_file)
                {
                    cmd.arg("-execute").arg(Self::relaunch_line(exe, log_file));
                }
            }
            DesktopTool::Osascript => {
                cmd.args([
                    "-e",
                    "on run argv",
                    "-e",
                    "display notification (item 1 of argv) with title (item 2 of argv)",
                    "-e",
                    "end run",
                    notification.body.as_str(),
                    notification.title.as_str(),
                ]);
            }
            DesktopTool::NotifySend => {
                cmd.args([
                    "--app-name",
                    APP_TITLE,
                    format!("--action={}=Open log", CLICK_ACTION).as_str(),
                    "--print-id",
                    "--wait",
                    notification.title.as_str(),
                    notification.body.as_str(),
                ]);
            }
            DesktopTool::PowerShell => {
                let script = format!(
                    r#"[Windows.UI.Notifications.ToastNotificationManager, Windows.UI.Notifications, ContentType = WindowsRuntime] | Out-Null; $template = [Windows.UI.Notifications.ToastNotificationManager]::GetTemplateContent([Windows.UI.Notifications.ToastTemplateType]::ToastText02); $text = $template.GetElementsByTagName('text'); $text[0].AppendChild($template.CreateTextNode('{}')) | Out-Null; $text[1].AppendChild($template.CreateTextNode('{}')) | Out-Null; $toast = [Windows.UI.Notifications.ToastNotification]::new($template); [Windows.UI.Notifications.ToastNotificationManager]::CreateToastNotifier('{}').Show($toast)"#,
                    notification.title.replace('\'', "''"),
                    notification.body.replace('\'', "''").replace('\n', " "),
                    APP_TITLE
                );
                cmd.args(["-NoProfile", "-Command", script.as_str()]);
            }
        }
        cmd.stdin(Stdio::null());
        cmd
    }

    fn alert_command(message: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("osascript");
            cmd.args([
                "-e",
                "on run argv",
                "-e",
                "display alert (item 1 of argv)",
                "-e",
                "end run",
                message,
            ]);
            cmd
        } else if cfg!(target_os = "windows") {
            let script = format!(
                "Add-Type -AssemblyName PresentationFramework; [System.Windows.MessageBox]::Show('{}', '{}') | Out-Null",
                message.replace('\'', "''"),
                APP_TITLE
            );
            let mut cmd = Command::new("powershell");
            cmd.args(["-NoProfile", "-Command", script.as_str()]);
            cmd
        } else {
            let mut cmd = Command::new("zenity");
            cmd.args(["--error", "--title", APP_TITLE, "--text", message]);
            cmd
        }
    }

    /// Returns once notify-send printed the notification id, i.e. the
    /// notification server accepted it. The child stays alive to report a click.
    async fn deliver_watched(&self, notification: &Notification) -> Result<()> {
        let mut child = self
            .command(DesktopTool::NotifySend, notification)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| WrapperError::Notification(e.to_string()))?;

        let Some(stdout) = child.stdout.take() else {
            return Err(WrapperError::Notification(
                "notify-send stdout not captured".to_string(),
            ));
        };
        let mut lines = BufReader::new(stdout).lines();

        match tokio::time::timeout(ACCEPT_TIMEOUT, lines.next_line()).await {
            Ok(Ok(Some(id))) => debug!(id = %id.trim(), "notify-send accepted notification"),
            Ok(Ok(None)) => {
                let output = child
                    .wait_with_output()
                    .await
                    .map_err(|e| WrapperError::Notification(e.to_string()))?;
                if output.status.success() {
                    return Ok(());
                }
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(WrapperError::Notification(format!(
                    "notify-send exited with {}: {}",
                    output.status,
                    stderr.trim()
                )));
            }
            Ok(Err(e)) => return Err(WrapperError::Notification(e.to_string())),
            Err(_) => warn!("notify-send did not confirm the notification in time"),
        }

        tokio::spawn(watch_clicks(child, lines, notification.metadata.clone()));
        Ok(())
    }
}

/// Waits for the click action on a shown notification; a click opens the log
/// of the running job.
async fn watch_clicks(
    mut child: Child,
    mut lines: Lines<BufReader<ChildStdout>>,
    metadata: NotificationMetadata,
) {
    loop {
        match lines.next_line().await {
            Ok(Some(line)) if line.trim() == CLICK_ACTION => {
                handle_click(&metadata, &LaunchMode::Normal, &SystemViewer).await;
            }
            Ok(Some(line)) => debug!(line = %line.trim(), "notify-send output"),
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Failed to read notify-send output");
                break;
            }
        }
    }

    match child.wait().await {
        Ok(status) if !status.success() => warn!(status = %status, "notify-send failed"),
        Ok(_) => debug!("Notification closed"),
        Err(e) => warn!(error = %e, "Failed to wait for notify-send"),
    }
}

#[async_trait]
impl NotificationBackend for DesktopBackend {
    async fn request_permission(&self) -> Result<bool> {
        Ok(self.tool.is_some())
    }

    async fn deliver(&self, notification: &Notification) -> Result<()> {
        let Some(tool) = self.tool else {
            return Err(WrapperError::Notification(
                "no notification tool available".to_string(),
            ));
        };

        if tool == DesktopTool::NotifySend {
            return self.deliver_watched(notification).await;
        }

        let output = self
            .command(tool, notification)
            .output()
            .await
            .map_err(|e| WrapperError::Notification(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(WrapperError::Notification(format!(
                "{} exited with {}: {}",
                tool.program(),
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }

    async fn alert(&self, message: &str) -> Result<()> {
        match Self::alert_command(message).status().await {
            Ok(status) => {
                debug!(status = %status, "Alert dismissed");
                Ok(())
            }
            // No alert program on this host; the message was already printed.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(WrapperError::Notification(e.to_string())),
        }
    }
}
