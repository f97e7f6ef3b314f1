use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use clap::error::ErrorKind;

use crate::config::ConfigSource;
use crate::notification::{BackendKind, LaunchMode};

#[derive(Parser, Debug)]
#[command(name = "borg-wrapper")]
#[command(author, version, about = "Run a backup script and report the outcome as notifications", long_about = None)]
pub struct Cli {
    /// Path to a JSON config file (other arguments are ignored)
    #[arg(value_name = "CONFIG", allow_hyphen_values = true, trailing_var_arg = true)]
    pub args: Vec<String>,

    #[arg(short, long)]
    pub verbose: bool,

    /// Notification backend
    #[arg(long, value_enum, default_value = "desktop", env = "BORG_WRAPPER_NOTIFIER")]
    pub notifier: BackendKind,

    /// Open a log file and exit (used when a notification is clicked)
    #[arg(long, value_name = "PATH", hide = true)]
    pub open_log: Option<PathBuf>,
}

impl Cli {
    /// Parse like `try_parse_from`, but an argument shape clap rejects falls
    /// back to a bare invocation (default config) instead of an error.
    /// Help, version and invalid environment values are still errors.
    pub fn try_parse_lenient<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        match Self::try_parse_from(&args) {
            Ok(cli) => Ok(cli),
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                Err(e)
            }
            Err(_) => Self::try_parse_from(args.first().into_iter()),
        }
    }

    pub fn config_source(&self) -> ConfigSource {
        ConfigSource::from_args(&self.args)
    }

    pub fn launch_mode(&self) -> LaunchMode {
        LaunchMode::from_open_log(self.open_log.clone())
    }
}
