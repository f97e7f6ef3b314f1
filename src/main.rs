use std::process::ExitCode;
use std::sync::Arc;

use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use borg_wrapper::cli::{Cli, Display};
use borg_wrapper::error::WrapperError;
use borg_wrapper::notification::{
    BackendKind, ClickOutcome, DesktopBackend, LaunchMode, LogBackend, NotificationBackend,
    Notifier, SystemViewer, handle_click,
};
use borg_wrapper::runner::RunCoordinator;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::try_parse_lenient(std::env::args_os()).unwrap_or_else(|e| e.exit());

    init_logging(cli.verbose);

    let notifier = Notifier::new(create_backend(cli.notifier).await);

    if let Err(e) = notifier.request_permission().await {
        return abort_startup(&notifier, &e).await;
    }

    let mode = cli.launch_mode();
    if let LaunchMode::NotificationActivation(metadata) = &mode {
        if handle_click(metadata, &mode, &SystemViewer).await == ClickOutcome::Terminate {
            return ExitCode::SUCCESS;
        }
    }

    let source = cli.config_source();
    debug!(source = ?source, "Resolved config source");

    let config = match source.load().await {
        Ok(config) => config,
        Err(e) => return abort_startup(&notifier, &e).await,
    };

    let label = config.label.clone();
    let report = RunCoordinator::new(config, notifier).run().await;
    Display::new().print_run_report(&label, &report);

    if report.outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Report an error that prevents any backup, then exit.
async fn abort_startup(notifier: &Notifier, error: &WrapperError) -> ExitCode {
    let message = error.to_string();
    Display::new().print_error(&message);
    notifier.alert(&message).await;
    ExitCode::FAILURE
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("borg_wrapper=debug")
        } else {
            EnvFilter::new("borg_wrapper=info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

async fn create_backend(kind: BackendKind) -> Arc<dyn NotificationBackend> {
    match kind {
        BackendKind::Desktop => {
            let backend = DesktopBackend::detect().await;
            debug!(tool = ?backend.tool(), "Using desktop notifications");
            Arc::new(backend)
        }
        BackendKind::Log => Arc::new(LogBackend),
    }
}
