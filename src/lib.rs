//! activeshot — capture the active macOS window.
//!
//! This is the shell that wires the domains together:
//! - Argument parsing (cli/)
//! - Foreground window lookup (window/)
//! - `screencapture` invocation (capture/)
//! - Downsampling and PNG encoding (imaging/)
//! - File or clipboard output (delivery/)
//!
//! Each run walks one linear path: parse, resolve the destination, find
//! the window, capture, post-process, deliver. Any failure ends the run
//! with `Error: <description>` and exit code 1. A capture the user
//! cancelled ends it silently with exit code 0.

pub mod capture;
pub mod cli;
pub mod config;
pub mod delivery;
pub mod errors;
pub mod imaging;
pub mod window;

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use capture::{CaptureOutcome, CaptureTarget};
use cli::{Options, Parsed};
use config::RuntimeConfig;
use delivery::Destination;
use errors::AppError;
use window::{SystemWindows, WindowSystem};

/// How a run ended, short of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Help(String),
    Saved { path: PathBuf, quiet: bool },
    Copied { quiet: bool },
    /// The capture tool exited cleanly without output.
    Cancelled,
}

impl RunOutcome {
    /// Text for standard output, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            RunOutcome::Help(text) => Some(text.trim_end().to_string()),
            RunOutcome::Saved { path, quiet: true } => Some(path.display().to_string()),
            RunOutcome::Saved { path, quiet: false } => {
                Some(format!("Screenshot saved to {}", path.display()))
            }
            RunOutcome::Copied { quiet: false } => Some("Screenshot copied to clipboard".to_string()),
            RunOutcome::Copied { quiet: true } | RunOutcome::Cancelled => None,
        }
    }
}

/// Entry point, called by `main` with the full `argv`.
pub fn run<I, T>(argv: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();

    let args: Vec<OsString> = argv.into_iter().skip(1).map(Into::into).collect();

    match execute(args, &SystemWindows) {
        Ok(outcome) => {
            if let Some(message) = outcome.message() {
                println!("{}", message);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::debug!("[RUN] Failed: {:?}", e);
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Parses `args` (without the program name) and performs the run.
pub fn execute<I, T>(args: I, system: &dyn WindowSystem) -> Result<RunOutcome, AppError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let options = match cli::parse_args(args)? {
        Parsed::Help(text) => return Ok(RunOutcome::Help(text)),
        Parsed::Run(options) => options,
    };

    let destination = delivery::resolve_destination(&options, chrono::Local::now())?;
    let config = RuntimeConfig::from_env()?;

    capture_and_deliver(&options, &config, destination, system)
}

/// Everything after argument parsing: locate, capture, post-process, deliver.
pub fn capture_and_deliver(
    options: &Options,
    config: &RuntimeConfig,
    destination: Destination,
    system: &dyn WindowSystem,
) -> Result<RunOutcome, AppError> {
    let start = std::time::Instant::now();

    let (target, screen) = if options.interactive {
        (CaptureTarget::Interactive, None)
    } else {
        let handle = window::locate_active_window(system)?;
        (CaptureTarget::Window(handle.id), handle.screen)
    };

    let artifact = match capture::capture(target, config)? {
        CaptureOutcome::Captured(artifact) => artifact,
        CaptureOutcome::Cancelled => return Ok(RunOutcome::Cancelled),
    };

    let scale = if options.resize {
        let factor = screen
            .map(|s| s.scale_factor)
            .or_else(|| window::primary_scale_factor(system))
            .unwrap_or(1.0);
        Some(factor)
    } else {
        None
    };

    let processed = imaging::process_capture(&artifact, scale);
    artifact.remove();
    let image = processed?;

    delivery::deliver(image, &destination)?;
    log::info!("[RUN] Done in {}ms", start.elapsed().as_millis());

    Ok(match destination {
        Destination::Clipboard => RunOutcome::Copied {
            quiet: options.quiet,
        },
        Destination::File(path) => RunOutcome::Saved {
            path,
            quiet: options.quiet,
        },
    })
}
