//! Runs the external capture tool — infrastructure layer.
//!
//! The tool signals success by exit status 0 *and* an output file. A zero
//! exit without a file means the user pressed Escape during interactive
//! selection; that is reported as [`CaptureOutcome::Cancelled`], not an
//! error.

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};

use super::TemporaryArtifact;
use crate::config::RuntimeConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureTarget {
    /// A specific window by window-server id.
    Window(u32),
    /// Let the user pick a window or drag a region.
    Interactive,
}

impl CaptureTarget {
    /// `screencapture` arguments: `-x` silences the shutter sound.
    pub fn arguments(&self, output: &Path) -> Vec<OsString> {
        let mut args = vec![OsString::from("-x")];
        match self {
            CaptureTarget::Window(id) => {
                args.push(OsString::from("-l"));
                args.push(OsString::from(id.to_string()));
            }
            CaptureTarget::Interactive => args.push(OsString::from("-i")),
        }
        args.push(output.as_os_str().to_owned());
        args
    }
}

#[derive(Debug)]
pub enum CaptureOutcome {
    Captured(TemporaryArtifact),
    Cancelled,
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("could not create a temporary capture file: {0}")]
    TempFile(#[source] io::Error),

    #[error("could not start the process runtime: {0}")]
    Runtime(#[source] io::Error),

    #[error("could not start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} failed with exit code {code}")]
    Failed { program: String, code: i32 },

    #[error("{program} was terminated by a signal")]
    Terminated { program: String },

    #[error("{program} did not finish within {}s", .timeout.as_secs_f64())]
    TimedOut { program: String, timeout: Duration },

    #[error("failed while waiting for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Runs the capture tool once and waits for it to exit.
///
/// Without a configured timeout the wait is unbounded. With one, the tool
/// is killed once the limit passes.
pub fn capture(target: CaptureTarget, config: &RuntimeConfig) -> Result<CaptureOutcome, CaptureError> {
    let artifact = TemporaryArtifact::new().map_err(CaptureError::TempFile)?;
    let args = target.arguments(artifact.path());
    let program = config.capture_program.display().to_string();

    log::info!("[CAPTURE] Running {} {:?}", program, args);
    let start = Instant::now();

    let status = run_to_completion(&config.capture_program, &args, config.capture_timeout)?;

    log::info!(
        "[CAPTURE] {} exited with {} after {}ms",
        program,
        status,
        start.elapsed().as_millis()
    );

    if !status.success() {
        return Err(match status.code() {
            Some(code) => CaptureError::Failed { program, code },
            None => CaptureError::Terminated { program },
        });
    }

    if !artifact.exists() {
        log::info!("[CAPTURE] No output written, capture was cancelled");
        return Ok(CaptureOutcome::Cancelled);
    }

    Ok(CaptureOutcome::Captured(artifact))
}

fn run_to_completion(
    program: &Path,
    args: &[OsString],
    timeout: Option<Duration>,
) -> Result<ExitStatus, CaptureError> {
    let name = || program.display().to_string();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CaptureError::Runtime)?;

    runtime.block_on(async {
        let mut child = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CaptureError::Spawn {
                program: name(),
                source,
            })?;

        let waited = match timeout {
            None => child.wait().await,
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(waited) => waited,
                Err(_) => {
                    log::warn!("[CAPTURE] {} still running after {:?}, killing it", name(), limit);
                    let _ = child.kill().await;
                    return Err(CaptureError::TimedOut {
                        program: name(),
                        timeout: limit,
                    });
                }
            },
        };

        waited.map_err(|source| CaptureError::Wait {
            program: name(),
            source,
        })
    })
}
