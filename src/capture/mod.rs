//! Screen capture domain — public API.
//!
//! Capture is delegated to the system `screencapture` tool, which writes
//! into a per-run temporary directory. External code should only use the
//! items exported here.

mod artifact;
mod invoke;

pub use artifact::TemporaryArtifact;
pub use invoke::{capture, CaptureError, CaptureOutcome, CaptureTarget};
