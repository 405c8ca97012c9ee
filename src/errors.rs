//! Top-level error type.
//!
//! Every domain keeps its own `thiserror` enum; they are funnelled into
//! [`AppError`] so `run` can report any failure once, in one place.
//! User cancellation is not an error and never reaches this type.

use thiserror::Error;

use crate::capture::CaptureError;
use crate::cli::ParseError;
use crate::config::ConfigError;
use crate::delivery::{DeliveryError, DestinationError};
use crate::imaging::ImageError;
use crate::window::WindowError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Arguments(#[from] ParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Window(#[from] WindowError),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Destination(#[from] DestinationError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}
