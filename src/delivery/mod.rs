//! Delivery domain — public API.
//!
//! Decides where the screenshot goes (validated before anything is
//! captured) and hands the final PNG to a file or the clipboard.

mod clipboard;
mod destination;

use std::path::PathBuf;

pub use clipboard::{copy_image_to, ImageClipboard, SystemClipboard};
pub use destination::{
    default_destination, default_file_name, resolve_destination, validate_destination,
    DestinationError,
};

use crate::imaging::{FinalImage, ImageError};

/// Where the final image is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Clipboard,
    /// A path that passed [`validate_destination`].
    File(PathBuf),
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("clipboard error: {0}")]
    Clipboard(String),

    #[error(transparent)]
    Image(#[from] ImageError),
}

/// Sends `image` to `destination`, consuming it.
pub fn deliver(image: FinalImage, destination: &Destination) -> Result<(), DeliveryError> {
    match destination {
        Destination::Clipboard => {
            let mut clipboard = SystemClipboard::new()?;
            copy_image_to(&mut clipboard, &image)
        }
        Destination::File(path) => {
            std::fs::write(path, &image.bytes).map_err(|source| DeliveryError::Write {
                path: path.clone(),
                source,
            })?;
            log::info!(
                "[DELIVERY] Wrote {} bytes to {}",
                image.bytes.len(),
                path.display()
            );
            Ok(())
        }
    }
}
