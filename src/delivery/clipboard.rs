//! Clipboard delivery backed by `arboard`.

use std::borrow::Cow;

use super::DeliveryError;
use crate::imaging::{decode, FinalImage};

/// Minimal clipboard surface needed to publish an image.
pub trait ImageClipboard {
    fn clear(&mut self) -> Result<(), DeliveryError>;

    /// Places tightly packed RGBA8 pixels on the clipboard.
    fn set_rgba(&mut self, width: usize, height: usize, rgba: Vec<u8>) -> Result<(), DeliveryError>;
}

/// The system pasteboard.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, DeliveryError> {
        let inner =
            arboard::Clipboard::new().map_err(|e| DeliveryError::Clipboard(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl ImageClipboard for SystemClipboard {
    fn clear(&mut self) -> Result<(), DeliveryError> {
        self.inner
            .clear()
            .map_err(|e| DeliveryError::Clipboard(e.to_string()))
    }

    fn set_rgba(&mut self, width: usize, height: usize, rgba: Vec<u8>) -> Result<(), DeliveryError> {
        self.inner
            .set_image(arboard::ImageData {
                width,
                height,
                bytes: Cow::Owned(rgba),
            })
            .map_err(|e| DeliveryError::Clipboard(e.to_string()))
    }
}

/// Replaces the clipboard contents with `image`.
///
/// Prior contents are cleared first so no stale text or file flavours
/// remain next to the image.
pub fn copy_image_to(
    clipboard: &mut dyn ImageClipboard,
    image: &FinalImage,
) -> Result<(), DeliveryError> {
    let rgba = decode(&image.bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();

    clipboard.clear()?;
    clipboard.set_rgba(width as usize, height as usize, rgba.into_raw())?;

    log::info!("[DELIVERY] Copied {}x{} image to clipboard", width, height);
    Ok(())
}
