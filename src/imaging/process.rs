//! Decode, downsample and encode — functional core.

use std::io::{self, Cursor};

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

use super::scale::target_dimensions;
use crate::capture::TemporaryArtifact;

/// PNG-encoded screenshot ready for delivery.
#[derive(Debug, Clone)]
pub struct FinalImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("could not read the captured image: {0}")]
    Read(#[source] io::Error),

    #[error("could not decode the captured image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("PNG encoding failed: {0}")]
    Encode(#[source] image::ImageError),
}

/// Turns the raw capture into the final PNG.
///
/// `scale` is the backing scale factor of the captured screen, or `None`
/// to keep the capture at full resolution.
pub fn process_capture(
    artifact: &TemporaryArtifact,
    scale: Option<f64>,
) -> Result<FinalImage, ImageError> {
    let bytes = artifact.read().map_err(ImageError::Read)?;
    let image = decode(&bytes)?;
    log::info!(
        "[IMAGE] Decoded {}x{} capture ({} bytes)",
        image.width(),
        image.height(),
        bytes.len()
    );

    let image = match scale {
        Some(factor) => downsample(image, factor),
        None => image,
    };

    encode_png(&image)
}

/// Decodes the first frame of an encoded image.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, ImageError> {
    image::load_from_memory(bytes).map_err(ImageError::Decode)
}

/// Shrinks both dimensions by `scale` with a Lanczos filter.
///
/// Resizing is best effort: an unusable factor leaves the image untouched
/// and logs a warning instead of failing the capture.
pub fn downsample(image: DynamicImage, scale: f64) -> DynamicImage {
    match target_dimensions(image.width(), image.height(), scale) {
        Ok(Some((width, height))) => {
            let start = std::time::Instant::now();
            let resized = image.resize_exact(width, height, FilterType::Lanczos3);
            log::info!(
                "[IMAGE] Downsampled {}x{} -> {}x{} (scale {}) in {}ms",
                image.width(),
                image.height(),
                width,
                height,
                scale,
                start.elapsed().as_millis()
            );
            resized
        }
        Ok(None) => image,
        Err(e) => {
            log::warn!("[IMAGE] Keeping original size: {}", e);
            image
        }
    }
}

pub fn encode_png(image: &DynamicImage) -> Result<FinalImage, ImageError> {
    let mut png_bytes: Vec<u8> = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(ImageError::Encode)?;

    log::info!(
        "[IMAGE] Encoded {}x{} PNG ({} bytes)",
        image.width(),
        image.height(),
        png_bytes.len()
    );

    Ok(FinalImage {
        bytes: png_bytes,
        width: image.width(),
        height: image.height(),
    })
}
