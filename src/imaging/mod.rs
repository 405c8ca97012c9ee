//! Image post-processing domain — public API.
//!
//! Pure functions over bytes and `DynamicImage`: decode the capture,
//! optionally downsample Retina output, re-encode as PNG. Nothing here
//! touches the screen or the clipboard.

mod process;
mod scale;

pub use process::{decode, downsample, encode_png, process_capture, FinalImage, ImageError};
pub use scale::{target_dimensions, ResizeError};
