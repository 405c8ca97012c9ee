//! Backing-scale arithmetic.

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResizeError {
    #[error("scale factor {0} is not a positive finite number")]
    InvalidScale(f64),

    #[error("{width}x{height} scaled by 1/{scale} collapses to zero pixels")]
    Degenerate { width: u32, height: u32, scale: f64 },
}

/// Size after dividing both dimensions by `scale`.
///
/// Returns `Ok(None)` when no downsampling is needed (factor at most 1.0).
/// Each dimension is rounded to the nearest pixel independently.
pub fn target_dimensions(
    width: u32,
    height: u32,
    scale: f64,
) -> Result<Option<(u32, u32)>, ResizeError> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(ResizeError::InvalidScale(scale));
    }
    if scale <= 1.0 {
        return Ok(None);
    }

    let scaled = |value: u32| (f64::from(value) / scale).round() as u32;
    let (new_width, new_height) = (scaled(width), scaled(height));
    if new_width == 0 || new_height == 0 {
        return Err(ResizeError::Degenerate {
            width,
            height,
            scale,
        });
    }

    Ok(Some((new_width, new_height)))
}
