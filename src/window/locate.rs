//! Foreground window selection — functional core.
//!
//! The window server lists on-screen windows front to back. The first
//! entry on the normal application layer (0) is the active window; menu
//! bars, the Dock and floating panels live on other layers and are
//! skipped. The list is never re-sorted.

use super::{Rect, ScreenInfo, WindowError, WindowHandle, WindowSystem};

const APPLICATION_LAYER: i64 = 0;

/// Finds the foreground window and the screen containing it.
pub fn locate_active_window(system: &dyn WindowSystem) -> Result<WindowHandle, WindowError> {
    let windows = system.windows()?;
    log::debug!("[WINDOW] {} on-screen windows", windows.len());

    let active = windows
        .iter()
        .find(|w| w.layer == APPLICATION_LAYER)
        .ok_or(WindowError::NoActiveWindow)?;

    let screens = system.screens();
    let screen = screen_containing(&screens, &active.bounds).cloned();

    match &screen {
        Some(s) => log::info!(
            "[WINDOW] Active window {} at {:?} on screen {:?} (scale {})",
            active.id,
            active.bounds,
            s.frame,
            s.scale_factor
        ),
        None => log::info!(
            "[WINDOW] Active window {} at {:?}, no containing screen",
            active.id,
            active.bounds
        ),
    }

    Ok(WindowHandle {
        id: active.id,
        screen,
    })
}

/// First screen whose frame overlaps `bounds`.
pub fn screen_containing<'a>(screens: &'a [ScreenInfo], bounds: &Rect) -> Option<&'a ScreenInfo> {
    screens.iter().find(|s| s.frame.intersects(bounds))
}

/// Scale factor of the primary screen, or of the first screen when none
/// reports itself as primary.
pub fn primary_scale_factor(system: &dyn WindowSystem) -> Option<f64> {
    let screens = system.screens();
    screens
        .iter()
        .find(|s| s.is_primary)
        .or_else(|| screens.first())
        .map(|s| s.scale_factor)
}
