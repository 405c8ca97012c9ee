//! Window lookup domain — public API.
//!
//! Finds the foreground window and the screen it sits on. The selection
//! policy lives in `locate` and has no OS dependencies; the window server
//! is reached through the [`WindowSystem`] trait.

mod geometry;
mod locate;
#[cfg(target_os = "macos")]
mod macos;

pub use geometry::Rect;
pub use locate::{locate_active_window, primary_scale_factor, screen_containing};

/// One entry of the on-screen window list, in window-server order.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowEntry {
    pub id: u32,
    pub layer: i64,
    pub bounds: Rect,
}

impl WindowEntry {
    /// Builds an entry from raw window-server numbers. Returns `None` when
    /// the window number does not fit a `CGWindowID`.
    pub fn from_raw(number: i64, layer: i64, bounds: Rect) -> Option<Self> {
        let id = u32::try_from(number).ok()?;
        Some(Self { id, layer, bounds })
    }
}

/// A display and its backing scale factor (2.0 on Retina panels).
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenInfo {
    pub frame: Rect,
    pub scale_factor: f64,
    pub is_primary: bool,
}

/// The window chosen for capture plus the screen that contains it.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowHandle {
    pub id: u32,
    pub screen: Option<ScreenInfo>,
}

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("could not retrieve the window list: {0}")]
    WindowListUnavailable(String),

    #[error("no active window found")]
    NoActiveWindow,
}

/// Access to the window server.
pub trait WindowSystem {
    /// On-screen windows excluding desktop elements, front to back.
    fn windows(&self) -> Result<Vec<WindowEntry>, WindowError>;

    /// Attached displays. An empty list means none could be queried.
    fn screens(&self) -> Vec<ScreenInfo>;
}

/// The window server of the running system.
pub struct SystemWindows;

#[cfg(target_os = "macos")]
impl WindowSystem for SystemWindows {
    fn windows(&self) -> Result<Vec<WindowEntry>, WindowError> {
        macos::on_screen_windows()
    }

    fn screens(&self) -> Vec<ScreenInfo> {
        macos::screens()
    }
}

#[cfg(not(target_os = "macos"))]
impl WindowSystem for SystemWindows {
    fn windows(&self) -> Result<Vec<WindowEntry>, WindowError> {
        Err(WindowError::WindowListUnavailable(
            "the window list is only available on macOS".to_string(),
        ))
    }

    fn screens(&self) -> Vec<ScreenInfo> {
        Vec::new()
    }
}
