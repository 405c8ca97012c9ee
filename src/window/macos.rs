//! Window server access on macOS — infrastructure layer.
//!
//! Windows come from `CGWindowListCopyWindowInfo`, displays from `xcap`.
//! Both report global coordinates with the origin at the top-left corner
//! of the primary display, so window bounds and screen frames compare
//! directly.

use core_foundation::base::{CFType, TCFType};
use core_foundation::dictionary::{CFDictionary, CFDictionaryRef};
use core_foundation::number::CFNumber;
use core_foundation::string::CFString;
use core_graphics::geometry::CGRect;
use core_graphics::window::{
    copy_window_info, kCGNullWindowID, kCGWindowBounds, kCGWindowLayer,
    kCGWindowListExcludeDesktopElements, kCGWindowListOptionOnScreenOnly, kCGWindowNumber,
};
use xcap::Monitor;

use super::{Rect, ScreenInfo, WindowEntry, WindowError};

/// On-screen windows excluding desktop elements, in window-server order.
pub fn on_screen_windows() -> Result<Vec<WindowEntry>, WindowError> {
    let options = kCGWindowListOptionOnScreenOnly | kCGWindowListExcludeDesktopElements;
    let list = copy_window_info(options, kCGNullWindowID).ok_or_else(|| {
        WindowError::WindowListUnavailable("CGWindowListCopyWindowInfo returned no list".to_string())
    })?;

    let (number_key, layer_key, bounds_key) = unsafe {
        (
            CFString::wrap_under_get_rule(kCGWindowNumber),
            CFString::wrap_under_get_rule(kCGWindowLayer),
            CFString::wrap_under_get_rule(kCGWindowBounds),
        )
    };

    let mut entries = Vec::with_capacity(list.len() as usize);
    for item in list.iter() {
        let info: CFDictionary<CFString, CFType> =
            unsafe { CFDictionary::wrap_under_get_rule(*item as CFDictionaryRef) };

        let (Some(id), Some(layer)) = (
            number_value(&info, &number_key),
            number_value(&info, &layer_key),
        ) else {
            continue;
        };

        let bounds = bounds_value(&info, &bounds_key).unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0));
        match WindowEntry::from_raw(id, layer, bounds) {
            Some(entry) => entries.push(entry),
            None => log::debug!("[WINDOW] Skipping window with out-of-range number {}", id),
        }
    }

    Ok(entries)
}

/// Attached displays. Displays whose metadata cannot be read are skipped.
pub fn screens() -> Vec<ScreenInfo> {
    let monitors = match Monitor::all() {
        Ok(monitors) => monitors,
        Err(e) => {
            log::warn!("[WINDOW] Failed to enumerate displays: {}", e);
            return Vec::new();
        }
    };

    monitors
        .iter()
        .filter_map(|monitor| match screen_info(monitor) {
            Ok(info) => Some(info),
            Err(e) => {
                log::warn!("[WINDOW] Skipping display: {}", e);
                None
            }
        })
        .collect()
}

fn screen_info(monitor: &Monitor) -> xcap::XCapResult<ScreenInfo> {
    Ok(ScreenInfo {
        frame: Rect::new(
            f64::from(monitor.x()?),
            f64::from(monitor.y()?),
            f64::from(monitor.width()?),
            f64::from(monitor.height()?),
        ),
        scale_factor: f64::from(monitor.scale_factor()?),
        is_primary: monitor.is_primary()?,
    })
}

fn number_value(info: &CFDictionary<CFString, CFType>, key: &CFString) -> Option<i64> {
    info.find(key)?.downcast::<CFNumber>()?.to_i64()
}

fn bounds_value(info: &CFDictionary<CFString, CFType>, key: &CFString) -> Option<Rect> {
    let bounds = info.find(key)?.downcast::<CFDictionary>()?;
    let rect = CGRect::from_dict_representation(&bounds)?;
    Some(Rect::new(
        rect.origin.x,
        rect.origin.y,
        rect.size.width,
        rect.size.height,
    ))
}
