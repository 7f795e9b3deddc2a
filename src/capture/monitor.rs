use crate::capture::record::CaptureRect;
use anyhow::{Context, Result};

/// Geometry of one display in global physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MonitorRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub scale_factor: f32,
}

impl MonitorRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            scale_factor: 1.0,
        }
    }

    pub fn with_scale_factor(mut self, scale_factor: f32) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    fn scale(&self) -> f32 {
        if self.scale_factor > 0.0 {
            self.scale_factor
        } else {
            1.0
        }
    }

    pub fn contains(&self, point: (i32, i32)) -> bool {
        (self.x..self.x + self.width).contains(&point.0)
            && (self.y..self.y + self.height).contains(&point.1)
    }

    /// Top-left corner in logical points, as expected by window placement.
    pub fn logical_origin(&self) -> (f32, f32) {
        let scale = self.scale();
        (self.x as f32 / scale, self.y as f32 / scale)
    }

    pub fn logical_size(&self) -> (f32, f32) {
        let scale = self.scale();
        (self.width as f32 / scale, self.height as f32 / scale)
    }

    /// Maps a point inside an overlay covering this monitor (logical points,
    /// relative to the overlay origin) to global physical pixels.
    pub fn local_to_global(&self, local: (f32, f32)) -> (i32, i32) {
        let scale = self.scale();
        (
            self.x + (local.0 * scale).round() as i32,
            self.y + (local.1 * scale).round() as i32,
        )
    }

    /// Inverse of [`MonitorRect::local_to_global`].
    pub fn global_to_local(&self, global: (i32, i32)) -> (f32, f32) {
        let scale = self.scale();
        (
            (global.0 - self.x) as f32 / scale,
            (global.1 - self.y) as f32 / scale,
        )
    }
}

/// First monitor that holds the whole of `rect`. Point rectangles only need
/// their corner inside; larger ones must not spill onto a neighbour.
pub fn monitor_for_region(monitors: &[MonitorRect], rect: CaptureRect) -> Option<MonitorRect> {
    let far_corner = (
        rect.x2 - i32::from(rect.width() > 0),
        rect.y2 - i32::from(rect.height() > 0),
    );
    monitors
        .iter()
        .copied()
        .find(|monitor| monitor.contains(rect.top_left()) && monitor.contains(far_corner))
}

/// Lists every attached display.
pub fn enumerate_monitors() -> Result<Vec<MonitorRect>> {
    let screens = screenshots::Screen::all().context("enumerate displays")?;
    Ok(screens
        .iter()
        .map(|screen| {
            let info = &screen.display_info;
            MonitorRect::new(info.x, info.y, info.width as i32, info.height as i32)
                .with_scale_factor(info.scale_factor)
        })
        .collect())
}

/// Global cursor position in physical pixels, wherever the pointer is.
pub fn cursor_position() -> Option<(i32, i32)> {
    #[cfg(windows)]
    {
        use windows::Win32::Foundation::POINT;
        use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;

        let mut point = POINT::default();
        if unsafe { GetCursorPos(&mut point) }.is_ok() {
            return Some((point.x, point.y));
        }
        None
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        use std::ptr;
        use x11::xlib;

        unsafe {
            let display = xlib::XOpenDisplay(ptr::null());
            if display.is_null() {
                tracing::debug!("no X display available for cursor query");
                return None;
            }
            let root = xlib::XDefaultRootWindow(display);
            let mut root_ret = 0;
            let mut child_ret = 0;
            let mut root_x = 0;
            let mut root_y = 0;
            let mut win_x = 0;
            let mut win_y = 0;
            let mut mask = 0;
            let status = xlib::XQueryPointer(
                display,
                root,
                &mut root_ret,
                &mut child_ret,
                &mut root_x,
                &mut root_y,
                &mut win_x,
                &mut win_y,
                &mut mask,
            );
            xlib::XCloseDisplay(display);
            (status != 0).then_some((root_x, root_y))
        }
    }

    #[cfg(target_os = "macos")]
    {
        use core_graphics::event::CGEvent;
        use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};

        let source = CGEventSource::new(CGEventSourceStateID::CombinedSessionState).ok()?;
        let event = CGEvent::new(source).ok()?;
        let loc = event.location();
        Some((loc.x.round() as i32, loc.y.round() as i32))
    }

    #[cfg(not(any(windows, unix)))]
    {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dual_setup() -> [MonitorRect; 2] {
        [
            MonitorRect::new(-1920, 0, 1920, 1080),
            MonitorRect::new(0, 0, 2560, 1440).with_scale_factor(2.0),
        ]
    }

    #[test]
    fn contains_is_half_open() {
        let [left, right] = dual_setup();
        assert!(left.contains((-10, 100)));
        assert!(!left.contains((0, 100)));
        assert!(right.contains((2559, 1439)));
        assert!(!right.contains((2560, 10)));
    }

    #[test]
    fn region_must_fit_inside_one_monitor() {
        let monitors = dual_setup();
        let inside_left = CaptureRect::from_corners((-500, 10), (-100, 200));
        assert_eq!(monitor_for_region(&monitors, inside_left), Some(monitors[0]));

        let up_to_edge = CaptureRect::from_corners((2000, 1000), (2560, 1440));
        assert_eq!(monitor_for_region(&monitors, up_to_edge), Some(monitors[1]));

        let spanning = CaptureRect::from_corners((-100, 10), (100, 200));
        assert_eq!(monitor_for_region(&monitors, spanning), None);

        let below = CaptureRect::from_corners((10, 1500), (20, 1600));
        assert_eq!(monitor_for_region(&monitors, below), None);

        let point = CaptureRect::point((0, 0));
        assert_eq!(monitor_for_region(&monitors, point), Some(monitors[1]));
    }

    #[test]
    fn local_points_scale_into_global_pixels() {
        let [left, right] = dual_setup();
        assert_eq!(left.local_to_global((10.0, 20.0)), (-1910, 20));
        assert_eq!(right.local_to_global((100.0, 50.5)), (200, 101));
        assert_eq!(right.global_to_local((200, 100)), (100.0, 50.0));
        assert_eq!(right.logical_size(), (1280.0, 720.0));
        assert_eq!(left.logical_origin(), (-1920.0, 0.0));
    }

    #[test]
    fn zero_scale_factor_is_treated_as_unscaled() {
        let monitor = MonitorRect::new(0, 0, 800, 600).with_scale_factor(0.0);
        assert_eq!(monitor.local_to_global((3.0, 4.0)), (3, 4));
    }
}
