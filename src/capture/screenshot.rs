use crate::capture::monitor::{enumerate_monitors, monitor_for_region};
use crate::capture::record::CaptureRect;
use anyhow::{anyhow, bail, Context, Result};
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

pub const BORDER_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Source of screen pixels for a region given in global physical pixels.
pub trait RegionGrabber {
    fn grab(&self, rect: CaptureRect) -> Result<RgbaImage>;
}

/// Grabs from the display holding the region. Regions spilling across
/// displays are rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScreenGrabber;

impl RegionGrabber for ScreenGrabber {
    fn grab(&self, rect: CaptureRect) -> Result<RgbaImage> {
        if rect.is_degenerate() {
            bail!("capture region is empty");
        }
        let monitors = enumerate_monitors()?;
        let monitor = monitor_for_region(&monitors, rect).ok_or_else(|| {
            anyhow!(
                "region ({},{})-({},{}) does not fit on a single display",
                rect.x1,
                rect.y1,
                rect.x2,
                rect.y2
            )
        })?;
        let screen = screenshots::Screen::from_point(monitor.x, monitor.y)
            .with_context(|| format!("no display at ({}, {})", monitor.x, monitor.y))?;
        Ok(screen.capture_area(
            rect.x1 - monitor.x,
            rect.y1 - monitor.y,
            rect.width(),
            rect.height(),
        )?)
    }
}

pub fn snapshot_filename(rect: CaptureRect) -> String {
    format!(
        "captura_{}_{}_{}_{}.png",
        rect.x1, rect.y1, rect.x2, rect.y2
    )
}

/// Paints a border of `width` pixels along the inside edge of the image.
pub fn draw_inset_border(img: &mut RgbaImage, width: u32, color: Rgba<u8>) {
    let (w, h) = img.dimensions();
    if width == 0 {
        return;
    }
    for (x, y, px) in img.enumerate_pixels_mut() {
        if x < width || y < width || x + width >= w || y + width >= h {
            *px = color;
        }
    }
}

/// Grabs `rect`, borders it and writes it as PNG into `dir`.
pub fn save_region_snapshot(
    grabber: &dyn RegionGrabber,
    rect: CaptureRect,
    dir: &Path,
    border_width: u32,
) -> Result<PathBuf> {
    let mut img = grabber.grab(rect)?;
    if img.width() == 0 || img.height() == 0 {
        return Err(anyhow!("grabbed image is empty"));
    }
    draw_inset_border(&mut img, border_width, BORDER_COLOR);
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create screenshot folder {}", dir.display()))?;
    let path = dir.join(snapshot_filename(rect));
    img.save(&path)
        .with_context(|| format!("save screenshot {}", path.display()))?;
    Ok(path)
}
