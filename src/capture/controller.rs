use crate::capture::csv_store::CsvStore;
use crate::capture::overlay::OverlayMode;
use crate::capture::record::{CaptureKind, CaptureRecord};
use crate::capture::screenshot::{save_region_snapshot, RegionGrabber, ScreenGrabber};
use crate::capture::session::SessionOutcome;
use crate::settings::Settings;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub const LOG_PLACEHOLDER: &str = "Coordenadas capturadas:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureOutcome {
    pub record: CaptureRecord,
    /// Screenshot written for an area capture.
    pub snapshot: Option<PathBuf>,
}

/// Everything the main window does apart from drawing widgets: owns the
/// visible log lines and the CSV store, and turns gestures into records.
pub struct CaptureController {
    store: CsvStore,
    screenshot_dir: PathBuf,
    border_width: u32,
    grabber: Box<dyn RegionGrabber>,
    log: Vec<String>,
}

impl CaptureController {
    pub fn new(store: CsvStore, screenshot_dir: impl Into<PathBuf>, border_width: u32) -> Self {
        Self {
            store,
            screenshot_dir: screenshot_dir.into(),
            border_width,
            grabber: Box::new(ScreenGrabber),
            log: Vec::new(),
        }
    }

    /// Opens the configured CSV file, creating it with a header if needed.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let store = CsvStore::open(&settings.csv_path)?;
        Ok(Self::new(
            store,
            &settings.screenshot_dir,
            settings.border_width,
        ))
    }

    pub fn with_grabber(mut self, grabber: Box<dyn RegionGrabber>) -> Self {
        self.grabber = grabber;
        self
    }

    pub fn csv_path(&self) -> &Path {
        self.store.path()
    }

    pub fn log_lines(&self) -> &[String] {
        &self.log
    }

    /// Text shown in the log pane: the placeholder followed by one line per
    /// entry.
    pub fn log_text(&self) -> String {
        let mut text = String::from(LOG_PLACEHOLDER);
        text.push('\n');
        for line in &self.log {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    pub fn push_warning(&mut self, message: impl AsRef<str>) {
        self.log.push(format!("⚠️ {}", message.as_ref()));
    }

    /// Persists `record` and then shows it in the log. A failed CSV write
    /// leaves the log untouched.
    pub fn register_event(&mut self, record: CaptureRecord) -> Result<()> {
        self.store.append(&record)?;
        self.log.push(record.log_line());
        tracing::info!(kind = %record.kind, rect = ?record.rect, "capture recorded");
        Ok(())
    }

    pub fn capture_position(&mut self, cursor: (i32, i32)) -> Result<CaptureRecord> {
        let record = CaptureRecord::at_point(CaptureKind::Position, cursor);
        self.register_event(record)?;
        Ok(record)
    }

    /// Records the result of a resolved overlay session. Sessions without a
    /// result are a silent no-op.
    pub fn complete_overlay(&mut self, outcome: SessionOutcome) -> Result<Option<CaptureOutcome>> {
        let Some(rect) = outcome.result else {
            tracing::debug!(mode = ?outcome.mode, "overlay session ended without a gesture");
            return Ok(None);
        };

        let mut snapshot = None;
        if outcome.mode == OverlayMode::Area && !rect.is_degenerate() {
            match save_region_snapshot(
                self.grabber.as_ref(),
                rect,
                &self.screenshot_dir,
                self.border_width,
            ) {
                Ok(path) => {
                    tracing::info!("saved area screenshot {}", path.display());
                    snapshot = Some(path);
                }
                Err(err) => {
                    tracing::warn!("area screenshot failed: {err:#}");
                    self.push_warning(format!("Erro screenshot: {err:#}"));
                }
            }
        }

        let record = CaptureRecord::new(outcome.mode.capture_kind(), rect);
        self.register_event(record)?;
        Ok(Some(CaptureOutcome { record, snapshot }))
    }
}
