pub mod controller;
pub mod csv_store;
pub mod messages;
pub mod monitor;
pub mod overlay;
pub mod record;
pub mod screenshot;
pub mod session;

pub use controller::{CaptureController, CaptureOutcome, LOG_PLACEHOLDER};
pub use csv_store::{CsvStore, CSV_HEADER};
pub use monitor::MonitorRect;
pub use overlay::{OverlayInput, OverlayMode, OverlayPhase, OverlaySession};
pub use record::{CaptureKind, CaptureRecord, CaptureRect};
pub use screenshot::{RegionGrabber, ScreenGrabber};
pub use session::{CaptureSession, SessionOutcome};
