use crate::capture::record::CaptureRect;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayToMain {
    /// The overlay closed, with the gesture result if it completed one.
    Closed {
        overlay: usize,
        result: Option<CaptureRect>,
    },
}
