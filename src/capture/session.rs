use crate::capture::messages::OverlayToMain;
use crate::capture::monitor::MonitorRect;
use crate::capture::overlay::{OverlayMode, OverlaySession};
use crate::capture::record::CaptureRect;
use std::sync::mpsc::{channel, Receiver, TryRecvError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    pub mode: OverlayMode,
    /// Overlay that produced the result.
    pub overlay: Option<usize>,
    pub result: Option<CaptureRect>,
}

/// One overlay per monitor, resolved by whichever closes first.
///
/// Overlays report their close over a channel in the order it happens. The
/// first report ends the session; among the reports already queued at that
/// point the first one carrying a result wins, and every overlay still open
/// is cancelled.
pub struct CaptureSession {
    mode: OverlayMode,
    overlays: Vec<OverlaySession>,
    overlay_to_main_rx: Receiver<OverlayToMain>,
    resolved: bool,
}

impl CaptureSession {
    pub fn start(mode: OverlayMode, monitors: &[MonitorRect]) -> Self {
        let (tx, rx) = channel();
        let overlays = monitors
            .iter()
            .enumerate()
            .map(|(index, monitor)| OverlaySession::new(index, mode, *monitor, tx.clone()))
            .collect();
        tracing::debug!(?mode, monitors = monitors.len(), "capture session started");
        Self {
            mode,
            overlays,
            overlay_to_main_rx: rx,
            resolved: false,
        }
    }

    pub fn mode(&self) -> OverlayMode {
        self.mode
    }

    pub fn overlays(&self) -> &[OverlaySession] {
        &self.overlays
    }

    pub fn overlays_mut(&mut self) -> &mut [OverlaySession] {
        &mut self.overlays
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Returns the outcome once, on the first poll after any overlay closed.
    pub fn poll(&mut self) -> Option<SessionOutcome> {
        if self.resolved {
            return None;
        }
        let mut closed = match self.overlay_to_main_rx.try_recv() {
            Ok(msg) => vec![msg],
            Err(TryRecvError::Empty) => return None,
            // Only reachable when the session was started without monitors.
            Err(TryRecvError::Disconnected) => Vec::new(),
        };
        closed.extend(self.overlay_to_main_rx.try_iter());

        let winner = closed.iter().find_map(|msg| match msg {
            OverlayToMain::Closed {
                overlay,
                result: Some(rect),
                ..
            } => Some((*overlay, *rect)),
            _ => None,
        });

        for overlay in self.overlays.iter_mut().filter(|o| !o.is_closed()) {
            overlay.cancel();
        }
        // Cancellation reports carry no result.
        while self.overlay_to_main_rx.try_recv().is_ok() {}

        self.resolved = true;
        let outcome = SessionOutcome {
            mode: self.mode,
            overlay: winner.map(|(index, _)| index),
            result: winner.map(|(_, rect)| rect),
        };
        tracing::debug!(?outcome, "capture session resolved");
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::overlay::OverlayPhase;

    fn monitors() -> Vec<MonitorRect> {
        vec![
            MonitorRect::new(0, 0, 1920, 1080),
            MonitorRect::new(1920, 0, 1920, 1080),
            MonitorRect::new(-1280, 0, 1280, 1024),
        ]
    }

    #[test]
    fn pending_until_first_overlay_closes() {
        let mut session = CaptureSession::start(OverlayMode::Area, &monitors());
        assert_eq!(session.overlays().len(), 3);
        assert_eq!(session.poll(), None);
        session.overlays_mut()[1].handle_press((2000, 10));
        assert_eq!(session.poll(), None);
        session.overlays_mut()[1].handle_release((1950, 40));

        let outcome = session.poll().expect("resolved");
        assert_eq!(outcome.overlay, Some(1));
        assert_eq!(
            outcome.result,
            Some(CaptureRect::from_corners((1950, 10), (2000, 40)))
        );
        assert!(session.overlays().iter().all(|o| o.is_closed()));
        assert_eq!(session.poll(), None);
    }

    #[test]
    fn dismissed_overlay_resolves_without_result() {
        let mut session = CaptureSession::start(OverlayMode::Click, &monitors());
        session.overlays_mut()[2].dismiss();
        let outcome = session.poll().expect("resolved");
        assert_eq!(outcome.result, None);
        assert_eq!(outcome.overlay, None);
        assert!(session.is_resolved());
    }

    #[test]
    fn first_result_in_close_order_wins() {
        let mut session = CaptureSession::start(OverlayMode::Click, &monitors());
        session.overlays_mut()[2].handle_press((-5, 5));
        session.overlays_mut()[0].handle_press((5, 5));
        let outcome = session.poll().expect("resolved");
        assert_eq!(outcome.overlay, Some(2));
        assert_eq!(outcome.result, Some(CaptureRect::point((-5, 5))));
    }

    #[test]
    fn dismissal_before_gesture_in_same_frame_still_yields_result() {
        let mut session = CaptureSession::start(OverlayMode::DoubleClick, &monitors());
        session.overlays_mut()[0].dismiss();
        session.overlays_mut()[1].handle_double_click((1930, 7));
        let outcome = session.poll().expect("resolved");
        assert_eq!(outcome.overlay, Some(1));
    }

    #[test]
    fn remaining_overlays_are_cancelled_mid_drag() {
        let mut session = CaptureSession::start(OverlayMode::Area, &monitors());
        session.overlays_mut()[0].handle_press((10, 10));
        session.overlays_mut()[1].dismiss();
        let outcome = session.poll().expect("resolved");
        assert_eq!(outcome.result, None);
        assert_eq!(session.overlays()[0].phase(), OverlayPhase::Done);
        assert_eq!(session.overlays()[0].result(), None);
    }

    #[test]
    fn no_monitors_resolves_immediately_without_result() {
        let mut session = CaptureSession::start(OverlayMode::Click, &[]);
        let outcome = session.poll().expect("resolved");
        assert_eq!(outcome.result, None);
    }
}
