use crate::capture::messages::OverlayToMain;
use crate::capture::monitor::MonitorRect;
use crate::capture::record::{CaptureKind, CaptureRect};
use std::sync::mpsc::Sender;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayMode {
    Click,
    Area,
    DoubleClick,
}

impl OverlayMode {
    pub fn capture_kind(self) -> CaptureKind {
        match self {
            OverlayMode::Click => CaptureKind::Click,
            OverlayMode::Area => CaptureKind::Area,
            OverlayMode::DoubleClick => CaptureKind::DoubleClick,
        }
    }
}

/// Input relevant to an overlay, already translated to global pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayInput {
    Press((i32, i32)),
    Move((i32, i32)),
    Release((i32, i32)),
    DoubleClick((i32, i32)),
    Dismiss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPhase {
    Idle,
    Dragging { start: (i32, i32), end: (i32, i32) },
    Done,
}

/// Gesture state of one overlay window covering one monitor.
///
/// Points are global physical pixels. A session is single-use: once it is
/// [`OverlayPhase::Done`] all further input is ignored. Closing always
/// reports to the owner through the channel given at construction.
#[derive(Debug)]
pub struct OverlaySession {
    index: usize,
    mode: OverlayMode,
    monitor: MonitorRect,
    phase: OverlayPhase,
    result: Option<CaptureRect>,
    notify: Sender<OverlayToMain>,
}

impl OverlaySession {
    pub fn new(
        index: usize,
        mode: OverlayMode,
        monitor: MonitorRect,
        notify: Sender<OverlayToMain>,
    ) -> Self {
        Self {
            index,
            mode,
            monitor,
            phase: OverlayPhase::Idle,
            result: None,
            notify,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn mode(&self) -> OverlayMode {
        self.mode
    }

    pub fn monitor(&self) -> MonitorRect {
        self.monitor
    }

    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    pub fn result(&self) -> Option<CaptureRect> {
        self.result
    }

    pub fn is_closed(&self) -> bool {
        self.phase == OverlayPhase::Done
    }

    /// Live selection while dragging in area mode.
    pub fn selection(&self) -> Option<CaptureRect> {
        match self.phase {
            OverlayPhase::Dragging { start, end } => Some(CaptureRect::from_corners(start, end)),
            _ => None,
        }
    }

    pub fn apply(&mut self, input: OverlayInput) {
        match input {
            OverlayInput::Press(point) => self.handle_press(point),
            OverlayInput::Move(point) => self.handle_move(point),
            OverlayInput::Release(point) => self.handle_release(point),
            OverlayInput::DoubleClick(point) => self.handle_double_click(point),
            OverlayInput::Dismiss => self.dismiss(),
        }
    }

    pub fn handle_press(&mut self, point: (i32, i32)) {
        if self.phase != OverlayPhase::Idle {
            return;
        }
        match self.mode {
            OverlayMode::Click => self.finish(CaptureRect::point(point)),
            OverlayMode::Area => {
                self.phase = OverlayPhase::Dragging {
                    start: point,
                    end: point,
                };
            }
            OverlayMode::DoubleClick => {}
        }
    }

    pub fn handle_move(&mut self, point: (i32, i32)) {
        if let OverlayPhase::Dragging { end, .. } = &mut self.phase {
            *end = point;
        }
    }

    pub fn handle_release(&mut self, point: (i32, i32)) {
        if let OverlayPhase::Dragging { start, .. } = self.phase {
            self.finish(CaptureRect::from_corners(start, point));
        }
    }

    pub fn handle_double_click(&mut self, point: (i32, i32)) {
        if self.mode == OverlayMode::DoubleClick && self.phase == OverlayPhase::Idle {
            self.finish(CaptureRect::point(point));
        }
    }

    /// The user closed the window without completing a gesture.
    pub fn dismiss(&mut self) {
        self.close();
    }

    /// The owning session resolved elsewhere.
    pub fn cancel(&mut self) {
        self.close();
    }

    fn finish(&mut self, rect: CaptureRect) {
        self.result = Some(rect);
        self.close();
    }

    fn close(&mut self) {
        if self.phase == OverlayPhase::Done {
            return;
        }
        self.phase = OverlayPhase::Done;
        tracing::debug!(
            overlay = self.index,
            result = ?self.result,
            "overlay closed"
        );
        let _ = self.notify.send(OverlayToMain::Closed {
            overlay: self.index,
            result: self.result,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::{channel, Receiver};

    fn session(mode: OverlayMode) -> (OverlaySession, Receiver<OverlayToMain>) {
        let (tx, rx) = channel();
        let monitor = MonitorRect::new(0, 0, 1920, 1080);
        (OverlaySession::new(0, mode, monitor, tx), rx)
    }

    #[test]
    fn click_mode_resolves_on_press() {
        let (mut overlay, rx) = session(OverlayMode::Click);
        overlay.handle_press((12, 34));
        assert!(overlay.is_closed());
        assert_eq!(overlay.result(), Some(CaptureRect::point((12, 34))));
        assert_eq!(
            rx.try_recv().unwrap(),
            OverlayToMain::Closed {
                overlay: 0,
                result: Some(CaptureRect::point((12, 34))),
            }
        );
    }

    #[test]
    fn area_mode_walks_idle_dragging_done() {
        let (mut overlay, rx) = session(OverlayMode::Area);
        overlay.handle_move((1, 1));
        assert_eq!(overlay.phase(), OverlayPhase::Idle);

        overlay.handle_press((100, 100));
        assert!(matches!(overlay.phase(), OverlayPhase::Dragging { .. }));
        overlay.handle_move((80, 60));
        assert_eq!(
            overlay.selection(),
            Some(CaptureRect::from_corners((80, 60), (100, 100)))
        );
        assert!(rx.try_recv().is_err());

        overlay.handle_release((50, 50));
        assert!(overlay.is_closed());
        assert_eq!(
            overlay.result(),
            Some(CaptureRect {
                x1: 50,
                y1: 50,
                x2: 100,
                y2: 100
            })
        );
        assert_eq!(overlay.selection(), None);
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn release_without_press_is_ignored() {
        let (mut overlay, rx) = session(OverlayMode::Area);
        overlay.handle_release((5, 5));
        assert_eq!(overlay.phase(), OverlayPhase::Idle);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn double_click_mode_ignores_single_press() {
        let (mut overlay, _rx) = session(OverlayMode::DoubleClick);
        overlay.handle_press((3, 4));
        assert!(!overlay.is_closed());
        overlay.handle_double_click((3, 4));
        assert_eq!(overlay.result(), Some(CaptureRect::point((3, 4))));
    }

    #[test]
    fn double_click_is_ignored_outside_double_click_mode() {
        let (mut overlay, _rx) = session(OverlayMode::Area);
        overlay.handle_double_click((3, 4));
        assert_eq!(overlay.phase(), OverlayPhase::Idle);
    }

    #[test]
    fn closed_overlay_is_single_use() {
        let (mut overlay, rx) = session(OverlayMode::Click);
        overlay.dismiss();
        overlay.handle_press((1, 2));
        overlay.cancel();
        assert_eq!(overlay.result(), None);
        assert_eq!(
            rx.try_recv().unwrap(),
            OverlayToMain::Closed {
                overlay: 0,
                result: None,
            }
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn frame_of_inputs_after_close_is_ignored() {
        let (mut overlay, rx) = session(OverlayMode::Area);
        for input in [
            OverlayInput::Press((0, 0)),
            OverlayInput::Move((10, 10)),
            OverlayInput::Release((20, 30)),
            OverlayInput::Press((40, 40)),
            OverlayInput::Dismiss,
        ] {
            overlay.apply(input);
        }
        assert_eq!(overlay.result(), Some(CaptureRect::from_corners((0, 0), (20, 30))));
        assert_eq!(rx.try_iter().count(), 1);
    }

    #[test]
    fn dismiss_during_drag_drops_selection() {
        let (mut overlay, _rx) = session(OverlayMode::Area);
        overlay.handle_press((10, 10));
        overlay.dismiss();
        overlay.handle_release((20, 20));
        assert_eq!(overlay.result(), None);
    }
}
