mod overlay_view;

pub use overlay_view::{overlay_viewport_id, show_overlays};

use crate::capture::controller::CaptureController;
use crate::capture::monitor::{cursor_position, enumerate_monitors, MonitorRect};
use crate::capture::overlay::OverlayMode;
use crate::capture::session::{CaptureSession, SessionOutcome};
use crate::settings::Settings;
use eframe::egui;

pub const APP_TITLE: &str = "RPA – Captura Multi-Monitor";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    CapturePosition,
    Quit,
}

/// Keyboard shortcuts of the main window: Enter captures the cursor
/// position and typing `2` closes the window.
pub fn shortcut_for_event(event: &egui::Event) -> Option<Shortcut> {
    match event {
        egui::Event::Key {
            key: egui::Key::Enter,
            pressed: true,
            ..
        } => Some(Shortcut::CapturePosition),
        egui::Event::Text(text) if text == "2" => Some(Shortcut::Quit),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Position,
    Overlay(OverlayMode),
    Clear,
    OpenCsv,
    Quit,
}

pub const BUTTONS: [(&str, ButtonAction); 7] = [
    ("Posição", ButtonAction::Position),
    ("Clique Tela", ButtonAction::Overlay(OverlayMode::Click)),
    ("Selecionar Área", ButtonAction::Overlay(OverlayMode::Area)),
    ("Duplo Clique", ButtonAction::Overlay(OverlayMode::DoubleClick)),
    ("Limpar", ButtonAction::Clear),
    ("Abrir CSV", ButtonAction::OpenCsv),
    ("Sair", ButtonAction::Quit),
];

pub struct CaptureApp {
    controller: CaptureController,
    session: Option<CaptureSession>,
    overlay_alpha: u8,
    status: Option<String>,
}

impl CaptureApp {
    pub fn new(controller: CaptureController, settings: &Settings) -> Self {
        Self {
            controller,
            session: None,
            overlay_alpha: settings.overlay_alpha(),
            status: None,
        }
    }

    pub fn controller(&self) -> &CaptureController {
        &self.controller
    }

    pub fn is_capturing(&self) -> bool {
        self.session.is_some()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    /// Runs a button or shortcut action. Returns `true` when the window
    /// should close.
    pub fn trigger(&mut self, ctx: &egui::Context, action: ButtonAction) -> bool {
        if self.is_capturing() && action != ButtonAction::Quit {
            tracing::debug!(?action, "ignored while a capture session is active");
            return false;
        }
        match action {
            ButtonAction::Position => {
                let cursor = cursor_position().or_else(|| pointer_in_screen_space(ctx));
                self.capture_position(cursor);
            }
            ButtonAction::Overlay(mode) => self.begin_overlay_capture(mode),
            ButtonAction::Clear => {
                self.controller.clear_log();
                self.status = None;
            }
            ButtonAction::OpenCsv => self.open_csv(),
            ButtonAction::Quit => return true,
        }
        false
    }

    pub fn capture_position(&mut self, cursor: Option<(i32, i32)>) {
        let Some(cursor) = cursor else {
            tracing::warn!("cursor position unavailable; move the pointer over the window");
            self.set_status("Posição do cursor indisponível");
            return;
        };
        if let Err(err) = self.controller.capture_position(cursor) {
            self.report_csv_error(err);
        }
    }

    pub fn begin_overlay_capture(&mut self, mode: OverlayMode) {
        match enumerate_monitors() {
            Ok(monitors) => self.begin_overlay_capture_on(mode, &monitors),
            Err(err) => {
                tracing::warn!("display enumeration failed: {err:#}");
                self.set_status(format!("Monitores indisponíveis: {err:#}"));
            }
        }
    }

    pub fn begin_overlay_capture_on(
        &mut self,
        mode: OverlayMode,
        monitors: &[MonitorRect],
    ) {
        self.status = None;
        self.session = Some(CaptureSession::start(mode, monitors));
    }

    /// Feeds a resolved session into the controller.
    pub fn finish_session(&mut self, outcome: SessionOutcome) {
        self.session = None;
        match self.controller.complete_overlay(outcome) {
            Ok(Some(done)) => {
                if let Some(path) = done.snapshot {
                    self.set_status(format!("💾 {}", path.display()));
                }
            }
            Ok(None) => {}
            Err(err) => self.report_csv_error(err),
        }
    }

    /// Drives the active session: shows its overlays and finishes it once
    /// it resolves.
    pub fn poll_session(&mut self, ctx: &egui::Context) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        show_overlays(ctx, session, self.overlay_alpha);
        match session.poll() {
            Some(outcome) => self.finish_session(outcome),
            None => ctx.request_repaint(),
        }
    }

    fn open_csv(&mut self) {
        let path = self.controller.csv_path().to_path_buf();
        if let Err(err) = open::that(&path) {
            tracing::warn!("failed to open {}: {err}", path.display());
            self.controller
                .push_warning(format!("Erro ao abrir {}: {err}", path.display()));
        }
    }

    fn report_csv_error(&mut self, err: anyhow::Error) {
        tracing::error!("capture not recorded: {err:#}");
        self.set_status(format!("Erro CSV: {err:#}"));
    }
}

/// Last pointer position over the main window, in global physical pixels.
fn pointer_in_screen_space(ctx: &egui::Context) -> Option<(i32, i32)> {
    let ppp = ctx.pixels_per_point();
    ctx.input(|i| {
        let pos = i.pointer.latest_pos()?;
        let inner = i.viewport().inner_rect?;
        Some((
            ((inner.min.x + pos.x) * ppp).round() as i32,
            ((inner.min.y + pos.y) * ppp).round() as i32,
        ))
    })
}

impl eframe::App for CaptureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_session(ctx);

        let mut close = false;
        if !self.is_capturing() {
            let shortcuts: Vec<Shortcut> =
                ctx.input(|i| i.events.iter().filter_map(shortcut_for_event).collect());
            for shortcut in shortcuts {
                close |= match shortcut {
                    Shortcut::CapturePosition => self.trigger(ctx, ButtonAction::Position),
                    Shortcut::Quit => true,
                };
            }
        }

        egui::TopBottomPanel::bottom("buttons").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal_wrapped(|ui| {
                for (label, action) in BUTTONS {
                    let enabled = !self.is_capturing() || action == ButtonAction::Quit;
                    if ui.add_enabled(enabled, egui::Button::new(label)).clicked() {
                        close |= self.trigger(ctx, action);
                    }
                }
            });
            if let Some(status) = &self.status {
                ui.label(status.as_str());
            }
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let text = self.controller.log_text();
            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut text.as_str())
                            .desired_width(f32::INFINITY)
                            .font(egui::TextStyle::Monospace),
                    );
                });
        });

        if close {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        // Overlays share this clear colour and must stay see-through.
        [0.0, 0.0, 0.0, 0.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_and_two_map_to_shortcuts() {
        let enter = egui::Event::Key {
            key: egui::Key::Enter,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        };
        assert_eq!(shortcut_for_event(&enter), Some(Shortcut::CapturePosition));

        let enter_up = egui::Event::Key {
            key: egui::Key::Enter,
            physical_key: None,
            pressed: false,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        };
        assert_eq!(shortcut_for_event(&enter_up), None);

        assert_eq!(
            shortcut_for_event(&egui::Event::Text("2".into())),
            Some(Shortcut::Quit)
        );
        assert_eq!(shortcut_for_event(&egui::Event::Text("22".into())), None);
        assert_eq!(shortcut_for_event(&egui::Event::Text("a".into())), None);
    }

    #[test]
    fn seven_buttons_in_order() {
        let labels: Vec<&str> = BUTTONS.iter().map(|(label, _)| *label).collect();
        assert_eq!(
            labels,
            [
                "Posição",
                "Clique Tela",
                "Selecionar Área",
                "Duplo Clique",
                "Limpar",
                "Abrir CSV",
                "Sair"
            ]
        );
    }
}
