use crate::capture::monitor::MonitorRect;
use crate::capture::overlay::{OverlayInput, OverlaySession};
use crate::capture::session::CaptureSession;
use eframe::egui;

const SELECTION_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(100, 0, 0, 100);
const SELECTION_STROKE_WIDTH: f32 = 2.0;

pub fn overlay_viewport_id(index: usize) -> egui::ViewportId {
    egui::ViewportId::from_hash_of(("capture-overlay", index))
}

fn overlay_builder(monitor: MonitorRect) -> egui::ViewportBuilder {
    let (x, y) = monitor.logical_origin();
    let (w, h) = monitor.logical_size();
    egui::ViewportBuilder::default()
        .with_title("multi_capture overlay")
        .with_position([x, y])
        .with_inner_size([w, h])
        .with_decorations(false)
        .with_transparent(true)
        .with_always_on_top()
        .with_taskbar(false)
        .with_resizable(false)
}

/// Shows every still-open overlay of `session` and feeds it this frame's
/// input.
pub fn show_overlays(ctx: &egui::Context, session: &mut CaptureSession, fill_alpha: u8) {
    for overlay in session.overlays_mut().iter_mut().filter(|o| !o.is_closed()) {
        let id = overlay_viewport_id(overlay.index());
        let builder = overlay_builder(overlay.monitor());
        ctx.show_viewport_immediate(id, builder, |ctx, _class| {
            for input in collect_input(ctx, overlay.monitor()) {
                overlay.apply(input);
            }
            paint_overlay(ctx, overlay, fill_alpha);
        });
    }
}

fn collect_input(ctx: &egui::Context, monitor: MonitorRect) -> Vec<OverlayInput> {
    let to_global = |pos: egui::Pos2| monitor.local_to_global((pos.x, pos.y));
    ctx.input(|i| {
        let mut inputs: Vec<OverlayInput> = i
            .events
            .iter()
            .filter_map(|event| match event {
                egui::Event::PointerMoved(pos) => Some(OverlayInput::Move(to_global(*pos))),
                egui::Event::PointerButton { pos, pressed, .. } => Some(if *pressed {
                    OverlayInput::Press(to_global(*pos))
                } else {
                    OverlayInput::Release(to_global(*pos))
                }),
                _ => None,
            })
            .collect();

        if i.pointer.button_double_clicked(egui::PointerButton::Primary) {
            if let Some(pos) = i.pointer.interact_pos() {
                inputs.push(OverlayInput::DoubleClick(to_global(pos)));
            }
        }
        if i.viewport().close_requested() || i.key_pressed(egui::Key::Escape) {
            inputs.push(OverlayInput::Dismiss);
        }
        inputs
    })
}

fn paint_overlay(ctx: &egui::Context, overlay: &OverlaySession, fill_alpha: u8) {
    ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
    let frame = egui::Frame::none().fill(egui::Color32::from_black_alpha(fill_alpha));
    egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
        let Some(selection) = overlay.selection() else {
            return;
        };
        let monitor = overlay.monitor();
        let (ax, ay) = monitor.global_to_local(selection.top_left());
        let (bx, by) = monitor.global_to_local((selection.x2, selection.y2));
        let rect = egui::Rect::from_two_pos(egui::pos2(ax, ay), egui::pos2(bx, by));
        ui.painter().rect(
            rect,
            0.0,
            SELECTION_FILL,
            egui::Stroke::new(SELECTION_STROKE_WIDTH, egui::Color32::RED),
        );
    });
    if overlay.is_closed() {
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}
