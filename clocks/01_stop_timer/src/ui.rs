//! UI module - egui status bar
//!
//! Shows the controller state below the widget using nannou_egui.

use nannou_egui::egui;
use shared::{Direction, Mode, TimeValue};

/// Snapshot of the controller shown in the status bar
pub struct StatusLine {
    pub mode: Mode,
    pub direction: Direction,
    pub zero_point: TimeValue,
    pub alarm_threshold: TimeValue,
    pub alarm_raised: bool,
}

impl StatusLine {
    pub fn mode_label(&self) -> &'static str {
        match self.mode {
            Mode::Idle => "Idle",
            Mode::Running => "Running",
            Mode::Paused => "Paused",
        }
    }

    pub fn direction_label(&self) -> &'static str {
        match self.direction {
            Direction::Up => "Stopwatch",
            Direction::Down => "Countdown",
        }
    }
}

/// Draw the status bar along the bottom edge
pub fn draw_status_bar(ctx: &egui::Context, status: &StatusLine) {
    egui::TopBottomPanel::bottom("status_bar")
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("{} · {}", status.mode_label(), status.direction_label()));
                ui.separator();
                ui.label(format!(
                    "{} → {}",
                    status.zero_point, status.alarm_threshold
                ))
                .on_hover_text("Click the header to change the start time, the ✓ to change the alarm");
                if status.alarm_raised {
                    ui.separator();
                    ui.colored_label(egui::Color32::from_rgb(255, 180, 0), "⏰ Alarm");
                }
            });
        });
}
