//! Drawing module - readout, progress bar and button rendering
//!
//! Renders the timer widget using nannou's Draw API and provides the
//! hit-testing geometry shared with mouse handling.

use nannou::prelude::*;
use shared::ButtonFace;

use crate::host::Readout;

/// Color palette for the timer widget
pub mod colors {
    use nannou::prelude::*;

    pub const BACKGROUND: Srgb<u8> = Srgb {
        red: 26,
        green: 26,
        blue: 26,
        standard: std::marker::PhantomData,
    };
    pub const HEADER: Srgb<u8> = Srgb {
        red: 38,
        green: 38,
        blue: 38,
        standard: std::marker::PhantomData,
    };
    pub const TEXT_PRIMARY: Srgb<u8> = Srgb {
        red: 240,
        green: 240,
        blue: 240,
        standard: std::marker::PhantomData,
    };
    pub const TEXT_SECONDARY: Srgb<u8> = Srgb {
        red: 160,
        green: 160,
        blue: 160,
        standard: std::marker::PhantomData,
    };
    pub const ACCENT: Srgb<u8> = Srgb {
        red: 0,
        green: 212,
        blue: 255,
        standard: std::marker::PhantomData,
    };
    pub const TRACK: Srgb<u8> = Srgb {
        red: 60,
        green: 60,
        blue: 60,
        standard: std::marker::PhantomData,
    };
    pub const BUTTON: Srgb<u8> = Srgb {
        red: 70,
        green: 70,
        blue: 70,
        standard: std::marker::PhantomData,
    };
    pub const DONE: Srgb<u8> = Srgb {
        red: 255,
        green: 180,
        blue: 0,
        standard: std::marker::PhantomData,
    };
}

const PADDING: f32 = 16.0;
const BUTTON_SIZE: f32 = 44.0;
const PROGRESS_HEIGHT: f32 = 10.0;
/// Room left for the egui status bar at the bottom
const STATUS_BAR_HEIGHT: f32 = 28.0;

/// Widget regions in window coordinates
pub struct Layout {
    pub widget: Rect,
    pub header: Rect,
    pub readout: Rect,
    pub progress: Rect,
    pub start_button: Rect,
    pub stop_button: Rect,
    pub done_indicator: Rect,
}

impl Layout {
    pub fn calculate(window_rect: Rect, header_height: f32) -> Self {
        let widget = Rect::from_corners(
            window_rect.top_left(),
            pt2(window_rect.right(), window_rect.bottom() + STATUS_BAR_HEIGHT),
        );
        let inner = widget.pad(PADDING);

        let header = Rect::from_x_y_w_h(
            widget.x(),
            widget.top() - header_height / 2.0,
            widget.w(),
            header_height,
        );

        let buttons_y = inner.bottom() + BUTTON_SIZE / 2.0;
        let start_button = Rect::from_x_y_w_h(
            inner.left() + BUTTON_SIZE / 2.0,
            buttons_y,
            BUTTON_SIZE,
            BUTTON_SIZE,
        );
        let stop_button = Rect::from_x_y_w_h(
            start_button.right() + PADDING + BUTTON_SIZE / 2.0,
            buttons_y,
            BUTTON_SIZE,
            BUTTON_SIZE,
        );
        let done_indicator = Rect::from_x_y_w_h(
            inner.right() - BUTTON_SIZE / 2.0,
            buttons_y,
            BUTTON_SIZE,
            BUTTON_SIZE,
        );

        let progress = Rect::from_x_y_w_h(
            inner.x(),
            start_button.top() + PADDING + PROGRESS_HEIGHT / 2.0,
            inner.w(),
            PROGRESS_HEIGHT,
        );

        let readout_bottom = progress.top() + PADDING / 2.0;
        let readout_top = header.bottom();
        let readout = Rect::from_x_y_w_h(
            inner.x(),
            (readout_top + readout_bottom) / 2.0,
            inner.w(),
            (readout_top - readout_bottom).max(0.0),
        );

        Layout {
            widget,
            header,
            readout,
            progress,
            start_button,
            stop_button,
            done_indicator,
        }
    }

    /// Convert a window point to widget coordinates (origin top-left, y down)
    pub fn to_widget_coords(&self, point: Point2) -> (f32, f32) {
        (point.x - self.widget.left(), self.widget.top() - point.y)
    }
}

/// Draw the header strip with the zero-point and alarm threshold
pub fn draw_header(draw: &Draw, rect: Rect, zero_point: &str, alarm_threshold: &str) {
    draw.rect().xy(rect.xy()).wh(rect.wh()).color(colors::HEADER);

    draw.text("STOP TIMER")
        .xy(rect.xy() + vec2(0.0, 14.0))
        .color(colors::TEXT_SECONDARY)
        .font_size(12)
        .w(rect.w());

    draw.text(&format!("zero {}  ·  alarm {}", zero_point, alarm_threshold))
        .xy(rect.xy() + vec2(0.0, -10.0))
        .color(colors::TEXT_PRIMARY)
        .font_size(16)
        .w(rect.w());
}

/// Draw the hours, minutes and seconds texts
pub fn draw_readout(draw: &Draw, readout: &Readout, rect: Rect) {
    let center = rect.xy();
    let column = rect.w() / 3.0;
    let font_size = (rect.h() * 0.7).clamp(16.0, 72.0) as u32;

    let fields = [&readout.hours, &readout.minutes, &readout.seconds];
    for (idx, text) in fields.into_iter().enumerate() {
        let x = (idx as f32 - 1.0) * column;
        draw.text(text)
            .xy(center + vec2(x, 0.0))
            .color(colors::TEXT_PRIMARY)
            .font_size(font_size)
            .w(column);
    }

    // Separators between the columns
    for idx in 0..2 {
        let x = (idx as f32 - 0.5) * column;
        draw.text(":")
            .xy(center + vec2(x, 0.0))
            .color(colors::TEXT_SECONDARY)
            .font_size(font_size)
            .w(20.0);
    }
}

/// Draw the progress bar when it is visible
pub fn draw_progress(draw: &Draw, readout: &Readout, rect: Rect) {
    if !readout.progress_visible {
        return;
    }

    draw.rect().xy(rect.xy()).wh(rect.wh()).color(colors::TRACK);

    let filled = rect.w() * readout.progress_fraction();
    if filled > 0.0 {
        draw.rect()
            .x_y(rect.left() + filled / 2.0, rect.y())
            .w_h(filled, rect.h())
            .color(colors::ACCENT);
    }
}

/// Draw the start/pause and stop/reset buttons
pub fn draw_buttons(draw: &Draw, face: ButtonFace, start: Rect, stop: Rect) {
    for rect in [start, stop] {
        draw.rect().xy(rect.xy()).wh(rect.wh()).color(colors::BUTTON);
    }

    let glyph = start.w() * 0.3;
    match face {
        ButtonFace::Start => {
            let c = start.xy();
            draw.tri()
                .points(
                    c + vec2(-glyph * 0.8, glyph),
                    c + vec2(-glyph * 0.8, -glyph),
                    c + vec2(glyph, 0.0),
                )
                .color(colors::TEXT_PRIMARY);
            draw.rect()
                .xy(stop.xy())
                .w_h(glyph * 1.8, glyph * 1.8)
                .color(colors::TEXT_PRIMARY);
        }
        ButtonFace::Pause => {
            for rect in [start, stop] {
                draw_pause_glyph(draw, rect.xy(), glyph);
            }
        }
    }
}

fn draw_pause_glyph(draw: &Draw, center: Point2, size: f32) {
    for offset in [-size * 0.45, size * 0.45] {
        draw.rect()
            .xy(center + vec2(offset, 0.0))
            .w_h(size * 0.5, size * 2.0)
            .color(colors::TEXT_PRIMARY);
    }
}

/// Draw the "done" indicator when it is visible
pub fn draw_done_indicator(draw: &Draw, readout: &Readout, rect: Rect) {
    if !readout.done_visible {
        return;
    }

    draw.ellipse()
        .xy(rect.xy())
        .radius(rect.w() / 2.0)
        .color(colors::DONE);
    draw.text("✓")
        .xy(rect.xy())
        .color(colors::BACKGROUND)
        .font_size(24)
        .w(rect.w());
}
