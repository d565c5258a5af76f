//! Stop Timer
//!
//! A stopwatch/countdown widget: counts from a zero-point toward an alarm
//! threshold, fires the alarm once, and remembers the current time across runs.

mod drawing;
mod host;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use nannou::prelude::*;
use nannou_egui::Egui;
use shared::config::STATE_FILE_NAME;
use shared::{Position, StateFile, TimerController, TimerEvent, TomlConfigStore};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::drawing::{
    colors, draw_buttons, draw_done_indicator, draw_header, draw_progress, draw_readout, Layout,
};
use crate::host::WidgetHost;
use crate::ui::{draw_status_bar, StatusLine};

const WIDGET_NAME: &str = "stop_timer";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    nannou::app(model).update(update).exit(exit).run();
}

/// Application state
struct Model {
    /// The timer core, owning the host glue
    timer: TimerController<WidgetHost>,
    /// Time between ticks
    interval: Duration,
    /// Time accumulated toward the next tick
    since_tick: Duration,
    /// Height of the header strip
    header_height: f32,
    /// Whether egui currently owns the pointer
    pointer_over_ui: bool,
    /// egui integration
    egui: Egui,
}

fn open_config() -> TomlConfigStore {
    TomlConfigStore::for_widget(WIDGET_NAME).unwrap_or_else(|e| {
        let path = shared::config_path(WIDGET_NAME)
            .unwrap_or_else(|| PathBuf::from(format!("{}.toml", WIDGET_NAME)));
        warn!("using default config for {}: {}", path.display(), e);
        TomlConfigStore::with_defaults(path)
    })
}

fn open_state() -> StateFile {
    StateFile::for_widget(WIDGET_NAME).unwrap_or_else(|e| {
        warn!("keeping current time in the working directory: {}", e);
        StateFile::new(STATE_FILE_NAME)
    })
}

fn model(app: &App) -> Model {
    // Create window
    let window_id = app
        .new_window()
        .title("Stop Timer")
        .size(360, 260)
        .view(view)
        .key_pressed(key_pressed)
        .mouse_pressed(mouse_pressed)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    // Load configuration
    let config = open_config();
    let settings = config.settings().clone();
    let state = open_state();
    info!(
        "config file: {}, state file: {}",
        config.path().display(),
        state.path().display()
    );

    let host = WidgetHost::new(config, state);
    let mut timer = TimerController::create(host).with_header_height(settings.header_height);
    timer.load_persisted();

    Model {
        timer,
        interval: Duration::from_millis(settings.update_interval_ms.max(1)),
        since_tick: Duration::ZERO,
        header_height: settings.header_height,
        pointer_over_ui: false,
        egui,
    }
}

fn update(_app: &App, model: &mut Model, update: Update) {
    // One tick per interval; time lost inside a blocking dialog is dropped
    model.since_tick += update.since_last;
    if model.since_tick >= model.interval {
        model.since_tick -= model.interval;
        if model.since_tick >= model.interval {
            model.since_tick = Duration::ZERO;
        }
        model.timer.tick();
    }

    // Begin egui frame
    model.egui.set_elapsed_time(update.since_start);
    let ctx = model.egui.begin_frame();

    let status = StatusLine {
        mode: model.timer.mode(),
        direction: model.timer.direction(),
        zero_point: model.timer.zero_point(),
        alarm_threshold: model.timer.alarm_threshold(),
        alarm_raised: model.timer.is_alarm_raised(),
    };
    draw_status_bar(&ctx, &status);
    model.pointer_over_ui = ctx.is_pointer_over_area();
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let layout = Layout::calculate(app.window_rect(), model.header_height);
    let readout = &model.timer.host().readout;

    // Clear background
    draw.background().color(colors::BACKGROUND);

    draw_header(
        &draw,
        layout.header,
        &model.timer.zero_point().to_string(),
        &model.timer.alarm_threshold().to_string(),
    );
    draw_readout(&draw, readout, layout.readout);
    draw_progress(&draw, readout, layout.progress);
    draw_buttons(&draw, readout.face, layout.start_button, layout.stop_button);
    draw_done_indicator(&draw, readout, layout.done_indicator);

    // Render to frame
    draw.to_frame(app, &frame).unwrap();

    // Render egui on top
    model.egui.draw_to_frame(&frame).unwrap();
}

/// Map a click on the widget to a timer event
fn hit_test(layout: &Layout, done_visible: bool, point: Point2) -> Option<TimerEvent> {
    if layout.start_button.contains(point) {
        Some(TimerEvent::StartPauseClicked)
    } else if layout.stop_button.contains(point) {
        Some(TimerEvent::StopResetClicked)
    } else if done_visible && layout.done_indicator.contains(point) {
        Some(TimerEvent::AcknowledgeClicked)
    } else if layout.widget.contains(point) {
        let (x, y) = layout.to_widget_coords(point);
        Some(TimerEvent::HeaderClicked(Position::new(x, y)))
    } else {
        None
    }
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left || model.pointer_over_ui {
        return;
    }

    let pos = app.mouse.position();
    let layout = Layout::calculate(app.window_rect(), model.header_height);
    let done_visible = model.timer.host().readout.done_visible;
    if let Some(event) = hit_test(&layout, done_visible, pt2(pos.x, pos.y)) {
        debug!("click {:?}", event);
        model.timer.handle_event(event);
    }
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        // Space toggles start/pause
        Key::Space => model.timer.handle_event(TimerEvent::StartPauseClicked),
        // S or Back stops, and resets when already stopped
        Key::S | Key::Back => model.timer.handle_event(TimerEvent::StopResetClicked),
        // A edits the alarm threshold
        Key::A => model.timer.handle_event(TimerEvent::AcknowledgeClicked),
        // Z edits the zero-point (same as clicking the header)
        Key::Z => model
            .timer
            .handle_event(TimerEvent::HeaderClicked(Position::default())),
        _ => {}
    }
}

fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    // Let egui handle raw events for keyboard and mouse input
    model.egui.handle_raw_event(event);
}

fn exit(_app: &App, model: Model) {
    model.timer.shutdown();
}
