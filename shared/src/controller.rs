//! Timer controller - the stopwatch/countdown state machine
//!
//! Reacts to host ticks and click events, steps the current time toward the
//! alarm threshold and keeps the display and storage in sync. Nothing in here
//! returns an error to the host: storage and alarm failures are logged and
//! dropped, malformed input is ignored.

use tracing::{debug, info, warn};

use crate::host::{ButtonFace, Host};
use crate::time_value::TimeValue;

/// Config key holding the zero-point
pub const ZERO_TIME_KEY: &str = "zerotime";
/// Config key holding the alarm threshold
pub const ALARM_TIME_KEY: &str = "alarmtime";
/// Default height of the header strip that edits the zero-point
pub const DEFAULT_HEADER_HEIGHT: f32 = 70.0;

/// Running state of the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Not ticking; a stop click resets
    #[default]
    Idle,
    /// Ticking every update
    Running,
    /// Paused with the start button; current value preserved
    Paused,
}

/// Counting direction, derived from zero-point and alarm threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Stopwatch: zero-point below the alarm threshold
    Up,
    /// Countdown: zero-point at or above the alarm threshold
    Down,
}

/// Click position relative to the widget's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Discrete input delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerEvent {
    StartPauseClicked,
    StopResetClicked,
    /// The "done" indicator was clicked
    AcknowledgeClicked,
    /// Anywhere else on the widget
    HeaderClicked(Position),
}

/// Owns the three time values and drives the host
pub struct TimerController<H: Host> {
    host: H,
    zero_point: TimeValue,
    alarm_threshold: TimeValue,
    current: TimeValue,
    mode: Mode,
    alarm_raised: bool,
    header_height: f32,
}

impl<H: Host> TimerController<H> {
    /// New controller at `0:00:00` with nothing loaded yet
    pub fn create(host: H) -> Self {
        Self {
            host,
            zero_point: TimeValue::ZERO,
            alarm_threshold: TimeValue::ZERO,
            current: TimeValue::ZERO,
            mode: Mode::Idle,
            alarm_raised: false,
            header_height: DEFAULT_HEADER_HEIGHT,
        }
    }

    pub fn with_header_height(mut self, header_height: f32) -> Self {
        self.header_height = header_height;
        self
    }

    /// Read zero-point, alarm threshold and current time from storage and
    /// put the display into its initial state.
    pub fn load_persisted(&mut self) {
        load_entry(&self.host, ZERO_TIME_KEY, &mut self.zero_point);
        load_entry(&self.host, ALARM_TIME_KEY, &mut self.alarm_threshold);

        self.current = self.zero_point;
        match self.host.load_state() {
            Ok(Some(saved)) => {
                if let Err(e) = self.current.set_from_str(&saved) {
                    debug!("ignoring saved current time: {}", e);
                }
            }
            Ok(None) => debug!("no saved current time, starting at zero-point"),
            Err(e) => warn!("failed to read saved current time: {}", e),
        }

        info!(
            zero_point = %self.zero_point,
            alarm_threshold = %self.alarm_threshold,
            current = %self.current,
            "timer loaded"
        );

        self.host.set_progress_visible(false);
        self.show_time();
    }

    /// Advance one step if running
    pub fn tick(&mut self) {
        if self.mode != Mode::Running {
            return;
        }

        let direction = self.direction();
        match direction {
            Direction::Up => self.current.increment(1),
            Direction::Down => {
                if let Err(e) = self.current.decrement(1) {
                    debug!("stopping instead of going below zero: {}", e);
                    self.stop_or_reset();
                    return;
                }
            }
        }

        self.show_time();
        self.host.set_progress_value(self.progress_position());
        self.persist_current();

        if !self.alarm_raised && self.threshold_reached(direction) {
            self.host.set_done_visible(true);
            info!(current = %self.current, "alarm threshold reached");
            if let Err(e) = self.host.raise_alarm() {
                warn!("alarm could not be delivered: {}", e);
            }
            self.alarm_raised = true;
        }
    }

    /// Dispatch a click
    pub fn handle_event(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::StartPauseClicked => self.start_or_pause(),
            TimerEvent::StopResetClicked => self.stop_or_reset(),
            TimerEvent::AcknowledgeClicked => self.edit_alarm_threshold(),
            TimerEvent::HeaderClicked(position) => {
                if self.mode == Mode::Idle && position.y < self.header_height {
                    self.edit_zero_point();
                }
            }
        }
    }

    /// Flush the current time and hand the host back
    pub fn shutdown(mut self) -> H {
        self.persist_current();
        debug!("timer shut down at {}", self.current);
        self.host
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn direction(&self) -> Direction {
        if self.zero_point.total_seconds() < self.alarm_threshold.total_seconds() {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    pub fn is_alarm_raised(&self) -> bool {
        self.alarm_raised
    }

    pub fn current(&self) -> TimeValue {
        self.current
    }

    pub fn zero_point(&self) -> TimeValue {
        self.zero_point
    }

    pub fn alarm_threshold(&self) -> TimeValue {
        self.alarm_threshold
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn start_or_pause(&mut self) {
        if self.mode == Mode::Running {
            debug!("pause at {}", self.current);
            self.host.set_button_face(ButtonFace::Start);
            self.mode = Mode::Paused;
            return;
        }

        debug!("start at {}", self.current);
        let zero = self.zero_point.total_seconds();
        let alarm = self.alarm_threshold.total_seconds();
        self.host.set_progress_visible(true);
        self.host.set_progress_range(zero.min(alarm), zero.max(alarm));
        self.host.set_progress_value(self.progress_position());
        self.host.set_done_visible(false);
        self.host.set_button_face(ButtonFace::Pause);
        self.mode = Mode::Running;
    }

    fn stop_or_reset(&mut self) {
        if self.mode == Mode::Running {
            debug!("stop at {}", self.current);
            self.host.set_button_face(ButtonFace::Start);
            self.mode = Mode::Idle;
            return;
        }

        debug!("reset to {}", self.zero_point);
        self.current = self.zero_point;
        self.show_time();
        self.host.set_done_visible(true);
        self.host.set_progress_visible(false);
        self.persist_current();
        self.host.set_button_face(ButtonFace::Start);
        self.alarm_raised = false;
        self.mode = Mode::Idle;
    }

    fn edit_alarm_threshold(&mut self) {
        let seed = self.alarm_threshold.to_string();
        let Some(input) = self.host.prompt("Alarm Time", &seed) else {
            return;
        };
        if let Err(e) = self.alarm_threshold.set_from_str(&input) {
            debug!("alarm threshold unchanged: {}", e);
            return;
        }

        info!(alarm_threshold = %self.alarm_threshold, "alarm threshold changed");
        self.write_config(ALARM_TIME_KEY, self.alarm_threshold);
    }

    fn edit_zero_point(&mut self) {
        let seed = self.zero_point.to_string();
        let Some(input) = self.host.prompt("Initial Time", &seed) else {
            return;
        };
        if let Err(e) = self.zero_point.set_from_str(&input) {
            debug!("zero-point unchanged: {}", e);
            return;
        }

        info!(zero_point = %self.zero_point, "zero-point changed");
        self.write_config(ZERO_TIME_KEY, self.zero_point);
        self.current = self.zero_point;
        self.alarm_raised = false;
        self.show_time();
        self.persist_current();
    }

    fn threshold_reached(&self, direction: Direction) -> bool {
        let current = self.current.total_seconds();
        let alarm = self.alarm_threshold.total_seconds();
        match direction {
            Direction::Up => current >= alarm,
            Direction::Down => current <= alarm,
        }
    }

    /// Bar position: elapsed time when counting up, mirrored when counting down
    fn progress_position(&self) -> u64 {
        let current = self.current.total_seconds();
        match self.direction() {
            Direction::Up => current,
            Direction::Down => self
                .alarm_threshold
                .total_seconds()
                .saturating_add(self.zero_point.total_seconds())
                .saturating_sub(current),
        }
    }

    fn show_time(&mut self) {
        let (hours, minutes, seconds) = self.current.display_fields();
        self.host.show_time(&hours, &minutes, &seconds);
    }

    fn persist_current(&mut self) {
        if let Err(e) = self.host.save_state(&self.current.to_string()) {
            warn!("failed to save current time: {}", e);
        }
    }

    fn write_config(&mut self, key: &str, value: TimeValue) {
        if let Err(e) = self.host.write_entry(key, &value.to_string()) {
            warn!("failed to write {}: {}", key, e);
        }
    }
}

/// Parse a config entry into `target`, keeping the prior value when it is
/// missing or malformed.
fn load_entry<H: Host>(host: &H, key: &str, target: &mut TimeValue) {
    match host.read_entry(key) {
        Some(raw) => {
            if let Err(e) = target.set_from_str(&raw) {
                debug!("ignoring config entry {}: {}", key, e);
            }
        }
        None => debug!("config entry {} not set", key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::host::{AlarmError, AlarmHook, ConfigStore, DisplaySink, Prompt, StateStore};
    use std::collections::{BTreeMap, VecDeque};
    use std::io;

    /// Host double that records what the controller asked for
    #[derive(Default)]
    struct RecordingHost {
        shown: Option<(String, String, String)>,
        progress_visible: bool,
        progress_range: Option<(u64, u64)>,
        progress_value: Option<u64>,
        done_visible: bool,
        face: Option<ButtonFace>,
        prompts: Vec<(String, String)>,
        answers: VecDeque<Option<String>>,
        alarms: usize,
        fail_alarm: bool,
        entries: BTreeMap<String, String>,
        entry_writes: usize,
        state: Option<String>,
        state_writes: usize,
        fail_storage: bool,
    }

    impl RecordingHost {
        fn with_entries(zero: &str, alarm: &str) -> Self {
            let mut host = Self::default();
            host.entries.insert(ZERO_TIME_KEY.to_string(), zero.to_string());
            host.entries.insert(ALARM_TIME_KEY.to_string(), alarm.to_string());
            host
        }

        fn answering(mut self, answer: Option<&str>) -> Self {
            self.answers.push_back(answer.map(str::to_string));
            self
        }

        fn shown_text(&self) -> String {
            let (h, m, s) = self.shown.clone().unwrap_or_default();
            format!("{}:{}:{}", h, m, s)
        }
    }

    impl DisplaySink for RecordingHost {
        fn show_time(&mut self, hours: &str, minutes: &str, seconds: &str) {
            self.shown = Some((hours.to_string(), minutes.to_string(), seconds.to_string()));
        }
        fn set_progress_visible(&mut self, visible: bool) {
            self.progress_visible = visible;
        }
        fn set_progress_range(&mut self, min: u64, max: u64) {
            self.progress_range = Some((min, max));
        }
        fn set_progress_value(&mut self, value: u64) {
            self.progress_value = Some(value);
        }
        fn set_done_visible(&mut self, visible: bool) {
            self.done_visible = visible;
        }
        fn set_button_face(&mut self, face: ButtonFace) {
            self.face = Some(face);
        }
    }

    impl Prompt for RecordingHost {
        fn prompt(&mut self, title: &str, seed: &str) -> Option<String> {
            self.prompts.push((title.to_string(), seed.to_string()));
            self.answers.pop_front().flatten()
        }
    }

    impl AlarmHook for RecordingHost {
        fn raise_alarm(&mut self) -> Result<(), AlarmError> {
            self.alarms += 1;
            if self.fail_alarm {
                return Err(AlarmError::Unavailable("no speaker".to_string()));
            }
            Ok(())
        }
    }

    impl ConfigStore for RecordingHost {
        fn read_entry(&self, key: &str) -> Option<String> {
            self.entries.get(key).cloned()
        }
        fn write_entry(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
            self.entry_writes += 1;
            if self.fail_storage {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only").into());
            }
            self.entries.insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    impl StateStore for RecordingHost {
        fn load_state(&self) -> Result<Option<String>, ConfigError> {
            Ok(self.state.clone())
        }
        fn save_state(&mut self, value: &str) -> Result<(), ConfigError> {
            self.state_writes += 1;
            if self.fail_storage {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only").into());
            }
            self.state = Some(value.to_string());
            Ok(())
        }
    }

    fn loaded(host: RecordingHost) -> TimerController<RecordingHost> {
        let mut timer = TimerController::create(host);
        timer.load_persisted();
        timer
    }

    fn tv(s: &str) -> TimeValue {
        s.parse().unwrap()
    }

    #[test]
    fn test_load_uses_config_and_saved_state() {
        let mut host = RecordingHost::with_entries("0:10:00", "0:00:00");
        host.state = Some("0:04:30\n".to_string());
        let timer = loaded(host);

        assert_eq!(timer.zero_point(), tv("0:10:00"));
        assert_eq!(timer.alarm_threshold(), TimeValue::ZERO);
        assert_eq!(timer.current(), tv("0:04:30"));
        assert_eq!(timer.direction(), Direction::Down);
        assert_eq!(timer.mode(), Mode::Idle);
        assert_eq!(timer.host().shown_text(), "0:04:30");
        assert!(!timer.host().progress_visible);
    }

    #[test]
    fn test_load_falls_back_on_missing_or_malformed_values() {
        let mut host = RecordingHost::with_entries("0:02:00", "garbage");
        host.state = Some("1:70:00".to_string());
        let timer = loaded(host);

        assert_eq!(timer.zero_point(), tv("0:02:00"));
        assert_eq!(timer.alarm_threshold(), TimeValue::ZERO);
        assert_eq!(timer.current(), tv("0:02:00"));

        let timer = loaded(RecordingHost::default());
        assert_eq!(timer.current(), TimeValue::ZERO);
        assert_eq!(timer.host().shown_text(), "0:00:00");
    }

    #[test]
    fn test_tick_is_ignored_unless_running() {
        let mut timer = loaded(RecordingHost::with_entries("0:00:00", "0:00:05"));
        timer.tick();
        assert_eq!(timer.current(), TimeValue::ZERO);
        assert_eq!(timer.host().state_writes, 0);
    }

    #[test]
    fn test_start_configures_progress_and_buttons() {
        let mut timer = loaded(RecordingHost::with_entries("0:01:00", "0:00:10"));
        assert_eq!(timer.direction(), Direction::Down);
        timer.host_mut().done_visible = true;
        timer.handle_event(TimerEvent::StartPauseClicked);

        let host = timer.host();
        assert_eq!(timer.mode(), Mode::Running);
        assert!(host.progress_visible);
        assert_eq!(host.progress_range, Some((10, 60)));
        assert_eq!(host.progress_value, Some(10));
        assert!(!host.done_visible);
        assert_eq!(host.face, Some(ButtonFace::Pause));

        // Countdown mid-run: the bar shows the mirrored position, not raw seconds
        let mut host = RecordingHost::with_entries("0:01:00", "0:00:10");
        host.state = Some("0:00:40".to_string());
        let mut timer = loaded(host);
        timer.handle_event(TimerEvent::StartPauseClicked);
        assert_eq!(timer.host().progress_value, Some(30));
    }

    #[test]
    fn test_stopwatch_alarm_fires_once() {
        let mut timer = loaded(RecordingHost::with_entries("0:00:00", "0:00:05"));
        assert_eq!(timer.direction(), Direction::Up);
        timer.handle_event(TimerEvent::StartPauseClicked);

        for expected in 1..=4u64 {
            timer.tick();
            assert_eq!(timer.current().total_seconds(), expected);
            assert!(!timer.is_alarm_raised());
        }

        timer.tick();
        assert_eq!(timer.current().total_seconds(), 5);
        assert!(timer.is_alarm_raised());
        assert!(timer.host().done_visible);
        assert_eq!(timer.host().alarms, 1);

        timer.tick();
        assert_eq!(timer.current().total_seconds(), 6);
        assert_eq!(timer.host().alarms, 1);
        assert_eq!(timer.host().state.as_deref(), Some("0:00:06"));
        assert_eq!(timer.host().progress_value, Some(6));
    }

    #[test]
    fn test_countdown_alarm_then_reset() {
        let mut timer = loaded(RecordingHost::with_entries("0:01:00", "0:00:00"));
        assert_eq!(timer.direction(), Direction::Down);
        timer.handle_event(TimerEvent::StartPauseClicked);

        for _ in 0..59 {
            timer.tick();
        }
        assert_eq!(timer.current().total_seconds(), 1);
        assert_eq!(timer.host().alarms, 0);
        assert_eq!(timer.host().progress_value, Some(59));

        timer.tick();
        assert_eq!(timer.current(), TimeValue::ZERO);
        assert_eq!(timer.host().alarms, 1);
        assert_eq!(timer.host().progress_value, Some(60));

        // Running -> stop only
        timer.handle_event(TimerEvent::StopResetClicked);
        assert_eq!(timer.mode(), Mode::Idle);
        assert_eq!(timer.current(), TimeValue::ZERO);
        assert!(timer.is_alarm_raised());

        // Idle -> reset
        timer.handle_event(TimerEvent::StopResetClicked);
        assert_eq!(timer.current(), tv("0:01:00"));
        assert!(!timer.is_alarm_raised());
        assert_eq!(timer.host().state.as_deref(), Some("0:01:00"));
        assert_eq!(timer.host().shown_text(), "0:01:00");
        assert!(!timer.host().progress_visible);
        assert!(timer.host().done_visible);
    }

    #[test]
    fn test_countdown_underflow_stops_timer() {
        let mut timer = loaded(RecordingHost::with_entries("0:00:01", "0:00:00"));
        timer.handle_event(TimerEvent::StartPauseClicked);

        timer.tick();
        assert_eq!(timer.current(), TimeValue::ZERO);
        assert_eq!(timer.host().alarms, 1);
        let writes = timer.host().state_writes;

        timer.tick();
        assert_eq!(timer.mode(), Mode::Idle);
        assert_eq!(timer.current(), TimeValue::ZERO);
        assert_eq!(timer.host().face, Some(ButtonFace::Start));
        assert_eq!(timer.host().state_writes, writes);
        assert_eq!(timer.host().alarms, 1);
    }

    #[test]
    fn test_stop_while_running_pauses_then_resets() {
        let mut timer = loaded(RecordingHost::with_entries("0:00:00", "0:10:00"));
        timer.handle_event(TimerEvent::StartPauseClicked);
        timer.tick();
        timer.tick();

        timer.handle_event(TimerEvent::StopResetClicked);
        assert_eq!(timer.mode(), Mode::Idle);
        assert_eq!(timer.current(), tv("0:00:02"));
        assert_eq!(timer.host().face, Some(ButtonFace::Start));

        timer.tick();
        assert_eq!(timer.current(), tv("0:00:02"));

        timer.handle_event(TimerEvent::StopResetClicked);
        assert_eq!(timer.current(), TimeValue::ZERO);
    }

    #[test]
    fn test_start_toggles_pause_and_resume() {
        let mut timer = loaded(RecordingHost::with_entries("0:00:00", "0:10:00"));
        timer.handle_event(TimerEvent::StartPauseClicked);
        timer.tick();

        timer.handle_event(TimerEvent::StartPauseClicked);
        assert_eq!(timer.mode(), Mode::Paused);
        assert_eq!(timer.host().face, Some(ButtonFace::Start));
        timer.tick();
        assert_eq!(timer.current(), tv("0:00:01"));

        timer.handle_event(TimerEvent::StartPauseClicked);
        assert_eq!(timer.mode(), Mode::Running);
        timer.tick();
        assert_eq!(timer.current(), tv("0:00:02"));

        // Stop from paused resets
        timer.handle_event(TimerEvent::StartPauseClicked);
        timer.handle_event(TimerEvent::StopResetClicked);
        assert_eq!(timer.current(), TimeValue::ZERO);
        assert_eq!(timer.mode(), Mode::Idle);
    }

    #[test]
    fn test_acknowledge_updates_alarm_threshold() {
        let host = RecordingHost::with_entries("0:00:00", "0:05:00").answering(Some("0:07:30\n"));
        let mut timer = loaded(host);

        timer.handle_event(TimerEvent::AcknowledgeClicked);
        assert_eq!(
            timer.host().prompts,
            vec![("Alarm Time".to_string(), "0:05:00".to_string())]
        );
        assert_eq!(timer.alarm_threshold(), tv("0:07:30"));
        assert_eq!(
            timer.host().entries.get(ALARM_TIME_KEY).map(String::as_str),
            Some("0:07:30")
        );
    }

    #[test]
    fn test_acknowledge_ignores_cancel_and_malformed_input() {
        let host = RecordingHost::with_entries("0:00:00", "0:05:00")
            .answering(None)
            .answering(Some("5 minutes"));
        let mut timer = loaded(host);

        timer.handle_event(TimerEvent::AcknowledgeClicked);
        timer.handle_event(TimerEvent::AcknowledgeClicked);
        assert_eq!(timer.alarm_threshold(), tv("0:05:00"));
        assert_eq!(timer.host().prompts.len(), 2);
        assert_eq!(timer.host().entry_writes, 0);
    }

    #[test]
    fn test_header_click_sets_zero_point_when_idle() {
        let host = RecordingHost::with_entries("0:00:00", "0:05:00").answering(Some("0:20:00"));
        let mut timer = loaded(host);

        timer.handle_event(TimerEvent::HeaderClicked(Position::new(10.0, 20.0)));
        assert_eq!(
            timer.host().prompts,
            vec![("Initial Time".to_string(), "0:00:00".to_string())]
        );
        assert_eq!(timer.zero_point(), tv("0:20:00"));
        assert_eq!(timer.current(), tv("0:20:00"));
        assert_eq!(timer.direction(), Direction::Down);
        assert_eq!(timer.host().shown_text(), "0:20:00");
        assert_eq!(timer.host().state.as_deref(), Some("0:20:00"));
        assert_eq!(
            timer.host().entries.get(ZERO_TIME_KEY).map(String::as_str),
            Some("0:20:00")
        );
    }

    #[test]
    fn test_header_click_ignored_outside_header_or_when_active() {
        let host = RecordingHost::with_entries("0:00:00", "0:05:00").answering(Some("0:20:00"));
        let mut timer = loaded(host).with_header_height(40.0);

        timer.handle_event(TimerEvent::HeaderClicked(Position::new(10.0, 50.0)));
        assert!(timer.host().prompts.is_empty());

        timer.handle_event(TimerEvent::StartPauseClicked);
        timer.handle_event(TimerEvent::HeaderClicked(Position::new(10.0, 5.0)));
        timer.handle_event(TimerEvent::StartPauseClicked);
        assert_eq!(timer.mode(), Mode::Paused);
        timer.handle_event(TimerEvent::HeaderClicked(Position::new(10.0, 5.0)));
        assert!(timer.host().prompts.is_empty());
        assert_eq!(timer.zero_point(), TimeValue::ZERO);
    }

    #[test]
    fn test_header_click_ignores_cancel_and_malformed_input() {
        let mut host = RecordingHost::with_entries("0:05:00", "0:00:00")
            .answering(None)
            .answering(Some("1:70:00"));
        host.state = Some("0:03:00".to_string());
        let mut timer = loaded(host);

        timer.handle_event(TimerEvent::HeaderClicked(Position::new(10.0, 20.0)));
        timer.handle_event(TimerEvent::HeaderClicked(Position::new(10.0, 20.0)));

        assert_eq!(timer.host().prompts.len(), 2);
        assert_eq!(timer.zero_point(), tv("0:05:00"));
        assert_eq!(timer.current(), tv("0:03:00"));
        assert_eq!(timer.host().entry_writes, 0);
        assert_eq!(timer.host().state_writes, 0);
    }

    #[test]
    fn test_largest_values_never_panic() {
        let max = format!("{}:00:00", crate::time_value::MAX_HOURS);
        let mut timer = loaded(RecordingHost::with_entries(&max, &max));
        assert_eq!(timer.direction(), Direction::Down);

        timer.handle_event(TimerEvent::StartPauseClicked);
        assert_eq!(timer.mode(), Mode::Running);
        timer.tick();
        assert!(timer.is_alarm_raised());
        assert!(timer.host().progress_value.is_some());

        // Stopwatch pinned at the top of the range keeps counting up
        let top = TimeValue::MAX.to_string();
        let mut host = RecordingHost::with_entries("0:00:00", &top);
        host.state = Some(top.clone());
        let mut timer = loaded(host);
        timer.handle_event(TimerEvent::StartPauseClicked);
        timer.tick();
        assert_eq!(timer.current(), TimeValue::MAX);
        assert_eq!(timer.host().progress_value, Some(TimeValue::MAX.total_seconds()));
    }

    #[test]
    fn test_failures_never_escape_callbacks() {
        let mut host = RecordingHost::with_entries("0:00:00", "0:00:01").answering(Some("0:00:09"));
        host.fail_alarm = true;
        host.fail_storage = true;
        let mut timer = loaded(host);

        timer.handle_event(TimerEvent::StartPauseClicked);
        timer.tick();
        assert!(timer.is_alarm_raised());
        assert_eq!(timer.host().alarms, 1);
        assert_eq!(timer.host().state, None);

        timer.handle_event(TimerEvent::AcknowledgeClicked);
        assert_eq!(timer.alarm_threshold(), tv("0:00:09"));
    }

    #[test]
    fn test_shutdown_flushes_current() {
        let mut timer = loaded(RecordingHost::with_entries("0:00:00", "0:10:00"));
        timer.handle_event(TimerEvent::StartPauseClicked);
        timer.tick();
        timer.tick();
        timer.tick();

        let host = timer.shutdown();
        assert_eq!(host.state.as_deref(), Some("0:00:03"));
    }
}
