//! Host collaborators
//!
//! The widget host owns rendering, dialogs, sound and storage. The timer core
//! only talks to it through these traits, so any host (a nannou window, a test
//! double) can drive it.

use thiserror::Error;

use crate::config::ConfigError;

/// Which affordance the start and stop buttons currently show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonFace {
    /// Timer is not running: "start" and "stop/reset"
    Start,
    /// Timer is running: "pause" on both buttons
    Pause,
}

/// Failure to deliver an alarm notification
#[derive(Debug, Error)]
pub enum AlarmError {
    #[error("failed to launch alarm command: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("alarm unavailable: {0}")]
    Unavailable(String),
}

/// Text readout, progress bar, "done" indicator and button imagery
pub trait DisplaySink {
    /// Show hours (unpadded), minutes and seconds (zero-padded)
    fn show_time(&mut self, hours: &str, minutes: &str, seconds: &str);
    fn set_progress_visible(&mut self, visible: bool);
    fn set_progress_range(&mut self, min: u64, max: u64);
    fn set_progress_value(&mut self, value: u64);
    fn set_done_visible(&mut self, visible: bool);
    fn set_button_face(&mut self, face: ButtonFace);
}

/// Blocking text-input dialog
pub trait Prompt {
    /// Ask for a value, seeded with `seed`. `None` means cancelled or empty.
    fn prompt(&mut self, title: &str, seed: &str) -> Option<String>;
}

/// Best-effort notification fired when the alarm threshold is crossed
pub trait AlarmHook {
    fn raise_alarm(&mut self) -> Result<(), AlarmError>;
}

/// Key/value configuration entries
pub trait ConfigStore {
    fn read_entry(&self, key: &str) -> Option<String>;
    fn write_entry(&mut self, key: &str, value: &str) -> Result<(), ConfigError>;
}

/// Storage for the current time string
pub trait StateStore {
    /// Returns `None` when nothing has been saved yet
    fn load_state(&self) -> Result<Option<String>, ConfigError>;
    fn save_state(&mut self, value: &str) -> Result<(), ConfigError>;
}

/// Everything the timer controller needs from its host
pub trait Host: DisplaySink + Prompt + AlarmHook + ConfigStore + StateStore {}

impl<T> Host for T where T: DisplaySink + Prompt + AlarmHook + ConfigStore + StateStore {}
