//! Shared core of the stop timer widget
//!
//! Host-independent pieces: the `H:MM:SS` time value, the stopwatch/countdown
//! controller, the traits a widget host implements, and config persistence.

pub mod config;
pub mod controller;
pub mod host;
pub mod time_value;

pub use config::{
    config_dir, config_path, data_dir, load_config_from, save_config_to, state_path, ConfigError,
    StateFile, TomlConfigStore, WidgetConfig, WidgetSettings,
};
pub use controller::{
    Direction, Mode, Position, TimerController, TimerEvent, ALARM_TIME_KEY, ZERO_TIME_KEY,
};
pub use host::{AlarmError, AlarmHook, ButtonFace, ConfigStore, DisplaySink, Host, Prompt, StateStore};
pub use time_value::{TimeError, TimeValue};
