//! Host module - the window-side collaborators of the timer
//!
//! `WidgetHost` bundles the readout the view renders, the config and state
//! stores, the dialog used for editing and the alarm command.

use std::process::{Command, Stdio};

use shared::{
    AlarmError, AlarmHook, ButtonFace, ConfigError, ConfigStore, DisplaySink, Prompt, StateFile,
    StateStore, TomlConfigStore,
};
use tracing::{debug, info, warn};

/// Everything the view needs to draw the timer
#[derive(Debug, Clone, PartialEq)]
pub struct Readout {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    pub progress_visible: bool,
    pub progress_min: u64,
    pub progress_max: u64,
    pub progress_value: u64,
    pub done_visible: bool,
    pub face: ButtonFace,
}

impl Default for Readout {
    fn default() -> Self {
        Self {
            hours: "0".to_string(),
            minutes: "00".to_string(),
            seconds: "00".to_string(),
            progress_visible: false,
            progress_min: 0,
            progress_max: 0,
            progress_value: 0,
            // Shown until a run starts so the alarm threshold can be edited
            done_visible: true,
            face: ButtonFace::Start,
        }
    }
}

impl Readout {
    /// Fill level of the progress bar in `0.0..=1.0`
    pub fn progress_fraction(&self) -> f32 {
        if self.progress_max <= self.progress_min {
            return 1.0;
        }
        let span = (self.progress_max - self.progress_min) as f64;
        let filled = self.progress_value.saturating_sub(self.progress_min) as f64;
        (filled / span).clamp(0.0, 1.0) as f32
    }
}

/// Asks for a value by running an external dialog command (kdialog style):
/// the title and seed are appended as arguments and stdout is the answer.
#[derive(Debug, Clone)]
pub struct CommandPrompt {
    command: Vec<String>,
}

impl CommandPrompt {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

impl Prompt for CommandPrompt {
    fn prompt(&mut self, title: &str, seed: &str) -> Option<String> {
        let (program, args) = self.command.split_first()?;
        let output = match Command::new(program)
            .args(args)
            .arg(title)
            .arg(seed)
            .stdin(Stdio::null())
            .output()
        {
            Ok(output) => output,
            Err(e) => {
                warn!("failed to run prompt command {}: {}", program, e);
                return None;
            }
        };

        if !output.status.success() {
            debug!("prompt {:?} cancelled ({})", title, output.status);
            return None;
        }

        let answer = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!answer.is_empty()).then_some(answer)
    }
}

/// Runs a configured command when the alarm fires
#[derive(Debug, Clone)]
pub struct CommandAlarm {
    command: Vec<String>,
}

impl CommandAlarm {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

impl AlarmHook for CommandAlarm {
    fn raise_alarm(&mut self) -> Result<(), AlarmError> {
        info!("ALARM!");
        let Some((program, args)) = self.command.split_first() else {
            return Ok(());
        };
        // Not waited on; the sound plays while the timer keeps ticking
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .spawn()?;
        Ok(())
    }
}

/// The window acting as widget host
pub struct WidgetHost {
    pub readout: Readout,
    config: TomlConfigStore,
    state: StateFile,
    prompt: CommandPrompt,
    alarm: CommandAlarm,
}

impl WidgetHost {
    /// Host whose prompt and alarm commands come from the config settings
    pub fn new(config: TomlConfigStore, state: StateFile) -> Self {
        let settings = config.settings().clone();
        Self {
            readout: Readout::default(),
            config,
            state,
            prompt: CommandPrompt::new(settings.prompt_command),
            alarm: CommandAlarm::new(settings.alarm_command),
        }
    }
}

impl DisplaySink for WidgetHost {
    fn show_time(&mut self, hours: &str, minutes: &str, seconds: &str) {
        self.readout.hours = hours.to_string();
        self.readout.minutes = minutes.to_string();
        self.readout.seconds = seconds.to_string();
    }

    fn set_progress_visible(&mut self, visible: bool) {
        self.readout.progress_visible = visible;
    }

    fn set_progress_range(&mut self, min: u64, max: u64) {
        self.readout.progress_min = min;
        self.readout.progress_max = max;
    }

    fn set_progress_value(&mut self, value: u64) {
        self.readout.progress_value = value;
    }

    fn set_done_visible(&mut self, visible: bool) {
        self.readout.done_visible = visible;
    }

    fn set_button_face(&mut self, face: ButtonFace) {
        self.readout.face = face;
    }
}

impl Prompt for WidgetHost {
    fn prompt(&mut self, title: &str, seed: &str) -> Option<String> {
        self.prompt.prompt(title, seed)
    }
}

impl AlarmHook for WidgetHost {
    fn raise_alarm(&mut self) -> Result<(), AlarmError> {
        self.alarm.raise_alarm()
    }
}

impl ConfigStore for WidgetHost {
    fn read_entry(&self, key: &str) -> Option<String> {
        self.config.read_entry(key)
    }

    fn write_entry(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.config.write_entry(key, value)
    }
}

impl StateStore for WidgetHost {
    fn load_state(&self) -> Result<Option<String>, ConfigError> {
        self.state.load_state()
    }

    fn save_state(&mut self, value: &str) -> Result<(), ConfigError> {
        self.state.save_state(value)
    }
}
