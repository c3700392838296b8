//! Interval countdown state machine
//!
//! ```text
//! Idle -> Working <-> Paused
//!           |
//!           v
//!        Resting -> Working (next interval) | Complete
//! ```
//!
//! The controller owns no clock. Something outside calls [`IntervalController::tick`]
//! once per second while [`IntervalController::is_counting`] is true.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    error::ControlError,
    input::{WorkoutConfig, WorkoutInput},
    ui::WorkoutUi,
};

pub const COMPLETE_TITLE: &str = "Workout complete!";
pub const COMPLETE_BODY: &str = "Congratulations on completing your workout!";
pub const REST_REMINDER: &str = "Rest time!";

/// Phase without its payload, for display and error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKind {
    Idle,
    Working,
    Paused,
    Resting,
    Complete,
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PhaseKind::Idle => "idle",
            PhaseKind::Working => "working",
            PhaseKind::Paused => "paused",
            PhaseKind::Resting => "resting",
            PhaseKind::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// A countdown in progress within one interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub config: WorkoutConfig,
    /// 1-based, never above `config.interval_count`
    pub interval: u32,
    pub remaining_seconds: u32,
}

impl Countdown {
    fn work(config: WorkoutConfig, interval: u32) -> Self {
        Self {
            config,
            interval,
            remaining_seconds: config.work_duration_seconds,
        }
    }

    fn rest(self) -> Self {
        Self {
            remaining_seconds: self.config.rest_duration_seconds,
            ..self
        }
    }
}

/// Run state of the workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Working(Countdown),
    /// Frozen work countdown, resumable by `start`
    Paused(Countdown),
    Resting(Countdown),
    Complete { config: WorkoutConfig },
}

impl RunState {
    pub fn kind(&self) -> PhaseKind {
        match self {
            RunState::Idle => PhaseKind::Idle,
            RunState::Working(_) => PhaseKind::Working,
            RunState::Paused(_) => PhaseKind::Paused,
            RunState::Resting(_) => PhaseKind::Resting,
            RunState::Complete { .. } => PhaseKind::Complete,
        }
    }
}

/// Serializable view of the run state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub phase: PhaseKind,
    pub current_interval: u32,
    pub remaining_seconds: u32,
    pub interval_count: Option<u32>,
    /// Full length of the current phase, zero outside a countdown
    pub phase_duration_seconds: u32,
}

impl From<&RunState> for RunSnapshot {
    fn from(state: &RunState) -> Self {
        let phase = state.kind();
        match *state {
            RunState::Idle => Self {
                phase,
                current_interval: 1,
                remaining_seconds: 0,
                interval_count: None,
                phase_duration_seconds: 0,
            },
            RunState::Working(c) | RunState::Paused(c) => Self {
                phase,
                current_interval: c.interval,
                remaining_seconds: c.remaining_seconds,
                interval_count: Some(c.config.interval_count),
                phase_duration_seconds: c.config.work_duration_seconds,
            },
            RunState::Resting(c) => Self {
                phase,
                current_interval: c.interval,
                remaining_seconds: c.remaining_seconds,
                interval_count: Some(c.config.interval_count),
                phase_duration_seconds: c.config.rest_duration_seconds,
            },
            RunState::Complete { config } => Self {
                phase,
                current_interval: config.interval_count,
                remaining_seconds: 0,
                interval_count: Some(config.interval_count),
                phase_duration_seconds: 0,
            },
        }
    }
}

/// Drives a workout through its phases and reports to a [`WorkoutUi`]
#[derive(Debug)]
pub struct IntervalController<U> {
    state: RunState,
    ui: U,
}

impl<U: WorkoutUi> IntervalController<U> {
    pub fn new(ui: U) -> Self {
        Self {
            state: RunState::Idle,
            ui,
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn phase(&self) -> PhaseKind {
        self.state.kind()
    }

    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot::from(&self.state)
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    /// True while a tick source should be running
    pub fn is_counting(&self) -> bool {
        matches!(self.state, RunState::Working(_) | RunState::Resting(_))
    }

    /// Start a new workout from Idle, or resume a paused one.
    ///
    /// When resuming, `input` is ignored: the configuration captured at the
    /// original start stays in force.
    pub fn start(&mut self, input: &WorkoutInput) -> Result<PhaseKind, ControlError> {
        match self.state {
            RunState::Idle => {
                let config = match input.validate() {
                    Ok(config) => config,
                    Err(e) => {
                        if let Some(field) = e.field() {
                            debug!("Rejecting start, invalid field {}: {}", field, e);
                            self.ui.report_validation_error(field, &e.to_string());
                        }
                        return Err(e);
                    }
                };

                info!(
                    "Starting workout: {} intervals, {}s work, {}s rest",
                    config.interval_count, config.work_duration_seconds, config.rest_duration_seconds
                );
                self.enter_work(Countdown::work(config, 1));
                Ok(PhaseKind::Working)
            }
            RunState::Paused(countdown) => {
                info!(
                    "Resuming interval {} with {}s remaining",
                    countdown.interval, countdown.remaining_seconds
                );
                self.state = RunState::Working(countdown);
                self.ui.display_progress(
                    PhaseKind::Working,
                    countdown.remaining_seconds,
                    countdown.config.work_duration_seconds,
                );
                Ok(PhaseKind::Working)
            }
            other => Err(ControlError::NotStartable(other.kind())),
        }
    }

    /// Freeze the work countdown. Rest cannot be paused.
    pub fn pause(&mut self) -> Result<PhaseKind, ControlError> {
        match self.state {
            RunState::Working(countdown) => {
                info!(
                    "Pausing interval {} with {}s remaining",
                    countdown.interval, countdown.remaining_seconds
                );
                self.state = RunState::Paused(countdown);
                self.ui.display_progress(
                    PhaseKind::Paused,
                    countdown.remaining_seconds,
                    countdown.config.work_duration_seconds,
                );
                Ok(PhaseKind::Paused)
            }
            other => Err(ControlError::NotPausable(other.kind())),
        }
    }

    /// The combined Start/Pause button
    pub fn toggle(&mut self, input: &WorkoutInput) -> Result<PhaseKind, ControlError> {
        if matches!(self.state, RunState::Working(_)) {
            self.pause()
        } else {
            self.start(input)
        }
    }

    /// Return to Idle from any phase
    pub fn reset(&mut self) {
        if self.state != RunState::Idle {
            info!("Resetting workout from {}", self.state.kind());
        }
        self.state = RunState::Idle;
        self.ui.display_progress(PhaseKind::Idle, 0, 0);
        self.ui.show_reminder("");
    }

    /// Advance the running countdown by one second.
    ///
    /// Returns whether a countdown is still running afterwards.
    pub fn tick(&mut self) -> bool {
        match self.state {
            RunState::Working(mut countdown) => {
                countdown.remaining_seconds = countdown.remaining_seconds.saturating_sub(1);
                self.ui.display_progress(
                    PhaseKind::Working,
                    countdown.remaining_seconds,
                    countdown.config.work_duration_seconds,
                );
                if countdown.remaining_seconds == 0 {
                    self.finish_work(countdown);
                } else {
                    self.state = RunState::Working(countdown);
                }
            }
            RunState::Resting(mut countdown) => {
                countdown.remaining_seconds = countdown.remaining_seconds.saturating_sub(1);
                self.ui.display_progress(
                    PhaseKind::Resting,
                    countdown.remaining_seconds,
                    countdown.config.rest_duration_seconds,
                );
                if countdown.remaining_seconds == 0 {
                    self.finish_rest(countdown);
                } else {
                    self.state = RunState::Resting(countdown);
                }
            }
            RunState::Idle | RunState::Paused(_) | RunState::Complete { .. } => {}
        }

        self.is_counting()
    }

    fn enter_work(&mut self, countdown: Countdown) {
        self.state = RunState::Working(countdown);
        self.ui.display_progress(
            PhaseKind::Working,
            countdown.remaining_seconds,
            countdown.config.work_duration_seconds,
        );
        self.ui
            .show_reminder(&format!("Interval {} - Let's go!", countdown.interval));
    }

    fn finish_work(&mut self, countdown: Countdown) {
        debug!("Work phase of interval {} finished", countdown.interval);
        let rest = countdown.rest();
        self.state = RunState::Resting(rest);
        self.ui.display_progress(
            PhaseKind::Resting,
            rest.remaining_seconds,
            rest.config.rest_duration_seconds,
        );
        self.ui.show_reminder(REST_REMINDER);
    }

    fn finish_rest(&mut self, countdown: Countdown) {
        debug!("Rest phase of interval {} finished", countdown.interval);
        let config = countdown.config;

        if countdown.interval >= config.interval_count {
            info!("Workout complete after {} intervals", config.interval_count);
            self.state = RunState::Complete { config };
            self.ui.display_progress(PhaseKind::Complete, 0, 0);
            self.ui.show_reminder("");
            self.ui.show_notification(COMPLETE_TITLE, COMPLETE_BODY);
        } else {
            self.enter_work(Countdown::work(config, countdown.interval + 1));
        }
    }
}
