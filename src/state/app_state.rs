//! Main application state management

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard,
    },
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::{
    sync::{broadcast, watch},
    task::JoinHandle,
};
use tracing::{debug, info};

use super::{ChannelUi, DisplayState, Notification};
use crate::{
    tasks::tick_task,
    workout::{ControlError, IntervalController, PhaseKind, RunSnapshot, WorkoutInput},
};

/// Errors surfaced by [`AppState`] actions
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Control(#[from] ControlError),

    #[error("Failed to lock {0}")]
    Lock(&'static str),
}

/// Main application state: the workout controller and its tick source
#[derive(Debug)]
pub struct AppState {
    /// The workout, shared between handlers and the tick task
    pub controller: Mutex<IntervalController<ChannelUi>>,
    /// Currently running tick task; at most one exists at a time
    ticker: Mutex<Option<JoinHandle<()>>>,
    /// Bumped under the controller lock whenever the tick source is replaced
    /// or cancelled. Ticks from any other generation are ignored.
    tick_generation: AtomicU64,
    pub tick_period: Duration,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Channels for notifications and display changes
    pub notification_tx: broadcast::Sender<Notification>,
    pub display_rx: watch::Receiver<DisplayState>,
}

impl AppState {
    /// Create a new AppState with an idle workout
    pub fn new(port: u16, host: String, tick_period: Duration) -> Self {
        let (notification_tx, _) = broadcast::channel(16);
        let (display_tx, display_rx) = watch::channel(DisplayState::new());
        let ui = ChannelUi::new(display_tx, notification_tx.clone());

        Self {
            controller: Mutex::new(IntervalController::new(ui)),
            ticker: Mutex::new(None),
            tick_generation: AtomicU64::new(0),
            tick_period,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            notification_tx,
            display_rx,
        }
    }

    fn lock_controller(&self) -> Result<MutexGuard<'_, IntervalController<ChannelUi>>, AppError> {
        self.controller.lock().map_err(|_| AppError::Lock("workout controller"))
    }

    fn lock_ticker(&self) -> Result<MutexGuard<'_, Option<JoinHandle<()>>>, AppError> {
        self.ticker.lock().map_err(|_| AppError::Lock("tick source"))
    }

    /// Start a workout, or resume a paused one
    pub fn start(self: &Arc<Self>, input: &WorkoutInput) -> Result<RunSnapshot, AppError> {
        let mut controller = self.lock_controller()?;
        controller.start(input)?;
        // Still holding the controller: no tick can land between cancel and spawn
        self.replace_ticker()?;
        let snapshot = controller.snapshot();
        drop(controller);

        self.record_action("start");
        Ok(snapshot)
    }

    /// Pause the work countdown
    pub fn pause(&self) -> Result<RunSnapshot, AppError> {
        let mut controller = self.lock_controller()?;
        controller.pause()?;
        self.cancel_ticker()?;
        let snapshot = controller.snapshot();
        drop(controller);

        self.record_action("pause");
        Ok(snapshot)
    }

    /// The combined Start/Pause button
    pub fn toggle(self: &Arc<Self>, input: &WorkoutInput) -> Result<RunSnapshot, AppError> {
        let mut controller = self.lock_controller()?;
        let action = match controller.toggle(input)? {
            PhaseKind::Paused => {
                self.cancel_ticker()?;
                "pause"
            }
            _ => {
                self.replace_ticker()?;
                "start"
            }
        };
        let snapshot = controller.snapshot();
        drop(controller);

        self.record_action(action);
        Ok(snapshot)
    }

    /// Stop everything and go back to Idle
    pub fn reset(&self) -> Result<RunSnapshot, AppError> {
        let mut controller = self.lock_controller()?;
        self.cancel_ticker()?;
        controller.reset();
        let snapshot = controller.snapshot();
        drop(controller);

        self.record_action("reset");
        Ok(snapshot)
    }

    /// Advance the countdown by one tick on behalf of the tick source of
    /// `generation`. Returns whether that source should keep running.
    ///
    /// A source that was aborted while waiting for the controller lock
    /// finds a newer generation here and leaves the run untouched.
    pub fn tick(&self, generation: u64) -> Result<bool, AppError> {
        let mut controller = self.lock_controller()?;
        if self.tick_generation.load(Ordering::SeqCst) != generation {
            debug!("Ignoring tick from stale tick source {}", generation);
            return Ok(false);
        }
        Ok(controller.tick())
    }

    /// Generation of the current tick source
    pub fn tick_generation(&self) -> u64 {
        self.tick_generation.load(Ordering::SeqCst)
    }

    /// Abort the current tick task, if any, and spawn a fresh one
    fn replace_ticker(self: &Arc<Self>) -> Result<(), AppError> {
        let mut ticker = self.lock_ticker()?;
        if let Some(previous) = ticker.take() {
            previous.abort();
        }

        let generation = self.tick_generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Spawning tick source {} with period {:?}", generation, self.tick_period);
        let state = Arc::clone(self);
        *ticker = Some(tokio::spawn(async move {
            tick_task(state, generation).await;
        }));
        Ok(())
    }

    fn cancel_ticker(&self) -> Result<(), AppError> {
        self.tick_generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.lock_ticker()?.take() {
            debug!("Cancelling tick source");
            handle.abort();
        }
        Ok(())
    }

    fn record_action(&self, action: &str) {
        info!("Action: {}", action);
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Get the current run snapshot
    pub fn get_snapshot(&self) -> Result<RunSnapshot, AppError> {
        Ok(self.lock_controller()?.snapshot())
    }

    /// Get the current display state
    pub fn get_display(&self) -> Result<DisplayState, AppError> {
        Ok(self.lock_controller()?.ui().display().clone())
    }

    /// Number of notifications sent since startup
    pub fn notifications_sent(&self) -> Result<usize, AppError> {
        Ok(self.lock_controller()?.ui().notifications_sent())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
