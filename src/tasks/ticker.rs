//! Tick source background task

use std::sync::Arc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error};

use crate::state::AppState;

/// Background task that ticks the workout once per period until its countdown stops.
///
/// The first tick lands one full period after the task starts, so a fresh
/// phase shows its whole duration for a second before counting down.
/// `generation` identifies this source; it stops once a newer one replaces it.
pub async fn tick_task(state: Arc<AppState>, generation: u64) {
    let period = state.tick_period;
    debug!("Tick source {} running every {:?}", generation, period);

    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        match state.tick(generation) {
            Ok(true) => {}
            Ok(false) => {
                debug!("Countdown stopped, tick source exiting");
                break;
            }
            Err(e) => {
                error!("Failed to tick workout: {}", e);
                break;
            }
        }
    }
}
