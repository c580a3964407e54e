//! Gravity ticker.
//!
//! Sends `auto_drop` to a session on a fixed period, reporting the time that
//! actually passed since the previous tick so a late tick still feeds the
//! full amount of gravity.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

use crate::runtime::SessionHandle;
use crate::types::MoveType;

/// Spawn the ticker. It stops on its own once the session shuts down;
/// abort the returned handle to stop it earlier.
pub fn spawn_gravity_ticker(session: SessionHandle, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // The first tick completes immediately; start measuring from it.
        interval.tick().await;
        let mut last = Instant::now();

        loop {
            interval.tick().await;
            let now = Instant::now();
            let elapsed_ms = now.duration_since(last).as_millis().min(u32::MAX as u128) as u32;
            last = now;

            if session.attempt_move(MoveType::AutoDrop, elapsed_ms).await.is_err() {
                debug!("session closed, gravity ticker stopping");
                break;
            }
        }
    })
}
