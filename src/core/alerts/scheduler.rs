//! Periodic alert expiry
//!
//! [`AlertExpiryScheduler`] owns one background task that wakes every
//! interval and asks the [`AlertStore`] to deactivate expired alerts. The
//! composition root starts it once at boot and shuts it down on exit.

use crate::utils::error::{GatewayError, Result};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::store::AlertStore;

/// Background task handle plus its stop signal
struct RunningTask {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Explicit start/stop lifecycle around the expiry loop
pub struct AlertExpiryScheduler {
    store: Arc<dyn AlertStore>,
    interval: Duration,
    running: Mutex<Option<RunningTask>>,
}

impl std::fmt::Debug for AlertExpiryScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertExpiryScheduler")
            .field("interval", &self.interval)
            .field("running", &self.is_running())
            .finish()
    }
}

impl AlertExpiryScheduler {
    /// Create a stopped scheduler that ticks every `interval`
    pub fn new(store: Arc<dyn AlertStore>, interval: Duration) -> Self {
        Self {
            store,
            interval,
            running: Mutex::new(None),
        }
    }

    /// Tick interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the background task is alive
    pub fn is_running(&self) -> bool {
        self.running
            .lock()
            .as_ref()
            .is_some_and(|task| !task.handle.is_finished())
    }

    /// Spawn the expiry loop
    ///
    /// The first tick fires one interval after this call. Must be called
    /// from within a tokio runtime.
    pub fn start(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(GatewayError::scheduler("Tick interval must be positive"));
        }

        let mut running = self.running.lock();
        if running
            .as_ref()
            .is_some_and(|task| !task.handle.is_finished())
        {
            return Err(GatewayError::scheduler("Scheduler is already running"));
        }

        let (shutdown, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(run_expiry_loop(
            Arc::clone(&self.store),
            self.interval,
            shutdown_rx,
        ));
        *running = Some(RunningTask { shutdown, handle });

        info!(
            "Alert expiry scheduler started (interval {:?})",
            self.interval
        );
        Ok(())
    }

    /// Signal the loop to stop without waiting for it
    ///
    /// A tick already in progress runs to completion; no new tick starts.
    /// Returns `false` when the scheduler was not running.
    pub fn stop(&self) -> bool {
        match self.running.lock().take() {
            Some(task) => {
                let _ = task.shutdown.send(true);
                info!("Alert expiry scheduler stop requested");
                true
            }
            None => false,
        }
    }

    /// Stop the loop and wait for an in-flight tick to finish
    pub async fn shutdown(&self) {
        let task = self.running.lock().take();
        if let Some(task) = task {
            let _ = task.shutdown.send(true);
            if let Err(e) = task.handle.await {
                warn!("Alert expiry task ended abnormally: {}", e);
            }
            info!("Alert expiry scheduler stopped");
        }
    }

    /// Run one expiry pass immediately
    pub async fn tick(&self) -> Result<u64> {
        expire_alerts(self.store.as_ref(), Utc::now()).await
    }
}

impl Drop for AlertExpiryScheduler {
    fn drop(&mut self) {
        if let Some(task) = self.running.get_mut().take() {
            let _ = task.shutdown.send(true);
        }
    }
}

/// One expiry pass at `now`
pub async fn expire_alerts(store: &dyn AlertStore, now: DateTime<Utc>) -> Result<u64> {
    let count = store.deactivate_expired(now).await?;
    if count > 0 {
        info!("Deactivated {} expired alerts", count);
    } else {
        debug!("No expired alerts to deactivate");
    }
    Ok(count)
}

async fn run_expiry_loop(
    store: Arc<dyn AlertStore>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            _ = interval.tick() => {
                if let Err(e) = expire_alerts(store.as_ref(), Utc::now()).await {
                    warn!("Alert expiry tick failed: {}", e);
                }
            }
        }
    }

    debug!("Alert expiry loop exited");
}
