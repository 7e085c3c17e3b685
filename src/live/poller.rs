use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::api::BackendClient;
use crate::live::LiveMonitor;
use crate::models::{LiveReading, MachineState};

/// The dashboard refreshes live status every few seconds.
pub const POLL_INTERVAL_SECS: u64 = 3;
const POLL_TIMEOUT_SECS: u64 = 10;

/// Poll the backend for live machine status until cancelled. One failed or
/// slow poll is logged and skipped; the loop itself never dies.
pub async fn live_loop(
    client: BackendClient,
    monitor: LiveMonitor,
    machine_ids: Vec<i64>,
    cancel_token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(Duration::from_secs(POLL_INTERVAL_SECS));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let fut = poll_once(&client, &machine_ids);
                match tokio::time::timeout(Duration::from_secs(POLL_TIMEOUT_SECS), fut).await {
                    Ok(Ok((states, readings))) => {
                        monitor.record_poll(Utc::now(), states, readings).await;
                    }
                    Ok(Err(err)) => {
                        log::warn!("live poll failed: {err:#}");
                        monitor.record_failure().await;
                    }
                    Err(_) => {
                        log::warn!("live poll timeout (> {POLL_TIMEOUT_SECS}s)");
                        monitor.record_failure().await;
                    }
                }
            }
            _ = cancel_token.cancelled() => {
                log::info!("live poll loop shutting down");
                break;
            }
        }
    }
}

async fn poll_once(
    client: &BackendClient,
    machine_ids: &[i64],
) -> Result<(Vec<MachineState>, HashMap<i64, LiveReading>)> {
    let states = client
        .all_machine_states()
        .await
        .context("machine states fetch failed")?;

    // Per-machine readings are best-effort; one silent sensor must not hide
    // the rest of the workshop.
    let mut readings = HashMap::with_capacity(machine_ids.len());
    for &machine_id in machine_ids {
        match client.live_recent(machine_id).await {
            Ok(reading) => {
                readings.insert(machine_id, reading);
            }
            Err(err) => {
                log::warn!("live reading for machine {machine_id} failed: {err:#}");
            }
        }
    }

    Ok((states, readings))
}
