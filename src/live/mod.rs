pub mod poller;

pub use poller::{live_loop, POLL_INTERVAL_SECS};

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::models::{LiveReading, MachineState};

/// What the dashboard shows between polls: every machine's last known state
/// and electrical readings, stamped with when the poll completed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveSnapshot {
    pub taken_at: Option<DateTime<Utc>>,
    pub states: Vec<MachineState>,
    pub readings: HashMap<i64, LiveReading>,
    pub poll_count: u64,
    pub failed_polls: u64,
}

/// Shared holder of the latest snapshot. A poll that fails leaves the
/// previous snapshot in place, so consumers always see the last good data.
pub struct LiveMonitor {
    inner: Arc<Mutex<LiveSnapshot>>,
}

impl LiveMonitor {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(LiveSnapshot::default())),
        }
    }

    pub async fn record_poll(
        &self,
        taken_at: DateTime<Utc>,
        states: Vec<MachineState>,
        readings: HashMap<i64, LiveReading>,
    ) {
        let mut snapshot = self.inner.lock().await;
        snapshot.taken_at = Some(taken_at);
        snapshot.states = states;
        snapshot.readings = readings;
        snapshot.poll_count += 1;
    }

    pub async fn record_failure(&self) {
        let mut snapshot = self.inner.lock().await;
        snapshot.failed_polls += 1;
    }

    pub async fn snapshot(&self) -> LiveSnapshot {
        self.inner.lock().await.clone()
    }
}

impl Default for LiveMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LiveMonitor {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::MachineStatus;

    #[tokio::test]
    async fn failed_polls_keep_the_previous_snapshot() {
        let monitor = LiveMonitor::new();
        let states = vec![MachineState {
            id: 1,
            status: MachineStatus::Production,
            machine_name: Some("VMC-1".to_string()),
            last_updated: None,
        }];
        let mut readings = HashMap::new();
        readings.insert(1, LiveReading { current: 4.1, power: 2.2, energy: 18.0 });

        monitor.record_poll(Utc::now(), states, readings).await;
        monitor.record_failure().await;

        let snapshot = monitor.snapshot().await;
        assert_eq!(snapshot.poll_count, 1);
        assert_eq!(snapshot.failed_polls, 1);
        assert_eq!(snapshot.states.len(), 1);
        assert_eq!(snapshot.states[0].status, MachineStatus::Production);
        assert_eq!(snapshot.readings[&1].power, 2.2);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let monitor = LiveMonitor::new();
        let clone = monitor.clone();
        monitor.record_poll(Utc::now(), Vec::new(), HashMap::new()).await;
        assert_eq!(clone.snapshot().await.poll_count, 1);
    }
}
