use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::timeline::{MachineStatus, StatusSegment};

/// Per-status time totals over one machine's normalized day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBreakdown {
    pub off_secs: i64,
    pub on_secs: i64,
    pub production_secs: i64,
}

impl StatusBreakdown {
    pub fn from_segments(segments: &[StatusSegment]) -> Self {
        let mut breakdown = Self::default();
        for seg in segments {
            let secs = seg.duration().num_seconds();
            match seg.status {
                MachineStatus::Off => breakdown.off_secs += secs,
                MachineStatus::On => breakdown.on_secs += secs,
                MachineStatus::Production => breakdown.production_secs += secs,
            }
        }
        breakdown
    }

    pub fn total(&self) -> Duration {
        Duration::seconds(self.off_secs + self.on_secs + self.production_secs)
    }

    /// Fraction of the window spent producing, in `[0, 1]`.
    pub fn production_share(&self) -> f64 {
        let total = self.off_secs + self.on_secs + self.production_secs;
        if total == 0 {
            return 0.0;
        }
        self.production_secs as f64 / total as f64
    }

    /// Fraction of the window the machine was powered at all.
    pub fn active_share(&self) -> f64 {
        let total = self.off_secs + self.on_secs + self.production_secs;
        if total == 0 {
            return 0.0;
        }
        (self.on_secs + self.production_secs) as f64 / total as f64
    }
}
