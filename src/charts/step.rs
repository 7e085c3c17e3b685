//! Step-chart series for a single machine's day: one point per status
//! change, rendered by the frontend as a step line over the status axis.

use serde::{Deserialize, Serialize};

use crate::timeline::{MachineStatus, ReportWindow, StatusSegment};

/// Step palette (slate / amber / green).
pub fn color_for(status: MachineStatus) -> &'static str {
    match status {
        MachineStatus::Off => "#64748B",
        MachineStatus::On => "#F59E0B",
        MachineStatus::Production => "#10B981",
    }
}

/// One vertex of the step line: the status that becomes effective at this
/// instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepPoint {
    pub time_ms: i64,
    pub status: MachineStatus,
}

/// Project a normalized timeline onto step-chart vertices: one point at each
/// segment start plus a terminal point at the window end, so the final run
/// draws all the way to the chart's right edge.
pub fn step_series(segments: &[StatusSegment], window: ReportWindow) -> Vec<StepPoint> {
    let mut points: Vec<StepPoint> = segments
        .iter()
        .map(|seg| StepPoint {
            time_ms: seg.start.timestamp_millis(),
            status: seg.status,
        })
        .collect();

    if let Some(last) = segments.last() {
        points.push(StepPoint {
            time_ms: window.end.timestamp_millis(),
            status: last.status,
        });
    }
    points
}
