//! Workshop production timeline: one Gantt-style row of colored status bands
//! per machine, every row covering the full window with no gaps.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::models::{machine_name_for, Machine, ProductionGraph};
use crate::timeline::{normalize, MachineStatus, ReportWindow, StatusSegment};

/// Fixed top-to-bottom row order of the workshop floor.
pub const MACHINE_DISPLAY_ORDER: [i64; 7] = [5, 4, 3, 2, 1, 7, 6];

/// Timeline palette (gray / dark orange / dark green).
pub fn color_for(status: MachineStatus) -> &'static str {
    match status {
        MachineStatus::Off => "#808080",
        MachineStatus::On => "#FF8C00",
        MachineStatus::Production => "#006400",
    }
}

/// One band on the chart: `[x, x2)` in epoch milliseconds on row `y`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineBand {
    pub x: i64,
    pub x2: i64,
    pub y: usize,
    pub status: MachineStatus,
    pub color: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopTimeline {
    /// Row labels, top to bottom, aligned with each band's `y`.
    pub categories: Vec<String>,
    pub bands: Vec<TimelineBand>,
}

/// Bands for one machine row from its normalized timeline.
pub fn machine_bands(segments: &[StatusSegment], row: usize) -> Vec<TimelineBand> {
    segments
        .iter()
        .map(|seg| TimelineBand {
            x: seg.start.timestamp_millis(),
            x2: seg.end.timestamp_millis(),
            y: row,
            status: seg.status,
            color: color_for(seg.status).to_string(),
        })
        .collect()
}

/// Build the whole-workshop timeline for one day. Machines with no telemetry
/// get a full-window OFF band, so every row is always drawn.
pub fn workshop_timeline(
    machines: &[Machine],
    graph: &ProductionGraph,
    window: ReportWindow,
) -> Result<WorkshopTimeline> {
    let mut timeline = WorkshopTimeline::default();

    for (row, &machine_id) in MACHINE_DISPLAY_ORDER.iter().enumerate() {
        timeline
            .categories
            .push(machine_name_for(machines, machine_id));

        let intervals = graph.intervals_for(Some(machine_id));
        let segments = normalize(&intervals, window)?;
        timeline.bands.extend(machine_bands(&segments, row));
    }

    Ok(timeline)
}
