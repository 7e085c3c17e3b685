//! Daily report assembly. Pulls the report page's four data sections from
//! the backend and shapes them for the printable report: the shift energy
//! table with totals, the trailing-week bar series, cost totals, and the
//! per-machine production timelines with duration breakdowns.

pub mod summary;

pub use summary::StatusBreakdown;

use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::BackendClient;
use crate::charts::xrange::{workshop_timeline, MACHINE_DISPLAY_ORDER};
use crate::charts::WorkshopTimeline;
use crate::models::{
    machine_name_for, DailyEnergy, EnergyCostTotals, Machine, ProductionGraph, ShiftEnergy,
};
use crate::timeline::{normalize, ReportWindow, StatusSegment};

/// One machine's day in the report: its normalized timeline plus duration
/// totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineDaySummary {
    pub machine_id: i64,
    pub machine_name: String,
    pub segments: Vec<StatusSegment>,
    pub breakdown: StatusBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub date: NaiveDate,
    pub shifts: Vec<ShiftEnergy>,
    pub total_energy_kwh: f64,
    pub total_cost: f64,
    pub costs: Option<EnergyCostTotals>,
    /// Trailing week, ascending by date.
    pub week: Vec<DailyEnergy>,
    /// Day with the highest consumption in the week, highlighted on the bar
    /// chart.
    pub peak_day: Option<NaiveDate>,
    pub machines: Vec<MachineDaySummary>,
    pub timeline: WorkshopTimeline,
}

/// Assemble the daily report. Each backend section degrades independently:
/// a failed fetch logs a warning and leaves its section empty, so a partial
/// backend outage still yields a printable report.
pub async fn build_daily_report(
    client: &BackendClient,
    machines: &[Machine],
    date: NaiveDate,
) -> Result<DailyReport> {
    let window = ReportWindow::report_span(date);

    let shifts = client.shift_live_history(date).await.unwrap_or_else(|err| {
        log::warn!("shift history unavailable for {date}: {err:#}");
        Vec::new()
    });

    let costs = client
        .total_energy_costs(date)
        .await
        .map_err(|err| log::warn!("cost totals unavailable for {date}: {err:#}"))
        .ok();

    let mut week = client
        .daily_energy_consumption(date)
        .await
        .unwrap_or_else(|err| {
            log::warn!("daily energy series unavailable for {date}: {err:#}");
            Vec::new()
        });
    week.sort_by_key(|d| d.date);
    let peak_day = week
        .iter()
        .max_by(|a, b| a.energy_consumption.total_cmp(&b.energy_consumption))
        .map(|d| d.date);

    let graph = client.graph_data(date).await.unwrap_or_else(|err| {
        log::warn!("production graph unavailable for {date}: {err:#}");
        ProductionGraph::default()
    });

    let total_energy_kwh = shifts.iter().map(|s| s.total_energy).sum();
    let total_cost = shifts.iter().map(|s| s.total_cost).sum();

    let mut machine_summaries = Vec::with_capacity(MACHINE_DISPLAY_ORDER.len());
    for &machine_id in &MACHINE_DISPLAY_ORDER {
        let intervals = graph.intervals_for(Some(machine_id));
        let segments = normalize(&intervals, window)?;
        machine_summaries.push(MachineDaySummary {
            machine_id,
            machine_name: machine_name_for(machines, machine_id),
            breakdown: StatusBreakdown::from_segments(&segments),
            segments,
        });
    }

    let timeline = workshop_timeline(machines, &graph, window)?;

    Ok(DailyReport {
        date,
        shifts,
        total_energy_kwh,
        total_cost,
        costs,
        week,
        peak_day,
        machines: machine_summaries,
        timeline,
    })
}
