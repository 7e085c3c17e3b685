use chrono::{NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::timeline::{MachineStatus, StatusInterval};

/// Response of the production graph endpoints: a bag of status intervals,
/// one record per observed span.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionGraph {
    #[serde(default)]
    pub data_points: Vec<StatusPoint>,
}

/// One raw record: `{ "name": "ON", "value": [startMs, endMs] }`, with the
/// machine id present on the all-machines variant of the endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusPoint {
    pub name: String,
    pub value: [i64; 2],
    #[serde(default)]
    pub machine_id: Option<i64>,
}

impl StatusPoint {
    /// Convert the wire record into a core interval. Records with an unknown
    /// status name or timestamps outside chrono's representable range are
    /// dropped; inverted spans survive here and are discarded by the
    /// normalizer with everything else that fails validation.
    pub fn interval(&self) -> Option<StatusInterval> {
        let status = MachineStatus::from_name(&self.name)?;
        let start = Utc.timestamp_millis_opt(self.value[0]).single()?;
        let end = Utc.timestamp_millis_opt(self.value[1]).single()?;
        Some(StatusInterval { status, start, end })
    }
}

impl ProductionGraph {
    /// Intervals belonging to one machine. Records without a machine id only
    /// appear on the single-machine endpoint, where the caller passes `None`.
    pub fn intervals_for(&self, machine_id: Option<i64>) -> Vec<StatusInterval> {
        self.data_points
            .iter()
            .filter(|p| machine_id.is_none() || p.machine_id == machine_id)
            .filter_map(StatusPoint::interval)
            .collect()
    }
}

/// Latest electrical reading for one machine (`GET /live/live_recent/{id}`).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LiveReading {
    /// Amperes.
    #[serde(default)]
    pub current: f64,
    /// Kilowatts.
    #[serde(default)]
    pub power: f64,
    /// Kilowatt-hours.
    #[serde(default)]
    pub energy: f64,
}

/// One row of the per-shift energy table (`GET /shift_live_history/`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftEnergy {
    #[serde(default)]
    pub machine_id: Option<i64>,
    pub machine_name: String,
    #[serde(default)]
    pub first_shift: f64,
    #[serde(default)]
    pub second_shift: f64,
    #[serde(default)]
    pub third_shift: f64,
    #[serde(default)]
    pub total_energy: f64,
    #[serde(default)]
    pub total_cost: f64,
}

/// Aggregated cost totals (`GET /report/total_energy_costs`).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EnergyCostTotals {
    #[serde(default)]
    pub total_weekly_cost: f64,
    #[serde(default)]
    pub total_monthly_cost: f64,
}

/// One day of the trailing-week energy series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyEnergy {
    pub date: NaiveDate,
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub energy_consumption: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyEnergyResponse {
    #[serde(default)]
    pub daily_energy_consumption: Vec<DailyEnergy>,
}

/// `POST /auth` response. The token authenticates subsequent requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<UserAccount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}
