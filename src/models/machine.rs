use serde::{Deserialize, Deserializer, Serialize};

use crate::timeline::MachineStatus;

/// One machine from the workshop registry (`GET /machines/`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Machine {
    pub id: i64,
    pub machine_name: String,
    #[serde(default)]
    pub workshop_name: Option<String>,
    #[serde(default)]
    pub mqtt_topic: Option<String>,
    #[serde(default)]
    pub mqtt_mach_iden: Option<String>,
}

/// Current state of one machine (`GET /all_machine_states`). The backend has
/// shipped this under a few field spellings, hence the aliases; a missing or
/// unknown status counts as OFF.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineState {
    #[serde(alias = "machine_id")]
    pub id: i64,
    #[serde(alias = "state", default, deserialize_with = "lenient_status")]
    pub status: MachineStatus,
    #[serde(default)]
    pub machine_name: Option<String>,
    #[serde(alias = "timestamp", default)]
    pub last_updated: Option<String>,
}

fn lenient_status<'de, D>(deserializer: D) -> Result<MachineStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .and_then(MachineStatus::from_name)
        .unwrap_or_default())
}

/// Display name for a machine id, with the registry lookup falling back to a
/// generic label for unknown ids.
pub fn machine_name_for(machines: &[Machine], id: i64) -> String {
    machines
        .iter()
        .find(|m| m.id == id)
        .map(|m| m.machine_name.clone())
        .unwrap_or_else(|| format!("Machine {id}"))
}
