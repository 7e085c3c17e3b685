use serde::{Deserialize, Serialize};

/// Machine status as reported by the telemetry backend.
///
/// The variant order encodes display priority: when several statuses are
/// active at once, the machine is shown in the highest one
/// (PRODUCTION > ON > OFF).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum MachineStatus {
    /// Powered down, or no signal at all.
    #[default]
    Off = 0,
    /// Powered, not cutting.
    On = 1,
    /// Actively producing.
    Production = 2,
}

impl MachineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MachineStatus::Off => "OFF",
            MachineStatus::On => "ON",
            MachineStatus::Production => "PRODUCTION",
        }
    }

    /// Parse a backend status name. Case-insensitive; surrounding whitespace
    /// is ignored. Unknown names yield `None` so callers can decide between
    /// dropping the record and defaulting to OFF.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "OFF" => Some(MachineStatus::Off),
            "ON" => Some(MachineStatus::On),
            "PRODUCTION" => Some(MachineStatus::Production),
            _ => None,
        }
    }
}

impl std::fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_follows_variant_order() {
        assert!(MachineStatus::Production > MachineStatus::On);
        assert!(MachineStatus::On > MachineStatus::Off);
    }

    #[test]
    fn parses_backend_names() {
        assert_eq!(MachineStatus::from_name("PRODUCTION"), Some(MachineStatus::Production));
        assert_eq!(MachineStatus::from_name("on"), Some(MachineStatus::On));
        assert_eq!(MachineStatus::from_name(" Off "), Some(MachineStatus::Off));
        assert_eq!(MachineStatus::from_name("IDLE"), None);
        assert_eq!(MachineStatus::from_name(""), None);
    }

    #[test]
    fn serializes_as_uppercase_names() {
        let json = serde_json::to_string(&MachineStatus::Production).unwrap();
        assert_eq!(json, "\"PRODUCTION\"");
        let back: MachineStatus = serde_json::from_str("\"OFF\"").unwrap();
        assert_eq!(back, MachineStatus::Off);
    }
}
