pub mod machine;
pub mod telemetry;

pub use machine::{machine_name_for, Machine, MachineState};
pub use telemetry::{
    AuthResponse, DailyEnergy, DailyEnergyResponse, EnergyCostTotals, LiveReading,
    ProductionGraph, ShiftEnergy, StatusPoint, UserAccount,
};
