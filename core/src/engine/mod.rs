//! Simulation engine
//!
//! The top-level tick loop orchestrating all departments: routing finished
//! patients, advancing treatment and waiting clocks, starvation relief,
//! admissions, arrivals, and aggregate statistics.

mod sim;
mod stats;

pub use sim::{
    DepartmentConfig, EngineStatus, Simulation, SimulationConfig, SimulationError,
    SimulationSnapshot, TickResult,
};
pub use stats::GlobalStats;
