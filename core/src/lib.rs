//! ER Simulator Core - Rust Engine
//!
//! Discrete-time simulation of patient flow through a multi-stage hospital
//! with deterministic execution.
//!
//! # Architecture
//!
//! - **models**: Domain types (TreatmentStep, Patient, WaitingRoom, Department)
//! - **arrivals**: Arrival source contract and deterministic patient generator
//! - **engine**: Main simulation tick loop and statistics
//! - **report**: Line-oriented reporting sink
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All time values are whole ticks (usize)
//! 2. All randomness is deterministic (seeded RNG)
//! 3. The engine is the sole mutator of department and patient state

// Module declarations
pub mod arrivals;
pub mod engine;
pub mod models;
pub mod report;
pub mod rng;

// Re-exports for convenience
pub use arrivals::{ArrivalSource, GeneratorConfig, NoArrivals, PatientGenerator};
pub use engine::{
    DepartmentConfig, EngineStatus, GlobalStats, Simulation, SimulationConfig, SimulationError,
    SimulationSnapshot, TickResult,
};
pub use models::{
    department::{Department, DepartmentSnapshot},
    event::{Event, EventLog},
    patient::{Patient, PatientError},
    treatment::TreatmentStep,
    waiting::{Discipline, WaitingRoom},
};
pub use report::{BufferSink, ReportSink, StdoutSink};
pub use rng::RngManager;
