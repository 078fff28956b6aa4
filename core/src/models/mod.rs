//! Domain models for the hospital simulation.
//!
//! Leaves first: a `TreatmentStep` is one stage of a patient's plan, a
//! `Patient` carries an ordered plan of steps, a `WaitingRoom` holds patients
//! awaiting admission under a fixed queue discipline, and a `Department` is a
//! capacity-bounded service station combining a treatment room with a
//! waiting room.

pub mod department;
pub mod event;
pub mod patient;
pub mod treatment;
pub mod waiting;

pub use department::Department;
pub use event::{Event, EventLog};
pub use patient::{Patient, PatientError};
pub use treatment::TreatmentStep;
pub use waiting::{Discipline, WaitingRoom};
