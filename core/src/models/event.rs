//! Event logging for simulation replay and auditing.
//!
//! The Event enum captures the significant state changes of a run. Events
//! enable debugging (understand what happened and when), auditing (verify
//! routing and discharge decisions), and analysis without re-running.
//!
//! # Event Types
//!
//! - **Arrival**: new patient entered the hospital
//! - **Discharge**: patient completed the final treatment and left
//! - **ForcedAdmission**: starvation relief admitted a priority-1 patient
//! - **UnknownDepartment**: a plan referenced a department that does not
//!   exist (configuration error; the patient is dropped fail-soft)

use serde::{Deserialize, Serialize};

/// Simulation event capturing a state change.
///
/// All events include a tick number for temporal ordering. Events are logged
/// in the order they occur within a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// New patient arrived and was enqueued at the first department
    Arrival {
        tick: usize,
        patient_id: String,
        name: String,
        priority: u8,
        first_department: String,
    },

    /// Patient completed the final treatment and was discharged
    Discharge {
        tick: usize,
        patient_id: String,
        name: String,
        priority: u8,
        total_wait: usize,
        system_time: usize,
    },

    /// Starvation relief force-admitted a priority-1 patient
    ForcedAdmission {
        tick: usize,
        department: String,
        patient_id: String,
        current_wait: usize,
    },

    /// A treatment plan referenced an unknown department; patient dropped
    UnknownDepartment {
        tick: usize,
        department: String,
        patient_id: String,
    },
}

impl Event {
    /// Tick at which the event occurred
    pub fn tick(&self) -> usize {
        match self {
            Event::Arrival { tick, .. }
            | Event::Discharge { tick, .. }
            | Event::ForcedAdmission { tick, .. }
            | Event::UnknownDepartment { tick, .. } => *tick,
        }
    }
}

/// Append-only log of simulation events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Number of logged events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True iff no events have been logged
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events in logging order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Iterate events in logging order
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Discard all events (used by engine reset)
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
