//! Waiting room abstraction
//!
//! Every department holds its waiting patients in a `WaitingRoom`. The room
//! exposes one interface with two interchangeable ordering strategies,
//! selected at construction and fixed for the department's lifetime:
//!
//! - [`Discipline::Fifo`]: strict arrival order
//! - [`Discipline::Priority`]: ordered by the urgency comparator from
//!   [`Patient::cmp_by_urgency`] (priority ascending, then arrival tick),
//!   stable with respect to insertion for ties
//!
//! Using one comparator for both the priority room and the admission
//! priority sweep keeps tie-break behavior from diverging.

use crate::models::patient::Patient;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Ordering strategy for a waiting room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Discipline {
    /// Strict arrival order
    Fifo,

    /// Priority order: (priority, arrival tick) ascending
    Priority,
}

/// A department's waiting collection.
///
/// # Example
/// ```
/// use er_simulator_core_rs::{Discipline, Patient, TreatmentStep, WaitingRoom};
///
/// let mut room = WaitingRoom::new(Discipline::Priority);
/// let routine = Patient::new(0, 3, "A".to_string(), "B".to_string(),
///     vec![TreatmentStep::new("ER".to_string(), 1)]);
/// let urgent = Patient::new(1, 1, "C".to_string(), "D".to_string(),
///     vec![TreatmentStep::new("ER".to_string(), 1)]);
///
/// room.push(routine);
/// room.push(urgent);
///
/// // The priority-1 patient jumps ahead despite arriving later.
/// assert_eq!(room.pop_front().unwrap().priority(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitingRoom {
    discipline: Discipline,
    patients: VecDeque<Patient>,
}

impl WaitingRoom {
    /// Create an empty waiting room with the given discipline.
    pub fn new(discipline: Discipline) -> Self {
        Self {
            discipline,
            patients: VecDeque::new(),
        }
    }

    /// The ordering strategy this room was constructed with
    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    /// Insert a patient according to the room's discipline.
    ///
    /// FIFO appends; priority inserts after all patients with an equal or
    /// more urgent key, so equal keys keep insertion order (stable).
    pub fn push(&mut self, patient: Patient) {
        match self.discipline {
            Discipline::Fifo => self.patients.push_back(patient),
            Discipline::Priority => {
                let key = patient.urgency_key();
                let idx = self
                    .patients
                    .partition_point(|p| p.urgency_key() <= key);
                self.patients.insert(idx, patient);
            }
        }
    }

    /// Remove and return the head patient per the room's ordering.
    pub fn pop_front(&mut self) -> Option<Patient> {
        self.patients.pop_front()
    }

    /// Iterate waiting patients in queue order.
    pub fn iter(&self) -> impl Iterator<Item = &Patient> {
        self.patients.iter()
    }

    /// Advance the wait counter of every patient in the room by one tick.
    ///
    /// Ticking never reorders the room: wait counters are not part of the
    /// urgency key.
    pub(crate) fn tick_all(&mut self) {
        for patient in &mut self.patients {
            patient.tick_wait();
        }
    }

    /// True iff a patient with this ID is waiting here.
    pub fn contains(&self, patient_id: &str) -> bool {
        self.patients.iter().any(|p| p.id() == patient_id)
    }

    /// Remove a specific patient by ID, preserving the order of the rest.
    pub fn remove(&mut self, patient_id: &str) -> Option<Patient> {
        let idx = self.patients.iter().position(|p| p.id() == patient_id)?;
        self.patients.remove(idx)
    }

    /// Number of waiting patients
    pub fn len(&self) -> usize {
        self.patients.len()
    }

    /// True iff no patients are waiting
    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }
}
