//! Department model
//!
//! A capacity-bounded service station: a treatment room holding at most
//! `capacity` patients in service, plus a waiting room. Admission follows a
//! two-phase rule (priority sweep, then regular fill) with an out-of-band
//! `force_admit` escape hatch the engine uses for starvation relief.
//!
//! # Critical Invariants
//!
//! 1. In-service size never exceeds capacity
//! 2. A patient is never in both the treatment room and the waiting room
//! 3. Admission bookkeeping (wait total, served count) happens exactly once
//!    per admission, on every admission path

use crate::models::patient::{Patient, PatientError};
use crate::models::waiting::{Discipline, WaitingRoom};
use serde::Serialize;

/// A hospital department with a treatment room and a waiting room.
///
/// # Example
/// ```
/// use er_simulator_core_rs::{Department, Discipline, Patient, TreatmentStep};
///
/// let mut xray = Department::new("X-Ray".to_string(), 1, Discipline::Fifo);
/// let patient = Patient::new(0, 2, "A".to_string(), "B".to_string(),
///     vec![TreatmentStep::new("X-Ray".to_string(), 2)]);
///
/// xray.enqueue_waiting(patient);
/// xray.admit_while_space();
/// assert_eq!(xray.num_in_service(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Department {
    // Configuration
    name: String,
    capacity: usize,

    // Patient management
    in_service: Vec<Patient>,
    waiting: WaitingRoom,

    // Statistics
    total_waiting_time: usize,
    patients_served: usize,
    max_queue_length: usize,
}

/// Read-only copy of a department's patients for display layers.
///
/// Order-preserving clones; mutating the snapshot never touches live state.
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentSnapshot {
    pub name: String,
    pub capacity: usize,
    pub in_service: Vec<Patient>,
    pub waiting: Vec<Patient>,
}

impl Department {
    /// Create a department.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(name: String, capacity: usize, discipline: Discipline) -> Self {
        assert!(capacity > 0, "capacity must be positive");
        Self {
            name,
            capacity,
            in_service: Vec::new(),
            waiting: WaitingRoom::new(discipline),
            total_waiting_time: 0,
            patients_served: 0,
            max_queue_length: 0,
        }
    }

    // ========================================================================
    // Core operations
    // ========================================================================

    /// Add a patient to the waiting room per its discipline.
    pub fn enqueue_waiting(&mut self, patient: Patient) {
        self.waiting.push(patient);
        self.refresh_queue_stats();
    }

    /// Advance treatment by one tick for every in-service patient.
    ///
    /// Iteration order is immaterial: patients in service do not interact.
    ///
    /// # Errors
    /// Propagates [`PatientError`] if any in-service patient has no active
    /// unfinished step, a contract violation, since finished patients are
    /// collected before treatment ticks.
    pub fn tick_in_service(&mut self) -> Result<(), PatientError> {
        for patient in &mut self.in_service {
            patient.advance_treatment()?;
        }
        Ok(())
    }

    /// Advance waiting time by one tick for every waiting patient and
    /// refresh the queue-length high-water mark.
    pub fn tick_waiting(&mut self) {
        self.waiting.tick_all();
        self.refresh_queue_stats();
    }

    // ========================================================================
    // Admission
    // ========================================================================

    /// Two-phase admission: priority sweep, then regular fill.
    ///
    /// Phase 1 admits every waiting priority-1 patient while capacity
    /// remains, regardless of queue position. Phase 2 fills remaining space
    /// from the head of the waiting room in its configured order.
    pub fn admit_while_space(&mut self) {
        self.admit_priority_patients();
        self.admit_regular_patients();
    }

    fn admit_priority_patients(&mut self) {
        let urgent_ids: Vec<String> = self
            .waiting
            .iter()
            .filter(|p| p.priority() == 1)
            .map(|p| p.id().to_string())
            .collect();

        for id in urgent_ids {
            if self.in_service.len() >= self.capacity {
                break;
            }
            if let Some(patient) = self.waiting.remove(&id) {
                self.admit(patient);
            }
        }
    }

    fn admit_regular_patients(&mut self) {
        while self.in_service.len() < self.capacity {
            match self.waiting.pop_front() {
                Some(patient) => self.admit(patient),
                None => break,
            }
        }
    }

    fn admit(&mut self, patient: Patient) {
        self.total_waiting_time += patient.total_wait_ticks();
        self.patients_served += 1;
        self.in_service.push(patient);
    }

    /// Out-of-band admission for starvation relief.
    ///
    /// Admits the patient iff capacity is free AND the patient is actually in
    /// this department's waiting room. Returns whether admission happened.
    pub fn force_admit(&mut self, patient_id: &str) -> bool {
        if self.in_service.len() >= self.capacity {
            return false;
        }
        match self.waiting.remove(patient_id) {
            Some(patient) => {
                self.admit(patient);
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Treatment completion
    // ========================================================================

    /// Remove and return every in-service patient whose current step is
    /// finished. Unfinished patients remain untouched.
    ///
    /// Idempotent: a second call without an intervening `tick_in_service`
    /// returns an empty vector.
    pub fn collect_finished(&mut self) -> Vec<Patient> {
        let mut finished = Vec::new();
        let mut i = 0;
        while i < self.in_service.len() {
            if self.in_service[i].is_current_step_finished() {
                finished.push(self.in_service.remove(i));
            } else {
                i += 1;
            }
        }
        finished
    }

    // ========================================================================
    // Statistics & accessors
    // ========================================================================

    fn refresh_queue_stats(&mut self) {
        self.max_queue_length = self.max_queue_length.max(self.waiting.len());
    }

    /// Department name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Maximum concurrent in-service patients
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Cumulative waiting ticks of all patients admitted here
    pub fn total_waiting_time(&self) -> usize {
        self.total_waiting_time
    }

    /// Number of patients admitted into treatment here
    pub fn patients_served(&self) -> usize {
        self.patients_served
    }

    /// High-water mark of waiting room size
    pub fn max_queue_length(&self) -> usize {
        self.max_queue_length
    }

    /// Current number of in-service patients
    pub fn num_in_service(&self) -> usize {
        self.in_service.len()
    }

    /// Current number of waiting patients
    pub fn num_waiting(&self) -> usize {
        self.waiting.len()
    }

    /// Iterate waiting patients in queue order (read-only).
    pub fn waiting_patients(&self) -> impl Iterator<Item = &Patient> {
        self.waiting.iter()
    }

    /// Iterate in-service patients (order immaterial, read-only).
    pub fn in_service_patients(&self) -> impl Iterator<Item = &Patient> {
        self.in_service.iter()
    }

    /// Order-preserving read-only copy of both collections.
    pub fn snapshot(&self) -> DepartmentSnapshot {
        DepartmentSnapshot {
            name: self.name.clone(),
            capacity: self.capacity,
            in_service: self.in_service.clone(),
            waiting: self.waiting.iter().cloned().collect(),
        }
    }
}
