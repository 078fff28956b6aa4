//! Patient model
//!
//! A patient is a small state machine tracking:
//! - Identity (uuid plus a cosmetic name and initials)
//! - Timeline (arrival tick, discharge tick, cumulative wait/treatment ticks)
//! - Medical priority (1-3, with 1 the most urgent; immutable)
//! - A FIFO queue of remaining treatment steps (strictly shrinking)
//!
//! The ordering used everywhere for urgency is `(priority, arrival_tick)`
//! ascending. It is defined once in [`Patient::cmp_by_urgency`] and reused by
//! both the priority waiting room and the admission priority sweep, so the
//! two can never diverge on tie-breaks.

use crate::models::treatment::TreatmentStep;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::VecDeque;
use thiserror::Error;

/// Errors from patient operations.
///
/// These are programming-contract violations: callers only tick patients that
/// are known to be in the right collection, so hitting one of these means an
/// internal invariant was already broken elsewhere.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatientError {
    #[error("no treatments remaining in plan")]
    EmptyPlan,

    #[error("current treatment already finished")]
    StepAlreadyFinished,

    #[error("patient already discharged")]
    AlreadyDischarged,
}

/// An ER patient moving through the hospital.
///
/// # Example
/// ```
/// use er_simulator_core_rs::{Patient, TreatmentStep};
///
/// let patient = Patient::new(
///     0, // arrival tick
///     2, // priority
///     "Ada".to_string(),
///     "Lovelace".to_string(),
///     vec![TreatmentStep::new("ER".to_string(), 3)],
/// );
///
/// assert_eq!(patient.priority(), 2);
/// assert_eq!(patient.current_department().unwrap(), "ER");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    /// Unique patient identifier (UUID)
    id: String,

    /// Full name (cosmetic only)
    name: String,

    /// Two-letter initials (cosmetic only)
    initials: String,

    /// Tick when the patient arrived at the hospital
    arrival_tick: usize,

    /// Tick when the patient was discharged (set exactly once)
    discharge_tick: Option<usize>,

    /// Medical priority: 1 (highest) to 3 (lowest)
    priority: u8,

    /// Cumulative ticks spent waiting in queues
    wait_ticks: usize,

    /// Cumulative ticks spent in treatment
    treatment_ticks: usize,

    /// Remaining treatment plan, head is the current step
    plan: VecDeque<TreatmentStep>,
}

impl Patient {
    /// Create a new patient arriving with a full treatment plan.
    ///
    /// # Panics
    /// Panics if the priority is outside 1-3 or the plan is empty: the triage
    /// contract documented on the arrival source guarantees both.
    pub fn new(
        arrival_tick: usize,
        priority: u8,
        first_name: String,
        last_name: String,
        plan: Vec<TreatmentStep>,
    ) -> Self {
        assert!((1..=3).contains(&priority), "priority must be 1-3");
        assert!(!plan.is_empty(), "treatment plan must have at least one step");

        let initials = format!(
            "{}{}",
            first_name.chars().next().unwrap_or('?'),
            last_name.chars().next().unwrap_or('?')
        );

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: format!("{} {}", first_name, last_name),
            initials,
            arrival_tick,
            discharge_tick: None,
            priority,
            wait_ticks: 0,
            treatment_ticks: 0,
            plan: VecDeque::from(plan),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Unique patient ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Full name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Two-letter initials
    pub fn initials(&self) -> &str {
        &self.initials
    }

    /// Tick the patient arrived
    pub fn arrival_tick(&self) -> usize {
        self.arrival_tick
    }

    /// Tick the patient was discharged, if discharged
    pub fn discharge_tick(&self) -> Option<usize> {
        self.discharge_tick
    }

    /// Medical priority (1 = most urgent)
    pub fn priority(&self) -> u8 {
        self.priority
    }

    /// Cumulative ticks spent waiting
    pub fn total_wait_ticks(&self) -> usize {
        self.wait_ticks
    }

    /// Cumulative ticks spent in treatment
    pub fn total_treatment_ticks(&self) -> usize {
        self.treatment_ticks
    }

    /// Number of treatments still in the plan
    pub fn treatments_remaining(&self) -> usize {
        self.plan.len()
    }

    /// Ticks spent waiting since the patient last received treatment.
    ///
    /// The waiting counter ticks for queued patients and the treatment
    /// counter for in-service patients, so the difference is the wait
    /// accumulated since treatment time last "caught up". Used for
    /// starvation detection on priority-1 patients.
    pub fn current_wait(&self) -> usize {
        self.wait_ticks.saturating_sub(self.treatment_ticks)
    }

    /// Total ticks spent in the simulation, from arrival to discharge.
    ///
    /// Only meaningful after discharge.
    pub fn system_time(&self) -> Option<usize> {
        self.discharge_tick.map(|t| t - self.arrival_tick)
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Urgency ordering: lower priority number first, then earlier arrival.
    ///
    /// Ties (identical priority and arrival tick) compare equal and are
    /// resolved by insertion order in the waiting room.
    pub fn cmp_by_urgency(&self, other: &Patient) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then(self.arrival_tick.cmp(&other.arrival_tick))
    }

    /// Sort key matching [`Patient::cmp_by_urgency`]
    pub(crate) fn urgency_key(&self) -> (u8, usize) {
        (self.priority, self.arrival_tick)
    }

    // ========================================================================
    // Treatment progress
    // ========================================================================

    /// Record one tick of treatment on the current step.
    ///
    /// # Errors
    /// - `EmptyPlan` if no treatments remain
    /// - `StepAlreadyFinished` if the head step has no time remaining
    pub fn advance_treatment(&mut self) -> Result<(), PatientError> {
        let step = self.plan.front_mut().ok_or(PatientError::EmptyPlan)?;
        if step.is_finished() {
            return Err(PatientError::StepAlreadyFinished);
        }

        self.treatment_ticks += 1;
        step.advance();
        Ok(())
    }

    /// Record one tick of waiting. Always valid.
    pub fn tick_wait(&mut self) {
        self.wait_ticks += 1;
    }

    /// True iff the plan is non-empty and the head step is finished
    pub fn is_current_step_finished(&self) -> bool {
        self.plan.front().is_some_and(|s| s.is_finished())
    }

    /// True iff the plan is empty
    pub fn is_plan_complete(&self) -> bool {
        self.plan.is_empty()
    }

    /// Department that performs the current (head) step.
    ///
    /// # Errors
    /// `EmptyPlan` if the plan is already complete.
    pub fn current_department(&self) -> Result<&str, PatientError> {
        self.plan
            .front()
            .map(|s| s.department())
            .ok_or(PatientError::EmptyPlan)
    }

    /// Remove and return the head step.
    ///
    /// # Errors
    /// `EmptyPlan` if the plan is already complete.
    pub fn pop_finished_step(&mut self) -> Result<TreatmentStep, PatientError> {
        self.plan.pop_front().ok_or(PatientError::EmptyPlan)
    }

    /// Stamp the discharge tick. Terminal: may be called exactly once.
    ///
    /// # Errors
    /// `AlreadyDischarged` if a discharge tick is already set.
    pub fn mark_discharged(&mut self, tick: usize) -> Result<(), PatientError> {
        if self.discharge_tick.is_some() {
            return Err(PatientError::AlreadyDischarged);
        }
        self.discharge_tick = Some(tick);
        Ok(())
    }
}

impl std::fmt::Display for Patient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (Priority {}) | Arrived: {} | Wait: {} | Treatment: {} | {} treatments remaining",
            self.name,
            self.priority,
            self.arrival_tick,
            self.wait_ticks,
            self.treatment_ticks,
            self.plan.len()
        )
    }
}
