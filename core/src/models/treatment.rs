//! Treatment step model
//!
//! One stage of a patient's treatment plan: the department that performs it,
//! the total number of ticks it takes, and how many ticks have elapsed so far.
//!
//! Invariant: `elapsed <= total`. A step is finished exactly when
//! `elapsed == total`, reached via one unit of progress per tick in service.

use serde::{Deserialize, Serialize};

/// A single required treatment in a patient's plan.
///
/// # Example
/// ```
/// use er_simulator_core_rs::TreatmentStep;
///
/// let mut step = TreatmentStep::new("X-Ray".to_string(), 2);
/// assert!(!step.is_finished());
///
/// step.advance();
/// step.advance();
/// assert!(step.is_finished());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentStep {
    /// Name of the department that performs this treatment
    department: String,

    /// Total duration in ticks
    total: u32,

    /// Ticks of treatment already received
    elapsed: u32,
}

impl TreatmentStep {
    /// Create a new treatment step with no elapsed progress.
    ///
    /// # Panics
    /// Panics if `total` is zero: a zero-length treatment would be "finished"
    /// without ever being in service, which the tick loop never produces.
    pub fn new(department: String, total: u32) -> Self {
        assert!(total > 0, "treatment duration must be positive");
        Self {
            department,
            total,
            elapsed: 0,
        }
    }

    /// Department that performs this treatment
    pub fn department(&self) -> &str {
        &self.department
    }

    /// Total duration in ticks
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Ticks of treatment already received
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Ticks of treatment still required
    pub fn remaining(&self) -> u32 {
        self.total - self.elapsed
    }

    /// True iff the step has received its full duration of treatment
    pub fn is_finished(&self) -> bool {
        self.elapsed == self.total
    }

    /// Record one tick of treatment progress.
    ///
    /// Callers must not advance a finished step; `Patient::advance_treatment`
    /// guards this before delegating here.
    pub fn advance(&mut self) {
        debug_assert!(self.elapsed < self.total, "step already finished");
        self.elapsed += 1;
    }
}
