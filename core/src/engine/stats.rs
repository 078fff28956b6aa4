//! Global discharge statistics.
//!
//! Counters folded in at discharge time. The priority-1 sub-statistics track
//! the patients the hospital cares most about: how many waited past the
//! critical threshold ("at risk") and how many were treated within the
//! priority-1 timeout ("treated quickly").

use crate::models::patient::Patient;
use serde::{Deserialize, Serialize};

/// Aggregate statistics over all discharged patients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalStats {
    /// Total patients discharged
    pub num_discharged: usize,

    /// Sum of total waiting ticks across discharged patients
    pub total_wait: usize,

    /// Maximum total waiting ticks observed at discharge
    pub max_wait: usize,

    /// Priority-1 patients discharged
    pub num_discharged_pri1: usize,

    /// Sum of waiting ticks across discharged priority-1 patients
    pub total_wait_pri1: usize,

    /// Maximum waiting ticks among discharged priority-1 patients
    pub max_wait_pri1: usize,

    /// Priority-1 patients whose wait exceeded the critical threshold
    pub pri1_at_risk: usize,

    /// Priority-1 patients treated within the priority-1 timeout
    pub pri1_treated_quickly: usize,
}

impl GlobalStats {
    /// Create zeroed statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one discharged patient into the counters.
    ///
    /// # Arguments
    /// * `patient` - The patient being discharged
    /// * `critical_threshold` - Wait above which a priority-1 patient counts
    ///   as "at risk"
    /// * `fast_threshold` - Wait at or below which a priority-1 patient
    ///   counts as "treated quickly"
    pub fn record_discharge(
        &mut self,
        patient: &Patient,
        critical_threshold: usize,
        fast_threshold: usize,
    ) {
        let wait = patient.total_wait_ticks();

        self.num_discharged += 1;
        self.total_wait += wait;
        self.max_wait = self.max_wait.max(wait);

        if patient.priority() == 1 {
            self.num_discharged_pri1 += 1;
            self.total_wait_pri1 += wait;
            self.max_wait_pri1 = self.max_wait_pri1.max(wait);
            if wait > critical_threshold {
                self.pri1_at_risk += 1;
            }
            if wait <= fast_threshold {
                self.pri1_treated_quickly += 1;
            }
        }
    }

    /// Average wait across all discharged patients, if any
    pub fn avg_wait(&self) -> Option<f64> {
        if self.num_discharged == 0 {
            None
        } else {
            Some(self.total_wait as f64 / self.num_discharged as f64)
        }
    }

    /// Average wait across discharged priority-1 patients, if any
    pub fn avg_wait_pri1(&self) -> Option<f64> {
        if self.num_discharged_pri1 == 0 {
            None
        } else {
            Some(self.total_wait_pri1 as f64 / self.num_discharged_pri1 as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::treatment::TreatmentStep;

    fn discharged(priority: u8, wait: usize) -> Patient {
        let mut p = Patient::new(
            0,
            priority,
            "Stat".to_string(),
            "Test".to_string(),
            vec![TreatmentStep::new("ER".to_string(), 1)],
        );
        for _ in 0..wait {
            p.tick_wait();
        }
        p
    }

    #[test]
    fn test_record_discharge_basic() {
        let mut stats = GlobalStats::new();
        stats.record_discharge(&discharged(2, 10), 500, 100);
        stats.record_discharge(&discharged(3, 30), 500, 100);

        assert_eq!(stats.num_discharged, 2);
        assert_eq!(stats.total_wait, 40);
        assert_eq!(stats.max_wait, 30);
        assert_eq!(stats.num_discharged_pri1, 0);
        assert_eq!(stats.avg_wait(), Some(20.0));
        assert_eq!(stats.avg_wait_pri1(), None);
    }

    #[test]
    fn test_priority1_thresholds() {
        let mut stats = GlobalStats::new();

        // Quick: wait == fast threshold counts as treated quickly
        stats.record_discharge(&discharged(1, 100), 500, 100);
        // Neither quick nor at risk
        stats.record_discharge(&discharged(1, 300), 500, 100);
        // At risk: wait must exceed the critical threshold strictly
        stats.record_discharge(&discharged(1, 501), 500, 100);
        stats.record_discharge(&discharged(1, 500), 500, 100);

        assert_eq!(stats.num_discharged_pri1, 4);
        assert_eq!(stats.pri1_treated_quickly, 1);
        assert_eq!(stats.pri1_at_risk, 1);
        assert_eq!(stats.max_wait_pri1, 501);
    }
}
