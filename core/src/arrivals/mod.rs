//! Arrival source contract and deterministic patient generation.
//!
//! The engine treats arrivals as opaque and external: once per tick it asks
//! an [`ArrivalSource`] for at most one new patient. This module also ships
//! the default source, a deterministic generator driven by the seeded RNG.
//!
//! # Key Principles
//!
//! 1. **Determinism**: same seed + same config → same patient stream
//! 2. **Triage contract**: every generated patient has priority 1-3 and a
//!    treatment plan of at least one step, starting at the ER
//! 3. **At most one arrival per tick**
//!
//! # Example
//! ```
//! use er_simulator_core_rs::arrivals::{ArrivalSource, GeneratorConfig, PatientGenerator};
//!
//! let config = GeneratorConfig::default();
//! let stages = vec!["X-Ray".to_string(), "MRI".to_string()];
//! let mut generator = PatientGenerator::new(config, stages);
//!
//! for tick in 0..50 {
//!     if let Some(patient) = generator.next_patient(tick) {
//!         assert_eq!(patient.current_department().unwrap(), "ER");
//!     }
//! }
//! ```

use crate::models::patient::Patient;
use crate::models::treatment::TreatmentStep;
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

/// External source of patient arrivals.
///
/// Given the current tick, either returns a newly constructed patient (with
/// priority, arrival tick, and a plan of at least one step) or indicates no
/// arrival this tick. Invoked by the engine at most once per tick.
pub trait ArrivalSource {
    fn next_patient(&mut self, tick: usize) -> Option<Patient>;
}

/// Source that never produces a patient. Useful for driving the engine with
/// manually enqueued patients in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoArrivals;

impl ArrivalSource for NoArrivals {
    fn next_patient(&mut self, _tick: usize) -> Option<Patient> {
        None
    }
}

/// Tunables for the deterministic patient generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// RNG seed; fully determines the arrival stream
    pub seed: u64,

    /// Average ticks between arrivals (each tick fires with probability
    /// 1 / arrival_interval)
    pub arrival_interval: u32,

    /// Probability of priority 1, in percent
    pub prob_pri1: u32,

    /// Probability of priority 2, in percent (remainder is priority 3)
    pub prob_pri2: u32,

    /// Maximum number of follow-up stages after the initial ER visit
    pub max_extra_treatments: usize,

    /// Per-step duration range in ticks, inclusive
    pub duration_range: (u32, u32),
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            arrival_interval: 8,
            prob_pri1: 10,
            prob_pri2: 30,
            max_extra_treatments: 3,
            duration_range: (2, 10),
        }
    }
}

/// Name pool for cosmetic patient identities.
const FIRST_NAMES: &[&str] = &[
    "Alex", "Blake", "Casey", "Dana", "Eli", "Frankie", "Grace", "Harper", "Iris", "Jordan",
    "Kim", "Logan", "Morgan", "Nico", "Olive", "Parker", "Quinn", "Riley", "Sam", "Taylor",
];
const LAST_NAMES: &[&str] = &[
    "Adams", "Brown", "Clark", "Davis", "Evans", "Fisher", "Garcia", "Hughes", "Irwin", "Jones",
    "King", "Lewis", "Moore", "Nash", "Owens", "Price", "Reed", "Smith", "Turner", "Walker",
];

/// Deterministic patient generator.
///
/// Every generated plan begins with an ER triage stage, followed by a random
/// selection of follow-up stages drawn from the configured department names.
pub struct PatientGenerator {
    config: GeneratorConfig,
    rng: RngManager,

    /// Departments eligible as follow-up stages (ER excluded; it is always
    /// the first stage)
    follow_up_departments: Vec<String>,
}

impl PatientGenerator {
    /// Create a generator.
    ///
    /// # Arguments
    /// * `config` - Generator tunables
    /// * `follow_up_departments` - Department names eligible as stages after
    ///   the initial ER visit
    pub fn new(config: GeneratorConfig, follow_up_departments: Vec<String>) -> Self {
        let rng = RngManager::new(config.seed);
        Self {
            config,
            rng,
            follow_up_departments,
        }
    }

    fn roll_priority(&mut self) -> u8 {
        let roll = self.rng.range(0, 100) as u32;
        if roll < self.config.prob_pri1 {
            1
        } else if roll < self.config.prob_pri1 + self.config.prob_pri2 {
            2
        } else {
            3
        }
    }

    fn roll_duration(&mut self) -> u32 {
        let (min, max) = self.config.duration_range;
        self.rng.range(min as i64, max as i64 + 1) as u32
    }

    fn build_plan(&mut self) -> Vec<TreatmentStep> {
        let mut plan = vec![TreatmentStep::new("ER".to_string(), self.roll_duration())];

        if !self.follow_up_departments.is_empty() {
            let extra = self.rng.range(0, self.config.max_extra_treatments as i64 + 1) as usize;
            for _ in 0..extra {
                let idx = self.rng.range(0, self.follow_up_departments.len() as i64) as usize;
                let department = self.follow_up_departments[idx].clone();
                plan.push(TreatmentStep::new(department, self.roll_duration()));
            }
        }

        plan
    }
}

impl ArrivalSource for PatientGenerator {
    fn next_patient(&mut self, tick: usize) -> Option<Patient> {
        let interval = self.config.arrival_interval.max(1) as f64;
        if !self.rng.chance(1.0 / interval) {
            return None;
        }

        let priority = self.roll_priority();
        let first = FIRST_NAMES[self.rng.range(0, FIRST_NAMES.len() as i64) as usize];
        let last = LAST_NAMES[self.rng.range(0, LAST_NAMES.len() as i64) as usize];
        let plan = self.build_plan();

        Some(Patient::new(
            tick,
            priority,
            first.to_string(),
            last.to_string(),
            plan,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arrivals_source() {
        let mut source = NoArrivals;
        for tick in 0..100 {
            assert!(source.next_patient(tick).is_none());
        }
    }

    #[test]
    fn test_generated_plans_start_at_er() {
        let mut generator = PatientGenerator::new(
            GeneratorConfig {
                arrival_interval: 1, // arrive every tick
                ..GeneratorConfig::default()
            },
            vec!["X-Ray".to_string(), "Surgery".to_string()],
        );

        for tick in 0..50 {
            let patient = generator.next_patient(tick).expect("interval 1 always fires");
            assert_eq!(patient.current_department().unwrap(), "ER");
            assert!(patient.treatments_remaining() >= 1);
            assert!((1..=3).contains(&patient.priority()));
        }
    }

    #[test]
    fn test_priority_distribution_respects_extremes() {
        // 100% priority 1
        let mut all_urgent = PatientGenerator::new(
            GeneratorConfig {
                arrival_interval: 1,
                prob_pri1: 100,
                prob_pri2: 0,
                ..GeneratorConfig::default()
            },
            vec![],
        );
        for tick in 0..20 {
            assert_eq!(all_urgent.next_patient(tick).unwrap().priority(), 1);
        }

        // 0% priority 1 and 2
        let mut all_routine = PatientGenerator::new(
            GeneratorConfig {
                arrival_interval: 1,
                prob_pri1: 0,
                prob_pri2: 0,
                ..GeneratorConfig::default()
            },
            vec![],
        );
        for tick in 0..20 {
            assert_eq!(all_routine.next_patient(tick).unwrap().priority(), 3);
        }
    }
}
