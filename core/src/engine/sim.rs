//! Simulation engine - tick loop
//!
//! Owns all departments and advances the whole hospital one tick at a time.
//!
//! # Tick Order
//!
//! The tick steps run in this exact order; changing it changes simulation
//! semantics:
//!
//! ```text
//! For each tick t:
//! 1. Collect finished patients and route them (next department or discharge)
//! 2. Advance treatment clocks
//! 3. Advance waiting clocks
//! 4. Starvation relief (force-admit overdue priority-1 patients)
//! 5. Normal admission (priority sweep + regular fill)
//! 6. Pull at most one arrival and enqueue it
//! 7. Advance the tick counter
//! ```
//!
//! # Example
//!
//! ```rust
//! use er_simulator_core_rs::{
//!     BufferSink, GeneratorConfig, PatientGenerator, Simulation, SimulationConfig,
//! };
//!
//! let config = SimulationConfig::default();
//! let generator = PatientGenerator::new(
//!     GeneratorConfig::default(),
//!     config.follow_up_department_names(),
//! );
//! let sink = BufferSink::new();
//!
//! let mut sim = Simulation::new(config, Box::new(generator), Box::new(sink)).unwrap();
//! sim.run(Some(200)).unwrap();
//! assert_eq!(sim.current_tick(), 200);
//! ```

use crate::arrivals::ArrivalSource;
use crate::engine::stats::GlobalStats;
use crate::models::department::{Department, DepartmentSnapshot};
use crate::models::event::{Event, EventLog};
use crate::models::patient::{Patient, PatientError};
use crate::models::waiting::Discipline;
use crate::report::ReportSink;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Configuration Types
// ============================================================================

/// Per-department configuration: name and treatment-room capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentConfig {
    /// Unique department name
    pub name: String,

    /// Maximum concurrent in-service patients
    pub capacity: usize,
}

/// Complete simulation configuration, consumed at construction/reset time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Departments in processing order. Tick steps iterate departments in
    /// this order every tick, which fixes tie-breaking for same-tick events.
    pub departments: Vec<DepartmentConfig>,

    /// Waiting-room discipline for every department: priority order when
    /// true, strict arrival order when false
    pub use_priority_queues: bool,

    /// Wait above which a discharged priority-1 patient counts as at risk
    pub critical_wait_threshold: usize,

    /// Priority-1 timeout, used both as the starvation threshold for forced
    /// admission and as the "treated quickly" reporting threshold
    pub priority1_timeout: usize,
}

impl Default for SimulationConfig {
    /// Reference hospital configuration: five named stations.
    fn default() -> Self {
        Self {
            departments: vec![
                DepartmentConfig { name: "ER".to_string(), capacity: 8 },
                DepartmentConfig { name: "X-Ray".to_string(), capacity: 3 },
                DepartmentConfig { name: "MRI".to_string(), capacity: 1 },
                DepartmentConfig { name: "UltraSound".to_string(), capacity: 2 },
                DepartmentConfig { name: "Surgery".to_string(), capacity: 3 },
            ],
            use_priority_queues: true,
            critical_wait_threshold: 500,
            priority1_timeout: 100,
        }
    }
}

impl SimulationConfig {
    /// Names of all configured departments, in processing order
    pub fn department_names(&self) -> Vec<String> {
        self.departments.iter().map(|d| d.name.clone()).collect()
    }

    /// Department names eligible as follow-up treatment stages (all but the
    /// ER, which is always a patient's first stop)
    pub fn follow_up_department_names(&self) -> Vec<String> {
        self.departments
            .iter()
            .filter(|d| d.name != "ER")
            .map(|d| d.name.clone())
            .collect()
    }
}

// ============================================================================
// Engine Types
// ============================================================================

/// Engine lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineStatus {
    /// Not ticking; reset is allowed
    Stopped,

    /// Tick loop active
    Running,
}

/// Result of a single tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickResult {
    /// Tick number that was executed
    pub tick: usize,

    /// Patients who finished a treatment step this tick
    pub num_finished: usize,

    /// Patients discharged this tick
    pub num_discharged: usize,

    /// Successful starvation-relief admissions this tick
    pub num_forced: usize,

    /// Whether the arrival source produced a patient this tick
    pub new_arrival: bool,
}

/// Simulation error types.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration validation error
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// start() called while already running
    #[error("engine is already running")]
    AlreadyRunning,

    /// tick() called while stopped
    #[error("engine is not running")]
    NotRunning,

    /// reset() called while running
    #[error("reset requires a stopped engine")]
    NotStopped,

    /// An internal invariant was broken: fatal to the current tick
    #[error("simulation contract violated: {0}")]
    Contract(#[from] PatientError),
}

/// Read-only copy of the whole simulation for display layers.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSnapshot {
    pub tick: usize,
    pub status: EngineStatus,
    pub departments: Vec<DepartmentSnapshot>,
}

// ============================================================================
// Simulation
// ============================================================================

/// Main simulation engine owning all department and patient state.
///
/// Single-threaded by design: the engine is the sole mutator, executing one
/// fully sequential tick at a time. The stop flag is coalesced and observed
/// only at tick boundaries, so control calls never interleave mid-tick.
pub struct Simulation {
    /// Configuration in force since the last construction/reset
    config: SimulationConfig,

    /// Departments in fixed processing order
    departments: Vec<Department>,

    /// Current tick counter
    time: usize,

    /// Engine lifecycle state
    status: EngineStatus,

    /// Coalesced stop request, observed at the next tick boundary
    stop_requested: bool,

    /// Aggregate discharge statistics
    stats: GlobalStats,

    /// Structured event history
    event_log: EventLog,

    /// External source of patient arrivals (at most one per tick)
    arrivals: Box<dyn ArrivalSource>,

    /// Human-readable progress and report output
    sink: Box<dyn ReportSink>,
}

impl Simulation {
    /// Create a new engine in the Stopped state.
    ///
    /// # Errors
    /// [`SimulationError::InvalidConfig`] if the department list is empty,
    /// a capacity is zero, or names collide.
    pub fn new(
        config: SimulationConfig,
        arrivals: Box<dyn ArrivalSource>,
        sink: Box<dyn ReportSink>,
    ) -> Result<Self, SimulationError> {
        Self::validate_config(&config)?;

        let departments = Self::build_departments(&config);

        Ok(Self {
            config,
            departments,
            time: 0,
            status: EngineStatus::Stopped,
            stop_requested: false,
            stats: GlobalStats::new(),
            event_log: EventLog::new(),
            arrivals,
            sink,
        })
    }

    fn validate_config(config: &SimulationConfig) -> Result<(), SimulationError> {
        if config.departments.is_empty() {
            return Err(SimulationError::InvalidConfig(
                "must have at least one department".to_string(),
            ));
        }

        let mut names = std::collections::HashSet::new();
        for dept in &config.departments {
            if dept.capacity == 0 {
                return Err(SimulationError::InvalidConfig(format!(
                    "department {} has zero capacity",
                    dept.name
                )));
            }
            if !names.insert(&dept.name) {
                return Err(SimulationError::InvalidConfig(format!(
                    "duplicate department name: {}",
                    dept.name
                )));
            }
        }

        Ok(())
    }

    fn build_departments(config: &SimulationConfig) -> Vec<Department> {
        let discipline = if config.use_priority_queues {
            Discipline::Priority
        } else {
            Discipline::Fifo
        };

        config
            .departments
            .iter()
            .map(|d| Department::new(d.name.clone(), d.capacity, discipline))
            .collect()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current tick counter
    pub fn current_tick(&self) -> usize {
        self.time
    }

    /// Engine lifecycle state
    pub fn status(&self) -> EngineStatus {
        self.status
    }

    /// Aggregate discharge statistics
    pub fn stats(&self) -> &GlobalStats {
        &self.stats
    }

    /// Structured event history
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Configuration in force
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Look up a department by name
    pub fn department(&self, name: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.name() == name)
    }

    /// All departments in processing order
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    fn department_index(&self, name: &str) -> Option<usize> {
        self.departments.iter().position(|d| d.name() == name)
    }

    /// Read-only copy of the whole simulation for display layers.
    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            tick: self.time,
            status: self.status,
            departments: self.departments.iter().map(|d| d.snapshot()).collect(),
        }
    }

    // ========================================================================
    // Control surface
    // ========================================================================

    /// Transition Stopped → Running.
    ///
    /// # Errors
    /// [`SimulationError::AlreadyRunning`] if already running.
    pub fn start(&mut self) -> Result<(), SimulationError> {
        if self.status == EngineStatus::Running {
            return Err(SimulationError::AlreadyRunning);
        }
        self.status = EngineStatus::Running;
        self.stop_requested = false;
        Ok(())
    }

    /// Request a stop, observed at the next tick boundary.
    ///
    /// Coalesced and idempotent: redundant requests are ignored.
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    /// Whether a stop has been requested but not yet observed
    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    /// Observe a pending stop, transition to Stopped, and emit the final
    /// statistics report.
    pub fn finish(&mut self) {
        self.status = EngineStatus::Stopped;
        self.stop_requested = false;
        self.report_statistics();
    }

    /// Reconstruct all departments and zero every statistic, the tick
    /// counter, and the event log. Only valid while stopped.
    ///
    /// # Errors
    /// [`SimulationError::NotStopped`] if the engine is running;
    /// [`SimulationError::InvalidConfig`] if the new configuration is bad.
    pub fn reset(&mut self, config: SimulationConfig) -> Result<(), SimulationError> {
        if self.status == EngineStatus::Running {
            return Err(SimulationError::NotStopped);
        }
        Self::validate_config(&config)?;

        self.departments = Self::build_departments(&config);
        self.config = config;
        self.time = 0;
        self.stop_requested = false;
        self.stats = GlobalStats::new();
        self.event_log.clear();
        Ok(())
    }

    /// Run the tick loop until a stop is observed or `max_ticks` elapse,
    /// then stop and emit the final report.
    pub fn run(&mut self, max_ticks: Option<usize>) -> Result<(), SimulationError> {
        self.start()?;

        let mut executed = 0usize;
        loop {
            if self.stop_requested {
                break;
            }
            if let Some(limit) = max_ticks {
                if executed >= limit {
                    break;
                }
            }
            self.tick()?;
            executed += 1;
        }

        self.finish();
        Ok(())
    }

    // ========================================================================
    // Tick Loop Implementation
    // ========================================================================

    /// Execute one simulation tick.
    ///
    /// # Errors
    /// [`SimulationError::NotRunning`] if the engine is stopped;
    /// [`SimulationError::Contract`] if an internal invariant was broken.
    pub fn tick(&mut self) -> Result<TickResult, SimulationError> {
        if self.status != EngineStatus::Running {
            return Err(SimulationError::NotRunning);
        }

        let mut num_finished = 0;
        let mut num_discharged = 0;

        // STEP 1: ROUTING
        // Collect finished patients from every department and move each to
        // its next required station, or discharge it.
        for i in 0..self.departments.len() {
            let finished = self.departments[i].collect_finished();
            num_finished += finished.len();

            for mut patient in finished {
                patient.pop_finished_step()?;

                if patient.is_plan_complete() {
                    self.discharge(patient)?;
                    num_discharged += 1;
                } else {
                    let next_name = patient.current_department()?.to_string();
                    match self.department_index(&next_name) {
                        Some(j) => self.departments[j].enqueue_waiting(patient),
                        None => self.drop_unroutable(&next_name, patient, false),
                    }
                }
            }
        }

        // STEP 2: TREATMENT TICKS
        for dept in &mut self.departments {
            dept.tick_in_service()?;
        }

        // STEP 3: WAITING TICKS
        for dept in &mut self.departments {
            dept.tick_waiting();
        }

        // STEP 4: STARVATION RELIEF
        // At most one forced admission per department per tick, so forcing
        // never starves the normal admission sweep of capacity.
        let num_forced = self.force_overdue_priority1();

        // STEP 5: NORMAL ADMISSION
        for dept in &mut self.departments {
            dept.admit_while_space();
        }

        // STEP 6: ARRIVAL (at most one per tick)
        let new_arrival = self.handle_arrival();

        // STEP 7: ADVANCE TIME
        let tick = self.time;
        self.time += 1;

        Ok(TickResult {
            tick,
            num_finished,
            num_discharged,
            num_forced,
            new_arrival,
        })
    }

    /// Force-admit overdue priority-1 patients, one per department at most.
    fn force_overdue_priority1(&mut self) -> usize {
        let timeout = self.config.priority1_timeout;
        let mut num_forced = 0;

        for i in 0..self.departments.len() {
            let candidates: Vec<(String, usize)> = self.departments[i]
                .waiting_patients()
                .filter(|p| p.priority() == 1 && p.current_wait() > timeout)
                .map(|p| (p.id().to_string(), p.current_wait()))
                .collect();

            for (id, current_wait) in candidates {
                if self.departments[i].force_admit(&id) {
                    let department = self.departments[i].name().to_string();
                    self.event_log.log(Event::ForcedAdmission {
                        tick: self.time,
                        department,
                        patient_id: id,
                        current_wait,
                    });
                    num_forced += 1;
                    break;
                }
            }
        }

        num_forced
    }

    /// Pull at most one arrival and enqueue it at its first department.
    fn handle_arrival(&mut self) -> bool {
        let patient = match self.arrivals.next_patient(self.time) {
            Some(p) => p,
            None => return false,
        };

        self.sink.line(&format!("{}: Arrived: {}", self.time, patient));

        // The triage contract guarantees a non-empty plan, so the first
        // department is always present.
        let first_name = patient
            .current_department()
            .unwrap_or_default()
            .to_string();

        self.event_log.log(Event::Arrival {
            tick: self.time,
            patient_id: patient.id().to_string(),
            name: patient.name().to_string(),
            priority: patient.priority(),
            first_department: first_name.clone(),
        });

        match self.department_index(&first_name) {
            Some(j) => self.departments[j].enqueue_waiting(patient),
            None => self.drop_unroutable(&first_name, patient, true),
        }

        true
    }

    /// Discharge a patient whose plan is complete: stamp the discharge tick,
    /// fold the wait into global statistics, and report.
    fn discharge(&mut self, mut patient: Patient) -> Result<(), SimulationError> {
        patient.mark_discharged(self.time)?;

        self.stats.record_discharge(
            &patient,
            self.config.critical_wait_threshold,
            self.config.priority1_timeout,
        );

        let total_wait = patient.total_wait_ticks();
        let system_time = patient.system_time().unwrap_or_default();

        self.sink.line(&format!(
            "{}: Discharge: {} | TotalWait={} | SystemTime={}",
            self.time, patient, total_wait, system_time
        ));

        self.event_log.log(Event::Discharge {
            tick: self.time,
            patient_id: patient.id().to_string(),
            name: patient.name().to_string(),
            priority: patient.priority(),
            total_wait,
            system_time,
        });

        Ok(())
    }

    /// Fail-soft handling of an unknown department name in a plan: warn and
    /// drop the patient from the simulation. Bad plan data must degrade
    /// gracefully in a long run rather than abort it.
    fn drop_unroutable(&mut self, department: &str, patient: Patient, is_first: bool) {
        let kind = if is_first { "first department" } else { "department" };
        self.sink.line(&format!(
            "{}: WARNING unknown {} '{}' for patient: {}",
            self.time, kind, department, patient
        ));
        self.event_log.log(Event::UnknownDepartment {
            tick: self.time,
            department: department.to_string(),
            patient_id: patient.id().to_string(),
        });
    }

    // ========================================================================
    // Reporting
    // ========================================================================

    /// Emit the end-of-run statistics block to the sink.
    pub fn report_statistics(&mut self) {
        self.sink.line("----- Statistics -----");
        self.sink.line(&format!("Simulated time: {}", self.time));
        self.sink
            .line(&format!("Total patients treated: {}", self.stats.num_discharged));
        self.sink
            .line(&format!("Max waiting time: {}", self.stats.max_wait));
        if let Some(avg) = self.stats.avg_wait() {
            self.sink.line(&format!("Average waiting time: {:.2}", avg));
        }

        self.sink.line("");
        self.sink.line("----- Priority 1 Patients -----");
        self.sink.line(&format!(
            "Priority 1 patients treated: {}",
            self.stats.num_discharged_pri1
        ));
        if let Some(avg) = self.stats.avg_wait_pri1() {
            self.sink
                .line(&format!("Average waiting time (Priority 1): {:.2}", avg));
        }
        self.sink.line(&format!(
            "Max waiting time (Priority 1): {}",
            self.stats.max_wait_pri1
        ));
        self.sink.line(&format!(
            "Priority 1 patients at risk (> {} wait): {}",
            self.config.critical_wait_threshold, self.stats.pri1_at_risk
        ));
        self.sink.line(&format!(
            "Priority 1 patients treated within {} ticks: {}/{}",
            self.config.priority1_timeout,
            self.stats.pri1_treated_quickly,
            self.stats.num_discharged_pri1
        ));

        self.sink.line("");
        self.sink.line("--- Department Stats ---");
        for dept in &self.departments {
            let served = dept.patients_served();
            let avg_wait = if served == 0 {
                0.0
            } else {
                dept.total_waiting_time() as f64 / served as f64
            };
            self.sink.line(&format!(
                "{} | Patients served: {} | Avg wait: {:.1} | Max queue: {}",
                dept.name(),
                served,
                avg_wait,
                dept.max_queue_length()
            ));
        }
    }
}
