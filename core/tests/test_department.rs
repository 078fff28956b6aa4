//! Tests for Department admission, completion, and bookkeeping

use er_simulator_core_rs::{Department, Discipline, Patient, TreatmentStep};

fn patient(priority: u8, arrival: usize, dept: &str, duration: u32) -> Patient {
    Patient::new(
        arrival,
        priority,
        "Dept".to_string(),
        "Test".to_string(),
        vec![TreatmentStep::new(dept.to_string(), duration)],
    )
}

#[test]
fn test_priority_sweep_admits_all_pri1_up_to_capacity() {
    let mut dept = Department::new("ER".to_string(), 3, Discipline::Fifo);

    // FIFO order: two routine patients in front of three urgent ones
    dept.enqueue_waiting(patient(2, 0, "ER", 5));
    dept.enqueue_waiting(patient(3, 1, "ER", 5));
    dept.enqueue_waiting(patient(1, 2, "ER", 5));
    dept.enqueue_waiting(patient(1, 3, "ER", 5));
    dept.enqueue_waiting(patient(1, 4, "ER", 5));

    dept.admit_while_space();

    // All three slots go to priority-1 patients; phase 2 finds no space.
    assert_eq!(dept.num_in_service(), 3);
    assert!(dept.in_service_patients().all(|p| p.priority() == 1));
    assert_eq!(dept.num_waiting(), 2);
}

#[test]
fn test_regular_fill_after_partial_priority_sweep() {
    let mut dept = Department::new("X-Ray".to_string(), 3, Discipline::Fifo);

    dept.enqueue_waiting(patient(2, 0, "X-Ray", 5));
    dept.enqueue_waiting(patient(1, 1, "X-Ray", 5));
    dept.enqueue_waiting(patient(3, 2, "X-Ray", 5));

    dept.admit_while_space();

    // One urgent patient via the sweep, then the head of the queue fills the
    // remaining space in arrival order.
    assert_eq!(dept.num_in_service(), 3);
    assert_eq!(dept.num_waiting(), 0);
    assert_eq!(dept.patients_served(), 3);
}

#[test]
fn test_no_patient_in_both_collections() {
    let mut dept = Department::new("MRI".to_string(), 1, Discipline::Priority);
    let p = patient(1, 0, "MRI", 2);
    let id = p.id().to_string();

    dept.enqueue_waiting(p);
    assert!(dept.waiting_patients().any(|p| p.id() == id));
    assert!(!dept.in_service_patients().any(|p| p.id() == id));

    dept.admit_while_space();
    assert!(!dept.waiting_patients().any(|p| p.id() == id));
    assert!(dept.in_service_patients().any(|p| p.id() == id));
}

#[test]
fn test_force_admit_rejected_while_full_then_succeeds() {
    let mut dept = Department::new("MRI".to_string(), 1, Discipline::Fifo);

    dept.enqueue_waiting(patient(3, 0, "MRI", 2));
    dept.admit_while_space();

    let urgent = patient(1, 1, "MRI", 1);
    let urgent_id = urgent.id().to_string();
    dept.enqueue_waiting(urgent);

    // Department full: force must fail and must not exceed capacity.
    assert!(!dept.force_admit(&urgent_id));
    assert_eq!(dept.num_in_service(), 1);

    // Finish the occupant and collect it: a slot opens.
    dept.tick_in_service().unwrap();
    dept.tick_in_service().unwrap();
    let finished = dept.collect_finished();
    assert_eq!(finished.len(), 1);

    assert!(dept.force_admit(&urgent_id));
    assert_eq!(dept.num_in_service(), 1);
    assert_eq!(dept.num_waiting(), 0);
}

#[test]
fn test_force_admit_bookkeeping_matches_normal_admission() {
    let mut dept = Department::new("ER".to_string(), 1, Discipline::Fifo);
    let mut urgent = patient(1, 0, "ER", 1);
    urgent.tick_wait();
    urgent.tick_wait();
    let id = urgent.id().to_string();
    dept.enqueue_waiting(urgent);

    assert!(dept.force_admit(&id));

    assert_eq!(dept.patients_served(), 1);
    assert_eq!(dept.total_waiting_time(), 2);
}

#[test]
fn test_collect_finished_leaves_unfinished_untouched() {
    let mut dept = Department::new("ER".to_string(), 2, Discipline::Fifo);
    dept.enqueue_waiting(patient(2, 0, "ER", 1));
    dept.enqueue_waiting(patient(2, 1, "ER", 5));
    dept.admit_while_space();

    dept.tick_in_service().unwrap();

    let finished = dept.collect_finished();
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].total_treatment_ticks(), 1);

    // The 5-tick patient is still in service, mid-treatment.
    assert_eq!(dept.num_in_service(), 1);
    assert_eq!(
        dept.in_service_patients().next().unwrap().total_treatment_ticks(),
        1
    );
}

#[test]
fn test_tick_waiting_advances_every_waiting_patient() {
    let mut dept = Department::new("ER".to_string(), 1, Discipline::Priority);
    dept.enqueue_waiting(patient(2, 0, "ER", 1));
    dept.enqueue_waiting(patient(3, 1, "ER", 1));

    dept.tick_waiting();
    dept.tick_waiting();

    for p in dept.waiting_patients() {
        assert_eq!(p.total_wait_ticks(), 2);
    }
    // Ticking also refreshes the queue-length high-water mark.
    assert_eq!(dept.max_queue_length(), 2);
}

#[test]
fn test_snapshot_is_a_copy() {
    let mut dept = Department::new("ER".to_string(), 2, Discipline::Fifo);
    dept.enqueue_waiting(patient(2, 0, "ER", 3));
    dept.admit_while_space();
    dept.enqueue_waiting(patient(3, 1, "ER", 3));

    let mut snap = dept.snapshot();
    assert_eq!(snap.name, "ER");
    assert_eq!(snap.in_service.len(), 1);
    assert_eq!(snap.waiting.len(), 1);

    // Mutating the snapshot never touches live state.
    snap.in_service.clear();
    snap.waiting.clear();
    assert_eq!(dept.num_in_service(), 1);
    assert_eq!(dept.num_waiting(), 1);
}
