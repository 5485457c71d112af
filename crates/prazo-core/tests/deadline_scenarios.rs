//! End-to-end deadline scenarios over the built-in national calendar.
//!
//! These exercise the full calculate() path: publication cascade, both
//! engines, discovery and timeliness.

use chrono::NaiveDate;

use prazo_core::calendar::builtin::snapshot_for_years;
use prazo_core::{
    calculate, CalculationRequest, DayExceptionKind, Exception, MatterType, ProvenSet,
    Timeliness,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn request(availability: NaiveDate, days: u32, matter: MatterType) -> CalculationRequest {
    CalculationRequest {
        availability,
        length_days: days,
        matter,
        ignore_recess: false,
        process_number: None,
    }
}

#[test]
fn transition_window_availability_forces_june_23() {
    let snapshot = snapshot_for_years(&[2025]);
    for availability in [d(2025, 5, 28), d(2025, 5, 29)] {
        for days in [5, 15, 30] {
            let outcome = calculate(
                &snapshot,
                &request(availability, days, MatterType::Civil),
                &ProvenSet::new(),
            )
            .unwrap();
            assert_eq!(outcome.unproven.final_date_prorogated, d(2025, 6, 23));
            assert_eq!(outcome.proven.final_date_prorogated, d(2025, 6, 23));
        }
    }
}

#[test]
fn civil_availability_on_zumbi_holiday() {
    let snapshot = snapshot_for_years(&[2025]);
    let outcome = calculate(
        &snapshot,
        &request(d(2025, 11, 20), 15, MatterType::Civil),
        &ProvenSet::new(),
    )
    .unwrap();

    // Availability on the Nov 20 holiday (a Thursday): publication is
    // the next business day, the count starts on the one after that.
    assert_eq!(outcome.publication_date, d(2025, 11, 21));
    assert_eq!(outcome.deadline_start, d(2025, 11, 24));

    // Fifteen business days from Monday Nov 24 land on Friday Dec 12.
    assert_eq!(outcome.unproven.final_date, d(2025, 12, 12));
    assert_eq!(outcome.unproven.final_date_prorogated, d(2025, 12, 12));
}

#[test]
fn criminal_start_on_unproven_decree_is_not_skipped() {
    let mut snapshot = snapshot_for_years(&[2025]);
    // Decree on Monday Sep 8; the cascade from Thursday Sep 4 puts the
    // deadline start exactly there (decrees are invisible unproven).
    snapshot.maps.decrees.insert(
        d(2025, 9, 8),
        Exception::new("Decreto estadual", DayExceptionKind::Decree),
    );

    let outcome = calculate(
        &snapshot,
        &request(d(2025, 9, 4), 10, MatterType::Criminal),
        &ProvenSet::new(),
    )
    .unwrap();
    assert_eq!(outcome.deadline_start, d(2025, 9, 8));
    // No proof: the count starts on the decree day itself.
    assert!(outcome.unproven.non_business_days.is_empty());
    assert_eq!(outcome.unproven.final_date, d(2025, 9, 17));

    // With the decree attested, the start shifts and the day re-grants.
    let proven = ProvenSet::from_dates([d(2025, 9, 8)]);
    let attested = calculate(
        &snapshot,
        &request(d(2025, 9, 4), 10, MatterType::Criminal),
        &proven,
    )
    .unwrap();
    assert!(attested.proven.final_date > attested.unproven.final_date);
}

#[test]
fn criminal_recess_override_for_custody() {
    let snapshot = snapshot_for_years(&[2025, 2026]);
    let mut req = request(d(2025, 12, 15), 5, MatterType::Criminal);

    let regular = calculate(&snapshot, &req, &ProvenSet::new()).unwrap();
    req.ignore_recess = true;
    let custody = calculate(&snapshot, &req, &ProvenSet::new()).unwrap();

    // The recess starts Dec 20: a defendant in custody gets no benefit
    // from it, so the custody deadline ends earlier.
    assert!(custody.proven.final_date_prorogated < regular.proven.final_date_prorogated);
}

#[test]
fn corpus_christi_proof_extends_the_civil_deadline() {
    let snapshot = snapshot_for_years(&[2025]);
    let req = request(d(2025, 6, 2), 15, MatterType::Civil);

    let unproven = calculate(&snapshot, &req, &ProvenSet::new()).unwrap();
    let proven_set = ProvenSet::from_dates([d(2025, 6, 19), d(2025, 6, 20)]);
    let proven = calculate(&snapshot, &req, &proven_set).unwrap();

    assert_eq!(unproven.unproven, proven.unproven);
    assert!(proven.proven.final_date > proven.unproven.final_date);
    // Both CNJ dates show up in the proof checklist.
    let dates: Vec<NaiveDate> = proven
        .provable_suspensions
        .iter()
        .map(|e| e.date)
        .collect();
    assert!(dates.contains(&d(2025, 6, 19)));
    assert!(dates.contains(&d(2025, 6, 20)));
}

#[test]
fn timeliness_boundaries() {
    let snapshot = snapshot_for_years(&[2025]);
    let outcome = calculate(
        &snapshot,
        &request(d(2025, 6, 2), 15, MatterType::Civil),
        &ProvenSet::new(),
    )
    .unwrap();

    let final_date = outcome.proven.final_date_prorogated;
    assert_eq!(outcome.timeliness(final_date), Timeliness::Timely);
    assert_eq!(
        outcome.timeliness(final_date + chrono::Days::new(1)),
        Timeliness::UntimelyPendingDecreeProof
    );
    assert_eq!(
        outcome.timeliness(final_date + chrono::Days::new(2)),
        Timeliness::Untimely
    );
}

#[test]
fn usage_record_reflects_the_outcome() {
    use prazo_core::{NoopSink, UsageRecord, UsageSink};

    let snapshot = snapshot_for_years(&[2025]);
    let mut req = request(d(2025, 6, 2), 15, MatterType::Civil);
    req.process_number = Some("0001234-56.2025.8.26.0100".into());
    let outcome = calculate(&snapshot, &req, &ProvenSet::new()).unwrap();

    let record = UsageRecord::from_outcome(&outcome);
    assert_eq!(record.matter, MatterType::Civil);
    assert_eq!(record.process_number.as_deref(), Some("0001234-56.2025.8.26.0100"));
    NoopSink.record(&record);
}
