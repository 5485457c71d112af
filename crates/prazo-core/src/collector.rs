//! Discovery of provable suspension candidates.
//!
//! Produces the list of specific dates that are potentially provable and
//! would, if attested, change the outcome. This feeds the proof
//! checkboxes: discovery runs under the assume-all-proven posture so
//! unattested decrees, CNJ suspensions and instability days all surface.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::advance::StartCascade;
use crate::calendar::{
    CalendarSnapshot, DayExceptionKind, DecreePolicy, ProvenSet, SuspensionEvent,
};
use crate::engine::{compute_criminal_deadline, CriminalPolicy, DeadlineResult};
use crate::error::Result;

/// Civil discovery: the start-window cascade, the mid-period candidates
/// the engine observed, the unproven final date and its rollover days.
pub fn collect_civil(
    snapshot: &CalendarSnapshot,
    cascade: &StartCascade,
    unproven: &DeadlineResult,
) -> Vec<SuspensionEvent> {
    let mut found: BTreeMap<NaiveDate, SuspensionEvent> = BTreeMap::new();

    scan_window(snapshot, cascade, &mut found);

    for event in &unproven.potential_suspensions {
        add_if_provable(&mut found, event.clone());
    }

    let discovery = snapshot.classifier(DecreePolicy::AssumeAll);
    if let Some(exc) = discovery.classify(unproven.final_date) {
        add_if_provable(&mut found, exc);
    }
    for event in &unproven.prorogated_days {
        if let Some(exc) = discovery.classify(event.date) {
            add_if_provable(&mut found, exc);
        }
    }

    found.into_values().collect()
}

/// Criminal discovery: run the engine once more with every decree-layer
/// entry assumed proven to surface every candidate, then keep instability
/// candidates only at the deadline-start or unproven-final edges.
pub fn collect_criminal(
    snapshot: &CalendarSnapshot,
    cascade: &StartCascade,
    unproven: &DeadlineResult,
    length: u32,
    policy: CriminalPolicy,
) -> Result<Vec<SuspensionEvent>> {
    let mut found: BTreeMap<NaiveDate, SuspensionEvent> = BTreeMap::new();

    scan_window(snapshot, cascade, &mut found);

    let assume_all: ProvenSet = ProvenSet::from_dates(
        snapshot
            .maps
            .decrees
            .keys()
            .chain(snapshot.maps.instability.keys())
            .copied(),
    );
    let assumed = compute_criminal_deadline(
        snapshot,
        cascade.deadline_start,
        length,
        &assume_all,
        policy,
    )?;
    for event in assumed
        .non_business_days
        .iter()
        .chain(assumed.prorogated_days.iter())
    {
        add_if_provable(&mut found, event.clone());
    }

    // Instability is provable only at the edges for criminal matters.
    found.retain(|date, event| {
        event.kind != DayExceptionKind::Instability
            || *date == cascade.deadline_start
            || *date == unproven.final_date
    });

    Ok(found.into_values().collect())
}

/// Classify every day of the availability -> deadline-start window under
/// the assume-all posture and keep the provable hits.
fn scan_window(
    snapshot: &CalendarSnapshot,
    cascade: &StartCascade,
    found: &mut BTreeMap<NaiveDate, SuspensionEvent>,
) {
    let discovery = snapshot.classifier(DecreePolicy::AssumeAll);
    let mut current = cascade.availability;
    while current <= cascade.deadline_start {
        if let Some(exc) = discovery.classify(current) {
            add_if_provable(found, exc);
        }
        let Some(next) = current.succ_opt() else {
            break;
        };
        current = next;
    }
}

fn add_if_provable(found: &mut BTreeMap<NaiveDate, SuspensionEvent>, event: SuspensionEvent) {
    if event.kind.is_provable() {
        found.entry(event.date).or_insert(event);
    }
}

/// Merge newly discovered candidates into an existing list without ever
/// removing previous entries. The proof checklist is monotonic within a
/// calculation session.
pub fn merge_monotonic(
    existing: &mut Vec<SuspensionEvent>,
    discovered: Vec<SuspensionEvent>,
) {
    let mut by_date: BTreeMap<NaiveDate, SuspensionEvent> = existing
        .drain(..)
        .map(|event| (event.date, event))
        .collect();
    for event in discovered {
        by_date.entry(event.date).or_insert(event);
    }
    *existing = by_date.into_values().collect();
}
