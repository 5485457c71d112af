//! Calculation orchestration.
//!
//! A single [`calculate`] call runs the publication cascade and both
//! engine scenarios, discovers the provable suspension candidates and
//! assembles the audit trail. The returned [`CalculationOutcome`] is a
//! fresh value every time; caller-owned inputs are never mutated.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::advance::{publication_cascade, StartCascade};
use crate::calendar::{format_br, CalendarSnapshot, DecreePolicy, ProvenSet, SuspensionEvent};
use crate::collector::{collect_civil, collect_criminal};
use crate::engine::{
    compute_civil_deadline, compute_criminal_deadline, CivilPolicy, CriminalPolicy,
    DeadlineResult, MatterType,
};
use crate::error::{Result, ValidationError};
use crate::timeliness::{classify_filing, Timeliness};
use crate::trace::TraceStep;

/// Availability dates earlier than this legal cutoff are categorically
/// rejected before any date arithmetic runs.
pub fn availability_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 16).expect("fixed cutoff date")
}

/// Availability dates inside the electronic-gazette transition window
/// have their final deadline fixed by rule rather than computed.
fn transition_override(availability: NaiveDate) -> Option<NaiveDate> {
    let window = [
        NaiveDate::from_ymd_opt(2025, 5, 28),
        NaiveDate::from_ymd_opt(2025, 5, 29),
    ];
    if window.contains(&Some(availability)) {
        NaiveDate::from_ymd_opt(2025, 6, 23)
    } else {
        None
    }
}

/// Inputs for one calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Date the notice was made available in the electronic gazette.
    pub availability: NaiveDate,
    /// Deadline length: business days (civil) or calendar days (criminal).
    pub length_days: u32,
    pub matter: MatterType,
    /// Criminal-matter override: defendant in custody or under a
    /// domestic-violence protective order.
    #[serde(default)]
    pub ignore_recess: bool,
    /// Opaque case number, passed through for display and logging only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_number: Option<String>,
}

/// Result of one full calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationOutcome {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_number: Option<String>,
    pub matter: MatterType,
    pub deadline_length_days: u32,
    pub availability: NaiveDate,
    pub publication_date: NaiveDate,
    pub deadline_start: NaiveDate,
    /// Scenario that ignores every unattested suspension.
    pub unproven: DeadlineResult,
    /// Scenario honoring the user-attested suspensions.
    pub proven: DeadlineResult,
    /// Dates the user could evidence to shift the deadline, ascending.
    pub provable_suspensions: Vec<SuspensionEvent>,
    pub trace: Vec<TraceStep>,
}

impl CalculationOutcome {
    /// Classify a filing date against both scenario finals.
    pub fn timeliness(&self, filing: NaiveDate) -> Timeliness {
        classify_filing(
            filing,
            self.unproven.final_date_prorogated,
            self.proven.final_date_prorogated,
        )
    }

    /// Substitution map for document templates. Values are formatted
    /// `DD/MM/YYYY`; keys match the template placeholders.
    pub fn placeholders(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(
            "dataDisponibilizacao".to_string(),
            format_br(self.availability),
        );
        map.insert("dataPublicacao".to_string(), format_br(self.publication_date));
        map.insert("inicioPrazo".to_string(), format_br(self.deadline_start));
        map.insert(
            "prazoFinal".to_string(),
            format_br(self.proven.final_date_prorogated),
        );
        map.insert(
            "prazoFinalSemComprovacao".to_string(),
            format_br(self.unproven.final_date_prorogated),
        );
        map.insert(
            "prazoDias".to_string(),
            self.deadline_length_days.to_string(),
        );
        if let Some(process) = &self.process_number {
            map.insert("numeroProcesso".to_string(), process.clone());
        }
        map
    }
}

/// Run a full calculation: cascade, both scenarios, discovery, trace.
pub fn calculate(
    snapshot: &CalendarSnapshot,
    request: &CalculationRequest,
    proven: &ProvenSet,
) -> Result<CalculationOutcome> {
    snapshot.ensure_loaded()?;
    if request.length_days == 0 {
        return Err(ValidationError::InvalidLength {
            value: 0,
            message: "deadline length must be at least one day".into(),
        }
        .into());
    }
    let cutoff = availability_cutoff();
    if request.availability < cutoff {
        return Err(ValidationError::BeforeCutoff {
            date: request.availability,
            cutoff,
        }
        .into());
    }

    let ignore_recess = request.ignore_recess && request.matter == MatterType::Criminal;

    let baseline_cls = snapshot
        .classifier(DecreePolicy::Ignore)
        .with_ignore_recess(ignore_recess);
    let cascade = publication_cascade(&baseline_cls, request.availability)?;

    let (unproven, proven_result, provable) = match request.matter {
        MatterType::Civil => {
            let policy = CivilPolicy::default();
            let unproven = compute_civil_deadline(
                snapshot,
                cascade.deadline_start,
                request.length_days,
                &ProvenSet::new(),
                policy,
            )?;
            let proven_result =
                proven_civil_scenario(snapshot, request, proven, policy, &unproven)?;
            let provable = collect_civil(snapshot, &cascade, &unproven);
            (unproven, proven_result, provable)
        }
        MatterType::Criminal => {
            let policy = CriminalPolicy {
                ignore_recess,
                honor_decrees_at_rollover: true,
            };
            let unproven = compute_criminal_deadline(
                snapshot,
                cascade.deadline_start,
                request.length_days,
                &ProvenSet::new(),
                policy,
            )?;
            let proven_result =
                proven_criminal_scenario(snapshot, request, proven, policy, &unproven)?;
            let provable =
                collect_criminal(snapshot, &cascade, &unproven, request.length_days, policy)?;
            (unproven, proven_result, provable)
        }
    };

    let mut outcome = CalculationOutcome {
        id: Uuid::new_v4().to_string(),
        process_number: request.process_number.clone(),
        matter: request.matter,
        deadline_length_days: request.length_days,
        availability: cascade.availability,
        publication_date: cascade.publication,
        deadline_start: cascade.deadline_start,
        unproven,
        proven: proven_result,
        provable_suspensions: provable,
        trace: Vec::new(),
    };

    if let Some(forced) = transition_override(request.availability) {
        outcome.unproven.final_date = forced;
        outcome.unproven.final_date_prorogated = forced;
        outcome.proven.final_date = forced;
        outcome.proven.final_date_prorogated = forced;
    }

    outcome.trace = build_trace(&cascade, &outcome, request.availability);
    Ok(outcome)
}

/// Recompute the proven scenario for an existing baseline. Used by both
/// the initial calculation and the incremental proof toggling.
pub(crate) fn proven_civil_scenario(
    snapshot: &CalendarSnapshot,
    request: &CalculationRequest,
    proven: &ProvenSet,
    policy: CivilPolicy,
    unproven: &DeadlineResult,
) -> Result<DeadlineResult> {
    if proven.is_empty() {
        return Ok(unproven.clone());
    }
    let cls = snapshot.classifier(DecreePolicy::Attested(proven));
    let cascade = publication_cascade(&cls, request.availability)?;
    compute_civil_deadline(
        snapshot,
        cascade.deadline_start,
        request.length_days,
        proven,
        policy,
    )
}

pub(crate) fn proven_criminal_scenario(
    snapshot: &CalendarSnapshot,
    request: &CalculationRequest,
    proven: &ProvenSet,
    policy: CriminalPolicy,
    unproven: &DeadlineResult,
) -> Result<DeadlineResult> {
    if proven.is_empty() {
        return Ok(unproven.clone());
    }
    let cls = snapshot
        .classifier(DecreePolicy::Attested(proven))
        .with_ignore_recess(policy.ignore_recess);
    let cascade = publication_cascade(&cls, request.availability)?;
    compute_criminal_deadline(
        snapshot,
        cascade.deadline_start,
        request.length_days,
        proven,
        policy,
    )
}

fn build_trace(
    cascade: &StartCascade,
    outcome: &CalculationOutcome,
    availability: NaiveDate,
) -> Vec<TraceStep> {
    let mut trace = vec![
        TraceStep::Availability {
            date: cascade.availability,
        },
        TraceStep::AvailabilitySuspensions {
            events: cascade.availability_suspensions.clone(),
        },
        TraceStep::Publication {
            date: cascade.publication,
        },
        TraceStep::PublicationToStartInterval {
            events: cascade.interval_suspensions.clone(),
        },
        TraceStep::CountStart {
            date: cascade.deadline_start,
        },
        TraceStep::CourseSuspensions {
            events: outcome.unproven.non_business_days.clone(),
        },
        TraceStep::FinalDate {
            date: outcome.unproven.final_date,
        },
        TraceStep::Prorogations {
            events: outcome.unproven.prorogated_days.clone(),
        },
        TraceStep::FinalDateProrogated {
            date: outcome.unproven.final_date_prorogated,
        },
    ];
    if transition_override(availability).is_some() {
        trace.push(TraceStep::TransitionOverride {
            date: outcome.unproven.final_date_prorogated,
        });
    }
    trace
}
