//! Criminal deadline engine: calendar-day counting.
//!
//! Criminal procedural deadlines run in uninterrupted calendar days once
//! started, but the start point and the endpoint are still shielded from
//! literally falling on a closed day. The "defendant in custody /
//! domestic-violence protection" override lets the forced recess itself
//! be disregarded.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::{
    is_weekend, CalendarSnapshot, Classifier, DecreePolicy, ProvenSet, SuspensionEvent,
};
use crate::error::{CalendarError, Result, ValidationError};

use super::DeadlineResult;

/// How the criminal count treats the recess and attested suspensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriminalPolicy {
    /// Disregard the forced recess entirely.
    pub ignore_recess: bool,
    /// Attested decrees/instability shift the start and extend the
    /// rollover.
    pub honor_decrees_at_rollover: bool,
}

impl Default for CriminalPolicy {
    fn default() -> Self {
        Self {
            ignore_recess: false,
            honor_decrees_at_rollover: true,
        }
    }
}

const MAX_SCAN_DAYS: u32 = 1830;

/// Shift the start to the next open day, add `length - 1` calendar days
/// (the start date is the first day of the count), re-grant attested
/// suspension days consumed during start adjustment, then roll the raw
/// final date forward over trailing closed days.
pub fn compute_criminal_deadline(
    snapshot: &CalendarSnapshot,
    start: NaiveDate,
    length: u32,
    proven: &ProvenSet,
    policy: CriminalPolicy,
) -> Result<DeadlineResult> {
    if length == 0 {
        return Err(ValidationError::InvalidLength {
            value: length,
            message: "deadline length must be at least one day".into(),
        }
        .into());
    }

    let attested = snapshot
        .classifier(DecreePolicy::Attested(proven))
        .with_ignore_recess(policy.ignore_recess);

    // Start adjustment. The check runs on the start date itself: decrees
    // require proof here too, so an unattested decree never shifts the
    // start.
    let mut adjusted = start;
    let mut start_skips: Vec<SuspensionEvent> = Vec::new();
    let mut regranted: u64 = 0;
    let mut scanned = 0u32;
    loop {
        let exception = blocking_exception(&attested, policy, adjusted);
        if !is_weekend(adjusted) && exception.is_none() {
            break;
        }
        if let Some(exc) = exception {
            if !is_weekend(adjusted) {
                if exc.kind.is_provable() {
                    // Attested suspension days consumed before the count
                    // started must be re-granted at the end.
                    regranted += 1;
                }
                start_skips.push(exc);
            }
        }
        adjusted = adjusted
            .succ_opt()
            .ok_or(CalendarError::DateOutOfRange(adjusted))?;
        scanned += 1;
        if scanned > MAX_SCAN_DAYS {
            return Err(CalendarError::NoBusinessDay {
                from: start,
                scanned,
            }
            .into());
        }
    }

    let final_date = adjusted
        .checked_add_days(Days::new(u64::from(length) - 1 + regranted))
        .ok_or(CalendarError::DateOutOfRange(adjusted))?;

    // Endpoint rollover: a plain while loop, the raw final date stands
    // when it is already an open day.
    let mut final_date_prorogated = final_date;
    let mut prorogated_days: Vec<SuspensionEvent> = Vec::new();
    let mut scanned = 0u32;
    loop {
        let exception = blocking_exception(&attested, policy, final_date_prorogated);
        if !is_weekend(final_date_prorogated) && exception.is_none() {
            break;
        }
        if let Some(exc) = exception {
            if !is_weekend(final_date_prorogated) {
                prorogated_days.push(exc);
            }
        }
        final_date_prorogated = final_date_prorogated
            .succ_opt()
            .ok_or(CalendarError::DateOutOfRange(final_date_prorogated))?;
        scanned += 1;
        if scanned > MAX_SCAN_DAYS {
            return Err(CalendarError::NoBusinessDay {
                from: final_date,
                scanned,
            }
            .into());
        }
    }

    Ok(DeadlineResult {
        final_date,
        final_date_prorogated,
        non_business_days: start_skips,
        prorogated_days,
        potential_suspensions: Vec::new(),
    })
}

/// A closed day for criminal purposes: holiday, non-ignored recess, or an
/// attested decree/instability when the policy honors those.
fn blocking_exception(
    attested: &Classifier<'_>,
    policy: CriminalPolicy,
    date: NaiveDate,
) -> Option<SuspensionEvent> {
    let exc = attested.classify(date)?;
    if exc.kind.is_provable() && !policy.honor_decrees_at_rollover {
        return None;
    }
    Some(exc)
}
