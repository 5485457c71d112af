//! Business-day advancement.
//!
//! [`next_business_day`] steps a date forward one calendar day at a time
//! until it lands on a working day, collecting every suspension stepped
//! over on the way. The publication cascade chains two advancements to
//! derive the legally deemed publication date and the deadline start from
//! an availability date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{is_weekend, Classifier, DayExceptionKind, SuspensionEvent};
use crate::error::{CalendarError, Result};

/// Upper bound on a single forward scan. The statutory recess tops out at
/// seven weeks per year, so a scan that runs this long means the calendar
/// data is malformed.
const MAX_SCAN_DAYS: u32 = 1830;

/// Result of a single advancement: the reached business day and every
/// suspension stepped over on the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advance {
    pub date: NaiveDate,
    pub passed_over: Vec<SuspensionEvent>,
}

/// First business day strictly after `date`.
///
/// The scan classifies the very first candidate (`date + 1`) before
/// deciding anything. A day is accepted once it is not a Saturday or
/// Sunday and its classification is empty or `Instability`; instability
/// never blocks progression and is never collected.
pub fn next_business_day(classifier: &Classifier<'_>, date: NaiveDate) -> Result<Advance> {
    let mut current = date;
    let mut passed_over = Vec::new();

    for _ in 0..MAX_SCAN_DAYS {
        current = current
            .succ_opt()
            .ok_or(CalendarError::DateOutOfRange(current))?;

        let exception = classifier.classify(current);
        let suspended = match &exception {
            Some(exc) if exc.kind != DayExceptionKind::Instability => {
                passed_over.push(exc.clone());
                true
            }
            _ => false,
        };

        if !is_weekend(current) && !suspended {
            return Ok(Advance {
                date: current,
                passed_over,
            });
        }
    }

    Err(CalendarError::NoBusinessDay {
        from: date,
        scanned: MAX_SCAN_DAYS,
    }
    .into())
}

/// Availability -> publication -> deadline-start cascade.
///
/// If the availability date falls on a non-business day, availability is
/// legally deemed to occur on the next business day; publication is the
/// next business day after availability, and the deadline count starts on
/// the next business day after publication. Two advancements model this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartCascade {
    pub availability: NaiveDate,
    pub publication: NaiveDate,
    pub deadline_start: NaiveDate,
    /// Suspensions between availability and publication.
    pub availability_suspensions: Vec<SuspensionEvent>,
    /// Suspensions between publication and the deadline start.
    pub interval_suspensions: Vec<SuspensionEvent>,
}

pub fn publication_cascade(
    classifier: &Classifier<'_>,
    availability: NaiveDate,
) -> Result<StartCascade> {
    let to_publication = next_business_day(classifier, availability)?;
    let to_start = next_business_day(classifier, to_publication.date)?;
    Ok(StartCascade {
        availability,
        publication: to_publication.date,
        deadline_start: to_start.date,
        availability_suspensions: to_publication.passed_over,
        interval_suspensions: to_start.passed_over,
    })
}
