//! Filing timeliness classification.
//!
//! Compares a filing date against the two scenario end-dates. All dates
//! are day-granular (`NaiveDate`), which is the required midnight-UTC
//! normalization: callers must not feed local datetimes in here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Verdict on a filing relative to the computed deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeliness {
    Timely,
    Untimely,
    /// Exactly one day past the unproven final: an unproven decree could
    /// still close the gap if the user evidences it.
    UntimelyPendingDecreeProof,
}

/// Classify a filing against both scenario finals.
pub fn classify_filing(
    filing: NaiveDate,
    unproven_final: NaiveDate,
    proven_final: NaiveDate,
) -> Timeliness {
    if filing <= proven_final {
        return Timeliness::Timely;
    }
    let diff_days = (filing - unproven_final).num_days();
    match diff_days {
        1 => Timeliness::UntimelyPendingDecreeProof,
        d if d >= 2 => Timeliness::Untimely,
        // Unreachable when proven_final >= unproven_final; kept as the
        // specified fallback.
        _ => Timeliness::Untimely,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn filing_on_the_proven_final_is_timely() {
        let verdict = classify_filing(d(2025, 6, 23), d(2025, 6, 20), d(2025, 6, 23));
        assert_eq!(verdict, Timeliness::Timely);
    }

    #[test]
    fn one_day_past_unproven_is_pending_proof() {
        let verdict = classify_filing(d(2025, 6, 21), d(2025, 6, 20), d(2025, 6, 20));
        assert_eq!(verdict, Timeliness::UntimelyPendingDecreeProof);
    }

    #[test]
    fn two_days_past_unproven_is_untimely() {
        let verdict = classify_filing(d(2025, 6, 22), d(2025, 6, 20), d(2025, 6, 20));
        assert_eq!(verdict, Timeliness::Untimely);
    }

    #[test]
    fn filing_before_the_deadline_is_timely() {
        let verdict = classify_filing(d(2025, 6, 10), d(2025, 6, 20), d(2025, 6, 20));
        assert_eq!(verdict, Timeliness::Timely);
    }

    #[test]
    fn proven_scenario_can_rescue_a_late_filing() {
        // One day past the unproven final but covered by the proven one.
        let verdict = classify_filing(d(2025, 6, 21), d(2025, 6, 20), d(2025, 6, 21));
        assert_eq!(verdict, Timeliness::Timely);
    }
}
