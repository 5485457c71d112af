//! Deadline engines.
//!
//! Two competing procedural rules share the same calendar machinery:
//! civil matters count effective business days, criminal matters count
//! uninterrupted calendar days once started. Both shield the endpoint
//! from landing on a closed day and both run twice per calculation, once
//! per scenario (unproven baseline vs. user-attested suspensions).

pub mod civil;
pub mod criminal;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::SuspensionEvent;

pub use civil::{compute_civil_deadline, CivilPolicy};
pub use criminal::{compute_criminal_deadline, CriminalPolicy};

/// Which procedural rule governs the count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatterType {
    Civil,
    Criminal,
}

/// Outcome of one engine run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineResult {
    /// Date on which the count completes.
    pub final_date: NaiveDate,
    /// Final date after rolling forward over trailing non-business days.
    pub final_date_prorogated: NaiveDate,
    /// Suspension days consumed while counting (civil) or skipped during
    /// start adjustment (criminal). Weekends are not listed.
    pub non_business_days: Vec<SuspensionEvent>,
    /// Exception days rolled over after the count completed.
    pub prorogated_days: Vec<SuspensionEvent>,
    /// Provable exception days observed inside the counting window that
    /// did not suspend the count because no proof was attested.
    pub potential_suspensions: Vec<SuspensionEvent>,
}
