//! Fire-and-forget usage logging boundary.
//!
//! The engine never logs by itself. Callers hand a finished outcome to a
//! [`UsageSink`]; implementations must swallow their own failures -- a
//! logging error never fails or rolls back a calculation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::engine::MatterType;
use crate::outcome::CalculationOutcome;

/// Record of one completed calculation, as handed to the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub outcome_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_number: Option<String>,
    pub matter: MatterType,
    pub availability: NaiveDate,
    pub deadline_length_days: u32,
    pub final_date_prorogated: NaiveDate,
}

impl UsageRecord {
    pub fn from_outcome(outcome: &CalculationOutcome) -> Self {
        Self {
            outcome_id: outcome.id.clone(),
            process_number: outcome.process_number.clone(),
            matter: outcome.matter,
            availability: outcome.availability,
            deadline_length_days: outcome.deadline_length_days,
            final_date_prorogated: outcome.proven.final_date_prorogated,
        }
    }
}

/// Collaborator-side sink for usage records.
pub trait UsageSink {
    /// Implementations swallow errors; there is nothing to return.
    fn record(&self, record: &UsageRecord);
}

/// Sink that drops every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl UsageSink for NoopSink {
    fn record(&self, _record: &UsageRecord) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::builtin::snapshot_for_years;
    use crate::calendar::ProvenSet;
    use crate::outcome::{calculate, CalculationRequest};

    #[test]
    fn record_carries_the_proven_final() {
        let snapshot = snapshot_for_years(&[2025]);
        let request = CalculationRequest {
            availability: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            length_days: 15,
            matter: MatterType::Civil,
            ignore_recess: false,
            process_number: Some("proc-1".into()),
        };
        let outcome = calculate(&snapshot, &request, &ProvenSet::new()).unwrap();
        let record = UsageRecord::from_outcome(&outcome);
        assert_eq!(record.outcome_id, outcome.id);
        assert_eq!(
            record.final_date_prorogated,
            outcome.proven.final_date_prorogated
        );
        NoopSink.record(&record);
    }
}
