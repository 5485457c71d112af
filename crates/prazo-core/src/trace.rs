//! Audit trail of a calculation.
//!
//! Every calculation produces an ordered sequence of named steps, each
//! optionally carrying a date or a list of suspension events. The UI and
//! the CLI render it; nothing in the core consumes it back.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::SuspensionEvent;

/// One step of the calculation cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum TraceStep {
    Availability { date: NaiveDate },
    AvailabilitySuspensions { events: Vec<SuspensionEvent> },
    Publication { date: NaiveDate },
    PublicationToStartInterval { events: Vec<SuspensionEvent> },
    CountStart { date: NaiveDate },
    CourseSuspensions { events: Vec<SuspensionEvent> },
    FinalDate { date: NaiveDate },
    Prorogations { events: Vec<SuspensionEvent> },
    FinalDateProrogated { date: NaiveDate },
    /// The fixed transition-window override replaced the computed finals.
    TransitionOverride { date: NaiveDate },
}

impl TraceStep {
    /// Human-readable step label, as shown in documents and on screen.
    pub fn label(&self) -> &'static str {
        match self {
            TraceStep::Availability { .. } => "Disponibilização",
            TraceStep::AvailabilitySuspensions { .. } => "Suspensões na Disponibilização",
            TraceStep::Publication { .. } => "Data da Publicação",
            TraceStep::PublicationToStartInterval { .. } => {
                "Intervalo Publicação -> Início do Prazo"
            }
            TraceStep::CountStart { .. } => "Início da Contagem",
            TraceStep::CourseSuspensions { .. } => "Suspensões no Curso do Prazo",
            TraceStep::FinalDate { .. } => "Prazo Final",
            TraceStep::Prorogations { .. } => "Prorrogações",
            TraceStep::FinalDateProrogated { .. } => "Prazo Final Prorrogado",
            TraceStep::TransitionOverride { .. } => "Regra de Transição",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        let step = TraceStep::Availability {
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        };
        assert_eq!(step.label(), "Disponibilização");
    }

    #[test]
    fn serializes_with_step_tag() {
        let step = TraceStep::Publication {
            date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
        };
        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"step\":\"publication\""));
        assert!(json.contains("2025-06-03"));
    }
}
