//! Incremental proof toggling over a computed outcome.
//!
//! A [`ProofSession`] owns one [`CalculationOutcome`] and its attested
//! set. Toggling a date re-derives only the proven scenario; the
//! unproven baseline is computed once and never recomputed. Toggling the
//! same date twice is a no-op, and the provable-suspension checklist
//! only ever grows within a session.

use chrono::NaiveDate;

use crate::advance::publication_cascade;
use crate::calendar::{CalendarSnapshot, DecreePolicy, ProvenSet};
use crate::collector::{collect_civil, collect_criminal, merge_monotonic};
use crate::engine::{CivilPolicy, CriminalPolicy, MatterType};
use crate::error::Result;
use crate::outcome::{
    calculate, proven_civil_scenario, proven_criminal_scenario, CalculationOutcome,
    CalculationRequest,
};

/// One calculation plus its evolving proof state.
#[derive(Debug, Clone)]
pub struct ProofSession<'a> {
    snapshot: &'a CalendarSnapshot,
    request: CalculationRequest,
    proven: ProvenSet,
    outcome: CalculationOutcome,
}

impl<'a> ProofSession<'a> {
    /// Run the initial calculation with nothing attested.
    pub fn start(snapshot: &'a CalendarSnapshot, request: CalculationRequest) -> Result<Self> {
        let outcome = calculate(snapshot, &request, &ProvenSet::new())?;
        Ok(Self {
            snapshot,
            request,
            proven: ProvenSet::new(),
            outcome,
        })
    }

    pub fn outcome(&self) -> &CalculationOutcome {
        &self.outcome
    }

    pub fn proven(&self) -> &ProvenSet {
        &self.proven
    }

    /// Toggle proof for `date` and re-derive the proven scenario.
    ///
    /// Dates in a proof group (the CNJ pair) toggle together. An empty
    /// resulting set restores the proven scenario to an exact copy of
    /// the unproven baseline.
    pub fn toggle(&mut self, date: NaiveDate) -> Result<&CalculationOutcome> {
        match self.snapshot.proof_group(date) {
            Some(group) => {
                for member in group {
                    self.proven.toggle(member);
                }
            }
            None => {
                self.proven.toggle(date);
            }
        }
        self.recalculate()?;
        Ok(&self.outcome)
    }

    fn recalculate(&mut self) -> Result<()> {
        if self.proven.is_empty() {
            self.outcome.proven = self.outcome.unproven.clone();
            return Ok(());
        }

        match self.request.matter {
            MatterType::Civil => {
                self.outcome.proven = proven_civil_scenario(
                    self.snapshot,
                    &self.request,
                    &self.proven,
                    CivilPolicy::default(),
                    &self.outcome.unproven,
                )?;
                let cls = self
                    .snapshot
                    .classifier(DecreePolicy::Attested(&self.proven));
                let cascade = publication_cascade(&cls, self.request.availability)?;
                let discovered = collect_civil(self.snapshot, &cascade, &self.outcome.proven);
                merge_monotonic(&mut self.outcome.provable_suspensions, discovered);
            }
            MatterType::Criminal => {
                let policy = CriminalPolicy {
                    ignore_recess: self.request.ignore_recess,
                    honor_decrees_at_rollover: true,
                };
                self.outcome.proven = proven_criminal_scenario(
                    self.snapshot,
                    &self.request,
                    &self.proven,
                    policy,
                    &self.outcome.unproven,
                )?;
                let cls = self
                    .snapshot
                    .classifier(DecreePolicy::Attested(&self.proven))
                    .with_ignore_recess(policy.ignore_recess);
                let cascade = publication_cascade(&cls, self.request.availability)?;
                let discovered = collect_criminal(
                    self.snapshot,
                    &cascade,
                    &self.outcome.proven,
                    self.request.length_days,
                    policy,
                )?;
                merge_monotonic(&mut self.outcome.provable_suspensions, discovered);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::builtin::snapshot_for_years;
    use crate::calendar::{DayExceptionKind, Exception};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn civil_request(availability: NaiveDate, days: u32) -> CalculationRequest {
        CalculationRequest {
            availability,
            length_days: days,
            matter: MatterType::Civil,
            ignore_recess: false,
            process_number: None,
        }
    }

    #[test]
    fn corpus_christi_dates_toggle_together() {
        let snapshot = snapshot_for_years(&[2025]);
        let mut session =
            ProofSession::start(&snapshot, civil_request(d(2025, 6, 2), 15)).unwrap();

        session.toggle(d(2025, 6, 19)).unwrap();
        assert!(session.proven().contains(d(2025, 6, 19)));
        assert!(session.proven().contains(d(2025, 6, 20)));

        session.toggle(d(2025, 6, 20)).unwrap();
        assert!(session.proven().is_empty());
    }

    #[test]
    fn empty_proof_restores_the_baseline_exactly() {
        let snapshot = snapshot_for_years(&[2025]);
        let mut session =
            ProofSession::start(&snapshot, civil_request(d(2025, 6, 2), 15)).unwrap();
        let baseline = session.outcome().clone();

        session.toggle(d(2025, 6, 19)).unwrap();
        assert_ne!(session.outcome().proven, baseline.proven);

        session.toggle(d(2025, 6, 19)).unwrap();
        assert_eq!(session.outcome().proven, baseline.unproven);
        assert_eq!(session.outcome().unproven, baseline.unproven);
    }

    #[test]
    fn checklist_is_monotonic() {
        let mut snapshot = snapshot_for_years(&[2025]);
        snapshot.maps.decrees.insert(
            d(2025, 6, 24),
            Exception::new("Decreto municipal", DayExceptionKind::Decree),
        );
        let mut session =
            ProofSession::start(&snapshot, civil_request(d(2025, 6, 2), 15)).unwrap();

        let mut seen: Vec<NaiveDate> = session
            .outcome()
            .provable_suspensions
            .iter()
            .map(|e| e.date)
            .collect();

        for toggle in [d(2025, 6, 19), d(2025, 6, 24), d(2025, 6, 19), d(2025, 6, 24)] {
            session.toggle(toggle).unwrap();
            let now: Vec<NaiveDate> = session
                .outcome()
                .provable_suspensions
                .iter()
                .map(|e| e.date)
                .collect();
            for date in &seen {
                assert!(now.contains(date), "{date} dropped from the checklist");
            }
            seen = now;
        }
    }

    #[test]
    fn unproven_baseline_is_never_recomputed() {
        let snapshot = snapshot_for_years(&[2025]);
        let mut session =
            ProofSession::start(&snapshot, civil_request(d(2025, 6, 2), 15)).unwrap();
        let baseline = session.outcome().unproven.clone();
        session.toggle(d(2025, 6, 19)).unwrap();
        session.toggle(d(2025, 6, 20)).unwrap();
        session.toggle(d(2025, 6, 19)).unwrap();
        assert_eq!(session.outcome().unproven, baseline);
    }
}
