//! Jurisdiction calendar: exception maps, recess rule, day classification.
//!
//! A [`CalendarSnapshot`] is the immutable calendar input for one
//! calculation session. It holds three date-keyed exception layers
//! (holidays, decrees, instability) plus the forensic-recess rule, and
//! answers "is this date a non-business day, and why?" through
//! [`Classifier::classify`].
//!
//! Weekday (Saturday/Sunday) checks are deliberately left to callers:
//! weekends are ordinary non-business days, not calendar exceptions.

pub mod builtin;
pub mod cnj;

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, Result};

/// Why a given date is not an ordinary business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayExceptionKind {
    /// Statutory holiday; suspends automatically.
    Holiday,
    /// Ad-hoc government/court order; requires documentary proof.
    Decree,
    /// System-outage day; informational, provable only at boundaries.
    Instability,
    /// Annual forced court closure, computed from month/day ranges.
    Recess,
    /// Nationally mandated holiday treated as provable rather than
    /// automatic (e.g. Corpus Christi under the CNJ rule).
    CnjHoliday,
}

impl DayExceptionKind {
    /// Kinds the user can evidence with documentation.
    pub fn is_provable(self) -> bool {
        matches!(self, Self::Decree | Self::CnjHoliday | Self::Instability)
    }
}

/// A calendar exception attached to a date in one of the layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exception {
    pub reason: String,
    pub kind: DayExceptionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Exception {
    pub fn new(reason: impl Into<String>, kind: DayExceptionKind) -> Self {
        Self {
            reason: reason.into(),
            kind,
            link: None,
        }
    }
}

/// A dated exception, as reported by classification and collected by the
/// engines into suspension lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspensionEvent {
    pub date: NaiveDate,
    pub reason: String,
    pub kind: DayExceptionKind,
}

impl SuspensionEvent {
    fn from_exception(date: NaiveDate, exception: &Exception) -> Self {
        Self {
            date,
            reason: exception.reason.clone(),
            kind: exception.kind,
        }
    }
}

/// One month/day window of forced court closure, applied to every year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecessRange {
    pub start_month: u32,
    pub start_day: u32,
    pub end_month: u32,
    pub end_day: u32,
}

impl RecessRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        let md = (date.month(), date.day());
        let start = (self.start_month, self.start_day);
        let end = (self.end_month, self.end_day);
        if start <= end {
            md >= start && md <= end
        } else {
            // Window wraps the year boundary.
            md >= start || md <= end
        }
    }
}

/// Forced-recess rule: a set of month/day windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecessRule {
    pub ranges: Vec<RecessRange>,
}

impl Default for RecessRule {
    /// Statutory default: Jan 1-20 and Dec 20-31.
    fn default() -> Self {
        Self {
            ranges: vec![
                RecessRange {
                    start_month: 1,
                    start_day: 1,
                    end_month: 1,
                    end_day: 20,
                },
                RecessRange {
                    start_month: 12,
                    start_day: 20,
                    end_month: 12,
                    end_day: 31,
                },
            ],
        }
    }
}

impl RecessRule {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.ranges.iter().any(|r| r.contains(date))
    }
}

/// Dates the user has attested are documented suspensions.
///
/// Membership is keyed by day; dates serialize as ISO `YYYY-MM-DD`
/// strings, the canonical key shared with the exception maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProvenSet(BTreeSet<NaiveDate>);

impl ProvenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dates<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Self {
        Self(dates.into_iter().collect())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains(&date)
    }

    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.0.insert(date)
    }

    pub fn remove(&mut self, date: NaiveDate) -> bool {
        self.0.remove(&date)
    }

    /// Flip membership for `date`. Returns `true` when the date is
    /// present after the toggle.
    pub fn toggle(&mut self, date: NaiveDate) -> bool {
        if self.0.remove(&date) {
            false
        } else {
            self.0.insert(date);
            true
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.0.iter().copied()
    }
}

/// How decree-layer entries (decrees, instability, CNJ holidays) are
/// honored during classification.
///
/// The three variants map onto the caller postures the engines need:
/// `Ignore` is the unproven publication cascade (ad-hoc suspensions are
/// invisible without proof), `Attested` honors only user-attested dates,
/// and `AssumeAll` is the discovery pass that treats every entry as if it
/// were proven.
#[derive(Debug, Clone, Copy)]
pub enum DecreePolicy<'a> {
    Ignore,
    Attested(&'a ProvenSet),
    AssumeAll,
}

impl DecreePolicy<'_> {
    fn allows(&self, date: NaiveDate) -> bool {
        match self {
            DecreePolicy::Ignore => false,
            DecreePolicy::Attested(proven) => proven.contains(date),
            DecreePolicy::AssumeAll => true,
        }
    }
}

/// Restricts classification to a single calendar layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Holiday,
    /// The decree layer, including `CnjHoliday` entries.
    Decree,
    Instability,
    Recess,
}

impl KindFilter {
    fn allows_holiday(self) -> bool {
        matches!(self, Self::All | Self::Holiday)
    }
    fn allows_decree(self) -> bool {
        matches!(self, Self::All | Self::Decree)
    }
    fn allows_instability(self) -> bool {
        matches!(self, Self::All | Self::Instability)
    }
    fn allows_recess(self) -> bool {
        matches!(self, Self::All | Self::Recess)
    }
}

/// The three date-keyed exception layers.
///
/// Invariant: at most one exception per date per layer. When layers
/// overlap on a date, lookup precedence is holiday > decree > instability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionMaps {
    #[serde(default)]
    pub holidays: BTreeMap<NaiveDate, Exception>,
    #[serde(default)]
    pub decrees: BTreeMap<NaiveDate, Exception>,
    #[serde(default)]
    pub instability: BTreeMap<NaiveDate, Exception>,
}

impl ExceptionMaps {
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty() && self.decrees.is_empty() && self.instability.is_empty()
    }
}

/// Immutable calendar inputs for one calculation session.
///
/// Built once from the exception maps (the CNJ regrouping runs here, as a
/// pure transformation of the owned maps) and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSnapshot {
    pub maps: ExceptionMaps,
    #[serde(default)]
    pub recess: RecessRule,
    /// Date pairs whose proof toggles together: both dates are evidenced
    /// by a single decree.
    #[serde(default)]
    pub proof_groups: Vec<[NaiveDate; 2]>,
}

impl CalendarSnapshot {
    /// Build a snapshot from raw exception maps, applying the CNJ
    /// regrouping rule.
    pub fn new(maps: ExceptionMaps, recess: RecessRule) -> Self {
        let mut snapshot = Self {
            maps,
            recess,
            proof_groups: Vec::new(),
        };
        cnj::apply_cnj_rule(&mut snapshot);
        snapshot
    }

    /// Parse a snapshot from a JSON document. The CNJ regrouping is
    /// re-applied so hand-edited files stay consistent.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let raw: Self = serde_json::from_str(input)
            .map_err(|e| CalendarError::ParseFailed(e.to_string()))?;
        Ok(Self::new(raw.maps, raw.recess))
    }

    /// Parse a snapshot from a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let raw: Self = toml::from_str(input).map_err(CalendarError::from)?;
        Ok(Self::new(raw.maps, raw.recess))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Fail fast when no exception layer carries data.
    pub fn ensure_loaded(&self) -> Result<()> {
        if self.maps.is_empty() {
            return Err(CalendarError::MissingData(
                "no holidays, decrees or instability entries loaded".into(),
            )
            .into());
        }
        Ok(())
    }

    /// The proof group `date` belongs to, if any.
    pub fn proof_group(&self, date: NaiveDate) -> Option<[NaiveDate; 2]> {
        self.proof_groups
            .iter()
            .find(|pair| pair.contains(&date))
            .copied()
    }

    /// Classification view with a fixed decree policy.
    pub fn classifier<'a>(&'a self, policy: DecreePolicy<'a>) -> Classifier<'a> {
        Classifier {
            snapshot: self,
            policy,
            ignore_recess: false,
        }
    }
}

/// Borrowing view that fixes the classification options for repeated
/// calls. Pure: classification never touches anything but the snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    snapshot: &'a CalendarSnapshot,
    policy: DecreePolicy<'a>,
    ignore_recess: bool,
}

impl<'a> Classifier<'a> {
    /// Disregard the forced recess (criminal-matter "defendant in
    /// custody / domestic-violence protection" override).
    pub fn with_ignore_recess(mut self, ignore: bool) -> Self {
        self.ignore_recess = ignore;
        self
    }

    pub fn snapshot(&self) -> &'a CalendarSnapshot {
        self.snapshot
    }

    /// Classify `date` against every layer.
    pub fn classify(&self, date: NaiveDate) -> Option<SuspensionEvent> {
        self.classify_kind(date, KindFilter::All)
    }

    /// Classify `date` against the layers admitted by `filter`.
    ///
    /// Layer precedence is holiday > decree > instability, with the
    /// computed recess checked last. Statutory holidays always apply.
    /// Plain decrees and instability apply only under an honoring policy;
    /// `CnjHoliday` entries additionally require attestation (or the
    /// assume-all discovery posture).
    pub fn classify_kind(&self, date: NaiveDate, filter: KindFilter) -> Option<SuspensionEvent> {
        let maps = &self.snapshot.maps;

        if filter.allows_holiday() {
            if let Some(exc) = maps.holidays.get(&date) {
                return Some(SuspensionEvent::from_exception(date, exc));
            }
        }

        if filter.allows_decree() {
            if let Some(exc) = maps.decrees.get(&date) {
                if self.policy.allows(date) {
                    return Some(SuspensionEvent::from_exception(date, exc));
                }
            }
        }

        if filter.allows_instability() {
            if let Some(exc) = maps.instability.get(&date) {
                if self.policy.allows(date) {
                    return Some(SuspensionEvent::from_exception(date, exc));
                }
            }
        }

        if filter.allows_recess() && !self.ignore_recess && self.snapshot.recess.contains(date) {
            return Some(SuspensionEvent {
                date,
                reason: "Recesso forense".to_string(),
                kind: DayExceptionKind::Recess,
            });
        }

        None
    }
}

/// Saturday/Sunday check. Weekends are ordinary non-business days and
/// never appear in suspension lists.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Format a date for display and document templates: `DD/MM/YYYY`.
pub fn format_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
