//! # Prazo Core Library
//!
//! This library provides the core business logic for Prazo, a judicial
//! deadline (statute-of-limitations) calculator for electronic-gazette
//! publications. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary, with any GUI
//! being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Calendar**: immutable jurisdiction snapshot (holidays, decrees,
//!   instability, forced recess) and pure day classification
//! - **Engines**: civil business-day counting and criminal calendar-day
//!   counting, each run twice (unproven baseline vs. attested proofs)
//! - **Collector**: discovery of the suspension dates the user could
//!   evidence to shift the deadline
//! - **Session**: incremental recalculation as proof checkboxes toggle
//! - **Timeliness**: filing-date classification against both scenarios
//!
//! ## Key Components
//!
//! - [`CalendarSnapshot`]: calendar inputs for one calculation session
//! - [`calculate`]: one full calculation producing a [`CalculationOutcome`]
//! - [`ProofSession`]: incremental proof toggling
//! - [`classify_filing`]: timeliness verdict

pub mod advance;
pub mod calendar;
pub mod collector;
pub mod engine;
pub mod error;
pub mod outcome;
pub mod session;
pub mod timeliness;
pub mod trace;
pub mod usage;

pub use advance::{next_business_day, publication_cascade, Advance, StartCascade};
pub use calendar::{
    format_br, is_weekend, CalendarSnapshot, DayExceptionKind, DecreePolicy, Exception,
    ExceptionMaps, KindFilter, ProvenSet, RecessRange, RecessRule, SuspensionEvent,
};
pub use engine::{
    compute_civil_deadline, compute_criminal_deadline, CivilPolicy, CriminalPolicy,
    DeadlineResult, MatterType,
};
pub use error::{CalendarError, CoreError, Result, ValidationError};
pub use outcome::{availability_cutoff, calculate, CalculationOutcome, CalculationRequest};
pub use session::ProofSession;
pub use timeliness::{classify_filing, Timeliness};
pub use trace::TraceStep;
pub use usage::{NoopSink, UsageRecord, UsageSink};
