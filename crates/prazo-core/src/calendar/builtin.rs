//! Built-in national jurisdiction calendar.
//!
//! Default exception data used by the CLI and by tests when no snapshot
//! file is supplied. Covers the national court holidays; ad-hoc decrees
//! and instability days are jurisdiction-specific and always come from a
//! snapshot file.

use chrono::{Days, NaiveDate};

use super::cnj::easter_sunday;
use super::{CalendarSnapshot, DayExceptionKind, Exception, ExceptionMaps, RecessRule};

/// National court holidays for `year`, as (date, reason) pairs.
///
/// Movable feasts (Carnival, Good Friday, Corpus Christi) are derived
/// from the Easter computus. Corpus Christi is listed here as a holiday;
/// the CNJ regrouping retags it while the snapshot is built.
pub fn national_holidays(year: i32) -> Vec<(NaiveDate, String)> {
    let mut days: Vec<(NaiveDate, String)> = Vec::new();
    let mut fixed = |month: u32, day: u32, reason: &str| {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            days.push((date, reason.to_string()));
        }
    };

    fixed(1, 1, "Confraternização Universal");
    fixed(4, 21, "Tiradentes");
    fixed(5, 1, "Dia do Trabalho");
    fixed(9, 7, "Independência do Brasil");
    fixed(10, 12, "Nossa Senhora Aparecida");
    fixed(11, 2, "Finados");
    fixed(11, 15, "Proclamação da República");
    fixed(11, 20, "Zumbi dos Palmares");
    fixed(12, 25, "Natal");

    if let Some(easter) = easter_sunday(year) {
        let mut movable = |offset_days: i64, reason: &str| {
            let date = if offset_days < 0 {
                easter.checked_sub_days(Days::new(offset_days.unsigned_abs()))
            } else {
                easter.checked_add_days(Days::new(offset_days as u64))
            };
            if let Some(date) = date {
                days.push((date, reason.to_string()));
            }
        };
        movable(-48, "Carnaval (segunda-feira)");
        movable(-47, "Carnaval (terça-feira)");
        movable(-2, "Sexta-feira Santa");
        movable(60, "Corpus Christi");
    }

    days.sort_by_key(|(date, _)| *date);
    days
}

/// Build a snapshot carrying the national holidays for every year in
/// `years`, under the statutory recess rule.
pub fn snapshot_for_years(years: &[i32]) -> CalendarSnapshot {
    let mut maps = ExceptionMaps::default();
    for &year in years {
        for (date, reason) in national_holidays(year) {
            maps.holidays
                .insert(date, Exception::new(reason, DayExceptionKind::Holiday));
        }
    }
    CalendarSnapshot::new(maps, RecessRule::default())
}
