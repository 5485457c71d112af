//! National-council (CNJ) suspension regrouping.
//!
//! Corpus Christi and the following day are suspended nationally by a
//! single CNJ act rather than by statute. They are therefore provable
//! suspensions, not automatic holidays: this module moves them from the
//! holiday layer into the decree layer tagged [`DayExceptionKind::CnjHoliday`]
//! and registers the two dates as one proof group, so attesting either
//! date attests both.
//!
//! The regrouping is a pure transformation applied once while building a
//! [`CalendarSnapshot`]; caller-supplied maps are never mutated in place.

use chrono::{Datelike, Days, NaiveDate};

use super::{CalendarSnapshot, DayExceptionKind, Exception};

/// Easter Sunday for `year` (Anonymous Gregorian computus).
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// Corpus Christi: sixty days after Easter Sunday.
pub fn corpus_christi(year: i32) -> Option<NaiveDate> {
    easter_sunday(year)?.checked_add_days(Days::new(60))
}

/// Apply the CNJ regrouping to a snapshot under construction.
///
/// For every year present in the holiday layer, when Corpus Christi is a
/// mapped holiday it is removed together with the following day and both
/// are reinserted into the decree layer as `CnjHoliday` entries sharing
/// one proof group.
pub(crate) fn apply_cnj_rule(snapshot: &mut CalendarSnapshot) {
    let years: Vec<i32> = {
        let mut ys: Vec<i32> = snapshot.maps.holidays.keys().map(|d| d.year()).collect();
        ys.dedup();
        ys
    };

    for year in years {
        let Some(corpus) = corpus_christi(year) else {
            continue;
        };
        let Some(following) = corpus.succ_opt() else {
            continue;
        };
        let Some(holiday) = snapshot.maps.holidays.remove(&corpus) else {
            continue;
        };

        let reason = holiday.reason;
        snapshot.maps.holidays.remove(&following);

        snapshot.maps.decrees.insert(
            corpus,
            Exception {
                reason: format!("{reason} (suspensão CNJ)"),
                kind: DayExceptionKind::CnjHoliday,
                link: holiday.link.clone(),
            },
        );
        snapshot.maps.decrees.insert(
            following,
            Exception {
                reason: format!("Dia seguinte a {reason} (suspensão CNJ)"),
                kind: DayExceptionKind::CnjHoliday,
                link: holiday.link,
            },
        );
        snapshot.proof_groups.push([corpus, following]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{ExceptionMaps, RecessRule};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn easter_2025() {
        assert_eq!(easter_sunday(2025), Some(d(2025, 4, 20)));
    }

    #[test]
    fn easter_2024_and_2026() {
        assert_eq!(easter_sunday(2024), Some(d(2024, 3, 31)));
        assert_eq!(easter_sunday(2026), Some(d(2026, 4, 5)));
    }

    #[test]
    fn corpus_christi_2025_is_june_19() {
        assert_eq!(corpus_christi(2025), Some(d(2025, 6, 19)));
    }

    #[test]
    fn regrouping_moves_corpus_christi_into_decree_layer() {
        let mut maps = ExceptionMaps::default();
        maps.holidays.insert(
            d(2025, 6, 19),
            Exception::new("Corpus Christi", DayExceptionKind::Holiday),
        );
        let snapshot = CalendarSnapshot::new(maps, RecessRule::default());

        assert!(snapshot.maps.holidays.is_empty());
        let corpus = snapshot.maps.decrees.get(&d(2025, 6, 19)).unwrap();
        assert_eq!(corpus.kind, DayExceptionKind::CnjHoliday);
        let following = snapshot.maps.decrees.get(&d(2025, 6, 20)).unwrap();
        assert_eq!(following.kind, DayExceptionKind::CnjHoliday);

        assert_eq!(snapshot.proof_groups, vec![[d(2025, 6, 19), d(2025, 6, 20)]]);
        assert_eq!(snapshot.proof_group(d(2025, 6, 20)), Some([d(2025, 6, 19), d(2025, 6, 20)]));
    }

    #[test]
    fn years_without_corpus_christi_holiday_are_untouched() {
        let mut maps = ExceptionMaps::default();
        maps.holidays.insert(
            d(2025, 11, 20),
            Exception::new("Zumbi dos Palmares", DayExceptionKind::Holiday),
        );
        let snapshot = CalendarSnapshot::new(maps, RecessRule::default());
        assert!(snapshot.maps.decrees.is_empty());
        assert!(snapshot.proof_groups.is_empty());
    }
}
