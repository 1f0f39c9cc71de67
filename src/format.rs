//! Duration rendering shared by the dashboard, the scan page and the CSV export.
//!
//! Durations can be negative when a check-out instant precedes its check-in
//! (clock skew between instances); they render with a leading `-`.

use chrono::TimeDelta;

/// Whole seconds of a duration, rounded to nearest with ties to even.
fn rounded_seconds(value: TimeDelta) -> i64 {
    let micros = value.num_microseconds().unwrap_or(i64::MAX);
    let (secs, frac) = (micros.div_euclid(1_000_000), micros.rem_euclid(1_000_000));
    match frac.cmp(&500_000) {
        std::cmp::Ordering::Greater => secs + 1,
        std::cmp::Ordering::Equal if secs % 2 != 0 => secs + 1,
        _ => secs,
    }
}

fn sign(total: i64) -> &'static str {
    if total < 0 { "-" } else { "" }
}

/// `H:MM`, rounding to the nearest second first. Zero shows as `-`.
pub fn format_hhmm(value: TimeDelta) -> String {
    if value.is_zero() {
        return "-".to_string();
    }
    let total = rounded_seconds(value);
    let abs = total.unsigned_abs();
    format!("{}{}:{:02}", sign(total), abs / 3600, abs % 3600 / 60)
}

/// `H:MM:SS`, rounding to the nearest second first. Zero shows as `-`.
pub fn format_hhmmss(value: TimeDelta) -> String {
    if value.is_zero() {
        return "-".to_string();
    }
    let total = rounded_seconds(value);
    let abs = total.unsigned_abs();
    format!(
        "{}{}:{:02}:{:02}",
        sign(total),
        abs / 3600,
        abs % 3600 / 60,
        abs % 60
    )
}

/// Aggregate label `"{hours}h {minutes}min"` for a list of worked durations.
///
/// Each duration contributes its whole seconds (fraction dropped); the sum
/// is split into hours and minutes and leftover seconds are dropped. A
/// negative sum keeps its sign on the hours.
pub fn total_label<I>(durations: I) -> String
where
    I: IntoIterator<Item = TimeDelta>,
{
    let total_seconds: i64 = durations.into_iter().map(|d| d.num_seconds()).sum();
    let abs = total_seconds.unsigned_abs();
    format!("{}{}h {}min", sign(total_seconds), abs / 3600, abs % 3600 / 60)
}

/// Whole minutes of a duration, floored.
pub fn whole_minutes(value: TimeDelta) -> i64 {
    let micros = value.num_microseconds().unwrap_or(i64::MAX);
    micros.div_euclid(60_000_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_duration_is_a_dash() {
        assert_eq!(format_hhmm(TimeDelta::zero()), "-");
        assert_eq!(format_hhmmss(TimeDelta::zero()), "-");
    }

    #[test]
    fn rounds_to_nearest_second_before_formatting() {
        // 1:51:09.6 rounds up to 1:51:10
        let d = TimeDelta::seconds(3600 + 51 * 60 + 9) + TimeDelta::milliseconds(600);
        assert_eq!(format_hhmmss(d), "1:51:10");
        assert_eq!(format_hhmm(d), "1:51");

        // 59:59.5 carries into the next hour
        let d = TimeDelta::seconds(59 * 60 + 59) + TimeDelta::milliseconds(500);
        assert_eq!(format_hhmm(d), "1:00");
        assert_eq!(format_hhmmss(d), "1:00:00");
    }

    #[test]
    fn half_seconds_round_to_even() {
        let half = TimeDelta::milliseconds(500);
        assert_eq!(format_hhmmss(TimeDelta::seconds(1) + half), "0:00:02");
        assert_eq!(format_hhmmss(TimeDelta::seconds(2) + half), "0:00:02");
        assert_eq!(format_hhmmss(TimeDelta::seconds(3) + half), "0:00:04");
        assert_eq!(format_hhmmss(half), "0:00:00");
    }

    #[test]
    fn negative_durations_keep_their_sign() {
        assert_eq!(format_hhmmss(TimeDelta::seconds(-1)), "-0:00:01");
        assert_eq!(format_hhmm(TimeDelta::seconds(-1)), "-0:00");
        assert_eq!(format_hhmm(-(TimeDelta::hours(1) + TimeDelta::minutes(5))), "-1:05");
        // -2.5s ties to even
        assert_eq!(format_hhmmss(TimeDelta::milliseconds(-2500)), "-0:00:02");
        assert_eq!(total_label([TimeDelta::seconds(-3660)]), "-1h 1min");
    }

    #[test]
    fn hours_are_not_wrapped_at_a_day() {
        assert_eq!(format_hhmm(TimeDelta::hours(26) + TimeDelta::minutes(5)), "26:05");
    }

    #[test]
    fn total_label_truncates_each_record_then_floors() {
        let durations = [
            TimeDelta::seconds(3599) + TimeDelta::milliseconds(999),
            TimeDelta::seconds(61),
            TimeDelta::zero(),
        ];
        // 3599 + 61 = 3660s
        assert_eq!(total_label(durations), "1h 1min");
        assert_eq!(total_label(Vec::<TimeDelta>::new()), "0h 0min");
    }

    #[test]
    fn whole_minutes_floor() {
        assert_eq!(whole_minutes(TimeDelta::seconds(119)), 1);
        assert_eq!(whole_minutes(TimeDelta::zero()), 0);
        assert_eq!(whole_minutes(TimeDelta::seconds(-1)), -1);
        assert_eq!(whole_minutes(TimeDelta::seconds(-60)), -1);
    }
}
