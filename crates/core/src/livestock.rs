//! Livestock helpers: weight gain, calf tags, withdrawal periods and
//! registration defaults.

use crate::types::Timestamp;

/// Breed assigned when none is given at registration.
pub const DEFAULT_BREED: &str = "Braford";

/// Category assigned to calves created by a birth event.
pub const CALF_CATEGORY: &str = "Ternero";

/// Length of the random suffix appended to calf tags.
pub const CALF_SUFFIX_LEN: usize = 6;

/// One weighing, as needed for gain computations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeighingPoint {
    pub kilos: f64,
    pub fecha: Timestamp,
}

/// Average daily gain (kg/day) between the two most recent weighings.
///
/// Returns 0 when there is no previous weighing or both were taken the
/// same day. The result is rounded to three decimals.
pub fn daily_gain(latest: &WeighingPoint, previous: Option<&WeighingPoint>) -> f64 {
    let Some(previous) = previous else {
        return 0.0;
    };
    let days = (latest.fecha - previous.fecha).num_days();
    if days <= 0 {
        return 0.0;
    }
    let gain = (latest.kilos - previous.kilos) / days as f64;
    (gain * 1000.0).round() / 1000.0
}

/// Build a calf tag from the mother's tag and a random suffix.
///
/// Only the first [`CALF_SUFFIX_LEN`] alphanumeric characters of `entropy`
/// are used, upper-cased: `calf_tag("BF-101", "3f9a2c7d")` is `"BF-101-T3F9A2C"`.
pub fn calf_tag(mother_tag: &str, entropy: &str) -> String {
    let suffix: String = entropy
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(CALF_SUFFIX_LEN)
        .collect::<String>()
        .to_uppercase();
    format!("{}-T{suffix}", mother_tag.trim())
}

/// Whether an animal under treatment is still inside its withdrawal period
/// (`fecha_carencia`) at `at`. The period ends at the recorded instant.
pub fn in_withdrawal_period(fecha_carencia: Option<Timestamp>, at: Timestamp) -> bool {
    fecha_carencia.is_some_and(|end| at < end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn point(kilos: f64, day: u32) -> WeighingPoint {
        WeighingPoint {
            kilos,
            fecha: Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn gain_over_ten_days() {
        let latest = point(310.0, 11);
        let previous = point(300.0, 1);
        assert_eq!(daily_gain(&latest, Some(&previous)), 1.0);
    }

    #[test]
    fn gain_is_rounded_to_three_decimals() {
        let latest = point(301.0, 4);
        let previous = point(300.0, 1);
        assert_eq!(daily_gain(&latest, Some(&previous)), 0.333);
    }

    #[test]
    fn single_weighing_has_no_gain() {
        assert_eq!(daily_gain(&point(300.0, 1), None), 0.0);
    }

    #[test]
    fn same_day_weighings_have_no_gain() {
        let latest = point(305.0, 1);
        let mut previous = point(300.0, 1);
        previous.fecha -= Duration::hours(3);
        assert_eq!(daily_gain(&latest, Some(&previous)), 0.0);
    }

    #[test]
    fn weight_loss_is_negative_gain() {
        assert_eq!(daily_gain(&point(290.0, 6), Some(&point(300.0, 1))), -2.0);
    }

    #[test]
    fn withdrawal_period_blocks_until_its_end() {
        let end = point(0.0, 10).fecha;
        assert!(in_withdrawal_period(Some(end), point(0.0, 9).fecha));
        assert!(!in_withdrawal_period(Some(end), end));
        assert!(!in_withdrawal_period(Some(end), point(0.0, 11).fecha));
        assert!(!in_withdrawal_period(None, point(0.0, 1).fecha));
    }

    #[test]
    fn calf_tag_uses_mother_tag_and_suffix() {
        assert_eq!(calf_tag("BF-101", "3f9a2c7d-1111"), "BF-101-T3F9A2C");
        assert_eq!(calf_tag(" BF-7 ", "a-b-c-d-e-f-g"), "BF-7-TABCDEF");
    }
}
