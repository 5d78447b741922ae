use chrono::{DateTime, Duration, Utc};
use yields_types::YieldSample;

pub const TRAILING_WINDOW_DAYS: i64 = 30;

/// Mean APY over the samples of the last 30 days (`now - 30d <= t <= now`).
///
/// Returns `None` when no valid sample falls inside the window. Samples with a
/// non-finite APY are skipped, never counted as zero.
pub fn calculate_trailing_average(samples: &[YieldSample], now: DateTime<Utc>) -> Option<f64> {
    let window_start = now - Duration::days(TRAILING_WINDOW_DAYS);

    let (sum, count) = samples
        .iter()
        .filter(|s| s.is_valid() && s.timestamp >= window_start && s.timestamp <= now)
        .fold((0.0_f64, 0_usize), |(sum, count), s| (sum + s.apy, count + 1));

    if count == 0 {
        return None;
    }

    Some(sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn days_ago(days: i64, apy: f64) -> YieldSample {
        YieldSample::new(now() - Duration::days(days), apy)
    }

    #[test]
    fn test_empty_series_has_no_average() {
        assert_eq!(calculate_trailing_average(&[], now()), None);
    }

    #[test]
    fn test_samples_older_than_window_are_ignored() {
        let samples = [days_ago(31, 5.0), days_ago(31, 7.0)];
        assert_eq!(calculate_trailing_average(&samples, now()), None);
    }

    #[test]
    fn test_mean_over_window() {
        let samples = [
            days_ago(45, 100.0),
            days_ago(30, 2.0),
            days_ago(10, 4.0),
            days_ago(0, 6.0),
        ];
        let avg = calculate_trailing_average(&samples, now()).unwrap();
        assert!((avg - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_samples_are_excluded() {
        let samples = [days_ago(1, f64::NAN), days_ago(2, 3.0), days_ago(3, f64::INFINITY)];
        let avg = calculate_trailing_average(&samples, now()).unwrap();
        assert!((avg - 3.0).abs() < 1e-9);

        let only_bad = [days_ago(1, f64::NAN)];
        assert_eq!(calculate_trailing_average(&only_bad, now()), None);
    }

    #[test]
    fn test_future_samples_are_ignored() {
        let samples = [days_ago(-2, 50.0), days_ago(1, 5.0)];
        let avg = calculate_trailing_average(&samples, now()).unwrap();
        assert!((avg - 5.0).abs() < 1e-9);
    }
}
