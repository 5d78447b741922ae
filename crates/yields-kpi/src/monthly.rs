use chrono::{DateTime, Datelike, Duration, Months, TimeZone, Utc};
use yields_types::{MonthlySample, YieldSample};

pub const MONTHLY_WINDOW_MONTHS: u32 = 12;
pub const MONTH_TOLERANCE_DAYS: i64 = 3;

const MONTH_LABEL_FORMAT: &str = "%b %Y";

/// Re-samples an APY series to one point per calendar month, oldest first.
///
/// For each of the last 12 months (current month included) the first sample in
/// chronological order lying within ±3 days of the 1st of that month is kept.
/// Samples older than `now` minus 12 months never qualify. Months without a
/// matching sample are left out.
pub fn resample_monthly(samples: &[YieldSample], now: DateTime<Utc>) -> Vec<MonthlySample> {
    let mut sorted: Vec<&YieldSample> = samples.iter().filter(|s| s.is_valid()).collect();
    sorted.sort_by_key(|s| s.timestamp);

    let (Some(window_start), Some(current_month)) = (
        now.checked_sub_months(Months::new(MONTHLY_WINDOW_MONTHS)),
        first_of_month(now),
    ) else {
        return Vec::new();
    };
    let tolerance = Duration::days(MONTH_TOLERANCE_DAYS);

    (0..MONTHLY_WINDOW_MONTHS)
        .rev()
        .filter_map(|offset| {
            let target = current_month.checked_sub_months(Months::new(offset))?;
            let (lower, upper) = (target - tolerance, target + tolerance);

            sorted
                .iter()
                .find(|s| {
                    s.timestamp >= window_start && s.timestamp >= lower && s.timestamp <= upper
                })
                .map(|s| MonthlySample {
                    month: target.format(MONTH_LABEL_FORMAT).to_string(),
                    timestamp: s.timestamp,
                    apy: s.apy,
                })
        })
        .collect()
}

fn first_of_month(at: DateTime<Utc>) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(at.year(), at.month(), 1, 0, 0, 0).single()
}
