use chrono::{DateTime, Utc};

/// Youngest age considered when deriving view velocity. Fresh uploads and
/// clock-skewed publish stamps would otherwise blow the ratio up.
pub const MIN_AGE_HOURS: f64 = 0.1;

/// Hours since publish, floored at [`MIN_AGE_HOURS`]. Negative ages (upstream
/// clock skew, scheduled premieres) land on the floor too.
pub fn age_hours(published_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let hours = (now - published_at).num_seconds() as f64 / 3600.0;
    hours.max(MIN_AGE_HOURS)
}

/// Views accumulated per hour since publish, truncated to a whole number.
pub fn growth_rate(views: i64, published_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (views as f64 / age_hours(published_at, now)) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn growth_rate_divides_views_by_age() {
        let now = Utc::now();
        assert_eq!(growth_rate(1000, now - Duration::hours(2), now), 500);
    }

    #[test]
    fn just_published_video_uses_the_age_floor() {
        let now = Utc::now();
        // 0.1 h floor: 100 views / 0.1 h = 1000 views per hour.
        assert_eq!(growth_rate(100, now, now), 1000);
    }

    #[test]
    fn future_publish_timestamp_lands_on_the_floor() {
        let now = Utc::now();
        let skewed = now + Duration::hours(1);
        assert_eq!(age_hours(skewed, now), MIN_AGE_HOURS);
        assert_eq!(growth_rate(50, skewed, now), 500);
    }

    #[test]
    fn growth_rate_truncates_toward_zero() {
        let now = Utc::now();
        // 999 views over 2 h = 499.5, reported as 499.
        assert_eq!(growth_rate(999, now - Duration::hours(2), now), 499);
    }
}
