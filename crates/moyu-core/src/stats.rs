//! Time-bucketed aggregation over the session history.
//!
//! Pure and read-only: the same history and reference instant always yield
//! the same buckets. All calendar comparisons use the local clock.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate};

use crate::history::model::SessionRecord;

/// Calendar bucket width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// Same local year, month and day-of-month.
    Day,
    /// Same Monday-started week.
    Week,
    /// Same local year and month.
    Month,
}

/// Totals over a set of records.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatsSummary {
    pub earned: f64,
    pub seconds: u64,
}

impl StatsSummary {
    fn add(&mut self, record: &SessionRecord) {
        self.earned += record.earned;
        self.seconds += record.seconds;
    }
}

/// Today/this-week/this-month totals relative to one reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatsOverview {
    pub today: StatsSummary,
    pub week: StatsSummary,
    pub month: StatsSummary,
}

/// Shifts a date to the Monday of its week.
///
/// Sunday belongs to the week that started six days earlier.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

fn same_bucket(a: DateTime<Local>, b: DateTime<Local>, granularity: Granularity) -> bool {
    let (da, db) = (a.date_naive(), b.date_naive());
    match granularity {
        Granularity::Day => da == db,
        Granularity::Week => week_start(da) == week_start(db),
        Granularity::Month => da.year() == db.year() && da.month() == db.month(),
    }
}

/// Selects the records whose timestamp falls in the same bucket as
/// `reference`.
pub fn bucket<'a>(
    history: &'a [SessionRecord],
    reference: DateTime<Local>,
    granularity: Granularity,
) -> Vec<&'a SessionRecord> {
    history
        .iter()
        .filter(|record| same_bucket(record.timestamp, reference, granularity))
        .collect()
}

/// Sums earned amount and elapsed seconds; zero for empty input.
pub fn sum<'a, I>(records: I) -> StatsSummary
where
    I: IntoIterator<Item = &'a SessionRecord>,
{
    let mut total = StatsSummary::default();
    for record in records {
        total.add(record);
    }
    total
}

/// Builds the three standard summaries in a single pass over the history.
pub fn overview(history: &[SessionRecord], reference: DateTime<Local>) -> StatsOverview {
    let mut out = StatsOverview::default();
    for record in history {
        if same_bucket(record.timestamp, reference, Granularity::Day) {
            out.today.add(record);
        }
        if same_bucket(record.timestamp, reference, Granularity::Week) {
            out.week.add(record);
        }
        if same_bucket(record.timestamp, reference, Granularity::Month) {
            out.month.add(record);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    fn record_at(ts: DateTime<Local>, earned: f64, seconds: u64) -> SessionRecord {
        SessionRecord::new(ts, earned, seconds)
    }

    #[test]
    fn week_start_shifts_to_monday() {
        // 2024-01-01 is a Monday
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(week_start(monday), monday);

        let wednesday = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        assert_eq!(week_start(wednesday), monday);

        // Sunday maps to the previous Monday, not the next one
        let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        assert_eq!(week_start(sunday), monday);

        let next_monday = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        assert_eq!(week_start(next_monday), next_monday);
    }

    #[test]
    fn monday_and_following_sunday_share_a_week_bucket() {
        let history = vec![
            record_at(at(2024, 1, 1), 1.0, 60),  // Monday
            record_at(at(2024, 1, 7), 2.0, 120), // Sunday, same week
            record_at(at(2024, 1, 8), 4.0, 240), // next Monday
        ];

        let same_week = bucket(&history, at(2024, 1, 1), Granularity::Week);
        assert_eq!(same_week.len(), 2);

        let next_week = bucket(&history, at(2024, 1, 8), Granularity::Week);
        assert_eq!(next_week.len(), 1);
        assert_eq!(next_week[0].earned, 4.0);
    }

    #[test]
    fn day_bucket_requires_exact_calendar_date() {
        let history = vec![
            record_at(at(2024, 3, 5), 1.0, 60),
            record_at(at(2024, 3, 6), 2.0, 60),
            record_at(at(2023, 3, 5), 4.0, 60), // same day, other year
        ];

        let today = bucket(&history, at(2024, 3, 5), Granularity::Day);
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].earned, 1.0);
    }

    #[test]
    fn month_bucket_requires_same_year_and_month() {
        let history = vec![
            record_at(at(2024, 3, 1), 1.0, 60),
            record_at(at(2024, 3, 31), 2.0, 60),
            record_at(at(2024, 4, 1), 4.0, 60),
            record_at(at(2023, 3, 15), 8.0, 60),
        ];

        let march = bucket(&history, at(2024, 3, 15), Granularity::Month);
        let total = sum(march);
        assert_eq!(total.earned, 3.0);
        assert_eq!(total.seconds, 120);
    }

    #[test]
    fn sum_of_nothing_is_zero() {
        let total = sum([]);
        assert_eq!(total.earned, 0.0);
        assert_eq!(total.seconds, 0);
    }

    #[test]
    fn sum_is_order_insensitive() {
        let a = record_at(at(2024, 1, 1), 1.25, 10);
        let b = record_at(at(2024, 1, 2), 2.5, 20);
        let c = record_at(at(2024, 1, 3), 3.75, 30);

        let forward = sum([&a, &b, &c]);
        let backward = sum([&c, &b, &a]);
        assert!((forward.earned - backward.earned).abs() < 1e-9);
        assert_eq!(forward.seconds, backward.seconds);
    }

    #[test]
    fn overview_matches_per_granularity_buckets() {
        let reference = at(2024, 1, 10); // Wednesday
        let history = vec![
            record_at(at(2024, 1, 10), 1.0, 60),  // today
            record_at(at(2024, 1, 8), 2.0, 120),  // this week
            record_at(at(2024, 1, 1), 4.0, 240),  // this month, previous week
            record_at(at(2023, 12, 31), 8.0, 480), // out of all buckets
        ];

        let view = overview(&history, reference);
        assert_eq!(view.today.seconds, 60);
        assert_eq!(view.week.seconds, 180);
        assert_eq!(view.month.seconds, 420);

        assert_eq!(view.today, sum(bucket(&history, reference, Granularity::Day)));
        assert_eq!(view.week, sum(bucket(&history, reference, Granularity::Week)));
        assert_eq!(view.month, sum(bucket(&history, reference, Granularity::Month)));
    }
}
