use time::{Date, Duration, OffsetDateTime, Time};

use crate::models::{Period, Record, Summary};

/// Earliest instant included in `period`, evaluated against `now` in `now`'s offset.
///
/// `Week` is a trailing 7x24h window, not an aligned calendar week.
pub fn window_start(period: Period, now: OffsetDateTime) -> Option<OffsetDateTime> {
    let midnight = |date: Date| now.replace_date(date).replace_time(Time::MIDNIGHT);

    match period {
        Period::Day => Some(midnight(now.date())),
        Period::Week => Some(now - Duration::days(7)),
        Period::Month => Some(
            now.date()
                .replace_day(1)
                .map(midnight)
                .unwrap_or_else(|_| midnight(now.date())),
        ),
        Period::Year => Some(
            Date::from_ordinal_date(now.year(), 1)
                .map(midnight)
                .unwrap_or_else(|_| midnight(now.date())),
        ),
        Period::All => None,
    }
}

/// Sums the records inside the window. Records with an unreadable date are left out.
pub fn summarize_records<'a, I>(records: I, period: Period, now: OffsetDateTime) -> Summary
where
    I: IntoIterator<Item = &'a Record>,
{
    let start = window_start(period, now);
    let mut summary = Summary::default();

    for record in records {
        let included = match (record.timestamp(), start) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(timestamp), Some(start)) => timestamp >= start,
        };
        if !included {
            continue;
        }

        summary.total += record.amount;
        summary.count += 1;
        *summary
            .by_category
            .entry(record.category.clone())
            .or_insert(0.0) += record.amount;
    }

    summary
}
