//! Calendar windows used by monthly aggregates.

use chrono::{Datelike, NaiveDate, TimeZone, Utc};

use crate::types::Timestamp;

/// Half-open UTC interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl Period {
    pub fn contains(&self, ts: Timestamp) -> bool {
        ts >= self.start && ts < self.end
    }
}

/// The calendar month containing `now`.
pub fn month_of(now: Timestamp) -> Period {
    let (year, month) = (now.year(), now.month());
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    Period {
        start: first_instant(year, month),
        end: first_instant(next_year, next_month),
    }
}

/// The calendar month containing the current instant.
pub fn current_month() -> Period {
    month_of(Utc::now())
}

fn first_instant(year: i32, month: u32) -> Timestamp {
    // Day 1 exists for every month in chrono's supported range.
    let date = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default();
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}
