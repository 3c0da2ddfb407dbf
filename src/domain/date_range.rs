use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::Deserialize;

/// Half-open interval `[start, end)` covering whole UTC days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange{
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>
}

impl DateRange {
    // Both days are included
    pub fn from_days(from: NaiveDate, to: NaiveDate) -> Self{
        let start = from.and_time(chrono::NaiveTime::MIN).and_utc();
        let end = to.and_time(chrono::NaiveTime::MIN)
            .and_utc()
            .checked_add_signed(TimeDelta::days(1))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self{ start, end }
    }

    pub fn lower_bound(range: Option<Self>) -> Option<DateTime<Utc>>{
        range.map(|r| r.start)
    }

    pub fn upper_bound(range: Option<Self>) -> Option<DateTime<Utc>>{
        range.map(|r| r.end)
    }
}

// `from_` / `to_` query parameters shared by the reporting routes
#[derive(Deserialize, Debug, Default, Clone)]
pub struct DateRangeQuery{
    pub from_: Option<NaiveDate>,
    pub to_: Option<NaiveDate>
}

impl DateRangeQuery {
    /// The filter only applies when both bounds are given.
    pub fn range(&self) -> Option<DateRange>{
        match (self.from_, self.to_) {
            (Some(from), Some(to)) => Some(DateRange::from_days(from, to)),
            _ => None
        }
    }

    pub fn describe(&self) -> String{
        match (self.from_, self.to_) {
            (Some(from), Some(to)) => format!(
                "Dari {} s/d {}",
                from.format("%Y-%m-%d"),
                to.format("%Y-%m-%d")
            ),
            _ => "Semua transaksi".to_string()
        }
    }
}
