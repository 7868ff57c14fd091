//! # Reporting
//!
//! Report windows and the aggregate shapes served to the dashboard.
//!
//! ## Why a Fixed Timezone?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Sale at 2026-10-18 23:30 in Dhaka  =  2026-10-18 17:30 UTC             │
//! │  Sale at 2026-10-19 00:30 in Dhaka  =  2026-10-18 18:30 UTC             │
//! │                                                                         │
//! │  Bucketing by UTC date puts both on the 18th.                           │
//! │  Bucketing by the shop's zone puts them on different days.              │
//! │                                                                         │
//! │  Every window is computed in ONE configured zone, never the server's    │
//! │  local zone, then converted to a half-open UTC range for the query:     │
//! │                                                                         │
//! │      start <= created_at < end                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here reads the clock. Callers pass `now`, which keeps every
//! window reproducible in tests.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::Sale;

/// Parses an IANA timezone name such as `Asia/Dhaka`.
pub fn parse_timezone(name: &str) -> Result<Tz, ValidationError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "timezone".to_string(),
            reason: format!("unknown timezone '{}'", name),
        })
}

/// The calendar date of `now` in `tz`.
pub fn local_date(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// First instant of `date` in `tz`, as UTC.
///
/// If midnight does not exist locally (a DST jump at 00:00), the first valid
/// local time after it is used.
fn local_midnight(tz: Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    let mut candidate = midnight;

    // DST gaps are at most a couple of hours.
    for _ in 0..16 {
        if let Some(local) = tz.from_local_datetime(&candidate).earliest() {
            return local.with_timezone(&Utc);
        }
        candidate += Duration::minutes(15);
    }

    Utc.from_utc_datetime(&midnight)
}

// =============================================================================
// Report Window
// =============================================================================

/// Half-open UTC interval `[start, end)` covering a local calendar span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReportWindow {
    /// The whole local day `date` in `tz`.
    pub fn for_date(date: NaiveDate, tz: Tz) -> Self {
        let next = date.succ_opt().unwrap_or(NaiveDate::MAX);
        ReportWindow {
            start: local_midnight(tz, date),
            end: local_midnight(tz, next),
        }
    }

    /// The local day containing `now`.
    pub fn today(now: DateTime<Utc>, tz: Tz) -> Self {
        Self::for_date(local_date(now, tz), tz)
    }

    /// From local midnight on the 1st of the current month to local midnight
    /// on the 1st of the next.
    pub fn month_to_date(now: DateTime<Utc>, tz: Tz) -> Self {
        let today = local_date(now, tz);
        let first = today - Duration::days(i64::from(today.day0()));
        let next_first = first
            .checked_add_months(Months::new(1))
            .unwrap_or(NaiveDate::MAX);

        ReportWindow {
            start: local_midnight(tz, first),
            end: local_midnight(tz, next_first),
        }
    }

    /// Whether `at` falls inside the window.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }
}

// =============================================================================
// Aggregate Shapes
// =============================================================================

/// Count and total of the sales in a window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SalesSummary {
    pub count: i64,
    pub total_cents: i64,
}

/// One row of a category or payment-method breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Breakdown {
    pub name: String,
    pub total_cents: i64,
    pub count: i64,
}

/// Payload for the dashboard screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Dashboard {
    /// Local date the "today" figures refer to (`YYYY-MM-DD`).
    pub date: String,
    pub today_total_cents: i64,
    pub today_count: i64,
    pub monthly_total_cents: i64,
    pub recent_sales: Vec<Sale>,
    /// Today's sales by category, highest total first.
    pub category_breakdown: Vec<Breakdown>,
    /// Today's sales by payment method, highest total first.
    pub payment_breakdown: Vec<Breakdown>,
}

/// Payload for the header counter on the sale screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TodayCount {
    pub date: String,
    pub today_count: i64,
    pub today_total_cents: i64,
}

impl TodayCount {
    pub fn new(date: NaiveDate, summary: SalesSummary) -> Self {
        TodayCount {
            date: date.to_string(),
            today_count: summary.count,
            today_total_cents: summary.total_cents,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn dhaka() -> Tz {
        parse_timezone("Asia/Dhaka").unwrap()
    }

    #[test]
    fn test_parse_timezone() {
        assert!(parse_timezone("Asia/Dhaka").is_ok());
        assert!(parse_timezone("Mars/Olympus_Mons").is_err());
    }

    #[test]
    fn test_today_uses_shop_zone_not_utc() {
        // 02:00 on the 19th in Dhaka, still the 18th in UTC.
        let now = utc("2026-10-18T20:00:00Z");
        let window = ReportWindow::today(now, dhaka());

        assert_eq!(local_date(now, dhaka()).to_string(), "2026-10-19");
        assert_eq!(window.start, utc("2026-10-18T18:00:00Z"));
        assert_eq!(window.end, utc("2026-10-19T18:00:00Z"));
    }

    #[test]
    fn test_today_excludes_adjacent_days_near_midnight() {
        let now = utc("2026-10-19T06:00:00Z");
        let window = ReportWindow::today(now, dhaka());

        // 23:59:59 on the 18th in Dhaka.
        assert!(!window.contains(utc("2026-10-18T17:59:59Z")));
        // 00:00:00 on the 19th in Dhaka.
        assert!(window.contains(utc("2026-10-18T18:00:00Z")));
        // 23:59:59 on the 19th in Dhaka.
        assert!(window.contains(utc("2026-10-19T17:59:59Z")));
        // 00:00:00 on the 20th in Dhaka.
        assert!(!window.contains(utc("2026-10-19T18:00:00Z")));
    }

    #[test]
    fn test_month_to_date_window() {
        // 00:30 on November 1st in Dhaka.
        let now = utc("2026-10-31T18:30:00Z");
        let window = ReportWindow::month_to_date(now, dhaka());

        assert_eq!(window.start, utc("2026-10-31T18:00:00Z"));
        assert_eq!(window.end, utc("2026-11-30T18:00:00Z"));
        assert!(!window.contains(utc("2026-10-31T17:59:00Z")));
    }

    #[test]
    fn test_month_window_crosses_year() {
        let now = utc("2026-12-15T12:00:00Z");
        let window = ReportWindow::month_to_date(now, Tz::UTC);
        assert_eq!(window.start, utc("2026-12-01T00:00:00Z"));
        assert_eq!(window.end, utc("2027-01-01T00:00:00Z"));
    }

    #[test]
    fn test_midnight_inside_dst_gap() {
        // Havana springs forward at 00:00 -> 01:00 on 2024-03-10.
        let havana = parse_timezone("America/Havana").unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let window = ReportWindow::for_date(date, havana);

        // 01:00 local at UTC-4.
        assert_eq!(window.start, utc("2024-03-10T05:00:00Z"));
        assert!(window.start < window.end);
    }

    #[test]
    fn test_today_count_shape() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let count = TodayCount::new(
            date,
            SalesSummary {
                count: 4,
                total_cents: 72000,
            },
        );
        assert_eq!(count.date, "2026-10-18");
        assert_eq!(count.today_count, 4);
        assert_eq!(count.today_total_cents, 72000);
    }
}
