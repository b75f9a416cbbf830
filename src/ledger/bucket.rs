//! Period bucket keys and their time resolution

use chrono::{DateTime, Datelike, Local};
use std::fmt;

/// Key of a time-scoped durable ledger bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketKey {
    /// The single global daily bucket
    Daily,
    /// One bucket per ISO week number
    Weekly {
        /// ISO week number (1..=53)
        week: u32,
    },
    /// One bucket per calendar year-month
    Monthly {
        /// Calendar year
        year: i32,
        /// Calendar month (1..=12)
        month: u32,
    },
}

impl BucketKey {
    /// File name of the bucket's durable log
    pub fn file_name(&self) -> String {
        match self {
            BucketKey::Daily => "daily_trades.csv".to_string(),
            BucketKey::Weekly { week } => format!("weekly_trades_week_{}.csv", week),
            BucketKey::Monthly { year, month } => {
                format!("monthly_trades_{:04}-{:02}.csv", year, month)
            }
        }
    }

    /// Period label for logs and summaries
    pub fn period(&self) -> &'static str {
        match self {
            BucketKey::Daily => "daily",
            BucketKey::Weekly { .. } => "weekly",
            BucketKey::Monthly { .. } => "monthly",
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketKey::Daily => write!(f, "daily"),
            BucketKey::Weekly { week } => write!(f, "weekly(week {})", week),
            BucketKey::Monthly { year, month } => write!(f, "monthly({:04}-{:02})", year, month),
        }
    }
}

/// Resolve the bucket keys current at `now`.
///
/// A record appended near a period boundary belongs to the buckets current
/// at append time; it is never retroactively reassigned when read later.
pub fn resolve_current_bucket_keys(now: DateTime<Local>) -> [BucketKey; 3] {
    [
        BucketKey::Daily,
        BucketKey::Weekly {
            week: now.iso_week().week(),
        },
        BucketKey::Monthly {
            year: now.year(),
            month: now.month(),
        },
    ]
}
