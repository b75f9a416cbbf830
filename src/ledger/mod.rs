//! Durable, period-bucketed trade ledger

pub mod aggregate;
pub mod bucket;
pub mod record;

pub use aggregate::LedgerAggregate;
pub use bucket::{resolve_current_bucket_keys, BucketKey};
pub use record::{TradeOutcome, TradeRecord, HEADER, MIN_VIABLE_PROFIT};

use crate::{ArbitrageError, Result};
use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Owner of all trade record sequences and their derived aggregates.
///
/// Appends and replays on one bucket must not interleave, and cycles run
/// strictly sequentially, so the ledger is a single-writer structure: all
/// mutation goes through `&mut self`.
pub struct TradeLedger {
    directory: PathBuf,
    stake: f64,
    session: LedgerAggregate,
    suspended: bool,
}

impl TradeLedger {
    /// Open a ledger rooted at `directory`, creating it if absent.
    /// `stake` is the per-trade stake folded into `amount_used` on append.
    pub fn new(directory: impl Into<PathBuf>, stake: f64) -> Result<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory).map_err(|e| ArbitrageError::LedgerWrite {
            path: directory.clone(),
            source: e,
        })?;

        Ok(Self {
            directory,
            stake,
            session: LedgerAggregate::default(),
            suspended: false,
        })
    }

    /// Path of a bucket's durable log file
    pub fn bucket_path(&self, key: &BucketKey) -> PathBuf {
        self.directory.join(key.file_name())
    }

    /// Durably append one record to a single bucket, creating the file with
    /// a header row iff it is empty at open time.
    ///
    /// The full payload is materialized in memory and handed to one append
    /// write, so a record lands fully or not at all.
    pub fn append(&mut self, key: &BucketKey, record: &TradeRecord) -> Result<()> {
        let path = self.bucket_path(key);
        if let Err(e) = append_row(&path, record) {
            self.suspended = true;
            return Err(ArbitrageError::LedgerWrite { path, source: e }.into());
        }
        Ok(())
    }

    /// Append one record to every bucket current at `record.recorded_at`,
    /// then fold it into the session totals exactly once.
    ///
    /// After a write failure appends stay suspended until the store probes
    /// writable again.
    pub fn append_current(&mut self, record: &TradeRecord) -> Result<()> {
        if self.suspended {
            self.probe_writable()?;
            self.suspended = false;
            info!("ledger store writable again, appends resumed");
        }

        let keys = resolve_current_bucket_keys(record.recorded_at);
        for key in &keys {
            self.append(key, record)?;
        }

        self.session.apply(record.profit, self.stake);
        Ok(())
    }

    /// Replay a bucket's durable sequence and fold it into an aggregate.
    ///
    /// A pure fold in row order: replaying an unchanged bucket twice yields
    /// identical totals. A missing bucket aggregates to zero.
    pub fn aggregate(&self, key: &BucketKey) -> Result<LedgerAggregate> {
        let path = self.bucket_path(key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(LedgerAggregate::default())
            }
            Err(e) => {
                return Err(ArbitrageError::LedgerParse {
                    path,
                    line: 0,
                    detail: format!("failed to read bucket: {}", e),
                }
                .into())
            }
        };

        let mut totals = LedgerAggregate::default();
        for (idx, line) in content.lines().enumerate() {
            if idx == 0 {
                if line != HEADER {
                    return Err(ArbitrageError::LedgerParse {
                        path,
                        line: 1,
                        detail: format!("unexpected header '{}'", line),
                    }
                    .into());
                }
                continue;
            }

            if line.trim().is_empty() {
                continue;
            }

            let profit = record::profit_from_row(line).map_err(|detail| {
                ArbitrageError::LedgerParse {
                    path: path.clone(),
                    line: idx + 1,
                    detail,
                }
            })?;

            totals.apply(profit, self.stake);
        }

        Ok(totals)
    }

    /// Aggregates for the three buckets current at `now`
    pub fn aggregate_current(
        &self,
        now: DateTime<Local>,
    ) -> Result<[(BucketKey, LedgerAggregate); 3]> {
        let [daily, weekly, monthly] = resolve_current_bucket_keys(now);
        Ok([
            (daily, self.aggregate(&daily)?),
            (weekly, self.aggregate(&weekly)?),
            (monthly, self.aggregate(&monthly)?),
        ])
    }

    /// Operator-invoked truncation of one bucket. Never called by cycles.
    pub fn reset(&mut self, key: &BucketKey) -> Result<()> {
        let path = self.bucket_path(key);
        if path.exists() {
            fs::File::create(&path).map_err(|e| ArbitrageError::LedgerWrite {
                path: path.clone(),
                source: e,
            })?;
            warn!(bucket = %key, path = %path.display(), "ledger bucket truncated");
        }
        Ok(())
    }

    /// Totals accumulated in memory since process start
    pub fn session_totals(&self) -> &LedgerAggregate {
        &self.session
    }

    /// Whether appends are suspended after a write failure
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Per-trade stake folded into `amount_used`
    pub fn stake(&self) -> f64 {
        self.stake
    }

    fn probe_writable(&self) -> Result<()> {
        let path = self.bucket_path(&BucketKey::Daily);
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| ArbitrageError::LedgerWrite { path, source: e })?;
        Ok(())
    }
}

fn append_row(path: &Path, record: &TradeRecord) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    let mut payload = String::new();
    if file.metadata()?.len() == 0 {
        payload.push_str(HEADER);
        payload.push('\n');
    }
    payload.push_str(&record.to_row());
    payload.push('\n');

    file.write_all(payload.as_bytes())?;
    file.sync_data()?;
    Ok(())
}
