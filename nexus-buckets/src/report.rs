//! Collision reports.
//!
//! A [`Comparison`] holds one [`TableReport`] per table (and optionally the
//! probe timings) and renders either as a plain-text listing or as JSON.
//!
//! ```
//! use nexus_buckets::{CollisionTable, Comparison, Format, HashVariant, TableReport};
//!
//! let mut table = CollisionTable::new(3, HashVariant::Direct);
//! table.extend(["Aa", "BB"]);
//!
//! let comparison = Comparison::new(vec![TableReport::new("direct", &table)]);
//! let text = comparison.render(Format::Text).unwrap();
//!
//! assert!(text.contains("Total collisions - direct: 1"));
//! assert!(text.contains("2 keys (collision)"));
//! ```

use std::fmt::{self, Write as _};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::probe::ProbeReport;
use crate::CollisionTable;

/// Occupancy class of one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "keys", rename_all = "snake_case")]
pub enum BucketStatus {
    /// No keys.
    Empty,
    /// Exactly one key.
    Single,
    /// More than one key.
    Collision(usize),
}

impl BucketStatus {
    /// Classifies a bucket holding `keys` keys.
    pub const fn from_occupancy(keys: usize) -> Self {
        match keys {
            0 => Self::Empty,
            1 => Self::Single,
            n => Self::Collision(n),
        }
    }

    /// Number of keys in the bucket.
    pub const fn keys(self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Single => 1,
            Self::Collision(n) => n,
        }
    }
}

impl fmt::Display for BucketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("0 keys (empty)"),
            Self::Single => f.write_str("1 key"),
            Self::Collision(n) => write!(f, "{n} keys (collision)"),
        }
    }
}

/// Snapshot of one table's collision behavior.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableReport {
    /// Label shown in the report.
    pub name: String,
    /// Total insertions.
    pub keys: usize,
    /// Insertions into non-empty buckets.
    pub collisions: usize,
    /// Buckets holding no key.
    pub empty_buckets: usize,
    /// Longest bucket.
    pub max_chain: usize,
    /// Per-bucket status, in bucket order.
    pub buckets: Vec<BucketStatus>,
}

impl TableReport {
    /// Captures the current state of `table`.
    pub fn new<H>(name: impl Into<String>, table: &CollisionTable<H>) -> Self {
        let distribution = table.distribution();
        Self {
            name: name.into(),
            keys: table.len(),
            collisions: table.collision_count(),
            empty_buckets: distribution.iter().filter(|&&n| n == 0).count(),
            max_chain: distribution.iter().copied().max().unwrap_or(0),
            buckets: distribution
                .into_iter()
                .map(BucketStatus::from_occupancy)
                .collect(),
        }
    }

    /// Keys per bucket.
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        if self.buckets.is_empty() {
            0.0
        } else {
            self.keys as f64 / self.buckets.len() as f64
        }
    }

    fn write_distribution(&self, out: &mut String) -> fmt::Result {
        writeln!(out, "### Distribution - {} ###", self.name)?;
        writeln!(
            out,
            "keys: {} | buckets: {} | empty: {} | longest chain: {} | load factor: {:.3}",
            self.keys,
            self.buckets.len(),
            self.empty_buckets,
            self.max_chain,
            self.load_factor(),
        )?;
        for (i, status) in self.buckets.iter().enumerate() {
            writeln!(out, "bucket {i}: {status}")?;
        }
        Ok(())
    }
}

/// Output format of a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Human-readable listing.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Unrecognized format name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown report format '{0}' (expected 'text' or 'json')")]
pub struct UnknownFormat(pub String);

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(UnknownFormat(s.to_owned())),
        }
    }
}

/// Side-by-side report over several tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// One entry per table, in insertion order.
    pub tables: Vec<TableReport>,
    /// Probe timings, if any were taken.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub probes: Vec<ProbeReport>,
}

impl Comparison {
    /// Creates a comparison without probe timings.
    pub fn new(tables: Vec<TableReport>) -> Self {
        Self {
            tables,
            probes: Vec::new(),
        }
    }

    /// Adds probe timings to the report.
    #[must_use]
    pub fn with_probes(mut self, probes: Vec<ProbeReport>) -> Self {
        self.probes = probes;
        self
    }

    /// Renders the report.
    ///
    /// # Errors
    ///
    /// Returns an error only if JSON serialization fails.
    pub fn render(&self, format: Format) -> Result<String, serde_json::Error> {
        match format {
            Format::Json => serde_json::to_string_pretty(self),
            Format::Text => Ok(self.to_string()),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();

        writeln!(out, "### Comparison ###")?;
        for table in &self.tables {
            writeln!(out, "Total collisions - {}: {}", table.name, table.collisions)?;
        }

        for table in &self.tables {
            writeln!(out)?;
            table.write_distribution(&mut out)?;
        }

        for probe in &self.probes {
            writeln!(out)?;
            probe.write_text(&mut out)?;
        }

        f.write_str(&out)
    }
}
