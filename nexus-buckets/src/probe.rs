//! Insert and lookup timing for a fixed set of probe keys.
//!
//! [`time_probes`] inserts every probe once and then looks every probe up,
//! timing each pass as a whole. It mutates the table, so probe keys show up
//! in any report taken afterwards.
//!
//! [`search_latency`] repeats lookups without mutating and records each one
//! into an HDR histogram.

use std::fmt::{self, Write as _};
use std::hint::black_box;
use std::time::{Duration, Instant};

use hdrhistogram::{CreationError, Histogram};
use serde::Serialize;

use crate::{BucketHasher, CollisionTable};

/// Highest recordable lookup latency, in nanoseconds.
const MAX_LATENCY_NS: u64 = 1_000_000_000;

/// Wall-clock cost of one insert pass and one lookup pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProbeTiming {
    /// Nanoseconds spent inserting every probe key.
    pub insert_ns: u64,
    /// Nanoseconds spent looking up every probe key.
    pub search_ns: u64,
    /// Probe keys found by the lookup pass.
    pub found: usize,
}

fn nanos(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX)
}

/// Inserts every key in `keys`, then looks every key up.
pub fn time_probes<H, S>(table: &mut CollisionTable<H>, keys: &[S]) -> ProbeTiming
where
    H: BucketHasher,
    S: AsRef<str>,
{
    let start = Instant::now();
    for key in keys {
        table.insert(key.as_ref());
    }
    let insert_ns = nanos(start.elapsed());

    let start = Instant::now();
    let mut found = 0;
    for key in keys {
        if black_box(table.contains(key.as_ref())) {
            found += 1;
        }
    }
    let search_ns = nanos(start.elapsed());

    tracing::debug!(probes = keys.len(), insert_ns, search_ns, found, "probe pass complete");

    ProbeTiming {
        insert_ns,
        search_ns,
        found,
    }
}

/// Records `rounds` lookups of every key, one sample per lookup.
///
/// # Errors
///
/// Returns an error if the histogram cannot be created.
pub fn search_latency<H, S>(
    table: &CollisionTable<H>,
    keys: &[S],
    rounds: usize,
) -> Result<Histogram<u64>, CreationError>
where
    H: BucketHasher,
    S: AsRef<str>,
{
    let mut hist = Histogram::<u64>::new_with_max(MAX_LATENCY_NS, 3)?;

    for _ in 0..rounds {
        for key in keys {
            let start = Instant::now();
            black_box(table.contains(black_box(key.as_ref())));
            hist.saturating_record(nanos(start.elapsed()));
        }
    }

    Ok(hist)
}

/// Percentile summary of a latency histogram, in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LatencySummary {
    /// Number of samples.
    pub samples: u64,
    /// Fastest sample.
    pub min: u64,
    /// Median.
    pub p50: u64,
    /// 99th percentile.
    pub p99: u64,
    /// 99.9th percentile.
    pub p999: u64,
    /// Slowest sample.
    pub max: u64,
}

impl From<&Histogram<u64>> for LatencySummary {
    fn from(hist: &Histogram<u64>) -> Self {
        Self {
            samples: hist.len(),
            min: hist.min(),
            p50: hist.value_at_quantile(0.50),
            p99: hist.value_at_quantile(0.99),
            p999: hist.value_at_quantile(0.999),
            max: hist.max(),
        }
    }
}

/// Probe results for one named table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    /// Table label.
    pub table: String,
    /// Single-pass timing.
    #[serde(flatten)]
    pub timing: ProbeTiming,
    /// Repeated-lookup latency, when measured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency: Option<LatencySummary>,
}

impl ProbeReport {
    pub(crate) fn write_text(&self, out: &mut String) -> fmt::Result {
        writeln!(out, "### Probe timing - {} ###", self.table)?;
        writeln!(out, "insert: {} ns", self.timing.insert_ns)?;
        writeln!(out, "search: {} ns", self.timing.search_ns)?;
        writeln!(out, "found:  {}", self.timing.found)?;
        if let Some(lat) = &self.latency {
            writeln!(
                out,
                "lookup latency ({} samples): p50: {} ns | p99: {} ns | p999: {} ns | min: {} | max: {}",
                lat.samples, lat.p50, lat.p99, lat.p999, lat.min, lat.max,
            )?;
        }
        Ok(())
    }
}
