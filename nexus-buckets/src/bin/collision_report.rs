//! Compares collision behavior of the two built-in hash variants.
//!
//! Reads one key per line, inserts every key into a `direct` and a `scaled`
//! table of the same size, prints the comparison, then times a probe pass
//! against each table.
//!
//! Run:
//!   cargo run --release -p nexus-buckets --bin collision_report -- names.txt
//!   NEXUS_BUCKETS_FORMAT=json cargo run -p nexus-buckets --bin collision_report -- -c report.toml
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `info`).

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use nexus_buckets::names::read_names_into;
use nexus_buckets::probe::{search_latency, time_probes, LatencySummary, ProbeReport};
use nexus_buckets::{CollisionTable, Comparison, HashVariant, ReportConfig, TableReport};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = ReportConfig::load(std::env::args().skip(1)).context("loading configuration")?;
    info!(
        names = %config.names_path.display(),
        buckets = config.bucket_count,
        "building tables"
    );

    // A missing or unreadable file is reported, not fatal. Names read before
    // the failure are still used.
    let mut names = Vec::new();
    if let Err(e) = read_names_into(&config.names_path, &mut names) {
        error!(
            path = %config.names_path.display(),
            error = %e,
            kept = names.len(),
            "failed to read names file"
        );
    }

    let mut tables: Vec<(HashVariant, CollisionTable)> = HashVariant::ALL
        .into_iter()
        .map(|variant| (variant, CollisionTable::new(config.bucket_count, variant)))
        .collect();

    for (_, table) in &mut tables {
        table.extend(names.iter().map(String::as_str));
    }

    let reports = tables
        .iter()
        .map(|(variant, table)| TableReport::new(variant.name(), table))
        .collect();

    let mut probes = Vec::with_capacity(tables.len());
    for (variant, table) in &mut tables {
        let timing = time_probes(table, &config.probe_keys);

        let latency = if config.latency_rounds > 0 {
            let hist = search_latency(table, &config.probe_keys, config.latency_rounds)
                .context("creating latency histogram")?;
            Some(LatencySummary::from(&hist))
        } else {
            None
        };

        info!(
            table = variant.name(),
            collisions = table.collision_count(),
            insert_ns = timing.insert_ns,
            search_ns = timing.search_ns,
            "probe pass"
        );

        probes.push(ProbeReport {
            table: variant.name().to_owned(),
            timing,
            latency,
        });
    }

    let comparison = Comparison::new(reports).with_probes(probes);
    let rendered = comparison
        .render(config.format)
        .context("rendering report")?;
    print!("{rendered}");
    if !rendered.ends_with('\n') {
        println!();
    }

    Ok(())
}
