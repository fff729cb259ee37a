//! Bucketed string table for measuring hash collision behavior.
//!
//! A [`CollisionTable`] owns a fixed number of buckets and routes every key
//! to one of them through a pluggable [`BucketHasher`]. Nothing is ever
//! rehashed or removed: the table only accumulates keys so the resulting
//! collision count and per-bucket [distribution](CollisionTable::distribution)
//! describe the hash function itself.
//!
//! # Quick Start
//!
//! ```
//! use nexus_buckets::{CollisionTable, HashVariant};
//!
//! let mut direct = CollisionTable::new(16, HashVariant::Direct);
//! let mut scaled = CollisionTable::new(16, HashVariant::Scaled);
//!
//! for name in ["Alice", "Emma", "Olivia", "Aa", "BB"] {
//!     direct.insert(name);
//!     scaled.insert(name);
//! }
//!
//! // "Aa" and "BB" share a digest, so they always share a bucket.
//! assert!(direct.collision_count() >= 1);
//! assert_eq!(direct.distribution().iter().sum::<usize>(), 5);
//! assert!(scaled.contains("Olivia"));
//! ```
//!
//! # Custom Hashers
//!
//! Any `Fn(&str, usize) -> usize` works as a hasher. It receives the key and
//! the bucket count and must return an index below the bucket count.
//!
//! ```
//! use nexus_buckets::CollisionTable;
//!
//! let mut table = CollisionTable::new(2, |key: &str, buckets: usize| key.len() % buckets);
//!
//! table.insert("ab");
//! table.insert("cd");
//! table.insert("xyz");
//!
//! assert_eq!(table.distribution(), vec![2, 1]);
//! assert_eq!(table.collision_count(), 1);
//! ```
//!
//! # Harness Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`names`] | Read one key per line from a file |
//! | [`report`] | Per-bucket status listing, text or JSON |
//! | [`probe`] | Insert/lookup timing for a fixed probe set |
//! | [`config`] | Layered settings for the `collision_report` binary |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod hash;
pub mod names;
pub mod probe;
pub mod report;
mod table;

pub use config::{ConfigError, ReportConfig};
pub use hash::{poly31, BucketHasher, HashVariant};
pub use report::{BucketStatus, Comparison, Format, TableReport};
pub use table::CollisionTable;
