//! End-to-end pipeline: ingest → schema check → normalize → aggregate.
//!
//! Synchronous and stateless apart from the optional result cache, which is
//! keyed by a content hash of the input bytes. The cache is purely a latency
//! optimization for reprocessing the same upload; behavior is identical with
//! it disabled.

use crate::aggregate;
use crate::error::RollupResult;
use crate::ingest;
use crate::normalize::{self, NormalizeStats};
use crate::schema::ReportSchema;
use crate::types::SummaryTable;
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::Hasher;
use tracing::{debug, info};

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Which parser strategy produced the raw table ("xlsx", "csv(utf-8)", ...).
    pub format: String,
    pub stats: NormalizeStats,
    pub table: SummaryTable,
}

/// Run the whole pipeline once, uncached.
pub fn summarize(bytes: &[u8], filename_hint: &str) -> RollupResult<Summary> {
    let (raw, format) = ingest::load(bytes, filename_hint)?;
    let schema = ReportSchema::detect(&raw)?;
    let (rows, stats) = normalize::normalize(&raw, &schema);
    let table = aggregate::aggregate(&rows, &schema);

    info!(
        format = %format,
        rows_in = stats.rows_in,
        groups = table.len(),
        "summary built"
    );
    Ok(Summary { format, stats, table })
}

/// Pipeline runner with an optional whole-result memo cache.
#[derive(Debug, Default)]
pub struct Pipeline {
    cache: Option<HashMap<u64, Summary>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self { cache: None }
    }

    /// Enable memoization by input content.
    pub fn with_cache() -> Self {
        Self {
            cache: Some(HashMap::new()),
        }
    }

    pub fn run(&mut self, bytes: &[u8], filename_hint: &str) -> RollupResult<Summary> {
        let key = self.cache.is_some().then(|| content_key(bytes));

        if let (Some(cache), Some(key)) = (self.cache.as_ref(), key) {
            if let Some(hit) = cache.get(&key) {
                debug!(hint = filename_hint, "pipeline cache hit");
                return Ok(hit.clone());
            }
        }

        let summary = summarize(bytes, filename_hint)?;
        if let (Some(cache), Some(key)) = (self.cache.as_mut(), key) {
            cache.insert(key, summary.clone());
        }
        Ok(summary)
    }
}

fn content_key(bytes: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    hasher.write(bytes);
    hasher.finish()
}
