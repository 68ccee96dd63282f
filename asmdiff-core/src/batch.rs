//! Directory-level batch diffing.
//!
//! Module files are discovered under two roots, paired by relative path, and
//! each pair is diffed independently. Pairs run in parallel via Rayon; results
//! are collected in discovery order so the report is deterministic. A pair that
//! fails to load is recorded in the summary and does not stop the batch.

use ignore::WalkBuilder;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Component, Path};
use std::time::Instant;

use crate::differ::changes::{BatchSummary, ChangeSet};
use crate::differ::comparator::diff_modules;
use crate::error::{DiffError, LoadError, Result};
use crate::reader::ModuleReader;

/// Default module file extension.
pub const DEFAULT_EXTENSION: &str = "json";

/// Which files count as modules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Extension without the leading dot, matched case-insensitively.
    pub extension: String,
    /// Descend into subdirectories. Only the top level is scanned otherwise.
    pub recursive: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            recursive: false,
        }
    }
}

impl DiscoveryOptions {
    pub fn new(extension: &str, recursive: bool) -> Self {
        Self {
            extension: extension.trim_start_matches('.').to_lowercase(),
            recursive,
        }
    }

    fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(&self.extension))
            .unwrap_or(false)
    }
}

/// Options for [`diff_directories`].
#[derive(Clone, Debug, Default)]
pub struct BatchOptions {
    pub discovery: DiscoveryOptions,
    /// Worker threads; `None` or zero uses Rayon's global pool.
    pub threads: Option<usize>,
}

/// Result of a batch run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct BatchReport {
    /// Change sets of successfully diffed pairs, in discovery order.
    pub change_sets: Vec<ChangeSet>,
    pub summary: BatchSummary,
    pub duration_ms: f64,
}

/// List module files under `root` as sorted `/`-separated relative paths.
pub fn discover_modules(root: &Path, options: &DiscoveryOptions) -> Result<Vec<String>> {
    if !root.is_dir() {
        return Err(DiffError::Discovery {
            root: root.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false) // Module trees are build output; nothing is ignored
        .follow_links(false);
    if !options.recursive {
        builder.max_depth(Some(1));
    }

    let mut paths: Vec<String> = builder
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .filter(|entry| options.matches(entry.path()))
        .filter_map(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .ok()
                .map(relative_path_string)
        })
        .collect();

    paths.sort();
    Ok(paths)
}

fn relative_path_string(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Diff every module present in both directory trees.
///
/// Files found on one side only become warnings; pairs that fail to load
/// become failures. Only an unreadable root aborts the run.
pub fn diff_directories(
    reader: &dyn ModuleReader,
    original_dir: &Path,
    changed_dir: &Path,
    options: &BatchOptions,
) -> Result<BatchReport> {
    let start = Instant::now();

    let original_files = discover_modules(original_dir, &options.discovery)?;
    let changed_files = discover_modules(changed_dir, &options.discovery)?;

    let original_set: HashSet<&str> = original_files.iter().map(|s| s.as_str()).collect();
    let changed_set: HashSet<&str> = changed_files.iter().map(|s| s.as_str()).collect();

    let matched: Vec<&str> = original_files
        .iter()
        .map(|s| s.as_str())
        .filter(|p| changed_set.contains(p))
        .collect();

    tracing::debug!(
        original = original_files.len(),
        changed = changed_files.len(),
        matched = matched.len(),
        "discovered module files"
    );

    let diff_pair = |rel: &&str| -> std::result::Result<ChangeSet, LoadError> {
        let mut changes = diff_modules(reader, &original_dir.join(rel), &changed_dir.join(rel))?;
        changes.module = (*rel).to_string();
        Ok(changes)
    };

    let pool = match options.threads {
        Some(n) if n > 0 => rayon::ThreadPoolBuilder::new().num_threads(n).build().ok(),
        _ => None,
    };
    let outcomes: Vec<std::result::Result<ChangeSet, LoadError>> = match pool {
        Some(pool) => pool.install(|| matched.par_iter().map(diff_pair).collect()),
        None => matched.par_iter().map(diff_pair).collect(),
    };

    let mut report = BatchReport::default();
    report.summary.files_processed = matched.len();

    for (rel, outcome) in matched.iter().zip(outcomes) {
        match outcome {
            Ok(changes) => {
                report.summary.record(&changes);
                report.change_sets.push(changes);
            }
            Err(e) => {
                tracing::warn!("Failed to diff {}: {}", rel, e);
                report.summary.fail(*rel, e.to_string());
            }
        }
    }

    for rel in &original_files {
        if !changed_set.contains(rel.as_str()) {
            report.summary.warn(format!("{} missing from changed set", rel));
        }
    }
    for rel in &changed_files {
        if !original_set.contains(rel.as_str()) {
            report.summary.warn(format!("{} missing from original set", rel));
        }
    }

    report.duration_ms = start.elapsed().as_secs_f64() * 1000.0;
    tracing::info!(
        files = report.summary.files_processed,
        failures = report.summary.failures.len(),
        warnings = report.summary.warnings.len(),
        "batch diff finished: {}",
        report.summary.text()
    );
    Ok(report)
}
