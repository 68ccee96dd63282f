//! Diff command - structural diff between two module files or two module trees
//!
//! Two files are compared directly. Two directories are paired by relative
//! path and every matched pair is diffed, followed by a summary of the run.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use asmdiff_core::batch::{diff_directories, BatchOptions, BatchReport};
use asmdiff_core::differ::{diff_modules, ChangeSet};
use asmdiff_core::reader::JsonModuleReader;

use crate::error::UsageError;
use crate::output::report::{render_change_set, render_summary};
use crate::output::{CsvOutput, Output, OutputConfig, Outputter};

const CSV_HEADERS: [&str; 3] = ["module", "key", "kind"];

/// Whether the two inputs are files or directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffMode {
    Files,
    Directories,
}

/// Check that both paths exist and are of the same kind.
pub fn resolve_mode(original: &Path, changed: &Path) -> Result<DiffMode, UsageError> {
    for path in [original, changed] {
        if !path.exists() {
            return Err(UsageError::PathNotFound(path.to_path_buf()));
        }
    }

    if original.is_file() && changed.is_file() {
        Ok(DiffMode::Files)
    } else if original.is_dir() && changed.is_dir() {
        Ok(DiffMode::Directories)
    } else {
        Err(UsageError::MixedPathKinds {
            original: original.to_path_buf(),
            changed: changed.to_path_buf(),
        })
    }
}

/// Result of diffing two module files
#[derive(Debug, Serialize)]
pub struct ModuleDiffOutput {
    pub original: String,
    pub changed: String,
    pub changes: ChangeSet,
}

impl Outputter for ModuleDiffOutput {
    fn to_table(&self, config: &OutputConfig) -> String {
        render_change_set(&self.changes, config)
    }

    fn to_csv(&self, _config: &OutputConfig) -> String {
        CsvOutput::format_rows(&CSV_HEADERS, &csv_rows(&self.changes))
    }
}

/// Result of diffing two module trees
#[derive(Debug, Serialize)]
pub struct BatchDiffOutput {
    pub original: String,
    pub changed: String,
    #[serde(flatten)]
    pub report: BatchReport,
}

impl Outputter for BatchDiffOutput {
    fn to_table(&self, config: &OutputConfig) -> String {
        let mut sections = Vec::new();

        for changes in &self.report.change_sets {
            let header = if config.use_colors() {
                changes.module.cyan().bold().to_string()
            } else {
                changes.module.clone()
            };
            sections.push(format!("{}\n{}", header, render_change_set(changes, config)));
        }

        sections.push(render_summary(&self.report.summary, config));
        sections.join("\n\n")
    }

    fn to_csv(&self, _config: &OutputConfig) -> String {
        let rows: Vec<Vec<String>> = self
            .report
            .change_sets
            .iter()
            .flat_map(csv_rows)
            .collect();
        CsvOutput::format_rows(&CSV_HEADERS, &rows)
    }
}

fn csv_rows(changes: &ChangeSet) -> Vec<Vec<String>> {
    changes
        .records()
        .into_iter()
        .map(|record| {
            vec![
                changes.module.clone(),
                record.key,
                record.kind.as_str().to_string(),
            ]
        })
        .collect()
}

/// Create a spinner on stderr, or a hidden bar when progress is not shown
fn create_spinner(visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    match ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.cyan} {msg}")
    {
        Ok(style) => spinner.set_style(style),
        Err(e) => tracing::debug!("Falling back to default spinner style: {}", e),
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Run the diff command
pub fn run(
    original: &Path,
    changed: &Path,
    options: &BatchOptions,
    config: OutputConfig,
    show_progress: bool,
) -> anyhow::Result<()> {
    let reader = JsonModuleReader::new();

    match resolve_mode(original, changed)? {
        DiffMode::Files => {
            let changes = diff_modules(&reader, original, changed)?;
            let result = ModuleDiffOutput {
                original: original.display().to_string(),
                changed: changed.display().to_string(),
                changes,
            };
            Output::with_config(result, config).render()
        }
        DiffMode::Directories => {
            let spinner = create_spinner(show_progress);
            spinner.set_message(format!(
                "Diffing {} against {}...",
                original.display(),
                changed.display()
            ));

            let report = diff_directories(&reader, original, changed, options);
            spinner.finish_and_clear();
            let report = report.with_context(|| {
                format!(
                    "Failed to compare {} with {}",
                    original.display(),
                    changed.display()
                )
            })?;

            let result = BatchDiffOutput {
                original: original.display().to_string(),
                changed: changed.display().to_string(),
                report,
            };
            Output::with_config(result, config).render()
        }
    }
}
