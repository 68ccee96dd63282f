//! Text rendering of change sets and batch summaries.
//!
//! Each record becomes one line: an indent, a marker and the record key. Type
//! records sit at a shallower indent than the member records nested under
//! them. Styling is a function of the [`ChangeKind`] alone and colors are only
//! applied when the render config asks for them.

use asmdiff_core::{BatchSummary, ChangeKind, ChangeSet};
use colored::{Color, Colorize};

use super::OutputConfig;

const TYPE_INDENT: usize = 2;
const MEMBER_INDENT: usize = 6;

/// How a record of a given kind is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeStyle {
    pub marker: char,
    pub indent: usize,
    pub color: Color,
}

pub fn style_for(kind: ChangeKind) -> ChangeStyle {
    let (marker, indent, color) = match kind {
        ChangeKind::AddedType => ('+', TYPE_INDENT, Color::Green),
        ChangeKind::ModifiedType => ('*', TYPE_INDENT, Color::Yellow),
        ChangeKind::RemovedType => ('-', TYPE_INDENT, Color::Red),
        ChangeKind::AddedMember => ('+', MEMBER_INDENT, Color::Green),
        ChangeKind::RemovedMember => ('-', MEMBER_INDENT, Color::Red),
    };
    ChangeStyle {
        marker,
        indent,
        color,
    }
}

fn paint(text: &str, color: Color, config: &OutputConfig) -> String {
    if config.use_colors() {
        text.color(color).to_string()
    } else {
        text.to_string()
    }
}

fn heading(text: &str, config: &OutputConfig) -> String {
    if config.use_colors() {
        text.cyan().bold().to_string()
    } else {
        text.to_string()
    }
}

/// Render one line per record, in change set order.
pub fn render_change_lines(changes: &ChangeSet, config: &OutputConfig) -> Vec<String> {
    changes
        .records()
        .into_iter()
        .map(|record| {
            let style = style_for(record.kind);
            let text = format!("{} {}", style.marker, record.key);
            format!(
                "{}{}",
                " ".repeat(style.indent),
                paint(&text, style.color, config)
            )
        })
        .collect()
}

/// Render a change set, or a single line saying there is nothing to report.
pub fn render_change_set(changes: &ChangeSet, config: &OutputConfig) -> String {
    if changes.is_empty() {
        return format!("{}No differences found.", " ".repeat(TYPE_INDENT));
    }
    render_change_lines(changes, config).join("\n")
}

/// Render the closing summary block of a batch run.
pub fn render_summary(summary: &BatchSummary, config: &OutputConfig) -> String {
    let mut lines = vec![heading("Summary", config)];
    let rows = [
        ("Files processed:", summary.files_processed),
        ("Types added:", summary.types_added),
        ("Types removed:", summary.types_removed),
        ("Types modified:", summary.types_modified),
        ("Members added:", summary.members_added),
        ("Members removed:", summary.members_removed),
        ("Breaking changes:", summary.breaking_changes()),
    ];
    for (label, value) in rows {
        lines.push(format!("  {:<18} {}", label, value));
    }

    if !summary.warnings.is_empty() {
        lines.push(String::new());
        lines.push(heading("Warnings", config));
        for warning in &summary.warnings {
            lines.push(format!("  {}", paint(warning, Color::Yellow, config)));
        }
    }

    if !summary.failures.is_empty() {
        lines.push(String::new());
        lines.push(heading("Failures", config));
        for failure in &summary.failures {
            lines.push(format!(
                "  {}: {}",
                paint(&failure.path, Color::Red, config),
                failure.error
            ));
        }
    }

    lines.join("\n")
}
