//! CSV output for spreadsheet and script consumption.

/// CSV output formatter
pub struct CsvOutput;

impl CsvOutput {
    /// Format a header row followed by data rows.
    pub fn format_rows(headers: &[&str], rows: &[Vec<String>]) -> String {
        let mut output = headers.join(",");
        for row in rows {
            output.push('\n');
            let cells: Vec<String> = row.iter().map(|c| Self::escape_value(c)).collect();
            output.push_str(&cells.join(","));
        }
        output
    }

    /// Escape a string value for CSV
    ///
    /// Wraps in quotes if the value contains comma, newline, or quote.
    /// Doubles any existing quotes.
    fn escape_value(s: &str) -> String {
        if s.contains(',') || s.contains('\n') || s.contains('\r') || s.contains('"') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}
