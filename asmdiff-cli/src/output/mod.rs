//! Output formatting for asmdiff CLI
//!
//! Every command result can be rendered as a human-readable report (table),
//! JSON, or CSV. Colors are decided once per run and carried in
//! [`OutputConfig`]; nothing in here touches global color state.

use clap::ValueEnum;
use serde::Serialize;
use std::io::IsTerminal;
use std::str::FromStr;

mod csv;
mod json;
pub mod report;

pub use self::csv::CsvOutput;
pub use self::json::JsonOutput;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable change report (default)
    #[default]
    Table,
    /// JSON format for machine consumption
    Json,
    /// CSV format, one row per change record
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown output format: '{}'", s)),
        }
    }
}

/// Configuration for output rendering
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// The output format to use
    pub format: OutputFormat,
    /// Disable colored output
    pub no_color: bool,
}

impl OutputConfig {
    /// Create a new OutputConfig with the specified format
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            no_color: false,
        }
    }

    /// Create an OutputConfig with TTY detection and an optional color override.
    ///
    /// `Some(true)` forces colors on, `Some(false)` forces them off, and `None`
    /// enables them only when stdout is a terminal.
    pub fn auto_detect_with_color_override(
        format: OutputFormat,
        color_override: Option<bool>,
    ) -> Self {
        let use_color = color_override.unwrap_or_else(|| std::io::stdout().is_terminal());
        let config = Self::new(format);
        if use_color {
            config
        } else {
            config.without_colors()
        }
    }

    /// Check if colors should be used
    pub fn use_colors(&self) -> bool {
        !self.no_color
    }

    /// Builder: disable colors
    pub fn without_colors(mut self) -> Self {
        self.no_color = true;
        self
    }
}

/// Trait for types that can be formatted as output
pub trait Outputter: Serialize + Sized {
    /// Render as the human-readable report
    fn to_table(&self, config: &OutputConfig) -> String;

    /// Render as JSON format
    fn to_json(&self, _config: &OutputConfig) -> String {
        JsonOutput::format(self)
    }

    /// Render as CSV format
    fn to_csv(&self, config: &OutputConfig) -> String;

    /// Render using the format specified in config
    fn render(&self, config: &OutputConfig) -> String {
        match config.format {
            OutputFormat::Table => self.to_table(config),
            OutputFormat::Json => self.to_json(config),
            OutputFormat::Csv => self.to_csv(config),
        }
    }

    /// Render and print to stdout
    fn output(&self, config: &OutputConfig) {
        println!("{}", self.render(config));
    }
}

/// Result wrapper pairing data with its render config
pub struct Output<T> {
    data: T,
    config: OutputConfig,
}

impl<T: Outputter> Output<T> {
    pub fn with_config(data: T, config: OutputConfig) -> Self {
        Self { data, config }
    }

    /// Render the output to stdout
    pub fn render(&self) -> anyhow::Result<()> {
        self.data.output(&self.config);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Greeting {
        text: String,
    }

    impl Outputter for Greeting {
        fn to_table(&self, _config: &OutputConfig) -> String {
            format!("> {}", self.text)
        }

        fn to_csv(&self, _config: &OutputConfig) -> String {
            CsvOutput::format_rows(&["text"], &[vec![self.text.clone()]])
        }
    }

    fn greeting() -> Greeting {
        Greeting {
            text: "hello".to_string(),
        }
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("CSV".parse::<OutputFormat>(), Ok(OutputFormat::Csv));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Table));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_color_override() {
        let on = OutputConfig::auto_detect_with_color_override(OutputFormat::Table, Some(true));
        assert!(on.use_colors());

        let off = OutputConfig::auto_detect_with_color_override(OutputFormat::Table, Some(false));
        assert!(!off.use_colors());
    }

    #[test]
    fn test_output_config_builder() {
        let config = OutputConfig::new(OutputFormat::Json).without_colors();

        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.no_color);
    }

    #[test]
    fn test_render_dispatches_on_format() {
        let table = greeting().render(&OutputConfig::new(OutputFormat::Table));
        assert_eq!(table, "> hello");

        let json = greeting().render(&OutputConfig::new(OutputFormat::Json));
        assert_eq!(json, "{\n  \"text\": \"hello\"\n}");

        let csv = greeting().render(&OutputConfig::new(OutputFormat::Csv));
        assert_eq!(csv, "text\nhello");
    }
}
