use crate::utils::formatting::{DateFormat, Locale};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dashboard-utils")]
#[command(about = "Client utilities for the shipments dashboard: uploads, exports and helpers")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    /// Overrides the profile's server URL
    #[arg(long, global = true, env = "DASHBOARD_URL")]
    pub server_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether the server has data loaded and show its statistics
    Status,
    /// Upload an Excel workbook (.xlsx or .xls)
    Upload {
        /// Workbook to upload
        file: Option<PathBuf>,
    },
    /// Write the CSV upload template
    Template {
        /// Target directory (defaults to the profile's download directory)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Download a file from the server or any URL
    Download {
        /// Absolute URL or server-relative path
        url: String,
        /// File name to save as
        filename: String,
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Validate identifiers
    Validate {
        #[command(subcommand)]
        command: ValidateCommands,
    },
    /// Format values for display
    Format {
        #[command(subcommand)]
        command: FormatCommands,
    },
    /// Copy text to the clipboard
    Copy {
        text: String,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Keyboard-driven session (Ctrl+U upload, Ctrl+R refresh, Ctrl+E template)
    Interactive,
}

#[derive(Subcommand, Debug)]
pub enum ValidateCommands {
    /// Brazilian taxpayer number, with or without punctuation
    Cpf { value: String },
    /// Email address
    Email { value: String },
}

#[derive(Subcommand, Debug)]
pub enum FormatCommands {
    /// Group thousands for the given locale
    Number {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        #[arg(long, default_value_t = Locale::PtBr)]
        locale: Locale,
    },
    /// value/total as a percentage
    Percentage {
        value: f64,
        total: f64,
        #[arg(long, default_value = "1")]
        decimals: usize,
    },
    /// Render a date in Portuguese
    Date {
        value: String,
        #[arg(long, value_enum, default_value = "short")]
        format: DateFormat,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set configuration value
    Set {
        /// One of: server_url, timeout_seconds, download_dir, theme
        key: String,
        value: String,
    },
    /// Theme settings
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ThemeCommands {
    /// Switch between light and dark
    Toggle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_format_number_with_locale() {
        let cli = Cli::try_parse_from([
            "dashboard-utils",
            "format",
            "number",
            "1500.5",
            "--locale",
            "en-US",
        ])
        .unwrap();
        match cli.command {
            Commands::Format {
                command: FormatCommands::Number { value, locale },
            } => {
                assert_eq!(value, 1500.5);
                assert_eq!(locale, Locale::EnUs);
            }
            _ => panic!("expected format number"),
        }
    }

    #[test]
    fn test_upload_file_is_optional() {
        let cli = Cli::try_parse_from(["dashboard-utils", "upload"]).unwrap();
        assert!(matches!(cli.command, Commands::Upload { file: None }));
    }
}
