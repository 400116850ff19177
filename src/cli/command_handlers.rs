use crate::cli::main_types::{ConfigCommands, FormatCommands, ThemeCommands, ValidateCommands};
use crate::core::clipboard::copy_to_clipboard;
use crate::core::notification::{NotificationCenter, Severity};
use crate::core::services::{DataService, DataStatus, ExportService, UploadService};
use crate::core::view_state::{DATA_PAGES, ViewState};
use crate::display::{StatsDisplay, TerminalToastRenderer, with_loading};
use crate::error::{AppError, UtilsError};
use crate::storage::config::Config;
use crate::utils::formatting::{format_date, format_number, format_percentage};
use crate::utils::logging::print_verbose;
use crate::utils::validation::{cpf_check_digits, is_valid_cpf, is_valid_email};
use std::path::{Path, PathBuf};

pub type Toasts = NotificationCenter<TerminalToastRenderer>;

/// Mutable per-run state the handlers share
pub struct Session {
    pub state: ViewState,
    pub toasts: Toasts,
}

impl Session {
    pub fn new(state: ViewState, renderer: TerminalToastRenderer) -> Self {
        Self {
            state,
            toasts: NotificationCenter::new(renderer),
        }
    }
}

#[derive(Default)]
pub struct DataHandler;

impl DataHandler {
    pub fn new() -> Self {
        Self
    }

    /// Probe the server and print either the statistics or the no-data notice
    pub async fn handle_status(
        &self,
        data: &DataService,
        state: &mut ViewState,
        verbose: bool,
    ) -> Result<DataStatus, AppError> {
        print_verbose(verbose, "Checking data status");

        let status = with_loading(
            "Checking data status...",
            !verbose,
            data.check_data_status(state),
        )
        .await;

        self.print_status(&status, state, verbose);
        Ok(status)
    }

    pub fn print_status(&self, status: &DataStatus, state: &ViewState, verbose: bool) {
        match status {
            DataStatus::Loaded(stats) => {
                println!("✅ Data loaded");
                let display = StatsDisplay::new().with_colors(atty::is(atty::Stream::Stdout));
                println!("{}", display.render_stats(stats));
            }
            DataStatus::NoData(reason) => {
                println!("⚠️  No data loaded: {}", reason);
                println!("   Upload a workbook with `dashboard-utils upload <FILE>`");
            }
            DataStatus::Unreachable(reason) => {
                println!("⚠️  No data available (server unreachable)");
                print_verbose(verbose, reason);
            }
        }

        if verbose {
            if let Some(user) = state.current_user() {
                print_verbose(verbose, &format!("Profile: {}", user));
            }
            let enabled: Vec<&str> = DATA_PAGES
                .iter()
                .copied()
                .filter(|page| state.is_nav_enabled(page))
                .collect();
            print_verbose(verbose, &format!("Enabled pages: / {}", enabled.join(" ")));
        }
    }

    /// Upload, then wait out the refresh delay and re-run the status check
    pub async fn handle_upload(
        &self,
        file: Option<&Path>,
        upload: &UploadService,
        data: &DataService,
        state: &mut ViewState,
        toasts: &mut Toasts,
        verbose: bool,
    ) -> Result<(), AppError> {
        print_verbose(verbose, "Attempting upload command");

        let outcome = upload
            .upload(file, toasts)
            .await
            .map_err(|e| AppError::from(e).notified())?;

        print_verbose(
            verbose,
            &format!(
                "Uploaded {}; refreshing in {} ms",
                outcome.file_name,
                outcome.refresh_after.as_millis()
            ),
        );

        let status = upload.refresh_after_upload(&outcome, data, state).await;
        self.print_status(&status, state, verbose);
        Ok(())
    }
}

#[derive(Default)]
pub struct ExportHandler;

impl ExportHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle_template(
        &self,
        export: &ExportService,
        toasts: &mut Toasts,
        verbose: bool,
    ) -> Result<PathBuf, AppError> {
        print_verbose(
            verbose,
            &format!("Writing template to {}", export.download_dir().display()),
        );
        let path = export
            .download_template(toasts)
            .await
            .map_err(|e| AppError::from(e).notified())?;
        println!("Saved to {}", path.display());
        Ok(path)
    }

    pub async fn handle_download(
        &self,
        export: &ExportService,
        url: &str,
        filename: &str,
        verbose: bool,
    ) -> Result<PathBuf, AppError> {
        print_verbose(verbose, &format!("Downloading {} as {}", url, filename));
        let path = with_loading(
            "Downloading...",
            !verbose,
            export.download_file(url, filename),
        )
        .await?;
        println!("✅ Saved to {}", path.display());
        Ok(path)
    }
}

#[derive(Default)]
pub struct HelperHandler;

impl HelperHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_validate(&self, command: ValidateCommands) -> Result<(), AppError> {
        match command {
            ValidateCommands::Cpf { value } => {
                if is_valid_cpf(&value) {
                    println!("✅ Valid CPF: {}", value);
                    Ok(())
                } else {
                    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
                    let expected = digits
                        .get(..9)
                        .filter(|_| digits.len() == 11)
                        .and_then(cpf_check_digits);
                    let message = match expected {
                        Some((d1, d2)) => format!(
                            "Invalid CPF: {} (check digits should be {}{})",
                            value, d1, d2
                        ),
                        None => format!("Invalid CPF: {}", value),
                    };
                    Err(UtilsError::Validation { message }.into())
                }
            }
            ValidateCommands::Email { value } => {
                if is_valid_email(&value) {
                    println!("✅ Valid email: {}", value);
                    Ok(())
                } else {
                    Err(UtilsError::Validation {
                        message: format!("Invalid email: {}", value),
                    }
                    .into())
                }
            }
        }
    }

    pub fn handle_format(&self, command: FormatCommands) -> Result<(), AppError> {
        let output = match command {
            FormatCommands::Number { value, locale } => format_number(value, locale),
            FormatCommands::Percentage {
                value,
                total,
                decimals,
            } => format_percentage(value, total, decimals),
            FormatCommands::Date { value, format } => format_date(&value, format)?,
        };
        println!("{}", output);
        Ok(())
    }

    pub fn handle_copy(&self, text: &str, toasts: &mut Toasts) -> Result<(), AppError> {
        match copy_to_clipboard(text) {
            Ok(backend) => {
                log::debug!("Copied with {}", backend);
                toasts.notify("Text copied to clipboard!", Severity::Success);
                Ok(())
            }
            Err(e) => {
                toasts.notify("Failed to copy text", Severity::Danger);
                Err(AppError::from(e).notified())
            }
        }
    }
}

#[derive(Default)]
pub struct ConfigHandler;

impl ConfigHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(
        &self,
        command: ConfigCommands,
        config: &mut Config,
        config_path: Option<PathBuf>,
        profile_name: &str,
        session: &mut Session,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                print_verbose(verbose, "Attempting config show command");

                println!("Current Configuration:");
                println!("=====================");
                println!(
                    "Default Profile: {}",
                    config.default_profile.as_deref().unwrap_or("(not set)")
                );
                println!("Theme: {}", config.theme);

                println!("\nProfiles:");
                if config.profiles.is_empty() {
                    println!("  No profiles configured");
                } else {
                    let mut names: Vec<&String> = config.profiles.keys().collect();
                    names.sort();
                    for name in names {
                        let profile = &config.profiles[name];
                        println!("  [{}]", name);
                        println!("    Server URL: {}", profile.server_url);
                        if let Some(timeout) = profile.timeout_seconds {
                            println!("    Timeout: {} seconds", timeout);
                        }
                        println!(
                            "    Download dir: {}",
                            profile.resolved_download_dir().display()
                        );
                    }
                }
                Ok(())
            }
            ConfigCommands::Set { key, value } => {
                print_verbose(
                    verbose,
                    &format!("Attempting config set - key: {}, value: {}", key, value),
                );
                config.set_value(profile_name, &key, &value)?;
                config.save(config_path)?;
                println!("✅ Set {} = {} (profile: {})", key, value, profile_name);
                Ok(())
            }
            ConfigCommands::Theme {
                command: ThemeCommands::Toggle,
            } => {
                let theme = session.state.toggle_theme();
                config.theme = theme;
                config.save(config_path)?;
                session.toasts.notify(format!("Theme changed to {}", theme), Severity::Info);
                Ok(())
            }
        }
    }
}
