use crate::api::client::{DEFAULT_TIMEOUT_SECS, DashboardClient};
use crate::cli::command_handlers::{
    ConfigHandler, DataHandler, ExportHandler, HelperHandler, Session,
};
use crate::cli::main_types::Commands;
use crate::cli::shortcuts::{Action, HELP_TEXT, action_for};
use crate::core::notification::Severity;
use crate::core::rate_limit::Throttle;
use crate::core::services::{DashboardApi, DataService, ExportService, UploadService};
use crate::core::view_state::ViewState;
use crate::display::TerminalToastRenderer;
use crate::error::{AppError, CliError};
use crate::storage::config::{Config, Profile};
use crate::utils::logging::print_verbose;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Minimum spacing between manual refreshes in interactive mode
const REFRESH_THROTTLE: Duration = Duration::from_secs(2);
const KEY_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct Dispatcher {
    config: Config,
    config_path: Option<PathBuf>,
    profile_name: String,
    profile: Profile,
    api: Arc<dyn DashboardApi>,
    verbose: bool,
}

impl Dispatcher {
    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        profile_name: String,
        server_url: Option<String>,
        verbose: bool,
    ) -> Result<Self, AppError> {
        let mut profile = config
            .get_profile(&profile_name)
            .cloned()
            .unwrap_or_default();

        if let Some(url) = server_url {
            print_verbose(verbose, &format!("Server URL override: {}", url));
            profile.server_url = url;
        }

        let timeout = profile.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let client = DashboardClient::with_timeout(profile.server_url.clone(), timeout)?;
        print_verbose(
            verbose,
            &format!("Using server {} (timeout {}s)", client.base_url, timeout),
        );

        Ok(Self {
            config,
            config_path,
            profile_name,
            profile,
            api: Arc::new(client),
            verbose,
        })
    }

    fn session(&self) -> Session {
        let mut state = ViewState::new(self.config.theme);
        state.set_current_user(Some(self.profile_name.clone()));
        Session::new(state, TerminalToastRenderer::new(self.verbose))
    }

    fn export_service(&self, output_dir: Option<PathBuf>) -> ExportService {
        let dir = output_dir.unwrap_or_else(|| self.profile.resolved_download_dir());
        ExportService::new(self.api.clone(), dir)
    }

    pub async fn dispatch(mut self, command: Commands) -> Result<(), AppError> {
        let mut session = self.session();
        let data = DataService::new(self.api.clone());

        match command {
            Commands::Status => {
                DataHandler::new()
                    .handle_status(&data, &mut session.state, self.verbose)
                    .await?;
                Ok(())
            }
            Commands::Upload { file } => {
                let upload = UploadService::new(self.api.clone());
                DataHandler::new()
                    .handle_upload(
                        file.as_deref(),
                        &upload,
                        &data,
                        &mut session.state,
                        &mut session.toasts,
                        self.verbose,
                    )
                    .await
            }
            Commands::Template { output_dir } => {
                let export = self.export_service(output_dir);
                ExportHandler::new()
                    .handle_template(&export, &mut session.toasts, self.verbose)
                    .await?;
                Ok(())
            }
            Commands::Download {
                url,
                filename,
                output_dir,
            } => {
                let export = self.export_service(output_dir);
                ExportHandler::new()
                    .handle_download(&export, &url, &filename, self.verbose)
                    .await?;
                Ok(())
            }
            Commands::Validate { command } => HelperHandler::new().handle_validate(command),
            Commands::Format { command } => HelperHandler::new().handle_format(command),
            Commands::Copy { text } => HelperHandler::new().handle_copy(&text, &mut session.toasts),
            Commands::Config { command } => ConfigHandler::new().handle(
                command,
                &mut self.config,
                self.config_path.clone(),
                &self.profile_name,
                &mut session,
                self.verbose,
            ),
            Commands::Interactive => self.run_interactive(session, data).await,
        }
    }

    /// Key-driven loop. Raw mode is held only while waiting for a key so
    /// handler output prints normally.
    async fn run_interactive(mut self, mut session: Session, data: DataService) -> Result<(), AppError> {
        if !atty::is(atty::Stream::Stdin) {
            return Err(CliError::Terminal("interactive mode needs a terminal".to_string()).into());
        }

        let upload = UploadService::new(self.api.clone());
        let export = self.export_service(None);
        let refresh_gate: Throttle<()> = Throttle::new(REFRESH_THROTTLE, |_: ()| {});

        println!("{}\n", HELP_TEXT);
        DataHandler::new()
            .handle_status(&data, &mut session.state, self.verbose)
            .await?;

        loop {
            let action = match read_action()? {
                Some(action) => action,
                None => {
                    self.expire_toasts(&mut session);
                    continue;
                }
            };
            print_verbose(self.verbose, &format!("Shortcut: {:?}", action));

            let result = match action {
                Action::Quit => break,
                Action::Help => {
                    println!("{}", HELP_TEXT);
                    Ok(())
                }
                Action::Refresh => {
                    if refresh_gate.call(()) {
                        DataHandler::new()
                            .handle_status(&data, &mut session.state, self.verbose)
                            .await
                            .map(|_| ())
                    } else {
                        session
                            .toasts
                            .notify("Refresh already requested, wait a moment", Severity::Info);
                        Ok(())
                    }
                }
                Action::ExportTemplate => ExportHandler::new()
                    .handle_template(&export, &mut session.toasts, self.verbose)
                    .await
                    .map(|_| ()),
                Action::Upload => {
                    let file = prompt_path("Workbook path: ")?;
                    DataHandler::new()
                        .handle_upload(
                            file.as_deref(),
                            &upload,
                            &data,
                            &mut session.state,
                            &mut session.toasts,
                            self.verbose,
                        )
                        .await
                }
                Action::ToggleTheme => ConfigHandler::new().handle(
                    crate::cli::main_types::ConfigCommands::Theme {
                        command: crate::cli::main_types::ThemeCommands::Toggle,
                    },
                    &mut self.config,
                    self.config_path.clone(),
                    &self.profile_name,
                    &mut session,
                    self.verbose,
                ),
            };

            // Failures were already reported as notifications; keep the loop alive
            if let Err(e) = result {
                log::warn!("Shortcut {:?} failed: {}", action, e);
                print_verbose(self.verbose, &e.to_string());
            }
        }

        session.toasts.clear();
        Ok(())
    }

    fn expire_toasts(&self, session: &mut Session) {
        for id in session.toasts.expire(Instant::now()) {
            session.toasts.complete_dismissal(id);
        }
    }
}

/// Wait up to one poll interval for a mapped key press
fn read_action() -> Result<Option<Action>, AppError> {
    use crossterm::event::{self, Event};
    use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

    struct RawModeCleanup;
    impl Drop for RawModeCleanup {
        fn drop(&mut self) {
            let _ = disable_raw_mode();
        }
    }

    enable_raw_mode().map_err(|e| CliError::Terminal(e.to_string()))?;
    let _cleanup = RawModeCleanup;

    if !event::poll(KEY_POLL_INTERVAL).map_err(|e| CliError::Terminal(e.to_string()))? {
        return Ok(None);
    }
    match event::read().map_err(|e| CliError::Terminal(e.to_string()))? {
        Event::Key(key) => Ok(action_for(&key)),
        _ => Ok(None),
    }
}

/// Ask for a path on stdin; an empty answer means no selection
fn prompt_path(prompt: &str) -> Result<Option<PathBuf>, AppError> {
    print!("{}", prompt);
    io::stdout()
        .flush()
        .map_err(|e| CliError::Terminal(e.to_string()))?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| CliError::Terminal(e.to_string()))?;

    Ok(parse_path_answer(&line))
}

fn parse_path_answer(line: &str) -> Option<PathBuf> {
    let trimmed = line.trim().trim_matches(|c| c == '"' || c == '\'');
    if trimmed.is_empty() {
        None
    } else {
        Some(Path::new(trimmed).to_path_buf())
    }
}
