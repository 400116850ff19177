use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("ServiceError: {0}")]
    Service(#[from] ServiceError),
    #[error("UtilsError: {0}")]
    Utils(#[from] UtilsError),
    #[error("ClipboardError: {0}")]
    Clipboard(#[from] ClipboardError),
    /// Failure the user has already seen as a notification
    #[error(transparent)]
    Notified(Box<AppError>),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Terminal error: {0}")]
    Terminal(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64, endpoint: String },
    #[error("HTTP error: {status} {message}")]
    Http {
        status: u16,
        endpoint: String,
        message: String,
    },
    #[error("Network error on {endpoint}: {message}")]
    Network { endpoint: String, message: String },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration save failed: {message}")]
    ConfigSaveFailed { message: String },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown configuration key '{key}'")]
    UnknownKey { key: String },
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Service layer error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },
    #[error("{message}")]
    Rejected { message: String },
    #[error("File error: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum UtilsError {
    #[error("Validation error: {message}")]
    Validation { message: String },
    #[error("Date parse error: {input}")]
    DateParse { input: String },
}

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("Fallback copy failed: {0}")]
    FallbackFailed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "🚨",
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

impl AppError {
    /// Mark the error as already shown to the user
    pub fn notified(self) -> Self {
        match self {
            AppError::Notified(_) => self,
            other => AppError::Notified(Box::new(other)),
        }
    }

    pub fn is_notified(&self) -> bool {
        matches!(self, AppError::Notified(_))
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Notified(inner) => inner.severity(),
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => match api_error {
                ApiError::Timeout { .. } => ErrorSeverity::Medium,
                ApiError::Http { status, .. } if *status >= 500 => ErrorSeverity::High,
                ApiError::Network { .. } => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
            AppError::Service(service_error) => match service_error {
                ServiceError::Api(_) => ErrorSeverity::High,
                ServiceError::Validation { .. } => ErrorSeverity::Low,
                ServiceError::Rejected { .. } => ErrorSeverity::Medium,
                ServiceError::Storage(_) => ErrorSeverity::Medium,
            },
            AppError::Utils(_) => ErrorSeverity::Low,
            AppError::Clipboard(_) => ErrorSeverity::Low,
        }
    }

    pub fn display_friendly(&self) -> String {
        match self {
            AppError::Notified(inner) => inner.display_friendly(),
            AppError::Service(ServiceError::Validation { message, .. }) => message.clone(),
            AppError::Service(ServiceError::Rejected { message }) => message.clone(),
            AppError::Api(ApiError::Network { endpoint, .. }) => {
                format!("Could not reach the dashboard server ({})", endpoint)
            }
            _ => format!("{}", self),
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Notified(inner) => inner.troubleshooting_hint(),
            AppError::Api(ApiError::Timeout { .. } | ApiError::Network { .. })
            | AppError::Service(ServiceError::Api(
                ApiError::Timeout { .. } | ApiError::Network { .. },
            )) => Some(
                "Check that the dashboard server is running, or pass --server-url".to_string(),
            ),
            AppError::Config(ConfigError::UnknownKey { .. }) => Some(
                "Valid keys: server_url, timeout_seconds, download_dir, theme".to_string(),
            ),
            AppError::Clipboard(_) => {
                Some("Run inside a graphical session or a terminal with OSC 52 support".to_string())
            }
            _ => None,
        }
    }
}
