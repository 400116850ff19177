pub use crate::core::dashboard_utils::DashboardUtils;
pub use error::AppError;

/// Main architecture layers (dependency flow: CLI → Core → Storage)
pub mod cli; // Command-line interface
pub mod core; // Notifications, rate limiting, services
pub mod storage; // Configuration persistence

/// Support modules (used across layers)
pub mod api; // Dashboard HTTP client
pub mod display; // Terminal rendering
pub mod error; // Error handling
pub mod utils; // Validation, formatting, files

pub type Result<T> = std::result::Result<T, AppError>;
