pub mod progress;
pub mod table;
pub mod toast;

pub use progress::{LoadingIndicator, with_loading};
pub use table::StatsDisplay;
pub use toast::TerminalToastRenderer;
