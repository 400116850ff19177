use crate::core::notification::{
    DismissReason, Notification, NotificationId, Severity, ToastContainer, ToastRenderer,
};
use crossterm::style::{Color, Stylize};
use std::io::Write;

/// Prints notifications as colored lines; danger goes to stderr
pub struct TerminalToastRenderer {
    use_colors: bool,
    verbose: bool,
}

impl Default for TerminalToastRenderer {
    fn default() -> Self {
        Self::new(false)
    }
}

impl TerminalToastRenderer {
    pub fn new(verbose: bool) -> Self {
        Self {
            use_colors: atty::is(atty::Stream::Stdout),
            verbose,
        }
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn color(severity: Severity) -> Color {
        match severity {
            Severity::Info => Color::Cyan,
            Severity::Success => Color::Green,
            Severity::Warning => Color::Yellow,
            Severity::Danger => Color::Red,
        }
    }

    /// One rendered line, without the trailing newline
    pub fn format_line(&self, notification: &Notification) -> String {
        let line = format!(" {} {}", notification.severity.emoji(), notification.message);
        if self.use_colors {
            line.with(Self::color(notification.severity)).to_string()
        } else {
            line
        }
    }
}

impl ToastRenderer for TerminalToastRenderer {
    fn container_created(&mut self, container: &ToastContainer) {
        log::trace!(
            "Toast container created at {:?} (z-index {})",
            container.position,
            container.z_index
        );
    }

    fn attach(&mut self, notification: &Notification) {
        log::debug!("[{}] {}", notification.severity.label(), notification.message);
        let line = self.format_line(notification);
        if notification.severity == Severity::Danger {
            let _ = writeln!(std::io::stderr(), "{}", line);
        } else {
            let _ = writeln!(std::io::stdout(), "{}", line);
        }
    }

    fn dismissed(&mut self, notification: &Notification, reason: DismissReason) {
        if self.verbose {
            println!("Verbose: notification {} dismissed ({:?})", notification.id, reason);
        }
    }

    fn detach(&mut self, id: NotificationId) {
        log::trace!("Notification {} detached", id);
    }
}
