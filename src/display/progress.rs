//! Loading indicator shown while a request is in flight

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

const SPINNER_UPDATE_INTERVAL_MS: u64 = 100;
const CLEAR_LINE_WIDTH: usize = 100;
const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Spinner on stdout. Showing twice is a no-op, as is hiding while hidden.
pub struct LoadingIndicator {
    message: String,
    running: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
    enabled: bool,
}

impl LoadingIndicator {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
            enabled: atty::is(atty::Stream::Stdout),
        }
    }

    /// Disabled indicators track state but never draw
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn show(&mut self) {
        if self.running.swap(true, Ordering::Relaxed) {
            return;
        }
        if !self.enabled {
            return;
        }

        let running = Arc::clone(&self.running);
        let message = self.message.clone();

        self.handle = Some(thread::spawn(move || {
            let mut index = 0;
            while running.load(Ordering::Relaxed) {
                print!("\r{} {}", SPINNER_CHARS[index], message);
                let _ = io::stdout().flush();

                index = (index + 1) % SPINNER_CHARS.len();
                thread::sleep(Duration::from_millis(SPINNER_UPDATE_INTERVAL_MS));
            }

            print!("\r{:<width$}\r", "", width = CLEAR_LINE_WIDTH);
            let _ = io::stdout().flush();
        }));
    }

    pub fn hide(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for LoadingIndicator {
    fn drop(&mut self) {
        self.hide();
    }
}

/// Run `future` with the indicator visible, hiding it on completion
pub async fn with_loading<F, T>(message: &str, enabled: bool, future: F) -> T
where
    F: std::future::Future<Output = T>,
{
    let mut indicator = LoadingIndicator::new(message).with_enabled(enabled);
    indicator.show();
    let result = future.await;
    indicator.hide();
    result
}
