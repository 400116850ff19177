//! One-stop facade over the helpers, for embedding applications.

use crate::api::client::DashboardClient;
use crate::core::clipboard::{ClipboardBackend, Osc52Clipboard, SystemClipboard, copy_with_fallback};
use crate::core::notification::{NotificationCenter, NotificationId, Severity, ToastRenderer};
use crate::core::rate_limit::{Debounce, Throttle};
use crate::core::services::ExportService;
use crate::error::{ApiError, ServiceError, UtilsError};
use crate::utils::formatting::{self, DateFormat, Locale};
use crate::utils::validation;
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub struct DashboardUtils<R: ToastRenderer> {
    client: Arc<DashboardClient>,
    notifications: NotificationCenter<R>,
    export: ExportService,
}

impl<R: ToastRenderer> DashboardUtils<R> {
    pub fn new(client: DashboardClient, renderer: R, download_dir: PathBuf) -> Self {
        let client = Arc::new(client);
        let export = ExportService::new(client.clone(), download_dir);
        Self {
            client,
            notifications: NotificationCenter::new(renderer),
            export,
        }
    }

    pub fn notifications(&mut self) -> &mut NotificationCenter<R> {
        &mut self.notifications
    }

    pub fn show_toast(&mut self, message: impl Into<String>, severity: Severity) -> NotificationId {
        self.notifications.notify(message, severity)
    }

    pub fn format_number(value: f64, locale: Locale) -> String {
        formatting::format_number(value, locale)
    }

    pub fn format_percentage(value: f64, total: f64, decimals: usize) -> String {
        formatting::format_percentage(value, total, decimals)
    }

    pub fn format_date(input: &str, format: DateFormat) -> Result<String, UtilsError> {
        formatting::format_date(input, format)
    }

    /// Calls must come from inside a tokio runtime; elsewhere they are
    /// dropped (`Debounce::call` returns `false`).
    pub fn debounce<A, F>(wait: Duration, callback: F) -> Debounce<A>
    where
        A: Send + 'static,
        F: Fn(A) + Send + Sync + 'static,
    {
        Debounce::new(wait, callback)
    }

    pub fn throttle<A, F>(limit: Duration, callback: F) -> Throttle<A>
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Throttle::new(limit, callback)
    }

    pub fn is_valid_email(email: &str) -> bool {
        validation::is_valid_email(email)
    }

    pub fn is_valid_cpf(cpf: &str) -> bool {
        validation::is_valid_cpf(cpf)
    }

    /// Copy with the system clipboard, falling back to OSC 52; reports via toast
    pub fn copy_to_clipboard(&mut self, text: &str) -> bool {
        let mut primary = SystemClipboard;
        let mut fallback = Osc52Clipboard::new(std::io::stdout());
        self.copy_with(&mut primary, &mut fallback, text)
    }

    pub fn copy_with(
        &mut self,
        primary: &mut dyn ClipboardBackend,
        fallback: &mut dyn ClipboardBackend,
        text: &str,
    ) -> bool {
        match copy_with_fallback(primary, fallback, text) {
            Ok(_) => {
                self.notifications
                    .notify("Text copied to clipboard!", Severity::Success);
                true
            }
            Err(e) => {
                log::warn!("Copy failed: {}", e);
                self.notifications
                    .notify("Failed to copy text", Severity::Danger);
                false
            }
        }
    }

    pub async fn export_to_csv<S: AsRef<str>>(
        &self,
        rows: &[Vec<S>],
        file_name: &str,
    ) -> Result<PathBuf, ServiceError> {
        self.export.export_to_csv(rows, file_name).await
    }

    pub async fn download_file(&self, url: &str, file_name: &str) -> Result<PathBuf, ServiceError> {
        self.export.download_file(url, file_name).await
    }

    pub async fn make_request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T, ApiError> {
        self.client.make_request(method, path, body).await
    }
}
