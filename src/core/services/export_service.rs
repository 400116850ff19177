//! Client-side generated files: the upload template, tabular CSV exports and
//! plain downloads. None of these round-trip through the dashboard API
//! except `download_file`, which fetches the body it saves.

use crate::core::notification::{NotificationCenter, Severity, ToastRenderer};
use crate::core::services::traits::DashboardApi;
use crate::error::ServiceError;
use crate::utils::file::save_to_dir;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const TEMPLATE_FILE_NAME: &str = "template_embarques.csv";

pub const TEMPLATE_HEADER: [&str; 4] = [
    "MESORREGIÃO - ORIGEM",
    "MESORREGIÃO - DESTINO",
    "MÊS",
    "EMBARQUES",
];

pub const TEMPLATE_ROWS: [[&str; 4]; 5] = [
    ["São Paulo", "Rio de Janeiro", "1 - 2023", "1500"],
    ["Minas Gerais", "São Paulo", "1 - 2023", "800"],
    ["Rio de Janeiro", "Minas Gerais", "1 - 2023", "600"],
    ["Paraná", "São Paulo", "1 - 2023", "400"],
    ["Santa Catarina", "Paraná", "1 - 2023", "300"],
];

/// Template body: plain comma-joined rows, newline-separated, no trailing newline
pub fn template_csv() -> String {
    std::iter::once(TEMPLATE_HEADER)
        .chain(TEMPLATE_ROWS)
        .map(|row| row.join(","))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Quote every cell (doubling inner quotes), join cells with `,` and rows with `\n`
pub fn to_quoted_csv<S: AsRef<str>>(rows: &[Vec<S>]) -> String {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|cell| format!("\"{}\"", cell.as_ref().replace('"', "\"\"")))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct ExportService {
    api: Arc<dyn DashboardApi>,
    download_dir: PathBuf,
}

impl ExportService {
    pub fn new(api: Arc<dyn DashboardApi>, download_dir: PathBuf) -> Self {
        Self { api, download_dir }
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Save the upload template and confirm with a success notification
    pub async fn download_template<R: ToastRenderer>(
        &self,
        notifications: &mut NotificationCenter<R>,
    ) -> Result<PathBuf, ServiceError> {
        match save_to_dir(&self.download_dir, TEMPLATE_FILE_NAME, template_csv().as_bytes()).await
        {
            Ok(path) => {
                notifications.notify("Template downloaded successfully!", Severity::Success);
                Ok(path)
            }
            Err(e) => {
                notifications.notify("Failed to save template", Severity::Danger);
                Err(e.into())
            }
        }
    }

    pub async fn export_to_csv<S: AsRef<str>>(
        &self,
        rows: &[Vec<S>],
        file_name: &str,
    ) -> Result<PathBuf, ServiceError> {
        let path = save_to_dir(&self.download_dir, file_name, to_quoted_csv(rows).as_bytes()).await?;
        log::info!("Exported {} rows to {}", rows.len(), path.display());
        Ok(path)
    }

    /// Fetch `url` (absolute, or relative to the server) and save the body
    pub async fn download_file(&self, url: &str, file_name: &str) -> Result<PathBuf, ServiceError> {
        let body = self.api.fetch_bytes(url).await?;
        Ok(save_to_dir(&self.download_dir, file_name, &body).await?)
    }
}
