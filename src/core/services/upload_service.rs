use crate::core::notification::{NotificationCenter, Severity, ToastRenderer};
use crate::core::services::data_service::{DataService, DataStatus};
use crate::core::services::traits::DashboardApi;
use crate::core::view_state::ViewState;
use crate::error::{ServiceError, StorageError};
use crate::utils::validation::{ALLOWED_UPLOAD_EXTENSIONS, has_allowed_extension};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Pause between a successful upload and the state refresh
pub const DEFAULT_REFRESH_DELAY: Duration = Duration::from_millis(1000);

const MSG_NO_FILE: &str = "Please select a file";
const MSG_WRONG_TYPE: &str = "Please select an Excel file (.xlsx or .xls)";
const MSG_UPLOAD_FAILED: &str = "Failed to upload file";
const MSG_UPLOAD_OK: &str = "File uploaded successfully";

#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub file_name: String,
    pub message: String,
    pub refresh_after: Duration,
}

pub struct UploadService {
    api: Arc<dyn DashboardApi>,
    refresh_delay: Duration,
}

impl UploadService {
    pub fn new(api: Arc<dyn DashboardApi>) -> Self {
        Self {
            api,
            refresh_delay: DEFAULT_REFRESH_DELAY,
        }
    }

    pub fn with_refresh_delay(mut self, delay: Duration) -> Self {
        self.refresh_delay = delay;
        self
    }

    /// Check the selection before any transfer starts
    pub fn validate_selection(file: Option<&Path>) -> Result<(&Path, String), ServiceError> {
        let file = file.ok_or_else(|| ServiceError::Validation {
            field: "file".to_string(),
            message: MSG_NO_FILE.to_string(),
        })?;

        let file_name = file
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| ServiceError::Validation {
                field: "file".to_string(),
                message: MSG_NO_FILE.to_string(),
            })?;

        if !has_allowed_extension(file_name, ALLOWED_UPLOAD_EXTENSIONS) {
            return Err(ServiceError::Validation {
                field: "file".to_string(),
                message: MSG_WRONG_TYPE.to_string(),
            });
        }

        Ok((file, file_name.to_string()))
    }

    /// Validate and upload a workbook, reporting the outcome as a notification.
    ///
    /// Input problems raise a warning, server and transport problems a
    /// danger notification. Nothing is retried.
    pub async fn upload<R: ToastRenderer>(
        &self,
        file: Option<&Path>,
        notifications: &mut NotificationCenter<R>,
    ) -> Result<UploadOutcome, ServiceError> {
        let (path, file_name) = match Self::validate_selection(file) {
            Ok(selection) => selection,
            Err(e) => {
                if let ServiceError::Validation { message, .. } = &e {
                    notifications.notify(message.clone(), Severity::Warning);
                }
                return Err(e);
            }
        };

        let contents = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(source) => {
                notifications.notify(MSG_UPLOAD_FAILED, Severity::Danger);
                return Err(StorageError::FileIo {
                    path: path.to_string_lossy().to_string(),
                    source,
                }
                .into());
            }
        };

        log::info!("Uploading {} ({} bytes)", file_name, contents.len());

        let response = match self.api.upload_file(&file_name, contents).await {
            Ok(response) => response,
            Err(e) => {
                log::error!("Upload failed: {}", e);
                notifications.notify(MSG_UPLOAD_FAILED, Severity::Danger);
                return Err(e.into());
            }
        };

        if response.success {
            let message = response
                .message
                .unwrap_or_else(|| MSG_UPLOAD_OK.to_string());
            notifications.notify(message.clone(), Severity::Success);
            Ok(UploadOutcome {
                file_name,
                message,
                refresh_after: self.refresh_delay,
            })
        } else {
            let message = response
                .error
                .unwrap_or_else(|| MSG_UPLOAD_FAILED.to_string());
            notifications.notify(message.clone(), Severity::Danger);
            Err(ServiceError::Rejected { message })
        }
    }

    /// Wait out the refresh delay, then re-run the full data status check
    pub async fn refresh_after_upload(
        &self,
        outcome: &UploadOutcome,
        data: &DataService,
        state: &mut ViewState,
    ) -> DataStatus {
        tokio::time::sleep(outcome.refresh_after).await;
        data.check_data_status(state).await
    }
}
