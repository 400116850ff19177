use crate::api::models::{StatsResponse, UploadResponse};
use crate::error::ApiError;
use crate::map_api_error;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("dashboard-utils/", env!("CARGO_PKG_VERSION"));

pub const STATS_ENDPOINT: &str = "/api/stats";
pub const UPLOAD_ENDPOINT: &str = "/api/upload";

#[derive(Debug, Clone)]
pub struct DashboardClient {
    client: Client,
    pub base_url: String,
    timeout_secs: u64,
}

impl DashboardClient {
    // Create client with default settings
    pub fn new(base_url: String) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: String, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Http {
                status: 0,
                endpoint: "client_init".to_string(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(DashboardClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
        })
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Absolute URLs pass through untouched; paths are joined onto the base URL.
    pub fn resolve_url(&self, path_or_url: &str) -> String {
        if path_or_url.starts_with("http://") || path_or_url.starts_with("https://") {
            path_or_url.to_string()
        } else if path_or_url.starts_with('/') {
            format!("{}{}", self.base_url, path_or_url)
        } else {
            format!("{}/{}", self.base_url, path_or_url)
        }
    }

    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.resolve_url(path))
    }

    pub async fn handle_response<T>(
        &self,
        response: Response,
        endpoint: &str,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await.map_err(|e| ApiError::Http {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                message: format!("Failed to parse response: {}", e),
            })
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            match status.as_u16() {
                408 | 504 => Err(ApiError::Timeout {
                    timeout_secs: self.timeout_secs,
                    endpoint: endpoint.to_string(),
                }),
                _ => Err(ApiError::Http {
                    status: status.as_u16(),
                    endpoint: endpoint.to_string(),
                    message: error_text,
                }),
            }
        }
    }

    /// Generic JSON request. Any non-2xx status is an error.
    pub async fn make_request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let mut request = self
            .build_request(method, path)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = map_api_error!(request.send().await, path, self.timeout_secs)?;
        self.handle_response(response, path).await
    }

    pub async fn get_stats(&self) -> Result<StatsResponse, ApiError> {
        self.make_request(Method::GET, STATS_ENDPOINT, None).await
    }

    /// Send a workbook as the multipart field `file`
    pub async fn upload_file(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<UploadResponse, ApiError> {
        let part = Part::bytes(contents).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        let response = map_api_error!(
            self.build_request(Method::POST, UPLOAD_ENDPOINT)
                .multipart(form)
                .send()
                .await,
            UPLOAD_ENDPOINT,
            self.timeout_secs
        )?;

        // The server reports rejections as `{success: false, error}` on
        // 4xx/5xx too; that body wins over the bare status.
        let status = response.status();
        if status.is_success() {
            return self.handle_response(response, UPLOAD_ENDPOINT).await;
        }

        let body = map_api_error!(response.text().await, UPLOAD_ENDPOINT, self.timeout_secs)?;
        match serde_json::from_str::<UploadResponse>(&body) {
            Ok(rejection) if rejection.error.is_some() || rejection.message.is_some() => {
                Ok(UploadResponse {
                    success: false,
                    ..rejection
                })
            }
            _ => match status.as_u16() {
                408 | 504 => Err(ApiError::Timeout {
                    timeout_secs: self.timeout_secs,
                    endpoint: UPLOAD_ENDPOINT.to_string(),
                }),
                code => Err(ApiError::Http {
                    status: code,
                    endpoint: UPLOAD_ENDPOINT.to_string(),
                    message: body,
                }),
            },
        }
    }

    /// Fetch a raw body, e.g. for saving a file
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = map_api_error!(
            self.build_request(Method::GET, url).send().await,
            url,
            self.timeout_secs
        )?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                endpoint: url.to_string(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string(),
            });
        }

        let bytes = map_api_error!(response.bytes().await, url, self.timeout_secs)?;
        Ok(bytes.to_vec())
    }
}
