use crate::api::client::DashboardClient;
use crate::api::models::{StatsResponse, UploadResponse};
use crate::error::ApiError;
use async_trait::async_trait;

/// Server operations the services depend on
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn get_stats(&self) -> Result<StatsResponse, ApiError>;

    async fn upload_file(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<UploadResponse, ApiError>;

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError>;
}

#[async_trait]
impl DashboardApi for DashboardClient {
    async fn get_stats(&self) -> Result<StatsResponse, ApiError> {
        DashboardClient::get_stats(self).await
    }

    async fn upload_file(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<UploadResponse, ApiError> {
        DashboardClient::upload_file(self, file_name, contents).await
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        DashboardClient::fetch_bytes(self, url).await
    }
}
