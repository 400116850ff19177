use crate::api::models::StatsResponse;
use crate::core::services::traits::DashboardApi;
use crate::core::view_state::ViewState;
use crate::error::ServiceError;
use std::sync::Arc;

/// Result of probing the server for loaded data
#[derive(Debug, Clone)]
pub enum DataStatus {
    Loaded(StatsResponse),
    /// Server answered with `{error}`
    NoData(String),
    /// Request failed; treated as no data
    Unreachable(String),
}

impl DataStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, DataStatus::Loaded(_))
    }
}

pub struct DataService {
    api: Arc<dyn DashboardApi>,
}

impl DataService {
    pub fn new(api: Arc<dyn DashboardApi>) -> Self {
        Self { api }
    }

    pub async fn fetch_stats(&self) -> Result<StatsResponse, ServiceError> {
        Ok(self.api.get_stats().await?)
    }

    /// Ask the server whether data is loaded and update `state` accordingly.
    ///
    /// Never fails: a transport error degrades to "no data".
    pub async fn check_data_status(&self, state: &mut ViewState) -> DataStatus {
        match self.api.get_stats().await {
            Ok(stats) => match stats.error.clone() {
                Some(reason) => {
                    log::info!("No data loaded: {}", reason);
                    state.mark_unloaded(Some(reason.clone()));
                    DataStatus::NoData(reason)
                }
                None => {
                    state.mark_loaded();
                    DataStatus::Loaded(stats)
                }
            },
            Err(e) => {
                log::warn!("Failed to check data status: {}", e);
                state.mark_unloaded(None);
                DataStatus::Unreachable(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::traits::mock::MockApi;
    use crate::error::ApiError;

    #[tokio::test]
    async fn test_check_data_status_loaded() {
        let stats = StatsResponse {
            total_embarques: Some(3600),
            ..StatsResponse::default()
        };
        let service = DataService::new(Arc::new(MockApi::new().with_stats(Ok(stats))));
        let mut state = ViewState::default();

        let status = service.check_data_status(&mut state).await;

        assert!(status.is_loaded());
        assert!(state.is_data_loaded());
    }

    #[tokio::test]
    async fn test_check_data_status_error_payload_means_no_data() {
        let stats = StatsResponse {
            error: Some("Nenhum dado carregado".to_string()),
            ..StatsResponse::default()
        };
        let service = DataService::new(Arc::new(MockApi::new().with_stats(Ok(stats))));
        let mut state = ViewState::default();
        state.mark_loaded();

        let status = service.check_data_status(&mut state).await;

        assert!(matches!(status, DataStatus::NoData(ref r) if r == "Nenhum dado carregado"));
        assert!(!state.is_data_loaded());
        assert_eq!(state.status_message(), Some("Nenhum dado carregado"));
    }

    #[tokio::test]
    async fn test_check_data_status_network_failure_degrades() {
        let api = MockApi::new().with_stats(Err(ApiError::Network {
            endpoint: "/api/stats".to_string(),
            message: "connection refused".to_string(),
        }));
        let service = DataService::new(Arc::new(api));
        let mut state = ViewState::default();
        state.mark_loaded();

        let status = service.check_data_status(&mut state).await;

        assert!(matches!(status, DataStatus::Unreachable(_)));
        assert!(!state.is_data_loaded());
    }
}
