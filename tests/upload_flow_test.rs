use dashboard_utils::api::client::DashboardClient;
use dashboard_utils::core::notification::{Notification, NotificationCenter, Severity, ToastRenderer};
use dashboard_utils::core::services::{DataService, DataStatus, ExportService, UploadService};
use dashboard_utils::core::view_state::ViewState;
use dashboard_utils::error::ServiceError;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct Collected(Vec<(String, Severity)>);

impl ToastRenderer for Collected {
    fn attach(&mut self, notification: &Notification) {
        self.0
            .push((notification.message.clone(), notification.severity));
    }
}

fn api(server: &MockServer) -> Arc<DashboardClient> {
    Arc::new(DashboardClient::new(server.uri()).expect("client creation failed"))
}

#[tokio::test]
async fn upload_then_refresh_marks_data_loaded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Arquivo processado com sucesso"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_embarques": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let workbook = dir.path().join("dados.xlsx");
    std::fs::write(&workbook, b"PK\x03\x04").unwrap();

    let client = api(&server);
    let upload = UploadService::new(client.clone()).with_refresh_delay(Duration::from_millis(10));
    let data = DataService::new(client);
    let mut state = ViewState::default();
    let mut center = NotificationCenter::new(Collected::default());

    let outcome = upload
        .upload(Some(workbook.as_path()), &mut center)
        .await
        .unwrap();
    let status = upload.refresh_after_upload(&outcome, &data, &mut state).await;

    assert!(status.is_loaded());
    assert!(state.is_data_loaded());
    assert!(state.is_nav_enabled("/heatmap"));
    assert_eq!(
        center.renderer().0,
        vec![(
            "Arquivo processado com sucesso".to_string(),
            Severity::Success
        )]
    );
}

#[tokio::test]
async fn server_rejection_with_error_status_shows_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "error": "Formato de arquivo não suportado"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let workbook = dir.path().join("dados.xlsx");
    std::fs::write(&workbook, b"PK\x03\x04").unwrap();

    let upload = UploadService::new(api(&server));
    let mut center = NotificationCenter::new(Collected::default());

    let result = upload.upload(Some(workbook.as_path()), &mut center).await;

    assert!(matches!(result, Err(ServiceError::Rejected { .. })));
    assert_eq!(
        center.renderer().0,
        vec![(
            "Formato de arquivo não suportado".to_string(),
            Severity::Danger
        )]
    );
}

#[tokio::test]
async fn wrong_extension_never_reaches_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("dados.csv");
    std::fs::write(&file, b"a,b").unwrap();

    let upload = UploadService::new(api(&server));
    let mut center = NotificationCenter::new(Collected::default());

    assert!(upload.upload(Some(file.as_path()), &mut center).await.is_err());
    assert_eq!(
        center.renderer().0,
        vec![(
            "Please select an Excel file (.xlsx or .xls)".to_string(),
            Severity::Warning
        )]
    );
}

#[tokio::test]
async fn unreachable_server_degrades_to_no_data() {
    // Nothing listens on the discard port
    let client = Arc::new(DashboardClient::with_timeout("http://127.0.0.1:9".to_string(), 2).unwrap());
    let data = DataService::new(client);
    let mut state = ViewState::default();

    let status = data.check_data_status(&mut state).await;

    assert!(matches!(status, DataStatus::Unreachable(_)));
    assert!(!state.is_data_loaded());
    assert!(!state.is_nav_enabled("/tabela"));
    assert!(state.is_nav_enabled("/"));
}

#[tokio::test]
async fn download_file_saves_server_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/static/relatorio.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"x,y".to_vec()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let export = ExportService::new(api(&server), dir.path().to_path_buf());

    let saved = export
        .download_file("/static/relatorio.csv", "relatorio.csv")
        .await
        .unwrap();

    assert_eq!(saved, dir.path().join("relatorio.csv"));
    assert_eq!(std::fs::read(saved).unwrap(), b"x,y");
}
