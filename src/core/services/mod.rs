//! Service layer: server probing, uploads and generated files

pub mod data_service;
pub mod export_service;
pub mod traits;
pub mod upload_service;

pub use data_service::{DataService, DataStatus};
pub use export_service::ExportService;
pub use traits::DashboardApi;
pub use upload_service::{UploadOutcome, UploadService};
