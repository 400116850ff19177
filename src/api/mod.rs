//! HTTP client for the dashboard server

pub mod client;
pub mod models;
