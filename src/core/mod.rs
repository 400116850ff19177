//! Business logic, independent of the terminal

pub mod clipboard;
pub mod dashboard_utils;
pub mod notification;
pub mod rate_limit;
pub mod services;
pub mod view_state;
