//! Utils module - Shared utilities and helpers
//!
//! Pure helpers (validation, formatting) are kept free of I/O so they can
//! be tested without a server or a terminal.

/// Reqwest error conversion
pub mod error_helpers;

/// File name sanitization and saving generated payloads
pub mod file;

/// pt-BR number, percentage and date formatting
pub mod formatting;

/// Verbose output helpers
pub mod logging;

/// Input validation (CPF, email, URLs, upload extensions)
pub mod validation;
