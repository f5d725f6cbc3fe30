/// Post Service Library
///
/// Backend service for the posting platform: members create posts, attach an
/// optional image, and receive automatically recommended tags from an
/// external text-classification service.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Row types and view DTOs
/// - `services`: Business logic, including the post orchestration workflow
/// - `db`: Database access layer and repositories
/// - `error`: Error types and response mapping
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
