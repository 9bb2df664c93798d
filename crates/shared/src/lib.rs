//! Shared types, errors, and configuration for Signtrack.
//!
//! This crate provides common types used across all other crates:
//! - Pagination types for device listings
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
