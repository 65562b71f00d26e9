//! Business records - record keeping and reporting service
//!
//! This crate stores departments, employees, projects, customers, suppliers,
//! products and sales, and serves a fixed catalog of reports over them.

pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod report;
pub mod routes;
pub mod state;
pub mod validate;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
