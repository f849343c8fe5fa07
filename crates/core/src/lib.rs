//! Core library for the task manager
//!
//! This crate contains the core business logic, including:
//! - Task and category models
//! - Form validation for submitted tasks
//! - Persistence gateway traits and their SQLite implementations

pub mod category;
pub mod db;
pub mod error;
pub mod select;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
