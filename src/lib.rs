//! HTTP API for a single-table todo list.
//!
//! One `todos` table behind four routes: list (with optional calendar-day
//! filter), create, partial update, and delete. See `router::app` for the
//! route table and `db::TodoStore` for the storage contract.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod router;

pub use config::Config;
pub use db::TodoStore;
pub use error::ApiError;
pub use router::{app, cors_layer};
