//! HTTP server for the employee roster.
//!
//! # Endpoints
//!
//! - `GET  /health`              — Liveness probe
//! - `/employees`, `/employees/:n` — Roster CRUD
//! - `POST /changes`             — Change-feed summaries

pub mod routes;

pub use routes::{app_router, AppState};
