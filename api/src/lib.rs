//! # KeyGate API
//!
//! actix-web surface over `kg_core`: auth routes, cookie transport, the
//! session middleware and server bootstrap helpers.

pub mod app;
pub mod cookies;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{configure, AppState};
