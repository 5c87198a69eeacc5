//! Axum HTTP server, routing, and middleware.
//!
//! # Responsibilities
//! - Define the Axum router with all routes and shared middleware.
//! - Inject shared application state (`AppState`) into handlers.
//!
//! The listener is plain HTTP; callers reach it over a trusted local link.

pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
