//! # widgethub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **REST JSON API** for widgets under `/rest`
//! - Map HTTP requests (path, `If-Match`, JSON body) into application
//!   service calls (driving adapter)
//! - Map application results into HTTP responses, including the `Location`
//!   and `ETag` headers
//! - Own the JSON wire format; domain types are never serialized directly
//!
//! ## Dependency rule
//! Depends on `widgethub-app` (for port traits and services) and
//! `widgethub-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod headers;
pub mod router;
pub mod state;
