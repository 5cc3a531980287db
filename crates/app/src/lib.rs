//! # widgethub-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `WidgetRepository`: CRUD for widgets, with a version-checked update
//! - Define **driving/inbound ports** as use-case structs:
//!   - `WidgetService`: find, list, save, conditional update, delete
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `widgethub-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
