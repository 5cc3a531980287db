//! # widgethub-domain
//!
//! Pure domain model for the widgethub service.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, the optimistic-locking version
//!   counter, error conventions
//! - Define the **Widget** record and enforce its invariants
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod version;

pub mod widget;
