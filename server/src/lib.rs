//! Varsity is a role-scoped student record service.
//!
//! Every request is evaluated against the caller's role and scope
//! attributes: the policy engine resolves a record-set filter, the storage
//! adapter interprets it, and the visibility gate decides which fields of
//! the result the caller may see. The server wires those pieces to an HTTP
//! API and owns the ambient concerns (auth tokens, settings, bootstrap
//! seeding).

#![forbid(unsafe_code)]

pub mod auth;
pub mod bootstrap;
pub mod core;
pub mod prelude;
pub mod routes;
pub mod settings;
pub mod student;

pub use crate::core::app::{App, AppBuilder, AppState};

// vim: ts=4
