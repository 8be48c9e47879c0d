//! Shared types and adapter traits for the Varsity platform.
//!
//! This crate contains the foundational types that are shared between the
//! server crate, the access-policy engine, and all adapter implementations.
//! Keeping them in a separate crate lets adapters compile in parallel with
//! the server's feature modules.

pub mod auth_adapter;
pub mod directory_adapter;
pub mod error;
#[cfg(feature = "server")]
pub mod extract;
pub mod filter;
pub mod prelude;
pub mod principal;
pub mod student_adapter;
pub mod setting_adapter;
pub mod types;
pub mod worker;

// vim: ts=4
