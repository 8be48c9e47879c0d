//! Settings subsystem
//!
//! - **Types** (`types.rs`): definitions, values, and the registry
//! - **Service** (`service.rs`): resolution, validation, permission checks
//! - **Handler** (`handler.rs`): HTTP endpoints
//!
//! Runtime settings are read through the adapter on every access. The
//! registry risk-visibility override is the reason: it gates a field of the
//! access decision and must never be served from a stale copy.

pub mod handler;
pub mod service;
pub mod types;

use crate::prelude::*;
pub use types::{
	FrozenSettingsRegistry, PermissionLevel, SettingDefinition, SettingScope, SettingValue,
	SettingsRegistry,
};

/// Registry key of the Registry-office risk-visibility override.
pub const RISK_VISIBILITY_KEY: &str = "registry.risk_visibility";

/// Default page size key for student listings.
pub const STUDENT_PAGE_SIZE_KEY: &str = "students.default_page_size";

pub fn init_registry() -> VsResult<FrozenSettingsRegistry> {
	let mut registry = SettingsRegistry::new();

	registry.register(
		SettingDefinition::builder(RISK_VISIBILITY_KEY)
			.description(
				"Grant the Registry office visibility of per-student risk scores. \
				Off by default; IT administrators are unaffected by this toggle.",
			)
			.default(SettingValue::Bool(false))
			.scope(SettingScope::Runtime)
			.permission(PermissionLevel::Admin)
			.build()?,
	)?;

	registry.register(
		SettingDefinition::builder(STUDENT_PAGE_SIZE_KEY)
			.description("Default page size for student listings when the request names none.")
			.default(SettingValue::Int(100))
			.scope(SettingScope::Runtime)
			.permission(PermissionLevel::Admin)
			.validator(|v| match v {
				SettingValue::Int(n) if (1..=500).contains(n) => Ok(()),
				_ => Err(Error::ValidationError("page size must be between 1 and 500".into())),
			})
			.build()?,
	)?;

	Ok(registry.freeze())
}


// vim: ts=4
