//! Settings service: resolution, validation, and permission checks
//!
//! There is deliberately no value cache. The registry risk-visibility
//! override participates in access decisions, and a flip must be observed on
//! the next request, not at some cache-expiry horizon. SQLite reads on this
//! path are cheap enough.

use std::sync::Arc;

use crate::prelude::*;
use varsity_types::principal::Role;
use varsity_types::setting_adapter::SettingAdapter;

use super::types::{FrozenSettingsRegistry, SettingScope, SettingValue};

pub struct SettingsService {
	registry: Arc<FrozenSettingsRegistry>,
	adapter: Arc<dyn SettingAdapter>,
}

impl SettingsService {
	pub fn new(registry: Arc<FrozenSettingsRegistry>, adapter: Arc<dyn SettingAdapter>) -> Self {
		Self { registry, adapter }
	}

	/// Resolves a setting: stored value, else registry default.
	pub async fn get(&self, key: &str) -> VsResult<SettingValue> {
		let def = self
			.registry
			.get(key)
			.ok_or_else(|| Error::ValidationError(format!("Unknown setting: {}", key)))?;

		if def.scope == SettingScope::Runtime {
			if let Some(json_value) = self.adapter.read_setting(key).await? {
				let value = serde_json::from_value::<SettingValue>(json_value)
					.map_err(|e| Error::ValidationError(format!("Invalid setting value: {}", e)))?;
				return Ok(value);
			}
		}

		match &def.default {
			Some(default) => Ok(default.clone()),
			None => Err(Error::ValidationError(format!(
				"Setting '{}' has no default and must be configured",
				key
			))),
		}
	}

	/// Stores a setting value after permission, scope, type, and validator
	/// checks.
	pub async fn set(&self, key: &str, value: SettingValue, role: Role) -> VsResult<()> {
		let def = self
			.registry
			.get(key)
			.ok_or_else(|| Error::ValidationError(format!("Unknown setting: {}", key)))?;

		if !def.permission.check(role) {
			warn!("Permission denied for setting '{}': requires {:?}", key, def.permission);
			return Err(Error::PermissionDenied);
		}

		if def.scope == SettingScope::System {
			return Err(Error::PermissionDenied);
		}

		if let Some(default) = &def.default {
			if !value.matches_type(default) {
				return Err(Error::ValidationError(format!(
					"Type mismatch for setting '{}': expected {}, got {}",
					key,
					default.type_name(),
					value.type_name()
				)));
			}
		}

		if let Some(validator) = &def.validator {
			validator(&value)?;
		}

		let json_value = serde_json::to_value(&value)
			.map_err(|e| Error::ValidationError(format!("Failed to serialize setting: {}", e)))?;
		self.adapter.update_setting(key, Some(json_value)).await?;

		info!("Setting '{}' updated", key);
		Ok(())
	}

	/// Clears a stored value (falls back to the registry default).
	pub async fn delete(&self, key: &str, role: Role) -> VsResult<()> {
		let def = self
			.registry
			.get(key)
			.ok_or_else(|| Error::ValidationError(format!("Unknown setting: {}", key)))?;

		if !def.permission.check(role) {
			return Err(Error::PermissionDenied);
		}

		self.adapter.update_setting(key, None).await?;
		info!("Setting '{}' cleared", key);
		Ok(())
	}

	pub async fn get_bool(&self, key: &str) -> VsResult<bool> {
		match self.get(key).await? {
			SettingValue::Bool(b) => Ok(b),
			v => Err(Error::ValidationError(format!(
				"Setting '{}' is not a boolean, got {}",
				key,
				v.type_name()
			))),
		}
	}

	pub async fn get_int(&self, key: &str) -> VsResult<i64> {
		match self.get(key).await? {
			SettingValue::Int(i) => Ok(i),
			v => Err(Error::ValidationError(format!(
				"Setting '{}' is not an integer, got {}",
				key,
				v.type_name()
			))),
		}
	}

	pub fn registry(&self) -> &Arc<FrozenSettingsRegistry> {
		&self.registry
	}
}

// vim: ts=4
