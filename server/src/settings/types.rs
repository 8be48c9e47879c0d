//! Settings types and registry
//!
//! Settings have two independent dimensions: **scope** (whether a value can
//! change at runtime) and **permission** (who may change it). The decision
//! engine never sees this module; it only observes the resolved values.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::prelude::*;
use varsity_types::principal::Role;

/// Type alias for setting validator function
pub type SettingValidator = Box<dyn Fn(&SettingValue) -> VsResult<()> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingScope {
	/// Default value only, cannot be changed at runtime
	#[serde(rename = "system")]
	System,
	/// Persisted, runtime-mutable; takes effect on the next request
	#[serde(rename = "runtime")]
	Runtime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionLevel {
	/// Read-only
	#[serde(rename = "system")]
	System,
	/// Only IT administrators can change
	#[serde(rename = "admin")]
	Admin,
	/// Any authenticated user can change
	#[serde(rename = "user")]
	User,
}

impl PermissionLevel {
	pub fn check(&self, role: Role) -> bool {
		match self {
			PermissionLevel::System => false,
			PermissionLevel::Admin => role == Role::ItAdmin,
			PermissionLevel::User => true,
		}
	}
}

/// Setting value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)] // No type tag - type inferred from SettingDefinition
pub enum SettingValue {
	Bool(bool), // Must be before Int to avoid bool -> int coercion
	Int(i64),
	String(String),
	Json(serde_json::Value),
}

impl SettingValue {
	pub fn matches_type(&self, other: &SettingValue) -> bool {
		matches!(
			(self, other),
			(SettingValue::String(_), SettingValue::String(_))
				| (SettingValue::Int(_), SettingValue::Int(_))
				| (SettingValue::Bool(_), SettingValue::Bool(_))
				| (SettingValue::Json(_), SettingValue::Json(_))
		)
	}

	pub fn type_name(&self) -> &'static str {
		match self {
			SettingValue::String(_) => "string",
			SettingValue::Int(_) => "int",
			SettingValue::Bool(_) => "bool",
			SettingValue::Json(_) => "json",
		}
	}
}

/// Setting definition - metadata for each registered key
pub struct SettingDefinition {
	/// Dot-separated key (e.g., "registry.risk_visibility")
	pub key: String,
	pub description: String,
	/// If None, the setting must be configured before first read
	pub default: Option<SettingValue>,
	pub scope: SettingScope,
	pub permission: PermissionLevel,
	pub validator: Option<SettingValidator>,
}

impl Debug for SettingDefinition {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SettingDefinition")
			.field("key", &self.key)
			.field("description", &self.description)
			.field("default", &self.default)
			.field("scope", &self.scope)
			.field("permission", &self.permission)
			.field("validator", &self.validator.is_some())
			.finish()
	}
}

impl SettingDefinition {
	pub fn builder(key: impl Into<String>) -> SettingDefinitionBuilder {
		SettingDefinitionBuilder::new(key)
	}
}

pub struct SettingDefinitionBuilder {
	key: String,
	description: Option<String>,
	default: Option<SettingValue>,
	scope: SettingScope,
	permission: PermissionLevel,
	validator: Option<SettingValidator>,
}

impl SettingDefinitionBuilder {
	pub fn new(key: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			description: None,
			default: None,
			scope: SettingScope::Runtime,
			permission: PermissionLevel::Admin, // admin-only unless opened up
			validator: None,
		}
	}

	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	pub fn default(mut self, value: SettingValue) -> Self {
		self.default = Some(value);
		self
	}

	pub fn scope(mut self, scope: SettingScope) -> Self {
		self.scope = scope;
		self
	}

	pub fn permission(mut self, permission: PermissionLevel) -> Self {
		self.permission = permission;
		self
	}

	pub fn validator<F>(mut self, f: F) -> Self
	where
		F: Fn(&SettingValue) -> VsResult<()> + Send + Sync + 'static,
	{
		self.validator = Some(Box::new(f));
		self
	}

	pub fn build(self) -> VsResult<SettingDefinition> {
		let description = self
			.description
			.ok_or_else(|| Error::ConfigError("Setting description is required".into()))?;

		if self.scope == SettingScope::System && self.permission != PermissionLevel::System {
			return Err(Error::ConfigError(
				"System scope settings must have System permission".into(),
			));
		}

		Ok(SettingDefinition {
			key: self.key,
			description,
			default: self.default,
			scope: self.scope,
			permission: self.permission,
			validator: self.validator,
		})
	}
}

/// Mutable registry used during app initialization
pub struct SettingsRegistry {
	definitions: std::collections::HashMap<String, SettingDefinition>,
}

impl SettingsRegistry {
	pub fn new() -> Self {
		Self { definitions: std::collections::HashMap::new() }
	}

	pub fn register(&mut self, def: SettingDefinition) -> VsResult<()> {
		if self.definitions.contains_key(&def.key) {
			return Err(Error::ConfigError(format!(
				"Setting '{}' is already registered",
				def.key
			)));
		}

		debug!("Registering setting: {}", def.key);
		self.definitions.insert(def.key.clone(), def);
		Ok(())
	}

	/// Freeze the registry (make it immutable)
	pub fn freeze(self) -> FrozenSettingsRegistry {
		info!("Freezing settings registry with {} definitions", self.definitions.len());
		FrozenSettingsRegistry { definitions: self.definitions }
	}
}

impl Default for SettingsRegistry {
	fn default() -> Self {
		Self::new()
	}
}

/// Immutable registry stored in AppState
pub struct FrozenSettingsRegistry {
	definitions: std::collections::HashMap<String, SettingDefinition>,
}

impl FrozenSettingsRegistry {
	pub fn get(&self, key: &str) -> Option<&SettingDefinition> {
		self.definitions.get(key)
	}

	pub fn list(&self) -> impl Iterator<Item = &SettingDefinition> {
		self.definitions.values()
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}

// vim: ts=4
