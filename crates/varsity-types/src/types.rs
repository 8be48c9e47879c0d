//! Common types used throughout the Varsity platform.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

// Timestamp //
//***********//
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(pub i64);

impl std::fmt::Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Serialize for Timestamp {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_i64(self.0)
	}
}

impl<'de> Deserialize<'de> for Timestamp {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(Timestamp(i64::deserialize(deserializer)?))
	}
}

pub fn now() -> Timestamp {
	let res = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
	Timestamp(res.as_secs() as i64)
}

// Patch //
//*******//
/// Three-state update field: absent from the payload, explicit null, or a value.
///
/// Used by update DTOs so that PATCH-style handlers can distinguish
/// "leave unchanged" from "clear this field".
#[derive(Clone, Debug, Default)]
pub enum Patch<T> {
	#[default]
	Undefined,
	Null,
	Value(T),
}

impl<T> Patch<T> {
	pub fn is_undefined(&self) -> bool {
		matches!(self, Patch::Undefined)
	}

	/// Maps to `Option<Option<T>>`: outer None = unchanged.
	pub fn into_update(self) -> Option<Option<T>> {
		match self {
			Patch::Undefined => None,
			Patch::Null => Some(None),
			Patch::Value(v) => Some(Some(v)),
		}
	}
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		// Field presence is handled by #[serde(default)] on the container;
		// a present field deserializes here as Null or Value.
		Ok(match Option::<T>::deserialize(deserializer)? {
			Some(v) => Patch::Value(v),
			None => Patch::Null,
		})
	}
}

// ApiResponse //
//*************//
/// Standard response envelope for list endpoints.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
	pub data: T,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub total: Option<usize>,
}

impl<T> ApiResponse<T> {
	pub fn new(data: T) -> Self {
		Self { data, total: None }
	}

	pub fn with_total(data: T, total: usize) -> Self {
		Self { data, total: Some(total) }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Debug, Deserialize)]
	struct Dto {
		#[serde(default)]
		name: Patch<String>,
	}

	#[test]
	fn test_patch_absent_is_undefined() {
		let dto: Dto = serde_json::from_str("{}").unwrap();
		assert!(dto.name.is_undefined());
	}

	#[test]
	fn test_patch_null_clears() {
		let dto: Dto = serde_json::from_str(r#"{"name":null}"#).unwrap();
		assert!(matches!(dto.name, Patch::Null));
	}

	#[test]
	fn test_patch_value() {
		let dto: Dto = serde_json::from_str(r#"{"name":"x"}"#).unwrap();
		assert!(matches!(dto.name, Patch::Value(ref v) if v == "x"));
	}
}

// vim: ts=4
