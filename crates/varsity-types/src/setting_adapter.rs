//! Adapter for persisted runtime settings.
//!
//! Values are stored as JSON and interpreted by the server's settings
//! service against its registry of definitions. Decision-relevant settings
//! (the registry risk-visibility override) are read through this adapter on
//! every decision so an out-of-band flip takes effect on the next request.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;

use crate::prelude::*;

#[async_trait]
pub trait SettingAdapter: Debug + Send + Sync {
	async fn read_setting(&self, key: &str) -> VsResult<Option<serde_json::Value>>;

	/// `None` deletes the stored value, falling back to the registry default.
	async fn update_setting(&self, key: &str, value: Option<serde_json::Value>) -> VsResult<()>;

	async fn list_settings(
		&self,
		prefix: Option<&str>,
	) -> VsResult<HashMap<String, serde_json::Value>>;
}

// vim: ts=4
