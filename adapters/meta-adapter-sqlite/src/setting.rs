//! Settings key-value store
//!
//! Stores setting values as JSON text. No caching here: the settings service
//! reads through on every decision.

use async_trait::async_trait;
use sqlx::Row;
use std::collections::HashMap;

use crate::{inspect, MetaAdapterSqlite};
use varsity::prelude::*;
use varsity::setting_adapter::SettingAdapter;

#[async_trait]
impl SettingAdapter for MetaAdapterSqlite {
	async fn read_setting(&self, key: &str) -> VsResult<Option<serde_json::Value>> {
		let row = sqlx::query("SELECT value FROM settings WHERE name=?")
			.bind(key)
			.fetch_optional(self.db())
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

		Ok(row.and_then(|r| {
			let value: Option<String> = r.get("value");
			value.and_then(|v| serde_json::from_str(&v).ok())
		}))
	}

	async fn update_setting(&self, key: &str, value: Option<serde_json::Value>) -> VsResult<()> {
		if let Some(val) = value {
			sqlx::query("INSERT OR REPLACE INTO settings (name, value) VALUES (?, ?)")
				.bind(key)
				.bind(val.to_string())
				.execute(self.db())
				.await
				.inspect_err(inspect)
				.map_err(|_| Error::DbError)?;
		} else {
			// Deleting the row falls back to the registry default
			sqlx::query("DELETE FROM settings WHERE name=?")
				.bind(key)
				.execute(self.db())
				.await
				.inspect_err(inspect)
				.map_err(|_| Error::DbError)?;
		}

		Ok(())
	}

	async fn list_settings(
		&self,
		prefix: Option<&str>,
	) -> VsResult<HashMap<String, serde_json::Value>> {
		let rows = if let Some(prefix) = prefix {
			sqlx::query("SELECT name, value FROM settings WHERE name LIKE ? || '%'")
				.bind(prefix)
				.fetch_all(self.db())
				.await
				.inspect_err(inspect)
				.map_err(|_| Error::DbError)?
		} else {
			sqlx::query("SELECT name, value FROM settings")
				.fetch_all(self.db())
				.await
				.inspect_err(inspect)
				.map_err(|_| Error::DbError)?
		};

		let mut settings = HashMap::new();
		for row in rows {
			let name: String = row.get("name");
			let value: Option<String> = row.get("value");
			settings.insert(
				name,
				value.and_then(|v| serde_json::from_str(&v).ok()).unwrap_or(serde_json::Value::Null),
			);
		}

		Ok(settings)
	}
}

// vim: ts=4
