//! Settings management handlers

use axum::{
	extract::{Path, State},
	http::StatusCode,
	Json,
};
use serde::Deserialize;

use crate::core::Auth;
use crate::prelude::*;
use crate::settings::types::SettingValue;

#[derive(serde::Serialize)]
pub struct SettingResponse {
	pub key: String,
	pub value: SettingValue,
	pub scope: String,
	pub permission: String,
	pub description: String,
}

/// GET /api/settings
pub async fn list_settings(
	State(app): State<App>,
	Auth(_principal): Auth,
) -> VsResult<(StatusCode, Json<ApiResponse<Vec<SettingResponse>>>)> {
	let mut settings_response = Vec::new();

	for definition in app.settings.registry().list() {
		if let Ok(value) = app.settings.get(&definition.key).await {
			settings_response.push(SettingResponse {
				key: definition.key.clone(),
				value,
				scope: format!("{:?}", definition.scope),
				permission: format!("{:?}", definition.permission),
				description: definition.description.clone(),
			});
		}
	}

	let total = settings_response.len();
	Ok((StatusCode::OK, Json(ApiResponse::with_total(settings_response, total))))
}

/// GET /api/settings/{key}
pub async fn get_setting(
	State(app): State<App>,
	Auth(_principal): Auth,
	Path(key): Path<String>,
) -> VsResult<(StatusCode, Json<ApiResponse<SettingResponse>>)> {
	let definition = app.settings.registry().get(&key).ok_or(Error::NotFound)?;
	let value = app.settings.get(&key).await?;

	let response = SettingResponse {
		key: definition.key.clone(),
		value,
		scope: format!("{:?}", definition.scope),
		permission: format!("{:?}", definition.permission),
		description: definition.description.clone(),
	};

	Ok((StatusCode::OK, Json(ApiResponse::new(response))))
}

#[derive(Deserialize)]
pub struct UpdateSettingRequest {
	pub value: SettingValue,
}

/// PUT /api/settings/{key}
pub async fn update_setting(
	State(app): State<App>,
	Auth(principal): Auth,
	Path(key): Path<String>,
	Json(req): Json<UpdateSettingRequest>,
) -> VsResult<(StatusCode, Json<ApiResponse<SettingResponse>>)> {
	app.settings.set(&key, req.value, principal.role).await?;
	info!("User {} updated setting {}", principal.user_id, key);

	get_setting(State(app), Auth(principal), Path(key)).await
}

/// DELETE /api/settings/{key} - clear the stored override
pub async fn delete_setting(
	State(app): State<App>,
	Auth(principal): Auth,
	Path(key): Path<String>,
) -> VsResult<StatusCode> {
	app.settings.delete(&key, principal.role).await?;
	info!("User {} cleared setting {}", principal.user_id, key);

	Ok(StatusCode::NO_CONTENT)
}

// vim: ts=4
