//! Login handler

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::core::route_auth::generate_access_token;
use crate::prelude::*;

#[derive(Serialize)]
pub struct Login {
	#[serde(rename = "userId")]
	user_id: String,
	role: String,
	token: String,
}

/// # POST /api/auth/login
#[derive(Deserialize)]
pub struct LoginReq {
	#[serde(rename = "userId")]
	user_id: String,
	password: String,
}

pub async fn post_login(
	State(app): State<App>,
	Json(login): Json<LoginReq>,
) -> VsResult<(StatusCode, Json<ApiResponse<Login>>)> {
	let user = app.auth_adapter.check_user_password(&login.user_id, &login.password).await;

	if let Ok(user) = user {
		let token = generate_access_token(&app.opts.jwt_secret, &user.user_id)?;
		info!(user = %user.user_id, "Login");

		let login = Login {
			user_id: user.user_id.to_string(),
			role: user.role.to_string(),
			token: token.to_string(),
		};
		Ok((StatusCode::OK, Json(ApiResponse::new(login))))
	} else {
		// Uniform delay on failure, whatever the cause
		tokio::time::sleep(std::time::Duration::from_secs(1)).await;
		Err(Error::PermissionDenied)
	}
}

// vim: ts=4
