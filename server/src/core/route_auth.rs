//! Bearer-token middleware
//!
//! Tokens carry identity only. The principal's role and scope attributes are
//! re-read from the auth adapter on every request, so a provisioning change
//! (revoked assignment, role change) takes effect on the next request rather
//! than at token expiry.

const TOKEN_EXPIRE_HOURS: u64 = 8;

use axum::{
	body::Body,
	extract::State,
	http::{request::Request, response::Response},
	middleware::Next,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::time;

use crate::core::Auth;
use crate::prelude::*;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AuthToken {
	pub sub: Box<str>,
	pub exp: u64,
}

pub fn generate_access_token(secret: &str, user_id: &str) -> VsResult<Box<str>> {
	let expire = time::SystemTime::now()
		.duration_since(time::UNIX_EPOCH)
		.map_err(|_| Error::Internal("system clock before epoch".into()))?
		.as_secs() + 3600 * TOKEN_EXPIRE_HOURS;

	let token = encode(
		&jsonwebtoken::Header::new(Algorithm::HS256),
		&AuthToken { sub: user_id.into(), exp: expire },
		&EncodingKey::from_secret(secret.as_bytes()),
	)
	.map_err(|_| Error::Unauthorized)?
	.into();

	Ok(token)
}

/// Validates a token and returns the subject user id.
fn validate_token(secret: &str, token: &str) -> VsResult<Box<str>> {
	let token_data = decode::<AuthToken>(
		token,
		&DecodingKey::from_secret(secret.as_bytes()),
		&Validation::new(Algorithm::HS256),
	)
	.map_err(|_| Error::Unauthorized)?;

	Ok(token_data.claims.sub)
}

pub async fn require_auth(
	State(app): State<App>,
	mut req: Request<Body>,
	next: Next,
) -> VsResult<Response<Body>> {
	let auth_header = req
		.headers()
		.get("Authorization")
		.and_then(|h| h.to_str().ok())
		.ok_or(Error::Unauthorized)?;

	let token = auth_header.strip_prefix("Bearer ").ok_or(Error::Unauthorized)?;
	let user_id = validate_token(&app.opts.jwt_secret, token)?;

	// Current provisioning state, not the state at token issuance
	let user = app.auth_adapter.read_user_auth(&user_id).await.map_err(|err| match err {
		Error::NotFound => Error::Unauthorized,
		err => err,
	})?;
	let principal = user.into_principal()?;

	req.extensions_mut().insert(Auth(principal));

	Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_token_roundtrip() {
		let token = generate_access_token("test-secret", "hod-cs").expect("Should encode");
		let sub = validate_token("test-secret", &token).expect("Should decode");
		assert_eq!(sub.as_ref(), "hod-cs");
	}

	#[test]
	fn test_wrong_secret_is_rejected() {
		let token = generate_access_token("test-secret", "hod-cs").expect("Should encode");
		let err = validate_token("other-secret", &token).expect_err("Should reject");
		assert!(matches!(err, Error::Unauthorized));
	}

	#[test]
	fn test_garbage_token_is_rejected() {
		assert!(validate_token("test-secret", "not.a.token").is_err());
	}
}

// vim: ts=4
