//! Crate-wide error type.
//!
//! Every fallible operation in the workspace returns `VsResult<T>`. Access
//! decisions never surface configuration problems as errors to the caller;
//! those resolve to zero access inside the policy engine. Errors here cover
//! genuine failures (storage unreachable, invalid input), which must fail the
//! request rather than silently widen access.

pub type VsResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	PermissionDenied,
	Unauthorized,
	DbError,
	Parse,
	ValidationError(String),
	ConfigError(String),
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::Unauthorized => write!(f, "unauthorized"),
			Error::DbError => write!(f, "database error"),
			Error::Parse => write!(f, "parse error"),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

#[cfg(feature = "server")]
impl axum::response::IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		use axum::http::StatusCode;

		match self {
			Error::NotFound => (StatusCode::NOT_FOUND, "not found").into_response(),
			Error::PermissionDenied => {
				(StatusCode::FORBIDDEN, "permission denied").into_response()
			}
			Error::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized").into_response(),
			Error::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
			Error::Parse => (StatusCode::BAD_REQUEST, "parse error").into_response(),
			_ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
		}
	}
}

// vim: ts=4
