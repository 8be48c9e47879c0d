use axum::{
	middleware,
	routing::{get, post, put},
	Router,
};
use tower_http::trace::TraceLayer;

use crate::core::route_auth::require_auth;
use crate::{auth, settings, student, AppState};
use std::sync::Arc;

pub fn init(state: Arc<AppState>) -> Router {
	let protected_router = Router::new()
		.route("/api/students", get(student::handler::list_students))
		.route("/api/students/summary", get(student::handler::get_summary))
		.route(
			"/api/students/{student_id}",
			get(student::handler::get_student)
				.put(student::handler::update_student)
				.delete(student::handler::delete_student),
		)
		.route(
			"/api/students/{student_id}/enrollments",
			get(student::handler::list_enrollments),
		)
		.route("/api/settings", get(settings::handler::list_settings))
		.route(
			"/api/settings/{key}",
			put(settings::handler::update_setting)
				.get(settings::handler::get_setting)
				.delete(settings::handler::delete_setting),
		)
		.layer(middleware::from_fn_with_state(state.clone(), require_auth));

	let public_router = Router::new().route("/api/auth/login", post(auth::handler::post_login));

	Router::new()
		.merge(public_router)
		.merge(protected_router)
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}

// vim: ts=4
