//! Student record handlers
//!
//! Every handler follows the same shape: gate on the visibility axis the
//! endpoint exposes, resolve the caller's record-set filter (or point-check
//! the target record), then strip response fields the caller may not see.
//! A record outside the caller's scope is reported as `NotFound`, never as
//! `PermissionDenied`, so existence does not leak.

use axum::{
	extract::{Path, Query, State},
	http::StatusCode,
	Json,
};

use crate::core::Auth;
use crate::prelude::*;
use crate::settings;

use varsity_access::{
	can_access_record, can_view_aggregates, can_view_individuals, can_view_risk_scores,
	resolve_scope,
};
use varsity_types::filter::Filter;
use varsity_types::principal::{Principal, Role};
use varsity_types::student_adapter::{
	Enrollment, ListStudentOptions, StudentRecord, StudentSummary, UpdateStudentData,
};

/// The Registry risk-visibility override, read fresh on every decision.
async fn risk_visible(app: &App, principal: &Principal) -> VsResult<bool> {
	let registry_override = app.settings.get_bool(settings::RISK_VISIBILITY_KEY).await?;
	Ok(can_view_risk_scores(principal.role, registry_override))
}

fn strip_risk(mut record: StudentRecord, risk_visible: bool) -> StudentRecord {
	if !risk_visible {
		record.risk_level = None;
	}
	record
}

async fn point_check(app: &App, principal: &Principal, student_id: &str) -> VsResult<()> {
	if !can_view_individuals(principal.role) {
		return Err(Error::PermissionDenied);
	}
	if !can_access_record(principal, student_id, &app.directory, &*app.student_adapter).await? {
		debug!(user = %principal.user_id, student = %student_id, "Record outside scope");
		return Err(Error::NotFound);
	}
	Ok(())
}

/// GET /api/students
pub async fn list_students(
	State(app): State<App>,
	Auth(principal): Auth,
	Query(mut opts): Query<ListStudentOptions>,
) -> VsResult<(StatusCode, Json<ApiResponse<Vec<StudentRecord>>>)> {
	if !can_view_individuals(principal.role) {
		return Err(Error::PermissionDenied);
	}

	let filter = resolve_scope(&principal, &app.directory).await?;
	if opts.limit.is_none() {
		opts.limit = Some(app.settings.get_int(settings::STUDENT_PAGE_SIZE_KEY).await? as u32);
	}

	let risk_visible = risk_visible(&app, &principal).await?;
	let records = app.student_adapter.list_students(&filter, &opts).await?;
	let records: Vec<StudentRecord> =
		records.into_iter().map(|r| strip_risk(r, risk_visible)).collect();

	let total = records.len();
	Ok((StatusCode::OK, Json(ApiResponse::with_total(records, total))))
}

/// GET /api/students/summary
pub async fn get_summary(
	State(app): State<App>,
	Auth(principal): Auth,
) -> VsResult<(StatusCode, Json<ApiResponse<StudentSummary>>)> {
	if !can_view_aggregates(principal.role) {
		return Err(Error::PermissionDenied);
	}

	// Vc/Dvc are aggregate-only roles: their record filter is Empty, but
	// their aggregate view is institution-wide.
	let filter = match principal.role {
		Role::Vc | Role::Dvc => Filter::MatchAll,
		_ => resolve_scope(&principal, &app.directory).await?,
	};

	let summary = app.student_adapter.summarize_students(&filter).await?;
	Ok((StatusCode::OK, Json(ApiResponse::new(summary))))
}

/// GET /api/students/{id}
pub async fn get_student(
	State(app): State<App>,
	Auth(principal): Auth,
	Path(student_id): Path<String>,
) -> VsResult<(StatusCode, Json<ApiResponse<StudentRecord>>)> {
	point_check(&app, &principal, &student_id).await?;

	let risk_visible = risk_visible(&app, &principal).await?;
	let record = app.student_adapter.read_student(&student_id).await?;

	Ok((StatusCode::OK, Json(ApiResponse::new(strip_risk(record, risk_visible)))))
}

/// PUT /api/students/{id}
pub async fn update_student(
	State(app): State<App>,
	Auth(principal): Auth,
	Path(student_id): Path<String>,
	Json(data): Json<UpdateStudentData>,
) -> VsResult<(StatusCode, Json<ApiResponse<StudentRecord>>)> {
	point_check(&app, &principal, &student_id).await?;

	app.student_adapter.update_student(&student_id, &data).await?;
	info!(user = %principal.user_id, student = %student_id, "Student record updated");

	let risk_visible = risk_visible(&app, &principal).await?;
	let record = app.student_adapter.read_student(&student_id).await?;

	Ok((StatusCode::OK, Json(ApiResponse::new(strip_risk(record, risk_visible)))))
}

/// DELETE /api/students/{id}
pub async fn delete_student(
	State(app): State<App>,
	Auth(principal): Auth,
	Path(student_id): Path<String>,
) -> VsResult<StatusCode> {
	point_check(&app, &principal, &student_id).await?;

	app.student_adapter.delete_student(&student_id).await?;
	info!(user = %principal.user_id, student = %student_id, "Student record deleted");

	Ok(StatusCode::NO_CONTENT)
}

/// GET /api/students/{id}/enrollments
pub async fn list_enrollments(
	State(app): State<App>,
	Auth(principal): Auth,
	Path(student_id): Path<String>,
) -> VsResult<(StatusCode, Json<ApiResponse<Vec<Enrollment>>>)> {
	point_check(&app, &principal, &student_id).await?;

	let enrollments = app.student_adapter.list_enrollments(&student_id).await?;
	let total = enrollments.len();

	Ok((StatusCode::OK, Json(ApiResponse::with_total(enrollments, total))))
}

// vim: ts=4
