//! Adapter that manages stored user credentials and scope attributes.
//!
//! Token issuance and validation live in the server crate; this adapter owns
//! the persistent side: password hashes and the scope attributes that
//! parameterize a role's access. Scope data returned here is provisioning
//! state, not current truth — course/assignment references are revalidated
//! against the directory on every resolution.

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt::Debug;

use crate::prelude::*;
use crate::principal::{Principal, Role};

/// Stored user row, role still in wire form.
///
/// The role string is parsed at the auth boundary; an unparseable stored
/// role is a deployment-skew or data-integrity defect and denies access.
#[derive(Clone, Debug)]
pub struct AuthUser {
	pub user_id: Box<str>,
	pub role: Box<str>,
	pub faculty_id: Option<Box<str>>,
	pub department_id: Option<Box<str>>,
	pub assigned_course_ids: Box<[Box<str>]>,
	pub assigned_student_ids: Box<[Box<str>]>,
}

impl AuthUser {
	/// Builds a `Principal`, rejecting unknown role strings.
	pub fn into_principal(self) -> VsResult<Principal> {
		let role: Role = self.role.parse().map_err(|_| {
			error!(user = %self.user_id, role = %self.role, "Unknown stored role");
			Error::PermissionDenied
		})?;
		Ok(Principal {
			user_id: self.user_id,
			role,
			faculty_id: self.faculty_id,
			department_id: self.department_id,
			assigned_course_ids: self.assigned_course_ids,
			assigned_student_ids: self.assigned_student_ids,
		})
	}
}

#[derive(Debug, Deserialize)]
pub struct CreateUserData {
	#[serde(rename = "userId")]
	pub user_id: Box<str>,
	pub password: Box<str>,
	pub role: Box<str>,
	#[serde(rename = "facultyId")]
	pub faculty_id: Option<Box<str>>,
	#[serde(rename = "departmentId")]
	pub department_id: Option<Box<str>>,
	#[serde(rename = "assignedCourseIds", default)]
	pub assigned_course_ids: Vec<Box<str>>,
	#[serde(rename = "assignedStudentIds", default)]
	pub assigned_student_ids: Vec<Box<str>>,
}

#[async_trait]
pub trait AuthAdapter: Debug + Send + Sync {
	/// Verifies a password and returns the stored user on success.
	/// Fails with `PermissionDenied` on mismatch or unknown user.
	async fn check_user_password(&self, user_id: &str, password: &str) -> VsResult<AuthUser>;

	async fn read_user_auth(&self, user_id: &str) -> VsResult<AuthUser>;

	async fn create_user(&self, data: &CreateUserData) -> VsResult<()>;
	async fn update_user_password(&self, user_id: &str, password: &str) -> VsResult<()>;
}

// vim: ts=4
