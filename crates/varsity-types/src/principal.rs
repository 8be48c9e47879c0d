//! Authenticated principal and the closed role set.

use serde::{Deserialize, Serialize};

use crate::error::Error;

// Role //
//******//
/// The eight recognized roles. Anything outside this set is rejected at the
/// parsing boundary; stored role strings that fail to parse are treated as a
/// data-integrity defect and resolve to zero access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
	#[serde(rename = "VC")]
	Vc,
	#[serde(rename = "DVC")]
	Dvc,
	#[serde(rename = "DEAN")]
	Dean,
	#[serde(rename = "HOD")]
	Hod,
	#[serde(rename = "ADVISOR")]
	Advisor,
	#[serde(rename = "LECTURER")]
	Lecturer,
	#[serde(rename = "REGISTRY")]
	Registry,
	#[serde(rename = "IT_ADMIN")]
	ItAdmin,
}

impl Role {
	pub fn as_str(&self) -> &'static str {
		match self {
			Role::Vc => "VC",
			Role::Dvc => "DVC",
			Role::Dean => "DEAN",
			Role::Hod => "HOD",
			Role::Advisor => "ADVISOR",
			Role::Lecturer => "LECTURER",
			Role::Registry => "REGISTRY",
			Role::ItAdmin => "IT_ADMIN",
		}
	}
}

impl std::str::FromStr for Role {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"VC" => Ok(Role::Vc),
			"DVC" => Ok(Role::Dvc),
			"DEAN" => Ok(Role::Dean),
			"HOD" => Ok(Role::Hod),
			"ADVISOR" => Ok(Role::Advisor),
			"LECTURER" => Ok(Role::Lecturer),
			"REGISTRY" => Ok(Role::Registry),
			"IT_ADMIN" => Ok(Role::ItAdmin),
			_ => Err(Error::ValidationError(format!("unknown role: {}", s))),
		}
	}
}

impl std::fmt::Display for Role {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

// Principal //
//***********//
/// An authenticated actor with a role and scope attributes.
///
/// Produced by the auth middleware from stored user data on every request.
/// The token is trusted for identity only; scope attributes are re-read from
/// the store and course/assignment references are revalidated downstream.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Principal {
	#[serde(rename = "userId")]
	pub user_id: Box<str>,
	pub role: Role,
	#[serde(rename = "facultyId")]
	pub faculty_id: Option<Box<str>>,
	#[serde(rename = "departmentId")]
	pub department_id: Option<Box<str>>,
	#[serde(rename = "assignedCourseIds", default)]
	pub assigned_course_ids: Box<[Box<str>]>,
	#[serde(rename = "assignedStudentIds", default)]
	pub assigned_student_ids: Box<[Box<str>]>,
}

impl Principal {
	pub fn new(user_id: &str, role: Role) -> Self {
		Self {
			user_id: Box::from(user_id),
			role,
			faculty_id: None,
			department_id: None,
			assigned_course_ids: Box::new([]),
			assigned_student_ids: Box::new([]),
		}
	}
}


// vim: ts=4
