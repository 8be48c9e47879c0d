//! Adapter that stores and queries student records and enrollments.
//!
//! Listing paths apply a [`Filter`](crate::filter::Filter) as a bulk query
//! predicate; detail/update/delete paths use the targeted
//! [`student_matches`](StudentAdapter::student_matches) membership test
//! instead of materializing the scoped set.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fmt::Debug;

use crate::filter::Filter;
use crate::prelude::*;

// Records //
//*********//
/// Risk classification computed by an external analytics process.
/// The engine only gates whether it is exposed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
	#[serde(rename = "LOW")]
	Low,
	#[serde(rename = "MEDIUM")]
	Medium,
	#[serde(rename = "HIGH")]
	High,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StudentRecord {
	#[serde(rename = "studentId")]
	pub student_id: Box<str>,
	pub name: Box<str>,
	/// Normalized foreign key; absent on historical records.
	#[serde(rename = "facultyId")]
	pub faculty_id: Option<Box<str>>,
	/// Normalized foreign key; absent on historical records.
	#[serde(rename = "departmentId")]
	pub department_id: Option<Box<str>>,
	/// Legacy free-text program name, retained for historical records
	/// written before foreign-key normalization.
	#[serde(rename = "programName")]
	pub program_name: Option<Box<str>>,
	#[serde(rename = "enrolledCourseIds", default)]
	pub enrolled_course_ids: Box<[Box<str>]>,
	#[serde(rename = "riskLevel")]
	pub risk_level: Option<RiskLevel>,
	pub gpa: Option<f64>,
	#[serde(rename = "createdAt")]
	pub created_at: Timestamp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnrollmentStatus {
	#[serde(rename = "ENROLLED")]
	Enrolled,
	#[serde(rename = "COMPLETED")]
	Completed,
	#[serde(rename = "DROPPED")]
	Dropped,
	#[serde(rename = "FAILED")]
	Failed,
}

impl EnrollmentStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			EnrollmentStatus::Enrolled => "ENROLLED",
			EnrollmentStatus::Completed => "COMPLETED",
			EnrollmentStatus::Dropped => "DROPPED",
			EnrollmentStatus::Failed => "FAILED",
		}
	}
}

impl std::str::FromStr for EnrollmentStatus {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"ENROLLED" => Ok(EnrollmentStatus::Enrolled),
			"COMPLETED" => Ok(EnrollmentStatus::Completed),
			"DROPPED" => Ok(EnrollmentStatus::Dropped),
			"FAILED" => Ok(EnrollmentStatus::Failed),
			_ => Err(Error::Parse),
		}
	}
}

/// Unique on (student_id, course_id, semester, academic_year).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Enrollment {
	#[serde(rename = "studentId")]
	pub student_id: Box<str>,
	#[serde(rename = "courseId")]
	pub course_id: Box<str>,
	pub semester: Box<str>,
	#[serde(rename = "academicYear")]
	pub academic_year: Box<str>,
	pub status: EnrollmentStatus,
}

// Options / DTOs //
//****************//
#[derive(Debug, Default, Deserialize)]
pub struct ListStudentOptions {
	/// Substring match on name or student id.
	pub q: Option<Box<str>>,
	#[serde(rename = "riskLevel")]
	pub risk_level: Option<RiskLevel>,
	pub limit: Option<u32>,
	pub offset: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct CreateStudentData {
	#[serde(rename = "studentId")]
	pub student_id: Box<str>,
	pub name: Box<str>,
	#[serde(rename = "facultyId")]
	pub faculty_id: Option<Box<str>>,
	#[serde(rename = "departmentId")]
	pub department_id: Option<Box<str>>,
	#[serde(rename = "programName")]
	pub program_name: Option<Box<str>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateStudentData {
	#[serde(default)]
	pub name: Patch<Box<str>>,
	#[serde(rename = "facultyId", default)]
	pub faculty_id: Patch<Box<str>>,
	#[serde(rename = "departmentId", default)]
	pub department_id: Patch<Box<str>>,
	#[serde(rename = "programName", default)]
	pub program_name: Patch<Box<str>>,
	#[serde(default)]
	pub gpa: Patch<f64>,
}

/// Aggregate summary over a scoped record set.
#[derive(Debug, Default, Serialize)]
pub struct StudentSummary {
	pub total: u64,
	#[serde(rename = "lowRisk")]
	pub low_risk: u64,
	#[serde(rename = "mediumRisk")]
	pub medium_risk: u64,
	#[serde(rename = "highRisk")]
	pub high_risk: u64,
	#[serde(rename = "unclassified")]
	pub unclassified: u64,
	#[serde(rename = "averageGpa")]
	pub average_gpa: Option<f64>,
}

// Trait //
//*******//
#[async_trait]
pub trait StudentAdapter: Debug + Send + Sync {
	async fn list_students(
		&self,
		filter: &Filter,
		opts: &ListStudentOptions,
	) -> VsResult<Vec<StudentRecord>>;

	async fn read_student(&self, student_id: &str) -> VsResult<StudentRecord>;

	/// Targeted single-record membership test against a resolved filter.
	/// Callers short-circuit `Empty`/`MatchAll` before reaching here.
	async fn student_matches(&self, student_id: &str, filter: &Filter) -> VsResult<bool>;

	async fn create_student(&self, data: &CreateStudentData) -> VsResult<()>;
	async fn update_student(&self, student_id: &str, data: &UpdateStudentData) -> VsResult<()>;
	async fn delete_student(&self, student_id: &str) -> VsResult<()>;

	/// Aggregates (risk-level counts, average gpa) over the filtered set.
	async fn summarize_students(&self, filter: &Filter) -> VsResult<StudentSummary>;

	async fn list_enrollments(&self, student_id: &str) -> VsResult<Vec<Enrollment>>;
}

// vim: ts=4
