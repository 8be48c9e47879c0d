//! Adapter for read-only lookups over the organizational graph.
//!
//! The graph (Faculty → Department → Course) is static reference data
//! maintained by an external provisioning process; the engine only reads it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Debug;

use crate::prelude::*;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Faculty {
	#[serde(rename = "facultyId")]
	pub faculty_id: Box<str>,
	pub code: Box<str>,
	pub name: Box<str>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Department {
	#[serde(rename = "departmentId")]
	pub department_id: Box<str>,
	pub code: Box<str>,
	pub name: Box<str>,
	#[serde(rename = "facultyId")]
	pub faculty_id: Box<str>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Course {
	#[serde(rename = "courseId")]
	pub course_id: Box<str>,
	pub code: Box<str>,
	pub name: Box<str>,
	#[serde(rename = "departmentId")]
	pub department_id: Box<str>,
	pub active: bool,
}

#[async_trait]
pub trait DirectoryAdapter: Debug + Send + Sync {
	/// Active departments owned by a faculty.
	async fn list_active_departments(&self, faculty_id: &str) -> VsResult<Vec<Department>>;

	/// Single department lookup; `None` when the id no longer refers to an
	/// active department.
	async fn read_department(&self, department_id: &str) -> VsResult<Option<Department>>;

	/// Active courses owned by a department.
	async fn list_active_courses(&self, department_id: &str) -> VsResult<Vec<Course>>;

	/// Filters candidate ids down to those referring to currently active
	/// courses. A course id recorded on a principal may have been
	/// deactivated or reassigned since its scope was last provisioned.
	async fn list_active_course_ids(
		&self,
		candidate_ids: &[Box<str>],
	) -> VsResult<BTreeSet<Box<str>>>;

	async fn list_faculties(&self) -> VsResult<Vec<Faculty>>;

	/// # Provisioning
	///
	/// Used by administrative import tooling and first-run seeding only;
	/// the policy engine never mutates the graph.
	async fn create_faculty(&self, faculty: &Faculty) -> VsResult<()>;
	async fn create_department(&self, department: &Department) -> VsResult<()>;
	async fn create_course(&self, course: &Course) -> VsResult<()>;
}

// vim: ts=4
