//! In-memory directory stub shared by the engine's unit tests.

use async_trait::async_trait;
use std::collections::BTreeSet;

use varsity::directory_adapter::{Course, Department, DirectoryAdapter, Faculty};
use varsity::prelude::*;
use varsity::principal::{Principal, Role};

#[derive(Debug, Default)]
pub struct StubDirectory {
	pub faculties: Vec<Faculty>,
	pub departments: Vec<Department>,
	pub courses: Vec<Course>,
	pub fail: bool,
}

impl StubDirectory {
	/// One faculty (F10) with two departments; D201 owns an active and a
	/// deactivated course.
	pub fn sample() -> Self {
		Self {
			faculties: vec![Faculty {
				faculty_id: "F10".into(),
				code: "SCI".into(),
				name: "Faculty of Science".into(),
			}],
			departments: vec![
				Department {
					department_id: "D201".into(),
					code: "CS".into(),
					name: "Computer Science".into(),
					faculty_id: "F10".into(),
				},
				Department {
					department_id: "D202".into(),
					code: "MATH".into(),
					name: "Mathematics".into(),
					faculty_id: "F10".into(),
				},
			],
			courses: vec![
				Course {
					course_id: "C101".into(),
					code: "CS101".into(),
					name: "Intro to Programming".into(),
					department_id: "D201".into(),
					active: true,
				},
				Course {
					course_id: "C-RETIRED".into(),
					code: "CS099".into(),
					name: "Punched Card Systems".into(),
					department_id: "D201".into(),
					active: false,
				},
			],
			fail: false,
		}
	}

	/// Simulates an unreachable directory store.
	pub fn failing() -> Self {
		Self { fail: true, ..Self::default() }
	}

	fn check(&self) -> VsResult<()> {
		if self.fail {
			Err(Error::DbError)
		} else {
			Ok(())
		}
	}
}

#[async_trait]
impl DirectoryAdapter for StubDirectory {
	async fn list_active_departments(&self, faculty_id: &str) -> VsResult<Vec<Department>> {
		self.check()?;
		Ok(self
			.departments
			.iter()
			.filter(|d| d.faculty_id.as_ref() == faculty_id)
			.cloned()
			.collect())
	}

	async fn read_department(&self, department_id: &str) -> VsResult<Option<Department>> {
		self.check()?;
		Ok(self.departments.iter().find(|d| d.department_id.as_ref() == department_id).cloned())
	}

	async fn list_active_courses(&self, department_id: &str) -> VsResult<Vec<Course>> {
		self.check()?;
		Ok(self
			.courses
			.iter()
			.filter(|c| c.department_id.as_ref() == department_id && c.active)
			.cloned()
			.collect())
	}

	async fn list_active_course_ids(
		&self,
		candidate_ids: &[Box<str>],
	) -> VsResult<BTreeSet<Box<str>>> {
		self.check()?;
		Ok(self
			.courses
			.iter()
			.filter(|c| c.active && candidate_ids.contains(&c.course_id))
			.map(|c| c.course_id.clone())
			.collect())
	}

	async fn list_faculties(&self) -> VsResult<Vec<Faculty>> {
		self.check()?;
		Ok(self.faculties.clone())
	}

	async fn create_faculty(&self, _faculty: &Faculty) -> VsResult<()> {
		Err(Error::PermissionDenied)
	}

	async fn create_department(&self, _department: &Department) -> VsResult<()> {
		Err(Error::PermissionDenied)
	}

	async fn create_course(&self, _course: &Course) -> VsResult<()> {
		Err(Error::PermissionDenied)
	}
}

pub fn principal_with(role: Role) -> Principal {
	Principal::new("u1", role)
}

// vim: ts=4
