//! Organizational graph lookups (faculties, departments, courses)

use async_trait::async_trait;
use sqlx::Row;
use std::collections::BTreeSet;

use crate::{collect_res, inspect, MetaAdapterSqlite};
use varsity::directory_adapter::{Course, Department, DirectoryAdapter, Faculty};
use varsity::prelude::*;

fn department_from_row(row: sqlx::sqlite::SqliteRow) -> Result<Department, sqlx::Error> {
	Ok(Department {
		department_id: row.try_get("department_id")?,
		faculty_id: row.try_get("faculty_id")?,
		code: row.try_get("code")?,
		name: row.try_get("name")?,
	})
}

fn course_from_row(row: sqlx::sqlite::SqliteRow) -> Result<Course, sqlx::Error> {
	Ok(Course {
		course_id: row.try_get("course_id")?,
		department_id: row.try_get("department_id")?,
		code: row.try_get("code")?,
		name: row.try_get("name")?,
		active: row.try_get("active")?,
	})
}

#[async_trait]
impl DirectoryAdapter for MetaAdapterSqlite {
	async fn list_active_departments(&self, faculty_id: &str) -> VsResult<Vec<Department>> {
		let rows = sqlx::query(
			"SELECT department_id, faculty_id, code, name FROM departments
			WHERE faculty_id=? AND active=1 ORDER BY department_id",
		)
		.bind(faculty_id)
		.fetch_all(self.db())
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

		collect_res(rows, department_from_row)
	}

	async fn read_department(&self, department_id: &str) -> VsResult<Option<Department>> {
		let res = sqlx::query(
			"SELECT department_id, faculty_id, code, name FROM departments
			WHERE department_id=? AND active=1",
		)
		.bind(department_id)
		.fetch_optional(self.db())
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

		match res {
			Some(row) => Ok(Some(
				department_from_row(row).inspect_err(inspect).map_err(|_| Error::DbError)?,
			)),
			None => Ok(None),
		}
	}

	async fn list_active_courses(&self, department_id: &str) -> VsResult<Vec<Course>> {
		let rows = sqlx::query(
			"SELECT course_id, department_id, code, name, active FROM courses
			WHERE department_id=? AND active=1 ORDER BY course_id",
		)
		.bind(department_id)
		.fetch_all(self.db())
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

		collect_res(rows, course_from_row)
	}

	async fn list_active_course_ids(
		&self,
		candidate_ids: &[Box<str>],
	) -> VsResult<BTreeSet<Box<str>>> {
		if candidate_ids.is_empty() {
			return Ok(BTreeSet::new());
		}

		let mut query =
			sqlx::QueryBuilder::new("SELECT course_id FROM courses WHERE active=1 AND course_id IN (");
		for (i, id) in candidate_ids.iter().enumerate() {
			if i > 0 {
				query.push(", ");
			}
			query.push_bind(id.as_ref());
		}
		query.push(")");

		let rows = query
			.build()
			.fetch_all(self.db())
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

		let mut ids = BTreeSet::new();
		for row in rows {
			ids.insert(row.try_get("course_id").inspect_err(inspect).map_err(|_| Error::DbError)?);
		}
		Ok(ids)
	}

	async fn list_faculties(&self) -> VsResult<Vec<Faculty>> {
		let rows = sqlx::query("SELECT faculty_id, code, name FROM faculties ORDER BY faculty_id")
			.fetch_all(self.db())
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

		collect_res(rows, |row| {
			Ok(Faculty {
				faculty_id: row.try_get("faculty_id")?,
				code: row.try_get("code")?,
				name: row.try_get("name")?,
			})
		})
	}

	async fn create_faculty(&self, faculty: &Faculty) -> VsResult<()> {
		sqlx::query("INSERT OR REPLACE INTO faculties (faculty_id, code, name) VALUES (?, ?, ?)")
			.bind(faculty.faculty_id.as_ref())
			.bind(faculty.code.as_ref())
			.bind(faculty.name.as_ref())
			.execute(self.db())
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;
		Ok(())
	}

	async fn create_department(&self, department: &Department) -> VsResult<()> {
		sqlx::query(
			"INSERT OR REPLACE INTO departments (department_id, faculty_id, code, name, active)
			VALUES (?, ?, ?, ?, 1)",
		)
		.bind(department.department_id.as_ref())
		.bind(department.faculty_id.as_ref())
		.bind(department.code.as_ref())
		.bind(department.name.as_ref())
		.execute(self.db())
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;
		Ok(())
	}

	async fn create_course(&self, course: &Course) -> VsResult<()> {
		sqlx::query(
			"INSERT OR REPLACE INTO courses (course_id, department_id, code, name, active)
			VALUES (?, ?, ?, ?, ?)",
		)
		.bind(course.course_id.as_ref())
		.bind(course.department_id.as_ref())
		.bind(course.code.as_ref())
		.bind(course.name.as_ref())
		.bind(course.active)
		.execute(self.db())
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;
		Ok(())
	}
}

// vim: ts=4
