//! Student record storage and the SQL interpretation of record-set filters
//!
//! Every query path starts from a resolved [`Filter`]. `Empty` compiles to a
//! constant-false predicate and `MatchAll` to a constant-true one, so a
//! malformed filter can never widen a result set.

use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row};

use crate::{collect_res, inspect, map_res, parse_str_list, push_patch, MetaAdapterSqlite};
use varsity::filter::{Filter, StudentField};
use varsity::prelude::*;
use varsity::student_adapter::{
	CreateStudentData, Enrollment, EnrollmentStatus, ListStudentOptions, RiskLevel, StudentAdapter,
	StudentRecord, StudentSummary, UpdateStudentData,
};

const DEFAULT_LIMIT: u32 = 100;
const MAX_LIMIT: u32 = 500;

// Column codecs //
//***************//
fn risk_to_db(risk: RiskLevel) -> &'static str {
	match risk {
		RiskLevel::Low => "L",
		RiskLevel::Medium => "M",
		RiskLevel::High => "H",
	}
}

fn parse_risk(row: &SqliteRow) -> Result<Option<RiskLevel>, sqlx::Error> {
	let val: Option<&str> = row.try_get("risk_level")?;
	Ok(match val {
		Some("L") => Some(RiskLevel::Low),
		Some("M") => Some(RiskLevel::Medium),
		Some("H") => Some(RiskLevel::High),
		_ => None,
	})
}

fn student_from_row(row: SqliteRow) -> Result<StudentRecord, sqlx::Error> {
	let risk_level = parse_risk(&row)?;
	let courses: Option<String> = row.try_get("enrolled_course_ids")?;
	let created_at: i64 = row.try_get("created_at")?;

	Ok(StudentRecord {
		student_id: row.try_get("student_id")?,
		name: row.try_get("name")?,
		faculty_id: row.try_get("faculty_id")?,
		department_id: row.try_get("department_id")?,
		program_name: row.try_get("program_name")?,
		enrolled_course_ids: courses.as_deref().map(parse_str_list).unwrap_or_default(),
		risk_level,
		gpa: row.try_get("gpa")?,
		created_at: Timestamp(created_at),
	})
}

// Filter interpretation //
//***********************//
/// Appends the SQL predicate for a resolved filter. The predicate is always
/// a single parenthesizable expression over the `students` table.
fn push_filter<'a>(query: &mut sqlx::QueryBuilder<'a, sqlx::Sqlite>, filter: &'a Filter) {
	match filter {
		Filter::MatchAll => {
			query.push("1");
		}
		Filter::Empty => {
			query.push("0");
		}
		Filter::ByIds(ids) => {
			query.push("students.student_id IN (");
			for (i, id) in ids.iter().enumerate() {
				if i > 0 {
					query.push(", ");
				}
				query.push_bind(id.as_ref());
			}
			query.push(")");
		}
		Filter::ByCourses(course_ids) => {
			// Only a live enrollment grants visibility; completed or dropped
			// enrollments do not.
			query.push(
				"EXISTS (SELECT 1 FROM enrollments e
				WHERE e.student_id=students.student_id AND e.status='ENROLLED'
				AND e.course_id IN (",
			);
			for (i, id) in course_ids.iter().enumerate() {
				if i > 0 {
					query.push(", ");
				}
				query.push_bind(id.as_ref());
			}
			query.push("))");
		}
		Filter::ByFieldsOr(terms) => {
			query.push("(");
			for (i, term) in terms.iter().enumerate() {
				if i > 0 {
					query.push(" OR ");
				}
				match term.field {
					StudentField::FacultyId => {
						query.push("students.faculty_id=").push_bind(term.value.as_ref());
					}
					StudentField::DepartmentId => {
						query.push("students.department_id=").push_bind(term.value.as_ref());
					}
					// Legacy free-text program names are matched
					// case-insensitively.
					StudentField::ProgramName => {
						query
							.push("LOWER(students.program_name)=LOWER(")
							.push_bind(term.value.as_ref())
							.push(")");
					}
				}
			}
			query.push(")");
		}
	}
}

const SELECT_STUDENT: &str = "SELECT student_id, name, faculty_id, department_id, program_name,
	risk_level, gpa, created_at,
	(SELECT GROUP_CONCAT(e.course_id) FROM enrollments e
		WHERE e.student_id=students.student_id AND e.status='ENROLLED') AS enrolled_course_ids
	FROM students WHERE ";

#[async_trait]
impl StudentAdapter for MetaAdapterSqlite {
	async fn list_students(
		&self,
		filter: &Filter,
		opts: &ListStudentOptions,
	) -> VsResult<Vec<StudentRecord>> {
		if filter.is_empty() {
			return Ok(Vec::new());
		}

		let mut query = sqlx::QueryBuilder::new(SELECT_STUDENT);
		push_filter(&mut query, filter);

		if let Some(q) = &opts.q {
			query
				.push(" AND (name LIKE ")
				.push_bind(format!("%{}%", q))
				.push(" OR student_id LIKE ")
				.push_bind(format!("%{}%", q))
				.push(")");
		}

		if let Some(risk) = opts.risk_level {
			query.push(" AND risk_level=").push_bind(risk_to_db(risk));
		}

		let limit = opts.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
		query.push(" ORDER BY student_id LIMIT ").push_bind(limit);
		if let Some(offset) = opts.offset {
			query.push(" OFFSET ").push_bind(offset);
		}

		let rows = query
			.build()
			.fetch_all(self.db())
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

		collect_res(rows, student_from_row)
	}

	async fn read_student(&self, student_id: &str) -> VsResult<StudentRecord> {
		let mut query = sqlx::QueryBuilder::new(SELECT_STUDENT);
		query.push("student_id=").push_bind(student_id);

		let res = query.build().fetch_one(self.db()).await;
		map_res(res, student_from_row)
	}

	async fn student_matches(&self, student_id: &str, filter: &Filter) -> VsResult<bool> {
		if filter.is_empty() {
			return Ok(false);
		}
		if filter.is_match_all() {
			return Ok(true);
		}

		let mut query = sqlx::QueryBuilder::new("SELECT 1 FROM students WHERE student_id=");
		query.push_bind(student_id);
		query.push(" AND ");
		push_filter(&mut query, filter);

		let res = query
			.build()
			.fetch_optional(self.db())
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

		Ok(res.is_some())
	}

	async fn create_student(&self, data: &CreateStudentData) -> VsResult<()> {
		sqlx::query(
			"INSERT INTO students (student_id, name, faculty_id, department_id, program_name, created_at)
			VALUES (?, ?, ?, ?, ?, unixepoch())",
		)
		.bind(data.student_id.as_ref())
		.bind(data.name.as_ref())
		.bind(data.faculty_id.as_deref())
		.bind(data.department_id.as_deref())
		.bind(data.program_name.as_deref())
		.execute(self.db())
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

		Ok(())
	}

	async fn update_student(&self, student_id: &str, data: &UpdateStudentData) -> VsResult<()> {
		let mut query = sqlx::QueryBuilder::new("UPDATE students SET ");
		let mut has_updates = false;

		has_updates = push_patch!(query, has_updates, "name", &data.name, |v| v.as_ref());
		has_updates =
			push_patch!(query, has_updates, "faculty_id", &data.faculty_id, |v| v.as_ref());
		has_updates =
			push_patch!(query, has_updates, "department_id", &data.department_id, |v| v.as_ref());
		has_updates =
			push_patch!(query, has_updates, "program_name", &data.program_name, |v| v.as_ref());
		has_updates = push_patch!(query, has_updates, "gpa", &data.gpa, |v| *v);

		if !has_updates {
			return Ok(());
		}

		query.push(" WHERE student_id=").push_bind(student_id);

		let res = query
			.build()
			.execute(self.db())
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

		if res.rows_affected() == 0 {
			return Err(Error::NotFound);
		}

		Ok(())
	}

	async fn delete_student(&self, student_id: &str) -> VsResult<()> {
		// One transaction: a record never loses its row while its enrollments
		// survive, or the reverse.
		let mut tx = self.db().begin().await.inspect_err(inspect).map_err(|_| Error::DbError)?;

		let res = sqlx::query("DELETE FROM students WHERE student_id=?")
			.bind(student_id)
			.execute(&mut *tx)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

		if res.rows_affected() == 0 {
			return Err(Error::NotFound);
		}

		sqlx::query("DELETE FROM enrollments WHERE student_id=?")
			.bind(student_id)
			.execute(&mut *tx)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

		tx.commit().await.inspect_err(inspect).map_err(|_| Error::DbError)?;

		Ok(())
	}

	async fn summarize_students(&self, filter: &Filter) -> VsResult<StudentSummary> {
		if filter.is_empty() {
			return Ok(StudentSummary::default());
		}

		let mut query = sqlx::QueryBuilder::new(
			"SELECT COUNT(*) AS total,
			COUNT(CASE WHEN risk_level='L' THEN 1 END) AS low_risk,
			COUNT(CASE WHEN risk_level='M' THEN 1 END) AS medium_risk,
			COUNT(CASE WHEN risk_level='H' THEN 1 END) AS high_risk,
			COUNT(CASE WHEN risk_level IS NULL THEN 1 END) AS unclassified,
			AVG(gpa) AS average_gpa
			FROM students WHERE ",
		);
		push_filter(&mut query, filter);

		let res = query.build().fetch_one(self.db()).await;
		map_res(res, |row| {
			Ok(StudentSummary {
				total: row.try_get::<i64, _>("total")? as u64,
				low_risk: row.try_get::<i64, _>("low_risk")? as u64,
				medium_risk: row.try_get::<i64, _>("medium_risk")? as u64,
				high_risk: row.try_get::<i64, _>("high_risk")? as u64,
				unclassified: row.try_get::<i64, _>("unclassified")? as u64,
				average_gpa: row.try_get("average_gpa")?,
			})
		})
	}

	async fn list_enrollments(&self, student_id: &str) -> VsResult<Vec<Enrollment>> {
		let rows = sqlx::query(
			"SELECT student_id, course_id, semester, academic_year, status FROM enrollments
			WHERE student_id=? ORDER BY academic_year, semester, course_id",
		)
		.bind(student_id)
		.fetch_all(self.db())
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

		collect_res(rows, |row| {
			let status: &str = row.try_get("status")?;
			let status: EnrollmentStatus = status.parse().map_err(|_| sqlx::Error::RowNotFound)?;
			Ok(Enrollment {
				student_id: row.try_get("student_id")?,
				course_id: row.try_get("course_id")?,
				semester: row.try_get("semester")?,
				academic_year: row.try_get("academic_year")?,
				status,
			})
		})
	}
}

impl MetaAdapterSqlite {
	/// Records an enrollment row. Seeding and import tooling only.
	pub async fn add_enrollment(&self, enrollment: &Enrollment) -> VsResult<()> {
		sqlx::query(
			"INSERT OR REPLACE INTO enrollments (student_id, course_id, semester, academic_year, status)
			VALUES (?, ?, ?, ?, ?)",
		)
		.bind(enrollment.student_id.as_ref())
		.bind(enrollment.course_id.as_ref())
		.bind(enrollment.semester.as_ref())
		.bind(enrollment.academic_year.as_ref())
		.bind(enrollment.status.as_str())
		.execute(self.db())
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;
		Ok(())
	}

	/// Sets the externally computed risk classification on a record.
	pub async fn set_risk_level(
		&self,
		student_id: &str,
		risk_level: Option<RiskLevel>,
	) -> VsResult<()> {
		let res = sqlx::query("UPDATE students SET risk_level=? WHERE student_id=?")
			.bind(risk_level.map(risk_to_db))
			.bind(student_id)
			.execute(self.db())
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

		if res.rows_affected() == 0 {
			return Err(Error::NotFound);
		}
		Ok(())
	}
}

// vim: ts=4
