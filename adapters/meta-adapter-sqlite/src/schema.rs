//! Database schema initialization
//!
//! Creates the organizational graph, student record, settings, and user
//! credential tables on first open. All statements are idempotent.

use sqlx::SqlitePool;

pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS globals (
			key text NOT NULL,
			value text,
			PRIMARY KEY(key)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Organizational graph
	//**********************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS faculties (
		faculty_id text NOT NULL,
		code text NOT NULL,
		name text NOT NULL,
		PRIMARY KEY(faculty_id)
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS departments (
		department_id text NOT NULL,
		faculty_id text NOT NULL,
		code text NOT NULL,
		name text NOT NULL,
		active boolean DEFAULT 1,
		PRIMARY KEY(department_id)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_departments_faculty ON departments(faculty_id)")
		.execute(&mut *tx)
		.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS courses (
		course_id text NOT NULL,
		department_id text NOT NULL,
		code text NOT NULL,
		name text NOT NULL,
		active boolean DEFAULT 1,
		PRIMARY KEY(course_id)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_courses_department ON courses(department_id)")
		.execute(&mut *tx)
		.await?;

	// Student records
	//*****************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS students (
		student_id text NOT NULL,
		name text NOT NULL,
		faculty_id text,
		department_id text,
		program_name text,			-- legacy records carry the program name only
		risk_level char(1),			-- 'L' - Low, 'M' - Medium, 'H' - High, NULL - unclassified
		gpa real,
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(student_id)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_students_department ON students(department_id)")
		.execute(&mut *tx)
		.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_students_faculty ON students(faculty_id)")
		.execute(&mut *tx)
		.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS enrollments (
		student_id text NOT NULL,
		course_id text NOT NULL,
		semester text NOT NULL,
		academic_year text NOT NULL,
		status text NOT NULL DEFAULT 'ENROLLED',	-- 'ENROLLED', 'COMPLETED', 'DROPPED', 'FAILED'
		enrolled_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(student_id, course_id, semester, academic_year)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_enrollments_course ON enrollments(course_id)")
		.execute(&mut *tx)
		.await?;

	// Settings
	//**********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS settings (
		name text NOT NULL,
		value text,
		PRIMARY KEY(name)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Users
	//*******
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS users (
		user_id text NOT NULL,
		password_hash text,
		role text NOT NULL,
		faculty_id text,
		department_id text,
		assigned_course_ids text,		-- comma separated course ids
		assigned_student_ids text,		-- comma separated student ids
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(user_id)
	)",
	)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(())
}

// vim: ts=4
