//! First-run seeding
//!
//! Provisions the IT admin account on an empty database, and optionally a
//! small organizational graph for demo deployments. Runs before the server
//! starts accepting requests; a populated database makes this a no-op.

use crate::prelude::*;

use varsity_types::auth_adapter::CreateUserData;
use varsity_types::directory_adapter::{Course, Department, Faculty};
use varsity_types::student_adapter::CreateStudentData;

pub async fn run(app: &App) -> VsResult<()> {
	match app.auth_adapter.read_user_auth(&app.opts.admin_user).await {
		Ok(_) => return Ok(()),
		Err(Error::NotFound) => {}
		Err(err) => return Err(err),
	}

	info!("Bootstrapping: provisioning admin user '{}'", app.opts.admin_user);
	let password = app.opts.admin_password.clone().ok_or_else(|| {
		Error::ConfigError("ADMIN_PASSWORD must be configured for first run".into())
	})?;

	app.auth_adapter
		.create_user(&CreateUserData {
			user_id: app.opts.admin_user.clone(),
			password,
			role: "IT_ADMIN".into(),
			faculty_id: None,
			department_id: None,
			assigned_course_ids: vec![],
			assigned_student_ids: vec![],
		})
		.await?;

	if app.opts.seed_sample_graph {
		seed_sample_graph(app).await?;
	}

	Ok(())
}

/// Demo data: one faculty, two departments, a handful of courses and
/// records, including a legacy record carrying a program name only.
async fn seed_sample_graph(app: &App) -> VsResult<()> {
	info!("Bootstrapping: seeding sample organizational graph");
	let dir = &app.directory_adapter;

	dir.create_faculty(&Faculty {
		faculty_id: "F10".into(),
		code: "SCI".into(),
		name: "Faculty of Science".into(),
	})
	.await?;

	dir.create_department(&Department {
		department_id: "D201".into(),
		faculty_id: "F10".into(),
		code: "CS".into(),
		name: "Computer Science".into(),
	})
	.await?;
	dir.create_department(&Department {
		department_id: "D202".into(),
		faculty_id: "F10".into(),
		code: "MATH".into(),
		name: "Mathematics".into(),
	})
	.await?;

	dir.create_course(&Course {
		course_id: "C101".into(),
		department_id: "D201".into(),
		code: "CS101".into(),
		name: "Intro to Programming".into(),
		active: true,
	})
	.await?;
	dir.create_course(&Course {
		course_id: "C201".into(),
		department_id: "D202".into(),
		code: "MATH201".into(),
		name: "Linear Algebra".into(),
		active: true,
	})
	.await?;

	let students = [
		("s1001", "Ada Lovelace", Some("D201"), None),
		("s1002", "Emmy Noether", Some("D202"), None),
		// Legacy record written before foreign-key normalization
		("s1003", "Charles Babbage", None, Some("Computer Science")),
	];
	for (student_id, name, department_id, program_name) in students {
		app.student_adapter
			.create_student(&CreateStudentData {
				student_id: student_id.into(),
				name: name.into(),
				faculty_id: Some("F10".into()),
				department_id: department_id.map(Into::into),
				program_name: program_name.map(Into::into),
			})
			.await?;
	}

	Ok(())
}

// vim: ts=4
