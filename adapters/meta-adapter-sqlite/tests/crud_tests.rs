//! Adapter CRUD tests
//!
//! Student record lifecycle, directory lookups, settings persistence, and
//! credential handling.

use std::sync::Arc;

use tempfile::TempDir;

use varsity::auth_adapter::{AuthAdapter, CreateUserData};
use varsity::directory_adapter::{Course, Department, DirectoryAdapter, Faculty};
use varsity::prelude::*;
use varsity::setting_adapter::SettingAdapter;
use varsity::student_adapter::{
	CreateStudentData, Enrollment, EnrollmentStatus, StudentAdapter, UpdateStudentData,
};
use varsity::types::Patch;
use varsity::worker::WorkerPool;
use varsity_meta_adapter_sqlite::MetaAdapterSqlite;

async fn create_test_adapter() -> (MetaAdapterSqlite, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let worker = Arc::new(WorkerPool::new(1, 1));
	let adapter = MetaAdapterSqlite::new(worker, temp_dir.path().join("meta.db"))
		.await
		.expect("Failed to create adapter");
	(adapter, temp_dir)
}

async fn seed_graph(adapter: &MetaAdapterSqlite) {
	adapter
		.create_faculty(&Faculty {
			faculty_id: "F10".into(),
			code: "SCI".into(),
			name: "Faculty of Science".into(),
		})
		.await
		.expect("Should create faculty");
	adapter
		.create_department(&Department {
			department_id: "D201".into(),
			faculty_id: "F10".into(),
			code: "CS".into(),
			name: "Computer Science".into(),
		})
		.await
		.expect("Should create department");
	adapter
		.create_course(&Course {
			course_id: "C101".into(),
			department_id: "D201".into(),
			code: "CS101".into(),
			name: "Intro to Programming".into(),
			active: true,
		})
		.await
		.expect("Should create course");
	adapter
		.create_course(&Course {
			course_id: "C-RETIRED".into(),
			department_id: "D201".into(),
			code: "CS099".into(),
			name: "Punched Card Systems".into(),
			active: false,
		})
		.await
		.expect("Should create course");
}

// Students //
//**********//
#[tokio::test]
async fn test_create_and_read_student() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter
		.create_student(&CreateStudentData {
			student_id: "s1".into(),
			name: "Ada Lovelace".into(),
			faculty_id: Some("F10".into()),
			department_id: Some("D201".into()),
			program_name: None,
		})
		.await
		.expect("Should create student");

	let student = adapter.read_student("s1").await.expect("Should read student");
	assert_eq!(student.name.as_ref(), "Ada Lovelace");
	assert_eq!(student.department_id.as_deref(), Some("D201"));
	assert_eq!(student.risk_level, None);
	assert!(student.enrolled_course_ids.is_empty());
}

#[tokio::test]
async fn test_read_missing_student_is_not_found() {
	let (adapter, _temp) = create_test_adapter().await;
	let err = adapter.read_student("nope").await.expect_err("Should fail");
	assert!(matches!(err, Error::NotFound));
}

#[tokio::test]
async fn test_update_student_patch_semantics() {
	let (adapter, _temp) = create_test_adapter().await;
	adapter
		.create_student(&CreateStudentData {
			student_id: "s1".into(),
			name: "Ada".into(),
			faculty_id: None,
			department_id: None,
			program_name: Some("Computer Science".into()),
		})
		.await
		.expect("Should create student");

	// Value sets, Null clears, Undefined leaves alone
	adapter
		.update_student(
			"s1",
			&UpdateStudentData {
				name: Patch::Value("Ada Lovelace".into()),
				department_id: Patch::Value("D201".into()),
				program_name: Patch::Null,
				..Default::default()
			},
		)
		.await
		.expect("Should update student");

	let student = adapter.read_student("s1").await.expect("Should read student");
	assert_eq!(student.name.as_ref(), "Ada Lovelace");
	assert_eq!(student.department_id.as_deref(), Some("D201"));
	assert_eq!(student.program_name, None);
}

#[tokio::test]
async fn test_update_missing_student_is_not_found() {
	let (adapter, _temp) = create_test_adapter().await;
	let err = adapter
		.update_student("nope", &UpdateStudentData {
			name: Patch::Value("X".into()),
			..Default::default()
		})
		.await
		.expect_err("Should fail");
	assert!(matches!(err, Error::NotFound));
}

#[tokio::test]
async fn test_delete_student() {
	let (adapter, _temp) = create_test_adapter().await;
	adapter
		.create_student(&CreateStudentData {
			student_id: "s1".into(),
			name: "Ada".into(),
			faculty_id: None,
			department_id: None,
			program_name: None,
		})
		.await
		.expect("Should create student");

	adapter.delete_student("s1").await.expect("Should delete student");
	let err = adapter.read_student("s1").await.expect_err("Should be gone");
	assert!(matches!(err, Error::NotFound));

	let err = adapter.delete_student("s1").await.expect_err("Second delete should fail");
	assert!(matches!(err, Error::NotFound));
}

#[tokio::test]
async fn test_delete_student_removes_enrollments() {
	let (adapter, _temp) = create_test_adapter().await;
	adapter
		.create_student(&CreateStudentData {
			student_id: "s1".into(),
			name: "Ada".into(),
			faculty_id: None,
			department_id: None,
			program_name: None,
		})
		.await
		.expect("Should create student");
	adapter
		.add_enrollment(&Enrollment {
			student_id: "s1".into(),
			course_id: "C101".into(),
			semester: "S1".into(),
			academic_year: "2025/26".into(),
			status: EnrollmentStatus::Enrolled,
		})
		.await
		.expect("Should add enrollment");

	adapter.delete_student("s1").await.expect("Should delete student");

	// No orphaned enrollment rows survive the delete
	let enrollments = adapter.list_enrollments("s1").await.expect("Should list");
	assert!(enrollments.is_empty());
}

// Directory //
//***********//
#[tokio::test]
async fn test_directory_lookups() {
	let (adapter, _temp) = create_test_adapter().await;
	seed_graph(&adapter).await;

	let faculties = adapter.list_faculties().await.expect("Should list faculties");
	assert_eq!(faculties.len(), 1);
	assert_eq!(faculties[0].code.as_ref(), "SCI");

	let departments =
		adapter.list_active_departments("F10").await.expect("Should list departments");
	assert_eq!(departments.len(), 1);
	assert_eq!(departments[0].name.as_ref(), "Computer Science");

	let department = adapter.read_department("D201").await.expect("Should read department");
	assert_eq!(department.expect("Should exist").code.as_ref(), "CS");
	assert!(adapter.read_department("D999").await.expect("Should read").is_none());

	let courses = adapter.list_active_courses("D201").await.expect("Should list courses");
	assert_eq!(courses.len(), 1);
	assert_eq!(courses[0].course_id.as_ref(), "C101");
}

#[tokio::test]
async fn test_course_revalidation_drops_inactive_and_unknown() {
	let (adapter, _temp) = create_test_adapter().await;
	seed_graph(&adapter).await;

	let candidates: Vec<Box<str>> =
		vec!["C101".into(), "C-RETIRED".into(), "C-UNKNOWN".into()];
	let active =
		adapter.list_active_course_ids(&candidates).await.expect("Should revalidate");

	assert_eq!(active.len(), 1);
	assert!(active.contains("C101"));
}

// Settings //
//**********//
#[tokio::test]
async fn test_setting_roundtrip_and_delete() {
	let (adapter, _temp) = create_test_adapter().await;

	assert!(adapter.read_setting("registry.risk_visibility").await.expect("Should read").is_none());

	adapter
		.update_setting("registry.risk_visibility", Some(serde_json::json!(true)))
		.await
		.expect("Should update setting");
	assert_eq!(
		adapter.read_setting("registry.risk_visibility").await.expect("Should read"),
		Some(serde_json::json!(true))
	);

	// None deletes the override
	adapter
		.update_setting("registry.risk_visibility", None)
		.await
		.expect("Should delete setting");
	assert!(adapter.read_setting("registry.risk_visibility").await.expect("Should read").is_none());
}

#[tokio::test]
async fn test_list_settings_by_prefix() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter
		.update_setting("registry.risk_visibility", Some(serde_json::json!(false)))
		.await
		.expect("Should update");
	adapter
		.update_setting("ui.theme", Some(serde_json::json!("dark")))
		.await
		.expect("Should update");

	let all = adapter.list_settings(None).await.expect("Should list");
	assert_eq!(all.len(), 2);

	let registry = adapter.list_settings(Some("registry.")).await.expect("Should list");
	assert_eq!(registry.len(), 1);
	assert!(registry.contains_key("registry.risk_visibility"));
}

// Users //
//*******//
#[tokio::test]
async fn test_create_user_and_check_password() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter
		.create_user(&CreateUserData {
			user_id: "hod-cs".into(),
			password: "s3cret".into(),
			role: "HOD".into(),
			faculty_id: Some("F10".into()),
			department_id: Some("D201".into()),
			assigned_course_ids: vec![],
			assigned_student_ids: vec![],
		})
		.await
		.expect("Should create user");

	let user = adapter
		.check_user_password("hod-cs", "s3cret")
		.await
		.expect("Should verify password");
	assert_eq!(user.role.as_ref(), "HOD");
	assert_eq!(user.department_id.as_deref(), Some("D201"));

	let err = adapter
		.check_user_password("hod-cs", "wrong")
		.await
		.expect_err("Bad password should fail");
	assert!(matches!(err, Error::PermissionDenied));

	let err = adapter
		.check_user_password("nobody", "s3cret")
		.await
		.expect_err("Unknown user should fail");
	assert!(matches!(err, Error::PermissionDenied));
}

#[tokio::test]
async fn test_assigned_id_lists_roundtrip() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter
		.create_user(&CreateUserData {
			user_id: "lect-1".into(),
			password: "pw".into(),
			role: "LECTURER".into(),
			faculty_id: Some("F10".into()),
			department_id: Some("D201".into()),
			assigned_course_ids: vec!["C101".into(), "C102".into()],
			assigned_student_ids: vec![],
		})
		.await
		.expect("Should create user");

	let user = adapter.read_user_auth("lect-1").await.expect("Should read user");
	assert_eq!(user.assigned_course_ids.len(), 2);
	assert_eq!(user.assigned_course_ids[0].as_ref(), "C101");
	assert!(user.assigned_student_ids.is_empty());
}

#[tokio::test]
async fn test_update_user_password() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter
		.create_user(&CreateUserData {
			user_id: "adv-1".into(),
			password: "old".into(),
			role: "ADVISOR".into(),
			faculty_id: None,
			department_id: None,
			assigned_course_ids: vec![],
			assigned_student_ids: vec!["s1".into()],
		})
		.await
		.expect("Should create user");

	adapter.update_user_password("adv-1", "new").await.expect("Should update password");

	assert!(adapter.check_user_password("adv-1", "new").await.is_ok());
	assert!(adapter.check_user_password("adv-1", "old").await.is_err());
}

// vim: ts=4
