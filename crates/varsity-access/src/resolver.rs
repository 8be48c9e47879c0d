//! Scope resolution: role-dispatched mapping from principal to filter.

use varsity::filter::{FieldMatch, Filter, StudentField};
use varsity::prelude::*;
use varsity::principal::{Principal, Role};

use crate::directory::Directory;

/// Resolves the record-set filter for a principal.
///
/// Deterministic and side-effect-free apart from read-only directory
/// lookups. A missing mandatory scope attribute is a provisioning defect:
/// it resolves to [`Filter::Empty`] and logs at warning level, it is never
/// surfaced to the caller as an error. A directory lookup failure, by
/// contrast, fails the whole resolution — treating it as either "no
/// restriction" or "full access" would break the fail-closed invariant.
pub async fn resolve_scope(principal: &Principal, directory: &Directory) -> VsResult<Filter> {
	let filter = match principal.role {
		// Aggregate-only leadership roles: never see individual records,
		// regardless of any populated scope fields.
		Role::Vc | Role::Dvc => Filter::Empty,

		// Systems administration, not academic data.
		Role::ItAdmin => Filter::Empty,

		// Full read visibility for data-integrity auditing. Risk scores
		// stay suppressed unless the runtime override is enabled.
		Role::Registry => Filter::MatchAll,

		Role::Dean => match &principal.faculty_id {
			Some(faculty_id) => {
				let aliases = directory.aliases_for_faculty(faculty_id).await?;
				let mut terms =
					vec![FieldMatch::new(StudentField::FacultyId, faculty_id.clone())];
				terms.extend(
					aliases.into_iter().map(|a| FieldMatch::new(StudentField::ProgramName, a)),
				);
				Filter::by_fields_or(terms)
			}
			None => {
				warn!(user = %principal.user_id, "Dean without faculty scope, resolving to zero access");
				Filter::Empty
			}
		},

		Role::Hod => match (&principal.faculty_id, &principal.department_id) {
			(Some(_), Some(department_id)) => {
				let aliases = directory.aliases_for_department(department_id).await?;
				let mut terms =
					vec![FieldMatch::new(StudentField::DepartmentId, department_id.clone())];
				terms.extend(
					aliases.into_iter().map(|a| FieldMatch::new(StudentField::ProgramName, a)),
				);
				Filter::by_fields_or(terms)
			}
			_ => {
				warn!(user = %principal.user_id, "HOD without faculty/department scope, resolving to zero access");
				Filter::Empty
			}
		},

		// Explicit allow-list. An empty assignment list means zero access,
		// never an implicit escalation to "all".
		Role::Advisor => Filter::by_ids(principal.assigned_student_ids.to_vec()),

		Role::Lecturer => {
			if principal.faculty_id.is_none() || principal.department_id.is_none() {
				warn!(user = %principal.user_id, "Lecturer with incomplete organizational scope");
			}
			let validated =
				directory.validate_course_ids(&principal.assigned_course_ids).await?;
			Filter::by_courses(validated)
		}
	};

	debug!(user = %principal.user_id, role = %principal.role, filter = ?filter, "Resolved scope");
	Ok(filter)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{principal_with, StubDirectory};
	use std::sync::Arc;

	fn sample_directory() -> Directory {
		Directory::new(Arc::new(StubDirectory::sample()))
	}

	#[tokio::test]
	async fn test_leadership_and_it_admin_resolve_empty() {
		let directory = sample_directory();
		for role in [Role::Vc, Role::Dvc, Role::ItAdmin] {
			// Populated scope fields must not change the outcome.
			let mut principal = principal_with(role);
			principal.faculty_id = Some("F10".into());
			principal.department_id = Some("D201".into());
			principal.assigned_student_ids = Box::new(["s1".into()]);

			let filter = resolve_scope(&principal, &directory).await.unwrap();
			assert_eq!(filter, Filter::Empty, "role {:?}", role);
		}
	}

	#[tokio::test]
	async fn test_registry_resolves_match_all() {
		let directory = sample_directory();
		let principal = principal_with(Role::Registry);
		let filter = resolve_scope(&principal, &directory).await.unwrap();
		assert_eq!(filter, Filter::MatchAll);
	}

	#[tokio::test]
	async fn test_dean_gets_faculty_or_alias_terms() {
		let directory = sample_directory();
		let mut principal = principal_with(Role::Dean);
		principal.faculty_id = Some("F10".into());

		let filter = resolve_scope(&principal, &directory).await.unwrap();
		let Filter::ByFieldsOr(terms) = filter else { panic!("expected ByFieldsOr") };

		assert!(terms
			.iter()
			.any(|t| t.field == StudentField::FacultyId && t.value.as_ref() == "F10"));
		// Department names and codes under F10 appear as program aliases.
		for alias in ["Computer Science", "CS", "Mathematics", "MATH"] {
			assert!(
				terms
					.iter()
					.any(|t| t.field == StudentField::ProgramName && t.value.as_ref() == alias),
				"missing alias {}",
				alias
			);
		}
	}

	#[tokio::test]
	async fn test_dean_without_scope_resolves_empty() {
		let directory = sample_directory();
		let principal = principal_with(Role::Dean);
		let filter = resolve_scope(&principal, &directory).await.unwrap();
		assert_eq!(filter, Filter::Empty);
	}

	#[tokio::test]
	async fn test_hod_gets_department_or_alias_terms() {
		let directory = sample_directory();
		let mut principal = principal_with(Role::Hod);
		principal.faculty_id = Some("F10".into());
		principal.department_id = Some("D201".into());

		let filter = resolve_scope(&principal, &directory).await.unwrap();
		let Filter::ByFieldsOr(terms) = filter else { panic!("expected ByFieldsOr") };

		assert!(terms
			.iter()
			.any(|t| t.field == StudentField::DepartmentId && t.value.as_ref() == "D201"));
		for alias in ["Computer Science", "CS"] {
			assert!(
				terms
					.iter()
					.any(|t| t.field == StudentField::ProgramName && t.value.as_ref() == alias),
				"missing alias {}",
				alias
			);
		}
	}

	#[tokio::test]
	async fn test_hod_missing_either_scope_resolves_empty() {
		let directory = sample_directory();

		let mut only_faculty = principal_with(Role::Hod);
		only_faculty.faculty_id = Some("F10".into());
		assert_eq!(resolve_scope(&only_faculty, &directory).await.unwrap(), Filter::Empty);

		let mut only_department = principal_with(Role::Hod);
		only_department.department_id = Some("D201".into());
		assert_eq!(resolve_scope(&only_department, &directory).await.unwrap(), Filter::Empty);
	}

	#[tokio::test]
	async fn test_advisor_allow_list() {
		let directory = sample_directory();
		let mut principal = principal_with(Role::Advisor);
		principal.assigned_student_ids = Box::new(["s1".into(), "s2".into()]);

		let filter = resolve_scope(&principal, &directory).await.unwrap();
		let Filter::ByIds(ids) = filter else { panic!("expected ByIds") };
		assert_eq!(ids.len(), 2);
	}

	#[tokio::test]
	async fn test_advisor_empty_list_is_empty_not_all() {
		let directory = sample_directory();
		let principal = principal_with(Role::Advisor);
		let filter = resolve_scope(&principal, &directory).await.unwrap();
		assert_eq!(filter, Filter::Empty);
	}

	#[tokio::test]
	async fn test_lecturer_stale_course_id_contributes_nothing() {
		let directory = sample_directory();
		let mut principal = principal_with(Role::Lecturer);
		principal.faculty_id = Some("F10".into());
		principal.department_id = Some("D201".into());
		// C-RETIRED is deactivated; only C101 survives validation.
		principal.assigned_course_ids = Box::new(["C-RETIRED".into(), "C101".into()]);

		let filter = resolve_scope(&principal, &directory).await.unwrap();
		let Filter::ByCourses(ids) = filter else { panic!("expected ByCourses") };
		assert_eq!(ids.len(), 1);
		assert!(ids.contains("C101"));
	}

	#[tokio::test]
	async fn test_lecturer_all_stale_resolves_empty() {
		let directory = sample_directory();
		let mut principal = principal_with(Role::Lecturer);
		principal.assigned_course_ids = Box::new(["C-RETIRED".into(), "C-GONE".into()]);

		let filter = resolve_scope(&principal, &directory).await.unwrap();
		assert_eq!(filter, Filter::Empty);
	}

	#[tokio::test]
	async fn test_lookup_failure_fails_resolution() {
		let directory = Directory::new(Arc::new(StubDirectory::failing()));

		let mut dean = principal_with(Role::Dean);
		dean.faculty_id = Some("F10".into());
		assert!(resolve_scope(&dean, &directory).await.is_err());

		let mut lecturer = principal_with(Role::Lecturer);
		lecturer.assigned_course_ids = Box::new(["C101".into()]);
		assert!(resolve_scope(&lecturer, &directory).await.is_err());
	}

	#[tokio::test]
	async fn test_resolution_is_idempotent() {
		let directory = sample_directory();
		let mut principal = principal_with(Role::Hod);
		principal.faculty_id = Some("F10".into());
		principal.department_id = Some("D201".into());

		let first = resolve_scope(&principal, &directory).await.unwrap();
		let second = resolve_scope(&principal, &directory).await.unwrap();
		assert_eq!(first, second);
	}
}

// vim: ts=4
