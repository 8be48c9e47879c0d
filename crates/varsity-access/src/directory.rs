//! Read-only lookups over the organizational graph.
//!
//! Wraps the directory adapter with the three queries the resolver needs:
//! legacy program-name alias sets at faculty and department granularity, and
//! revalidation of caller-supplied course ids against current active state.

use std::collections::BTreeSet;
use std::sync::Arc;

use varsity::directory_adapter::DirectoryAdapter;
use varsity::prelude::*;

#[derive(Clone, Debug)]
pub struct Directory {
	adapter: Arc<dyn DirectoryAdapter>,
}

impl Directory {
	pub fn new(adapter: Arc<dyn DirectoryAdapter>) -> Self {
		Self { adapter }
	}

	/// Names and codes of active departments under a faculty.
	///
	/// Historical student records carry free-text program names; matching
	/// them against this alias set is what keeps legacy records visible to
	/// their dean after foreign-key normalization.
	pub async fn aliases_for_faculty(&self, faculty_id: &str) -> VsResult<BTreeSet<Box<str>>> {
		let departments = self.adapter.list_active_departments(faculty_id).await?;
		let mut aliases = BTreeSet::new();
		for department in departments {
			aliases.insert(department.name);
			aliases.insert(department.code);
		}
		Ok(aliases)
	}

	/// Name and code of the department itself, used analogously for
	/// backward-compatible program matching at HOD granularity. A stale
	/// department reference yields an empty alias set, not an error; the
	/// resolver's direct foreign-key term still applies.
	pub async fn aliases_for_department(
		&self,
		department_id: &str,
	) -> VsResult<BTreeSet<Box<str>>> {
		let mut aliases = BTreeSet::new();
		if let Some(department) = self.adapter.read_department(department_id).await? {
			aliases.insert(department.name);
			aliases.insert(department.code);
		}
		Ok(aliases)
	}

	/// Drops candidate ids that no longer refer to active courses. A course
	/// id recorded on a principal may have been deactivated or reassigned
	/// since the principal's scope was last provisioned; derived access must
	/// not survive a stale reference.
	pub async fn validate_course_ids(
		&self,
		candidate_ids: &[Box<str>],
	) -> VsResult<BTreeSet<Box<str>>> {
		if candidate_ids.is_empty() {
			return Ok(BTreeSet::new());
		}
		self.adapter.list_active_course_ids(candidate_ids).await
	}
}


// vim: ts=4
