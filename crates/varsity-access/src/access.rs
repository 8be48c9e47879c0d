//! Point-check primitive for single-record authorization.

use varsity::filter::Filter;
use varsity::prelude::*;
use varsity::principal::Principal;
use varsity::student_adapter::StudentAdapter;

use crate::directory::Directory;
use crate::resolver::resolve_scope;

/// Whether `record_id` is a member of the set selected by the principal's
/// resolved filter.
///
/// Used on detail/update/delete paths where materializing the full scoped
/// set would be wasteful; listing paths apply the filter as a bulk query
/// predicate instead. `Empty` and `MatchAll` short-circuit without a store
/// round trip; anything else becomes a targeted membership test.
pub async fn can_access_record(
	principal: &Principal,
	record_id: &str,
	directory: &Directory,
	students: &dyn StudentAdapter,
) -> VsResult<bool> {
	let filter = resolve_scope(principal, directory).await?;

	match filter {
		Filter::Empty => Ok(false),
		Filter::MatchAll => Ok(true),
		filter => students.student_matches(record_id, &filter).await,
	}
}


// vim: ts=4
