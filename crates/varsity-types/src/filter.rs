//! Record-set filters produced by the access-policy engine.
//!
//! A `Filter` is an opaque, request-scoped predicate describing which student
//! records a principal may access. It is interpreted by the storage adapter
//! into a concrete query and is never persisted or cached across requests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Student record columns a `ByFieldsOr` filter may match on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudentField {
	#[serde(rename = "facultyId")]
	FacultyId,
	#[serde(rename = "departmentId")]
	DepartmentId,
	#[serde(rename = "programName")]
	ProgramName,
}

/// One field/value equality term of a `ByFieldsOr` filter.
///
/// `ProgramName` terms compare case-insensitively: legacy records carry
/// free-text program names written before foreign-key normalization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMatch {
	pub field: StudentField,
	pub value: Box<str>,
}

impl FieldMatch {
	pub fn new(field: StudentField, value: impl Into<Box<str>>) -> Self {
		Self { field, value: value.into() }
	}
}

/// The record-set predicate variants.
///
/// `Empty` is an explicit variant: an empty id list never means "no
/// restriction", and no storage layer is trusted to interpret an empty
/// IN-list predicate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Filter {
	/// Full read visibility (Registry data-integrity auditing).
	MatchAll,
	/// Zero access. The fail-closed default.
	Empty,
	/// Records whose id is in the set (Advisor assignments).
	ByIds(BTreeSet<Box<str>>),
	/// Records with an active enrollment in any of the courses (Lecturer).
	ByCourses(BTreeSet<Box<str>>),
	/// Records matching any one of the field terms (Dean/Hod dual path).
	ByFieldsOr(Vec<FieldMatch>),
}

impl Filter {
	pub fn is_empty(&self) -> bool {
		matches!(self, Filter::Empty)
	}

	pub fn is_match_all(&self) -> bool {
		matches!(self, Filter::MatchAll)
	}

	/// Builds `ByIds`, collapsing an empty set to `Empty`.
	pub fn by_ids<I, S>(ids: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<Box<str>>,
	{
		let set: BTreeSet<Box<str>> = ids.into_iter().map(Into::into).collect();
		if set.is_empty() {
			Filter::Empty
		} else {
			Filter::ByIds(set)
		}
	}

	/// Builds `ByCourses`, collapsing an empty set to `Empty`.
	pub fn by_courses(ids: BTreeSet<Box<str>>) -> Self {
		if ids.is_empty() {
			Filter::Empty
		} else {
			Filter::ByCourses(ids)
		}
	}

	/// Builds `ByFieldsOr`, collapsing an empty term list to `Empty`.
	pub fn by_fields_or(terms: Vec<FieldMatch>) -> Self {
		if terms.is_empty() {
			Filter::Empty
		} else {
			Filter::ByFieldsOr(terms)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_ids_collapse_to_empty() {
		assert_eq!(Filter::by_ids(Vec::<&str>::new()), Filter::Empty);
		assert_eq!(Filter::by_courses(BTreeSet::new()), Filter::Empty);
		assert_eq!(Filter::by_fields_or(vec![]), Filter::Empty);
	}

	#[test]
	fn test_by_ids_dedups() {
		let f = Filter::by_ids(["s1", "s1", "s2"]);
		match f {
			Filter::ByIds(set) => assert_eq!(set.len(), 2),
			other => panic!("expected ByIds, got {:?}", other),
		}
	}
}

// vim: ts=4
