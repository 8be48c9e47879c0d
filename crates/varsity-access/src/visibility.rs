//! Field-visibility gates, independent of record-set scoping.
//!
//! Three orthogonal predicates, not a single permission bit. A role can pass
//! the aggregate axis and fail the individual axis (VC sees summarized
//! metrics but never drills into a student), or the reverse (Registry sees
//! every student but not the derived risk classification unless the runtime
//! override is on). Response-shaping code strips fields accordingly before
//! serialization.

use varsity::principal::Role;

/// Summarized metrics over the scoped record set.
pub fn can_view_aggregates(role: Role) -> bool {
	matches!(role, Role::Vc | Role::Dvc | Role::Dean | Role::Hod | Role::Registry)
}

/// Individual student identities.
pub fn can_view_individuals(role: Role) -> bool {
	!matches!(role, Role::Vc | Role::Dvc | Role::ItAdmin)
}

/// Computed risk classifications.
///
/// `registry_override` is the runtime-mutable toggle, read fresh from
/// configuration by the caller on every request. It elevates Registry only;
/// IT_ADMIN stays false no matter what.
pub fn can_view_risk_scores(role: Role, registry_override: bool) -> bool {
	match role {
		Role::ItAdmin => false,
		Role::Registry => registry_override,
		_ => true,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const ALL_ROLES: [Role; 8] = [
		Role::Vc,
		Role::Dvc,
		Role::Dean,
		Role::Hod,
		Role::Advisor,
		Role::Lecturer,
		Role::Registry,
		Role::ItAdmin,
	];

	#[test]
	fn test_aggregate_axis() {
		for role in ALL_ROLES {
			let expected =
				matches!(role, Role::Vc | Role::Dvc | Role::Dean | Role::Hod | Role::Registry);
			assert_eq!(can_view_aggregates(role), expected, "role {:?}", role);
		}
	}

	#[test]
	fn test_individual_axis() {
		for role in ALL_ROLES {
			let expected = !matches!(role, Role::Vc | Role::Dvc | Role::ItAdmin);
			assert_eq!(can_view_individuals(role), expected, "role {:?}", role);
		}
	}

	#[test]
	fn test_axes_are_orthogonal() {
		// VC: aggregates yes, individuals no. Advisor: the reverse.
		assert!(can_view_aggregates(Role::Vc) && !can_view_individuals(Role::Vc));
		assert!(!can_view_aggregates(Role::Advisor) && can_view_individuals(Role::Advisor));
	}

	#[test]
	fn test_risk_gate_registry_follows_override() {
		assert!(!can_view_risk_scores(Role::Registry, false));
		assert!(can_view_risk_scores(Role::Registry, true));
	}

	#[test]
	fn test_risk_gate_it_admin_immune_to_override() {
		assert!(!can_view_risk_scores(Role::ItAdmin, false));
		assert!(!can_view_risk_scores(Role::ItAdmin, true));
	}

	#[test]
	fn test_risk_gate_default_true_for_academic_roles() {
		for role in [Role::Vc, Role::Dvc, Role::Dean, Role::Hod, Role::Advisor, Role::Lecturer] {
			assert!(can_view_risk_scores(role, false), "role {:?}", role);
			assert!(can_view_risk_scores(role, true), "role {:?}", role);
		}
	}
}

// vim: ts=4
