//! Role-scoped access policy engine for the Varsity platform.
//!
//! Given an authenticated [`Principal`](varsity::principal::Principal), the
//! engine decides (a) which student records that principal may query or
//! mutate — expressed as a request-scoped
//! [`Filter`](varsity::filter::Filter) interpreted by the storage adapter —
//! and (b) which response fields (individual identities, aggregates, risk
//! classifications) it may see.
//!
//! The single overriding invariant is fail-closed: every ambiguous, partial,
//! or erroring condition resolves toward denial. A missing scope attribute
//! resolves to zero access; a directory lookup failure fails the request; no
//! code path defaults to broader access on uncertainty.
//!
//! Nothing here persists between requests. Resolution is recomputed per
//! request from current directory state, so directory facts (active courses,
//! assignments) changed between requests are honored immediately.

pub mod access;
pub mod directory;
pub mod resolver;
pub mod visibility;

pub use access::can_access_record;
pub use directory::Directory;
pub use resolver::resolve_scope;
pub use visibility::{can_view_aggregates, can_view_individuals, can_view_risk_scores};

#[cfg(test)]
pub(crate) mod testing;

// vim: ts=4
