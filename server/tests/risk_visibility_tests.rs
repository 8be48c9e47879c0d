//! Risk-visibility override freshness tests
//!
//! The override is stored through the settings adapter and read back on
//! every decision, so a flip must be observable on the very next check.

use std::sync::Arc;

use tempfile::TempDir;

use varsity::settings::{self, service::SettingsService, SettingValue};
use varsity_access::can_view_risk_scores;
use varsity_meta_adapter_sqlite::MetaAdapterSqlite;
use varsity_types::error::Error;
use varsity_types::principal::Role;
use varsity_types::worker::WorkerPool;

async fn create_service() -> (SettingsService, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let worker = Arc::new(WorkerPool::new(1, 1));
	let adapter = Arc::new(
		MetaAdapterSqlite::new(worker, temp_dir.path().join("meta.db"))
			.await
			.expect("Failed to create adapter"),
	);
	let registry = settings::init_registry().expect("Should build registry");
	(SettingsService::new(Arc::new(registry), adapter), temp_dir)
}

#[tokio::test]
async fn test_override_flip_is_observed_on_next_check() {
	let (service, _temp) = create_service().await;

	// Default: off. Registry denied, everyone else per their role.
	let override_value =
		service.get_bool(settings::RISK_VISIBILITY_KEY).await.expect("Should read");
	assert!(!override_value);
	assert!(!can_view_risk_scores(Role::Registry, override_value));
	assert!(can_view_risk_scores(Role::Hod, override_value));

	// Admin flips the toggle; the next read reflects it without any restart
	// or cache horizon.
	service
		.set(settings::RISK_VISIBILITY_KEY, SettingValue::Bool(true), Role::ItAdmin)
		.await
		.expect("Should update");

	let override_value =
		service.get_bool(settings::RISK_VISIBILITY_KEY).await.expect("Should read");
	assert!(override_value);
	assert!(can_view_risk_scores(Role::Registry, override_value));
	// The override never elevates IT admins
	assert!(!can_view_risk_scores(Role::ItAdmin, override_value));
}

#[tokio::test]
async fn test_only_admin_can_flip_the_override() {
	let (service, _temp) = create_service().await;

	for role in [Role::Registry, Role::Hod, Role::Vc] {
		let err = service
			.set(settings::RISK_VISIBILITY_KEY, SettingValue::Bool(true), role)
			.await
			.expect_err("Non-admin should be denied");
		assert!(matches!(err, Error::PermissionDenied));
	}

	// Denied writes left the stored value untouched
	assert!(!service.get_bool(settings::RISK_VISIBILITY_KEY).await.expect("Should read"));
}

#[tokio::test]
async fn test_type_mismatch_is_rejected() {
	let (service, _temp) = create_service().await;

	let err = service
		.set(settings::RISK_VISIBILITY_KEY, SettingValue::Int(1), Role::ItAdmin)
		.await
		.expect_err("Wrong type should be rejected");
	assert!(matches!(err, Error::ValidationError(_)));
}

#[tokio::test]
async fn test_clearing_falls_back_to_default() {
	let (service, _temp) = create_service().await;

	service
		.set(settings::RISK_VISIBILITY_KEY, SettingValue::Bool(true), Role::ItAdmin)
		.await
		.expect("Should update");
	service
		.delete(settings::RISK_VISIBILITY_KEY, Role::ItAdmin)
		.await
		.expect("Should clear");

	assert!(!service.get_bool(settings::RISK_VISIBILITY_KEY).await.expect("Should read"));
}

// vim: ts=4
