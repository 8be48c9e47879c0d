//! App state type

use std::sync::Arc;

use crate::prelude::*;
use crate::{bootstrap, routes, settings};

use varsity_access::Directory;
use varsity_types::auth_adapter::AuthAdapter;
use varsity_types::directory_adapter::DirectoryAdapter;
use varsity_types::setting_adapter::SettingAdapter;
use varsity_types::student_adapter::StudentAdapter;
use varsity_types::worker::WorkerPool;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub worker: Arc<WorkerPool>,
	pub opts: AppBuilderOpts,

	pub auth_adapter: Arc<dyn AuthAdapter>,
	pub student_adapter: Arc<dyn StudentAdapter>,
	pub directory_adapter: Arc<dyn DirectoryAdapter>,
	/// Policy-engine view over the directory adapter.
	pub directory: Directory,
	pub settings: settings::service::SettingsService,
}

pub type App = Arc<AppState>;

pub struct Adapters {
	pub auth_adapter: Option<Arc<dyn AuthAdapter>>,
	pub student_adapter: Option<Arc<dyn StudentAdapter>>,
	pub directory_adapter: Option<Arc<dyn DirectoryAdapter>>,
	pub setting_adapter: Option<Arc<dyn SettingAdapter>>,
}

#[derive(Debug)]
pub struct AppBuilderOpts {
	listen: Box<str>,
	pub jwt_secret: Box<str>,
	pub admin_user: Box<str>,
	pub admin_password: Option<Box<str>>,
	pub seed_sample_graph: bool,
}

pub struct AppBuilder {
	opts: AppBuilderOpts,
	worker: Option<Arc<WorkerPool>>,
	adapters: Adapters,
}

impl AppBuilder {
	pub fn new() -> Self {
		AppBuilder {
			opts: AppBuilderOpts {
				listen: "127.0.0.1:8080".into(),
				jwt_secret: "".into(),
				admin_user: "admin".into(),
				admin_password: None,
				seed_sample_graph: false,
			},
			worker: None,
			adapters: Adapters {
				auth_adapter: None,
				student_adapter: None,
				directory_adapter: None,
				setting_adapter: None,
			},
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self { self.opts.listen = listen.into(); self }
	pub fn jwt_secret(&mut self, jwt_secret: impl Into<Box<str>>) -> &mut Self { self.opts.jwt_secret = jwt_secret.into(); self }
	pub fn admin_user(&mut self, admin_user: impl Into<Box<str>>) -> &mut Self { self.opts.admin_user = admin_user.into(); self }
	pub fn admin_password(&mut self, admin_password: impl Into<Box<str>>) -> &mut Self { self.opts.admin_password = Some(admin_password.into()); self }
	pub fn seed_sample_graph(&mut self, seed: bool) -> &mut Self { self.opts.seed_sample_graph = seed; self }
	pub fn worker(&mut self, worker: Arc<WorkerPool>) -> &mut Self { self.worker = Some(worker); self }

	// Adapters
	pub fn auth_adapter(&mut self, auth_adapter: Arc<dyn AuthAdapter>) -> &mut Self { self.adapters.auth_adapter = Some(auth_adapter); self }
	pub fn student_adapter(&mut self, student_adapter: Arc<dyn StudentAdapter>) -> &mut Self { self.adapters.student_adapter = Some(student_adapter); self }
	pub fn directory_adapter(&mut self, directory_adapter: Arc<dyn DirectoryAdapter>) -> &mut Self { self.adapters.directory_adapter = Some(directory_adapter); self }
	pub fn setting_adapter(&mut self, setting_adapter: Arc<dyn SettingAdapter>) -> &mut Self { self.adapters.setting_adapter = Some(setting_adapter); self }

	pub async fn run(self) -> VsResult<()> {
		tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.init();
		info!("Varsity v{}", VERSION);

		if self.opts.jwt_secret.is_empty() {
			return Err(Error::ConfigError("API_SECRET must be configured".into()));
		}

		let auth_adapter = self.adapters.auth_adapter.expect("FATAL: No auth adapter");
		let student_adapter = self.adapters.student_adapter.expect("FATAL: No student adapter");
		let directory_adapter =
			self.adapters.directory_adapter.expect("FATAL: No directory adapter");
		let setting_adapter = self.adapters.setting_adapter.expect("FATAL: No setting adapter");

		let registry = settings::init_registry()?;
		let app: App = Arc::new(AppState {
			worker: self.worker.expect("FATAL: No worker pool defined"),
			settings: settings::service::SettingsService::new(
				Arc::new(registry),
				setting_adapter,
			),
			directory: Directory::new(directory_adapter.clone()),
			opts: self.opts,

			auth_adapter,
			student_adapter,
			directory_adapter,
		});

		bootstrap::run(&app).await?;

		let router = routes::init(app.clone());
		let listener = tokio::net::TcpListener::bind(app.opts.listen.as_ref()).await?;
		info!("Listening on {}", app.opts.listen);
		axum::serve(listener, router).await?;

		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self { Self::new() }
}

// vim: ts=4
