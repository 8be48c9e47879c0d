use std::{env, path, process, sync::Arc};

use varsity::AppBuilder;
use varsity_meta_adapter_sqlite::MetaAdapterSqlite;
use varsity_types::worker::WorkerPool;

pub struct Config {
	pub listen: String,
	pub db_dir: path::PathBuf,
	pub api_secret: Option<String>,
	pub admin_user: String,
	pub admin_password: Option<String>,
	pub seed_sample: bool,
}

impl Config {
	fn from_env() -> Self {
		Config {
			listen: env::var("LISTEN").unwrap_or("127.0.0.1:8080".to_string()),
			db_dir: path::PathBuf::from(env::var("DB_DIR").unwrap_or("./data".to_string())),
			api_secret: env::var("API_SECRET").ok(),
			admin_user: env::var("ADMIN_USER").unwrap_or("admin".to_string()),
			admin_password: env::var("ADMIN_PASSWORD").ok(),
			seed_sample: env::var("SEED_SAMPLE").map(|v| v == "1").unwrap_or(false),
		}
	}
}

#[tokio::main]
async fn main() {
	let config = Config::from_env();

	if let Err(err) = run(config).await {
		eprintln!("FATAL: {}", err);
		process::exit(1);
	}
}

async fn run(config: Config) -> varsity_types::error::VsResult<()> {
	tokio::fs::create_dir_all(&config.db_dir).await?;

	let worker = Arc::new(WorkerPool::new(2, 2));
	let adapter =
		Arc::new(MetaAdapterSqlite::new(worker.clone(), config.db_dir.join("varsity.db")).await?);

	let mut builder = AppBuilder::new();
	builder
		.listen(config.listen)
		.admin_user(config.admin_user)
		.seed_sample_graph(config.seed_sample)
		.worker(worker)
		.auth_adapter(adapter.clone())
		.student_adapter(adapter.clone())
		.directory_adapter(adapter.clone())
		.setting_adapter(adapter);
	if let Some(api_secret) = config.api_secret {
		builder.jwt_secret(api_secret);
	}
	if let Some(admin_password) = config.admin_password {
		builder.admin_password(admin_password);
	}

	builder.run().await
}

// vim: ts=4
