//! SQLite-backed adapter for the Varsity platform.
//!
//! One pool, one adapter struct implementing the directory, student-store,
//! settings, and auth adapter traits. The interesting part is the
//! interpretation of the engine's opaque [`Filter`](varsity::filter::Filter)
//! into SQL in [`student`].

mod auth;
mod directory;
mod schema;
mod setting;
mod student;

use std::{path::Path, sync::Arc};

use sqlx::sqlite::{self, SqlitePool, SqliteRow};

use varsity::prelude::*;
use varsity::worker::WorkerPool;

// Helper functions
//******************
/// Appends one `col=value` term of a dynamic UPDATE for a Patch field.
/// Evaluates to the new has_updates flag.
macro_rules! push_patch {
	($query:expr, $has_updates:expr, $field:literal, $patch:expr) => {{
		match $patch {
			Patch::Undefined => $has_updates,
			Patch::Null => {
				if $has_updates {
					$query.push(", ");
				}
				$query.push(concat!($field, "=NULL"));
				true
			}
			Patch::Value(v) => {
				if $has_updates {
					$query.push(", ");
				}
				$query.push(concat!($field, "=")).push_bind(v);
				true
			}
		}
	}};
	($query:expr, $has_updates:expr, $field:literal, $patch:expr, |$v:ident| $convert:expr) => {{
		match $patch {
			Patch::Undefined => $has_updates,
			Patch::Null => {
				if $has_updates {
					$query.push(", ");
				}
				$query.push(concat!($field, "=NULL"));
				true
			}
			Patch::Value($v) => {
				if $has_updates {
					$query.push(", ");
				}
				$query.push(concat!($field, "=")).push_bind($convert);
				true
			}
		}
	}};
}

pub(crate) use push_patch;

pub(crate) fn parse_str_list(s: &str) -> Box<[Box<str>]> {
	s.split(',')
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.map(|s| s.to_owned().into_boxed_str())
		.collect::<Vec<_>>()
		.into_boxed_slice()
}

pub(crate) fn join_str_list(items: &[Box<str>]) -> String {
	items.join(",")
}

pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

pub(crate) fn map_res<T, F>(row: Result<SqliteRow, sqlx::Error>, f: F) -> VsResult<T>
where
	F: FnOnce(SqliteRow) -> Result<T, sqlx::Error>,
{
	match row {
		Ok(row) => f(row).inspect_err(inspect).map_err(|_| Error::DbError),
		Err(sqlx::Error::RowNotFound) => Err(Error::NotFound),
		Err(err) => {
			inspect(&err);
			Err(Error::DbError)
		}
	}
}

pub(crate) fn collect_res<T, F>(rows: Vec<SqliteRow>, f: F) -> VsResult<Vec<T>>
where
	F: Fn(SqliteRow) -> Result<T, sqlx::Error>,
{
	let mut items = Vec::with_capacity(rows.len());
	for row in rows {
		items.push(f(row).inspect_err(inspect).map_err(|_| Error::DbError)?);
	}
	Ok(items)
}

// Adapter //
//*********//
#[derive(Debug)]
pub struct MetaAdapterSqlite {
	db: SqlitePool,
	worker: Arc<WorkerPool>,
}

impl MetaAdapterSqlite {
	pub async fn new(worker: Arc<WorkerPool>, path: impl AsRef<Path>) -> VsResult<Self> {
		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| warn!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		schema::init_db(&db)
			.await
			.inspect_err(|err| warn!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		Ok(Self { db, worker })
	}

	pub(crate) fn db(&self) -> &SqlitePool {
		&self.db
	}

	pub(crate) fn worker(&self) -> &WorkerPool {
		&self.worker
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_str_list_trims_and_drops_empties() {
		let list = parse_str_list("C101, C102 ,,C103");
		assert_eq!(list.len(), 3);
		assert_eq!(list[0].as_ref(), "C101");
		assert_eq!(list[1].as_ref(), "C102");
	}

	#[test]
	fn test_parse_str_list_empty_string() {
		assert!(parse_str_list("").is_empty());
	}
}

// vim: ts=4
