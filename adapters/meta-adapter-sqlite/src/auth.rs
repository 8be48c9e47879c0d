//! User credential storage and password verification
//!
//! Bcrypt runs on the worker pool so it never blocks the async runtime:
//! login verification on the immediate queue, provisioning hashes on the
//! background queue.

use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row};

use crate::{inspect, join_str_list, map_res, parse_str_list, MetaAdapterSqlite};
use varsity::auth_adapter::{AuthAdapter, AuthUser, CreateUserData};
use varsity::prelude::*;

const BCRYPT_COST: u32 = 10;

fn user_from_row(row: &SqliteRow) -> Result<AuthUser, sqlx::Error> {
	let courses: Option<String> = row.try_get("assigned_course_ids")?;
	let students: Option<String> = row.try_get("assigned_student_ids")?;

	Ok(AuthUser {
		user_id: row.try_get("user_id")?,
		role: row.try_get("role")?,
		faculty_id: row.try_get("faculty_id")?,
		department_id: row.try_get("department_id")?,
		assigned_course_ids: courses.as_deref().map(parse_str_list).unwrap_or_default(),
		assigned_student_ids: students.as_deref().map(parse_str_list).unwrap_or_default(),
	})
}

#[async_trait]
impl AuthAdapter for MetaAdapterSqlite {
	async fn check_user_password(&self, user_id: &str, password: &str) -> VsResult<AuthUser> {
		let res = sqlx::query(
			"SELECT user_id, password_hash, role, faculty_id, department_id,
			assigned_course_ids, assigned_student_ids FROM users WHERE user_id=?",
		)
		.bind(user_id)
		.fetch_one(self.db())
		.await;

		let (user, hash) = map_res(res, |row| {
			let hash: Option<Box<str>> = row.try_get("password_hash")?;
			Ok((user_from_row(&row)?, hash))
		})
		// An unknown user is indistinguishable from a bad password
		.map_err(|_| Error::PermissionDenied)?;

		let hash = hash.ok_or(Error::PermissionDenied)?;
		let password = password.to_owned();

		let valid = self
			.worker()
			.try_run_immed(move || {
				bcrypt::verify(&password, &hash).map_err(|_| Error::PermissionDenied)
			})
			.await?;

		if valid {
			Ok(user)
		} else {
			Err(Error::PermissionDenied)
		}
	}

	async fn read_user_auth(&self, user_id: &str) -> VsResult<AuthUser> {
		let res = sqlx::query(
			"SELECT user_id, role, faculty_id, department_id,
			assigned_course_ids, assigned_student_ids FROM users WHERE user_id=?",
		)
		.bind(user_id)
		.fetch_one(self.db())
		.await;

		map_res(res, |row| user_from_row(&row))
	}

	async fn create_user(&self, data: &CreateUserData) -> VsResult<()> {
		let password = data.password.to_string();
		let hash = self
			.worker()
			.try_run(move || {
				bcrypt::hash(&password, BCRYPT_COST).map_err(|err| {
					error!("bcrypt: {:?}", err);
					Error::Internal("password hashing failed".into())
				})
			})
			.await?;

		sqlx::query(
			"INSERT INTO users (user_id, password_hash, role, faculty_id, department_id,
			assigned_course_ids, assigned_student_ids, created_at)
			VALUES (?, ?, ?, ?, ?, ?, ?, unixepoch())",
		)
		.bind(data.user_id.as_ref())
		.bind(hash)
		.bind(data.role.as_ref())
		.bind(data.faculty_id.as_deref())
		.bind(data.department_id.as_deref())
		.bind(join_str_list(&data.assigned_course_ids))
		.bind(join_str_list(&data.assigned_student_ids))
		.execute(self.db())
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

		Ok(())
	}

	async fn update_user_password(&self, user_id: &str, password: &str) -> VsResult<()> {
		let password = password.to_owned();
		let hash = self
			.worker()
			.try_run(move || {
				bcrypt::hash(&password, BCRYPT_COST).map_err(|err| {
					error!("bcrypt: {:?}", err);
					Error::Internal("password hashing failed".into())
				})
			})
			.await?;

		let res = sqlx::query("UPDATE users SET password_hash=? WHERE user_id=?")
			.bind(hash)
			.bind(user_id)
			.execute(self.db())
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

		if res.rows_affected() == 0 {
			return Err(Error::NotFound);
		}

		Ok(())
	}
}

// vim: ts=4
