use sqlx::PgPool;

use super::dto::ProfileUpdateRequest;
use super::repo_types::User;
use crate::error::AppError;

const USER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, approved, \
     job_title, phone, about_me, linkedin_url, github_url, xing_url, \
     street, city, zip_code, created_at, updated_at";

impl User {
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn exists_by_email(db: &PgPool, email: &str) -> anyhow::Result<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(db)
                .await?;
        Ok(exists)
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> anyhow::Result<Option<User>> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(db)
                .await?;
        Ok(user)
    }

    /// Insert a new user. Registration currently auto-approves; the store
    /// default is still false so an admin-managed flow can be restored.
    pub async fn create(
        db: &PgPool,
        email: &str,
        password_hash: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<User, AppError> {
        let result = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password_hash, first_name, last_name, approved) \
             VALUES ($1, $2, $3, $4, TRUE) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(email)
        .bind(password_hash)
        .bind(first_name)
        .bind(last_name)
        .fetch_one(db)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(e) if is_unique_violation(&e) => {
                Err(AppError::Conflict("email already registered".into()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Full overwrite of the profile fields, recomputing nothing else.
    pub async fn update_profile(
        db: &PgPool,
        id: i64,
        profile: &ProfileUpdateRequest,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET first_name = $2, last_name = $3, job_title = $4, phone = $5, \
             about_me = $6, linkedin_url = $7, github_url = $8, xing_url = $9, \
             street = $10, city = $11, zip_code = $12, updated_at = now() \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.job_title)
        .bind(&profile.phone)
        .bind(&profile.about_me)
        .bind(&profile.linkedin_url)
        .bind(&profile.github_url)
        .bind(&profile.xing_url)
        .bind(&profile.street)
        .bind(&profile.city)
        .bind(&profile.zip_code)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn update_password(db: &PgPool, id: i64, password_hash: &str) -> anyhow::Result<()> {
        sqlx::query("UPDATE users SET password_hash = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn approve(db: &PgPool, id: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET approved = TRUE, updated_at = now() \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn delete_by_id(db: &PgPool, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}
