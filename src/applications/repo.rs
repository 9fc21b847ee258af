use sqlx::PgPool;
use time::Date;

use super::dto::ApplicationInput;
use super::repo_types::Application;
use super::status::ApplicationStatus;

const APPLICATION_COLUMNS: &str = "id, user_id, company_name, position, status, \
     application_date, deadline, contact_person, contact_email, contact_phone, \
     notes, job_url, salary_expectation, created_at, updated_at";

impl Application {
    pub async fn list_by_owner(db: &PgPool, owner_id: i64) -> anyhow::Result<Vec<Application>> {
        let rows = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications \
             WHERE user_id = $1 \
             ORDER BY application_date DESC"
        ))
        .bind(owner_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn list_recent(
        db: &PgPool,
        owner_id: i64,
        limit: i64,
    ) -> anyhow::Result<Vec<Application>> {
        let rows = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications \
             WHERE user_id = $1 \
             ORDER BY application_date DESC \
             LIMIT $2"
        ))
        .bind(owner_id)
        .bind(limit)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_owner_and_status(
        db: &PgPool,
        owner_id: i64,
        status: ApplicationStatus,
    ) -> anyhow::Result<Vec<Application>> {
        let rows = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications \
             WHERE user_id = $1 AND status = $2 \
             ORDER BY application_date DESC"
        ))
        .bind(owner_id)
        .bind(status)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Case-insensitive substring match on the company name.
    pub async fn search_by_company(
        db: &PgPool,
        owner_id: i64,
        term: &str,
    ) -> anyhow::Result<Vec<Application>> {
        let rows = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications \
             WHERE user_id = $1 AND company_name ILIKE '%' || $2 || '%' \
             ORDER BY application_date DESC"
        ))
        .bind(owner_id)
        .bind(term)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn list_deadline_before(
        db: &PgPool,
        owner_id: i64,
        date: Date,
    ) -> anyhow::Result<Vec<Application>> {
        let rows = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications \
             WHERE user_id = $1 AND deadline IS NOT NULL AND deadline < $2 \
             ORDER BY deadline ASC"
        ))
        .bind(owner_id)
        .bind(date)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_owner_excluding(
        db: &PgPool,
        owner_id: i64,
        excluded: &[ApplicationStatus],
    ) -> anyhow::Result<Vec<Application>> {
        let rows = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications \
             WHERE user_id = $1 AND status <> ALL($2) \
             ORDER BY application_date DESC"
        ))
        .bind(owner_id)
        .bind(excluded)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn count_by_owner(db: &PgPool, owner_id: i64) -> anyhow::Result<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM applications WHERE user_id = $1")
                .bind(owner_id)
                .fetch_one(db)
                .await?;
        Ok(count)
    }

    pub async fn count_by_owner_and_status(
        db: &PgPool,
        owner_id: i64,
        status: ApplicationStatus,
    ) -> anyhow::Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM applications WHERE user_id = $1 AND status = $2",
        )
        .bind(owner_id)
        .bind(status)
        .fetch_one(db)
        .await?;
        Ok(count)
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> anyhow::Result<Option<Application>> {
        let row = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn insert(
        db: &PgPool,
        owner_id: i64,
        input: &ApplicationInput,
        status: ApplicationStatus,
        application_date: Date,
    ) -> anyhow::Result<Application> {
        let row = sqlx::query_as::<_, Application>(&format!(
            "INSERT INTO applications \
             (user_id, company_name, position, status, application_date, deadline, \
              contact_person, contact_email, contact_phone, notes, job_url, salary_expectation) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(owner_id)
        .bind(&input.company_name)
        .bind(&input.position)
        .bind(status)
        .bind(application_date)
        .bind(input.deadline)
        .bind(&input.contact_person)
        .bind(&input.contact_email)
        .bind(&input.contact_phone)
        .bind(&input.notes)
        .bind(&input.job_url)
        .bind(input.salary_expectation)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    /// Overwrites every mutable field; there are no PATCH semantics.
    pub async fn update(
        db: &PgPool,
        id: i64,
        input: &ApplicationInput,
        status: ApplicationStatus,
        application_date: Date,
    ) -> anyhow::Result<Application> {
        let row = sqlx::query_as::<_, Application>(&format!(
            "UPDATE applications SET company_name = $2, position = $3, status = $4, \
             application_date = $5, deadline = $6, contact_person = $7, contact_email = $8, \
             contact_phone = $9, notes = $10, job_url = $11, salary_expectation = $12, \
             updated_at = now() \
             WHERE id = $1 \
             RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.company_name)
        .bind(&input.position)
        .bind(status)
        .bind(application_date)
        .bind(input.deadline)
        .bind(&input.contact_person)
        .bind(&input.contact_email)
        .bind(&input.contact_phone)
        .bind(&input.notes)
        .bind(&input.job_url)
        .bind(input.salary_expectation)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn set_status(
        db: &PgPool,
        id: i64,
        status: ApplicationStatus,
    ) -> anyhow::Result<Application> {
        let row = sqlx::query_as::<_, Application>(&format!(
            "UPDATE applications SET status = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn delete_by_id(db: &PgPool, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
