use sqlx::PgPool;
use time::OffsetDateTime;

use super::repo_types::Appointment;

const APPOINTMENT_COLUMNS: &str = "id, user_id, title, description, location, participants, \
     category, start_time, end_time, created_at";

impl Appointment {
    pub async fn list_by_owner(db: &PgPool, owner_id: i64) -> anyhow::Result<Vec<Appointment>> {
        let rows = sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments \
             WHERE user_id = $1 \
             ORDER BY start_time ASC"
        ))
        .bind(owner_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> anyhow::Result<Option<Appointment>> {
        let row = sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        db: &PgPool,
        owner_id: i64,
        title: &str,
        description: Option<&str>,
        location: Option<&str>,
        participants: Option<&str>,
        category: Option<&str>,
        start_time: OffsetDateTime,
        end_time: OffsetDateTime,
    ) -> anyhow::Result<Appointment> {
        let row = sqlx::query_as::<_, Appointment>(&format!(
            "INSERT INTO appointments \
             (user_id, title, description, location, participants, category, start_time, end_time) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {APPOINTMENT_COLUMNS}"
        ))
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .bind(location)
        .bind(participants)
        .bind(category)
        .bind(start_time)
        .bind(end_time)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        db: &PgPool,
        id: i64,
        title: &str,
        description: Option<&str>,
        location: Option<&str>,
        participants: Option<&str>,
        category: Option<&str>,
        start_time: OffsetDateTime,
        end_time: OffsetDateTime,
    ) -> anyhow::Result<Appointment> {
        let row = sqlx::query_as::<_, Appointment>(&format!(
            "UPDATE appointments SET title = $2, description = $3, location = $4, \
             participants = $5, category = $6, start_time = $7, end_time = $8 \
             WHERE id = $1 \
             RETURNING {APPOINTMENT_COLUMNS}"
        ))
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(location)
        .bind(participants)
        .bind(category)
        .bind(start_time)
        .bind(end_time)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn delete_by_id(db: &PgPool, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
