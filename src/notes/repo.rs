use sqlx::PgPool;

use super::repo_types::Note;

const NOTE_COLUMNS: &str = "id, user_id, title, content, color, created_at";

impl Note {
    pub async fn list_by_owner(db: &PgPool, owner_id: i64) -> anyhow::Result<Vec<Note>> {
        let rows = sqlx::query_as::<_, Note>(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes \
             WHERE user_id = $1 \
             ORDER BY created_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> anyhow::Result<Option<Note>> {
        let row =
            sqlx::query_as::<_, Note>(&format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = $1"))
                .bind(id)
                .fetch_optional(db)
                .await?;
        Ok(row)
    }

    pub async fn insert(
        db: &PgPool,
        owner_id: i64,
        title: &str,
        content: &str,
        color: &str,
    ) -> anyhow::Result<Note> {
        let row = sqlx::query_as::<_, Note>(&format!(
            "INSERT INTO notes (user_id, title, content, color) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {NOTE_COLUMNS}"
        ))
        .bind(owner_id)
        .bind(title)
        .bind(content)
        .bind(color)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn update(
        db: &PgPool,
        id: i64,
        title: &str,
        content: &str,
        color: &str,
    ) -> anyhow::Result<Note> {
        let row = sqlx::query_as::<_, Note>(&format!(
            "UPDATE notes SET title = $2, content = $3, color = $4 \
             WHERE id = $1 \
             RETURNING {NOTE_COLUMNS}"
        ))
        .bind(id)
        .bind(title)
        .bind(content)
        .bind(color)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn delete_by_id(db: &PgPool, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
