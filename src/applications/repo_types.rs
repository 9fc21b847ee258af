use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};

use super::status::ApplicationStatus;

/// Job application record. `user_id` is the owner, set once at creation and
/// never transferred.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: i64,
    pub user_id: i64,
    pub company_name: String,
    pub position: String,
    pub status: ApplicationStatus,
    pub application_date: Date,
    pub deadline: Option<Date>,
    pub contact_person: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub notes: Option<String>,
    pub job_url: Option<String>,
    pub salary_expectation: Option<i32>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
