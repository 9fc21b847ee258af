use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database, including the profile fields edited on the
/// settings page.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub approved: bool,
    pub job_title: Option<String>,
    pub phone: Option<String>,
    pub about_me: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub xing_url: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn sample_user() -> User {
        User {
            id: 1,
            email: "dave@example.com".into(),
            password_hash: "$argon2id$fake".into(),
            first_name: "Dave".into(),
            last_name: "Miller".into(),
            approved: true,
            job_title: None,
            phone: None,
            about_me: None,
            linkedin_url: None,
            github_url: None,
            xing_url: None,
            street: None,
            city: None,
            zip_code: None,
            created_at: datetime!(2025-01-01 00:00:00 UTC),
            updated_at: datetime!(2025-01-01 00:00:00 UTC),
        }
    }

    #[test]
    fn full_name_joins_first_and_last() {
        assert_eq!(sample_user().full_name(), "Dave Miller");
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let json = serde_json::to_string(&sample_user()).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("passwordHash"));
        assert!(json.contains("firstName"));
    }
}
