use sqlx::PgPool;
use time::{Date, Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use super::dto::{ApplicationInput, StatusCounts};
use super::repo_types::Application;
use super::status::ApplicationStatus;
use crate::error::AppError;

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

fn status_or_default(status: Option<ApplicationStatus>) -> ApplicationStatus {
    status.unwrap_or(ApplicationStatus::Draft)
}

fn date_or_today(date: Option<Date>) -> Date {
    date.unwrap_or_else(today)
}

/// Ownership gate for mutating operations. The caller already knows the id
/// exists, so a mismatch is an explicit Forbidden rather than NotFound.
fn ensure_owner(application: &Application, owner_id: i64) -> Result<(), AppError> {
    if application.user_id != owner_id {
        warn!(
            application_id = application.id,
            owner_id = application.user_id,
            caller_id = owner_id,
            "ownership check failed"
        );
        return Err(AppError::Forbidden("not allowed"));
    }
    Ok(())
}

fn validate(input: &ApplicationInput) -> Result<(), AppError> {
    fn bounded(value: &Option<String>, max: usize, field: &str) -> Result<(), AppError> {
        match value {
            Some(v) if v.len() > max => Err(AppError::Validation(format!(
                "{field} must be at most {max} characters"
            ))),
            _ => Ok(()),
        }
    }

    if input.company_name.trim().is_empty() {
        return Err(AppError::Validation("company name is required".into()));
    }
    if input.company_name.len() > 200 {
        return Err(AppError::Validation(
            "company name must be at most 200 characters".into(),
        ));
    }
    if input.position.trim().is_empty() {
        return Err(AppError::Validation("position is required".into()));
    }
    if input.position.len() > 200 {
        return Err(AppError::Validation(
            "position must be at most 200 characters".into(),
        ));
    }
    bounded(&input.contact_person, 100, "contact person")?;
    bounded(&input.contact_email, 100, "contact email")?;
    bounded(&input.contact_phone, 100, "contact phone")?;
    bounded(&input.notes, 2000, "notes")?;
    bounded(&input.job_url, 500, "job url")?;
    Ok(())
}

pub async fn create_application(
    db: &PgPool,
    input: &ApplicationInput,
    owner_id: i64,
) -> Result<Application, AppError> {
    validate(input)?;

    let status = status_or_default(input.status);
    let application_date = date_or_today(input.application_date);

    let saved = Application::insert(db, owner_id, input, status, application_date).await?;
    info!(
        application_id = saved.id,
        owner_id,
        company = %saved.company_name,
        "application created"
    );
    Ok(saved)
}

/// Full-overwrite update; absent status/date fall back to the same defaults
/// as creation.
pub async fn update_application(
    db: &PgPool,
    id: i64,
    input: &ApplicationInput,
    owner_id: i64,
) -> Result<Application, AppError> {
    validate(input)?;

    let existing = Application::find_by_id(db, id)
        .await?
        .ok_or(AppError::NotFound("application"))?;
    ensure_owner(&existing, owner_id)?;

    let status = status_or_default(input.status);
    let application_date = date_or_today(input.application_date);

    let updated = Application::update(db, id, input, status, application_date).await?;
    info!(application_id = id, owner_id, "application updated");
    Ok(updated)
}

pub async fn delete_application(db: &PgPool, id: i64, owner_id: i64) -> Result<(), AppError> {
    let existing = Application::find_by_id(db, id)
        .await?
        .ok_or(AppError::NotFound("application"))?;
    ensure_owner(&existing, owner_id)?;

    Application::delete_by_id(db, id).await?;
    info!(application_id = id, owner_id, "application deleted");
    Ok(())
}

/// Read path: an application owned by someone else is indistinguishable from
/// a missing one, so other users' ids cannot be probed.
pub async fn get_application(
    db: &PgPool,
    id: i64,
    owner_id: i64,
) -> Result<Application, AppError> {
    Application::find_by_id(db, id)
        .await?
        .filter(|a| a.user_id == owner_id)
        .ok_or(AppError::NotFound("application"))
}

/// Overwrites only the status. Any target status is accepted; the workflow
/// does not restrict transitions.
pub async fn update_status(
    db: &PgPool,
    id: i64,
    new_status: ApplicationStatus,
    owner_id: i64,
) -> Result<Application, AppError> {
    let existing = Application::find_by_id(db, id)
        .await?
        .ok_or(AppError::NotFound("application"))?;
    ensure_owner(&existing, owner_id)?;

    let updated = Application::set_status(db, id, new_status).await?;
    info!(
        application_id = id,
        owner_id,
        status = new_status.display_name(),
        "status updated"
    );
    Ok(updated)
}

pub async fn list_applications(
    db: &PgPool,
    owner_id: i64,
    status: Option<ApplicationStatus>,
    search: Option<&str>,
) -> Result<Vec<Application>, AppError> {
    debug!(owner_id, ?status, ?search, "listing applications");
    let rows = match (status, search) {
        (Some(status), _) => Application::list_by_owner_and_status(db, owner_id, status).await?,
        (None, Some(term)) if !term.is_empty() => {
            Application::search_by_company(db, owner_id, term).await?
        }
        _ => Application::list_by_owner(db, owner_id).await?,
    };
    Ok(rows)
}

pub async fn open_applications(db: &PgPool, owner_id: i64) -> Result<Vec<Application>, AppError> {
    let rows = Application::list_by_owner_excluding(db, owner_id, &ApplicationStatus::CLOSED).await?;
    Ok(rows)
}

/// Applications whose deadline falls strictly before today + `days`.
pub async fn upcoming_deadlines(
    db: &PgPool,
    days: i64,
    owner_id: i64,
) -> Result<Vec<Application>, AppError> {
    let cutoff = today() + Duration::days(days);
    let rows = Application::list_deadline_before(db, owner_id, cutoff).await?;
    Ok(rows)
}

pub async fn total_count(db: &PgPool, owner_id: i64) -> Result<i64, AppError> {
    Ok(Application::count_by_owner(db, owner_id).await?)
}

pub async fn count_by_status(
    db: &PgPool,
    status: ApplicationStatus,
    owner_id: i64,
) -> Result<i64, AppError> {
    Ok(Application::count_by_owner_and_status(db, owner_id, status).await?)
}

/// Total minus the closed statuses.
pub async fn active_count(db: &PgPool, owner_id: i64) -> Result<i64, AppError> {
    let total = Application::count_by_owner(db, owner_id).await?;
    let accepted =
        Application::count_by_owner_and_status(db, owner_id, ApplicationStatus::Accepted).await?;
    let rejected =
        Application::count_by_owner_and_status(db, owner_id, ApplicationStatus::Rejected).await?;
    Ok(total - accepted - rejected)
}

pub async fn status_counts(db: &PgPool, owner_id: i64) -> Result<StatusCounts, AppError> {
    let total = total_count(db, owner_id).await?;
    let mut per_status = [0i64; 7];
    for (i, status) in ApplicationStatus::ALL.into_iter().enumerate() {
        per_status[i] = count_by_status(db, status, owner_id).await?;
    }
    let [draft, applied, interview_scheduled, interview_done, offer, accepted, rejected] =
        per_status;
    Ok(StatusCounts::new(
        total,
        draft,
        applied,
        interview_scheduled,
        interview_done,
        offer,
        accepted,
        rejected,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn minimal_input() -> ApplicationInput {
        ApplicationInput {
            company_name: "Acme".into(),
            position: "Engineer".into(),
            status: None,
            application_date: None,
            deadline: None,
            contact_person: None,
            contact_email: None,
            contact_phone: None,
            notes: None,
            job_url: None,
            salary_expectation: None,
        }
    }

    fn owned_application(id: i64, user_id: i64) -> Application {
        Application {
            id,
            user_id,
            company_name: "Acme".into(),
            position: "Engineer".into(),
            status: ApplicationStatus::Draft,
            application_date: date!(2025 - 03 - 01),
            deadline: None,
            contact_person: None,
            contact_email: None,
            contact_phone: None,
            notes: None,
            job_url: None,
            salary_expectation: None,
            created_at: datetime!(2025-03-01 00:00:00 UTC),
            updated_at: datetime!(2025-03-01 00:00:00 UTC),
        }
    }

    #[test]
    fn ensure_owner_accepts_the_owner() {
        let app = owned_application(1, 7);
        assert!(ensure_owner(&app, 7).is_ok());
    }

    #[test]
    fn ensure_owner_rejects_other_users() {
        let app = owned_application(1, 7);
        assert!(matches!(
            ensure_owner(&app, 8),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn missing_status_defaults_to_draft() {
        assert_eq!(status_or_default(None), ApplicationStatus::Draft);
        assert_eq!(
            status_or_default(Some(ApplicationStatus::Applied)),
            ApplicationStatus::Applied
        );
    }

    #[test]
    fn missing_application_date_defaults_to_today() {
        assert_eq!(date_or_today(None), today());
        assert_eq!(
            date_or_today(Some(date!(2025 - 03 - 01))),
            date!(2025 - 03 - 01)
        );
    }

    #[test]
    fn validate_accepts_minimal_input() {
        assert!(validate(&minimal_input()).is_ok());
    }

    #[test]
    fn validate_rejects_blank_company_name() {
        let mut input = minimal_input();
        input.company_name = "   ".into();
        assert!(matches!(validate(&input), Err(AppError::Validation(_))));
    }

    #[test]
    fn validate_rejects_blank_position() {
        let mut input = minimal_input();
        input.position = String::new();
        assert!(matches!(validate(&input), Err(AppError::Validation(_))));
    }

    #[test]
    fn validate_rejects_oversized_notes() {
        let mut input = minimal_input();
        input.notes = Some("x".repeat(2001));
        assert!(matches!(validate(&input), Err(AppError::Validation(_))));
        input.notes = Some("x".repeat(2000));
        assert!(validate(&input).is_ok());
    }

    #[test]
    fn validate_rejects_oversized_company_name() {
        let mut input = minimal_input();
        input.company_name = "x".repeat(201);
        assert!(matches!(validate(&input), Err(AppError::Validation(_))));
    }
}
