use serde::{Deserialize, Serialize};
use time::Date;

use super::repo_types::Application;
use super::status::ApplicationStatus;

/// Request body for creating or fully updating an application. Absent
/// `status`/`applicationDate` fall back to DRAFT and today.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInput {
    pub company_name: String,
    pub position: String,
    pub status: Option<ApplicationStatus>,
    pub application_date: Option<Date>,
    pub deadline: Option<Date>,
    pub contact_person: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub notes: Option<String>,
    pub job_url: Option<String>,
    pub salary_expectation: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: ApplicationStatus,
}

/// Query params of the list endpoint. `status` wins over `search` when both
/// are present, matching the original list view.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<ApplicationStatus>,
    pub search: Option<String>,
}

/// Per-status aggregates shown next to the application list.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub total: i64,
    pub active: i64,
    pub draft: i64,
    pub applied: i64,
    pub interview: i64,
    pub offer: i64,
    pub accepted: i64,
    pub rejected: i64,
}

impl StatusCounts {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        total: i64,
        draft: i64,
        applied: i64,
        interview_scheduled: i64,
        interview_done: i64,
        offer: i64,
        accepted: i64,
        rejected: i64,
    ) -> Self {
        Self {
            total,
            active: total - accepted - rejected,
            draft,
            applied,
            interview: interview_scheduled + interview_done,
            offer,
            accepted,
            rejected,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListView {
    pub applications: Vec<Application>,
    pub counts: StatusCounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_plus_closed_equals_total() {
        let counts = StatusCounts::new(12, 2, 3, 1, 1, 1, 3, 1);
        assert_eq!(counts.active + counts.accepted + counts.rejected, counts.total);
        assert_eq!(counts.active, 8);
        assert_eq!(counts.interview, 2);
    }

    #[test]
    fn zero_rows_yield_zero_counts() {
        let counts = StatusCounts::new(0, 0, 0, 0, 0, 0, 0, 0);
        assert_eq!(counts.total, 0);
        assert_eq!(counts.active, 0);
    }

    #[test]
    fn input_parses_with_minimal_fields() {
        let input: ApplicationInput =
            serde_json::from_str(r#"{"companyName":"Acme","position":"Engineer"}"#).unwrap();
        assert_eq!(input.company_name, "Acme");
        assert!(input.status.is_none());
        assert!(input.application_date.is_none());
    }

    #[test]
    fn input_parses_dates_and_status() {
        let input: ApplicationInput = serde_json::from_str(
            r#"{"companyName":"Acme","position":"Engineer","status":"APPLIED",
                "applicationDate":"2025-03-01","deadline":"2025-04-01","salaryExpectation":65000}"#,
        )
        .unwrap();
        assert_eq!(input.status, Some(ApplicationStatus::Applied));
        assert_eq!(input.salary_expectation, Some(65000));
        assert!(input.deadline.is_some());
    }
}
