use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgHasArrayType, PgTypeInfo};

/// Lifecycle of a job application. A flat enum: any status may move to any
/// other, there is no enforced transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "application_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Draft,
    Applied,
    InterviewScheduled,
    InterviewDone,
    OfferReceived,
    Accepted,
    Rejected,
}

impl PgHasArrayType for ApplicationStatus {
    fn array_type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("_application_status")
    }
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 7] = [
        ApplicationStatus::Draft,
        ApplicationStatus::Applied,
        ApplicationStatus::InterviewScheduled,
        ApplicationStatus::InterviewDone,
        ApplicationStatus::OfferReceived,
        ApplicationStatus::Accepted,
        ApplicationStatus::Rejected,
    ];

    /// Statuses excluded from "active/open" aggregates.
    pub const CLOSED: [ApplicationStatus; 2] =
        [ApplicationStatus::Accepted, ApplicationStatus::Rejected];

    pub fn display_name(&self) -> &'static str {
        match self {
            ApplicationStatus::Draft => "Draft",
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::InterviewScheduled => "Interview scheduled",
            ApplicationStatus::InterviewDone => "Interview done",
            ApplicationStatus::OfferReceived => "Offer received",
            ApplicationStatus::Accepted => "Accepted",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            ApplicationStatus::Accepted | ApplicationStatus::Rejected
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_screaming_snake_case() {
        let json = serde_json::to_string(&ApplicationStatus::InterviewScheduled).unwrap();
        assert_eq!(json, "\"INTERVIEW_SCHEDULED\"");

        let parsed: ApplicationStatus = serde_json::from_str("\"OFFER_RECEIVED\"").unwrap();
        assert_eq!(parsed, ApplicationStatus::OfferReceived);
    }

    #[test]
    fn only_accepted_and_rejected_are_closed() {
        for status in ApplicationStatus::ALL {
            let expected = ApplicationStatus::CLOSED.contains(&status);
            assert_eq!(status.is_closed(), expected, "{status:?}");
        }
    }

    #[test]
    fn every_status_has_a_display_name() {
        for status in ApplicationStatus::ALL {
            assert!(!status.display_name().is_empty());
        }
    }
}
