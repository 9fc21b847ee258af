use serde::Serialize;

use crate::applications::repo_types::Application;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub greeting: String,
    pub total_applications: i64,
    pub active_applications: i64,
    pub recent: Vec<Application>,
    pub open_applications: Vec<Application>,
    pub upcoming_deadlines: Vec<Application>,
}
