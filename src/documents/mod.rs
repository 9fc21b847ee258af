use axum::{routing::get, Json, Router};
use serde::Serialize;
use time::macros::date;
use time::Date;
use tracing::instrument;

use crate::{auth::extractors::CurrentUser, state::AppState};

/// Display-only document inventory; real file storage is out of scope, the
/// listing mirrors what the documents page shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub size: String,
    pub category: String,
    pub upload_date: Date,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/documents", get(list))
}

#[instrument]
pub async fn list(_current: CurrentUser) -> Json<Vec<DocumentInfo>> {
    Json(sample_documents())
}

fn sample_documents() -> Vec<DocumentInfo> {
    vec![
        DocumentInfo {
            id: 1,
            name: "CV_2025.pdf".into(),
            doc_type: "PDF".into(),
            size: "2.4 MB".into(),
            category: "Resume".into(),
            upload_date: date!(2025 - 01 - 15),
        },
        DocumentInfo {
            id: 2,
            name: "Cover_Letter_Template.docx".into(),
            doc_type: "DOCX".into(),
            size: "48 KB".into(),
            category: "Cover letter".into(),
            upload_date: date!(2025 - 02 - 02),
        },
        DocumentInfo {
            id: 3,
            name: "References.pdf".into(),
            doc_type: "PDF".into(),
            size: "1.1 MB".into(),
            category: "Certificates".into(),
            upload_date: date!(2025 - 02 - 20),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_type_serializes_as_type_key() {
        let json = serde_json::to_string(&sample_documents()[0]).unwrap();
        assert!(json.contains("\"type\":\"PDF\""));
        assert!(json.contains("\"uploadDate\":\"2025-01-15\""));
    }
}
