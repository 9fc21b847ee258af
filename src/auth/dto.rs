use serde::{Deserialize, Serialize};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after register or login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
    pub full_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub approved: bool,
}

/// Full overwrite of the editable profile fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub first_name: String,
    pub last_name: String,
    pub job_title: Option<String>,
    pub phone: Option<String>,
    pub about_me: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub xing_url: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeRequest {
    pub current_password: String,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_response_uses_camel_case_keys() {
        let response = AuthResponse {
            token: "tok".into(),
            user: PublicUser {
                id: 7,
                email: "dave@example.com".into(),
                full_name: "Dave Miller".into(),
            },
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"fullName\":\"Dave Miller\""));
        assert!(json.contains("\"token\":\"tok\""));
    }

    #[test]
    fn register_request_parses_camel_case() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"email":"a@b.de","password":"secret-pw","firstName":"A","lastName":"B"}"#,
        )
        .unwrap();
        assert_eq!(req.first_name, "A");
        assert_eq!(req.last_name, "B");
    }
}
