use serde::{Deserialize, Serialize};

/// JWT payload asserting a caller identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,  // user email
    pub user_id: i64, // user row id
    pub iat: usize,   // issued at (unix timestamp)
    pub exp: usize,   // expires at (unix timestamp)
}
