use serde::{Deserialize, Serialize};

/// Request body for user registration. Every field may be absent.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Request body for login.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Issued token pair; also delivered as cookies.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub success: bool,
    pub access: String,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub success: bool,
    pub username: String,
    pub email: String,
}

/// An empty string counts as a missing field.
pub(crate) fn present(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.is_empty())
}
