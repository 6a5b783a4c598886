use serde::{Deserialize, Serialize};

use crate::models::Role;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub login: String,
    #[serde(default, alias = "mdp")]
    pub secret: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub role: Role,
    pub display_name: String,
    pub id: i64,
}

/// Fields are optional here so a missing one is reported as a 400 with a
/// message instead of a generic deserialization error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub login: Option<String>,
    #[serde(alias = "mdp")]
    pub secret: Option<String>,
    #[serde(alias = "nom")]
    pub display_name: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub id: i64,
}
