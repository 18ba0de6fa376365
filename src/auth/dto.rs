use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::store::User;

/// Request body for signup. `password_confirm` lives only here; it is
/// checked during validation and never persisted.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "passwordConfirm")]
    pub password_confirm: String,
}

/// Request body for login. Both fields are optional so a missing one
/// becomes a 400 from the service instead of a deserialization reject.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub status: &'static str,
    pub token: String,
    pub data: SignupData,
}

#[derive(Debug, Serialize)]
pub struct SignupData {
    #[serde(rename = "newUser")]
    pub new_user: User,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: &'static str,
    pub token: String,
    pub data: LoginData,
}

/// Login success payload: the {name, email, id} projection, nothing else.
#[derive(Debug, Serialize)]
pub struct LoginData {
    pub name: String,
    pub email: String,
    pub id: Uuid,
}
