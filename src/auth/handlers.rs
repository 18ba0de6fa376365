use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::auth::dto::{LoginRequest, LoginResponse, SignupData, SignupRequest, SignupResponse};
use crate::auth::jwt::AuthUser;
use crate::auth::store::User;
use crate::error::ApiError;
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/me", get(me))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let (new_user, token) = state
        .auth
        .signup(
            &payload.name,
            &payload.email,
            &payload.password,
            &payload.password_confirm,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            status: "success",
            token,
            data: SignupData { new_user },
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (data, token) = state.auth.login(payload.email, payload.password).await?;
    Ok(Json(LoginResponse {
        status: "success",
        token,
        data,
    }))
}

#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<User>, ApiError> {
    let user = state
        .auth
        .profile(user_id)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;
    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    #[test]
    fn signup_response_wraps_user_under_new_user() {
        let response = SignupResponse {
            status: "success",
            token: "token".into(),
            data: SignupData {
                new_user: User {
                    id: Uuid::new_v4(),
                    name: "Ada".into(),
                    email: "ada@example.com".into(),
                    role: "user".into(),
                    active: true,
                    photo: "data:image/png;base64,".into(),
                    created_at: OffsetDateTime::now_utc(),
                },
            },
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["newUser"]["email"], "ada@example.com");
        assert!(json["data"]["newUser"].get("password_hash").is_none());
    }

    #[test]
    fn login_response_shape() {
        let response = LoginResponse {
            status: "success",
            token: "token".into(),
            data: crate::auth::dto::LoginData {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                id: Uuid::new_v4(),
            },
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["name"], "Ada");
        assert!(json["token"].is_string());
    }
}
