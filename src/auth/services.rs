use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::dto::LoginData;
use crate::auth::jwt::JwtKeys;
use crate::auth::password::{self, DUMMY_HASH};
use crate::auth::store::{User, UserStore};
use crate::error::ApiError;

/// Orchestrates signup and login over injected collaborators. Built once
/// in `AppState::from_parts`.
#[derive(Clone)]
pub struct AuthService {
    store: UserStore,
    keys: JwtKeys,
}

impl AuthService {
    pub fn new(store: UserStore, keys: JwtKeys) -> Self {
        Self { store, keys }
    }

    pub fn keys(&self) -> &JwtKeys {
        &self.keys
    }

    /// Validate, hash, persist, issue token. Failures before the insert
    /// persist nothing; the duplicate-email race resolves in the store.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<(User, String), ApiError> {
        let user = self
            .store
            .create(name, email, password, password_confirm)
            .await?;
        let token = self.keys.sign(user.id)?;
        info!(user_id = %user.id, email = %user.email, "user signed up");
        Ok((user, token))
    }

    /// Every credential failure collapses to `InvalidCredentials`; the
    /// unknown-email path still runs a hash verification so it is not
    /// measurably faster than a wrong password.
    pub async fn login(
        &self,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<(LoginData, String), ApiError> {
        let (email, password) = match (email, password) {
            (Some(e), Some(p)) if !e.is_empty() && !p.is_empty() => (e, p),
            _ => return Err(ApiError::MissingCredentials),
        };
        let email = email.trim().to_lowercase();

        let (user, hash) = match self.store.find_by_email_with_hash(&email).await? {
            Some(found) => found,
            None => {
                password::verify_password(&password, &DUMMY_HASH);
                warn!(email = %email, "login with unknown email");
                return Err(ApiError::InvalidCredentials);
            }
        };

        if !password::verify_password(&password, &hash) {
            warn!(user_id = %user.id, "login with wrong password");
            return Err(ApiError::InvalidCredentials);
        }

        let token = self.keys.sign(user.id)?;
        info!(user_id = %user.id, "user logged in");
        Ok((
            LoginData {
                name: user.name,
                email: user.email,
                id: user.id,
            },
            token,
        ))
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<Option<User>, ApiError> {
        self.store.find_by_id(user_id).await
    }
}
