use crate::auth::jwt::TokenCodec;
use crate::auth::password;
use crate::db::CredentialStore;
use crate::types::{AppError, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// A freshly minted bearer token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Exchanges a username and password for a bearer token.
///
/// Unknown usernames and wrong passwords fail identically, and both paths run
/// one Argon2 verification so response time does not reveal which it was.
pub struct TokenIssuer {
    store: Arc<dyn CredentialStore>,
    codec: Arc<TokenCodec>,
    dummy_hash: String,
}

impl TokenIssuer {
    pub fn new(store: Arc<dyn CredentialStore>, codec: Arc<TokenCodec>) -> Result<Self> {
        let dummy_hash = password::hash_password("fittrack-dummy-password")?;
        Ok(Self {
            store,
            codec,
            dummy_hash,
        })
    }

    /// Surrounding whitespace in `username` is ignored, matching how
    /// registration stores it.
    pub async fn issue(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken> {
        let user = self.store.find_by_username(username.trim()).await?;

        let (user_id, hash) = match user {
            Some(user) => (Some(user.id), user.password_hash),
            None => (None, self.dummy_hash.clone()),
        };

        let matches = password::verify_password_blocking(password.to_string(), hash).await?;

        let user_id = match (user_id, matches) {
            (Some(id), true) => id,
            _ => {
                tracing::debug!("token issuance rejected");
                return Err(AppError::InvalidCredentials);
            }
        };

        let token = self
            .codec
            .mint(&user_id, now)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        let expires_at = self
            .codec
            .expires_at(now)
            .map_err(|e| AppError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user_id, "issued authentication token");

        Ok(IssuedToken {
            token,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::TursoClient;
    use crate::types::NewUser;

    async fn setup() -> (TokenIssuer, Arc<TokenCodec>, String) {
        let db = TursoClient::new_memory().await.expect("should open db");
        let user = db
            .create(NewUser {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                bio: None,
                password_hash: password::hash_password("secret123").unwrap(),
            })
            .await
            .expect("should create alice");

        let codec = Arc::new(
            TokenCodec::new(b"issuer-test-secret-at-least-32-chars", 3600).expect("valid lifetime"),
        );
        let issuer = TokenIssuer::new(Arc::new(db), codec.clone()).expect("should build issuer");
        (issuer, codec, user.id)
    }

    #[tokio::test]
    async fn test_issue_token_parses_to_user() {
        let (issuer, codec, alice_id) = setup().await;
        let now = Utc::now();

        let issued = issuer
            .issue("alice", "secret123", now)
            .await
            .expect("should issue");

        assert_eq!(codec.parse(&issued.token, now).as_deref(), Ok(alice_id.as_str()));
        assert_eq!(issued.expires_at, now + chrono::Duration::seconds(3600));
    }

    #[tokio::test]
    async fn test_username_whitespace_is_ignored() {
        let (issuer, codec, alice_id) = setup().await;
        let now = Utc::now();

        let issued = issuer
            .issue(" alice ", "secret123", now)
            .await
            .expect("padded username should match");

        assert_eq!(codec.parse(&issued.token, now).as_deref(), Ok(alice_id.as_str()));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_look_the_same() {
        let (issuer, _, _) = setup().await;
        let now = Utc::now();

        let wrong_password = issuer
            .issue("alice", "not-the-password", now)
            .await
            .expect_err("wrong password must fail");
        let unknown_user = issuer
            .issue("mallory", "secret123", now)
            .await
            .expect_err("unknown user must fail");

        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_user, AppError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }
}
