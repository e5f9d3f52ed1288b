use crate::types::Claims;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

/// Why a token was rejected.
///
/// `Malformed` and `Invalid` mean the credential was never good; `Expired`
/// means it verified but its lifetime is over. Callers at the HTTP boundary
/// collapse all three into "anonymous".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature is invalid")]
    Invalid,
    #[error("token has expired")]
    Expired,
    #[error("failed to sign token: {0}")]
    Signing(String),
    #[error("token lifetime of {0} seconds is out of range")]
    InvalidLifetime(i64),
}

/// Mints and verifies HS256 bearer tokens.
///
/// Built once at startup from the configured secret and shared read-only
/// behind an `Arc`.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenCodec {
    /// Creates a codec signing with `secret`; tokens live for `ttl_secs`.
    ///
    /// Fails if the lifetime is not positive or does not fit a `Duration`.
    pub fn new(secret: &[u8], ttl_secs: i64) -> Result<Self, TokenError> {
        let ttl = Duration::try_seconds(ttl_secs)
            .filter(|ttl| *ttl > Duration::zero())
            .ok_or(TokenError::InvalidLifetime(ttl_secs))?;

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller-supplied clock in `parse`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        })
    }

    /// When a token issued at `now` stops being valid.
    pub fn expires_at(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, TokenError> {
        now.checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::Signing("token expiry is out of range".to_string()))
    }

    /// Signs a token for `user_id` issued at `now`.
    pub fn mint(&self, user_id: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: self.expires_at(now)?.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verifies `token` and returns its subject.
    ///
    /// The signature is checked before any claim is read; the token is valid
    /// only while `now < exp`.
    pub fn parse(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = self.verify(token)?;

        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims.sub)
    }

    /// Signature and structure check only, no expiry.
    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::Invalid,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("key", &"[REDACTED]")
            .field("ttl_secs", &self.ttl.num_seconds())
            .finish()
    }
}
