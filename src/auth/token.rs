use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::{AuthError, Claims, Role};
use crate::config::JwtSecret;

/// Optional caller details embedded next to the role.
#[derive(Debug, Clone, Copy, Default)]
pub struct Subject<'a> {
    pub username: Option<&'a str>,
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl IssuedToken {
    /// Seconds between issuance and expiry.
    pub fn max_age(&self) -> i64 {
        (self.expires_at - self.issued_at).num_seconds()
    }
}

/// Longest accepted token lifetime.
pub const MAX_TTL_HOURS: u64 = 24 * 365;

/// Signs role tokens with the server secret.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    /// Fails on an empty secret and on a lifetime outside `1..=MAX_TTL_HOURS`.
    pub fn new(secret: &JwtSecret, ttl_hours: u64) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::MissingSecret);
        }

        let ttl = Some(ttl_hours)
            .filter(|hours| (1..=MAX_TTL_HOURS).contains(hours))
            .and_then(|hours| i64::try_from(hours).ok())
            .and_then(Duration::try_hours)
            .ok_or(AuthError::InvalidTtl(ttl_hours))?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }

    pub fn issue(&self, role: Role) -> Result<IssuedToken, AuthError> {
        self.issue_at(role, Subject::default(), Utc::now())
    }

    pub fn issue_for(&self, role: Role, subject: Subject<'_>) -> Result<IssuedToken, AuthError> {
        self.issue_at(role, subject, Utc::now())
    }

    /// Issue a token as if it were `now`. Expiry is `now + ttl`.
    pub fn issue_at(
        &self,
        role: Role,
        subject: Subject<'_>,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        let expires_at = now + self.ttl;
        let claims = Claims {
            role: role.as_str().to_string(),
            username: subject.username.map(str::to_string),
            sub: subject.user_id.map(|id| id.to_string()),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        Ok(IssuedToken {
            token,
            role,
            issued_at: now,
            expires_at,
        })
    }
}

/// Checks signature and expiry of incoming tokens.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &JwtSecret) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::MissingSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;

        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        if token.trim().is_empty() {
            return Err(AuthError::MalformedToken);
        }

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;

        // jsonwebtoken still admits the token during its `exp` second
        if data.claims.exp <= Utc::now().timestamp() {
            return Err(AuthError::TokenExpired);
        }
        Ok(data.claims)
    }
}
