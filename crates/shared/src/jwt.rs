//! JWT access-token verification using RS256.
//!
//! Tokens are issued by the hosted authentication service; this backend only
//! verifies them. The verifier holds the service's RSA public key in PEM
//! format and validates expiry with a small leeway for clock skew.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error type for token verification.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to decode token: {0}")]
    DecodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Claims carried by an access token from the auth service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Email of the authenticated user, if the auth service includes it
    #[serde(default)]
    pub email: Option<String>,
}

/// Default leeway in seconds for clock skew tolerance
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

/// Verifies access tokens issued by the external auth service.
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    /// Leeway in seconds for clock skew tolerance
    pub leeway_secs: u64,
}

impl std::fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtVerifier")
            .field("leeway_secs", &self.leeway_secs)
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl JwtVerifier {
    /// Creates a verifier from an RSA public key in PEM format.
    pub fn new(public_key_pem: &str) -> Result<Self, JwtError> {
        Self::with_leeway(public_key_pem, DEFAULT_LEEWAY_SECS)
    }

    /// Creates a verifier with a custom clock-skew leeway.
    pub fn with_leeway(public_key_pem: &str, leeway_secs: u64) -> Result<Self, JwtError> {
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| JwtError::InvalidKey(format!("Invalid public key: {}", e)))?;

        Ok(Self {
            decoding_key,
            leeway_secs,
        })
    }

    /// Creates a verifier for testing with an HS256 symmetric key.
    /// DO NOT use in production - only for tests.
    #[cfg(any(test, feature = "test-tokens"))]
    pub fn new_for_testing(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            leeway_secs: 0,
        }
    }

    /// Validates an access token and returns its claims.
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm());
        validation.validate_exp = true;
        validation.leeway = self.leeway_secs;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidToken,
                _ => JwtError::DecodingError(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Tests verify HS256 tokens; production verifies RS256.
    fn algorithm(&self) -> Algorithm {
        #[cfg(any(test, feature = "test-tokens"))]
        {
            Algorithm::HS256
        }
        #[cfg(not(any(test, feature = "test-tokens")))]
        {
            Algorithm::RS256
        }
    }
}

/// Extracts the user ID from validated claims.
pub fn extract_user_id(claims: &Claims) -> Result<Uuid, JwtError> {
    Uuid::parse_str(&claims.sub).map_err(|_| JwtError::InvalidToken)
}

/// Mints an HS256 token for tests that exercise authenticated routes.
#[cfg(any(test, feature = "test-tokens"))]
pub fn mint_test_token(secret: &str, user_id: Uuid, ttl_secs: i64) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + ttl_secs,
        iat: now,
        email: None,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("test token encoding")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_secret_key_for_jwt_testing_12345";

    #[test]
    fn test_validate_roundtrip() {
        let verifier = JwtVerifier::new_for_testing(SECRET);
        let user_id = Uuid::new_v4();

        let token = mint_test_token(SECRET, user_id, 900);
        let claims = verifier.validate(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(extract_user_id(&claims).unwrap(), user_id);
    }

    #[test]
    fn test_expired_token() {
        let verifier = JwtVerifier::new_for_testing(SECRET);
        let token = mint_test_token(SECRET, Uuid::new_v4(), -10);

        let result = verifier.validate(&token);
        assert!(
            matches!(result, Err(JwtError::TokenExpired)),
            "Expected TokenExpired, got: {:?}",
            result
        );
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let verifier = JwtVerifier::new_for_testing(SECRET);
        let token = mint_test_token("some_other_secret_entirely_000000", Uuid::new_v4(), 900);

        assert!(verifier.validate(&token).is_err());
    }

    #[test]
    fn test_malformed_token() {
        let verifier = JwtVerifier::new_for_testing(SECRET);
        assert!(verifier.validate("not_a_jwt").is_err());
        assert!(verifier.validate("invalid.token.here").is_err());
    }

    #[test]
    fn test_invalid_subject_rejected() {
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            exp: chrono::Utc::now().timestamp() + 900,
            iat: chrono::Utc::now().timestamp(),
            email: None,
        };
        assert!(matches!(
            extract_user_id(&claims),
            Err(JwtError::InvalidToken)
        ));
    }

    #[test]
    fn test_jwt_error_display() {
        assert!(format!("{}", JwtError::TokenExpired).contains("expired"));
        assert!(format!("{}", JwtError::InvalidToken).contains("Invalid"));
        assert!(format!("{}", JwtError::DecodingError("x".to_string())).contains("decode"));
    }

    #[test]
    fn test_claims_email_optional() {
        let json = r#"{"sub":"8c7f9db2-54a1-4a8e-9f3e-0d1a2b3c4d5e","exp":1,"iat":0}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert!(claims.email.is_none());
    }
}
