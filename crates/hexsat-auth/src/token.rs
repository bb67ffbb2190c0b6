//! Issuing and validating identity tokens.
//!
//! [`TokenAuthority`] owns the signing key for the lifetime of the process.
//! It is built once at startup and shared read-only (behind an `Arc`) by every
//! request, so no locking is involved.

use std::fmt;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use thiserror::Error;

use hexsat_config::JwtConfig;

use crate::claims::Claims;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Signing(String),

    #[error("token lifetime must be positive")]
    InvalidLifetime,

    #[error("invalid token")]
    Invalid,

    #[error("token has expired")]
    Expired,

    #[error("malformed token")]
    Malformed,
}

pub struct TokenAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenAuthority {
    /// Creates an authority signing HS256 tokens with `secret`, each valid for `ttl`.
    ///
    /// # Errors
    ///
    /// - [`TokenError::Signing`] if `secret` is empty
    /// - [`TokenError::InvalidLifetime`] if `ttl` is shorter than one second
    pub fn new(secret: &[u8], ttl: Duration) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::Signing("empty signing key".to_string()));
        }
        if ttl.as_secs() == 0 {
            return Err(TokenError::InvalidLifetime);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        })
    }

    /// # Errors
    ///
    /// [`TokenError::Signing`] if no secret is configured.
    pub fn from_config(config: &JwtConfig) -> Result<Self, TokenError> {
        let secret = config
            .secret
            .as_deref()
            .ok_or_else(|| TokenError::Signing("JWT_SECRET is not set".to_string()))?;
        let ttl = u64::try_from(config.access_token_expiry)
            .map_err(|_| TokenError::InvalidLifetime)?;
        Self::new(secret.as_bytes(), Duration::from_secs(ttl))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a token for `subject` that expires `ttl` from now.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.issue_at(subject, Utc::now().timestamp())
    }

    /// Issues a token as if the current time were `now` (Unix seconds).
    pub fn issue_at(&self, subject: &str, now: i64) -> Result<String, TokenError> {
        let iat = usize::try_from(now)
            .map_err(|_| TokenError::Signing(format!("issue time {now} is before the epoch")))?;

        let claims = Claims {
            sub: subject.to_string(),
            exp: iat + self.ttl.as_secs() as usize,
            iat,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verifies signature and expiry of `token` and returns its subject.
    ///
    /// # Errors
    ///
    /// - [`TokenError::Expired`] if the expiry has elapsed
    /// - [`TokenError::Malformed`] if the token cannot be parsed
    /// - [`TokenError::Invalid`] for a bad signature, algorithm or claim set
    pub fn validate(&self, token: &str) -> Result<String, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => TokenError::Malformed,
                _ => TokenError::Invalid,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-key-at-least-32-characters-long";

    fn authority() -> TokenAuthority {
        TokenAuthority::new(SECRET, Duration::from_secs(3600)).unwrap()
    }

    #[test]
    fn test_issue_then_validate_returns_subject() {
        let authority = authority();
        for subject in ["1", "42", "alice"] {
            let token = authority.issue(subject).unwrap();
            assert!(!token.is_empty());
            assert_eq!(authority.validate(&token).unwrap(), subject);
        }
    }

    #[test]
    fn test_expiry_matches_ttl() {
        let authority = authority();
        let token = authority.issue_at("1", 1_700_000_000).unwrap();

        let mut insecure = Validation::new(Algorithm::HS256);
        insecure.validate_exp = false;
        let claims = decode::<Claims>(&token, &DecodingKey::from_secret(SECRET), &insecure)
            .unwrap()
            .claims;

        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp, 1_700_000_000 + 3600);
    }

    #[test]
    fn test_expired_token() {
        let authority = authority();
        let issued = Utc::now().timestamp() - 3601;
        let token = authority.issue_at("1", issued).unwrap();

        assert_eq!(authority.validate(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_malformed_token() {
        let authority = authority();
        assert_eq!(authority.validate("not-a-token"), Err(TokenError::Malformed));
        assert_eq!(authority.validate(""), Err(TokenError::Malformed));
        assert_eq!(authority.validate("a.b.c"), Err(TokenError::Malformed));
    }

    #[test]
    fn test_token_from_other_key_is_invalid() {
        let other = TokenAuthority::new(b"different-secret-key", Duration::from_secs(3600)).unwrap();
        let token = other.issue("1").unwrap();

        assert_eq!(authority().validate(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_tampered_signature_is_invalid() {
        let authority = authority();
        let token = authority.issue("1").unwrap();

        let (unsigned, signature) = token.rsplit_once('.').unwrap();
        let first = if signature.starts_with('A') { 'B' } else { 'A' };
        let tampered = format!("{unsigned}.{first}{}", &signature[1..]);

        assert!(authority.validate(&tampered).is_err());
        assert_ne!(authority.validate(&tampered), Ok("1".to_string()));
    }

    #[test]
    fn test_swapped_payload_is_invalid() {
        let authority = authority();
        let alice = authority.issue("alice").unwrap();
        let bob = authority.issue("bob").unwrap();

        let alice_parts: Vec<&str> = alice.split('.').collect();
        let bob_parts: Vec<&str> = bob.split('.').collect();
        let forged = format!("{}.{}.{}", alice_parts[0], bob_parts[1], alice_parts[2]);

        assert_eq!(authority.validate(&forged), Err(TokenError::Invalid));
    }

    #[test]
    fn test_empty_secret_rejected() {
        let err = TokenAuthority::new(b"", Duration::from_secs(60)).unwrap_err();
        assert!(matches!(err, TokenError::Signing(_)));
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let err = TokenAuthority::new(SECRET, Duration::ZERO).unwrap_err();
        assert_eq!(err, TokenError::InvalidLifetime);
    }

    #[test]
    fn test_from_config() {
        let config = JwtConfig {
            secret: Some("config-secret".to_string()),
            access_token_expiry: 120,
        };
        let authority = TokenAuthority::from_config(&config).unwrap();
        assert_eq!(authority.ttl(), Duration::from_secs(120));

        let negative = JwtConfig {
            secret: Some("config-secret".to_string()),
            access_token_expiry: -1,
        };
        assert_eq!(
            TokenAuthority::from_config(&negative).unwrap_err(),
            TokenError::InvalidLifetime
        );
    }

    #[test]
    fn test_from_config_without_secret_fails() {
        let config = JwtConfig {
            secret: None,
            access_token_expiry: 120,
        };
        assert!(matches!(
            TokenAuthority::from_config(&config),
            Err(TokenError::Signing(_))
        ));
    }

    #[test]
    fn test_debug_hides_keys() {
        let debug = format!("{:?}", authority());
        assert!(debug.contains("ttl"));
        assert!(!debug.contains("test-secret"));
    }
}
