use serde::{Deserialize, Serialize};

/// JWT claims for identity tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id the token was issued for
    pub sub: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize() {
        let claims = Claims {
            sub: "42".to_string(),
            exp: 1234567890,
            iat: 1234567800,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""sub":"42""#));
        assert!(serialized.contains(r#""exp":1234567890"#));
    }

    #[test]
    fn test_claims_deserialize() {
        let json = r#"{"sub":"7","exp":9999999999,"iat":9999999900}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.exp, 9999999999);
        assert_eq!(claims.iat, 9999999900);
    }
}
