use anyhow::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,    // Subject (user_id as string)
    pub user_id: Uuid,  // User UUID
    pub email: String,  // Email (for logging/debugging)
    pub is_admin: bool, // Admin flag
    pub exp: i64,       // Expiration timestamp
    pub iat: i64,       // Issued at timestamp
    pub iss: String,    // Issuer
    pub jti: String,    // JWT ID (unique token identifier)
}

/// JWT Service - creates and verifies JWT tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl JwtService {
    /// Create new JWT service with secret and issuer
    pub fn new(secret: &str, issuer: String) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
        }
    }

    /// Create a new JWT token for a user
    ///
    /// Token expires after 24 hours
    pub fn create_token(&self, user_id: Uuid, email: String, is_admin: bool) -> Result<String> {
        let now = chrono::Utc::now();
        let exp = now + chrono::Duration::hours(24);

        let claims = Claims {
            sub: user_id.to_string(),
            user_id,
            email,
            is_admin,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Verify and decode a JWT token
    ///
    /// Returns claims if token is valid and not expired
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_verify_token() {
        let service = JwtService::new("test_secret_key", "altdir-test".to_string());
        let user_id = Uuid::new_v4();

        let token = service
            .create_token(user_id, "maintainer@example.org".to_string(), true)
            .unwrap();

        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.email, "maintainer@example.org");
        assert!(claims.is_admin);
        assert_eq!(claims.iss, "altdir-test");
    }

    #[test]
    fn invalid_token_rejected() {
        let service = JwtService::new("test_secret_key", "altdir-test".to_string());
        assert!(service.verify_token("not_a_token").is_err());
    }

    #[test]
    fn wrong_secret_rejected() {
        let service1 = JwtService::new("secret1", "altdir-test".to_string());
        let service2 = JwtService::new("secret2", "altdir-test".to_string());

        let token = service1
            .create_token(Uuid::new_v4(), "a@b.c".to_string(), false)
            .unwrap();

        assert!(service2.verify_token(&token).is_err());
    }

    #[test]
    fn expiry_is_24_hours_out() {
        let service = JwtService::new("test_secret_key", "altdir-test".to_string());
        let token = service
            .create_token(Uuid::new_v4(), "a@b.c".to_string(), false)
            .unwrap();
        let claims = service.verify_token(&token).unwrap();

        let now = chrono::Utc::now().timestamp();
        let expires_in = claims.exp - now;
        assert!(expires_in > 23 * 3600);
        assert!(expires_in <= 24 * 3600);
    }
}
