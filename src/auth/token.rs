use crate::config::SecurityConfig;
use crate::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // E-mail being confirmed
    pub aud: String, // Password salt
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued at
}

/// Signs and checks the links mailed out to confirm a new account.
#[derive(Clone)]
pub struct ConfirmationTokens {
    secret: String,
    salt: String,
    max_age: Duration,
}

impl ConfirmationTokens {
    pub fn new(secret: impl Into<String>, salt: impl Into<String>, max_age: Duration) -> Self {
        Self {
            secret: secret.into(),
            salt: salt.into(),
            max_age,
        }
    }

    pub fn from_config(config: &SecurityConfig) -> Self {
        Self::new(
            config.secret_key.clone(),
            config.password_salt.clone(),
            Duration::seconds(config.confirm_token_max_age_secs),
        )
    }

    pub fn generate(&self, email: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: email.to_string(),
            aud: self.salt.clone(),
            exp: (now + self.max_age).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// The e-mail a token was issued for, if it is still valid.
    pub fn verify(&self, token: &str) -> Result<String> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[self.salt.as_str()]);

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )?;

        Ok(data.claims.sub)
    }
}
