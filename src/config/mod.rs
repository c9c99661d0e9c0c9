use config::{Config, ConfigBuilder, ConfigError, Environment, File, Map};
use config::builder::DefaultState;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MailConfig {
    pub server: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub use_tls: bool,
    pub use_ssl: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecurityConfig {
    pub secret_key: String,
    pub password_salt: String,
    pub bcrypt_cost: u32,
    pub confirm_token_max_age_secs: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub environment: String,
    pub database: DatabaseConfig,
    pub mail: MailConfig,
    pub security: SecurityConfig,
}

/// Plain environment variables the web service has always read, and the
/// setting each one lands in.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("DB_URL", "database.url"),
    ("MAIL_SERVER", "mail.server"),
    ("MAIL_PORT", "mail.port"),
    ("MAIL_USERNAME", "mail.username"),
    ("MAIL_PASSWORD", "mail.password"),
];

impl Settings {
    /// Load settings from the process environment and `config/` files.
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_vars(env::vars().collect())
    }

    /// Load settings from an explicit set of environment variables.
    pub fn from_vars(vars: Map<String, String>) -> Result<Self, ConfigError> {
        let run_mode = vars
            .get("RUN_MODE")
            .cloned()
            .unwrap_or_else(|| "dev".into());

        let mut builder = Self::defaults(Config::builder(), &run_mode)?
            // Add in settings from the config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // E.g., `APP_DATABASE__MAX_CONNECTIONS=10` would set `Settings.database.max_connections`
            .add_source(
                Environment::with_prefix("app")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars.clone())),
            );

        // Blank values count as unset, e.g. `MAIL_PORT=` in a `.env` file.
        for (var, key) in ENV_OVERRIDES {
            let value = vars.get(*var).filter(|v| !v.trim().is_empty()).cloned();
            builder = builder.set_override_option(*key, value)?;
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn defaults(
        builder: ConfigBuilder<DefaultState>,
        run_mode: &str,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        builder
            .set_default("environment", run_mode)?
            // Left empty so `validate` reports a missing `DB_URL` by name
            .set_default("database.url", "")?
            .set_default("database.max_connections", 5)?
            .set_default("mail.use_tls", false)?
            .set_default("mail.use_ssl", true)?
            .set_default("security.secret_key", "minigameweb")?
            .set_default("security.password_salt", "minigamepwsalt")?
            .set_default("security.bcrypt_cost", bcrypt::DEFAULT_COST as i64)?
            .set_default("security.confirm_token_max_age_secs", 3600)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Message("DB_URL is not set".into()));
        }
        Ok(())
    }

    pub fn is_debug(&self) -> bool {
        self.environment != "prod"
    }

    #[cfg(test)]
    pub fn new_for_test() -> Result<Self, ConfigError> {
        Self::defaults(Config::builder(), "test")?
            .set_override("database.url", "sqlite::memory:")?
            .set_override("database.max_connections", 1)?
            .set_override("security.bcrypt_cost", 4)?
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Map<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::new_for_test().expect("Failed to load settings");
        assert_eq!(settings.environment, "test");
        assert_eq!(settings.database.url, "sqlite::memory:");
        assert_eq!(settings.database.max_connections, 1);
        assert_eq!(settings.security.secret_key, "minigameweb");
        assert_eq!(settings.security.password_salt, "minigamepwsalt");
        assert!(!settings.mail.use_tls);
        assert!(settings.mail.use_ssl);
        assert!(settings.mail.server.is_none());
    }

    #[test]
    fn test_plain_environment_variables() {
        let settings = Settings::from_vars(vars(&[
            ("DB_URL", "sqlite://minigame.db"),
            ("MAIL_SERVER", "smtp.example.com"),
            ("MAIL_PORT", "465"),
            ("MAIL_USERNAME", "noreply@example.com"),
            ("MAIL_PASSWORD", "hunter2"),
        ]))
        .expect("Failed to load settings");

        assert_eq!(settings.environment, "dev");
        assert!(settings.is_debug());
        assert_eq!(settings.database.url, "sqlite://minigame.db");
        assert_eq!(settings.database.max_connections, 5);
        assert_eq!(settings.mail.server.as_deref(), Some("smtp.example.com"));
        assert_eq!(settings.mail.port, Some(465));
        assert_eq!(settings.mail.username.as_deref(), Some("noreply@example.com"));
        assert_eq!(settings.mail.password.as_deref(), Some("hunter2"));
        assert_eq!(settings.security.bcrypt_cost, bcrypt::DEFAULT_COST);
    }

    #[test]
    fn test_blank_mail_variables_are_unset() {
        let settings = Settings::from_vars(vars(&[
            ("DB_URL", "sqlite://minigame.db"),
            ("MAIL_SERVER", ""),
            ("MAIL_PORT", ""),
            ("MAIL_USERNAME", " "),
            ("MAIL_PASSWORD", ""),
        ]))
        .expect("Blank mail settings should not abort startup");

        assert!(settings.mail.server.is_none());
        assert!(settings.mail.port.is_none());
        assert!(settings.mail.username.is_none());
        assert!(settings.mail.password.is_none());
    }

    #[test]
    fn test_missing_db_url() {
        let result = Settings::from_vars(vars(&[("MAIL_SERVER", "smtp.example.com")]));
        match result {
            Err(e) => assert!(e.to_string().contains("DB_URL")),
            Ok(_) => panic!("Expected error without DB_URL"),
        }

        let result = Settings::from_vars(vars(&[("DB_URL", "  ")]));
        match result {
            Err(e) => assert!(e.to_string().contains("DB_URL")),
            Ok(_) => panic!("Expected error for blank DB_URL"),
        }
    }

    #[test]
    fn test_environment_override() {
        let settings = Settings::from_vars(vars(&[
            ("RUN_MODE", "prod"),
            ("DB_URL", "sqlite://minigame.db"),
            ("APP_DATABASE__MAX_CONNECTIONS", "12"),
            ("APP_SECURITY__SECRET_KEY", "override_secret"),
        ]))
        .expect("Failed to load settings");

        assert_eq!(settings.environment, "prod");
        assert!(!settings.is_debug());
        assert_eq!(settings.database.max_connections, 12);
        assert_eq!(settings.security.secret_key, "override_secret");
    }

    #[test]
    fn test_invalid_max_connections() {
        let result = Settings::from_vars(vars(&[
            ("DB_URL", "sqlite://minigame.db"),
            ("APP_DATABASE__MAX_CONNECTIONS", "lots"),
        ]));

        assert!(result.is_err(), "Expected error for invalid max_connections");
    }
}
