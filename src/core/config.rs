use serde::Deserialize;

use crate::core::error::ConfigError;

// development fallback only; production startup fails without a real secret
const DEV_SECRET: &str = "dev-secret";

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct Args {
    pub(crate) database_host: String,
    pub(crate) database_port: u16,
    pub(crate) database_name: String,
    pub(crate) database_user: String,
    pub(crate) database_password: String,
    pub(crate) log_level: String,
    pub(crate) port: u16,
    pub(crate) environment: String,
    pub(crate) secret: Option<String>,
    pub(crate) auth_secret: Option<String>,
    pub(crate) openai_api_key: Option<String>,
    pub(crate) media_dir: String,
}

impl Args {
    pub(crate) fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Resolves the token-signing secret: `ATELIER_SECRET`, then the legacy
    /// `ATELIER_AUTH_SECRET` alias, then a development-only default.
    ///
    /// Rotating the secret invalidates every outstanding session at once;
    /// there is no grace period.
    pub(crate) fn session_secret(&self) -> Result<String, ConfigError> {
        if let Some(secret) = &self.secret {
            return Ok(secret.clone());
        }

        if let Some(secret) = &self.auth_secret {
            return Ok(secret.clone());
        }

        if self.is_production() {
            return Err(ConfigError::MissingSecret);
        }

        Ok(DEV_SECRET.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            database_host: "localhost".to_string(),
            database_port: 5432,
            database_name: "atelier".to_string(),
            database_user: "atelier".to_string(),
            database_password: "atelier".to_string(),
            log_level: "info".to_string(),
            port: 3000,
            environment: "development".to_string(),
            secret: None,
            auth_secret: None,
            openai_api_key: None,
            media_dir: "media".to_string(),
        }
    }

    #[test]
    fn test_secret_candidates_in_order() {
        let mut args = args();
        args.secret = Some("primary".to_string());
        args.auth_secret = Some("legacy".to_string());

        assert_eq!(args.session_secret().unwrap(), "primary");

        args.secret = None;

        assert_eq!(args.session_secret().unwrap(), "legacy");
    }

    #[test]
    fn test_development_falls_back_to_default() {
        assert_eq!(args().session_secret().unwrap(), DEV_SECRET);
    }

    #[test]
    fn test_production_without_secret_fails_closed() {
        let mut args = args();
        args.environment = "production".to_string();

        assert!(args.session_secret().is_err());
    }
}
