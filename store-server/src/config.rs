//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration, loaded from environment variables.
///
/// | Env var | Default | Notes |
/// |---------|---------|-------|
/// | `DATABASE_PATH` | `storefront.db` | SQLite database file |
/// | `HTTP_PORT` | `8080` | |
/// | `ENVIRONMENT` | `development` | development \| staging \| production |
/// | `JWT_SECRET` | dev fallback | required outside development |
/// | `PAYMENT_BASE_URL` | sandbox URL | Snap-style gateway base URL |
/// | `PAYMENT_SERVER_KEY` | dev fallback | required outside development |
/// | `DELIVERY_FEE` | `15000` | flat fee added to every order |
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file path
    pub database_path: String,
    /// HTTP API port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// JWT signing secret for identity tokens
    pub jwt_secret: String,
    /// Payment gateway base URL
    pub payment_base_url: String,
    /// Payment gateway server key (Basic auth)
    pub payment_server_key: String,
    /// Flat delivery fee in minor units
    pub delivery_fee: i64,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in
    /// non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "storefront.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            payment_base_url: std::env::var("PAYMENT_BASE_URL")
                .unwrap_or_else(|_| "https://app.sandbox.midtrans.com".into()),
            payment_server_key: Self::require_secret("PAYMENT_SERVER_KEY", &environment)?,
            delivery_fee: std::env::var("DELIVERY_FEE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15_000),
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_secret_dev_fallback() {
        let val = Config::require_secret("STORE_TEST_UNSET_SECRET", "development").unwrap();
        assert!(val.starts_with("dev-"));
    }

    #[test]
    fn test_require_secret_rejected_in_production() {
        let err = Config::require_secret("STORE_TEST_UNSET_SECRET", "production");
        assert!(err.is_err());
    }
}
