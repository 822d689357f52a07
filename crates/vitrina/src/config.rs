//! Environment-driven test configuration.
//!
//! Every knob has a documented default so the suite runs against the public
//! demo storefront with no setup.

/// Test configuration resolved from environment variables
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Root URL of the application under test (`BASE_URL`)
    pub base_url: String,
    /// Username accepted by the login form (`VALID_USERNAME`)
    pub valid_username: String,
    /// Password accepted by the login form (`VALID_PASSWORD`)
    pub valid_password: String,
    /// Username the login form rejects (`INVALID_USERNAME`)
    pub invalid_username: String,
    /// Password the login form rejects (`INVALID_PASSWORD`)
    pub invalid_password: String,
}

impl TestConfig {
    /// Resolve configuration from the environment, falling back to defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            base_url: env_or("BASE_URL", "https://www.saucedemo.com"),
            valid_username: env_or("VALID_USERNAME", "standard_user"),
            valid_password: env_or("VALID_PASSWORD", "secret_sauce"),
            invalid_username: env_or("INVALID_USERNAME", "invalid_user"),
            invalid_password: env_or("INVALID_PASSWORD", "invalid_password"),
        }
    }
}

impl Default for TestConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
