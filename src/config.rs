use std::env;

/// Insecure fallback signing secret, intended for local development only.
/// Every deployed environment must set `JWT_SECRET` explicitly.
pub const DEV_JWT_SECRET: &str = "dev_only_change_me";

const DEFAULT_TOKEN_TTL_MINUTES: i64 = 240;

pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub server_host: String,
    pub auth: AuthConfig,
}

/// Settings consumed by the token service and the admin gate.
///
/// Loaded once at startup and handed to the components that need them at
/// construction time; nothing in the request path reads the environment.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Symmetric secret used to sign and verify access tokens.
    pub jwt_secret: String,
    /// Lifetime of issued tokens, in minutes.
    pub token_ttl_minutes: i64,
    /// Lowercased emails permitted to call admin endpoints. Empty means
    /// no account has admin access.
    pub admin_emails: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            auth: AuthConfig::from_env(),
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| DEV_JWT_SECRET.to_string()),
            token_ttl_minutes: env::var("TOKEN_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TOKEN_TTL_MINUTES),
            admin_emails: parse_admin_emails(&env::var("ADMIN_EMAILS").unwrap_or_default()),
        }
    }

    /// Case-insensitive membership check against the admin allowlist.
    pub fn is_admin_email(&self, email: &str) -> bool {
        let email = email.to_lowercase();
        self.admin_emails.iter().any(|allowed| *allowed == email)
    }
}

fn parse_admin_emails(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}
