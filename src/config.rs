use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub max_body_size: usize,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup, so tests do not have to touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_required = |key: &str| {
            lookup(key).ok_or_else(|| format!("Missing required environment variable: {key}"))
        };
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = env_required("DATABASE_URL")?;
        let jwt_secret = env_required("JWT_SECRET")?;
        if jwt_secret.is_empty() {
            return Err("JWT_SECRET must not be empty".to_string());
        }

        let host: IpAddr = env_or("MACARON_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid MACARON_HOST: {e}"))?;

        let port: u16 = env_or("MACARON_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid MACARON_PORT: {e}"))?;

        let upload_dir = PathBuf::from(env_or("MACARON_UPLOAD_DIR", "uploads"));

        let max_body_size: usize = env_or("MACARON_MAX_BODY_SIZE", "10485760")
            .parse()
            .map_err(|e| format!("Invalid MACARON_MAX_BODY_SIZE: {e}"))?;

        let cors_origins: Vec<String> = env_or(
            "MACARON_CORS_ORIGINS",
            "http://localhost:3000,http://localhost:5173",
        )
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

        let log_level = env_or("MACARON_LOG_LEVEL", "info");

        let smtp = match (
            lookup("MACARON_SMTP_HOST"),
            lookup("MACARON_SMTP_PORT"),
            lookup("MACARON_SMTP_USER"),
            lookup("MACARON_SMTP_PASS"),
            lookup("MACARON_SMTP_FROM"),
        ) {
            (Some(host), Some(port), Some(user), Some(pass), Some(from)) => Some(SmtpConfig {
                host,
                port: port
                    .parse()
                    .map_err(|e| format!("Invalid MACARON_SMTP_PORT: {e}"))?,
                user,
                pass,
                from,
            }),
            _ => None,
        };

        Ok(Config {
            database_url,
            jwt_secret,
            host,
            port,
            upload_dir,
            max_body_size,
            cors_origins,
            log_level,
            smtp,
        })
    }
}
