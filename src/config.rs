use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub token_ttl_minutes: i64,
    pub cors_origins: Vec<String>,
    pub company_store: CompanyStoreKind,
    pub bootstrap_admin: Option<BootstrapAdmin>,
    pub log_level: String,
}

/// Account ensured to exist with the `super_admin` role at startup.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyStoreKind {
    Postgres,
    /// Process-local, seeded with demo companies and lost on restart.
    Memory,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;
        let jwt_secret = env_required("JWT_SECRET")?;

        let host: IpAddr = env_or("JOBBOARD_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid JOBBOARD_HOST: {e}"))?;

        // PORT is honoured for PaaS deployments that inject it.
        let port_raw = std::env::var("JOBBOARD_PORT")
            .or_else(|_| std::env::var("PORT"))
            .unwrap_or_else(|_| "10000".to_string());
        let port: u16 = port_raw
            .parse()
            .map_err(|e| format!("Invalid JOBBOARD_PORT: {e}"))?;

        let upload_dir = PathBuf::from(env_or("JOBBOARD_UPLOAD_DIR", "uploads"));

        let max_upload_bytes: usize = env_or("JOBBOARD_MAX_UPLOAD_BYTES", "10485760")
            .parse()
            .map_err(|e| format!("Invalid JOBBOARD_MAX_UPLOAD_BYTES: {e}"))?;

        let token_ttl_minutes: i64 = env_or("JOBBOARD_TOKEN_TTL_MINUTES", "60")
            .parse()
            .map_err(|e| format!("Invalid JOBBOARD_TOKEN_TTL_MINUTES: {e}"))?;
        if token_ttl_minutes <= 0 {
            return Err("Invalid JOBBOARD_TOKEN_TTL_MINUTES: must be positive".to_string());
        }

        let cors_origins = parse_list(&env_or("JOBBOARD_CORS_ORIGINS", "http://localhost:3000"));

        let company_store = match env_or("JOBBOARD_COMPANY_STORE", "postgres").as_str() {
            "postgres" => CompanyStoreKind::Postgres,
            "memory" => CompanyStoreKind::Memory,
            other => {
                return Err(format!(
                    "Invalid JOBBOARD_COMPANY_STORE '{other}': expected 'postgres' or 'memory'"
                ));
            }
        };

        let bootstrap_admin = bootstrap_from(
            std::env::var("JOBBOARD_BOOTSTRAP_ADMIN_EMAIL").ok(),
            std::env::var("JOBBOARD_BOOTSTRAP_ADMIN_PASSWORD").ok(),
            std::env::var("JOBBOARD_BOOTSTRAP_ADMIN_NAME").ok(),
        )?;

        let log_level = env_or("JOBBOARD_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            jwt_secret,
            host,
            port,
            upload_dir,
            max_upload_bytes,
            token_ttl_minutes,
            cors_origins,
            company_store,
            bootstrap_admin,
            log_level,
        })
    }
}

/// Both credentials or neither; a blank value counts as misconfigured.
fn bootstrap_from(
    email: Option<String>,
    password: Option<String>,
    full_name: Option<String>,
) -> Result<Option<BootstrapAdmin>, String> {
    match (email, password) {
        (None, None) => Ok(None),
        (Some(email), Some(password)) => {
            let email = email.trim();
            if email.is_empty() {
                return Err("JOBBOARD_BOOTSTRAP_ADMIN_EMAIL must not be blank".to_string());
            }
            if password.is_empty() {
                return Err("JOBBOARD_BOOTSTRAP_ADMIN_PASSWORD must not be blank".to_string());
            }
            Ok(Some(BootstrapAdmin {
                email: email.to_string(),
                password,
                full_name: full_name.filter(|name| !name.trim().is_empty()),
            }))
        }
        _ => Err(
            "JOBBOARD_BOOTSTRAP_ADMIN_EMAIL and JOBBOARD_BOOTSTRAP_ADMIN_PASSWORD must be set together"
                .to_string(),
        ),
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::{bootstrap_from, parse_list};

    fn some(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn parse_list_skips_blank_entries() {
        assert_eq!(
            parse_list(" http://a.test , ,http://b.test,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn bootstrap_admin_is_optional_but_complete() {
        assert!(bootstrap_from(None, None, None).unwrap().is_none());

        let admin = bootstrap_from(some(" root@test.com "), some("secret-pass"), some("Root"))
            .unwrap()
            .unwrap();
        assert_eq!(admin.email, "root@test.com");
        assert_eq!(admin.password, "secret-pass");
        assert_eq!(admin.full_name.as_deref(), Some("Root"));

        assert!(bootstrap_from(some("root@test.com"), None, None).is_err());
        assert!(bootstrap_from(None, some("secret-pass"), None).is_err());
    }

    #[test]
    fn blank_bootstrap_credentials_are_rejected() {
        let err = bootstrap_from(some("  "), some("secret-pass"), None).unwrap_err();
        assert!(err.contains("EMAIL"));
        let err = bootstrap_from(some("root@test.com"), some(""), None).unwrap_err();
        assert!(err.contains("PASSWORD"));
    }
}
