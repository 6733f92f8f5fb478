use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use budgetflow_core::tasks::MirrorPolicy;

use crate::auth::{decode_secret_key, AuthConfig};

/// Credentials of the user created on first start when the users table is empty.
#[derive(Clone, Debug)]
pub struct AdminSeed {
    pub username: String,
    /// Argon2 PHC string.
    pub password_hash: String,
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub mirror_policy: MirrorPolicy,
    /// `None` disables authentication; every request then carries all capabilities.
    pub auth: Option<AuthConfig>,
    pub admin_seed: Option<AdminSeed>,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = env_or("BF_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid BF_LISTEN_ADDR")?;
        let db_path = env_or("BF_DB_PATH", "./db/app.db");
        let cors_allow = env_or("BF_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = env_or("BF_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .unwrap_or(30000);
        let mirror_policy: MirrorPolicy = env_or("BF_MIRROR_POLICY", "lenient")
            .parse()
            .context("Invalid BF_MIRROR_POLICY")?;

        let auth = match non_empty_env("BF_SECRET_KEY") {
            Some(raw) => {
                let ttl_minutes: u64 = env_or("BF_AUTH_TOKEN_TTL_MINUTES", "60")
                    .parse()
                    .context("Invalid BF_AUTH_TOKEN_TTL_MINUTES")?;
                Some(AuthConfig {
                    jwt_secret: decode_secret_key(&raw)?,
                    access_token_ttl: Duration::from_secs(ttl_minutes * 60),
                })
            }
            None => None,
        };

        let admin_seed = non_empty_env("BF_ADMIN_PASSWORD_HASH").map(|password_hash| AdminSeed {
            username: env_or("BF_ADMIN_USERNAME", "admin"),
            password_hash,
        });

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            mirror_policy,
            auth,
            admin_seed,
        })
    }
}
