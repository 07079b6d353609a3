//! Runtime settings from environment. `DATABASE_URL` wins when present; otherwise the
//! connection is assembled from `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`
//! and `DB_TRUST_SERVER_CERTIFICATE`.

use crate::error::ConfigError;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_DB_USER: &str = "postgres";
const DEFAULT_DB_NAME: &str = "products";

#[derive(Debug, Clone)]
pub struct Settings {
    pub database: PgConnectOptions,
    pub listen_addr: SocketAddr,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database = match get("DATABASE_URL") {
            Some(url) => PgConnectOptions::from_str(&url).map_err(ConfigError::DatabaseUrl)?,
            None => {
                let port = match get("DB_PORT") {
                    Some(p) => p.parse::<u16>().map_err(|_| ConfigError::Port {
                        var: "DB_PORT",
                        value: p,
                    })?,
                    None => DEFAULT_DB_PORT,
                };
                let trust = match get("DB_TRUST_SERVER_CERTIFICATE") {
                    Some(v) => parse_bool(&v).ok_or(ConfigError::Bool {
                        var: "DB_TRUST_SERVER_CERTIFICATE",
                        value: v,
                    })?,
                    None => false,
                };
                let mut opts = PgConnectOptions::new()
                    .host(&get("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.into()))
                    .port(port)
                    .username(&get("DB_USER").unwrap_or_else(|| DEFAULT_DB_USER.into()))
                    .database(&get("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.into()))
                    .ssl_mode(ssl_mode_for(trust));
                if let Some(password) = get("DB_PASSWORD") {
                    opts = opts.password(&password);
                }
                opts
            }
        };

        let listen = get("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.into());
        let listen_addr = listen.parse().map_err(|_| ConfigError::ListenAddr {
            var: "LISTEN_ADDR",
            value: listen.clone(),
        })?;

        Ok(Settings {
            database,
            listen_addr,
        })
    }
}

/// Trusting the server certificate means: encrypt, but skip verification.
fn ssl_mode_for(trust_server_certificate: bool) -> PgSslMode {
    if trust_server_certificate {
        PgSslMode::Require
    } else {
        PgSslMode::Prefer
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_when_nothing_set() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.database.get_host(), "localhost");
        assert_eq!(s.database.get_port(), 5432);
        assert_eq!(s.database.get_username(), "postgres");
        assert_eq!(s.database.get_database(), Some("products"));
        assert!(matches!(s.database.get_ssl_mode(), PgSslMode::Prefer));
        assert_eq!(s.listen_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn discrete_parts() {
        let s = settings(&[
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_USER", "app"),
            ("DB_PASSWORD", "secret"),
            ("DB_NAME", "inventory"),
            ("DB_TRUST_SERVER_CERTIFICATE", "True"),
            ("LISTEN_ADDR", "127.0.0.1:9000"),
        ])
        .unwrap();
        assert_eq!(s.database.get_host(), "db.internal");
        assert_eq!(s.database.get_port(), 6543);
        assert_eq!(s.database.get_username(), "app");
        assert_eq!(s.database.get_database(), Some("inventory"));
        assert!(matches!(s.database.get_ssl_mode(), PgSslMode::Require));
        assert_eq!(s.listen_addr.port(), 9000);
    }

    #[test]
    fn database_url_wins() {
        let s = settings(&[
            ("DATABASE_URL", "postgres://u:p@pg.example:5433/shop"),
            ("DB_HOST", "ignored"),
        ])
        .unwrap();
        assert_eq!(s.database.get_host(), "pg.example");
        assert_eq!(s.database.get_port(), 5433);
        assert_eq!(s.database.get_database(), Some("shop"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let s = settings(&[("DB_HOST", "  "), ("DATABASE_URL", "")]).unwrap();
        assert_eq!(s.database.get_host(), "localhost");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            settings(&[("DB_PORT", "http")]),
            Err(ConfigError::Port { .. })
        ));
        assert!(matches!(
            settings(&[("DB_TRUST_SERVER_CERTIFICATE", "maybe")]),
            Err(ConfigError::Bool { .. })
        ));
        assert!(matches!(
            settings(&[("LISTEN_ADDR", "nowhere")]),
            Err(ConfigError::ListenAddr { .. })
        ));
        assert!(matches!(
            settings(&[("DATABASE_URL", "not a url")]),
            Err(ConfigError::DatabaseUrl(_))
        ));
    }
}
