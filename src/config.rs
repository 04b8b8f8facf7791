use std::{net::SocketAddr, str::FromStr};

use anyhow::Context;
use argon2::{Algorithm, Argon2, Params, Version};
use serde::Deserialize;

/// Argon2 cost parameters used for every stored credential.
#[derive(Debug, Clone, Deserialize)]
pub struct HashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl HashingConfig {
    pub fn argon2(&self) -> anyhow::Result<Argon2<'static>> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| anyhow::anyhow!("invalid argon2 params: {}", e))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub hashing: HashingConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port_raw = std::env::var("PORT").or_else(|_| std::env::var("APP_PORT")).ok();
        let defaults = HashingConfig::default();

        let config = Self {
            host,
            port: parse_or("PORT", port_raw, 8080)?,
            database_url,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", var("DB_MAX_CONNECTIONS"), 10)?,
            hashing: HashingConfig {
                memory_kib: parse_or("HASH_MEMORY_KIB", var("HASH_MEMORY_KIB"), defaults.memory_kib)?,
                iterations: parse_or("HASH_ITERATIONS", var("HASH_ITERATIONS"), defaults.iterations)?,
                parallelism: parse_or(
                    "HASH_PARALLELISM",
                    var("HASH_PARALLELISM"),
                    defaults.parallelism,
                )?,
            },
        };

        // argon2 rejects some combinations (e.g. memory < 8 * lanes)
        config.hashing.argon2()?;
        Ok(config)
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

fn var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(v) => v
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("invalid {} value {:?}: {}", key, v, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_falls_back_to_default_when_unset_or_blank() {
        assert_eq!(parse_or::<u16>("PORT", None, 8080).unwrap(), 8080);
        assert_eq!(parse_or::<u16>("PORT", Some("  ".into()), 8080).unwrap(), 8080);
    }

    #[test]
    fn parse_or_reads_value() {
        assert_eq!(parse_or::<u16>("PORT", Some("3000".into()), 8080).unwrap(), 3000);
    }

    #[test]
    fn parse_or_rejects_garbage() {
        let err = parse_or::<u16>("PORT", Some("eighty".into()), 8080).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn default_hashing_params_are_valid() {
        assert!(HashingConfig::default().argon2().is_ok());
    }

    #[test]
    fn zero_iterations_are_rejected() {
        let cfg = HashingConfig {
            iterations: 0,
            ..HashingConfig::default()
        };
        assert!(cfg.argon2().is_err());
    }

    #[test]
    fn addr_combines_host_and_port() {
        let cfg = AppConfig {
            host: "127.0.0.1".into(),
            port: 4000,
            database_url: "postgres://localhost/test".into(),
            db_max_connections: 1,
            hashing: HashingConfig::default(),
        };
        assert_eq!(cfg.addr().unwrap().to_string(), "127.0.0.1:4000");
    }
}
