//! Process settings read from the environment.
//!
//! A `.env` file in the working directory is loaded first if present.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Default bind address.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default port.
pub const DEFAULT_PORT: u16 = 3000;
/// Default statutory configuration directory.
pub const DEFAULT_CONFIG_DIR: &str = "./config/kenya";

/// Server and data-source settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Host to bind (`SERVER_HOST`).
    pub server_host: String,
    /// Port to bind (`SERVER_PORT`).
    pub server_port: u16,
    /// Statutory configuration directory (`PAYROLL_CONFIG_DIR`).
    pub config_dir: PathBuf,
    /// Salary roster file (`PAYROLL_SALARY_ROSTER`).
    pub salary_roster: PathBuf,
}

impl Settings {
    /// Reads settings from the process environment and `.env`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`, applying defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let server_port = match lookup("SERVER_PORT") {
            Some(port) => port
                .parse::<u16>()
                .with_context(|| format!("SERVER_PORT must be a port number, got '{port}'"))?,
            None => DEFAULT_PORT,
        };

        let config_dir = lookup("PAYROLL_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR));

        let salary_roster = lookup("PAYROLL_SALARY_ROSTER")
            .map(PathBuf::from)
            .unwrap_or_else(|| config_dir.join("salaries.yaml"));

        Ok(Self {
            server_host,
            server_port,
            config_dir,
            salary_roster,
        })
    }

    /// Returns the socket address to bind.
    pub fn bind_address(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server_host, self.server_port)
            .parse()
            .with_context(|| {
                format!(
                    "invalid bind address {}:{}",
                    self.server_host, self.server_port
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings.server_host, "127.0.0.1");
        assert_eq!(settings.server_port, 3000);
        assert_eq!(settings.config_dir, PathBuf::from("./config/kenya"));
        assert_eq!(
            settings.salary_roster,
            PathBuf::from("./config/kenya/salaries.yaml")
        );
        assert_eq!(
            settings.bind_address().unwrap(),
            "127.0.0.1:3000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("SERVER_HOST", "0.0.0.0"),
            ("SERVER_PORT", "8080"),
            ("PAYROLL_CONFIG_DIR", "/etc/payroll"),
        ]))
        .unwrap();

        assert_eq!(settings.server_port, 8080);
        assert_eq!(settings.config_dir, PathBuf::from("/etc/payroll"));
        assert_eq!(
            settings.salary_roster,
            PathBuf::from("/etc/payroll/salaries.yaml")
        );
    }

    #[test]
    fn test_explicit_roster_path() {
        let settings = Settings::from_lookup(lookup_from(&[(
            "PAYROLL_SALARY_ROSTER",
            "/data/salaries.yaml",
        )]))
        .unwrap();
        assert_eq!(settings.salary_roster, PathBuf::from("/data/salaries.yaml"));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = Settings::from_lookup(lookup_from(&[("SERVER_PORT", "eighty")]));
        assert!(result.is_err());
    }
}
