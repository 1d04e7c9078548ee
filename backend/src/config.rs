//! # Configuration
//!
//! Start-up settings, resolved in three layers: built-in defaults, an
//! optional YAML file named by `ATTENDANCE_CONFIG`, then individual
//! `ATTENDANCE_*` environment variables.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use tracing::info;

use crate::domain::TermWindow;

pub const CONFIG_FILE_VAR: &str = "ATTENDANCE_CONFIG";

/// Teacher account created at start-up if it does not exist yet
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BootstrapTeacher {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub allowed_origin: String,
    pub session_ttl_hours: i64,
    pub term_start: NaiveDate,
    pub term_end: NaiveDate,
    pub bootstrap_teacher: Option<BootstrapTeacher>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:attendance.db".to_string(),
            bind_addr: "127.0.0.1:3000".to_string(),
            allowed_origin: "http://localhost:8080".to_string(),
            session_ttl_hours: 24,
            term_start: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap_or(NaiveDate::MIN),
            term_end: NaiveDate::from_ymd_opt(2025, 12, 15).unwrap_or(NaiveDate::MIN),
            bootstrap_teacher: None,
        }
    }
}

impl AppConfig {
    /// Resolve the configuration from the process environment
    pub fn load() -> Result<Self> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Resolve the configuration with `lookup` standing in for the environment
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match lookup(CONFIG_FILE_VAR) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from {:?}", path);

        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: AppConfig = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup("ATTENDANCE_DATABASE_URL") {
            self.database_url = url;
        }
        if let Some(addr) = lookup("ATTENDANCE_BIND_ADDR") {
            self.bind_addr = addr;
        }
        if let Some(origin) = lookup("ATTENDANCE_ALLOWED_ORIGIN") {
            self.allowed_origin = origin;
        }
        if let Some(hours) = lookup("ATTENDANCE_SESSION_TTL_HOURS") {
            self.session_ttl_hours = hours
                .trim()
                .parse()
                .with_context(|| format!("ATTENDANCE_SESSION_TTL_HOURS is not a number: {}", hours))?;
        }
        if let Some(start) = lookup("ATTENDANCE_TERM_START") {
            self.term_start = parse_date("ATTENDANCE_TERM_START", &start)?;
        }
        if let Some(end) = lookup("ATTENDANCE_TERM_END") {
            self.term_end = parse_date("ATTENDANCE_TERM_END", &end)?;
        }
        if let Some(teacher) = lookup("ATTENDANCE_BOOTSTRAP_TEACHER") {
            let (username, password) = teacher
                .split_once(':')
                .ok_or_else(|| anyhow!("ATTENDANCE_BOOTSTRAP_TEACHER must look like username:password"))?;
            self.bootstrap_teacher = Some(BootstrapTeacher {
                username: username.to_string(),
                password: password.to_string(),
            });
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.session_ttl_hours <= 0 {
            bail!("Session TTL must be positive, got {} hours", self.session_ttl_hours);
        }
        if self.term_start > self.term_end {
            bail!("Term start {} is after term end {}", self.term_start, self.term_end);
        }
        Ok(())
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::hours(self.session_ttl_hours)
    }

    pub fn term_window(&self) -> TermWindow {
        TermWindow {
            start: self.term_start,
            end: self.term_end,
        }
    }
}

fn parse_date(key: &str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("{} must be a YYYY-MM-DD date, got {}", key, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::resolve(lookup_from(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.database_url, "sqlite:attendance.db");
        assert_eq!(config.session_ttl(), Duration::hours(24));
        assert_eq!(config.term_window().start, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
        assert_eq!(config.term_window().end, NaiveDate::from_ymd_opt(2025, 12, 15).unwrap());
    }

    #[test]
    fn test_yaml_file_then_env_overrides() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "bind_addr: 0.0.0.0:8000\nterm_start: 2026-01-05\nterm_end: 2026-04-02\nbootstrap_teacher:\n  username: head\n  password: secret"
        )
        .unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config = AppConfig::resolve(lookup_from(&[
            (CONFIG_FILE_VAR, path.as_str()),
            ("ATTENDANCE_BIND_ADDR", "0.0.0.0:9000"),
            ("ATTENDANCE_SESSION_TTL_HOURS", "2"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.session_ttl_hours, 2);
        assert_eq!(config.term_start, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        assert_eq!(config.database_url, "sqlite:attendance.db");
        assert_eq!(
            config.bootstrap_teacher,
            Some(BootstrapTeacher {
                username: "head".to_string(),
                password: "secret".to_string(),
            })
        );
    }

    #[test]
    fn test_bootstrap_teacher_from_env() {
        let config = AppConfig::resolve(lookup_from(&[("ATTENDANCE_BOOTSTRAP_TEACHER", "admin:pa:ss")])).unwrap();
        let teacher = config.bootstrap_teacher.unwrap();
        assert_eq!(teacher.username, "admin");
        assert_eq!(teacher.password, "pa:ss");
    }

    #[test]
    fn test_malformed_values_fail() {
        assert!(AppConfig::resolve(lookup_from(&[("ATTENDANCE_SESSION_TTL_HOURS", "a day")])).is_err());
        assert!(AppConfig::resolve(lookup_from(&[("ATTENDANCE_SESSION_TTL_HOURS", "0")])).is_err());
        assert!(AppConfig::resolve(lookup_from(&[("ATTENDANCE_TERM_START", "01/09/2025")])).is_err());
        assert!(AppConfig::resolve(lookup_from(&[("ATTENDANCE_BOOTSTRAP_TEACHER", "nopassword")])).is_err());
        assert!(AppConfig::resolve(lookup_from(&[("ATTENDANCE_TERM_START", "2026-01-01")])).is_err());
        assert!(AppConfig::resolve(lookup_from(&[(CONFIG_FILE_VAR, "/nonexistent/attendance.yaml")])).is_err());
    }
}
