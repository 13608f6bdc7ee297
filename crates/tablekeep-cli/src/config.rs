// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_NAME: &str = "tablekeep";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_BASE_URL: &str = "http://localhost:5000/db";
const DEFAULT_TIMEOUT: &str = "10s";
const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub server: Server,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            server: Server::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub base_url: Option<String>,
    pub timeout: Option<String>,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            base_url: Some(DEFAULT_BASE_URL.to_owned()),
            timeout: Some(DEFAULT_TIMEOUT.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            file: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("TABLEKEEP_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set TABLEKEEP_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version; add `version = 1` and put values under [server] and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(base_url) = &self.server.base_url {
            tablekeep_api::validate_base_url(base_url.trim_end_matches('/'))
                .with_context(|| format!("invalid [server] config in {}", path.display()))?;
        }

        if let Some(timeout) = &self.server.timeout {
            let parsed = parse_duration(timeout)?;
            if parsed <= Duration::ZERO {
                bail!(
                    "server.timeout in {} must be positive, got {}",
                    path.display(),
                    timeout
                );
            }
        }

        if let Some(level) = &self.log.level
            && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str())
        {
            bail!(
                "log.level in {} must be one of {}, got {:?}",
                path.display(),
                LOG_LEVELS.join(", "),
                level
            );
        }

        Ok(())
    }

    /// `TABLEKEEP_BASE_URL` wins over `[server].base_url`.
    pub fn base_url(&self) -> String {
        if let Ok(from_env) = env::var("TABLEKEEP_BASE_URL")
            && !from_env.trim().is_empty()
        {
            return from_env.trim().trim_end_matches('/').to_owned();
        }
        self.server
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_owned()
    }

    pub fn timeout(&self) -> Result<Duration> {
        parse_duration(self.server.timeout.as_deref().unwrap_or(DEFAULT_TIMEOUT))
    }

    pub fn log_level(&self) -> String {
        self.log
            .level
            .as_deref()
            .unwrap_or(DEFAULT_LOG_LEVEL)
            .to_ascii_lowercase()
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        if let Some(file) = &self.log.file {
            return Ok(PathBuf::from(file));
        }
        let data_root = dirs::data_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory; set [log].file in the config")
        })?;
        Ok(data_root.join(APP_NAME).join("tablekeep.log"))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# tablekeep config\n# Place this file at: {}\n\nversion = 1\n\n[server]\n# Base URL of the table service; TABLEKEEP_BASE_URL overrides it.\nbase_url = \"{}\"\ntimeout = \"{}\"\n\n[log]\n# trace, debug, info, warn, error or off; RUST_LOG overrides it.\nlevel = \"{}\"\n# Optional. Default is platform data dir (for example ~/.local/share/tablekeep/tablekeep.log)\n# file = \"/absolute/path/to/tablekeep.log\"\n",
            path.display(),
            DEFAULT_BASE_URL,
            DEFAULT_TIMEOUT,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        let secs = mins
            .checked_mul(60)
            .ok_or_else(|| anyhow!("timeout duration {raw:?} is too large"))?;
        return Ok(Duration::from_secs(secs));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 5s)")
}

#[cfg(test)]
mod tests {
    use super::{Config, parse_duration};
    use anyhow::Result;
    use std::path::PathBuf;
    use std::sync::{Mutex, MutexGuard, OnceLock};
    use std::time::Duration;

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var("TABLEKEEP_BASE_URL");
        }
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.base_url(), "http://localhost:5000/db");
        assert_eq!(config.timeout()?, Duration::from_secs(10));
        assert_eq!(config.log_level(), "info");
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[server]\nbase_url=\"http://localhost:5000/db\"\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[server] and [log]"));
        Ok(())
    }

    #[test]
    fn v1_config_parses() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var("TABLEKEEP_BASE_URL");
        }
        let (_temp, path) = write_config(
            "version = 1\n[server]\nbase_url = \"https://admin.example/db/\"\ntimeout = \"750ms\"\n[log]\nlevel = \"DEBUG\"\nfile = \"/tmp/tk.log\"\n",
        )?;

        let config = Config::load(&path)?;
        assert_eq!(config.base_url(), "https://admin.example/db");
        assert_eq!(config.timeout()?, Duration::from_millis(750));
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.log_path()?, PathBuf::from("/tmp/tk.log"));
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn non_http_base_url_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[server]\nbase_url = \"ftp://example.com\"\n")?;
        let error = Config::load(&path).expect_err("ftp base url should fail");
        let message = format!("{error:#}");
        assert!(message.contains("invalid [server] config"));
        assert!(message.contains("http or https"));
        Ok(())
    }

    #[test]
    fn unknown_log_level_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[log]\nlevel = \"loud\"\n")?;
        let error = Config::load(&path).expect_err("unknown level should fail");
        assert!(error.to_string().contains("log.level"));
        Ok(())
    }

    #[test]
    fn zero_timeout_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[server]\ntimeout = \"0s\"\n")?;
        let error = Config::load(&path).expect_err("zero timeout should fail");
        assert!(error.to_string().contains("must be positive"));
        Ok(())
    }

    #[test]
    fn base_url_env_override_wins_over_config() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) =
            write_config("version = 1\n[server]\nbase_url = \"http://from-config/db\"\n")?;
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("TABLEKEEP_BASE_URL", "http://from-env:8080/db/");
        }
        let config = Config::load(&path)?;
        let resolved = config.base_url();
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("TABLEKEEP_BASE_URL");
        }
        assert_eq!(resolved, "http://from-env:8080/db");
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("TABLEKEEP_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("TABLEKEEP_CONFIG_PATH");
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn default_path_uses_config_toml_suffix_when_no_env_override() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var("TABLEKEEP_CONFIG_PATH");
        }
        let path = Config::default_path()?;
        assert!(path.ends_with("tablekeep/config.toml"));
        Ok(())
    }

    #[test]
    fn timeout_parses_ms_seconds_and_minutes() -> Result<()> {
        assert_eq!(parse_duration("500ms")?, Duration::from_millis(500));
        assert_eq!(parse_duration("5s")?, Duration::from_secs(5));
        assert_eq!(parse_duration("2m")?, Duration::from_secs(120));
        Ok(())
    }

    #[test]
    fn timeout_rejects_minutes_that_overflow() {
        let raw = format!("{}m", u64::MAX / 60 + 1);
        let error = parse_duration(&raw).expect_err("overflowing minutes should fail");
        assert!(error.to_string().contains("too large"));
        assert_eq!(
            parse_duration(&format!("{}m", u64::MAX / 60)).ok(),
            Some(Duration::from_secs(u64::MAX / 60 * 60))
        );
    }

    #[test]
    fn timeout_rejects_invalid_duration() {
        let error = parse_duration("oops").expect_err("invalid duration should fail");
        let message = error.to_string();
        assert!(
            message.contains("invalid duration") || message.contains("invalid timeout duration"),
            "unexpected message: {message}"
        );
    }

    #[test]
    fn example_config_round_trips_through_load() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var("TABLEKEEP_BASE_URL");
        }
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        assert!(example.contains("[server]"));
        assert!(example.contains("[log]"));

        std::fs::write(&path, example)?;
        let config = Config::load(&path)?;
        assert_eq!(config.base_url(), "http://localhost:5000/db");
        Ok(())
    }
}
