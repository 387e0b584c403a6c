use anyhow::{bail, Context, Result};

/// Which `JobAnalyzer` implementation to wire into the app state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerBackend {
    Keyword,
}

impl AnalyzerBackend {
    fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "keyword" => Ok(AnalyzerBackend::Keyword),
            other => bail!("Unknown JOB_ANALYZER backend '{other}' (expected 'keyword')"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every variable has a default; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_sessions: usize,
    /// Idle sessions older than this are evicted when the store is full.
    pub session_ttl_secs: i64,
    pub job_analyzer: AnalyzerBackend,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            max_sessions: 1000,
            session_ttl_secs: 3600,
            job_analyzer: AnalyzerBackend::Keyword,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let port = match lookup("PORT") {
            Some(v) => v
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => defaults.port,
        };
        let max_sessions = match lookup("MAX_SESSIONS") {
            Some(v) => v
                .parse::<usize>()
                .context("MAX_SESSIONS must be a positive integer")?,
            None => defaults.max_sessions,
        };
        if max_sessions == 0 {
            bail!("MAX_SESSIONS must be greater than zero");
        }
        let session_ttl_secs = match lookup("SESSION_TTL_SECS") {
            Some(v) => v
                .parse::<i64>()
                .context("SESSION_TTL_SECS must be an integer")?,
            None => defaults.session_ttl_secs,
        };
        if session_ttl_secs <= 0 {
            bail!("SESSION_TTL_SECS must be greater than zero");
        }
        let job_analyzer = match lookup("JOB_ANALYZER") {
            Some(v) => AnalyzerBackend::parse(&v)?,
            None => defaults.job_analyzer,
        };

        Ok(Config {
            port,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            max_sessions,
            session_ttl_secs,
            job_analyzer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.max_sessions, 1000);
        assert_eq!(config.session_ttl_secs, 3600);
        assert_eq!(config.job_analyzer, AnalyzerBackend::Keyword);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "3000"),
            ("RUST_LOG", "debug"),
            ("MAX_SESSIONS", "5"),
            ("SESSION_TTL_SECS", "120"),
            ("JOB_ANALYZER", "Keyword"),
        ])
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.rust_log, "debug");
        assert_eq!(config.max_sessions, 5);
        assert_eq!(config.session_ttl_secs, 120);
    }

    #[test]
    fn test_non_positive_ttl_fails() {
        assert!(load(&[("SESSION_TTL_SECS", "0")]).is_err());
        assert!(load(&[("SESSION_TTL_SECS", "-5")]).is_err());
    }

    #[test]
    fn test_invalid_port_fails() {
        assert!(load(&[("PORT", "eighty")]).is_err());
    }

    #[test]
    fn test_zero_sessions_fails() {
        assert!(load(&[("MAX_SESSIONS", "0")]).is_err());
    }

    #[test]
    fn test_unknown_analyzer_fails() {
        let err = load(&[("JOB_ANALYZER", "llm")]).unwrap_err();
        assert!(err.to_string().contains("llm"));
    }
}
