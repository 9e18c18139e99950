use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub facade: FacadeConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Simulated remote channel behaviour.
#[derive(Debug, Clone, Deserialize)]
pub struct FacadeConfig {
    /// Probability in `[0, 1]` that a call fails its connection check.
    #[serde(default = "default_failure_probability")]
    pub failure_probability: f64,
    /// Force the connection check: `Some(true)` always fails, `Some(false)` never fails.
    #[serde(default)]
    pub simulate_failure: Option<bool>,
    #[serde(default = "default_latency_min")]
    pub latency_min_ms: u64,
    #[serde(default = "default_latency_max")]
    pub latency_max_ms: u64,
    /// Operations that get `slow_latency_ms` instead of the normal range.
    #[serde(default)]
    pub slow_operations: Vec<String>,
    #[serde(default = "default_slow_latency")]
    pub slow_latency_ms: u64,
}

impl Default for FacadeConfig {
    fn default() -> Self {
        Self {
            failure_probability: default_failure_probability(),
            simulate_failure: None,
            latency_min_ms: default_latency_min(),
            latency_max_ms: default_latency_max(),
            slow_operations: Vec::new(),
            slow_latency_ms: default_slow_latency(),
        }
    }
}

/// Caller-side dispatch settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchConfig {
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self { timeout_secs: default_timeout(), queue_capacity: default_queue_capacity() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `compact` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Fallback directives when `RUST_LOG` is unset.
    #[serde(default)]
    pub filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: default_log_format(), filter: None }
    }
}

fn default_failure_probability() -> f64 { 0.1 }
fn default_latency_min() -> u64 { 100 }
fn default_latency_max() -> u64 { 2500 }
fn default_slow_latency() -> u64 { 6000 }
fn default_timeout() -> u64 { 5 }
fn default_queue_capacity() -> usize { 64 }
fn default_log_format() -> String { "compact".into() }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate(path: &str) -> Result<Self> {
        let mut cfg = load_from_file(path)?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Load from `CONFIG_PATH` (default `config.toml`); see [`AppConfig::load_or_default_from`].
    pub fn load_or_default() -> Result<Self> {
        Self::load_or_default_from(&config_path())
    }

    /// Like [`AppConfig::load_and_validate`], but a missing file yields the defaults.
    /// A file that exists and fails to parse or validate is still an error.
    pub fn load_or_default_from(path: &str) -> Result<Self> {
        if std::fs::metadata(path).is_err() {
            let mut cfg = AppConfig::default();
            cfg.normalize_and_validate()?;
            return Ok(cfg);
        }
        Self::load_and_validate(path)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.facade.validate()?;
        self.dispatch.normalize()?;
        self.logging.normalize();
        Ok(())
    }
}

impl FacadeConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.failure_probability) {
            return Err(anyhow!("facade.failure_probability must be within 0.0..=1.0"));
        }
        if self.latency_min_ms > self.latency_max_ms {
            return Err(anyhow!("facade.latency_min_ms must be <= latency_max_ms"));
        }
        Ok(())
    }
}

impl DispatchConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(anyhow!("dispatch.timeout_secs must be a positive number of seconds"));
        }
        if self.queue_capacity == 0 {
            self.queue_capacity = default_queue_capacity();
        }
        Ok(())
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.format.trim().is_empty() {
            self.format = default_log_format();
        }
        if self.filter.as_deref().is_some_and(|f| f.trim().is_empty()) {
            self.filter = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let mut cfg = parse("").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.dispatch.timeout_secs, 5);
        assert_eq!(cfg.facade.latency_min_ms, 100);
        assert_eq!(cfg.facade.latency_max_ms, 2500);
        assert!(cfg.facade.simulate_failure.is_none());
        assert_eq!(cfg.logging.format, "compact");
    }

    #[test]
    fn partial_sections_keep_field_defaults() {
        let cfg = parse(
            r#"
            [facade]
            failure_probability = 0.5
            slow_operations = ["view-site"]

            [dispatch]
            timeout_secs = 2
            "#,
        )
        .unwrap();
        assert_eq!(cfg.facade.failure_probability, 0.5);
        assert_eq!(cfg.facade.slow_operations, vec!["view-site".to_string()]);
        assert_eq!(cfg.facade.slow_latency_ms, 6000);
        assert_eq!(cfg.dispatch.timeout_secs, 2);
        assert_eq!(cfg.dispatch.queue_capacity, 64);
    }

    #[test]
    fn rejects_out_of_range_probability() {
        let mut cfg = parse("[facade]\nfailure_probability = 1.5\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn rejects_inverted_latency_range() {
        let mut cfg = parse("[facade]\nlatency_min_ms = 900\nlatency_max_ms = 100\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn rejects_zero_timeout_and_fixes_zero_capacity() {
        let mut cfg = parse("[dispatch]\ntimeout_secs = 0\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = parse("[dispatch]\nqueue_capacity = 0\n").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.dispatch.queue_capacity, 64);
    }

    #[test]
    fn blank_log_filter_is_dropped() {
        let mut cfg = parse("[logging]\nformat = \"json\"\nfilter = \"  \"\n").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.logging.format, "json");
        assert!(cfg.logging.filter.is_none());
    }

    fn scratch_file(name: &str, content: &str) -> String {
        let path = std::env::temp_dir().join(format!("site-console-{}-{name}", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("site-console-does-not-exist.toml");
        let cfg = AppConfig::load_or_default_from(&path.to_string_lossy()).unwrap();
        assert_eq!(cfg.dispatch.timeout_secs, 5);
        assert_eq!(cfg.facade.failure_probability, 0.1);
    }

    #[test]
    fn existing_file_is_loaded_and_validated() {
        let good = scratch_file("good.toml", "[dispatch]\ntimeout_secs = 3\nqueue_capacity = 0\n");
        let cfg = AppConfig::load_or_default_from(&good).unwrap();
        assert_eq!(cfg.dispatch.timeout_secs, 3);
        assert_eq!(cfg.dispatch.queue_capacity, 64);

        let bad = scratch_file("bad.toml", "[facade]\nfailure_probability = 2.0\n");
        assert!(AppConfig::load_or_default_from(&bad).is_err());
        assert!(AppConfig::load_and_validate(&bad).is_err());

        let _ = std::fs::remove_file(good);
        let _ = std::fs::remove_file(bad);
    }
}
