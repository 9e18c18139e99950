//! Artificial network latency applied by the facade after the connection check.

use std::collections::HashMap;
use std::time::Duration;

use rand::Rng;

use configs::FacadeConfig;

#[derive(Debug, Clone, Default)]
pub struct LatencyProfile {
    min: Duration,
    max: Duration,
    slow: HashMap<String, Duration>,
}

impl LatencyProfile {
    /// No delay at all; used by tests.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn fixed(delay: Duration) -> Self {
        Self::between(delay, delay)
    }

    /// Uniform delay in `[min, max]`. Bounds are swapped if given in reverse.
    pub fn between(min: Duration, max: Duration) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self { min, max, slow: HashMap::new() }
    }

    /// Give `operation` a fixed delay instead of the normal range.
    pub fn with_slow(mut self, operation: impl Into<String>, delay: Duration) -> Self {
        self.slow.insert(operation.into(), delay);
        self
    }

    pub fn from_config(cfg: &FacadeConfig) -> Self {
        let slow_delay = Duration::from_millis(cfg.slow_latency_ms);
        cfg.slow_operations.iter().fold(
            Self::between(Duration::from_millis(cfg.latency_min_ms), Duration::from_millis(cfg.latency_max_ms)),
            |profile, op| profile.with_slow(op.clone(), slow_delay),
        )
    }

    pub fn delay_for(&self, operation: &str) -> Duration {
        if let Some(d) = self.slow.get(operation) {
            return *d;
        }
        if self.min == self.max {
            return self.min;
        }
        let ms = rand::thread_rng().gen_range(self.min.as_millis() as u64..=self.max.as_millis() as u64);
        Duration::from_millis(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_draws_stay_within_bounds() {
        let profile = LatencyProfile::between(Duration::from_millis(100), Duration::from_millis(300));
        for _ in 0..500 {
            let d = profile.delay_for("view-site");
            assert!(d >= Duration::from_millis(100) && d <= Duration::from_millis(300));
        }
    }

    #[test]
    fn slow_operations_get_fixed_delay() {
        let profile = LatencyProfile::none().with_slow("view-site", Duration::from_secs(6));
        assert_eq!(profile.delay_for("view-site"), Duration::from_secs(6));
        assert_eq!(profile.delay_for("delete-site"), Duration::ZERO);
    }

    #[test]
    fn built_from_config() {
        let cfg = FacadeConfig {
            latency_min_ms: 50,
            latency_max_ms: 50,
            slow_operations: vec!["search-sites".into()],
            slow_latency_ms: 7000,
            ..Default::default()
        };
        let profile = LatencyProfile::from_config(&cfg);
        assert_eq!(profile.delay_for("view-site"), Duration::from_millis(50));
        assert_eq!(profile.delay_for("search-sites"), Duration::from_millis(7000));
    }
}
