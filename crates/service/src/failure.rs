//! Failure injection for the simulated remote channel.
//!
//! The facade receives a policy at construction and consults it once per
//! call, before it touches the store.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;

use configs::FacadeConfig;

/// Decides whether a call's connection check fails.
pub trait FailureInjectionPolicy: Send + Sync + fmt::Debug {
    fn should_fail(&self, operation: &str) -> bool;
}

/// Fails each call independently with a fixed probability.
#[derive(Debug, Clone, Copy)]
pub struct RandomFailure {
    probability: f64,
}

impl RandomFailure {
    /// `probability` is clamped to `[0, 1]`.
    pub fn new(probability: f64) -> Self {
        let probability = if probability.is_nan() { 0.0 } else { probability.clamp(0.0, 1.0) };
        Self { probability }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl FailureInjectionPolicy for RandomFailure {
    fn should_fail(&self, _operation: &str) -> bool {
        rand::thread_rng().gen_bool(self.probability)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverFail;

impl FailureInjectionPolicy for NeverFail {
    fn should_fail(&self, _operation: &str) -> bool { false }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysFail;

impl FailureInjectionPolicy for AlwaysFail {
    fn should_fail(&self, _operation: &str) -> bool { true }
}

/// A failure flag that can be flipped while the facade is live.
#[derive(Debug, Default)]
pub struct FailureSwitch {
    failing: AtomicBool,
}

impl FailureSwitch {
    pub fn new(failing: bool) -> Self {
        Self { failing: AtomicBool::new(failing) }
    }

    pub fn set(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn is_failing(&self) -> bool {
        self.failing.load(Ordering::SeqCst)
    }
}

impl FailureInjectionPolicy for FailureSwitch {
    fn should_fail(&self, _operation: &str) -> bool {
        self.is_failing()
    }
}

/// Build the policy described by the `[facade]` config section.
/// `simulate_failure` overrides `failure_probability` when set.
pub fn policy_from_config(cfg: &FacadeConfig) -> Arc<dyn FailureInjectionPolicy> {
    match cfg.simulate_failure {
        Some(true) => Arc::new(AlwaysFail),
        Some(false) => Arc::new(NeverFail),
        None => Arc::new(RandomFailure::new(cfg.failure_probability)),
    }
}
