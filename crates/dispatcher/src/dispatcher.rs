use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dashmap::{mapref::entry::Entry, DashMap};
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use configs::DispatchConfig;
use service::errors::ServiceError;
use service::Services;

use crate::errors::DispatchError;
use crate::operation::{Operation, Output};

/// Identifies one dispatched call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CallHandle(Uuid);

impl CallHandle {
    fn new() -> Self { Self(Uuid::new_v4()) }

    /// First eight hex digits; enough to address a call from the console.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl fmt::Display for CallHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallInfo {
    pub handle: CallHandle,
    pub operation: &'static str,
    pub elapsed: Duration,
}

/// The single outcome delivered for a call.
#[derive(Debug, Clone)]
pub struct Completion {
    pub call: CallInfo,
    pub outcome: Result<Output, ServiceError>,
}

struct InFlight {
    handle: CallHandle,
    cancel: Option<oneshot::Sender<()>>,
}

/// Runs facade calls on background tasks and reports their outcomes on a queue.
///
/// At most one call per operation name is in flight. Every call ends in exactly
/// one [`Completion`]: the facade's result, a watchdog timeout, or a cancellation.
/// Must be used from within a tokio runtime.
#[derive(Clone)]
pub struct Dispatcher {
    services: Services,
    timeout: Duration,
    tx: mpsc::Sender<Completion>,
    in_flight: Arc<DashMap<&'static str, InFlight>>,
}

impl Dispatcher {
    pub fn new(services: Services, cfg: &DispatchConfig) -> (Self, mpsc::Receiver<Completion>) {
        Self::with_timeout(services, Duration::from_secs(cfg.timeout_secs), cfg.queue_capacity)
    }

    pub fn with_timeout(services: Services, timeout: Duration, capacity: usize) -> (Self, mpsc::Receiver<Completion>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let dispatcher = Self { services, timeout, tx, in_flight: Arc::new(DashMap::new()) };
        (dispatcher, rx)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Parse `name` and `args`, then dispatch.
    pub fn invoke_named(&self, name: &str, args: &[&str]) -> Result<CallHandle, DispatchError> {
        self.invoke(Operation::parse(name, args)?)
    }

    /// Dispatch `operation` on a background task; returns immediately.
    pub fn invoke(&self, operation: Operation) -> Result<CallHandle, DispatchError> {
        let name = operation.name();
        let handle = CallHandle::new();
        let (cancel_tx, cancel_rx) = oneshot::channel();

        match self.in_flight.entry(name) {
            Entry::Occupied(_) => {
                debug!(operation = name, "rejecting re-entrant invocation");
                return Err(DispatchError::Busy(name));
            }
            Entry::Vacant(slot) => {
                slot.insert(InFlight { handle, cancel: Some(cancel_tx) });
            }
        }

        let services = self.services.clone();
        let tx = self.tx.clone();
        let in_flight = Arc::clone(&self.in_flight);
        let timeout = self.timeout;
        let span = info_span!("call", operation = name, handle = %handle.short());

        tokio::spawn(
            async move {
                let started = Instant::now();
                // The facade future is polled first: once it has committed, its
                // result wins over a watchdog or cancel that became ready in the same turn.
                let outcome = tokio::select! {
                    biased;
                    res = operation.execute(&services) => res,
                    _ = tokio::time::sleep(timeout) => {
                        warn!(timeout_ms = timeout.as_millis() as u64, "watchdog fired");
                        Err(ServiceError::timed_out(name, timeout))
                    }
                    _ = cancel_rx => {
                        info!("call cancelled");
                        Err(ServiceError::cancelled(name))
                    }
                };

                // Free the slot before reporting so the caller can retry on receipt.
                in_flight.remove_if(name, |_, f| f.handle == handle);

                let completion = Completion {
                    call: CallInfo { handle, operation: name, elapsed: started.elapsed() },
                    outcome,
                };
                match &completion.outcome {
                    Ok(_) => debug!("call succeeded"),
                    Err(e) => debug!(code = e.code(), error = %e, "call failed"),
                }
                if tx.send(completion).await.is_err() {
                    warn!("completion queue closed; outcome dropped");
                }
            }
            .instrument(span),
        );

        info!(operation = name, handle = %handle.short(), "call dispatched");
        Ok(handle)
    }

    /// Ask an in-flight call to stop. Best-effort: a call that has already
    /// committed still reports its result.
    pub fn cancel(&self, handle: CallHandle) -> Result<(), DispatchError> {
        let mut entry = self
            .in_flight
            .iter_mut()
            .find(|e| e.value().handle == handle)
            .ok_or(DispatchError::UnknownCall(handle))?;
        if let Some(tx) = entry.value_mut().cancel.take() {
            let _ = tx.send(());
        }
        Ok(())
    }

    /// Look up an in-flight call by the prefix of its handle.
    pub fn find_call(&self, prefix: &str) -> Option<CallHandle> {
        let prefix = prefix.replace('-', "");
        if prefix.is_empty() {
            return None;
        }
        self.in_flight
            .iter()
            .map(|e| e.value().handle)
            .find(|h| h.0.simple().to_string().starts_with(&prefix))
    }

    pub fn is_in_flight(&self, operation: &str) -> bool {
        self.in_flight.contains_key(operation)
    }

    /// Operations currently running, with their handles.
    pub fn in_flight(&self) -> Vec<(&'static str, CallHandle)> {
        let mut calls: Vec<_> = self.in_flight.iter().map(|e| (*e.key(), e.value().handle)).collect();
        calls.sort_by_key(|(name, _)| *name);
        calls
    }
}
