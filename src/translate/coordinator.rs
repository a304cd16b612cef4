//! Translation request coordinator: result cache + inflight deduplication
//! over a rate-gated backend call.
//! Key invariants: at most one outstanding backend call per key, a successful
//! result is cached before its inflight entry is dropped, and consecutive
//! dispatches are never closer than the configured minimum interval.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::{BoxFuture, Shared};
use futures_util::FutureExt;
use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::metrics::{metric_names, MetricsRegistry};

use super::{TranslateError, TranslationBackend};

/// Handle every joiner of an in-progress translation clones and awaits.
type InflightHandle = Shared<BoxFuture<'static, Result<String, TranslateError>>>;

/// One pending backend call. `leader_id` lets a settling leader tell its own
/// entry apart from a successor registered after `reset()`.
struct InflightEntry {
    leader_id: u64,
    handle: InflightHandle,
}

/// State mutated only inside synchronous critical sections; no suspension
/// point ever occurs while the lock is held.
struct CoordinatorState {
    cache: HashMap<String, String>,
    inflight: HashMap<String, InflightEntry>,
    /// Earliest instant the next backend dispatch may happen. Reserving the
    /// slot at leader creation (rather than re-reading the last dispatch time
    /// on arrival) keeps distinct-key leaders from landing in the same window.
    next_allowed: Instant,
    next_leader_id: u64,
}

/// Diagnostic snapshot of the coordinator's two tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorStats {
    pub cache_size: usize,
    pub inflight_count: usize,
}

/// Owns the cache, the inflight table and the global rate state.
/// Cheap to share behind an `Arc`; all methods take `&self`.
pub struct Coordinator {
    backend: Arc<dyn TranslationBackend>,
    min_interval: Duration,
    state: Arc<Mutex<CoordinatorState>>,
    metrics: Arc<MetricsRegistry>,
}

impl Coordinator {
    pub fn new(
        backend: Arc<dyn TranslationBackend>,
        min_interval: Duration,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        Self {
            backend,
            min_interval,
            state: Arc::new(Mutex::new(CoordinatorState {
                cache: HashMap::new(),
                inflight: HashMap::new(),
                next_allowed: Instant::now(),
                next_leader_id: 0,
            })),
            metrics,
        }
    }

    /// Translate `text` between the given language pair.
    ///
    /// Cache hits return immediately with no delay. A call for a key that is
    /// already inflight joins the pending computation; the backend is invoked
    /// exactly once per burst of identical requests. Otherwise this call
    /// becomes the leader: it reserves the next dispatch slot against the
    /// global spacing window and owns the backend invocation.
    ///
    /// Fails only with `TranslateError::Api`; cache and rate-limit handling
    /// are transparent to the caller.
    pub async fn translate(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<String, TranslateError> {
        let key = cache_key(from, to, text);

        let handle = {
            let mut state = self.state.lock();

            if let Some(hit) = state.cache.get(&key) {
                debug!(key = %key, "translate_cache_hit");
                return Ok(hit.clone());
            }

            if let Some(entry) = state.inflight.get(&key) {
                debug!(key = %key, "translate_inflight_join");
                entry.handle.clone()
            } else {
                // Still inside the lock: slot reservation and inflight
                // registration must be atomic with the two checks above, so
                // no second caller can become a second leader for this key.
                self.spawn_leader(&mut state, key, text, from, to)
            }
        };

        handle.await
    }

    /// Register this call as the leader for `key`: reserve the next dispatch
    /// slot, spawn the backend task, and publish the shared handle.
    /// Caller holds the state lock.
    fn spawn_leader(
        &self,
        state: &mut CoordinatorState,
        key: String,
        text: &str,
        from: &str,
        to: &str,
    ) -> InflightHandle {
        let now = Instant::now();
        let dispatch_at = state.next_allowed.max(now);
        state.next_allowed = dispatch_at + self.min_interval;

        let leader_id = state.next_leader_id;
        state.next_leader_id += 1;

        let wait = dispatch_at - now;
        self.metrics
            .record(metric_names::RATE_GATE_WAIT, wait);
        info!(
            key = %key,
            leader_id,
            wait_ms = wait.as_millis() as u64,
            "translate_leader_scheduled"
        );

        let backend = Arc::clone(&self.backend);
        let shared_state = Arc::clone(&self.state);
        let metrics = Arc::clone(&self.metrics);
        let text = text.to_owned();
        let from = from.to_owned();
        let to = to.to_owned();
        let task_key = key.clone();

        // Spawned, not caller-driven: the leader runs to completion even if
        // every joined caller abandons the result.
        let task = tokio::spawn(async move {
            tokio::time::sleep_until(dispatch_at).await;

            let call_start = Instant::now();
            let result = backend.translate(&text, &from, &to).await;
            metrics.record(metric_names::BACKEND_CALL, call_start.elapsed());

            let mut state = shared_state.lock();
            match &result {
                Ok(translated) => {
                    // Cache write strictly before inflight removal, under one
                    // lock: a caller that sees the entry gone will find the
                    // fresh value on its cache check.
                    state.cache.insert(task_key.clone(), translated.clone());
                    debug!(key = %task_key, leader_id, "translate_backend_ok");
                }
                Err(err) => {
                    warn!(key = %task_key, leader_id, error = %err, "translate_backend_failed");
                }
            }
            // After a reset() a newer leader may own this key; only remove
            // the entry if it is still ours.
            if state
                .inflight
                .get(&task_key)
                .is_some_and(|entry| entry.leader_id == leader_id)
            {
                state.inflight.remove(&task_key);
            }
            result
        });

        let handle: InflightHandle = task
            .map(|joined| match joined {
                Ok(result) => result,
                Err(err) => Err(TranslateError::Api(format!("translation task failed: {err}"))),
            })
            .boxed()
            .shared();

        state.inflight.insert(
            key,
            InflightEntry {
                leader_id,
                handle: handle.clone(),
            },
        );
        handle
    }

    /// Clear both tables unconditionally. An inflight leader is abandoned but
    /// not cancelled; if it later succeeds its result lands in the emptied
    /// cache as a normal fresh entry. The rate state is untouched.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        let dropped = state.inflight.len();
        state.cache.clear();
        state.inflight.clear();
        info!(abandoned_inflight = dropped, "coordinator_reset");
    }

    /// Diagnostic only.
    pub fn stats(&self) -> CoordinatorStats {
        let state = self.state.lock();
        CoordinatorStats {
            cache_size: state.cache.len(),
            inflight_count: state.inflight.len(),
        }
    }
}

/// Composite cache key. Language codes never contain `:`, so the derivation
/// is collision-free; the key is treated as opaque once formed.
fn cache_key(from: &str, to: &str, text: &str) -> String {
    format!("{from}:{to}:{text}")
}
