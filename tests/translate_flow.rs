//! End-to-end flow over the public surface: dispatcher → coordinator →
//! backend, with a scripted backend in place of the MyMemory client.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use subgloss::metrics::{metric_names, MetricsRegistry};
use subgloss::translate::TranslationBackend;
use subgloss::{
    Coordinator, CoordinatorStats, LanguagePair, PrefsStore, RequestDispatcher, TranslateError,
};

struct ScriptedBackend {
    replies: HashMap<String, String>,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    fn new(delay: Duration, replies: &[(&str, &str)]) -> Self {
        Self {
            replies: replies
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            delay,
            calls: AtomicUsize::new(0),
        }
    }
}

impl TranslationBackend for ScriptedBackend {
    fn translate<'a>(
        &'a self,
        text: &'a str,
        _from: &'a str,
        to: &'a str,
    ) -> BoxFuture<'a, Result<String, TranslateError>> {
        async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            Ok(self
                .replies
                .get(text)
                .cloned()
                .unwrap_or_else(|| format!("[{to}] {text}")))
        }
        .boxed()
    }
}

fn stack(backend: Arc<ScriptedBackend>) -> (RequestDispatcher, Arc<Coordinator>, Arc<MetricsRegistry>) {
    let metrics = Arc::new(MetricsRegistry::new());
    let dyn_backend: Arc<dyn TranslationBackend> = backend;
    let coordinator = Arc::new(Coordinator::new(
        dyn_backend,
        Duration::from_millis(250),
        Arc::clone(&metrics),
    ));
    let prefs = Arc::new(PrefsStore::new(LanguagePair::new("en", "uk")));
    let dispatcher = RequestDispatcher::new(
        Arc::clone(&coordinator),
        prefs,
        300,
        Arc::clone(&metrics),
    );
    (dispatcher, coordinator, metrics)
}

#[tokio::test(start_paused = true)]
async fn click_burst_translates_once_and_formats_popup() {
    let backend = Arc::new(ScriptedBackend::new(
        Duration::from_millis(50),
        &[("hello", "привіт")],
    ));
    let (dispatcher, coordinator, _) = stack(Arc::clone(&backend));

    // A click and a shift-click landing on the same word in quick succession.
    let (a, b) = tokio::join!(dispatcher.handle_click("hello"), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        dispatcher.handle_click("hello").await
    });

    assert_eq!(a.body, "hello → привіт");
    assert_eq!(b.body, "hello → привіт");
    assert!(!a.is_error);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        coordinator.stats(),
        CoordinatorStats {
            cache_size: 1,
            inflight_count: 0
        }
    );
}

#[tokio::test(start_paused = true)]
async fn repeat_click_is_instant_and_metrics_accumulate() {
    let backend = Arc::new(ScriptedBackend::new(
        Duration::from_millis(50),
        &[("hello", "привіт")],
    ));
    let (dispatcher, _, metrics) = stack(Arc::clone(&backend));

    dispatcher.handle_click("hello").await;
    dispatcher.handle_click("hello").await;

    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    let summary = metrics.summary();
    assert_eq!(summary[metric_names::TRANSLATE_TOTAL].count, 2);
    assert_eq!(summary[metric_names::BACKEND_CALL].count, 1);
}

#[tokio::test(start_paused = true)]
async fn reset_forces_a_fresh_backend_call() {
    let backend = Arc::new(ScriptedBackend::new(Duration::from_millis(50), &[]));
    let (dispatcher, coordinator, _) = stack(Arc::clone(&backend));

    dispatcher.handle_click("word").await;
    coordinator.reset();
    dispatcher.handle_click("word").await;

    assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
}
