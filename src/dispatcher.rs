//! Request dispatcher: the thin layer between a caption click and the
//! coordinator. Trims and validates the clicked text, invokes the
//! coordinator with the preferred language pair, and formats the popup body.

use std::sync::Arc;

use tracing::{info, warn};

use crate::metrics::{metric_names, MetricsRegistry};
use crate::prefs::PrefsStore;
use crate::translate::{validate, Coordinator};

/// What the popup layer is told to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupContent {
    pub body: String,
    pub is_error: bool,
}

/// Validates, translates and formats one click at a time. Holds no request
/// state of its own; all caching and scheduling lives in the coordinator.
pub struct RequestDispatcher {
    coordinator: Arc<Coordinator>,
    prefs: Arc<PrefsStore>,
    max_text_length: usize,
    metrics: Arc<MetricsRegistry>,
}

impl RequestDispatcher {
    pub fn new(
        coordinator: Arc<Coordinator>,
        prefs: Arc<PrefsStore>,
        max_text_length: usize,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        Self {
            coordinator,
            prefs,
            max_text_length,
            metrics,
        }
    }

    /// Handle one clicked word or shift-clicked line.
    /// Validation failures render as `(reason)`, successes as
    /// `text → translation`, backend failures as `(translation error)`.
    pub async fn handle_click(&self, raw_text: &str) -> PopupContent {
        let text = raw_text.trim();
        let request_id = uuid::Uuid::new_v4().to_string();

        if let Err(e) = validate(text, self.max_text_length) {
            info!(request_id = %request_id, reason = %e, "click_rejected");
            return PopupContent {
                body: format!("({e})"),
                is_error: true,
            };
        }

        let pair = self.prefs.get();
        let span = self.metrics.span(metric_names::TRANSLATE_TOTAL);
        match self
            .coordinator
            .translate(text, &pair.from, &pair.to)
            .await
        {
            Ok(translated) => {
                let elapsed = span.finish();
                info!(
                    request_id = %request_id,
                    from = %pair.from,
                    to = %pair.to,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "click_translated"
                );
                PopupContent {
                    body: format!("{text} → {translated}"),
                    is_error: false,
                }
            }
            Err(err) => {
                span.finish();
                warn!(request_id = %request_id, error = %err, "click_translation_failed");
                PopupContent {
                    body: "(translation error)".to_string(),
                    is_error: true,
                }
            }
        }
    }

    pub fn coordinator(&self) -> &Arc<Coordinator> {
        &self.coordinator
    }
}
