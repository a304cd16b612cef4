//! Translation core: coordinator, input validation, backend seam.
//! The coordinator owns caching, inflight deduplication and the global
//! rate gate; backends are swappable behind the `TranslationBackend` trait.

use futures_util::future::BoxFuture;

pub mod coordinator;
pub mod mymemory;
pub mod validate;

pub use coordinator::{Coordinator, CoordinatorStats};
pub use mymemory::MyMemoryClient;
pub use validate::validate;

/// Errors surfaced by the translation layer.
/// Validation variants never enter the coordinator; they are raised by
/// `validate` before a request is dispatched. `Api` is the only failure a
/// joined caller can observe from `Coordinator::translate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// No text to translate (empty after trimming at the event layer).
    EmptyInput,
    /// Text exceeds the per-request character limit.
    InputTooLong { len: usize, max: usize },
    /// Backend call failed: network error, non-2xx status, or unparseable body.
    Api(String),
}

impl std::fmt::Display for TranslateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslateError::EmptyInput => write!(f, "no text provided"),
            TranslateError::InputTooLong { len, max } => {
                write!(f, "text too long for translation ({len} > {max} chars)")
            }
            TranslateError::Api(msg) => write!(f, "translation API error: {msg}"),
        }
    }
}

impl std::error::Error for TranslateError {}

/// Backend seam: one opaque asynchronous call per (text, from, to) triple.
/// No retry and no timeout here; a single failure propagates as-is to every
/// caller joined on the key.
pub trait TranslationBackend: Send + Sync {
    /// Translate `text` from `from` to `to`, returning the translated string.
    fn translate<'a>(
        &'a self,
        text: &'a str,
        from: &'a str,
        to: &'a str,
    ) -> BoxFuture<'a, Result<String, TranslateError>>;
}
