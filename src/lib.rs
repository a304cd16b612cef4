//! Subgloss: on-demand caption word/phrase translation.
//! The core is the translation request coordinator (cache + inflight
//! deduplication + global rate gate) over the MyMemory API; the dispatcher
//! is the thin seam the browser event layer calls into.

pub mod config;
pub mod dispatcher;
pub mod metrics;
pub mod prefs;
pub mod translate;

pub use config::Config;
pub use dispatcher::{PopupContent, RequestDispatcher};
pub use prefs::{LanguagePair, PrefsStore};
pub use translate::{Coordinator, CoordinatorStats, MyMemoryClient, TranslateError};
