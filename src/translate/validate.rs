//! Input validation applied before a request reaches the coordinator.
//! Keeps oversized or empty clicks from wasting a network call.

use super::TranslateError;

/// Check clicked text against the per-request limits. Pure, stateless.
/// Length is counted in characters, not bytes, so multi-byte captions are
/// not penalised.
pub fn validate(text: &str, max_chars: usize) -> Result<(), TranslateError> {
    if text.is_empty() {
        return Err(TranslateError::EmptyInput);
    }
    let len = text.chars().count();
    if len > max_chars {
        return Err(TranslateError::InputTooLong {
            len,
            max: max_chars,
        });
    }
    Ok(())
}
