//! Stable error codes shared by every server error enum.
//!
//! Codes are logged next to the message and stay fixed across releases, so
//! log searches keep working when messages are reworded.

/// Error with a stable code and a retryability hint.
///
/// Nothing in the server retries automatically. `retryable` only tells the
/// log reader whether the same request might succeed later.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}
