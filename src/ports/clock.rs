//! Clock Port - Source of wall-clock time for rate limiting.

/// Millisecond clock.
///
/// Injected wherever elapsed time gates behavior, so tests can move time
/// forward explicitly.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}
