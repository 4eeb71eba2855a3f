//! Time source for testability.

/// Seconds since the Unix epoch.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> u64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> u64 {
        shared_types::unix_now()
    }
}
