//! Common types, traits, and utilities shared across the engine.

pub mod constants;
mod lock;
mod sort_order;
pub mod stream;
mod value;

use std::sync::Arc;

use parking_lot::RwLock;

pub use lock::{LockHandle, LockRegistry};
pub use sort_order::SortOrder;
pub use value::Value;

pub type Atomic<T> = Arc<RwLock<T>>;

#[inline]
pub fn atomic<T>(t: T) -> Atomic<T> {
    Arc::new(RwLock::new(t))
}

/// Returns the current time in milliseconds since the Unix epoch, or zero if
/// the system clock is set before the epoch.
pub fn get_current_time_or_zero() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
