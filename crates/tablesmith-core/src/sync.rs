use std::sync::{Mutex, MutexGuard};

/// Extension trait for `Mutex` that recovers from lock poisoning.
///
/// A poisoned lock only means another holder panicked; the panic itself is the
/// failure worth reporting, so callers keep working with the inner value.
pub trait IgnoreLock<T> {
    /// Locks the mutex, taking the guard out of a poison error if needed.
    fn lock_ignore_poison(&self) -> MutexGuard<'_, T>;
}

impl<T> IgnoreLock<T> for Mutex<T> {
    fn lock_ignore_poison(&self) -> MutexGuard<'_, T> {
        self.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
