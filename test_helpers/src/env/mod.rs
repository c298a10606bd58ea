//! RAII guards for mutating environment variables in tests.
//!
//! Process environment is global state, so tests that touch it must not
//! interleave. Every mutation here happens under a global re-entrant mutex
//! and returns a guard that restores the prior value (or prior absence) when
//! dropped, re-acquiring the mutex for the restoration.
//!
//! Guards for the same key stack and restore in LIFO order. Tests that need
//! several variables pinned for their whole duration should hold the lock via
//! [`scope_with`] so unrelated mutations cannot interleave.
//!
//! # Examples
//!
//! ```
//! use envfill_test_helpers::env;
//!
//! let _guard = env::set_var("KEY", "VALUE");
//! // `KEY` reads as `VALUE` until `_guard` drops.
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Wrapper around `std::env::set_var`.
///
/// # Safety
///
/// Callers must hold [`ENV_MUTEX`] so no other thread reads or writes the
/// environment concurrently.
unsafe fn raw_set(key: &str, value: &OsStr) {
    unsafe { env::set_var(key, value) };
}

/// Wrapper around `std::env::remove_var`.
///
/// # Safety
///
/// Callers must hold [`ENV_MUTEX`] so no other thread reads or writes the
/// environment concurrently.
unsafe fn raw_remove(key: &str) {
    unsafe { env::remove_var(key) };
}

/// Snapshots the prior value of `key`, applies `mutate`, and wraps the
/// snapshot in a restoring guard. Must run with the mutex held.
fn guarded_mutation<F>(key: String, mutate: F) -> EnvVarGuard
where
    F: FnOnce(&str),
{
    let previous = env::var_os(&key);
    mutate(&key);
    EnvVarGuard { key, previous }
}

/// RAII guard restoring one environment variable to its prior state on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    previous: Option<OsString>,
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _held = ENV_MUTEX.lock();
        if let Some(value) = self.previous.take() {
            // SAFETY: the mutex is held for the duration of the restoration.
            unsafe { raw_set(&self.key, &value) };
        } else {
            // SAFETY: as above.
            unsafe { raw_remove(&self.key) };
        }
    }
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_previous", &self.previous.is_some())
            .finish_non_exhaustive()
    }
}

/// RAII handle that serialises environment access for its lifetime.
///
/// Mutations made through its methods reuse the already-held lock, which the
/// re-entrant mutex permits.
#[must_use = "dropping releases the environment lock"]
pub struct EnvVarLock {
    _held: ReentrantMutexGuard<'static, ()>,
}

impl EnvVarLock {
    /// Sets `key` to `value` while the lock is held.
    pub fn set_var<K, V>(&self, key: K, value: V) -> EnvVarGuard
    where
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        guarded_mutation(key.into(), |k| {
            // SAFETY: `self` proves the mutex is held.
            unsafe { raw_set(k, value.as_ref()) };
        })
    }

    /// Removes `key` while the lock is held.
    pub fn remove_var<K>(&self, key: K) -> EnvVarGuard
    where
        K: Into<String>,
    {
        guarded_mutation(key.into(), |k| {
            // SAFETY: `self` proves the mutex is held.
            unsafe { raw_remove(k) };
        })
    }
}

/// RAII scope that keeps the environment lock held while retaining guards.
///
/// Dropping the scope restores every guard before releasing the lock, so a
/// test's environment is torn down atomically with respect to other tests.
#[must_use = "dropping releases the lock and restores the guards"]
pub struct EnvScope {
    _lock: EnvVarLock,
    guards: Vec<EnvVarGuard>,
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        // Restore while the lock is still held.
        self.guards.clear();
    }
}

/// Acquires the global environment lock for the lifetime of the handle.
///
/// # Examples
///
/// ```
/// use envfill_test_helpers::env;
///
/// let lock = env::lock();
/// let _guard = lock.set_var("KEY", "VALUE");
/// ```
pub fn lock() -> EnvVarLock {
    EnvVarLock {
        _held: ENV_MUTEX.lock(),
    }
}

/// Sets an environment variable, returning a guard restoring the prior state.
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    lock().set_var(key, value)
}

/// Removes an environment variable, returning a guard restoring the prior state.
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    lock().remove_var(key)
}

/// Builds an [`EnvScope`] by running `builder` with the lock held.
///
/// The builder must create its guards through the provided lock handle so the
/// whole setup happens under one acquisition.
///
/// # Examples
///
/// ```
/// use envfill_test_helpers::env;
///
/// let _scope = env::scope_with(|lock| {
///     vec![lock.set_var("FOO", "1"), lock.remove_var("BAR")]
/// });
/// ```
pub fn scope_with<F>(builder: F) -> EnvScope
where
    F: FnOnce(&EnvVarLock) -> Vec<EnvVarGuard>,
{
    let held = lock();
    let guards = builder(&held);
    EnvScope {
        _lock: held,
        guards,
    }
}
