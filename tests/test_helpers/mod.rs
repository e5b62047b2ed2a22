//! Scoped process environment overrides for integration tests.

use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Applies `FASTCHECK_*` overrides until dropped, then restores the
/// previous values.
///
/// Guards serialize on a global lock so tests in one binary never observe
/// each other's variables.
pub struct EnvVarGuard {
    saved: Vec<(&'static str, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Sets (`Some`) or removes (`None`) each variable.
    pub fn apply(overrides: &[(&'static str, Option<&str>)]) -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let saved = overrides
            .iter()
            .map(|&(key, value)| {
                let previous = env::var_os(key);
                write_var(key, value.map(OsString::from));
                (key, previous)
            })
            .collect();

        Self { saved, _lock: lock }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, previous) in self.saved.drain(..) {
            write_var(key, previous);
        }
    }
}

fn write_var(key: &str, value: Option<OsString>) {
    // SAFETY: ENV_LOCK is held by the calling guard for every mutation.
    unsafe {
        match value {
            Some(found) => env::set_var(key, found),
            None => env::remove_var(key),
        }
    }
}
