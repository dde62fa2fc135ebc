use std::sync::{LockResult, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::warn;

/// Take the guard even if a writer panicked; cached values are replaceable.
fn recover<G>(result: LockResult<G>, target: &'static str, op: &'static str, kind: &str) -> G {
    result.unwrap_or_else(|poisoned| {
        warn!(op, target_module = target, lock_kind = kind, "cache lock was poisoned");
        poisoned.into_inner()
    })
}

pub(crate) fn rw_read<'a, T>(
    lock: &'a RwLock<T>,
    target: &'static str,
    op: &'static str,
) -> RwLockReadGuard<'a, T> {
    recover(lock.read(), target, op, "read")
}

pub(crate) fn rw_write<'a, T>(
    lock: &'a RwLock<T>,
    target: &'static str,
    op: &'static str,
) -> RwLockWriteGuard<'a, T> {
    recover(lock.write(), target, op, "write")
}
