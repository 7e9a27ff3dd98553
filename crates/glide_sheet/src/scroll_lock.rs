//! Page scroll lock
//!
//! Locking the page behind an open sheet is document-wide state. Every
//! holder acquires its own lease and the page stays locked while any lease
//! is alive. Leases release on drop, so a sheet unmounted mid-transition
//! cannot leave the page locked.

use std::sync::{Arc, Mutex};

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Identifies one scroll lock lease
    pub struct ScrollLockId;
}

/// Shared registry of page scroll lock holders
#[derive(Clone, Default)]
pub struct PageScrollLock {
    holders: Arc<Mutex<SlotMap<ScrollLockId, String>>>,
}

impl PageScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a lease on the lock; released when the guard drops
    pub fn acquire(&self, owner: impl Into<String>) -> ScrollLockGuard {
        let owner = owner.into();
        let id = match self.holders.lock() {
            Ok(mut holders) => {
                tracing::debug!("page scroll locked by {owner}");
                Some(holders.insert(owner))
            }
            Err(_) => None,
        };

        ScrollLockGuard {
            lock: self.clone(),
            id,
        }
    }

    /// Whether page scrolling is currently locked
    pub fn is_locked(&self) -> bool {
        self.holder_count() > 0
    }

    pub fn holder_count(&self) -> usize {
        self.holders.lock().map(|h| h.len()).unwrap_or(0)
    }

    /// Names of the current holders
    pub fn holders(&self) -> Vec<String> {
        self.holders
            .lock()
            .map(|h| h.values().cloned().collect())
            .unwrap_or_default()
    }

    fn release(&self, id: ScrollLockId) {
        if let Ok(mut holders) = self.holders.lock() {
            if let Some(owner) = holders.remove(id) {
                tracing::debug!("page scroll released by {owner}");
            }
        }
    }
}

impl std::fmt::Debug for PageScrollLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageScrollLock")
            .field("holders", &self.holder_count())
            .finish()
    }
}

/// A live lease on the page scroll lock
#[derive(Debug)]
pub struct ScrollLockGuard {
    lock: PageScrollLock,
    id: Option<ScrollLockId>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.lock.release(id);
        }
    }
}
