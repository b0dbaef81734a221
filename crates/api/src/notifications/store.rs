//! Process-wide cache of each user's recent notifications with a derived
//! unread counter.
//!
//! The cache mirrors a newest-first window of the `notifications` table.
//! Handlers keep it in step with the database: listing replaces a user's
//! window, creation prepends, and the read/delete endpoints apply the
//! matching transition. Every operation runs under one write lock and
//! adjusts the counter in the same critical section, so the invariant
//! `unread == entries.filter(!is_read).count()` holds at every observable
//! point regardless of how concurrent event sources interleave.

use std::collections::HashMap;
use std::sync::RwLock;

use skillswap_core::types::DbId;

/// The slice of a notification the cache tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    pub id: DbId,
    pub is_read: bool,
}

/// One user's cached window.
#[derive(Debug, Default)]
struct UserWindow {
    /// Newest first.
    entries: Vec<CacheEntry>,
    unread: u64,
}

/// Process-wide notification cache, keyed by user.
///
/// Constructed once at startup and shared through `AppState`.
#[derive(Debug, Default)]
pub struct NotificationCache {
    users: RwLock<HashMap<DbId, UserWindow>>,
}

impl NotificationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a user's window with a freshly-listed page (newest first).
    /// The counter is recomputed from scratch.
    pub fn replace(&self, user_id: DbId, entries: Vec<CacheEntry>) {
        let unread = entries.iter().filter(|e| !e.is_read).count() as u64;
        let mut users = self.users.write().expect("notification cache poisoned");
        users.insert(user_id, UserWindow { entries, unread });
    }

    /// Prepend a new entry (newest-first invariant).
    pub fn add(&self, user_id: DbId, entry: CacheEntry) {
        let mut users = self.users.write().expect("notification cache poisoned");
        let window = users.entry(user_id).or_default();
        window.entries.insert(0, entry);
        if !entry.is_read {
            window.unread += 1;
        }
    }

    /// Mark one entry read. A no-op when the entry is absent or already
    /// read; the counter only moves when the entry was actually unread.
    pub fn mark_read(&self, user_id: DbId, id: DbId) {
        let mut users = self.users.write().expect("notification cache poisoned");
        let Some(window) = users.get_mut(&user_id) else {
            return;
        };
        if let Some(entry) = window.entries.iter_mut().find(|e| e.id == id) {
            if !entry.is_read {
                entry.is_read = true;
                window.unread = window.unread.saturating_sub(1);
            }
        }
    }

    /// Mark everything read.
    pub fn mark_all_read(&self, user_id: DbId) {
        let mut users = self.users.write().expect("notification cache poisoned");
        let Some(window) = users.get_mut(&user_id) else {
            return;
        };
        for entry in &mut window.entries {
            entry.is_read = true;
        }
        window.unread = 0;
    }

    /// Drop an entry. The counter moves only when the removed entry was
    /// unread, clamped at zero.
    pub fn remove(&self, user_id: DbId, id: DbId) {
        let mut users = self.users.write().expect("notification cache poisoned");
        let Some(window) = users.get_mut(&user_id) else {
            return;
        };
        if let Some(pos) = window.entries.iter().position(|e| e.id == id) {
            let removed = window.entries.remove(pos);
            if !removed.is_read {
                window.unread = window.unread.saturating_sub(1);
            }
        }
    }

    /// Unread count for a user: `None` when the window has never been
    /// loaded (cold), `Some(n)` when warm.
    pub fn unread_count(&self, user_id: DbId) -> Option<u64> {
        let users = self.users.read().expect("notification cache poisoned");
        users.get(&user_id).map(|w| w.unread)
    }

    /// Snapshot of a user's window, newest first. `None` when cold.
    pub fn entries(&self, user_id: DbId) -> Option<Vec<CacheEntry>> {
        let users = self.users.read().expect("notification cache poisoned");
        users.get(&user_id).map(|w| w.entries.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: DbId, is_read: bool) -> CacheEntry {
        CacheEntry { id, is_read }
    }

    /// Assert the defining invariant for one user.
    fn assert_invariant(cache: &NotificationCache, user_id: DbId) {
        let entries = cache.entries(user_id).unwrap_or_default();
        let expected = entries.iter().filter(|e| !e.is_read).count() as u64;
        assert_eq!(
            cache.unread_count(user_id).unwrap_or(0),
            expected,
            "unread counter diverged from entries"
        );
    }

    #[test]
    fn cold_user_has_no_count() {
        let cache = NotificationCache::new();
        assert_eq!(cache.unread_count(1), None);
    }

    #[test]
    fn replace_recomputes_counter() {
        let cache = NotificationCache::new();
        cache.replace(1, vec![entry(3, false), entry(2, true), entry(1, false)]);
        assert_eq!(cache.unread_count(1), Some(2));
        assert_invariant(&cache, 1);

        cache.replace(1, vec![entry(9, true)]);
        assert_eq!(cache.unread_count(1), Some(0));
        assert_invariant(&cache, 1);
    }

    #[test]
    fn add_prepends_newest_first() {
        let cache = NotificationCache::new();
        cache.replace(1, vec![entry(1, true)]);
        cache.add(1, entry(2, false));
        cache.add(1, entry(3, false));

        let ids: Vec<DbId> = cache.entries(1).unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(cache.unread_count(1), Some(2));
        assert_invariant(&cache, 1);
    }

    #[test]
    fn add_read_entry_does_not_bump_counter() {
        let cache = NotificationCache::new();
        cache.add(1, entry(1, true));
        assert_eq!(cache.unread_count(1), Some(0));
        assert_invariant(&cache, 1);
    }

    #[test]
    fn mark_read_decrements_once() {
        let cache = NotificationCache::new();
        cache.replace(1, vec![entry(2, false), entry(1, false)]);

        cache.mark_read(1, 2);
        assert_eq!(cache.unread_count(1), Some(1));

        // Marking the same entry again must not move the counter.
        cache.mark_read(1, 2);
        assert_eq!(cache.unread_count(1), Some(1));
        assert_invariant(&cache, 1);
    }

    #[test]
    fn mark_read_of_absent_id_is_a_noop() {
        let cache = NotificationCache::new();
        cache.replace(1, vec![entry(1, false)]);
        cache.mark_read(1, 999);
        assert_eq!(cache.unread_count(1), Some(1));
        assert_invariant(&cache, 1);
    }

    #[test]
    fn counter_never_goes_negative() {
        let cache = NotificationCache::new();
        cache.replace(1, vec![entry(1, true)]);
        // All entries already read; removals and marks must clamp at 0.
        cache.mark_read(1, 1);
        cache.remove(1, 1);
        assert_eq!(cache.unread_count(1), Some(0));
    }

    #[test]
    fn mark_all_read_zeroes_counter() {
        let cache = NotificationCache::new();
        cache.replace(1, vec![entry(3, false), entry(2, false), entry(1, true)]);
        cache.mark_all_read(1);
        assert_eq!(cache.unread_count(1), Some(0));
        assert!(cache.entries(1).unwrap().iter().all(|e| e.is_read));
        assert_invariant(&cache, 1);
    }

    #[test]
    fn remove_unread_decrements() {
        let cache = NotificationCache::new();
        cache.replace(1, vec![entry(2, false), entry(1, true)]);

        cache.remove(1, 2);
        assert_eq!(cache.unread_count(1), Some(0));
        assert_eq!(cache.entries(1).unwrap().len(), 1);

        // Removing a read entry leaves the counter alone.
        cache.remove(1, 1);
        assert_eq!(cache.unread_count(1), Some(0));
        assert!(cache.entries(1).unwrap().is_empty());
        assert_invariant(&cache, 1);
    }

    #[test]
    fn users_are_independent() {
        let cache = NotificationCache::new();
        cache.replace(1, vec![entry(1, false)]);
        cache.replace(2, vec![entry(1, false), entry(2, false)]);

        cache.mark_all_read(1);
        assert_eq!(cache.unread_count(1), Some(0));
        assert_eq!(cache.unread_count(2), Some(2));
    }

    #[test]
    fn invariant_holds_under_mixed_sequences() {
        let cache = NotificationCache::new();
        cache.replace(7, vec![entry(5, true), entry(4, false)]);
        cache.add(7, entry(6, false));
        cache.mark_read(7, 4);
        cache.add(7, entry(8, false));
        cache.remove(7, 6);
        cache.mark_read(7, 123); // absent
        cache.add(7, entry(9, true));
        cache.remove(7, 5); // read entry
        assert_invariant(&cache, 7);

        cache.mark_all_read(7);
        cache.remove(7, 8);
        cache.add(7, entry(10, false));
        assert_invariant(&cache, 7);
    }

    #[test]
    fn concurrent_adds_and_marks_keep_invariant() {
        use std::sync::Arc;

        let cache = Arc::new(NotificationCache::new());
        cache.replace(1, Vec::new());

        let mut handles = Vec::new();
        for t in 0..4i64 {
            let cache = Arc::clone(&cache);
            handles.push(std::thread::spawn(move || {
                for i in 0..50i64 {
                    let id = t * 100 + i;
                    cache.add(1, CacheEntry { id, is_read: false });
                    if i % 3 == 0 {
                        cache.mark_read(1, id);
                    }
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let entries = cache.entries(1).unwrap();
        assert_eq!(entries.len(), 200);
        let expected = entries.iter().filter(|e| !e.is_read).count() as u64;
        assert_eq!(cache.unread_count(1), Some(expected));
    }
}
