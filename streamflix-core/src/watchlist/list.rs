use streamflix_model::{MediaKind, WatchlistEntry};
use tracing::{debug, warn};

use super::store::{KeyValueStore, StoreError};

/// Storage key of the watchlist array.
pub const WATCHLIST_KEY: &str = "streamflix_watchlist";

/// Ordered list of saved titles, stored as one JSON array.
#[derive(Debug)]
pub struct Watchlist<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> Watchlist<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, WATCHLIST_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Saved entries in insertion order. Unreadable contents count as an
    /// empty list.
    pub fn entries(&self) -> Result<Vec<WatchlistEntry>, StoreError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(key = %self.key, error = %e, "discarding corrupt watchlist");
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, entries: &[WatchlistEntry]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(entries)?;
        self.store.set(&self.key, &raw)
    }

    /// Whether the title `(id, kind)` is saved. A movie and a show may share
    /// an id.
    pub fn contains(&self, id: u64, kind: MediaKind) -> Result<bool, StoreError> {
        Ok(self.entries()?.iter().any(|e| e.id == id && e.media_type == kind))
    }

    /// Appends `entry` unless the same title is already saved. Returns
    /// whether it was added.
    pub fn add(&self, entry: WatchlistEntry) -> Result<bool, StoreError> {
        let mut entries = self.entries()?;
        if entries.iter().any(|e| e.same_title(&entry)) {
            return Ok(false);
        }
        debug!(id = entry.id, kind = %entry.media_type, "watchlist add");
        entries.push(entry);
        self.save(&entries)?;
        Ok(true)
    }

    /// Removes the title `(id, kind)`. Returns whether anything was removed.
    pub fn remove(&self, id: u64, kind: MediaKind) -> Result<bool, StoreError> {
        let mut entries = self.entries()?;
        let before = entries.len();
        entries.retain(|e| !(e.id == id && e.media_type == kind));
        if entries.len() == before {
            return Ok(false);
        }
        debug!(id, %kind, "watchlist remove");
        self.save(&entries)?;
        Ok(true)
    }

    /// Adds the entry if its title is absent, removes it otherwise. Returns
    /// whether the title is saved afterwards.
    pub fn toggle(&self, entry: WatchlistEntry) -> Result<bool, StoreError> {
        if self.contains(entry.id, entry.media_type)? {
            self.remove(entry.id, entry.media_type)?;
            Ok(false)
        } else {
            self.add(entry)
        }
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watchlist::MemoryStore;

    fn entry(id: u64, kind: MediaKind) -> WatchlistEntry {
        WatchlistEntry {
            id,
            title: format!("#{id}"),
            poster_path: None,
            vote_average: Some(7.0),
            release_date: None,
            media_type: kind,
        }
    }

    #[test]
    fn add_dedupes_by_id_and_kind() {
        let list = Watchlist::new(MemoryStore::new());
        assert!(list.add(entry(1, MediaKind::Movie)).unwrap());
        assert!(!list.add(entry(1, MediaKind::Movie)).unwrap());
        assert!(list.add(entry(1, MediaKind::Tv)).unwrap());
        assert_eq!(list.entries().unwrap().len(), 2);
    }

    #[test]
    fn toggle_and_remove() {
        let list = Watchlist::new(MemoryStore::new());
        assert!(list.toggle(entry(5, MediaKind::Movie)).unwrap());
        assert!(list.contains(5, MediaKind::Movie).unwrap());
        assert!(!list.contains(5, MediaKind::Tv).unwrap());
        assert!(!list.toggle(entry(5, MediaKind::Movie)).unwrap());
        assert!(!list.contains(5, MediaKind::Movie).unwrap());
        assert!(!list.remove(5, MediaKind::Movie).unwrap());
    }

    #[test]
    fn movie_and_show_sharing_an_id_are_separate_titles() {
        let list = Watchlist::new(MemoryStore::new());
        assert!(list.add(entry(1, MediaKind::Movie)).unwrap());

        assert!(list.toggle(entry(1, MediaKind::Tv)).unwrap());
        assert!(list.contains(1, MediaKind::Movie).unwrap());
        assert!(list.contains(1, MediaKind::Tv).unwrap());
        assert_eq!(list.entries().unwrap().len(), 2);

        assert!(!list.toggle(entry(1, MediaKind::Tv)).unwrap());
        let entries = list.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].media_type, MediaKind::Movie);

        assert!(!list.remove(1, MediaKind::Tv).unwrap());
        assert!(list.remove(1, MediaKind::Movie).unwrap());
        assert!(list.entries().unwrap().is_empty());
    }

    #[test]
    fn corrupt_contents_read_as_empty() {
        let store = MemoryStore::new();
        store.set(WATCHLIST_KEY, "{not json").unwrap();
        let list = Watchlist::new(store);
        assert!(list.entries().unwrap().is_empty());
        assert!(list.add(entry(9, MediaKind::Tv)).unwrap());
        assert_eq!(list.entries().unwrap()[0].id, 9);
    }

    #[test]
    fn reads_entries_without_media_type_as_movies() {
        let store = MemoryStore::new();
        store
            .set(
                WATCHLIST_KEY,
                r#"[{"id":550,"title":"Fight Club","poster_path":null,"vote_average":8.4,"release_date":"1999-10-15"}]"#,
            )
            .unwrap();
        let list = Watchlist::new(store);
        let entries = list.entries().unwrap();
        assert_eq!(entries[0].media_type, MediaKind::Movie);
        assert_eq!(entries[0].link_path(), "/movie/550");
    }
}
