use std::collections::HashMap;

use tracing::warn;

use crate::types::{
    ALBUMS_PER_MONTH, AlbumKey, AlbumLoadState, AlbumOutcome, ChartAlbum, PersistedAlbum,
};

/// Per-album image resolution state for one session.
///
/// Keys are only ever added. Once an album is present, in any state, it is
/// never requested again during the session, and a settled entry (`Loaded`
/// or `Failed`) never changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumImageCache {
    entries: HashMap<AlbumKey, AlbumLoadState>,
}

impl AlbumImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a cache from a stored snapshot. Every entry comes back as `Loaded`.
    pub fn from_persisted(entries: Vec<PersistedAlbum>) -> Self {
        let entries = entries
            .into_iter()
            .map(|p| {
                (
                    AlbumKey::new(p.artist, p.name),
                    AlbumLoadState::Loaded(p.url),
                )
            })
            .collect();
        Self { entries }
    }

    /// Snapshot of every album with a usable image url, sorted by artist then name.
    pub fn to_persisted(&self) -> Vec<PersistedAlbum> {
        let mut persisted: Vec<PersistedAlbum> = self
            .entries
            .iter()
            .filter_map(|(key, state)| match state {
                AlbumLoadState::Loaded(url) if !url.is_empty() => Some(PersistedAlbum {
                    artist: key.artist.clone(),
                    name: key.name.clone(),
                    url: url.clone(),
                }),
                _ => None,
            })
            .collect();
        persisted.sort_by(|a, b| a.artist.cmp(&b.artist).then_with(|| a.name.cmp(&b.name)));
        persisted
    }

    pub fn is_loaded_or_pending(&self, key: &AlbumKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts `Loading` for `key` unless it is already present.
    ///
    /// Returns `true` if the entry was inserted.
    pub fn mark_loading(&mut self, key: AlbumKey) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, AlbumLoadState::Loading);
        true
    }

    /// Settles a pending album. Entries that are absent or already settled are left untouched.
    pub fn apply_result(&mut self, key: &AlbumKey, outcome: AlbumOutcome) {
        match self.entries.get_mut(key) {
            Some(state @ AlbumLoadState::Loading) => {
                *state = match outcome {
                    AlbumOutcome::Success(url) => AlbumLoadState::Loaded(url),
                    AlbumOutcome::Failure => AlbumLoadState::Failed,
                };
            }
            Some(state) => {
                warn!(album = %key, ?state, "ignoring result for an album that already settled");
            }
            None => {
                warn!(album = %key, "ignoring result for an album that was never requested");
            }
        }
    }

    pub fn is_any_pending(&self) -> bool {
        self.entries.values().any(AlbumLoadState::is_pending)
    }

    /// Marks every not-yet-known album among the first fifteen as `Loading`
    /// and returns their keys in rank order.
    pub fn plan_fetch_batch(&mut self, albums: &[ChartAlbum]) -> Vec<AlbumKey> {
        albums
            .iter()
            .take(ALBUMS_PER_MONTH)
            .map(ChartAlbum::key)
            .filter(|key| self.mark_loading(key.clone()))
            .collect()
    }

    pub fn get(&self, key: &AlbumKey) -> Option<&AlbumLoadState> {
        self.entries.get(key)
    }

    /// The image url for `key`, if it resolved to a non-empty one.
    pub fn image_url(&self, key: &AlbumKey) -> Option<&str> {
        match self.entries.get(key) {
            Some(AlbumLoadState::Loaded(url)) if !url.is_empty() => Some(url.as_str()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_pending(&self) -> usize {
        self.entries.values().filter(|s| s.is_pending()).count()
    }

    pub fn count_loaded(&self) -> usize {
        self.entries
            .values()
            .filter(|s| matches!(s, AlbumLoadState::Loaded(_)))
            .count()
    }

    pub fn count_failed(&self) -> usize {
        self.entries
            .values()
            .filter(|s| matches!(s, AlbumLoadState::Failed))
            .count()
    }
}
