use tabled::Table;

use crate::{
    info,
    management::{ImageUrlStore, JsonFileStore},
    success,
    types::CacheTableRow,
    warning,
};

/// Lists the cached album images, optionally filtered by artist or album name.
///
/// Reads the image cache file from the local data directory and prints one
/// table row per album with a known cover url.
///
/// # Arguments
///
/// * `search` - Case-insensitive term matched against artist and album names
///
/// # Output
///
/// The number of matching entries followed by a table of artist, album and
/// image url. A cache file that cannot be read is reported as a warning.
pub async fn list_cache(search: Option<String>) {
    let store = JsonFileStore::default_location();
    let mut entries = match store.load().await {
        Ok(entries) => entries,
        Err(e) => {
            warning!("Failed to load album image cache. Err: {}", e);
            return;
        }
    };

    if let Some(term) = search {
        let term = term.to_lowercase();
        entries.retain(|e| {
            e.artist.to_lowercase().contains(&term) || e.name.to_lowercase().contains(&term)
        });
    }

    info!("Album images cached: {}", entries.len());
    if entries.is_empty() {
        return;
    }

    let rows: Vec<CacheTableRow> = entries
        .into_iter()
        .map(|e| CacheTableRow {
            artist: e.artist,
            album: e.name,
            image: e.url,
        })
        .collect();
    println!("{}", Table::new(rows));
}

/// Deletes the album image cache file.
///
/// The next `grid` run starts with no known covers and looks every album up
/// again. Clearing a cache that was never written succeeds.
pub async fn clear_cache() {
    let store = JsonFileStore::default_location();
    match store.clear().await {
        Ok(_) => success!("Album image cache cleared."),
        Err(e) => warning!("Cannot clear album image cache at {}. Err: {}", store.path().display(), e),
    }
}
