use lastgrid::management::AlbumImageCache;
use lastgrid::render::{Tile, layout_month, render_html, render_table};
use lastgrid::types::{AlbumKey, AlbumOutcome, ChartAlbum, Month, MonthWithAlbums, PersistedAlbum};

fn month_with(count: u32) -> MonthWithAlbums {
    MonthWithAlbums {
        month: Month {
            label: "2024-03".to_string(),
            start: 0,
            end: 100,
        },
        albums: (1..=count)
            .map(|i| ChartAlbum {
                artist: format!("Artist {i}"),
                name: format!("Album {i}"),
                rank: i,
                playcount: 1,
            })
            .collect(),
    }
}

#[test]
fn test_layout_pads_to_full_rows() {
    let cache = AlbumImageCache::new();

    assert_eq!(layout_month(&month_with(0), &cache).len(), 0);
    assert_eq!(layout_month(&month_with(1), &cache).len(), 3);
    assert_eq!(layout_month(&month_with(4), &cache).len(), 6);
    assert_eq!(layout_month(&month_with(15), &cache).len(), 15);

    let tiles = layout_month(&month_with(4), &cache);
    assert_eq!(tiles[4], Tile::Empty);
    assert_eq!(tiles[5], Tile::Empty);
}

#[test]
fn test_layout_caps_at_fifteen_tiles() {
    let tiles = layout_month(&month_with(16), &AlbumImageCache::new());
    assert_eq!(tiles.len(), 15);
    assert!(!tiles.contains(&Tile::Empty));
}

#[test]
fn test_tile_shows_image_only_for_non_empty_url() {
    let mut cache = AlbumImageCache::from_persisted(vec![PersistedAlbum {
        artist: "Artist 1".to_string(),
        name: "Album 1".to_string(),
        url: "http://img/1.png".to_string(),
    }]);
    let empty = AlbumKey::new("Artist 2", "Album 2");
    let failed = AlbumKey::new("Artist 3", "Album 3");
    cache.mark_loading(empty.clone());
    cache.mark_loading(failed.clone());
    cache.apply_result(&empty, AlbumOutcome::Success(String::new()));
    cache.apply_result(&failed, AlbumOutcome::Failure);
    cache.mark_loading(AlbumKey::new("Artist 4", "Album 4"));

    let tiles = layout_month(&month_with(5), &cache);

    assert_eq!(
        tiles[0],
        Tile::Image {
            url: "http://img/1.png".to_string(),
            caption: "Artist 1 - Album 1".to_string(),
        }
    );
    // empty image, failed, loading and unknown all fall back to text
    for (i, tile) in tiles.iter().enumerate().take(5).skip(1) {
        assert_eq!(
            tile,
            &Tile::Text {
                artist: format!("Artist {}", i + 1),
                name: format!("Album {}", i + 1),
            }
        );
    }
    assert_eq!(tiles[5], Tile::Empty);
}

#[test]
fn test_render_table_lists_months_in_given_order() {
    let mut older = month_with(2);
    older.month.label = "2024-02".to_string();
    let newer = month_with(1);

    let out = render_table(&[newer, older], &AlbumImageCache::new());

    let newer_pos = out.find("Month: 2024-03").unwrap();
    let older_pos = out.find("Month: 2024-02").unwrap();
    assert!(newer_pos < older_pos);
    assert!(out.contains("Artist 1"));
}

#[test]
fn test_render_table_marks_empty_months() {
    let out = render_table(&[month_with(0)], &AlbumImageCache::new());
    assert!(out.contains("(no scrobbles)"));
}

#[test]
fn test_render_html_escapes_text() {
    let mut month = month_with(1);
    month.albums[0].artist = "Simon & Garfunkel".to_string();
    month.albums[0].name = "<Bookends>".to_string();

    let html = render_html(&[month], &AlbumImageCache::new());

    assert!(html.contains("Simon &amp; Garfunkel"));
    assert!(html.contains("&lt;Bookends&gt;"));
    assert!(!html.contains("<Bookends>"));
    assert_eq!(html.matches("class=\"tile\"").count(), 3);
}
