use tabled::{builder::Builder, settings::Style};

use crate::{
    management::AlbumImageCache,
    types::{ALBUMS_PER_MONTH, GRID_COLUMNS, MonthWithAlbums},
    utils,
};

/// A single grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tile {
    /// Album with a resolved, non-empty image url.
    Image { url: String, caption: String },
    /// Album without an image: not resolved yet, failed, or resolved without artwork.
    Text { artist: String, name: String },
    /// Padding up to a full row.
    Empty,
}

/// Lays out one month as at most fifteen album tiles padded to full rows.
pub fn layout_month(month: &MonthWithAlbums, cache: &AlbumImageCache) -> Vec<Tile> {
    let mut tiles: Vec<Tile> = month
        .albums
        .iter()
        .take(ALBUMS_PER_MONTH)
        .map(|album| match cache.image_url(&album.key()) {
            Some(url) => Tile::Image {
                url: url.to_string(),
                caption: album.key().to_string(),
            },
            None => Tile::Text {
                artist: album.artist.clone(),
                name: album.name.clone(),
            },
        })
        .collect();

    let padded = utils::pad_to_multiple(tiles.len(), GRID_COLUMNS);
    tiles.resize(padded, Tile::Empty);
    tiles
}

/// Renders every month, in the given order, as a three column table.
pub fn render_table(months: &[MonthWithAlbums], cache: &AlbumImageCache) -> String {
    let mut out = String::new();

    for month in months {
        let tiles = layout_month(month, cache);
        out.push_str(&format!("Month: {}\n", month.month.label));

        if tiles.is_empty() {
            out.push_str("(no scrobbles)\n\n");
            continue;
        }

        let mut builder = Builder::default();
        for row in tiles.chunks(GRID_COLUMNS) {
            builder.push_record(row.iter().map(tile_text));
        }
        let mut table = builder.build();
        table.with(Style::rounded());
        out.push_str(&format!("{}\n\n", table));
    }

    out
}

fn tile_text(tile: &Tile) -> String {
    match tile {
        Tile::Image { url, caption } => format!("{caption}\n{url}"),
        Tile::Text { artist, name } => format!("{artist}\n{name}"),
        Tile::Empty => String::new(),
    }
}

/// Renders a standalone HTML page with one image grid per month.
pub fn render_html(months: &[MonthWithAlbums], cache: &AlbumImageCache) -> String {
    let mut out = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>lastgrid</title>\n\
         <style>\n\
         body { font-family: sans-serif; background: #111; color: #eee; }\n\
         .grid { display: grid; grid-template-columns: repeat(3, 174px); gap: 4px; margin-bottom: 2em; }\n\
         .tile { width: 174px; height: 174px; background: #222; overflow: hidden; font-size: 12px; }\n\
         .tile img { width: 100%; height: 100%; object-fit: cover; }\n\
         .tile p { margin: 8px; }\n\
         </style>\n</head>\n<body>\n",
    );

    for month in months {
        out.push_str(&format!("<h2>{}</h2>\n<div class=\"grid\">\n", escape_html(&month.month.label)));
        for tile in layout_month(month, cache) {
            match tile {
                Tile::Image { url, caption } => out.push_str(&format!(
                    "<div class=\"tile\"><img src=\"{}\" alt=\"{}\" title=\"{}\"></div>\n",
                    escape_html(&url),
                    escape_html(&caption),
                    escape_html(&caption)
                )),
                Tile::Text { artist, name } => out.push_str(&format!(
                    "<div class=\"tile\"><p><b>{}</b></p><p>{}</p></div>\n",
                    escape_html(&artist),
                    escape_html(&name)
                )),
                Tile::Empty => out.push_str("<div class=\"tile\"></div>\n"),
            }
        }
        out.push_str("</div>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
