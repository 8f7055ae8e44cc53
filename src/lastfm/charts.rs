use crate::{
    lastfm::{LastFmError, decode},
    types::{ChartAlbum, WeeklyAlbumChartResponse},
};

/// Parses a `user.getWeeklyAlbumChart` response into albums ordered by rank.
///
/// Entries whose rank cannot be read keep their position in the response.
///
/// # Arguments
///
/// * `body` - Raw JSON body returned by Last.fm
///
/// # Returns
///
/// The chart's albums sorted by ascending rank, an empty list for a window
/// without scrobbles, or the [`LastFmError`] carried by an error payload.
///
/// # Example
///
/// ```
/// use lastgrid::lastfm::{LastFmError, charts::parse_weekly_chart};
///
/// # fn main() -> Result<(), LastFmError> {
/// let body = r#"{"weeklyalbumchart":{"album":[
///     {"artist":{"#text":"Low"},"name":"Things We Lost in the Fire",
///      "@attr":{"rank":"1"},"playcount":"31"}
/// ]}}"#;
/// let albums = parse_weekly_chart(body)?;
/// assert_eq!(albums[0].rank, 1);
/// # Ok(())
/// # }
/// ```
pub fn parse_weekly_chart(body: &str) -> Result<Vec<ChartAlbum>, LastFmError> {
    let response: WeeklyAlbumChartResponse = decode(body)?;

    let mut albums: Vec<ChartAlbum> = response
        .weeklyalbumchart
        .album
        .into_vec()
        .into_iter()
        .enumerate()
        .map(|(position, entry)| ChartAlbum {
            artist: entry.artist.text,
            name: entry.name,
            rank: entry
                .attr
                .rank
                .parse()
                .unwrap_or(position as u32 + 1),
            playcount: entry.playcount.parse().unwrap_or(0),
        })
        .collect();

    // stable, so equal ranks keep response order
    albums.sort_by_key(|a| a.rank);
    Ok(albums)
}
