use crate::{
    lastfm::{LastFmError, decode},
    types::{AlbumInfo, AlbumInfoResponse, AlbumOutcome, ImageEntry},
};

const PREFERRED_IMAGE_SIZE: &str = "extralarge";

/// Parses an `album.getInfo` response down to the cover image url.
///
/// # Arguments
///
/// * `body` - Raw JSON body returned by Last.fm
///
/// # Returns
///
/// The selected cover image (see [`select_image`]) or the error carried by
/// the response.
pub fn parse_album_info(body: &str) -> Result<AlbumInfo, LastFmError> {
    let response: AlbumInfoResponse = decode(body)?;
    Ok(AlbumInfo {
        image_url: select_image(&response.album.image),
    })
}

/// Picks the `extralarge` image, falling back to the last non-empty one.
///
/// Last.fm lists images smallest first, so the fallback is the largest
/// available. Returns an empty string when the album has no artwork.
pub fn select_image(images: &[ImageEntry]) -> String {
    images
        .iter()
        .find(|i| i.size == PREFERRED_IMAGE_SIZE && !i.url.is_empty())
        .or_else(|| images.iter().rev().find(|i| !i.url.is_empty()))
        .map(|i| i.url.clone())
        .unwrap_or_default()
}

/// Maps an album-info result to the state the album settles into.
///
/// An album Last.fm does not know settles as loaded without an image.
pub fn album_outcome(result: Result<AlbumInfo, LastFmError>) -> AlbumOutcome {
    match result {
        Ok(info) => AlbumOutcome::Success(info.image_url),
        Err(LastFmError::NotFound(_)) => AlbumOutcome::Success(String::new()),
        Err(_) => AlbumOutcome::Failure,
    }
}
