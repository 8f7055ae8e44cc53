//! # Last.fm Integration Module
//!
//! Thin client for the two Last.fm web API methods a grid session needs:
//!
//! - [`charts`] - `user.getWeeklyAlbumChart`, the ranked albums a user
//!   listened to inside a `from`/`to` window
//! - [`albums`] - `album.getInfo`, used to resolve an album's cover image
//!
//! Both are exposed through the [`ScrobbleApi`] trait so the session runtime
//! can be driven by a fake in tests.
//!
//! ## Error Handling
//!
//! Last.fm reports failures as a JSON body of the form
//! `{"error": <code>, "message": "..."}`, sometimes with a 200 status. The
//! body is checked for that shape before it is decoded as a success payload.
//! Code 6 ("not found") is surfaced as [`LastFmError::NotFound`] so callers
//! can treat a missing album as "no image" rather than as a failure.
//!
//! No request is retried.

pub mod albums;
pub mod charts;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::types::{AlbumInfo, ApiErrorResponse, ChartAlbum};

/// Default endpoint of the Last.fm web API.
pub const DEFAULT_API_URL: &str = "https://ws.audioscrobbler.com/2.0/";

const ERROR_CODE_NOT_FOUND: u32 = 6;

#[derive(Debug, Error)]
pub enum LastFmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Last.fm API error {code}: {message}")]
    Api { code: u32, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Remote scrobbling service queried during a session.
///
/// Implementations must be shareable across the tasks the session runtime
/// spawns for each request.
#[async_trait]
pub trait ScrobbleApi: Send + Sync {
    /// Retrieves the weekly album chart of a user for one time window.
    ///
    /// # Arguments
    ///
    /// * `user` - Last.fm user name
    /// * `from` - Window start in unix seconds (inclusive)
    /// * `to` - Window end in unix seconds (exclusive)
    ///
    /// # Returns
    ///
    /// The albums listened to inside the window, ordered by rank.
    async fn fetch_weekly_chart(
        &self,
        user: &str,
        from: i64,
        to: i64,
    ) -> Result<Vec<ChartAlbum>, LastFmError>;

    /// Looks up an album to resolve its cover image.
    ///
    /// # Arguments
    ///
    /// * `artist` - Album artist exactly as it appeared in the chart
    /// * `name` - Album name exactly as it appeared in the chart
    ///
    /// # Returns
    ///
    /// The album's cover url, empty when Last.fm has no artwork for it.
    /// [`LastFmError::NotFound`] when Last.fm does not know the album.
    async fn fetch_album_info(&self, artist: &str, name: &str) -> Result<AlbumInfo, LastFmError>;
}

/// [`ScrobbleApi`] backed by the Last.fm web API over HTTPS.
pub struct LastFmClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl LastFmClient {
    /// Creates a client for the given endpoint.
    ///
    /// # Arguments
    ///
    /// * `api_url` - Base url of the web API, usually [`DEFAULT_API_URL`]
    /// * `api_key` - Last.fm API key sent with every request
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
        }
    }

    /// Issues a GET for `method` and returns the raw response body.
    async fn call(&self, method: &str, params: &[(&str, &str)]) -> Result<String, LastFmError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("method", method),
                ("api_key", self.api_key.as_str()),
                ("format", "json"),
            ])
            .query(params)
            .send()
            .await?;

        Ok(response.text().await?)
    }
}

#[async_trait]
impl ScrobbleApi for LastFmClient {
    async fn fetch_weekly_chart(
        &self,
        user: &str,
        from: i64,
        to: i64,
    ) -> Result<Vec<ChartAlbum>, LastFmError> {
        let from = from.to_string();
        let to = to.to_string();
        let body = self
            .call(
                "user.getweeklyalbumchart",
                &[("user", user), ("from", from.as_str()), ("to", to.as_str())],
            )
            .await?;
        charts::parse_weekly_chart(&body)
    }

    async fn fetch_album_info(&self, artist: &str, name: &str) -> Result<AlbumInfo, LastFmError> {
        let body = self
            .call(
                "album.getinfo",
                &[("artist", artist), ("album", name), ("autocorrect", "0")],
            )
            .await?;
        albums::parse_album_info(&body)
    }
}

/// Decodes a Last.fm response body, turning an error payload into [`LastFmError`].
///
/// # Arguments
///
/// * `body` - Raw JSON body of any Last.fm method
///
/// # Returns
///
/// The decoded success payload. An `{error, message}` body becomes
/// [`LastFmError::NotFound`] for code 6 and [`LastFmError::Api`] otherwise;
/// anything else that does not match `T` becomes [`LastFmError::Parse`].
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, LastFmError> {
    if let Ok(err) = serde_json::from_str::<ApiErrorResponse>(body) {
        return Err(if err.error == ERROR_CODE_NOT_FOUND {
            LastFmError::NotFound(err.message)
        } else {
            LastFmError::Api {
                code: err.error,
                message: err.message,
            }
        });
    }

    serde_json::from_str(body).map_err(|e| LastFmError::Parse(e.to_string()))
}
