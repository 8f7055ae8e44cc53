use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Albums of a month's chart that are eligible for display and image fetching.
pub const ALBUMS_PER_MONTH: usize = 15;

/// Upper bound on chart fetches in one session.
pub const MONTH_CAP: usize = 12;

/// Tiles per grid row.
pub const GRID_COLUMNS: usize = 3;

/// A calendar month window, bounds in unix seconds (start inclusive, end exclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Month {
    pub label: String,
    pub start: i64,
    pub end: i64,
}

/// Identity of an album across months and sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlbumKey {
    pub artist: String,
    pub name: String,
}

impl AlbumKey {
    pub fn new(artist: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for AlbumKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.artist, self.name)
    }
}

/// Image resolution state of a single album. `Loaded` and `Failed` are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlbumLoadState {
    Loading,
    Loaded(String),
    Failed,
}

impl AlbumLoadState {
    pub fn is_pending(&self) -> bool {
        matches!(self, AlbumLoadState::Loading)
    }
}

/// Settled result of an album-info request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlbumOutcome {
    Success(String),
    Failure,
}

/// One entry of a weekly album chart, in the order Last.fm ranked it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartAlbum {
    pub artist: String,
    pub name: String,
    pub rank: u32,
    pub playcount: u32,
}

impl ChartAlbum {
    pub fn key(&self) -> AlbumKey {
        AlbumKey::new(self.artist.clone(), self.name.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthWithAlbums {
    pub month: Month,
    pub albums: Vec<ChartAlbum>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumInfo {
    pub image_url: String,
}

/// On-disk form of a resolved album image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedAlbum {
    pub artist: String,
    pub name: String,
    pub url: String,
}

#[derive(Tabled)]
pub struct CacheTableRow {
    pub artist: String,
    pub album: String,
    pub image: String,
}

#[derive(Tabled)]
pub struct MonthTableRow {
    pub month: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeeklyAlbumChartResponse {
    pub weeklyalbumchart: WeeklyAlbumChart,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeeklyAlbumChart {
    #[serde(default)]
    pub album: OneOrMany<ChartEntry>,
}

/// Last.fm collapses single-element lists into a bare object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartEntry {
    pub artist: TextField,
    pub name: String,
    #[serde(rename = "@attr")]
    pub attr: RankAttr,
    #[serde(default)]
    pub playcount: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextField {
    #[serde(rename = "#text")]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankAttr {
    pub rank: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumInfoResponse {
    pub album: AlbumInfoBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumInfoBody {
    pub name: String,
    pub artist: String,
    #[serde(default)]
    pub image: Vec<ImageEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageEntry {
    #[serde(rename = "#text")]
    pub url: String,
    #[serde(default)]
    pub size: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: u32,
    pub message: String,
}
