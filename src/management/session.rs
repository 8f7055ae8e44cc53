//! Event-driven state machine behind a grid session.
//!
//! [`ApplicationState::update`] is a pure transition: it consumes the current
//! state and one [`Event`] and hands back the next state together with the
//! [`Effect`]s the runtime has to dispatch. Effects never run here; their
//! results come back later as new events.
//!
//! ```text
//! Idle ──start──> AwaitingMonth(m) ──ChartLoaded──> AwaitingMonth(m+1) | Finished
//!                                  └─ChartFailed──> Halted
//! ```

use tracing::{debug, warn};

use crate::{
    management::{AlbumImageCache, MonthChain},
    types::{
        ALBUMS_PER_MONTH, AlbumKey, AlbumOutcome, ChartAlbum, Month, MonthWithAlbums,
        PersistedAlbum,
    },
};

/// Position of the month chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainStatus {
    Idle,
    AwaitingMonth(Month),
    /// Cap reached or month sequence exhausted.
    Finished,
    /// A chart request failed; no further months are requested this session.
    Halted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ChartLoaded {
        month: Month,
        albums: Vec<ChartAlbum>,
    },
    ChartFailed {
        month: Month,
        error: String,
    },
    AlbumInfoLoaded {
        key: AlbumKey,
        outcome: AlbumOutcome,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchChart(Month),
    FetchAlbumInfo(AlbumKey),
    Persist(Vec<PersistedAlbum>),
}

/// Persistence gate: the store is only written once no image load is outstanding.
pub fn should_persist(cache: &AlbumImageCache) -> bool {
    !cache.is_any_pending()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationState {
    chain: MonthChain,
    months_with_albums: Vec<MonthWithAlbums>,
    cache: AlbumImageCache,
    status: ChainStatus,
    last_error: Option<String>,
}

impl ApplicationState {
    pub fn new(chain: MonthChain, cache: AlbumImageCache) -> Self {
        Self {
            chain,
            months_with_albums: Vec::new(),
            cache,
            status: ChainStatus::Idle,
            last_error: None,
        }
    }

    /// Builds the initial state and requests the first month of the chain.
    pub fn start(chain: MonthChain, cache: AlbumImageCache) -> (Self, Vec<Effect>) {
        let mut state = Self::new(chain, cache);
        let effects = match state.chain.first() {
            Some(month) => {
                state.status = ChainStatus::AwaitingMonth(month.clone());
                vec![Effect::FetchChart(month)]
            }
            None => {
                state.status = ChainStatus::Finished;
                Vec::new()
            }
        };
        (state, effects)
    }

    pub fn update(mut self, event: Event) -> (Self, Vec<Effect>) {
        let mut effects = Vec::new();

        match event {
            Event::ChartLoaded { month, mut albums } => {
                albums.truncate(ALBUMS_PER_MONTH);
                debug!(month = %month.label, albums = albums.len(), "chart loaded");

                let planned = self.cache.plan_fetch_batch(&albums);
                self.months_with_albums
                    .insert(0, MonthWithAlbums { month, albums });

                match self.chain.advance(self.months_with_albums.len()) {
                    Some(next) => {
                        self.status = ChainStatus::AwaitingMonth(next.clone());
                        effects.push(Effect::FetchChart(next));
                    }
                    None => self.status = ChainStatus::Finished,
                }

                effects.extend(planned.into_iter().map(Effect::FetchAlbumInfo));
            }
            Event::ChartFailed { month, error } => {
                // TODO: decide whether a failed month should be skipped instead of halting the chain
                warn!(month = %month.label, %error, "chart request failed, month chain halted");
                self.last_error = Some(format!("{}: {}", month.label, error));
                self.status = ChainStatus::Halted;
            }
            Event::AlbumInfoLoaded { key, outcome } => {
                if outcome == AlbumOutcome::Failure {
                    debug!(album = %key, "album info request failed");
                }
                self.cache.apply_result(&key, outcome);
                if should_persist(&self.cache) {
                    effects.push(Effect::Persist(self.cache.to_persisted()));
                }
            }
        }

        (self, effects)
    }

    /// Fetched months, most recent fetch first.
    pub fn months_with_albums(&self) -> &[MonthWithAlbums] {
        &self.months_with_albums
    }

    pub fn cache(&self) -> &AlbumImageCache {
        &self.cache
    }

    pub fn status(&self) -> &ChainStatus {
        &self.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn months_fetched(&self) -> usize {
        self.months_with_albums.len()
    }
}
