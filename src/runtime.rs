//! Effect dispatcher for a grid session.
//!
//! Runs the [`ApplicationState`] transition function against real (or fake)
//! collaborators. Chart and album-info requests are spawned into a
//! [`JoinSet`] and their results are applied as [`Event`]s one at a time, in
//! completion order, each to completion before the next. A request task that
//! dies without a result (a panic or a cancellation) settles as a failure of
//! the request it was running. Persistence writes are awaited in place so
//! they land in the order they were decided. The session ends once no
//! request is outstanding.

use std::{collections::HashMap, sync::Arc};

use tokio::task::{Id, JoinError, JoinSet};
use tracing::{debug, warn};

use crate::{
    lastfm::{ScrobbleApi, albums},
    management::{AlbumImageCache, ApplicationState, Effect, Event, ImageUrlStore, MonthChain},
    types::{AlbumKey, AlbumOutcome, Month},
};

/// Final state of a session plus counters of what it dispatched.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub state: ApplicationState,
    pub chart_requests: usize,
    pub album_requests: usize,
    pub persist_writes: usize,
}

/// What an outstanding task was asked to fetch.
enum Request {
    Chart(Month),
    AlbumInfo(AlbumKey),
}

impl Request {
    fn into_failure(self, error: &JoinError) -> Event {
        match self {
            Request::Chart(month) => Event::ChartFailed {
                month,
                error: format!("chart request aborted: {error}"),
            },
            Request::AlbumInfo(key) => Event::AlbumInfoLoaded {
                key,
                outcome: AlbumOutcome::Failure,
            },
        }
    }
}

struct Dispatcher<'a> {
    api: Arc<dyn ScrobbleApi>,
    store: &'a dyn ImageUrlStore,
    user: String,
    tasks: JoinSet<Event>,
    requests: HashMap<Id, Request>,
    chart_requests: usize,
    album_requests: usize,
    persist_writes: usize,
}

impl Dispatcher<'_> {
    async fn dispatch(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchChart(month) => self.fetch_chart(month),
                Effect::FetchAlbumInfo(key) => self.fetch_album_info(key),
                Effect::Persist(entries) => {
                    self.persist_writes += 1;
                    match self.store.save(&entries).await {
                        Ok(()) => debug!(entries = entries.len(), "album image cache saved"),
                        Err(e) => warn!(error = %e, "cannot save album image cache"),
                    }
                }
            }
        }
    }

    fn fetch_chart(&mut self, month: Month) {
        self.chart_requests += 1;
        let api = Arc::clone(&self.api);
        let user = self.user.clone();
        let request = Request::Chart(month.clone());
        let handle = self.tasks.spawn(async move {
            match api.fetch_weekly_chart(&user, month.start, month.end).await {
                Ok(albums) => Event::ChartLoaded { month, albums },
                Err(e) => Event::ChartFailed {
                    month,
                    error: e.to_string(),
                },
            }
        });
        self.requests.insert(handle.id(), request);
    }

    fn fetch_album_info(&mut self, key: AlbumKey) {
        self.album_requests += 1;
        let api = Arc::clone(&self.api);
        let request = Request::AlbumInfo(key.clone());
        let handle = self.tasks.spawn(async move {
            let result = api.fetch_album_info(&key.artist, &key.name).await;
            if let Err(e) = &result {
                warn!(album = %key, error = %e, "album info request failed");
            }
            let outcome = albums::album_outcome(result);
            Event::AlbumInfoLoaded { key, outcome }
        });
        self.requests.insert(handle.id(), request);
    }

    /// Waits for the next request to settle. `None` once nothing is outstanding.
    async fn next_event(&mut self) -> Option<Event> {
        loop {
            match self.tasks.join_next_with_id().await? {
                Ok((id, event)) => {
                    self.requests.remove(&id);
                    return Some(event);
                }
                Err(e) => match self.requests.remove(&e.id()) {
                    Some(request) => {
                        warn!(error = %e, "request task ended without a result");
                        return Some(request.into_failure(&e));
                    }
                    None => warn!(error = %e, "untracked request task ended"),
                },
            }
        }
    }
}

/// Runs one session to quiescence.
///
/// The cache is seeded from `store`; a store that cannot be read starts the
/// session with an empty cache. `on_update` is called after every event.
pub async fn run_session(
    api: Arc<dyn ScrobbleApi>,
    store: &dyn ImageUrlStore,
    user: &str,
    months: Vec<Month>,
    cap: usize,
    mut on_update: impl FnMut(&ApplicationState),
) -> SessionReport {
    let cache = match store.load().await {
        Ok(entries) => {
            let cache = AlbumImageCache::from_persisted(entries);
            debug!(entries = cache.len(), "album image cache loaded");
            cache
        }
        Err(e) => {
            warn!(error = %e, "cannot load album image cache, starting empty");
            AlbumImageCache::new()
        }
    };

    let mut dispatcher = Dispatcher {
        api,
        store,
        user: user.to_string(),
        tasks: JoinSet::new(),
        requests: HashMap::new(),
        chart_requests: 0,
        album_requests: 0,
        persist_writes: 0,
    };

    let (mut state, effects) = ApplicationState::start(MonthChain::new(months, cap), cache);
    on_update(&state);
    dispatcher.dispatch(effects).await;

    while let Some(event) = dispatcher.next_event().await {
        let (next, effects) = state.update(event);
        state = next;
        on_update(&state);
        dispatcher.dispatch(effects).await;
    }

    SessionReport {
        state,
        chart_requests: dispatcher.chart_requests,
        album_requests: dispatcher.album_requests,
        persist_writes: dispatcher.persist_writes,
    }
}
