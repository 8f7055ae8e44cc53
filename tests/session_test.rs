use lastgrid::management::{
    AlbumImageCache, ApplicationState, ChainStatus, Effect, Event, MonthChain, should_persist,
};
use lastgrid::types::{AlbumKey, AlbumOutcome, ChartAlbum, Month, PersistedAlbum};

fn months(count: usize) -> Vec<Month> {
    (0..count)
        .map(|i| Month {
            label: format!("2024-{:02}", i + 1),
            start: i as i64 * 100,
            end: (i as i64 + 1) * 100,
        })
        .collect()
}

fn chart_album(artist: &str, name: &str, rank: u32) -> ChartAlbum {
    ChartAlbum {
        artist: artist.to_string(),
        name: name.to_string(),
        rank,
        playcount: 1,
    }
}

fn chart_requests(effects: &[Effect]) -> Vec<Month> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::FetchChart(m) => Some(m.clone()),
            _ => None,
        })
        .collect()
}

fn album_requests(effects: &[Effect]) -> Vec<AlbumKey> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::FetchAlbumInfo(k) => Some(k.clone()),
            _ => None,
        })
        .collect()
}

fn persist_writes(effects: &[Effect]) -> Vec<Vec<PersistedAlbum>> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Persist(entries) => Some(entries.clone()),
            _ => None,
        })
        .collect()
}

fn start(count: usize) -> (ApplicationState, Vec<Effect>) {
    ApplicationState::start(MonthChain::new(months(count), 12), AlbumImageCache::new())
}

#[test]
fn test_start_requests_first_month() {
    let (state, effects) = start(3);
    let first = months(3)[0].clone();

    assert_eq!(effects, vec![Effect::FetchChart(first.clone())]);
    assert_eq!(state.status(), &ChainStatus::AwaitingMonth(first));
}

#[test]
fn test_start_with_no_months_finishes() {
    let (state, effects) = start(0);
    assert!(effects.is_empty());
    assert_eq!(state.status(), &ChainStatus::Finished);
}

#[test]
fn test_chain_fetches_exactly_twelve_months_in_sequence() {
    let (mut state, mut effects) = start(14);
    let mut requested = Vec::new();

    loop {
        let charts = chart_requests(&effects);
        // never more than one chart request outstanding
        assert!(charts.len() <= 1);
        let Some(month) = charts.into_iter().next() else {
            break;
        };
        requested.push(month.label.clone());
        let (next, next_effects) = state.update(Event::ChartLoaded {
            month,
            albums: Vec::new(),
        });
        state = next;
        effects = next_effects;
    }

    let expected: Vec<String> = months(12).into_iter().map(|m| m.label).collect();
    assert_eq!(requested, expected);
    assert_eq!(state.months_fetched(), 12);
    assert_eq!(state.status(), &ChainStatus::Finished);
}

#[test]
fn test_months_accumulate_most_recent_first() {
    let seq = months(3);
    let (state, _) = start(3);
    let (state, _) = state.update(Event::ChartLoaded {
        month: seq[0].clone(),
        albums: Vec::new(),
    });
    let (state, _) = state.update(Event::ChartLoaded {
        month: seq[1].clone(),
        albums: Vec::new(),
    });

    let labels: Vec<&str> = state
        .months_with_albums()
        .iter()
        .map(|m| m.month.label.as_str())
        .collect();
    assert_eq!(labels, vec!["2024-02", "2024-01"]);
}

#[test]
fn test_chart_failure_halts_chain() {
    let seq = months(6);
    let (state, _) = start(6);
    let (state, _) = state.update(Event::ChartLoaded {
        month: seq[0].clone(),
        albums: vec![chart_album("A", "a", 1)],
    });
    let (state, effects) = state.update(Event::ChartFailed {
        month: seq[1].clone(),
        error: "HTTP request failed".to_string(),
    });

    assert!(effects.is_empty());
    assert_eq!(state.status(), &ChainStatus::Halted);
    assert_eq!(state.last_error(), Some("2024-02: HTTP request failed"));
    // the month fetched before the failure stays available
    assert_eq!(state.months_fetched(), 1);
    assert!(state.cache().is_loaded_or_pending(&AlbumKey::new("A", "a")));

    // later album results are still applied
    let (state, effects) = state.update(Event::AlbumInfoLoaded {
        key: AlbumKey::new("A", "a"),
        outcome: AlbumOutcome::Success("http://img/a.png".to_string()),
    });
    assert!(chart_requests(&effects).is_empty());
    assert_eq!(persist_writes(&effects).len(), 1);
    assert_eq!(state.status(), &ChainStatus::Halted);
}

#[test]
fn test_month_keeps_only_fifteen_albums() {
    let seq = months(1);
    let albums: Vec<ChartAlbum> = (1..=16)
        .map(|i| chart_album(&format!("Artist {i}"), &format!("Album {i}"), i))
        .collect();
    let (state, _) = start(1);
    let (state, effects) = state.update(Event::ChartLoaded {
        month: seq[0].clone(),
        albums,
    });

    assert_eq!(state.months_with_albums()[0].albums.len(), 15);
    assert_eq!(album_requests(&effects).len(), 15);
    assert!(chart_requests(&effects).is_empty());
    assert_eq!(state.status(), &ChainStatus::Finished);
}

#[test]
fn test_album_fetched_at_most_once_across_months() {
    let seq = months(3);
    let (state, _) = start(3);
    let (state, effects) = state.update(Event::ChartLoaded {
        month: seq[0].clone(),
        albums: vec![chart_album("A", "a", 1), chart_album("B", "b", 2)],
    });
    assert_eq!(
        album_requests(&effects),
        vec![AlbumKey::new("A", "a"), AlbumKey::new("B", "b")]
    );
    assert_eq!(chart_requests(&effects), vec![seq[1].clone()]);

    let (state, effects) = state.update(Event::ChartLoaded {
        month: seq[1].clone(),
        albums: vec![chart_album("B", "b", 1), chart_album("C", "c", 2)],
    });
    assert_eq!(album_requests(&effects), vec![AlbumKey::new("C", "c")]);

    // a settled album is not requested again either
    let (state, _) = state.update(Event::AlbumInfoLoaded {
        key: AlbumKey::new("A", "a"),
        outcome: AlbumOutcome::Failure,
    });
    let (_, effects) = state.update(Event::ChartLoaded {
        month: seq[2].clone(),
        albums: vec![chart_album("A", "a", 1)],
    });
    assert!(album_requests(&effects).is_empty());
}

#[test]
fn test_persisted_albums_are_not_requested() {
    let cache = AlbumImageCache::from_persisted(vec![PersistedAlbum {
        artist: "A".to_string(),
        name: "a".to_string(),
        url: "http://img/a.png".to_string(),
    }]);
    let seq = months(1);
    let (state, _) = ApplicationState::start(MonthChain::new(seq.clone(), 12), cache);
    let (_, effects) = state.update(Event::ChartLoaded {
        month: seq[0].clone(),
        albums: vec![chart_album("A", "a", 1), chart_album("B", "b", 2)],
    });

    assert_eq!(album_requests(&effects), vec![AlbumKey::new("B", "b")]);
}

#[test]
fn test_persist_only_when_last_album_settles() {
    let seq = months(1);
    let (state, _) = start(1);
    let (state, _) = state.update(Event::ChartLoaded {
        month: seq[0].clone(),
        albums: vec![chart_album("A", "a", 1), chart_album("B", "b", 2)],
    });

    let (state, effects) = state.update(Event::AlbumInfoLoaded {
        key: AlbumKey::new("B", "b"),
        outcome: AlbumOutcome::Success("http://img/b.png".to_string()),
    });
    assert!(persist_writes(&effects).is_empty());
    assert!(!should_persist(state.cache()));

    let (state, effects) = state.update(Event::AlbumInfoLoaded {
        key: AlbumKey::new("A", "a"),
        outcome: AlbumOutcome::Success("http://img/a.png".to_string()),
    });
    assert!(should_persist(state.cache()));
    assert_eq!(
        persist_writes(&effects),
        vec![vec![
            PersistedAlbum {
                artist: "A".to_string(),
                name: "a".to_string(),
                url: "http://img/a.png".to_string(),
            },
            PersistedAlbum {
                artist: "B".to_string(),
                name: "b".to_string(),
                url: "http://img/b.png".to_string(),
            },
        ]]
    );
}

#[test]
fn test_persist_waits_for_albums_of_every_month() {
    let seq = months(2);
    let (state, _) = start(2);
    let (state, _) = state.update(Event::ChartLoaded {
        month: seq[0].clone(),
        albums: vec![chart_album("A", "a", 1)],
    });
    let (state, _) = state.update(Event::ChartLoaded {
        month: seq[1].clone(),
        albums: vec![chart_album("B", "b", 1)],
    });

    // A settles but B from the later month is still loading
    let (state, effects) = state.update(Event::AlbumInfoLoaded {
        key: AlbumKey::new("A", "a"),
        outcome: AlbumOutcome::Success("http://img/a.png".to_string()),
    });
    assert!(persist_writes(&effects).is_empty());

    let (_, effects) = state.update(Event::AlbumInfoLoaded {
        key: AlbumKey::new("B", "b"),
        outcome: AlbumOutcome::Failure,
    });
    let writes = persist_writes(&effects);
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].len(), 1);
    assert_eq!(writes[0][0].artist, "A");
}
