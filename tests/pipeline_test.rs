mod common;

use common::{Call, Endpoint, FakeSpotify, uri};
use vibester::{
    error::{Outcome, RemoteError, SortError},
    pipeline::{RunState, run_custom_sort, run_decade_sort, run_genre_sort},
    types::CustomCriteria,
};

fn count(calls: &[Call], pred: impl Fn(&Call) -> bool) -> usize {
    calls.iter().filter(|c| pred(c)).count()
}

/// 120 saved tracks spread evenly over three artists: rock, jazz, reggae.
fn three_genre_library() -> FakeSpotify {
    let api = FakeSpotify::new();
    api.set_genres("rocker", &["classic rock"]);
    api.set_genres("jazzer", &["bebop", "cool jazz"]);
    api.set_genres("dread", &["roots reggae"]);

    let artists = ["rocker", "jazzer", "dread"];
    for i in 0..120 {
        api.save_track(&format!("t{}", i), artists[i % 3], "1999-01-01");
    }
    api
}

#[tokio::test]
async fn test_genre_sort_end_to_end() {
    let api = three_genre_library();

    let ids = run_genre_sort(&api).await.unwrap();

    assert_eq!(ids, vec!["new-1", "new-2", "new-3"]);

    let playlists = api.playlists();
    let names: Vec<&str> = playlists.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Rock", "Jazz", "Reggae"]);

    for (offset, playlist) in playlists.iter().enumerate() {
        let expected: Vec<String> = (0..120)
            .filter(|i| i % 3 == offset)
            .map(|i| uri(&format!("t{}", i)))
            .collect();
        assert_eq!(playlist.uris, expected, "{}", playlist.name);
    }

    let calls = api.calls();
    assert_eq!(api.write_calls(), 3 + 3);
    assert_eq!(count(&calls, |c| matches!(c, Call::Create(_))), 3);
    assert_eq!(count(&calls, |c| matches!(c, Call::Replace(..))), 0);

    let artist_batches: Vec<usize> = calls
        .iter()
        .filter_map(|c| match c {
            Call::Artists(n) => Some(*n),
            _ => None,
        })
        .collect();
    assert_eq!(artist_batches, vec![50, 50, 20]);

    let feature_batches: Vec<usize> = calls
        .iter()
        .filter_map(|c| match c {
            Call::AudioFeatures(n) => Some(*n),
            _ => None,
        })
        .collect();
    assert_eq!(feature_batches, vec![100, 20]);

    assert_eq!(
        count(&calls, |c| matches!(c, Call::SavedTracks { .. })),
        1 + 3
    );
}

#[tokio::test]
async fn test_genre_sort_twice_is_idempotent() {
    let api = FakeSpotify::new();
    api.set_genres("rocker", &["hard rock"]);
    for i in 0..250 {
        api.save_track(&format!("t{}", i), "rocker", "1985");
    }
    let expected: Vec<String> = (0..250).map(|i| uri(&format!("t{}", i))).collect();

    let first = run_genre_sort(&api).await.unwrap();
    api.clear_calls();
    let second = run_genre_sort(&api).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(api.playlists().len(), 1);
    assert_eq!(api.playlist(&first[0]).unwrap().uris, expected);

    let writes: Vec<Call> = api
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::Create(_) | Call::Replace(..) | Call::Append(..)))
        .collect();
    assert_eq!(
        writes,
        vec![
            Call::Replace(first[0].clone(), 100),
            Call::Append(first[0].clone(), 100),
            Call::Append(first[0].clone(), 50),
        ]
    );
}

#[tokio::test]
async fn test_genre_sort_leaves_out_unclassified_tracks() {
    let api = FakeSpotify::new();
    api.set_genres("rocker", &["rock"]);
    api.set_genres("nobody", &["unrelated xyz"]);
    api.save_track("t1", "rocker", "2001");
    api.save_track("t2", "nobody", "2001");
    api.save_track("t3", "untagged", "2001");

    let ids = run_genre_sort(&api).await.unwrap();

    assert_eq!(ids.len(), 1);
    assert_eq!(api.playlist(&ids[0]).unwrap().uris, vec![uri("t1")]);
}

#[tokio::test]
async fn test_decade_sort_overwrites_existing_playlist() {
    let api = FakeSpotify::new();
    api.add_playlist("seventies", "70s", &[uri("stale")]);
    api.save_track("a", "x", "1975-06-01");
    api.save_track("b", "x", "1988-03");
    api.save_track("c", "x", "2021");
    api.save_track("d", "x", "1977");
    api.save_track("e", "x", "2035");

    let ids = run_decade_sort(&api).await.unwrap();

    assert_eq!(ids, vec!["seventies", "new-1", "new-2"]);
    assert_eq!(
        api.playlist("seventies").unwrap().uris,
        vec![uri("a"), uri("d")]
    );
    assert_eq!(api.playlist("new-1").unwrap().name, "80s");
    assert_eq!(api.playlist("new-2").unwrap().name, "2020s");
    assert_eq!(api.playlist("new-2").unwrap().uris, vec![uri("c")]);
}

#[tokio::test]
async fn test_custom_sort_filters_by_features() {
    let api = FakeSpotify::new();
    api.save_track("calm", "x", "2001");
    api.save_track("edge", "x", "2001");
    api.save_track("loud", "x", "2001");
    api.set_features("calm", 0.2, 0.1, 0.3);
    api.set_features("edge", 0.6, 0.8, 0.5);
    api.set_features("loud", 0.6, 0.95, 0.5);

    let criteria: CustomCriteria = serde_json::from_str(
        r#"{"energy": ["50", "80"], "danceability": [0, 100], "valence": ["0", 100], "name": "Upbeat"}"#,
    )
    .unwrap();

    let id = run_custom_sort(&api, &criteria).await.unwrap();

    let playlist = api.playlist(&id).unwrap();
    assert_eq!(playlist.name, "Upbeat");
    assert_eq!(playlist.uris, vec![uri("edge")]);
    assert_eq!(count(&api.calls(), |c| matches!(c, Call::Playlists { .. })), 0);
}

#[tokio::test]
async fn test_custom_sort_with_no_match_still_creates() {
    let api = FakeSpotify::new();
    api.save_track("t1", "x", "2001");
    let criteria = CustomCriteria {
        energy: [90.0, 100.0],
        danceability: [90.0, 100.0],
        valence: [90.0, 100.0],
        name: String::new(),
    };

    let id = run_custom_sort(&api, &criteria).await.unwrap();

    let playlist = api.playlist(&id).unwrap();
    assert_eq!(playlist.name, "Vibester Custom Playlist");
    assert!(playlist.uris.is_empty());
    assert_eq!(api.write_calls(), 1);
}

#[tokio::test]
async fn test_no_saved_tracks_stops_before_enrichment() {
    let api = FakeSpotify::new();

    let err = run_genre_sort(&api).await.unwrap_err();

    assert!(matches!(err, SortError::NoTracks));
    assert_eq!(err.outcome(), Outcome::NoData);
    assert_eq!(api.calls(), vec![Call::SavedTracks { limit: 1, offset: 0 }]);
}

#[tokio::test]
async fn test_too_many_saved_tracks_stops_before_paging() {
    let api = FakeSpotify::new();
    api.save_track("t1", "x", "2001");
    api.report_total(5000);

    let criteria = CustomCriteria {
        energy: [0.0, 100.0],
        danceability: [0.0, 100.0],
        valence: [0.0, 100.0],
        name: String::new(),
    };
    let err = run_custom_sort(&api, &criteria).await.unwrap_err();

    assert_eq!(err.outcome(), Outcome::TooManyTracks);
    assert_eq!(api.calls(), vec![Call::SavedTracks { limit: 1, offset: 0 }]);
}

#[tokio::test]
async fn test_remote_failure_ends_the_run() {
    let api = three_genre_library();
    api.fail(Endpoint::Artists);

    let err = run_decade_sort(&api).await.unwrap_err();

    assert_eq!(err.outcome(), Outcome::Failure);
    assert_eq!(api.write_calls(), 0);
    assert_eq!(count(&api.calls(), |c| matches!(c, Call::Artists(_))), 1);
}

#[tokio::test]
async fn test_missing_audio_features_is_malformed() {
    let api = FakeSpotify::new();
    api.save_track("t1", "x", "2001");
    api.save_track("t2", "x", "2001");
    api.drop_features("t2");

    let err = run_genre_sort(&api).await.unwrap_err();

    assert!(matches!(err, SortError::Remote(RemoteError::Malformed(_))));
}

#[test]
fn test_run_state_transitions() {
    use RunState::*;

    assert!(Fetching.can_advance_to(Enriching));
    assert!(Fetching.can_advance_to(NoData));
    assert!(Fetching.can_advance_to(TooManyTracks));
    assert!(Enriching.can_advance_to(Grouping));
    assert!(Grouping.can_advance_to(Reconciling));
    assert!(Reconciling.can_advance_to(Done));

    assert!(!Enriching.can_advance_to(NoData));
    assert!(!Fetching.can_advance_to(Reconciling));
    assert!(!Done.can_advance_to(Fetching));

    assert!(Done.is_terminal() && NoData.is_terminal() && TooManyTracks.is_terminal());
    assert!(!Grouping.is_terminal());
}
