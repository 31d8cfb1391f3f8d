//! Integration tests for queueing tracks from the command line

use mixtape_builder::{BuilderConfig, DropOutcome, PlaylistBuilder};
use mixtape_cli::queue_tracks;
use mixtape_core::{Track, TrackId};
use std::path::PathBuf;

fn create_test_builder(names: &[&str]) -> (PlaylistBuilder, Vec<TrackId>) {
    let mut builder = PlaylistBuilder::new(BuilderConfig::default());
    let ids = builder.add_tracks(
        names
            .iter()
            .map(|name| Track::from_upload(PathBuf::from(format!("/music/{}.mp3", name)), 60.0))
            .collect(),
    );
    (builder, ids)
}

fn playlist_tracks(builder: &PlaylistBuilder) -> Vec<TrackId> {
    builder
        .playlist()
        .entries()
        .iter()
        .map(|entry| entry.track_id().clone())
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_repeated_key_is_added_once() {
    let (mut builder, ids) = create_test_builder(&["a", "b"]);
    let keys = vec![ids[0].clone(), ids[1].clone(), ids[0].clone()];

    let outcome = queue_tracks(&mut builder, &keys, None).await.unwrap();

    assert_eq!(outcome, DropOutcome::Inserted { index: 0, count: 2 });
    assert_eq!(playlist_tracks(&builder), vec![ids[0].clone(), ids[1].clone()]);
    assert!(builder.track_selection().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_batch_lands_in_upload_order() {
    let (mut builder, ids) = create_test_builder(&["a", "b", "c"]);
    let keys = vec![ids[2].clone(), ids[0].clone()];

    queue_tracks(&mut builder, &keys, None).await.unwrap();

    assert_eq!(playlist_tracks(&builder), vec![ids[0].clone(), ids[2].clone()]);
}

#[tokio::test(start_paused = true)]
async fn test_queue_at_position_inserts_before_entry() {
    let (mut builder, ids) = create_test_builder(&["a", "b", "c"]);
    queue_tracks(&mut builder, &ids[..2], None).await.unwrap();

    let outcome = queue_tracks(&mut builder, &[ids[2].clone()], Some(2))
        .await
        .unwrap();

    assert_eq!(outcome, DropOutcome::Inserted { index: 1, count: 1 });
    assert_eq!(
        playlist_tracks(&builder),
        vec![ids[0].clone(), ids[2].clone(), ids[1].clone()]
    );
}

#[tokio::test(start_paused = true)]
async fn test_queue_at_missing_position_changes_nothing() {
    let (mut builder, ids) = create_test_builder(&["a"]);

    let result = queue_tracks(&mut builder, &ids, Some(3)).await;

    assert!(result.is_err());
    assert!(builder.playlist().is_empty());
    assert!(!builder.is_dragging());
}
