//! Property-based tests for the playlist builder
//!
//! Uses proptest to check invariants that must hold for any sequence of
//! operations.

use chrono::{Duration, TimeZone, Utc};
use mixtape_builder::{BuilderConfig, EntityStore, PlaylistBuilder};
use mixtape_core::{Track, TrackId};
use proptest::prelude::*;
use std::collections::HashSet;
use std::path::PathBuf;

fn create_tracks(count: usize) -> Vec<Track> {
    (0..count)
        .map(|i| Track::from_upload(PathBuf::from(format!("/music/{}.mp3", i)), 30.0))
        .collect()
}

#[derive(Debug, Clone)]
enum Op {
    Delete(usize),
    Restore(usize),
    Purge(usize),
}

fn op_strategy(size: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..size).prop_map(Op::Delete),
        (0..size).prop_map(Op::Restore),
        (0..size).prop_map(Op::Purge),
    ]
}

proptest! {
    /// Entry ids stay unique no matter how often tracks are added
    #[test]
    fn prop_entry_ids_unique(picks in prop::collection::vec(0usize..5, 1..60)) {
        let mut builder = PlaylistBuilder::new(BuilderConfig::default());
        let ids = builder.add_tracks(create_tracks(5));

        for pick in picks {
            builder.add_to_playlist(&ids[pick]).unwrap();
        }

        let entries = builder.playlist().entries();
        let unique: HashSet<_> = entries.iter().map(|e| e.entry_id.clone()).collect();
        prop_assert_eq!(unique.len(), entries.len());
    }

    /// Active and deleted views partition the collection
    #[test]
    fn prop_views_partition_collection(ops in prop::collection::vec(op_strategy(8), 0..40)) {
        let tracks = create_tracks(8);
        let ids: Vec<TrackId> = tracks.iter().map(|t| t.id.clone()).collect();
        let mut store = EntityStore::from_vec(tracks);

        for op in ops {
            match op {
                Op::Delete(i) => { store.soft_delete(&[ids[i].clone()], Utc::now()); }
                Op::Restore(i) => { store.restore(&[ids[i].clone()]); }
                Op::Purge(i) => { store.purge(&[ids[i].clone()]); }
            }
        }

        let active: HashSet<_> = store.active().iter().map(|t| t.id.clone()).collect();
        let deleted: HashSet<_> = store.deleted().iter().map(|t| t.id.clone()).collect();
        let all: HashSet<_> = store.items().iter().map(|t| t.id.clone()).collect();

        prop_assert!(active.is_disjoint(&deleted));
        prop_assert_eq!(active.union(&deleted).cloned().collect::<HashSet<_>>(), all);
    }

    /// Sweeping twice is the same as sweeping once
    #[test]
    fn prop_sweep_is_idempotent(ages in prop::collection::vec(prop::option::of(0i64..90), 1..20)) {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let mut tracks = create_tracks(ages.len());
        for (track, age) in tracks.iter_mut().zip(&ages) {
            track.deleted_at = age.map(|days| now - Duration::days(days));
        }

        let mut store = EntityStore::from_vec(tracks);
        store.sweep_expired(Duration::days(30), now);
        let once: Vec<_> = store.items().iter().map(|t| t.id.clone()).collect();

        let second = store.sweep_expired(Duration::days(30), now);
        let twice: Vec<_> = store.items().iter().map(|t| t.id.clone()).collect();

        prop_assert!(second.is_empty());
        prop_assert_eq!(once, twice);
    }

    /// Tri-state select all clears exactly the view it selected
    #[test]
    fn prop_select_all_twice_clears(view_size in 0usize..10) {
        let mut builder = PlaylistBuilder::new(BuilderConfig::default());
        let ids = builder.add_tracks(create_tracks(10));
        let view = &ids[..view_size];

        builder.select_all_tracks(view);
        prop_assert_eq!(builder.track_selection().len(), view_size);

        builder.select_all_tracks(view);
        prop_assert!(builder.track_selection().is_empty());
    }
}

#[test]
fn select_all_on_filtered_view_scopes_to_view() {
    let mut builder = PlaylistBuilder::new(BuilderConfig::default());
    let ids = builder.add_tracks(create_tracks(10));
    let filtered = vec![ids[1].clone(), ids[4].clone(), ids[7].clone()];

    builder.select_all_tracks(&filtered);
    assert_eq!(builder.track_selection().len(), 3);
    assert!(!builder.track_selection().contains(&ids[0]));

    builder.select_all_tracks(&filtered);
    assert!(builder.track_selection().is_empty());
}
