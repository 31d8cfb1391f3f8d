//! Adding tracks to the working playlist from the command line

use crate::error::Result;
use crate::lookup::entry_at;
use mixtape_builder::{DragGrab, DropOutcome, DropTarget, PlaylistBuilder};
use mixtape_core::TrackId;
use std::collections::HashSet;

/// Drop tracks into the playlist the way a pointer drag would
///
/// Several tracks are dropped together as a selection batch, so they land in
/// upload order and a track named twice is added once. With `at`, the
/// pointer rests on the entry at that 1-based position until the insertion
/// point opens there; otherwise the tracks are appended.
pub async fn queue_tracks(
    builder: &mut PlaylistBuilder,
    ids: &[TrackId],
    at: Option<usize>,
) -> Result<DropOutcome> {
    let mut seen = HashSet::new();
    let unique: Vec<TrackId> = ids
        .iter()
        .filter(|id| seen.insert(*id))
        .cloned()
        .collect();

    let Some(anchor) = unique.first().cloned() else {
        return Ok(DropOutcome::Unchanged);
    };

    let target = match at {
        Some(position) => Some(DropTarget::PlaylistEntry(entry_at(
            builder.playlist().entries(),
            position,
        )?)),
        None => None,
    };

    builder.clear_track_selection();
    builder.select_all_tracks(&unique);

    if let Err(e) = builder.drag_start(DragGrab::Track(anchor)) {
        builder.clear_track_selection();
        return Err(e.into());
    }
    if let Some(target) = &target {
        builder.drag_over(target);
        builder.next_reveal().await;
    }
    let outcome = builder.drag_end(target.unwrap_or(DropTarget::PlaylistContainer));
    builder.clear_track_selection();

    Ok(outcome)
}
