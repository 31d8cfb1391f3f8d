//! Playlist builder facade
//!
//! `PlaylistBuilder` owns every piece of state (tracks, working playlist,
//! library, selections, drag session) and wires the components together.
//! All mutations are synchronous; persistence and reveal timers run on the
//! tokio runtime in the background.

use crate::{
    config::BuilderConfig,
    drag::{DragGrab, DragSession, DragSubject, DropTarget},
    error::{BuilderError, Result},
    events::BuilderEvent,
    export,
    import::{self, ImportReport},
    library::{ConflictResolution, Library, SaveOutcome, PendingSave},
    lifecycle::EntityStore,
    mutation::{self, DropOutcome},
    persistence::Persister,
    playlist::Playlist,
    selection::Selection,
    timer::RevealScheduler,
};
use chrono::{DateTime, Utc};
use mixtape_core::storage::load_records;
use mixtape_core::{
    Collection, DurationProbe, EntryId, ExportItem, ExportTarget, PlaylistCodec, PlaylistEntry,
    RecordStore, SavedPlaylist, SavedPlaylistId, Track, TrackId,
};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Playlist builder
///
/// Central context object for one user session.
///
/// Snapshots are written in the background. Dropping the builder lets the
/// writer finish what is queued, but only while the runtime keeps running;
/// call [`PlaylistBuilder::flush`] before exiting.
#[derive(Debug)]
pub struct PlaylistBuilder {
    config: BuilderConfig,

    tracks: EntityStore<Track>,
    library: Library,
    playlist: Playlist,

    track_selection: Selection<TrackId>,
    playlist_selection: Selection<SavedPlaylistId>,

    drag: DragSession,
    reveals: RevealScheduler,

    persister: Option<Persister>,
    pending_events: Vec<BuilderEvent>,
}

impl PlaylistBuilder {
    /// Create a builder with nothing loaded and no persistence
    pub fn new(config: BuilderConfig) -> Self {
        let reveals = RevealScheduler::new(config.reveal_delay());
        let playlist = Playlist::new(config.default_playlist_name.clone());

        Self {
            config,
            tracks: EntityStore::new(),
            library: Library::new(),
            playlist,
            track_selection: Selection::new(),
            playlist_selection: Selection::new(),
            drag: DragSession::new(),
            reveals,
            persister: None,
            pending_events: Vec::new(),
        }
    }

    /// Create an empty builder that writes snapshots to `store`
    ///
    /// Must be called from within a tokio runtime.
    pub fn with_store(config: BuilderConfig, store: Arc<dyn RecordStore>) -> Self {
        let mut builder = Self::new(config);
        builder.persister = Some(Persister::spawn(store));
        builder
    }

    /// Load the saved session from `store`
    ///
    /// Tracks and playlist entries with a zero duration are probed again,
    /// expired recycle bin entries are swept, and the repaired snapshot is
    /// written back before the builder is returned.
    ///
    /// # Errors
    /// Returns an error if a collection cannot be read or decoded.
    pub async fn load(
        config: BuilderConfig,
        store: Arc<dyn RecordStore>,
        probe: &dyn DurationProbe,
    ) -> Result<Self> {
        let tracks: Vec<Track> = load_records(store.as_ref(), Collection::Tracks).await?;
        let entries: Vec<PlaylistEntry> =
            load_records(store.as_ref(), Collection::Playlist).await?;
        let saved: Vec<SavedPlaylist> = load_records(store.as_ref(), Collection::Library).await?;

        let mut builder = Self::with_store(config, store);
        builder.tracks = EntityStore::from_vec(tracks);
        builder.playlist = Playlist::with_entries(builder.config.default_playlist_name.clone(), entries);
        builder.library = Library::from_vec(saved);

        let repaired = builder.repair_durations(probe);
        let (swept_tracks, swept_playlists) = builder.sweep_expired(Utc::now());

        builder.persist(Collection::Tracks);
        builder.persist(Collection::Playlist);
        builder.persist(Collection::Library);

        info!(
            tracks = builder.tracks.len(),
            entries = builder.playlist.len(),
            playlists = builder.library.store().len(),
            repaired,
            swept_tracks,
            swept_playlists,
            "Loaded playlist builder"
        );
        Ok(builder)
    }

    // ===== Accessors =====

    /// Builder configuration
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Every track, including the recycle bin
    pub fn tracks(&self) -> &EntityStore<Track> {
        &self.tracks
    }

    /// Tracks outside the recycle bin, in upload order
    pub fn active_tracks(&self) -> Vec<&Track> {
        self.tracks.active()
    }

    /// Tracks in the recycle bin, most recently deleted first
    pub fn deleted_tracks(&self) -> Vec<&Track> {
        self.tracks.deleted()
    }

    /// Working playlist
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Saved playlist library
    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Saved playlists outside the recycle bin, newest first
    pub fn active_playlists(&self) -> Vec<&SavedPlaylist> {
        self.library.store().active()
    }

    /// Saved playlists in the recycle bin, most recently deleted first
    pub fn deleted_playlists(&self) -> Vec<&SavedPlaylist> {
        self.library.store().deleted()
    }

    /// Selected tracks
    pub fn track_selection(&self) -> &Selection<TrackId> {
        &self.track_selection
    }

    /// Selected saved playlists
    pub fn playlist_selection(&self) -> &Selection<SavedPlaylistId> {
        &self.playlist_selection
    }

    /// Total duration of the working playlist in seconds
    pub fn total_duration(&self) -> f64 {
        self.playlist.total_duration()
    }

    /// Total duration formatted as `HH:MM:SS`
    pub fn formatted_duration(&self) -> String {
        export::format_time(self.playlist.total_duration())
    }

    // ===== Tracks =====

    /// Upload audio files
    ///
    /// Files whose duration cannot be read are added with a zero duration.
    pub fn add_files(&mut self, paths: &[PathBuf], probe: &dyn DurationProbe) -> Vec<TrackId> {
        let mut added = Vec::with_capacity(paths.len());

        for path in paths {
            let mut track = Track::from_upload(path.clone(), 0.0);
            match probe.probe(path) {
                Ok(seconds) => track.duration_seconds = seconds.max(0.0),
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "Duration unavailable");
                    self.pending_events.push(BuilderEvent::DurationUnavailable {
                        file_name: track.source.file_name.clone(),
                    });
                }
            }

            added.push(track.id.clone());
            self.tracks.push(track);
        }

        info!(count = added.len(), "Added tracks");
        self.tracks_changed();
        added
    }

    /// Add already-built tracks
    pub fn add_tracks(&mut self, tracks: Vec<Track>) -> Vec<TrackId> {
        let ids = tracks.iter().map(|track| track.id.clone()).collect();
        for track in tracks {
            self.tracks.push(track);
        }
        self.tracks_changed();
        ids
    }

    /// Active tracks whose name contains `query`, ignoring case
    pub fn search_tracks(&self, query: &str) -> Vec<&Track> {
        let needle = query.to_lowercase();
        self.tracks
            .active()
            .into_iter()
            .filter(|track| track.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Move tracks to the recycle bin
    ///
    /// Every entry of the working playlist that refers to a deleted track is
    /// removed. Returns the number of tracks deleted.
    pub fn delete_tracks(&mut self, ids: &[TrackId]) -> usize {
        let deleted = self.tracks.soft_delete(ids, Utc::now());
        self.track_selection.remove_many(ids);
        if deleted.is_empty() {
            return 0;
        }

        let removed = self
            .playlist
            .remove_tracks(&deleted.iter().cloned().collect::<HashSet<_>>());
        info!(tracks = deleted.len(), entries = removed, "Moved tracks to recycle bin");

        self.tracks_changed();
        if removed > 0 {
            self.playlist_changed();
        }
        deleted.len()
    }

    /// Delete every selected track
    pub fn delete_selected_tracks(&mut self) -> usize {
        let ids: Vec<TrackId> = self.track_selection.iter().cloned().collect();
        self.delete_tracks(&ids)
    }

    /// Restore tracks from the recycle bin
    pub fn restore_tracks(&mut self, ids: &[TrackId]) -> usize {
        let restored = self.tracks.restore(ids);
        if !restored.is_empty() {
            self.tracks_changed();
        }
        restored.len()
    }

    /// Permanently remove tracks from the recycle bin
    ///
    /// Ids that are not in the recycle bin are ignored.
    pub fn purge_tracks(&mut self, ids: &[TrackId]) -> usize {
        let purged = self.tracks.purge(ids);
        if purged.is_empty() {
            return 0;
        }

        self.track_selection.remove_many(&purged);
        let removed = self
            .playlist
            .remove_tracks(&purged.iter().cloned().collect::<HashSet<_>>());

        self.tracks_changed();
        if removed > 0 {
            self.playlist_changed();
        }
        purged.len()
    }

    /// Purge everything deleted longer ago than the retention window
    ///
    /// Returns the number of tracks and saved playlists removed.
    pub fn sweep_expired(&mut self, now: DateTime<Utc>) -> (usize, usize) {
        let retention = self.config.retention();

        let tracks = self.tracks.sweep_expired(retention, now);
        if !tracks.is_empty() {
            self.track_selection.remove_many(&tracks);
            self.playlist
                .remove_tracks(&tracks.iter().cloned().collect::<HashSet<_>>());
        }

        let playlists = self.library.store_mut().sweep_expired(retention, now);
        self.playlist_selection.remove_many(&playlists);

        (tracks.len(), playlists.len())
    }

    // ===== Selection =====

    /// Toggle a track in the selection
    ///
    /// Only active tracks can be selected. Returns whether the track is
    /// selected afterwards.
    pub fn toggle_track_selection(&mut self, id: &TrackId) -> bool {
        if self.tracks.get_active(id).is_none() {
            return false;
        }
        self.track_selection.toggle(id.clone())
    }

    /// Select exactly the tracks of the current view, or clear
    pub fn select_all_tracks(&mut self, view_ids: &[TrackId]) {
        let active: Vec<TrackId> = view_ids
            .iter()
            .filter(|id| self.tracks.get_active(id).is_some())
            .cloned()
            .collect();
        self.track_selection.select_all(active);
    }

    /// Deselect every track
    pub fn clear_track_selection(&mut self) {
        self.track_selection.clear();
    }

    /// Toggle a saved playlist in the selection
    pub fn toggle_playlist_selection(&mut self, id: &SavedPlaylistId) -> bool {
        if self.library.store().get_active(id).is_none() {
            return false;
        }
        self.playlist_selection.toggle(id.clone())
    }

    /// Select exactly the saved playlists of the current view, or clear
    pub fn select_all_playlists(&mut self, view_ids: &[SavedPlaylistId]) {
        let active: Vec<SavedPlaylistId> = view_ids
            .iter()
            .filter(|id| self.library.store().get_active(id).is_some())
            .cloned()
            .collect();
        self.playlist_selection.select_all(active);
    }

    /// Deselect every saved playlist
    pub fn clear_playlist_selection(&mut self) {
        self.playlist_selection.clear();
    }

    // ===== Working playlist =====

    /// Append a track to the working playlist
    pub fn add_to_playlist(&mut self, id: &TrackId) -> Result<EntryId> {
        let track = self
            .tracks
            .get_active(id)
            .ok_or_else(|| BuilderError::TrackNotFound(id.clone()))?;
        let entry = PlaylistEntry::from_track(track);
        let entry_id = entry.entry_id.clone();

        self.playlist.append(vec![entry]);
        self.playlist_changed();
        Ok(entry_id)
    }

    /// Remove one entry from the working playlist
    pub fn remove_entry(&mut self, entry_id: &EntryId) -> Result<()> {
        self.playlist
            .remove(entry_id)
            .ok_or_else(|| BuilderError::EntryNotFound(entry_id.clone()))?;
        self.playlist_changed();
        Ok(())
    }

    /// Rename the working playlist
    pub fn rename_playlist(&mut self, name: &str) -> Result<()> {
        self.playlist.set_name(name)?;
        self.pending_events.push(BuilderEvent::PlaylistChanged {
            length: self.playlist.len(),
        });
        Ok(())
    }

    /// Remove every entry from the working playlist
    pub fn clear_playlist(&mut self) {
        self.playlist.clear();
        self.playlist_changed();
    }

    // ===== Library =====

    /// Save the working playlist to the library under its name
    ///
    /// Returns `SaveOutcome::NameCollision` without saving when the name is
    /// taken; complete it with [`Self::resolve_save`].
    pub fn save_to_library(&mut self) -> SaveOutcome {
        let outcome = self.library.save(
            self.playlist.name(),
            self.playlist.entries().to_vec(),
            Utc::now(),
        );
        if matches!(outcome, SaveOutcome::Saved(_)) {
            self.library_changed();
        }
        outcome
    }

    /// Complete a save that hit a name collision
    pub fn resolve_save(
        &mut self,
        pending: PendingSave,
        resolution: ConflictResolution,
    ) -> SavedPlaylistId {
        let id = self.library.resolve(pending, resolution, Utc::now());
        self.library_changed();
        id
    }

    /// Rename a saved playlist
    pub fn rename_saved(&mut self, id: &SavedPlaylistId, name: &str) -> Result<()> {
        self.library.rename(id, name, Utc::now())?;
        self.library_changed();
        Ok(())
    }

    /// Replace the working playlist with a saved one
    pub fn load_saved(&mut self, id: &SavedPlaylistId) -> Result<()> {
        let saved = self
            .library
            .store()
            .get_active(id)
            .ok_or_else(|| BuilderError::PlaylistNotFound(id.clone()))?;

        self.playlist.replace(saved.name.clone(), saved.items.clone());
        info!(id = %id, entries = self.playlist.len(), "Loaded saved playlist");
        self.playlist_changed();
        Ok(())
    }

    /// Move saved playlists to the recycle bin
    ///
    /// Their items are untouched.
    pub fn delete_playlists(&mut self, ids: &[SavedPlaylistId]) -> usize {
        let deleted = self.library.store_mut().soft_delete(ids, Utc::now());
        self.playlist_selection.remove_many(ids);
        if !deleted.is_empty() {
            self.library_changed();
        }
        deleted.len()
    }

    /// Delete every selected saved playlist
    pub fn delete_selected_playlists(&mut self) -> usize {
        let ids: Vec<SavedPlaylistId> = self.playlist_selection.iter().cloned().collect();
        self.delete_playlists(&ids)
    }

    /// Restore saved playlists from the recycle bin
    pub fn restore_playlists(&mut self, ids: &[SavedPlaylistId]) -> usize {
        let restored = self.library.store_mut().restore(ids);
        if !restored.is_empty() {
            self.library_changed();
        }
        restored.len()
    }

    /// Permanently remove saved playlists from the recycle bin
    pub fn purge_playlists(&mut self, ids: &[SavedPlaylistId]) -> usize {
        let purged = self.library.store_mut().purge(ids);
        if !purged.is_empty() {
            self.playlist_selection.remove_many(&purged);
            self.library_changed();
        }
        purged.len()
    }

    // ===== Drag and drop =====

    /// Pick up an element
    ///
    /// A grabbed track that is part of a multi-track selection drags the
    /// whole selection.
    pub fn drag_start(&mut self, grab: DragGrab) -> Result<()> {
        let subject = DragSubject::resolve(grab, &self.track_selection);
        self.drag.start(subject)
    }

    /// Pointer moved over a target
    ///
    /// Must be called from within a tokio runtime when hovering entries.
    pub fn drag_over(&mut self, target: &DropTarget) {
        let before = self.drag.insertion_index();
        let command = self.drag.over(target);
        self.reveals.apply(command);
        self.emit_index_change(before);
    }

    /// Deliver reveal timers that have already fired
    ///
    /// Returns the insertion point after processing.
    pub fn poll_reveals(&mut self) -> Option<usize> {
        while let Some(ticket) = self.reveals.try_next() {
            let before = self.drag.insertion_index();
            self.drag.reveal(&ticket, &self.playlist);
            self.emit_index_change(before);
        }
        self.drag.insertion_index()
    }

    /// Wait for the pending reveal timer and apply it
    ///
    /// Returns the revealed index, or `None` if no timer was pending or the
    /// ticket no longer applied.
    pub async fn next_reveal(&mut self) -> Option<usize> {
        let ticket = self.reveals.next().await?;
        let before = self.drag.insertion_index();
        let index = self.drag.reveal(&ticket, &self.playlist);
        self.emit_index_change(before);
        index
    }

    /// Insertion point currently revealed
    pub fn insertion_index(&self) -> Option<usize> {
        self.drag.insertion_index()
    }

    /// Check if a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    /// Release the dragged element over a target
    pub fn drag_end(&mut self, target: DropTarget) -> DropOutcome {
        self.reveals.cancel();
        let before = self.drag.insertion_index();

        let Some(request) = self.drag.end(target) else {
            return DropOutcome::Unchanged;
        };
        self.emit_index_change(before);

        let outcome = mutation::apply_drop(
            &request,
            &mut self.playlist,
            &self.tracks,
            self.library.store(),
        );
        debug!(?outcome, "Drop applied");

        if outcome != DropOutcome::Unchanged {
            self.playlist_changed();
        }
        outcome
    }

    /// Abandon the drag without changing anything
    pub fn drag_cancel(&mut self) {
        self.reveals.cancel();
        let before = self.drag.insertion_index();
        self.drag.cancel();
        self.emit_index_change(before);
    }

    // ===== Import / export =====

    /// Append tracks matching imported file names
    pub fn import_file_names(&mut self, file_names: &[String]) -> ImportReport {
        let result = import::match_file_names(file_names, &self.tracks.active());
        let report = ImportReport {
            matched: result.matched,
            unmatched: result.unmatched,
        };

        if !result.entries.is_empty() {
            self.playlist.append(result.entries);
            self.playlist_changed();
        }

        info!(matched = report.matched, unmatched = report.unmatched, "Imported playlist");
        self.pending_events.push(BuilderEvent::ImportCompleted {
            matched: report.matched,
            unmatched: report.unmatched,
        });
        report
    }

    /// Decode a playlist file and import its entries
    pub fn import_playlist(&mut self, content: &str, codec: &dyn PlaylistCodec) -> ImportReport {
        let file_names = codec.decode(content);
        self.import_file_names(&file_names)
    }

    /// Export items for the working playlist
    pub fn export_items(&self, base_path: Option<&str>) -> Vec<ExportItem> {
        export::export_items(self.playlist.entries(), base_path)
    }

    /// Output file name for the working playlist
    pub fn export_file_name(&self) -> String {
        format!("{}.m3u", self.playlist.name())
    }

    /// Hand the working playlist to an export target
    ///
    /// Returns the output file name.
    pub fn export_to(&self, target: &dyn ExportTarget, base_path: Option<&str>) -> Result<String> {
        let items = self.export_items(base_path);
        let file_name = self.export_file_name();
        target.export(&items, &file_name)?;
        info!(file = %file_name, items = items.len(), "Exported playlist");
        Ok(file_name)
    }

    // ===== Events & persistence =====

    /// Drain every queued event
    pub fn drain_events(&mut self) -> Vec<BuilderEvent> {
        let mut events = std::mem::take(&mut self.pending_events);
        if let Some(persister) = self.persister.as_mut() {
            events.extend(persister.drain_failures());
        }
        events
    }

    /// Check if there are queued events
    ///
    /// Persistence failures are only visible after [`Self::flush`].
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    /// Wait until every queued snapshot has been written
    pub async fn flush(&self) {
        if let Some(persister) = &self.persister {
            persister.flush().await;
        }
    }

    fn repair_durations(&mut self, probe: &dyn DurationProbe) -> usize {
        let mut repaired = 0;
        for track in self.tracks.items_mut() {
            repaired += usize::from(repair_duration(track, probe, &mut self.pending_events));
        }
        for entry in self.playlist.entries_mut() {
            repaired += usize::from(repair_duration(
                &mut entry.track,
                probe,
                &mut self.pending_events,
            ));
        }
        repaired
    }

    fn emit_index_change(&mut self, before: Option<usize>) {
        let after = self.drag.insertion_index();
        if before != after {
            self.pending_events
                .push(BuilderEvent::InsertionIndexChanged { index: after });
        }
    }

    fn tracks_changed(&mut self) {
        self.pending_events.push(BuilderEvent::TracksChanged {
            active: self.tracks.active_count(),
            deleted: self.tracks.deleted_count(),
        });
        self.persist(Collection::Tracks);
    }

    fn playlist_changed(&mut self) {
        self.pending_events.push(BuilderEvent::PlaylistChanged {
            length: self.playlist.len(),
        });
        self.persist(Collection::Playlist);
    }

    fn library_changed(&mut self) {
        let store = self.library.store();
        self.pending_events.push(BuilderEvent::LibraryChanged {
            active: store.active_count(),
            deleted: store.deleted_count(),
        });
        self.persist(Collection::Library);
    }

    fn persist(&self, collection: Collection) {
        let Some(persister) = &self.persister else {
            return;
        };
        match collection {
            Collection::Tracks => persister.persist(collection, self.tracks.items()),
            Collection::Playlist => persister.persist(collection, self.playlist.entries()),
            Collection::Library => persister.persist(collection, self.library.store().items()),
        }
    }
}

fn repair_duration(
    track: &mut Track,
    probe: &dyn DurationProbe,
    events: &mut Vec<BuilderEvent>,
) -> bool {
    if track.duration_seconds > 0.0 {
        return false;
    }

    match probe.probe(&track.source.path) {
        Ok(seconds) => {
            track.duration_seconds = seconds.max(0.0);
            true
        }
        Err(e) => {
            debug!(file = %track.source.file_name, error = %e, "Duration still unavailable");
            events.push(BuilderEvent::DurationUnavailable {
                file_name: track.source.file_name.clone(),
            });
            false
        }
    }
}
