mod entry;
mod export;
mod ids;
mod saved_playlist;
mod track;

pub use entry::PlaylistEntry;
pub use export::ExportItem;
pub use ids::{EntryId, SavedPlaylistId, TrackId};
pub use saved_playlist::SavedPlaylist;
pub use track::{SourceRef, Track};
