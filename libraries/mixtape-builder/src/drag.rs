//! Drag session state machine
//!
//! Tracks one pointer drag from pick-up to drop:
//!
//! ```text
//! Idle -> Dragging(subject) -> [Hovering(entry, timer) -> Revealing(index)]* -> Idle
//! ```
//!
//! The session never sleeps itself. Hovering a new entry returns a
//! [`TimerCommand`] carrying a [`RevealTicket`]; whoever owns the clock
//! hands the ticket back through [`DragSession::reveal`] once the delay has
//! passed. Tickets from an earlier session or an earlier hover are rejected.

use crate::error::{BuilderError, Result};
use crate::playlist::Playlist;
use crate::selection::Selection;
use mixtape_core::{EntryId, SavedPlaylistId, TrackId};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Element picked up by the pointer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragGrab {
    /// A row of the track list
    Track(TrackId),
    /// A saved playlist in the library
    LibraryPlaylist(SavedPlaylistId),
    /// An entry of the working playlist
    PlaylistEntry(EntryId),
}

/// What is being dragged, decided once at drag start
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSubject {
    /// A single track
    Track(TrackId),
    /// Every selected track, snapshotted at drag start
    SelectionBatch {
        /// Track the pointer grabbed
        anchor: TrackId,
        /// Selected track ids
        members: HashSet<TrackId>,
    },
    /// All items of a saved playlist
    LibraryPlaylist(SavedPlaylistId),
    /// An entry being reordered within the working playlist
    PlaylistReorderItem(EntryId),
}

impl DragSubject {
    /// Decide the subject from the grabbed element and the track selection
    ///
    /// A grabbed track becomes a batch when it is part of a selection with
    /// more than one member.
    pub fn resolve(grab: DragGrab, selection: &Selection<TrackId>) -> Self {
        match grab {
            DragGrab::Track(id) if selection.len() > 1 && selection.contains(&id) => {
                DragSubject::SelectionBatch {
                    anchor: id,
                    members: selection.snapshot(),
                }
            }
            DragGrab::Track(id) => DragSubject::Track(id),
            DragGrab::LibraryPlaylist(id) => DragSubject::LibraryPlaylist(id),
            DragGrab::PlaylistEntry(id) => DragSubject::PlaylistReorderItem(id),
        }
    }

    /// Whether the subject reorders the working playlist
    pub fn is_reorder(&self) -> bool {
        matches!(self, DragSubject::PlaylistReorderItem(_))
    }
}

/// What the pointer is over
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Outside any drop zone
    Nothing,
    /// Empty space of the playlist container
    PlaylistContainer,
    /// An entry of the working playlist
    PlaylistEntry(EntryId),
    /// Any other zone (track list, library)
    Elsewhere,
}

/// Token for a pending insertion-point reveal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealTicket {
    /// Drag session that armed the timer
    pub session: u64,
    /// Hover generation within the session
    pub generation: u64,
    /// Entry being hovered
    pub target: EntryId,
}

/// Instruction for the reveal timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerCommand {
    /// Leave the timer alone
    None,
    /// Cancel the pending timer
    Cancel,
    /// Cancel any pending timer and start a new one
    Arm(RevealTicket),
}

/// Resolved drop, ready for the mutation engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropRequest {
    /// What was dragged
    pub subject: DragSubject,
    /// Where it was released
    pub target: DropTarget,
    /// Insertion point revealed at release time
    pub insertion_index: Option<usize>,
}

#[derive(Debug, Clone)]
struct ActiveDrag {
    subject: DragSubject,
    hover: Option<EntryId>,
    pending: Option<RevealTicket>,
    insertion_index: Option<usize>,
}

/// One drag gesture at a time
#[derive(Debug, Default)]
pub struct DragSession {
    session: u64,
    generation: u64,
    active: Option<ActiveDrag>,
}

impl DragSession {
    /// Create an idle session
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a drag is in progress
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Subject of the drag in progress
    pub fn subject(&self) -> Option<&DragSubject> {
        self.active.as_ref().map(|drag| &drag.subject)
    }

    /// Entry remembered as hovered
    pub fn hovered(&self) -> Option<&EntryId> {
        self.active.as_ref().and_then(|drag| drag.hover.as_ref())
    }

    /// Insertion point currently revealed
    pub fn insertion_index(&self) -> Option<usize> {
        self.active.as_ref().and_then(|drag| drag.insertion_index)
    }

    /// Pick up a subject
    ///
    /// # Errors
    /// Returns `DragInProgress` if a drag has not ended yet.
    pub fn start(&mut self, subject: DragSubject) -> Result<()> {
        if self.active.is_some() {
            return Err(BuilderError::DragInProgress);
        }

        self.session += 1;
        self.generation = 0;
        debug!(session = self.session, ?subject, "Drag started");
        self.active = Some(ActiveDrag {
            subject,
            hover: None,
            pending: None,
            insertion_index: None,
        });
        Ok(())
    }

    /// Pointer moved over a target
    pub fn over(&mut self, target: &DropTarget) -> TimerCommand {
        let Some(drag) = self.active.as_mut() else {
            return TimerCommand::None;
        };

        // Reordering shows its own preview, no insertion gap
        if drag.subject.is_reorder() {
            return TimerCommand::None;
        }

        match target {
            DropTarget::PlaylistEntry(entry_id) => {
                if drag.hover.as_ref() == Some(entry_id) {
                    return TimerCommand::None;
                }

                self.generation += 1;
                let ticket = RevealTicket {
                    session: self.session,
                    generation: self.generation,
                    target: entry_id.clone(),
                };
                trace!(?ticket, "Arming reveal timer");

                drag.hover = Some(entry_id.clone());
                drag.insertion_index = None;
                drag.pending = Some(ticket.clone());
                TimerCommand::Arm(ticket)
            }
            DropTarget::Nothing | DropTarget::PlaylistContainer | DropTarget::Elsewhere => {
                drag.hover = None;
                drag.insertion_index = None;
                if drag.pending.take().is_some() {
                    TimerCommand::Cancel
                } else {
                    TimerCommand::None
                }
            }
        }
    }

    /// A reveal timer fired
    ///
    /// Applies only if the ticket is the one pending in the live session.
    /// The index is the hovered entry's position at firing time; an entry
    /// that has vanished reveals nothing. Returns the revealed index.
    pub fn reveal(&mut self, ticket: &RevealTicket, playlist: &Playlist) -> Option<usize> {
        let drag = self.active.as_mut()?;
        if drag.pending.as_ref() != Some(ticket) {
            trace!(?ticket, "Ignoring stale reveal ticket");
            return None;
        }

        drag.pending = None;
        let index = playlist.position_of(&ticket.target)?;
        drag.insertion_index = Some(index);
        debug!(index, "Insertion point revealed");
        Some(index)
    }

    /// Release the subject over a target
    ///
    /// Clears hover memory and the insertion point regardless of outcome.
    /// Returns `None` when no drag was in progress.
    pub fn end(&mut self, target: DropTarget) -> Option<DropRequest> {
        let drag = self.active.take()?;
        debug!(session = self.session, ?target, "Drag ended");
        Some(DropRequest {
            subject: drag.subject,
            target,
            insertion_index: drag.insertion_index,
        })
    }

    /// Abandon the drag without mutation
    ///
    /// Returns whether a drag was in progress.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.active.take().is_some();
        if was_active {
            debug!(session = self.session, "Drag cancelled");
        }
        was_active
    }
}
