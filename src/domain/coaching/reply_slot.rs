//! Single-slot guard for the coach reply in flight.
//!
//! A session may have at most one outstanding generation request. Opening a
//! turn claims the slot and hands out a [`PendingTurn`] ticket; only that
//! ticket can close the turn again, so a second submission cannot slip in
//! and a late reply cannot land on the wrong turn.
//!
//! The ticket also holds the claim: dropping it without completing the turn
//! (the caller gave up, its task was aborted) frees the slot again.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::domain::foundation::TurnId;
use crate::domain::woop::Stage;

type SlotCell = Mutex<Option<TurnId>>;

fn lock(cell: &SlotCell) -> MutexGuard<'_, Option<TurnId>> {
    cell.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the cell if it still holds `id`.
fn release_cell(cell: &SlotCell, id: TurnId) -> bool {
    let mut occupied = lock(cell);
    if *occupied == Some(id) {
        *occupied = None;
        true
    } else {
        false
    }
}

/// Holds the id of the turn currently awaiting a reply, if any.
#[derive(Debug, Default)]
pub struct ReplySlot {
    cell: Arc<SlotCell>,
}

impl ReplySlot {
    /// Returns true while a reply is outstanding.
    pub fn is_occupied(&self) -> bool {
        self.current().is_some()
    }

    fn current(&self) -> Option<TurnId> {
        *lock(&self.cell)
    }

    /// Claims the slot for a new turn.
    ///
    /// Returns `None` when the slot is already taken.
    pub(crate) fn claim(&self) -> Option<SlotClaim> {
        let mut occupied = lock(&self.cell);
        if occupied.is_some() {
            return None;
        }
        let id = TurnId::new();
        *occupied = Some(id);
        Some(SlotClaim {
            id,
            cell: Arc::downgrade(&self.cell),
        })
    }

    /// Releases the slot if it is held by `id`.
    pub(crate) fn release(&self, id: TurnId) -> bool {
        release_cell(&self.cell, id)
    }
}

/// A cloned slot is independent of the original.
impl Clone for ReplySlot {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::new(Mutex::new(self.current())),
        }
    }
}

impl PartialEq for ReplySlot {
    fn eq(&self, other: &Self) -> bool {
        let mine = self.current();
        mine == other.current()
    }
}

impl Eq for ReplySlot {}

/// A claim on the slot, released on drop if still held.
#[derive(Debug)]
pub(crate) struct SlotClaim {
    id: TurnId,
    cell: Weak<SlotCell>,
}

impl Drop for SlotClaim {
    fn drop(&mut self) {
        if let Some(cell) = self.cell.upgrade() {
            release_cell(&cell, self.id);
        }
    }
}

/// Ticket for an accepted submission whose coach reply is outstanding.
///
/// Carries everything the generation request needs. Not `Clone`: the ticket
/// is consumed when the turn is completed, and dropping it abandons the turn.
#[derive(Debug)]
pub struct PendingTurn {
    claim: SlotClaim,
    stage: Stage,
    user_text: String,
    transcript_context: String,
}

impl PendingTurn {
    pub(crate) fn new(
        claim: SlotClaim,
        stage: Stage,
        user_text: String,
        transcript_context: String,
    ) -> Self {
        Self {
            claim,
            stage,
            user_text,
            transcript_context,
        }
    }

    pub fn id(&self) -> TurnId {
        self.claim.id
    }

    /// Stage the submission was made in.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The literal submitted text.
    pub fn user_text(&self) -> &str {
        &self.user_text
    }

    /// Transcript serialized before the user turn was appended.
    pub fn transcript_context(&self) -> &str {
        &self.transcript_context
    }
}

impl PartialEq for PendingTurn {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
            && self.stage == other.stage
            && self.user_text == other.user_text
            && self.transcript_context == other.transcript_context
    }
}

impl Eq for PendingTurn {}
