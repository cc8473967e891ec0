//! Coaching session domain module.
//!
//! Owns the state of one guided WOOP interview: the current stage, the
//! answers collected so far, the transcript of the active stage, and the
//! single-slot guard that keeps at most one coach reply in flight.

mod errors;
mod events;
mod reply_slot;
mod session;
mod snapshot;
mod turn;

pub use errors::SessionError;
pub use events::SessionEvent;
pub use reply_slot::{PendingTurn, ReplySlot};
pub use session::{
    AdvanceOutcome, CoachReply, CoachingSession, RetreatOutcome, TurnOutcome, FALLBACK_REPLY,
};
pub use snapshot::SessionSnapshot;
pub use turn::{ConversationTurn, Speaker, Transcript};
