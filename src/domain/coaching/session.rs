//! Coaching session aggregate.
//!
//! Drives one WOOP interview through its stages and keeps the session state
//! consistent. A user submission is split in two steps so the generation
//! request never runs while the session is borrowed:
//!
//! 1. [`CoachingSession::begin_turn`] validates the text, appends the user
//!    turn, claims the reply slot and returns a [`PendingTurn`] ticket.
//! 2. [`CoachingSession::complete_turn`] consumes the ticket, appends the
//!    coach turn (generated or fallback), records the answer and releases
//!    the slot.
//!
//! # Invariants
//!
//! - The transcript always starts with the active stage's opening prompt
//!   (the PLAN transcript is kept once the interview completes)
//! - At most one reply is outstanding per session
//! - The stage moves one step at a time and never skips
//! - Changing stage resets the transcript but never clears answers

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, StateMachine, Timestamp};
use crate::domain::woop::{definition_for, first_stage, Stage, WoopAnswers};

use super::{
    ConversationTurn, PendingTurn, ReplySlot, SessionError, SessionEvent, SessionSnapshot,
    Transcript,
};

/// Apology appended as the coach turn when the generation service fails.
pub const FALLBACK_REPLY: &str =
    "Sorry, I could not come up with a reply just now. Please share that thought again \
in a moment, or move on when you are ready.";

/// Reply that closes a pending turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoachReply {
    /// Text produced by the generation service.
    Generated(String),
    /// Static message substituted after a gateway failure.
    Fallback(String),
}

impl CoachReply {
    pub fn text(&self) -> &str {
        match self {
            CoachReply::Generated(text) | CoachReply::Fallback(text) => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, CoachReply::Fallback(_))
    }
}

/// Result of a completed turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub stage: Stage,
    pub reply: String,
    pub degraded: bool,
    /// Earlier answer for the stage that this submission replaced.
    pub overwritten: Option<String>,
}

/// Result of `advance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Moved { from: Stage, to: Stage },
    /// PLAN was left: the interview is over and the answers are final.
    Completed(WoopAnswers),
}

/// Result of `retreat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetreatOutcome {
    Moved { from: Stage, to: Stage },
    AlreadyAtFirstStage,
}

/// One in-memory WOOP interview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachingSession {
    id: SessionId,
    stage: Stage,
    answers: WoopAnswers,
    transcript: Transcript,
    #[serde(skip)]
    reply_slot: ReplySlot,
    started_at: Timestamp,
    #[serde(skip)]
    events: Vec<SessionEvent>,
}

impl CoachingSession {
    /// Starts a session at WISH with an empty answer set.
    pub fn start() -> Self {
        Self::with_id(SessionId::new())
    }

    pub fn with_id(id: SessionId) -> Self {
        Self {
            id,
            stage: Stage::Wish,
            answers: WoopAnswers::default(),
            transcript: Transcript::seeded(first_stage().opening_prompt),
            reply_slot: ReplySlot::default(),
            started_at: Timestamp::now(),
            events: Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the active stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn answers(&self) -> &WoopAnswers {
        &self.answers
    }

    /// Returns the transcript of the active stage.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// True while a coach reply is outstanding.
    pub fn is_awaiting_reply(&self) -> bool {
        self.reply_slot.is_occupied()
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn is_complete(&self) -> bool {
        self.stage == Stage::Summary
    }

    /// True when `advance` would succeed.
    pub fn can_advance(&self) -> bool {
        self.stage.is_interview()
            && !self.is_awaiting_reply()
            && self.transcript.has_completed_exchange()
    }

    /// True when `retreat` would move to an earlier stage.
    pub fn can_retreat(&self) -> bool {
        self.stage.previous().is_some() && !self.is_awaiting_reply()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Turn-taking
    // ─────────────────────────────────────────────────────────────────────────

    /// Accepts a user submission and opens a turn awaiting the coach.
    ///
    /// # Errors
    ///
    /// - `SessionComplete` once the interview has reached SUMMARY
    /// - `EmptyInput` if the text is blank
    /// - `AlreadyAwaitingReply` if another turn is still open
    ///
    /// On error the session is unchanged. Dropping the returned ticket
    /// without completing it abandons the turn: the reply slot is freed, the
    /// user turn stays in the transcript unanswered and no answer is recorded.
    pub fn begin_turn(&mut self, text: &str) -> Result<PendingTurn, SessionError> {
        if self.is_complete() {
            return Err(SessionError::SessionComplete);
        }
        if text.trim().is_empty() {
            return Err(SessionError::EmptyInput);
        }
        let claim = self
            .reply_slot
            .claim()
            .ok_or(SessionError::AlreadyAwaitingReply)?;

        let transcript_context = self.transcript.to_context();
        self.transcript.push(ConversationTurn::user(text));

        Ok(PendingTurn::new(
            claim,
            self.stage,
            text.to_string(),
            transcript_context,
        ))
    }

    /// Closes a pending turn with the coach's reply.
    ///
    /// The submitted text is recorded as the stage answer whether the reply
    /// was generated or is the fallback apology.
    ///
    /// # Errors
    ///
    /// - `StaleTurn` if the ticket does not hold the reply slot or belongs to
    ///   another stage; the slot is free afterwards either way
    pub fn complete_turn(
        &mut self,
        pending: PendingTurn,
        reply: CoachReply,
    ) -> Result<TurnOutcome, SessionError> {
        let released = self.reply_slot.release(pending.id());
        if !released || pending.stage() != self.stage {
            return Err(SessionError::StaleTurn);
        }

        let overwritten = self.answers.record(self.stage, pending.user_text())?;

        let degraded = reply.is_fallback();
        let reply_text = reply.text().to_string();
        self.transcript.push(ConversationTurn::coach(reply_text.as_str()));

        let now = Timestamp::now();
        self.events.push(SessionEvent::AnswerRecorded {
            stage: self.stage,
            overwritten: overwritten.clone(),
            at: now,
        });
        self.events.push(SessionEvent::CoachReplied {
            stage: self.stage,
            degraded,
            at: now,
        });

        Ok(TurnOutcome {
            stage: self.stage,
            reply: reply_text,
            degraded,
            overwritten,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    /// Moves to the next stage, or completes the interview from PLAN.
    ///
    /// # Errors
    ///
    /// - `SessionComplete` at SUMMARY
    /// - `AlreadyAwaitingReply` while a reply is outstanding
    /// - `StageNotAnswered` before a user/coach exchange in this stage
    pub fn advance(&mut self) -> Result<AdvanceOutcome, SessionError> {
        self.ensure_navigable()?;
        if !self.transcript.has_completed_exchange() {
            return Err(SessionError::StageNotAnswered(self.stage));
        }

        let from = self.stage;
        let to = from
            .next()
            .ok_or(SessionError::SessionComplete)
            .and_then(|next| from.transition_to(next).map_err(SessionError::from))?;

        let now = Timestamp::now();
        if to == Stage::Summary {
            self.stage = to;
            self.events.push(SessionEvent::StageEntered { from, to, at: now });
            self.events.push(SessionEvent::Completed {
                answers: self.answers.clone(),
                at: now,
            });
            return Ok(AdvanceOutcome::Completed(self.answers.clone()));
        }

        self.enter(from, to)?;
        Ok(AdvanceOutcome::Moved { from, to })
    }

    /// Moves back one stage. At WISH this is a no-op.
    ///
    /// # Errors
    ///
    /// - `SessionComplete` at SUMMARY
    /// - `AlreadyAwaitingReply` while a reply is outstanding
    pub fn retreat(&mut self) -> Result<RetreatOutcome, SessionError> {
        self.ensure_navigable()?;

        let from = self.stage;
        let Some(previous) = from.previous() else {
            return Ok(RetreatOutcome::AlreadyAtFirstStage);
        };
        let to = from.transition_to(previous)?;

        self.enter(from, to)?;
        Ok(RetreatOutcome::Moved { from, to })
    }

    fn ensure_navigable(&self) -> Result<(), SessionError> {
        if self.is_complete() {
            return Err(SessionError::SessionComplete);
        }
        if self.is_awaiting_reply() {
            return Err(SessionError::AlreadyAwaitingReply);
        }
        Ok(())
    }

    /// Switches to an interview stage and reseeds the transcript.
    fn enter(&mut self, from: Stage, to: Stage) -> Result<(), SessionError> {
        let definition = definition_for(to)?;
        self.stage = to;
        self.transcript = Transcript::seeded(definition.opening_prompt);
        self.events.push(SessionEvent::StageEntered {
            from,
            to,
            at: Timestamp::now(),
        });
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Views
    // ─────────────────────────────────────────────────────────────────────────

    /// Drains the events raised since the last call.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Builds the presentation view of the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        let stage_title = definition_for(self.stage)
            .map(|definition| definition.title)
            .unwrap_or_else(|_| self.stage.display_name());

        SessionSnapshot {
            session_id: self.id,
            stage: self.stage,
            stage_title: stage_title.to_string(),
            progress_percent: self.stage.progress_percent(),
            transcript: self.transcript.turns().to_vec(),
            awaiting_reply: self.is_awaiting_reply(),
            answers: self.answers.clone(),
            can_advance: self.can_advance(),
            can_retreat: self.can_retreat(),
        }
    }
}

impl Default for CoachingSession {
    fn default() -> Self {
        Self::start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coaching::Speaker;

    fn generated(text: &str) -> CoachReply {
        CoachReply::Generated(text.to_string())
    }

    fn answer(session: &mut CoachingSession, text: &str) -> TurnOutcome {
        let pending = session.begin_turn(text).unwrap();
        session.complete_turn(pending, generated("Noted.")).unwrap()
    }

    fn session_at(stage: Stage) -> CoachingSession {
        let mut session = CoachingSession::start();
        while session.stage() != stage {
            answer(&mut session, "something");
            session.advance().unwrap();
        }
        session.take_events();
        session
    }

    mod construction {
        use super::*;

        #[test]
        fn starts_at_wish_with_seeded_transcript() {
            let session = CoachingSession::start();

            assert_eq!(session.stage(), Stage::Wish);
            assert_eq!(session.answers(), &WoopAnswers::default());
            assert_eq!(session.transcript().len(), 1);
            assert_eq!(
                session.transcript().turns()[0].text,
                first_stage().opening_prompt
            );
            assert!(!session.is_awaiting_reply());
        }

        #[test]
        fn fresh_sessions_have_distinct_ids() {
            assert_ne!(CoachingSession::start().id(), CoachingSession::start().id());
        }
    }

    mod turns {
        use super::*;

        #[test]
        fn begin_turn_appends_user_turn_and_claims_slot() {
            let mut session = CoachingSession::start();
            let pending = session.begin_turn("Finish my dissertation chapter").unwrap();

            assert!(session.is_awaiting_reply());
            assert_eq!(session.transcript().len(), 2);
            assert_eq!(session.transcript().turns()[1].speaker, Speaker::User);
            assert_eq!(pending.stage(), Stage::Wish);
            assert_eq!(pending.user_text(), "Finish my dissertation chapter");
        }

        #[test]
        fn context_excludes_the_new_user_turn() {
            let mut session = CoachingSession::start();
            let pending = session.begin_turn("My wish").unwrap();

            assert_eq!(
                pending.transcript_context(),
                format!("coach: {}", first_stage().opening_prompt)
            );
        }

        #[test]
        fn complete_turn_records_answer_and_releases_slot() {
            let mut session = CoachingSession::start();
            let pending = session.begin_turn("Finish my dissertation chapter").unwrap();
            let outcome = session
                .complete_turn(pending, generated("Good, let's narrow that down"))
                .unwrap();

            assert_eq!(outcome.reply, "Good, let's narrow that down");
            assert!(!outcome.degraded);
            assert_eq!(session.answers().wish, "Finish my dissertation chapter");
            assert!(!session.is_awaiting_reply());
            let last = session.transcript().last().unwrap();
            assert_eq!(last.speaker, Speaker::Coach);
            assert_eq!(last.text, "Good, let's narrow that down");
        }

        #[test]
        fn fallback_reply_still_records_answer() {
            let mut session = CoachingSession::start();
            let pending = session.begin_turn("Run a marathon").unwrap();
            let outcome = session
                .complete_turn(pending, CoachReply::Fallback(FALLBACK_REPLY.to_string()))
                .unwrap();

            assert!(outcome.degraded);
            assert_eq!(session.answers().wish, "Run a marathon");
            assert_eq!(session.transcript().last().unwrap().text, FALLBACK_REPLY);
            assert!(!session.is_awaiting_reply());
        }

        #[test]
        fn blank_text_is_rejected_without_change() {
            let mut session = CoachingSession::start();
            let before = session.clone();

            assert_eq!(session.begin_turn(""), Err(SessionError::EmptyInput));
            assert_eq!(session.begin_turn("   "), Err(SessionError::EmptyInput));
            assert_eq!(session, before);
        }

        #[test]
        fn second_submission_while_awaiting_is_rejected() {
            let mut session = CoachingSession::start();
            let _pending = session.begin_turn("first").unwrap();
            let after_first = session.clone();

            assert_eq!(
                session.begin_turn("second"),
                Err(SessionError::AlreadyAwaitingReply)
            );
            assert_eq!(session, after_first);
        }

        #[test]
        fn later_submission_overwrites_answer() {
            let mut session = CoachingSession::start();
            answer(&mut session, "Get fit");
            let outcome = answer(&mut session, "Run 5k without stopping");

            assert_eq!(outcome.overwritten.as_deref(), Some("Get fit"));
            assert_eq!(session.answers().wish, "Run 5k without stopping");
            assert_eq!(session.transcript().len(), 5);
        }

        #[test]
        fn ticket_from_previous_session_is_stale() {
            let mut old = CoachingSession::start();
            let pending = old.begin_turn("hello").unwrap();

            let mut fresh = CoachingSession::start();
            assert_eq!(
                fresh.complete_turn(pending, generated("hi")),
                Err(SessionError::StaleTurn)
            );
            assert_eq!(fresh.transcript().len(), 1);
        }

        #[test]
        fn dropped_ticket_abandons_the_turn() {
            let mut session = CoachingSession::start();
            let pending = session.begin_turn("lost wish").unwrap();

            drop(pending);

            assert!(!session.is_awaiting_reply());
            assert_eq!(session.answers().wish, "");
            assert_eq!(session.transcript().len(), 2);
            assert!(!session.can_advance());

            answer(&mut session, "kept wish");
            assert_eq!(session.answers().wish, "kept wish");
            assert!(session.can_advance());
        }

        #[test]
        fn ticket_for_another_stage_is_stale_and_frees_slot() {
            let mut session = CoachingSession::start();
            let pending = session.begin_turn("wish").unwrap();
            session.stage = Stage::Outcome;

            assert_eq!(
                session.complete_turn(pending, generated("late")),
                Err(SessionError::StaleTurn)
            );
            assert!(!session.is_awaiting_reply());
            assert_eq!(session.answers().wish, "");
        }

        #[test]
        fn submission_at_summary_is_rejected() {
            let mut session = session_at(Stage::Plan);
            answer(&mut session, "If tired, then walk");
            session.advance().unwrap();

            assert_eq!(session.begin_turn("more"), Err(SessionError::SessionComplete));
        }
    }

    mod navigation {
        use super::*;

        #[test]
        fn advance_requires_completed_exchange() {
            let mut session = CoachingSession::start();
            assert_eq!(
                session.advance(),
                Err(SessionError::StageNotAnswered(Stage::Wish))
            );
            assert_eq!(session.stage(), Stage::Wish);
        }

        #[test]
        fn advance_while_awaiting_is_rejected() {
            let mut session = CoachingSession::start();
            answer(&mut session, "wish");
            let _pending = session.begin_turn("refined wish").unwrap();

            assert_eq!(session.advance(), Err(SessionError::AlreadyAwaitingReply));
            assert_eq!(session.retreat(), Err(SessionError::AlreadyAwaitingReply));
            assert_eq!(session.stage(), Stage::Wish);
        }

        #[test]
        fn advance_resets_transcript_and_keeps_answers() {
            let mut session = CoachingSession::start();
            answer(&mut session, "Finish my dissertation chapter");

            let outcome = session.advance().unwrap();

            assert_eq!(
                outcome,
                AdvanceOutcome::Moved {
                    from: Stage::Wish,
                    to: Stage::Outcome
                }
            );
            assert_eq!(session.stage(), Stage::Outcome);
            assert_eq!(session.transcript().len(), 1);
            assert_eq!(
                session.transcript().turns()[0].text,
                definition_for(Stage::Outcome).unwrap().opening_prompt
            );
            assert_eq!(session.answers().wish, "Finish my dissertation chapter");
        }

        #[test]
        fn advance_from_plan_completes_with_answers() {
            let mut session = CoachingSession::start();
            for text in ["W", "O", "B", "P"] {
                answer(&mut session, text);
                if session.stage() != Stage::Plan {
                    session.advance().unwrap();
                }
            }

            let outcome = session.advance().unwrap();

            assert_eq!(
                outcome,
                AdvanceOutcome::Completed(WoopAnswers::new("W", "O", "B", "P"))
            );
            assert_eq!(session.stage(), Stage::Summary);
            assert!(session.is_complete());
        }

        #[test]
        fn advance_at_summary_is_rejected() {
            let mut session = session_at(Stage::Plan);
            answer(&mut session, "plan");
            session.advance().unwrap();

            assert_eq!(session.advance(), Err(SessionError::SessionComplete));
            assert_eq!(session.retreat(), Err(SessionError::SessionComplete));
        }

        #[test]
        fn retreat_at_wish_is_noop() {
            let mut session = CoachingSession::start();
            answer(&mut session, "wish");
            let before = session.clone();

            assert_eq!(session.retreat(), Ok(RetreatOutcome::AlreadyAtFirstStage));
            assert_eq!(session, before);
        }

        #[test]
        fn retreat_discards_stage_dialogue_but_keeps_answer() {
            let mut session = session_at(Stage::Obstacle);
            answer(&mut session, "I get distracted");

            let outcome = session.retreat().unwrap();

            assert_eq!(
                outcome,
                RetreatOutcome::Moved {
                    from: Stage::Obstacle,
                    to: Stage::Outcome
                }
            );
            assert_eq!(session.transcript().len(), 1);
            assert_eq!(
                session.transcript().turns()[0].text,
                definition_for(Stage::Outcome).unwrap().opening_prompt
            );
            assert_eq!(session.answers().obstacle, "I get distracted");
        }
    }

    mod events {
        use super::*;

        #[test]
        fn turn_emits_answer_and_reply_events() {
            let mut session = CoachingSession::start();
            answer(&mut session, "first");
            answer(&mut session, "second");

            let names: Vec<_> = session.take_events().iter().map(|e| e.name()).collect();
            assert_eq!(
                names,
                vec!["answer_recorded", "coach_replied", "answer_recorded", "coach_replied"]
            );
            assert!(session.take_events().is_empty());
        }

        #[test]
        fn overwrite_is_visible_in_event() {
            let mut session = CoachingSession::start();
            answer(&mut session, "first");
            answer(&mut session, "second");

            let overwritten: Vec<_> = session
                .take_events()
                .into_iter()
                .filter_map(|event| match event {
                    SessionEvent::AnswerRecorded { overwritten, .. } => Some(overwritten),
                    _ => None,
                })
                .collect();
            assert_eq!(overwritten, vec![None, Some("first".to_string())]);
        }

        #[test]
        fn completion_emits_completed_event() {
            let mut session = session_at(Stage::Plan);
            answer(&mut session, "plan");
            session.take_events();
            session.advance().unwrap();

            let events = session.take_events();
            assert!(matches!(
                events.last(),
                Some(SessionEvent::Completed { .. })
            ));
        }
    }

    mod snapshot {
        use super::*;

        #[test]
        fn reflects_awaiting_flag_and_navigation() {
            let mut session = CoachingSession::start();
            let snapshot = session.snapshot();
            assert_eq!(snapshot.stage_title, "Wish");
            assert_eq!(snapshot.progress_percent, 20);
            assert!(!snapshot.can_advance);
            assert!(!snapshot.can_retreat);

            let pending = session.begin_turn("wish").unwrap();
            assert!(session.snapshot().awaiting_reply);

            session.complete_turn(pending, generated("ok")).unwrap();
            let snapshot = session.snapshot();
            assert!(!snapshot.awaiting_reply);
            assert!(snapshot.can_advance);
            assert_eq!(snapshot.transcript.len(), 3);
        }

        #[test]
        fn summary_snapshot_uses_display_name() {
            let mut session = session_at(Stage::Plan);
            answer(&mut session, "plan");
            session.advance().unwrap();

            let snapshot = session.snapshot();
            assert_eq!(snapshot.stage_title, "Summary");
            assert_eq!(snapshot.progress_percent, 100);
            assert!(!snapshot.can_advance);
        }
    }
}
