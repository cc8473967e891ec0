//! Static definitions for each interview stage.
//!
//! Provides the title, the opening prompt the coach seeds each stage with,
//! the stage-specific guidance forwarded to the generation service, and the
//! criterion the coach steers towards before the user moves on.

use super::{InvalidStageError, Stage};

/// Immutable description of one interview stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageDefinition {
    /// The stage this definition belongs to.
    pub stage: Stage,
    /// Human-readable title.
    pub title: &'static str,
    /// First coach message of the stage transcript.
    pub opening_prompt: &'static str,
    /// Stage-specific goal handed to the coach on every turn.
    pub guidance: &'static str,
    /// What a finished answer for this stage looks like.
    pub completion_criterion: &'static str,
}

/// Programme-level texts shown before the interview starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgrammeOverview {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
}

pub const OVERVIEW: ProgrammeOverview = ProgrammeOverview {
    title: "The WOOP Coaching Model: Mental Contrasting with Implementation Intentions",
    subtitle: "A systemic research report for personal growth",
    description: "WOOP (Wish, Outcome, Obstacle, Plan) is a systematic intervention designed by \
NYU psychology professor Gabriele Oettingen to close the gap between intention and behaviour.",
};

/// Returns the definition for an interview stage.
///
/// `Stage::Summary` has no definition; asking for it is a programming error
/// reported as [`InvalidStageError`].
pub fn definition_for(stage: Stage) -> Result<&'static StageDefinition, InvalidStageError> {
    match stage {
        Stage::Wish => Ok(&WISH),
        Stage::Outcome => Ok(&OUTCOME),
        Stage::Obstacle => Ok(&OBSTACLE),
        Stage::Plan => Ok(&PLAN),
        Stage::Summary => Err(InvalidStageError(stage)),
    }
}

/// Definition of the stage every session starts in.
pub fn first_stage() -> &'static StageDefinition {
    &WISH
}

// ============================================================================
// Stage Definitions
// ============================================================================

static WISH: StageDefinition = StageDefinition {
    stage: Stage::Wish,
    title: "Wish",
    opening_prompt: "Over the next four weeks, what is the one wish you most want to achieve \
that is both challenging and feasible?",
    guidance: "Respond to the value of the wish. First confirm that the wish truly comes from \
within; only in a later reply guide the user to condense it to 3-6 words. Remember: one step at \
a time.",
    completion_criterion: "the wish is refined to 3-6 words and is genuinely the user's own",
};

static OUTCOME: StageDefinition = StageDefinition {
    stage: Stage::Outcome,
    title: "Outcome",
    opening_prompt: "Once this wish comes true, what is the best, most fulfilling outcome you \
would experience? Close your eyes and feel that moment.",
    guidance: "First affirm the vision the user described. Then ask for exactly one sensory \
detail (for example: what do you see? or what do you hear?), never both at once.",
    completion_criterion: "the user describes concrete sensory detail (what they see, hear, feel)",
};

static OBSTACLE: StageDefinition = StageDefinition {
    stage: Stage::Obstacle,
    title: "Obstacle",
    opening_prompt: "What is the single most critical inner obstacle standing between you and \
your wish? (for example a habit, an emotion, or a belief)",
    guidance: "Show empathy for the user's honesty. If they name an external obstacle, gently \
lead them to the inner, psychological obstacle behind it. Dig into one root cause at a time.",
    completion_criterion: "the user names an inner obstacle (a fear, an old habit) instead of \
blaming circumstances",
};

static PLAN: StageDefinition = StageDefinition {
    stage: Stage::Plan,
    title: "Plan",
    opening_prompt: "When the obstacle shows up again, what one specific action or thought will \
you use to meet it?",
    guidance: "Confirm the action is effective. Guide the user to phrase it as a concise \
'If ..., then ...' statement. Make sure the action is tiny enough to carry out instantly under \
pressure.",
    completion_criterion: "a clear 'if ... then ...' rule is formed",
};
