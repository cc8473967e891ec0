//! Instruction payloads sent to the generation service.
//!
//! Each request is a single natural-language payload: the coach turn combines
//! persona, stage, the latest user text, the prior transcript, the global
//! conversation rules and the stage guidance; the final report combines the
//! report template with the four literal answers.

use super::{definition_for, InvalidStageError, Stage, WoopAnswers};

/// Persona directive opening every coach-turn payload.
pub const COACH_PERSONA: &str =
    "You are a leading WOOP psychology coach who guides people through Socratic dialogue.";

/// Global conversation rules applied to every coach reply.
pub const COACHING_RULES: [&str; 4] = [
    "Single question: ask exactly one question per reply. Never put several questions or \
several tasks in one reply.",
    "Affirm before probing: first give a specific, warm and positive response to what the user \
said, then offer the next piece of guidance.",
    "Keep it short: replies stay brief (about 150 words at most). Avoid Markdown headings, long \
lists and academic essays.",
    "Narrow step by step: do not raise every quality criterion (authenticity, precision, \
feasibility) at once. Pick the one point the current answer most needs and follow up on it.",
];

/// Phrases the report title must contain.
pub const REPORT_TITLE_PHRASES: [&str; 2] = ["systemic research report", "28-day path"];

/// Sections the final report must contain, in order.
pub const REPORT_SECTIONS: [&str; 5] = [
    "Mechanism analysis: briefly explain why the user's obstacle is the core breakthrough point.",
    "Visualization script: write a closed-eyes visualization passage of about 100 words that \
weaves in the outcome the user described.",
    "Automation strategy: reinforce the If-Then rule.",
    "Execution guide: give concrete strategies for handling the obstacle.",
    "Closing: end with a motivating summary.",
];

/// Payload for one conversational turn.
#[derive(Debug, Clone, Copy)]
pub struct CoachTurnPrompt<'a> {
    pub stage: Stage,
    pub user_text: &'a str,
    pub transcript_context: &'a str,
    pub language: &'a str,
}

impl<'a> CoachTurnPrompt<'a> {
    /// Renders the full instruction payload.
    pub fn render(&self) -> Result<String, InvalidStageError> {
        let definition = definition_for(self.stage)?;

        let mut rules: Vec<String> = COACHING_RULES
            .iter()
            .enumerate()
            .map(|(idx, rule)| format!("{}. {}", idx + 1, rule))
            .collect();
        rules.push(format!(
            "{}. Completion standards:\n{}",
            COACHING_RULES.len() + 1,
            completion_standards()
        ));

        Ok(format!(
            "System: {persona}\n\n\
             Current coaching stage: {stage}\n\
             Latest user input: {user_text}\n\
             Conversation history:\n{context}\n\n\
             Core coaching rules (follow strictly):\n{rules}\n\n\
             Stage-specific goal: {guidance}\n\n\
             Language: always reply in warm, professional {language}.",
            persona = COACH_PERSONA,
            stage = self.stage.identifier(),
            user_text = self.user_text,
            context = self.transcript_context,
            rules = rules.join("\n"),
            guidance = definition.guidance,
            language = self.language,
        ))
    }
}

fn completion_standards() -> String {
    Stage::interview()
        .iter()
        .filter_map(|stage| definition_for(*stage).ok())
        .map(|def| format!("   - {} stage: keep guiding until {}.", def.title, def.completion_criterion))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Payload for the narrative report compiled after the interview.
#[derive(Debug, Clone, Copy)]
pub struct FinalReportPrompt<'a> {
    pub answers: &'a WoopAnswers,
    pub language: &'a str,
}

impl<'a> FinalReportPrompt<'a> {
    /// Renders the full instruction payload.
    pub fn render(&self) -> String {
        let title_rule = format!(
            "Title: must contain the phrases \"{}\" and \"{}\".",
            REPORT_TITLE_PHRASES[0], REPORT_TITLE_PHRASES[1]
        );
        let requirements: Vec<String> = std::iter::once(title_rule)
            .chain(REPORT_SECTIONS.iter().map(|s| s.to_string()))
            .enumerate()
            .map(|(idx, line)| format!("{}. {}", idx + 1, line))
            .collect();

        format!(
            "System: Write a \"WOOP Personal Growth Systemic Action Report\" grounded in MCII \
             (mental contrasting with implementation intentions).\n\
             Input data:\n\
             Wish: {wish}\n\
             Outcome: {outcome}\n\
             Obstacle: {obstacle}\n\
             Plan: {plan}\n\n\
             Report requirements:\n{requirements}\n\n\
             Style: rigorous, scientific, full of strength.\n\
             Language: {language}.",
            wish = self.answers.wish,
            outcome = self.answers.outcome,
            obstacle = self.answers.obstacle,
            plan = self.answers.plan,
            requirements = requirements.join("\n"),
            language = self.language,
        )
    }
}
