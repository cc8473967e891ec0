//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, state machine, errors)
//! - `woop` - Stage catalog, collected answers and prompt builders
//! - `coaching` - Interview session state machine and turn-taking
//! - `report` - Final report, line classifier and execution log

pub mod coaching;
pub mod foundation;
pub mod report;
pub mod woop;
