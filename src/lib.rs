//! WOOP Coach - Guided Mental Contrasting Conversation
//!
//! This crate walks a user through the four WOOP stages (Wish, Outcome,
//! Obstacle, Plan) with a generative coach, then compiles the collected
//! answers into a research-style report with a 28-day execution log.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
