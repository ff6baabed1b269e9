// File: ./src/handlers/mod.rs
//! Command handlers.
//!
//! Each handler takes the raw utterance and the current schedules and returns
//! an `Outcome`. Handlers never touch the disk; the controller loads before
//! and saves after a `Mutated` outcome.
use crate::config::Config;
use crate::model::{Clock, ScheduleEntry};

pub mod add;
pub mod delete;
pub mod edit;
pub mod reminder;
pub mod search;
pub mod stats;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The handler's own pattern did not accept the input.
    NoMatch,
    /// A reply with nothing to persist.
    Handled(String),
    /// A reply together with the full replacement schedule list.
    Mutated {
        reply: String,
        schedules: Vec<ScheduleEntry>,
    },
}

impl Outcome {
    pub fn reply(&self) -> Option<&str> {
        match self {
            Outcome::NoMatch => None,
            Outcome::Handled(reply) | Outcome::Mutated { reply, .. } => Some(reply),
        }
    }
}

/// Everything a handler may consult besides the input and the schedules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Env {
    pub clock: Clock,
    pub search_threshold: f64,
    pub match_threshold: f64,
}

impl Env {
    pub fn new(config: &Config, clock: Clock) -> Self {
        Self {
            clock,
            search_threshold: config.search_threshold,
            match_threshold: config.match_threshold,
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new(&Config::default(), Clock::System)
    }
}

pub type Handler = fn(&str, &[ScheduleEntry], &Env) -> Outcome;
