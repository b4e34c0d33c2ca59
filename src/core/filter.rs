//! Block filter: the two-state machine that drops interactive-only regions

use crate::core::rules::{FenceAction, FenceRules};
use std::borrow::Cow;

/// Closing fence of a code region, compared against the trimmed line
pub const CLOSING_FENCE: &str = "```";

/// Whether lines are currently being emitted or dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockState {
    #[default]
    Passing,
    Skipping,
}

/// What happened to a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome<'a> {
    /// Emitted unchanged
    Kept(&'a str),
    /// Emitted after a rule rewrote it
    Rewritten(String),
    /// Dropped
    Dropped,
}

impl<'a> LineOutcome<'a> {
    /// The text to write, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LineOutcome::Kept(line) => Some(*line),
            LineOutcome::Rewritten(line) => Some(line.as_str()),
            LineOutcome::Dropped => None,
        }
    }
}

/// Result of feeding one line to the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step<'a> {
    pub state: BlockState,
    pub outcome: LineOutcome<'a>,
    /// The line opened a dropped region
    pub entered_skip: bool,
}

/// Compute the next state and the outcome for one line.
///
/// A skip rule flips the state before the emission check, so the opener of a
/// dropped region is dropped with it. The closing fence resets the state only
/// after the emission check, so it is dropped too.
pub fn step<'a>(state: BlockState, rules: &FenceRules, line: &'a str) -> Step<'a> {
    let mut next = state;
    let mut text = Cow::Borrowed(line);

    if let Some(rule) = rules.classify(line) {
        match rule.action() {
            FenceAction::Skip => next = BlockState::Skipping,
            FenceAction::Rewrite { .. } => text = rule.rewrite(line),
        }
    }

    let outcome = match (next, text) {
        (BlockState::Skipping, _) => LineOutcome::Dropped,
        (BlockState::Passing, Cow::Borrowed(kept)) => LineOutcome::Kept(kept),
        (BlockState::Passing, Cow::Owned(rewritten)) => LineOutcome::Rewritten(rewritten),
    };
    let entered_skip = state == BlockState::Passing && next == BlockState::Skipping;

    if line.trim() == CLOSING_FENCE {
        next = BlockState::Passing;
    }

    Step {
        state: next,
        outcome,
        entered_skip,
    }
}

/// Per-document block filter over a shared rule table
#[derive(Debug)]
pub struct BlockFilter<'r> {
    rules: &'r FenceRules,
    state: BlockState,
    regions_dropped: usize,
    lines_rewritten: usize,
}

impl<'r> BlockFilter<'r> {
    pub fn new(rules: &'r FenceRules) -> Self {
        Self {
            rules,
            state: BlockState::Passing,
            regions_dropped: 0,
            lines_rewritten: 0,
        }
    }

    pub fn state(&self) -> BlockState {
        self.state
    }

    /// Regions entered in the `Skipping` state so far
    pub fn regions_dropped(&self) -> usize {
        self.regions_dropped
    }

    /// Emitted lines that a rewrite rule changed so far
    pub fn lines_rewritten(&self) -> usize {
        self.lines_rewritten
    }

    /// Feed one line, terminator included
    pub fn process<'a>(&mut self, line: &'a str) -> LineOutcome<'a> {
        let next = step(self.state, self.rules, line);
        if next.entered_skip {
            self.regions_dropped += 1;
        }
        if matches!(next.outcome, LineOutcome::Rewritten(_)) {
            self.lines_rewritten += 1;
        }
        self.state = next.state;
        next.outcome
    }
}
