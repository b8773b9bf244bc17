//! Off-side-rule indentation tracking.
//!
//! Converts a flat stream of logical-line newlines into `Indent`/`Dedent`
//! tokens the parser's block-structured grammar expects, the way Python's
//! own tokenizer does. Bracket nesting (`(`, `[`, `{`) suppresses `Newline`
//! emission entirely, since a logical line may span several physical lines
//! inside brackets (spec.md's source subset keeps this from the dynamic
//! parent language).

use crate::error::LexError;
use statik_ir::Span;

/// Tracks the stack of open indentation levels (in columns) for one source
/// file and the current bracket-nesting depth.
pub(crate) struct IndentTracker {
    stack: Vec<u32>,
    bracket_depth: u32,
}

impl IndentTracker {
    pub(crate) fn new() -> Self {
        IndentTracker {
            stack: vec![0],
            bracket_depth: 0,
        }
    }

    pub(crate) fn enter_bracket(&mut self) {
        self.bracket_depth += 1;
    }

    pub(crate) fn exit_bracket(&mut self) {
        self.bracket_depth = self.bracket_depth.saturating_sub(1);
    }

    pub(crate) fn inside_brackets(&self) -> bool {
        self.bracket_depth > 0
    }

    /// Given the column (space count) a new logical line starts at, returns
    /// how many `Indent` or `Dedent` tokens to emit before its first token.
    ///
    /// Positive: that many `Indent`s. Negative: that many `Dedent`s.
    /// Exactly-equal columns emit nothing.
    #[allow(clippy::expect_used, reason = "stack is seeded with a sentinel 0 and never popped empty")]
    pub(crate) fn levels_for_column(&mut self, column: u32, span: Span) -> Result<i32, LexError> {
        let top = *self.stack.last().expect("stack always has a sentinel 0");
        if column > top {
            self.stack.push(column);
            return Ok(1);
        }
        if column == top {
            return Ok(0);
        }
        let mut dedents = 0;
        while *self.stack.last().expect("stack always has a sentinel 0") > column {
            self.stack.pop();
            dedents += 1;
        }
        if *self.stack.last().expect("stack always has a sentinel 0") != column {
            return Err(LexError::DedentMismatch { span });
        }
        Ok(-dedents)
    }

    /// Dedents remaining at end-of-file, to close every still-open block.
    pub(crate) fn final_dedents(&mut self) -> u32 {
        let n = self.stack.len() as u32 - 1;
        self.stack.truncate(1);
        n
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn tracks_single_indent_and_dedent() {
        let mut tracker = IndentTracker::new();
        assert_eq!(tracker.levels_for_column(4, Span::DUMMY).unwrap(), 1);
        assert_eq!(tracker.levels_for_column(4, Span::DUMMY).unwrap(), 0);
        assert_eq!(tracker.levels_for_column(0, Span::DUMMY).unwrap(), -1);
    }

    #[test]
    fn rejects_mismatched_dedent() {
        let mut tracker = IndentTracker::new();
        tracker.levels_for_column(4, Span::DUMMY).unwrap();
        tracker.levels_for_column(8, Span::DUMMY).unwrap();
        assert!(tracker.levels_for_column(2, Span::DUMMY).is_err());
    }

    #[test]
    fn final_dedents_closes_all_open_levels() {
        let mut tracker = IndentTracker::new();
        tracker.levels_for_column(4, Span::DUMMY).unwrap();
        tracker.levels_for_column(8, Span::DUMMY).unwrap();
        assert_eq!(tracker.final_dedents(), 2);
    }
}
