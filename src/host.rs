//! The editor-integration seam.
//!
//! The stepping core never talks to a concrete editor. It reads text,
//! converts positions, queries selections and applies edits through the
//! `EditHost` trait; the surrounding integration layer forwards buffer
//! change notifications back into the session registry. `RopeHost` is the
//! reference implementation used by the CLI and the test suites.

use ropey::Rope;
use std::ops::Range;

/// A line/column position, 0-indexed, consistent with the host buffer's
/// line-ending convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A single-range buffer mutation. All offsets are char offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Remove the text in a half-open range
    Delete(Range<usize>),
    /// Insert text at an offset
    Insert { at: usize, text: String },
}

/// One descriptor of a buffer change notification: the replaced range (in
/// char offsets, pre-change coordinates) and the text that replaced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub range: Range<usize>,
    pub text: String,
}

impl ChangeEvent {
    pub fn new(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }

    /// Length of the inserted text in chars.
    pub fn inserted_chars(&self) -> usize {
        self.text.chars().count()
    }
}

/// Read-and-edit view of a live document buffer.
///
/// Abstracts over whatever the surrounding editor uses as its buffer; the
/// stepping core only needs span extraction, offset/position conversion,
/// the selection list, and a single-range edit primitive.
pub trait EditHost {
    /// Total length in chars
    fn len_chars(&self) -> usize;

    /// Extract the text of a char range (clamped to the buffer)
    fn text(&self, range: Range<usize>) -> String;

    /// Convert a char offset to a line/column position
    fn offset_to_position(&self, offset: usize) -> Position;

    /// Convert a line/column position to a char offset
    fn position_to_offset(&self, pos: Position) -> usize;

    /// Current selections; an empty range is a bare cursor
    fn selections(&self) -> Vec<Range<usize>>;

    /// Apply a single-range mutation. Returns whether the buffer accepted
    /// the edit; a rejection is fatal for any in-flight stepping session.
    fn apply_edit(&mut self, edit: &Edit) -> bool;
}

// ============================================================================
// RopeHost - reference implementation over ropey
// ============================================================================

/// `EditHost` backed by a `ropey::Rope`.
///
/// Mutations are queued as `ChangeEvent`s; the embedding drains them with
/// [`RopeHost::take_changes`] and feeds them to the session registry, which
/// is how the change-notification loop is closed outside a real editor.
#[derive(Debug, Clone, Default)]
pub struct RopeHost {
    rope: Rope,
    selections: Vec<Range<usize>>,
    pending: Vec<ChangeEvent>,
}

impl RopeHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host from initial text, with a bare cursor at offset 0.
    pub fn from_text(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
            selections: vec![0..0],
            pending: Vec::new(),
        }
    }

    /// Full buffer content
    pub fn content(&self) -> String {
        self.rope.to_string()
    }

    /// Replace all selections with a single range
    pub fn set_selection(&mut self, range: Range<usize>) {
        self.selections = vec![range];
    }

    /// Replace all selections with the given set (for multi-cursor tests)
    pub fn set_selections(&mut self, selections: Vec<Range<usize>>) {
        self.selections = selections;
    }

    /// Drain the queued change notifications
    pub fn take_changes(&mut self) -> Vec<ChangeEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Mutate the buffer as an external actor would (typing, another tool):
    /// replace `range` with `text`, queue the matching notification and
    /// collapse the selection after the inserted text.
    pub fn external_edit(&mut self, range: Range<usize>, text: &str) {
        let start = range.start.min(self.rope.len_chars());
        let end = range.end.min(self.rope.len_chars());
        self.rope.remove(start..end);
        self.rope.insert(start, text);
        self.pending.push(ChangeEvent::new(start..end, text));
        let cursor = start + text.chars().count();
        self.selections = vec![cursor..cursor];
    }
}

impl EditHost for RopeHost {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn text(&self, range: Range<usize>) -> String {
        let start = range.start.min(self.rope.len_chars());
        let end = range.end.min(self.rope.len_chars());
        if start >= end {
            return String::new();
        }
        self.rope.slice(start..end).to_string()
    }

    fn offset_to_position(&self, offset: usize) -> Position {
        let clamped = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(clamped);
        let line_start = self.rope.line_to_char(line);
        Position::new(line, clamped - line_start)
    }

    fn position_to_offset(&self, pos: Position) -> usize {
        if pos.line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        let line_start = self.rope.line_to_char(pos.line);
        let line_len = self.rope.line(pos.line).len_chars();
        line_start + pos.column.min(line_len)
    }

    fn selections(&self) -> Vec<Range<usize>> {
        self.selections.clone()
    }

    fn apply_edit(&mut self, edit: &Edit) -> bool {
        match edit {
            Edit::Delete(range) => {
                if range.start > range.end || range.end > self.rope.len_chars() {
                    return false;
                }
                self.rope.remove(range.clone());
                self.pending.push(ChangeEvent::new(range.clone(), ""));
                self.selections = vec![range.start..range.start];
            }
            Edit::Insert { at, text } => {
                if *at > self.rope.len_chars() {
                    return false;
                }
                self.rope.insert(*at, text);
                self.pending
                    .push(ChangeEvent::new(*at..*at, text.clone()));
                let cursor = at + text.chars().count();
                self.selections = vec![cursor..cursor];
            }
        }
        true
    }
}
