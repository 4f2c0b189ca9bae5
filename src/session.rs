//! Per-document stepping session.
//!
//! A session owns the span being stepped through, its token sequence, a
//! cursor marking the visible/hidden boundary, and the hidden remainder
//! text. The remainder lives outside the buffer: revealing moves text from
//! the remainder into the buffer, retracting moves it back. Every mutation
//! the session issues is flagged as a self-edit so the registry can tell it
//! apart from external edits, which invalidate the session.

use std::ops::Range;

use crate::error::StepError;
use crate::host::{Edit, EditHost};
use crate::messages::StepMsg;
use crate::tokenize::{concat, tokenize, Token};

/// Progress of a stepping session over its span.
///
/// `cursor: None` means nothing is visible; `Some(c)` means tokens
/// `[0..=c]` are materialized in the buffer and `[c+1..]` are held in
/// `remainder`. Keeping the remainder as plain text avoids re-tokenizing
/// after every step, and the hidden text cannot be re-derived from the
/// buffer anyway since it is no longer in it.
#[derive(Debug, Default)]
pub enum StepState {
    /// Span known (or absent) but no step taken yet; tokens not computed.
    #[default]
    NotStarted,
    /// Mid-session: the span has been trimmed to a visible prefix.
    Active {
        tokens: Vec<Token>,
        cursor: Option<usize>,
        remainder: String,
        visible: Range<usize>,
    },
}

/// Stepping state for one document.
#[derive(Debug, Default)]
pub struct Session {
    span: Option<Range<usize>>,
    state: StepState,
    self_edit: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// The span currently eligible for stepping, if any.
    pub fn span(&self) -> Option<&Range<usize>> {
        self.span.as_ref()
    }

    /// True once a step has materialized the session.
    pub fn is_active(&self) -> bool {
        matches!(self.state, StepState::Active { .. })
    }

    /// The session's stepping progress, for embeddings that want to
    /// inspect the cursor or remainder (e.g. for status display).
    pub fn state(&self) -> &StepState {
        &self.state
    }

    /// The buffer range spanned by the visible tokens, while active.
    pub fn visible_range(&self) -> Option<Range<usize>> {
        match &self.state {
            StepState::Active { visible, .. } => Some(visible.clone()),
            StepState::NotStarted => None,
        }
    }

    /// Adopt a new candidate span, discarding any cursor/remainder from a
    /// previous session. Tokenization stays lazy until a step is requested.
    pub fn anchor(&mut self, span: Range<usize>) {
        tracing::debug!(start = span.start, end = span.end, "anchoring span");
        self.span = Some(span);
        self.state = StepState::NotStarted;
    }

    /// Drop the span and all session state.
    pub fn clear(&mut self) {
        if self.span.is_some() {
            tracing::debug!("clearing session");
        }
        self.span = None;
        self.state = StepState::NotStarted;
    }

    /// Consume the self-edit flag. Returns true when the change
    /// notification being processed was caused by this session.
    pub(crate) fn take_self_edit(&mut self) -> bool {
        std::mem::take(&mut self.self_edit)
    }

    /// Execute one step operation against the host buffer.
    ///
    /// Preconditions: at most one selection may exist, and a non-empty
    /// selection re-anchors the span unconditionally. With no span at all
    /// the operation is refused.
    pub fn step(&mut self, host: &mut dyn EditHost, msg: StepMsg) -> Result<(), StepError> {
        let selections = host.selections();
        if selections.len() > 1 {
            tracing::warn!(count = selections.len(), "refusing step: multiple selections");
            return Err(StepError::MultipleSelections);
        }
        if let Some(selection) = selections.first() {
            if !selection.is_empty() {
                self.anchor(selection.clone());
            }
        }
        let span = self.span.clone().ok_or(StepError::NothingToStep)?;

        match self.state {
            StepState::NotStarted => self.start(host, span, msg),
            StepState::Active { .. } => {
                if msg.is_forward() {
                    self.step_forward(host, msg)
                } else {
                    self.step_backward(host, msg)
                }
            }
        }
    }

    /// First step on a span: tokenize it, pick the entry cursor for the
    /// requested direction, and trim the buffer down to the visible prefix
    /// with a single delete.
    fn start(
        &mut self,
        host: &mut dyn EditHost,
        span: Range<usize>,
        msg: StepMsg,
    ) -> Result<(), StepError> {
        let tokens = tokenize(&host.text(span.clone()));
        if tokens.is_empty() {
            return Err(StepError::NothingToStep);
        }
        let last = tokens.len() - 1;

        let cursor: Option<usize> = match msg {
            StepMsg::NextWord => Some(0),
            // Everything but the final token stays visible.
            StepMsg::PrevWord => last.checked_sub(1),
            // Through the first line token; a span with no line terminator
            // is a single line, so the whole span is revealed.
            StepMsg::NextLine => Some(tokens.iter().position(Token::is_line).unwrap_or(last)),
            // Through the last line token, ignoring the final token's own
            // terminator so an exact trailing line is not excluded.
            StepMsg::PrevLine => tokens[..last].iter().rposition(Token::is_line),
        };

        let visible_count = cursor.map_or(0, |c| c + 1);
        let visible_chars: usize = tokens[..visible_count]
            .iter()
            .map(Token::len_chars)
            .sum();
        let remainder = concat(&tokens[visible_count..]);
        let delete = span.start + visible_chars..span.end;

        tracing::debug!(
            ?msg,
            tokens = tokens.len(),
            ?cursor,
            hidden_chars = remainder.chars().count(),
            "starting session"
        );

        if !delete.is_empty() {
            self.issue_edit(host, Edit::Delete(delete))?;
        }
        self.state = StepState::Active {
            tokens,
            cursor,
            remainder,
            visible: span.start..span.start + visible_chars,
        };
        Ok(())
    }

    fn step_forward(&mut self, host: &mut dyn EditHost, msg: StepMsg) -> Result<(), StepError> {
        let (new_cursor, reveal, insert_at) = {
            let StepState::Active {
                tokens,
                cursor,
                remainder,
                visible,
            } = &self.state
            else {
                return Err(StepError::Desynchronized);
            };
            let last = tokens.len() - 1;
            if *cursor == Some(last) {
                tracing::trace!("step forward clamped at span end");
                return Ok(());
            }
            let begin = cursor.map_or(0, |c| c + 1);
            let new_cursor = match msg {
                StepMsg::NextWord => begin,
                StepMsg::NextLine => tokens[begin..]
                    .iter()
                    .position(Token::is_line)
                    .map_or(last, |i| begin + i),
                _ => return Err(StepError::Desynchronized),
            };
            let reveal = concat(&tokens[begin..=new_cursor]);
            if !remainder.starts_with(&reveal) {
                tracing::error!("remainder diverged from token sequence");
                self.clear();
                return Err(StepError::Desynchronized);
            }
            (new_cursor, reveal, visible.end)
        };

        self.issue_edit(
            host,
            Edit::Insert {
                at: insert_at,
                text: reveal.clone(),
            },
        )?;

        let StepState::Active {
            cursor,
            remainder,
            visible,
            ..
        } = &mut self.state
        else {
            return Err(StepError::Desynchronized);
        };
        remainder.drain(..reveal.len());
        visible.end += reveal.chars().count();
        *cursor = Some(new_cursor);
        tracing::debug!(?msg, cursor = new_cursor, "revealed tokens");
        Ok(())
    }

    fn step_backward(&mut self, host: &mut dyn EditHost, msg: StepMsg) -> Result<(), StepError> {
        let (new_cursor, hide, delete) = {
            let StepState::Active {
                tokens,
                cursor,
                visible,
                ..
            } = &self.state
            else {
                return Err(StepError::Desynchronized);
            };
            let Some(old) = *cursor else {
                tracing::trace!("step backward clamped at span start");
                return Ok(());
            };
            let new_cursor = match msg {
                StepMsg::PrevWord => old.checked_sub(1),
                StepMsg::PrevLine => {
                    // Retreat to the previous line token, or hide everything.
                    tokens[..old].iter().rposition(Token::is_line)
                }
                _ => return Err(StepError::Desynchronized),
            };
            let begin = new_cursor.map_or(0, |c| c + 1);
            let hide = concat(&tokens[begin..=old]);
            let hide_chars = hide.chars().count();
            if visible.end < visible.start + hide_chars {
                tracing::error!("visible range shorter than text to hide");
                self.clear();
                return Err(StepError::Desynchronized);
            }
            (new_cursor, hide, visible.end - hide_chars..visible.end)
        };

        self.issue_edit(host, Edit::Delete(delete.clone()))?;

        let StepState::Active {
            cursor,
            remainder,
            visible,
            ..
        } = &mut self.state
        else {
            return Err(StepError::Desynchronized);
        };
        remainder.insert_str(0, &hide);
        visible.end = delete.start;
        *cursor = new_cursor;
        tracing::debug!(?msg, ?new_cursor, "retracted tokens");
        Ok(())
    }

    /// Apply one self-originated edit. The self-edit flag is raised before
    /// the edit and, on rejection, lowered again on the spot (no
    /// notification will follow a rejected edit), so it cannot be left
    /// stuck. On success the flag stays up until the registry consumes it
    /// with the matching change notification.
    fn issue_edit(&mut self, host: &mut dyn EditHost, edit: Edit) -> Result<(), StepError> {
        self.self_edit = true;
        if !host.apply_edit(&edit) {
            self.self_edit = false;
            tracing::error!(?edit, "host rejected edit; abandoning session");
            self.clear();
            return Err(StepError::EditRejected);
        }
        Ok(())
    }
}
