//! Per-document session registry and change-driven session management.
//!
//! One `Session` per open document, keyed by document identity. The
//! registry owns the three lifecycle hooks the integration layer must wire
//! up: change notifications, document close, and document rename. Sessions
//! are created lazily the first time a document is touched.

use std::collections::HashMap;
use std::fmt;

use crate::config::StepConfig;
use crate::error::StepError;
use crate::host::{ChangeEvent, EditHost};
use crate::messages::StepMsg;
use crate::session::Session;

/// Identity of an open document (URI or path-like), stable across edits
/// but rewritten on rename.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(pub String);

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Owns the stepping sessions of all open documents.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<DocumentId, Session>,
    config: StepConfig,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StepConfig) -> Self {
        Self {
            sessions: HashMap::new(),
            config,
        }
    }

    /// The document's session, created on first access.
    pub fn session_mut(&mut self, doc: &DocumentId) -> &mut Session {
        self.sessions.entry(doc.clone()).or_default()
    }

    /// The document's session, if one has been touched before.
    pub fn session(&self, doc: &DocumentId) -> Option<&Session> {
        self.sessions.get(doc)
    }

    /// Execute a step operation on the given document.
    pub fn step(
        &mut self,
        doc: &DocumentId,
        host: &mut dyn EditHost,
        msg: StepMsg,
    ) -> Result<(), StepError> {
        self.session_mut(doc).step(host, msg)
    }

    /// Process one buffer change notification for a document.
    ///
    /// An empty descriptor list is not a buffer mutation and is ignored
    /// outright. Notifications caused by the session's own edits are also
    /// ignored (the self-edit flag is consumed). An external notification
    /// consisting of exactly one edit whose inserted text meets the
    /// configured minimum length re-anchors the span to the inserted
    /// range; anything else (single characters, pure deletions,
    /// multi-range edits) clears the session so stepping never operates on
    /// stale text.
    pub fn handle_change(&mut self, doc: &DocumentId, events: &[ChangeEvent]) {
        if events.is_empty() {
            return;
        }
        let min_chars = self.config.reanchor_min_chars;
        let session = self.session_mut(doc);
        if session.take_self_edit() {
            tracing::trace!(%doc, "ignoring self-originated change");
            return;
        }
        match events {
            [event] if event.inserted_chars() >= min_chars => {
                let start = event.range.start;
                session.anchor(start..start + event.inserted_chars());
            }
            _ => session.clear(),
        }
    }

    /// Discard the document's session.
    pub fn document_closed(&mut self, doc: &DocumentId) {
        if self.sessions.remove(doc).is_some() {
            tracing::debug!(%doc, "document closed, session discarded");
        }
    }

    /// Re-key the document's session under its new identity, contents
    /// untouched.
    pub fn document_renamed(&mut self, old: &DocumentId, new: DocumentId) {
        if let Some(session) = self.sessions.remove(old) {
            tracing::debug!(%old, %new, "document renamed, session re-keyed");
            self.sessions.insert(new, session);
        }
    }

    /// Number of tracked documents.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
