//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::ops::Range;

use spanstep::{ChangeEvent, DocumentId, RopeHost, SessionRegistry, StepError, StepMsg};

pub fn doc() -> DocumentId {
    DocumentId::from("file:///tmp/spanstep-test.txt")
}

/// A host buffer plus a registry, with the change-notification loop wired
/// the way a real embedding would wire it: every mutation is forwarded to
/// the registry as soon as it happens.
pub struct Harness {
    pub host: RopeHost,
    pub registry: SessionRegistry,
    pub doc: DocumentId,
}

impl Harness {
    /// A buffer containing `text` with the whole buffer selected, ready for
    /// a first step to anchor the span.
    pub fn with_selection(text: &str) -> Self {
        let mut host = RopeHost::from_text(text);
        host.set_selection(0..text.chars().count());
        Self {
            host,
            registry: SessionRegistry::new(),
            doc: doc(),
        }
    }

    /// An empty-selection buffer; spans only arrive via edits.
    pub fn without_selection(text: &str) -> Self {
        Self {
            host: RopeHost::from_text(text),
            registry: SessionRegistry::new(),
            doc: doc(),
        }
    }

    /// Step and pump the resulting change notification to the registry.
    pub fn step(&mut self, msg: StepMsg) -> Result<(), StepError> {
        let result = self.registry.step(&self.doc, &mut self.host, msg);
        self.pump();
        result
    }

    /// Mutate the buffer as an external actor (typing, another tool).
    pub fn external_edit(&mut self, range: Range<usize>, text: &str) {
        self.host.external_edit(range, text);
        self.pump();
    }

    /// Forward queued change notifications, one notification per event.
    pub fn pump(&mut self) {
        for event in self.host.take_changes() {
            self.registry.handle_change(&self.doc, &[event]);
        }
    }

    /// Deliver several descriptors as a single notification (multi-range
    /// edits from e.g. a formatter).
    pub fn notify_multi(&mut self, events: &[ChangeEvent]) {
        self.registry.handle_change(&self.doc, events);
    }

    pub fn content(&self) -> String {
        self.host.content()
    }
}
