//! Message types for the stepping commands.

/// One step operation, as dispatched by the surrounding command layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMsg {
    /// Reveal the next word token
    NextWord,
    /// Hide the last visible word token
    PrevWord,
    /// Reveal through the next line token
    NextLine,
    /// Hide back to the previous line token
    PrevLine,
}

impl StepMsg {
    /// Check if this step reveals text (moves the cursor forward)
    pub fn is_forward(&self) -> bool {
        matches!(self, StepMsg::NextWord | StepMsg::NextLine)
    }

    /// Check if this step moves by whole lines rather than single words
    pub fn is_line(&self) -> bool {
        matches!(self, StepMsg::NextLine | StepMsg::PrevLine)
    }
}
