//! spanstep - step through text word-by-word or line-by-line.
//!
//! Given a span of text that was just inserted or selected, this crate lets
//! a user incrementally reveal or retract that span in token-sized steps.
//! The span is tokenized into words and lines, trimmed down to a starting
//! prefix, and then grown or shrunk one increment per command while the
//! hidden remainder is held outside the live buffer.
//!
//! Editor integration is a thin shim over two seams: the [`EditHost`] trait
//! (reading text, converting positions, applying edits) and the
//! [`SessionRegistry`] lifecycle hooks (change notifications, document
//! close and rename).

pub mod config;
pub mod error;
pub mod host;
pub mod messages;
pub mod registry;
pub mod session;
pub mod tokenize;
pub mod trace;

// Re-export commonly used types
pub use config::StepConfig;
pub use error::StepError;
pub use host::{ChangeEvent, Edit, EditHost, Position, RopeHost};
pub use messages::StepMsg;
pub use registry::{DocumentId, SessionRegistry};
pub use session::{Session, StepState};
pub use tokenize::{tokenize, Token};
