//! Administration workflows on top of the content document.
//!
//! `ContentModel` owns the edited document, `forms` validates what the
//! administrator typed, `render` turns the document into HTML fragments
//! and `sync` keeps cache, server and published site aligned.

pub mod forms;
pub mod model;
pub mod render;
pub mod sync;

pub use forms::{FormRecord, ModalController, ModalMode, ModalState, SubmitOutcome, ValidationError};
pub use model::{ContentModel, LoadSource, ModelError};
pub use sync::{SyncCoordinator, SyncError, SYNC_INTERVAL};

/// Transient feedback shown after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Error(String),
    Warning(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(message) | Notice::Error(message) | Notice::Warning(message) => {
                message
            }
        }
    }

    /// Banner class in the panel
    pub fn css_class(&self) -> &'static str {
        match self {
            Notice::Success(_) => "admin-message admin-success-message",
            Notice::Error(_) => "admin-message admin-error-message",
            Notice::Warning(_) => "admin-message admin-warning-message",
        }
    }

    /// Status symbol used by the CLI
    pub fn symbol(&self) -> &'static str {
        match self {
            Notice::Success(_) => "✓",
            Notice::Error(_) => "✗",
            Notice::Warning(_) => "!",
        }
    }
}
