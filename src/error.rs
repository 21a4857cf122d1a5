//! Error types for linkform.
//!
//! Every failure here is user-correctable: the dialog surfaces the message and
//! stays open. Lookups that miss are not errors at all; the resolvers recover
//! them with a fallback browse path.

use thiserror::Error;

use crate::kind::LinkType;

/// Errors that can occur while decoding or encoding a link.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// The mailto address does not look like `local@domain.tld`
    #[error("The e-mail address is invalid.")]
    InvalidEmail,

    /// Confirming a tree-backed dialog without a tree selection
    #[error("{}", no_selection_message(*kind))]
    NoSelection {
        /// Dialog kind that required the selection
        kind: LinkType,
    },

    /// A string that should hold an item identifier does not
    #[error("malformed item id: {0:?}")]
    MalformedId(String),

    /// The current user may not create items under the selection
    #[error("You do not have permission to create a new item here.")]
    PermissionDenied,

    /// A form state was handed to the codec of another link kind
    #[error("form state is for '{found}' but '{expected}' was requested")]
    KindMismatch {
        /// Kind requested by the caller
        expected: LinkType,
        /// Kind the form state was decoded as
        found: LinkType,
    },

    /// The field name is not part of this kind's form
    #[error("'{kind}' link has no field '{field}'")]
    UnknownField {
        /// Kind of the form state
        kind: LinkType,
        /// Requested field name
        field: String,
    },

    /// A `linktype` string that names none of the six kinds
    #[error("unknown link type: {0:?}")]
    UnknownLinkType(String),

    /// Stored `<link/>` markup could not be read
    #[error("malformed link markup: {0}")]
    MalformedMarkup(String),
}

/// Result type alias for link operations.
pub type LinkResult<T> = Result<T, LinkError>;

fn no_selection_message(kind: LinkType) -> &'static str {
    match kind {
        LinkType::Media => "Select a media item.",
        _ => "Select an item.",
    }
}

impl LinkError {
    /// Create a markup error with a message.
    pub fn markup(msg: impl Into<String>) -> Self {
        Self::MalformedMarkup(msg.into())
    }

    /// Whether the dialog should show this error and stay open.
    ///
    /// Programming errors (wrong kind, unknown field) are excluded: the UI
    /// layer cannot fix them by asking the user.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidEmail | Self::NoSelection { .. } | Self::MalformedId(_) | Self::PermissionDenied
        )
    }
}
