//! Reference resolvers for the tree-backed link kinds.
//!
//! - `internal`: content tree items
//! - `media`: media library items and their previews
//!
//! Both resolve a stored `id` into an initial browse position when a dialog
//! opens, and turn the tree selection back into an id on confirm. A stored id
//! that is malformed or no longer resolves is never an error here: the dialog
//! simply opens on a fallback folder.

pub mod internal;
pub mod media;

use crate::error::{LinkError, LinkResult};
use crate::form::{BrowseState, FormState, ReferenceSelection};
use crate::item::ItemId;
use crate::kind::LinkType;

pub use media::Thumbnail;

/// Initial tree state computed when a dialog opens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenedReference {
    pub browse: BrowseState,
    /// The stored item, pre-selected when it still resolves
    pub selection: ReferenceSelection,
}

impl OpenedReference {
    /// Open on a folder with nothing selected.
    pub fn folder(root: impl Into<String>, folder: impl Into<String>) -> Self {
        Self {
            browse: BrowseState::new(root, folder),
            selection: ReferenceSelection::Unresolved,
        }
    }
}

/// The id of the current tree selection, or the kind's "select an item" error.
pub(crate) fn selected_id(form: &FormState, kind: LinkType) -> LinkResult<ItemId> {
    form.reference()
        .and_then(ReferenceSelection::id)
        .ok_or(LinkError::NoSelection { kind })
}
