//! Media link reference resolution and previews.

use tracing::debug;

use crate::config::CodecConfig;
use crate::error::{LinkError, LinkResult};
use crate::form::{BrowseState, FormState, ReferenceSelection};
use crate::item::{Item, ItemId};
use crate::kind::LinkType;
use crate::store::{ContentStore, MediaUrlBuilder, ThumbnailOptions};

use super::{OpenedReference, selected_id};

/// Resolve a stored media link into the tree's initial state.
///
/// The tree is always rooted at the media library. The library root itself
/// never counts as a selection.
pub fn resolve_on_open<S: ContentStore + ?Sized>(
    store: &S,
    config: &CodecConfig,
    stored_id: &str,
    link_type: &str,
) -> OpenedReference {
    let root = config.media_library_root.as_str();
    if !LinkType::Media.matches(link_type) {
        return OpenedReference::folder(root, root);
    }

    let item = ItemId::parse(stored_id)
        .and_then(|id| store.item_by_id(id))
        .filter(|item| item.id != config.media_library_root_id);
    let Some(item) = item else {
        debug!(stored_id, "media link has no usable item, opening library root");
        return OpenedReference::folder(root, root);
    };

    let folder = match item.parent {
        Some(_) => item.parent_path().unwrap_or(root),
        None => root,
    };
    OpenedReference {
        browse: BrowseState::new(root, folder),
        selection: ReferenceSelection::resolved(item.id, media_display_path(store, config, &item)),
    }
}

/// Media-library-relative display path of an item.
pub fn media_display_path<S: ContentStore + ?Sized>(
    store: &S,
    config: &CodecConfig,
    item: &Item,
) -> String {
    config.media_path(&store.display_path(item)).to_string()
}

/// The id to store for a confirmed media link.
pub fn resolve_on_confirm(form: &FormState) -> LinkResult<ItemId> {
    selected_id(form, LinkType::Media)
}

/// The selected item, if the user may upload into it.
pub fn upload_target<S: ContentStore + ?Sized>(store: &S, form: &FormState) -> LinkResult<Item> {
    let id = selected_id(form, LinkType::Media)?;
    let item = store
        .item_by_id(id)
        .ok_or(LinkError::NoSelection { kind: LinkType::Media })?;
    if !store.can_create_children(&item) {
        debug!(%id, "upload refused, no create permission");
        return Err(LinkError::PermissionDenied);
    }
    Ok(item)
}

/// Move the browse folder into the selection when it has children.
///
/// Returns whether the folder changed.
pub fn open_selection<S: ContentStore + ?Sized>(store: &S, form: &mut FormState) -> bool {
    let Some(item) = form
        .reference()
        .and_then(ReferenceSelection::id)
        .and_then(|id| store.item_by_id(id))
        .filter(|item| item.has_children)
    else {
        return false;
    };
    match form.browse_mut() {
        Some(browse) => {
            browse.folder = item.path;
            true
        }
        None => false,
    }
}

/// The folder a new media folder would be created in.
pub fn new_folder_parent<S: ContentStore + ?Sized>(store: &S, form: &FormState) -> Option<Item> {
    form.browse()
        .and_then(|browse| store.item_by_path(&browse.folder))
}

// =============================================================================
// Preview
// =============================================================================

/// Thumbnail shown next to the media tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub stretch: bool,
    pub use_default_icon: bool,
}

impl Thumbnail {
    /// Render the preview `<img>` tag.
    pub fn to_html(&self) -> String {
        format!(
            "<img src=\"{}\" width=\"{}\" height=\"{}\" border=\"0\" alt=\"\" />",
            self.url.replace('"', "&quot;"),
            self.width,
            self.height
        )
    }
}

/// Thumbnail for an item. Display only; never part of the packet.
pub fn derive_preview<U: MediaUrlBuilder + ?Sized>(
    urls: &U,
    config: &CodecConfig,
    item: &Item,
) -> Thumbnail {
    let options = ThumbnailOptions::square(config.thumbnail_size);
    Thumbnail {
        url: urls.thumbnail_url(item, &options),
        width: options.width,
        height: options.height,
        stretch: options.allow_stretch,
        use_default_icon: options.use_default_icon,
    }
}

/// The item a preview should show: the selection, else the browse folder.
pub fn preview_item<S: ContentStore + ?Sized>(store: &S, form: &FormState) -> Option<Item> {
    form.reference()
        .and_then(ReferenceSelection::id)
        .and_then(|id| store.item_by_id(id))
        .or_else(|| new_folder_parent(store, form))
}
