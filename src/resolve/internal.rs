//! Internal link reference resolution.

use tracing::debug;

use crate::config::CodecConfig;
use crate::error::LinkResult;
use crate::form::{BrowseState, FormState, ReferenceSelection};
use crate::item::ItemId;
use crate::kind::LinkType;
use crate::store::ContentStore;

use super::{OpenedReference, selected_id};

/// Resolve a stored internal link into the tree's initial state.
///
/// `link_type` is the stored link's `linktype`. A well-formed id that still
/// resolves opens the tree on the item's parent with the item selected;
/// everything else falls back to a folder derived from `stored_url`.
pub fn resolve_on_open<S: ContentStore + ?Sized>(
    store: &S,
    config: &CodecConfig,
    stored_id: &str,
    stored_url: &str,
    link_type: &str,
) -> OpenedReference {
    let root = config
        .browse_root()
        .unwrap_or(config.repository_prefix.as_str())
        .to_string();

    let Some(id) = ItemId::parse(stored_id) else {
        debug!(stored_id, "internal link id not well-formed, deriving folder from url");
        let folder = fallback_folder(config, stored_url, link_type);
        return OpenedReference::folder(root, folder);
    };

    match store.item_by_id(id) {
        Some(item) => {
            let folder = item.parent_path().unwrap_or(item.path.as_str()).to_string();
            OpenedReference {
                browse: BrowseState::new(root, folder),
                selection: ReferenceSelection::resolved(id, store.display_path(&item)),
            }
        }
        None if !stored_url.trim().is_empty() => {
            debug!(%id, stored_url, "internal link target not found, deriving folder from url");
            let folder = fallback_folder(config, stored_url, link_type);
            OpenedReference::folder(root, folder)
        }
        None => {
            debug!(%id, "internal link target not found and no url stored");
            OpenedReference::folder(root, config.content_root.clone())
        }
    }
}

/// Derive a browse folder from a stored url.
///
/// Links of another kind open on the configured start item. Otherwise an
/// empty url opens the content root, and a url outside the repository is
/// taken as relative to the content root.
pub fn fallback_folder(config: &CodecConfig, stored_url: &str, link_type: &str) -> String {
    if !LinkType::Internal.matches(link_type) {
        return format!("{}{}", config.content_root, config.default_item);
    }
    if stored_url.is_empty() {
        return config.content_root.clone();
    }
    if stored_url.starts_with(config.repository_prefix.as_str()) {
        stored_url.to_string()
    } else {
        format!("{}{}", config.content_root, stored_url)
    }
}

/// The id to store for a confirmed internal link.
pub fn resolve_on_confirm(form: &FormState) -> LinkResult<ItemId> {
    selected_id(form, LinkType::Internal)
}
