//! Repository layout the resolvers browse against.

use crate::item::ItemId;
use uuid::uuid;

// =============================================================================
// CodecConfig
// =============================================================================

/// Prefix shared by every repository path.
pub const DEFAULT_REPOSITORY_PREFIX: &str = "/sitecore";
/// Root of the content tree.
pub const DEFAULT_CONTENT_ROOT: &str = "/sitecore/content";
/// Start item, relative to the content root.
pub const DEFAULT_ITEM: &str = "/home";
/// Root of the media library tree.
pub const DEFAULT_MEDIA_LIBRARY_ROOT: &str = "/sitecore/media library";
/// Identifier of the media library root pseudo-item.
pub const MEDIA_LIBRARY_ROOT_ID: ItemId =
    ItemId::from_uuid(uuid!("3D6658D8-A0BF-4E75-B3E2-D050FABCF4E1"));
/// Edge length of media previews, in pixels.
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 96;

/// Configuration for decoding and encoding links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Paths starting with this are already absolute repository paths.
    pub repository_prefix: String,
    /// Root of the content tree; relative internal urls hang off it.
    pub content_root: String,
    /// Start item used when an internal dialog opens on another link kind.
    pub default_item: String,
    /// Root of the media tree.
    pub media_library_root: String,
    /// Id of the media root, which never counts as a selection.
    pub media_library_root_id: ItemId,
    /// Tree root override for the internal dialog (empty: no override).
    pub browse_root: String,
    /// Edge length of media previews.
    pub thumbnail_size: u32,
}

impl CodecConfig {
    pub fn new() -> Self {
        Self {
            repository_prefix: DEFAULT_REPOSITORY_PREFIX.to_string(),
            content_root: DEFAULT_CONTENT_ROOT.to_string(),
            default_item: DEFAULT_ITEM.to_string(),
            media_library_root: DEFAULT_MEDIA_LIBRARY_ROOT.to_string(),
            media_library_root_id: MEDIA_LIBRARY_ROOT_ID,
            browse_root: String::new(),
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
        }
    }

    /// Set the start item used for links of another kind.
    pub fn with_default_item(mut self, path: impl Into<String>) -> Self {
        self.default_item = path.into();
        self
    }

    /// Restrict the internal link tree to a subtree.
    pub fn with_browse_root(mut self, path: impl Into<String>) -> Self {
        self.browse_root = path.into();
        self
    }

    /// Use a different media library location.
    pub fn with_media_library(mut self, path: impl Into<String>, root_id: ItemId) -> Self {
        self.media_library_root = path.into();
        self.media_library_root_id = root_id;
        self
    }

    pub fn with_thumbnail_size(mut self, size: u32) -> Self {
        self.thumbnail_size = size;
        self
    }

    /// Tree root override, if one is set.
    pub fn browse_root(&self) -> Option<&str> {
        if self.browse_root.is_empty() {
            None
        } else {
            Some(&self.browse_root)
        }
    }

    /// Path of an item relative to the media library, for display.
    pub fn media_path<'a>(&self, path: &'a str) -> &'a str {
        path.strip_prefix(self.media_library_root.as_str())
            .unwrap_or(path)
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::new()
    }
}
