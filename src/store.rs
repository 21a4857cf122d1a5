//! Collaborator interfaces for the content repository and media URLs.
//!
//! The codec only ever calls these as black boxes. [`MemoryStore`] is a
//! self-contained implementation for tests and embedders without a real
//! repository.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::item::{Item, ItemId};

// =============================================================================
// Traits
// =============================================================================

/// Read access to the content repository.
///
/// Lookups are plain blocking calls. A miss is a normal outcome.
pub trait ContentStore {
    /// Look up an item by id.
    fn item_by_id(&self, id: ItemId) -> Option<Item>;

    /// Look up an item by full path.
    fn item_by_path(&self, path: &str) -> Option<Item>;

    /// Path shown to the user for a selected item.
    fn display_path(&self, item: &Item) -> String {
        item.path.clone()
    }

    /// Whether the current user may create children under `item`.
    fn can_create_children(&self, item: &Item) -> bool;
}

/// Options for a media thumbnail URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailOptions {
    pub width: u32,
    pub height: u32,
    pub allow_stretch: bool,
    /// Fall back to the item type's icon when the item has no image.
    pub use_default_icon: bool,
}

impl ThumbnailOptions {
    /// Square, non-stretched thumbnail with icon fallback.
    pub fn square(size: u32) -> Self {
        Self {
            width: size,
            height: size,
            allow_stretch: false,
            use_default_icon: true,
        }
    }
}

/// Builds URLs for media items.
pub trait MediaUrlBuilder {
    fn thumbnail_url(&self, item: &Item, options: &ThumbnailOptions) -> String;
}

impl<T: ContentStore + ?Sized> ContentStore for &T {
    fn item_by_id(&self, id: ItemId) -> Option<Item> {
        (**self).item_by_id(id)
    }

    fn item_by_path(&self, path: &str) -> Option<Item> {
        (**self).item_by_path(path)
    }

    fn display_path(&self, item: &Item) -> String {
        (**self).display_path(item)
    }

    fn can_create_children(&self, item: &Item) -> bool {
        (**self).can_create_children(item)
    }
}

impl<T: MediaUrlBuilder + ?Sized> MediaUrlBuilder for &T {
    fn thumbnail_url(&self, item: &Item, options: &ThumbnailOptions) -> String {
        (**self).thumbnail_url(item, options)
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory repository keyed by path.
///
/// Ids are derived from paths with [`ItemId::from_path`], so the same tree
/// always has the same ids.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: FxHashMap<ItemId, Item>,
    by_path: FxHashMap<String, ItemId>,
    read_only: FxHashSet<ItemId>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item at `path`, creating missing ancestors. Returns its id.
    ///
    /// Re-inserting an existing path keeps its id.
    pub fn insert(&mut self, path: &str) -> ItemId {
        let path = path.trim_end_matches('/');
        match self.by_path.get(path) {
            Some(&existing) => existing,
            None => self.add(path, ItemId::from_path(path)),
        }
    }

    /// Add an item with an explicit id, creating missing ancestors.
    ///
    /// An item already at `path`, such as an ancestor created by an earlier
    /// insert, takes the new id and its children follow.
    pub fn insert_with_id(&mut self, path: &str, id: ItemId) -> ItemId {
        let path = path.trim_end_matches('/');
        match self.by_path.get(path) {
            Some(&existing) if existing != id => {
                self.rekey(existing, id);
                id
            }
            Some(_) => id,
            None => self.add(path, id),
        }
    }

    fn add(&mut self, path: &str, id: ItemId) -> ItemId {
        let mut item = Item::new(id, path);
        if let Some(parent_path) = item.parent_path().map(str::to_string) {
            let parent = self.insert(&parent_path);
            if let Some(parent_item) = self.items.get_mut(&parent) {
                parent_item.has_children = true;
            }
            item = item.with_parent(parent);
        }

        self.by_path.insert(path.to_string(), id);
        self.items.insert(id, item);
        id
    }

    fn rekey(&mut self, old: ItemId, new: ItemId) {
        let Some(mut item) = self.items.remove(&old) else {
            return;
        };
        item.id = new;
        self.by_path.insert(item.path.clone(), new);
        self.items.insert(new, item);

        for child in self.items.values_mut() {
            if child.parent == Some(old) {
                child.parent = Some(new);
            }
        }
        if self.read_only.remove(&old) {
            self.read_only.insert(new);
        }
    }

    /// Deny child creation under an item.
    pub fn set_read_only(&mut self, id: ItemId) {
        self.read_only.insert(id);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ContentStore for MemoryStore {
    fn item_by_id(&self, id: ItemId) -> Option<Item> {
        self.items.get(&id).cloned()
    }

    fn item_by_path(&self, path: &str) -> Option<Item> {
        self.by_path
            .get(path.trim_end_matches('/'))
            .and_then(|id| self.items.get(id))
            .cloned()
    }

    fn can_create_children(&self, item: &Item) -> bool {
        !self.read_only.contains(&item.id)
    }
}

impl MediaUrlBuilder for MemoryStore {
    fn thumbnail_url(&self, item: &Item, options: &ThumbnailOptions) -> String {
        let mut url = format!(
            "/-/media/{}.ashx?thn=1&w={}&h={}",
            item.id.as_uuid().simple(),
            options.width,
            options.height
        );
        if options.allow_stretch {
            url.push_str("&as=1");
        }
        if options.use_default_icon {
            url.push_str("&dmc=0");
        }
        url
    }
}
