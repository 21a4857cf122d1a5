//! Content items and their identifiers.
//!
//! Identifiers are GUIDs written in the repository's braced uppercase form,
//! e.g. `{3D6658D8-A0BF-4E75-B3E2-D050FABCF4E1}`. Parsing also accepts the
//! bare hyphenated and simple forms.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::error::LinkError;

// =============================================================================
// ItemId
// =============================================================================

/// Stable identifier of a content item.
///
/// A value of this type is always well-formed; strings from stored markup go
/// through [`ItemId::parse`] and anything that is not a GUID is rejected.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Wrap a raw GUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Derive a deterministic id from an item path.
    ///
    /// Same path always yields the same id, across processes.
    pub fn from_path(path: &str) -> Self {
        let hash = blake3::Hasher::new()
            .update(b"__item__")
            .update(path.as_bytes())
            .finalize();
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&hash.as_bytes()[..16]);
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    /// Parse a stored identifier, `None` when it is not well-formed.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        Uuid::try_parse(s).ok().map(Self)
    }

    /// Whether the string is a well-formed identifier.
    pub fn is_id(s: &str) -> bool {
        Self::parse(s).is_some()
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({self})")
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.0.braced())
    }
}

impl FromStr for ItemId {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| LinkError::MalformedId(s.to_string()))
    }
}

// =============================================================================
// Item
// =============================================================================

/// A content item as seen through the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    /// Full repository path, e.g. `/sitecore/content/Home/About`
    pub path: String,
    pub parent: Option<ItemId>,
    pub has_children: bool,
}

impl Item {
    pub fn new(id: ItemId, path: impl Into<String>) -> Self {
        Self {
            id,
            path: path.into(),
            parent: None,
            has_children: false,
        }
    }

    pub fn with_parent(mut self, parent: ItemId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Item name: the last path segment.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Path of the containing folder, `None` for a root item.
    pub fn parent_path(&self) -> Option<&str> {
        match self.path.rfind('/') {
            Some(0) | None => None,
            Some(pos) => Some(&self.path[..pos]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEDIA_ROOT: &str = "{3D6658D8-A0BF-4E75-B3E2-D050FABCF4E1}";

    #[test]
    fn test_parse_forms() {
        let id = ItemId::parse(MEDIA_ROOT).unwrap();
        assert_eq!(ItemId::parse("3d6658d8-a0bf-4e75-b3e2-d050fabcf4e1"), Some(id));
        assert_eq!(ItemId::parse("3D6658D8A0BF4E75B3E2D050FABCF4E1"), Some(id));
        assert_eq!(id.to_string(), MEDIA_ROOT);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(!ItemId::is_id(""));
        assert!(!ItemId::is_id("   "));
        assert!(!ItemId::is_id("/sitecore/content/home"));
        assert!(!ItemId::is_id("{3D6658D8-A0BF-4E75-B3E2}"));
        assert_eq!(
            "nope".parse::<ItemId>(),
            Err(LinkError::MalformedId("nope".into()))
        );
    }

    #[test]
    fn test_from_path_deterministic() {
        let a = ItemId::from_path("/sitecore/content/home");
        assert_eq!(a, ItemId::from_path("/sitecore/content/home"));
        assert_ne!(a, ItemId::from_path("/sitecore/content/about"));
        assert_eq!(ItemId::parse(&a.to_string()), Some(a));
    }

    #[test]
    fn test_item_paths() {
        let item = Item::new(ItemId::from_path("x"), "/sitecore/content/X/Page");
        assert_eq!(item.name(), "Page");
        assert_eq!(item.parent_path(), Some("/sitecore/content/X"));

        let root = Item::new(ItemId::from_path("r"), "/sitecore");
        assert_eq!(root.parent_path(), None);
        assert_eq!(item.with_parent(root.id).parent, Some(root.id));
    }
}
