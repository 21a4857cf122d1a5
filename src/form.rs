//! Editable state of one open link dialog.
//!
//! A [`FormState`] holds the shared `text`/`title`/`class` fields plus a
//! [`KindFields`] variant that carries only what its link kind edits. The UI
//! layer mutates it through the explicit setters below and hands it back to
//! the codec on confirm.

use crate::error::{LinkError, LinkResult};
use crate::item::ItemId;
use crate::kind::LinkType;
use crate::target::{Target, TargetSelection};

/// Field names accepted by [`FormState::field`] and [`FormState::set_field`].
pub mod fields {
    pub const TEXT: &str = "text";
    pub const TITLE: &str = "title";
    pub const CLASS: &str = "class";
    pub const URL: &str = "url";
    pub const ANCHOR: &str = "anchor";
    pub const QUERYSTRING: &str = "querystring";
    pub const CUSTOM_TARGET: &str = "customtarget";
}

// =============================================================================
// ReferenceSelection / BrowseState
// =============================================================================

/// The item picked in a tree-backed dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReferenceSelection {
    #[default]
    Unresolved,
    Resolved {
        id: ItemId,
        /// Path shown to the user
        path: String,
    },
}

impl ReferenceSelection {
    pub fn resolved(id: ItemId, path: impl Into<String>) -> Self {
        Self::Resolved {
            id,
            path: path.into(),
        }
    }

    pub fn id(&self) -> Option<ItemId> {
        match self {
            Self::Resolved { id, .. } => Some(*id),
            Self::Unresolved => None,
        }
    }

    /// Display path, empty when unresolved.
    pub fn path(&self) -> &str {
        match self {
            Self::Resolved { path, .. } => path,
            Self::Unresolved => "",
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// Where a tree picker starts browsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseState {
    /// Topmost item the tree shows.
    pub root: String,
    /// Container currently displayed.
    pub folder: String,
}

impl BrowseState {
    pub fn new(root: impl Into<String>, folder: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            folder: folder.into(),
        }
    }
}

// =============================================================================
// KindFields
// =============================================================================

/// Per-kind editable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindFields {
    Anchor {
        /// Fragment as displayed, with its `#`
        url: String,
    },
    External {
        url: String,
        target: TargetSelection,
    },
    Internal {
        anchor: String,
        querystring: String,
        target: TargetSelection,
        browse: BrowseState,
        selection: ReferenceSelection,
    },
    Javascript {
        url: String,
    },
    Mailto {
        url: String,
    },
    Media {
        target: TargetSelection,
        browse: BrowseState,
        selection: ReferenceSelection,
    },
}

impl KindFields {
    /// Blank fields for a kind.
    pub fn empty(kind: LinkType) -> Self {
        match kind {
            LinkType::Anchor => Self::Anchor { url: String::new() },
            LinkType::External => Self::External {
                url: String::new(),
                target: TargetSelection::default(),
            },
            LinkType::Internal => Self::Internal {
                anchor: String::new(),
                querystring: String::new(),
                target: TargetSelection::default(),
                browse: BrowseState::default(),
                selection: ReferenceSelection::default(),
            },
            LinkType::Javascript => Self::Javascript { url: String::new() },
            LinkType::Mailto => Self::Mailto { url: String::new() },
            LinkType::Media => Self::Media {
                target: TargetSelection::default(),
                browse: BrowseState::default(),
                selection: ReferenceSelection::default(),
            },
        }
    }

    pub fn kind(&self) -> LinkType {
        match self {
            Self::Anchor { .. } => LinkType::Anchor,
            Self::External { .. } => LinkType::External,
            Self::Internal { .. } => LinkType::Internal,
            Self::Javascript { .. } => LinkType::Javascript,
            Self::Mailto { .. } => LinkType::Mailto,
            Self::Media { .. } => LinkType::Media,
        }
    }
}

// =============================================================================
// FormState
// =============================================================================

/// Editable state of one dialog instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub text: String,
    pub title: String,
    pub class: String,
    pub fields: KindFields,
}

impl FormState {
    /// A blank form for a kind.
    pub fn empty(kind: LinkType) -> Self {
        Self::with_fields(KindFields::empty(kind))
    }

    pub fn with_fields(fields: KindFields) -> Self {
        Self {
            text: String::new(),
            title: String::new(),
            class: String::new(),
            fields,
        }
    }

    pub fn kind(&self) -> LinkType {
        self.fields.kind()
    }

    /// Read a field by name.
    pub fn field(&self, name: &str) -> LinkResult<&str> {
        match name {
            fields::TEXT => return Ok(self.text.as_str()),
            fields::TITLE => return Ok(self.title.as_str()),
            fields::CLASS => return Ok(self.class.as_str()),
            _ => {}
        }
        let value = match (&self.fields, name) {
            (
                KindFields::Anchor { url }
                | KindFields::External { url, .. }
                | KindFields::Javascript { url }
                | KindFields::Mailto { url },
                fields::URL,
            ) => url,
            (KindFields::Internal { anchor, .. }, fields::ANCHOR) => anchor,
            (KindFields::Internal { querystring, .. }, fields::QUERYSTRING) => querystring,
            (
                KindFields::External { target, .. }
                | KindFields::Internal { target, .. }
                | KindFields::Media { target, .. },
                fields::CUSTOM_TARGET,
            ) => return Ok(target.custom_text()),
            _ => return Err(unknown_field(self.kind(), name)),
        };
        Ok(value.as_str())
    }

    /// Write a field by name, as the UI does on user edits.
    ///
    /// The custom target only accepts text while `Custom` is selected.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> LinkResult<()> {
        let kind = self.kind();
        let value = value.into();
        let slot = match name {
            fields::TEXT => &mut self.text,
            fields::TITLE => &mut self.title,
            fields::CLASS => &mut self.class,
            _ => match (&mut self.fields, name) {
                (
                    KindFields::Anchor { url }
                    | KindFields::External { url, .. }
                    | KindFields::Javascript { url }
                    | KindFields::Mailto { url },
                    fields::URL,
                ) => url,
                (KindFields::Internal { anchor, .. }, fields::ANCHOR) => anchor,
                (KindFields::Internal { querystring, .. }, fields::QUERYSTRING) => querystring,
                (
                    KindFields::External { target, .. }
                    | KindFields::Internal { target, .. }
                    | KindFields::Media { target, .. },
                    fields::CUSTOM_TARGET,
                ) => {
                    target.set_custom_text(value);
                    return Ok(());
                }
                _ => return Err(unknown_field(kind, name)),
            },
        };
        *slot = value;
        Ok(())
    }

    /// Target selector state, `None` for kinds without a target.
    pub fn target_selection(&self) -> Option<&TargetSelection> {
        match &self.fields {
            KindFields::External { target, .. }
            | KindFields::Internal { target, .. }
            | KindFields::Media { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Change the target selector (the selector's change handler).
    pub fn set_target_selection(&mut self, choice: Target) -> LinkResult<()> {
        let kind = self.kind();
        match &mut self.fields {
            KindFields::External { target, .. }
            | KindFields::Internal { target, .. }
            | KindFields::Media { target, .. } => {
                target.select(choice);
                Ok(())
            }
            _ => Err(unknown_field(kind, "target")),
        }
    }

    /// Tree picker state, `None` for kinds without a tree.
    pub fn browse(&self) -> Option<&BrowseState> {
        match &self.fields {
            KindFields::Internal { browse, .. } | KindFields::Media { browse, .. } => Some(browse),
            _ => None,
        }
    }

    pub(crate) fn browse_mut(&mut self) -> Option<&mut BrowseState> {
        match &mut self.fields {
            KindFields::Internal { browse, .. } | KindFields::Media { browse, .. } => Some(browse),
            _ => None,
        }
    }

    /// Current tree selection, `None` for kinds without a tree.
    pub fn reference(&self) -> Option<&ReferenceSelection> {
        match &self.fields {
            KindFields::Internal { selection, .. } | KindFields::Media { selection, .. } => {
                Some(selection)
            }
            _ => None,
        }
    }

    /// Record the tree selection (the tree's selection-changed handler).
    pub fn set_browse_selection(&mut self, item: ReferenceSelection) -> LinkResult<()> {
        let kind = self.kind();
        match &mut self.fields {
            KindFields::Internal { selection, .. } | KindFields::Media { selection, .. } => {
                *selection = item;
                Ok(())
            }
            _ => Err(unknown_field(kind, "selection")),
        }
    }
}

fn unknown_field(kind: LinkType, name: &str) -> LinkError {
    LinkError::UnknownField {
        kind,
        field: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_form_per_kind() {
        for kind in LinkType::all() {
            let form = FormState::empty(*kind);
            assert_eq!(form.kind(), *kind);
            assert_eq!(form.field("text").unwrap(), "");
            assert_eq!(form.browse().is_some(), kind.is_tree_backed());
            assert_eq!(form.target_selection().is_some(), kind.has_target());
        }
    }

    #[test]
    fn test_fields_by_name() {
        let mut form = FormState::empty(LinkType::Internal);
        form.set_field("anchor", "section").unwrap();
        form.set_field("querystring", "?a=1").unwrap();
        form.set_field("class", "btn").unwrap();
        assert_eq!(form.field("anchor").unwrap(), "section");
        assert_eq!(form.field("querystring").unwrap(), "?a=1");
        assert_eq!(form.class, "btn");

        assert_eq!(
            form.set_field("url", "x"),
            Err(LinkError::UnknownField {
                kind: LinkType::Internal,
                field: "url".into()
            })
        );
        assert!(FormState::empty(LinkType::Anchor).field("anchor").is_err());
    }

    #[test]
    fn test_custom_target_follows_selector() {
        let mut form = FormState::empty(LinkType::External);
        form.set_field("customtarget", "frame").unwrap();
        assert_eq!(form.field("customtarget").unwrap(), "");

        form.set_target_selection(Target::Custom).unwrap();
        form.set_field("customtarget", "frame").unwrap();
        assert_eq!(form.field("customtarget").unwrap(), "frame");

        form.set_target_selection(Target::TopWindow).unwrap();
        assert_eq!(form.field("customtarget").unwrap(), "");
    }

    #[test]
    fn test_target_on_kind_without_target() {
        let mut form = FormState::empty(LinkType::Mailto);
        assert!(form.target_selection().is_none());
        assert!(form.set_target_selection(Target::NewWindow).is_err());
    }

    #[test]
    fn test_browse_selection() {
        let id = ItemId::from_path("/sitecore/content/A");
        let mut form = FormState::empty(LinkType::Media);
        assert!(!form.reference().unwrap().is_resolved());

        form.set_browse_selection(ReferenceSelection::resolved(id, "/A")).unwrap();
        assert_eq!(form.reference().unwrap().id(), Some(id));
        assert_eq!(form.reference().unwrap().path(), "/A");

        let mut anchor = FormState::empty(LinkType::Anchor);
        assert!(anchor.set_browse_selection(ReferenceSelection::Unresolved).is_err());
    }

    #[test]
    fn test_form_is_send_sync() {
        static_assertions::assert_impl_all!(FormState: Send, Sync);
    }
}
