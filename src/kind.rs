//! Link kinds handled by the dialogs.

use std::fmt;
use std::str::FromStr;

use crate::error::LinkError;

// =============================================================================
// LinkType
// =============================================================================

/// The six link kinds, one per dialog.
///
/// The kind decides which attributes are read and written and which
/// normalization rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkType {
    Anchor,
    External,
    Internal,
    Javascript,
    Mailto,
    Media,
}

impl LinkType {
    /// Returns all LinkType variants
    pub const fn all() -> &'static [LinkType] {
        &[
            Self::Anchor,
            Self::External,
            Self::Internal,
            Self::Javascript,
            Self::Mailto,
            Self::Media,
        ]
    }

    /// Canonical `linktype` attribute value
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Anchor => "anchor",
            Self::External => "external",
            Self::Internal => "internal",
            Self::Javascript => "javascript",
            Self::Mailto => "mailto",
            Self::Media => "media",
        }
    }

    /// Whether a stored `linktype` value belongs to this kind.
    ///
    /// Comparison is exact: stored markup always carries the lowercase name.
    pub fn matches(&self, stored: &str) -> bool {
        self.as_str() == stored
    }

    /// Kinds that pick their target from a content tree.
    pub const fn is_tree_backed(&self) -> bool {
        matches!(self, Self::Internal | Self::Media)
    }

    /// Kinds that expose a window target selector.
    pub const fn has_target(&self) -> bool {
        matches!(self, Self::External | Self::Internal | Self::Media)
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkType {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.matches(s))
            .ok_or_else(|| LinkError::UnknownLinkType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for kind in LinkType::all() {
            assert_eq!(kind.as_str().parse::<LinkType>().unwrap(), *kind);
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "ftp".parse::<LinkType>(),
            Err(LinkError::UnknownLinkType("ftp".into()))
        );
        assert!("Anchor".parse::<LinkType>().is_err());
    }

    #[test]
    fn test_kind_capabilities() {
        assert!(LinkType::Internal.is_tree_backed());
        assert!(LinkType::Media.is_tree_backed());
        assert!(!LinkType::External.is_tree_backed());

        assert!(LinkType::External.has_target());
        assert!(!LinkType::Mailto.has_target());
        assert!(!LinkType::Anchor.has_target());
    }
}
