//! Window target resolution.
//!
//! Maps the raw HTML `target` attribute to the symbolic choices offered by the
//! dialog's target selector, and back.

use std::fmt;
use std::str::FromStr;

// =============================================================================
// Target
// =============================================================================

/// Symbolic window target shown in the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Target {
    #[default]
    Same,
    NewWindow,
    ParentWindow,
    TopWindow,
    Custom,
}

impl Target {
    /// Raw attribute value for the fixed targets, `None` for `Custom`.
    pub const fn raw(&self) -> Option<&'static str> {
        match self {
            Self::Same => Some(""),
            Self::NewWindow => Some("_blank"),
            Self::ParentWindow => Some("_parent"),
            Self::TopWindow => Some("_top"),
            Self::Custom => None,
        }
    }

    /// Look up a raw attribute value in the fixed table.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "" | SELF_TARGET => Self::Same,
            "_blank" => Self::NewWindow,
            "_parent" => Self::ParentWindow,
            "_top" => Self::TopWindow,
            _ => Self::Custom,
        }
    }

    /// Option name used by the selector control
    pub const fn option_name(&self) -> &'static str {
        match self {
            Self::Same => "Self",
            Self::NewWindow => "New",
            Self::ParentWindow => "Parent",
            Self::TopWindow => "Top",
            Self::Custom => "Custom",
        }
    }
}

const SELF_TARGET: &str = "_self";

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.option_name())
    }
}

/// Error for a selector option name that is not one of the five targets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown target option: {0:?}")]
pub struct UnknownTarget(pub String);

impl FromStr for Target {
    type Err = UnknownTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Self" => Ok(Self::Same),
            "New" => Ok(Self::NewWindow),
            "Parent" => Ok(Self::ParentWindow),
            "Top" => Ok(Self::TopWindow),
            "Custom" => Ok(Self::Custom),
            other => Err(UnknownTarget(other.to_string())),
        }
    }
}

// =============================================================================
// TargetSelection
// =============================================================================

/// Current state of a dialog's target selector plus the custom target input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSelection {
    target: Target,
    custom: String,
    /// Decoded from an explicit `_self`; dropped once the user picks a target.
    explicit_self: bool,
}

impl TargetSelection {
    /// A fixed selection with an empty custom text.
    pub fn new(target: Target) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    /// A custom selection with the given target text.
    pub fn custom(text: impl Into<String>) -> Self {
        Self {
            target: Target::Custom,
            custom: text.into(),
            explicit_self: false,
        }
    }

    pub fn target(&self) -> Target {
        self.target
    }

    /// Custom target text, empty unless `Custom` is selected.
    pub fn custom_text(&self) -> &str {
        &self.custom
    }

    /// Whether the custom target input accepts text.
    pub fn custom_enabled(&self) -> bool {
        self.target == Target::Custom
    }

    /// Select a target the way the selector's change handler does.
    ///
    /// Choosing `Custom` keeps the custom text editable; any other choice
    /// clears it.
    pub fn select(&mut self, target: Target) {
        self.target = target;
        self.explicit_self = false;
        if target != Target::Custom {
            self.custom.clear();
        }
    }

    /// Update the custom target text. Ignored unless `Custom` is selected.
    pub fn set_custom_text(&mut self, text: impl Into<String>) {
        if self.custom_enabled() {
            self.custom = text.into();
        }
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Resolve a raw `target` attribute into the selector state.
///
/// Unknown non-empty values become `Custom` with the raw text kept verbatim.
pub fn resolve_display(raw: &str) -> TargetSelection {
    match Target::from_raw(raw) {
        Target::Custom => TargetSelection::custom(raw),
        target => TargetSelection {
            target,
            custom: String::new(),
            explicit_self: raw == SELF_TARGET,
        },
    }
}

/// Resolve the selector state back into a raw `target` attribute.
pub fn resolve_attribute(selection: &TargetSelection) -> String {
    if selection.explicit_self && selection.target == Target::Same {
        return SELF_TARGET.to_string();
    }
    match selection.target.raw() {
        Some(raw) => raw.to_string(),
        None => selection.custom.clone(),
    }
}
