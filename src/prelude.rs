//! Prelude module for common imports.
//!
//! ```ignore
//! use linkform::prelude::*;
//! ```

// Kinds and attributes
pub use crate::attr::{AttributeMap, AttributePacket, keys};
pub use crate::kind::LinkType;

// Codec
pub use crate::codec::LinkCodec;
pub use crate::config::CodecConfig;

// Form state
pub use crate::form::{BrowseState, FormState, KindFields, ReferenceSelection};
pub use crate::target::{Target, TargetSelection};

// Collaborators
pub use crate::item::{Item, ItemId};
pub use crate::store::{ContentStore, MediaUrlBuilder, MemoryStore, ThumbnailOptions};

// Previews and scripts
pub use crate::resolve::Thumbnail;
pub use crate::script::{ClientScript, test_script};

// Error
pub use crate::error::{LinkError, LinkResult};
