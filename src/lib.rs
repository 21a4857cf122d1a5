//! linkform - Link descriptor codec for rich-text link dialogs
//!
//! ## Core Concepts
//!
//! A rich-text link is stored as a `<link/>` element whose attributes describe
//! one of six kinds: anchor, external, internal, javascript, mailto or media.
//! Each kind has a dialog. Opening a dialog **decodes** the stored attributes
//! into an editable [`FormState`]; confirming it **encodes** the state back
//! into a canonical [`AttributePacket`].
//!
//! ## Modules
//! - `kind`: the six link kinds
//! - `attr`: stored attribute maps, output packets, `<link/>` markup
//! - `target`: window target resolution
//! - `url`: per-kind url normalization and e-mail validation
//! - `resolve`: internal/media reference resolution and previews
//! - `form`: per-dialog editable state
//! - `codec`: decode/encode orchestration
//! - `store`: collaborator traits and an in-memory store
//! - `script`: client-side scripts for test actions
//!
//! ## Usage
//!
//! ```
//! use linkform::{AttributeMap, CodecConfig, LinkCodec, LinkType, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let config = CodecConfig::default();
//! let codec = LinkCodec::new(&store, &config);
//!
//! let stored = AttributeMap::from_markup(r#"<link linktype="external" url="example.com" />"#).unwrap();
//! let mut form = codec.decode(LinkType::External, &stored);
//! form.set_field("text", "Example").unwrap();
//!
//! let packet = codec.encode(LinkType::External, &form).unwrap();
//! assert_eq!(packet.get("url"), Some("http://example.com"));
//! ```

// =============================================================================
// Core modules
// =============================================================================

/// Link kinds
pub mod kind;

/// Attribute maps and packets
pub mod attr;

/// Window target resolution
pub mod target;

/// URL normalization
pub mod url;

/// Item identifiers
pub mod item;

/// Collaborator interfaces
pub mod store;

/// Resolver configuration
pub mod config;

/// Reference resolvers
pub mod resolve;

/// Editable form state
pub mod form;

/// Decode/encode orchestration
pub mod codec;

/// Client-side scripts
pub mod script;

/// Error types
pub mod error;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

pub use attr::{AttributeMap, AttributePacket};
pub use codec::LinkCodec;
pub use config::CodecConfig;
pub use error::{LinkError, LinkResult};
pub use form::{BrowseState, FormState, KindFields, ReferenceSelection};
pub use item::{Item, ItemId};
pub use kind::LinkType;
pub use resolve::Thumbnail;
pub use script::ClientScript;
pub use store::{ContentStore, MediaUrlBuilder, MemoryStore, ThumbnailOptions};
pub use target::{Target, TargetSelection};

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MEDIA_LIBRARY_ROOT_ID;

    fn fixture() -> (MemoryStore, CodecConfig) {
        let mut store = MemoryStore::new();
        store.insert("/sitecore/content/Home/About");
        store.insert_with_id("/sitecore/media library", MEDIA_LIBRARY_ROOT_ID);
        store.insert("/sitecore/media library/Files/brochure");
        (store, CodecConfig::default())
    }

    /// Keys each kind writes and reads back.
    fn relevant_keys(kind: LinkType) -> &'static [&'static str] {
        match kind {
            LinkType::Anchor => &["linktype", "text", "anchor", "title", "class"],
            LinkType::External => &["linktype", "text", "url", "title", "class", "target"],
            LinkType::Internal => &[
                "linktype", "text", "anchor", "title", "class", "querystring", "target", "id",
            ],
            LinkType::Javascript | LinkType::Mailto => &["linktype", "text", "url", "title", "class"],
            LinkType::Media => &["linktype", "text", "title", "class", "target", "id"],
        }
    }

    fn edited_form<S: ContentStore>(codec: &LinkCodec<'_, S>, store: &MemoryStore, kind: LinkType) -> FormState {
        let mut form = codec.decode(kind, &AttributeMap::new());
        form.set_field("text", "Click me").unwrap();
        form.set_field("title", "A \"title\"").unwrap();
        form.set_field("class", "btn primary").unwrap();
        match kind {
            LinkType::Anchor => form.set_field("url", "#section-2").unwrap(),
            LinkType::External => {
                form.set_field("url", "www.example.com/a?b=c&d").unwrap();
                form.set_target_selection(Target::Custom).unwrap();
                form.set_field("customtarget", "preview").unwrap();
            }
            LinkType::Internal => {
                let about = store.item_by_path("/sitecore/content/Home/About").unwrap();
                codec.select_item(&mut form, Some(&about)).unwrap();
                form.set_field("anchor", "team").unwrap();
                form.set_field("querystring", "?lang=en").unwrap();
                form.set_target_selection(Target::NewWindow).unwrap();
            }
            LinkType::Javascript => form.set_field("url", "openPopup('x')").unwrap(),
            LinkType::Mailto => form.set_field("url", "jane.doe@example.com").unwrap(),
            LinkType::Media => {
                let file = store.item_by_path("/sitecore/media library/Files/brochure").unwrap();
                codec.select_item(&mut form, Some(&file)).unwrap();
                form.set_target_selection(Target::TopWindow).unwrap();
            }
        }
        form
    }

    #[test]
    fn test_round_trip_all_kinds() {
        let (store, config) = fixture();
        let codec = LinkCodec::new(&store, &config);

        for &kind in LinkType::all() {
            let first = codec.encode(kind, &edited_form(&codec, &store, kind)).unwrap();

            // Through markup, as the editor stores it
            let stored = AttributeMap::from_markup(&first.to_markup()).unwrap();
            let form = codec.decode(kind, &stored);
            let second = codec.encode(kind, &form).unwrap();

            for key in relevant_keys(kind) {
                assert_eq!(first.get(key), second.get(key), "{kind}: key {key}");
                assert!(first.contains(key), "{kind}: missing {key}");
            }
            assert_eq!(first, second, "{kind}: packet changed on round trip");
        }
    }

    #[test]
    fn test_prefix_applied_once() {
        let (store, config) = fixture();
        let codec = LinkCodec::new(&store, &config);

        for (kind, input, expected) in [
            (LinkType::External, "example.com", "http://example.com"),
            (LinkType::External, "http://example.com", "http://example.com"),
            (LinkType::Javascript, "go()", "javascript:go()"),
            (LinkType::Javascript, "javascript:go()", "javascript:go()"),
            (LinkType::Mailto, "a@b.co", "mailto:a@b.co"),
            (LinkType::Mailto, "mailto:a@b.co", "mailto:a@b.co"),
            (LinkType::Mailto, "", ""),
        ] {
            let mut form = FormState::empty(kind);
            form.set_field("url", input).unwrap();
            let packet = codec.encode(kind, &form).unwrap();
            assert_eq!(packet.get("url"), Some(expected), "{kind}: {input}");
        }
    }

    #[test]
    fn test_every_packet_has_linktype() {
        let (store, config) = fixture();
        let codec = LinkCodec::new(&store, &config);
        for &kind in LinkType::all() {
            let packet = codec.encode(kind, &edited_form(&codec, &store, kind)).unwrap();
            assert_eq!(packet.get("linktype"), Some(kind.as_str()));
        }
    }

    #[test]
    fn test_public_types_are_send_sync() {
        static_assertions::assert_impl_all!(AttributeMap: Send, Sync);
        static_assertions::assert_impl_all!(AttributePacket: Send, Sync);
        static_assertions::assert_impl_all!(MemoryStore: Send, Sync);
        static_assertions::assert_impl_all!(LinkCodec<'static, MemoryStore>: Send, Sync);
    }
}
