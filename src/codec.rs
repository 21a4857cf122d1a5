//! Link descriptor codec.
//!
//! [`LinkCodec::decode`] turns stored attributes into a [`FormState`] when a
//! dialog opens; [`LinkCodec::encode`] turns the edited state back into the
//! canonical [`AttributePacket`] when it is confirmed.
//!
//! # Packet layout
//!
//! | Kind | Keys |
//! |---|---|
//! | anchor | text, linktype, url, anchor, title, class |
//! | external | text, linktype, url, anchor, title, class, target |
//! | internal | text, linktype, anchor, title, class, querystring, target, id |
//! | javascript | text, linktype, url, anchor, title, class |
//! | mailto | text, linktype, url, anchor, title, class |
//! | media | text, linktype, title, class, target, id |

use tracing::{debug, trace};

use crate::attr::{AttributeMap, AttributePacket, keys};
use crate::config::CodecConfig;
use crate::error::{LinkError, LinkResult};
use crate::form::{FormState, KindFields, ReferenceSelection};
use crate::item::Item;
use crate::kind::LinkType;
use crate::resolve::{Thumbnail, internal, media};
use crate::store::{ContentStore, MediaUrlBuilder};
use crate::target;
use crate::url;

// =============================================================================
// LinkCodec
// =============================================================================

/// Decodes and encodes links against a content store.
#[derive(Debug)]
pub struct LinkCodec<'a, S: ?Sized> {
    store: &'a S,
    config: &'a CodecConfig,
}

impl<S: ?Sized> Clone for LinkCodec<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for LinkCodec<'_, S> {}

impl<'a, S: ContentStore + ?Sized> LinkCodec<'a, S> {
    pub fn new(store: &'a S, config: &'a CodecConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &'a CodecConfig {
        self.config
    }

    /// Build the form state for a dialog of `kind` opened on `attrs`.
    ///
    /// When the stored `linktype` is another kind, every kind-specific field
    /// starts empty. `text`, `title` and `class` are always carried over.
    pub fn decode(&self, kind: LinkType, attrs: &AttributeMap) -> FormState {
        let stored_kind = attrs.link_type();
        let matches = kind.matches(stored_kind);
        trace!(%kind, stored_kind, "decoding link");
        if !matches && !stored_kind.is_empty() {
            debug!(%kind, stored_kind, "stored link is of another kind, ignoring its fields");
        }

        let specific = |key: &str| if matches { attrs.get(key) } else { "" };

        let fields = match kind {
            LinkType::Anchor => KindFields::Anchor {
                url: url::decode_anchor(specific(keys::ANCHOR)),
            },
            LinkType::External => KindFields::External {
                url: specific(keys::URL).to_string(),
                target: target::resolve_display(specific(keys::TARGET)),
            },
            LinkType::Internal => {
                let opened = internal::resolve_on_open(
                    self.store,
                    self.config,
                    specific(keys::ID),
                    specific(keys::URL),
                    stored_kind,
                );
                KindFields::Internal {
                    anchor: specific(keys::ANCHOR).to_string(),
                    querystring: specific(keys::QUERYSTRING).to_string(),
                    target: target::resolve_display(specific(keys::TARGET)),
                    browse: opened.browse,
                    selection: opened.selection,
                }
            }
            LinkType::Javascript => KindFields::Javascript {
                url: specific(keys::URL).to_string(),
            },
            LinkType::Mailto => KindFields::Mailto {
                url: specific(keys::URL).to_string(),
            },
            LinkType::Media => {
                let opened = media::resolve_on_open(
                    self.store,
                    self.config,
                    specific(keys::ID),
                    stored_kind,
                );
                KindFields::Media {
                    target: target::resolve_display(specific(keys::TARGET)),
                    browse: opened.browse,
                    selection: opened.selection,
                }
            }
        };

        FormState {
            text: attrs.get(keys::TEXT).to_string(),
            title: attrs.get(keys::TITLE).to_string(),
            class: attrs.get(keys::CLASS).to_string(),
            fields,
        }
    }

    /// Build the packet for a confirmed dialog of `kind`.
    ///
    /// Fails without producing a packet when the mail address is invalid or a
    /// tree-backed dialog has no selection; the dialog must stay open.
    pub fn encode(&self, kind: LinkType, form: &FormState) -> LinkResult<AttributePacket> {
        if form.kind() != kind {
            return Err(LinkError::KindMismatch {
                expected: kind,
                found: form.kind(),
            });
        }
        trace!(%kind, "encoding link");

        let mut packet = AttributePacket::new();
        packet.set(keys::TEXT, form.text.as_str());
        packet.set(keys::LINKTYPE, kind.as_str());

        match &form.fields {
            KindFields::Anchor { url } => {
                let fragment = url::encode_anchor(url);
                packet.set(keys::URL, fragment);
                packet.set(keys::ANCHOR, fragment);
                set_title_class(&mut packet, form);
            }
            KindFields::External { url, target } => {
                packet.set(keys::URL, url::encode_external(url));
                packet.set(keys::ANCHOR, "");
                set_title_class(&mut packet, form);
                packet.set(keys::TARGET, target::resolve_attribute(target));
            }
            KindFields::Internal {
                anchor,
                querystring,
                target,
                ..
            } => {
                let id = internal::resolve_on_confirm(form)
                    .inspect_err(|_| debug!("internal link confirmed without a selection"))?;
                packet.set(keys::ANCHOR, anchor.as_str());
                set_title_class(&mut packet, form);
                packet.set(keys::QUERYSTRING, url::encode_querystring(querystring));
                packet.set(keys::TARGET, target::resolve_attribute(target));
                packet.set(keys::ID, id.to_string());
            }
            KindFields::Javascript { url } => {
                packet.set(keys::URL, url::encode_javascript(url));
                packet.set(keys::ANCHOR, "");
                set_title_class(&mut packet, form);
            }
            KindFields::Mailto { url } => {
                let mail = url::encode_mailto(url)
                    .inspect_err(|_| debug!(address = %url, "rejecting invalid e-mail address"))?;
                packet.set(keys::URL, mail);
                packet.set(keys::ANCHOR, "");
                set_title_class(&mut packet, form);
            }
            KindFields::Media { target, .. } => {
                let id = media::resolve_on_confirm(form)
                    .inspect_err(|_| debug!("media link confirmed without a selection"))?;
                set_title_class(&mut packet, form);
                packet.set(keys::TARGET, target::resolve_attribute(target));
                packet.set(keys::ID, id.to_string());
            }
        }

        Ok(packet)
    }

    /// Record the tree selection with the display path for the form's kind.
    ///
    /// Selecting the media library root clears the media selection.
    pub fn select_item(&self, form: &mut FormState, item: Option<&Item>) -> LinkResult<()> {
        let selection = match (form.kind(), item) {
            (_, None) => ReferenceSelection::Unresolved,
            (LinkType::Media, Some(item)) if item.id == self.config.media_library_root_id => {
                ReferenceSelection::Unresolved
            }
            (LinkType::Media, Some(item)) => ReferenceSelection::resolved(
                item.id,
                media::media_display_path(self.store, self.config, item),
            ),
            (_, Some(item)) => {
                ReferenceSelection::resolved(item.id, self.store.display_path(item))
            }
        };
        form.set_browse_selection(selection)
    }

    /// The selected media folder, if the user may upload into it.
    pub fn upload_target(&self, form: &FormState) -> LinkResult<Item> {
        media::upload_target(self.store, form)
    }

    /// Move the media browse folder into the selection when it has children.
    pub fn open_selection(&self, form: &mut FormState) -> bool {
        media::open_selection(self.store, form)
    }

    /// The folder a new media folder would be created in.
    pub fn new_folder_parent(&self, form: &FormState) -> Option<Item> {
        media::new_folder_parent(self.store, form)
    }

    /// Preview of the current media selection, or of the browse folder.
    ///
    /// `None` for non-media forms and when nothing resolves.
    pub fn preview<U: MediaUrlBuilder + ?Sized>(&self, form: &FormState, urls: &U) -> Option<Thumbnail> {
        if form.kind() != LinkType::Media {
            return None;
        }
        media::preview_item(self.store, form)
            .map(|item| media::derive_preview(urls, self.config, &item))
    }
}

fn set_title_class(packet: &mut AttributePacket, form: &FormState) {
    packet.set(keys::TITLE, form.title.as_str());
    packet.set(keys::CLASS, form.class.as_str());
}
