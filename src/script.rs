//! Scripts evaluated by the client bridge.
//!
//! The dialogs never touch the browser directly; they hand these strings to
//! the client-side bridge, which evaluates them.

use std::fmt;

use crate::attr::AttributePacket;
use crate::error::LinkResult;
use crate::form::{FormState, KindFields};
use crate::url;

/// A script to evaluate on the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientScript(String);

impl ClientScript {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Dialog result for a confirmed link: the rendered `<link/>` element.
    pub fn dialog_value(packet: &AttributePacket) -> String {
        packet.to_markup()
    }
}

impl fmt::Display for ClientScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Script for the dialog's "test" button.
///
/// External links open in a new window and mail links are clicked through a
/// hidden `mail` anchor. Other kinds, and an empty external url, have no test
/// action.
pub fn test_script(form: &FormState) -> LinkResult<Option<ClientScript>> {
    match &form.fields {
        KindFields::External { url, .. } => {
            let href = url::encode_external(url);
            if href.is_empty() {
                return Ok(None);
            }
            Ok(Some(ClientScript(format!(
                "try {{window.open('{}', '_blank') }} catch(e) {{ alert('An error occured: ' + e.description) }}",
                escape_js(&href)
            ))))
        }
        KindFields::Mailto { url } => {
            let mail = url::encode_mailto(url)?;
            Ok(Some(ClientScript(format!(
                "scForm.browser.getControl('mail').href='{}'; scForm.browser.getControl('mail').click();",
                escape_js(&mail)
            ))))
        }
        _ => Ok(None),
    }
}

/// Escape a value for a single-quoted JavaScript string literal.
fn escape_js(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\'' => result.push_str("\\'"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '<' => result.push_str("\\x3C"),
            _ => result.push(c),
        }
    }
    result
}
