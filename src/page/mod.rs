//! The download page's element contract.
//!
//! Elements are located by attribute:
//!
//! - `[data-file="<slot>"]` - one element per platform slot, carrying the link
//! - `[data-info="size"]`, `[data-info="date"]` - descendants of a slot element
//! - `[data-version]` - anywhere on the page, text contains the version
//!
//! Lookups that find nothing are not errors: setters report `false` and the
//! page is left as it was.

mod html;

use std::fmt;

use crate::slot::Slot;

pub use html::HtmlPage;

/// Text field nested inside a slot element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoField {
    Size,
    Date,
}

impl InfoField {
    /// Value of the `data-info` attribute.
    pub fn key(&self) -> &'static str {
        match self {
            InfoField::Size => "size",
            InfoField::Date => "date",
        }
    }

    pub fn selector(&self) -> String {
        format!(r#"[data-info="{}"]"#, self.key())
    }
}

impl fmt::Display for InfoField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait Page {
    /// Text content of every version marker, in document order.
    fn version_markers(&self) -> Vec<String>;

    /// Replace the text content of the `index`-th version marker.
    fn set_version_marker(&mut self, index: usize, text: &str) -> bool;

    /// Point the slot element's link at `url`.
    fn set_slot_link(&mut self, slot: Slot, url: &str) -> bool;

    /// Replace the text content of a field inside the slot element.
    fn set_slot_info(&mut self, slot: Slot, field: InfoField, text: &str) -> bool;

    /// Serialize the page back to HTML.
    fn render(&self) -> String;
}
