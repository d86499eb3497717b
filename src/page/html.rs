//! [`Page`] over a parsed HTML document.

use std::collections::HashMap;

use anyhow::{Result, anyhow};
use log::debug;
use scraper::node::{Element, Text};
use scraper::{Html, Node, Selector};

use super::{InfoField, Page};
use crate::slot::Slot;

const VERSION_MARKER_SELECTOR: &str = "[data-version]";
const LINK_ATTRIBUTE: &str = "href";

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| anyhow!("Invalid selector {}: {}", selector, e))
}

/// Sets `name` on the element, adding the attribute when it is missing.
///
/// Attributes are kept sorted by name so attribute lookups keep working.
fn set_attribute(element: &mut Element, name: &str, value: &str) {
    if let Some((_, existing)) = element
        .attrs
        .iter_mut()
        .find(|(attr, _)| &*attr.local == name)
    {
        *existing = value.into();
        return;
    }

    // Slot elements always carry `data-file`, so there is a name to derive from.
    let Some(mut qual_name) = element.attrs.first().map(|(attr, _)| attr.clone()) else {
        debug!("Element <{}> has no attributes, cannot add {}", element.name(), name);
        return;
    };
    qual_name.prefix = None;
    qual_name.local = name.into();

    element.attrs.push((qual_name, value.into()));
    element
        .attrs
        .sort_unstable_by(|a, b| (*a.0.local).cmp(&*b.0.local));
}

pub struct HtmlPage {
    document: Html,
    version_selector: Selector,
    slot_selectors: HashMap<Slot, Selector>,
    size_selector: Selector,
    date_selector: Selector,
}

impl HtmlPage {
    pub fn parse(source: &str) -> Result<Self> {
        let document = Html::parse_document(source);
        if !document.errors.is_empty() {
            debug!("HTML parsed with {} recoverable errors", document.errors.len());
        }

        let slot_selectors = Slot::ALL
            .iter()
            .map(|slot| Ok((*slot, parse_selector(&slot.selector())?)))
            .collect::<Result<HashMap<_, _>>>()?;

        Ok(Self {
            document,
            version_selector: parse_selector(VERSION_MARKER_SELECTOR)?,
            slot_selectors,
            size_selector: parse_selector(&InfoField::Size.selector())?,
            date_selector: parse_selector(&InfoField::Date.selector())?,
        })
    }

    fn info_selector(&self, field: InfoField) -> &Selector {
        match field {
            InfoField::Size => &self.size_selector,
            InfoField::Date => &self.date_selector,
        }
    }
}

impl Page for HtmlPage {
    fn version_markers(&self) -> Vec<String> {
        self.document
            .select(&self.version_selector)
            .map(|el| el.text().collect())
            .collect()
    }

    fn set_version_marker(&mut self, index: usize, text: &str) -> bool {
        let Some(id) = self
            .document
            .select(&self.version_selector)
            .nth(index)
            .map(|el| el.id())
        else {
            return false;
        };

        let Some(mut node) = self.document.tree.get_mut(id) else {
            return false;
        };
        while let Some(mut child) = node.first_child() {
            child.detach();
        }
        node.append(Node::Text(Text { text: text.into() }));
        true
    }

    fn set_slot_link(&mut self, slot: Slot, url: &str) -> bool {
        let Some(id) = self
            .slot_selectors
            .get(&slot)
            .and_then(|sel| self.document.select(sel).next())
            .map(|el| el.id())
        else {
            debug!("No element for slot {}", slot);
            return false;
        };

        let Some(mut node) = self.document.tree.get_mut(id) else {
            return false;
        };
        match node.value() {
            Node::Element(element) => {
                set_attribute(element, LINK_ATTRIBUTE, url);
                true
            }
            _ => false,
        }
    }

    fn set_slot_info(&mut self, slot: Slot, field: InfoField, text: &str) -> bool {
        let field_selector = self.info_selector(field);
        let Some(id) = self
            .slot_selectors
            .get(&slot)
            .and_then(|sel| self.document.select(sel).next())
            .and_then(|card| card.select(field_selector).next())
            .map(|el| el.id())
        else {
            debug!("No {} field for slot {}", field, slot);
            return false;
        };

        let Some(mut node) = self.document.tree.get_mut(id) else {
            return false;
        };
        while let Some(mut child) = node.first_child() {
            child.detach();
        }
        node.append(Node::Text(Text { text: text.into() }));
        true
    }

    fn render(&self) -> String {
        self.document.html()
    }
}
