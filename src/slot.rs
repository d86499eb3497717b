//! Platform slots on the download page and the rules that route release
//! assets to them.

use std::fmt;

use anyhow::{Context, Result};
use regex::Regex;

/// One of the fixed download targets on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    MacIntel,
    MacArm,
    WinSetup,
    WinPortable,
}

impl Slot {
    pub const ALL: [Slot; 4] = [
        Slot::MacIntel,
        Slot::MacArm,
        Slot::WinSetup,
        Slot::WinPortable,
    ];

    /// Value of the `data-file` attribute identifying this slot's element.
    pub fn key(&self) -> &'static str {
        match self {
            Slot::MacIntel => "mac-intel",
            Slot::MacArm => "mac-arm",
            Slot::WinSetup => "win-setup",
            Slot::WinPortable => "win-portable",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Slot::MacIntel => "macOS Intel",
            Slot::MacArm => "macOS ARM",
            Slot::WinSetup => "Windows Setup",
            Slot::WinPortable => "Windows Portable",
        }
    }

    /// CSS selector for the slot's element.
    pub fn selector(&self) -> String {
        format!(r#"[data-file="{}"]"#, self.key())
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Matching rule binding asset filenames to a slot.
#[derive(Debug, Clone)]
pub struct SlotRule {
    pub slot: Slot,
    include: Regex,
    exclude: Option<Regex>,
}

impl SlotRule {
    pub fn new(slot: Slot, include: &str) -> Result<Self> {
        Ok(Self {
            slot,
            include: Regex::new(include)
                .with_context(|| format!("Invalid include pattern for {}: {}", slot, include))?,
            exclude: None,
        })
    }

    pub fn with_exclude(mut self, exclude: &str) -> Result<Self> {
        self.exclude = Some(
            Regex::new(exclude)
                .with_context(|| format!("Invalid exclude pattern for {}: {}", self.slot, exclude))?,
        );
        Ok(self)
    }

    pub fn matches(&self, name: &str) -> bool {
        self.include.is_match(name) && !self.exclude.as_ref().is_some_and(|ex| ex.is_match(name))
    }
}

/// Ordered rule table, evaluated first-match-wins.
#[derive(Debug, Clone)]
pub struct SlotTable {
    rules: Vec<SlotRule>,
}

impl SlotTable {
    pub fn new(rules: Vec<SlotRule>) -> Self {
        Self { rules }
    }

    /// The download page's rule table.
    ///
    /// `*-arm64-mac.zip` also ends in `-mac.zip`, so mac-arm has to come
    /// before mac-intel.
    pub fn standard() -> Result<Self> {
        Ok(Self::new(vec![
            SlotRule::new(Slot::MacArm, r"-arm64-mac\.zip$")?,
            SlotRule::new(Slot::MacIntel, r"-mac\.zip$")?,
            SlotRule::new(Slot::WinSetup, r"Setup-.*\.exe$")?,
            SlotRule::new(Slot::WinPortable, r"Portable-.*\.exe$")?,
        ]))
    }

    pub fn rules(&self) -> &[SlotRule] {
        &self.rules
    }

    /// Slot of the first rule matching `name`; later rules are not consulted.
    pub fn route(&self, name: &str) -> Option<Slot> {
        self.rules
            .iter()
            .find(|rule| rule.matches(name))
            .map(|rule| rule.slot)
    }
}
