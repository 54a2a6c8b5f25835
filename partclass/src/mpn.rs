//! Manufacturer part number value type.

use std::fmt;

/// A raw MPN string together with its normalized (trimmed, uppercased)
/// form. All matching and decoding operates on the normalized form;
/// the raw form is kept for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mpn {
    raw: String,
    normalized: String,
}

impl Mpn {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = raw.trim().to_ascii_uppercase();
        Self { raw, normalized }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// True for inputs that normalize to nothing (empty or whitespace).
    /// Such inputs classify to the empty set and decode to nothing.
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

impl From<&str> for Mpn {
    fn from(s: &str) -> Self {
        Mpn::new(s)
    }
}

impl fmt::Display for Mpn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
