//! Pattern registry: the indexed store of every handler's match rules.
//!
//! Each entry is (owning handler, component type, compiled pattern).
//! Entries are registered once while the engine assembles and never
//! mutated afterwards. Matching is any-match over the entries for a type,
//! either across all handlers ([`PatternRegistry::matches`]) or scoped to
//! one handler ([`PatternRegistry::matches_for_handler`]).
//!
//! The scoped form is the leakage firewall: several vendors' raw patterns
//! are broad enough to match another vendor's MPN shape (short size-code
//! prefixes on chip passives especially), so a handler's fallback path must
//! consult only its own entries when deciding whether it owns a string.

use crate::error::ConfigError;
use crate::taxonomy::ComponentType;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Identity of a manufacturer handler. Handler ids are static, lowercase
/// names ("atmel", "murata", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HandlerId(pub &'static str);

impl HandlerId {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// One registered match rule.
#[derive(Debug)]
pub struct PatternEntry {
    handler: HandlerId,
    component_type: ComponentType,
    pattern: Regex,
}

impl PatternEntry {
    pub fn handler(&self) -> HandlerId {
        self.handler
    }

    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

/// Insertion-ordered pattern store with a per-type index.
///
/// A handler may register several entries for one type (alternative
/// encodings) and the same pattern text under several types (a prefix
/// commonly denotes both a generic kind and a vendor-specific kind).
#[derive(Debug, Default)]
pub struct PatternRegistry {
    entries: Vec<PatternEntry>,
    by_type: HashMap<ComponentType, Vec<usize>>,
}

impl PatternRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one rule. Compiles eagerly: a pattern that does not
    /// compile aborts engine assembly rather than surfacing at query time.
    pub fn register(
        &mut self,
        handler: HandlerId,
        component_type: ComponentType,
        pattern: &str,
    ) -> Result<(), ConfigError> {
        let compiled = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            handler,
            component_type,
            source,
        })?;

        let index = self.entries.len();
        self.entries.push(PatternEntry {
            handler,
            component_type,
            pattern: compiled,
        });
        self.by_type.entry(component_type).or_default().push(index);

        tracing::trace!(
            handler = %handler,
            component_type = %component_type,
            pattern,
            "registered pattern"
        );
        Ok(())
    }

    /// True if any entry for `component_type`, across all handlers,
    /// matches. The generic fallback check.
    pub fn matches(&self, mpn: &str, component_type: ComponentType) -> bool {
        self.entries_for(component_type)
            .any(|e| e.pattern.is_match(mpn))
    }

    /// True if an entry owned by `handler` for `component_type` matches.
    /// Handlers use this in their shortcut paths so a broad pattern from
    /// another vendor can never make them claim a foreign MPN.
    pub fn matches_for_handler(
        &self,
        handler: HandlerId,
        mpn: &str,
        component_type: ComponentType,
    ) -> bool {
        self.entries_for(component_type)
            .filter(|e| e.handler == handler)
            .any(|e| e.pattern.is_match(mpn))
    }

    /// One representative pattern for `component_type`: the first entry in
    /// registration order. Deterministic when several entries exist.
    pub fn pattern_for(&self, component_type: ComponentType) -> Option<&Regex> {
        self.entries_for(component_type).next().map(|e| &e.pattern)
    }

    /// All entries in registration order.
    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of entries owned by one handler.
    pub fn entry_count_for_handler(&self, handler: HandlerId) -> usize {
        self.entries.iter().filter(|e| e.handler == handler).count()
    }

    fn entries_for(&self, component_type: ComponentType) -> impl Iterator<Item = &PatternEntry> {
        self.by_type
            .get(&component_type)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&i| &self.entries[i])
    }
}
