//! Microchip (Atmel) AVR microcontrollers.
//!
//! Grammar: `<line><number><variant>[-<speed><package>]`, e.g.
//! `ATMEGA328P-PU` (PDIP) or `ATMEGA8-16AU` (16 MHz TQFP). The series is
//! the line plus number with the variant letters dropped, so
//! `ATMEGA328P-PU` and `ATMEGA328-PU` both decode to `ATMEGA328`.

use crate::equivalence::{at_least, StageOutcome};
use crate::error::ConfigError;
use crate::handler::ManufacturerHandler;
use crate::mpn::Mpn;
use crate::registry::{HandlerId, PatternRegistry};
use crate::taxonomy::{ComponentType, Taxonomy};
use once_cell::sync::Lazy;
use regex::Regex;

pub const ATMEL: HandlerId = HandlerId("atmel");

const AVR_PATTERN: &str =
    r"^(?:ATMEGA|ATTINY|AT90(?:USB|CAN|PWM|S)?)[0-9]{1,4}[A-Z]{0,3}(?:-[0-9]{0,2}[A-Z]{2,4})?$";

/// Product-line prefixes this handler owns. The bare `AT` prefix is shared
/// with unrelated legacy lines (AT24 EEPROMs, AT89 8051 parts), so the
/// shortcut checks the full line prefix before touching the registry.
const AVR_PREFIXES: &[&str] = &["ATMEGA", "ATTINY", "AT90"];

static SERIES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^((?:ATMEGA|ATTINY|AT90(?:USB|CAN|PWM|S)?)[0-9]{1,4})").unwrap()
});

static SPEED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-([0-9]{1,2})[A-Z]").unwrap());

pub struct AtmelHandler;

impl AtmelHandler {
    /// Speed grade in MHz when the MPN encodes one (`ATMEGA8-16PU` → 16).
    /// Newer orderable codes omit the grade entirely.
    fn speed_grade(&self, mpn: &Mpn) -> Option<u32> {
        SPEED_RE
            .captures(mpn.normalized())
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    fn package_name(code: &str) -> Option<&'static str> {
        // Orderable-code package letters; a trailing R marks tape-and-reel
        // and does not change the package.
        let code = code.strip_suffix('R').filter(|c| c.len() >= 2).unwrap_or(code);
        match code {
            "PU" => Some("PDIP"),
            "AU" => Some("TQFP"),
            "MU" => Some("QFN"),
            "SU" => Some("SOIC"),
            "XU" => Some("TSSOP"),
            "CU" => Some("WLCSP"),
            _ => None,
        }
    }
}

impl ManufacturerHandler for AtmelHandler {
    fn id(&self) -> HandlerId {
        ATMEL
    }

    fn name(&self) -> &str {
        "Microchip (Atmel) AVR"
    }

    fn initialize_patterns(&self, registry: &mut PatternRegistry) -> Result<(), ConfigError> {
        // The same grammar denotes both the generic kind and the
        // vendor-specific kind.
        registry.register(ATMEL, ComponentType::Microcontroller, AVR_PATTERN)?;
        registry.register(ATMEL, ComponentType::AvrMicrocontroller, AVR_PATTERN)?;
        Ok(())
    }

    fn register_taxonomy(&self, taxonomy: &mut Taxonomy) -> Result<(), ConfigError> {
        taxonomy.register(
            ComponentType::AvrMicrocontroller,
            ComponentType::Microcontroller,
        )
    }

    fn supported_types(&self) -> &[ComponentType] {
        &[
            ComponentType::Microcontroller,
            ComponentType::AvrMicrocontroller,
        ]
    }

    fn classify(
        &self,
        mpn: &Mpn,
        component_type: ComponentType,
        registry: &PatternRegistry,
    ) -> bool {
        let normalized = mpn.normalized();
        if !AVR_PREFIXES.iter().any(|p| normalized.starts_with(p)) {
            return false;
        }
        registry.matches_for_handler(ATMEL, normalized, component_type)
    }

    fn extract_series(&self, mpn: &Mpn) -> String {
        SERIES_RE
            .captures(mpn.normalized())
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }

    fn extract_package_code(&self, mpn: &Mpn) -> String {
        let normalized = mpn.normalized();
        let Some(suffix) = normalized.rsplit_once('-').map(|(_, s)| s) else {
            return String::new();
        };
        let letters = suffix.trim_start_matches(|c: char| c.is_ascii_digit());
        Self::package_name(letters)
            .map(str::to_string)
            .unwrap_or_default()
    }

    /// Any two package variants of the same AVR die are orderable
    /// substitutes at catalog level, through-hole and surface-mount alike.
    fn package_compatible(&self, _original: &str, _replacement: &str) -> bool {
        true
    }

    fn compare_attributes(&self, original: &Mpn, replacement: &Mpn) -> StageOutcome {
        match (self.speed_grade(original), self.speed_grade(replacement)) {
            // Newer orderable codes carry no speed grade at all; absence on
            // both sides means the grammar has nothing further to compare.
            (None, None) => StageOutcome::Passed,
            (orig @ Some(_), repl @ Some(_)) => at_least(orig, repl),
            // One side encodes a grade the other does not: fail closed.
            _ => StageOutcome::Undecodable,
        }
    }
}
