//! Samsung Electro-Mechanics multilayer ceramic capacitors.
//!
//! Orderable code, e.g. `CL10B104KB8NNNC`: `CL` + size (`10` = 0603),
//! temperature characteristic letter (`B` = X7R), capacitance in pF
//! notation (`104` = 100 nF), tolerance letter, rated-voltage letter,
//! thickness, then internal control codes.
//!
//! The size-digit shape overlaps Murata's legacy entry, so classification
//! is gated on the `CL` prefix and scoped to this handler's own entries.

use crate::equivalence::{all_of, at_least, at_most, exactly, StageOutcome};
use crate::error::ConfigError;
use crate::handler::ManufacturerHandler;
use crate::mpn::Mpn;
use crate::registry::{HandlerId, PatternRegistry};
use crate::taxonomy::{ComponentType, Taxonomy};
use once_cell::sync::Lazy;
use regex::Regex;

pub const SAMSUNG_EM: HandlerId = HandlerId("samsung_em");

const MLCC_PATTERN: &str = r"^CL[0-9]{2}[A-Z][0-9]{3}[BCDFGJKM][A-Z][0-9A-Z]+$";

static SERIES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(CL[0-9]{2})").unwrap());

pub struct SamsungEmHandler;

impl SamsungEmHandler {
    fn size_code(mpn: &Mpn) -> Option<&'static str> {
        let normalized = mpn.normalized();
        if !SERIES_RE.is_match(normalized) {
            return None;
        }
        match normalized.get(2..4)? {
            "03" => Some("0201"),
            "05" => Some("0402"),
            "10" => Some("0603"),
            "21" => Some("0805"),
            "31" => Some("1206"),
            "32" => Some("1210"),
            "43" => Some("1812"),
            "55" => Some("2220"),
            _ => None,
        }
    }

    fn temp_characteristic(mpn: &Mpn) -> Option<char> {
        let normalized = mpn.normalized();
        if !SERIES_RE.is_match(normalized) {
            return None;
        }
        normalized.chars().nth(4).filter(char::is_ascii_uppercase)
    }

    /// Field access past the regex-validated series prefix goes through
    /// `str::get`: a stray multibyte character yields `None`, never a
    /// slicing panic.
    fn capacitance_pf(mpn: &Mpn) -> Option<u64> {
        let normalized = mpn.normalized();
        if !SERIES_RE.is_match(normalized) {
            return None;
        }
        let digits = normalized.get(5..8)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let mantissa: u64 = digits[..2].parse().ok()?;
        let exponent: u32 = digits[2..].parse().ok()?;
        Some(mantissa * 10u64.pow(exponent))
    }

    fn tolerance_percent(mpn: &Mpn) -> Option<f64> {
        if !SERIES_RE.is_match(mpn.normalized()) {
            return None;
        }
        match mpn.normalized().chars().nth(8)? {
            'B' => Some(0.1),
            'C' => Some(0.25),
            'D' => Some(0.5),
            'F' => Some(1.0),
            'G' => Some(2.0),
            'J' => Some(5.0),
            'K' => Some(10.0),
            'M' => Some(20.0),
            _ => None,
        }
    }

    fn rated_voltage(mpn: &Mpn) -> Option<f64> {
        if !SERIES_RE.is_match(mpn.normalized()) {
            return None;
        }
        match mpn.normalized().chars().nth(9)? {
            'R' => Some(4.0),
            'Q' => Some(6.3),
            'P' => Some(10.0),
            'O' => Some(16.0),
            'A' => Some(25.0),
            'B' => Some(50.0),
            'C' => Some(100.0),
            _ => None,
        }
    }
}

impl ManufacturerHandler for SamsungEmHandler {
    fn id(&self) -> HandlerId {
        SAMSUNG_EM
    }

    fn name(&self) -> &str {
        "Samsung Electro-Mechanics MLCC"
    }

    fn initialize_patterns(&self, registry: &mut PatternRegistry) -> Result<(), ConfigError> {
        registry.register(SAMSUNG_EM, ComponentType::Capacitor, MLCC_PATTERN)?;
        registry.register(SAMSUNG_EM, ComponentType::MlccCapacitor, MLCC_PATTERN)?;
        Ok(())
    }

    fn register_taxonomy(&self, taxonomy: &mut Taxonomy) -> Result<(), ConfigError> {
        taxonomy.register(ComponentType::MlccCapacitor, ComponentType::Capacitor)
    }

    fn supported_types(&self) -> &[ComponentType] {
        &[ComponentType::Capacitor, ComponentType::MlccCapacitor]
    }

    fn classify(
        &self,
        mpn: &Mpn,
        component_type: ComponentType,
        registry: &PatternRegistry,
    ) -> bool {
        let normalized = mpn.normalized();
        if !normalized.starts_with("CL") {
            return false;
        }
        registry.matches_for_handler(SAMSUNG_EM, normalized, component_type)
    }

    fn extract_series(&self, mpn: &Mpn) -> String {
        SERIES_RE
            .captures(mpn.normalized())
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }

    fn extract_package_code(&self, mpn: &Mpn) -> String {
        Self::size_code(mpn).map(str::to_string).unwrap_or_default()
    }

    fn compare_attributes(&self, original: &Mpn, replacement: &Mpn) -> StageOutcome {
        all_of([
            exactly(
                Self::capacitance_pf(original),
                Self::capacitance_pf(replacement),
            ),
            exactly(
                Self::temp_characteristic(original),
                Self::temp_characteristic(replacement),
            ),
            at_least(
                Self::rated_voltage(original),
                Self::rated_voltage(replacement),
            ),
            at_most(
                Self::tolerance_percent(original),
                Self::tolerance_percent(replacement),
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CL_50V: &str = "CL10B104KB8NNNC";
    const CL_25V: &str = "CL10B104KA8NNNC";

    fn mpn(s: &str) -> Mpn {
        Mpn::new(s)
    }

    #[test]
    fn test_series_and_package() {
        let handler = SamsungEmHandler;
        assert_eq!(handler.extract_series(&mpn(CL_50V)), "CL10");
        assert_eq!(handler.extract_package_code(&mpn(CL_50V)), "0603");
        assert_eq!(handler.extract_series(&mpn("GRM188R71H104KA93D")), "");
    }

    #[test]
    fn test_field_decodes() {
        assert_eq!(SamsungEmHandler::temp_characteristic(&mpn(CL_50V)), Some('B'));
        assert_eq!(SamsungEmHandler::capacitance_pf(&mpn(CL_50V)), Some(100_000));
        assert_eq!(SamsungEmHandler::tolerance_percent(&mpn(CL_50V)), Some(10.0));
        assert_eq!(SamsungEmHandler::rated_voltage(&mpn(CL_50V)), Some(50.0));
        assert_eq!(SamsungEmHandler::rated_voltage(&mpn(CL_25V)), Some(25.0));
    }

    #[test]
    fn test_voltage_dominance() {
        let handler = SamsungEmHandler;
        assert_eq!(
            handler.compare_attributes(&mpn(CL_25V), &mpn(CL_50V)),
            StageOutcome::Passed
        );
        assert_eq!(
            handler.compare_attributes(&mpn(CL_50V), &mpn(CL_25V)),
            StageOutcome::Failed
        );
    }

    #[test]
    fn test_multibyte_input_decodes_to_nothing() {
        // Multibyte character straddling the capacitance field: every
        // decode must answer None rather than panic on a byte slice.
        let mangled = mpn("CL10é104KB8NNNC");
        assert_eq!(SamsungEmHandler::capacitance_pf(&mangled), None);
        assert_eq!(SamsungEmHandler::temp_characteristic(&mangled), None);

        let handler = SamsungEmHandler;
        assert_eq!(
            handler.compare_attributes(&mpn(CL_50V), &mangled),
            StageOutcome::Undecodable
        );
    }

    #[test]
    fn test_classify_requires_own_shape() {
        let handler = SamsungEmHandler;
        let mut registry = PatternRegistry::new();
        handler.initialize_patterns(&mut registry).unwrap();

        assert!(handler.classify(&mpn(CL_50V), ComponentType::MlccCapacitor, &registry));
        assert!(!handler.classify(
            &mpn("GRM188R71H104KA93D"),
            ComponentType::MlccCapacitor,
            &registry
        ));
    }
}
