//! Murata multilayer ceramic capacitors.
//!
//! Modern orderable code, e.g. `GRM188R71H104KA93D`: series + dimension
//! (`GRM188`), temperature characteristic (`R7` = X7R), rated voltage
//! (`1H` = 50 V), capacitance in pF notation (`104` = 100 nF), tolerance
//! letter, then packaging.
//!
//! The registry also carries a legacy entry for the older disc/axial shape
//! whose two-letter-plus-digits form is shared by several passive vendors.
//! That entry is deliberately broad, which is exactly why classification
//! goes through the scoped registry lookup behind a prefix gate: the
//! unscoped pattern set would otherwise claim other vendors' MLCC codes.

use crate::equivalence::{all_of, at_least, at_most, exactly, StageOutcome};
use crate::error::ConfigError;
use crate::handler::ManufacturerHandler;
use crate::mpn::Mpn;
use crate::registry::{HandlerId, PatternRegistry};
use crate::taxonomy::{ComponentType, Taxonomy};
use once_cell::sync::Lazy;
use regex::Regex;

pub const MURATA: HandlerId = HandlerId("murata");

const MLCC_PATTERN: &str =
    r"^G[RC][MJ][0-9]{2}[0-9A-Z][A-Z][0-9A-Z][0-9][A-Z][0-9]{3}[BCDFGJKM][A-Z0-9]*$";

/// Legacy disc/axial shape. Shared with other passive vendors' short
/// numeric codes, hence broad.
const LEGACY_PATTERN: &str = r"^[A-Z]{2}[0-9]{2}[A-Z][0-9]{3}[A-Z][A-Z0-9]*$";

const MURATA_PREFIXES: &[&str] = &["GRM", "GCM", "GCJ", "DE", "DD"];

static SERIES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(G[RC][MJ][0-9]{3})").unwrap());

pub struct MurataHandler;

impl MurataHandler {
    /// EIA size from the two-digit dimension code (`18` → 0603).
    fn size_code(mpn: &Mpn) -> Option<&'static str> {
        let normalized = mpn.normalized();
        if !SERIES_RE.is_match(normalized) {
            return None;
        }
        match normalized.get(3..5)? {
            "03" => Some("0201"),
            "15" => Some("0402"),
            "18" => Some("0603"),
            "21" => Some("0805"),
            "31" => Some("1206"),
            "32" => Some("1210"),
            "43" => Some("1812"),
            "55" => Some("2220"),
            _ => None,
        }
    }

    /// Temperature characteristic field (`R7` = X7R, `5C` = C0G).
    ///
    /// Decode helpers run on arbitrary strings, so every field access past
    /// the regex-validated series prefix goes through `str::get`: a stray
    /// multibyte character yields `None`, never a slicing panic.
    fn temp_characteristic(mpn: &Mpn) -> Option<String> {
        let normalized = mpn.normalized();
        if !SERIES_RE.is_match(normalized) {
            return None;
        }
        normalized.get(6..8).map(str::to_string)
    }

    fn rated_voltage(mpn: &Mpn) -> Option<f64> {
        let normalized = mpn.normalized();
        if !SERIES_RE.is_match(normalized) {
            return None;
        }
        match normalized.get(8..10)? {
            "0J" => Some(6.3),
            "1A" => Some(10.0),
            "1C" => Some(16.0),
            "1E" => Some(25.0),
            "1H" => Some(50.0),
            "2A" => Some(100.0),
            "2E" => Some(250.0),
            _ => None,
        }
    }

    /// Capacitance in pF from the three-digit code (`104` → 100 000 pF).
    fn capacitance_pf(mpn: &Mpn) -> Option<u64> {
        let normalized = mpn.normalized();
        if !SERIES_RE.is_match(normalized) {
            return None;
        }
        let digits = normalized.get(10..13)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let mantissa: u64 = digits[..2].parse().ok()?;
        let exponent: u32 = digits[2..].parse().ok()?;
        Some(mantissa * 10u64.pow(exponent))
    }

    fn tolerance_percent(mpn: &Mpn) -> Option<f64> {
        let normalized = mpn.normalized();
        if !SERIES_RE.is_match(normalized) {
            return None;
        }
        match normalized.chars().nth(13)? {
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
}

impl ManufacturerHandler for MurataHandler {
    fn id(&self) -> HandlerId {
        MURATA
    }

    fn name(&self) -> &str {
        "Murata MLCC"
    }

    fn initialize_patterns(&self, registry: &mut PatternRegistry) -> Result<(), ConfigError> {
        registry.register(MURATA, ComponentType::Capacitor, MLCC_PATTERN)?;
        registry.register(MURATA, ComponentType::MlccCapacitor, MLCC_PATTERN)?;
        registry.register(MURATA, ComponentType::Capacitor, LEGACY_PATTERN)?;
        registry.register(MURATA, ComponentType::MlccCapacitor, LEGACY_PATTERN)?;
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
        if !MURATA_PREFIXES.iter().any(|p| normalized.starts_with(p)) {
            return false;
        }
        registry.matches_for_handler(MURATA, normalized, component_type)
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

    /// Capacitance and temperature characteristic must match exactly; a
    /// higher voltage rating or a tighter tolerance may substitute.
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

    const GRM_50V: &str = "GRM188R71H104KA93D";
    const GRM_25V: &str = "GRM188R71E104KA01D";

    fn mpn(s: &str) -> Mpn {
        Mpn::new(s)
    }

    #[test]
    fn test_series_and_package() {
        let handler = MurataHandler;
        assert_eq!(handler.extract_series(&mpn(GRM_50V)), "GRM188");
        assert_eq!(handler.extract_package_code(&mpn(GRM_50V)), "0603");
        assert_eq!(handler.extract_series(&mpn("CL10B104KB8NNNC")), "");
        assert_eq!(handler.extract_package_code(&mpn("CL10B104KB8NNNC")), "");
    }

    #[test]
    fn test_field_decodes() {
        assert_eq!(
            MurataHandler::temp_characteristic(&mpn(GRM_50V)),
            Some("R7".to_string())
        );
        assert_eq!(MurataHandler::rated_voltage(&mpn(GRM_50V)), Some(50.0));
        assert_eq!(MurataHandler::rated_voltage(&mpn(GRM_25V)), Some(25.0));
        assert_eq!(MurataHandler::capacitance_pf(&mpn(GRM_50V)), Some(100_000));
        assert_eq!(MurataHandler::tolerance_percent(&mpn(GRM_50V)), Some(10.0));
    }

    #[test]
    fn test_voltage_dominance() {
        let handler = MurataHandler;
        // 50 V may stand in for 25 V, not the reverse.
        assert_eq!(
            handler.compare_attributes(&mpn(GRM_25V), &mpn(GRM_50V)),
            StageOutcome::Passed
        );
        assert_eq!(
            handler.compare_attributes(&mpn(GRM_50V), &mpn(GRM_25V)),
            StageOutcome::Failed
        );
    }

    #[test]
    fn test_multibyte_input_decodes_to_nothing() {
        // A multibyte character after the valid series prefix must land in
        // Undecodable territory, not in a slicing panic.
        let mangled = mpn("GRM188R71É04KA93D");
        assert_eq!(MurataHandler::temp_characteristic(&mangled), Some("R7".to_string()));
        assert_eq!(MurataHandler::rated_voltage(&mangled), None);
        assert_eq!(MurataHandler::capacitance_pf(&mangled), None);
        assert_eq!(MurataHandler::tolerance_percent(&mangled), None);

        let handler = MurataHandler;
        assert_eq!(
            handler.compare_attributes(&mpn(GRM_50V), &mangled),
            StageOutcome::Undecodable
        );
    }

    #[test]
    fn test_non_digit_capacitance_code_rejected() {
        assert_eq!(MurataHandler::capacitance_pf(&mpn("GRM188R71H1A4KA93D")), None);
    }

    #[test]
    fn test_foreign_mlcc_not_claimed_despite_broad_pattern() {
        let handler = MurataHandler;
        let mut registry = PatternRegistry::new();
        handler.initialize_patterns(&mut registry).unwrap();

        let samsung = mpn("CL10B104KB8NNNC");
        // The legacy entry does match the foreign shape...
        assert!(registry.matches(samsung.normalized(), ComponentType::MlccCapacitor));
        // ...but the prefix gate keeps the claim out.
        assert!(!handler.classify(&samsung, ComponentType::MlccCapacitor, &registry));
        assert!(handler.classify(&mpn(GRM_50V), ComponentType::MlccCapacitor, &registry));
    }
}
