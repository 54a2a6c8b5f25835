//! Yageo thick-film chip resistors.
//!
//! Orderable code, e.g. `RC0603FR-0710KL`: series + size (`RC0603`),
//! tolerance letter (`F` = 1 %), packaging letter, then a dash section
//! with the reel code, the resistance in R/K/M notation (`10K`, `4R7`)
//! and the termination letter.

use crate::equivalence::{all_of, at_most, exactly, StageOutcome};
use crate::error::ConfigError;
use crate::handler::ManufacturerHandler;
use crate::mpn::Mpn;
use crate::registry::{HandlerId, PatternRegistry};
use crate::taxonomy::{ComponentType, Taxonomy};
use once_cell::sync::Lazy;
use regex::Regex;

pub const YAGEO: HandlerId = HandlerId("yageo");

const CHIP_RESISTOR_PATTERN: &str = r"^R[CL][0-9]{4}[DFGJ][A-Z]-[0-9]{2}[0-9RKM][0-9A-Z]*$";

static SERIES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(R[CL][0-9]{4})").unwrap());

static VALUE_RE: Lazy<Regex> = Lazy::new(|| {
    // Resistance token after the two reel digits: "10K", "4R7", "1M5".
    Regex::new(r"^-[0-9]{2}([0-9]+)(?:([RKM])([0-9]*))?").unwrap()
});

pub struct YageoHandler;

impl YageoHandler {
    fn tolerance_percent(mpn: &Mpn) -> Option<f64> {
        match mpn.normalized().chars().nth(6)? {
            'D' => Some(0.5),
            'F' => Some(1.0),
            'G' => Some(2.0),
            'J' => Some(5.0),
            _ => None,
        }
    }

    /// Resistance in ohms from the R/K/M token (`10K` = 10 000,
    /// `4R7` = 4.7, `1M5` = 1 500 000).
    fn resistance_ohms(mpn: &Mpn) -> Option<f64> {
        let normalized = mpn.normalized();
        let dash = normalized.find('-')?;
        let captures = VALUE_RE.captures(&normalized[dash..])?;
        let whole: f64 = captures.get(1)?.as_str().parse().ok()?;
        let (multiplier, fraction) = match captures.get(2).map(|m| m.as_str()) {
            Some("R") => (1.0, captures.get(3)),
            Some("K") => (1e3, captures.get(3)),
            Some("M") => (1e6, captures.get(3)),
            _ => return Some(whole),
        };
        let fraction = fraction
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<f64>().map(|v| v / 10f64.powi(s.len() as i32))
            })
            .transpose()
            .ok()?
            .unwrap_or(0.0);
        Some((whole + fraction) * multiplier)
    }
}

impl ManufacturerHandler for YageoHandler {
    fn id(&self) -> HandlerId {
        YAGEO
    }

    fn name(&self) -> &str {
        "Yageo chip resistors"
    }

    fn initialize_patterns(&self, registry: &mut PatternRegistry) -> Result<(), ConfigError> {
        registry.register(YAGEO, ComponentType::Resistor, CHIP_RESISTOR_PATTERN)?;
        registry.register(
            YAGEO,
            ComponentType::ThickFilmChipResistor,
            CHIP_RESISTOR_PATTERN,
        )?;
        Ok(())
    }

    fn register_taxonomy(&self, taxonomy: &mut Taxonomy) -> Result<(), ConfigError> {
        taxonomy.register(
            ComponentType::ThickFilmChipResistor,
            ComponentType::Resistor,
        )
    }

    fn supported_types(&self) -> &[ComponentType] {
        &[
            ComponentType::Resistor,
            ComponentType::ThickFilmChipResistor,
        ]
    }

    fn classify(
        &self,
        mpn: &Mpn,
        component_type: ComponentType,
        registry: &PatternRegistry,
    ) -> bool {
        let normalized = mpn.normalized();
        if !normalized.starts_with("RC") && !normalized.starts_with("RL") {
            return false;
        }
        registry.matches_for_handler(YAGEO, normalized, component_type)
    }

    fn extract_series(&self, mpn: &Mpn) -> String {
        SERIES_RE
            .captures(mpn.normalized())
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }

    /// The EIA size code embedded in the series (`RC0603...` → `0603`).
    fn extract_package_code(&self, mpn: &Mpn) -> String {
        let series = self.extract_series(mpn);
        if series.len() == 6 {
            series[2..].to_string()
        } else {
            String::new()
        }
    }

    /// Resistance must match exactly; a tighter tolerance may replace a
    /// looser one (1 % for 5 %), never the reverse.
    fn compare_attributes(&self, original: &Mpn, replacement: &Mpn) -> StageOutcome {
        all_of([
            exactly(
                Self::resistance_ohms(original),
                Self::resistance_ohms(replacement),
            ),
            at_most(
                Self::tolerance_percent(original),
                Self::tolerance_percent(replacement),
            ),
        ])
    }
}
