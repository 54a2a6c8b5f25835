//! STMicroelectronics STM32 microcontrollers.
//!
//! Orderable code, e.g. `STM32F411CEU6`:
//! family letter + line digits, then pin count, flash size, package, and
//! temperature range, one field per character. The series is the family
//! plus line (`STM32F411`); everything after it is decoded positionally.

use crate::equivalence::{all_of, at_least, StageOutcome};
use crate::error::ConfigError;
use crate::handler::ManufacturerHandler;
use crate::mpn::Mpn;
use crate::registry::{HandlerId, PatternRegistry};
use crate::taxonomy::{ComponentType, Taxonomy};
use once_cell::sync::Lazy;
use regex::Regex;

pub const STMICRO: HandlerId = HandlerId("stmicro");

const STM32_PATTERN: &str =
    r"^STM32[FLGHUWC][0-9]{3}[FGKTCRVZI][468BCDEFGHI][PTUHY][367][A-Z0-9]*$";

static SERIES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(STM32[FLGHUWC][0-9]{3})").unwrap());

pub struct StMicroHandler;

impl StMicroHandler {
    fn field(mpn: &Mpn, index: usize) -> Option<char> {
        let normalized = mpn.normalized();
        if !normalized.starts_with("STM32") {
            return None;
        }
        normalized.chars().nth(index)
    }

    fn pin_count(mpn: &Mpn) -> Option<u32> {
        match Self::field(mpn, 9)? {
            'F' => Some(20),
            'G' => Some(28),
            'K' => Some(32),
            'T' => Some(36),
            'C' => Some(48),
            'R' => Some(64),
            'V' => Some(100),
            'Z' => Some(144),
            'I' => Some(176),
            _ => None,
        }
    }

    fn flash_kb(mpn: &Mpn) -> Option<u32> {
        match Self::field(mpn, 10)? {
            '4' => Some(16),
            '6' => Some(32),
            '8' => Some(64),
            'B' => Some(128),
            'C' => Some(256),
            'D' => Some(384),
            'E' => Some(512),
            'F' => Some(768),
            'G' => Some(1024),
            'H' => Some(1536),
            'I' => Some(2048),
            _ => None,
        }
    }

    fn package_family(mpn: &Mpn) -> Option<&'static str> {
        match Self::field(mpn, 11)? {
            'P' => Some("TSSOP"),
            'T' => Some("LQFP"),
            'U' => Some("UFQFPN"),
            'H' => Some("UFBGA"),
            'Y' => Some("WLCSP"),
            _ => None,
        }
    }

    /// Temperature ranges ordered by upper limit: 6 = 85 °C, 7 = 105 °C,
    /// 3 = 125 °C. A wider range may replace a narrower one.
    fn temp_rank(mpn: &Mpn) -> Option<u8> {
        match Self::field(mpn, 12)? {
            '6' => Some(0),
            '7' => Some(1),
            '3' => Some(2),
            _ => None,
        }
    }
}

impl ManufacturerHandler for StMicroHandler {
    fn id(&self) -> HandlerId {
        STMICRO
    }

    fn name(&self) -> &str {
        "STMicroelectronics STM32"
    }

    fn initialize_patterns(&self, registry: &mut PatternRegistry) -> Result<(), ConfigError> {
        registry.register(STMICRO, ComponentType::Microcontroller, STM32_PATTERN)?;
        registry.register(STMICRO, ComponentType::Stm32Microcontroller, STM32_PATTERN)?;
        Ok(())
    }

    fn register_taxonomy(&self, taxonomy: &mut Taxonomy) -> Result<(), ConfigError> {
        taxonomy.register(
            ComponentType::Stm32Microcontroller,
            ComponentType::Microcontroller,
        )
    }

    fn supported_types(&self) -> &[ComponentType] {
        &[
            ComponentType::Microcontroller,
            ComponentType::Stm32Microcontroller,
        ]
    }

    fn classify(
        &self,
        mpn: &Mpn,
        component_type: ComponentType,
        registry: &PatternRegistry,
    ) -> bool {
        let normalized = mpn.normalized();
        if !normalized.starts_with("STM32") {
            return false;
        }
        registry.matches_for_handler(STMICRO, normalized, component_type)
    }

    fn extract_series(&self, mpn: &Mpn) -> String {
        SERIES_RE
            .captures(mpn.normalized())
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }

    /// Package family plus pin count, e.g. `UFQFPN48`. The pin count is
    /// part of the physical package identity, so `STM32F411CEU6` (48 pins)
    /// and `STM32F411REU6` (64 pins) decode to different packages.
    fn extract_package_code(&self, mpn: &Mpn) -> String {
        match (Self::package_family(mpn), Self::pin_count(mpn)) {
            (Some(family), Some(pins)) => format!("{family}{pins}"),
            _ => String::new(),
        }
    }

    fn compare_attributes(&self, original: &Mpn, replacement: &Mpn) -> StageOutcome {
        all_of([
            at_least(Self::flash_kb(original), Self::flash_kb(replacement)),
            at_least(Self::temp_rank(original), Self::temp_rank(replacement)),
        ])
    }
}
