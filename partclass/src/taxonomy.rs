//! Component type taxonomy.
//!
//! A closed set of component kinds plus an explicit "specializes" relation:
//! a manufacturer-specific type (e.g. [`ComponentType::AvrMicrocontroller`])
//! narrows a generic base type (e.g. [`ComponentType::Microcontroller`]).
//! The relation is acyclic and at most one level deep, and is assembled once
//! while handlers register at process start.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Kinds of electronic components the engine can classify an MPN into.
///
/// Generic kinds describe a component family independent of manufacturer;
/// the specialized kinds narrow a generic kind to one vendor's product
/// shape. The base relation itself lives in [`Taxonomy`], not in the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    // Generic kinds
    Microcontroller,
    Resistor,
    Capacitor,
    Inductor,
    Diode,
    Crystal,
    Oscillator,
    VoltageRegulator,
    // Manufacturer-specialized kinds
    AvrMicrocontroller,
    Stm32Microcontroller,
    ThickFilmChipResistor,
    MlccCapacitor,
}

impl ComponentType {
    /// Stable textual name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Microcontroller => "microcontroller",
            ComponentType::Resistor => "resistor",
            ComponentType::Capacitor => "capacitor",
            ComponentType::Inductor => "inductor",
            ComponentType::Diode => "diode",
            ComponentType::Crystal => "crystal",
            ComponentType::Oscillator => "oscillator",
            ComponentType::VoltageRegulator => "voltage_regulator",
            ComponentType::AvrMicrocontroller => "avr_microcontroller",
            ComponentType::Stm32Microcontroller => "stm32_microcontroller",
            ComponentType::ThickFilmChipResistor => "thick_film_chip_resistor",
            ComponentType::MlccCapacitor => "mlcc_capacitor",
        }
    }

    /// All known component types, in declaration order.
    pub fn all() -> &'static [ComponentType] {
        &[
            ComponentType::Microcontroller,
            ComponentType::Resistor,
            ComponentType::Capacitor,
            ComponentType::Inductor,
            ComponentType::Diode,
            ComponentType::Crystal,
            ComponentType::Oscillator,
            ComponentType::VoltageRegulator,
            ComponentType::AvrMicrocontroller,
            ComponentType::Stm32Microcontroller,
            ComponentType::ThickFilmChipResistor,
            ComponentType::MlccCapacitor,
        ]
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        ComponentType::all()
            .iter()
            .find(|t| t.as_str() == normalized)
            .copied()
            .ok_or_else(|| format!("unknown component type '{}'", s))
    }
}

/// The specific → base relation over [`ComponentType`].
///
/// Built once during handler registration and read-only afterwards.
#[derive(Debug, Default)]
pub struct Taxonomy {
    base: HashMap<ComponentType, ComponentType>,
}

impl Taxonomy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare that `specific` specializes `base`.
    ///
    /// Rejects self-reference, chains (the base must not itself have a
    /// base), and re-registration under a different base. Registering the
    /// same edge twice is a no-op so independent handlers may both declare
    /// an edge they share.
    pub fn register(
        &mut self,
        specific: ComponentType,
        base: ComponentType,
    ) -> Result<(), ConfigError> {
        if specific == base || self.base.contains_key(&base) {
            return Err(ConfigError::TaxonomyCycle { specific, base });
        }
        if let Some(&existing) = self.base.get(&specific) {
            if existing != base {
                return Err(ConfigError::TaxonomyConflict {
                    specific,
                    existing,
                    requested: base,
                });
            }
            return Ok(());
        }
        // A registered base type may not later become specific itself.
        if self.base.values().any(|&b| b == specific) {
            return Err(ConfigError::TaxonomyCycle { specific, base });
        }
        self.base.insert(specific, base);
        Ok(())
    }

    /// The base type `specific` narrows, if it has one.
    pub fn base_type_of(&self, specific: ComponentType) -> Option<ComponentType> {
        self.base.get(&specific).copied()
    }

    /// True when `specific` is `general` or directly narrows it.
    pub fn is_specialization_of(&self, specific: ComponentType, general: ComponentType) -> bool {
        specific == general || self.base_type_of(specific) == Some(general)
    }

    /// Number of registered specialization edges.
    pub fn edge_count(&self) -> usize {
        self.base.len()
    }
}
