//! PartClass - manufacturer part number classification and equivalence
//!
//! This library classifies MPN strings into structured component types,
//! extracts normalized attributes (series, package, vendor-decoded
//! fields), and decides whether two MPNs denote mutually substitutable
//! parts — all from pattern rules, without a live manufacturer database.
//!
//! # Quick Start
//!
//! ```
//! use partclass::{ClassifierEngine, ComponentType};
//!
//! let engine = ClassifierEngine::with_builtin_handlers().unwrap();
//!
//! let claims = engine.classify("ATMEGA328P-PU", None);
//! assert!(claims
//!     .iter()
//!     .any(|c| c.component_type == ComponentType::Microcontroller));
//!
//! let handler = engine.handler_id("atmel").unwrap();
//! assert_eq!(engine.extract_series("ATMEGA328P-PU", handler).as_deref(), Some("ATMEGA328"));
//! assert!(engine.is_official_replacement("ATMEGA328P-PU", "ATMEGA328P-AU", handler));
//! ```
//!
//! # Features
//!
//! - **Classification**: permissive-union dispatch over per-vendor handlers
//! - **Attribute extraction**: series, package, and decoded ratings
//! - **Replacement checks**: series → package → attributes chain,
//!   fail-closed on anything undecodable
//! - **Built-in handlers**: AVR, STM32, chip resistors, two MLCC vendors

pub mod core;
pub mod equivalence;
pub mod error;
pub mod handler;
pub mod handlers;
pub mod mpn;
pub mod registry;
pub mod taxonomy;

// Re-export main types
pub use self::core::{Classification, ClassifierEngine};
pub use equivalence::{ReplacementVerdict, StageOutcome};
pub use error::ConfigError;
pub use handler::ManufacturerHandler;
pub use mpn::Mpn;
pub use registry::{HandlerId, PatternRegistry};
pub use taxonomy::{ComponentType, Taxonomy};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Classification, ClassifierEngine, ComponentType, ConfigError, HandlerId,
        ManufacturerHandler, Mpn, PatternRegistry, ReplacementVerdict, StageOutcome, Taxonomy,
    };
}
