//! Built-in manufacturer handlers.
//!
//! These cover a representative slice of vendor part-numbering schemes:
//! two MCU vendors (prefix-keyed alphanumeric grammars), a chip-resistor
//! vendor, and two MLCC vendors whose short size-code shapes overlap and
//! therefore exercise scoped registry matching.

pub mod atmel;
pub mod murata;
pub mod samsung_em;
pub mod stmicro;
pub mod yageo;

use crate::handler::ManufacturerHandler;
use std::sync::Arc;

pub use atmel::AtmelHandler;
pub use murata::MurataHandler;
pub use samsung_em::SamsungEmHandler;
pub use stmicro::StMicroHandler;
pub use yageo::YageoHandler;

/// Every built-in handler, in the order the engine registers them.
pub fn builtin_handlers() -> Vec<Arc<dyn ManufacturerHandler>> {
    vec![
        Arc::new(AtmelHandler),
        Arc::new(StMicroHandler),
        Arc::new(YageoHandler),
        Arc::new(MurataHandler),
        Arc::new(SamsungEmHandler),
    ]
}
