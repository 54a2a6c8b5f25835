//! Configuration errors raised during engine assembly.
//!
//! Only startup registration can fail. Classification misses and decode
//! failures are normal outcomes and are represented as empty results, not
//! errors (see the extraction and equivalence contracts).

use crate::registry::HandlerId;
use crate::taxonomy::ComponentType;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A handler registered a pattern that does not compile. Fatal at
    /// startup so bad rules never reach query time.
    #[error("handler '{handler}' registered an invalid pattern for {component_type}: {source}")]
    InvalidPattern {
        handler: HandlerId,
        component_type: ComponentType,
        #[source]
        source: regex::Error,
    },

    /// A specific type was pointed at a base that itself specializes
    /// another type, or at itself. The base relation is one level deep.
    #[error("taxonomy cycle: {specific} cannot specialize {base}")]
    TaxonomyCycle {
        specific: ComponentType,
        base: ComponentType,
    },

    /// A specific type was registered twice with different bases.
    #[error("taxonomy conflict: {specific} already specializes {existing}, cannot also specialize {requested}")]
    TaxonomyConflict {
        specific: ComponentType,
        existing: ComponentType,
        requested: ComponentType,
    },

    /// Two handlers were registered under the same id.
    #[error("duplicate handler id '{handler}'")]
    DuplicateHandler { handler: HandlerId },
}
