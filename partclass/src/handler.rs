//! The pluggable manufacturer handler contract.
//!
//! One handler exists per manufacturer family. A handler contributes its
//! pattern entries and taxonomy edges at registration time, answers
//! classification queries (with an optional shortcut path ahead of the
//! generic registry fallback), decodes series and package attributes, and
//! judges replacement equivalence via the generic chain in
//! [`crate::equivalence`].

use crate::equivalence::{self, ReplacementVerdict, StageOutcome};
use crate::error::ConfigError;
use crate::mpn::Mpn;
use crate::registry::{HandlerId, PatternRegistry};
use crate::taxonomy::{ComponentType, Taxonomy};

pub trait ManufacturerHandler: Send + Sync {
    /// Stable identity, used for registry scoping and dispatch.
    fn id(&self) -> HandlerId;

    /// Human-readable manufacturer name for listings.
    fn name(&self) -> &str {
        self.id().as_str()
    }

    /// Register this handler's (type, pattern) entries. Called once while
    /// the engine assembles; a non-compiling pattern aborts assembly.
    fn initialize_patterns(&self, registry: &mut PatternRegistry) -> Result<(), ConfigError>;

    /// Contribute specific → base taxonomy edges. Default: none.
    fn register_taxonomy(&self, _taxonomy: &mut Taxonomy) -> Result<(), ConfigError> {
        Ok(())
    }

    /// The component types this handler can ever return. Used by the
    /// dispatcher to prune candidate handlers.
    fn supported_types(&self) -> &[ComponentType];

    /// Does this handler claim `mpn` as `component_type`?
    ///
    /// The default falls back to the unscoped registry check. Handlers
    /// whose patterns overlap other vendors' shapes override this with
    /// shortcut logic (fixed prefix set, then a registry lookup scoped to
    /// their own entries) so generic dispatch cannot leak a foreign MPN
    /// into their claim set.
    fn classify(
        &self,
        mpn: &Mpn,
        component_type: ComponentType,
        registry: &PatternRegistry,
    ) -> bool {
        registry.matches(mpn.normalized(), component_type)
    }

    /// Best-effort series decode. Empty string when the MPN does not
    /// match this handler's expected shape; never panics.
    fn extract_series(&self, mpn: &Mpn) -> String;

    /// Best-effort package decode. Same contract as [`Self::extract_series`].
    fn extract_package_code(&self, mpn: &Mpn) -> String;

    /// May `replacement`'s series substitute for `original`'s? Directional:
    /// a handler may declare a higher-grade series as a valid stand-in for
    /// a standard one without the reverse holding. Default: equality.
    fn series_compatible(&self, original: &str, replacement: &str) -> bool {
        original == replacement
    }

    /// May `replacement`'s package substitute for `original`'s? Handlers
    /// with a package-class rule (e.g. every package variant of one die is
    /// catalog-substitutable) override this. Default: equality.
    fn package_compatible(&self, original: &str, replacement: &str) -> bool {
        original == replacement
    }

    /// Compare the remaining encoded ratings. Default passes, which is
    /// only correct for handlers whose MPN grammar encodes nothing beyond
    /// series and package. Implementations must fail closed
    /// ([`StageOutcome::Undecodable`]) when a needed rating is missing on
    /// either side.
    fn compare_attributes(&self, _original: &Mpn, _replacement: &Mpn) -> StageOutcome {
        StageOutcome::Passed
    }

    /// Full replacement judgment. The default runs the generic
    /// series → package → attributes chain and is what nearly every
    /// handler wants; override only to special-case pairs outside it.
    fn is_official_replacement(&self, original: &Mpn, replacement: &Mpn) -> bool {
        self.replacement_verdict(original, replacement).accepted()
    }

    /// The inspectable form of [`Self::is_official_replacement`].
    fn replacement_verdict(&self, original: &Mpn, replacement: &Mpn) -> ReplacementVerdict {
        equivalence::evaluate(self, original, replacement)
    }
}
