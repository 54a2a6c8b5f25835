//! Engine assembly and dispatch.
//!
//! [`ClassifierEngine`] owns the taxonomy, the pattern registry, and the
//! registered handlers. Registration happens once at process start and can
//! fail (bad pattern, taxonomy cycle, duplicate handler id); every query
//! after that is a pure read over immutable compiled state, so a built
//! engine is freely shareable across threads.

use crate::equivalence::ReplacementVerdict;
use crate::error::ConfigError;
use crate::handler::ManufacturerHandler;
use crate::mpn::Mpn;
use crate::registry::{HandlerId, PatternRegistry};
use crate::taxonomy::{ComponentType, Taxonomy};
use serde::Serialize;
use std::sync::Arc;

/// One (handler, type) claim on an MPN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub handler: HandlerId,
    pub component_type: ComponentType,
}

/// The classification and replacement-equivalence engine.
pub struct ClassifierEngine {
    handlers: Vec<Arc<dyn ManufacturerHandler>>,
    registry: PatternRegistry,
    taxonomy: Taxonomy,
}

impl ClassifierEngine {
    /// An empty engine. Register handlers before querying.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            registry: PatternRegistry::new(),
            taxonomy: Taxonomy::new(),
        }
    }

    /// An engine with every built-in manufacturer handler registered.
    pub fn with_builtin_handlers() -> Result<Self, ConfigError> {
        let mut engine = Self::new();
        for handler in crate::handlers::builtin_handlers() {
            engine.register_handler(handler)?;
        }
        Ok(engine)
    }

    /// Register one handler: taxonomy edges first, then pattern entries.
    /// Any failure is a fatal configuration error and leaves the engine
    /// unfit for use.
    pub fn register_handler(
        &mut self,
        handler: Arc<dyn ManufacturerHandler>,
    ) -> Result<(), ConfigError> {
        let id = handler.id();
        if self.handlers.iter().any(|h| h.id() == id) {
            return Err(ConfigError::DuplicateHandler { handler: id });
        }

        handler.register_taxonomy(&mut self.taxonomy)?;
        handler.initialize_patterns(&mut self.registry)?;

        tracing::info!(
            handler = %id,
            patterns = self.registry.entry_count_for_handler(id),
            "registered handler"
        );
        self.handlers.push(handler);
        Ok(())
    }

    /// Classify an MPN, optionally restricted to one requested type.
    ///
    /// With a target type, only handlers whose [`supported_types`] contain
    /// it are consulted; without one, every (handler, supported type) pair
    /// is tried. The result is the permissive union of all claims, in
    /// handler-registration order — an MPN with a genuinely ambiguous
    /// textual shape may be claimed by more than one handler, and no
    /// tie-break is applied here. Callers needing a single answer should
    /// prefer a claim whose type specializes another claim's type (see
    /// [`Taxonomy::is_specialization_of`]) and otherwise take the first.
    ///
    /// Empty and whitespace-only input classifies to the empty set.
    ///
    /// [`supported_types`]: ManufacturerHandler::supported_types
    pub fn classify(
        &self,
        mpn: &str,
        component_type: Option<ComponentType>,
    ) -> Vec<Classification> {
        let mpn = Mpn::new(mpn);
        if mpn.is_empty() {
            return Vec::new();
        }

        let mut claims = Vec::new();
        match component_type {
            Some(requested) => {
                for handler in &self.handlers {
                    if handler.supported_types().contains(&requested)
                        && handler.classify(&mpn, requested, &self.registry)
                    {
                        claims.push(Classification {
                            handler: handler.id(),
                            component_type: requested,
                        });
                    }
                }
            }
            None => {
                for handler in &self.handlers {
                    for &ty in handler.supported_types() {
                        if handler.classify(&mpn, ty, &self.registry) {
                            claims.push(Classification {
                                handler: handler.id(),
                                component_type: ty,
                            });
                        }
                    }
                }
            }
        }

        tracing::debug!(mpn = %mpn.normalized(), claims = claims.len(), "classified");
        claims
    }

    /// Series decode under one handler. `None` for an unknown handler id
    /// or an MPN the handler cannot decode.
    pub fn extract_series(&self, mpn: &str, handler: HandlerId) -> Option<String> {
        let handler = self.handler(handler)?;
        let series = handler.extract_series(&Mpn::new(mpn));
        (!series.is_empty()).then_some(series)
    }

    /// Package decode under one handler. Same contract as
    /// [`Self::extract_series`].
    pub fn extract_package_code(&self, mpn: &str, handler: HandlerId) -> Option<String> {
        let handler = self.handler(handler)?;
        let package = handler.extract_package_code(&Mpn::new(mpn));
        (!package.is_empty()).then_some(package)
    }

    /// May `replacement` substitute for `original` according to `handler`?
    /// Unknown handler ids and undecodable pairs both answer `false`.
    pub fn is_official_replacement(
        &self,
        original: &str,
        replacement: &str,
        handler: HandlerId,
    ) -> bool {
        self.replacement_verdict(original, replacement, handler)
            .map(|v| v.accepted())
            .unwrap_or(false)
    }

    /// The inspectable three-stage chain behind
    /// [`Self::is_official_replacement`]. `None` for an unknown handler.
    pub fn replacement_verdict(
        &self,
        original: &str,
        replacement: &str,
        handler: HandlerId,
    ) -> Option<ReplacementVerdict> {
        let handler = self.handler(handler)?;
        Some(handler.replacement_verdict(&Mpn::new(original), &Mpn::new(replacement)))
    }

    /// Resolve a handler id from user input (case-insensitive).
    pub fn handler_id(&self, name: &str) -> Option<HandlerId> {
        let name = name.trim().to_ascii_lowercase();
        self.handlers
            .iter()
            .map(|h| h.id())
            .find(|id| id.as_str() == name)
    }

    pub fn handlers(&self) -> &[Arc<dyn ManufacturerHandler>] {
        &self.handlers
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    fn handler(&self, id: HandlerId) -> Option<&Arc<dyn ManufacturerHandler>> {
        self.handlers.iter().find(|h| h.id() == id)
    }
}

impl Default for ClassifierEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equivalence::StageOutcome;

    struct BrokenHandler;

    impl ManufacturerHandler for BrokenHandler {
        fn id(&self) -> HandlerId {
            HandlerId("broken")
        }

        fn initialize_patterns(&self, registry: &mut PatternRegistry) -> Result<(), ConfigError> {
            registry.register(self.id(), ComponentType::Diode, r"^1N[0-9+$")
        }

        fn supported_types(&self) -> &[ComponentType] {
            &[ComponentType::Diode]
        }

        fn extract_series(&self, _mpn: &Mpn) -> String {
            String::new()
        }

        fn extract_package_code(&self, _mpn: &Mpn) -> String {
            String::new()
        }
    }

    struct DiodeHandler;

    impl ManufacturerHandler for DiodeHandler {
        fn id(&self) -> HandlerId {
            HandlerId("diodes")
        }

        fn initialize_patterns(&self, registry: &mut PatternRegistry) -> Result<(), ConfigError> {
            registry.register(self.id(), ComponentType::Diode, r"^1N[0-9]{4}[A-Z]?$")
        }

        fn supported_types(&self) -> &[ComponentType] {
            &[ComponentType::Diode]
        }

        fn extract_series(&self, mpn: &Mpn) -> String {
            mpn.normalized()
                .strip_suffix(|c: char| c.is_ascii_alphabetic())
                .unwrap_or(mpn.normalized())
                .to_string()
        }

        fn extract_package_code(&self, _mpn: &Mpn) -> String {
            "DO-35".to_string()
        }
    }

    #[test]
    fn test_invalid_pattern_aborts_registration() {
        let mut engine = ClassifierEngine::new();
        let err = engine.register_handler(Arc::new(BrokenHandler)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }

    #[test]
    fn test_duplicate_handler_rejected() {
        let mut engine = ClassifierEngine::new();
        engine.register_handler(Arc::new(DiodeHandler)).unwrap();
        let err = engine.register_handler(Arc::new(DiodeHandler)).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateHandler { .. }));
    }

    #[test]
    fn test_classify_with_and_without_target() {
        let mut engine = ClassifierEngine::new();
        engine.register_handler(Arc::new(DiodeHandler)).unwrap();

        let claims = engine.classify("1N4148", None);
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].handler, HandlerId("diodes"));
        assert_eq!(claims[0].component_type, ComponentType::Diode);

        let targeted = engine.classify("1N4148", Some(ComponentType::Diode));
        assert_eq!(claims, targeted);

        // A target type no handler supports consults nobody.
        assert!(engine
            .classify("1N4148", Some(ComponentType::Resistor))
            .is_empty());
    }

    #[test]
    fn test_empty_input_is_empty_result() {
        let mut engine = ClassifierEngine::new();
        engine.register_handler(Arc::new(DiodeHandler)).unwrap();
        assert!(engine.classify("", None).is_empty());
        assert!(engine.classify("   ", None).is_empty());
        assert!(engine.extract_series("", HandlerId("diodes")).is_none());
    }

    #[test]
    fn test_unknown_handler_queries() {
        let engine = ClassifierEngine::new();
        let unknown = HandlerId("nobody");
        assert!(engine.extract_series("1N4148", unknown).is_none());
        assert!(engine.extract_package_code("1N4148", unknown).is_none());
        assert!(!engine.is_official_replacement("1N4148", "1N4148", unknown));
        assert!(engine.replacement_verdict("1N4148", "1N4148", unknown).is_none());
    }

    #[test]
    fn test_default_replacement_chain_via_engine() {
        let mut engine = ClassifierEngine::new();
        engine.register_handler(Arc::new(DiodeHandler)).unwrap();
        let id = HandlerId("diodes");

        assert!(engine.is_official_replacement("1N4148", "1N4148W", id));
        let verdict = engine.replacement_verdict("1N4148", "1N4007", id).unwrap();
        assert_eq!(verdict.series, StageOutcome::Failed);
        assert_eq!(verdict.package, StageOutcome::Skipped);
    }

    #[test]
    fn test_handler_id_lookup_case_insensitive() {
        let mut engine = ClassifierEngine::new();
        engine.register_handler(Arc::new(DiodeHandler)).unwrap();
        assert_eq!(engine.handler_id(" Diodes "), Some(HandlerId("diodes")));
        assert_eq!(engine.handler_id("nobody"), None);
    }
}
