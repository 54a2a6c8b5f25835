//! Tests for classification dispatch over the built-in handlers

use partclass::prelude::*;

fn engine() -> ClassifierEngine {
    ClassifierEngine::with_builtin_handlers().expect("builtin handlers should register")
}

#[test]
fn test_atmega_classifies_as_generic_and_vendor_mcu() {
    let engine = engine();
    let claims = engine.classify("ATMEGA328P-PU", None);

    let atmel = engine.handler_id("atmel").unwrap();
    assert!(claims.contains(&Classification {
        handler: atmel,
        component_type: ComponentType::Microcontroller,
    }));
    assert!(claims.contains(&Classification {
        handler: atmel,
        component_type: ComponentType::AvrMicrocontroller,
    }));
    // Nobody else claims it.
    assert!(claims.iter().all(|c| c.handler == atmel));
}

#[test]
fn test_stm32_classifies_under_target_type() {
    let engine = engine();
    let stmicro = engine.handler_id("stmicro").unwrap();

    let claims = engine.classify("STM32F411CEU6", Some(ComponentType::Microcontroller));
    assert_eq!(
        claims,
        vec![Classification {
            handler: stmicro,
            component_type: ComponentType::Microcontroller,
        }]
    );

    // Asking for a type outside every handler's support set yields nothing.
    assert!(engine
        .classify("STM32F411CEU6", Some(ComponentType::Crystal))
        .is_empty());
}

#[test]
fn test_case_insensitivity() {
    let engine = engine();
    for mpn in [
        "atmega328p-pu",
        "stm32f411ceu6",
        "rc0603fr-0710kl",
        "grm188r71h104ka93d",
    ] {
        let lower = engine.classify(mpn, None);
        let upper = engine.classify(&mpn.to_uppercase(), None);
        assert_eq!(lower, upper, "claims differ for {mpn}");
        assert!(!lower.is_empty(), "expected a claim for {mpn}");
    }
}

#[test]
fn test_classification_is_pure() {
    let engine = engine();
    let first = engine.classify("GRM188R71H104KA93D", None);
    let second = engine.classify("GRM188R71H104KA93D", None);
    assert_eq!(first, second);

    let atmel = engine.handler_id("atmel").unwrap();
    assert_eq!(
        engine.extract_series("ATMEGA328P-PU", atmel),
        engine.extract_series("ATMEGA328P-PU", atmel)
    );
}

#[test]
fn test_scoped_non_leakage_between_mlcc_vendors() {
    let engine = engine();
    let murata = engine.handler_id("murata").unwrap();
    let samsung = engine.handler_id("samsung_em").unwrap();

    // Murata's legacy entry matches the Samsung shape at registry level,
    // so an unscoped fallback would leak the claim across vendors.
    assert!(engine
        .registry()
        .matches("CL10B104KB8NNNC", ComponentType::MlccCapacitor));

    let samsung_claims = engine.classify("CL10B104KB8NNNC", None);
    assert!(samsung_claims.iter().all(|c| c.handler == samsung));
    assert!(!samsung_claims.is_empty());

    let murata_claims = engine.classify("GRM188R71H104KA93D", None);
    assert!(murata_claims.iter().all(|c| c.handler == murata));
    assert!(!murata_claims.is_empty());
}

#[test]
fn test_series_and_package_extraction() {
    let engine = engine();
    let atmel = engine.handler_id("atmel").unwrap();

    assert_eq!(
        engine.extract_series("ATMEGA328P-PU", atmel).as_deref(),
        Some("ATMEGA328")
    );
    // -PU resolves to the through-hole package family.
    assert_eq!(
        engine.extract_package_code("ATMEGA328P-PU", atmel).as_deref(),
        Some("PDIP")
    );

    // Foreign shape decodes to nothing under this handler.
    assert!(engine.extract_series("STM32F411CEU6", atmel).is_none());
    assert!(engine.extract_package_code("STM32F411CEU6", atmel).is_none());
}

#[test]
fn test_malformed_inputs_never_panic() {
    let engine = engine();
    let atmel = engine.handler_id("atmel").unwrap();

    for input in [
        "",
        "   ",
        "-",
        "!!!",
        "ATMEGA",
        "STM32",
        // Multibyte characters after a valid-looking prefix.
        "GRM188R71É04KA93D",
        "CL10é104KB8NNNC",
        "µC-328",
    ] {
        let claims = engine.classify(input, None);
        assert!(claims.is_empty(), "unexpected claim for {input:?}");
        assert!(engine.extract_series(input, atmel).is_none());
        assert!(engine.extract_package_code(input, atmel).is_none());
        assert!(!engine.is_official_replacement(input, input, atmel));
    }
}

#[test]
fn test_taxonomy_reflects_handler_registrations() {
    let engine = engine();
    let taxonomy = engine.taxonomy();

    assert_eq!(
        taxonomy.base_type_of(ComponentType::AvrMicrocontroller),
        Some(ComponentType::Microcontroller)
    );
    assert_eq!(
        taxonomy.base_type_of(ComponentType::MlccCapacitor),
        Some(ComponentType::Capacitor)
    );
    assert!(taxonomy.is_specialization_of(
        ComponentType::Stm32Microcontroller,
        ComponentType::Microcontroller
    ));
    assert_eq!(taxonomy.base_type_of(ComponentType::Resistor), None);
}

#[test]
fn test_pattern_for_is_deterministic() {
    let engine = engine();
    let first = engine
        .registry()
        .pattern_for(ComponentType::MlccCapacitor)
        .unwrap()
        .as_str()
        .to_string();
    let second = engine
        .registry()
        .pattern_for(ComponentType::MlccCapacitor)
        .unwrap()
        .as_str()
        .to_string();
    assert_eq!(first, second);
}

#[test]
fn test_engine_is_shareable_across_threads() {
    let engine = std::sync::Arc::new(engine());
    let mut handles = Vec::new();
    for _ in 0..4 {
        let engine = engine.clone();
        handles.push(std::thread::spawn(move || {
            engine.classify("ATMEGA328P-PU", None).len()
        }));
    }
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 2);
    }
}
