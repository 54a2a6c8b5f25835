//! Replacement-equivalence scaffolding.
//!
//! Every handler's replacement judgment follows the same three-stage
//! chain, short-circuiting on the first stage that does not pass:
//!
//! 1. series: both MPNs decode to the same series, or to a pair the
//!    handler declares compatible;
//! 2. package: both decode to the same package, or to packages the
//!    handler's package-class rule declares substitutable;
//! 3. attributes: handler-specific comparison of the remaining encoded
//!    ratings (voltage, tolerance, flash size, speed grade, ...).
//!
//! The chain never panics. An attribute that fails to decode on either
//! side fails the check closed ([`StageOutcome::Undecodable`]): absence of
//! information is absence of equivalence.

use crate::handler::ManufacturerHandler;
use crate::mpn::Mpn;
use serde::Serialize;

/// Result of one stage of the replacement chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageOutcome {
    Passed,
    Failed,
    /// A value the stage needed could not be decoded from one of the
    /// MPNs. Treated as a rejection, never as a pass.
    Undecodable,
    /// An earlier stage rejected the pair, so this stage never ran.
    Skipped,
}

/// The inspectable outcome of a replacement judgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReplacementVerdict {
    pub series: StageOutcome,
    pub package: StageOutcome,
    pub attributes: StageOutcome,
}

impl ReplacementVerdict {
    /// True only when every stage passed.
    pub fn accepted(&self) -> bool {
        self.series == StageOutcome::Passed
            && self.package == StageOutcome::Passed
            && self.attributes == StageOutcome::Passed
    }
}

/// Run the generic chain for `handler`, judging whether `replacement` may
/// substitute for `original`. The direction matters: handler-declared
/// compatibilities are not automatically symmetric.
pub fn evaluate<H: ManufacturerHandler + ?Sized>(
    handler: &H,
    original: &Mpn,
    replacement: &Mpn,
) -> ReplacementVerdict {
    let mut verdict = ReplacementVerdict {
        series: StageOutcome::Skipped,
        package: StageOutcome::Skipped,
        attributes: StageOutcome::Skipped,
    };

    let series_a = handler.extract_series(original);
    let series_b = handler.extract_series(replacement);
    verdict.series = if series_a.is_empty() || series_b.is_empty() {
        StageOutcome::Undecodable
    } else if handler.series_compatible(&series_a, &series_b) {
        StageOutcome::Passed
    } else {
        StageOutcome::Failed
    };
    if verdict.series != StageOutcome::Passed {
        return verdict;
    }

    let package_a = handler.extract_package_code(original);
    let package_b = handler.extract_package_code(replacement);
    verdict.package = if package_a.is_empty() || package_b.is_empty() {
        StageOutcome::Undecodable
    } else if handler.package_compatible(&package_a, &package_b) {
        StageOutcome::Passed
    } else {
        StageOutcome::Failed
    };
    if verdict.package != StageOutcome::Passed {
        return verdict;
    }

    verdict.attributes = handler.compare_attributes(original, replacement);
    verdict
}

/// Monotonic dominance, "higher is better": the replacement's rating must
/// be greater than or equal to the original's (power, voltage, flash,
/// speed grade). Fails closed when either side is missing.
pub fn at_least<T: PartialOrd>(original: Option<T>, replacement: Option<T>) -> StageOutcome {
    match (original, replacement) {
        (Some(orig), Some(repl)) => {
            if repl >= orig {
                StageOutcome::Passed
            } else {
                StageOutcome::Failed
            }
        }
        _ => StageOutcome::Undecodable,
    }
}

/// Monotonic dominance, "lower is better": the replacement's rating must
/// be less than or equal to the original's (tolerance percent, stability
/// ppm). Fails closed when either side is missing.
pub fn at_most<T: PartialOrd>(original: Option<T>, replacement: Option<T>) -> StageOutcome {
    match (original, replacement) {
        (Some(orig), Some(repl)) => {
            if repl <= orig {
                StageOutcome::Passed
            } else {
                StageOutcome::Failed
            }
        }
        _ => StageOutcome::Undecodable,
    }
}

/// Exact equality of a decoded value (a rating that must not change at
/// all, e.g. resistance or capacitance). Fails closed on missing values.
pub fn exactly<T: PartialEq>(original: Option<T>, replacement: Option<T>) -> StageOutcome {
    match (original, replacement) {
        (Some(orig), Some(repl)) => {
            if repl == orig {
                StageOutcome::Passed
            } else {
                StageOutcome::Failed
            }
        }
        _ => StageOutcome::Undecodable,
    }
}

/// Combine several attribute checks. Undecodable wins over Failed so the
/// caller can see that information was missing rather than contradictory.
pub fn all_of(outcomes: impl IntoIterator<Item = StageOutcome>) -> StageOutcome {
    let mut combined = StageOutcome::Passed;
    for outcome in outcomes {
        match outcome {
            StageOutcome::Undecodable => return StageOutcome::Undecodable,
            StageOutcome::Failed => combined = StageOutcome::Failed,
            StageOutcome::Passed | StageOutcome::Skipped => {}
        }
    }
    combined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_least() {
        assert_eq!(at_least(Some(16), Some(32)), StageOutcome::Passed);
        assert_eq!(at_least(Some(16), Some(16)), StageOutcome::Passed);
        assert_eq!(at_least(Some(32), Some(16)), StageOutcome::Failed);
        assert_eq!(at_least::<u32>(None, Some(16)), StageOutcome::Undecodable);
        assert_eq!(at_least(Some(16), None), StageOutcome::Undecodable);
    }

    #[test]
    fn test_at_most() {
        assert_eq!(at_most(Some(5.0), Some(1.0)), StageOutcome::Passed);
        assert_eq!(at_most(Some(1.0), Some(5.0)), StageOutcome::Failed);
        assert_eq!(at_most::<f64>(None, None), StageOutcome::Undecodable);
    }

    #[test]
    fn test_exactly() {
        assert_eq!(exactly(Some(100), Some(100)), StageOutcome::Passed);
        assert_eq!(exactly(Some(100), Some(101)), StageOutcome::Failed);
        assert_eq!(exactly::<u32>(Some(100), None), StageOutcome::Undecodable);
    }

    #[test]
    fn test_all_of_precedence() {
        use StageOutcome::*;
        assert_eq!(all_of([Passed, Passed]), Passed);
        assert_eq!(all_of([Passed, Failed]), Failed);
        assert_eq!(all_of([Failed, Undecodable]), Undecodable);
        assert_eq!(all_of([]), Passed);
    }

    #[test]
    fn test_verdict_accepted() {
        use StageOutcome::*;
        let accepted = ReplacementVerdict {
            series: Passed,
            package: Passed,
            attributes: Passed,
        };
        assert!(accepted.accepted());
        let short_circuited = ReplacementVerdict {
            series: Failed,
            package: Skipped,
            attributes: Skipped,
        };
        assert!(!short_circuited.accepted());
    }
}
