//! Core traits for self-contained rule objects
//!
//! A host validation engine interprets plain rule strings on its own. The
//! predicate checks in [`crate::rules`] are different: the host hands each
//! one the attribute label and the raw value and receives a verdict back.

use crate::foundation::{ValidationError, ValidationErrors};

// ============================================================================
// PREDICATE TRAIT
// ============================================================================

/// The contract every predicate rule object implements.
///
/// `evaluate` never panics for a bad value; it reports the failure as a
/// [`ValidationError`] whose message already has `:attribute` substituted.
///
/// # Examples
///
/// ```rust,ignore
/// use fieldrule::foundation::{Predicate, ValidationError};
///
/// struct NotBlank;
///
/// impl Predicate for NotBlank {
///     fn code(&self) -> &'static str {
///         "not_blank"
///     }
///
///     fn evaluate(&self, attribute: &str, value: &str) -> Result<(), ValidationError> {
///         if value.trim().is_empty() {
///             Err(ValidationError::new("not_blank", format!("The {attribute} is blank.")))
///         } else {
///             Ok(())
///         }
///     }
/// }
/// ```
pub trait Predicate {
    /// Rule family identifier reported on failure.
    fn code(&self) -> &'static str;

    /// Checks one value of the attribute labelled `attribute`.
    fn evaluate(&self, attribute: &str, value: &str) -> Result<(), ValidationError>;
}

impl<P: Predicate + ?Sized> Predicate for &P {
    fn code(&self) -> &'static str {
        (**self).code()
    }

    fn evaluate(&self, attribute: &str, value: &str) -> Result<(), ValidationError> {
        (**self).evaluate(attribute, value)
    }
}

impl<P: Predicate + ?Sized> Predicate for Box<P> {
    fn code(&self) -> &'static str {
        (**self).code()
    }

    fn evaluate(&self, attribute: &str, value: &str) -> Result<(), ValidationError> {
        (**self).evaluate(attribute, value)
    }
}

// ============================================================================
// FAILURE POLICY
// ============================================================================

/// How a run over several predicates treats the first failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FailurePolicy {
    /// Run every predicate and report all failures.
    #[default]
    CollectAll,
    /// Stop at the first failing predicate.
    StopOnFirst,
}

/// Runs `predicates` in order against one value.
///
/// Every reported error carries `attribute` as its field.
pub fn evaluate_all<'a, I, P>(
    predicates: I,
    attribute: &str,
    value: &str,
    policy: FailurePolicy,
) -> Result<(), ValidationErrors>
where
    I: IntoIterator<Item = &'a P>,
    P: Predicate + ?Sized + 'a,
{
    let mut errors = ValidationErrors::new();

    for predicate in predicates {
        if let Err(error) = predicate.evaluate(attribute, value) {
            tracing::trace!(code = predicate.code(), attribute, "predicate failed");
            errors.add(error.with_field(attribute.to_owned()));
            if policy == FailurePolicy::StopOnFirst {
                break;
            }
        }
    }

    errors.into_result()
}

// ============================================================================
// TESTS
// ============================================================================
