//! Core validation types and traits
//!
//! - **Traits**: [`Predicate`], the contract of self-contained rule objects
//! - **Errors**: [`ValidationError`], [`ValidationErrors`] for failing values,
//!   [`ConfigError`] for malformed rule specifications
//! - **Policy**: [`FailurePolicy`] and [`evaluate_all`] for running several
//!   predicates against one value

pub mod error;
pub mod traits;

pub use error::{ConfigError, ValidationError, ValidationErrors};
pub use traits::{FailurePolicy, Predicate, evaluate_all};

/// A validation result using the standard `ValidationError`.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result of a fallible builder step.
pub type ConfigResult<T> = Result<T, ConfigError>;
