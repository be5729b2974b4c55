//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use fieldrule::prelude::*;
//!
//! let rules = RuleSpecBuilder::in_list(["draft", "published"]).build();
//! ```

// ============================================================================
// FOUNDATION: Traits, errors, policy
// ============================================================================

pub use crate::foundation::{
    ConfigError, ConfigResult, FailurePolicy, Predicate, ValidationError, ValidationErrors,
    ValidationResult, evaluate_all,
};

// ============================================================================
// BUILDER AND OUTPUT
// ============================================================================

pub use crate::builder::{FamilyGroup, RuleFamily, RuleSpecBuilder};
pub use crate::message::{CustomMessageRegistry, MessageKey, MessageTemplate};
pub use crate::token::{RuleSet, RuleToken};

// ============================================================================
// ENCODING
// ============================================================================

pub use crate::encoding::{HasScalarValue, HasSymbolicName, ListValue, Scalar};

// ============================================================================
// PREDICATES
// ============================================================================

#[allow(clippy::wildcard_imports)]
pub use crate::rules::*;
