//! # fieldrule
//!
//! A fluent rule-spec builder for host validation engines, plus a handful of
//! self-contained predicate checks.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fieldrule::prelude::*;
//!
//! let rules = RuleSpecBuilder::required()
//!     .numeric()
//!     .email()
//!     .build();
//!
//! // Families come out in a fixed order, not call order.
//! let rendered: Vec<_> = rules.string_rules().collect();
//! assert_eq!(rendered, ["required", "email", "numeric"]);
//! ```
//!
//! ## Output
//!
//! [`RuleSpecBuilder::build`](builder::RuleSpecBuilder::build) returns a
//! [`RuleSet`](token::RuleSet): ordered [`RuleToken`](token::RuleToken)s
//! (rule strings in the host grammar, or predicate objects), the custom
//! message registry, and attribute labels.
//!
//! ## Predicate Checks
//!
//! - **Case**: [`UppercaseFirstLetter`](rules::UppercaseFirstLetter),
//!   [`LowercaseFirstLetter`](rules::LowercaseFirstLetter),
//!   [`UppercaseWord`](rules::UppercaseWord), [`LowercaseWord`](rules::LowercaseWord)
//! - **Separators**: [`SeparateIntegersByComma`](rules::SeparateIntegersByComma),
//!   [`SeparateStringsByComma`](rules::SeparateStringsByComma),
//!   [`SeparateStringsByUnderscore`](rules::SeparateStringsByUnderscore)
//! - **Timezones**: [`TimezoneValidation`](rules::TimezoneValidation),
//!   [`TimezoneRegionValidation`](rules::TimezoneRegionValidation)

// ValidationError carries inline params and is returned by every predicate.
#![allow(clippy::result_large_err)]

#[macro_use]
mod macros;

pub mod builder;
pub mod encoding;
pub mod foundation;
pub mod message;
pub mod prelude;
pub mod rules;
pub mod token;
