//! Error types for validation failures and rule configuration
//!
//! Two families of errors live here and they never mix:
//!
//! - [`ValidationError`] / [`ValidationErrors`] describe a *value* that failed
//!   a predicate check. They are data, returned through `Result`, and carry a
//!   rule code, a rendered message and optional parameters.
//! - [`ConfigError`] describes a *malformed rule specification* (for example a
//!   custom message without any placeholder). It is raised at chain-call time.
//!
//! String fields use `Cow<'static, str>` so static codes never allocate.

use std::borrow::Cow;
use std::fmt;

use smallvec::SmallVec;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// Inline capacity for error parameters; predicates attach at most two.
type Params = SmallVec<[(Cow<'static, str>, Cow<'static, str>); 2]>;

/// A single failed rule for one field value.
///
/// # Examples
///
/// ```rust,ignore
/// use fieldrule::foundation::ValidationError;
///
/// let error = ValidationError::new("uppercase_word", "The name must be uppercase word.")
///     .with_field("name")
///     .with_param("input", "hello");
///
/// assert_eq!(error.param("input"), Some("hello"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValidationError {
    /// Rule family identifier, e.g. `"separate_integers_by_comma"`.
    pub code: Cow<'static, str>,

    /// Human-readable message with placeholders already substituted.
    pub message: Cow<'static, str>,

    /// The attribute label the failing value belonged to.
    pub field: Option<Cow<'static, str>>,

    /// Values that shaped the message (input, counts, region...).
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "SmallVec::is_empty"))]
    pub params: Params,
}

impl ValidationError {
    /// Creates a new validation error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            params: SmallVec::new(),
        }
    }

    /// Sets the attribute this error refers to.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "[{}] {}: {}", field, self.code, self.message)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// ERROR COLLECTION
// ============================================================================

/// Every failure collected for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates a new empty error collection.
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Adds an error to the collection.
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns all errors in the order they were reported.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Messages only, in report order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.message.as_ref())
    }

    /// Converts to a Result.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// CONFIGURATION ERROR
// ============================================================================

/// A rule specification that cannot be accepted.
///
/// Raised eagerly by the chain methods that take a message, and by
/// deserialization of a builder from configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The message template has no `:name` placeholder.
    #[error("message template '{template}' has no ':name' placeholder")]
    MissingPlaceholder {
        /// The rejected template text.
        template: String,
    },

    /// The message template is empty or whitespace only.
    #[error("message template is empty")]
    EmptyTemplate,

    /// `with_message` was called before any rule family was configured.
    #[error("no rule has been configured yet to attach a message to")]
    NoRuleToAnnotate,

    /// A rule family identifier did not match any known family.
    #[error("unknown rule family '{0}'")]
    UnknownRuleFamily(String),

    /// A timezone region name did not match any known region.
    #[error("unknown timezone region '{0}'")]
    UnknownRegion(String),

    /// Builder configuration could not be parsed.
    #[error("invalid rule configuration: {0}")]
    Parse(String),
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_error() {
        let error = ValidationError::new("test", "Test error");
        assert_eq!(error.code, "test");
        assert_eq!(error.message, "Test error");
        assert!(error.field.is_none());
    }

    #[test]
    fn test_error_with_field_and_params() {
        let error = ValidationError::new("uppercase_word", "too many words")
            .with_field("name")
            .with_param("count", "2");

        assert_eq!(error.field.as_deref(), Some("name"));
        assert_eq!(error.param("count"), Some("2"));
        assert_eq!(error.param("missing"), None);
        assert_eq!(error.to_string(), "[name] uppercase_word: too many words");
    }

    #[test]
    fn test_error_collection() {
        let mut errors = ValidationErrors::new();
        assert!(errors.clone().into_result().is_ok());

        errors.add(ValidationError::new("error1", "First error"));
        errors.add(ValidationError::new("error2", "Second error"));

        assert_eq!(errors.len(), 2);
        assert!(errors.has_errors());
        assert_eq!(
            errors.messages().collect::<Vec<_>>(),
            vec!["First error", "Second error"]
        );
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_static_code_is_borrowed() {
        let error = ValidationError::new("required", "This field is required");
        assert!(matches!(error.code, Cow::Borrowed(_)));
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::MissingPlaceholder {
            template: "plain".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "message template 'plain' has no ':name' placeholder"
        );
    }
}
