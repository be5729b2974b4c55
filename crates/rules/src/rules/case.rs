//! Letter case and word shape predicates.

use std::sync::LazyLock;

use regex::Regex;

use crate::builder::RuleFamily;
use crate::foundation::{Predicate, ValidationError};
use crate::message::{MessageTemplate, render_or_default};

static LETTERS_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{L}+$").expect("letters pattern is a valid regex"));

static NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?\s*$")
        .expect("numeric pattern is a valid regex")
});

// ============================================================================
// LETTER CASE
// ============================================================================

/// Which case a check expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LetterCase {
    Upper,
    Lower,
}

impl LetterCase {
    /// `"uppercase"` or `"lowercase"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Upper => "uppercase",
            Self::Lower => "lowercase",
        }
    }

    /// Returns true if case-mapping `text` leaves it unchanged.
    #[must_use]
    pub fn holds_for(self, text: &str) -> bool {
        match self {
            Self::Upper => text.to_uppercase() == text,
            Self::Lower => text.to_lowercase() == text,
        }
    }
}

fn is_numeric(value: &str) -> bool {
    NUMERIC.is_match(value)
}

fn first_letter(
    case: LetterCase,
    code: &'static str,
    message: Option<&MessageTemplate>,
    attribute: &str,
    value: &str,
) -> Result<(), ValidationError> {
    let values = [("attribute", attribute), ("input", value)];

    if is_numeric(value) {
        return Err(ValidationError::new(
            code,
            render_or_default(None, "The :attribute must be an alphabetical string.", &values),
        )
        .with_param("input", value.to_owned()));
    }

    let first = value.chars().next().map(String::from).unwrap_or_default();
    if case.holds_for(&first) {
        return Ok(());
    }

    let default = match case {
        LetterCase::Upper => "The first character of :attribute must be uppercase.",
        LetterCase::Lower => "The first character of :attribute must be lowercase.",
    };
    Err(
        ValidationError::new(code, render_or_default(message, default, &values))
            .with_param("input", value.to_owned()),
    )
}

fn single_word(
    case: LetterCase,
    code: &'static str,
    message: Option<&MessageTemplate>,
    attribute: &str,
    value: &str,
) -> Result<(), ValidationError> {
    let count = value.split_whitespace().count().to_string();
    let values = [("attribute", attribute), ("input", value), ("count", count.as_str())];

    if value.split_whitespace().nth(1).is_some() {
        let default = match case {
            LetterCase::Upper => {
                "The :attribute (:input) must be one uppercase word. (:count) words given."
            }
            LetterCase::Lower => {
                "The :attribute (:input) must be one lowercase word. (:count) words given."
            }
        };
        return Err(ValidationError::new(code, render_or_default(None, default, &values))
            .with_param("count", count.clone()));
    }

    if !LETTERS_ONLY.is_match(value) {
        return Err(ValidationError::new(
            code,
            render_or_default(None, "The :attribute (:input) must be an alphabetic word.", &values),
        )
        .with_param("input", value.to_owned()));
    }

    if case.holds_for(value) {
        return Ok(());
    }

    let default = match case {
        LetterCase::Upper => "The :attribute (:input) must be an uppercase word.",
        LetterCase::Lower => "The :attribute (:input) must be a lowercase word.",
    };
    Err(ValidationError::new(code, render_or_default(message, default, &values))
        .with_param("input", value.to_owned()))
}

// ============================================================================
// PREDICATES
// ============================================================================

macro_rules! case_predicate {
    (
        $(#[$meta:meta])*
        $name:ident => $check:ident($case:expr, $family:expr)
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name {
            message: Option<MessageTemplate>,
        }

        impl $name {
            /// Creates the check with its default messages.
            #[must_use]
            pub fn new() -> Self {
                Self { message: None }
            }

            /// Replaces the case-mismatch message.
            #[must_use = "builder methods must be chained or built"]
            pub fn with_message(mut self, message: MessageTemplate) -> Self {
                self.message = Some(message);
                self
            }

            /// The custom message, if one was configured.
            #[must_use]
            pub fn message(&self) -> Option<&MessageTemplate> {
                self.message.as_ref()
            }
        }

        impl Predicate for $name {
            fn code(&self) -> &'static str {
                $family.id()
            }

            fn evaluate(&self, attribute: &str, value: &str) -> Result<(), ValidationError> {
                $check($case, self.code(), self.message.as_ref(), attribute, value)
            }
        }
    };
}

case_predicate! {
    /// The first character must be uppercase; numeric-only values fail.
    ///
    /// ```rust,ignore
    /// use fieldrule::rules::UppercaseFirstLetter;
    ///
    /// let check = UppercaseFirstLetter::new();
    /// assert!(check.evaluate("name", "Tbilisi").is_ok());
    /// assert!(check.evaluate("name", "tbilisi").is_err());
    /// ```
    UppercaseFirstLetter => first_letter(LetterCase::Upper, RuleFamily::UppercaseFirstLetter)
}

case_predicate! {
    /// The first character must be lowercase; numeric-only values fail.
    LowercaseFirstLetter => first_letter(LetterCase::Lower, RuleFamily::LowercaseFirstLetter)
}

case_predicate! {
    /// Exactly one word of letters, all uppercase.
    ///
    /// Failures are reported in this order: more than one word (with the
    /// count), non-letter characters, then case.
    UppercaseWord => single_word(LetterCase::Upper, RuleFamily::UppercaseWord)
}

case_predicate! {
    /// Exactly one word of letters, all lowercase.
    LowercaseWord => single_word(LetterCase::Lower, RuleFamily::LowercaseWord)
}
