//! Built-in predicate checks
//!
//! Self-contained rule objects that judge a single value on their own,
//! independent of the host engine's rule-string grammar.
//!
//! # Categories
//!
//! - **Case**: [`UppercaseFirstLetter`], [`LowercaseFirstLetter`],
//!   [`UppercaseWord`], [`LowercaseWord`]
//! - **Character class**: [`OnlyLettersAndSpaces`]
//! - **Separated lists**: [`SeparateIntegersByComma`],
//!   [`SeparateStringsByComma`], [`SeparateStringsByUnderscore`]
//! - **Timezone**: [`TimezoneValidation`], [`TimezoneRegionValidation`]
//!
//! [`PredicateCheck`] closes the set so assembled rule lists stay `Clone`,
//! comparable, and serializable.

mod case;
mod separator;
mod timezone;
pub mod tzdata;

pub use case::{
    LetterCase, LowercaseFirstLetter, LowercaseWord, UppercaseFirstLetter, UppercaseWord,
};
pub use separator::{
    OnlyLettersAndSpaces, SeparateIntegersByComma, SeparateStringsByComma,
    SeparateStringsByUnderscore,
};
pub use timezone::{TimezoneRegionValidation, TimezoneValidation};
pub use tzdata::{TimezoneRegion, identifiers as tz_identifiers};

use crate::builder::RuleFamily;
use crate::foundation::{Predicate, ValidationError};
use crate::message::MessageTemplate;

// ============================================================================
// CLOSED PREDICATE SET
// ============================================================================

/// Any built-in predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "rule", rename_all = "snake_case"))]
pub enum PredicateCheck {
    UppercaseFirstLetter(UppercaseFirstLetter),
    LowercaseFirstLetter(LowercaseFirstLetter),
    UppercaseWord(UppercaseWord),
    LowercaseWord(LowercaseWord),
    OnlyLettersAndSpaces(OnlyLettersAndSpaces),
    Timezones(TimezoneValidation),
    TimezoneRegion(TimezoneRegionValidation),
    SeparateIntegersByComma(SeparateIntegersByComma),
    SeparateStringsByComma(SeparateStringsByComma),
    SeparateStringsByUnderscore(SeparateStringsByUnderscore),
}

impl PredicateCheck {
    fn inner(&self) -> &dyn Predicate {
        match self {
            Self::UppercaseFirstLetter(p) => p,
            Self::LowercaseFirstLetter(p) => p,
            Self::UppercaseWord(p) => p,
            Self::LowercaseWord(p) => p,
            Self::OnlyLettersAndSpaces(p) => p,
            Self::Timezones(p) => p,
            Self::TimezoneRegion(p) => p,
            Self::SeparateIntegersByComma(p) => p,
            Self::SeparateStringsByComma(p) => p,
            Self::SeparateStringsByUnderscore(p) => p,
        }
    }
}

impl Predicate for PredicateCheck {
    fn code(&self) -> &'static str {
        self.inner().code()
    }

    fn evaluate(&self, attribute: &str, value: &str) -> Result<(), ValidationError> {
        self.inner().evaluate(attribute, value)
    }
}

macro_rules! predicate_from {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        impl PredicateCheck {
            /// The rule family this check belongs to.
            #[must_use]
            pub const fn family(&self) -> RuleFamily {
                match self {
                    $(Self::$variant(_) => RuleFamily::$variant,)+
                }
            }

            /// Replaces the check's custom failure message.
            #[must_use = "builder methods must be chained or built"]
            pub fn with_message(self, message: MessageTemplate) -> Self {
                match self {
                    $(Self::$variant(check) => Self::$variant(check.with_message(message)),)+
                }
            }
        }

        $(
            impl From<$ty> for PredicateCheck {
                fn from(check: $ty) -> Self {
                    Self::$variant(check)
                }
            }

            impl From<$ty> for $crate::token::RuleToken {
                fn from(check: $ty) -> Self {
                    Self::Predicate(PredicateCheck::$variant(check))
                }
            }
        )+
    };
}

predicate_from! {
    UppercaseFirstLetter(UppercaseFirstLetter),
    LowercaseFirstLetter(LowercaseFirstLetter),
    UppercaseWord(UppercaseWord),
    LowercaseWord(LowercaseWord),
    OnlyLettersAndSpaces(OnlyLettersAndSpaces),
    Timezones(TimezoneValidation),
    TimezoneRegion(TimezoneRegionValidation),
    SeparateIntegersByComma(SeparateIntegersByComma),
    SeparateStringsByComma(SeparateStringsByComma),
    SeparateStringsByUnderscore(SeparateStringsByUnderscore),
}
