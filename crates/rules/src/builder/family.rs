//! Rule family identifiers and their fixed assembly order.

use std::fmt;
use std::str::FromStr;

use crate::foundation::ConfigError;

/// Section of the assembled rule list a family belongs to.
///
/// Sections appear in declaration order; families never move between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FamilyGroup {
    Defaults,
    Network,
    Numeric,
    String,
    CaseAndWord,
    DateAndTimezone,
    Pattern,
    Array,
}

macro_rules! rule_families {
    ($($variant:ident => $id:literal in $group:ident),+ $(,)?) => {
        /// One validation concern the builder can configure.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
        pub enum RuleFamily {
            $($variant,)+
        }

        impl RuleFamily {
            /// Every family, in the order tokens are assembled.
            pub const ASSEMBLY_ORDER: &'static [RuleFamily] = &[$(RuleFamily::$variant,)+];

            /// Stable identifier; also the key of family-level custom messages.
            #[must_use]
            pub const fn id(self) -> &'static str {
                match self {
                    $(Self::$variant => $id,)+
                }
            }

            /// The section of the rule list this family is assembled in.
            #[must_use]
            pub const fn group(self) -> FamilyGroup {
                match self {
                    $(Self::$variant => FamilyGroup::$group,)+
                }
            }
        }

        impl FromStr for RuleFamily {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($id => Ok(Self::$variant),)+
                    other => Err(ConfigError::UnknownRuleFamily(other.to_owned())),
                }
            }
        }
    };
}

rule_families! {
    Required => "required" in Defaults,
    Nullable => "nullable" in Defaults,
    Boolean => "boolean" in Defaults,
    In => "in" in Defaults,
    NotIn => "not_in" in Defaults,
    Email => "email" in Defaults,
    UniqueEmail => "unique" in Defaults,
    HexColor => "hex_color" in Defaults,
    Uuid => "uuid" in Defaults,
    Ulid => "ulid" in Defaults,

    Ip => "ip" in Network,
    Ipv4 => "ipv4" in Network,
    Ipv6 => "ipv6" in Network,
    MacAddress => "mac_address" in Network,

    Size => "size" in Numeric,
    Min => "min" in Numeric,
    Max => "max" in Numeric,
    Integer => "integer" in Numeric,
    Numeric => "numeric" in Numeric,
    Decimal => "decimal" in Numeric,
    Digits => "digits" in Numeric,
    DigitsBetween => "digits_between" in Numeric,
    MinDigits => "min_digits" in Numeric,
    MaxDigits => "max_digits" in Numeric,

    String => "string" in String,
    Alpha => "alpha" in String,
    AlphaDash => "alpha_dash" in String,
    AlphaNum => "alpha_num" in String,
    Uppercase => "uppercase" in String,
    Lowercase => "lowercase" in String,
    Json => "json" in String,
    Url => "url" in String,
    StartsWith => "starts_with" in String,
    EndsWith => "ends_with" in String,
    DoesntStartWith => "doesnt_start_with" in String,
    DoesntEndWith => "doesnt_end_with" in String,

    UppercaseFirstLetter => "uppercase_first_letter" in CaseAndWord,
    LowercaseFirstLetter => "lowercase_first_letter" in CaseAndWord,
    UppercaseWord => "uppercase_word" in CaseAndWord,
    LowercaseWord => "lowercase_word" in CaseAndWord,
    OnlyLettersAndSpaces => "only_letters_and_spaces" in CaseAndWord,

    Date => "date" in DateAndTimezone,
    DateEquals => "date_equals" in DateAndTimezone,
    Before => "before" in DateAndTimezone,
    DateFormat => "date_format" in DateAndTimezone,
    Timezone => "timezone" in DateAndTimezone,
    Timezones => "timezones" in DateAndTimezone,
    TimezoneRegion => "timezone_region" in DateAndTimezone,
    BeforeOrEqual => "before_or_equal" in DateAndTimezone,
    AfterOrEqualToday => "after_or_equal_today" in DateAndTimezone,
    After => "after" in DateAndTimezone,
    AfterOrEqual => "after_or_equal" in DateAndTimezone,

    Regex => "regex" in Pattern,
    SeparateIntegersByComma => "separate_integers_by_comma" in Pattern,
    SeparateStringsByComma => "separate_strings_by_comma" in Pattern,
    SeparateStringsByUnderscore => "separate_strings_by_underscore" in Pattern,

    Array => "array" in Array,
    Distinct => "distinct" in Array,
    DistinctStrict => "distinct_strict" in Array,
    DistinctIgnoreCase => "distinct_ignore_case" in Array,
}

impl RuleFamily {
    /// Rule name the family's token is rendered under.
    ///
    /// Matches [`id`](Self::id) except for the variants that share a host
    /// rule: `after_or_equal:today` and `distinct:strict`/`distinct:ignore_case`.
    #[must_use]
    pub const fn host_rule(self) -> &'static str {
        match self {
            Self::AfterOrEqualToday => Self::AfterOrEqual.id(),
            Self::DistinctStrict | Self::DistinctIgnoreCase => Self::Distinct.id(),
            other => other.id(),
        }
    }
}

impl fmt::Display for RuleFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
