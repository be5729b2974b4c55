//! Fluent rule-spec builder
//!
//! [`RuleSpecBuilder`] keeps one slot per [`RuleFamily`]. Chain methods fill
//! slots; a later call to the same method overwrites the earlier value. The
//! assembled list never follows call order: [`RuleSpecBuilder::rules`] walks
//! [`RuleFamily::ASSEMBLY_ORDER`] and asks [`RuleSpecBuilder::token_for`] for
//! each family.
//!
//! # Examples
//!
//! ```rust,ignore
//! use fieldrule::prelude::*;
//!
//! let rules = RuleSpecBuilder::required()
//!     .string()
//!     .min(3)
//!     .uppercase_word()
//!     .with_message("The :attribute must shout.")?
//!     .build();
//!
//! assert_eq!(rules.rule(0).unwrap(), "required");
//! assert_eq!(rules.rule(2).unwrap(), "string");
//! ```

mod family;

pub use family::{FamilyGroup, RuleFamily};

use indexmap::IndexMap;

use crate::encoding::{ListValue, encode};
use crate::foundation::{ConfigError, ConfigResult};
use crate::message::{CustomMessageRegistry, MessageKey, MessageTemplate};
use crate::rules::{
    LowercaseFirstLetter, LowercaseWord, OnlyLettersAndSpaces, SeparateIntegersByComma,
    SeparateStringsByComma, SeparateStringsByUnderscore, TimezoneRegion,
    TimezoneRegionValidation, TimezoneValidation, UppercaseFirstLetter, UppercaseWord,
};
use crate::token::{RuleSet, RuleToken};

// ============================================================================
// SLOT TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
enum Membership {
    In(Vec<String>),
    NotIn(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
enum Charset {
    Unicode,
    Ascii,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
enum TimezoneScope {
    Any,
    All,
    Group(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct UniqueColumn {
    table: String,
    column: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct RegionCities {
    region: TimezoneRegion,
    cities: Vec<String>,
}

fn resolve_values<I>(values: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<ListValue>,
{
    values
        .into_iter()
        .map(|value| value.into().resolve().into_owned())
        .collect()
}

fn collect_strings<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

fn param_token(family: RuleFamily, param: impl std::fmt::Display) -> RuleToken {
    RuleToken::Rule(format!("{}:{param}", family.host_rule()))
}

fn list_token(family: RuleFamily, items: &[String]) -> RuleToken {
    param_token(family, items.join(","))
}

fn charset_token(family: RuleFamily, charset: Charset) -> RuleToken {
    match charset {
        Charset::Unicode => RuleToken::from(family.host_rule()),
        Charset::Ascii => param_token(family, "ascii"),
    }
}

/// Declares the `timezone_<region>` shorthands.
macro_rules! region_rules {
    ($($method:ident => $region:ident;)+) => {
        $(
            #[doc = concat!("Shorthand for [`timezone_region`](Self::timezone_region) with [`TimezoneRegion::", stringify!($region), "`].")]
            #[must_use = "builder methods must be chained or built"]
            pub fn $method<I, S>(self, cities: I) -> Self
            where
                I: IntoIterator<Item = S>,
                S: Into<String>,
            {
                self.timezone_region(TimezoneRegion::$region, cities)
            }
        )+
    };
}

// ============================================================================
// BUILDER
// ============================================================================

/// Accumulates the validation rules of one field.
///
/// All state is per instance. Arguments are not checked when a chain method
/// is called; bad sizes or patterns surface in the host engine. Only message
/// templates are validated eagerly, see [`with_message`](Self::with_message).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct RuleSpecBuilder {
    // Defaults
    required: bool,
    nullable: bool,
    boolean: bool,
    membership: Option<Membership>,
    email: bool,
    unique_email: Option<UniqueColumn>,
    hex_color: bool,
    uuid: bool,
    ulid: bool,

    // Network
    ip: bool,
    ipv4: bool,
    ipv6: bool,
    mac_address: bool,

    // Numeric
    size: Option<i64>,
    min: Option<i64>,
    max: Option<i64>,
    integer: bool,
    numeric: bool,
    decimal: Option<(u32, Option<u32>)>,
    digits: Option<u32>,
    digits_between: Option<(u32, u32)>,
    min_digits: Option<u32>,
    max_digits: Option<u32>,

    // String
    string: bool,
    alpha: Option<Charset>,
    alpha_dash: Option<Charset>,
    alpha_num: Option<Charset>,
    uppercase: bool,
    lowercase: bool,
    json: bool,
    url: Option<Vec<String>>,
    starts_with: Option<Vec<String>>,
    ends_with: Option<Vec<String>>,
    doesnt_start_with: Option<Vec<String>>,
    doesnt_end_with: Option<Vec<String>>,

    // Case and word shape
    uppercase_first_letter: bool,
    lowercase_first_letter: bool,
    uppercase_word: bool,
    lowercase_word: bool,
    only_letters_and_spaces: bool,

    // Date and timezone
    date: bool,
    date_equals: Option<String>,
    date_before: Option<String>,
    date_format: Option<String>,
    timezone: Option<TimezoneScope>,
    timezones: Option<Vec<String>>,
    timezone_region: Option<RegionCities>,
    date_before_or_equal: Option<String>,
    date_after_or_equal_today: bool,
    date_after: Option<String>,
    date_after_or_equal: Option<String>,

    // Pattern
    regex: Option<String>,
    separate_integers_by_comma: bool,
    separate_strings_by_comma: bool,
    separate_strings_by_underscore: bool,

    // Array
    array: bool,
    distinct: bool,
    distinct_strict: bool,
    distinct_ignore_case: bool,

    extra_rules: Vec<String>,
    messages: CustomMessageRegistry,
    attributes: IndexMap<String, String>,

    #[cfg_attr(feature = "serde", serde(skip))]
    last_family: Option<RuleFamily>,
}

impl RuleSpecBuilder {
    // ------------------------------------------------------------------------
    // Entry points
    // ------------------------------------------------------------------------

    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a spec whose field is required.
    #[must_use]
    pub fn required() -> Self {
        Self::new().require()
    }

    /// Starts a spec whose field may be null.
    #[must_use]
    pub fn nullable() -> Self {
        Self::new().allow_null()
    }

    /// Starts a spec whose value must be one of `values`.
    ///
    /// ```rust,ignore
    /// let rule = RuleSpecBuilder::in_list(["Laravel", "Framework", "PHP"]).rule(0);
    /// assert_eq!(rule.unwrap(), r#"in:"Laravel","Framework","PHP""#);
    /// ```
    #[must_use]
    pub fn in_list<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ListValue>,
    {
        Self::new().one_of(values)
    }

    /// Starts a spec whose value must not be one of `values`.
    #[must_use]
    pub fn not_in_list<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ListValue>,
    {
        Self::new().none_of(values)
    }

    /// Loads builder state from a JSON document.
    ///
    /// Message templates go through the same placeholder check as
    /// [`with_message`](Self::with_message).
    ///
    /// ```rust,ignore
    /// let builder = RuleSpecBuilder::from_json(r#"{
    ///     "required": true,
    ///     "min": 3,
    ///     "messages": { "min": "The :attribute is too short." }
    /// }"#)?;
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let builder: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        tracing::debug!(
            messages = builder.messages.len(),
            extra_rules = builder.extra_rules.len(),
            "rule spec loaded from configuration"
        );
        Ok(builder)
    }

    // ------------------------------------------------------------------------
    // Defaults
    // ------------------------------------------------------------------------

    /// Marks the field as required.
    #[must_use = "builder methods must be chained or built"]
    pub fn require(mut self) -> Self {
        self.required = true;
        self.touch(RuleFamily::Required)
    }

    /// Allows the field to be null.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_null(mut self) -> Self {
        self.nullable = true;
        self.touch(RuleFamily::Nullable)
    }

    /// The value must be one of `values`.
    ///
    /// Shares its slot with [`none_of`](Self::none_of); the last call wins.
    #[must_use = "builder methods must be chained or built"]
    pub fn one_of<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ListValue>,
    {
        self.membership = Some(Membership::In(resolve_values(values)));
        self.touch(RuleFamily::In)
    }

    /// The value must not be one of `values`.
    #[must_use = "builder methods must be chained or built"]
    pub fn none_of<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ListValue>,
    {
        self.membership = Some(Membership::NotIn(resolve_values(values)));
        self.touch(RuleFamily::NotIn)
    }

    flag_rules! {
        /// `boolean`
        boolean => Boolean;
        /// `email`
        email => Email;
        /// `hex_color`
        hex_color => HexColor;
        /// `uuid`
        uuid => Uuid;
        /// `ulid`
        ulid => Ulid;
    }

    /// Email that must be unique in `table.column`. Also enables `email`.
    #[must_use = "builder methods must be chained or built"]
    pub fn unique_email(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.email = true;
        self.unique_email = Some(UniqueColumn {
            table: table.into(),
            column: column.into(),
        });
        self.touch(RuleFamily::UniqueEmail)
    }

    // ------------------------------------------------------------------------
    // Network
    // ------------------------------------------------------------------------

    flag_rules! {
        /// Any IP address.
        ip => Ip;
        /// IPv4 address.
        ipv4 => Ipv4;
        /// IPv6 address.
        ipv6 => Ipv6;
        /// MAC address.
        mac_address => MacAddress;
    }

    // ------------------------------------------------------------------------
    // Numeric
    // ------------------------------------------------------------------------

    /// `size:<n>`
    #[must_use = "builder methods must be chained or built"]
    pub fn size(mut self, size: i64) -> Self {
        self.size = Some(size);
        self.touch(RuleFamily::Size)
    }

    /// `min:<n>`
    #[must_use = "builder methods must be chained or built"]
    pub fn min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self.touch(RuleFamily::Min)
    }

    /// `max:<n>`
    #[must_use = "builder methods must be chained or built"]
    pub fn max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self.touch(RuleFamily::Max)
    }

    flag_rules! {
        /// `integer`
        integer => Integer;
        /// `numeric`
        numeric => Numeric;
    }

    /// `decimal:<precision>` or `decimal:<precision>,<scale>`.
    #[must_use = "builder methods must be chained or built"]
    pub fn decimal(mut self, precision: u32, scale: Option<u32>) -> Self {
        self.decimal = Some((precision, scale));
        self.touch(RuleFamily::Decimal)
    }

    /// Exactly `digits` digits.
    #[must_use = "builder methods must be chained or built"]
    pub fn digits(mut self, digits: u32) -> Self {
        self.digits = Some(digits);
        self.touch(RuleFamily::Digits)
    }

    /// Between `min` and `max` digits.
    #[must_use = "builder methods must be chained or built"]
    pub fn digits_between(mut self, min: u32, max: u32) -> Self {
        self.digits_between = Some((min, max));
        self.touch(RuleFamily::DigitsBetween)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn min_digits(mut self, min: u32) -> Self {
        self.min_digits = Some(min);
        self.touch(RuleFamily::MinDigits)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn max_digits(mut self, max: u32) -> Self {
        self.max_digits = Some(max);
        self.touch(RuleFamily::MaxDigits)
    }

    // ------------------------------------------------------------------------
    // String
    // ------------------------------------------------------------------------

    flag_rules! {
        /// `string`
        string => String;
        /// Every letter uppercase (host rule, not the word predicate).
        uppercase => Uppercase;
        /// Every letter lowercase.
        lowercase => Lowercase;
        /// Valid JSON text.
        json => Json;
    }

    /// Unicode letters only.
    #[must_use = "builder methods must be chained or built"]
    pub fn alpha(mut self) -> Self {
        self.alpha = Some(Charset::Unicode);
        self.touch(RuleFamily::Alpha)
    }

    /// ASCII letters only, `alpha:ascii`.
    #[must_use = "builder methods must be chained or built"]
    pub fn alpha_ascii(mut self) -> Self {
        self.alpha = Some(Charset::Ascii);
        self.touch(RuleFamily::Alpha)
    }

    /// Letters, digits, dashes and underscores.
    #[must_use = "builder methods must be chained or built"]
    pub fn alpha_dash(mut self) -> Self {
        self.alpha_dash = Some(Charset::Unicode);
        self.touch(RuleFamily::AlphaDash)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn alpha_dash_ascii(mut self) -> Self {
        self.alpha_dash = Some(Charset::Ascii);
        self.touch(RuleFamily::AlphaDash)
    }

    /// Letters and digits.
    #[must_use = "builder methods must be chained or built"]
    pub fn alpha_num(mut self) -> Self {
        self.alpha_num = Some(Charset::Unicode);
        self.touch(RuleFamily::AlphaNum)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn alpha_num_ascii(mut self) -> Self {
        self.alpha_num = Some(Charset::Ascii);
        self.touch(RuleFamily::AlphaNum)
    }

    /// A URL, optionally restricted to `protocols`. An empty list renders a
    /// bare `url`.
    #[must_use = "builder methods must be chained or built"]
    pub fn url<I, S>(mut self, protocols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.url = Some(collect_strings(protocols));
        self.touch(RuleFamily::Url)
    }

    /// Must start with one of `prefixes`.
    #[must_use = "builder methods must be chained or built"]
    pub fn starts_with<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.starts_with = Some(collect_strings(prefixes));
        self.touch(RuleFamily::StartsWith)
    }

    /// Must end with one of `suffixes`.
    #[must_use = "builder methods must be chained or built"]
    pub fn ends_with<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ends_with = Some(collect_strings(suffixes));
        self.touch(RuleFamily::EndsWith)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn doesnt_start_with<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.doesnt_start_with = Some(collect_strings(prefixes));
        self.touch(RuleFamily::DoesntStartWith)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn doesnt_end_with<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.doesnt_end_with = Some(collect_strings(suffixes));
        self.touch(RuleFamily::DoesntEndWith)
    }

    // ------------------------------------------------------------------------
    // Case and word shape (predicate tokens)
    // ------------------------------------------------------------------------

    flag_rules! {
        /// Appends an [`UppercaseFirstLetter`] predicate.
        uppercase_first_letter => UppercaseFirstLetter;
        /// Appends a [`LowercaseFirstLetter`] predicate.
        lowercase_first_letter => LowercaseFirstLetter;
        /// Appends an [`UppercaseWord`] predicate.
        uppercase_word => UppercaseWord;
        /// Appends a [`LowercaseWord`] predicate.
        lowercase_word => LowercaseWord;
        /// Appends an [`OnlyLettersAndSpaces`] predicate.
        only_letters_and_spaces => OnlyLettersAndSpaces;
    }

    // ------------------------------------------------------------------------
    // Date and timezone
    // ------------------------------------------------------------------------

    flag_rules! {
        /// `date`
        date => Date;
        /// `after_or_equal:today`
        date_after_or_equal_today => AfterOrEqualToday;
    }

    /// `date_equals:<date>`
    #[must_use = "builder methods must be chained or built"]
    pub fn date_equals(mut self, date: impl Into<String>) -> Self {
        self.date_equals = Some(date.into());
        self.touch(RuleFamily::DateEquals)
    }

    /// `before:<date>`
    #[must_use = "builder methods must be chained or built"]
    pub fn date_before(mut self, date: impl Into<String>) -> Self {
        self.date_before = Some(date.into());
        self.touch(RuleFamily::Before)
    }

    /// `before_or_equal:<date>`
    #[must_use = "builder methods must be chained or built"]
    pub fn date_before_or_equal(mut self, date: impl Into<String>) -> Self {
        self.date_before_or_equal = Some(date.into());
        self.touch(RuleFamily::BeforeOrEqual)
    }

    /// `after:<date>`
    #[must_use = "builder methods must be chained or built"]
    pub fn date_after(mut self, date: impl Into<String>) -> Self {
        self.date_after = Some(date.into());
        self.touch(RuleFamily::After)
    }

    /// `after_or_equal:<date>`
    #[must_use = "builder methods must be chained or built"]
    pub fn date_after_or_equal(mut self, date: impl Into<String>) -> Self {
        self.date_after_or_equal = Some(date.into());
        self.touch(RuleFamily::AfterOrEqual)
    }

    /// `date_format:<format>`
    #[must_use = "builder methods must be chained or built"]
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self.touch(RuleFamily::DateFormat)
    }

    /// Any known timezone identifier, `timezone:all`.
    #[must_use = "builder methods must be chained or built"]
    pub fn timezone(mut self) -> Self {
        self.timezone = Some(TimezoneScope::All);
        self.touch(RuleFamily::Timezone)
    }

    /// A timezone from the host's named group, `timezone:<group>`.
    #[must_use = "builder methods must be chained or built"]
    pub fn timezone_group(mut self, group: impl Into<String>) -> Self {
        self.timezone = Some(TimezoneScope::Group(group.into()));
        self.touch(RuleFamily::Timezone)
    }

    /// Bare `timezone`; the host engine picks the scope.
    #[must_use = "builder methods must be chained or built"]
    pub fn timezone_any(mut self) -> Self {
        self.timezone = Some(TimezoneScope::Any);
        self.touch(RuleFamily::Timezone)
    }

    /// Appends a [`TimezoneValidation`] over `timezones`.
    #[must_use = "builder methods must be chained or built"]
    pub fn timezones<I, S>(mut self, timezones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.timezones = Some(collect_strings(timezones));
        self.touch(RuleFamily::Timezones)
    }

    /// Appends a [`TimezoneRegionValidation`]: the value must be one of
    /// `cities` in `region`, and every city must exist in that region.
    #[must_use = "builder methods must be chained or built"]
    pub fn timezone_region<I, S>(mut self, region: TimezoneRegion, cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.timezone_region = Some(RegionCities {
            region,
            cities: collect_strings(cities),
        });
        self.touch(RuleFamily::TimezoneRegion)
    }

    region_rules! {
        timezone_africa => Africa;
        timezone_america => America;
        timezone_antarctica => Antarctica;
        timezone_arctic => Arctic;
        timezone_asia => Asia;
        timezone_atlantic => Atlantic;
        timezone_australia => Australia;
        timezone_europe => Europe;
        timezone_indian => Indian;
        timezone_pacific => Pacific;
    }

    // ------------------------------------------------------------------------
    // Pattern
    // ------------------------------------------------------------------------

    /// `regex:<pattern>`. The pattern is passed through untouched.
    #[must_use = "builder methods must be chained or built"]
    pub fn regex(mut self, pattern: impl Into<String>) -> Self {
        self.regex = Some(pattern.into());
        self.touch(RuleFamily::Regex)
    }

    flag_rules! {
        /// Appends a [`SeparateIntegersByComma`] predicate.
        separate_integers_by_comma => SeparateIntegersByComma;
        /// Appends a [`SeparateStringsByComma`] predicate.
        separate_strings_by_comma => SeparateStringsByComma;
        /// Appends a [`SeparateStringsByUnderscore`] predicate.
        separate_strings_by_underscore => SeparateStringsByUnderscore;
    }

    // ------------------------------------------------------------------------
    // Array
    // ------------------------------------------------------------------------

    flag_rules! {
        /// `array`
        array => Array;
        /// `distinct`
        distinct => Distinct;
        /// `distinct:strict`
        distinct_strict => DistinctStrict;
        /// `distinct:ignore_case`
        distinct_ignore_case => DistinctIgnoreCase;
    }

    // ------------------------------------------------------------------------
    // Messages, labels and raw rules
    // ------------------------------------------------------------------------

    /// Attaches a custom message to the most recently configured family.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NoRuleToAnnotate`] if no family was configured yet
    /// - [`ConfigError::MissingPlaceholder`] / [`ConfigError::EmptyTemplate`]
    ///   if `message` is not a usable template
    pub fn with_message(self, message: &str) -> ConfigResult<Self> {
        let family = self.last_family.ok_or(ConfigError::NoRuleToAnnotate)?;
        self.message_for(family, message)
    }

    /// Attaches a custom message to `family`.
    ///
    /// # Errors
    ///
    /// Fails when `message` is not a usable template.
    pub fn message_for(mut self, family: RuleFamily, message: &str) -> ConfigResult<Self> {
        let template = MessageTemplate::parse(message)?;
        self.messages.set(family, template);
        Ok(self)
    }

    /// Attaches a custom message to `family` for one attribute only.
    ///
    /// Attribute-scoped messages are handed to the host engine; predicate
    /// tokens only pick up family-wide messages.
    ///
    /// # Errors
    ///
    /// Fails when `message` is not a usable template.
    pub fn attribute_message(
        mut self,
        attribute: impl Into<String>,
        family: RuleFamily,
        message: &str,
    ) -> ConfigResult<Self> {
        let template = MessageTemplate::parse(message)?;
        self.messages
            .set(MessageKey::attribute(family, attribute), template);
        Ok(self)
    }

    /// Display name used for `attribute` in failure messages.
    #[must_use = "builder methods must be chained or built"]
    pub fn attribute_label(
        mut self,
        attribute: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        self.attributes.insert(attribute.into(), label.into());
        self
    }

    /// Raw rule strings placed ahead of every assembled token.
    ///
    /// Replaces any earlier list.
    #[must_use = "builder methods must be chained or built"]
    pub fn extra_rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_rules = collect_strings(rules);
        self
    }

    /// Custom messages registered so far.
    #[must_use]
    pub fn custom_messages(&self) -> &CustomMessageRegistry {
        &self.messages
    }

    /// Attribute display names registered so far.
    #[must_use]
    pub fn attribute_labels(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    fn touch(mut self, family: RuleFamily) -> Self {
        self.last_family = Some(family);
        self
    }

    // ------------------------------------------------------------------------
    // Assembly
    // ------------------------------------------------------------------------

    /// The token `family` contributes, or `None` when its slot is unset.
    #[must_use]
    pub fn token_for(&self, family: RuleFamily) -> Option<RuleToken> {
        use RuleFamily as F;

        let flag = |set: bool| set.then(|| RuleToken::from(family.host_rule()));

        match family {
            F::Required => flag(self.required),
            F::Nullable => flag(self.nullable),
            F::Boolean => flag(self.boolean),
            F::In => match &self.membership {
                Some(Membership::In(values)) => {
                    Some(param_token(family, encode(values.iter().map(String::as_str))))
                }
                _ => None,
            },
            F::NotIn => match &self.membership {
                Some(Membership::NotIn(values)) => {
                    Some(param_token(family, encode(values.iter().map(String::as_str))))
                }
                _ => None,
            },
            F::Email => flag(self.email),
            F::UniqueEmail => self
                .unique_email
                .as_ref()
                .map(|unique| param_token(family, format!("{},{}", unique.table, unique.column))),
            F::HexColor => flag(self.hex_color),
            F::Uuid => flag(self.uuid),
            F::Ulid => flag(self.ulid),

            F::Ip => flag(self.ip),
            F::Ipv4 => flag(self.ipv4),
            F::Ipv6 => flag(self.ipv6),
            F::MacAddress => flag(self.mac_address),

            F::Size => self.size.map(|n| param_token(family, n)),
            F::Min => self.min.map(|n| param_token(family, n)),
            F::Max => self.max.map(|n| param_token(family, n)),
            F::Integer => flag(self.integer),
            F::Numeric => flag(self.numeric),
            F::Decimal => self.decimal.map(|(precision, scale)| match scale {
                Some(scale) => param_token(family, format!("{precision},{scale}")),
                None => param_token(family, precision),
            }),
            F::Digits => self.digits.map(|n| param_token(family, n)),
            F::DigitsBetween => self
                .digits_between
                .map(|(min, max)| param_token(family, format!("{min},{max}"))),
            F::MinDigits => self.min_digits.map(|n| param_token(family, n)),
            F::MaxDigits => self.max_digits.map(|n| param_token(family, n)),

            F::String => flag(self.string),
            F::Alpha => self.alpha.map(|charset| charset_token(family, charset)),
            F::AlphaDash => self.alpha_dash.map(|charset| charset_token(family, charset)),
            F::AlphaNum => self.alpha_num.map(|charset| charset_token(family, charset)),
            F::Uppercase => flag(self.uppercase),
            F::Lowercase => flag(self.lowercase),
            F::Json => flag(self.json),
            F::Url => self.url.as_ref().map(|protocols| {
                if protocols.is_empty() {
                    RuleToken::from(family.host_rule())
                } else {
                    list_token(family, protocols)
                }
            }),
            F::StartsWith => self.starts_with.as_deref().map(|items| list_token(family, items)),
            F::EndsWith => self.ends_with.as_deref().map(|items| list_token(family, items)),
            F::DoesntStartWith => self
                .doesnt_start_with
                .as_deref()
                .map(|items| list_token(family, items)),
            F::DoesntEndWith => self
                .doesnt_end_with
                .as_deref()
                .map(|items| list_token(family, items)),

            F::UppercaseFirstLetter => self.uppercase_first_letter.then(|| {
                self.predicate(family, UppercaseFirstLetter::new(), UppercaseFirstLetter::with_message)
            }),
            F::LowercaseFirstLetter => self.lowercase_first_letter.then(|| {
                self.predicate(family, LowercaseFirstLetter::new(), LowercaseFirstLetter::with_message)
            }),
            F::UppercaseWord => self
                .uppercase_word
                .then(|| self.predicate(family, UppercaseWord::new(), UppercaseWord::with_message)),
            F::LowercaseWord => self
                .lowercase_word
                .then(|| self.predicate(family, LowercaseWord::new(), LowercaseWord::with_message)),
            F::OnlyLettersAndSpaces => self.only_letters_and_spaces.then(|| {
                self.predicate(family, OnlyLettersAndSpaces::new(), OnlyLettersAndSpaces::with_message)
            }),

            F::Date => flag(self.date),
            F::DateEquals => self.date_equals.as_ref().map(|d| param_token(family, d)),
            F::Before => self.date_before.as_ref().map(|d| param_token(family, d)),
            F::DateFormat => self.date_format.as_ref().map(|f| param_token(family, f)),
            F::Timezone => self.timezone.as_ref().map(|scope| match scope {
                TimezoneScope::Any => RuleToken::from(family.host_rule()),
                TimezoneScope::All => param_token(family, "all"),
                TimezoneScope::Group(group) => param_token(family, group),
            }),
            F::Timezones => self.timezones.as_ref().map(|zones| {
                self.predicate(
                    family,
                    TimezoneValidation::new(zones.iter().cloned()),
                    TimezoneValidation::with_message,
                )
            }),
            F::TimezoneRegion => self.timezone_region.as_ref().map(|config| {
                self.predicate(
                    family,
                    TimezoneRegionValidation::new(config.region, &config.cities),
                    TimezoneRegionValidation::with_message,
                )
            }),
            F::BeforeOrEqual => self.date_before_or_equal.as_ref().map(|d| param_token(family, d)),
            F::AfterOrEqualToday => self
                .date_after_or_equal_today
                .then(|| param_token(family, "today")),
            F::After => self.date_after.as_ref().map(|d| param_token(family, d)),
            F::AfterOrEqual => self.date_after_or_equal.as_ref().map(|d| param_token(family, d)),

            F::Regex => self.regex.as_ref().map(|pattern| param_token(family, pattern)),
            F::SeparateIntegersByComma => self.separate_integers_by_comma.then(|| {
                self.predicate(
                    family,
                    SeparateIntegersByComma::new(),
                    SeparateIntegersByComma::with_message,
                )
            }),
            F::SeparateStringsByComma => self.separate_strings_by_comma.then(|| {
                self.predicate(
                    family,
                    SeparateStringsByComma::new(),
                    SeparateStringsByComma::with_message,
                )
            }),
            F::SeparateStringsByUnderscore => self.separate_strings_by_underscore.then(|| {
                self.predicate(
                    family,
                    SeparateStringsByUnderscore::new(),
                    SeparateStringsByUnderscore::with_message,
                )
            }),

            F::Array => flag(self.array),
            F::Distinct => flag(self.distinct),
            F::DistinctStrict => self
                .distinct_strict
                .then(|| param_token(family, "strict")),
            F::DistinctIgnoreCase => self
                .distinct_ignore_case
                .then(|| param_token(family, "ignore_case")),
        }
    }

    /// Wraps a predicate, applying the family-wide custom message if any.
    fn predicate<P>(
        &self,
        family: RuleFamily,
        check: P,
        with_message: fn(P, MessageTemplate) -> P,
    ) -> RuleToken
    where
        P: Into<RuleToken>,
    {
        match self.messages.get(&MessageKey::family(family)) {
            Some(message) => with_message(check, message.clone()).into(),
            None => check.into(),
        }
    }

    /// Extra rules first, then every configured family in
    /// [`RuleFamily::ASSEMBLY_ORDER`].
    fn tokens(&self) -> impl Iterator<Item = RuleToken> + '_ {
        self.extra_rules
            .iter()
            .map(|rule| RuleToken::Rule(rule.clone()))
            .chain(
                RuleFamily::ASSEMBLY_ORDER
                    .iter()
                    .filter_map(|&family| self.token_for(family)),
            )
    }

    /// Assembles the token list: extra rules first, then every configured
    /// family in [`RuleFamily::ASSEMBLY_ORDER`].
    #[must_use]
    pub fn rules(&self) -> Vec<RuleToken> {
        let tokens: Vec<RuleToken> = self.tokens().collect();

        tracing::debug!(
            tokens = tokens.len(),
            extra_rules = self.extra_rules.len(),
            messages = self.messages.len(),
            "rule tokens assembled"
        );
        tokens
    }

    /// The assembled token at `index`.
    ///
    /// Stops assembling once the token is reached.
    #[must_use]
    pub fn rule(&self, index: usize) -> Option<RuleToken> {
        self.tokens().nth(index)
    }

    /// Consumes the builder into a [`RuleSet`].
    #[must_use]
    pub fn build(self) -> RuleSet {
        let tokens = self.rules();
        RuleSet::new(tokens, self.messages, self.attributes)
    }
}

// ============================================================================
// TESTS
// ============================================================================
