//! Timezone membership predicates.

use crate::builder::RuleFamily;
use crate::foundation::{Predicate, ValidationError};
use crate::message::{MessageTemplate, render_or_default};
use crate::rules::tzdata::{self, TimezoneRegion};

/// Lowercases a city and uses the underscore form of multi-word names.
pub(crate) fn normalize_city(city: &str) -> String {
    city.trim().to_lowercase().replace(' ', "_")
}

// ============================================================================
// TIMEZONE ALLOW-LIST
// ============================================================================

/// The value must be one of the given timezone names, ignoring case.
///
/// ```rust,ignore
/// use fieldrule::rules::TimezoneValidation;
///
/// let check = TimezoneValidation::new(["Europe/Tbilisi", "UTC"]);
/// assert!(check.evaluate("tz", "europe/tbilisi").is_ok());
/// assert!(check.evaluate("tz", "Asia/Tokyo").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimezoneValidation {
    timezones: Vec<String>,
    message: Option<MessageTemplate>,
}

impl TimezoneValidation {
    /// Creates the check over an allow-list of timezone names.
    pub fn new<I, S>(timezones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            timezones: timezones.into_iter().map(Into::into).collect(),
            message: None,
        }
    }

    /// Replaces the failure message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: MessageTemplate) -> Self {
        self.message = Some(message);
        self
    }

    /// The allow-list as configured.
    #[must_use]
    pub fn timezones(&self) -> &[String] {
        &self.timezones
    }
}

impl Predicate for TimezoneValidation {
    fn code(&self) -> &'static str {
        RuleFamily::Timezones.id()
    }

    fn evaluate(&self, attribute: &str, value: &str) -> Result<(), ValidationError> {
        let needle = value.to_lowercase();
        if self.timezones.iter().any(|tz| tz.to_lowercase() == needle) {
            return Ok(());
        }

        let listed = self.timezones.join(", ");
        let message = render_or_default(
            self.message.as_ref(),
            "The :attribute value does not match the given timezones list: [:timezones]. \
             Please provide correct timezone.",
            &[("attribute", attribute), ("input", value), ("timezones", listed.as_str())],
        );
        Err(ValidationError::new(self.code(), message).with_param("input", value.to_owned()))
    }
}

// ============================================================================
// TIMEZONE REGION
// ============================================================================

/// The value must be a city of `region` that the caller allowed.
///
/// Evaluation runs two stages:
///
/// 1. every configured city must exist in the bundled identifier list for the
///    region's group; the first unknown city fails the check whatever the
///    input is;
/// 2. `region/<input>` (lowercased, spaces as underscores) must be one of the
///    configured cities.
///
/// ```rust,ignore
/// use fieldrule::rules::{TimezoneRegion, TimezoneRegionValidation};
///
/// let check = TimezoneRegionValidation::new(TimezoneRegion::Europe, ["Paris", "Berlin"]);
/// assert!(check.evaluate("city", "paris").is_ok());
/// assert!(check.evaluate("city", "london").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimezoneRegionValidation {
    region: TimezoneRegion,
    cities: Vec<String>,
    message: Option<MessageTemplate>,
}

impl TimezoneRegionValidation {
    /// Creates the check; cities are given without the region prefix.
    pub fn new<I, S>(region: TimezoneRegion, cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let prefix = region.name().to_lowercase();
        let cities = cities
            .into_iter()
            .map(|city| format!("{prefix}/{}", normalize_city(city.as_ref())))
            .collect();
        Self {
            region,
            cities,
            message: None,
        }
    }

    /// Replaces the stage-two failure message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: MessageTemplate) -> Self {
        self.message = Some(message);
        self
    }

    /// The region checked against.
    #[must_use]
    pub fn region(&self) -> TimezoneRegion {
        self.region
    }

    /// Group identifier used for the authoritative lookup.
    #[must_use]
    pub fn group_id(&self) -> u32 {
        self.region.group_id()
    }

    /// Configured `region/city` identifiers, lowercased.
    #[must_use]
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// Stage one: every configured city exists in the region.
    pub fn check_configuration(&self) -> Result<(), ValidationError> {
        let Some(unknown) = self
            .cities
            .iter()
            .find(|city| !tzdata::contains(self.group_id(), city))
        else {
            return Ok(());
        };

        let city = unknown.split_once('/').map_or(unknown.as_str(), |(_, c)| c);
        let message = MessageTemplate::builtin(
            "This timezone [:city] is not in the valid timezone list for [:region].",
        )
        .render(&[("city", city), ("region", self.region.name())]);

        Err(ValidationError::new(self.code(), message)
            .with_param("city", city.to_owned())
            .with_param("region", self.region.name()))
    }
}

impl Predicate for TimezoneRegionValidation {
    fn code(&self) -> &'static str {
        RuleFamily::TimezoneRegion.id()
    }

    fn evaluate(&self, attribute: &str, value: &str) -> Result<(), ValidationError> {
        self.check_configuration()?;

        let city = normalize_city(value);
        let search = format!("{}/{city}", self.region.name().to_lowercase());
        if self.cities.iter().any(|allowed| *allowed == search) {
            return Ok(());
        }

        let message = render_or_default(
            self.message.as_ref(),
            "The city :city given for :attribute is not in the valid timezone list for (:region).",
            &[
                ("attribute", attribute),
                ("input", value),
                ("city", city.as_str()),
                ("region", self.region.name()),
            ],
        );
        Err(ValidationError::new(self.code(), message)
            .with_param("city", city)
            .with_param("region", self.region.name()))
    }
}
