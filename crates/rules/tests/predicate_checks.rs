//! Self-contained predicate checks, standalone and through a built rule set.

use fieldrule::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

// ============================================================================
// WORDS
// ============================================================================

#[test]
fn uppercase_word_outcomes() {
    let check = UppercaseWord::new();
    assert!(check.evaluate("code", "HELLO").is_ok());

    let err = check.evaluate("code", "HELLO WORLD").unwrap_err();
    assert_eq!(err.param("count"), Some("2"));
    assert!(err.message.contains("(2) words given"));

    let err = check.evaluate("code", "hello").unwrap_err();
    assert_eq!(err.message, "The code (hello) must be an uppercase word.");
}

#[test]
fn lowercase_word_rejects_digits() {
    let err = LowercaseWord::new().evaluate("slug", "abc1").unwrap_err();
    assert_eq!(err.message, "The slug (abc1) must be an alphabetic word.");
}

// ============================================================================
// SEPARATORS
// ============================================================================

#[rstest]
#[case("1,2,3", true)]
#[case("42", true)]
#[case("1, 2,3", false)]
#[case("1,,2", false)]
#[case(",1", false)]
#[case("", false)]
fn integers_by_comma(#[case] value: &str, #[case] ok: bool) {
    assert_eq!(SeparateIntegersByComma::new().evaluate("ids", value).is_ok(), ok);
}

#[rstest]
#[case("ana,gustav,john", true)]
#[case("ana, gustav", false)]
#[case("Ana,gustav", false)]
fn strings_by_comma(#[case] value: &str, #[case] ok: bool) {
    assert_eq!(SeparateStringsByComma::new().evaluate("names", value).is_ok(), ok);
}

#[rstest]
#[case("ana_gustav_john", true)]
#[case("ana__gustav", false)]
#[case("ana_", false)]
fn strings_by_underscore(#[case] value: &str, #[case] ok: bool) {
    assert_eq!(SeparateStringsByUnderscore::new().evaluate("key", value).is_ok(), ok);
}

#[test]
fn separator_message_names_input() {
    let err = SeparateIntegersByComma::new().evaluate("ids", "1; 2").unwrap_err();
    assert_eq!(
        err.message,
        "Please separate (ids) integer values by comma. Entered value: `1; 2`"
    );
}

#[test]
fn letters_and_spaces_any_script() {
    let check = OnlyLettersAndSpaces::new();
    assert!(check.evaluate("name", "Giorgi Shergelashvili").is_ok());
    assert!(check.evaluate("name", "გიორგი").is_ok());
    assert!(check.evaluate("name", "R2D2").is_err());
}

// ============================================================================
// TIMEZONES
// ============================================================================

#[test]
fn region_validation_two_stages() {
    let check = TimezoneRegionValidation::new(TimezoneRegion::Europe, ["paris"]);
    assert!(tz_identifiers(TimezoneRegion::Europe.group_id()).contains(&"Europe/Paris"));

    assert!(check.evaluate("city", "paris").is_ok());

    let err = check.evaluate("city", "london").unwrap_err();
    assert!(err.message.contains("london"));
    assert!(err.message.contains("Europe"));

    let misconfigured = TimezoneRegionValidation::new(TimezoneRegion::Europe, ["atlantis"]);
    let err = misconfigured.evaluate("city", "paris").unwrap_err();
    assert!(err.message.contains("[atlantis]"));
}

#[test]
fn combined_group_ids() {
    let ids = tz_identifiers(TimezoneRegion::Asia.group_id() | TimezoneRegion::Pacific.group_id());
    assert!(ids.contains(&"Asia/Tokyo"));
    assert!(ids.contains(&"Pacific/Auckland"));
    assert!(!ids.contains(&"Europe/Paris"));
}

#[test]
fn region_parses_case_insensitively() {
    assert_eq!("europe".parse::<TimezoneRegion>().unwrap(), TimezoneRegion::Europe);
    assert_eq!(
        "Atlantis".parse::<TimezoneRegion>().unwrap_err(),
        ConfigError::UnknownRegion("Atlantis".to_string())
    );
}

// ============================================================================
// THROUGH A RULE SET
// ============================================================================

#[test]
fn rule_set_collects_all_failures() {
    init_tracing();

    let set = RuleSpecBuilder::required()
        .uppercase_first_letter()
        .only_letters_and_spaces()
        .separate_strings_by_underscore()
        .build();

    assert!(set.evaluate("title", "Hello world", FailurePolicy::CollectAll).is_err());

    let errors = set
        .evaluate("title", "hello world", FailurePolicy::CollectAll)
        .unwrap_err();
    let codes: Vec<&str> = errors.errors().iter().map(|e| e.code.as_ref()).collect();
    assert_eq!(codes, ["uppercase_first_letter", "separate_strings_by_underscore"]);
}

#[test]
fn rule_set_stops_on_first() {
    let set = RuleSpecBuilder::new()
        .lowercase_word()
        .separate_strings_by_comma()
        .build();

    let errors = set
        .evaluate("tag", "NOT OK", FailurePolicy::StopOnFirst)
        .unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.errors()[0].code, "lowercase_word");
    assert_eq!(errors.errors()[0].field.as_deref(), Some("tag"));
}

#[test]
fn rule_set_applies_custom_message_and_label() -> Result<(), ConfigError> {
    let set = RuleSpecBuilder::new()
        .timezones(["Europe/Tbilisi", "UTC"])
        .with_message("Pick a supported zone for :attribute, not :input.")?
        .attribute_label("tz", "timezone")
        .build();

    assert!(set.evaluate("tz", "utc", FailurePolicy::CollectAll).is_ok());

    let errors = set
        .evaluate("tz", "Mars/Olympus", FailurePolicy::CollectAll)
        .unwrap_err();
    assert_eq!(
        errors.messages().collect::<Vec<_>>(),
        ["Pick a supported zone for timezone, not Mars/Olympus."]
    );
    Ok(())
}

#[test]
fn region_shorthand_through_rule_set() {
    let set = RuleSpecBuilder::required()
        .timezone_america(["New York", "Chicago"])
        .build();

    assert!(set.evaluate("city", "new york", FailurePolicy::CollectAll).is_ok());
    assert!(set.evaluate("city", "Boston", FailurePolicy::CollectAll).is_err());
}
