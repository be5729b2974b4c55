//! Assembly of rule tokens through the public builder API.

use std::borrow::Cow;

use fieldrule::prelude::*;
use pretty_assertions::assert_eq;

fn rendered(builder: &RuleSpecBuilder) -> Vec<String> {
    builder.rules().iter().map(ToString::to_string).collect()
}

// ============================================================================
// ENUM-LIKE VALUES
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Backed {
    One,
    Two,
    StringOne,
}

impl HasSymbolicName for Backed {
    fn symbolic_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(match self {
            Self::One => "ONE",
            Self::Two => "TWO",
            Self::StringOne => "STRING_ONE",
        })
    }
}

impl HasScalarValue for Backed {
    fn scalar_value(&self) -> Scalar {
        match self {
            Self::One => Scalar::Int(1),
            Self::Two => Scalar::Int(2),
            Self::StringOne => Scalar::Str("one".to_string()),
        }
    }
}

impl From<Backed> for ListValue {
    fn from(value: Backed) -> Self {
        ListValue::backed(&value)
    }
}

#[derive(Debug, Clone, Copy)]
enum Status {
    Draft,
    Published,
}

impl HasSymbolicName for Status {
    fn symbolic_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(match self {
            Self::Draft => "Draft",
            Self::Published => "Published",
        })
    }
}

// ============================================================================
// IN / NOT_IN
// ============================================================================

#[test]
fn in_list_quotes_every_value() {
    let cases: [(RuleSpecBuilder, &str); 5] = [
        (
            RuleSpecBuilder::in_list(["Laravel", "Framework", "PHP"]),
            r#"in:"Laravel","Framework","PHP""#,
        ),
        (
            RuleSpecBuilder::in_list(vec!["Taylor".to_string(), "Michael".into(), "Tim".into()]),
            r#"in:"Taylor","Michael","Tim""#,
        ),
        (
            RuleSpecBuilder::in_list(["Life, the Universe and Everything", "this is a \"quote\""]),
            r#"in:"Life, the Universe and Everything","this is a ""quote""""#,
        ),
        (RuleSpecBuilder::in_list([1, 2, 3, 4]), r#"in:"1","2","3","4""#),
        (RuleSpecBuilder::in_list(["a,b\nc,d"]), "in:\"a,b\nc,d\""),
    ];

    for (builder, expected) in cases {
        assert_eq!(builder.rule(0).unwrap().to_string(), expected);
    }
}

#[test]
fn in_list_unwraps_enum_values() {
    assert_eq!(RuleSpecBuilder::in_list([Backed::One]).rule(0).unwrap(), r#"in:"1""#);
    assert_eq!(RuleSpecBuilder::in_list([Backed::Two]).rule(0).unwrap(), r#"in:"2""#);
    assert_eq!(
        RuleSpecBuilder::in_list([Backed::StringOne]).rule(0).unwrap(),
        r#"in:"one""#
    );
    assert_eq!(
        RuleSpecBuilder::in_list([Backed::One, Backed::Two, Backed::StringOne])
            .rule(0)
            .unwrap(),
        r#"in:"1","2","one""#
    );
}

#[test]
fn unit_enums_use_their_name() {
    let values = [Status::Draft, Status::Published].map(|s| ListValue::unit(&s));
    assert_eq!(
        RuleSpecBuilder::not_in_list(values).rule(0).unwrap(),
        r#"not_in:"Draft","Published""#
    );
}

#[test]
fn not_in_list_mirrors_in_list() {
    assert_eq!(
        RuleSpecBuilder::not_in_list(["Laravel", "Framework", "PHP"]).rule(0).unwrap(),
        r#"not_in:"Laravel","Framework","PHP""#
    );
    assert_eq!(
        RuleSpecBuilder::not_in_list([1, 2, 3, 4]).rule(0).unwrap(),
        r#"not_in:"1","2","3","4""#
    );
}

#[test]
fn membership_combines_with_instance_rules() {
    let builder = RuleSpecBuilder::in_list(["a", "b"]).require().string();
    assert_eq!(rendered(&builder), ["required", r#"in:"a","b""#, "string"]);
}

#[test]
fn builders_do_not_share_state() {
    let first = RuleSpecBuilder::in_list(["a"]).require();
    let second = RuleSpecBuilder::nullable();
    assert_eq!(rendered(&first), ["required", r#"in:"a""#]);
    assert_eq!(rendered(&second), ["nullable"]);
}

// ============================================================================
// ORDER AND OVERWRITE
// ============================================================================

#[test]
fn later_call_overwrites_earlier() {
    let builder = RuleSpecBuilder::new().min(3).min(5);
    assert_eq!(rendered(&builder), ["min:5"]);

    let builder = RuleSpecBuilder::new().alpha().alpha_ascii();
    assert_eq!(rendered(&builder), ["alpha:ascii"]);

    let builder = RuleSpecBuilder::new().timezone().timezone_group("Europe");
    assert_eq!(rendered(&builder), ["timezone:Europe"]);
}

#[test]
fn order_ignores_call_sequence() {
    let a = RuleSpecBuilder::new().numeric().email();
    let b = RuleSpecBuilder::new().email().numeric();
    assert_eq!(rendered(&a), ["email", "numeric"]);
    assert_eq!(rendered(&a), rendered(&b));
}

#[test]
fn full_assembly_order() {
    let builder = RuleSpecBuilder::new()
        .distinct()
        .array()
        .separate_integers_by_comma()
        .regex("^x$")
        .date_after("2020-01-01")
        .timezone()
        .date()
        .only_letters_and_spaces()
        .uppercase_first_letter()
        .starts_with(["ab", "cd"])
        .alpha_ascii()
        .string()
        .digits(4)
        .max(10)
        .min(1)
        .mac_address()
        .ip()
        .uuid()
        .one_of(["x"])
        .allow_null()
        .require();

    insta::assert_snapshot!(rendered(&builder).join("\n"), @r#"
    required
    nullable
    in:"x"
    uuid
    ip
    mac_address
    min:1
    max:10
    digits:4
    string
    alpha:ascii
    starts_with:ab,cd
    <uppercase_first_letter>
    <only_letters_and_spaces>
    date
    timezone:all
    after:2020-01-01
    regex:^x$
    <separate_integers_by_comma>
    array
    distinct
    "#);
}

#[test]
fn family_groups_follow_tokens() {
    let builder = RuleSpecBuilder::new()
        .distinct_ignore_case()
        .lowercase_word()
        .ipv6()
        .decimal(8, Some(2))
        .boolean();

    let groups: Vec<FamilyGroup> = RuleFamily::ASSEMBLY_ORDER
        .iter()
        .filter(|family| builder.token_for(**family).is_some())
        .map(|family| family.group())
        .collect();

    assert_eq!(
        groups,
        [
            FamilyGroup::Defaults,
            FamilyGroup::Network,
            FamilyGroup::Numeric,
            FamilyGroup::CaseAndWord,
            FamilyGroup::Array,
        ]
    );
}

#[test]
fn date_family_tokens() {
    let builder = RuleSpecBuilder::new()
        .date_after_or_equal("2024-01-01")
        .date_after_or_equal_today()
        .date_before_or_equal("2030-12-31")
        .date_equals("2025-06-01")
        .date_format("Y-m-d");

    assert_eq!(
        rendered(&builder),
        [
            "date_equals:2025-06-01",
            "date_format:Y-m-d",
            "before_or_equal:2030-12-31",
            "after_or_equal:today",
            "after_or_equal:2024-01-01",
        ]
    );
}

#[test]
fn rule_by_index_and_build() {
    let builder = RuleSpecBuilder::required().max(255).extra_rules(["bail"]);
    assert_eq!(builder.rule(0).unwrap(), "bail");
    assert_eq!(builder.rule(2).unwrap(), "max:255");
    assert!(builder.rule(3).is_none());

    let set = builder.build();
    assert_eq!(set.len(), 3);
    assert_eq!(set.string_rules().collect::<Vec<_>>(), ["bail", "required", "max:255"]);
    assert_eq!(set.predicates().count(), 0);
}

#[test]
fn messages_and_labels_travel_with_rule_set() -> Result<(), ConfigError> {
    let set = RuleSpecBuilder::required()
        .with_message("The :attribute field is mandatory.")?
        .email()
        .attribute_message("contact", RuleFamily::Email, "Write a real :attribute.")?
        .attribute_label("contact", "contact address")
        .build();

    let host = set.messages().to_host_map();
    assert_eq!(host.get("required").unwrap(), "The :attribute field is mandatory.");
    assert_eq!(host.get("contact.email").unwrap(), "Write a real :attribute.");
    assert_eq!(set.label("contact"), "contact address");
    assert_eq!(set.label("other"), "other");
    Ok(())
}
