//! Character-class and separated-list predicates.

use crate::builder::RuleFamily;

pattern_predicate! {
    /// Letters (any script) and whitespace only.
    pub OnlyLettersAndSpaces;
    family: RuleFamily::OnlyLettersAndSpaces;
    pattern: r"^[\p{L}\s]+$";
    default: "The :attribute (:input) must contain only letters and spaces.";
}

pattern_predicate! {
    /// ASCII digit groups joined by single commas, e.g. `1,2,3`. No spaces.
    pub SeparateIntegersByComma;
    family: RuleFamily::SeparateIntegersByComma;
    pattern: r"^[0-9]+(?:,[0-9]+)*$";
    default: "Please separate (:attribute) integer values by comma. Entered value: `:input`";
}

pattern_predicate! {
    /// Lowercase ASCII words joined by single commas, e.g. `ana,gustav,john`.
    pub SeparateStringsByComma;
    family: RuleFamily::SeparateStringsByComma;
    pattern: r"^[a-z]+(?:,[a-z]+)*$";
    default: "Please separate letter (:attribute) values by comma. Entered value: `:input`";
}

pattern_predicate! {
    /// Lowercase ASCII words joined by single underscores, e.g. `ana_gustav_john`.
    pub SeparateStringsByUnderscore;
    family: RuleFamily::SeparateStringsByUnderscore;
    pattern: r"^[a-z]+(?:_[a-z]+)*$";
    default: "Please separate (:attribute) values by underscore. Entered value: `:input`";
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::foundation::Predicate;
    use crate::message::MessageTemplate;

    #[rstest]
    #[case("1,2,3", true)]
    #[case("42", true)]
    #[case("1, 2,3", false)]
    #[case("1,,2", false)]
    #[case(",1", false)]
    #[case("1,2,", false)]
    #[case("١,٢", false)]
    #[case("", false)]
    fn integers_by_comma(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(SeparateIntegersByComma::new().evaluate("ids", value).is_ok(), ok);
    }

    #[rstest]
    #[case("ana,gustav,john", true)]
    #[case("ana", true)]
    #[case("Ana,john", false)]
    #[case("ana, john", false)]
    fn strings_by_comma(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(SeparateStringsByComma::new().evaluate("names", value).is_ok(), ok);
    }

    #[rstest]
    #[case("ana_gustav_john", true)]
    #[case("ana__john", false)]
    #[case("ana_john_", false)]
    #[case("ana-john", false)]
    fn strings_by_underscore(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(SeparateStringsByUnderscore::new().evaluate("key", value).is_ok(), ok);
    }

    #[rstest]
    #[case("Nino Shergelashvili", true)]
    #[case("ნინო", true)]
    #[case("R2 D2", false)]
    #[case("O'Brien", false)]
    fn letters_and_spaces(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(OnlyLettersAndSpaces::new().evaluate("name", value).is_ok(), ok);
    }

    #[test]
    fn default_message_names_attribute_and_input() {
        let err = SeparateIntegersByComma::new().evaluate("ids", "1, 2").unwrap_err();
        assert_eq!(
            err.message,
            "Please separate (ids) integer values by comma. Entered value: `1, 2`"
        );
        assert_eq!(err.code, "separate_integers_by_comma");
    }

    #[test]
    fn custom_message_overrides_default() {
        let check = OnlyLettersAndSpaces::new()
            .with_message(MessageTemplate::parse("Only letters in :attribute").unwrap());
        let err = check.evaluate("name", "R2").unwrap_err();
        assert_eq!(err.message, "Only letters in name");
    }
}
