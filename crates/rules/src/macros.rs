//! Macros for declaring predicates with minimal boilerplate.
//!
//! - `pattern_predicate!` declares a predicate that passes when the whole
//!   value matches one regex: struct, constructor, message override, and the
//!   [`Predicate`](crate::foundation::Predicate) implementation.
//! - `flag_rules!` declares the boolean chain methods of the builder.

/// Declares a single-pattern predicate.
///
/// ```rust,ignore
/// pattern_predicate! {
///     /// Digits separated by single commas.
///     pub SeparateIntegersByComma;
///     family: RuleFamily::SeparateIntegersByComma;
///     pattern: r"^[0-9]+(?:,[0-9]+)*$";
///     default: "Please separate (:attribute) integer values by comma. Entered value: `:input`";
/// }
/// ```
macro_rules! pattern_predicate {
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident;
        family: $family:expr;
        pattern: $pattern:literal;
        default: $default:literal;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name {
            message: Option<$crate::message::MessageTemplate>,
        }

        impl $name {
            /// Creates the check with its default message.
            #[must_use]
            pub fn new() -> Self {
                Self { message: None }
            }

            /// Replaces the failure message.
            #[must_use = "builder methods must be chained or built"]
            pub fn with_message(mut self, message: $crate::message::MessageTemplate) -> Self {
                self.message = Some(message);
                self
            }

            /// The custom message, if one was configured.
            #[must_use]
            pub fn message(&self) -> Option<&$crate::message::MessageTemplate> {
                self.message.as_ref()
            }

            /// Returns true if `value` matches the pattern.
            #[must_use]
            pub fn matches(value: &str) -> bool {
                static PATTERN: ::std::sync::LazyLock<::regex::Regex> =
                    ::std::sync::LazyLock::new(|| {
                        ::regex::Regex::new($pattern).expect("predicate pattern is a valid regex")
                    });
                PATTERN.is_match(value)
            }
        }

        impl $crate::foundation::Predicate for $name {
            fn code(&self) -> &'static str {
                $family.id()
            }

            fn evaluate(
                &self,
                attribute: &str,
                value: &str,
            ) -> Result<(), $crate::foundation::ValidationError> {
                if Self::matches(value) {
                    return Ok(());
                }
                let message = $crate::message::render_or_default(
                    self.message.as_ref(),
                    $default,
                    &[("attribute", attribute), ("input", value)],
                );
                let code = <Self as $crate::foundation::Predicate>::code(self);
                Err($crate::foundation::ValidationError::new(code, message)
                    .with_param("input", value.to_owned()))
            }
        }
    };
}

/// Declares boolean chain methods on the builder: each sets its flag and
/// records the family as the target of a following `with_message`.
///
/// ```rust,ignore
/// flag_rules! {
///     /// The field must be a valid email address.
///     email => Email;
/// }
/// ```
macro_rules! flag_rules {
    (
        $(
            $(#[$meta:meta])*
            $method:ident => $family:ident;
        )+
    ) => {
        $(
            $(#[$meta])*
            #[must_use = "builder methods must be chained or built"]
            pub fn $method(mut self) -> Self {
                self.$method = true;
                self.touch($crate::builder::RuleFamily::$family)
            }
        )+
    };
}
