//! Rule tokens and the assembled rule set.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;

use crate::foundation::{FailurePolicy, Predicate, ValidationErrors, evaluate_all};
use crate::message::CustomMessageRegistry;
use crate::rules::PredicateCheck;

// ============================================================================
// RULE TOKEN
// ============================================================================

/// One unit of a field's validation spec.
///
/// A host engine parses [`RuleToken::Rule`] strings with its own grammar and
/// calls [`Predicate::evaluate`] on [`RuleToken::Predicate`] objects.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RuleToken {
    /// Pre-rendered rule string, e.g. `"min:3"`.
    Rule(String),
    /// Self-contained predicate object.
    Predicate(PredicateCheck),
}

impl RuleToken {
    /// The rule string, if this is a string token.
    #[must_use]
    pub fn as_rule(&self) -> Option<&str> {
        match self {
            Self::Rule(rule) => Some(rule),
            Self::Predicate(_) => None,
        }
    }

    /// The predicate, if this is a predicate token.
    #[must_use]
    pub fn as_predicate(&self) -> Option<&PredicateCheck> {
        match self {
            Self::Rule(_) => None,
            Self::Predicate(check) => Some(check),
        }
    }
}

impl fmt::Display for RuleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rule(rule) => f.write_str(rule),
            Self::Predicate(check) => write!(f, "<{}>", check.code()),
        }
    }
}

impl From<String> for RuleToken {
    fn from(rule: String) -> Self {
        Self::Rule(rule)
    }
}

impl From<&str> for RuleToken {
    fn from(rule: &str) -> Self {
        Self::Rule(rule.to_owned())
    }
}

impl From<PredicateCheck> for RuleToken {
    fn from(check: PredicateCheck) -> Self {
        Self::Predicate(check)
    }
}

impl PartialEq<str> for RuleToken {
    fn eq(&self, other: &str) -> bool {
        self.as_rule() == Some(other)
    }
}

impl PartialEq<&str> for RuleToken {
    fn eq(&self, other: &&str) -> bool {
        self.as_rule() == Some(*other)
    }
}

// ============================================================================
// RULE SET
// ============================================================================

/// The assembled output handed to a host validator.
///
/// Carries the ordered tokens plus the custom messages and attribute labels
/// registered while building.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RuleSet {
    tokens: Vec<RuleToken>,
    messages: CustomMessageRegistry,
    attributes: IndexMap<String, String>,
}

impl RuleSet {
    pub(crate) fn new(
        tokens: Vec<RuleToken>,
        messages: CustomMessageRegistry,
        attributes: IndexMap<String, String>,
    ) -> Self {
        Self {
            tokens,
            messages,
            attributes,
        }
    }

    /// All tokens in assembly order.
    #[must_use]
    pub fn tokens(&self) -> &[RuleToken] {
        &self.tokens
    }

    /// The token at `index`, if any.
    #[must_use]
    pub fn rule(&self, index: usize) -> Option<&RuleToken> {
        self.tokens.get(index)
    }

    /// String tokens only, in order.
    pub fn string_rules(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(RuleToken::as_rule)
    }

    /// Predicate tokens only, in order.
    pub fn predicates(&self) -> impl Iterator<Item = &PredicateCheck> {
        self.tokens.iter().filter_map(RuleToken::as_predicate)
    }

    /// Custom messages registered while building.
    #[must_use]
    pub fn messages(&self) -> &CustomMessageRegistry {
        &self.messages
    }

    /// Custom attribute display names.
    #[must_use]
    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    /// Display label for `attribute`, falling back to the attribute itself.
    #[must_use]
    pub fn label<'a>(&'a self, attribute: &'a str) -> &'a str {
        self.attributes.get(attribute).map_or(attribute, String::as_str)
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if nothing was configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Runs the predicate tokens against `value`.
    ///
    /// String tokens are the host engine's business and are skipped. A
    /// message registered for `attribute` replaces the check's own message;
    /// otherwise the family-wide message the check was built with applies.
    pub fn evaluate(
        &self,
        attribute: &str,
        value: &str,
        policy: FailurePolicy,
    ) -> Result<(), ValidationErrors> {
        let checks: Vec<Cow<'_, PredicateCheck>> = self
            .predicates()
            .map(|check| match self.messages.resolve(check.family(), Some(attribute)) {
                Some(message) => Cow::Owned(check.clone().with_message(message.clone())),
                None => Cow::Borrowed(check),
            })
            .collect();

        evaluate_all(checks.iter().map(|check| &**check), self.label(attribute), value, policy)
    }
}

impl IntoIterator for RuleSet {
    type Item = RuleToken;
    type IntoIter = std::vec::IntoIter<RuleToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a RuleToken;
    type IntoIter = std::slice::Iter<'a, RuleToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::RuleFamily;
    use crate::message::{MessageKey, MessageTemplate};
    use crate::rules::{SeparateIntegersByComma, UppercaseWord};

    fn sample() -> RuleSet {
        RuleSet::new(
            vec![
                RuleToken::from("required"),
                RuleToken::from(UppercaseWord::new()),
                RuleToken::from(SeparateIntegersByComma::new()),
            ],
            CustomMessageRegistry::new(),
            IndexMap::from([("code".to_string(), "product code".to_string())]),
        )
    }

    #[test]
    fn test_token_accessors() {
        let set = sample();
        assert_eq!(set.len(), 3);
        assert_eq!(set.rule(0).unwrap(), "required");
        assert!(set.rule(1).unwrap().as_predicate().is_some());
        assert!(set.rule(3).is_none());
        assert_eq!(set.string_rules().collect::<Vec<_>>(), ["required"]);
        assert_eq!(set.predicates().count(), 2);
    }

    #[test]
    fn test_display() {
        let set = sample();
        let rendered: Vec<String> = set.tokens().iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["required", "<uppercase_word>", "<separate_integers_by_comma>"]);
    }

    #[test]
    fn test_evaluate_uses_label() {
        let set = sample();
        let errors = set
            .evaluate("code", "abc", FailurePolicy::CollectAll)
            .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.errors()[0].message.contains("product code"));
        assert_eq!(errors.errors()[0].field.as_deref(), Some("product code"));

        let first_only = set
            .evaluate("code", "abc", FailurePolicy::StopOnFirst)
            .unwrap_err();
        assert_eq!(first_only.len(), 1);
    }

    #[test]
    fn test_evaluate_prefers_attribute_message() {
        let mut messages = CustomMessageRegistry::new();
        messages.set(
            RuleFamily::SeparateIntegersByComma,
            MessageTemplate::parse("Numbers only in :attribute").unwrap(),
        );
        messages.set(
            MessageKey::attribute(RuleFamily::SeparateIntegersByComma, "code"),
            MessageTemplate::parse("Comma-separated :attribute please").unwrap(),
        );
        let set = RuleSet::new(
            vec![RuleToken::from(SeparateIntegersByComma::new())],
            messages,
            IndexMap::from([("code".to_string(), "product code".to_string())]),
        );

        let scoped = set.evaluate("code", "a;b", FailurePolicy::CollectAll).unwrap_err();
        assert_eq!(scoped.messages().collect::<Vec<_>>(), ["Comma-separated product code please"]);

        let fallback = set.evaluate("sku", "a;b", FailurePolicy::CollectAll).unwrap_err();
        assert_eq!(fallback.messages().collect::<Vec<_>>(), ["Numbers only in sku"]);
    }
}
