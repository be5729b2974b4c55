//! Custom failure messages keyed by rule family and optional attribute.

use std::fmt;

use indexmap::IndexMap;

use crate::builder::RuleFamily;
use crate::message::MessageTemplate;

// ============================================================================
// MESSAGE KEY
// ============================================================================

/// Identifies which failure a custom message replaces.
///
/// Renders as `rule` or `attribute.rule`, the key shape host validators use
/// for their custom-message maps. `rule` is the family's
/// [`host_rule`](RuleFamily::host_rule), so the key names the same rule as
/// the family's token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageKey {
    family: RuleFamily,
    attribute: Option<String>,
}

impl MessageKey {
    /// Key applying to the family regardless of attribute.
    #[must_use]
    pub fn family(family: RuleFamily) -> Self {
        Self {
            family,
            attribute: None,
        }
    }

    /// Key applying to the family for one attribute only.
    pub fn attribute(family: RuleFamily, attribute: impl Into<String>) -> Self {
        Self {
            family,
            attribute: Some(attribute.into()),
        }
    }

    /// The rule family part of the key.
    #[must_use]
    pub fn rule_family(&self) -> RuleFamily {
        self.family
    }

    /// The attribute part of the key, if scoped.
    #[must_use]
    pub fn attribute_name(&self) -> Option<&str> {
        self.attribute.as_deref()
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.attribute {
            Some(attribute) => write!(f, "{attribute}.{}", self.family.host_rule()),
            None => f.write_str(self.family.host_rule()),
        }
    }
}

impl From<RuleFamily> for MessageKey {
    fn from(family: RuleFamily) -> Self {
        Self::family(family)
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Custom failure messages registered while a rule spec is built.
///
/// Insertion order is kept; re-registering a key replaces its message in
/// place. Entries cannot be removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomMessageRegistry {
    messages: IndexMap<MessageKey, MessageTemplate>,
}

impl CustomMessageRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `message` under `key`. The last write for a key wins.
    pub fn set(&mut self, key: impl Into<MessageKey>, message: MessageTemplate) {
        let key = key.into();
        tracing::trace!(key = %key, "custom message registered");
        self.messages.insert(key, message);
    }

    /// Looks up the message registered for exactly `key`.
    #[must_use]
    pub fn get(&self, key: &MessageKey) -> Option<&MessageTemplate> {
        self.messages.get(key)
    }

    /// Message for `family`, preferring an attribute-scoped entry.
    #[must_use]
    pub fn resolve(&self, family: RuleFamily, attribute: Option<&str>) -> Option<&MessageTemplate> {
        attribute
            .and_then(|attr| self.get(&MessageKey::attribute(family, attr)))
            .or_else(|| self.get(&MessageKey::family(family)))
    }

    /// All entries in registration order.
    pub fn all(&self) -> impl Iterator<Item = (&MessageKey, &MessageTemplate)> {
        self.messages.iter()
    }

    /// Host-facing view: rendered key to raw template text.
    ///
    /// Families sharing a host rule share a key; the later entry wins.
    #[must_use]
    pub fn to_host_map(&self) -> IndexMap<String, String> {
        self.messages
            .iter()
            .map(|(key, message)| (key.to_string(), message.as_str().to_owned()))
            .collect()
    }

    /// Number of registered messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true when nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CustomMessageRegistry {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_host_map().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CustomMessageRegistry {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let raw = IndexMap::<String, MessageTemplate>::deserialize(deserializer)?;
        let mut registry = Self::new();
        for (key, message) in raw {
            let key = match key.rsplit_once('.') {
                Some((attribute, family)) => {
                    MessageKey::attribute(family.parse().map_err(D::Error::custom)?, attribute)
                }
                None => MessageKey::family(key.parse().map_err(D::Error::custom)?),
            };
            registry.set(key, message);
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(text: &str) -> MessageTemplate {
        MessageTemplate::parse(text).unwrap()
    }

    #[test]
    fn test_last_write_wins() {
        let mut registry = CustomMessageRegistry::new();
        registry.set(RuleFamily::Email, template("first :attribute"));
        registry.set(RuleFamily::Min, template("min :attribute"));
        registry.set(RuleFamily::Email, template("second :attribute"));

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get(&MessageKey::family(RuleFamily::Email)).map(MessageTemplate::as_str),
            Some("second :attribute")
        );
        // Replacing keeps the original slot.
        let keys: Vec<String> = registry.all().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, ["email", "min"]);
    }

    #[test]
    fn test_resolve_prefers_attribute_scope() {
        let mut registry = CustomMessageRegistry::new();
        registry.set(RuleFamily::UppercaseWord, template("generic :attribute"));
        registry.set(
            MessageKey::attribute(RuleFamily::UppercaseWord, "code"),
            template("code :attribute"),
        );

        let scoped = registry.resolve(RuleFamily::UppercaseWord, Some("code")).unwrap();
        assert_eq!(scoped.as_str(), "code :attribute");

        let fallback = registry.resolve(RuleFamily::UppercaseWord, Some("name")).unwrap();
        assert_eq!(fallback.as_str(), "generic :attribute");

        assert!(registry.resolve(RuleFamily::Email, None).is_none());
    }

    #[test]
    fn test_host_map_keys() {
        let mut registry = CustomMessageRegistry::new();
        registry.set(MessageKey::attribute(RuleFamily::Min, "age"), template("too small :attribute"));

        let map = registry.to_host_map();
        assert_eq!(map.get("age.min").map(String::as_str), Some("too small :attribute"));
    }

    #[test]
    fn test_host_map_uses_token_rule_names() {
        let mut registry = CustomMessageRegistry::new();
        registry.set(RuleFamily::AfterOrEqualToday, template("late :attribute"));
        registry.set(
            MessageKey::attribute(RuleFamily::DistinctIgnoreCase, "tags"),
            template("repeated :attribute"),
        );

        let keys: Vec<String> = registry.to_host_map().into_keys().collect();
        assert_eq!(keys, ["after_or_equal", "tags.distinct"]);
    }
}
