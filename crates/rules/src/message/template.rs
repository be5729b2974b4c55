//! Message templates with named `:placeholder` substitution.

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::foundation::ConfigError;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":([A-Za-z_][A-Za-z0-9_]*)").expect("placeholder pattern is a valid regex")
});

/// A failure message with `:name` placeholders, validated on construction.
///
/// Parsing rejects templates without any placeholder.
///
/// # Examples
///
/// ```rust,ignore
/// use fieldrule::message::MessageTemplate;
///
/// let template = MessageTemplate::parse("The :attribute must shout.")?;
/// assert_eq!(template.render(&[("attribute", "name")]), "The name must shout.");
///
/// assert!(MessageTemplate::parse("Must shout.").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct MessageTemplate {
    text: String,
    placeholders: Vec<String>,
}

impl MessageTemplate {
    /// Parses `text`, failing fast if it carries no placeholder.
    pub fn parse(text: impl Into<String>) -> Result<Self, ConfigError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ConfigError::EmptyTemplate);
        }

        let mut placeholders: Vec<String> = Vec::new();
        for caps in PLACEHOLDER.captures_iter(&text) {
            let name = &caps[1];
            if !placeholders.iter().any(|p| p == name) {
                placeholders.push(name.to_owned());
            }
        }

        if placeholders.is_empty() {
            return Err(ConfigError::MissingPlaceholder { template: text });
        }

        Ok(Self { text, placeholders })
    }

    /// Builds a template from a message known to be well formed.
    ///
    /// Used for the built-in default messages; no placeholder is required.
    pub(crate) fn builtin(text: impl Into<String>) -> Self {
        let text = text.into();
        let placeholders = PLACEHOLDER
            .captures_iter(&text)
            .map(|caps| caps[1].to_owned())
            .collect();
        Self { text, placeholders }
    }

    /// The raw template text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Distinct placeholder names, in order of first appearance.
    #[must_use]
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// Returns true if the template mentions `:name`.
    #[must_use]
    pub fn has_placeholder(&self, name: &str) -> bool {
        self.placeholders.iter().any(|p| p == name)
    }

    /// Substitutes every known placeholder; unknown ones are left as written.
    #[must_use]
    pub fn render(&self, values: &[(&str, &str)]) -> String {
        PLACEHOLDER
            .replace_all(&self.text, |caps: &Captures<'_>| {
                let name = &caps[1];
                values
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map_or_else(|| caps[0].to_owned(), |(_, value)| (*value).to_owned())
            })
            .into_owned()
    }
}

impl fmt::Display for MessageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl TryFrom<String> for MessageTemplate {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for MessageTemplate {
    type Error = ConfigError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<MessageTemplate> for String {
    fn from(template: MessageTemplate) -> Self {
        template.text
    }
}

/// Renders `custom` if present, otherwise the built-in `default` text.
pub(crate) fn render_or_default(
    custom: Option<&MessageTemplate>,
    default: &str,
    values: &[(&str, &str)],
) -> Cow<'static, str> {
    match custom {
        Some(template) => Cow::Owned(template.render(values)),
        None => Cow::Owned(MessageTemplate::builtin(default).render(values)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_collects_placeholders() {
        let template = MessageTemplate::parse("The :attribute (:input) is not :attribute.").unwrap();
        assert_eq!(template.placeholders(), ["attribute", "input"]);
        assert!(template.has_placeholder("input"));
        assert!(!template.has_placeholder("count"));
    }

    #[test]
    fn test_parse_rejects_missing_placeholder() {
        let err = MessageTemplate::parse("Must be uppercase.").unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingPlaceholder {
                template: "Must be uppercase.".to_string()
            }
        );
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(MessageTemplate::parse("   ").unwrap_err(), ConfigError::EmptyTemplate);
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        let template = MessageTemplate::parse("The :attribute has :count words").unwrap();
        assert_eq!(
            template.render(&[("attribute", "title")]),
            "The title has :count words"
        );
    }

    #[test]
    fn test_render_does_not_confuse_prefixes() {
        let template = MessageTemplate::parse(":in then :input").unwrap();
        assert_eq!(template.render(&[("input", "X"), ("in", "Y")]), "Y then X");
    }

    #[test]
    fn test_render_or_default() {
        let custom = MessageTemplate::parse("Custom :attribute").unwrap();
        assert_eq!(
            render_or_default(Some(&custom), "Default :attribute", &[("attribute", "a")]),
            "Custom a"
        );
        assert_eq!(
            render_or_default(None, "Default :attribute", &[("attribute", "a")]),
            "Default a"
        );
    }
}
