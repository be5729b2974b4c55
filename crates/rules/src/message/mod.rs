//! Custom failure messages
//!
//! [`MessageTemplate`] is a message with `:name` placeholders, validated when
//! it is registered. [`CustomMessageRegistry`] maps a rule family (optionally
//! scoped to one attribute) to such a template and travels with the assembled
//! rules to the host validator.

mod registry;
mod template;

pub use registry::{CustomMessageRegistry, MessageKey};
pub use template::MessageTemplate;

pub(crate) use template::render_or_default;
