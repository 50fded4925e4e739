//! Markdown extension entries.

use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// A `markdown_extensions` entry.
///
/// Written as a bare name when it carries no options, otherwise as a
/// single-key mapping of the name to its options.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownExtension {
    /// Python-Markdown extension name.
    pub name: String,
    /// Extension options, in insertion order.
    pub options: Mapping,
}

impl MarkdownExtension {
    /// Extension without options.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Mapping::new(),
        }
    }

    /// Add an option.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(Value::String(key.into()), value.into());
        self
    }
}

/// `codehilite`, `admonition` and `toc` with `permalink: '#'`.
pub(crate) fn default_extensions() -> Vec<MarkdownExtension> {
    vec![
        MarkdownExtension::named("codehilite"),
        MarkdownExtension::named("admonition"),
        MarkdownExtension::named("toc").with_option("permalink", "#"),
    ]
}

impl Serialize for MarkdownExtension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.options.is_empty() {
            return serializer.serialize_str(&self.name);
        }
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.name, &self.options)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for MarkdownExtension {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ExtensionVisitor;

        impl<'de> Visitor<'de> for ExtensionVisitor {
            type Value = MarkdownExtension;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an extension name or a mapping of name to options")
            }

            fn visit_str<E: de::Error>(self, name: &str) -> Result<MarkdownExtension, E> {
                Ok(MarkdownExtension::named(name))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<MarkdownExtension, A::Error> {
                let Some((name, options)) = map.next_entry::<String, Option<Mapping>>()? else {
                    return Err(de::Error::invalid_length(0, &self));
                };
                if map.next_key::<IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(2, &self));
                }
                Ok(MarkdownExtension {
                    name,
                    options: options.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ExtensionVisitor)
    }
}
