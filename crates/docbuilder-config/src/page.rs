//! Navigation page tree for `mkdocs.yml`.
//!
//! Each node is a single-key mapping from a title to either a content path
//! (leaf page) or a nested list of nodes (section):
//!
//! ```yaml
//! pages:
//! - Home: index.md
//! - Guides:
//!   - Setup: guides/setup.md
//! ```

use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// A single entry of the page tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageNode {
    /// Title shown in the navigation.
    pub title: String,
    /// Page content path or child nodes.
    pub entry: PageEntry,
}

impl PageNode {
    /// Create a node from a title and anything convertible into an entry.
    #[must_use]
    pub fn new(title: impl Into<String>, entry: impl Into<PageEntry>) -> Self {
        Self {
            title: title.into(),
            entry: entry.into(),
        }
    }

    /// Child nodes if this node is a section.
    #[must_use]
    pub fn children(&self) -> Option<&[PageNode]> {
        match &self.entry {
            PageEntry::Section(children) => Some(children),
            PageEntry::Content(_) => None,
        }
    }
}

/// Value side of a [`PageNode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageEntry {
    /// Leaf page, usually a markdown path relative to `docs_dir`.
    Content(String),
    /// Section holding further nodes.
    Section(Vec<PageNode>),
}

impl PageEntry {
    /// An empty section.
    #[must_use]
    pub fn section() -> Self {
        Self::Section(Vec::new())
    }
}

impl From<&str> for PageEntry {
    fn from(content: &str) -> Self {
        Self::Content(content.to_owned())
    }
}

impl From<String> for PageEntry {
    fn from(content: String) -> Self {
        Self::Content(content)
    }
}

impl From<Vec<PageNode>> for PageEntry {
    fn from(children: Vec<PageNode>) -> Self {
        Self::Section(children)
    }
}

impl Serialize for PageNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.title, &self.entry)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for PageNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NodeVisitor;

        impl<'de> Visitor<'de> for NodeVisitor {
            type Value = PageNode;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a single-key mapping of title to content or section")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<PageNode, A::Error> {
                let Some((title, entry)) = map.next_entry::<String, PageEntry>()? else {
                    return Err(de::Error::invalid_length(0, &self));
                };
                if map.next_key::<IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(2, &self));
                }
                Ok(PageNode { title, entry })
            }
        }

        deserializer.deserialize_map(NodeVisitor)
    }
}

/// Insert `node` into `pages`.
///
/// With an empty `parent` the node is appended at the top level. Otherwise
/// it is appended to the children of every top-level section titled
/// `parent`; leaf pages with that title are skipped and a missing parent
/// leaves the tree untouched.
pub(crate) fn insert_node(pages: &mut Vec<PageNode>, node: PageNode, parent: &str) {
    if parent.is_empty() {
        pages.push(node);
        return;
    }

    let mut matched = 0usize;
    for item in pages.iter_mut().filter(|item| item.title == parent) {
        if let PageEntry::Section(children) = &mut item.entry {
            children.push(node.clone());
            matched += 1;
        }
    }

    if matched == 0 {
        tracing::debug!(parent, title = %node.title, "no section matches parent, page skipped");
    }
}
