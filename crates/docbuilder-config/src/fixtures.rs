//! Page tree generators for tests.
//!
//! Trees are built through [`MkDocsConfig::add_page`] so they always have a
//! shape the public API can produce.

use crate::mkdocs::MkDocsConfig;
use crate::page::{PageEntry, PageNode};

/// Builder for generated page trees.
///
/// ```ignore
/// let pages = PageTreeFixture::new()
///     .leaves(1)
///     .sections(2, 3)
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct PageTreeFixture {
    config: MkDocsConfig,
    leaf_count: usize,
    section_count: usize,
}

impl PageTreeFixture {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `count` top-level leaf pages titled `Page {n}`.
    #[must_use]
    pub fn leaves(mut self, count: usize) -> Self {
        for _ in 0..count {
            self.leaf_count += 1;
            let n = self.leaf_count;
            self.config
                .add_page(format!("Page {n}"), format!("page-{n}.md"), "");
        }
        self
    }

    /// Append `count` sections titled `Section {n}`, each with `children`
    /// leaf pages.
    #[must_use]
    pub fn sections(mut self, count: usize, children: usize) -> Self {
        for _ in 0..count {
            self.section_count += 1;
            let title = format!("Section {}", self.section_count);
            self.append_section(&title, children);
        }
        self
    }

    /// Append a section titled `title` even if one already exists.
    #[must_use]
    pub fn named_section(mut self, title: &str, children: usize) -> Self {
        self.append_section(title, children);
        self
    }

    /// The generated top-level nodes.
    #[must_use]
    pub fn build(self) -> Vec<PageNode> {
        self.config.pages().map(<[PageNode]>::to_vec).unwrap_or_default()
    }

    /// Total number of leaf pages anywhere in `pages`.
    #[must_use]
    pub fn count_leaves(pages: &[PageNode]) -> usize {
        pages
            .iter()
            .map(|node| match &node.entry {
                PageEntry::Content(_) => 1,
                PageEntry::Section(children) => Self::count_leaves(children),
            })
            .sum()
    }

    fn append_section(&mut self, title: &str, children: usize) {
        // Built standalone so same-named sections already in the tree stay untouched.
        let mut section = MkDocsConfig::default();
        section.add_page(title, PageEntry::section(), "");
        let slug = title.to_lowercase().replace(' ', "-");
        for child in 1..=children {
            section.add_page(format!("{title} / {child}"), format!("{slug}/{child}.md"), title);
        }
        let node = section
            .pages()
            .and_then(<[PageNode]>::first)
            .cloned()
            .unwrap_or_else(|| PageNode::new(title, PageEntry::section()));
        self.config.add_page(node.title, node.entry, "");
    }
}
