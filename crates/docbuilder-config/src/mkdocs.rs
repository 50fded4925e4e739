//! The `mkdocs.yml` record.
//!
//! [`MkDocsConfig`] is built from defaults plus an optional
//! [`MkDocsOverrides`] overlay, mutated through setters and
//! [`MkDocsConfig::add_page`], then finalized and rendered to YAML.
//!
//! Setters reject empty strings with [`ConfigError::EmptyValue`] and leave
//! the record untouched, so "set if present" chains need no extra checks.

use serde::{Deserialize, Serialize};

use crate::ConfigError;
use crate::extension::{MarkdownExtension, default_extensions};
use crate::page::{PageEntry, PageNode, insert_node};

/// Name of the generated configuration file.
pub const MKDOCS_FILENAME: &str = "mkdocs.yml";

pub const DEFAULT_SITE_NAME: &str = "Documents";
pub const DEFAULT_DOCS_DIR: &str = "docs";
pub const DEFAULT_SITE_DIR: &str = "site";
pub const DEFAULT_PREV_LABEL: &str = "Previous";
pub const DEFAULT_NEXT_LABEL: &str = "Next";
pub const DEFAULT_PRIMARY_COLOR: &str = "teal";
pub const DEFAULT_ACCENT_COLOR: &str = "pink";

/// In-memory `mkdocs.yml` content.
///
/// Field order is the serialization order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MkDocsConfig {
    site_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    site_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    repo_url: Option<String>,
    docs_dir: String,
    site_dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    theme: Option<String>,
    extra: Extra,
    markdown_extensions: Vec<MarkdownExtension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pages: Option<Vec<PageNode>>,
}

/// The `extra` section consumed by the theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extra {
    /// Localized navigation labels.
    pub i18n: I18n,
    /// Theme colors.
    pub palette: Palette,
}

/// Previous/next page labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18n {
    pub prev: String,
    pub next: String,
}

/// Theme color palette.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub primary: String,
    pub accent: String,
}

/// Construction overlay for [`MkDocsConfig`].
///
/// Every `Some` key replaces the default key as a whole; nested values such
/// as `extra` are never merged field by field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MkDocsOverrides {
    pub site_name: Option<String>,
    pub site_url: Option<String>,
    pub repo_url: Option<String>,
    pub docs_dir: Option<String>,
    pub site_dir: Option<String>,
    pub theme: Option<String>,
    pub extra: Option<Extra>,
    pub markdown_extensions: Option<Vec<MarkdownExtension>>,
    pub pages: Option<Vec<PageNode>>,
}

impl Default for MkDocsConfig {
    fn default() -> Self {
        Self {
            site_name: String::new(),
            site_url: None,
            repo_url: None,
            docs_dir: String::new(),
            site_dir: String::new(),
            theme: None,
            extra: Extra::default(),
            markdown_extensions: default_extensions(),
            pages: Some(Vec::new()),
        }
    }
}

impl MkDocsConfig {
    /// Defaults with `overrides` laid over them.
    #[must_use]
    pub fn with_overrides(overrides: MkDocsOverrides) -> Self {
        let mut config = Self::default();
        let MkDocsOverrides {
            site_name,
            site_url,
            repo_url,
            docs_dir,
            site_dir,
            theme,
            extra,
            markdown_extensions,
            pages,
        } = overrides;

        if let Some(site_name) = site_name {
            config.site_name = site_name;
        }
        if site_url.is_some() {
            config.site_url = site_url;
        }
        if repo_url.is_some() {
            config.repo_url = repo_url;
        }
        if let Some(docs_dir) = docs_dir {
            config.docs_dir = docs_dir;
        }
        if let Some(site_dir) = site_dir {
            config.site_dir = site_dir;
        }
        if theme.is_some() {
            config.theme = theme;
        }
        if let Some(extra) = extra {
            config.extra = extra;
        }
        if let Some(markdown_extensions) = markdown_extensions {
            config.markdown_extensions = markdown_extensions;
        }
        if pages.is_some() {
            config.pages = pages;
        }

        config
    }

    #[must_use]
    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    #[must_use]
    pub fn site_url(&self) -> Option<&str> {
        self.site_url.as_deref()
    }

    #[must_use]
    pub fn repo_url(&self) -> Option<&str> {
        self.repo_url.as_deref()
    }

    #[must_use]
    pub fn docs_dir(&self) -> &str {
        &self.docs_dir
    }

    #[must_use]
    pub fn site_dir(&self) -> &str {
        &self.site_dir
    }

    #[must_use]
    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref()
    }

    #[must_use]
    pub fn extra(&self) -> &Extra {
        &self.extra
    }

    #[must_use]
    pub fn markdown_extensions(&self) -> &[MarkdownExtension] {
        &self.markdown_extensions
    }

    /// The page tree, `None` once finalization dropped an empty one.
    #[must_use]
    pub fn pages(&self) -> Option<&[PageNode]> {
        self.pages.as_deref()
    }

    pub fn set_site_name(&mut self, value: &str) -> Result<&str, ConfigError> {
        set_required(&mut self.site_name, value, "site_name")
    }

    pub fn set_site_url(&mut self, value: &str) -> Result<&str, ConfigError> {
        set_optional(&mut self.site_url, value, "site_url")
    }

    /// Set the repository link shown in the page header (`repo_url`).
    pub fn set_header_link(&mut self, value: &str) -> Result<&str, ConfigError> {
        set_optional(&mut self.repo_url, value, "repo_url")
    }

    pub fn set_docs_dir(&mut self, value: &str) -> Result<&str, ConfigError> {
        set_required(&mut self.docs_dir, value, "docs_dir")
    }

    pub fn set_site_dir(&mut self, value: &str) -> Result<&str, ConfigError> {
        set_required(&mut self.site_dir, value, "site_dir")
    }

    pub fn set_theme(&mut self, value: &str) -> Result<&str, ConfigError> {
        set_optional(&mut self.theme, value, "theme")
    }

    pub fn set_prev(&mut self, value: &str) -> Result<&str, ConfigError> {
        set_required(&mut self.extra.i18n.prev, value, "extra.i18n.prev")
    }

    pub fn set_next(&mut self, value: &str) -> Result<&str, ConfigError> {
        set_required(&mut self.extra.i18n.next, value, "extra.i18n.next")
    }

    pub fn set_primary_color(&mut self, value: &str) -> Result<&str, ConfigError> {
        set_required(&mut self.extra.palette.primary, value, "extra.palette.primary")
    }

    pub fn set_accent_color(&mut self, value: &str) -> Result<&str, ConfigError> {
        set_required(&mut self.extra.palette.accent, value, "extra.palette.accent")
    }

    /// Add a page to the navigation tree and return the whole tree.
    ///
    /// An empty `parent` appends at the top level. Otherwise the page is
    /// appended to every top-level section titled `parent`; when there is
    /// none the tree is left unchanged.
    pub fn add_page(
        &mut self,
        title: impl Into<String>,
        entry: impl Into<PageEntry>,
        parent: &str,
    ) -> &[PageNode] {
        let pages = self.pages.get_or_insert_with(Vec::new);
        insert_node(pages, PageNode::new(title, entry), parent);
        pages
    }

    /// Fill defaults and drop unset optional keys.
    ///
    /// Running it again on a finalized record changes nothing.
    pub fn finalize(&mut self) -> Result<(), ConfigError> {
        if self.site_name.is_empty() {
            self.set_site_name(DEFAULT_SITE_NAME)?;
        }
        if self.docs_dir.is_empty() {
            self.set_docs_dir(DEFAULT_DOCS_DIR)?;
        }
        if self.site_dir.is_empty() {
            self.set_site_dir(DEFAULT_SITE_DIR)?;
        }

        drop_empty(&mut self.site_url);
        drop_empty(&mut self.repo_url);
        drop_empty(&mut self.theme);

        if self.extra.i18n.prev.is_empty() {
            self.set_prev(DEFAULT_PREV_LABEL)?;
        }
        if self.extra.i18n.next.is_empty() {
            self.set_next(DEFAULT_NEXT_LABEL)?;
        }
        if self.extra.palette.primary.is_empty() {
            self.set_primary_color(DEFAULT_PRIMARY_COLOR)?;
        }
        if self.extra.palette.accent.is_empty() {
            self.set_accent_color(DEFAULT_ACCENT_COLOR)?;
        }

        if self.pages.as_ref().is_some_and(Vec::is_empty) {
            self.pages = None;
        }

        Ok(())
    }

    /// Render the record as block-style YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn set_required<'a>(
    slot: &'a mut String,
    value: &str,
    field: &'static str,
) -> Result<&'a str, ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::EmptyValue { field });
    }
    value.clone_into(slot);
    Ok(slot.as_str())
}

fn set_optional<'a>(
    slot: &'a mut Option<String>,
    value: &str,
    field: &'static str,
) -> Result<&'a str, ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::EmptyValue { field });
    }
    Ok(slot.insert(value.to_owned()).as_str())
}

fn drop_empty(slot: &mut Option<String>) {
    if slot.as_ref().is_some_and(String::is_empty) {
        *slot = None;
    }
}
