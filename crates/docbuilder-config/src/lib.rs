//! Configuration for docbuilder.
//!
//! Two layers live here:
//!
//! - [`MkDocsConfig`]: the `mkdocs.yml` record with its setters, page tree,
//!   finalization pass and YAML rendering.
//! - [`Config`]: the `docbuilder.toml` project file, which carries an
//!   [`MkDocsOverrides`] overlay, a list of pages, the output root and the
//!   generator executable.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! Project file strings support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `generator`
//! - `mkdocs.site_url`
//! - `mkdocs.repo_url`
//! - `mkdocs.theme`

mod expand;
mod extension;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
mod mkdocs;
mod page;

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use extension::MarkdownExtension;
pub use mkdocs::{
    DEFAULT_ACCENT_COLOR, DEFAULT_DOCS_DIR, DEFAULT_NEXT_LABEL, DEFAULT_PREV_LABEL,
    DEFAULT_PRIMARY_COLOR, DEFAULT_SITE_DIR, DEFAULT_SITE_NAME, Extra, I18n, MKDOCS_FILENAME,
    MkDocsConfig, MkDocsOverrides, Palette,
};
pub use page::{PageEntry, PageNode};

/// CLI settings that override project file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override output root directory.
    pub root: Option<PathBuf>,
    /// Override generator executable.
    pub generator: Option<String>,
    /// Override `site_name`.
    pub site_name: Option<String>,
    /// Override `site_url`.
    pub site_url: Option<String>,
    /// Override `repo_url`.
    pub repo_url: Option<String>,
    /// Override `theme`.
    pub theme: Option<String>,
}

/// Project filename to search for.
const CONFIG_FILENAME: &str = "docbuilder.toml";

/// Generator executable used when none is configured.
pub const DEFAULT_GENERATOR: &str = "mkdocs";

/// Project configuration.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Output root as written in the file, relative to it.
    root: Option<String>,
    /// Generator executable name or path.
    pub generator: String,
    /// Overlay for the `mkdocs.yml` record.
    pub mkdocs: MkDocsOverrides,
    /// Pages added in order after the overlay.
    pub pages: Vec<PageSpec>,

    /// Resolved output root (set after loading).
    #[serde(skip)]
    pub root_resolved: PathBuf,
    /// Site settings from the command line, applied through the setters.
    #[serde(skip)]
    site_settings: SiteSettings,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// A `[[pages]]` entry.
///
/// Without `content` the page is an empty section that later entries can
/// name as their `parent`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageSpec {
    pub title: String,
    pub content: Option<String>,
    pub parent: Option<String>,
}

#[derive(Debug, Default)]
struct SiteSettings {
    site_name: Option<String>,
    site_url: Option<String>,
    repo_url: Option<String>,
    theme: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A setter was given an empty string.
    #[error("{field} cannot be empty")]
    EmptyValue {
        /// Record key the setter writes.
        field: &'static str,
    },
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error")]
    Parse(#[from] toml::de::Error),
    /// YAML rendering error.
    #[error("YAML error")]
    Yaml(#[from] serde_yaml::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`mkdocs.site_url`").
        field: String,
        /// Error message (e.g., "${`DOCS_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docbuilder.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(root) = &settings.root {
            self.root_resolved.clone_from(root);
        }
        if let Some(generator) = &settings.generator {
            self.generator.clone_from(generator);
        }
        self.site_settings = SiteSettings {
            site_name: settings.site_name.clone(),
            site_url: settings.site_url.clone(),
            repo_url: settings.repo_url.clone(),
            theme: settings.theme.clone(),
        };
    }

    /// Build the `mkdocs.yml` record: overlay, then pages, then CLI settings.
    ///
    /// Empty CLI values are skipped, the same way the setters treat them.
    #[must_use]
    pub fn builder_config(&self) -> MkDocsConfig {
        let mut mkdocs = MkDocsConfig::with_overrides(self.mkdocs.clone());

        for page in &self.pages {
            let entry = page
                .content
                .clone()
                .map_or_else(PageEntry::section, PageEntry::Content);
            mkdocs.add_page(page.title.clone(), entry, page.parent.as_deref().unwrap_or(""));
        }

        let site = &self.site_settings;
        if let Some(name) = &site.site_name {
            mkdocs.set_site_name(name).ok();
        }
        if let Some(url) = &site.site_url {
            mkdocs.set_site_url(url).ok();
        }
        if let Some(url) = &site.repo_url {
            mkdocs.set_header_link(url).ok();
        }
        if let Some(theme) = &site.theme {
            mkdocs.set_theme(theme).ok();
        }

        mkdocs
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.generator, "generator")?;
        for page in &self.pages {
            require_non_empty(&page.title, "pages.title")?;
        }
        Ok(())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config rooted at the current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config rooted at the given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            root: None,
            generator: DEFAULT_GENERATOR.to_owned(),
            mkdocs: MkDocsOverrides::default(),
            pages: Vec::new(),
            root_resolved: base.to_path_buf(),
            site_settings: SiteSettings::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        tracing::debug!(path = %path.display(), "loaded project file");
        Ok(config)
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.generator = expand::expand_env(&self.generator, "generator")?;
        expand::expand_opt(&mut self.mkdocs.site_url, "mkdocs.site_url")?;
        expand::expand_opt(&mut self.mkdocs.repo_url, "mkdocs.repo_url")?;
        expand::expand_opt(&mut self.mkdocs.theme, "mkdocs.theme")?;
        Ok(())
    }

    /// Resolve the output root against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.root_resolved = match self.root.as_deref() {
            Some(root) => config_dir.join(root),
            None => config_dir.to_path_buf(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.generator, "mkdocs");
        assert_eq!(config.root_resolved, PathBuf::from("/test"));
        assert_eq!(config.mkdocs, MkDocsOverrides::default());
        assert!(config.pages.is_empty());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.generator, "mkdocs");
        assert!(config.pages.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
root = "documentation"
generator = "/opt/mkdocs/bin/mkdocs"

[mkdocs]
site_name = "Handbook"
theme = "material"

[mkdocs.extra.palette]
primary = "indigo"

[[pages]]
title = "Home"
content = "index.md"

[[pages]]
title = "Guides"

[[pages]]
title = "Setup"
content = "guides/setup.md"
parent = "Guides"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.root.as_deref(), Some("documentation"));
        assert_eq!(config.generator, "/opt/mkdocs/bin/mkdocs");
        assert_eq!(config.mkdocs.site_name.as_deref(), Some("Handbook"));
        assert_eq!(config.mkdocs.theme.as_deref(), Some("material"));
        assert_eq!(
            config.mkdocs.extra.as_ref().map(|e| e.palette.primary.as_str()),
            Some("indigo")
        );
        assert_eq!(
            config.pages[2],
            PageSpec {
                title: "Setup".to_owned(),
                content: Some("guides/setup.md".to_owned()),
                parent: Some("Guides".to_owned()),
            }
        );
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let result: Result<Config, _> = toml::from_str("output = \"site\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_config_applies_pages_in_order() {
        let toml = r#"
[[pages]]
title = "Home"
content = "index.md"

[[pages]]
title = "Guides"

[[pages]]
title = "Setup"
content = "guides/setup.md"
parent = "Guides"

[[pages]]
title = "Orphan"
content = "orphan.md"
parent = "Missing"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let mkdocs = config.builder_config();

        assert_eq!(
            mkdocs.pages().unwrap(),
            &[
                PageNode::new("Home", "index.md"),
                PageNode::new("Guides", vec![PageNode::new("Setup", "guides/setup.md")]),
            ]
        );
    }

    #[test]
    fn test_resolve_paths() {
        let mut config: Config = toml::from_str("root = \"out/docs\"").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(config.root_resolved, PathBuf::from("/project/out/docs"));

        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(config.root_resolved, PathBuf::from("/project"));
    }

    #[test]
    fn test_apply_cli_settings_root_and_generator() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            root: Some(PathBuf::from("/elsewhere")),
            generator: Some("/usr/bin/mkdocs".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.root_resolved, PathBuf::from("/elsewhere"));
        assert_eq!(config.generator, "/usr/bin/mkdocs");
    }

    #[test]
    fn test_cli_site_settings_take_precedence() {
        let mut config: Config = toml::from_str(
            r#"
[mkdocs]
site_name = "From File"
theme = "readthedocs"
"#,
        )
        .unwrap();
        config.apply_cli_settings(&CliSettings {
            site_name: Some("From CLI".to_owned()),
            theme: Some(String::new()),
            site_url: Some("https://docs.example.com".to_owned()),
            ..Default::default()
        });

        let mkdocs = config.builder_config();

        assert_eq!(mkdocs.site_name(), "From CLI");
        // Empty CLI value is ignored like any empty setter input.
        assert_eq!(mkdocs.theme(), Some("readthedocs"));
        assert_eq!(mkdocs.site_url(), Some("https://docs.example.com"));
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.root_resolved, PathBuf::from("/test"));
        assert_eq!(config.generator, "mkdocs");
        assert_eq!(config.builder_config(), MkDocsConfig::default());
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCBUILDER_TEST_URL", "https://docs.test.com");
            std::env::remove_var("DOCBUILDER_TEST_GENERATOR");
        }

        let toml = r#"
generator = "${DOCBUILDER_TEST_GENERATOR:-mkdocs}"

[mkdocs]
site_url = "${DOCBUILDER_TEST_URL}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.generator, "mkdocs");
        assert_eq!(config.mkdocs.site_url.as_deref(), Some("https://docs.test.com"));

        unsafe {
            std::env::remove_var("DOCBUILDER_TEST_URL");
        }
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docbuilder.toml");
        std::fs::write(
            &path,
            "root = \"site-src\"\n[mkdocs]\nsite_name = \"Loaded\"\n",
        )
        .unwrap();

        let config = Config::load(Some(path.as_path()), None).unwrap();

        assert_eq!(config.root_resolved, dir.path().join("site-src"));
        assert_eq!(config.config_path, Some(path));
        assert_eq!(config.builder_config().site_name(), "Loaded");
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Config::load(Some(missing.as_path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_validate_empty_generator() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.generator = String::new();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("generator"));
    }

    #[test]
    fn test_validate_empty_page_title() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.pages.push(PageSpec {
            title: String::new(),
            content: Some("index.md".to_owned()),
            parent: None,
        });
        assert!(config.validate().is_err());
    }
}
