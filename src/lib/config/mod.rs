use std::{collections::BTreeMap, fs, path::Path};

use color_eyre::Section;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::utils::with_trailing_slash;

pub const INPUT_DIR: &str = "contents";
pub const OUTPUT_DIR: &str = "public";
pub const CONFIG_FILE: &str = "blog.toml";
pub const SITE_DATA_FILE: &str = "site-data.json";

// Site-wide metadata.
pub const SITE_TITLE: &str = "Hugo Alliaume";
pub const SITE_DESCRIPTION: &str = "My personal blog";
pub const SITE_HOSTNAME: &str = "https://hugo.alliau.me";

// Page metadata derivation.
pub const HOME_PATH: &str = "/";
pub const HOMEPAGE_TITLE: &str = "Homepage";
pub const HOMEPAGE_LAYOUT: &str = "Homepage";
pub const DEFAULT_LANG: &str = "en";
pub const SUMMARY_LENGTH: usize = 150;
pub const SUMMARY_SUFFIX: &str = " ...";

// Blog collections and classifiers.
pub const POST_COLLECTION: &str = "post";
pub const POSTS_DIRNAME: &str = "_posts";
pub const POST_PERMALINK: &str = "/:year/:month/:day/:slug";
pub const TAG_CLASSIFIER: &str = "tag";
pub const TAG_PATH: &str = "/tag/";
pub const TAG_LAYOUT: &str = "Tags";
pub const TAG_SCOPE_LAYOUT: &str = "Tag";
pub const LENGTH_PER_PAGE: usize = 5;

// Theme.
pub const DATE_FORMAT: &str = "LL";

/// Everything the blog needs to know about the site, usually read from
/// `blog.toml` at the site root.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site: SiteMeta,
    pub blog: BlogConfig,
    pub summary: SummaryConfig,
    pub theme: ThemeConfig,
    /// Options for plugins this crate never interprets (analytics, PWA,
    /// comments, sitemap, feed, SEO, sharing). Passed through to site data.
    pub plugins: BTreeMap<String, toml::Value>,
}

impl SiteConfig {
    /// Load `blog.toml` from `root`, or fall back to the defaults when absent.
    pub fn load_at(root: &Path) -> color_eyre::Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path)
            .with_note(|| format!("While reading {}", path.display()))?;
        let config = Self::parse(&raw).with_note(|| format!("While parsing {}", path.display()))?;
        info!(path = %path.display(), "loaded site config");
        Ok(config)
    }

    pub fn parse(raw: &str) -> color_eyre::Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteMeta {
    pub title: String,
    pub description: String,
    pub hostname: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: SITE_TITLE.to_string(),
            description: SITE_DESCRIPTION.to_string(),
            hostname: SITE_HOSTNAME.to_string(),
        }
    }
}

/// Blog plugin declarations: which directories form collections, and which
/// frontmatter keys generate classifier pages.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BlogConfig {
    pub directories: Vec<DirectoryClassifier>,
    pub frontmatters: Vec<FrontmatterClassifier>,
    pub pagination: Pagination,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            directories: vec![DirectoryClassifier::default()],
            frontmatters: vec![FrontmatterClassifier::default()],
            pagination: Pagination::default(),
        }
    }
}

impl BlogConfig {
    /// Id of the collection whose pages are listed as posts.
    pub fn post_collection(&self) -> &str {
        self.directories
            .iter()
            .find(|d| d.id == POST_COLLECTION)
            .or_else(|| self.directories.first())
            .map(|d| d.id.as_str())
            .unwrap_or(POST_COLLECTION)
    }

    /// Route prefix of the tag classifier pages, always slash-terminated.
    pub fn tag_path(&self) -> String {
        let path = self
            .frontmatters
            .iter()
            .find(|f| f.id == TAG_CLASSIFIER)
            .map(|f| f.path.as_str())
            .unwrap_or(TAG_PATH);
        with_trailing_slash(path)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DirectoryClassifier {
    pub id: String,
    pub dirname: String,
    pub path: String,
    pub item_permalink: String,
}

impl Default for DirectoryClassifier {
    fn default() -> Self {
        Self {
            id: POST_COLLECTION.to_string(),
            dirname: POSTS_DIRNAME.to_string(),
            path: HOME_PATH.to_string(),
            item_permalink: POST_PERMALINK.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FrontmatterClassifier {
    pub id: String,
    pub keys: Vec<String>,
    pub path: String,
    pub layout: String,
    pub scope_layout: String,
}

impl Default for FrontmatterClassifier {
    fn default() -> Self {
        Self {
            id: TAG_CLASSIFIER.to_string(),
            keys: vec!["tags".to_string()],
            path: TAG_PATH.to_string(),
            layout: TAG_LAYOUT.to_string(),
            scope_layout: TAG_SCOPE_LAYOUT.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Pagination {
    pub length_per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            length_per_page: LENGTH_PER_PAGE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Maximum number of characters of body text kept before stripping.
    pub length: usize,
    /// Appended to every generated summary, however short.
    pub suffix: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            length: SUMMARY_LENGTH,
            suffix: SUMMARY_SUFFIX.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub repo: Option<String>,
    pub date_format: String,
    pub locale: String,
    pub utc: bool,
    pub sidebar: String,
    pub nav: Vec<NavEntry>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            repo: Some("Kocal/blog".to_string()),
            date_format: DATE_FORMAT.to_string(),
            locale: DEFAULT_LANG.to_string(),
            utc: true,
            sidebar: "auto".to_string(),
            nav: vec![
                NavEntry::new("Tags", TAG_PATH),
                NavEntry::new("GitHub", "https://github.com/Kocal"),
                NavEntry::new("Twitter", "https://twitter.com/HugoAlliaume"),
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct NavEntry {
    pub text: String,
    pub link: String,
}

impl NavEntry {
    pub fn new(text: &str, link: &str) -> Self {
        Self {
            text: text.to_string(),
            link: link.to_string(),
        }
    }
}
