//! Page metadata derivation, run once per page before rendering.
//!
//! The derived fields are `home`, `title` and `layout` for the homepage,
//! `sidebar` for tag listings, and `description` and `lang` for every page
//! with a body. Derivation never fails: a page with an odd path or no body
//! simply gets fewer fields.

use serde_json::Value;

use crate::{
    config::{BlogConfig, DEFAULT_LANG, HOME_PATH, HOMEPAGE_LAYOUT, HOMEPAGE_TITLE, SummaryConfig},
    summary::summarize,
    types::{Frontmatter, Page},
};

/// Settings the deriver reads from the site configuration.
#[derive(Clone, Debug)]
pub struct DeriveOptions<'a> {
    pub tag_path: String,
    pub summary: &'a SummaryConfig,
}

impl<'a> DeriveOptions<'a> {
    pub fn new(blog: &'a BlogConfig, summary: &'a SummaryConfig) -> Self {
        Self {
            tag_path: blog.tag_path(),
            summary,
        }
    }
}

/// Frontmatter fields to write back onto a page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageOverrides {
    pub home: Option<bool>,
    pub title: Option<String>,
    pub layout: Option<String>,
    pub sidebar: Option<bool>,
    pub description: Option<Value>,
    pub lang: Option<Value>,
}

impl PageOverrides {
    pub fn apply(self, frontmatter: &mut Frontmatter) {
        if let Some(home) = self.home {
            frontmatter.set("home", home);
        }
        if let Some(title) = self.title {
            frontmatter.set("title", title);
        }
        if let Some(layout) = self.layout {
            frontmatter.set("layout", layout);
        }
        if let Some(sidebar) = self.sidebar {
            frontmatter.set("sidebar", sidebar);
        }
        if let Some(description) = self.description {
            frontmatter.set("description", description);
        }
        if let Some(lang) = self.lang {
            frontmatter.set("lang", lang);
        }
    }
}

/// Derive the metadata of `page` and write it into its frontmatter.
pub fn extend_page_data(page: &mut Page, options: &DeriveOptions<'_>) {
    derive_overrides(page, options).apply(&mut page.frontmatter);
}

/// Compute what [`extend_page_data`] would write, leaving `page` untouched.
pub fn derive_overrides(page: &Page, options: &DeriveOptions<'_>) -> PageOverrides {
    let mut overrides = PageOverrides::default();

    if page.path == HOME_PATH {
        overrides.home = Some(true);
        overrides.title = Some(HOMEPAGE_TITLE.to_string());
        overrides.layout = Some(HOMEPAGE_LAYOUT.to_string());
    } else if page.path.starts_with(&options.tag_path) {
        overrides.sidebar = Some(false);
    }

    let Some(content) = page.stripped_content.as_deref().filter(|c| !c.is_empty()) else {
        return overrides;
    };

    let fm = &page.frontmatter;
    overrides.description = Some(match fm.truthy("summary") {
        Some(summary) => summary.clone(),
        None => Value::String(summarize(content, options.summary)),
    });

    overrides.lang = Some(
        fm.truthy("lang")
            .cloned()
            .unwrap_or_else(|| Value::String(DEFAULT_LANG.to_string())),
    );

    overrides
}

#[cfg(test)]
mod tests;
