use color_eyre::Section;
use gray_matter::{Matter, engine::YAML};
use serde_json::{Map, Value};

use crate::types::Frontmatter;

/// A markdown source split into its frontmatter and body.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedSource {
    pub frontmatter: Frontmatter,
    /// Body with the frontmatter block removed.
    pub content: String,
}

impl TryFrom<&str> for ParsedSource {
    type Error = color_eyre::Report;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let matter = Matter::<YAML>::new();
        matter
            .parse::<Map<String, Value>>(value)
            .with_note(|| "While parsing frontmatter.")
            .map(|res| Self {
                frontmatter: Frontmatter::from_map(res.data.unwrap_or_default()),
                content: res.content,
            })
    }
}

impl ParsedSource {
    /// Keep the whole text as the body when the frontmatter cannot be read.
    pub fn body_only(value: &str) -> Self {
        Self {
            frontmatter: Frontmatter::default(),
            content: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests;
