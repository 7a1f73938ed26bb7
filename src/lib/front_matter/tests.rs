use serde_json::json;

use super::ParsedSource;
use crate::types::Frontmatter;

#[test]
fn splits_frontmatter_and_body() {
    let src = "---\ntitle: Hello\ntags:\n  - rust\n  - vue\nsummary: Short\n---\n# Hello\nBody.\n";
    let parsed = ParsedSource::try_from(src).unwrap();
    assert_eq!(parsed.frontmatter.get_str("title"), Some("Hello"));
    assert_eq!(parsed.frontmatter.get("tags"), Some(&json!(["rust", "vue"])));
    assert_eq!(parsed.frontmatter.get_str("summary"), Some("Short"));
    assert!(parsed.content.contains("# Hello"));
    assert!(parsed.content.contains("Body."));
    assert!(!parsed.content.contains("title:"));
}

#[test]
fn source_without_frontmatter_is_all_body() {
    let parsed = ParsedSource::try_from("Just text.").unwrap();
    assert_eq!(parsed.frontmatter, Frontmatter::new());
    assert_eq!(parsed.content.trim(), "Just text.");
}

#[test]
fn body_only_keeps_text() {
    let parsed = ParsedSource::body_only("---\n: broken\n");
    assert_eq!(parsed.frontmatter, Frontmatter::new());
    assert_eq!(parsed.content, "---\n: broken\n");
}
