use std::path::PathBuf;

use proptest::{
    prelude::*,
    test_runner::{Config, TestRunner},
};
use serde_json::{Value, json};

use super::{Frontmatter, Page, RelPath, is_truthy};

fn frontmatter(value: Value) -> Frontmatter {
    match value {
        Value::Object(map) => Frontmatter::from_map(map),
        _ => panic!("expected an object"),
    }
}

#[test]
fn truthiness_matches_template_rules() {
    for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
        assert!(!is_truthy(&falsy), "{falsy} should be falsy");
    }
    for truthy in [json!(true), json!(1), json!("x"), json!([]), json!({})] {
        assert!(is_truthy(&truthy), "{truthy} should be truthy");
    }
}

#[test]
fn truthy_lookup_skips_empty_values() {
    let fm = frontmatter(json!({ "summary": "", "lang": "fr" }));
    assert!(fm.truthy("summary").is_none());
    assert_eq!(fm.get("summary"), Some(&json!("")));
    assert_eq!(fm.truthy("lang"), Some(&json!("fr")));
    assert!(fm.truthy("missing").is_none());
}

#[test]
fn strings_accepts_scalar_or_list() {
    let fm = frontmatter(json!({ "tags": ["rust", 3, "", "vue"], "category": "notes" }));
    assert_eq!(fm.strings("tags"), vec!["rust", "vue"]);
    assert_eq!(fm.strings("category"), vec!["notes"]);
    assert!(fm.strings("missing").is_empty());
}

#[test]
fn page_membership_uses_collection_id() {
    let post = Page::new("/2021/05/03/hello/").with_id("post");
    assert!(post.is_in("post"));
    assert!(!post.is_in("tag"));
    assert!(!Page::new("/about.html").is_in("post"));
}

#[test]
fn page_serializes_without_content() {
    let page = Page::new("/").with_content("# Hi");
    let out = serde_json::to_value(&page).unwrap();
    assert_eq!(out, json!({ "path": "/", "frontmatter": {} }));
}

#[test]
fn rel_path_rejects_absolute() {
    let mut runner = TestRunner::new(Config {
        cases: 32,
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(
            &proptest::collection::vec("[A-Za-z0-9]{1,10}", 1..4),
            |segments| {
                let mut rel = PathBuf::new();
                for seg in &segments {
                    rel.push(seg);
                }
                let abs = PathBuf::from("/").join(&rel);
                prop_assert!(RelPath::new(abs).is_none());
                let rel = RelPath::new(rel).expect("relative path");
                prop_assert_eq!(rel.to_slash(), segments.join("/"));
                Ok(())
            },
        )
        .unwrap();
}
