use proptest::{
    prelude::*,
    test_runner::{Config, TestRunner},
};
use serde_json::{Value, json};

use super::{DeriveOptions, PageOverrides, derive_overrides, extend_page_data};
use crate::{
    config::SiteConfig,
    summary::{strip_markdown, truncate_chars},
    types::{Frontmatter, Page},
};

fn derived(page: &mut Page) {
    let config = SiteConfig::default();
    let options = DeriveOptions::new(&config.blog, &config.summary);
    extend_page_data(page, &options);
}

fn frontmatter(value: Value) -> Frontmatter {
    match value {
        Value::Object(map) => Frontmatter::from_map(map),
        _ => panic!("expected an object"),
    }
}

#[test]
fn homepage_is_flagged() {
    let mut page = Page::new("/").with_frontmatter(frontmatter(json!({ "title": "Index" })));
    derived(&mut page);
    let fm = &page.frontmatter;
    assert_eq!(fm.get("home"), Some(&json!(true)));
    assert_eq!(fm.get_str("title"), Some("Homepage"));
    assert_eq!(fm.get_str("layout"), Some("Homepage"));
    assert!(fm.get("sidebar").is_none());
}

#[test]
fn tag_pages_hide_the_sidebar() {
    for path in ["/tag/", "/tag/rust/"] {
        let mut page = Page::new(path).with_id("tag");
        derived(&mut page);
        assert_eq!(page.frontmatter.get("sidebar"), Some(&json!(false)));
        assert!(page.frontmatter.get("home").is_none());
    }
}

#[test]
fn tag_prefix_follows_classifier_config() {
    let mut config = SiteConfig::default();
    config.blog.frontmatters[0].path = "/topics/".to_string();
    let options = DeriveOptions::new(&config.blog, &config.summary);

    let mut topic = Page::new("/topics/rust/");
    extend_page_data(&mut topic, &options);
    assert_eq!(topic.frontmatter.get("sidebar"), Some(&json!(false)));

    let mut tag = Page::new("/tag/rust/");
    extend_page_data(&mut tag, &options);
    assert!(tag.frontmatter.get("sidebar").is_none());
}

#[test]
fn page_without_body_stops_after_route_checks() {
    for content in [None, Some("")] {
        let mut page = Page::new("/about.html");
        page.stripped_content = content.map(str::to_string);
        derived(&mut page);
        assert_eq!(page.frontmatter, Frontmatter::new());
    }
}

#[test]
fn body_produces_description_and_default_lang() {
    let mut page = Page::new("/2021/05/03/hello/").with_content("# Hello\nFirst *post* here.");
    derived(&mut page);
    assert_eq!(
        page.frontmatter.get_str("description"),
        Some("First post here. ...")
    );
    assert_eq!(page.frontmatter.get_str("lang"), Some("en"));
}

#[test]
fn explicit_summary_wins() {
    let mut page = Page::new("/2021/05/03/hello/")
        .with_frontmatter(frontmatter(json!({ "summary": "Custom" })))
        .with_content("Some long body that would otherwise become the description.");
    derived(&mut page);
    assert_eq!(page.frontmatter.get_str("description"), Some("Custom"));
    assert_eq!(page.frontmatter.get_str("summary"), Some("Custom"));
}

#[test]
fn empty_summary_does_not_override() {
    let mut page = Page::new("/notes.html")
        .with_frontmatter(frontmatter(json!({ "summary": "" })))
        .with_content("Body.");
    derived(&mut page);
    assert_eq!(page.frontmatter.get_str("description"), Some("Body. ..."));
}

#[test]
fn explicit_lang_is_kept() {
    let mut page = Page::new("/fr/")
        .with_frontmatter(frontmatter(json!({ "lang": "fr" })))
        .with_content("Bonjour.");
    derived(&mut page);
    assert_eq!(page.frontmatter.get_str("lang"), Some("fr"));
}

#[test]
fn overrides_leave_page_untouched() {
    let config = SiteConfig::default();
    let options = DeriveOptions::new(&config.blog, &config.summary);
    let page = Page::new("/").with_content("Welcome.");
    let overrides = derive_overrides(&page, &options);
    assert_eq!(page.frontmatter, Frontmatter::new());
    assert_eq!(
        overrides,
        PageOverrides {
            home: Some(true),
            title: Some("Homepage".to_string()),
            layout: Some("Homepage".to_string()),
            sidebar: None,
            description: Some(json!("Welcome. ...")),
            lang: Some(json!("en")),
        }
    );
}

#[test]
fn description_matches_stripped_slice() {
    let mut runner = TestRunner::new(Config {
        cases: 64,
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(&"[a-z][a-z0-9 ,.*`\n]{0,250}", |body| {
            let mut page = Page::new("/post.html").with_content(body.clone());
            derived(&mut page);
            let expected = format!("{} ...", strip_markdown(truncate_chars(body.trim(), 150)));
            prop_assert_eq!(page.frontmatter.get_str("description"), Some(expected.as_str()));
            Ok(())
        })
        .unwrap();
}

#[test]
fn derivation_is_idempotent() {
    let mut runner = TestRunner::new(Config {
        cases: 64,
        failure_persistence: None,
        ..Config::default()
    });
    let paths = prop_oneof![
        Just("/".to_string()),
        Just("/tag/".to_string()),
        "/tag/[a-z]{1,8}/",
        "/[0-9]{4}/[0-9]{2}/[0-9]{2}/[a-z]{1,8}/",
    ];
    runner
        .run(
            &(paths, proptest::option::of("[ -~\n]{0,200}"), proptest::option::of("[a-z]{0,3}")),
            |(path, body, lang)| {
                let mut fm = Frontmatter::new();
                if let Some(lang) = lang {
                    fm.set("lang", lang);
                }
                let mut page = Page::new(path).with_frontmatter(fm);
                page.stripped_content = body;

                derived(&mut page);
                let once = page.clone();
                derived(&mut page);
                prop_assert_eq!(once, page);
                Ok(())
            },
        )
        .unwrap();
}
