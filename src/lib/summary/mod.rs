//! Summary extraction for page descriptions.

use std::{borrow::Cow, sync::LazyLock};

use pulldown_cmark::{Event, Options, Parser};
use regex::Regex;

use crate::{
    config::SummaryConfig,
    transformer::{
        WithTransformer,
        plain_text::{PlainTextTransformer, resolve_unknown_reference},
    },
};

/// A heading at the very start of the text, up to the end of its line.
static LEADING_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#+\s+(.*)").expect("static heading pattern is valid"));

/// Build the summary of a markdown body: trim it, drop a leading heading,
/// keep at most `config.length` characters, strip the markdown and append
/// `config.suffix`.
///
/// The suffix is appended even when nothing was cut.
pub fn summarize(raw: &str, config: &SummaryConfig) -> String {
    let body = strip_leading_heading(raw.trim());
    let mut summary = strip_markdown(truncate_chars(&body, config.length));
    summary.push_str(&config.suffix);
    summary
}

/// Delete one leading heading. Text that does not start with a heading comes
/// back untouched.
pub fn strip_leading_heading(s: &str) -> Cow<'_, str> {
    LEADING_HEADING.replace(s, "")
}

/// The first `n` characters of `s`. Cuts anywhere, including mid-word.
///
/// Characters are Unicode scalar values, so an emoji outside the Basic
/// Multilingual Plane counts once where a UTF-16 length would count it twice.
pub fn truncate_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Reduce markdown to plain readable text.
pub fn strip_markdown(md: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_GFM);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_MATH);

    let mut out = String::with_capacity(md.len());
    let parser = Parser::new_with_broken_link_callback(md, options, Some(resolve_unknown_reference));
    for ev in parser.with_transformer::<PlainTextTransformer<'_, _>>() {
        if let Event::Text(text) = ev {
            out.push_str(&text);
        }
    }

    out.trim().to_string()
}
