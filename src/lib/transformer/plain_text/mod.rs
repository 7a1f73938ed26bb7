use std::sync::LazyLock;

use pulldown_cmark::{BrokenLink, CowStr, Event, LinkType, TagEnd};
use regex::Regex;

use crate::transformer::Transformer;

/// An HTML tag or comment, without the text around it.
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("static tag pattern is valid"));

/// Reduce markdown to the text a reader would see: every emitted event is an
/// `Event::Text`. Image alt text survives since pulldown-cmark reports it as
/// text inside the image tag. Raw HTML keeps only the text between its tags.
/// Footnote references, task markers and rules are dropped.
pub struct PlainTextTransformer<'a, I>
where
    I: Iterator<Item = Event<'a>>,
{
    inner: I,
}

impl<'a, I> Iterator for PlainTextTransformer<'a, I>
where
    I: Iterator<Item = Event<'a>>,
{
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let ev = self.inner.next()?;
            if let Some(text) = to_text(ev) {
                return Some(Event::Text(text));
            }
        }
    }
}

fn to_text(ev: Event<'_>) -> Option<CowStr<'_>> {
    match ev {
        Event::Text(t) | Event::Code(t) | Event::InlineMath(t) | Event::DisplayMath(t) => Some(t),
        Event::SoftBreak | Event::HardBreak => Some(CowStr::Borrowed("\n")),
        Event::Html(html) | Event::InlineHtml(html) => {
            let text = HTML_TAG.replace_all(&html, "");
            (!text.trim().is_empty()).then(|| CowStr::from(text.into_owned()))
        }
        Event::End(end) => block_separator(end).map(CowStr::Borrowed),
        _ => None,
    }
}

/// Broken-link callback that turns `[text][missing]` and `[text][]` into a
/// link with an empty destination, so only `text` is left once tags are
/// dropped. Shortcut brackets such as `[note]` stay literal.
pub fn resolve_unknown_reference<'input>(
    link: BrokenLink<'input>,
) -> Option<(CowStr<'input>, CowStr<'input>)> {
    match link.link_type {
        LinkType::Reference
        | LinkType::ReferenceUnknown
        | LinkType::Collapsed
        | LinkType::CollapsedUnknown => {
            Some((CowStr::Borrowed(""), CowStr::Borrowed("")))
        }
        _ => None,
    }
}

fn block_separator(end: TagEnd) -> Option<&'static str> {
    match end {
        TagEnd::Paragraph
        | TagEnd::Heading(_)
        | TagEnd::Item
        | TagEnd::TableHead
        | TagEnd::TableRow
        | TagEnd::DefinitionListTitle
        | TagEnd::DefinitionListDefinition => Some("\n"),
        TagEnd::TableCell => Some(" "),
        _ => None,
    }
}

impl<'a, I> Transformer<'a, I> for PlainTextTransformer<'a, I>
where
    I: Iterator<Item = Event<'a>>,
{
    fn transform(inner: I) -> Self {
        Self { inner }
    }
}
