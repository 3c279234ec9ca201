use crate::models::{OtherTag, TagRecord};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::BTreeMap;

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("title selector should be valid"));

static DESCRIPTION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("meta[name='description']").expect("description selector should be valid")
});

static VIEWPORT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta[name='viewport']").expect("viewport selector should be valid"));

static ROBOTS_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta[name='robots']").expect("robots selector should be valid"));

static LANGUAGE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta[name='language']").expect("language selector should be valid"));

static AUTHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta[name='author']").expect("author selector should be valid"));

static CANONICAL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("link[rel='canonical']").expect("canonical selector should be valid"));

static CHARSET_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta[charset]").expect("charset selector should be valid"));

static META_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta").expect("meta selector should be valid"));

/// Meta names that map to a dedicated [`TagRecord`] field; they never land
/// in `other_tags` under their name.
const CLAIMED_META_NAMES: [&str; 5] = ["description", "viewport", "robots", "language", "author"];

/// Parses `html` and collects the page's `<head>` metadata into a record.
///
/// Extraction never fails: malformed or truncated documents simply yield
/// absent fields. When the same tag appears more than once, the first
/// occurrence in document order wins.
pub fn extract(html: &str, source_url: &str) -> TagRecord {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty());

    let mut open_graph_tags: BTreeMap<String, String> = BTreeMap::new();
    let mut twitter_tags: BTreeMap<String, String> = BTreeMap::new();
    let mut other_tags: Vec<OtherTag> = Vec::new();

    for element in document.select(&META_SELECTOR) {
        let meta = element.value();
        let name = meta.attr("name");
        let property = meta.attr("property");
        let content = meta.attr("content").filter(|c| !c.is_empty());

        if let Some(property) = property
            && let Some(content) = content
            && let Some(suffix) = property.strip_prefix("og:")
            && !suffix.is_empty()
            && !open_graph_tags.contains_key(suffix)
        {
            open_graph_tags.insert(suffix.to_string(), content.trim().to_string());
        }

        if let Some(name) = name
            && let Some(content) = content
            && let Some(suffix) = name.strip_prefix("twitter:")
            && !suffix.is_empty()
            && !twitter_tags.contains_key(suffix)
        {
            twitter_tags.insert(suffix.to_string(), content.trim().to_string());
        }

        // A meta whose name belongs to a dedicated field can still surface
        // here under its property attribute.
        if let Some(name) = name
            && let Some(content) = content
            && !name.starts_with("twitter:")
            && !CLAIMED_META_NAMES.contains(&name)
        {
            other_tags.push(OtherTag {
                name: name.to_string(),
                content: content.trim().to_string(),
            });
        } else if let Some(property) = property
            && let Some(content) = content
            && !property.starts_with("og:")
        {
            other_tags.push(OtherTag {
                name: property.to_string(),
                content: content.trim().to_string(),
            });
        }
    }

    TagRecord {
        url: source_url.to_string(),
        title,
        description: first_attr(&document, &DESCRIPTION_SELECTOR, "content"),
        canonical: first_attr(&document, &CANONICAL_SELECTOR, "href"),
        viewport: first_attr(&document, &VIEWPORT_SELECTOR, "content"),
        robots: first_attr(&document, &ROBOTS_SELECTOR, "content"),
        charset: first_attr(&document, &CHARSET_SELECTOR, "charset"),
        language: first_attr(&document, &LANGUAGE_SELECTOR, "content"),
        author: first_attr(&document, &AUTHOR_SELECTOR, "content"),
        open_graph_tags: if open_graph_tags.is_empty() {
            None
        } else {
            Some(open_graph_tags)
        },
        twitter_tags: if twitter_tags.is_empty() {
            None
        } else {
            Some(twitter_tags)
        },
        other_tags: if other_tags.is_empty() {
            None
        } else {
            Some(other_tags)
        },
    }
}

/// Reads `attr` from the first element matching `selector`. The first match
/// wins even when it lacks the attribute. Empty values count as absent;
/// non-empty values are trimmed.
fn first_attr(document: &Html, selector: &Selector, attr: &str) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .filter(|v| !v.is_empty())
        .map(|v| v.trim().to_string())
}
