//! Auto-detected entities: links, mentions and hashtags.
//!
//! Detection runs on text that has already been stripped of markup. Matches
//! are taken left-most first, longer first on a tie, and a match overlapping
//! one already taken is ignored. The same matched text always maps to one
//! entity, so a link repeated twice is stored once and anchored twice.

use crate::grapheme::GraphemeIndex;
use crate::model::{Entity, Span};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::trace;

static LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(https?://)?(?:www\.)?(?:[a-z0-9](?:[-a-z0-9]*[a-z0-9])?\.){1,5}[a-z]{2,6}(?:[/?#:][-a-z0-9@:%_+.~#?&/=]*)?",
    )
    .expect("link regex should compile")
});

static MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\B@(\w\w+)").expect("mention regex should compile"));

// The tag itself is group 1; the leading separator is consumed but not part of
// the entity.
static HASHTAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[\s,.!])(#(\w\w+))").expect("hashtag regex should compile")
});

#[derive(Debug)]
struct Found<'t> {
    start: usize,
    end: usize,
    text: &'t str,
    entity: Entity,
}

fn links(text: &str) -> impl Iterator<Item = Found<'_>> {
    LINK.captures_iter(text).filter_map(|caps| {
        let m = caps.get(0)?;
        let url = if caps.get(1).is_some() {
            m.as_str().to_string()
        } else {
            format!("http://{}", m.as_str())
        };
        if url::Url::parse(&url).is_err() {
            trace!(%url, "ignoring link candidate that is not a valid URL");
            return None;
        }
        Some(Found {
            start: m.start(),
            end: m.end(),
            text: m.as_str(),
            entity: Entity::link(url),
        })
    })
}

fn mentions(text: &str) -> impl Iterator<Item = Found<'_>> {
    MENTION.captures_iter(text).filter_map(|caps| {
        let m = caps.get(0)?;
        Some(Found {
            start: m.start(),
            end: m.end(),
            text: m.as_str(),
            entity: Entity::mention(caps.get(1)?.as_str()),
        })
    })
}

fn hashtags(text: &str) -> impl Iterator<Item = Found<'_>> {
    HASHTAG.captures_iter(text).filter_map(|caps| {
        let m = caps.get(1)?;
        Some(Found {
            start: m.start(),
            end: m.end(),
            text: m.as_str(),
            entity: Entity::hashtag(caps.get(2)?.as_str()),
        })
    })
}

/// Find entities in `text`. Returns anchor spans (cluster offsets into
/// `text`) and the entities they reference, in left-to-right order.
pub fn extract(text: &str) -> (Vec<Span>, Vec<Entity>) {
    let mut found: Vec<Found<'_>> = links(text)
        .chain(mentions(text))
        .chain(hashtags(text))
        .collect();
    if found.is_empty() {
        return (Vec::new(), Vec::new());
    }
    found.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let index = GraphemeIndex::new(text);
    let mut spans = Vec::new();
    let mut entities = Vec::new();
    let mut by_text: HashMap<&str, usize> = HashMap::new();
    let mut taken_until = 0;

    for item in found {
        if item.start < taken_until {
            continue;
        }
        taken_until = item.end;

        let key = *by_text.entry(item.text).or_insert_with(|| {
            entities.push(item.entity);
            entities.len() - 1
        });
        let start = index.cluster_at(item.start);
        let end = index.cluster_end(item.end);
        spans.push(Span::anchor(start, end - start, key));
    }
    (spans, entities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn urls(entities: &[Entity]) -> Vec<&str> {
        entities
            .iter()
            .filter_map(|e| e.get("url").and_then(Value::as_str))
            .collect()
    }

    #[test]
    fn mentions_and_hashtags() {
        let (spans, entities) = extract("this is a @mention and a #hashtag in a string");
        assert_eq!(spans, vec![Span::anchor(10, 8, 0), Span::anchor(25, 8, 1)]);
        assert_eq!(
            entities,
            vec![Entity::mention("mention"), Entity::hashtag("hashtag")]
        );
    }

    #[test]
    fn links_with_and_without_scheme() {
        let (spans, entities) = extract("see https://tinode.co/about or www.example.com");
        assert_eq!(urls(&entities), vec!["https://tinode.co/about", "http://www.example.com"]);
        assert_eq!(spans, vec![Span::anchor(4, 23, 0), Span::anchor(31, 15, 1)]);
    }

    #[test]
    fn repeated_text_shares_entity() {
        let (spans, entities) = extract("@bob and @bob");
        assert_eq!(spans, vec![Span::anchor(0, 4, 0), Span::anchor(9, 4, 0)]);
        assert_eq!(entities.len(), 1);
    }

    #[test]
    fn short_tokens_are_ignored() {
        let (spans, _) = extract("@a #b x@yy");
        assert!(spans.is_empty());
    }

    #[test]
    fn hashtag_needs_separator() {
        let (_, entities) = extract("issue#42 but #42a, #ok");
        assert_eq!(
            entities,
            vec![Entity::hashtag("42a"), Entity::hashtag("ok")]
        );
    }

    #[test]
    fn offsets_are_clusters() {
        let (spans, _) = extract("🇺🇦 @друг");
        assert_eq!(spans, vec![Span::anchor(2, 5, 0)]);
    }
}
