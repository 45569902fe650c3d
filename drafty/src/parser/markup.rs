//! Inline markup within one line.
//!
//! Markers pair up left to right. An opening marker must sit at the line start
//! or after a non-word character and be followed by a non-whitespace
//! character. Its closing marker is the first later marker of the same type
//! that follows a non-whitespace character and is followed by the line end or
//! a non-word character. For `*` and `~` an underscore also counts as a
//! boundary.
//!
//! Because a closer must be followed by a non-word character, same-type
//! markers inside a word do not close: `*a*b*c*` is one strong span over
//! `a*b*c`. Markers of other types nest inside a pair; a marker whose closer
//! lies outside the enclosing pair stays literal. Code spans take their content
//! verbatim.

use crate::grapheme::GraphemeIndex;
use crate::model::{Span, SpanKind};
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Strong,
    Emphasized,
    Deleted,
    Code,
}

impl Marker {
    fn from_grapheme(g: &str) -> Option<Marker> {
        match g {
            "*" => Some(Marker::Strong),
            "_" => Some(Marker::Emphasized),
            "~" => Some(Marker::Deleted),
            "`" => Some(Marker::Code),
            _ => None,
        }
    }

    fn kind(self) -> SpanKind {
        match self {
            Marker::Strong => SpanKind::Strong,
            Marker::Emphasized => SpanKind::Emphasized,
            Marker::Deleted => SpanKind::Deleted,
            Marker::Code => SpanKind::Code,
        }
    }

    /// Whether `g` separates this marker from surrounding text.
    fn is_boundary(self, g: &str) -> bool {
        !is_word(g) || (g == "_" && matches!(self, Marker::Strong | Marker::Deleted))
    }
}

fn is_word(g: &str) -> bool {
    g.chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
}

fn is_space(g: &str) -> bool {
    g.chars().all(char::is_whitespace)
}

struct Line<'a> {
    graphemes: Vec<&'a str>,
}

impl Line<'_> {
    fn can_open(&self, i: usize, marker: Marker) -> bool {
        let before_ok = i == 0 || marker.is_boundary(self.graphemes[i - 1]);
        let after_ok = self
            .graphemes
            .get(i + 1)
            .is_some_and(|g| !is_space(g));
        before_ok && after_ok
    }

    fn can_close(&self, j: usize, marker: Marker) -> bool {
        let before_ok = j > 0 && !is_space(self.graphemes[j - 1]);
        let after_ok = self
            .graphemes
            .get(j + 1)
            .map_or(true, |g| marker.is_boundary(g));
        before_ok && after_ok
    }

    /// Closer for the opener at `open`, searched before `end`. Content must
    /// not be empty.
    fn find_close(&self, open: usize, marker: Marker, end: usize) -> Option<usize> {
        (open + 2..end).find(|&j| {
            Marker::from_grapheme(self.graphemes[j]) == Some(marker) && self.can_close(j, marker)
        })
    }

    /// Render graphemes `[from, to)` into `out`, pushing the byte range each
    /// pair covers in `out`.
    fn render(&self, from: usize, to: usize, out: &mut String, ranges: &mut Vec<StyledRange>) {
        let mut i = from;
        while i < to {
            let g = self.graphemes[i];
            let pair = Marker::from_grapheme(g)
                .filter(|&marker| self.can_open(i, marker))
                .and_then(|marker| Some((marker, self.find_close(i, marker, to)?)));

            match pair {
                Some((marker, close)) => {
                    let outer = ranges.len();
                    ranges.push(StyledRange {
                        kind: marker.kind(),
                        start: out.len(),
                        end: out.len(),
                    });
                    if marker == Marker::Code {
                        out.extend(self.graphemes[i + 1..close].iter().copied());
                    } else {
                        self.render(i + 1, close, out, ranges);
                    }
                    ranges[outer].end = out.len();
                    i = close + 1;
                }
                None => {
                    out.push_str(g);
                    i += 1;
                }
            }
        }
    }
}

/// A styled byte range over rendered text.
///
/// Dropping a marker can join the clusters on either side of it (two regional
/// indicators become one flag), so cluster positions are only known once the
/// text is complete.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StyledRange {
    pub kind: SpanKind,
    pub start: usize,
    pub end: usize,
}

impl StyledRange {
    pub(crate) fn shifted(mut self, bytes: usize) -> Self {
        self.start += bytes;
        self.end += bytes;
        self
    }

    /// Cluster span over the text `index` was built from. A range starting or
    /// ending inside a cluster widens to cover it.
    pub(crate) fn to_span(&self, index: &GraphemeIndex) -> Span {
        let start = index.cluster_at(self.start);
        let end = index.cluster_end(self.end).max(start);
        Span::styled(self.kind.clone(), start, end - start)
    }
}

/// Strip markup from a single line, keeping styled ranges as byte offsets.
pub(crate) fn render_line(line: &str) -> (String, Vec<StyledRange>) {
    let line = Line {
        graphemes: line.graphemes(true).collect(),
    };
    let mut out = String::with_capacity(line.graphemes.len());
    let mut ranges = Vec::new();
    line.render(0, line.graphemes.len(), &mut out, &mut ranges);
    (out, ranges)
}

/// Strip markup from a single line. Returns the rendered text and spans with
/// offsets relative to it.
pub fn parse_line(line: &str) -> (String, Vec<Span>) {
    let (out, ranges) = render_line(line);
    let index = GraphemeIndex::new(&out);
    let spans = ranges.iter().map(|range| range.to_span(&index)).collect();
    (out, spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styled(kind: SpanKind, start: usize, len: usize) -> Span {
        Span::styled(kind, start, len)
    }

    #[test]
    fn single_styles() {
        assert_eq!(
            parse_line("this is *bold*"),
            ("this is bold".to_string(), vec![styled(SpanKind::Strong, 8, 4)])
        );
        assert_eq!(
            parse_line("_it_ ~gone~ `x*y*`"),
            (
                "it gone x*y*".to_string(),
                vec![
                    styled(SpanKind::Emphasized, 0, 2),
                    styled(SpanKind::Deleted, 3, 4),
                    styled(SpanKind::Code, 8, 4),
                ]
            )
        );
    }

    #[test]
    fn nested_styles() {
        assert_eq!(
            parse_line("*bold _italic_*"),
            (
                "bold italic".to_string(),
                vec![
                    styled(SpanKind::Strong, 0, 11),
                    styled(SpanKind::Emphasized, 5, 6),
                ]
            )
        );
    }

    #[test]
    fn same_type_is_greedy() {
        assert_eq!(
            parse_line("*a*b*c*"),
            ("a*b*c".to_string(), vec![styled(SpanKind::Strong, 0, 5)])
        );
        assert_eq!(
            parse_line("*one* and *two*"),
            (
                "one and two".to_string(),
                vec![styled(SpanKind::Strong, 0, 3), styled(SpanKind::Strong, 8, 3)]
            )
        );
    }

    #[test]
    fn unmatched_markers_are_literal() {
        assert_eq!(parse_line("2 * 3 = 6"), ("2 * 3 = 6".to_string(), vec![]));
        assert_eq!(parse_line("*open"), ("*open".to_string(), vec![]));
        assert_eq!(parse_line("snake_case_name"), ("snake_case_name".to_string(), vec![]));
        assert_eq!(parse_line("**"), ("**".to_string(), vec![]));
    }

    #[test]
    fn crossing_markers_keep_first_pair() {
        assert_eq!(
            parse_line("*a _b* c_"),
            ("a _b c_".to_string(), vec![styled(SpanKind::Strong, 0, 4)])
        );
    }

    #[test]
    fn underscore_bounds_strong() {
        assert_eq!(
            parse_line("_*both*_"),
            (
                "both".to_string(),
                vec![styled(SpanKind::Emphasized, 0, 4), styled(SpanKind::Strong, 0, 4)]
            )
        );
    }

    #[test]
    fn offsets_count_clusters() {
        assert_eq!(
            parse_line("👨‍👩‍👧 *hi*"),
            ("👨‍👩‍👧 hi".to_string(), vec![styled(SpanKind::Strong, 2, 2)])
        );
    }

    #[test]
    fn dropped_markers_can_join_clusters() {
        // The two regional indicators form one flag once the markers are gone.
        assert_eq!(
            parse_line("\u{1F1FA}*\u{1F1E6}*"),
            (
                "\u{1F1FA}\u{1F1E6}".to_string(),
                vec![styled(SpanKind::Strong, 0, 1)]
            )
        );
    }
}
