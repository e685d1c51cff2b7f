//! Keyword highlighting and word staggering for bio copy.

#[cfg(test)]
#[path = "rich_text_test.rs"]
mod rich_text_test;

/// Seconds between consecutive heading words fading in.
pub const WORD_STAGGER_S: f64 = 0.1;

/// Paragraph text rendered as a visual divider instead of prose.
pub const DIVIDER: &str = "— — —";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RichSegment {
    pub text: String,
    pub highlighted: bool,
}

impl RichSegment {
    fn plain(text: &str) -> Self {
        Self { text: text.to_owned(), highlighted: false }
    }
}

/// Split `text` into plain and highlighted runs.
///
/// Keywords match ASCII case-insensitively and are applied in order, so an
/// earlier keyword claims its text before later ones see it. Matched runs
/// keep the original casing. Empty keywords are ignored.
#[must_use]
pub fn highlight_keywords(text: &str, keywords: &[&str]) -> Vec<RichSegment> {
    let mut segments = vec![RichSegment::plain(text)];
    for keyword in keywords.iter().filter(|k| !k.is_empty()) {
        let mut next = Vec::with_capacity(segments.len());
        for segment in segments {
            if segment.highlighted {
                next.push(segment);
            } else {
                split_on_keyword(&segment.text, keyword, &mut next);
            }
        }
        segments = next;
    }
    segments.retain(|s| !s.text.is_empty());
    segments
}

fn split_on_keyword(text: &str, keyword: &str, out: &mut Vec<RichSegment>) {
    let haystack = text.to_ascii_lowercase();
    let needle = keyword.to_ascii_lowercase();
    let mut cursor = 0;
    while let Some(found) = haystack[cursor..].find(&needle) {
        let start = cursor + found;
        let end = start + needle.len();
        out.push(RichSegment::plain(&text[cursor..start]));
        out.push(RichSegment { text: text[start..end].to_owned(), highlighted: true });
        cursor = end;
    }
    out.push(RichSegment::plain(&text[cursor..]));
}

#[derive(Clone, Debug, PartialEq)]
pub struct StaggeredWord {
    pub word: String,
    pub delay_s: f64,
    /// The word contains one of the highlight keywords.
    pub emphasized: bool,
}

/// Break a heading into words with increasing fade-in delays.
#[must_use]
pub fn stagger_words(heading: &str, keywords: &[&str]) -> Vec<StaggeredWord> {
    heading
        .split_whitespace()
        .enumerate()
        .map(|(idx, word)| {
            let lower = word.to_ascii_lowercase();
            let emphasized = keywords
                .iter()
                .any(|k| !k.is_empty() && lower.contains(&k.to_ascii_lowercase()));
            #[allow(clippy::cast_precision_loss)]
            let delay_s = WORD_STAGGER_S * idx as f64;
            StaggeredWord { word: word.to_owned(), delay_s, emphasized }
        })
        .collect()
}

#[must_use]
pub fn is_divider(paragraph: &str) -> bool {
    paragraph.trim() == DIVIDER
}
