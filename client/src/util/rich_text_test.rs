use super::*;

fn runs(segments: &[RichSegment]) -> Vec<(&str, bool)> {
    segments.iter().map(|s| (s.text.as_str(), s.highlighted)).collect()
}

#[test]
fn highlights_keywords_case_insensitively() {
    let segments = highlight_keywords("Code and CODE and math", &["code", "math"]);
    assert_eq!(
        runs(&segments),
        vec![("Code", true), (" and ", false), ("CODE", true), (" and ", false), ("math", true)]
    );
}

#[test]
fn text_without_keywords_is_one_plain_run() {
    let segments = highlight_keywords("nothing to see", &["logic"]);
    assert_eq!(runs(&segments), vec![("nothing to see", false)]);
}

#[test]
fn earlier_keyword_claims_overlapping_text() {
    let segments = highlight_keywords("systems thinking", &["systems", "stem"]);
    assert_eq!(runs(&segments), vec![("systems", true), (" thinking", false)]);
}

#[test]
fn keyword_inside_a_longer_word_still_matches() {
    let segments = highlight_keywords("machine learning concepts", &["learning"]);
    assert_eq!(
        runs(&segments),
        vec![("machine ", false), ("learning", true), (" concepts", false)]
    );
}

#[test]
fn empty_keyword_is_ignored() {
    let segments = highlight_keywords("abc", &[""]);
    assert_eq!(runs(&segments), vec![("abc", false)]);
}

#[test]
fn non_ascii_text_keeps_byte_alignment() {
    let segments = highlight_keywords("how intelligence works — not just", &["intelligence"]);
    let joined: String = segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(joined, "how intelligence works — not just");
    assert_eq!(segments[1], RichSegment { text: "intelligence".to_owned(), highlighted: true });
}

#[test]
fn words_are_staggered_by_a_tenth_of_a_second() {
    let words = stagger_words("About Me.", &[]);
    assert_eq!(words.len(), 2);
    assert_eq!(words[0].delay_s, 0.0);
    assert!((words[1].delay_s - 0.1).abs() < 1e-12);
}

#[test]
fn stagger_marks_keyword_words() {
    let words = stagger_words("raw logic into aesthetic", &["logic", "aesthetic"]);
    let flags: Vec<bool> = words.iter().map(|w| w.emphasized).collect();
    assert_eq!(flags, vec![false, true, false, true]);
}

#[test]
fn divider_paragraph_is_recognized() {
    assert!(is_divider(" — — — "));
    assert!(!is_divider("I'm still learning — and that's the point."));
}
