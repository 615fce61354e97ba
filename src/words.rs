//! Word-boundary segmentation for identifier-style names.
//!
//! A name like `NullPointerException` or `foo_bar2` is treated as a sequence
//! of "humps": sub-words delimited by case changes, digit runs and
//! separators. The matcher anchors pattern characters at hump starts, so the
//! rules here decide which matches are even considered.

use crate::range::TextRange;

/// Script class used for the kana word-break rule. Only kana needs to be told
/// apart; everything else either never breaks (Common) or breaks by the
/// ordinary letter rules (Other).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Hiragana,
    Katakana,
    Common,
    Other,
}

fn script_of(c: char) -> Script {
    match u32::from(c) {
        0x3041..=0x3096 | 0x309D..=0x309F => Script::Hiragana,
        0x30A1..=0x30FA | 0x30FD..=0x30FF | 0x31F0..=0x31FF | 0xFF66..=0xFF6F | 0xFF71..=0xFF9D => {
            Script::Katakana
        }
        // iteration marks, voicing marks, kana punctuation and the prolonged
        // sound marks belong to no single script and never force a break
        0x3031..=0x3035 | 0x3099..=0x309C | 0x30A0 | 0x30FB | 0x30FC | 0xFF70 | 0xFF9E | 0xFF9F => {
            Script::Common
        }
        _ => Script::Other,
    }
}

/// A boundary between hiragana and katakana (or between kana and another
/// script) starts a new word. Common-script marks glue to either side.
fn is_kana_break(prev: char, c: char) -> bool {
    let (a, b) = (script_of(prev), script_of(c));
    if a == b {
        return false;
    }
    let kana = |s| s == Script::Hiragana || s == Script::Katakana;
    if !kana(a) && !kana(b) {
        return false;
    }
    a != Script::Common && b != Script::Common
}

/// CJK unified ideographs (with the extension planes). Each ideograph is a
/// word of its own.
fn is_ideographic(c: char) -> bool {
    matches!(
        u32::from(c),
        0x4E00..=0x9FFF
            | 0x3400..=0x4DBF
            | 0xF900..=0xFAFF
            | 0x20000..=0x2A6DF
            | 0x2A700..=0x2EBEF
            | 0x30000..=0x3134A
    )
}

/// The pattern treats whitespace and these symbols as separators between
/// humps rather than as word content.
pub(crate) fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || c == '_' || c == '-' || c == ':' || c == '+' || c == '.'
}

/// One-to-one uppercase form of `c`. Characters whose uppercase form expands
/// to several characters keep their original form, so per-index case tables
/// stay index-aligned.
#[inline]
pub(crate) fn upper_of(c: char) -> char {
    let mut it = c.to_uppercase();
    match (it.next(), it.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// One-to-one lowercase form of `c`, with the same expansion rule as
/// [`upper_of`].
#[inline]
pub(crate) fn lower_of(c: char) -> char {
    let mut it = c.to_lowercase();
    match (it.next(), it.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Loose equality between a pattern character and a name character: exact, or
/// case-folded when `ignore_case` is set.
#[inline]
pub(crate) fn chars_equal(pattern_char: char, name_char: char, ignore_case: bool) -> bool {
    pattern_char == name_char
        || ignore_case
            && (lower_of(pattern_char) == name_char || upper_of(pattern_char) == name_char)
}

/// `"ln"` reads as its own word when it ends the text or is followed by
/// another word start, so "length"-style suffixes such as `maxln` keep the
/// abbreviation addressable. Kept narrow on purpose.
fn is_hard_coded_word_start(text: &[char], i: usize) -> bool {
    text[i] == 'l'
        && i + 1 < text.len()
        && text[i + 1] == 'n'
        && (text.len() == i + 2 || is_word_start(text, i + 2))
}

/// Reports whether the character at `i` starts a new hump.
///
/// Uppercase starts a word unless it sits in the middle of an acronym run;
/// the last letter of an acronym starts a word when a lowercase word follows
/// (`FOOBar` breaks before `B`). Digits and ideographs always start one.
/// Letters start one at offset 0, after a non-alphanumeric character, or
/// across a kana script boundary.
pub(crate) fn is_word_start(text: &[char], i: usize) -> bool {
    let c = text[i];
    let prev = if i > 0 { Some(text[i - 1]) } else { None };
    if c.is_uppercase() {
        if prev.is_some_and(char::is_uppercase) {
            // middle of an all-caps run is not a word start
            return i + 1 < text.len() && text[i + 1].is_lowercase();
        }
        return true;
    }
    if c.is_ascii_digit() || is_ideographic(c) {
        return true;
    }
    if !c.is_alphabetic() {
        return false;
    }
    match prev {
        None => true,
        Some(p) => {
            !p.is_alphanumeric() || is_hard_coded_word_start(text, i) || is_kana_break(p, c)
        }
    }
}

/// Returns the offset just past the word starting at `start`.
///
/// A non-alphanumeric character is a one-character word. A digit run is one
/// word. An uppercase run is one word, except that a run of two or more
/// followed by a lowercase letter gives its last letter to the next word
/// (`FOOBar` is `FOO` + `Bar`). Anything else runs until the next word start.
pub(crate) fn next_word(text: &[char], start: usize) -> usize {
    if !text[start].is_alphanumeric() {
        return start + 1;
    }
    let mut i = start;
    while i < text.len() && text[i].is_ascii_digit() {
        i += 1;
    }
    if i > start {
        return i;
    }
    while i < text.len() && text[i].is_uppercase() {
        i += 1;
    }
    if i > start + 1 {
        if i == text.len() || !text[i].is_alphabetic() {
            return i;
        }
        // leave the last capital to the following word
        return i - 1;
    }
    if i == start {
        i += 1;
    }
    while i < text.len() && text[i].is_alphabetic() && !is_word_start(text, i) {
        i += 1;
    }
    i
}

/// Iterates over the words of `text` in order.
///
/// Every character belongs to exactly one yielded range; separators come out
/// as one-character words of their own.
///
/// ```
/// use humpback::word_ranges;
///
/// let words: Vec<String> = word_ranges("fooBar_2x")
///     .map(|r| "fooBar_2x".chars().skip(r.start()).take(r.len()).collect())
///     .collect();
/// assert_eq!(words, ["foo", "Bar", "_", "2", "x"]);
/// ```
pub fn word_ranges(text: &str) -> WordRanges {
    WordRanges {
        chars: text.chars().collect(),
        pos: 0,
    }
}

/// Iterator returned by [`word_ranges`].
pub struct WordRanges {
    chars: Vec<char>,
    pos: usize,
}

impl Iterator for WordRanges {
    type Item = TextRange;

    fn next(&mut self) -> Option<TextRange> {
        if self.pos >= self.chars.len() {
            return None;
        }
        let start = self.pos;
        self.pos = next_word(&self.chars, start);
        Some(TextRange::new(start, self.pos))
    }
}
