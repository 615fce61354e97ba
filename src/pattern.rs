//! Pattern compilation.
//!
//! A raw pattern string is compiled once into per-character case and
//! separator tables plus a few derived flags, so the search never touches
//! `char` classification in its inner loops. Compiled patterns are immutable
//! and safe to share across threads.

use crate::words::{is_word_separator, lower_of, upper_of};

/// Wildcard characters: `*` matches any run of characters, a space separates
/// hump groups and matches like `*` does.
pub(crate) fn is_wildcard_char(c: char) -> bool {
    c == ' ' || c == '*'
}

/// How pattern case constrains candidate case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseSensitivity {
    /// Case differences never reject a candidate.
    #[default]
    Ignore,
    /// The first pattern letter must agree in case with the first letter of
    /// the candidate.
    FirstLetter,
    /// Every pattern letter must match the candidate's case exactly.
    Respect,
}

/// Per-character metadata derived once from a pattern string.
#[derive(Debug)]
pub(crate) struct CompiledPattern {
    /// Pattern characters after stripping one trailing `"* "`.
    pub(crate) chars: Vec<char>,
    pub(crate) case: CaseSensitivity,
    /// Characters across which lowercase-only hump jumps are disallowed.
    pub(crate) hard_separators: String,

    pub(crate) is_lower: Vec<bool>,
    pub(crate) is_upper: Vec<bool>,
    pub(crate) is_separator: Vec<bool>,
    pub(crate) to_lower: Vec<char>,
    pub(crate) to_upper: Vec<char>,

    /// A lowercase character appears before an uppercase one (ignoring the
    /// leading wildcard run), i.e. the user typed a camel hump themselves.
    pub(crate) has_humps: bool,
    pub(crate) has_separators: bool,
    pub(crate) has_dots: bool,
    pub(crate) is_ascii: bool,

    /// Lower/upper pairs for every non-wildcard character, in order. Used as
    /// a cheap two-pointer prefilter before the real search.
    pub(crate) meaningful: Vec<char>,
    pub(crate) min_name_length: usize,
}

impl CompiledPattern {
    pub(crate) fn compile(
        pattern: &str,
        case: CaseSensitivity,
        hard_separators: &str,
    ) -> CompiledPattern {
        // "Foo* " means the same as "Foo": match the last word too
        let stripped = pattern.strip_suffix("* ").unwrap_or(pattern);
        let chars: Vec<char> = stripped.chars().collect();
        let n = chars.len();

        let mut is_lower = Vec::with_capacity(n);
        let mut is_upper = Vec::with_capacity(n);
        let mut is_separator = Vec::with_capacity(n);
        let mut to_lower = Vec::with_capacity(n);
        let mut to_upper = Vec::with_capacity(n);
        let mut meaningful = Vec::new();
        for &c in &chars {
            is_lower.push(c.is_lowercase());
            is_upper.push(c.is_uppercase());
            is_separator.push(is_word_separator(c));
            to_lower.push(lower_of(c));
            to_upper.push(upper_of(c));
            if !is_wildcard_char(c) {
                meaningful.push(lower_of(c));
                meaningful.push(upper_of(c));
            }
        }

        let mut first = 0;
        while first < n && is_wildcard_char(chars[first]) {
            first += 1;
        }
        let mut has_humps = false;
        let mut seen_lower = false;
        for k in first..n {
            if is_lower[k] {
                seen_lower = true;
            } else if seen_lower && is_upper[k] {
                has_humps = true;
                break;
            }
        }
        let has_separators = (first..n).any(|k| is_separator[k]);
        let has_dots = (first..n).any(|k| chars[k] == '.');
        let is_ascii = chars.iter().all(char::is_ascii);
        let min_name_length = meaningful.len() / 2;

        CompiledPattern {
            chars,
            case,
            hard_separators: hard_separators.to_string(),
            is_lower,
            is_upper,
            is_separator,
            to_lower,
            to_upper,
            has_humps,
            has_separators,
            has_dots,
            is_ascii,
            meaningful,
            min_name_length,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.chars.len()
    }

    /// True when `index` is in bounds and holds a wildcard.
    pub(crate) fn is_wildcard(&self, index: usize) -> bool {
        index < self.chars.len() && is_wildcard_char(self.chars[index])
    }

    /// True when `index` is in bounds and holds exactly `c`.
    pub(crate) fn is_char(&self, index: usize, c: char) -> bool {
        index < self.chars.len() && self.chars[index] == c
    }

    /// The pattern ends with a literal space, which asks the match to stop at
    /// a word end.
    pub(crate) fn is_trailing_space(&self) -> bool {
        self.chars.last() == Some(&' ')
    }

    /// Index of the first loose occurrence of `c` in the pattern at or after
    /// `from`. Always case-insensitive; case filtering happens at match time.
    pub(crate) fn index_of_loose(&self, c: char, from: usize) -> Option<usize> {
        (from..self.chars.len())
            .find(|&k| self.chars[k] == c || self.to_lower[k] == c || self.to_upper[k] == c)
    }
}

#[cfg(test)]
#[cfg_attr(coverage, coverage(off))]
mod tests {
    use super::*;

    fn compile(pattern: &str) -> CompiledPattern {
        CompiledPattern::compile(pattern, CaseSensitivity::Ignore, "")
    }

    #[test]
    fn trailing_star_space_is_stripped() {
        assert_eq!(compile("foo* ").chars, ['f', 'o', 'o']);
        // a lone trailing space survives
        assert_eq!(compile("foo ").chars, ['f', 'o', 'o', ' ']);
        assert_eq!(compile("foo* ").len(), 3);
    }

    #[test]
    fn meaningful_characters_skip_wildcards() {
        let p = compile("*Fo b");
        assert_eq!(p.meaningful, ['f', 'F', 'o', 'O', 'b', 'B']);
        assert_eq!(p.min_name_length, 3);
    }

    #[test]
    fn hump_flag_needs_lower_then_upper() {
        assert!(compile("aB").has_humps);
        assert!(compile("fooBar").has_humps);
        assert!(!compile("AB").has_humps);
        assert!(!compile("ab").has_humps);
        assert!(!compile("Ba").has_humps);
        // uppercase before the only lowercase is not a hump the user typed
        assert!(!compile("ABa").has_humps);
        // leading wildcards are ignored when looking for the hump
        assert!(compile("*aB").has_humps);
    }

    #[test]
    fn separator_and_dot_flags() {
        assert!(compile("a.b").has_dots);
        assert!(compile("a.b").has_separators);
        assert!(compile("a-b").has_separators);
        assert!(!compile("ab").has_separators);
        // a leading wildcard does not count as a separator signal
        assert!(!compile(" ab").has_separators);
    }

    #[test]
    fn wildcard_queries() {
        let p = compile("a*b c");
        assert!(p.is_wildcard(1));
        assert!(p.is_wildcard(3));
        assert!(!p.is_wildcard(0));
        assert!(!p.is_wildcard(10));
        assert!(p.is_char(1, '*'));
        assert!(!p.is_char(10, '*'));
    }

    #[test]
    fn loose_index_search() {
        let p = compile("fooBar");
        assert_eq!(p.index_of_loose('b', 0), Some(3));
        assert_eq!(p.index_of_loose('O', 2), Some(2));
        assert_eq!(p.index_of_loose('z', 0), None);
    }

    #[test]
    fn ascii_flag() {
        assert!(compile("foo").is_ascii);
        assert!(!compile("föö").is_ascii);
    }
}
