//! The backtracking fragment search.
//!
//! A pattern is matched against a name as a sequence of contiguous fragments,
//! each starting at a plausible spot: the current position, a camel hump, or
//! a word start further right. The search grows the longest fragment it can,
//! then tries to place the rest of the pattern after it, giving characters
//! back one at a time when the tail refuses to fit. Wildcards (`*` and space)
//! cut the pattern into parts that may land in any later word.
//!
//! The same code runs in two modes selected by a const parameter. The exact
//! mode compares characters directly. The typo-aware mode may accept an
//! adjacent-key substitution, a transposition or an omitted character,
//! recording each into an [`ErrorArena`] overlay so that abandoned branches
//! leave no trace behind.

use crate::matcher::Fragment;
use crate::pattern::{CaseSensitivity, CompiledPattern, is_wildcard_char};
use crate::range::TextRange;
use crate::typo::{ErrorArena, OverlayId, TypingError, key_neighbors};
use crate::words::{chars_equal, is_word_separator, is_word_start};

/// Names longer than this skip the hump machinery for a plain substring
/// check, keeping worst-case work bounded on generated identifiers.
const MAX_HUMP_MATCHING_LENGTH: usize = 100;
/// Patterns longer than this are never retried with typo hypotheses.
const MAX_TYPO_PATTERN_LENGTH: usize = 20;
/// A fragment that starts in the middle of a word must cover at least this
/// many characters, or it matches far too much.
const MIN_MIDDLE_FRAGMENT: usize = 3;

/// Fragments of `name` matched by `pattern`, in order, or `None` when the
/// name does not fit. Characters are compared exactly.
pub(crate) fn matching_fragments(
    pattern: &CompiledPattern,
    name: &[char],
) -> Option<Vec<Fragment>> {
    if name.len() < pattern.min_name_length {
        return None;
    }
    if name.len() > MAX_HUMP_MATCHING_LENGTH {
        trace!("hump search bypassed for {}-char name, using substring fallback", name.len());
        return match_by_substring(pattern, name);
    }
    if !passes_meaningful_prefilter(pattern, name) {
        return None;
    }
    let mut session: Session<'_, false> = Session::new(pattern, name);
    let root = session.arena.root();
    session.match_wildcards(0, 0, root)
}

/// Like [`matching_fragments`], but when the exact walk fails the search runs
/// again allowing typing errors, and fragments report how many they absorbed.
pub(crate) fn matching_fragments_allowing_typos(
    pattern: &CompiledPattern,
    name: &[char],
) -> Option<Vec<Fragment>> {
    if let Some(fragments) = matching_fragments(pattern, name) {
        return Some(fragments);
    }
    if !typo_mode_applicable(pattern, name) {
        return None;
    }
    trace!("exact search failed, retrying {:?} with typing errors allowed", pattern.chars);
    let mut session: Session<'_, true> = Session::new(pattern, name);
    let root = session.arena.root();
    session.match_wildcards(0, 0, root)
}

/// Typo hypotheses are ASCII-only and priced for short patterns. The
/// character prefilter cannot run here, so the length floor still applies.
fn typo_mode_applicable(pattern: &CompiledPattern, name: &[char]) -> bool {
    pattern.is_ascii
        && pattern.len() <= MAX_TYPO_PATTERN_LENGTH
        && name.len() >= pattern.min_name_length
        && name.len() <= MAX_HUMP_MATCHING_LENGTH
        && name.iter().all(char::is_ascii)
}

/// Every meaningful pattern character must occur in the name in order, in
/// either case. Cheap rejection before the backtracking starts.
fn passes_meaningful_prefilter(pattern: &CompiledPattern, name: &[char]) -> bool {
    let meaningful = &pattern.meaningful;
    let mut k = 0;
    for &c in name {
        if k >= meaningful.len() {
            break;
        }
        if c == meaningful[k] || c == meaningful[k + 1] {
            k += 2;
        }
    }
    k >= meaningful.len()
}

/// Fallback for very long names: the pattern without wildcards must occur
/// as one contiguous run, anchored at the start unless the pattern opened
/// with `*`.
fn match_by_substring(pattern: &CompiledPattern, name: &[char]) -> Option<Vec<Fragment>> {
    let infix = pattern.is_char(0, '*');
    let meat: Vec<char> = pattern
        .chars
        .iter()
        .copied()
        .filter(|&c| !is_wildcard_char(c))
        .collect();
    if meat.is_empty() {
        // all-wildcard patterns match trivially, whatever the name length
        return Some(Vec::new());
    }
    if name.len() < meat.len() {
        return None;
    }
    let starts = if infix { 0..=name.len() - meat.len() } else { 0..=0 };
    for start in starts {
        if substring_matches_at(pattern, &meat, name, start) {
            return Some(vec![Fragment::new(TextRange::from_len(start, meat.len()), 0)]);
        }
    }
    None
}

fn substring_matches_at(
    pattern: &CompiledPattern,
    meat: &[char],
    name: &[char],
    start: usize,
) -> bool {
    meat.iter().enumerate().all(|(k, &pc)| {
        let exact = match pattern.case {
            CaseSensitivity::Ignore => false,
            CaseSensitivity::FirstLetter => k == 0,
            CaseSensitivity::Respect => true,
        };
        chars_equal(pc, name[start + k], !exact)
    })
}

fn has_case(c: char) -> bool {
    c.is_uppercase() || c.is_lowercase()
}

fn is_upper_or_digit(c: char) -> bool {
    c.is_uppercase() || c.is_ascii_digit()
}

/// Puts `[from, from + len)` carrying `errors` in front of `fragments`,
/// merging with the head when the two touch.
fn prepend_fragment(fragments: &mut Vec<Fragment>, from: usize, len: usize, errors: usize) {
    if let Some(&head) = fragments.first() {
        if head.start() == from + len {
            fragments[0] = Fragment::new(TextRange::new(from, head.end()), errors + head.errors());
            return;
        }
    }
    fragments.insert(0, Fragment::new(TextRange::from_len(from, len), errors));
}

/// One match attempt over one name. The const parameter selects whether
/// character comparisons may hypothesize typing errors.
struct Session<'a, const TYPO_AWARE: bool> {
    pattern: &'a CompiledPattern,
    name: &'a [char],
    arena: ErrorArena,
}

impl<'a, const TYPO_AWARE: bool> Session<'a, TYPO_AWARE> {
    fn new(pattern: &'a CompiledPattern, name: &'a [char]) -> Self {
        Session {
            pattern,
            name,
            arena: ErrorArena::new(),
        }
    }

    // Pattern accessors. In exact mode these read the compiled tables; in
    // typo mode they see the pattern with the overlay's errors applied.

    fn pattern_len(&self, overlay: OverlayId) -> usize {
        if TYPO_AWARE {
            self.arena.pattern_len(overlay, self.pattern)
        } else {
            self.pattern.len()
        }
    }

    fn pattern_char(&self, pi: usize, overlay: OverlayId) -> char {
        if TYPO_AWARE {
            self.arena.char_at(overlay, self.pattern, pi)
        } else {
            self.pattern.chars[pi]
        }
    }

    fn is_wildcard(&self, pi: usize, overlay: OverlayId) -> bool {
        if TYPO_AWARE {
            pi < self.pattern_len(overlay) && is_wildcard_char(self.pattern_char(pi, overlay))
        } else {
            self.pattern.is_wildcard(pi)
        }
    }

    fn is_pattern_char(&self, pi: usize, c: char, overlay: OverlayId) -> bool {
        if TYPO_AWARE {
            pi < self.pattern_len(overlay) && self.pattern_char(pi, overlay) == c
        } else {
            self.pattern.is_char(pi, c)
        }
    }

    fn is_lower_at(&self, pi: usize, overlay: OverlayId) -> bool {
        if TYPO_AWARE {
            self.pattern_char(pi, overlay).is_lowercase()
        } else {
            self.pattern.is_lower[pi]
        }
    }

    fn is_upper_at(&self, pi: usize, overlay: OverlayId) -> bool {
        if TYPO_AWARE {
            self.pattern_char(pi, overlay).is_uppercase()
        } else {
            self.pattern.is_upper[pi]
        }
    }

    fn is_separator_at(&self, pi: usize, overlay: OverlayId) -> bool {
        if TYPO_AWARE {
            is_word_separator(self.pattern_char(pi, overlay))
        } else {
            self.pattern.is_separator[pi]
        }
    }

    fn derive(&mut self, overlay: OverlayId, pi: usize) -> OverlayId {
        if TYPO_AWARE {
            self.arena.derive(overlay, pi)
        } else {
            overlay
        }
    }

    fn count_errors(&self, overlay: OverlayId, from: usize, until: usize) -> usize {
        if TYPO_AWARE {
            self.arena.count_in(overlay, from, until)
        } else {
            0
        }
    }

    /// Matches the pattern from `pi` against the name from `ni`, where `pi`
    /// may sit on a wildcard run. The name position after a wildcard is free:
    /// the next fragment may start anywhere to the right.
    fn match_wildcards(
        &mut self,
        mut pi: usize,
        ni: usize,
        overlay: OverlayId,
    ) -> Option<Vec<Fragment>> {
        if !self.is_wildcard(pi, overlay) {
            if pi == self.pattern_len(overlay) {
                return Some(Vec::new());
            }
            return self.match_fragment(pi, ni, overlay);
        }
        while self.is_wildcard(pi, overlay) {
            pi += 1;
        }
        if pi == self.pattern_len(overlay) {
            // a trailing space wants the match to end at a word boundary, or
            // to be excused by a space later in the name; a pattern ending in
            // an uppercase hump or digit is taken as complete already
            if self.pattern.is_trailing_space()
                && ni != self.name.len()
                && (pi < 2 || !is_upper_or_digit(self.pattern_char(pi - 2, overlay)))
            {
                let space = self.name[ni..].iter().position(|&c| c == ' ')?;
                return Some(vec![Fragment::new(TextRange::from_len(ni + space, 1), 0)]);
            }
            return Some(Vec::new());
        }
        if let Some(fragments) = self.match_fragment(pi, ni, overlay) {
            return Some(fragments);
        }
        self.match_skipping_words(pi, ni, true, overlay)
    }

    /// Tries the pattern from `pi` at successive occurrences of its current
    /// character further right in the name. Lowercase pattern characters may
    /// only jump to word starts; after a `*` any occurrence is fair.
    fn match_skipping_words(
        &mut self,
        pi: usize,
        mut ni: usize,
        allow_special: bool,
        overlay: OverlayId,
    ) -> Option<Vec<Fragment>> {
        let mut max_found_length = 0;
        loop {
            ni = self.find_next_occurrence(pi, ni, allow_special, overlay)?;
            if !self.seems_like_fragment_start(pi, ni, overlay) {
                continue;
            }
            let branch = self.derive(overlay, pi);
            let fragment_length = self.max_matching_fragment(pi, ni, branch);
            // a fragment no longer than one we already failed with would fail
            // the same way with even less name left, except when a trailing
            // space pattern can end exactly at the name end
            if fragment_length > max_found_length
                || ni + fragment_length == self.name.len() && self.pattern.is_trailing_space()
            {
                if !self.is_middle_match(pi, ni, overlay) {
                    max_found_length = fragment_length;
                }
                if let Some(fragments) = self.match_inside_fragment(pi, ni, fragment_length, branch)
                {
                    return Some(fragments);
                }
            }
        }
    }

    /// The next name position where the pattern character at `pi` could start
    /// a fragment, or `None`. Without `allow_special`, crossing a hard
    /// separator or an unasked-for dot disqualifies the jump.
    fn find_next_occurrence(
        &self,
        pi: usize,
        start_from: usize,
        allow_special: bool,
        overlay: OverlayId,
    ) -> Option<usize> {
        let next = if pi > 0 && self.is_pattern_char(pi - 1, '*', overlay)
            || self.is_separator_at(pi, overlay)
        {
            self.index_of_loose_in_name(self.pattern_char(pi, overlay), start_from + 1)
        } else {
            self.index_of_word_start(pi, start_from, overlay)
        }?;
        if !allow_special {
            // the checked window opens at start_from: the first unmatched name
            // character may itself be the separator being crossed
            if !self.pattern.has_separators
                && !self.pattern.has_humps
                && self.contains_hard_separator(start_from, next)
            {
                return None;
            }
            if self.pattern.has_dots
                && !(pi > 0 && self.is_pattern_char(pi - 1, '.', overlay))
                && self.name[start_from..next].contains(&'.')
            {
                return None;
            }
        }
        Some(next)
    }

    /// An uppercase pattern character should land on something that looks
    /// like a hump, unless the whole pattern is caps-typed loosely.
    fn seems_like_fragment_start(&self, pi: usize, ni: usize, overlay: OverlayId) -> bool {
        !self.is_upper_at(pi, overlay)
            || self.name[ni].is_uppercase()
            || is_word_start(self.name, ni)
            || !self.pattern.has_humps && self.pattern.case != CaseSensitivity::Respect
    }

    fn index_of_loose_in_name(&self, p: char, from: usize) -> Option<usize> {
        (from..self.name.len()).find(|&k| chars_equal(p, self.name[k], true))
    }

    /// The next word start at or after `start_from + 1` holding the pattern
    /// character at `pi`, loosely. Lowercase characters in a pattern that has
    /// humps don't get to start words of their own, except after a separator.
    fn index_of_word_start(
        &self,
        pi: usize,
        start_from: usize,
        overlay: OverlayId,
    ) -> Option<usize> {
        let p = self.pattern_char(pi, overlay);
        if self.pattern.has_humps
            && self.is_lower_at(pi, overlay)
            && !(pi > 0 && self.is_separator_at(pi - 1, overlay))
        {
            return None;
        }
        let special = !p.is_alphanumeric();
        let mut i = start_from;
        loop {
            i = self.index_of_loose_in_name(p, i + 1)?;
            if special || is_word_start(self.name, i) {
                return Some(i);
            }
        }
    }

    fn contains_hard_separator(&self, from: usize, until: usize) -> bool {
        self.name[from..until]
            .iter()
            .any(|&c| self.pattern.hard_separators.contains(c))
    }

    fn match_fragment(&mut self, pi: usize, ni: usize, overlay: OverlayId) -> Option<Vec<Fragment>> {
        let branch = self.derive(overlay, pi);
        let fragment_length = self.max_matching_fragment(pi, ni, branch);
        if fragment_length == 0 {
            return None;
        }
        self.match_inside_fragment(pi, ni, fragment_length, branch)
    }

    /// Length of the longest contiguous run of matching characters starting
    /// at `(pi, ni)`, zero when even the first pair disagrees. Digits refuse
    /// partial matches: `foo2` must not match inside `foo25`.
    fn max_matching_fragment(&mut self, pi: usize, ni: usize, overlay: OverlayId) -> usize {
        if !self.is_first_char_matching(pi, ni, overlay) {
            return 0;
        }
        let mut i = 1;
        while ni + i < self.name.len() && pi + i < self.pattern_len(overlay) {
            if !self.chars_match(pi + i, ni + i, true, overlay) {
                if self.pattern_char(pi + i, overlay).is_ascii_digit()
                    && self.name[ni + i].is_ascii_digit()
                {
                    return 0;
                }
                break;
            }
            i += 1;
        }
        i
    }

    fn is_first_char_matching(&mut self, pi: usize, ni: usize, overlay: OverlayId) -> bool {
        if ni >= self.name.len() || pi >= self.pattern_len(overlay) {
            return false;
        }
        let pc = self.pattern_char(pi, overlay);
        if !self.chars_match(pi, ni, true, overlay) {
            return false;
        }
        // in first-letter mode a fragment anchored at the pattern head must
        // agree in case with the very first name character
        if self.pattern.case == CaseSensitivity::FirstLetter
            && (pi == 0 || pi == 1 && self.is_wildcard(0, overlay))
            && has_case(pc)
            && pc.is_uppercase() != self.name[0].is_uppercase()
        {
            return false;
        }
        true
    }

    /// Character comparison. In typo mode a mismatch may be excused as an
    /// adjacent-key slip, a transposition with the next pattern character, or
    /// a character the user left out; the accepted repair is recorded on
    /// `overlay` and no position takes a second one.
    fn chars_match(&mut self, pi: usize, ni: usize, allow_errors: bool, overlay: OverlayId) -> bool {
        if ni >= self.name.len() || pi >= self.pattern_len(overlay) {
            return false;
        }
        let pc = self.pattern_char(pi, overlay);
        let nc = self.name[ni];
        let ignore_case = self.pattern.case != CaseSensitivity::Respect;
        if chars_equal(pc, nc, ignore_case) {
            return true;
        }
        if !TYPO_AWARE || !allow_errors {
            return false;
        }
        if !pc.is_ascii() || !nc.is_ascii() || is_wildcard_char(pc) || self.arena.affects(overlay, pi)
        {
            return false;
        }
        for neighbor in key_neighbors(pc).into_iter().flatten() {
            if chars_equal(neighbor, nc, ignore_case) {
                self.arena.add(overlay, pi, TypingError::Typo(neighbor));
                return true;
            }
        }
        if pi + 1 < self.pattern_len(overlay) && !self.arena.affects(overlay, pi + 1) {
            let next = self.pattern_char(pi + 1, overlay);
            if next != pc && !is_wildcard_char(next) && chars_equal(next, nc, ignore_case) {
                self.arena.add(overlay, pi, TypingError::Swap);
                return true;
            }
        }
        if ni + 1 < self.name.len()
            && !is_wildcard_char(nc)
            && chars_equal(pc, self.name[ni + 1], ignore_case)
        {
            self.arena.add(overlay, pi, TypingError::Miss(nc));
            return true;
        }
        false
    }

    /// A fragment continuing right after a `*` from the middle of a word.
    /// Those are held to a higher length bar.
    fn is_middle_match(&self, pi: usize, ni: usize, overlay: OverlayId) -> bool {
        pi > 0
            && self.is_pattern_char(pi - 1, '*', overlay)
            && !self.is_wildcard(pi + 1, overlay)
            && self.name[ni].is_alphanumeric()
            && !is_word_start(self.name, ni)
    }

    fn match_inside_fragment(
        &mut self,
        pi: usize,
        ni: usize,
        fragment_length: usize,
        overlay: OverlayId,
    ) -> Option<Vec<Fragment>> {
        let min_fragment = if self.is_middle_match(pi, ni, overlay) {
            MIN_MIDDLE_FRAGMENT
        } else {
            1
        };
        if let Some(fragments) =
            self.improve_camel_humps(pi, ni, fragment_length, min_fragment, overlay)
        {
            return Some(fragments);
        }
        self.find_longest_matching_prefix(pi, ni, fragment_length, min_fragment, overlay)
    }

    /// An uppercase pattern character that matched lowercase inside the
    /// fragment may do better on a word start further right. `uP` against
    /// `upperPeak` prefers `u` + `P` of `Peak` over swallowing `up`.
    fn improve_camel_humps(
        &mut self,
        pi: usize,
        ni: usize,
        max_fragment: usize,
        min_fragment: usize,
        overlay: OverlayId,
    ) -> Option<Vec<Fragment>> {
        for i in min_fragment..max_fragment {
            if self.is_upper_at(pi + i, overlay)
                && self.pattern_char(pi + i, overlay) != self.name[ni + i]
            {
                let further = self
                    .index_of_word_start(pi + i, ni + i, overlay)
                    .and_then(|start| self.match_wildcards(pi + i, start, overlay));
                if let Some(mut fragments) = further {
                    prepend_fragment(&mut fragments, ni, i, self.count_errors(overlay, pi, pi + i));
                    return Some(fragments);
                }
            }
        }
        None
    }

    /// Commits the longest workable prefix of the grown fragment and matches
    /// the rest of the pattern after it, shrinking on failure. Giving back
    /// characters lets `cL` match `classList` after `cl` swallowed the `l`.
    fn find_longest_matching_prefix(
        &mut self,
        pi: usize,
        ni: usize,
        fragment_length: usize,
        min_fragment: usize,
        overlay: OverlayId,
    ) -> Option<Vec<Fragment>> {
        if pi + fragment_length == self.pattern_len(overlay) && fragment_length >= min_fragment {
            return Some(vec![Fragment::new(
                TextRange::from_len(ni, fragment_length),
                self.count_errors(overlay, pi, pi + fragment_length),
            )]);
        }
        let mut i = fragment_length;
        while i >= min_fragment || i > 0 && self.is_wildcard(pi + i, overlay) {
            let fragments = if self.is_wildcard(pi + i, overlay) {
                self.match_wildcards(pi + i, ni + i, overlay)
            } else {
                self.match_skipping_words(pi + i, ni + i, false, overlay)
            };
            if let Some(mut fragments) = fragments {
                prepend_fragment(&mut fragments, ni, i, self.count_errors(overlay, pi, pi + i));
                return Some(fragments);
            }
            i -= 1;
        }
        None
    }
}

#[cfg(test)]
#[cfg_attr(coverage, coverage(off))]
mod tests {
    use super::*;

    fn compiled(pattern: &str) -> CompiledPattern {
        CompiledPattern::compile(pattern, CaseSensitivity::Ignore, "")
    }

    fn spans(pattern: &str, name: &str) -> Option<Vec<(usize, usize)>> {
        let chars: Vec<char> = name.chars().collect();
        matching_fragments(&compiled(pattern), &chars)
            .map(|v| v.iter().map(|f| (f.start(), f.end())).collect())
    }

    fn typo_spans(pattern: &str, name: &str) -> Option<Vec<(usize, usize, usize)>> {
        let chars: Vec<char> = name.chars().collect();
        matching_fragments_allowing_typos(&compiled(pattern), &chars)
            .map(|v| v.iter().map(|f| (f.start(), f.end(), f.errors())).collect())
    }

    #[test]
    fn prefix_fragment() {
        assert_eq!(spans("foo", "fooBar"), Some(vec![(0, 3)]));
        assert_eq!(spans("foo", "FooBar"), Some(vec![(0, 3)]));
        assert_eq!(spans("foo", "barbaz"), None);
    }

    #[test]
    fn empty_and_lone_wildcard_match_everything() {
        assert_eq!(spans("", "anything"), Some(vec![]));
        assert_eq!(spans("*", "anything"), Some(vec![]));
    }

    #[test]
    fn too_short_names_are_rejected() {
        assert_eq!(spans("abcd", "ab"), None);
    }

    #[test]
    fn uppercase_abbreviation_takes_humps() {
        assert_eq!(spans("NPE", "NullPointerException"), Some(vec![(0, 1), (4, 5), (11, 12)]));
        assert_eq!(spans("npe", "NullPointerException"), Some(vec![(0, 1), (4, 5), (11, 12)]));
    }

    #[test]
    fn uppercase_prefers_word_start_over_swallowing() {
        // CU should not settle for Cu of Current when User is available
        assert_eq!(spans("CU", "CurrentUser"), Some(vec![(0, 1), (7, 8)]));
    }

    #[test]
    fn shrinking_gives_back_swallowed_characters() {
        // aB swallows the first B, then gives it back so Bc can match later
        assert_eq!(spans("aBc", "aBxxBc"), Some(vec![(0, 1), (4, 6)]));
    }

    #[test]
    fn uppercase_matched_loosely_moves_to_a_word_start() {
        assert_eq!(spans("cL", "classList"), Some(vec![(0, 1), (5, 6)]));
    }

    #[test]
    fn middle_matches_need_three_characters() {
        assert_eq!(spans("*oi", "Pointer"), None);
        assert_eq!(spans("*oin", "Pointer"), Some(vec![(1, 4)]));
    }

    #[test]
    fn wildcard_frees_the_next_fragment_position() {
        assert_eq!(spans("f*ba", "fooBaz"), Some(vec![(0, 1), (3, 5)]));
        // a single mid-word character after the gap is not enough
        assert_eq!(spans("f*z", "fooBaz"), None);
    }

    #[test]
    fn trailing_space_requires_word_end() {
        assert_eq!(spans("foo ", "foo"), Some(vec![(0, 3)]));
        assert_eq!(spans("foo ", "foobar"), None);
        // a space later in the name excuses the unfinished word
        assert_eq!(spans("foo ", "foobar x"), Some(vec![(0, 3), (6, 7)]));
    }

    #[test]
    fn mismatched_digits_kill_the_fragment() {
        assert_eq!(spans("foo3", "foo253"), None);
        assert_eq!(spans("foo2", "foo25"), Some(vec![(0, 4)]));
    }

    #[test]
    fn lowercase_may_cross_hard_separators_only_with_help() {
        let pattern = CompiledPattern::compile("ab", CaseSensitivity::Ignore, "/");
        let name: Vec<char> = "axxx/bxxx".chars().collect();
        assert_eq!(matching_fragments(&pattern, &name), None);

        // a hump in the pattern signals the user expects to jump words
        let pattern = CompiledPattern::compile("aB", CaseSensitivity::Ignore, "/");
        let fragments = matching_fragments(&pattern, &name).unwrap();
        assert_eq!(fragments[0].range(), TextRange::new(0, 1));
        assert_eq!(fragments[1].range(), TextRange::new(5, 6));
    }

    #[test]
    fn separator_right_after_a_fragment_still_blocks() {
        // the / sits immediately after the committed fragment, not further out
        let pattern = CompiledPattern::compile("srcmain", CaseSensitivity::Ignore, "/");
        let name: Vec<char> = "src/main".chars().collect();
        assert_eq!(matching_fragments(&pattern, &name), None);
    }

    #[test]
    fn dot_right_after_a_fragment_still_blocks() {
        assert_eq!(spans(".ac", ".a.c"), None);
        assert_eq!(spans(".a.c", ".a.c"), Some(vec![(0, 4)]));
    }

    #[test]
    fn spelled_separators_allow_crossing() {
        assert_eq!(spans("a/b", "axxx/bxxx"), Some(vec![(0, 1), (4, 6)]));
    }

    #[test]
    fn dots_must_be_spelled_to_be_crossed() {
        assert_eq!(spans(".ac", ".a.b.c"), None);
        assert_eq!(spans(".a.c", ".a.b.c"), Some(vec![(0, 3), (5, 6)]));
    }

    #[test]
    fn first_letter_mode_pins_the_first_character() {
        let name: Vec<char> = "FooBar".chars().collect();
        let lower = CompiledPattern::compile("foo", CaseSensitivity::FirstLetter, "");
        assert_eq!(matching_fragments(&lower, &name), None);
        let upper = CompiledPattern::compile("Foo", CaseSensitivity::FirstLetter, "");
        assert!(matching_fragments(&upper, &name).is_some());
    }

    #[test]
    fn respect_mode_requires_exact_case_throughout() {
        let name: Vec<char> = "FooBar".chars().collect();
        let wrong = CompiledPattern::compile("fooB", CaseSensitivity::Respect, "");
        assert_eq!(matching_fragments(&wrong, &name), None);
        let right = CompiledPattern::compile("FooB", CaseSensitivity::Respect, "");
        assert!(matching_fragments(&right, &name).is_some());
    }

    #[test]
    fn long_names_fall_back_to_substring() {
        let long_name: String = "x".repeat(120) + "needle" + &"y".repeat(30);
        assert_eq!(spans("*needle", &long_name), Some(vec![(120, 126)]));
        assert_eq!(spans("needle", &long_name), None);
        let prefixed = "needle".to_string() + &"x".repeat(120);
        assert_eq!(spans("needle", &prefixed), Some(vec![(0, 6)]));
    }

    #[test]
    fn all_wildcard_patterns_match_long_names_too() {
        let long_name = "a".repeat(120);
        assert_eq!(spans("", &long_name), Some(vec![]));
        assert_eq!(spans("*", &long_name), Some(vec![]));
    }

    #[test]
    fn omitted_character_is_tolerated() {
        assert_eq!(spans("componet", "Component"), None);
        assert_eq!(typo_spans("componet", "Component"), Some(vec![(0, 9, 1)]));
    }

    #[test]
    fn adjacent_key_slip_is_tolerated() {
        assert_eq!(typo_spans("vomponent", "component"), Some(vec![(0, 9, 1)]));
        // k is nowhere near c on the keyboard
        assert_eq!(typo_spans("komponent", "component"), None);
    }

    #[test]
    fn transposition_is_tolerated() {
        assert_eq!(typo_spans("ocmponent", "component"), Some(vec![(0, 9, 1)]));
    }

    #[test]
    fn exact_match_wins_before_typos_are_tried() {
        assert_eq!(typo_spans("component", "component"), Some(vec![(0, 9, 0)]));
    }

    #[test]
    fn typo_mode_stays_within_its_bounds() {
        // non-ascii patterns and names take no typo hypotheses
        assert_eq!(typo_spans("grün", "gruen"), None);
        let name: Vec<char> = "Component".chars().collect();
        assert!(typo_mode_applicable(&compiled("componet"), &name));
        assert!(!typo_mode_applicable(&compiled("cömponet"), &name));
        let non_ascii_name: Vec<char> = "Cömponent".chars().collect();
        assert!(!typo_mode_applicable(&compiled("componet"), &non_ascii_name));
        let long = "a".repeat(MAX_TYPO_PATTERN_LENGTH + 1);
        let long_name: Vec<char> = "a".repeat(30).chars().collect();
        assert!(!typo_mode_applicable(&compiled(&long), &long_name));
    }
}
