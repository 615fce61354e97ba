//! Heuristic ranking of accepted matches.
//!
//! Several names usually survive the same pattern, and the completion list
//! wants the likeliest one first. The degree computed here orders them: it
//! rewards matches anchored at the name or a word start, penalizes scattered
//! fragments, skipped humps and accepted typos, and lets case agreement
//! between pattern and name break ties. The absolute numbers are an
//! implementation detail; callers may only compare them.

use crate::matcher::Fragment;
use crate::pattern::CompiledPattern;
use crate::words::{is_word_start, next_word};

/// Starting at the name or at a word start outranks anything the
/// character-level bonuses can accumulate.
const WORD_START_BONUS: i32 = 1000;
/// The first name letter matching case exactly, when the caller says start
/// case is meaningful for this kind of name.
const VALUED_START_CASE: i32 = 150;
/// An uppercase pattern character matching case exactly. The user pressed
/// Shift for a reason.
const UPPERCASE_CASE: i32 = 50;
/// Each hump a gap jumped over without matching anything in it.
const SKIPPED_HUMP_PENALTY: i32 = 10;
/// A gap landing on a hump start the pattern spelled in lowercase.
const UNINTENDED_HUMP_PENALTY: i32 = 10;
/// Scale for accepted typing errors, squared and divided by the square of
/// the fragment length so short sloppy matches hurt most.
const TYPO_PENALTY_SCALE: i32 = 2000;

/// How well `fragments` fit `name`, higher being better. `None` means the
/// name did not match at all and sorts below everything; no fragments means
/// the pattern was empty and any name fits equally.
pub(crate) fn matching_degree(
    pattern: &CompiledPattern,
    name: &[char],
    valued_start: bool,
    fragments: Option<&[Fragment]>,
) -> i32 {
    let Some(fragments) = fragments else {
        return i32::MIN;
    };
    let (Some(first), Some(last)) = (fragments.first(), fragments.last()) else {
        return 0;
    };

    let start_match = first.start() == 0;
    let valued_start_match = start_match && valued_start;

    let mut matching_case = 0;
    let mut p: Option<usize> = None;
    let mut skipped_humps = 0;
    let mut next_hump_start = 0;

    for (k, fragment) in fragments.iter().enumerate() {
        for i in fragment.start()..fragment.end() {
            let after_gap = i == fragment.start() && k > 0;
            let mut is_hump_start = false;
            while next_hump_start <= i {
                if next_hump_start == i {
                    is_hump_start = true;
                } else if after_gap {
                    skipped_humps += 1;
                }
                next_hump_start = next_word(name, next_hump_start);
            }
            let c = name[i];
            p = pattern.index_of_loose(c, p.map_or(0, |q| q + 1));
            let Some(q) = p else {
                // pattern exhausted; the next fragment rescans it from the top
                break;
            };
            matching_case += evaluate_case(pattern, q, c, i, after_gap, is_hump_start, valued_start_match);
        }
    }

    let start_index = first.start();
    let after_separator = name[..start_index]
        .iter()
        .any(|c| pattern.hard_separators.contains(*c));
    let word_start = start_index == 0
        || is_word_start(name, start_index) && !is_word_start(name, start_index - 1);
    let final_match = last.end() == name.len();

    let mut degree = if word_start { WORD_START_BONUS } else { 0 };
    degree += matching_case;
    degree -= fragments.len() as i32;
    degree -= SKIPPED_HUMP_PENALTY * skipped_humps;
    if !after_separator {
        degree += 2;
    }
    if start_match {
        degree += 1;
    }
    if final_match {
        degree += 1;
    }
    for fragment in fragments {
        if fragment.errors() > 0 {
            let len = fragment.len() as i32;
            degree -= TYPO_PENALTY_SCALE * (fragment.errors() as i32).pow(2) / (len * len);
        }
    }
    degree
}

fn evaluate_case(
    pattern: &CompiledPattern,
    p: usize,
    name_char: char,
    name_index: usize,
    after_gap: bool,
    is_hump_start: bool,
    valued_start_match: bool,
) -> i32 {
    if after_gap && is_hump_start && pattern.is_lower[p] {
        // the name has a hump here but nothing in the pattern asked for one
        return -UNINTENDED_HUMP_PENALTY;
    }
    if name_char == pattern.chars[p] {
        if name_index == 0 && valued_start_match {
            return VALUED_START_CASE;
        }
        if pattern.is_upper[p] {
            return UPPERCASE_CASE;
        }
        if is_hump_start {
            // lowercase agreeing with a lowercase hump start still means something
            return 1;
        }
    } else if is_hump_start {
        return -1;
    }
    0
}
