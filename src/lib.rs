//! Humpback matches abbreviation patterns against identifier-style names.
//!
//! A pattern like `NPE` or `deMa` matches a name when its characters appear
//! in order, anchored at the name's "humps": word starts produced by case
//! changes, digits and separators. Matched names can then be ranked, so the
//! candidates a user most likely meant sort first. An optional typo-tolerant
//! mode also accepts names reachable from the pattern by one or more common
//! typing errors.
//!
//! # Examples
//!
//! ```
//! use humpback::MatcherBuilder;
//!
//! let matcher = MatcherBuilder::new("NPE").build();
//! assert!(matcher.matches("NullPointerException"));
//!
//! let fragments = matcher.matching_fragments("NullPointerException").unwrap();
//! let starts: Vec<usize> = fragments.iter().map(|f| f.start()).collect();
//! assert_eq!(starts, [0, 4, 11]);
//!
//! let matcher = MatcherBuilder::new("foo").build();
//! assert!(matcher.matching_degree("fooBar", false) > matcher.matching_degree("FooBar", false));
//! ```

#![warn(missing_docs)]

#[macro_use]
extern crate log;

mod matcher;
mod pattern;
mod range;
mod score;
mod search;
mod typo;
mod words;

pub use crate::matcher::{
    Fragment, HumpMatcher, MatcherBuilder, NameMatcher, TypoTolerantMatcher,
    is_start_match_fragments,
};
pub use crate::pattern::CaseSensitivity;
pub use crate::range::TextRange;
pub use crate::words::{WordRanges, word_ranges};
