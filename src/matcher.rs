//! Matcher construction and the public matching surface.
//!
//! A [`MatcherBuilder`] compiles a pattern once into a matcher that can be
//! probed with many candidate names, from many threads. The two concrete
//! matchers share the same search; [`TypoTolerantMatcher`] additionally
//! retries failed names while forgiving common typing errors.

use std::cell::RefCell;
use std::fmt::{Display, Error, Formatter};

use thread_local::ThreadLocal;

use crate::pattern::{CaseSensitivity, CompiledPattern};
use crate::range::TextRange;
use crate::score;
use crate::search;

/// One contiguous matched run inside a name, together with the number of
/// typing errors the run absorbed (zero unless the matcher is typo
/// tolerant).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    range: TextRange,
    errors: usize,
}

impl Fragment {
    /// Creates a fragment covering `range` that absorbed `errors` errors.
    pub fn new(range: TextRange, errors: usize) -> Fragment {
        Fragment { range, errors }
    }

    /// The covered character range.
    pub fn range(&self) -> TextRange {
        self.range
    }

    /// Number of typing errors absorbed by this run.
    pub fn errors(&self) -> usize {
        self.errors
    }

    /// First covered offset.
    pub fn start(&self) -> usize {
        self.range.start()
    }

    /// First offset past the run.
    pub fn end(&self) -> usize {
        self.range.end()
    }

    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.range.len()
    }

    /// True when the run covers no characters.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// A fragment list counts as a start match when it is empty or its first
/// fragment begins the name.
pub fn is_start_match_fragments(fragments: &[Fragment]) -> bool {
    fragments.first().is_none_or(|f| f.start() == 0)
}

/// A compiled pattern that names can be tested and ranked against.
///
/// Matchers are `Send + Sync`; the per-call scratch space is thread local,
/// so one boxed matcher can serve a parallel candidate walk.
pub trait NameMatcher: Send + Sync + Display {
    /// The pattern string this matcher was built from, unmodified.
    fn pattern(&self) -> &str;

    /// True when `name` matches the pattern.
    fn matches(&self, name: &str) -> bool {
        self.matching_fragments(name).is_some()
    }

    /// The matched runs of `name` in order, or `None` when it does not
    /// match. Fragment offsets count characters, not bytes.
    fn matching_fragments(&self, name: &str) -> Option<Vec<Fragment>>;

    /// Ranks how well `name` fits the pattern; higher is better and only
    /// comparisons are meaningful. `valued_start` says an exactly matching
    /// first letter should be rewarded, as for type names in case-sensitive
    /// languages. Non-matching names rank below everything.
    fn matching_degree(&self, name: &str, valued_start: bool) -> i32 {
        self.matching_degree_with(name, valued_start, self.matching_fragments(name).as_deref())
    }

    /// Like [`matching_degree`](NameMatcher::matching_degree) for callers
    /// that already hold the fragments of `name`.
    fn matching_degree_with(
        &self,
        name: &str,
        valued_start: bool,
        fragments: Option<&[Fragment]>,
    ) -> i32;

    /// Shorthand for ranking without the start-letter reward.
    fn degree(&self, name: &str) -> i32 {
        self.matching_degree(name, false)
    }

    /// True when `name` matches starting at its first character.
    fn is_start_match(&self, name: &str) -> bool {
        self.matching_fragments(name)
            .is_some_and(|fragments| is_start_match_fragments(&fragments))
    }
}

/// Camel-hump matcher comparing characters exactly.
#[derive(Debug)]
pub struct HumpMatcher {
    raw: String,
    compiled: CompiledPattern,
    name_cache: ThreadLocal<RefCell<Vec<char>>>,
}

impl HumpMatcher {
    /// Compiles `pattern` into a matcher. `hard_separators` lists characters
    /// a lowercase-only pattern may not silently jump across.
    pub fn new(pattern: &str, case: CaseSensitivity, hard_separators: &str) -> HumpMatcher {
        HumpMatcher {
            raw: pattern.to_string(),
            compiled: CompiledPattern::compile(pattern, case, hard_separators),
            name_cache: ThreadLocal::new(),
        }
    }

    fn with_name_chars<T>(&self, name: &str, f: impl FnOnce(&[char]) -> T) -> T {
        let mut chars = self.name_cache.get_or(|| RefCell::new(Vec::new())).borrow_mut();
        chars.clear();
        chars.extend(name.chars());
        f(&chars)
    }
}

impl NameMatcher for HumpMatcher {
    fn pattern(&self) -> &str {
        &self.raw
    }

    fn matching_fragments(&self, name: &str) -> Option<Vec<Fragment>> {
        self.with_name_chars(name, |chars| search::matching_fragments(&self.compiled, chars))
    }

    fn matching_degree_with(
        &self,
        name: &str,
        valued_start: bool,
        fragments: Option<&[Fragment]>,
    ) -> i32 {
        self.with_name_chars(name, |chars| {
            score::matching_degree(&self.compiled, chars, valued_start, fragments)
        })
    }
}

impl Display for HumpMatcher {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "(Hump: {})", self.raw)
    }
}

/// Camel-hump matcher that retries failed names while forgiving an
/// adjacent-key slip, a transposition or an omitted character.
#[derive(Debug)]
pub struct TypoTolerantMatcher {
    raw: String,
    compiled: CompiledPattern,
    name_cache: ThreadLocal<RefCell<Vec<char>>>,
}

impl TypoTolerantMatcher {
    /// Compiles `pattern` into a typo-tolerant matcher with the same
    /// parameters as [`HumpMatcher::new`].
    pub fn new(pattern: &str, case: CaseSensitivity, hard_separators: &str) -> TypoTolerantMatcher {
        TypoTolerantMatcher {
            raw: pattern.to_string(),
            compiled: CompiledPattern::compile(pattern, case, hard_separators),
            name_cache: ThreadLocal::new(),
        }
    }

    fn with_name_chars<T>(&self, name: &str, f: impl FnOnce(&[char]) -> T) -> T {
        let mut chars = self.name_cache.get_or(|| RefCell::new(Vec::new())).borrow_mut();
        chars.clear();
        chars.extend(name.chars());
        f(&chars)
    }
}

impl NameMatcher for TypoTolerantMatcher {
    fn pattern(&self) -> &str {
        &self.raw
    }

    fn matching_fragments(&self, name: &str) -> Option<Vec<Fragment>> {
        self.with_name_chars(name, |chars| {
            search::matching_fragments_allowing_typos(&self.compiled, chars)
        })
    }

    fn matching_degree_with(
        &self,
        name: &str,
        valued_start: bool,
        fragments: Option<&[Fragment]>,
    ) -> i32 {
        self.with_name_chars(name, |chars| {
            score::matching_degree(&self.compiled, chars, valued_start, fragments)
        })
    }
}

impl Display for TypoTolerantMatcher {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "(TypoTolerant: {})", self.raw)
    }
}

/// Builder for name matchers.
///
/// ```
/// use humpback::MatcherBuilder;
///
/// let matcher = MatcherBuilder::new("deMa").build();
/// assert!(matcher.matches("decodeMap"));
/// assert!(!matcher.matches("decade"));
/// ```
#[derive(Debug)]
pub struct MatcherBuilder {
    pattern: String,
    case: CaseSensitivity,
    hard_separators: String,
    typo_tolerant: bool,
}

impl MatcherBuilder {
    /// Starts a builder with case-insensitive, typo-strict defaults.
    pub fn new(pattern: &str) -> MatcherBuilder {
        MatcherBuilder {
            pattern: pattern.to_string(),
            case: CaseSensitivity::default(),
            hard_separators: String::new(),
            typo_tolerant: false,
        }
    }

    /// How strictly pattern case binds candidate case.
    pub fn case_sensitivity(mut self, case: CaseSensitivity) -> Self {
        self.case = case;
        self
    }

    /// Characters a lowercase-only pattern may not silently jump across,
    /// such as `/` when matching paths.
    pub fn hard_separators(mut self, separators: &str) -> Self {
        self.hard_separators = separators.to_string();
        self
    }

    /// Whether names that fail exactly should be retried with typing-error
    /// hypotheses.
    pub fn typo_tolerant(mut self, tolerant: bool) -> Self {
        self.typo_tolerant = tolerant;
        self
    }

    /// Builds the configured matcher.
    pub fn build(self) -> Box<dyn NameMatcher> {
        if self.typo_tolerant {
            debug!("Initialized typo-tolerant matcher for {:?}", self.pattern);
            Box::new(TypoTolerantMatcher::new(&self.pattern, self.case, &self.hard_separators))
        } else {
            debug!("Initialized hump matcher for {:?}", self.pattern);
            Box::new(HumpMatcher::new(&self.pattern, self.case, &self.hard_separators))
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_exact_matching() {
        let matcher = MatcherBuilder::new("CU").build();
        assert!(matcher.matches("CurrentUser"));
        assert!(!matcher.matches("candle"));
        assert_eq!(matcher.to_string(), "(Hump: CU)");

        // with no hump in sight the uppercase pattern settles for a
        // contiguous run
        let fragments = matcher.matching_fragments("Cursor").unwrap();
        assert_eq!(fragments, [Fragment::new(TextRange::new(0, 2), 0)]);
    }

    #[test]
    fn builder_reports_the_original_pattern() {
        let matcher = MatcherBuilder::new("foo* ").build();
        assert_eq!(matcher.pattern(), "foo* ");
        // the trailing "* " is matching sugar, not part of the requirement
        assert!(matcher.matches("fooBar"));
    }

    #[test]
    fn typo_tolerant_matcher_forgives_what_the_exact_one_rejects() {
        let exact = MatcherBuilder::new("componet").build();
        let tolerant = MatcherBuilder::new("componet").typo_tolerant(true).build();
        assert!(!exact.matches("Component"));
        assert!(tolerant.matches("Component"));
        assert_eq!(tolerant.to_string(), "(TypoTolerant: componet)");

        let fragments = tolerant.matching_fragments("Component").unwrap();
        assert_eq!(fragments.iter().map(Fragment::errors).sum::<usize>(), 1);
    }

    #[test]
    fn start_match_looks_at_the_first_fragment() {
        let matcher = MatcherBuilder::new("*bar").build();
        assert!(matcher.matches("fooBar"));
        assert!(!matcher.is_start_match("fooBar"));
        assert!(MatcherBuilder::new("foo").build().is_start_match("fooBar"));

        assert!(is_start_match_fragments(&[]));
        assert!(!is_start_match_fragments(&[Fragment::new(TextRange::new(2, 4), 0)]));
    }

    #[test]
    fn degree_agrees_with_precomputed_fragments() {
        let matcher = MatcherBuilder::new("npe").build();
        let fragments = matcher.matching_fragments("NullPointerException").unwrap();
        assert_eq!(
            matcher.matching_degree("NullPointerException", false),
            matcher.matching_degree_with("NullPointerException", false, Some(&fragments))
        );
        assert_eq!(
            matcher.degree("NullPointerException"),
            matcher.matching_degree("NullPointerException", false)
        );
        assert_eq!(matcher.matching_degree("nope", false), i32::MIN);
    }

    #[test]
    fn matchers_are_shareable_across_threads() {
        let matcher = MatcherBuilder::new("CU").build();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    assert!(matcher.matches("CurrentUser"));
                    assert!(matcher.degree("CurrentUser") > 0);
                });
            }
        });
    }
}
