//! Error tracking for the typo-tolerant search.
//!
//! The backtracking search explores many branches, and a branch that accepts
//! a typing error must not leak that error into its siblings. Instead of
//! copying the pattern per branch, errors live in an arena of overlay nodes:
//! deriving a child node is O(1), children never mutate their parents, and a
//! child sees only the parent-chain errors below its derive index, which
//! masks everything a failed exploration recorded past the branch point.

use crate::pattern::CompiledPattern;

/// One accepted deviation between the typed pattern and the candidate name,
/// recorded at an effective pattern index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypingError {
    /// The pattern character stands for this adjacent key.
    Typo(char),
    /// The pattern character and its successor are transposed.
    Swap,
    /// The name contains this character where the pattern omitted it. The
    /// effective pattern grows by one: the omitted character is read at this
    /// index and everything after shifts right.
    Miss(char),
}

/// Handle to one overlay node in an [`ErrorArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OverlayId(usize);

struct Node {
    parent: Option<OverlayId>,
    /// Parent-chain errors at indices below this are visible; the rest are
    /// masked as belonging to abandoned explorations.
    derive_index: usize,
    /// Own errors, appended in ascending index order as the search advances.
    errors: Vec<(usize, TypingError)>,
}

pub(crate) struct ErrorArena {
    nodes: Vec<Node>,
}

impl ErrorArena {
    pub(crate) fn new() -> ErrorArena {
        ErrorArena {
            nodes: vec![Node {
                parent: None,
                derive_index: 0,
                errors: Vec::new(),
            }],
        }
    }

    pub(crate) fn root(&self) -> OverlayId {
        OverlayId(0)
    }

    /// Creates a child of `parent` that sees its errors only below
    /// `pattern_index`. The parent is left untouched.
    pub(crate) fn derive(&mut self, parent: OverlayId, pattern_index: usize) -> OverlayId {
        self.nodes.push(Node {
            parent: Some(parent),
            derive_index: pattern_index,
            errors: Vec::new(),
        });
        OverlayId(self.nodes.len() - 1)
    }

    /// Records an error on `id` at `pattern_index`.
    pub(crate) fn add(&mut self, id: OverlayId, pattern_index: usize, error: TypingError) {
        debug_assert!(!self.affects(id, pattern_index));
        self.nodes[id.0].errors.push((pattern_index, error));
    }

    /// Calls `visit` for every error visible to `id`, in ascending index
    /// order. Returning `false` stops the walk.
    fn for_each_visible(&self, id: OverlayId, mut visit: impl FnMut(usize, TypingError) -> bool) {
        // collect the chain root-first; each link caps the indices visible
        // from everything above it
        let mut chain = Vec::new();
        let mut cursor = Some((id, usize::MAX));
        while let Some((node_id, cap)) = cursor {
            let node = &self.nodes[node_id.0];
            chain.push((node_id, cap));
            cursor = node.parent.map(|p| (p, cap.min(node.derive_index)));
        }
        for &(node_id, cap) in chain.iter().rev() {
            for &(index, error) in &self.nodes[node_id.0].errors {
                if index >= cap {
                    break;
                }
                if !visit(index, error) {
                    return;
                }
            }
        }
    }

    /// True when an error sits at `pattern_index`, or a swap at the previous
    /// index covers it. Such an index never takes a second error.
    pub(crate) fn affects(&self, id: OverlayId, pattern_index: usize) -> bool {
        let mut hit = false;
        self.for_each_visible(id, |index, error| {
            if index == pattern_index
                || index + 1 == pattern_index && matches!(error, TypingError::Swap)
            {
                hit = true;
                return false;
            }
            index < pattern_index
        });
        hit
    }

    /// Effective pattern length: the raw length plus one per visible miss.
    pub(crate) fn pattern_len(&self, id: OverlayId, pattern: &CompiledPattern) -> usize {
        let mut misses = 0;
        self.for_each_visible(id, |_, error| {
            if matches!(error, TypingError::Miss(_)) {
                misses += 1;
            }
            true
        });
        pattern.len() + misses
    }

    /// The effective pattern character at effective index `i`: the raw
    /// pattern with all visible errors replayed over it.
    pub(crate) fn char_at(&self, id: OverlayId, pattern: &CompiledPattern, i: usize) -> char {
        let mut shift = 0usize;
        let mut result = None;
        self.for_each_visible(id, |index, error| {
            if index > i {
                return false;
            }
            match error {
                TypingError::Typo(c) => {
                    if index == i {
                        result = Some(c);
                        return false;
                    }
                }
                TypingError::Swap => {
                    if index == i {
                        result = Some(pattern.chars[i + 1 - shift]);
                        return false;
                    }
                    if index + 1 == i {
                        result = Some(pattern.chars[i - 1 - shift]);
                        return false;
                    }
                }
                TypingError::Miss(c) => {
                    if index == i {
                        result = Some(c);
                        return false;
                    }
                    shift += 1;
                }
            }
            true
        });
        result.unwrap_or(pattern.chars[i - shift])
    }

    /// Number of error records visible to `id` with indices in
    /// `[from, until)`. A swap counts once, at its own index.
    pub(crate) fn count_in(&self, id: OverlayId, from: usize, until: usize) -> usize {
        let mut count = 0;
        self.for_each_visible(id, |index, _| {
            if index >= from && index < until {
                count += 1;
            }
            index < until
        });
        count
    }
}

// ---------------------------------------------------------------------------
// Keyboard adjacency
// ---------------------------------------------------------------------------

/// QWERTY rows used for the adjacent-key substitution hypothesis.
const KEY_ROWS: [&str; 4] = ["1234567890-=", "qwertyuiop[]", "asdfghjkl;'", "zxcvbnm,./"];

/// The immediate left and right row neighbors of `c` on a QWERTY keyboard,
/// with the case of `c` restored. Characters off the rows have none.
pub(crate) fn key_neighbors(c: char) -> [Option<char>; 2] {
    let lower = c.to_ascii_lowercase();
    for row in KEY_ROWS {
        if let Some(i) = row.find(lower) {
            let bytes = row.as_bytes();
            let restore = |b: u8| {
                if c.is_ascii_uppercase() {
                    (b as char).to_ascii_uppercase()
                } else {
                    b as char
                }
            };
            return [
                (i > 0).then(|| restore(bytes[i - 1])),
                (i + 1 < bytes.len()).then(|| restore(bytes[i + 1])),
            ];
        }
    }
    [None, None]
}
