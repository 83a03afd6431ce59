//! The id selection grammar.
//!
//! Operators pick index entries with a comma-separated mini-language:
//! `1,4,2-7,12` mixes single ids and inclusive ranges. Parsing is a pure
//! function of the input string and the index size — no I/O, no state.
//!
//! The pipeline-level shortcuts "all", "exit", and blank input are the
//! caller's business; this parser only ever sees comma/range strings.

use std::collections::BTreeSet;

/// A validated, deduplicated, ascending set of index ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<u32>,
}

impl SelectionSet {
    /// Selected ids in ascending order. Never empty.
    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.binary_search(&id).is_ok()
    }
}

/// One classified selection token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Single(u32),
    Range(u32, u32),
    Garbage,
}

/// Parse an operator selection string against an index of `index_size`
/// entries.
///
/// Tokens are comma-separated; whitespace inside a token is ignored.
/// Reversed ranges are normalized, out-of-range bounds are clamped, and
/// unrecognizable tokens are skipped rather than failing the parse. Returns
/// `None` when nothing valid remains — the caller should re-prompt.
pub fn parse_selection(input: &str, index_size: usize) -> Option<SelectionSet> {
    let max = index_size as u32;
    let mut ids: BTreeSet<u32> = BTreeSet::new();

    for raw in input.split(',') {
        match classify(raw) {
            Token::Single(n) => {
                if (1..=max).contains(&n) {
                    ids.insert(n);
                }
            }
            Token::Range(a, b) => {
                // Normalize reversed bounds, then clamp to the index.
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                let lo = lo.max(1);
                let hi = hi.min(max);
                for n in lo..=hi {
                    ids.insert(n);
                }
            }
            Token::Garbage => {}
        }
    }

    if ids.is_empty() {
        None
    } else {
        Some(SelectionSet {
            ids: ids.into_iter().collect(),
        })
    }
}

/// Classify one raw token as a single id, an inclusive range, or garbage.
fn classify(raw: &str) -> Token {
    let token: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if token.is_empty() {
        return Token::Garbage;
    }

    if let Some((a, b)) = token.split_once('-') {
        match (parse_digits(a), parse_digits(b)) {
            (Some(a), Some(b)) => Token::Range(a, b),
            _ => Token::Garbage,
        }
    } else {
        match parse_digits(&token) {
            Some(n) => Token::Single(n),
            None => Token::Garbage,
        }
    }
}

/// Parse a group of one or more digits, rejecting anything else.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(input: &str, index_size: usize) -> Vec<u32> {
        parse_selection(input, index_size)
            .map(|s| s.ids().to_vec())
            .unwrap_or_default()
    }

    #[test]
    fn test_single_ids() {
        assert_eq!(ids("3", 10), vec![3]);
        assert_eq!(ids("1,6,8,9", 10), vec![1, 6, 8, 9]);
    }

    #[test]
    fn test_range_expansion() {
        assert_eq!(ids("2-5", 10), vec![2, 3, 4, 5]);
        assert_eq!(ids("2-7,10-12", 12), vec![2, 3, 4, 5, 6, 7, 10, 11, 12]);
    }

    #[test]
    fn test_reversed_range_normalizes() {
        assert_eq!(ids("3-1", 10), ids("1-3", 10));
        assert_eq!(ids("3-1", 10), vec![1, 2, 3]);
    }

    #[test]
    fn test_upper_bound_clamps() {
        assert_eq!(ids("5-100", 10), vec![5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_zero_lower_bound_filtered() {
        assert_eq!(ids("0-2", 10), vec![1, 2]);
        assert!(parse_selection("0", 10).is_none());
    }

    #[test]
    fn test_range_entirely_above_index_is_empty() {
        assert!(parse_selection("50-60", 10).is_none());
        assert!(parse_selection("50", 10).is_none());
    }

    #[test]
    fn test_overlapping_tokens_dedup() {
        assert_eq!(ids("1,1,2,2-3", 10), vec![1, 2, 3]);
    }

    #[test]
    fn test_garbage_tokens_ignored() {
        assert_eq!(ids("abc,  ,9", 10), vec![9]);
        assert_eq!(ids("1-2-3,4", 10), vec![4]);
        assert_eq!(ids("-5,5", 10), vec![5]);
    }

    #[test]
    fn test_whitespace_around_tokens() {
        assert_eq!(ids(" 1 , 3 - 4 ", 10), vec![1, 3, 4]);
    }

    #[test]
    fn test_empty_results() {
        assert!(parse_selection("", 10).is_none());
        assert!(parse_selection("   ", 10).is_none());
        assert!(parse_selection("x,y,z", 10).is_none());
    }

    #[test]
    fn test_zero_index_size() {
        assert!(parse_selection("1-3", 0).is_none());
    }

    #[test]
    fn test_contains() {
        let set = parse_selection("2-4", 10).unwrap();
        assert!(set.contains(3));
        assert!(!set.contains(5));
    }
}
