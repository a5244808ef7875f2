//! Fuzzy scoring of entry paths against a search query.
//!
//! The score is a number in `[0.0, MAX_SCORE]`:
//!
//! - `MAX_SCORE` only for an exact, case-sensitive match.
//! - `0.0` for an empty query, a query longer than the candidate, or a query
//!   that is not a case-insensitive subsequence of the candidate.
//! - Anything else lands strictly between the two. Every matched query
//!   character earns `0.7` when it directly follows the previous match
//!   (`0.1` when characters were skipped), `0.8` extra when a skip lands on
//!   the start of a path word (after `/`, `.`, `_`, `-` or a space) and `0.1`
//!   extra when its case matches. The total is averaged over the candidate
//!   and query lengths, and a candidate whose first character matches the
//!   query's gets a `0.15` lift while it is below `0.85`.
//!
//! Search thresholds are expressed on this scale.

/// Score of an exact match. No other input reaches it.
pub const MAX_SCORE: f64 = 1.0;

const CONSECUTIVE: f64 = 0.7;
const SKIPPED: f64 = 0.1;
const WORD_START: f64 = 0.8;
const SAME_CASE: f64 = 0.1;
const LEADING_BONUS: f64 = 0.15;
const LEADING_CEILING: f64 = 0.85;

const WORD_SEPARATORS: &[char] = &['/', '.', '_', '-', ' '];

/// Score `candidate` against `query`. Higher is better.
pub fn score(candidate: &str, query: &str) -> f64 {
    if query.is_empty() {
        return 0.0;
    }
    if candidate == query {
        return MAX_SCORE;
    }

    let candidate: Vec<char> = candidate.chars().collect();
    let query: Vec<char> = query.chars().collect();
    if query.len() > candidate.len() {
        return 0.0;
    }

    let mut total = 0.0;
    let mut start = 0;
    for &wanted in &query {
        let Some(found) = candidate[start..]
            .iter()
            .position(|&c| same_letter(c, wanted))
            .map(|offset| start + offset)
        else {
            return 0.0;
        };

        let mut char_score = if found == start {
            CONSECUTIVE
        } else if WORD_SEPARATORS.contains(&candidate[found - 1]) {
            SKIPPED + WORD_START
        } else {
            SKIPPED
        };
        if candidate[found] == wanted {
            char_score += SAME_CASE;
        }

        total += char_score;
        start = found + 1;
    }

    let mut result = 0.5 * (total / candidate.len() as f64 + total / query.len() as f64);
    if same_letter(candidate[0], query[0]) && result < LEADING_CEILING {
        result += LEADING_BONUS;
    }
    result
}

fn same_letter(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
