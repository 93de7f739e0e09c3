//! Fuzzy ranking of note titles for search mode.

/// Ranks candidate strings against a query.
pub trait FuzzyMatcher {
    /// Scores `candidate` against a non-empty `query`. `None` means no match.
    fn score(&self, query: &str, candidate: &str) -> Option<i64>;

    /// Indices of matching candidates, best first.
    ///
    /// An empty query returns every index in source order. Equal scores keep
    /// source order.
    fn rank(&self, query: &str, candidates: &[&str]) -> Vec<usize> {
        if query.is_empty() {
            return (0..candidates.len()).collect();
        }

        let mut scored: Vec<(usize, i64)> = candidates
            .iter()
            .enumerate()
            .filter_map(|(i, c)| self.score(query, c).map(|s| (i, s)))
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().map(|(i, _)| i).collect()
    }
}

const MATCH: i64 = 16;
const CONSECUTIVE: i64 = 16;
const BOUNDARY: i64 = 12;
const PREFIX: i64 = 40;
const EXACT: i64 = 100;
const MAX_GAP_PENALTY: i64 = 8;

/// Case-insensitive subsequence matcher.
///
/// Every query character must appear in the candidate in order. Hits that
/// follow the previous hit directly or start a word score extra; skipped
/// characters cost a little each. Of all the ways the query can be laid over
/// the candidate, the best-scoring one counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubsequenceMatcher;

impl FuzzyMatcher for SubsequenceMatcher {
    fn score(&self, query: &str, candidate: &str) -> Option<i64> {
        let query: Vec<char> = query.to_lowercase().chars().collect();
        let text: Vec<char> = candidate.to_lowercase().chars().collect();
        let Some((first, rest)) = query.split_first() else {
            return Some(0);
        };

        // best[i]: top score for the query so far with its last char at text[i]
        let mut best: Vec<Option<i64>> = text
            .iter()
            .enumerate()
            .map(|(i, ch)| (ch == first).then(|| hit(&text, i) - gap_penalty(i)))
            .collect();

        for qc in rest {
            best = text
                .iter()
                .enumerate()
                .map(|(i, ch)| {
                    if ch != qc {
                        return None;
                    }
                    best[..i]
                        .iter()
                        .enumerate()
                        .filter_map(|(j, prev)| prev.map(|p| p + step(j, i)))
                        .max()
                        .map(|p| p + hit(&text, i))
                })
                .collect();
        }

        let mut score = best.into_iter().flatten().max()?;
        if text == query {
            score += EXACT;
        } else if text.starts_with(&query) {
            score += PREFIX;
        }
        Some(score)
    }
}

/// Score for a query character landing on `text[i]`, before any run or gap.
fn hit(text: &[char], i: usize) -> i64 {
    if i == 0 || is_boundary(text[i - 1]) {
        MATCH + BOUNDARY
    } else {
        MATCH
    }
}

/// Bonus or penalty for moving from a hit at `from` to the next at `to`.
fn step(from: usize, to: usize) -> i64 {
    match to - from - 1 {
        0 => CONSECUTIVE,
        gap => -gap_penalty(gap),
    }
}

fn gap_penalty(gap: usize) -> i64 {
    (gap as i64).min(MAX_GAP_PENALTY)
}

fn is_boundary(c: char) -> bool {
    !c.is_alphanumeric()
}
