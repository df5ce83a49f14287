//! Similarity measures used by the recommender
//!
//! Title similarity is the longest-common-block ratio: repeatedly take the
//! longest contiguous run shared by both strings, then do the same on what is
//! left to its left and to its right. With `M` matched characters in total and
//! `T` characters across both strings the score is `2M / T`.
//!
//! Author similarity is the Jaccard index of the two author-name sets.

use std::collections::BTreeSet;

/// Lowercased character sequence used for title comparison.
pub fn title_key(title: &str) -> Vec<char> {
    title.trim().to_lowercase().chars().collect()
}

/// Split an author field on `/` and `,` into a set of lowercase names.
pub fn author_set(authors: &str) -> BTreeSet<String> {
    authors
        .split(['/', ','])
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Case-insensitive block-matching ratio of two titles, in [0.0, 1.0].
pub fn title_similarity(a: &str, b: &str) -> f64 {
    block_ratio(&title_key(a), &title_key(b))
}

/// Jaccard index of the author sets parsed from two author fields.
pub fn author_similarity(a: &str, b: &str) -> f64 {
    jaccard(&author_set(a), &author_set(b))
}

/// Block-matching ratio over already-normalized keys.
///
/// Two empty keys are identical and score 1.0.
pub fn block_ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    // Tie-breaking depends on argument order; fix the order so a/b and b/a agree.
    let matched = if a <= b {
        matching_chars(a, b)
    } else {
        matching_chars(b, a)
    };

    2.0 * matched as f64 / total as f64
}

/// `|a ∩ b| / |a ∪ b|`, or 0.0 when both sets are empty.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64
}

/// Total length of all matching blocks between `a` and `b`.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(a, b)];

    while let Some((a, b)) = pending.pop() {
        if a.is_empty() || b.is_empty() {
            continue;
        }

        let (i, j, len) = longest_common_block(a, b);
        if len == 0 {
            continue;
        }

        matched += len;
        pending.push((&a[..i], &b[..j]));
        pending.push((&a[i + len..], &b[j + len..]));
    }

    matched
}

/// Longest contiguous run present in both slices, as `(start_a, start_b, len)`.
///
/// Among runs of equal length the one starting earliest in `a` wins, then the
/// one starting earliest in `b`.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    // run[j + 1] = length of the common run ending at a[i], b[j]
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        for (j, cb) in b.iter().enumerate() {
            let run = if ca == cb { prev[j] + 1 } else { 0 };
            curr[j + 1] = run;
            if run > best.2 {
                best = (i + 1 - run, j + 1 - run, run);
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}
