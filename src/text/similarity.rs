/// Sequence-matcher similarity ratio in `[0, 1]`.
///
/// Computes `2 * M / (len(a) + len(b))` where `M` is the number of characters
/// covered by the matching blocks found by recursively taking the longest
/// common substring (Ratcliff/Obershelp). Two empty strings are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

/// Pick the candidate most similar to `word`, if any reaches `cutoff`.
///
/// The ratio is not symmetric; each candidate is the first sequence and
/// `word` the second.
///
/// Ties on similarity resolve to the lexicographically smallest candidate so
/// the result never depends on iteration order.
pub fn closest_match<'a, I>(word: &str, candidates: I, cutoff: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, f64)> = None;
    for candidate in candidates {
        let score = similarity(candidate, word);
        if score < cutoff {
            continue;
        }
        best = match best {
            Some((current, best_score))
                if best_score > score || (best_score == score && current <= candidate) =>
            {
                Some((current, best_score))
            }
            _ => Some((candidate, score)),
        };
    }
    best.map(|(candidate, _)| candidate)
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, alo, ahi, b, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }
    matched
}

/// Longest common run of `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Returns `(i, j, size)`; among equally long runs the one starting earliest
/// in `a`, then earliest in `b`, wins.
fn longest_match(
    a: &[char],
    alo: usize,
    ahi: usize,
    b: &[char],
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    // run length ending at b[j - 1], indexed by j
    let mut prev = vec![0usize; bhi + 1];
    for i in alo..ahi {
        let mut next = vec![0usize; bhi + 1];
        for j in blo..bhi {
            if a[i] != b[j] {
                continue;
            }
            let k = prev[j] + 1;
            next[j + 1] = k;
            if k > best_size {
                best_i = i + 1 - k;
                best_j = j + 1 - k;
                best_size = k;
            }
        }
        prev = next;
    }
    (best_i, best_j, best_size)
}
