//! String kernels behind the Ordinal command set.
//!
//! Strings are handled as sequences of Unicode scalar values; no kernel
//! ever splits a character.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

/// Join the characters of `a` with `separator`.
pub fn riffle(a: &str, separator: &str) -> String {
    let pieces: Vec<String> = a.chars().map(String::from).collect();
    pieces.join(separator)
}

/// Remove the first occurrence of `b` from `a`.
pub fn remove_first(a: &str, b: &str) -> String {
    if b.is_empty() {
        return a.to_string();
    }
    a.replacen(b, "", 1)
}

/// Non-overlapping occurrences of `b` in `a`. An empty needle counts 0.
pub fn count(a: &str, b: &str) -> usize {
    if b.is_empty() {
        return 0;
    }
    a.matches(b).count()
}

/// Split `a` on `b`, keeping empty pieces. An empty separator splits
/// into characters.
pub fn split(a: &str, b: &str) -> Vec<String> {
    if b.is_empty() {
        return a.chars().map(String::from).collect();
    }
    a.split(b).map(str::to_string).collect()
}

/// Like [`split`], with each separator kept between its neighbours.
pub fn split_inclusive(a: &str, b: &str) -> Vec<String> {
    if b.is_empty() {
        return split(a, b);
    }
    let mut pieces = Vec::new();
    for (i, piece) in a.split(b).enumerate() {
        if i > 0 {
            pieces.push(b.to_string());
        }
        pieces.push(piece.to_string());
    }
    pieces
}

/// Replace every occurrence of `b` in `a` with `c`.
pub fn replace(a: &str, b: &str, c: &str) -> String {
    if b.is_empty() {
        return a.to_string();
    }
    a.replace(b, c)
}

/// Map each character of `a` found in `source` to the character of
/// `target` at the same index. A short target is cycled; an empty target
/// deletes the matched characters.
pub fn transliterate(a: &str, source: &str, target: &str) -> String {
    let source = chars(source);
    let target = chars(target);
    a.chars()
        .filter_map(|c| match source.iter().position(|&s| s == c) {
            None => Some(c),
            Some(_) if target.is_empty() => None,
            Some(i) => Some(target[i % target.len()]),
        })
        .collect()
}

fn bag(s: &str) -> HashMap<char, usize> {
    let mut counts = HashMap::new();
    for c in s.chars() {
        *counts.entry(c).or_insert(0) += 1;
    }
    counts
}

/// Take `c` out of `bag`, reporting whether it was there.
fn take(bag: &mut HashMap<char, usize>, c: char) -> bool {
    match bag.get_mut(&c) {
        Some(n) if *n > 0 => {
            *n -= 1;
            true
        }
        _ => false,
    }
}

/// Multiset `a − b`, in the order of `a`.
pub fn complement(a: &str, b: &str) -> String {
    let mut remaining = bag(b);
    a.chars().filter(|&c| !take(&mut remaining, c)).collect()
}

/// Multiset intersection, in the order of `a`.
pub fn intersection(a: &str, b: &str) -> String {
    let mut remaining = bag(b);
    a.chars().filter(|&c| take(&mut remaining, c)).collect()
}

/// Multiset union: `a` followed by what `b` has in excess of it.
pub fn union(a: &str, b: &str) -> String {
    let mut out = a.to_string();
    out.push_str(&complement(b, a));
    out
}

/// Multiset symmetric difference.
pub fn symmetric_difference(a: &str, b: &str) -> String {
    let mut out = complement(a, b);
    out.push_str(&complement(b, a));
    out
}

/// Keep the first occurrence of every character.
pub fn dedup(a: &str) -> String {
    let mut seen = HashSet::new();
    a.chars().filter(|&c| seen.insert(c)).collect()
}

pub fn sort(a: &str) -> String {
    let mut cs = chars(a);
    cs.sort_unstable();
    cs.into_iter().collect()
}

pub fn shuffle<R: Rng + ?Sized>(a: &str, rng: &mut R) -> String {
    let mut cs = chars(a);
    cs.shuffle(rng);
    cs.into_iter().collect()
}

/// One random character, empty for an empty string.
pub fn random_char<R: Rng + ?Sized>(a: &str, rng: &mut R) -> String {
    chars(a).choose(rng).map(|c| c.to_string()).unwrap_or_default()
}

pub fn swap_case(a: &str) -> String {
    let mut out = String::with_capacity(a.len());
    for c in a.chars() {
        if c.is_lowercase() {
            out.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Maximal runs of equal characters.
pub fn runs(a: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut last = None;
    for c in a.chars() {
        match out.last_mut() {
            Some(run) if last == Some(c) => run.push(c),
            _ => out.push(c.to_string()),
        }
        last = Some(c);
    }
    out
}

/// Split off the first character: `(rest, head)`.
pub fn head(a: &str) -> (String, String) {
    let mut it = a.chars();
    let first = it.next().map(String::from).unwrap_or_default();
    (it.collect(), first)
}

/// Split off the last character: `(rest, tail)`.
pub fn tail(a: &str) -> (String, String) {
    let mut it = a.chars();
    let last = it.next_back().map(String::from).unwrap_or_default();
    (it.collect(), last)
}

pub fn reverse(a: &str) -> String {
    a.chars().rev().collect()
}

/// Every permutation of `a`, lexicographic in the character indices.
/// Repeated characters yield repeated permutations.
pub fn permutations(a: &str) -> Vec<String> {
    let cs = chars(a);
    let mut idx: Vec<usize> = (0..cs.len()).collect();
    let mut out = Vec::new();
    loop {
        out.push(idx.iter().map(|&i| cs[i]).collect());

        // Advance `idx` to the next permutation in lexicographic order.
        let Some(pivot) = (1..idx.len()).rev().find(|&i| idx[i - 1] < idx[i]) else {
            break;
        };
        let pivot = pivot - 1;
        let Some(swap) = (pivot + 1..idx.len()).rev().find(|&j| idx[j] > idx[pivot]) else {
            break;
        };
        idx.swap(pivot, swap);
        idx[pivot + 1..].reverse();
    }
    out
}

/// Every non-empty subsequence, shortest first, then in index order.
pub fn subsequences(a: &str) -> Vec<String> {
    let cs = chars(a);
    let n = cs.len();
    let mut out = Vec::new();
    for len in 1..=n {
        let mut idx: Vec<usize> = (0..len).collect();
        loop {
            out.push(idx.iter().map(|&i| cs[i]).collect());

            // Next combination of `len` indices out of `n`.
            let Some(i) = (0..len).rev().find(|&i| idx[i] < n - len + i) else {
                break;
            };
            idx[i] += 1;
            for j in i + 1..len {
                idx[j] = idx[j - 1] + 1;
            }
        }
    }
    out
}

/// Every non-empty substring, by start position then length.
pub fn substrings(a: &str) -> Vec<String> {
    let cs = chars(a);
    let mut out = Vec::new();
    for start in 0..cs.len() {
        for end in start + 1..=cs.len() {
            out.push(cs[start..end].iter().collect());
        }
    }
    out
}

/// Stable-sort `items` by the code point of `key` at the same index.
/// Items past the end of the key rank after every keyed item.
pub fn permute_by_key<T>(items: Vec<T>, key: &[char]) -> Vec<T> {
    let mut ranked: Vec<(Option<char>, T)> = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| (key.get(i).copied(), item))
        .collect();
    ranked.sort_by_key(|(rank, _)| (rank.is_none(), *rank));
    ranked.into_iter().map(|(_, item)| item).collect()
}

/// Permute the characters of `a` by `key`.
pub fn permute(a: &str, key: &str) -> String {
    permute_by_key(chars(a), &chars(key)).into_iter().collect()
}

/// Expand each pair of adjacent characters into the inclusive range
/// between them, ascending or descending as needed.
pub fn expand_ranges(a: &str) -> String {
    let cs = chars(a);
    let Some(&first) = cs.first() else {
        return String::new();
    };
    let mut out = String::new();
    out.push(first);
    for pair in cs.windows(2) {
        let (from, to) = (pair[0] as u32, pair[1] as u32);
        let steps: Box<dyn Iterator<Item = u32>> = if from <= to {
            Box::new(from + 1..=to)
        } else {
            Box::new((to..from).rev())
        };
        out.extend(steps.filter_map(char::from_u32));
    }
    out
}

/// Interleave the characters of `a` and `b`; the leftover tail of the
/// longer string is appended.
pub fn zip(a: &str, b: &str) -> String {
    let mut out = String::with_capacity(a.len() + b.len());
    let (mut xs, mut ys) = (a.chars(), b.chars());
    loop {
        match (xs.next(), ys.next()) {
            (None, None) => break,
            (x, y) => out.extend(x.into_iter().chain(y)),
        }
    }
    out
}

/// Characters at even and at odd positions.
pub fn unzip(a: &str) -> (String, String) {
    let mut even = String::new();
    let mut odd = String::new();
    for (i, c) in a.chars().enumerate() {
        if i % 2 == 0 {
            even.push(c);
        } else {
            odd.push(c);
        }
    }
    (even, odd)
}

/// Longest common substring, leftmost in `a` on ties.
pub fn longest_common_substring(a: &str, b: &str) -> String {
    let (xs, ys) = (chars(a), chars(b));
    let mut prev = vec![0usize; ys.len() + 1];
    let (mut best_len, mut best_end) = (0, 0);
    for i in 1..=xs.len() {
        let mut row = vec![0usize; ys.len() + 1];
        for j in 1..=ys.len() {
            if xs[i - 1] == ys[j - 1] {
                row[j] = prev[j - 1] + 1;
                // Strictly longer only: earlier rows end further left.
                if row[j] > best_len {
                    best_len = row[j];
                    best_end = i;
                }
            }
        }
        prev = row;
    }
    xs[best_end - best_len..best_end].iter().collect()
}

/// Length of the longest suffix of `a` that is a prefix of `b`.
fn overlap(a: &[char], b: &[char]) -> usize {
    (0..=a.len().min(b.len()))
        .rev()
        .find(|&k| a[a.len() - k..] == b[..k])
        .unwrap_or(0)
}

/// Shortest string containing both `a` and `b`.
pub fn shortest_common_superstring(a: &str, b: &str) -> String {
    if a.contains(b) {
        return a.to_string();
    }
    if b.contains(a) {
        return b.to_string();
    }
    let (xs, ys) = (chars(a), chars(b));
    let ab = overlap(&xs, &ys);
    let ba = overlap(&ys, &xs);
    if ab >= ba {
        xs.iter().chain(&ys[ab..]).collect()
    } else {
        ys.iter().chain(&xs[ba..]).collect()
    }
}

/// Transpose the lines of `a`, padding short lines with spaces and
/// trimming trailing padding from the result.
pub fn transpose(a: &str) -> String {
    let lines: Vec<Vec<char>> = a.split('\n').map(chars).collect();
    let width = lines.iter().map(Vec::len).max().unwrap_or(0);
    let columns: Vec<String> = (0..width)
        .map(|x| {
            let column: String = lines
                .iter()
                .map(|line| line.get(x).copied().unwrap_or(' '))
                .collect();
            column.trim_end_matches(' ').to_string()
        })
        .collect();
    columns.join("\n")
}
