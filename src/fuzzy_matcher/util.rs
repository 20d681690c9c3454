//! Byte-level helpers shared by the matcher.

use crate::fuzzy_matcher::IndexType;

/// Compare two bytes ignoring ASCII case.
#[inline(always)]
pub(crate) fn eq_ignore_case(a: u8, b: u8) -> bool {
    a.eq_ignore_ascii_case(&b)
}

/// Greedy left-to-right subsequence scan.
///
/// Calls `on_match(i, j)` each time `needle[i]` consumes `haystack[j]` and
/// returns whether every needle byte was consumed.
#[inline]
fn greedy_scan(needle: &[u8], haystack: &[u8], mut on_match: impl FnMut(usize, usize)) -> bool {
    let mut cursor = 0;
    for (i, &n) in needle.iter().enumerate() {
        loop {
            let Some(&h) = haystack.get(cursor) else {
                return false;
            };
            cursor += 1;
            if eq_ignore_case(n, h) {
                on_match(i, cursor - 1);
                break;
            }
        }
    }
    true
}

/// Whether `needle` occurs in `haystack` as a case-insensitive subsequence.
pub(crate) fn cheap_matches(needle: &[u8], haystack: &[u8]) -> bool {
    greedy_scan(needle, haystack, |_, _| {})
}

/// Earliest haystack index each needle byte can be matched at.
///
/// Every valid alignment places `needle[i]` at or after the returned
/// `floor[i]`, and `needle[..i]` always fits in `haystack[..floor[i]]`.
/// Returns `None` when the needle is not a subsequence.
pub(crate) fn leftmost_positions(needle: &[u8], haystack: &[u8]) -> Option<Vec<IndexType>> {
    let mut positions = vec![0; needle.len()];
    greedy_scan(needle, haystack, |i, j| positions[i] = j).then_some(positions)
}

#[cfg(test)]
pub(crate) fn wrap_matches(line: &str, indices: &[IndexType]) -> String {
    let mut ret = String::new();
    let mut peekable = indices.iter().peekable();
    for (idx, ch) in line.char_indices() {
        let next_id = **peekable.peek().unwrap_or(&&line.len());
        if next_id == idx {
            ret.push_str(format!("[{}]", ch).as_str());
            peekable.next();
        } else {
            ret.push(ch);
        }
    }
    ret
}

#[cfg(test)]
pub(crate) fn assert_order(matcher: &dyn crate::fuzzy_matcher::FuzzyMatcher, pattern: &str, choices: &[&'static str]) {
    let result = filter_and_sort(matcher, pattern, choices);

    if result != choices {
        // debug print
        println!("pattern: {}", pattern);
        for &choice in choices.iter() {
            if let Some((score, indices)) = matcher.fuzzy_indices(choice, pattern) {
                println!("{}: {:?}", score, wrap_matches(choice, &indices));
            } else {
                println!("NO MATCH for {}", choice);
            }
        }
    }

    assert_eq!(result, choices);
}

#[cfg(test)]
fn filter_and_sort(
    matcher: &dyn crate::fuzzy_matcher::FuzzyMatcher,
    pattern: &str,
    lines: &[&'static str],
) -> Vec<&'static str> {
    let mut lines_with_score: Vec<(i64, &'static str)> = lines
        .iter()
        .filter_map(|&s| matcher.fuzzy_match(s, pattern).map(|score| (score, s)))
        .collect();
    lines_with_score.sort_by_key(|(score, _)| -score);
    lines_with_score.into_iter().map(|(_, string)| string).collect()
}
