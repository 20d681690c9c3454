/// Marks which haystack positions start a "word".
///
/// A position starts a word when it is the first alphanumeric byte after a
/// non-alphanumeric run (or the start of the string), or when it is an
/// uppercase letter following a byte that is not uppercase (camelCase).
///
/// Runs of capitals such as `README` only flag their first letter.
pub fn word_boundaries(haystack: &[u8]) -> Vec<bool> {
    let mut boundaries = Vec::with_capacity(haystack.len());
    let mut at_boundary = true;
    let mut prev: Option<u8> = None;
    for &ch in haystack {
        let camel = ch.is_ascii_uppercase() && !prev.is_some_and(|p| p.is_ascii_uppercase());
        boundaries.push((at_boundary && ch.is_ascii_alphanumeric()) || camel);
        at_boundary = !ch.is_ascii_alphanumeric();
        prev = Some(ch);
    }
    boundaries
}
