//! Secondary key normalization.

use tallydb_common::CaseFoldMode;

/// Pure mapping from a raw secondary key to its indexed form.
///
/// Prefix scans rely on the mapping being applied identically to stored keys
/// and to search prefixes.
pub trait KeyNormalizer {
    fn normalize(&self, raw: &str) -> String;
}

impl KeyNormalizer for CaseFoldMode {
    fn normalize(&self, raw: &str) -> String {
        match self {
            CaseFoldMode::Unicode => raw.to_lowercase(),
            CaseFoldMode::Ascii => raw.to_ascii_lowercase(),
            CaseFoldMode::Exact => raw.to_string(),
        }
    }
}

/// Adapts a plain function or closure into a [`KeyNormalizer`].
#[derive(Debug, Clone, Copy)]
pub struct NormalizeFn<F>(pub F);

impl<F> KeyNormalizer for NormalizeFn<F>
where
    F: Fn(&str) -> String,
{
    fn normalize(&self, raw: &str) -> String {
        (self.0)(raw)
    }
}

/// Bounds of the keys that start with the normalized `prefix`.
///
/// Returns the normalized prefix and its successor: the smallest string that
/// sorts after every string carrying the prefix. The successor is `None` when
/// no such string exists (empty prefix, or one made only of `char::MAX`), in
/// which case the range is unbounded above. The successor itself never
/// carries the prefix, so a closed scan up to it must drop that one key.
pub fn prefix_bounds<N: KeyNormalizer + ?Sized>(
    normalizer: &N,
    prefix: &str,
) -> (String, Option<String>) {
    let lower = normalizer.normalize(prefix);
    let upper = prefix_successor(&lower);
    (lower, upper)
}

/// Increments the last character that can be incremented and drops the
/// characters after it.
fn prefix_successor(prefix: &str) -> Option<String> {
    let mut chars: Vec<char> = prefix.chars().collect();
    while let Some(last) = chars.pop() {
        if let Some(next) = next_char(last) {
            chars.push(next);
            return Some(chars.into_iter().collect());
        }
    }
    None
}

/// Next Unicode scalar value, skipping the surrogate gap.
fn next_char(c: char) -> Option<char> {
    match c {
        '\u{D7FF}' => Some('\u{E000}'),
        char::MAX => None,
        c => char::from_u32(c as u32 + 1),
    }
}
