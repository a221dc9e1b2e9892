//! "Did you mean?" suggestions.
//!
//! Case-insensitive Levenshtein distance with a threshold that grows with the
//! length of the misspelled name:
//!
//! | input length | max distance |
//! |--------------|--------------|
//! | 1–3          | 1            |
//! | 4–6          | 2            |
//! | 7+           | 3            |
//!
//! Exact matches (distance 0) are never suggested.  Ties go to the candidate
//! that appears first in the caller's list.

use crate::data;
use crate::diagnostic::Diagnostic;

/// Reserved words, used to catch keyword typos.
pub static KEYWORDS: [&str; 21] = [
    "if", "else", "for", "in", "fn", "let", "const", "return", "true", "false", "null", "and",
    "or", "not", "import", "export", "break", "continue", "switch", "case", "default",
];

/// A candidate with its distance from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyMatch<'a> {
    pub value: &'a str,
    pub distance: usize,
}

/// Levenshtein edit distance over Unicode scalar values.  Insertions,
/// deletions and substitutions each cost 1.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut matrix: Vec<Vec<usize>> = vec![vec![0; b.len() + 1]; a.len() + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost: usize = usize::from(a[i - 1] != b[j - 1]);

            matrix[i][j] = (matrix[i - 1][j] + 1) // deletion
                .min(matrix[i][j - 1] + 1) // insertion
                .min(matrix[i - 1][j - 1] + cost); // substitution
        }
    }

    matrix[a.len()][b.len()]
}

/// Maximum distance accepted for an input of `len` characters.
pub const fn threshold(len: usize) -> usize {
    match len {
        0..=3 => 1,
        4..=6 => 2,
        _ => 3,
    }
}

/// Every non-exact candidate within threshold, in candidate order.
fn ranked<'a, S: AsRef<str>>(input: &str, candidates: &'a [S]) -> Vec<FuzzyMatch<'a>> {
    if input.is_empty() {
        return Vec::new();
    }

    let input_lower: String = input.to_lowercase();
    let limit: usize = threshold(input.chars().count());

    candidates
        .iter()
        .map(|candidate| {
            let value: &str = candidate.as_ref();
            let distance: usize = levenshtein(&input_lower, &value.to_lowercase());
            FuzzyMatch { value, distance }
        })
        .filter(|m| m.distance > 0 && m.distance <= limit)
        .collect()
}

/// The closest candidate in its original casing, or `None`.
///
/// ```
/// use parsley_errors::closest_match;
///
/// assert_eq!(closest_match("lenght", &["length", "width"]), Some("length"));
/// assert_eq!(closest_match("foo", &["completely", "different"]), None);
/// ```
pub fn closest_match<'a, S: AsRef<str>>(input: &str, candidates: &'a [S]) -> Option<&'a str> {
    ranked(input, candidates)
        .into_iter()
        .reduce(|best, m| if m.distance < best.distance { m } else { best })
        .map(|m| m.value)
}

/// Up to `n` candidates within threshold, nearest first; equal distances keep
/// candidate order.
pub fn top_matches<'a, S: AsRef<str>>(input: &str, candidates: &'a [S], n: usize) -> Vec<&'a str> {
    let mut matches: Vec<FuzzyMatch<'a>> = ranked(input, candidates);
    matches.sort_by_key(|m| m.distance);

    matches.into_iter().take(n).map(|m| m.value).collect()
}

/// Closest reserved word to a typo such as `retrun`.
pub fn suggest_keyword(word: &str) -> Option<&'static str> {
    closest_match(word, &KEYWORDS)
}

fn did_you_mean(diagnostic: Diagnostic, suggestion: Option<&str>) -> Diagnostic {
    match suggestion {
        Some(s) => diagnostic.with_hint(format!("Did you mean `{}`?", s)),
        None => diagnostic,
    }
}

/// `UNDEF-0001` plus a "Did you mean" hint when a close identifier exists.
pub fn undefined_identifier<S: AsRef<str>>(name: &str, available: &[S]) -> Diagnostic {
    let diagnostic: Diagnostic = Diagnostic::render("UNDEF-0001", data! { "Name": name });
    did_you_mean(diagnostic, closest_match(name, available))
}

/// `UNDEF-0002` plus a "Did you mean" hint when a close method exists.
pub fn undefined_method<S: AsRef<str>>(
    method: &str,
    type_name: &str,
    available: &[S],
) -> Diagnostic {
    let diagnostic: Diagnostic = Diagnostic::render(
        "UNDEF-0002",
        data! { "Method": method, "Type": type_name },
    );
    did_you_mean(diagnostic, closest_match(method, available))
}
