/// Escape character used in the `LIKE ... ESCAPE` clause of searches.
pub const LIKE_ESCAPE: char = '\\';

/// Case folding shared by stored search text and search terms.
///
/// SQLite's `LOWER()` only folds ASCII, so the folded text is computed here
/// and stored next to the question instead of relying on the database.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Builds a case-insensitive `LIKE` pattern that matches `term` anywhere.
///
/// `%` and `_` in the term are matched literally. The caller compares
/// against text folded with [`fold_case`].
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in fold_case(term).chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
