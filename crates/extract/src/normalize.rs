/// Collapse every whitespace run into a single space and trim both ends.
pub fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Drop null and other control characters. Whitespace controls (tab, newline,
/// carriage return) are kept so they still separate words when collapsed.
fn strip_control(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .collect()
}

/// Turn raw per-page text into a single flat string.
///
/// Each page is collapsed on its own, pages are joined with `\n`, then the
/// whole string is stripped of control characters and collapsed again, so the
/// page breaks end up as plain spaces. Empty input yields an empty string.
pub fn normalize_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let joined = pages
        .iter()
        .map(|p| collapse_whitespace(p.as_ref()))
        .collect::<Vec<_>>()
        .join("\n");
    collapse_whitespace(&strip_control(&joined))
}
