/// Trim every line, drop blank ones and collapse whitespace runs into `,`.
pub fn clean_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(","))
        .filter(|line| !line.is_empty())
        .collect()
}

/// Split a cleaned line into colon-delimited tokens.
///
/// Commas go back to spaces first, so `Serial,Number:,ABC` becomes
/// `["Serial Number", "ABC"]`. A bare label yields a single token and an
/// empty line yields none.
pub fn tokenize(line: &str) -> Vec<String> {
    let spaced = line.replace(',', " ");
    if spaced.trim().is_empty() {
        return Vec::new();
    }
    spaced.split(':').map(|item| item.trim().to_string()).collect()
}

/// Token at `index`, or `""` when the line was too short.
pub fn field(tokens: &[String], index: usize) -> &str {
    tokens.get(index).map(String::as_str).unwrap_or("")
}
