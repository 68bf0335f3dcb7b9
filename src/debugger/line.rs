/// Normalize whitespace in a command line
pub fn normalize_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a command line into words. Quotes group words; a line with
/// unbalanced quotes falls back to a plain whitespace split.
pub fn split_command_line(line: &str) -> Vec<String> {
    shlex::split(line).unwrap_or_else(|| {
        normalize_whitespace(line)
            .split(' ')
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect()
    })
}
