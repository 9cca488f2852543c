/// Characters that separate arguments. There is no quoting or escaping, so an
/// argument can never contain one of these.
pub const DELIMITERS: [char; 8] = [' ', '\t', '|', '>', '<', '&', ';', '\n'];

pub fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(&c)
}

/// Splits a raw line into its arguments, left to right.
///
/// A line made only of delimiters (or an empty line) yields no arguments.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split(is_delimiter)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

/// Locates the first argument of `line` as a byte range.
pub fn first_token_span(line: &str) -> Option<(usize, usize)> {
    let start = line.find(|c: char| !is_delimiter(c))?;
    let end = line[start..]
        .find(is_delimiter)
        .map_or(line.len(), |offset| start + offset);
    Some((start, end))
}
