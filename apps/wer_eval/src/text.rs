/// Splits a transcript into scoring tokens.
///
/// With `normalize`, a token is a run of ASCII alphanumerics and apostrophes,
/// lowercased; everything else separates tokens. Without it, tokens are the
/// raw whitespace-separated words.
pub fn tokenize(text: &str, normalize: bool) -> Vec<String> {
    if !normalize {
        return text.split_whitespace().map(str::to_string).collect();
    }
    text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '\''))
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_tokens() {
        assert_eq!(tokenize("Hello, World!", true), vec!["hello", "world"]);
        assert_eq!(tokenize("IT'S  ok.", true), vec!["it's", "ok"]);
        assert_eq!(tokenize("well-known\tfact", true), vec!["well", "known", "fact"]);
        assert!(tokenize("  --  ", true).is_empty());
        assert!(tokenize("", true).is_empty());
    }

    #[test]
    fn test_raw_tokens() {
        assert_eq!(tokenize("A b, C", false), vec!["A", "b,", "C"]);
        assert_eq!(tokenize("A b, C", true), vec!["a", "b", "c"]);
    }
}
