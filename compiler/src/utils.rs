/// Quotes `text` as a string literal. JSON escaping is valid for the
/// C-family languages the generators target.
pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

#[cfg(test)]
mod tests {
    use super::quote;

    #[test]
    fn quotes_and_escapes() {
        assert_eq!(quote("MONS"), "\"MONS\"");
        assert_eq!(quote("a\"b"), "\"a\\\"b\"");
    }
}
