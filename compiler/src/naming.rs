/// Converts an `underscore_based_identifier` to camelCase.
///
/// An underscore followed by another character is dropped and the character
/// after it is uppercased; a trailing underscore is kept. The first character
/// is uppercased when `capitalize_first` is set. Nothing else is touched.
pub fn to_camel_case(identifier: &str, capitalize_first: bool) -> String {
    let mut out = String::with_capacity(identifier.len());
    let mut chars = identifier.chars().peekable();
    let mut first = true;
    while let Some(c) = chars.next() {
        if first && capitalize_first {
            out.extend(c.to_uppercase());
        } else if c == '_' && chars.peek().is_some() {
            if let Some(next) = chars.next() {
                out.extend(next.to_uppercase());
            }
        } else {
            out.push(c);
        }
        first = false;
    }
    out
}

/// Shorthand for `to_camel_case(identifier, true)`.
pub fn to_upper_camel(identifier: &str) -> String {
    to_camel_case(identifier, true)
}

/// Lowercases the first character only.
pub fn lower_first(identifier: &str) -> String {
    let mut chars = identifier.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}
