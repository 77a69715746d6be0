//! Property name conversion.

/// Camel-case a property name the way JSON.NET's camel-case resolver does.
///
/// Names that don't start with an uppercase letter are returned unchanged.
/// Otherwise the leading run of uppercase letters is lowercased; in a run
/// longer than one letter the last capital is kept when a lowercase letter
/// follows it, so it starts the next word (`URLValue` becomes `urlValue`).
/// A capital directly before a space separator is lowercased too; other
/// whitespace such as tabs counts as an ordinary non-capital.
pub fn to_camel_case(name: &str) -> String {
    let mut chars: Vec<char> = name.chars().collect();
    if !chars.first().is_some_and(|c| c.is_uppercase()) {
        return name.to_string();
    }

    for i in 0..chars.len() {
        if i == 1 && !chars[i].is_uppercase() {
            break;
        }

        if let Some(&next) = chars.get(i + 1) {
            if i > 0 && !next.is_uppercase() {
                // "FOO bar" -> "foo bar", not "foO bar"
                if is_separator(next) {
                    chars[i] = lower(chars[i]);
                }
                break;
            }
        }

        chars[i] = lower(chars[i]);
    }

    chars.into_iter().collect()
}

/// Unicode separator characters (categories Zs, Zl and Zp).
fn is_separator(c: char) -> bool {
    matches!(
        c,
        ' ' | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

fn lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}
