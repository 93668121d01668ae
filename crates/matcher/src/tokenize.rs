//! Model-string tokenization.

use once_cell::sync::Lazy;
use regex::Regex;

/// Parenthesised groups such as a production-year range: "(2010-2020)".
static RE_PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^)]*\)").expect("valid parenthetical regex"));

static RE_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\-_]+").expect("valid separator regex"));

/// Remove parenthesised groups and stray parentheses, then collapse whitespace.
///
/// ```
/// assert_eq!(matcher::clean_model(" Golf  (2010-2020) 8 "), "Golf 8");
/// ```
pub fn clean_model(model: &str) -> String {
    let without_groups = RE_PARENTHETICAL.replace_all(model, " ");
    let without_parens: String = without_groups
        .chars()
        .map(|c| if c == '(' || c == ')' { ' ' } else { c })
        .collect();
    without_parens.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a model designation into lowercase tokens on whitespace, `-` and `_`.
///
/// ```
/// assert_eq!(matcher::tokenize_model("X3 E83"), vec!["x3", "e83"]);
/// assert_eq!(matcher::tokenize_model("Golf (2010-2020)"), vec!["golf"]);
/// ```
pub fn tokenize_model(model: &str) -> Vec<String> {
    let cleaned = clean_model(model).to_lowercase();
    RE_SEPARATORS
        .split(&cleaned)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace_hyphen_and_underscore() {
        assert_eq!(tokenize_model("Seria 3 E90"), vec!["seria", "3", "e90"]);
        assert_eq!(tokenize_model("CX-5"), vec!["cx", "5"]);
        assert_eq!(tokenize_model("model_s  plaid"), vec!["model", "s", "plaid"]);
    }

    #[test]
    fn keeps_digits_and_roman_numerals() {
        assert_eq!(tokenize_model("Golf 8"), vec!["golf", "8"]);
        assert_eq!(tokenize_model("Golf VII"), vec!["golf", "vii"]);
    }

    #[test]
    fn drops_parenthesised_content() {
        assert_eq!(tokenize_model("Passat B8 (2015-2019)"), vec!["passat", "b8"]);
        assert!(tokenize_model("(2010-2020)").is_empty());
    }

    #[test]
    fn stray_parentheses_become_separators() {
        assert_eq!(tokenize_model("Clio(IV"), vec!["clio", "iv"]);
        assert_eq!(clean_model("A4 )B8"), "A4 B8");
    }

    #[test]
    fn blank_model_has_no_tokens() {
        assert!(tokenize_model("   ").is_empty());
    }
}
