//! Best-effort numeric parsing of free-form cell text.
//!
//! Handles thresholds ("<5", ">100"), digit grouping ("1,000"), and
//! English number words ("two hundred", "twenty-one", "1.5 million").
//!
//! ```ignore
//! assert_eq!(parse_number("1,000"), Some(1000.0));
//! assert_eq!(parse_number("two hundred"), Some(200.0));
//! assert_eq!(parse_number("not a number"), None);
//! ```

/// Characters removed before any parse attempt.
const STRIPPED: [char; 3] = ['<', '>', ','];

/// Parse cell text as a number. Tries number words first, then a literal
/// decimal. Returns `None` when neither succeeds or the value is not finite.
/// Zero is a valid result on both paths.
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| !STRIPPED.contains(c)).collect();
    parse_words(&cleaned)
        .or_else(|| parse_literal(&cleaned))
        .filter(|n| n.is_finite())
}

fn parse_literal(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok()
}

fn unit_value(word: &str) -> Option<f64> {
    let v = match word {
        "zero" => 0, "one" => 1, "two" => 2, "three" => 3, "four" => 4,
        "five" => 5, "six" => 6, "seven" => 7, "eight" => 8, "nine" => 9,
        "ten" => 10, "eleven" => 11, "twelve" => 12, "thirteen" => 13,
        "fourteen" => 14, "fifteen" => 15, "sixteen" => 16,
        "seventeen" => 17, "eighteen" => 18, "nineteen" => 19,
        "twenty" => 20, "thirty" => 30, "forty" => 40, "fifty" => 50,
        "sixty" => 60, "seventy" => 70, "eighty" => 80, "ninety" => 90,
        _ => return None,
    };
    Some(v as f64)
}

fn scale_value(word: &str) -> Option<f64> {
    match word {
        "thousand" => Some(1e3),
        "million" => Some(1e6),
        "billion" => Some(1e9),
        _ => None,
    }
}

/// English number words. Every token must be a number word, "and", or a
/// digit literal; anything else fails the whole parse.
fn parse_words(s: &str) -> Option<f64> {
    let lower = s.to_lowercase();
    let tokens: Vec<&str> = lower
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|t| !t.is_empty())
        .collect();

    // A lone numeral is the literal path's job.
    let has_word = tokens.iter().any(|t| t.parse::<f64>().is_err());
    if tokens.is_empty() || !has_word {
        return None;
    }
    // '-' joins words ("twenty-one") but is never read as a sign.
    if lower.trim_start().starts_with('-') {
        return None;
    }

    let mut total = 0.0;
    let mut current = 0.0;
    // Separate from `current > 0` so "zero hundred" stays zero.
    let mut has_current = false;
    let mut seen_number = false;

    for tok in tokens {
        if tok == "and" {
            continue;
        }
        if let Some(v) = unit_value(tok) {
            current += v;
            has_current = true;
        } else if tok == "hundred" {
            // "hundred" on its own means one hundred
            let base = if has_current { current } else { 1.0 };
            current = base * 100.0;
            has_current = true;
        } else if let Some(scale) = scale_value(tok) {
            let base = if has_current { current } else { 1.0 };
            total += base * scale;
            current = 0.0;
            has_current = false;
        } else if let Ok(v) = tok.parse::<f64>() {
            current += v;
            has_current = true;
        } else {
            return None;
        }
        seen_number = true;
    }

    seen_number.then_some(total + current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_digits() {
        assert_eq!(parse_number("1,000"), Some(1000.0));
        assert_eq!(parse_number("12,345.5"), Some(12345.5));
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(parse_number("<5"), Some(5.0));
        assert_eq!(parse_number("> 100"), Some(100.0));
    }

    #[test]
    fn test_words() {
        assert_eq!(parse_number("two hundred"), Some(200.0));
        assert_eq!(parse_number("Twenty-One"), Some(21.0));
        assert_eq!(parse_number("one thousand two hundred and five"), Some(1205.0));
        assert_eq!(parse_number("1.5 million"), Some(1_500_000.0));
        assert_eq!(parse_number("hundred"), Some(100.0));
    }

    #[test]
    fn test_zero_is_a_value() {
        assert_eq!(parse_number("zero"), Some(0.0));
        assert_eq!(parse_number("0"), Some(0.0));
    }

    #[test]
    fn test_zero_with_scale_words() {
        assert_eq!(parse_number("zero hundred"), Some(0.0));
        assert_eq!(parse_number("zero thousand"), Some(0.0));
        assert_eq!(parse_number("thousand"), Some(1000.0));
        assert_eq!(parse_number("one thousand hundred"), Some(1100.0));
    }

    #[test]
    fn test_signed_words_rejected() {
        assert_eq!(parse_number("-five"), None);
        assert_eq!(parse_number(" -twenty-one"), None);
        assert_eq!(parse_number("twenty-one"), Some(21.0));
    }

    #[test]
    fn test_rejects_text() {
        assert_eq!(parse_number("not a number"), None);
        assert_eq!(parse_number("Emergency Shelter"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("and"), None);
        assert_eq!(parse_number("18.4607, -64.5253"), None);
    }

    #[test]
    fn test_rejects_non_finite() {
        assert_eq!(parse_number("nan"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_literal_whitespace_and_sign() {
        assert_eq!(parse_number(" 42 "), Some(42.0));
        assert_eq!(parse_number("-3.5"), Some(-3.5));
    }
}
