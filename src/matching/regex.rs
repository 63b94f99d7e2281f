use regex::Regex;

use crate::matching::{byte_to_char_index, Match, MatchPattern, Matcher, RegexPattern};

/// A matcher driven by a single regex with a fixed alphabet size.
///
/// Per-character patterns pay `cardinality` per matched character;
/// per-match patterns pay it once.
pub(crate) struct RegexMatcher {
    name: &'static str,
    regex: Regex,
    cardinality: u64,
    per_char: bool,
}

impl RegexMatcher {
    /// Runs of three or more digits.
    pub(crate) fn digits() -> RegexMatcher {
        RegexMatcher {
            name: "digits",
            regex: Regex::new(r"\d{3,}").unwrap(),
            cardinality: 10,
            per_char: true,
        }
    }

    /// Four-digit year forms, 1900 through 2019.
    pub(crate) fn year() -> RegexMatcher {
        RegexMatcher {
            name: "year",
            regex: Regex::new(r"19\d\d|200\d|201\d").unwrap(),
            cardinality: 119,
            per_char: false,
        }
    }
}

impl Matcher for RegexMatcher {
    fn match_password(&self, password: &str) -> Vec<Match> {
        self.regex
            .find_iter(password)
            .map(|found| {
                let token = found.as_str().to_string();
                let length = token.chars().count();
                let entropy = if self.per_char {
                    (self.cardinality as f64).powi(length as i32).log2()
                } else {
                    (self.cardinality as f64).log2()
                };
                let i = byte_to_char_index(password, found.start());
                Match {
                    pattern: MatchPattern::Regex(RegexPattern {
                        name: self.name.to_string(),
                    }),
                    i,
                    j: i + length - 1,
                    token,
                    entropy,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_runs() {
        let matches = RegexMatcher::digits().match_password("ab1234cd56");
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!((m.i, m.j), (2, 5));
        assert_eq!(m.token, "1234");
        assert!((m.entropy - 10_000f64.log2()).abs() < 1e-10);
    }

    #[test]
    fn test_year_pays_per_match() {
        let matches = RegexMatcher::year().match_password("1972");
        assert_eq!(matches.len(), 1);
        assert!((matches[0].entropy - 119f64.log2()).abs() < 1e-10);
    }

    #[test]
    fn test_year_range_is_frozen() {
        assert_eq!(RegexMatcher::year().match_password("2019").len(), 1);
        assert!(RegexMatcher::year().match_password("2020").is_empty());
        assert!(RegexMatcher::year().match_password("1899").is_empty());
    }
}
