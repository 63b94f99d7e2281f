use fancy_regex::Regex;

use crate::matching::{byte_to_char_index, Match, MatchPattern, Matcher, RepeatPattern};
use crate::numerics;

lazy_static! {
    static ref GREEDY: Regex = Regex::new(r"(.+)\1+").unwrap();
    static ref LAZY: Regex = Regex::new(r"(.+?)\1+").unwrap();
    static ref LAZY_ANCHORED: Regex = Regex::new(r"^(.+?)\1+$").unwrap();
}

/// Finds maximal runs of a repeating unit, `aaaa` and `abcabcabc` alike.
pub(crate) struct RepeatMatcher;

impl Matcher for RepeatMatcher {
    fn match_password(&self, password: &str) -> Vec<Match> {
        let mut matches = Vec::new();
        let mut search_from = 0;
        while search_from < password.len() {
            let greedy_caps = match GREEDY.captures_from_pos(password, search_from) {
                Ok(Some(caps)) => caps,
                _ => break,
            };
            let lazy_caps = match LAZY.captures_from_pos(password, search_from) {
                Ok(Some(caps)) => caps,
                _ => break,
            };
            let greedy_all = greedy_caps.get(0).unwrap();
            let lazy_all = lazy_caps.get(0).unwrap();
            let (start, end, base_token) = if greedy_all.as_str().len() > lazy_all.as_str().len() {
                // greedy beats lazy: the greedy unit may span several
                // repeats of a smaller one, so recover the minimal unit
                // with the anchored lazy pattern
                let base = match LAZY_ANCHORED.captures(greedy_all.as_str()) {
                    Ok(Some(caps)) => caps.get(1).unwrap().as_str().to_string(),
                    _ => greedy_caps.get(1).unwrap().as_str().to_string(),
                };
                (greedy_all.start(), greedy_all.end(), base)
            } else {
                let base = lazy_caps.get(1).unwrap().as_str().to_string();
                (lazy_all.start(), lazy_all.end(), base)
            };

            let token = &password[start..end];
            let token_len = token.chars().count();
            let base_len = base_token.chars().count();
            let repeat_count = token_len / base_len;
            let i = byte_to_char_index(password, start);
            let entropy = ((numerics::bruteforce_cardinality(&base_token)
                * repeat_count as u64) as f64)
                .log2();
            matches.push(Match {
                pattern: MatchPattern::Repeat(RepeatPattern {
                    base_token,
                    repeat_count,
                }),
                i,
                j: i + token_len - 1,
                token: token.to_string(),
                entropy,
            });
            search_from = end;
        }
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repeat(password: &str) -> Vec<Match> {
        RepeatMatcher.match_password(password)
    }

    #[test]
    fn test_single_character_run() {
        let matches = repeat("aaaa");
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!((m.i, m.j), (0, 3));
        match &m.pattern {
            MatchPattern::Repeat(r) => {
                assert_eq!(r.base_token, "a");
                assert_eq!(r.repeat_count, 4);
            }
            other => panic!("unexpected pattern {:?}", other),
        }
        assert!((m.entropy - (26f64 * 4.0).log2()).abs() < 1e-10);
    }

    #[test]
    fn test_multi_character_unit() {
        let matches = repeat("abcabcabc");
        assert_eq!(matches.len(), 1);
        match &matches[0].pattern {
            MatchPattern::Repeat(r) => {
                assert_eq!(r.base_token, "abc");
                assert_eq!(r.repeat_count, 3);
            }
            other => panic!("unexpected pattern {:?}", other),
        }
    }

    #[test]
    fn test_greedy_beats_lazy() {
        // lazy alone would stop after "aa"; the greedy pass covers all
        // six characters and the anchored pass recovers the "aab" unit
        let matches = repeat("aabaab");
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.token, "aabaab");
        match &m.pattern {
            MatchPattern::Repeat(r) => {
                assert_eq!(r.base_token, "aab");
                assert_eq!(r.repeat_count, 2);
            }
            other => panic!("unexpected pattern {:?}", other),
        }
    }

    #[test]
    fn test_embedded_run() {
        let matches = repeat("xyzzzzk");
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!((m.i, m.j), (2, 5));
        assert_eq!(m.token, "zzzz");
    }

    #[test]
    fn test_no_repeat() {
        assert!(repeat("abcdef").is_empty());
    }
}
