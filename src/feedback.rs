//! Warning and suggestion selection for weak passwords.

use crate::localize::*;
use crate::matching::{DictionaryPattern, Match, MatchPattern};
use crate::numerics;
use crate::scoring::Score;

/// Feedback in canonical English phrases, before localization.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct RawFeedback {
    pub warning: Option<&'static str>,
    pub suggestions: Vec<&'static str>,
}

/// Builds feedback from the decomposition when the score is weak; the
/// longest match is the one worth talking about.
pub(crate) fn feedback_for(score: Score, sequence: &[Match]) -> RawFeedback {
    if sequence.is_empty() {
        return RawFeedback {
            warning: None,
            suggestions: vec![SUGGEST_USE_FEW_WORDS, SUGGEST_NO_NEED_SYMBOLS],
        };
    }
    if u8::from(score) > 2 {
        return RawFeedback::default();
    }

    let mut longest = &sequence[0];
    for m in &sequence[1..] {
        if m.token.chars().count() > longest.token.chars().count() {
            longest = m;
        }
    }

    let mut feedback = match_feedback(longest, sequence.len() == 1, score);
    feedback.suggestions.insert(0, SUGGEST_ADD_ANOTHER_WORD);
    feedback
}

fn match_feedback(m: &Match, is_sole: bool, score: Score) -> RawFeedback {
    match &m.pattern {
        MatchPattern::Dictionary(d) => {
            dictionary_feedback(&m.token, d, is_sole, score, false, false)
        }
        MatchPattern::ReverseDictionary(d) => {
            dictionary_feedback(&m.token, d, is_sole, score, true, false)
        }
        MatchPattern::L33t(l) => {
            dictionary_feedback(&m.token, &l.dictionary, is_sole, score, false, true)
        }
        MatchPattern::Spatial(s) => RawFeedback {
            warning: Some(if s.turns == 1 {
                WARN_STRAIGHT_ROW
            } else {
                WARN_SHORT_KEYBOARD_PATTERN
            }),
            suggestions: vec![SUGGEST_LONGER_KEYBOARD_PATTERN],
        },
        MatchPattern::Repeat(r) => RawFeedback {
            warning: Some(if r.base_token.chars().count() == 1 {
                WARN_REPEATS_AAA
            } else {
                WARN_REPEATS_ABCABC
            }),
            suggestions: vec![SUGGEST_AVOID_REPEATS],
        },
        MatchPattern::Sequence(_) => RawFeedback {
            warning: Some(WARN_SEQUENCES),
            suggestions: vec![SUGGEST_AVOID_SEQUENCES],
        },
        MatchPattern::Regex(r) if r.name == "year" => RawFeedback {
            warning: Some(WARN_RECENT_YEARS),
            suggestions: vec![SUGGEST_AVOID_DATES_YEARS],
        },
        MatchPattern::Date(_) => RawFeedback {
            warning: Some(WARN_DATES),
            suggestions: vec![SUGGEST_AVOID_DATES_YEARS],
        },
        _ => RawFeedback::default(),
    }
}

fn dictionary_feedback(
    token: &str,
    d: &DictionaryPattern,
    is_sole: bool,
    score: Score,
    reversed: bool,
    l33t: bool,
) -> RawFeedback {
    let warning = match d.dictionary_name.as_str() {
        "passwords" => {
            if is_sole && !reversed && !l33t {
                if d.rank <= 10 {
                    Some(WARN_TOP10_PASSWORD)
                } else if d.rank <= 100 {
                    Some(WARN_TOP100_PASSWORD)
                } else {
                    Some(WARN_VERY_COMMON_PASSWORD)
                }
            } else if u8::from(score) <= 1 {
                Some(WARN_SIMILAR_TO_COMMON)
            } else {
                None
            }
        }
        "english" => {
            if is_sole {
                Some(WARN_WORD_BY_ITSELF)
            } else {
                None
            }
        }
        "male_names" | "female_names" | "surnames" => {
            if is_sole {
                Some(WARN_NAMES_BY_THEMSELVES)
            } else {
                Some(WARN_COMMON_NAMES)
            }
        }
        "user_inputs" => Some(WARN_USER_INPUT),
        _ => None,
    };

    let mut suggestions = Vec::new();
    if numerics::START_UPPER.is_match(token) {
        suggestions.push(SUGGEST_CAPITALIZATION);
    }
    if numerics::ALL_UPPER.is_match(token) && token.to_lowercase() != token {
        suggestions.push(SUGGEST_ALL_UPPERCASE);
    }
    if reversed {
        suggestions.push(SUGGEST_REVERSED_WORDS);
    }
    if l33t {
        suggestions.push(SUGGEST_PREDICTABLE_SUBSTITUTIONS);
    }

    RawFeedback {
        warning,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{L33tPattern, RepeatPattern, SpatialPattern};

    fn dictionary_match(
        token: &str,
        rank: usize,
        dictionary_name: &str,
    ) -> Match {
        Match {
            pattern: MatchPattern::Dictionary(DictionaryPattern {
                matched_word: token.to_lowercase(),
                rank,
                dictionary_name: dictionary_name.to_string(),
                base_entropy: (rank as f64).log2(),
                uppercase_entropy: 0.0,
            }),
            i: 0,
            j: token.chars().count() - 1,
            token: token.to_string(),
            entropy: (rank as f64).log2(),
        }
    }

    #[test]
    fn test_strong_passwords_get_no_feedback() {
        let m = dictionary_match("hello", 3, "passwords");
        let feedback = feedback_for(Score::Three, &[m]);
        assert_eq!(feedback, RawFeedback::default());
    }

    #[test]
    fn test_sole_common_password_warns_by_rank() {
        let top = dictionary_match("123456", 1, "passwords");
        assert_eq!(
            feedback_for(Score::Zero, std::slice::from_ref(&top)).warning,
            Some(WARN_TOP10_PASSWORD)
        );
        let mid = dictionary_match("superman", 55, "passwords");
        assert_eq!(
            feedback_for(Score::Zero, std::slice::from_ref(&mid)).warning,
            Some(WARN_TOP100_PASSWORD)
        );
        let tail = dictionary_match("sunflower", 550, "passwords");
        assert_eq!(
            feedback_for(Score::Zero, std::slice::from_ref(&tail)).warning,
            Some(WARN_VERY_COMMON_PASSWORD)
        );
    }

    #[test]
    fn test_accompanied_common_password_softens_warning() {
        let word = dictionary_match("hunter", 30, "passwords");
        let filler = Match {
            pattern: MatchPattern::BruteForce,
            i: 6,
            j: 6,
            token: "2".to_string(),
            entropy: 10f64.log2(),
        };
        let feedback = feedback_for(Score::Zero, &[word, filler]);
        assert_eq!(feedback.warning, Some(WARN_SIMILAR_TO_COMMON));
        assert_eq!(feedback.suggestions[0], SUGGEST_ADD_ANOTHER_WORD);
    }

    #[test]
    fn test_l33t_match_inherits_dictionary_warning_and_adds_suggestion() {
        let base = DictionaryPattern {
            matched_word: "password".to_string(),
            rank: 2,
            dictionary_name: "passwords".to_string(),
            base_entropy: 1.0,
            uppercase_entropy: 0.0,
        };
        let m = Match {
            pattern: MatchPattern::L33t(L33tPattern {
                dictionary: base,
                subs: [('@', 'a'), ('0', 'o')].into_iter().collect(),
                l33t_entropy: 1.0,
            }),
            i: 0,
            j: 7,
            token: "p@ssw0rd".to_string(),
            entropy: 2.0,
        };
        let feedback = feedback_for(Score::Zero, &[m]);
        assert_eq!(feedback.warning, Some(WARN_SIMILAR_TO_COMMON));
        assert!(feedback
            .suggestions
            .contains(&SUGGEST_PREDICTABLE_SUBSTITUTIONS));
    }

    #[test]
    fn test_spatial_warning_depends_on_turns() {
        let straight = Match {
            pattern: MatchPattern::Spatial(SpatialPattern {
                graph: "qwerty".to_string(),
                turns: 1,
                shifted_count: 0,
            }),
            i: 0,
            j: 5,
            token: "qwerty".to_string(),
            entropy: 11.0,
        };
        let feedback = feedback_for(Score::Zero, std::slice::from_ref(&straight));
        assert_eq!(feedback.warning, Some(WARN_STRAIGHT_ROW));
        assert!(feedback.suggestions.contains(&SUGGEST_LONGER_KEYBOARD_PATTERN));

        let mut turny = straight.clone();
        turny.pattern = MatchPattern::Spatial(SpatialPattern {
            graph: "qwerty".to_string(),
            turns: 3,
            shifted_count: 0,
        });
        assert_eq!(
            feedback_for(Score::Zero, &[turny]).warning,
            Some(WARN_SHORT_KEYBOARD_PATTERN)
        );
    }

    #[test]
    fn test_repeat_warning_depends_on_unit_length() {
        let single = Match {
            pattern: MatchPattern::Repeat(RepeatPattern {
                base_token: "a".to_string(),
                repeat_count: 4,
            }),
            i: 0,
            j: 3,
            token: "aaaa".to_string(),
            entropy: 6.7,
        };
        assert_eq!(
            feedback_for(Score::Zero, std::slice::from_ref(&single)).warning,
            Some(WARN_REPEATS_AAA)
        );
    }

    #[test]
    fn test_capitalization_advice() {
        let m = dictionary_match("Hello", 3, "english");
        let feedback = feedback_for(Score::Zero, &[m]);
        assert_eq!(feedback.warning, Some(WARN_WORD_BY_ITSELF));
        assert!(feedback.suggestions.contains(&SUGGEST_CAPITALIZATION));

        let m = dictionary_match("HELLO", 3, "english");
        let feedback = feedback_for(Score::Zero, &[m]);
        assert!(feedback.suggestions.contains(&SUGGEST_ALL_UPPERCASE));
    }

    #[test]
    fn test_empty_sequence_gets_generic_suggestions() {
        let feedback = feedback_for(Score::Zero, &[]);
        assert!(feedback.warning.is_none());
        assert_eq!(
            feedback.suggestions,
            vec![SUGGEST_USE_FEW_WORDS, SUGGEST_NO_NEED_SYMBOLS]
        );
    }
}
