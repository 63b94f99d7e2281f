//! The match model shared by every pattern matcher, and the factory that
//! assembles the default matcher set.

use std::collections::BTreeMap;
use std::sync::Arc;

use zeroize::Zeroize;

use crate::frequency_lists::{DictionarySource, USER_INPUTS_DICTIONARY};
use crate::EngineError;

pub(crate) mod date;
pub(crate) mod dictionary;
pub(crate) mod l33t;
pub(crate) mod regex;
pub(crate) mod repeat;
pub(crate) mod sequence;
pub(crate) mod spatial;

use dictionary::{DictionaryMatcher, RankedDictionary, ReverseDictionaryMatcher};
use l33t::L33tMatcher;

/// A single pattern found in a password.
///
/// `i` and `j` are inclusive code-point indices; `token` is the exact
/// substring `password[i..=j]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "ser",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct Match {
    /// Which matcher produced this match, with its pattern-specific data.
    pub pattern: MatchPattern,
    /// Index of the first code point of the token.
    pub i: usize,
    /// Index of the last code point of the token.
    pub j: usize,
    /// The matched substring.
    pub token: String,
    /// Estimated bits an attacker needs to cover this token.
    pub entropy: f64,
}

impl Drop for Match {
    fn drop(&mut self) {
        self.token.zeroize();
        match &mut self.pattern {
            MatchPattern::Dictionary(d) | MatchPattern::ReverseDictionary(d) => {
                d.matched_word.zeroize();
            }
            MatchPattern::L33t(l) => l.dictionary.matched_word.zeroize(),
            MatchPattern::Repeat(r) => r.base_token.zeroize(),
            _ => {}
        }
    }
}

/// Tagged pattern variants, one per matcher.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "ser",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub enum MatchPattern {
    /// A word found in a ranked word list.
    Dictionary(DictionaryPattern),
    /// A word found in a ranked word list, spelled backwards.
    ReverseDictionary(DictionaryPattern),
    /// A dictionary word reached through l33t substitutions.
    L33t(L33tPattern),
    /// A run of adjacent keys on some keyboard layout.
    Spatial(SpatialPattern),
    /// A repeated unit, `abcabcabc` style.
    Repeat(RepeatPattern),
    /// An ascending or descending alphabet run.
    Sequence(SequencePattern),
    /// A generic regex-defined pattern (digit runs, year forms).
    Regex(RegexPattern),
    /// A calendar date, with or without separators.
    Date(DatePattern),
    /// Synthetic filler for stretches no matcher explains.
    BruteForce,
}

impl MatchPattern {
    /// The tag string identifying this variant.
    pub fn name(&self) -> &'static str {
        match self {
            MatchPattern::Dictionary(_) => "dictionary",
            MatchPattern::ReverseDictionary(_) => "reverse_dictionary",
            MatchPattern::L33t(_) => "l33t",
            MatchPattern::Spatial(_) => "spatial",
            MatchPattern::Repeat(_) => "repeat",
            MatchPattern::Sequence(_) => "sequence",
            MatchPattern::Regex(_) => "regex",
            MatchPattern::Date(_) => "date",
            MatchPattern::BruteForce => "bruteforce",
        }
    }
}

/// Payload of dictionary and reverse-dictionary matches.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "ser",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct DictionaryPattern {
    /// The lowercase form that was found in the list.
    pub matched_word: String,
    /// Rank of the word in its list; 1 is the most common.
    pub rank: usize,
    /// Which list the word came from.
    pub dictionary_name: String,
    /// `log2(rank)`.
    pub base_entropy: f64,
    /// Extra bits charged for the token's capitalization scheme.
    pub uppercase_entropy: f64,
}

/// Payload of l33t matches; extends the underlying dictionary match.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "ser",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct L33tPattern {
    /// The dictionary match found after undoing the substitutions.
    pub dictionary: DictionaryPattern,
    /// The substitutions actually used inside the token, l33t glyph to
    /// base character.
    pub subs: BTreeMap<char, char>,
    /// Extra bits charged for the substitutions.
    pub l33t_entropy: f64,
}

/// Payload of spatial matches.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "ser",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct SpatialPattern {
    /// Name of the keyboard layout the run was found on.
    pub graph: String,
    /// Number of direction changes along the run, first step included.
    pub turns: usize,
    /// Number of steps landing on a shifted character.
    pub shifted_count: usize,
}

/// Payload of repeat matches.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "ser",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct RepeatPattern {
    /// The repeating unit.
    pub base_token: String,
    /// How many times the unit occurs; `base_token` repeated this many
    /// times reproduces the token.
    pub repeat_count: usize,
}

/// Payload of sequence matches.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "ser",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct SequencePattern {
    /// Which alphabet the run lives in: `lower`, `upper` or `digits`.
    pub sequence_name: String,
    /// Size of that alphabet.
    pub sequence_size: usize,
    /// Whether the run ascends through the alphabet.
    pub ascending: bool,
}

/// Payload of regex matches.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "ser",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct RegexPattern {
    /// Which configured pattern fired: `digits` or `year`.
    pub name: String,
}

/// Payload of date matches.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "ser",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct DatePattern {
    /// Four-digit year.
    pub year: i32,
    /// Month, 1-12.
    pub month: i32,
    /// Day of month, 1-31.
    pub day: i32,
    /// The separator between the fields; empty when the date is a bare
    /// digit run.
    pub separator: String,
}

/// A pattern matcher over a whole password.
pub trait Matcher: Send + Sync {
    /// Every candidate match found in `password`. Candidates may overlap;
    /// the scoring search picks the cheapest cover.
    fn match_password(&self, password: &str) -> Vec<Match>;
}

/// Code-point index of the character starting at `byte_idx`.
pub(crate) fn byte_to_char_index(s: &str, byte_idx: usize) -> usize {
    s[..byte_idx].chars().count()
}

/// Holds the long-lived matchers and builds per-request matcher lists.
pub(crate) struct MatcherFactory {
    cached: Vec<Arc<dyn Matcher>>,
}

impl MatcherFactory {
    pub(crate) fn new(source: &dyn DictionarySource) -> Result<MatcherFactory, EngineError> {
        let mut dictionary_matchers = Vec::new();
        for name in crate::frequency_lists::BUILT_IN_DICTIONARIES {
            let words = source
                .load(name)
                .map_err(|source| EngineError::DictionaryLoad {
                    name: name.to_string(),
                    source,
                })?;
            dictionary_matchers.push(Arc::new(DictionaryMatcher::new(
                name,
                RankedDictionary::from_words(words),
            )));
        }

        let mut cached: Vec<Arc<dyn Matcher>> = Vec::new();
        for matcher in &dictionary_matchers {
            cached.push(matcher.clone());
        }
        cached.push(Arc::new(ReverseDictionaryMatcher::new(
            dictionary_matchers.clone(),
        )));
        cached.push(Arc::new(L33tMatcher::new(dictionary_matchers)));
        cached.push(Arc::new(spatial::SpatialMatcher));
        cached.push(Arc::new(repeat::RepeatMatcher));
        cached.push(Arc::new(sequence::SequenceMatcher));
        cached.push(Arc::new(regex::RegexMatcher::digits()));
        cached.push(Arc::new(regex::RegexMatcher::year()));
        cached.push(Arc::new(date::DateMatcher));

        Ok(MatcherFactory { cached })
    }

    /// The cached matcher list, plus a dictionary matcher and an l33t
    /// companion over `user_inputs` when any were given.
    pub(crate) fn create_matchers(&self, user_inputs: &[&str]) -> Vec<Arc<dyn Matcher>> {
        let mut matchers = self.cached.clone();
        if !user_inputs.is_empty() {
            let words = user_inputs.iter().map(|w| w.to_lowercase());
            let user_matcher = Arc::new(DictionaryMatcher::new(
                USER_INPUTS_DICTIONARY,
                RankedDictionary::from_words(words),
            ));
            matchers.push(user_matcher.clone());
            matchers.push(Arc::new(L33tMatcher::new(vec![user_matcher])));
        }
        matchers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency_lists::BuiltinSource;

    #[test]
    fn test_factory_appends_user_input_matchers() {
        let factory = MatcherFactory::new(&BuiltinSource).unwrap();
        let base = factory.create_matchers(&[]).len();
        assert_eq!(factory.create_matchers(&["lars", "lars@example.com"]).len(), base + 2);
    }

    #[test]
    fn test_user_inputs_are_matched() {
        let factory = MatcherFactory::new(&BuiltinSource).unwrap();
        let matchers = factory.create_matchers(&["Xylophone77z"]);
        let found = matchers
            .iter()
            .flat_map(|m| m.match_password("xylophone77z"))
            .any(|m| match &m.pattern {
                MatchPattern::Dictionary(d) => {
                    d.dictionary_name == USER_INPUTS_DICTIONARY && d.rank == 1
                }
                _ => false,
            });
        assert!(found);
    }

    #[test]
    fn test_pattern_names() {
        assert_eq!(MatchPattern::BruteForce.name(), "bruteforce");
    }
}
