use std::collections::HashMap;
use std::sync::Arc;

use crate::matching::{DictionaryPattern, Match, MatchPattern, Matcher};
use crate::numerics;

/// Lowercase word to rank. The first word inserted is rank 1; duplicate
/// insertions keep the first rank, so ranks stay gap-free.
pub(crate) struct RankedDictionary {
    words: HashMap<String, usize>,
}

impl RankedDictionary {
    pub(crate) fn from_words<I>(words: I) -> RankedDictionary
    where
        I: IntoIterator<Item = String>,
    {
        let mut map = HashMap::new();
        let mut rank = 1;
        for word in words {
            if !map.contains_key(&word) {
                map.insert(word, rank);
                rank += 1;
            }
        }
        RankedDictionary { words: map }
    }

    pub(crate) fn rank(&self, word: &str) -> Option<usize> {
        self.words.get(word).copied()
    }
}

/// Finds every substring of the password that appears in one ranked list.
pub(crate) struct DictionaryMatcher {
    name: &'static str,
    dictionary: RankedDictionary,
}

impl DictionaryMatcher {
    pub(crate) fn new(name: &'static str, dictionary: RankedDictionary) -> DictionaryMatcher {
        DictionaryMatcher { name, dictionary }
    }

    fn matches_on(&self, chars: &[char]) -> Vec<Match> {
        let lower: Vec<char> = chars
            .iter()
            .map(|c| c.to_lowercase().next().unwrap_or(*c))
            .collect();
        let mut matches = Vec::new();
        for i in 0..chars.len() {
            for j in i..chars.len() {
                let word: String = lower[i..=j].iter().collect();
                if let Some(rank) = self.dictionary.rank(&word) {
                    let token: String = chars[i..=j].iter().collect();
                    let base_entropy = (rank as f64).log2();
                    let uppercase_entropy = numerics::uppercase_entropy(&token);
                    matches.push(Match {
                        pattern: MatchPattern::Dictionary(DictionaryPattern {
                            matched_word: word,
                            rank,
                            dictionary_name: self.name.to_string(),
                            base_entropy,
                            uppercase_entropy,
                        }),
                        i,
                        j,
                        token,
                        entropy: base_entropy + uppercase_entropy,
                    });
                }
            }
        }
        matches
    }
}

impl Matcher for DictionaryMatcher {
    fn match_password(&self, password: &str) -> Vec<Match> {
        let chars: Vec<char> = password.chars().collect();
        self.matches_on(&chars)
    }
}

/// Runs the dictionary lookup over the reversed password and mirrors the
/// spans back. A reversed word costs one extra bit.
pub(crate) struct ReverseDictionaryMatcher {
    dictionaries: Vec<Arc<DictionaryMatcher>>,
}

impl ReverseDictionaryMatcher {
    pub(crate) fn new(dictionaries: Vec<Arc<DictionaryMatcher>>) -> ReverseDictionaryMatcher {
        ReverseDictionaryMatcher { dictionaries }
    }
}

impl Matcher for ReverseDictionaryMatcher {
    fn match_password(&self, password: &str) -> Vec<Match> {
        let reversed: String = password.chars().rev().collect();
        let n = password.chars().count();
        let mut matches = Vec::new();
        for dictionary in &self.dictionaries {
            for m in dictionary.match_password(&reversed) {
                let pattern = match &m.pattern {
                    MatchPattern::Dictionary(d) => MatchPattern::ReverseDictionary(d.clone()),
                    _ => continue,
                };
                matches.push(Match {
                    pattern,
                    i: n - 1 - m.j,
                    j: n - 1 - m.i,
                    token: m.token.chars().rev().collect(),
                    entropy: m.entropy + 1.0,
                });
            }
        }
        matches
    }
}
