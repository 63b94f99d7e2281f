use std::cmp;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::matching::dictionary::DictionaryMatcher;
use crate::matching::{L33tPattern, Match, MatchPattern, Matcher};
use crate::numerics;

/// Base character to the l33t glyphs that can stand in for it.
const L33T_TABLE: [(char, &str); 13] = [
    ('a', "4@"),
    ('b', "86"),
    ('c', "({[<"),
    ('e', "3"),
    ('g', "69"),
    ('i', "1!|"),
    ('l', "1|7"),
    ('o', "0"),
    ('q', "9"),
    ('s', "$5"),
    ('t', "+7"),
    ('x', "%"),
    ('z', "2"),
];

/// Undoes l33t substitutions and re-runs the dictionary matchers over the
/// translated password.
pub(crate) struct L33tMatcher {
    dictionaries: Vec<Arc<DictionaryMatcher>>,
}

impl L33tMatcher {
    pub(crate) fn new(dictionaries: Vec<Arc<DictionaryMatcher>>) -> L33tMatcher {
        L33tMatcher { dictionaries }
    }
}

impl Matcher for L33tMatcher {
    fn match_password(&self, password: &str) -> Vec<Match> {
        let chars: Vec<char> = password.chars().collect();
        let relevant = relevant_subtable(&chars);
        if relevant.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<Match> = Vec::new();
        for mapping in enumerate_mappings(&relevant) {
            if mapping.is_empty() {
                continue;
            }
            let translated: String = chars
                .iter()
                .map(|c| mapping.get(c).copied().unwrap_or(*c))
                .collect();
            for dictionary in &self.dictionaries {
                for hit in dictionary.match_password(&translated) {
                    let token: String = chars[hit.i..=hit.j].iter().collect();
                    let subs: BTreeMap<char, char> = mapping
                        .iter()
                        .filter(|(l33t, _)| token.contains(**l33t))
                        .map(|(l33t, base)| (*l33t, *base))
                        .collect();
                    // a hit that used no substitution is already covered
                    // by the plain dictionary matcher
                    if subs.is_empty() {
                        continue;
                    }
                    // different mappings can reproduce the same hit;
                    // collapse identical consecutive emissions
                    if matches
                        .last()
                        .map_or(false, |prev| {
                            prev.i == hit.i && prev.j == hit.j && prev.token == token
                        })
                    {
                        continue;
                    }
                    let mut dictionary_pattern = match &hit.pattern {
                        MatchPattern::Dictionary(d) => d.clone(),
                        _ => continue,
                    };
                    let l33t_entropy = substitution_entropy(&token, &subs);
                    let uppercase_entropy = numerics::uppercase_entropy(&token);
                    // rebase the capitalization cost onto the original
                    // glyphs, then charge for the substitutions
                    let entropy = hit.entropy - dictionary_pattern.uppercase_entropy
                        + uppercase_entropy
                        + l33t_entropy;
                    dictionary_pattern.uppercase_entropy = uppercase_entropy;
                    matches.push(Match {
                        pattern: MatchPattern::L33t(L33tPattern {
                            dictionary: dictionary_pattern,
                            subs,
                            l33t_entropy,
                        }),
                        i: hit.i,
                        j: hit.j,
                        token,
                        entropy,
                    });
                }
            }
        }
        matches
    }
}

/// The substitution table restricted to l33t glyphs present in the
/// password.
fn relevant_subtable(chars: &[char]) -> Vec<(char, Vec<char>)> {
    L33T_TABLE
        .iter()
        .filter_map(|(base, l33ts)| {
            let present: Vec<char> = l33ts.chars().filter(|l| chars.contains(l)).collect();
            if present.is_empty() {
                None
            } else {
                Some((*base, present))
            }
        })
        .collect()
}

/// Every distinct mapping from the password's l33t glyphs back to a
/// single base character. A glyph claimed by several bases forks the
/// mapping once per base.
fn enumerate_mappings(relevant: &[(char, Vec<char>)]) -> Vec<BTreeMap<char, char>> {
    let mut mappings: Vec<BTreeMap<char, char>> = vec![BTreeMap::new()];
    for (base, l33ts) in relevant {
        for &l33t in l33ts {
            let mut forked = Vec::new();
            for mapping in &mut mappings {
                if mapping.contains_key(&l33t) {
                    let mut duplicate = mapping.clone();
                    duplicate.insert(l33t, *base);
                    forked.push(duplicate);
                } else {
                    mapping.insert(l33t, *base);
                }
            }
            mappings.extend(forked);
        }
    }
    mappings
}

/// Bits charged for the substitutions used inside `token`.
///
/// The glyph and base counts are running totals: each pair sees the
/// counts of every pair before it. Floor of one bit.
fn substitution_entropy(token: &str, subs: &BTreeMap<char, char>) -> f64 {
    let mut possibilities: u64 = 0;
    let mut subbed = 0;
    let mut unsubbed = 0;
    for (l33t, base) in subs {
        subbed += token.chars().filter(|c| c == l33t).count();
        unsubbed += token.chars().filter(|c| c == base).count();
        for i in 0..=cmp::min(subbed, unsubbed) {
            possibilities = possibilities.saturating_add(numerics::binomial(subbed + unsubbed, i));
        }
    }
    f64::max(1.0, (possibilities as f64).log2())
}
