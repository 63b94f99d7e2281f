//! The search for the lowest-entropy decomposition of a password.

use crate::matching::{Match, MatchPattern};
use crate::numerics;

/// Overall strength band, derived from the guess count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(
    feature = "ser",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub enum Score {
    /// Guessed in under 10^4 tries.
    Zero,
    /// Guessed in under 10^7 tries.
    One,
    /// Guessed in under 10^9 tries.
    Two,
    /// Guessed in under 10^11 tries.
    Three,
    /// Everything stronger.
    Four,
}

impl From<Score> for u8 {
    fn from(score: Score) -> u8 {
        match score {
            Score::Zero => 0,
            Score::One => 1,
            Score::Two => 2,
            Score::Three => 3,
            Score::Four => 4,
        }
    }
}

/// Banded score for a final entropy, thresholded on
/// `guesses = 0.5 * 2^entropy`.
pub(crate) fn entropy_to_score(entropy: f64) -> Score {
    let guesses = 0.5 * entropy.exp2();
    if guesses < 1e4 {
        Score::Zero
    } else if guesses < 1e7 {
        Score::One
    } else if guesses < 1e9 {
        Score::Two
    } else if guesses < 1e11 {
        Score::Three
    } else {
        Score::Four
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EntropyCalculation {
    /// Bits needed for the cheapest decomposition of the whole password.
    pub entropy: f64,
    /// The decomposition itself: non-overlapping matches covering every
    /// character, gaps filled with brute-force matches.
    pub sequence: Vec<Match>,
}

/// Finds, over all candidate matches, the non-overlapping cover of the
/// password that a guesser would exhaust soonest.
///
/// `minimum_entropy[k]` is the cheapest way to cover the prefix ending at
/// `k`; each position starts from the brute-force bound and every match
/// ending at `k` bids to improve it.
pub(crate) fn minimum_entropy_match_sequence(
    password: &str,
    matches: &[Match],
) -> EntropyCalculation {
    let chars: Vec<char> = password.chars().collect();
    let n = chars.len();
    if n == 0 {
        return EntropyCalculation {
            entropy: 0.0,
            sequence: Vec::new(),
        };
    }

    let bruteforce_cardinality = numerics::bruteforce_cardinality(password) as f64;
    let lg_bruteforce = bruteforce_cardinality.log2();

    // partition matches into sublists according to ending index j;
    // small detail: sort each sublist by i for deterministic output
    let mut matches_by_j: Vec<Vec<&Match>> = (0..n).map(|_| Vec::new()).collect();
    for m in matches {
        if m.j < n {
            matches_by_j[m.j].push(m);
        }
    }
    for sublist in &mut matches_by_j {
        sublist.sort_by_key(|m| m.i);
    }

    let mut minimum_entropy = vec![0f64; n];
    let mut best_match: Vec<Option<&Match>> = vec![None; n];
    for k in 0..n {
        // start from the brute-force upper bound: the previous prefix
        // plus one more brute-forced character
        minimum_entropy[k] = if k == 0 { 0.0 } else { minimum_entropy[k - 1] } + lg_bruteforce;
        for m in &matches_by_j[k] {
            let candidate = if m.i == 0 {
                m.entropy
            } else {
                minimum_entropy[m.i - 1] + m.entropy
            };
            if candidate < minimum_entropy[k] {
                minimum_entropy[k] = candidate;
                best_match[k] = Some(m);
            }
        }
    }

    // walk backwards, taking the winning match at each covered position
    let mut sequence: Vec<Match> = Vec::new();
    let mut k = n as i64 - 1;
    while k >= 0 {
        if let Some(m) = best_match[k as usize] {
            sequence.push(m.clone());
            k = m.i as i64 - 1;
        } else {
            k -= 1;
        }
    }
    sequence.reverse();

    let nothing_matched = sequence.is_empty();
    let sequence = fill_gaps(&chars, sequence, bruteforce_cardinality);
    // when the whole password is one brute-force match, take its entropy
    // directly: a cardinality^length overflow collapses it to infinity
    let entropy = if nothing_matched {
        sequence[0].entropy
    } else {
        minimum_entropy[n - 1]
    };
    EntropyCalculation { entropy, sequence }
}

/// Covers the stretches no matcher explained with brute-force matches.
fn fill_gaps(chars: &[char], sequence: Vec<Match>, cardinality: f64) -> Vec<Match> {
    let n = chars.len();
    if sequence.is_empty() {
        return vec![make_bruteforce_match(chars, 0, n - 1, cardinality)];
    }
    let mut filled = Vec::new();
    let mut k = 0;
    for m in sequence {
        if m.i > k {
            filled.push(make_bruteforce_match(chars, k, m.i - 1, cardinality));
        }
        k = m.j + 1;
        filled.push(m);
    }
    if k < n {
        filled.push(make_bruteforce_match(chars, k, n - 1, cardinality));
    }
    filled
}

fn make_bruteforce_match(chars: &[char], i: usize, j: usize, cardinality: f64) -> Match {
    let length = j - i + 1;
    // cardinality^length can overflow to infinity; the entropy follows it
    let entropy = cardinality.powi(length as i32).log2();
    Match {
        pattern: MatchPattern::BruteForce,
        i,
        j,
        token: chars[i..=j].iter().collect(),
        entropy,
    }
}
