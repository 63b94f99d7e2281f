use crate::matching::{Match, MatchPattern, Matcher, SequencePattern};

/// The alphabets runs are searched in. Each is also checked reversed for
/// descending runs.
const SEQUENCES: [(&str, &str); 3] = [
    ("lower", "abcdefghijklmnopqrstuvwxyz"),
    ("upper", "ABCDEFGHIJKLMNOPQRSTUVWXYZ"),
    ("digits", "01234567890"),
];

struct SequenceAlphabet {
    name: &'static str,
    chars: Vec<char>,
    size: usize,
    ascending: bool,
}

lazy_static! {
    static ref ALPHABETS: Vec<SequenceAlphabet> = SEQUENCES
        .iter()
        .flat_map(|&(name, seq)| {
            let chars: Vec<char> = seq.chars().collect();
            let reversed: Vec<char> = seq.chars().rev().collect();
            let size = chars.len();
            [
                SequenceAlphabet { name, chars, size, ascending: true },
                SequenceAlphabet { name, chars: reversed, size, ascending: false },
            ]
        })
        .collect();
}

/// Finds ascending and descending runs of consecutive alphabet members.
pub(crate) struct SequenceMatcher;

impl Matcher for SequenceMatcher {
    fn match_password(&self, password: &str) -> Vec<Match> {
        let chars: Vec<char> = password.chars().collect();
        let mut matches = Vec::new();
        let mut i = 0;
        while i + 1 < chars.len() {
            // find an alphabet in which chars[i + 1] directly follows
            // chars[i]; the first position of a character decides, as
            // with the doubled 0 in the digits alphabet
            let run = ALPHABETS.iter().find_map(|alphabet| {
                alphabet
                    .chars
                    .iter()
                    .position(|&c| c == chars[i])
                    .filter(|&pos| {
                        pos + 1 < alphabet.size && alphabet.chars[pos + 1] == chars[i + 1]
                    })
                    .map(|pos| (alphabet, pos))
            });
            match run {
                Some((alphabet, start_pos)) => {
                    let mut j = i + 1;
                    let mut pos = start_pos + 1;
                    while j + 1 < chars.len()
                        && pos + 1 < alphabet.size
                        && alphabet.chars[pos + 1] == chars[j + 1]
                    {
                        j += 1;
                        pos += 1;
                    }
                    if j - i + 1 > 2 {
                        let token: Vec<char> = chars[i..=j].to_vec();
                        matches.push(Match {
                            pattern: MatchPattern::Sequence(SequencePattern {
                                sequence_name: alphabet.name.to_string(),
                                sequence_size: alphabet.size,
                                ascending: alphabet.ascending,
                            }),
                            i,
                            j,
                            entropy: sequence_entropy(&token, alphabet.ascending),
                            token: token.into_iter().collect(),
                        });
                    }
                    i = j + 1;
                }
                None => i += 1,
            }
        }
        matches
    }
}

fn sequence_entropy(token: &[char], ascending: bool) -> f64 {
    let first = token[0];
    let mut entropy = if first == 'a' || first == '1' {
        // obvious starting points are nearly free
        1.0
    } else if first.is_ascii_digit() {
        10f64.log2()
    } else if first.is_ascii_lowercase() {
        26f64.log2()
    } else {
        26f64.log2() + 1.0
    };
    if !ascending {
        entropy += 1.0;
    }
    entropy + (token.len() as f64).log2()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(password: &str) -> Vec<Match> {
        SequenceMatcher.match_password(password)
    }

    #[test]
    fn test_ascending_lower_run() {
        let matches = sequence("abcdef");
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!((m.i, m.j), (0, 5));
        assert_eq!(m.token, "abcdef");
        match &m.pattern {
            MatchPattern::Sequence(s) => {
                assert_eq!(s.sequence_name, "lower");
                assert_eq!(s.sequence_size, 26);
                assert!(s.ascending);
            }
            other => panic!("unexpected pattern {:?}", other),
        }
        assert!((m.entropy - (1.0 + 6f64.log2())).abs() < 1e-10);
    }

    #[test]
    fn test_descending_digits() {
        let matches = sequence("6543");
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        match &m.pattern {
            MatchPattern::Sequence(s) => {
                assert_eq!(s.sequence_name, "digits");
                assert_eq!(s.sequence_size, 11);
                assert!(!s.ascending);
            }
            other => panic!("unexpected pattern {:?}", other),
        }
        // digit start, descending, length 4
        assert!((m.entropy - (10f64.log2() + 1.0 + 4f64.log2())).abs() < 1e-10);
    }

    #[test]
    fn test_embedded_run_and_cursor_advance() {
        let matches = sequence("xyqrstuvq");
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.token, "qrstuv");
        assert_eq!((m.i, m.j), (2, 7));
    }

    #[test]
    fn test_upper_run() {
        let matches = sequence("JKLM");
        assert_eq!(matches.len(), 1);
        match &matches[0].pattern {
            MatchPattern::Sequence(s) => {
                assert_eq!(s.sequence_name, "upper");
                assert!(s.ascending);
            }
            other => panic!("unexpected pattern {:?}", other),
        }
        // uppercase start pays log2(26) + 1
        assert!((matches[0].entropy - (26f64.log2() + 1.0 + 4f64.log2())).abs() < 1e-10);
    }

    #[test]
    fn test_short_runs_are_ignored() {
        assert!(sequence("ab1").is_empty());
        assert!(sequence("zy").is_empty());
    }
}
