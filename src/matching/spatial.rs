use std::cmp;

use crate::adjacency_graphs::{SpatialGraph, GRAPHS};
use crate::matching::{Match, MatchPattern, Matcher, SpatialPattern};
use crate::numerics;

/// Finds runs of physically adjacent keys on the known keyboard layouts.
pub(crate) struct SpatialMatcher;

impl Matcher for SpatialMatcher {
    fn match_password(&self, password: &str) -> Vec<Match> {
        let chars: Vec<char> = password.chars().collect();
        let mut matches = Vec::new();
        for graph in GRAPHS.iter() {
            graph_matches(&chars, graph, &mut matches);
        }
        matches
    }
}

fn graph_matches(chars: &[char], graph: &SpatialGraph, matches: &mut Vec<Match>) {
    let mut i = 0;
    while i + 1 < chars.len() {
        let mut j = i + 1;
        let mut last_direction = None;
        let mut turns = 0;
        let mut shifted_count = 0;
        while j < chars.len() {
            match graph.direction_of(chars[j - 1], chars[j]) {
                Some((direction, shifted)) => {
                    if shifted {
                        shifted_count += 1;
                    }
                    if last_direction != Some(direction) {
                        turns += 1;
                        last_direction = Some(direction);
                    }
                    j += 1;
                }
                None => break,
            }
        }
        if j - i > 2 {
            matches.push(Match {
                pattern: MatchPattern::Spatial(SpatialPattern {
                    graph: graph.name.to_string(),
                    turns,
                    shifted_count,
                }),
                i,
                j: j - 1,
                token: chars[i..j].iter().collect(),
                entropy: spatial_entropy(graph, j - i, turns, shifted_count),
            });
        }
        i = j;
    }
}

/// Bits for a run of `length` keys with `turns` direction changes and
/// `shifted_count` shifted targets, on `graph`.
fn spatial_entropy(
    graph: &SpatialGraph,
    length: usize,
    turns: usize,
    shifted_count: usize,
) -> f64 {
    let starts = graph.starting_positions as f64;
    let degree = graph.average_degree;
    let mut possibilities = 0f64;
    // count patterns of length <= L with <= T turns
    for i in 2..=length {
        let possible_turns = cmp::min(turns, i - 1);
        for j in 1..=possible_turns {
            possibilities +=
                numerics::binomial(i - 1, j - 1) as f64 * starts * degree.powi(j as i32);
        }
    }
    let mut entropy = possibilities.log2();
    if shifted_count > 0 {
        let unshifted_count = length - shifted_count;
        let shifted_possibilities: u64 = (0..=cmp::min(shifted_count, unshifted_count))
            .map(|i| numerics::binomial(length, i))
            .sum();
        entropy += (shifted_possibilities as f64).log2();
    }
    entropy
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spatial(password: &str) -> Vec<Match> {
        SpatialMatcher.match_password(password)
    }

    fn qwerty() -> &'static SpatialGraph {
        GRAPHS.iter().find(|g| g.name == "qwerty").unwrap()
    }

    #[test]
    fn test_straight_row() {
        let matches = spatial("asdfg");
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!((m.i, m.j), (0, 4));
        assert_eq!(m.token, "asdfg");
        match &m.pattern {
            MatchPattern::Spatial(s) => {
                assert_eq!(s.graph, "qwerty");
                assert_eq!(s.turns, 1);
                assert_eq!(s.shifted_count, 0);
            }
            other => panic!("unexpected pattern {:?}", other),
        }
        // one turn: sum over lengths 2..=5 of S * D
        let graph = qwerty();
        let expected = (4.0 * graph.starting_positions as f64 * graph.average_degree).log2();
        assert!((m.entropy - expected).abs() < 1e-10);
    }

    #[test]
    fn test_runs_shorter_than_three_are_ignored() {
        assert!(spatial("hu").is_empty());
        assert!(spatial("qw").is_empty());
    }

    #[test]
    fn test_turning_run() {
        let matches = spatial("qwedc");
        assert_eq!(matches.len(), 1);
        match &matches[0].pattern {
            MatchPattern::Spatial(s) => {
                // east along the top row, then south-east down to c
                assert_eq!(s.turns, 2);
            }
            other => panic!("unexpected pattern {:?}", other),
        }
    }

    #[test]
    fn test_shifted_targets_are_counted() {
        let matches = spatial("qWerty");
        assert_eq!(matches.len(), 1);
        match &matches[0].pattern {
            MatchPattern::Spatial(s) => {
                assert_eq!(s.shifted_count, 1);
                assert_eq!(s.turns, 1);
            }
            other => panic!("unexpected pattern {:?}", other),
        }
    }

    #[test]
    fn test_run_restarts_after_break() {
        let matches = spatial("asdf jkl");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].token, "asdf");
        assert_eq!(matches[1].token, "jkl");
    }

    #[test]
    fn test_keypad_run() {
        let matches = spatial("789");
        assert!(matches
            .iter()
            .any(|m| matches!(&m.pattern, MatchPattern::Spatial(s) if s.graph == "keypad")));
    }
}
