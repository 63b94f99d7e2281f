use std::cmp;

use fancy_regex::Regex;

use crate::matching::{DatePattern, Match, MatchPattern, Matcher};

pub(crate) const DATE_MIN_YEAR: i32 = 1000;
pub(crate) const DATE_MAX_YEAR: i32 = 2050;
pub(crate) const REFERENCE_YEAR: i32 = 2017;
const MIN_YEAR_SPACE: i32 = 10;

lazy_static! {
    // day, month and year in some order, two matching separators between
    static ref SEPARATOR_DATE: Regex =
        Regex::new(r"^(\d{1,4})([\s/\\_.-])(\d{1,2})\2(\d{1,4})$").unwrap();
}

/// How a bare digit run of a given length is cut into three fields.
fn date_splits(length: usize) -> &'static [(usize, usize)] {
    match length {
        4 => &[(1, 2), (2, 3)],
        5 => &[(1, 3), (2, 3)],
        6 => &[(1, 2), (2, 4), (4, 5)],
        7 => &[(1, 3), (2, 3), (4, 5), (4, 6)],
        8 => &[(2, 4), (4, 6)],
        _ => &[],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Dmy {
    day: i32,
    month: i32,
    year: i32,
}

/// Finds 4-8 digit and separator-delimited dates.
pub(crate) struct DateMatcher;

impl Matcher for DateMatcher {
    fn match_password(&self, password: &str) -> Vec<Match> {
        let chars: Vec<char> = password.chars().collect();
        let n = chars.len();
        let mut matches: Vec<Match> = Vec::new();

        // dates without separators: every all-digit window of 4-8
        // characters, resolved to the candidate nearest the reference
        // year
        if n >= 4 {
            for i in 0..=(n - 4) {
                for length in 4..=8 {
                    let j = i + length - 1;
                    if j >= n {
                        break;
                    }
                    let token: String = chars[i..=j].iter().collect();
                    if !token.chars().all(|c| c.is_ascii_digit()) {
                        continue;
                    }
                    let candidates: Vec<Dmy> = date_splits(length)
                        .iter()
                        .filter_map(|&(k, l)| {
                            let a = token[..k].parse().ok()?;
                            let b = token[k..l].parse().ok()?;
                            let c = token[l..].parse().ok()?;
                            map_to_dmy(a, b, c)
                        })
                        .collect();
                    let best = candidates
                        .into_iter()
                        .min_by_key(|dmy| (dmy.year - REFERENCE_YEAR).abs());
                    if let Some(dmy) = best {
                        matches.push(date_match(i, j, token, dmy, String::new()));
                    }
                }
            }
        }

        // dates with separators: 6-10 character windows
        if n >= 6 {
            for i in 0..=(n - 6) {
                for length in 6..=10 {
                    let j = i + length - 1;
                    if j >= n {
                        break;
                    }
                    let token: String = chars[i..=j].iter().collect();
                    let caps = match SEPARATOR_DATE.captures(&token) {
                        Ok(Some(caps)) => caps,
                        _ => continue,
                    };
                    let parsed = (
                        caps.get(1).unwrap().as_str().parse(),
                        caps.get(3).unwrap().as_str().parse(),
                        caps.get(4).unwrap().as_str().parse(),
                    );
                    let separator = caps.get(2).unwrap().as_str().to_string();
                    if let (Ok(a), Ok(b), Ok(c)) = parsed {
                        if let Some(dmy) = map_to_dmy(a, b, c) {
                            matches.push(date_match(i, j, token, dmy, separator));
                        }
                    }
                }
            }
        }

        // a date inside a larger date is noise; keep the widest spans
        let contained: Vec<usize> = matches
            .iter()
            .enumerate()
            .filter(|(idx, m)| {
                matches
                    .iter()
                    .enumerate()
                    .any(|(other_idx, other)| {
                        other_idx != *idx && other.i <= m.i && other.j >= m.j
                    })
            })
            .map(|(idx, _)| idx)
            .collect();
        let mut idx = 0;
        matches.retain(|_| {
            let keep = !contained.contains(&idx);
            idx += 1;
            keep
        });
        matches
    }
}

fn date_match(i: usize, j: usize, token: String, dmy: Dmy, separator: String) -> Match {
    let year_space = cmp::max((dmy.year - REFERENCE_YEAR).abs(), MIN_YEAR_SPACE);
    let mut entropy = (year_space as f64 * 365.0).log2();
    if !separator.is_empty() {
        entropy += 2.0;
    }
    Match {
        pattern: MatchPattern::Date(DatePattern {
            year: dmy.year,
            month: dmy.month,
            day: dmy.day,
            separator,
        }),
        i,
        j,
        token,
        entropy,
    }
}

/// Resolve three integer fields to a plausible day/month/year, or reject
/// the triple.
fn map_to_dmy(a: i32, b: i32, c: i32) -> Option<Dmy> {
    // the middle field can only ever be a day or a month
    if b > 31 || b <= 0 {
        return None;
    }
    let mut over_12 = 0;
    let mut over_31 = 0;
    let mut under_1 = 0;
    for v in [a, b, c] {
        if (99 < v && v < DATE_MIN_YEAR) || v > DATE_MAX_YEAR {
            return None;
        }
        if v > 31 {
            over_31 += 1;
        }
        if v > 12 {
            over_12 += 1;
        }
        if v <= 0 {
            under_1 += 1;
        }
    }
    if over_31 >= 2 || over_12 == 3 || under_1 >= 2 {
        return None;
    }

    let year_splits = [(c, (a, b)), (a, (b, c))];
    for (year, rest) in year_splits {
        if (DATE_MIN_YEAR..=DATE_MAX_YEAR).contains(&year) {
            // a four-digit year can't double as a day or month, so a
            // failed remainder kills the whole triple
            return map_to_dm(rest).map(|(day, month)| Dmy { day, month, year });
        }
    }
    for (year, rest) in year_splits {
        if let Some((day, month)) = map_to_dm(rest) {
            return Some(Dmy {
                day,
                month,
                year: expand_two_digit_year(year),
            });
        }
    }
    None
}

fn map_to_dm((a, b): (i32, i32)) -> Option<(i32, i32)> {
    for (day, month) in [(a, b), (b, a)] {
        if (1..=31).contains(&day) && (1..=12).contains(&month) {
            return Some((day, month));
        }
    }
    None
}

fn expand_two_digit_year(year: i32) -> i32 {
    if year > 99 {
        year
    } else if year > 50 {
        year + 1900
    } else {
        year + 2000
    }
}
